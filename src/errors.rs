use std::time::Duration;

/// Free-form date text that none of the interpreter's rules could resolve.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    #[error("no date text provided")]
    Missing,

    #[error("could not parse date: {0}")]
    Unrecognized(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("store API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("malformed store data: {0}")]
    Malformed(String),

    #[error("store call timed out after {0:?}")]
    Timeout(Duration),

    #[error("lock error: {0}")]
    Lock(String),

    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    DateParse(#[from] DateParseError),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BookingError {
    /// Text relayed to the dialogue layer. Store failures stay generic so
    /// credentials and endpoints are never spoken back to a guest.
    pub fn tool_message(&self) -> String {
        match self {
            BookingError::DateParse(e) => e.to_string(),
            BookingError::Validation(msg) => msg.clone(),
            BookingError::Store(_) => "booking store unavailable".to_string(),
        }
    }
}
