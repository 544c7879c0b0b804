pub mod memory;
pub mod migrations;
pub mod sheets;
pub mod sqlite;

use async_trait::async_trait;

use crate::errors::StoreError;

/// How the store should treat appended cell text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueInputMode {
    /// Cells are kept exactly as entered.
    Raw,
    /// The store may auto-type cells (numbers, dates) as a person typing them would.
    UserEntered,
}

impl ValueInputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueInputMode::Raw => "RAW",
            ValueInputMode::UserEntered => "USER_ENTERED",
        }
    }
}

/// Append-only table of text rows. The first row of every table is its header.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Creates `table` with `header` as its first row if it does not exist yet.
    async fn ensure_table(&self, table: &str, header: &[&str]) -> Result<(), StoreError>;

    /// All rows in append order, header included.
    async fn read_all_rows(&self, table: &str) -> Result<Vec<Vec<String>>, StoreError>;

    async fn append_row(
        &self,
        table: &str,
        values: &[String],
        mode: ValueInputMode,
    ) -> Result<(), StoreError>;
}
