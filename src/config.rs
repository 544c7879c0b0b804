use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub store_backend: String,
    pub database_url: String,
    pub service_account_json: Option<String>,
    pub sheet_id: Option<String>,
    pub worksheet_name: String,
    pub store_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            store_backend: env::var("BOOKING_STORE").unwrap_or_else(|_| "sheets".to_string()),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "bookings.db".to_string()),
            service_account_json: non_empty(env::var("GSPREAD_SERVICE_ACCOUNT_JSON").ok()),
            sheet_id: non_empty(env::var("BOOKINGS_SHEET_ID").ok()),
            worksheet_name: non_empty(env::var("BOOKINGS_WORKSHEET_NAME").ok())
                .unwrap_or_else(|| "bookings".to_string()),
            store_timeout_secs: env::var("STORE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
