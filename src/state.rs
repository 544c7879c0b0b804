use crate::config::AppConfig;
use crate::services::booking::BookingEngine;

pub struct AppState {
    pub config: AppConfig,
    pub engine: BookingEngine,
}
