use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use staybook::config::AppConfig;
use staybook::handlers;
use staybook::services::booking::BookingEngine;
use staybook::state::AppState;
use staybook::store::memory::MemoryStore;
use staybook::store::sheets::SheetsStore;
use staybook::store::sqlite::SqliteStore;
use staybook::store::BookingStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let store: Arc<dyn BookingStore> = match config.store_backend.as_str() {
        "sqlite" => {
            tracing::info!("using SQLite booking store (path: {})", config.database_url);
            Arc::new(SqliteStore::open(&config.database_url)?)
        }
        "memory" => {
            tracing::warn!("using in-memory booking store, bookings are lost on restart");
            Arc::new(MemoryStore::new())
        }
        "sheets" => {
            if config.service_account_json.is_none() || config.sheet_id.is_none() {
                tracing::warn!(
                    "GSPREAD_SERVICE_ACCOUNT_JSON or BOOKINGS_SHEET_ID not set, store calls will fail"
                );
            }
            tracing::info!("using Google Sheets booking store");
            Arc::new(SheetsStore::from_config(&config))
        }
        other => anyhow::bail!("unknown BOOKING_STORE: {other} (expected sheets, sqlite or memory)"),
    };

    let engine = BookingEngine::new(
        store,
        config.worksheet_name.clone(),
        Duration::from_secs(config.store_timeout_secs),
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        engine,
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/tools", get(handlers::tools::list_tools))
        .route(
            "/tools/check_availability",
            post(handlers::tools::check_availability),
        )
        .route("/tools/create_booking", post(handlers::tools::create_booking))
        .route("/agent/instructions", get(handlers::agent::instructions))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
