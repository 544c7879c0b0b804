use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::models::{CheckAvailabilityArgs, CreateBookingArgs, ToolResponse};
use crate::services::tools;
use crate::state::AppState;

// GET /tools
pub async fn list_tools() -> Json<Value> {
    Json(tools::tool_declarations())
}

// POST /tools/check_availability
pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CheckAvailabilityArgs>, JsonRejection>,
) -> Json<ToolResponse> {
    let args = match payload {
        Ok(Json(args)) => args,
        Err(rejection) => return rejected(tools::CHECK_AVAILABILITY, rejection),
    };
    tracing::info!(check_in = %args.check_in, check_out = %args.check_out, "check_availability called");

    let result = tools::check_availability_tool(&state.engine, &args).await;
    Json(ToolResponse { result })
}

// POST /tools/create_booking
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateBookingArgs>, JsonRejection>,
) -> Json<ToolResponse> {
    let args = match payload {
        Ok(Json(args)) => args,
        Err(rejection) => return rejected(tools::CREATE_BOOKING, rejection),
    };
    tracing::info!(
        name = %args.name,
        check_in = %args.check_in,
        check_out = %args.check_out,
        "create_booking called"
    );

    let result = tools::create_booking_tool(&state.engine, args).await;
    Json(ToolResponse { result })
}

/// Bodies axum cannot decode still get a 200 with an `ERROR:` result.
fn rejected(tool: &str, rejection: JsonRejection) -> Json<ToolResponse> {
    tracing::warn!(tool, error = %rejection.body_text(), "unreadable tool arguments");
    Json(ToolResponse {
        result: format!("ERROR: invalid tool arguments: {}", rejection.body_text()),
    })
}
