use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::services::prompts;
use crate::state::AppState;

#[derive(Serialize)]
pub struct InstructionsResponse {
    instructions: String,
    session_instructions: &'static str,
}

// GET /agent/instructions
pub async fn instructions(State(state): State<Arc<AppState>>) -> Json<InstructionsResponse> {
    Json(InstructionsResponse {
        instructions: prompts::agent_instructions(state.engine.today()),
        session_instructions: prompts::session_instructions(),
    })
}
