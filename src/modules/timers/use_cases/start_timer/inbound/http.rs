use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::modules::timers::use_cases::start_timer::command::StartTimer;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct StartTimerBody {
    pub user_id: String,
    pub task_id: String,
    pub project_id: String,
}

#[derive(Serialize)]
pub struct StartTimerResponse {
    pub replaced: bool,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<StartTimerBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = StartTimer {
        user_id: body.user_id,
        task_id: body.task_id,
        project_id: body.project_id,
        started_at: Utc::now().timestamp_millis(),
    };

    match state.start_timer.handle(command).await {
        Ok(outcome) => Json(StartTimerResponse {
            replaced: outcome.replaced,
        })
        .into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
