use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::modules::timers::use_cases::stop_timer::command::StopTimer;
use crate::modules::timers::use_cases::stop_timer::handler::StopOutcome;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct StopTimerBody {
    pub user_id: String,
    pub task_id: Option<String>,
}

/// Stopping with nothing running reports `not_running` with a 200; retrying
/// a stop is always safe.
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StopTimerResponse {
    Stopped {
        #[serde(skip_serializing_if = "Option::is_none")]
        worklog_id: Option<String>,
    },
    NotRunning,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<StopTimerBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = StopTimer {
        user_id: body.user_id,
        task_id: body.task_id,
        stopped_at: Utc::now().timestamp_millis(),
    };

    match state.stop_timer.handle(command).await {
        Ok(StopOutcome::Stopped { worklog }) => Json(StopTimerResponse::Stopped {
            worklog_id: worklog.map(|entry| entry.id),
        })
        .into_response(),
        Ok(StopOutcome::NotRunning) => Json(StopTimerResponse::NotRunning).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
