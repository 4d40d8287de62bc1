use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;

use crate::modules::board::use_cases::move_task::command::MoveTask;
use crate::modules::board::use_cases::move_task::handler::MoveTaskError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct MoveTaskBody {
    pub project_id: String,
    pub task_id: String,
    pub dest_bucket_id: String,
    pub dest_index: usize,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<MoveTaskBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = MoveTask {
        project_id: body.project_id,
        task_id: body.task_id,
        dest_bucket_id: body.dest_bucket_id,
        dest_index: body.dest_index,
        moved_at: Utc::now().timestamp_millis(),
    };

    match state.move_task.handle(command).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(MoveTaskError::NotFound { .. } | MoveTaskError::Ordering(_)) => {
            StatusCode::NOT_FOUND.into_response()
        }
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
