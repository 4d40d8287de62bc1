use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::board::use_cases::create_task::command::CreateTask;
use crate::modules::board::use_cases::create_task::handler::CreateTaskError;
use crate::shared::infrastructure::change_store::StoreError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct CreateTaskBody {
    pub project_id: String,
    pub bucket_id: String,
    pub title: String,
    pub assignee: Option<String>,
}

#[derive(Serialize)]
pub struct CreateTaskResponse {
    pub task_id: String,
    pub order: i64,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<CreateTaskBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = CreateTask {
        task_id: Uuid::now_v7().to_string(),
        project_id: body.project_id,
        bucket_id: body.bucket_id,
        title: body.title,
        assignee: body.assignee,
        created_at: Utc::now().timestamp_millis(),
    };

    match state.create_task.handle(command).await {
        Ok(row) => (
            StatusCode::CREATED,
            Json(CreateTaskResponse {
                task_id: row.id,
                order: row.order,
            }),
        )
            .into_response(),
        Err(CreateTaskError::Store(StoreError::Conflict { .. })) => {
            StatusCode::CONFLICT.into_response()
        }
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
