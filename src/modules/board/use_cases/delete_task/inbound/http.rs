use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;

use crate::modules::board::use_cases::delete_task::handler::DeleteTaskError;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> impl IntoResponse {
    match state
        .delete_task
        .handle(&task_id, Utc::now().timestamp_millis())
        .await
    {
        Ok(_) => StatusCode::OK.into_response(),
        Err(DeleteTaskError::NotFound { .. }) => StatusCode::NOT_FOUND.into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

#[cfg(test)]
mod delete_task_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::delete,
    };
    use tower::ServiceExt;

    use crate::shared::infrastructure::change_store::{ChangeStore, TaskRow};
    use crate::shell::state::AppState;

    use super::handle;

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/tasks/{task_id}", delete(handle))
            .with_state(state)
    }

    #[tokio::test]
    async fn it_should_return_200_after_deleting_an_existing_task() {
        let state = AppState::in_memory();
        state
            .store
            .insert_task(TaskRow {
                id: "t-1".into(),
                project_id: "p-1".into(),
                bucket: "Todo".into(),
                order: 0,
                title: "a task".into(),
                assignee: None,
                updated_at: 0,
            })
            .await
            .unwrap();

        let response = app(state)
            .oneshot(
                Request::delete("/tasks/t-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn it_should_return_404_for_an_unknown_task() {
        let response = app(AppState::in_memory())
            .oneshot(
                Request::delete("/tasks/ghost")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
