use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::shared::infrastructure::change_store::ChangeStore;
use crate::shell::state::AppState;

/// Tasks of one bucket in board order. This is the slice clients refetch
/// after an invalidation event.
pub async fn handle(
    State(state): State<AppState>,
    Path(bucket_id): Path<String>,
) -> impl IntoResponse {
    match state.store.bucket_tasks(&bucket_id).await {
        Ok(rows) => Json(rows).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

#[cfg(test)]
mod list_bucket_tasks_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::shared::infrastructure::change_store::{ChangeStore, TaskRow};
    use crate::shell::state::AppState;

    use super::handle;

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/buckets/{bucket_id}/tasks", get(handle))
            .with_state(state)
    }

    #[tokio::test]
    async fn it_should_return_the_bucket_in_board_order() {
        let state = AppState::in_memory();
        for (id, order) in [("t-1", 1), ("t-2", 0)] {
            state
                .store
                .insert_task(TaskRow {
                    id: id.into(),
                    project_id: "p-1".into(),
                    bucket: "Todo".into(),
                    order,
                    title: "a task".into(),
                    assignee: None,
                    updated_at: 0,
                })
                .await
                .unwrap();
        }

        let response = app(state)
            .oneshot(
                Request::get("/buckets/Todo/tasks")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let ids: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["t-2", "t-1"]);
    }

    #[tokio::test]
    async fn it_should_return_an_empty_list_for_an_unknown_bucket() {
        let response = app(AppState::in_memory())
            .oneshot(
                Request::get("/buckets/Nope/tasks")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, serde_json::json!([]));
    }
}
