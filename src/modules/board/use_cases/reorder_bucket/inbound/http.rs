use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;

use crate::modules::board::core::ordering::OrderUpdate;
use crate::modules::board::use_cases::reorder_bucket::command::ReorderBucket;
use crate::modules::board::use_cases::reorder_bucket::handler::ReorderBucketError;
use crate::shared::infrastructure::change_store::StoreError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ReorderBucketBody {
    pub project_id: String,
    pub bucket_id: String,
    pub ordered_ids: Vec<OrderUpdate>,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<ReorderBucketBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = ReorderBucket {
        project_id: body.project_id,
        bucket_id: body.bucket_id,
        ordered_ids: body.ordered_ids,
        reordered_at: Utc::now().timestamp_millis(),
    };

    match state.reorder_bucket.handle(command).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(ReorderBucketError::EmptyPayload | ReorderBucketError::NotInBucket { .. }) => {
            StatusCode::UNPROCESSABLE_ENTITY.into_response()
        }
        Err(ReorderBucketError::Store(StoreError::NotFound { .. })) => {
            StatusCode::NOT_FOUND.into_response()
        }
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

#[cfg(test)]
mod reorder_bucket_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::post,
    };
    use tower::ServiceExt;

    use crate::shared::infrastructure::change_store::{ChangeStore, TaskRow};
    use crate::shell::state::AppState;

    use super::handle;

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/reorder", post(handle))
            .with_state(state)
    }

    async fn seeded_state() -> AppState {
        let state = AppState::in_memory();
        for (id, order) in [("a", 0), ("b", 1)] {
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
        state
    }

    #[tokio::test]
    async fn it_should_return_200_and_apply_the_new_order() {
        let state = seeded_state().await;
        let store = state.store.clone();
        let body = r#"{"project_id":"p-1","bucket_id":"Todo","ordered_ids":[{"id":"b","order":0},{"id":"a","order":1}]}"#;

        let response = app(state)
            .oneshot(
                Request::post("/reorder")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.task("b").await.unwrap().unwrap().order, 0);
        assert_eq!(store.task("a").await.unwrap().unwrap().order, 1);
    }

    #[tokio::test]
    async fn it_should_return_422_when_an_id_is_outside_the_bucket() {
        let state = seeded_state().await;
        let body = r#"{"project_id":"p-1","bucket_id":"Todo","ordered_ids":[{"id":"ghost","order":0}]}"#;

        let response = app(state)
            .oneshot(
                Request::post("/reorder")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn it_should_return_422_on_invalid_json() {
        let response = app(AppState::in_memory())
            .oneshot(
                Request::post("/reorder")
                    .header("content-type", "application/json")
                    .body(Body::from("not-json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
