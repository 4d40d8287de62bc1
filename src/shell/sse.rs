// SSE framing over the hub. The transport owns nothing but the subscription
// lifetime: the guard inside the stream unsubscribes when the client goes
// away, however the connection ends.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use serde::Deserialize;
use tokio_stream::{Stream, StreamExt, wrappers::ReceiverStream};
use uuid::Uuid;

use crate::shared::infrastructure::event_hub::EventHub;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct EventsQuery {
    pub scope: Option<String>,
}

struct SubscriptionGuard {
    hub: Arc<EventHub>,
    subscription_id: Uuid,
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.hub.unsubscribe(self.subscription_id);
    }
}

pub async fn handle(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let (subscription_id, receiver) = state.hub.subscribe(query.scope);
    let guard = SubscriptionGuard {
        hub: state.hub.clone(),
        subscription_id,
    };

    let stream = ReceiverStream::new(receiver).map(move |event| {
        // Owned by the closure, dropped with the stream.
        let _ = &guard;
        Event::default()
            .event(event.event_type())
            .json_data(&event)
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod sse_shell_tests {
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    use crate::shell::state::AppState;

    use super::handle;

    fn app(state: AppState) -> Router {
        Router::new().route("/events", get(handle)).with_state(state)
    }

    #[tokio::test]
    async fn it_should_answer_with_an_event_stream() {
        let state = AppState::in_memory();
        let hub = state.hub.clone();

        let response = app(state)
            .oneshot(Request::get("/events?scope=p-1").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"].to_str().unwrap(),
            "text/event-stream"
        );
        assert_eq!(hub.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn it_should_unsubscribe_when_the_response_is_dropped() {
        let state = AppState::in_memory();
        let hub = state.hub.clone();

        let response = app(state)
            .oneshot(Request::get("/events").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(hub.subscriber_count(), 1);

        drop(response);
        assert_eq!(hub.subscriber_count(), 0);
    }
}
