use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::modules::board::use_cases::create_task::inbound::http as create_task_http;
use crate::modules::board::use_cases::delete_task::inbound::http as delete_task_http;
use crate::modules::board::use_cases::list_bucket_tasks::inbound::http as list_bucket_tasks_http;
use crate::modules::board::use_cases::move_task::inbound::http as move_task_http;
use crate::modules::board::use_cases::reorder_bucket::inbound::http as reorder_bucket_http;
use crate::modules::timers::use_cases::get_active_timer::inbound::http as get_active_timer_http;
use crate::modules::timers::use_cases::start_timer::inbound::http as start_timer_http;
use crate::modules::timers::use_cases::stop_timer::inbound::http as stop_timer_http;
use crate::shell::sse;
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/events", get(sse::handle))
        .route("/tasks", post(create_task_http::handle))
        .route("/tasks/{task_id}", delete(delete_task_http::handle))
        .route(
            "/buckets/{bucket_id}/tasks",
            get(list_bucket_tasks_http::handle),
        )
        .route("/reorder", post(reorder_bucket_http::handle))
        .route("/move", post(move_task_http::handle))
        .route("/timers/start", post(start_timer_http::handle))
        .route("/timers/stop", post(stop_timer_http::handle))
        .route("/timers/{user_id}", get(get_active_timer_http::handle))
        .with_state(state)
}
