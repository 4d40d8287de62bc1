use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::modules::timers::core::state::TimerState;
use crate::shared::infrastructure::change_store::ChangeStore;
use crate::shell::state::AppState;

/// What the user's timer is doing right now. Clients call this after a page
/// reload to recover a running timer.
pub async fn handle(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    match state.store.active_timer(&user_id).await {
        Ok(row) => Json(TimerState::from_row(row)).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
