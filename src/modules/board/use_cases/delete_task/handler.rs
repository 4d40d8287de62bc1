use std::sync::Arc;

use thiserror::Error;

use crate::shared::infrastructure::change_store::{ChangeStore, StoreError, TaskRow};
use crate::shared::infrastructure::event_hub::EventHub;
use crate::shared::infrastructure::event_hub::event::BoardEvent;

#[derive(Debug, Error)]
pub enum DeleteTaskError {
    #[error("task not found: {id}")]
    NotFound { id: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct DeleteTaskHandler<S>
where
    S: ChangeStore + 'static,
{
    store: Arc<S>,
    hub: Arc<EventHub>,
}

impl<S> DeleteTaskHandler<S>
where
    S: ChangeStore + 'static,
{
    pub fn new(store: Arc<S>, hub: Arc<EventHub>) -> Self {
        Self { store, hub }
    }

    /// Remove the task and publish `todo_deleted`. The vacated bucket keeps
    /// its gap until its next reorder.
    pub async fn handle(&self, task_id: &str, deleted_at: i64) -> Result<TaskRow, DeleteTaskError> {
        let removed = self
            .store
            .delete_task(task_id)
            .await?
            .ok_or_else(|| DeleteTaskError::NotFound {
                id: task_id.to_string(),
            })?;
        self.hub.publish(
            &BoardEvent::TodoDeleted {
                todo_id: removed.id.clone(),
                timestamp: deleted_at,
            },
            Some(&removed.project_id),
        );
        Ok(removed)
    }
}
