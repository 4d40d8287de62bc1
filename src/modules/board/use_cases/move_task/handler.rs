use std::sync::Arc;

use thiserror::Error;

use crate::modules::board::core::ordering::{
    self, OrderedItem, OrderingError,
};
use crate::modules::board::use_cases::move_task::command::MoveTask;
use crate::shared::infrastructure::change_store::{
    ChangeStore, OrderWrite, StoreError, TaskRow,
};
use crate::shared::infrastructure::event_hub::EventHub;
use crate::shared::infrastructure::event_hub::event::BoardEvent;

#[derive(Debug, Error)]
pub enum MoveTaskError {
    #[error("task not found: {id}")]
    NotFound { id: String },

    #[error(transparent)]
    Ordering(#[from] OrderingError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct MoveTaskHandler<S>
where
    S: ChangeStore + 'static,
{
    store: Arc<S>,
    hub: Arc<EventHub>,
}

fn as_ordered(rows: &[TaskRow]) -> Vec<OrderedItem> {
    rows.iter()
        .map(|row| OrderedItem {
            id: row.id.clone(),
            order: row.order,
        })
        .collect()
}

impl<S> MoveTaskHandler<S>
where
    S: ChangeStore + 'static,
{
    pub fn new(store: Arc<S>, hub: Arc<EventHub>) -> Self {
        Self { store, hub }
    }

    /// Move a task to `dest_index` of `dest_bucket_id`, renumbering the
    /// affected siblings in one transaction. A move within the task's own
    /// bucket degrades to a plain reorder. Publishes `todo_updated`.
    pub async fn handle(&self, command: MoveTask) -> Result<(), MoveTaskError> {
        let task = self
            .store
            .task(&command.task_id)
            .await?
            .ok_or_else(|| MoveTaskError::NotFound {
                id: command.task_id.clone(),
            })?;

        let writes = if task.bucket == command.dest_bucket_id {
            let siblings = self.store.bucket_tasks(&task.bucket).await?;
            ordering::reorder_within_bucket(
                &as_ordered(&siblings),
                &command.task_id,
                command.dest_index,
            )?
            .into_iter()
            .map(|update| OrderWrite {
                id: update.id,
                order: update.order,
                bucket: None,
            })
            .collect()
        } else {
            let source = self.store.bucket_tasks(&task.bucket).await?;
            let destination = self.store.bucket_tasks(&command.dest_bucket_id).await?;
            let plan = ordering::move_across_buckets(
                &as_ordered(&source),
                &as_ordered(&destination),
                &command.task_id,
                &command.dest_bucket_id,
                command.dest_index,
            )?;
            let mut writes = vec![OrderWrite {
                id: plan.moved.id,
                order: plan.moved.order,
                bucket: Some(plan.moved.bucket),
            }];
            writes.extend(plan.sibling_updates.into_iter().map(|update| OrderWrite {
                id: update.id,
                order: update.order,
                bucket: None,
            }));
            writes
        };
        self.store.apply_order_updates(&writes).await?;

        self.hub.publish(
            &BoardEvent::TodoUpdated {
                todo_id: command.task_id,
                timestamp: command.moved_at,
            },
            Some(&command.project_id),
        );
        Ok(())
    }
}
