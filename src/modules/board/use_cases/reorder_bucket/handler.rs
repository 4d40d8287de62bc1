use std::sync::Arc;

use thiserror::Error;

use crate::modules::board::use_cases::reorder_bucket::command::ReorderBucket;
use crate::shared::infrastructure::change_store::{ChangeStore, OrderWrite, StoreError};
use crate::shared::infrastructure::event_hub::EventHub;
use crate::shared::infrastructure::event_hub::event::BoardEvent;

#[derive(Debug, Error)]
pub enum ReorderBucketError {
    #[error("reorder payload is empty")]
    EmptyPayload,

    #[error("task {id} is not in bucket {bucket}")]
    NotInBucket { id: String, bucket: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct ReorderBucketHandler<S>
where
    S: ChangeStore + 'static,
{
    store: Arc<S>,
    hub: Arc<EventHub>,
}

impl<S> ReorderBucketHandler<S>
where
    S: ChangeStore + 'static,
{
    pub fn new(store: Arc<S>, hub: Arc<EventHub>) -> Self {
        Self { store, hub }
    }

    /// Apply a client-computed renumbering as one transaction. Each write
    /// carries only id and order, so no other field of a sibling row can be
    /// reverted by a drag. Publishes `project_updated` scoped to the project.
    pub async fn handle(&self, command: ReorderBucket) -> Result<(), ReorderBucketError> {
        if command.ordered_ids.is_empty() {
            return Err(ReorderBucketError::EmptyPayload);
        }
        let siblings = self.store.bucket_tasks(&command.bucket_id).await?;
        for update in &command.ordered_ids {
            if !siblings.iter().any(|row| row.id == update.id) {
                return Err(ReorderBucketError::NotInBucket {
                    id: update.id.clone(),
                    bucket: command.bucket_id.clone(),
                });
            }
        }

        let writes: Vec<OrderWrite> = command
            .ordered_ids
            .iter()
            .map(|update| OrderWrite {
                id: update.id.clone(),
                order: update.order,
                bucket: None,
            })
            .collect();
        self.store.apply_order_updates(&writes).await?;

        self.hub.publish(
            &BoardEvent::ProjectUpdated {
                project_id: command.project_id.clone(),
                timestamp: command.reordered_at,
            },
            Some(&command.project_id),
        );
        Ok(())
    }
}
