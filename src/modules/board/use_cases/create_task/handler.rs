use std::sync::Arc;

use thiserror::Error;

use crate::modules::board::use_cases::create_task::command::CreateTask;
use crate::shared::infrastructure::change_store::{ChangeStore, StoreError, TaskRow};
use crate::shared::infrastructure::event_hub::EventHub;
use crate::shared::infrastructure::event_hub::event::BoardEvent;

#[derive(Debug, Error)]
pub enum CreateTaskError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct CreateTaskHandler<S>
where
    S: ChangeStore + 'static,
{
    store: Arc<S>,
    hub: Arc<EventHub>,
}

impl<S> CreateTaskHandler<S>
where
    S: ChangeStore + 'static,
{
    pub fn new(store: Arc<S>, hub: Arc<EventHub>) -> Self {
        Self { store, hub }
    }

    /// Append the task at the end of its bucket and publish `todo_created`.
    pub async fn handle(&self, command: CreateTask) -> Result<TaskRow, CreateTaskError> {
        let siblings = self.store.bucket_tasks(&command.bucket_id).await?;
        let order = siblings.last().map(|row| row.order + 1).unwrap_or(0);
        let row = TaskRow {
            id: command.task_id.clone(),
            project_id: command.project_id.clone(),
            bucket: command.bucket_id,
            order,
            title: command.title,
            assignee: command.assignee,
            updated_at: command.created_at,
        };
        self.store.insert_task(row.clone()).await?;
        self.hub.publish(
            &BoardEvent::TodoCreated {
                todo_id: command.task_id,
                timestamp: command.created_at,
            },
            Some(&command.project_id),
        );
        Ok(row)
    }
}

#[cfg(test)]
mod create_task_handler_tests {
    use super::*;
    use crate::shared::infrastructure::change_store::in_memory::InMemoryChangeStore;
    use rstest::{fixture, rstest};

    fn command(task_id: &str, bucket_id: &str) -> CreateTask {
        CreateTask {
            task_id: task_id.into(),
            project_id: "p-1".into(),
            bucket_id: bucket_id.into(),
            title: "a task".into(),
            assignee: None,
            created_at: 1_700_000_000_000,
        }
    }

    #[fixture]
    fn before_each() -> (Arc<InMemoryChangeStore>, Arc<EventHub>) {
        (Arc::new(InMemoryChangeStore::new()), Arc::new(EventHub::new(8)))
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_append_each_new_task_at_the_end_of_its_bucket(
        before_each: (Arc<InMemoryChangeStore>, Arc<EventHub>),
    ) {
        let (store, hub) = before_each;
        let handler = CreateTaskHandler::new(store, hub);
        let first = handler.handle(command("t-1", "Todo")).await.unwrap();
        let second = handler.handle(command("t-2", "Todo")).await.unwrap();
        let other = handler.handle(command("t-3", "Done")).await.unwrap();
        assert_eq!(first.order, 0);
        assert_eq!(second.order, 1);
        assert_eq!(other.order, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_a_duplicate_task_id(
        before_each: (Arc<InMemoryChangeStore>, Arc<EventHub>),
    ) {
        let (store, hub) = before_each;
        let handler = CreateTaskHandler::new(store, hub);
        handler.handle(command("t-1", "Todo")).await.unwrap();
        let result = handler.handle(command("t-1", "Todo")).await;
        assert!(matches!(
            result,
            Err(CreateTaskError::Store(StoreError::Conflict { .. }))
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_publish_todo_created(
        before_each: (Arc<InMemoryChangeStore>, Arc<EventHub>),
    ) {
        let (store, hub) = before_each;
        let (_, mut rx) = hub.subscribe(None);
        rx.recv().await.expect("no acknowledgement");

        let handler = CreateTaskHandler::new(store, hub);
        handler.handle(command("t-1", "Todo")).await.unwrap();

        assert_eq!(
            rx.recv().await,
            Some(BoardEvent::TodoCreated {
                todo_id: "t-1".into(),
                timestamp: 1_700_000_000_000,
            })
        );
    }
}
