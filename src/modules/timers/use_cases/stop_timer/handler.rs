use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::modules::timers::core::state::worklog_for_stop;
use crate::modules::timers::use_cases::stop_timer::command::StopTimer;
use crate::shared::infrastructure::change_store::{ChangeStore, StoreError, WorklogEntry};
use crate::shared::infrastructure::event_hub::EventHub;
use crate::shared::infrastructure::event_hub::event::BoardEvent;

#[derive(Debug, Error)]
pub enum StopTimerError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Stopping when nothing is running is a reported no-op, not an error, so a
/// client that lost the response of its first stop can retry blindly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopOutcome {
    NotRunning,
    Stopped { worklog: Option<WorklogEntry> },
}

pub struct StopTimerHandler<S>
where
    S: ChangeStore + 'static,
{
    store: Arc<S>,
    hub: Arc<EventHub>,
}

impl<S> StopTimerHandler<S>
where
    S: ChangeStore + 'static,
{
    pub fn new(store: Arc<S>, hub: Arc<EventHub>) -> Self {
        Self { store, hub }
    }

    pub async fn handle(&self, command: StopTimer) -> Result<StopOutcome, StopTimerError> {
        let taken = self
            .store
            .take_active_timer(&command.user_id, command.task_id.as_deref())
            .await?;
        let Some(timer) = taken else {
            tracing::debug!(user_id = %command.user_id, "stop requested with no running timer");
            return Ok(StopOutcome::NotRunning);
        };

        let worklog =
            worklog_for_stop(&timer, Uuid::now_v7().to_string(), command.stopped_at);
        if let Some(entry) = &worklog {
            self.store.insert_worklog(entry.clone()).await?;
        }

        self.hub.publish(
            &BoardEvent::TimerStopped {
                task_id: timer.task_id.clone(),
                project_id: timer.project_id.clone(),
                user_id: timer.user_id.clone(),
                timestamp: command.stopped_at,
            },
            Some(&timer.project_id),
        );
        Ok(StopOutcome::Stopped { worklog })
    }
}

#[cfg(test)]
mod stop_timer_handler_tests {
    use super::*;
    use crate::shared::infrastructure::change_store::ActiveTimerRow;
    use crate::shared::infrastructure::change_store::in_memory::InMemoryChangeStore;
    use rstest::{fixture, rstest};

    fn stop(task_id: Option<&str>, stopped_at: i64) -> StopTimer {
        StopTimer {
            user_id: "u-1".into(),
            task_id: task_id.map(String::from),
            stopped_at,
        }
    }

    async fn seed_timer(store: &InMemoryChangeStore, started_at: i64) {
        store
            .replace_active_timer(ActiveTimerRow {
                user_id: "u-1".into(),
                task_id: "t-1".into(),
                project_id: "p-1".into(),
                started_at,
            })
            .await
            .unwrap();
    }

    #[fixture]
    fn before_each() -> (Arc<InMemoryChangeStore>, Arc<EventHub>) {
        (Arc::new(InMemoryChangeStore::new()), Arc::new(EventHub::new(8)))
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_accrue_exactly_the_elapsed_duration(
        before_each: (Arc<InMemoryChangeStore>, Arc<EventHub>),
    ) {
        let (store, hub) = before_each;
        seed_timer(&store, 1_700_000_000_000).await;
        let handler = StopTimerHandler::new(store.clone(), hub);

        let outcome = handler
            .handle(stop(None, 1_700_000_005_000))
            .await
            .unwrap();
        let StopOutcome::Stopped { worklog: Some(entry) } = outcome else {
            panic!("expected a stopped outcome with a worklog");
        };
        assert_eq!(entry.duration_ms, 5_000);
        assert_eq!(entry.started_at, 1_700_000_000_000);
        assert_eq!(entry.stopped_at, 1_700_000_005_000);
        assert_eq!(store.task_worklogs("t-1").await.unwrap().len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_no_op_on_a_second_stop(
        before_each: (Arc<InMemoryChangeStore>, Arc<EventHub>),
    ) {
        let (store, hub) = before_each;
        seed_timer(&store, 1_000).await;
        let handler = StopTimerHandler::new(store.clone(), hub);

        let first = handler.handle(stop(None, 6_000)).await.unwrap();
        assert!(matches!(first, StopOutcome::Stopped { .. }));
        let second = handler.handle(stop(None, 7_000)).await.unwrap();
        assert_eq!(second, StopOutcome::NotRunning);

        assert_eq!(
            store.task_worklogs("t-1").await.unwrap().len(),
            1,
            "a retried stop must never accrue a second worklog"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_not_stop_a_timer_running_a_different_task(
        before_each: (Arc<InMemoryChangeStore>, Arc<EventHub>),
    ) {
        let (store, hub) = before_each;
        seed_timer(&store, 1_000).await;
        let handler = StopTimerHandler::new(store.clone(), hub);

        let outcome = handler.handle(stop(Some("t-9"), 6_000)).await.unwrap();
        assert_eq!(outcome, StopOutcome::NotRunning);
        assert!(store.active_timer("u-1").await.unwrap().is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_stop_without_a_worklog_when_no_time_elapsed(
        before_each: (Arc<InMemoryChangeStore>, Arc<EventHub>),
    ) {
        let (store, hub) = before_each;
        seed_timer(&store, 5_000).await;
        let handler = StopTimerHandler::new(store.clone(), hub);

        let outcome = handler.handle(stop(None, 5_000)).await.unwrap();
        assert_eq!(outcome, StopOutcome::Stopped { worklog: None });
        assert!(store.active_timer("u-1").await.unwrap().is_none());
        assert!(store.task_worklogs("t-1").await.unwrap().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_publish_timer_stopped_scoped_to_the_timers_project(
        before_each: (Arc<InMemoryChangeStore>, Arc<EventHub>),
    ) {
        let (store, hub) = before_each;
        seed_timer(&store, 1_000).await;
        let (_, mut rx) = hub.subscribe(Some("p-1".into()));
        rx.recv().await.expect("no acknowledgement");

        let handler = StopTimerHandler::new(store, hub);
        handler.handle(stop(None, 6_000)).await.unwrap();

        assert_eq!(
            rx.recv().await,
            Some(BoardEvent::TimerStopped {
                task_id: "t-1".into(),
                project_id: "p-1".into(),
                user_id: "u-1".into(),
                timestamp: 6_000,
            })
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_not_publish_when_nothing_was_running(
        before_each: (Arc<InMemoryChangeStore>, Arc<EventHub>),
    ) {
        let (store, hub) = before_each;
        let (_, mut rx) = hub.subscribe(None);
        rx.recv().await.expect("no acknowledgement");

        let handler = StopTimerHandler::new(store, hub);
        handler.handle(stop(None, 6_000)).await.unwrap();
        assert!(rx.try_recv().is_err());
    }
}
