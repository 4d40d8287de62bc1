use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::modules::timers::core::policy::ReplacePolicy;
use crate::modules::timers::use_cases::start_timer::command::StartTimer;
use crate::shared::infrastructure::change_store::{ActiveTimerRow, ChangeStore, StoreError};
use crate::shared::infrastructure::event_hub::EventHub;
use crate::shared::infrastructure::event_hub::event::BoardEvent;

#[derive(Debug, Error)]
pub enum StartTimerError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartOutcome {
    /// True when a running timer for the same user was replaced.
    pub replaced: bool,
}

pub struct StartTimerHandler<S>
where
    S: ChangeStore + 'static,
{
    store: Arc<S>,
    hub: Arc<EventHub>,
    policy: ReplacePolicy,
}

impl<S> StartTimerHandler<S>
where
    S: ChangeStore + 'static,
{
    pub fn new(store: Arc<S>, hub: Arc<EventHub>, policy: ReplacePolicy) -> Self {
        Self { store, hub, policy }
    }

    /// Start a timer for the user, replacing any running one atomically. The
    /// replacement policy decides whether the replaced timer accrues a
    /// worklog. Publishes `timer_started` scoped to the project.
    pub async fn handle(&self, command: StartTimer) -> Result<StartOutcome, StartTimerError> {
        let row = ActiveTimerRow {
            user_id: command.user_id.clone(),
            task_id: command.task_id.clone(),
            project_id: command.project_id.clone(),
            started_at: command.started_at,
        };
        let replaced = self.store.replace_active_timer(row).await?;

        if let Some(previous) = &replaced {
            tracing::debug!(
                user_id = %command.user_id,
                replaced_task = %previous.task_id,
                "running timer replaced by new start"
            );
            if let Some(entry) = self.policy.worklog_for_replaced(
                previous,
                Uuid::now_v7().to_string(),
                command.started_at,
            ) {
                self.store.insert_worklog(entry).await?;
            }
        }

        self.hub.publish(
            &BoardEvent::TimerStarted {
                task_id: command.task_id,
                project_id: command.project_id.clone(),
                user_id: command.user_id,
                timestamp: command.started_at,
            },
            Some(&command.project_id),
        );
        Ok(StartOutcome {
            replaced: replaced.is_some(),
        })
    }
}
