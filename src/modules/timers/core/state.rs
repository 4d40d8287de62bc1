// Per-user timer state and the one place stop duration is computed.

use serde::Serialize;

use crate::shared::infrastructure::change_store::{ActiveTimerRow, WorklogEntry};

/// A user is either idle or running exactly one timer. The uniqueness of the
/// running row is guaranteed by the store's atomic replace/take operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TimerState {
    Idle,
    Running {
        task_id: String,
        project_id: String,
        started_at: i64,
    },
}

impl TimerState {
    pub fn from_row(row: Option<ActiveTimerRow>) -> Self {
        match row {
            None => TimerState::Idle,
            Some(row) => TimerState::Running {
                task_id: row.task_id,
                project_id: row.project_id,
                started_at: row.started_at,
            },
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, TimerState::Running { .. })
    }
}

/// Worklog accrued by stopping `timer` at `stopped_at`. Duration is computed
/// here exactly once and never recomputed; a non-positive duration accrues
/// nothing.
pub fn worklog_for_stop(
    timer: &ActiveTimerRow,
    worklog_id: String,
    stopped_at: i64,
) -> Option<WorklogEntry> {
    let duration_ms = stopped_at - timer.started_at;
    (duration_ms > 0).then(|| WorklogEntry {
        id: worklog_id,
        task_id: timer.task_id.clone(),
        user_id: timer.user_id.clone(),
        started_at: timer.started_at,
        stopped_at,
        duration_ms,
        description: None,
    })
}
