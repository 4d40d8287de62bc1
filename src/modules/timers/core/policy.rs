// What happens to a timer that is implicitly replaced by a new start.

use crate::modules::timers::core::state::worklog_for_stop;
use crate::shared::infrastructure::change_store::{ActiveTimerRow, WorklogEntry};

/// Starting a timer while another is running replaces the old row in the
/// same atomic store operation. `SilentReplace` discards the elapsed time of
/// the replaced timer; `StopAndLog` accrues a worklog for it as if it had
/// been stopped at the moment the new timer started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReplacePolicy {
    #[default]
    SilentReplace,
    StopAndLog,
}

impl ReplacePolicy {
    pub fn worklog_for_replaced(
        &self,
        replaced: &ActiveTimerRow,
        worklog_id: String,
        replaced_at: i64,
    ) -> Option<WorklogEntry> {
        match self {
            ReplacePolicy::SilentReplace => None,
            ReplacePolicy::StopAndLog => worklog_for_stop(replaced, worklog_id, replaced_at),
        }
    }
}
