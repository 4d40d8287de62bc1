use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wire event pushed to subscribed clients. These are lightweight pointers
/// ("something in this slice changed"), not full payloads; clients refetch.
///
/// Serialized with a `type` tag, e.g. `{"type":"timer_started",...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardEvent {
    Connected {
        subscription_id: Uuid,
    },
    ProjectUpdated {
        project_id: String,
        timestamp: i64,
    },
    TimerStarted {
        task_id: String,
        project_id: String,
        user_id: String,
        timestamp: i64,
    },
    TimerStopped {
        task_id: String,
        project_id: String,
        user_id: String,
        timestamp: i64,
    },
    TodoCreated {
        todo_id: String,
        timestamp: i64,
    },
    TodoUpdated {
        todo_id: String,
        timestamp: i64,
    },
    TodoDeleted {
        todo_id: String,
        timestamp: i64,
    },
}

impl BoardEvent {
    /// Tag used as the SSE event name.
    pub fn event_type(&self) -> &'static str {
        match self {
            BoardEvent::Connected { .. } => "connected",
            BoardEvent::ProjectUpdated { .. } => "project_updated",
            BoardEvent::TimerStarted { .. } => "timer_started",
            BoardEvent::TimerStopped { .. } => "timer_stopped",
            BoardEvent::TodoCreated { .. } => "todo_created",
            BoardEvent::TodoUpdated { .. } => "todo_updated",
            BoardEvent::TodoDeleted { .. } => "todo_deleted",
        }
    }
}
