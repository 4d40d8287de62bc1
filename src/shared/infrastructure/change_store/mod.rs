// Port for the durable record store this core writes through.
//
// Purpose
// - Describe the storage capabilities the handlers need (point writes, one
//   atomic multi-row order write, atomic timer replace/take) as a trait.
//
// Responsibilities
// - Keep handlers independent of any concrete database.
//
// Boundaries
// - No business rules here. The adapters implement these traits; the
//   in-memory adapter backs tests and local development.

pub mod in_memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("record not found: {id}")]
    NotFound { id: String },

    #[error("duplicate key: {id}")]
    Conflict { id: String },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRow {
    pub id: String,
    pub project_id: String,
    pub bucket: String,
    pub order: i64,
    pub title: String,
    pub assignee: Option<String>,
    pub updated_at: i64,
}

/// Write shape for reorder transactions. Touches `order` and, for a
/// cross-bucket move, `bucket` — never any other column of the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderWrite {
    pub id: String,
    pub order: i64,
    pub bucket: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTimerRow {
    pub user_id: String,
    pub task_id: String,
    pub project_id: String,
    pub started_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorklogEntry {
    pub id: String,
    pub task_id: String,
    pub user_id: String,
    pub started_at: i64,
    pub stopped_at: i64,
    pub duration_ms: i64,
    pub description: Option<String>,
}

#[async_trait]
pub trait ChangeStore: Send + Sync {
    async fn insert_task(&self, task: TaskRow) -> Result<(), StoreError>;
    async fn task(&self, id: &str) -> Result<Option<TaskRow>, StoreError>;
    async fn delete_task(&self, id: &str) -> Result<Option<TaskRow>, StoreError>;

    /// Tasks of one bucket sorted by order; rows read with equal order keep
    /// their stored position.
    async fn bucket_tasks(&self, bucket: &str) -> Result<Vec<TaskRow>, StoreError>;

    /// All-or-nothing multi-row write: either every referenced row is
    /// renumbered or none is.
    async fn apply_order_updates(&self, updates: &[OrderWrite]) -> Result<(), StoreError>;

    /// Atomically delete any existing timer row for the user and insert the
    /// new one. Returns the replaced row, if any.
    async fn replace_active_timer(
        &self,
        timer: ActiveTimerRow,
    ) -> Result<Option<ActiveTimerRow>, StoreError>;

    /// Atomically remove and return the user's timer row. When `task_id` is
    /// given, the row is only taken if it is running that task; a mismatch
    /// leaves the row in place and returns `None`.
    async fn take_active_timer(
        &self,
        user_id: &str,
        task_id: Option<&str>,
    ) -> Result<Option<ActiveTimerRow>, StoreError>;

    async fn active_timer(&self, user_id: &str) -> Result<Option<ActiveTimerRow>, StoreError>;

    async fn insert_worklog(&self, entry: WorklogEntry) -> Result<(), StoreError>;
    async fn task_worklogs(&self, task_id: &str) -> Result<Vec<WorklogEntry>, StoreError>;
}
