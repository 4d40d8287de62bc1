// In memory implementation of the ChangeStore port.
//
// Purpose
// - Support handler tests and local development without a database.
//
// Responsibilities
// - Keep tasks in read order so equal-order ties stay deterministic.
// - Perform the multi-row order write and the timer replace/take under a
//   single write guard, so each is atomic with respect to concurrent calls.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;

use super::{ActiveTimerRow, ChangeStore, OrderWrite, StoreError, TaskRow, WorklogEntry};

#[derive(Default)]
pub struct InMemoryChangeStore {
    tasks: RwLock<Vec<TaskRow>>,
    timers: RwLock<HashMap<String, ActiveTimerRow>>,
    worklogs: RwLock<Vec<WorklogEntry>>,
    offline: AtomicBool,
    delay_ms: AtomicU64,
}

impl InMemoryChangeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `Unavailable`.
    pub fn toggle_offline(&self) {
        self.offline.fetch_xor(true, Ordering::SeqCst);
    }

    /// Slow every call down, to widen race windows in tests.
    pub fn set_delay_ms(&self, delay_ms: u64) {
        self.delay_ms.store(delay_ms, Ordering::SeqCst);
    }

    async fn checkpoint(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("change store offline".into()));
        }
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ChangeStore for InMemoryChangeStore {
    async fn insert_task(&self, task: TaskRow) -> Result<(), StoreError> {
        self.checkpoint().await?;
        let mut tasks = self.tasks.write().await;
        if tasks.iter().any(|row| row.id == task.id) {
            return Err(StoreError::Conflict { id: task.id });
        }
        tasks.push(task);
        Ok(())
    }

    async fn task(&self, id: &str) -> Result<Option<TaskRow>, StoreError> {
        self.checkpoint().await?;
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().find(|row| row.id == id).cloned())
    }

    async fn delete_task(&self, id: &str) -> Result<Option<TaskRow>, StoreError> {
        self.checkpoint().await?;
        let mut tasks = self.tasks.write().await;
        let position = tasks.iter().position(|row| row.id == id);
        Ok(position.map(|index| tasks.remove(index)))
    }

    async fn bucket_tasks(&self, bucket: &str) -> Result<Vec<TaskRow>, StoreError> {
        self.checkpoint().await?;
        let tasks = self.tasks.read().await;
        let mut rows: Vec<TaskRow> = tasks
            .iter()
            .filter(|row| row.bucket == bucket)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.order);
        Ok(rows)
    }

    async fn apply_order_updates(&self, updates: &[OrderWrite]) -> Result<(), StoreError> {
        self.checkpoint().await?;
        let mut tasks = self.tasks.write().await;
        // Validate every id before touching any row; the write is all-or-nothing.
        for update in updates {
            if !tasks.iter().any(|row| row.id == update.id) {
                return Err(StoreError::NotFound {
                    id: update.id.clone(),
                });
            }
        }
        for update in updates {
            let row = tasks
                .iter_mut()
                .find(|row| row.id == update.id)
                .expect("validated above");
            row.order = update.order;
            if let Some(bucket) = &update.bucket {
                row.bucket = bucket.clone();
            }
        }
        Ok(())
    }

    async fn replace_active_timer(
        &self,
        timer: ActiveTimerRow,
    ) -> Result<Option<ActiveTimerRow>, StoreError> {
        self.checkpoint().await?;
        let mut timers = self.timers.write().await;
        Ok(timers.insert(timer.user_id.clone(), timer))
    }

    async fn take_active_timer(
        &self,
        user_id: &str,
        task_id: Option<&str>,
    ) -> Result<Option<ActiveTimerRow>, StoreError> {
        self.checkpoint().await?;
        let mut timers = self.timers.write().await;
        let matches = timers
            .get(user_id)
            .is_some_and(|row| task_id.is_none_or(|task| row.task_id == task));
        Ok(if matches { timers.remove(user_id) } else { None })
    }

    async fn active_timer(&self, user_id: &str) -> Result<Option<ActiveTimerRow>, StoreError> {
        self.checkpoint().await?;
        let timers = self.timers.read().await;
        Ok(timers.get(user_id).cloned())
    }

    async fn insert_worklog(&self, entry: WorklogEntry) -> Result<(), StoreError> {
        self.checkpoint().await?;
        let mut worklogs = self.worklogs.write().await;
        if worklogs.iter().any(|row| row.id == entry.id) {
            return Err(StoreError::Conflict { id: entry.id });
        }
        worklogs.push(entry);
        Ok(())
    }

    async fn task_worklogs(&self, task_id: &str) -> Result<Vec<WorklogEntry>, StoreError> {
        self.checkpoint().await?;
        let worklogs = self.worklogs.read().await;
        Ok(worklogs
            .iter()
            .filter(|row| row.task_id == task_id)
            .cloned()
            .collect())
    }
}
