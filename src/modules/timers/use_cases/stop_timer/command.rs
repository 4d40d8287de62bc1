#[derive(Debug, Clone)]
pub struct StopTimer {
    pub user_id: String,
    /// When given, only a timer running this task is stopped.
    pub task_id: Option<String>,
    pub stopped_at: i64,
}
