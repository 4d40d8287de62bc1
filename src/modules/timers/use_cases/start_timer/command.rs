#[derive(Debug, Clone)]
pub struct StartTimer {
    pub user_id: String,
    pub task_id: String,
    pub project_id: String,
    pub started_at: i64,
}
