#[derive(Debug, Clone)]
pub struct CreateTask {
    pub task_id: String,
    pub project_id: String,
    pub bucket_id: String,
    pub title: String,
    pub assignee: Option<String>,
    pub created_at: i64,
}
