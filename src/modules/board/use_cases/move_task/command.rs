#[derive(Debug, Clone)]
pub struct MoveTask {
    pub project_id: String,
    pub task_id: String,
    pub dest_bucket_id: String,
    pub dest_index: usize,
    pub moved_at: i64,
}
