use crate::modules::board::core::ordering::OrderUpdate;

/// Wire shape of a same-bucket drag: the client's drag-end planner computes
/// the renumbered `{id, order}` list and the handler applies it as one
/// transaction.
#[derive(Debug, Clone)]
pub struct ReorderBucket {
    pub project_id: String,
    pub bucket_id: String,
    pub ordered_ids: Vec<OrderUpdate>,
    pub reordered_at: i64,
}
