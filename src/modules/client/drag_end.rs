// Turns a drop gesture into the exact payload the reorder endpoint expects,
// and applies the same updates to the cache before the round trip.

use serde_json::json;

use crate::modules::board::core::ordering::{
    OrderUpdate, OrderedItem, OrderingError, reorder_within_bucket,
};

use super::cache::{ReconcilingCache, Slice};

/// Request payload for a same-bucket drop, ready to serialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderPlan {
    pub project_id: String,
    pub bucket_id: String,
    pub ordered_ids: Vec<OrderUpdate>,
}

/// Plan a same-bucket drop. Computes the minimal order writes, merges the new
/// bucket sequence into the project slice optimistically, and arms the cache
/// to swallow the push echo of our own request.
pub fn plan_reorder(
    cache: &ReconcilingCache,
    project_id: &str,
    bucket_id: &str,
    items: &[OrderedItem],
    moved_id: &str,
    target_index: usize,
) -> Result<ReorderPlan, OrderingError> {
    let ordered_ids = reorder_within_bucket(items, moved_id, target_index)?;

    if !ordered_ids.is_empty() {
        let slice = Slice::Project(project_id.to_string());
        cache.apply_optimistic(
            slice.clone(),
            json!({ bucket_id: sequence_after(items, &ordered_ids) }),
        );
        cache.expect_own(slice);
    }

    Ok(ReorderPlan {
        project_id: project_id.to_string(),
        bucket_id: bucket_id.to_string(),
        ordered_ids,
    })
}

/// Final bucket sequence (ids front to back) once `updates` have landed.
fn sequence_after(items: &[OrderedItem], updates: &[OrderUpdate]) -> Vec<String> {
    let mut sequence: Vec<OrderedItem> = items
        .iter()
        .map(|item| {
            let order = updates
                .iter()
                .find(|update| update.id == item.id)
                .map_or(item.order, |update| update.order);
            OrderedItem {
                id: item.id.clone(),
                order,
            }
        })
        .collect();
    sequence.sort_by_key(|item| item.order);
    sequence.into_iter().map(|item| item.id).collect()
}
