// Pure ordering computations for drag-and-drop. No I/O here.
//
// Responsibilities
// - Compute the minimal set of {id, order} writes that keeps a bucket dense
//   (0..n-1) after a move, for both same-bucket and cross-bucket drags.
//
// Boundaries
// - Callers load the sibling set first and apply the returned updates as one
//   transactional write. Sibling updates never touch any field besides order
//   (plus bucket, for the moved item of a cross-bucket drag).

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedItem {
    pub id: String,
    pub order: i64,
}

/// Renumbering write for a single sibling. Deliberately carries nothing but
/// the id and the new order, so a reorder can never revert another field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub id: String,
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovedUpdate {
    pub id: String,
    pub bucket: String,
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketMove {
    pub moved: MovedUpdate,
    pub sibling_updates: Vec<OrderUpdate>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderingError {
    #[error("item not found in sibling set: {id}")]
    UnknownItem { id: String },
}

/// Stable array-move: remove the moved item, reinsert at `target_index`
/// (clamped), renumber 0..n-1, and report only the orders that changed.
/// Items read with equal `order` keep their read position (stable sort).
pub fn reorder_within_bucket(
    items: &[OrderedItem],
    moved_id: &str,
    target_index: usize,
) -> Result<Vec<OrderUpdate>, OrderingError> {
    let mut sequence = items.to_vec();
    sequence.sort_by_key(|item| item.order);

    let from = sequence
        .iter()
        .position(|item| item.id == moved_id)
        .ok_or_else(|| OrderingError::UnknownItem {
            id: moved_id.to_string(),
        })?;
    let moved = sequence.remove(from);
    let to = target_index.min(sequence.len());
    sequence.insert(to, moved);

    Ok(sequence
        .iter()
        .enumerate()
        .filter(|(index, item)| item.order != *index as i64)
        .map(|(index, item)| OrderUpdate {
            id: item.id.clone(),
            order: index as i64,
        })
        .collect())
}

/// Move an item into another bucket at `dest_index` (clamped). Destination
/// items at or after the insertion point shift down by one; the vacated
/// source bucket keeps its gap until its next same-bucket reorder.
pub fn move_across_buckets(
    source_items: &[OrderedItem],
    dest_items: &[OrderedItem],
    moved_id: &str,
    dest_bucket: &str,
    dest_index: usize,
) -> Result<BucketMove, OrderingError> {
    if !source_items.iter().any(|item| item.id == moved_id) {
        return Err(OrderingError::UnknownItem {
            id: moved_id.to_string(),
        });
    }

    let mut destination = dest_items.to_vec();
    destination.sort_by_key(|item| item.order);
    let to = dest_index.min(destination.len());

    let sibling_updates = destination
        .iter()
        .enumerate()
        .filter(|(position, _)| *position >= to)
        .map(|(_, item)| OrderUpdate {
            id: item.id.clone(),
            order: item.order + 1,
        })
        .collect();

    Ok(BucketMove {
        moved: MovedUpdate {
            id: moved_id.to_string(),
            bucket: dest_bucket.to_string(),
            order: to as i64,
        },
        sibling_updates,
    })
}
