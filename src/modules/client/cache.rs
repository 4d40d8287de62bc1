// Optimistic client-side cache with explicit reconciliation rules.
//
// Responsibilities
// - Apply local mutations immediately, before the server round trip.
// - Merge authoritative responses field-wise: keys present in the response
//   overwrite, keys absent stay untouched. A partial response can never erase
//   unrelated optimistic state.
// - Push events only mark a slice stale; payloads are pointers, never applied
//   as new state.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use serde_json::Value;

use crate::shared::infrastructure::event_hub::event::BoardEvent;

/// Cacheable unit of server state a push event can point at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slice {
    Project(String),
    Tasks,
}

impl Slice {
    /// Slice an event invalidates. The `connected` acknowledgement points at
    /// nothing.
    pub fn for_event(event: &BoardEvent) -> Option<Slice> {
        match event {
            BoardEvent::Connected { .. } => None,
            BoardEvent::ProjectUpdated { project_id, .. }
            | BoardEvent::TimerStarted { project_id, .. }
            | BoardEvent::TimerStopped { project_id, .. } => {
                Some(Slice::Project(project_id.clone()))
            }
            BoardEvent::TodoCreated { .. }
            | BoardEvent::TodoUpdated { .. }
            | BoardEvent::TodoDeleted { .. } => Some(Slice::Tasks),
        }
    }
}

#[derive(Default)]
struct CacheInner {
    slices: HashMap<Slice, Value>,
    stale: HashSet<Slice>,
    // Self-notifications still pending per slice; each suppresses one
    // invalidation so a client does not refetch what it just wrote.
    own: HashMap<Slice, u32>,
}

#[derive(Default)]
pub struct ReconcilingCache {
    inner: Mutex<CacheInner>,
}

fn merge_into(current: &mut Value, incoming: &Value) {
    match (current, incoming) {
        (Value::Object(current), Value::Object(incoming)) => {
            for (key, value) in incoming {
                current.insert(key.clone(), value.clone());
            }
        }
        (current, incoming) => *current = incoming.clone(),
    }
}

impl ReconcilingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slice: &Slice) -> Option<Value> {
        self.lock().slices.get(slice).cloned()
    }

    /// Apply a local mutation before the server confirms it.
    pub fn apply_optimistic(&self, slice: Slice, value: Value) {
        let mut inner = self.lock();
        merge_into(inner.slices.entry(slice).or_insert(Value::Null), &value);
    }

    /// Merge the authoritative response to our own request into the slice.
    pub fn merge_response(&self, slice: Slice, response: &Value) {
        let mut inner = self.lock();
        merge_into(inner.slices.entry(slice).or_insert(Value::Null), response);
    }

    /// Mark a slice stale; its content stays readable until refetched.
    pub fn invalidate(&self, slice: Slice) {
        self.lock().stale.insert(slice);
    }

    pub fn is_stale(&self, slice: &Slice) -> bool {
        self.lock().stale.contains(slice)
    }

    /// Drain the slices awaiting a refetch.
    pub fn take_stale(&self) -> Vec<Slice> {
        self.lock().stale.drain().collect()
    }

    /// Replace a slice with a fresh authoritative fetch.
    pub fn store_refetched(&self, slice: Slice, value: Value) {
        let mut inner = self.lock();
        inner.stale.remove(&slice);
        inner.slices.insert(slice, value);
    }

    /// Announce that the next push event for `slice` echoes our own mutation.
    pub fn expect_own(&self, slice: Slice) {
        *self.lock().own.entry(slice).or_insert(0) += 1;
    }

    /// Consume one pending self-notification, if any.
    pub fn consume_own(&self, slice: &Slice) -> bool {
        let mut inner = self.lock();
        match inner.own.get_mut(slice) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheInner> {
        self.inner.lock().expect("cache lock poisoned")
    }
}
