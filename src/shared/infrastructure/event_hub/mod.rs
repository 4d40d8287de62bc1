// In-process registry of live push connections with scoped fan-out.
//
// Responsibilities
// - Own the subscriber set behind a lock; expose only subscribe, unsubscribe
//   and publish.
// - Deliver fire-and-forget, at-most-once per live connection. A slow
//   subscriber loses the event; a closed one is pruned. Publishing never
//   blocks and never reports a delivery failure to the caller.
//
// Boundaries
// - Subscriptions live only in memory and die with the connection. Transport
//   framing (SSE) lives in the shell, not here.

pub mod event;

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use uuid::Uuid;

use event::BoardEvent;

pub const DEFAULT_CONNECTION_BUFFER: usize = 64;

struct Subscription {
    scope: Option<String>,
    tx: mpsc::Sender<BoardEvent>,
}

pub struct EventHub {
    connection_buffer: usize,
    subscriptions: Mutex<HashMap<Uuid, Subscription>>,
}

impl EventHub {
    pub fn new(connection_buffer: usize) -> Self {
        Self {
            connection_buffer: connection_buffer.max(1),
            subscriptions: Mutex::new(HashMap::new()),
        }
    }

    /// Register a push connection. `scope` of `None` means the subscriber
    /// receives every event. The `connected` acknowledgement carrying the new
    /// subscription id is already queued on the returned receiver.
    pub fn subscribe(&self, scope: Option<String>) -> (Uuid, mpsc::Receiver<BoardEvent>) {
        let (tx, rx) = mpsc::channel(self.connection_buffer);
        let subscription_id = Uuid::now_v7();
        let _ = tx.try_send(BoardEvent::Connected { subscription_id });
        let mut subscriptions = self
            .subscriptions
            .lock()
            .expect("subscription registry lock poisoned");
        subscriptions.insert(subscription_id, Subscription { scope, tx });
        tracing::debug!(%subscription_id, total = subscriptions.len(), "subscriber registered");
        (subscription_id, rx)
    }

    /// Idempotent removal. Called on explicit close and from the shell when
    /// the push stream is dropped.
    pub fn unsubscribe(&self, subscription_id: Uuid) {
        let mut subscriptions = self
            .subscriptions
            .lock()
            .expect("subscription registry lock poisoned");
        if subscriptions.remove(&subscription_id).is_some() {
            tracing::debug!(%subscription_id, total = subscriptions.len(), "subscriber removed");
        }
    }

    /// Fan `event` out to every subscriber whose scope is `None` or equals
    /// the publish scope. An unscoped publish reaches everyone. A full
    /// per-connection buffer drops the event for that subscriber; a closed
    /// connection is torn down here.
    pub fn publish(&self, event: &BoardEvent, scope: Option<&str>) {
        let mut subscriptions = self
            .subscriptions
            .lock()
            .expect("subscription registry lock poisoned");
        let mut closed = Vec::new();
        for (subscription_id, subscription) in subscriptions.iter() {
            let interested = subscription.scope.is_none()
                || scope.is_none()
                || subscription.scope.as_deref() == scope;
            if !interested {
                continue;
            }
            match subscription.tx.try_send(event.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(
                        %subscription_id,
                        event_type = event.event_type(),
                        "push buffer full, dropping event"
                    );
                }
                Err(TrySendError::Closed(_)) => closed.push(*subscription_id),
            }
        }
        for subscription_id in closed {
            subscriptions.remove(&subscription_id);
            tracing::debug!(%subscription_id, "pruned closed subscriber during publish");
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions
            .lock()
            .expect("subscription registry lock poisoned")
            .len()
    }

    /// Ids of the currently registered subscriptions.
    pub fn subscription_ids(&self) -> Vec<Uuid> {
        self.subscriptions
            .lock()
            .expect("subscription registry lock poisoned")
            .keys()
            .copied()
            .collect()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECTION_BUFFER)
    }
}
