// Single app-wide push subscriber.
//
// Responsibilities
// - Keep one push connection open per client and reconnect with a fixed
//   backoff when it drops. Missed events are covered by the refetch that
//   follows reconnection, so no replay protocol is needed.
// - Turn event bursts into one refetch per stale slice: events only mark
//   slices stale, and a debounce window coalesces rapid-fire invalidations.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep, timeout};

use crate::shared::infrastructure::event_hub::EventHub;
use crate::shared::infrastructure::event_hub::event::BoardEvent;

use super::cache::{ReconcilingCache, Slice};

/// Server push connection. Yields events until the connection closes.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn connect(&self) -> anyhow::Result<mpsc::Receiver<BoardEvent>>;
}

/// Fetches the authoritative content of one cache slice.
#[async_trait]
pub trait Refetcher: Send + Sync {
    async fn refetch(&self, slice: &Slice) -> anyhow::Result<serde_json::Value>;
}

/// In-process source backed by the hub directly. Used by tests and by
/// same-process clients; remote clients implement `EventSource` over SSE.
pub struct HubEventSource {
    pub hub: Arc<EventHub>,
    pub scope: Option<String>,
}

#[async_trait]
impl EventSource for HubEventSource {
    async fn connect(&self) -> anyhow::Result<mpsc::Receiver<BoardEvent>> {
        let (subscription_id, receiver) = self.hub.subscribe(self.scope.clone());
        tracing::debug!(%subscription_id, "push connection opened");
        Ok(receiver)
    }
}

#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    pub reconnect_backoff: Duration,
    pub refetch_debounce: Duration,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            reconnect_backoff: Duration::from_secs(3),
            refetch_debounce: Duration::from_millis(300),
        }
    }
}

impl From<&crate::config::AppConfig> for SubscriberConfig {
    fn from(config: &crate::config::AppConfig) -> Self {
        Self {
            reconnect_backoff: config.reconnect_backoff,
            refetch_debounce: config.refetch_debounce,
        }
    }
}

pub struct PushSubscriber<S, R> {
    source: S,
    refetcher: R,
    cache: Arc<ReconcilingCache>,
    config: SubscriberConfig,
}

impl<S: EventSource, R: Refetcher> PushSubscriber<S, R> {
    pub fn new(
        source: S,
        refetcher: R,
        cache: Arc<ReconcilingCache>,
        config: SubscriberConfig,
    ) -> Self {
        Self {
            source,
            refetcher,
            cache,
            config,
        }
    }

    /// Connect, pump, reconnect on close. Returns when `shutdown` flips to
    /// true or its sender is dropped.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        loop {
            if *shutdown.borrow() {
                return;
            }
            let receiver = tokio::select! {
                _ = shutdown.changed() => return,
                connected = self.source.connect() => match connected {
                    Ok(receiver) => receiver,
                    Err(error) => {
                        tracing::warn!(%error, "push connect failed, retrying after backoff");
                        tokio::select! {
                            _ = shutdown.changed() => return,
                            _ = sleep(self.config.reconnect_backoff) => continue,
                        }
                    }
                },
            };

            tokio::select! {
                _ = shutdown.changed() => return,
                _ = self.pump(receiver) => {}
            }

            tracing::info!("push connection closed, reconnecting after backoff");
            tokio::select! {
                _ = shutdown.changed() => return,
                _ = sleep(self.config.reconnect_backoff) => {}
            }
        }
    }

    /// Drain one connection. Each burst of events ends in a single refetch
    /// pass once the stream stays quiet for the debounce window.
    async fn pump(&self, mut receiver: mpsc::Receiver<BoardEvent>) {
        while let Some(event) = receiver.recv().await {
            self.note(event);
            loop {
                match timeout(self.config.refetch_debounce, receiver.recv()).await {
                    Ok(Some(event)) => self.note(event),
                    Ok(None) => {
                        self.refetch_stale().await;
                        return;
                    }
                    Err(_) => break,
                }
            }
            self.refetch_stale().await;
        }
    }

    fn note(&self, event: BoardEvent) {
        let Some(slice) = Slice::for_event(&event) else {
            return;
        };
        if self.cache.consume_own(&slice) {
            tracing::debug!(event = event.event_type(), "ignoring echo of own mutation");
            return;
        }
        tracing::debug!(event = event.event_type(), ?slice, "slice marked stale");
        self.cache.invalidate(slice);
    }

    async fn refetch_stale(&self) {
        for slice in self.cache.take_stale() {
            match self.refetcher.refetch(&slice).await {
                Ok(value) => self.cache.store_refetched(slice, value),
                Err(error) => {
                    tracing::warn!(%error, ?slice, "refetch failed, slice stays stale");
                    self.cache.invalidate(slice);
                }
            }
        }
    }
}
