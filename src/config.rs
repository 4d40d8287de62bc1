// Process configuration, read once at startup. Every knob has a default so
// the server runs with no environment at all.

use std::env;
use std::time::Duration;

use crate::shared::infrastructure::event_hub::DEFAULT_CONNECTION_BUFFER;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_REFETCH_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_RECONNECT_BACKOFF_MS: u64 = 3_000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Per-connection push buffer; a subscriber slower than this loses events
    /// and recovers through refetch.
    pub connection_buffer: usize,
    pub refetch_debounce: Duration,
    pub reconnect_backoff: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: read_parsed("PORT", DEFAULT_PORT),
            connection_buffer: read_parsed("CONNECTION_BUFFER", DEFAULT_CONNECTION_BUFFER),
            refetch_debounce: Duration::from_millis(read_parsed(
                "REFETCH_DEBOUNCE_MS",
                DEFAULT_REFETCH_DEBOUNCE_MS,
            )),
            reconnect_backoff: Duration::from_millis(read_parsed(
                "RECONNECT_BACKOFF_MS",
                DEFAULT_RECONNECT_BACKOFF_MS,
            )),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            connection_buffer: DEFAULT_CONNECTION_BUFFER,
            refetch_debounce: Duration::from_millis(DEFAULT_REFETCH_DEBOUNCE_MS),
            reconnect_backoff: Duration::from_millis(DEFAULT_RECONNECT_BACKOFF_MS),
        }
    }
}

fn read_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, raw, "unparseable value, using default");
                default
            }
        },
        Err(_) => default,
    }
}
