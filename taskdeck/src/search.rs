//! Debounced search input
//!
//! Each keystroke lands in [`SearchQuery::set`] immediately, but subscribers
//! only hear about a value once it has sat unchanged for the debounce
//! interval. A newer keystroke cancels the older pending publication, so
//! intermediate values are never published.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Quiet period before a raw query value is published, in milliseconds
pub const SEARCH_DEBOUNCE_MS: u64 = 500;

/// Raw search input with a debounced published value.
///
/// `set` must be called from within a Tokio runtime; the pending publication
/// runs as a timer task.
pub struct SearchQuery {
    raw: String,
    debounce: Duration,
    published: watch::Sender<String>,
    pending: Option<JoinHandle<()>>,
}

impl SearchQuery {
    /// A query with the default debounce interval
    pub fn new() -> Self {
        Self::with_debounce(Duration::from_millis(SEARCH_DEBOUNCE_MS))
    }

    /// A query with a custom debounce interval
    pub fn with_debounce(debounce: Duration) -> Self {
        let (published, _) = watch::channel(String::new());
        Self {
            raw: String::new(),
            debounce,
            published,
            pending: None,
        }
    }

    /// Record a keystroke. The raw value updates at once; the published
    /// value follows after the debounce interval, unless a newer call
    /// replaces it first.
    pub fn set(&mut self, raw: impl Into<String>) {
        self.raw = raw.into();

        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        let value = self.raw.clone();
        let publisher = self.published.clone();
        let deadline = Instant::now() + self.debounce;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            publisher.send_replace(value);
        }));
    }

    /// The raw value as of the latest keystroke
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The most recently published value
    pub fn published(&self) -> String {
        self.published.borrow().clone()
    }

    /// Subscribe to published values
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.published.subscribe()
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SearchQuery {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}
