//! Debounced value signal.
//!
//! [`Debouncer`] turns a rapidly changing value (typically the text in a
//! search box) into a settled value that only updates after the input has
//! been quiet for the configured delay.
//!
//! # Mechanism
//!
//! Every [`push()`](Debouncer::push) aborts the pending timer task, if any,
//! and spawns a new one that sleeps until `now + delay` and then publishes
//! the value on a `tokio::sync::watch` channel. Intermediate values in a
//! burst are therefore never observable. Dropping the debouncer aborts the
//! pending task so nothing is ever published to a dead consumer.
//!
//! A zero delay still publishes from the spawned task, one scheduler tick
//! later, never inline.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

use crate::telemetry;

/// Default quiet period before a value settles.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Publishes the latest pushed value once it has stayed unchanged for the
/// debounce delay.
pub struct Debouncer<V> {
    delay: Duration,
    tx: Arc<watch::Sender<V>>,
    pending: Option<JoinHandle<()>>,
    emissions: Arc<AtomicU64>,
}

impl<V> Debouncer<V>
where
    V: Clone + PartialEq + Send + Sync + 'static,
{
    /// Create a debouncer whose settled value starts at `initial`.
    pub fn new(initial: V, delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            delay,
            tx: Arc::new(tx),
            pending: None,
            emissions: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The configured quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Feed a new raw value, restarting the quiet period.
    ///
    /// # Panics
    ///
    /// Requires a tokio runtime context (spawns the timer task).
    pub fn push(&mut self, value: V) {
        self.cancel();

        let deadline = Instant::now() + self.delay;
        let tx = Arc::clone(&self.tx);
        let emissions = Arc::clone(&self.emissions);
        let delay_ms = self.delay.as_millis() as u64;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            emissions.fetch_add(1, Ordering::Relaxed);
            metrics::counter!(telemetry::DEBOUNCE_EMISSIONS_TOTAL).increment(1);
            let changed = tx.send_if_modified(|current| {
                if *current == value {
                    false
                } else {
                    *current = value;
                    true
                }
            });
            debug!(delay_ms, changed, "debounced value settled");
        }));
    }

    /// Abort the pending timer, if any. The settled value is left as is.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a pushed value is still waiting out its quiet period.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Wait until the pending value, if any, has been published.
    ///
    /// Returns immediately when nothing is pending or the timer was
    /// cancelled.
    pub async fn wait(&mut self) {
        if let Some(handle) = self.pending.as_mut() {
            // A JoinError here means the task was aborted; nothing to wait for.
            let _ = handle.await;
        }
        self.pending = None;
    }

    /// The most recently settled value.
    pub fn settled(&self) -> V {
        self.tx.borrow().clone()
    }

    /// Receiver notified each time the settled value changes.
    pub fn subscribe(&self) -> watch::Receiver<V> {
        self.tx.subscribe()
    }

    /// Settled values as a `Stream`, starting with the current one.
    pub fn stream(&self) -> WatchStream<V> {
        WatchStream::new(self.subscribe())
    }

    /// Number of times a timer has fired and published.
    pub fn emissions(&self) -> u64 {
        self.emissions.load(Ordering::Relaxed)
    }
}

impl<V> Drop for Debouncer<V> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
