//! Statistics tracking for comment fan-out

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Point-in-time counters for one feed backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedStats {
    /// Comments handed to `publish`
    pub published: u64,
    /// Comments placed into a subscriber inbox
    pub delivered: u64,
    /// Comments dropped because a subscriber inbox was full
    pub dropped: u64,
    /// Inbound notification payloads that failed to decode
    pub decode_failures: u64,
    /// Publishes that could not be handed to the backend
    pub publish_failures: u64,
    /// Subscriptions opened since start
    pub subscriptions_opened: u64,
    /// Subscriptions closed since start, by cancellation or listener exit
    pub subscriptions_closed: u64,
}

impl FeedStats {
    /// Subscriptions currently open
    ///
    /// A bridge subscription whose listener stopped on a connection fault is
    /// already closed here, before its handle is dropped.
    pub fn active_subscriptions(&self) -> u64 {
        self.subscriptions_opened
            .saturating_sub(self.subscriptions_closed)
    }
}

/// Thread-safe statistics collector, shared by clones
#[derive(Clone, Default)]
pub struct StatsCollector {
    inner: Arc<Counters>,
}

#[derive(Default)]
struct Counters {
    published: AtomicU64,
    delivered: AtomicU64,
    dropped: AtomicU64,
    decode_failures: AtomicU64,
    publish_failures: AtomicU64,
    subscriptions_opened: AtomicU64,
    subscriptions_closed: AtomicU64,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_publish(&self) {
        self.inner.published.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivery(&self) {
        self.inner.delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_drop(&self) {
        self.inner.dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_decode_failure(&self) {
        self.inner.decode_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_publish_failure(&self) {
        self.inner.publish_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_subscribe(&self) {
        self.inner
            .subscriptions_opened
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unsubscribe(&self) {
        self.inner
            .subscriptions_closed
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Get current statistics snapshot
    pub fn snapshot(&self) -> FeedStats {
        let c = &self.inner;
        FeedStats {
            published: c.published.load(Ordering::Relaxed),
            delivered: c.delivered.load(Ordering::Relaxed),
            dropped: c.dropped.load(Ordering::Relaxed),
            decode_failures: c.decode_failures.load(Ordering::Relaxed),
            publish_failures: c.publish_failures.load(Ordering::Relaxed),
            subscriptions_opened: c.subscriptions_opened.load(Ordering::Relaxed),
            subscriptions_closed: c.subscriptions_closed.load(Ordering::Relaxed),
        }
    }
}
