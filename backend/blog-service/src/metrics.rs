//! Prometheus export of the comment feed counters
//!
//! The feed keeps its own atomic counters; gauges here are refreshed from a
//! snapshot on every scrape.

use comment_feed::FeedStats;
use prometheus::{register_int_gauge_vec, Encoder, IntGaugeVec, TextEncoder};

use crate::error::{AppError, Result};

lazy_static::lazy_static! {
    static ref COMMENT_FEED_EVENTS: IntGaugeVec = register_int_gauge_vec!(
        "comment_feed_events",
        "Comment feed counters since start, by event",
        &["backend", "event"]
    ).expect("Prometheus metrics registration should succeed at startup");

    static ref COMMENT_FEED_ACTIVE_SUBSCRIPTIONS: IntGaugeVec = register_int_gauge_vec!(
        "comment_feed_active_subscriptions",
        "Comment subscriptions currently open",
        &["backend"]
    ).expect("Prometheus metrics registration should succeed at startup");
}

fn as_gauge(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

pub fn record_feed_stats(backend: &str, stats: &FeedStats) {
    for (event, value) in [
        ("published", stats.published),
        ("delivered", stats.delivered),
        ("dropped", stats.dropped),
        ("decode_failures", stats.decode_failures),
        ("publish_failures", stats.publish_failures),
    ] {
        COMMENT_FEED_EVENTS
            .with_label_values(&[backend, event])
            .set(as_gauge(value));
    }
    COMMENT_FEED_ACTIVE_SUBSCRIPTIONS
        .with_label_values(&[backend])
        .set(as_gauge(stats.active_subscriptions()));
}

/// Everything in the default registry, Prometheus text format
pub fn render() -> Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|e| AppError::Internal(format!("failed to encode metrics: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| AppError::Internal(format!("metrics are not UTF-8: {}", e)))
}
