//! Error types for comment feed operations

use thiserror::Error;

/// Comment feed errors
///
/// Only subscription setup failures reach callers of `subscribe`. Delivery and
/// publish failures are logged and counted inside the feed.
#[derive(Error, Debug)]
pub enum FeedError {
    /// No connection could be checked out for a listener
    #[error("Failed to acquire listener connection: {0}")]
    Acquire(#[source] sqlx::Error),

    /// LISTEN was rejected for the channel
    #[error("Failed to listen on channel {channel}: {source}")]
    Listen {
        channel: String,
        #[source]
        source: sqlx::Error,
    },

    /// NOTIFY (or any other statement on the shared pool) failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Comment serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Encoded comment exceeds what a single notification can carry
    #[error("Notification payload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },
}
