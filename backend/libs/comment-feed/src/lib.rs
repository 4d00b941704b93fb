//! Live comment fan-out
//!
//! Lets readers of a post receive newly created comments as they happen.
//! Two interchangeable backends sit behind the [`CommentFeed`] trait:
//!
//! ```text
//! TopicRegistry (single process):
//!   publish(comment) -> try_send into every inbox registered for comment.post_id
//!                       full inbox => comment dropped for that subscriber, warn!
//!
//! NotificationBridge (any number of processes sharing one database):
//!   publish(comment) -> SELECT pg_notify('comments_<post_id>', <json>)
//!        |
//!   Postgres
//!        |
//!   subscribe(post_id) -> dedicated connection, LISTEN comments_<post_id>
//!                         listener task decodes payloads into the inbox
//! ```
//!
//! Delivery is best effort in both cases. Publishing never fails from the
//! caller's point of view, and a comment's durability never depends on it.
//!
//! # Example
//!
//! ```no_run
//! use comment_feed::{CommentFeed, TopicRegistry};
//!
//! # async fn run(comment: comment_feed::Comment) -> Result<(), comment_feed::FeedError> {
//! let feed = TopicRegistry::new();
//!
//! let mut subscription = feed.subscribe("post-1").await?;
//! feed.publish(&comment).await;
//!
//! while let Some(comment) = subscription.recv().await {
//!     println!("{} wrote: {}", comment.author, comment.content);
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

mod bridge;
mod channel;
mod comment;
mod error;
mod registry;
mod stats;
mod subscription;

pub use bridge::{NotificationBridge, MAX_NOTIFY_PAYLOAD_BYTES};
pub use channel::{channel_for_post, is_safe_post_id, CHANNEL_PREFIX, HASHED_CHANNEL_PREFIX};
pub use comment::Comment;
pub use error::FeedError;
pub use registry::{TopicRegistry, DEFAULT_INBOX_CAPACITY};
pub use stats::{FeedStats, StatsCollector};
pub use subscription::{CancelHandle, Subscription};

pub type Result<T> = std::result::Result<T, FeedError>;

/// Publish/subscribe contract shared by every backend
#[async_trait]
pub trait CommentFeed: Send + Sync {
    /// Start receiving comments published for `post_id`
    ///
    /// Only setup failures are reported. Once a subscription exists, delivery
    /// problems are absorbed by the backend.
    async fn subscribe(&self, post_id: &str) -> Result<Subscription>;

    /// Hand a persisted comment to every live subscriber of its post
    async fn publish(&self, comment: &Comment);

    /// Counters since the feed was created
    fn stats(&self) -> FeedStats;
}
