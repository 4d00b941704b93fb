//! In-process topic registry
//!
//! Tracks which subscribers are interested in which post and fans comments out
//! to them without ever blocking the publisher. Nothing survives a restart.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::stats::{FeedStats, StatsCollector};
use crate::subscription::{CancelHandle, Subscription};
use crate::{Comment, CommentFeed, Result};

/// Inbox capacity used when none is configured
pub const DEFAULT_INBOX_CAPACITY: usize = 1;

/// Subscriber entry with ID and inbox sender
struct Subscriber {
    id: Uuid,
    sender: mpsc::Sender<Comment>,
}

type Topics = HashMap<String, Vec<Subscriber>>;

/// Registry of live subscribers keyed by post id
///
/// Clones share the same topics. A comment is offered to each subscriber with
/// `try_send`; a full inbox loses that comment (logged at `warn`) while the
/// other subscribers still get it.
#[derive(Clone)]
pub struct TopicRegistry {
    // post_id -> subscribers, in registration order
    topics: Arc<Mutex<Topics>>,
    inbox_capacity: usize,
    stats: StatsCollector,
}

impl Default for TopicRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TopicRegistry {
    pub fn new() -> Self {
        Self::with_inbox_capacity(DEFAULT_INBOX_CAPACITY)
    }

    /// Registry whose inboxes buffer up to `capacity` comments (minimum 1)
    pub fn with_inbox_capacity(capacity: usize) -> Self {
        Self {
            topics: Arc::new(Mutex::new(HashMap::new())),
            inbox_capacity: capacity.max(1),
            stats: StatsCollector::new(),
        }
    }

    pub fn inbox_capacity(&self) -> usize {
        self.inbox_capacity
    }

    /// Register a new subscriber for `post_id`
    pub fn add_subscriber(&self, post_id: &str) -> Subscription {
        let (sender, inbox) = mpsc::channel(self.inbox_capacity);
        let id = Uuid::new_v4();

        let total = {
            let mut topics = self.topics.lock();
            let subscribers = topics.entry(post_id.to_string()).or_default();
            subscribers.push(Subscriber { id, sender });
            subscribers.len()
        };
        self.stats.record_subscribe();

        debug!(
            post_id = %post_id,
            subscriber_id = %id,
            total,
            "Added comment subscriber"
        );

        let cancel = removal_handle(
            Arc::downgrade(&self.topics),
            self.stats.clone(),
            post_id.to_string(),
            id,
        );
        Subscription::new(post_id.to_string(), inbox, cancel)
    }

    /// Offer `comment` to every subscriber of its post. Never blocks.
    pub fn broadcast(&self, comment: &Comment) {
        self.stats.record_publish();

        let mut topics = self.topics.lock();
        let Some(subscribers) = topics.get_mut(&comment.post_id) else {
            return;
        };

        let stats = &self.stats;
        let before = subscribers.len();
        subscribers.retain(|subscriber| match subscriber.sender.try_send(comment.clone()) {
            Ok(()) => {
                stats.record_delivery();
                true
            }
            Err(TrySendError::Full(_)) => {
                stats.record_drop();
                warn!(
                    post_id = %comment.post_id,
                    comment_id = %comment.id,
                    subscriber_id = %subscriber.id,
                    "Subscriber inbox full, dropping comment"
                );
                true
            }
            // Receiver gone without cancelling; forget it.
            Err(TrySendError::Closed(_)) => false,
        });

        let after = subscribers.len();
        if before != after {
            debug!(
                post_id = %comment.post_id,
                pruned = before - after,
                active = after,
                "Pruned closed comment subscribers"
            );
        }
        if subscribers.is_empty() {
            topics.remove(&comment.post_id);
        }
    }

    /// Number of live subscribers for `post_id`
    pub fn subscriber_count(&self, post_id: &str) -> usize {
        self.topics.lock().get(post_id).map_or(0, Vec::len)
    }

    /// Number of posts with at least one subscriber
    pub fn topic_count(&self) -> usize {
        self.topics.lock().len()
    }
}

/// Cancellation that unregisters one subscriber
///
/// Removing the entry drops the only sender, which closes the inbox. The
/// removal runs under the same lock as `broadcast`, so a publish either sees
/// the subscriber with an open inbox or does not see it at all.
fn removal_handle(
    topics: Weak<Mutex<Topics>>,
    stats: StatsCollector,
    post_id: String,
    subscriber_id: Uuid,
) -> CancelHandle {
    CancelHandle::new(move || {
        stats.record_unsubscribe();

        let Some(topics) = topics.upgrade() else {
            return;
        };
        let mut guard = topics.lock();
        if let Some(subscribers) = guard.get_mut(&post_id) {
            subscribers.retain(|s| s.id != subscriber_id);
            debug!(
                post_id = %post_id,
                subscriber_id = %subscriber_id,
                remaining = subscribers.len(),
                "Removed comment subscriber"
            );
            if subscribers.is_empty() {
                guard.remove(&post_id);
            }
        }
    })
}

#[async_trait]
impl CommentFeed for TopicRegistry {
    async fn subscribe(&self, post_id: &str) -> Result<Subscription> {
        Ok(self.add_subscriber(post_id))
    }

    async fn publish(&self, comment: &Comment) {
        self.broadcast(comment);
    }

    fn stats(&self) -> FeedStats {
        self.stats.snapshot()
    }
}
