//! Caller-facing subscription handle, identical for every backend

use futures_util::stream::Stream;
use parking_lot::Mutex;
use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

use crate::Comment;

type CancelAction = Box<dyn FnOnce() + Send + 'static>;

/// One-shot cancellation for a subscription
///
/// Clones share the same gate: the backend's teardown runs on the first
/// `cancel()` and never again, no matter how many clones call it or from
/// which threads.
#[derive(Clone)]
pub struct CancelHandle {
    action: Arc<Mutex<Option<CancelAction>>>,
}

impl CancelHandle {
    pub(crate) fn new<F>(action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            action: Arc::new(Mutex::new(Some(Box::new(action)))),
        }
    }

    /// Tear the subscription down. Idempotent.
    pub fn cancel(&self) {
        // Take under the lock, run outside it: teardown may lock the registry.
        let action = self.action.lock().take();
        if let Some(action) = action {
            action();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.action.lock().is_none()
    }
}

impl fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelHandle")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Live sequence of new comments for one post
///
/// Yields comments in publish order until the subscription is cancelled or
/// the backend closes it. Dropping the handle cancels it.
pub struct Subscription {
    post_id: String,
    inbox: mpsc::Receiver<Comment>,
    cancel: CancelHandle,
}

impl Subscription {
    pub(crate) fn new(post_id: String, inbox: mpsc::Receiver<Comment>, cancel: CancelHandle) -> Self {
        Self {
            post_id,
            inbox,
            cancel,
        }
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    /// Next comment, or `None` once the inbox is closed and drained
    pub async fn recv(&mut self) -> Option<Comment> {
        self.inbox.recv().await
    }

    /// Non-blocking receive
    pub fn try_recv(&mut self) -> Result<Comment, mpsc::error::TryRecvError> {
        self.inbox.try_recv()
    }

    /// Handle that can cancel this subscription from elsewhere
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Stream for Subscription {
    type Item = Comment;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Comment>> {
        self.get_mut().inbox.poll_recv(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("post_id", &self.post_id)
            .field("cancel", &self.cancel)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_handle() -> (CancelHandle, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handle = CancelHandle::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (handle, calls)
    }

    #[test]
    fn test_cancel_runs_once() {
        let (handle, calls) = counting_handle();
        assert!(!handle.is_cancelled());

        handle.cancel();
        handle.cancel();
        handle.clone().cancel();

        assert!(handle.is_cancelled());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_cancel_runs_once() {
        let (handle, calls) = counting_handle();

        let threads: Vec<_> = (0..8)
            .map(|_| {
                let h = handle.clone();
                std::thread::spawn(move || h.cancel())
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_drop_cancels() {
        let (handle, calls) = counting_handle();
        let (_tx, rx) = mpsc::channel(1);

        let subscription = Subscription::new("p1".to_string(), rx, handle.clone());
        assert_eq!(subscription.post_id(), "p1");
        drop(subscription);

        assert!(handle.is_cancelled());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_explicit_cancel_then_drop() {
        let (handle, calls) = counting_handle();
        let (_tx, rx) = mpsc::channel(1);

        let subscription = Subscription::new("p1".to_string(), rx, handle);
        subscription.cancel();
        assert!(subscription.is_cancelled());
        drop(subscription);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
