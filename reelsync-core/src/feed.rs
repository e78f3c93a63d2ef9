use crate::error::Result;
use async_trait::async_trait;
use reelsync_model::prelude::*;
use tokio::sync::mpsc;

/// Logical change-feed topics, each scoped to one video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedTopic {
    /// Row-level inserts on the durable marker table.
    Markers,
    /// Newly broadcast reaction events.
    Events,
}

impl std::fmt::Display for FeedTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedTopic::Markers => write!(f, "markers"),
            FeedTopic::Events => write!(f, "events"),
        }
    }
}

/// Insert notification delivered by the change feed.
#[derive(Debug, Clone)]
pub enum FeedInsert {
    Marker(ReactionMarker),
    Event(ReactionEvent),
}

/// Push-based notification collaborator.
///
/// At-most-current semantics: a fresh subscription observes only inserts
/// created after it was opened; no backlog replay.
#[async_trait]
pub trait ChangeFeed: Send + Sync {
    async fn subscribe(
        &self,
        topic: FeedTopic,
        video_id: VideoID,
    ) -> Result<FeedSubscription>;
}

/// Handle to one open change-feed subscription.
///
/// `close` is idempotent and also runs on drop, so every exit path from a
/// mounted scope (navigation, unmount, video switch) tears the channel
/// down. Leaking a subscription across video switches is a defect.
pub struct FeedSubscription {
    receiver: mpsc::UnboundedReceiver<FeedInsert>,
    closer: Option<Box<dyn FnOnce() + Send>>,
}

impl FeedSubscription {
    pub fn new(
        receiver: mpsc::UnboundedReceiver<FeedInsert>,
        closer: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            receiver,
            closer: Some(Box::new(closer)),
        }
    }

    /// Next insert, or `None` once the feed side hangs up.
    pub async fn next(&mut self) -> Option<FeedInsert> {
        self.receiver.recv().await
    }

    /// Release the upstream subscription. Safe to call repeatedly.
    pub fn close(&mut self) {
        if let Some(closer) = self.closer.take() {
            closer();
        }
        self.receiver.close();
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for FeedSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedSubscription")
            .field("closed", &self.closer.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn close_is_idempotent_and_runs_on_drop() {
        let closes = Arc::new(AtomicUsize::new(0));
        let (_tx, rx) = mpsc::unbounded_channel();
        let counter = Arc::clone(&closes);
        let mut sub = FeedSubscription::new(rx, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        sub.close();
        sub.close();
        drop(sub);

        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn delivers_inserts_until_feed_hangs_up() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut sub = FeedSubscription::new(rx, || {});

        let marker = ReactionMarker {
            id: MarkerID::new(),
            video_id: VideoID::new(),
            user_id: UserID::new(),
            username: "viewer".into(),
            avatar_url: None,
            timestamp_seconds: 12.0,
        };
        tx.send(FeedInsert::Marker(marker)).expect("send insert");
        drop(tx);

        assert!(matches!(sub.next().await, Some(FeedInsert::Marker(_))));
        assert!(sub.next().await.is_none());
    }
}
