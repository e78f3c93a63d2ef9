use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use reelsync_model::prelude::*;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::IntervalStream;
use tracing::{debug, warn};

use crate::error::Result;
use crate::feed::{ChangeFeed, FeedInsert, FeedSubscription, FeedTopic};
use crate::player::format_time;
use crate::player::messages::PlayerMessage;
use crate::player::state::PlayerState;
use crate::player::update::{Effect, update};
use crate::store::DurableStore;

/// Cheap cloneable sender the host uses to drive a running player.
#[derive(Debug, Clone)]
pub struct PlayerHandle {
    tx: mpsc::UnboundedSender<PlayerMessage>,
}

impl PlayerHandle {
    pub fn send(&self, message: PlayerMessage) {
        if self.tx.send(message).is_err() {
            debug!("player runtime already shut down, message dropped");
        }
    }

    /// Convenience for the teardown path.
    pub fn unmount(&self) {
        self.send(PlayerMessage::Unmount);
    }
}

/// Drives one mounted player: owns the state, runs the one-second clock,
/// pumps change-feed inserts into messages, and executes reducer effects
/// on spawned tasks.
///
/// One runtime per mount. Switching videos means unmounting this runtime
/// and starting a fresh one, which is what closes the old subscriptions.
pub struct PlayerRuntime {
    state: PlayerState,
    store: Arc<dyn DurableStore>,
    feed: Arc<dyn ChangeFeed>,
    tx: mpsc::UnboundedSender<PlayerMessage>,
    rx: mpsc::UnboundedReceiver<PlayerMessage>,
}

impl PlayerRuntime {
    pub fn new(
        state: PlayerState,
        store: Arc<dyn DurableStore>,
        feed: Arc<dyn ChangeFeed>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state,
            store,
            feed,
            tx,
            rx,
        }
    }

    pub fn handle(&self) -> PlayerHandle {
        PlayerHandle {
            tx: self.tx.clone(),
        }
    }

    /// Run until unmount, returning the final state.
    pub async fn run(mut self) -> Result<PlayerState> {
        let video_id = self.state.video_id;
        let marker_sub = self.feed.subscribe(FeedTopic::Markers, video_id).await?;
        let event_sub = self.feed.subscribe(FeedTopic::Events, video_id).await?;
        let marker_pump = spawn_feed_pump(marker_sub, self.tx.clone());
        let event_pump = spawn_feed_pump(event_sub, self.tx.clone());

        // Full fetch on mount; feed inserts only trigger re-fetches.
        let generation = self.state.markers.begin_refresh();
        self.dispatch(Effect::RefreshMarkers {
            video_id,
            generation,
        });

        let mut clock = IntervalStream::new(tokio::time::interval(Duration::from_secs(1)));
        let mut running = true;
        while running {
            tokio::select! {
                _ = clock.next() => {
                    running = self.step(PlayerMessage::ClockTick);
                }
                received = self.rx.recv() => {
                    let message = received.unwrap_or(PlayerMessage::Unmount);
                    running = self.step(message);
                }
            }
        }

        marker_pump.abort();
        event_pump.abort();
        Ok(self.state)
    }

    /// Returns false once a shutdown effect has been seen.
    fn step(&mut self, message: PlayerMessage) -> bool {
        let mut running = true;
        for effect in update(&mut self.state, message) {
            running &= self.dispatch(effect);
        }
        running
    }

    fn dispatch(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::RefreshMarkers {
                video_id,
                generation,
            } => {
                let store = Arc::clone(&self.store);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = store.fetch_markers(video_id).await;
                    let _ = tx.send(PlayerMessage::MarkersRefreshed { generation, result });
                });
            }
            Effect::FlushWatchTime {
                video_id,
                seconds,
                progress,
            } => {
                let store = Arc::clone(&self.store);
                tokio::spawn(async move {
                    if let Err(err) =
                        store.accumulate_watch_time(video_id, seconds, progress).await
                    {
                        warn!(%err, %video_id, seconds, "watch-time flush failed");
                    }
                });
            }
            Effect::SubmitReaction(reaction) => {
                let store = Arc::clone(&self.store);
                tokio::spawn(submit_reaction(store, reaction));
            }
            Effect::ScheduleAnimationEnd { token } => {
                let tx = self.tx.clone();
                let window = self.state.tuning.animation_duration();
                tokio::spawn(async move {
                    tokio::time::sleep(window).await;
                    let _ = tx.send(PlayerMessage::AnimationExpired(token));
                });
            }
            Effect::Shutdown => return false,
        }
        true
    }
}

impl std::fmt::Debug for PlayerRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerRuntime")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

fn spawn_feed_pump(
    mut subscription: FeedSubscription,
    tx: mpsc::UnboundedSender<PlayerMessage>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(insert) = subscription.next().await {
            let message = match insert {
                FeedInsert::Marker(_) => PlayerMessage::MarkerFeedInsert,
                FeedInsert::Event(event) => PlayerMessage::ReactionEventReceived(event),
            };
            if tx.send(message).is_err() {
                break;
            }
        }
    })
}

/// Persist one committed reaction. The event broadcast is best-effort; the
/// marker is the durable record, and the announcement plus counter credit
/// follow only a successful marker insert.
async fn submit_reaction(store: Arc<dyn DurableStore>, reaction: NewReaction) {
    if let Err(err) = store.insert_event(&reaction).await {
        warn!(%err, video_id = %reaction.video_id, "reaction event broadcast failed");
    }

    if let Err(err) = store.insert_marker(&reaction).await {
        warn!(%err, video_id = %reaction.video_id, "reaction marker insert failed");
        return;
    }

    let announcement = format!(
        "{} reacted at {}",
        reaction.username,
        format_time(reaction.timestamp_seconds)
    );
    let announce = async {
        if let Err(err) = store.insert_announcement(&announcement).await {
            warn!(%err, "reaction announcement failed");
        }
    };
    let credit = async {
        if let Err(err) = store
            .update_user_counters(
                reaction.user_id,
                UserCounters::reaction_delta(reaction.hold_seconds),
            )
            .await
        {
            warn!(%err, user_id = %reaction.user_id, "counter credit failed");
        }
    };
    futures::join!(announce, credit);
}
