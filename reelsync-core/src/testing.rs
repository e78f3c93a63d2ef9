//! In-memory collaborator fakes shared by the unit and integration tests.
//!
//! Compiled unconditionally so integration tests and downstream hosts can
//! exercise the engine without a real backend.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use reelsync_model::prelude::*;
use tokio::sync::mpsc;

use crate::error::{EngineError, Result};
use crate::feed::{ChangeFeed, FeedInsert, FeedSubscription, FeedTopic};
use crate::store::DurableStore;
use crate::time::MediaSurface;

#[derive(Debug)]
struct SurfaceState {
    position: f64,
    duration: f64,
    paused: bool,
    ended: bool,
    volume: f64,
    muted: bool,
    fullscreen: bool,
    reject_play: bool,
    seeks: Vec<f64>,
}

/// Scriptable stand-in for a media element. The paired [`SurfaceHandle`]
/// lets a test read and mutate the element from outside the player that
/// owns it.
#[derive(Debug)]
pub struct FakeSurface {
    state: Arc<Mutex<SurfaceState>>,
}

impl FakeSurface {
    pub fn with_duration(duration: f64) -> (Self, SurfaceHandle) {
        let state = Arc::new(Mutex::new(SurfaceState {
            position: 0.0,
            duration,
            paused: true,
            ended: false,
            volume: 1.0,
            muted: false,
            fullscreen: false,
            reject_play: false,
            seeks: Vec::new(),
        }));
        let handle = SurfaceHandle {
            state: Arc::clone(&state),
        };
        (Self { state }, handle)
    }
}

impl MediaSurface for FakeSurface {
    fn position(&self) -> f64 {
        self.state.lock().position
    }

    fn duration(&self) -> f64 {
        self.state.lock().duration
    }

    fn paused(&self) -> bool {
        self.state.lock().paused
    }

    fn ended(&self) -> bool {
        self.state.lock().ended
    }

    fn seek(&mut self, position_secs: f64) -> Result<()> {
        let mut state = self.state.lock();
        state.position = position_secs;
        state.seeks.push(position_secs);
        Ok(())
    }

    fn set_paused(&mut self, paused: bool) -> Result<()> {
        let mut state = self.state.lock();
        if !paused && state.reject_play {
            return Err(EngineError::Playback("autoplay rejected".into()));
        }
        state.paused = paused;
        Ok(())
    }

    fn set_volume(&mut self, volume: f64) {
        self.state.lock().volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        self.state.lock().muted = muted;
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.state.lock().fullscreen = fullscreen;
    }

    fn fullscreen(&self) -> bool {
        self.state.lock().fullscreen
    }
}

/// Test-side view of a [`FakeSurface`] already handed to a player.
#[derive(Debug, Clone)]
pub struct SurfaceHandle {
    state: Arc<Mutex<SurfaceState>>,
}

impl SurfaceHandle {
    pub fn position(&self) -> f64 {
        self.state.lock().position
    }

    pub fn set_position(&self, position: f64) {
        self.state.lock().position = position;
    }

    pub fn advance(&self, seconds: f64) {
        self.state.lock().position += seconds;
    }

    pub fn paused(&self) -> bool {
        self.state.lock().paused
    }

    pub fn mark_ended(&self) {
        let mut state = self.state.lock();
        state.ended = true;
        state.position = state.duration;
    }

    pub fn volume(&self) -> f64 {
        self.state.lock().volume
    }

    pub fn muted(&self) -> bool {
        self.state.lock().muted
    }

    pub fn fullscreen(&self) -> bool {
        self.state.lock().fullscreen
    }

    /// Every position handed to `seek`, in order.
    pub fn seeks(&self) -> Vec<f64> {
        self.state.lock().seeks.clone()
    }

    /// Make subsequent play requests fail like a blocked autoplay.
    pub fn reject_play(&self) {
        self.state.lock().reject_play = true;
    }
}

#[derive(Debug, Default)]
struct MemoryStoreState {
    markers: Vec<ReactionMarker>,
    events: Vec<NewReaction>,
    announcements: Vec<String>,
    counters: HashMap<UserID, UserCounters>,
    watch_time: HashMap<VideoID, u32>,
    progress: HashMap<VideoID, WatchProgress>,
    fail_fetch_markers: bool,
    fail_insert_event: bool,
    fail_insert_marker: bool,
    fetch_delays: VecDeque<Duration>,
}

/// In-memory [`DurableStore`] with injectable failures and per-fetch
/// delays for exercising out-of-order refresh completion.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryStoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> Vec<ReactionMarker> {
        self.state.lock().markers.clone()
    }

    pub fn events(&self) -> Vec<NewReaction> {
        self.state.lock().events.clone()
    }

    pub fn announcements(&self) -> Vec<String> {
        self.state.lock().announcements.clone()
    }

    pub fn counters_for(&self, user_id: UserID) -> UserCounters {
        self.state
            .lock()
            .counters
            .get(&user_id)
            .copied()
            .unwrap_or_default()
    }

    pub fn watch_time_for(&self, video_id: VideoID) -> u32 {
        self.state
            .lock()
            .watch_time
            .get(&video_id)
            .copied()
            .unwrap_or(0)
    }

    /// Most recently flushed watch progress for a video.
    pub fn progress_for(&self, video_id: VideoID) -> WatchProgress {
        self.state
            .lock()
            .progress
            .get(&video_id)
            .copied()
            .unwrap_or(WatchProgress::new(0.0))
    }

    pub fn seed_marker(&self, marker: ReactionMarker) {
        self.state.lock().markers.push(marker);
    }

    pub fn set_fail_fetch_markers(&self, fail: bool) {
        self.state.lock().fail_fetch_markers = fail;
    }

    pub fn set_fail_insert_event(&self, fail: bool) {
        self.state.lock().fail_insert_event = fail;
    }

    pub fn set_fail_insert_marker(&self, fail: bool) {
        self.state.lock().fail_insert_marker = fail;
    }

    /// Queue an artificial latency consumed by the next `fetch_markers`
    /// calls, one delay per call.
    pub fn push_fetch_delay(&self, delay: Duration) {
        self.state.lock().fetch_delays.push_back(delay);
    }
}

#[async_trait]
impl DurableStore for MemoryStore {
    async fn fetch_markers(&self, video_id: VideoID) -> Result<Vec<ReactionMarker>> {
        // Snapshot before the delay, so a slow fetch resolves with the
        // data as of when it was issued.
        let (delay, result) = {
            let mut state = self.state.lock();
            let delay = state.fetch_delays.pop_front();
            let result = if state.fail_fetch_markers {
                Err(EngineError::Store("fetch_markers unavailable".into()))
            } else {
                Ok(state
                    .markers
                    .iter()
                    .filter(|m| m.video_id == video_id)
                    .cloned()
                    .collect())
            };
            (delay, result)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn insert_marker(&self, reaction: &NewReaction) -> Result<MarkerID> {
        let mut state = self.state.lock();
        if state.fail_insert_marker {
            return Err(EngineError::Store("insert_marker unavailable".into()));
        }
        let id = MarkerID::new();
        state.markers.push(ReactionMarker {
            id,
            video_id: reaction.video_id,
            user_id: reaction.user_id,
            username: reaction.username.clone(),
            avatar_url: reaction.avatar_url.clone(),
            timestamp_seconds: reaction.timestamp_seconds,
        });
        Ok(id)
    }

    async fn insert_event(&self, reaction: &NewReaction) -> Result<EventID> {
        let mut state = self.state.lock();
        if state.fail_insert_event {
            return Err(EngineError::Store("insert_event unavailable".into()));
        }
        state.events.push(reaction.clone());
        Ok(EventID::new())
    }

    async fn insert_announcement(&self, text: &str) -> Result<()> {
        self.state.lock().announcements.push(text.to_string());
        Ok(())
    }

    async fn fetch_user_counters(&self, user_id: UserID) -> Result<UserCounters> {
        Ok(self.counters_for(user_id))
    }

    async fn update_user_counters(&self, user_id: UserID, delta: UserCounters) -> Result<()> {
        let mut state = self.state.lock();
        let entry = state.counters.entry(user_id).or_default();
        *entry = entry.saturating_add(delta);
        Ok(())
    }

    async fn accumulate_watch_time(
        &self,
        video_id: VideoID,
        seconds: u32,
        progress: WatchProgress,
    ) -> Result<()> {
        let mut state = self.state.lock();
        *state.watch_time.entry(video_id).or_insert(0) += seconds;
        state.progress.insert(video_id, progress);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryFeedState {
    senders: HashMap<(FeedTopic, VideoID), Vec<mpsc::UnboundedSender<FeedInsert>>>,
    open: usize,
}

/// In-memory [`ChangeFeed`] that counts open subscriptions so teardown
/// behavior is observable.
#[derive(Debug, Default)]
pub struct MemoryFeed {
    state: Arc<Mutex<MemoryFeedState>>,
}

impl MemoryFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an insert to every live subscriber of `(topic, video_id)`.
    pub fn publish(&self, topic: FeedTopic, video_id: VideoID, insert: FeedInsert) {
        let state = self.state.lock();
        if let Some(senders) = state.senders.get(&(topic, video_id)) {
            for sender in senders {
                let _ = sender.send(insert.clone());
            }
        }
    }

    pub fn open_subscriptions(&self) -> usize {
        self.state.lock().open
    }
}

#[async_trait]
impl ChangeFeed for MemoryFeed {
    async fn subscribe(&self, topic: FeedTopic, video_id: VideoID) -> Result<FeedSubscription> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.state.lock();
        state.senders.entry((topic, video_id)).or_default().push(tx);
        state.open += 1;

        let shared = Arc::clone(&self.state);
        Ok(FeedSubscription::new(rx, move || {
            shared.lock().open -= 1;
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trips_a_reaction() {
        let store = MemoryStore::new();
        let video_id = VideoID::new();
        let user = UserIdentity::new(UserID::new(), "viewer");
        let reaction = NewReaction::from_identity(video_id, &user, 42.0, 3);

        store.insert_event(&reaction).await.unwrap();
        store.insert_marker(&reaction).await.unwrap();
        store
            .update_user_counters(user.id, UserCounters::reaction_delta(3))
            .await
            .unwrap();

        assert_eq!(store.fetch_markers(video_id).await.unwrap().len(), 1);
        assert_eq!(store.fetch_markers(VideoID::new()).await.unwrap().len(), 0);
        let counters = store.fetch_user_counters(user.id).await.unwrap();
        assert_eq!(counters.reaction_count, 1);
        assert_eq!(counters.total_hold_seconds, 3);
    }

    #[tokio::test]
    async fn memory_feed_tracks_subscription_teardown() {
        let feed = MemoryFeed::new();
        let video_id = VideoID::new();

        let sub = feed.subscribe(FeedTopic::Markers, video_id).await.unwrap();
        assert_eq!(feed.open_subscriptions(), 1);
        drop(sub);
        assert_eq!(feed.open_subscriptions(), 0);
    }
}
