use crate::error::Result;
use async_trait::async_trait;
use reelsync_model::prelude::*;

/// Durable persistence collaborator.
///
/// The engine treats the backing store as an opaque set of async operations;
/// schema and transport belong to the host. Marker and watch-time writes are
/// best-effort telemetry: callers log failures and move on, they never
/// retry or surface them to the viewer.
#[async_trait]
pub trait DurableStore: Send + Sync {
    /// Fetch all reaction markers for a video, with each marker's user
    /// display identity already resolved.
    async fn fetch_markers(&self, video_id: VideoID) -> Result<Vec<ReactionMarker>>;

    /// Persist the durable timeline record of a committed reaction.
    async fn insert_marker(&self, reaction: &NewReaction) -> Result<MarkerID>;

    /// Broadcast the ephemeral reaction event. May be dropped by transport
    /// without affecting marker correctness.
    async fn insert_event(&self, reaction: &NewReaction) -> Result<EventID>;

    /// Post an announcement line to the shared chat.
    async fn insert_announcement(&self, text: &str) -> Result<()>;

    async fn fetch_user_counters(&self, user_id: UserID) -> Result<UserCounters>;

    /// Apply a delta to a user's engagement counters.
    async fn update_user_counters(
        &self,
        user_id: UserID,
        delta: UserCounters,
    ) -> Result<()>;

    /// Credit `seconds` of watch time to a video and record how far
    /// through it the viewer currently is. Called once per accumulator
    /// flush; the progress is a point-in-time reading, last write wins.
    async fn accumulate_watch_time(
        &self,
        video_id: VideoID,
        seconds: u32,
        progress: WatchProgress,
    ) -> Result<()>;
}
