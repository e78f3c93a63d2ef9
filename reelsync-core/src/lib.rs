//! Reelsync playback engine.
//!
//! Headless real-time playback and marker-synchronization engine: a single
//! message-driven controller per mounted video that owns the media surface,
//! groups timeline reaction markers, reconciles live reaction events, and
//! meters watch time into bounded flushes. Persistence and notification
//! transports are injected behind the [`store::DurableStore`] and
//! [`feed::ChangeFeed`] traits.
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod feed;
pub mod live;
pub mod markers;
pub mod player;
pub mod session;
pub mod store;
pub mod testing;
pub mod time;
pub mod timeline;
pub mod watch_time;

pub use config::PlayerTuning;
pub use error::{EngineError, Result};
pub use feed::{ChangeFeed, FeedInsert, FeedSubscription, FeedTopic};
pub use live::{LiveEventReconciler, ReactionAnimation};
pub use markers::{MarkerStore, group_markers};
pub use player::{
    Effect, Key, PlayerHandle, PlayerMessage, PlayerRuntime, PlayerState, update,
};
pub use session::{IdentityProvider, SessionStore};
pub use store::DurableStore;
pub use time::{MediaSurface, PlaybackEdge, TimeSnapshot, TimeSource};
pub use timeline::{DragState, TrackBounds, active_tooltip};
pub use watch_time::WatchTimeAccumulator;
