//! Core data model definitions shared across Reelsync crates.
#![allow(missing_docs)]

pub mod counters;
pub mod error;
pub mod event;
pub mod identity;
pub mod ids;
pub mod marker;
pub mod prelude;
pub mod watch;

// Intentionally curated re-exports for downstream consumers.
pub use counters::UserCounters;
pub use error::{ModelError, Result as ModelResult};
pub use event::{NewReaction, ReactionEvent};
pub use identity::UserIdentity;
pub use ids::{EventID, MarkerID, UserID, VideoID};
pub use marker::{MarkerGroup, ReactionMarker};
pub use watch::WatchProgress;
