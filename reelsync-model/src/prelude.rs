//! Engine/UI focused snapshot of the types surface.
//! Prefer importing from this module instead of individual tree nodes when
//! working in presentation layers.

pub use crate::counters::UserCounters;
pub use crate::error::{ModelError, Result as ModelResult};
pub use crate::event::{NewReaction, ReactionEvent};
pub use crate::identity::UserIdentity;
pub use crate::ids::{EventID, MarkerID, UserID, VideoID};
pub use crate::marker::{MarkerGroup, ReactionMarker};
pub use crate::watch::WatchProgress;
