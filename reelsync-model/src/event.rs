use crate::identity::UserIdentity;
use crate::ids::{EventID, UserID, VideoID};
use chrono::{DateTime, Utc};

/// Ephemeral broadcast of a just-created reaction.
///
/// Events drive the transient on-screen animation; they are immutable once
/// created and may be dropped by the transport without affecting marker
/// correctness. The durable record is [`crate::marker::ReactionMarker`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReactionEvent {
    pub id: EventID,
    pub video_id: VideoID,
    pub user_id: UserID,
    /// Playback position the reaction was committed at, in seconds.
    pub timestamp_seconds: f64,
    /// Identity carried for animation display only; may be absent.
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ReactionEvent {
    /// Display name for the animation overlay, falling back for events
    /// whose identity fields were dropped in transit.
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("Someone")
    }
}

/// Insert payload for a committed reaction.
///
/// One `NewReaction` produces exactly one marker insert and at most one
/// event insert.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewReaction {
    pub video_id: VideoID,
    pub user_id: UserID,
    /// Whole-second playback position (floored before submission).
    pub timestamp_seconds: f64,
    pub username: String,
    pub avatar_url: Option<String>,
    /// Press-and-hold duration in whole seconds. Best-effort wall-clock
    /// engagement metric, not an exact timer.
    pub hold_seconds: u64,
}

impl NewReaction {
    pub fn from_identity(
        video_id: VideoID,
        identity: &UserIdentity,
        timestamp_seconds: f64,
        hold_seconds: u64,
    ) -> Self {
        Self {
            video_id,
            user_id: identity.id,
            timestamp_seconds,
            username: identity.display_name.clone(),
            avatar_url: identity.avatar_url.clone(),
            hold_seconds,
        }
    }
}
