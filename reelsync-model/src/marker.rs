use crate::ids::{MarkerID, UserID, VideoID};

/// Durable, timestamped user annotation on a video's timeline.
///
/// Markers are owned by the backend; the engine reads them with identity
/// already resolved and only ever replaces its set wholesale.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReactionMarker {
    pub id: MarkerID,
    pub video_id: VideoID,
    pub user_id: UserID,
    pub username: String,
    pub avatar_url: Option<String>,
    pub timestamp_seconds: f64,
}

impl ReactionMarker {
    /// Grouping key: nearest whole second. Two markers within the same
    /// rounded second always land in the same cluster.
    pub fn group_key(&self) -> u32 {
        self.timestamp_seconds.round().max(0.0) as u32
    }
}

impl PartialEq for ReactionMarker {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ReactionMarker {}

/// Visual cluster of markers sharing a rounded-second timestamp.
///
/// Derived data: rebuilt whenever the marker set changes, never persisted.
#[derive(Debug, Clone)]
pub struct MarkerGroup {
    /// Rounded-second timestamp all members share.
    pub timestamp: u32,
    pub markers: Vec<ReactionMarker>,
}

impl MarkerGroup {
    pub fn new(timestamp: u32) -> Self {
        Self {
            timestamp,
            markers: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Markers whose avatars are shown on the glyph cluster (at most `cap`).
    pub fn visible_markers(&self, cap: usize) -> &[ReactionMarker] {
        &self.markers[..self.markers.len().min(cap)]
    }

    /// Count folded into the "+N" overflow badge.
    pub fn overflow(&self, cap: usize) -> usize {
        self.markers.len().saturating_sub(cap)
    }
}
