use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use reelsync_model::VideoID;
use reelsync_model::marker::MarkerGroup;

use crate::config::PlayerTuning;
use crate::live::LiveEventReconciler;
use crate::markers::MarkerStore;
use crate::session::IdentityProvider;
use crate::time::{MediaSurface, TimeSource};
use crate::timeline::DragState;
use crate::watch_time::WatchTimeAccumulator;

/// Complete state of one mounted player.
///
/// Owns the media surface through [`TimeSource`]; all reads and writes to
/// the underlying element go through `update`, so there is exactly one
/// writer per mount.
pub struct PlayerState {
    pub video_id: VideoID,
    pub time: TimeSource,
    pub markers: MarkerStore,
    pub watch_time: WatchTimeAccumulator,
    pub live: LiveEventReconciler,
    pub drag: DragState,

    /// Position shown on the timeline. Tracks the drag point while
    /// scrubbing, the sampled position otherwise.
    pub displayed_position: f64,
    pub last_known_duration: f64,

    pub volume: f64,
    pub is_muted: bool,
    pub is_fullscreen: bool,

    pub controls_visible: bool,
    controls_time: Instant,

    /// Whole-second marker key the tooltip is pinned to, if any.
    pub active_tooltip: Option<u32>,
    /// When the current reaction hold began, if one is in progress.
    pub hold_started: Option<Instant>,
    /// While true, keyboard shortcuts are suppressed.
    pub text_input_focused: bool,

    pub identity: Arc<dyn IdentityProvider>,
    pub tuning: PlayerTuning,
}

impl PlayerState {
    pub fn new(
        video_id: VideoID,
        surface: Box<dyn MediaSurface>,
        identity: Arc<dyn IdentityProvider>,
        tuning: PlayerTuning,
    ) -> Self {
        Self {
            video_id,
            time: TimeSource::new(surface),
            markers: MarkerStore::new(video_id),
            watch_time: WatchTimeAccumulator::new(tuning.watch_flush_threshold_secs),
            live: LiveEventReconciler::new(),
            drag: DragState::Idle,
            displayed_position: 0.0,
            last_known_duration: 0.0,
            volume: 1.0,
            is_muted: false,
            is_fullscreen: false,
            controls_visible: true,
            controls_time: Instant::now(),
            active_tooltip: None,
            hold_started: None,
            text_input_focused: false,
            identity,
            tuning,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.time.snapshot().playing
    }

    pub fn duration(&self) -> Option<f64> {
        self.time.snapshot().duration
    }

    pub fn groups(&self) -> BTreeMap<u32, MarkerGroup> {
        self.markers.groups()
    }

    /// Controls stay up while the player is in use and decay after the
    /// configured idle window otherwise.
    pub fn update_controls(&mut self, in_use: bool) {
        if in_use {
            self.controls_visible = true;
            self.controls_time = Instant::now();
        } else if self.controls_visible
            && self.controls_time.elapsed() > self.tuning.controls_hide_after()
        {
            self.controls_visible = false;
        }
    }

    #[cfg(test)]
    pub(crate) fn backdate_controls(&mut self, by: std::time::Duration) {
        if let Some(earlier) = self.controls_time.checked_sub(by) {
            self.controls_time = earlier;
        }
    }
}

impl fmt::Debug for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerState")
            .field("video_id", &self.video_id)
            .field("drag", &self.drag)
            .field("displayed_position", &self.displayed_position)
            .field("volume", &self.volume)
            .field("is_muted", &self.is_muted)
            .field("is_fullscreen", &self.is_fullscreen)
            .field("controls_visible", &self.controls_visible)
            .field("active_tooltip", &self.active_tooltip)
            .field("text_input_focused", &self.text_input_focused)
            .finish_non_exhaustive()
    }
}
