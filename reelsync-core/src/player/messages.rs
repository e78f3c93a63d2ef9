use reelsync_model::ReactionEvent;
use reelsync_model::marker::ReactionMarker;

use crate::error::EngineError;
use crate::timeline::TrackBounds;

/// Keys the controller responds to. The host maps its own key events onto
/// this set before forwarding them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    K,
    F,
    M,
    J,
    L,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
}

/// Everything that can happen to a mounted player, from the host surface,
/// the clock, or the backend tasks feeding results back in.
#[derive(Debug, Clone)]
pub enum PlayerMessage {
    /// Toggle between playing and paused.
    PlayPause,
    Play,
    Pause,
    /// Seek by a signed offset from the current position.
    SeekRelative(f64),
    SetVolume(f64),
    ToggleMute,
    ToggleFullscreen,

    /// Pointer pressed on the timeline track at viewport x-coordinate `x`.
    PointerDown { x: f64, track: TrackBounds },
    /// Pointer moved anywhere while a drag may be in progress.
    PointerMoved { x: f64 },
    /// Pointer released anywhere, including outside the track.
    PointerUp,
    /// Non-drag pointer movement over the player chrome.
    PointerActivity,

    /// A grouped marker cluster was clicked; `u32` is its whole-second key.
    MarkerClicked(u32),

    /// The reaction button was pressed down.
    HoldStarted,
    /// The reaction button was released; commits the reaction.
    HoldReleased,
    /// The hold was abandoned without a release on the button.
    HoldCancelled,

    KeyPressed(Key),
    TextInputFocusChanged(bool),

    /// One-second cadence driving sampling, flushing, and control decay.
    ClockTick,
    /// The media surface reported natural end of playback.
    PlaybackEnded,

    /// A marker refresh round-trip completed.
    MarkersRefreshed {
        generation: u64,
        result: Result<Vec<ReactionMarker>, EngineError>,
    },
    /// The change feed saw a marker inserted for this video.
    MarkerFeedInsert,
    /// The change feed delivered a live reaction event.
    ReactionEventReceived(ReactionEvent),
    /// The scheduled animation teardown for `token` fired.
    AnimationExpired(u64),

    /// The player is being torn down.
    Unmount,
}
