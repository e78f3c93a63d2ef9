use crate::error::Result;

/// The native media element, owned exclusively by the playback controller.
///
/// No other component mutates `position`, volume, or mute state directly;
/// every write goes through the controller's own operations, which prevents
/// write races between e.g. a volume slider and a keyboard shortcut.
#[cfg_attr(test, mockall::automock)]
pub trait MediaSurface: Send {
    /// Current playback position in seconds.
    fn position(&self) -> f64;
    /// Media duration in seconds; `<= 0` while metadata is unknown.
    fn duration(&self) -> f64;
    fn paused(&self) -> bool;
    fn ended(&self) -> bool;

    fn seek(&mut self, position_secs: f64) -> Result<()>;
    /// Autoplay rejection and similar playback failures surface here; the
    /// engine logs them and keeps reflecting the element's actual state.
    fn set_paused(&mut self, paused: bool) -> Result<()>;
    fn set_volume(&mut self, volume: f64);
    fn set_muted(&mut self, muted: bool);
    fn set_fullscreen(&mut self, fullscreen: bool);
    fn fullscreen(&self) -> bool;
}

/// Point-in-time reading of the media clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSnapshot {
    pub position: f64,
    /// `None` until the element has reported a usable duration.
    pub duration: Option<f64>,
    pub playing: bool,
    pub ended: bool,
}

impl TimeSnapshot {
    pub const fn idle() -> Self {
        Self {
            position: 0.0,
            duration: None,
            playing: false,
            ended: false,
        }
    }
}

/// Play/pause/end transitions observed between two samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEdge {
    Started,
    Paused,
    Ended,
}

/// Wraps the media element's clock and turns polled reads into monotonic
/// snapshots plus play/pause edges. All engine reads of playback time go
/// through here.
pub struct TimeSource {
    surface: Box<dyn MediaSurface>,
    last: TimeSnapshot,
}

impl TimeSource {
    pub fn new(surface: Box<dyn MediaSurface>) -> Self {
        Self {
            surface,
            last: TimeSnapshot::idle(),
        }
    }

    /// Read the surface without recording an edge.
    pub fn snapshot(&self) -> TimeSnapshot {
        let duration = self.surface.duration();
        TimeSnapshot {
            position: self.surface.position().max(0.0),
            duration: (duration > 0.0).then_some(duration),
            playing: !self.surface.paused() && !self.surface.ended(),
            ended: self.surface.ended(),
        }
    }

    /// Read the surface and report the transition since the previous
    /// sample, if any. End takes precedence over a same-sample pause.
    pub fn sample(&mut self) -> (TimeSnapshot, Option<PlaybackEdge>) {
        let current = self.snapshot();
        let edge = if current.ended && !self.last.ended {
            Some(PlaybackEdge::Ended)
        } else if current.playing && !self.last.playing {
            Some(PlaybackEdge::Started)
        } else if !current.playing && self.last.playing {
            Some(PlaybackEdge::Paused)
        } else {
            None
        };
        self.last = current;
        (current, edge)
    }

    pub fn surface_mut(&mut self) -> &mut dyn MediaSurface {
        self.surface.as_mut()
    }

    pub fn surface(&self) -> &dyn MediaSurface {
        self.surface.as_ref()
    }
}

impl std::fmt::Debug for TimeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeSource").field("last", &self.last).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface_at(position: f64, paused: bool) -> MockMediaSurface {
        let mut surface = MockMediaSurface::new();
        surface.expect_position().return_const(position);
        surface.expect_duration().return_const(120.0);
        surface.expect_paused().return_const(paused);
        surface.expect_ended().return_const(false);
        surface
    }

    #[test]
    fn reports_play_and_pause_edges() {
        let mut source = TimeSource::new(Box::new(surface_at(3.0, false)));
        let (snapshot, edge) = source.sample();
        assert!(snapshot.playing);
        assert_eq!(edge, Some(PlaybackEdge::Started));

        // Same state again: no edge.
        let (_, edge) = source.sample();
        assert_eq!(edge, None);

        source.surface = Box::new(surface_at(4.0, true));
        let (_, edge) = source.sample();
        assert_eq!(edge, Some(PlaybackEdge::Paused));
    }

    #[test]
    fn negative_position_and_unknown_duration_are_clamped() {
        let mut surface = MockMediaSurface::new();
        surface.expect_position().return_const(-0.4);
        surface.expect_duration().return_const(0.0);
        surface.expect_paused().return_const(true);
        surface.expect_ended().return_const(false);

        let source = TimeSource::new(Box::new(surface));
        let snapshot = source.snapshot();
        assert_eq!(snapshot.position, 0.0);
        assert_eq!(snapshot.duration, None);
    }
}
