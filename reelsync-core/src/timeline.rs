//! Pointer-to-time math for the seek track, the drag state machine's data,
//! and tooltip proximity selection.

use reelsync_model::MarkerGroup;
use std::collections::BTreeMap;

/// Horizontal extent of the seek track, in the host's pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackBounds {
    pub left: f64,
    pub width: f64,
}

impl TrackBounds {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Fraction of the track under pointer `x`, clamped to `[0, 1]`.
    /// Degenerate (zero or negative width) tracks resolve to 0.
    pub fn fraction(&self, x: f64) -> f64 {
        if self.width <= 0.0 {
            return 0.0;
        }
        ((x - self.left) / self.width).clamp(0.0, 1.0)
    }

    /// Playback time under pointer `x` for a media of `duration` seconds.
    pub fn time_at(&self, x: f64, duration: f64) -> f64 {
        self.fraction(x) * duration.max(0.0)
    }
}

/// Drag state machine: `Idle -> Dragging -> Idle`.
///
/// While dragging, the displayed time tracks the pointer projection and
/// media-sourced time updates are ignored; pointer-up anywhere commits
/// (releasing outside the track is a valid commit, not a cancel), so the
/// pointer must be tracked globally for the duration of the drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging {
        track: TrackBounds,
        last_known_time: f64,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}

/// First marker group (in ascending key order) within `proximity` seconds
/// of the playback position. At most one group is active; first match wins
/// ties.
pub fn active_tooltip(
    groups: &BTreeMap<u32, MarkerGroup>,
    position: f64,
    proximity: f64,
) -> Option<u32> {
    groups
        .keys()
        .copied()
        .find(|&key| (position - key as f64).abs() < proximity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_clamps_outside_track() {
        let track = TrackBounds::new(100.0, 400.0);
        assert_eq!(track.fraction(100.0), 0.0);
        assert_eq!(track.fraction(300.0), 0.5);
        assert_eq!(track.fraction(500.0), 1.0);
        // Pointer left of / beyond the track.
        assert_eq!(track.fraction(-40.0), 0.0);
        assert_eq!(track.fraction(900.0), 1.0);
    }

    #[test]
    fn degenerate_track_resolves_to_zero() {
        assert_eq!(TrackBounds::new(10.0, 0.0).fraction(50.0), 0.0);
        assert_eq!(TrackBounds::new(10.0, -5.0).time_at(50.0, 120.0), 0.0);
    }

    #[test]
    fn time_at_scales_with_duration() {
        let track = TrackBounds::new(0.0, 200.0);
        assert_eq!(track.time_at(50.0, 120.0), 30.0);
        assert_eq!(track.time_at(200.0, 120.0), 120.0);
    }

    fn groups_at(keys: &[u32]) -> BTreeMap<u32, MarkerGroup> {
        keys.iter().map(|&k| (k, MarkerGroup::new(k))).collect()
    }

    #[test]
    fn tooltip_activates_within_proximity() {
        let groups = groups_at(&[30, 60]);
        assert_eq!(active_tooltip(&groups, 30.5, 0.75), Some(30));
        assert_eq!(active_tooltip(&groups, 30.75, 0.75), None);
        assert_eq!(active_tooltip(&groups, 59.3, 0.75), Some(60));
        assert_eq!(active_tooltip(&groups, 45.0, 0.75), None);
    }

    #[test]
    fn first_group_in_iteration_order_wins_ties() {
        // Position equidistant from two adjacent keys within proximity.
        let groups = groups_at(&[30, 31]);
        assert_eq!(active_tooltip(&groups, 30.5, 0.75), Some(30));
    }
}
