use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing and geometry knobs for the playback engine.
///
/// The engine is an embedded component with no CLI or env surface; hosts
/// inject overrides at construction time and get the platform defaults
/// otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Watch-time seconds accumulated before a flush is issued.
    pub watch_flush_threshold_secs: u32,
    /// How long a reaction animation stays on screen.
    pub animation_secs: u64,
    /// Controls hide after this much pointer inactivity while playing.
    pub controls_hide_secs: u64,
    /// A marker group's tooltip activates within this distance of the
    /// current playback time.
    pub tooltip_proximity_secs: f64,
    /// Seek-by-offset step for skip buttons and keyboard shortcuts.
    pub seek_step_secs: f64,
    /// Volume increment for the arrow-key shortcuts.
    pub volume_step: f64,
    /// Avatars shown on a marker cluster before the overflow badge.
    pub cluster_avatar_cap: usize,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            watch_flush_threshold_secs: 5,
            animation_secs: 3,
            controls_hide_secs: 3,
            tooltip_proximity_secs: 0.75,
            seek_step_secs: 10.0,
            volume_step: 0.1,
            cluster_avatar_cap: 3,
        }
    }
}

impl PlayerTuning {
    pub fn animation_duration(&self) -> Duration {
        Duration::from_secs(self.animation_secs)
    }

    pub fn controls_hide_after(&self) -> Duration {
        Duration::from_secs(self.controls_hide_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_platform_contract() {
        let tuning = PlayerTuning::default();
        assert_eq!(tuning.watch_flush_threshold_secs, 5);
        assert_eq!(tuning.animation_duration(), Duration::from_secs(3));
        assert_eq!(tuning.controls_hide_after(), Duration::from_secs(3));
        assert_eq!(tuning.tooltip_proximity_secs, 0.75);
        assert_eq!(tuning.seek_step_secs, 10.0);
        assert_eq!(tuning.cluster_avatar_cap, 3);
    }

    #[test]
    fn partial_override_falls_back_to_defaults() {
        let tuning: PlayerTuning =
            serde_json::from_str(r#"{"watch_flush_threshold_secs": 10}"#)
                .expect("tuning json");
        assert_eq!(tuning.watch_flush_threshold_secs, 10);
        assert_eq!(tuning.animation_secs, 3);
    }
}
