//! Playback controller domain: composition root over the time source,
//! marker store, watch-time accumulator, live reconciler, and timeline
//! interaction.
//!
//! Elm-shaped: `PlayerState` + `PlayerMessage` + a pure-ish `update` that
//! mutates the exclusively-owned media surface directly and describes all
//! backend work as [`Effect`] values, which [`runtime::PlayerRuntime`]
//! executes on tokio tasks.

pub mod messages;
pub mod runtime;
pub mod state;
pub mod update;

pub use messages::{Key, PlayerMessage};
pub use runtime::{PlayerHandle, PlayerRuntime};
pub use state::PlayerState;
pub use update::{Effect, update};

/// `m:ss` / `h:mm:ss` display form of a playback position.
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::format_time;

    #[test]
    fn formats_short_and_long_positions() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(30.9), "0:30");
        assert_eq!(format_time(61.0), "1:01");
        assert_eq!(format_time(3671.0), "1:01:11");
        assert_eq!(format_time(-2.0), "0:00");
    }
}
