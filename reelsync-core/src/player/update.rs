use reelsync_model::prelude::*;
use tracing::{debug, warn};

use crate::player::messages::{Key, PlayerMessage};
use crate::player::state::PlayerState;
use crate::time::PlaybackEdge;
use crate::timeline::{self, DragState};

/// Backend work the reducer requests. The runtime executes each effect on
/// its own tokio task and feeds any result back in as a [`PlayerMessage`].
#[derive(Debug, Clone)]
pub enum Effect {
    /// Re-fetch the full marker set; `generation` gates the late apply.
    RefreshMarkers { video_id: VideoID, generation: u64 },
    /// Credit accumulated watch time to the video, with the viewer's
    /// position through it at flush time.
    FlushWatchTime {
        video_id: VideoID,
        seconds: u32,
        progress: WatchProgress,
    },
    /// Persist a committed reaction (event, marker, announcement, counters).
    SubmitReaction(NewReaction),
    /// Arrange for `AnimationExpired(token)` after the animation window.
    ScheduleAnimationEnd { token: u64 },
    /// Tear the runtime down after this message batch.
    Shutdown,
}

/// Single reducer for everything that happens to a mounted player.
pub fn update(state: &mut PlayerState, message: PlayerMessage) -> Vec<Effect> {
    let mut effects = Vec::new();

    match message {
        PlayerMessage::PlayPause => {
            if state.is_playing() {
                pause(state, &mut effects);
            } else {
                play(state);
            }
        }
        PlayerMessage::Play => play(state),
        PlayerMessage::Pause => pause(state, &mut effects),

        PlayerMessage::SeekRelative(delta) => {
            let snapshot = state.time.snapshot();
            let mut target = (snapshot.position + delta).max(0.0);
            if let Some(duration) = snapshot.duration {
                target = target.min(duration);
            }
            seek_to(state, target);
            state.update_controls(true);
        }

        PlayerMessage::SetVolume(volume) => {
            let volume = volume.clamp(0.0, 1.0);
            // Zero volume implies muted; raising it back implies unmuted.
            let muted = volume == 0.0;
            state.volume = volume;
            state.is_muted = muted;
            state.time.surface_mut().set_volume(volume);
            state.time.surface_mut().set_muted(muted);
            state.update_controls(true);
        }

        PlayerMessage::ToggleMute => {
            state.is_muted = !state.is_muted;
            state.time.surface_mut().set_muted(state.is_muted);
            state.update_controls(true);
        }

        PlayerMessage::ToggleFullscreen => {
            let target = !state.time.surface().fullscreen();
            state.time.surface_mut().set_fullscreen(target);
            state.is_fullscreen = state.time.surface().fullscreen();
            state.update_controls(true);
        }

        PlayerMessage::PointerDown { x, track } => {
            state.update_controls(true);
            if let Some(duration) = state.time.snapshot().duration {
                let target = track.time_at(x, duration);
                seek_to(state, target);
                state.drag = DragState::Dragging {
                    track,
                    last_known_time: target,
                };
            }
        }

        PlayerMessage::PointerMoved { x } => {
            state.update_controls(true);
            if let DragState::Dragging { track, .. } = state.drag {
                if let Some(duration) = state.time.snapshot().duration {
                    // Seek on every move; the element is the debounce.
                    let target = track.time_at(x, duration);
                    seek_to(state, target);
                    state.drag = DragState::Dragging {
                        track,
                        last_known_time: target,
                    };
                }
            }
        }

        PlayerMessage::PointerUp => {
            // Release anywhere commits at the last known drag position,
            // which every prior move has already applied.
            state.drag = DragState::Idle;
            state.update_controls(true);
        }

        PlayerMessage::PointerActivity => state.update_controls(true),

        PlayerMessage::MarkerClicked(key) => {
            let snapshot = state.time.snapshot();
            let was_playing = snapshot.playing;
            let mut target = key as f64;
            if let Some(duration) = snapshot.duration {
                target = target.min(duration);
            }
            seek_to(state, target);
            if was_playing {
                play(state);
            }
            state.update_controls(true);
        }

        PlayerMessage::HoldStarted => {
            state.hold_started = Some(std::time::Instant::now());
        }
        PlayerMessage::HoldCancelled => {
            state.hold_started = None;
        }
        PlayerMessage::HoldReleased => {
            if let Some(started) = state.hold_started.take() {
                match state.identity.current_user() {
                    Some(user) => {
                        let reaction = NewReaction::from_identity(
                            state.video_id,
                            &user,
                            state.time.snapshot().position.floor(),
                            started.elapsed().as_secs(),
                        );
                        effects.push(Effect::SubmitReaction(reaction));
                    }
                    None => {
                        debug!(video_id = %state.video_id, "reaction dropped: no signed-in user");
                    }
                }
            }
        }

        PlayerMessage::KeyPressed(key) => {
            if !state.text_input_focused {
                if let Some(mapped) = map_key(state, key) {
                    return update(state, mapped);
                }
            }
        }
        PlayerMessage::TextInputFocusChanged(focused) => {
            state.text_input_focused = focused;
        }

        PlayerMessage::ClockTick => {
            let (snapshot, edge) = state.time.sample();
            if !state.drag.is_dragging() {
                state.displayed_position = snapshot.position;
            }
            if let Some(duration) = snapshot.duration {
                state.last_known_duration = duration;
            }
            match edge {
                Some(PlaybackEdge::Ended) => {
                    state.update_controls(true);
                    flush_residual(state, &mut effects);
                }
                Some(PlaybackEdge::Paused) => flush_residual(state, &mut effects),
                _ => {}
            }
            if snapshot.playing {
                if let Some(seconds) = state.watch_time.on_tick() {
                    effects.push(flush_effect(state, seconds));
                }
                if !state.drag.is_dragging() {
                    let groups = state.markers.groups();
                    state.active_tooltip = timeline::active_tooltip(
                        &groups,
                        snapshot.position,
                        state.tuning.tooltip_proximity_secs,
                    );
                }
                // Tooltip freezes in place while paused; only the playing
                // branch recomputes it.
                state.update_controls(false);
            }
        }

        PlayerMessage::PlaybackEnded => {
            state.update_controls(true);
            flush_residual(state, &mut effects);
        }

        PlayerMessage::MarkersRefreshed { generation, result } => match result {
            Ok(markers) => {
                state.markers.apply_refresh(generation, markers);
            }
            Err(err) => {
                warn!(%err, video_id = %state.video_id, "marker refresh failed, keeping previous set");
            }
        },

        PlayerMessage::MarkerFeedInsert => {
            effects.push(refresh_markers(state));
        }

        PlayerMessage::ReactionEventReceived(event) => {
            let token = state.live.on_event(event);
            effects.push(Effect::ScheduleAnimationEnd { token });
            effects.push(refresh_markers(state));
        }

        PlayerMessage::AnimationExpired(token) => {
            state.live.on_expired(token);
        }

        PlayerMessage::Unmount => {
            state.drag = DragState::Idle;
            state.live.clear();
            flush_residual(state, &mut effects);
            effects.push(Effect::Shutdown);
        }
    }

    effects
}

fn play(state: &mut PlayerState) {
    if let Err(err) = state.time.surface_mut().set_paused(false) {
        // Autoplay rejection and friends; keep reflecting the element.
        warn!(%err, video_id = %state.video_id, "play request rejected by media element");
    }
    state.update_controls(true);
}

fn pause(state: &mut PlayerState, effects: &mut Vec<Effect>) {
    if let Err(err) = state.time.surface_mut().set_paused(true) {
        warn!(%err, video_id = %state.video_id, "pause request rejected by media element");
    }
    flush_residual(state, effects);
    state.update_controls(true);
}

fn seek_to(state: &mut PlayerState, target: f64) {
    if let Err(err) = state.time.surface_mut().seek(target) {
        warn!(%err, video_id = %state.video_id, target, "seek rejected by media element");
        return;
    }
    state.displayed_position = target;
}

fn flush_residual(state: &mut PlayerState, effects: &mut Vec<Effect>) {
    if let Some(seconds) = state.watch_time.drain() {
        effects.push(flush_effect(state, seconds));
    }
}

fn flush_effect(state: &PlayerState, seconds: u32) -> Effect {
    let snapshot = state.time.snapshot();
    Effect::FlushWatchTime {
        video_id: state.video_id,
        seconds,
        progress: WatchProgress::from_position(
            snapshot.position,
            snapshot.duration.unwrap_or(0.0),
        ),
    }
}

fn refresh_markers(state: &mut PlayerState) -> Effect {
    Effect::RefreshMarkers {
        video_id: state.video_id,
        generation: state.markers.begin_refresh(),
    }
}

fn map_key(state: &PlayerState, key: Key) -> Option<PlayerMessage> {
    let step = state.tuning.seek_step_secs;
    let volume_step = state.tuning.volume_step;
    Some(match key {
        Key::Space | Key::K => PlayerMessage::PlayPause,
        Key::F => PlayerMessage::ToggleFullscreen,
        Key::M => PlayerMessage::ToggleMute,
        Key::J | Key::ArrowLeft => PlayerMessage::SeekRelative(-step),
        Key::L | Key::ArrowRight => PlayerMessage::SeekRelative(step),
        Key::ArrowUp => PlayerMessage::SetVolume(state.volume + volume_step),
        Key::ArrowDown => PlayerMessage::SetVolume(state.volume - volume_step),
    })
}
