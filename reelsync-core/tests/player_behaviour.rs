//! Scenario tests driving the reducer through multi-step viewer sessions
//! using only the public surface.

use std::sync::Arc;

use reelsync_core::testing::FakeSurface;
use reelsync_core::{
    Effect, PlayerMessage, PlayerState, PlayerTuning, SessionStore, TrackBounds, update,
};
use reelsync_model::prelude::*;

fn marker(video_id: VideoID, timestamp: f64) -> ReactionMarker {
    ReactionMarker {
        id: MarkerID::new(),
        video_id,
        user_id: UserID::new(),
        username: "viewer".into(),
        avatar_url: None,
        timestamp_seconds: timestamp,
    }
}

fn mounted(duration: f64) -> (PlayerState, reelsync_core::testing::SurfaceHandle) {
    let (surface, handle) = FakeSurface::with_duration(duration);
    let identity = Arc::new(SessionStore::signed_in(UserIdentity::new(
        UserID::new(),
        "viewer",
    )));
    let state = PlayerState::new(
        VideoID::new(),
        Box::new(surface),
        identity,
        PlayerTuning::default(),
    );
    (state, handle)
}

fn load_markers(state: &mut PlayerState, markers: Vec<ReactionMarker>) {
    let generation = match update(state, PlayerMessage::MarkerFeedInsert).as_slice() {
        [Effect::RefreshMarkers { generation, .. }] => *generation,
        other => panic!("unexpected effects: {other:?}"),
    };
    update(
        state,
        PlayerMessage::MarkersRefreshed {
            generation,
            result: Ok(markers),
        },
    );
}

#[test]
fn nearby_markers_cluster_and_a_click_lands_on_the_shared_second() {
    let (mut state, surface) = mounted(120.0);
    let video_id = state.video_id;

    // Five reactions within the same rounded second.
    load_markers(
        &mut state,
        vec![
            marker(video_id, 30.2),
            marker(video_id, 30.6),
            marker(video_id, 29.6),
            marker(video_id, 30.4),
            marker(video_id, 29.8),
        ],
    );

    let groups = state.groups();
    assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec![30]);
    let group = &groups[&30];
    assert_eq!(group.len(), 5);
    assert_eq!(group.visible_markers(3).len(), 3);
    assert_eq!(group.overflow(3), 2);

    update(&mut state, PlayerMessage::MarkerClicked(30));
    assert_eq!(surface.position(), 30.0);
}

#[test]
fn scrub_session_tracks_the_pointer_then_returns_to_the_clock() {
    let (mut state, surface) = mounted(200.0);
    let track = TrackBounds::new(100.0, 400.0);
    update(&mut state, PlayerMessage::Play);

    update(&mut state, PlayerMessage::PointerDown { x: 200.0, track });
    update(&mut state, PlayerMessage::PointerMoved { x: 300.0 });
    assert_eq!(state.displayed_position, 100.0);
    assert_eq!(surface.seeks(), vec![50.0, 100.0]);

    // Playback keeps running under the scrub; the display ignores it.
    surface.set_position(142.0);
    update(&mut state, PlayerMessage::ClockTick);
    assert_eq!(state.displayed_position, 100.0);

    update(&mut state, PlayerMessage::PointerUp);
    update(&mut state, PlayerMessage::ClockTick);
    assert_eq!(state.displayed_position, 142.0);
}

#[test]
fn watch_time_is_conserved_across_pause_resume_cycles() {
    let (mut state, surface) = mounted(600.0);
    let mut flushed = 0u32;
    let mut collect = |effects: Vec<Effect>| {
        for effect in effects {
            if let Effect::FlushWatchTime { seconds, .. } = effect {
                flushed += seconds;
            }
        }
    };

    // Play in bursts of 3, 7, and 4 seconds with pauses between.
    for burst in [3u32, 7, 4] {
        collect(update(&mut state, PlayerMessage::Play));
        for _ in 0..burst {
            collect(update(&mut state, PlayerMessage::ClockTick));
            surface.advance(1.0);
        }
        collect(update(&mut state, PlayerMessage::Pause));
    }
    collect(update(&mut state, PlayerMessage::Unmount));

    assert_eq!(flushed, 14);
}

#[test]
fn a_full_reaction_flow_from_a_signed_in_viewer() {
    let (mut state, surface) = mounted(120.0);
    surface.set_position(61.7);
    update(&mut state, PlayerMessage::Play);

    update(&mut state, PlayerMessage::HoldStarted);
    let effects = update(&mut state, PlayerMessage::HoldReleased);
    let reaction = match effects.as_slice() {
        [Effect::SubmitReaction(reaction)] => reaction.clone(),
        other => panic!("unexpected effects: {other:?}"),
    };
    assert_eq!(reaction.timestamp_seconds, 61.0);
    assert_eq!(reaction.video_id, state.video_id);

    // Playback never stops for a reaction.
    assert!(!surface.paused());
}
