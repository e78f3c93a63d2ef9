//! Reconciles the live reaction-event feed into transient animation state.
//!
//! Timers are owned by the runtime; this module only decides which
//! animation is current. Each animation carries a token, and a scheduled
//! teardown whose token no longer matches is a no-op — a later notification
//! preempts an in-flight animation without the stale timer flickering it
//! away.

use reelsync_model::ReactionEvent;
use tracing::trace;

/// The one-shot reaction animation currently on screen.
#[derive(Debug, Clone)]
pub struct ReactionAnimation {
    pub event: ReactionEvent,
    pub token: u64,
}

/// State over the events subscription for the mounted video.
#[derive(Debug, Default)]
pub struct LiveEventReconciler {
    active: Option<ReactionAnimation>,
    next_token: u64,
}

impl LiveEventReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show an animation for a newly received event, preempting any
    /// animation already in flight. Returns the token the teardown timer
    /// must present.
    pub fn on_event(&mut self, event: ReactionEvent) -> u64 {
        self.next_token += 1;
        let token = self.next_token;
        trace!(event_id = %event.id, token, "reaction animation started");
        self.active = Some(ReactionAnimation { event, token });
        token
    }

    /// Scheduled teardown fired. Clears the animation only if it is still
    /// the one the timer was armed for.
    pub fn on_expired(&mut self, token: u64) -> bool {
        match &self.active {
            Some(animation) if animation.token == token => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    pub fn active(&self) -> Option<&ReactionAnimation> {
        self.active.as_ref()
    }

    /// Unconditional teardown for unmount/video-switch paths.
    pub fn clear(&mut self) {
        self.active = None;
    }
}
