//! Frame tick
//!
//! Applies the input gathered since the last frame, then advances virtual
//! time. Inputs always land before any timer due in the same frame.

use super::entity::EntityId;
use super::game::GameKind;
use super::scene::Nav;
use super::state::PageState;

/// Input commands gathered between two frames
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// "Yes" pressed
    pub accept: bool,
    /// "No" presses
    pub dodges: u32,
    /// Replay button
    pub replay: bool,
    /// Back control
    pub back: bool,
    /// Escape key
    pub cancel: bool,
    pub open_secret: bool,
    pub close_secret: bool,
    pub paw: bool,
    /// Catch gestures, in arrival order
    pub catches: Vec<(GameKind, EntityId)>,
    /// `bump_rizz` calls from page scripts
    pub awards: Vec<(i64, Option<String>)>,
    /// Page is unloading
    pub teardown: bool,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        !(self.accept
            || self.dodges > 0
            || self.replay
            || self.back
            || self.cancel
            || self.open_secret
            || self.close_secret
            || self.paw
            || self.teardown)
            && self.catches.is_empty()
            && self.awards.is_empty()
    }
}

/// Advance the page by one frame
pub fn tick(state: &mut PageState, input: &TickInput, dt_ms: u64) {
    if state.is_torn_down() {
        return;
    }
    if input.teardown {
        state.teardown();
        return;
    }

    for _ in 0..input.dodges {
        state.dodge();
    }
    if input.accept {
        state.accept();
    }
    if input.replay {
        state.replay();
    }
    for (kind, id) in &input.catches {
        state.catch(*kind, *id);
    }
    for (delta, label) in &input.awards {
        state.award(*delta, label.as_deref());
    }
    if input.open_secret {
        state.open_secret();
    }
    if input.close_secret {
        state.close_secret();
    }
    if input.paw {
        state.paw();
    }
    if input.back {
        state.navigate(Nav::Back);
    }
    if input.cancel {
        state.cancel();
    }

    state.advance(dt_ms);
}
