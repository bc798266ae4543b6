//! Scene stack: which screen is showing and what moving between them does
//!
//! Transitions are looked up in a fixed table. Each one declares the side
//! effects the page must run, in order, so navigation stays independent of
//! how the input arrived (button, heart tap, Escape key).

/// The page's screens, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Scene {
    /// Step 0: the question
    #[default]
    Proposal,
    /// Step 1: rizz reward and floating hearts
    Reward,
    /// Step 2: catch-the-heart game
    CatchGame,
}

impl Scene {
    pub fn step(self) -> u8 {
        match self {
            Scene::Proposal => 0,
            Scene::Reward => 1,
            Scene::CatchGame => 2,
        }
    }

    pub fn from_step(step: u8) -> Option<Self> {
        match step {
            0 => Some(Scene::Proposal),
            1 => Some(Scene::Reward),
            2 => Some(Scene::CatchGame),
            _ => None,
        }
    }
}

/// Named navigation requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    /// "Yes" on the proposal
    Accept,
    /// A floating heart was tapped
    EnterGame,
    /// One step back up
    Back,
    /// Straight to the proposal
    Reset,
}

/// Side effects a transition asks the page to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEffect {
    AwardAcceptance,
    PlayAcceptanceClip,
    StartAmbient,
    StopAmbient,
    StartCatchGame,
    StopCatchGame,
    ScheduleAmbientResume,
    CancelAmbientResume,
}

/// A resolved transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub nav: Nav,
    pub from: Scene,
    pub to: Scene,
    pub effects: &'static [SceneEffect],
}

use SceneEffect::*;

const ACCEPT: &[SceneEffect] = &[AwardAcceptance, PlayAcceptanceClip, StartAmbient];
const ENTER_GAME: &[SceneEffect] = &[StopAmbient, StartCatchGame];
const LEAVE_GAME: &[SceneEffect] = &[StopCatchGame, ScheduleAmbientResume];
const LEAVE_REWARD: &[SceneEffect] = &[CancelAmbientResume, StopAmbient];
const RESET: &[SceneEffect] = &[StopCatchGame, CancelAmbientResume, StopAmbient];

#[derive(Debug, Clone, Default)]
pub struct SceneStack {
    current: Scene,
}

impl SceneStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Scene {
        self.current
    }

    /// The back control only shows on the catch game
    pub fn back_visible(&self) -> bool {
        self.current == Scene::CatchGame
    }

    /// Look up what `nav` would do from here without moving
    pub fn plan(&self, nav: Nav) -> Option<Transition> {
        let (to, effects) = match (nav, self.current) {
            (Nav::Accept, Scene::Proposal) => (Scene::Reward, ACCEPT),
            (Nav::EnterGame, Scene::Reward) => (Scene::CatchGame, ENTER_GAME),
            (Nav::Back, Scene::CatchGame) => (Scene::Reward, LEAVE_GAME),
            (Nav::Back, Scene::Reward) => (Scene::Proposal, LEAVE_REWARD),
            (Nav::Reset, Scene::Reward | Scene::CatchGame) => (Scene::Proposal, RESET),
            _ => return None,
        };
        Some(Transition {
            nav,
            from: self.current,
            to,
            effects,
        })
    }

    /// Move if `nav` is valid here, returning the transition taken
    pub fn navigate(&mut self, nav: Nav) -> Option<Transition> {
        let transition = self.plan(nav)?;
        self.current = transition.to;
        Some(transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_path() {
        let mut stack = SceneStack::new();
        assert_eq!(stack.current(), Scene::Proposal);
        assert!(stack.navigate(Nav::EnterGame).is_none());

        let t = stack.navigate(Nav::Accept).unwrap();
        assert_eq!((t.from, t.to), (Scene::Proposal, Scene::Reward));
        assert!(t.effects.contains(&StartAmbient));

        let t = stack.navigate(Nav::EnterGame).unwrap();
        assert_eq!(t.effects, &[StopAmbient, StartCatchGame]);
        assert!(stack.back_visible());
        assert!(stack.navigate(Nav::Accept).is_none());
    }

    #[test]
    fn test_back_is_single_step() {
        let mut stack = SceneStack::new();
        stack.navigate(Nav::Accept);
        stack.navigate(Nav::EnterGame);

        let t = stack.navigate(Nav::Back).unwrap();
        assert_eq!(t.to, Scene::Reward);
        assert_eq!(t.effects[0], StopCatchGame);
        assert!(!stack.back_visible());

        let t = stack.navigate(Nav::Back).unwrap();
        assert_eq!(t.to, Scene::Proposal);
        assert!(t.effects.contains(&CancelAmbientResume));

        assert!(stack.navigate(Nav::Back).is_none());
        assert_eq!(stack.current(), Scene::Proposal);
    }

    #[test]
    fn test_reset_stops_everything() {
        let mut stack = SceneStack::new();
        assert!(stack.plan(Nav::Reset).is_none());
        stack.navigate(Nav::Accept);
        stack.navigate(Nav::EnterGame);
        let t = stack.navigate(Nav::Reset).unwrap();
        assert_eq!(t.to, Scene::Proposal);
        for effect in [StopCatchGame, StopAmbient, CancelAmbientResume] {
            assert!(t.effects.contains(&effect));
        }
    }

    #[test]
    fn test_plan_does_not_move() {
        let stack = SceneStack::new();
        assert!(stack.plan(Nav::Accept).is_some());
        assert_eq!(stack.current(), Scene::Proposal);
    }

    #[test]
    fn test_steps_roundtrip() {
        for step in 0..3 {
            assert_eq!(Scene::from_step(step).unwrap().step(), step);
        }
        assert_eq!(Scene::from_step(3), None);
    }
}
