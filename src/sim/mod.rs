//! Deterministic page simulation
//!
//! All page logic lives here. This module must be pure and deterministic:
//! - Virtual time only, advanced by `tick`
//! - Seeded RNG only
//! - Every timer owned by a game or the page, never by the browser
//! - No DOM or audio dependencies

pub mod entity;
pub mod game;
pub mod proposal;
pub mod reward;
pub mod scene;
pub mod session;
pub mod state;
pub mod tick;
pub mod timer;

pub use entity::{Entity, EntityId, EntityPhase, MotionKind, Removal};
pub use game::{CatchRule, GameConfig, GameEvent, GameKind, TimedEntityGame};
pub use proposal::ProposalButtons;
pub use reward::RewardCounter;
pub use scene::{Nav, Scene, SceneEffect, SceneStack, Transition};
pub use session::{Session, SessionEnd, SessionReport};
pub use state::{PageEvent, PageState, Particle};
pub use tick::{TickInput, tick};
pub use timer::{Fired, TimerId, Timers};
