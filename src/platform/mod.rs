//! Browser platform layer
//!
//! Handles everything that touches the page:
//! - Null-safe DOM lookups and notifications
//! - Rendering page events and entity motion
//! - Favicon animation

pub mod dom;
pub mod favicon;
pub mod view;

pub use favicon::FaviconCycler;
pub use view::{PageView, entity_target};
