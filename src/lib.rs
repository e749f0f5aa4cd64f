//! Inspectable items for a first-person macroquad scene.
//!
//! An item watches for the player standing close to it and looking at it,
//! shows an interaction prompt, and on the activation key lifts itself in
//! front of the camera where mouse motion rotates it. Pressing the key again
//! puts it back exactly where it was.
//!
//! Everything here is driven by [`item::InspectableItem::tick`], which takes
//! an [`input::FrameInput`] snapshot so the same code runs under the
//! macroquad frame loop and under tests.

pub mod audio;
pub mod collision;
pub mod config;
pub mod error;
pub mod hud;
pub mod input;
pub mod item;
pub mod movement;
pub mod view;

pub use error::ConfigError;
pub use item::{FrameContext, InspectableItem, ItemBindings, Transform, Transition};
