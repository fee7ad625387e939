//! Game systems.
//!
//! Submodules overview
//! - [`audio`] – audio thread and the bridge systems around it
//! - [`collision`] – swept movement against solid objects, unlock on contact
//! - [`freeroam`] – top-down player controller
//! - [`input`] – read the keyboard into [`crate::resources::input::InputState`]
//! - [`interaction`] – react to touched objects: pickups, hazards, doors
//! - [`platform`] – side-on player controller with gravity and jumps
//! - [`powerups`] – dash and attack
//! - [`render`] – draw the session and letterbox it into the window
//! - [`session`] – tick the session and forward its cues to audio
//! - [`time`] – advance world time

pub mod audio;
pub mod collision;
pub mod freeroam;
pub mod input;
pub mod interaction;
pub mod platform;
pub mod powerups;
pub mod render;
pub mod session;
pub mod time;
