//! Logical render resolution.
//!
//! Everything is drawn into a texture of this size, then scaled into the
//! window. The room arena and the HUD are laid out in this space.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    pub w: i32,
    pub h: i32,
}
