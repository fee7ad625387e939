//! Debug overlay toggle.
//!
//! While present, the renderer outlines every hitbox and prints the frame
//! rate.

use bevy_ecs::prelude::Resource;

/// Marker resource.
#[derive(Resource, Clone, Copy)]
pub struct DebugMode {}
