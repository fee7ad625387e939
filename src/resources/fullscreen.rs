//! Full screen toggle resource.
//!
//! Present while the window is in full screen mode.

use bevy_ecs::prelude::Resource;

/// Marker resource.
#[derive(Resource, Clone, Copy)]
pub struct FullScreen {}
