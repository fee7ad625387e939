//! Quit request.
//!
//! Inserted by the quit observer; the main loop exits at the end of the
//! frame in which it appears.

use bevy_ecs::prelude::Resource;

/// Marker resource.
#[derive(Resource, Clone, Copy)]
pub struct QuitGame {}
