//! Time update system.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Record the last frame's duration in `WorldTime`. `dt` is in seconds.
pub fn update_world_time(world: &mut World, dt: f32) {
    world.resource_mut::<WorldTime>().advance(dt);
}
