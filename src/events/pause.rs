//! User pause toggle.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::resources::session::Session;

/// Fired by the input system when the pause key is pressed.
#[derive(Event, Debug, Clone, Copy)]
pub struct TogglePauseEvent {}

/// Pause or resume the current room. A death sequence cannot be paused.
pub fn toggle_pause_observer(_trigger: On<TogglePauseEvent>, mut session: ResMut<Session>) {
    session.toggle_pause();
}
