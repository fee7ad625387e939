//! Quit request event and observer.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::resources::quitgame::QuitGame;

/// Fired by the quit key, or by the main loop when the window is closed.
#[derive(Event, Debug, Clone, Copy)]
pub struct QuitEvent {}

pub fn quit_observer(_trigger: On<QuitEvent>, mut commands: Commands) {
    info!("Quit requested");
    commands.insert_resource(QuitGame {});
}
