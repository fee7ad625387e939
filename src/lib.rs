//! Rooms library.
//!
//! The simulation core (rooms, player, collision and session) plus the ECS
//! resources, systems and events of the game shell, exposed for the binary
//! and the integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod rooms;
pub mod systems;

#[cfg(test)]
mod testing;
