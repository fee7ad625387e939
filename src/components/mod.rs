//! Entity model.
//!
//! Plain data types for everything that lives in a room. Behavior that spans
//! several objects (collision, interactions, controllers) lives in
//! [`crate::systems`]; room assembly lives in [`crate::rooms`].
//!
//! Submodules overview:
//! - [`animation`] – frame cursor driven by the animation table
//! - [`cratebox`] – locked crates and their contents
//! - [`crumble`] – platforms that break after contact
//! - [`direction`] – wall sides, eight-way facings and resolver axes
//! - [`door`] – doors and their transition threshold
//! - [`gameobject`] – the common object shape and its closed kind set
//! - [`gravity`] – gravity direction and constants of platform rooms
//! - [`hitbox`] – axis-aligned rectangle used for every collision test
//! - [`key`] – keys and the follow chain
//! - [`player`] – the player, its powerup timers and platform physics
//! - [`powerup`] – color pickups
//! - [`projectile`] – arrows

pub mod animation;
pub mod cratebox;
pub mod crumble;
pub mod direction;
pub mod door;
pub mod gameobject;
pub mod gravity;
pub mod hitbox;
pub mod key;
pub mod player;
pub mod powerup;
pub mod projectile;
