//! ECS resources made available to systems.
//!
//! - `animationstore` – sprite sheet geometry and animation tables
//! - `audio` – bridge and channels for the background audio thread
//! - `debugmode` – presence enables the debug overlay
//! - `fullscreen` – presence marks full screen mode
//! - `gameconfig` – settings loaded from the INI file
//! - `input` – per-frame keyboard state and the tick's input snapshot
//! - `quitgame` – presence ends the main loop
//! - `rendertarget` – fixed-resolution framebuffer (NonSend)
//! - `roomtable` – room entrances, exits and starting rooms
//! - `screensize` – logical render resolution
//! - `session` – the simulation: active room, player and run bookkeeping
//! - `texturestore` – loaded textures keyed by image name
//! - `windowsize` – OS window dimensions
//! - `worldtime` – elapsed time and frame count
pub mod animationstore;
pub mod audio;
pub mod debugmode;
pub mod fullscreen;
pub mod gameconfig;
pub mod input;
pub mod quitgame;
pub mod rendertarget;
pub mod roomtable;
pub mod screensize;
pub mod session;
pub mod texturestore;
pub mod windowsize;
pub mod worldtime;
