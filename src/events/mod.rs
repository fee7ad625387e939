//! Events, messages and their observers.
//!
//! Submodules:
//! - [`audio`] – commands and replies of the background audio thread
//! - [`cue`] – sound and music cues raised by the simulation
//! - [`pause`] – user pause toggle
//! - [`quit`] – quit request
//! - [`switchdebug`] – debug overlay toggle
//! - [`switchfullscreen`] – full screen toggle
pub mod audio;
pub mod cue;
pub mod pause;
pub mod quit;
pub mod switchdebug;
pub mod switchfullscreen;
