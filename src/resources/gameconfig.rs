//! Game configuration resource.
//!
//! Settings loaded from an INI file, with defaults that are safe to start
//! with when the file is missing.
//!
//! # Configuration File Format
//!
//! ```ini
//! [render]
//! width = 1280
//! height = 720
//!
//! [window]
//! width = 1280
//! height = 720
//! fullscreen = false
//! vsync = true
//! target_fps = 60
//!
//! [game]
//! rooms_file = ./assets/data/rooms.json
//! move_speed = 5.0
//! max_music_tier = 2
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_RENDER_WIDTH: u32 = 1280;
const DEFAULT_RENDER_HEIGHT: u32 = 720;
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_FULLSCREEN: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const DEFAULT_ROOMS_FILE: &str = "./assets/data/rooms.json";
const DEFAULT_MOVE_SPEED: f32 = 5.0;
const DEFAULT_MAX_MUSIC_TIER: u32 = 2;

#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Logical render width; rooms are laid out in this space.
    pub render_width: u32,
    pub render_height: u32,
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,
    pub vsync: bool,
    pub fullscreen: bool,
    /// JSON room configuration table.
    pub rooms_file: PathBuf,
    /// Player speed in pixels per tick.
    pub move_speed: f32,
    /// Highest music track; later tiers keep playing this one.
    pub max_music_tier: u32,
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self {
            render_width: DEFAULT_RENDER_WIDTH,
            render_height: DEFAULT_RENDER_HEIGHT,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            fullscreen: DEFAULT_FULLSCREEN,
            rooms_file: PathBuf::from(DEFAULT_ROOMS_FILE),
            move_speed: DEFAULT_MOVE_SPEED,
            max_music_tier: DEFAULT_MAX_MUSIC_TIER,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values keep their current values. Returns an error if the file
    /// cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [render] section
        if let Some(width) = config.getuint("render", "width").ok().flatten() {
            self.render_width = width as u32;
        }
        if let Some(height) = config.getuint("render", "height").ok().flatten() {
            self.render_height = height as u32;
        }

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }
        if let Some(fullscreen) = config.getbool("window", "fullscreen").ok().flatten() {
            self.fullscreen = fullscreen;
        }

        // [game] section
        if let Some(path) = config.get("game", "rooms_file") {
            self.rooms_file = PathBuf::from(path);
        }
        if let Some(speed) = config.getfloat("game", "move_speed").ok().flatten() {
            self.move_speed = speed as f32;
        }
        if let Some(tier) = config.getuint("game", "max_music_tier").ok().flatten() {
            self.max_music_tier = tier as u32;
        }

        info!(
            "Loaded config: {}x{} render, {}x{} window, fps={}, vsync={}, fullscreen={}, speed={}, rooms={:?}",
            self.render_width,
            self.render_height,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.fullscreen,
            self.move_speed,
            self.rooms_file
        );
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    pub fn render_size(&self) -> (f32, f32) {
        (self.render_width as f32, self.render_height as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_layout() {
        let config = GameConfig::new();
        assert_eq!(config.render_size(), (1280.0, 720.0));
        assert_eq!(config.move_speed, 5.0);
        assert_eq!(config.max_music_tier, 2);
    }

    #[test]
    fn game_section_overrides_defaults() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[game]\nmove_speed = 4.5\nmax_music_tier = 3\n[render]\nheight = 600\n")
            .unwrap();
        assert_eq!(config.move_speed, 4.5);
        assert_eq!(config.max_music_tier, 3);
        assert_eq!(config.render_height, 600);
        assert_eq!(config.render_width, 1280);
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut config = GameConfig::with_path("./does/not/exist.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.target_fps, 60);
    }
}
