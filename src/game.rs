//! Game setup: asset loading and the start of the session.
//!
//! [`setup`] runs once before the main loop. It loads textures, asks the
//! audio thread to load every sound and music track, reads the room table
//! and inserts the [`Session`].

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::events::audio::AudioCmd;
use crate::events::cue::{SoundCue, music_id};
use crate::resources::animationstore::{
    ATTACK_SHEET, AnimationStore, CRATE_SHEET, CRUMBLE_SHEET, DOOR_SHEET, KEY_SHEET,
    PLAYER_SHEET, POWERUP_SHEET,
};
use crate::resources::gameconfig::GameConfig;
use crate::resources::roomtable::RoomTable;
use crate::resources::session::{Session, SessionSettings};
use crate::resources::texturestore::TextureStore;
use crate::rooms::RoomId;

pub const IMAGE_DIR: &str = "./assets/images";
pub const SOUND_DIR: &str = "./assets/sound";
pub const MUSIC_DIR: &str = "./assets/music";

/// Every image the renderer looks up: the sprite sheets and the still
/// images.
pub const IMAGES: [&str; 10] = [
    PLAYER_SHEET,
    DOOR_SHEET,
    KEY_SHEET,
    CRUMBLE_SHEET,
    POWERUP_SHEET,
    CRATE_SHEET,
    ATTACK_SHEET,
    "platform",
    "spike",
    "arrow",
];

/// Command line choices that shape the session.
#[derive(Resource, Debug, Clone, Default)]
pub struct LaunchOptions {
    /// Overrides `rooms_file` from the config.
    pub rooms_file: Option<PathBuf>,
    pub forced_room: Option<RoomId>,
    pub seed: Option<u64>,
}

/// Read the room table, falling back to the built-in one when the file is
/// missing or invalid.
pub fn load_room_table(path: &Path) -> RoomTable {
    match RoomTable::load_from_file(path) {
        Ok(table) => table,
        Err(e) => {
            warn!("{}; using the built-in room table", e);
            RoomTable::builtin()
        }
    }
}

pub fn session_settings(config: &GameConfig, options: &LaunchOptions) -> SessionSettings {
    SessionSettings {
        forced_room: options.forced_room,
        seed: options.seed,
        ..SessionSettings::from_config(config)
    }
}

/// Load commands for every sound cue and every music tier.
pub fn audio_loads(max_music_tier: u32) -> Vec<AudioCmd> {
    let sounds = SoundCue::ALL.iter().map(|cue| AudioCmd::LoadFx {
        id: cue.id().to_string(),
        path: format!("{}/{}.mp3", SOUND_DIR, cue.id()),
    });
    let music = (0..=max_music_tier).map(|tier| AudioCmd::LoadMusic {
        id: music_id(tier),
        path: format!("{}/{}.mp3", MUSIC_DIR, tier),
    });
    sounds.chain(music).collect()
}

pub fn setup(
    mut commands: Commands,
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    config: Res<GameConfig>,
    options: Res<LaunchOptions>,
    mut audio_cmd_writer: MessageWriter<AudioCmd>,
) {
    let mut textures = TextureStore::default();
    textures.load_all(&mut rl, &th, IMAGE_DIR, &IMAGES);
    info!("Loaded {} of {} images", textures.len(), IMAGES.len());
    commands.insert_resource(textures);

    // the audio thread answers with load messages, polled by the schedule
    audio_cmd_writer.write_batch(audio_loads(config.max_music_tier));

    let rooms_file = options
        .rooms_file
        .clone()
        .unwrap_or_else(|| config.rooms_file.clone());
    let table = load_room_table(&rooms_file);
    let session = Session::new(
        table,
        AnimationStore::builtin(),
        session_settings(&config, &options),
    );
    info!("Session started in room {}", session.room.id);
    commands.insert_resource(session);
}
