//! ECS side of the game session.
//!
//! [`session_tick`] advances the simulation once per frame with the input
//! polled at the end of the previous frame. [`forward_session_cues`] turns
//! the cues the tick produced into [`AudioCmd`]s for the audio bridge.

use bevy_ecs::prelude::*;

use crate::events::audio::AudioCmd;
use crate::events::cue::{Cue, music_id};
use crate::resources::input::InputState;
use crate::resources::session::Session;

pub fn session_tick(input: Res<InputState>, mut session: ResMut<Session>) {
    session.tick(&input.snapshot());
}

/// Map a session cue to the audio command that realizes it.
pub fn cue_to_audio_cmd(cue: Cue) -> AudioCmd {
    match cue {
        Cue::Sound(sound) => AudioCmd::PlayFx {
            id: sound.id().to_string(),
        },
        Cue::PauseMusic => AudioCmd::PauseMusic,
        Cue::PlayMusic(tier) => AudioCmd::PlayMusic { id: music_id(tier) },
        Cue::QueueMusic(tier) => AudioCmd::QueueMusic { id: music_id(tier) },
    }
}

pub fn forward_session_cues(mut session: ResMut<Session>, mut writer: MessageWriter<AudioCmd>) {
    writer.write_batch(session.drain_cues().map(cue_to_audio_cmd));
}
