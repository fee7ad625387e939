//! Audio backed by a dedicated thread and Raylib.
//!
//! - [`audio_thread`] runs on its own OS thread, owns the Raylib audio device
//!   and processes [`AudioCmd`]s, answering with [`AudioMessage`]s.
//! - [`poll_audio_messages`] drains the thread's replies into the ECS message
//!   queue each frame; [`log_audio_messages`] reports them.
//! - [`forward_audio_cmds`] sends the commands written this frame to the
//!   thread.
//!
//! Only one music track plays at a time. Streams are loaded with raylib's
//! looping turned off, so the thread sees every track end: the queued track
//! takes over then, or the same track starts again.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, info, warn};
use raylib::core::audio::{Music, RaylibAudio, Sound};
use raylib::ffi;
use rustc_hash::FxHashMap;

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioBridge;

/// Drain pending replies from the audio thread into `Messages<AudioMessage>`.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

/// Advance the ECS message queue for [`AudioMessage`].
pub fn update_bevy_audio_messages(mut msgs: ResMut<Messages<AudioMessage>>) {
    msgs.update();
}

/// Report what the audio thread did. Load failures are not fatal: the game
/// simply plays without that sound.
pub fn log_audio_messages(mut reader: MessageReader<AudioMessage>) {
    for msg in reader.read() {
        match msg {
            AudioMessage::MusicLoadFailed { id, error } => {
                warn!("Music '{}' failed to load: {}", id, error)
            }
            AudioMessage::FxLoadFailed { id, error } => {
                warn!("Sound '{}' failed to load: {}", id, error)
            }
            other => debug!("audio: {:?}", other),
        }
    }
}

/// Forward the [`AudioCmd`]s written this frame to the audio thread.
pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        // the thread is gone only during shutdown
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for [`AudioCmd`].
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Music playback state of the audio thread.
#[derive(Debug, Default, PartialEq)]
struct Jukebox {
    current: Option<String>,
    paused: bool,
    queued: Option<String>,
}

impl Jukebox {
    /// Track to start when `current` ends: the queued one, else `current`
    /// again.
    fn next_after_end(&mut self) -> Option<String> {
        match self.queued.take() {
            Some(next) => {
                self.current = Some(next.clone());
                Some(next)
            }
            None => self.current.clone(),
        }
    }

    fn is_playing(&self) -> bool {
        self.current.is_some() && !self.paused
    }
}

/// What the thread does with the current stream on one pass of its loop.
#[derive(Debug, PartialEq, Eq)]
enum StreamStep {
    Idle,
    /// Feed the stream; raylib needs this regularly while it plays.
    Update,
    /// The stream stopped on its own: the track is over.
    Ended,
}

fn stream_step(jukebox: &Jukebox, stream_playing: bool) -> StreamStep {
    match (jukebox.is_playing(), stream_playing) {
        (false, _) => StreamStep::Idle,
        (true, true) => StreamStep::Update,
        (true, false) => StreamStep::Ended,
    }
}

/// Raylib loads music streams looping. The thread restarts or switches
/// tracks itself once a stream ends.
fn play_once(music: &mut ffi::Music) {
    music.looping = false;
}

fn start_track(musics: &FxHashMap<String, Music>, id: &str, tx: &Sender<AudioMessage>) {
    if let Some(music) = musics.get(id) {
        music.seek_stream(0.0);
        music.play_stream();
        let _ = tx.send(AudioMessage::MusicPlayStarted { id: id.to_string() });
    }
}

fn stop_current(musics: &FxHashMap<String, Music>, jukebox: &Jukebox) {
    if let Some(music) = jukebox.current.as_ref().and_then(|id| musics.get(id)) {
        music.stop_stream();
    }
}

/// Entry point of the audio thread. Blocks until [`AudioCmd::Shutdown`].
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_msg: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            panic!("Failed to initialize audio device: {}", e);
        }
    };
    info!("audio thread starting (id={:?})", std::thread::current().id());

    let mut musics: FxHashMap<String, Music> = FxHashMap::default();
    let mut sounds: FxHashMap<String, Sound> = FxHashMap::default();
    let mut jukebox = Jukebox::default();

    'run: loop {
        for cmd in rx_cmd.try_iter() {
            match cmd {
                AudioCmd::LoadMusic { id, path } => match audio.new_music(&path) {
                    Ok(mut music) => {
                        play_once(&mut music);
                        debug!("loaded music id='{}' path='{}'", id, path);
                        musics.insert(id.clone(), music);
                        let _ = tx_msg.send(AudioMessage::MusicLoaded { id });
                    }
                    Err(e) => {
                        let _ = tx_msg.send(AudioMessage::MusicLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayMusic { id } => {
                    stop_current(&musics, &jukebox);
                    start_track(&musics, &id, &tx_msg);
                    jukebox = Jukebox {
                        current: Some(id),
                        paused: false,
                        queued: None,
                    };
                }
                AudioCmd::QueueMusic { id } => {
                    if jukebox.is_playing() {
                        jukebox.queued = Some(id.clone());
                        let _ = tx_msg.send(AudioMessage::MusicQueued { id });
                    } else {
                        stop_current(&musics, &jukebox);
                        start_track(&musics, &id, &tx_msg);
                        jukebox = Jukebox {
                            current: Some(id),
                            paused: false,
                            queued: None,
                        };
                    }
                }
                AudioCmd::PauseMusic => {
                    if let Some(id) = jukebox.current.clone()
                        && !jukebox.paused
                    {
                        if let Some(music) = musics.get(&id) {
                            music.pause_stream();
                        }
                        jukebox.paused = true;
                        let _ = tx_msg.send(AudioMessage::MusicPaused { id });
                    }
                }
                AudioCmd::LoadFx { id, path } => match audio.new_sound(&path) {
                    Ok(sound) => {
                        debug!("loaded sound id='{}' path='{}'", id, path);
                        sounds.insert(id.clone(), sound);
                        let _ = tx_msg.send(AudioMessage::FxLoaded { id });
                    }
                    Err(e) => {
                        let _ = tx_msg.send(AudioMessage::FxLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayFx { id } => {
                    if let Some(sound) = sounds.get(&id) {
                        sound.play();
                    }
                }
                AudioCmd::Shutdown => {
                    info!("audio shutdown requested");
                    musics.clear();
                    sounds.clear();
                    break 'run;
                }
            }
        }

        if let Some(id) = jukebox.current.clone()
            && let Some(music) = musics.get(&id)
        {
            match stream_step(&jukebox, music.is_stream_playing()) {
                StreamStep::Update => music.update_stream(),
                StreamStep::Ended => {
                    let _ = tx_msg.send(AudioMessage::MusicFinished { id });
                    if let Some(next) = jukebox.next_after_end() {
                        start_track(&musics, &next, &tx_msg);
                    }
                }
                StreamStep::Idle => {}
            }
        }

        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    info!("audio thread exiting (id={:?})", std::thread::current().id());
    // musics and sounds drop before `audio`
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ended_track_repeats_without_a_queue() {
        let mut jb = Jukebox {
            current: Some("music_0".into()),
            ..Jukebox::default()
        };
        assert_eq!(jb.next_after_end().as_deref(), Some("music_0"));
        assert_eq!(jb.current.as_deref(), Some("music_0"));
    }

    #[test]
    fn queued_track_takes_over_once() {
        let mut jb = Jukebox {
            current: Some("music_0".into()),
            paused: false,
            queued: Some("music_1".into()),
        };
        assert_eq!(jb.next_after_end().as_deref(), Some("music_1"));
        assert_eq!(jb.current.as_deref(), Some("music_1"));
        assert!(jb.queued.is_none());
        assert_eq!(jb.next_after_end().as_deref(), Some("music_1"));
    }

    #[test]
    fn loaded_music_plays_once() {
        // SAFETY: ffi::Music is plain data; all-zero is a valid value
        let mut raw: ffi::Music = unsafe { std::mem::zeroed() };
        raw.looping = true;
        play_once(&mut raw);
        assert!(!raw.looping);
    }

    #[test]
    fn stopped_stream_ends_the_track() {
        let jb = Jukebox {
            current: Some("music_0".into()),
            ..Jukebox::default()
        };
        assert_eq!(stream_step(&jb, true), StreamStep::Update);
        assert_eq!(stream_step(&jb, false), StreamStep::Ended);
    }

    #[test]
    fn paused_or_silent_jukebox_leaves_the_stream_alone() {
        let paused = Jukebox {
            current: Some("music_0".into()),
            paused: true,
            queued: Some("music_1".into()),
        };
        assert_eq!(stream_step(&paused, false), StreamStep::Idle);
        assert_eq!(stream_step(&Jukebox::default(), false), StreamStep::Idle);
    }

    #[test]
    fn queued_tier_starts_when_the_playing_track_ends() {
        let mut jb = Jukebox {
            current: Some("music_0".into()),
            ..Jukebox::default()
        };
        // a clear while music_0 plays
        jb.queued = Some("music_1".into());
        assert_eq!(stream_step(&jb, true), StreamStep::Update);
        assert_eq!(stream_step(&jb, false), StreamStep::Ended);
        assert_eq!(jb.next_after_end().as_deref(), Some("music_1"));
        assert_eq!(stream_step(&jb, true), StreamStep::Update);
    }

    #[test]
    fn paused_jukebox_is_not_playing() {
        let jb = Jukebox {
            current: Some("music_0".into()),
            paused: true,
            queued: None,
        };
        assert!(!jb.is_playing());
        assert!(!Jukebox::default().is_playing());
    }
}
