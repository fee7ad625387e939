//! Audio cues raised by the simulation.
//!
//! The session collects cues while it ticks; the shell forwards them to the
//! audio thread as [`AudioCmd`](crate::events::audio::AudioCmd)s.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Lock,
    Unlock,
    CrateUnlock,
    Key,
    Death,
    Jump,
}

impl SoundCue {
    pub const ALL: [SoundCue; 6] = [
        SoundCue::Lock,
        SoundCue::Unlock,
        SoundCue::CrateUnlock,
        SoundCue::Key,
        SoundCue::Death,
        SoundCue::Jump,
    ];

    /// Logical sound id, also the asset file stem.
    pub fn id(self) -> &'static str {
        match self {
            SoundCue::Lock => "lock",
            SoundCue::Unlock => "unlock",
            SoundCue::CrateUnlock => "crate-unlock",
            SoundCue::Key => "key",
            SoundCue::Death => "death",
            SoundCue::Jump => "jump",
        }
    }
}

impl fmt::Display for SoundCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Sound(SoundCue),
    /// Halt the music until the next track starts.
    PauseMusic,
    /// Start the track of a music tier right away.
    PlayMusic(u32),
    /// Play the track of a music tier once the current one ends.
    QueueMusic(u32),
}

impl From<SoundCue> for Cue {
    fn from(sound: SoundCue) -> Self {
        Cue::Sound(sound)
    }
}

/// Logical id of the music track for `tier`.
pub fn music_id(tier: u32) -> String {
    format!("music_{tier}")
}
