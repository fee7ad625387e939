//! Messages exchanged with the background audio thread.

use bevy_ecs::message::Message;

/// Commands sent *to* the audio thread.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    LoadMusic { id: String, path: String },
    /// Stop whatever plays and start `id` from the beginning. It restarts
    /// at its end unless another track was queued meanwhile.
    PlayMusic { id: String },
    /// Switch to `id` once the current track ends. Starts right away when
    /// no track is playing.
    QueueMusic { id: String },
    /// Pause the current track. It stays paused until a track is played or
    /// queued.
    PauseMusic,
    LoadFx { id: String, path: String },
    PlayFx { id: String },
    Shutdown,
}

/// Messages sent *back* from the audio thread.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioMessage {
    MusicLoaded { id: String },
    MusicLoadFailed { id: String, error: String },
    MusicPlayStarted { id: String },
    MusicQueued { id: String },
    MusicPaused { id: String },
    /// `id` reached its end.
    MusicFinished { id: String },
    FxLoaded { id: String },
    FxLoadFailed { id: String, error: String },
}
