//! Bridge between the ECS world and the audio thread.
//!
//! [`setup_audio`] spawns the thread once during initialization;
//! [`shutdown_audio`] stops and joins it during teardown.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::warn;

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::systems::audio::audio_thread;

#[derive(Resource)]
pub struct AudioBridge {
    /// ECS -> audio thread.
    pub tx_cmd: Sender<AudioCmd>,
    /// Audio thread -> ECS.
    pub rx_msg: Receiver<AudioMessage>,
    pub handle: std::thread::JoinHandle<()>,
}

impl AudioBridge {
    /// Send a command outside the schedule, e.g. while loading assets.
    pub fn send(&self, cmd: AudioCmd) {
        if let Err(e) = self.tx_cmd.send(cmd) {
            warn!("Audio thread is gone, dropped {:?}", e.into_inner());
        }
    }
}

/// Spawn the audio thread and insert [`AudioBridge`] plus the
/// `Messages<AudioMessage>` and `Messages<AudioCmd>` queues.
pub fn setup_audio(world: &mut World) {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let (tx_msg, rx_msg) = unbounded::<AudioMessage>();

    let handle = std::thread::spawn(move || audio_thread(rx_cmd, tx_msg));

    world.insert_resource(AudioBridge {
        tx_cmd,
        rx_msg,
        handle,
    });
    world.insert_resource(Messages::<AudioMessage>::default());
    world.insert_resource(Messages::<AudioCmd>::default());
}

/// Ask the audio thread to stop and wait for it.
pub fn shutdown_audio(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<AudioBridge>() {
        let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}
