//! Fullscreen toggle event and observer.
//!
//! Pressing **F** triggers [`SwitchFullScreenEvent`]. The observer switches
//! the window between full screen and the configured window size, tracking
//! the mode with the [`FullScreen`] marker resource.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{error, info};
use raylib::ffi;

use crate::resources::fullscreen::FullScreen;
use crate::resources::gameconfig::GameConfig;

#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchFullScreenEvent {}

pub fn switch_fullscreen_observer(
    _trigger: On<SwitchFullScreenEvent>,
    mut rl: NonSendMut<raylib::RaylibHandle>,
    mut commands: Commands,
    fullscreen: Option<Res<FullScreen>>,
    config: Res<GameConfig>,
) {
    if fullscreen.is_some() {
        commands.remove_resource::<FullScreen>();
        if rl.is_window_fullscreen() {
            rl.toggle_fullscreen();
            let (w, h) = config.window_size();
            rl.set_window_size(w as i32, h as i32);
            rl.restore_window();
            if rl.is_window_fullscreen() {
                error!("Failed to leave full screen");
            } else {
                info!("Full screen disabled");
            }
        }
    } else {
        commands.insert_resource(FullScreen {});
        if !rl.is_window_fullscreen() {
            let monitor: i32 = unsafe { ffi::GetCurrentMonitor() };
            let monitor_width = unsafe { ffi::GetMonitorWidth(monitor) };
            let monitor_height = unsafe { ffi::GetMonitorHeight(monitor) };
            info!("Monitor dimensions: {}x{}", monitor_width, monitor_height);
            #[cfg(not(target_os = "windows"))]
            rl.maximize_window();
            rl.set_window_size(monitor_width, monitor_height);
            rl.toggle_fullscreen();
            if rl.is_window_fullscreen() {
                info!("Full screen enabled");
            } else {
                error!("Failed to enable full screen");
            }
        }
    }
}
