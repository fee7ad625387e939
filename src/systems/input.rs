//! Input polling.
//!
//! [`update_input_state`] reads the keyboard through Raylib once per frame,
//! writes [`InputState`] and triggers the observer events of the one-shot
//! keys: pause, fullscreen, quit and the debug overlay.
use bevy_ecs::prelude::*;
use raylib::ffi::KeyboardKey;

use crate::events::pause::TogglePauseEvent;
use crate::events::quit::QuitEvent;
use crate::events::switchdebug::SwitchDebugEvent;
use crate::events::switchfullscreen::SwitchFullScreenEvent;
use crate::resources::input::{BoolState, InputState};

pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSend<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    let poll = |state: &mut BoolState| {
        let key: KeyboardKey = state.key_binding;
        state.update(
            rl.is_key_down(key),
            rl.is_key_pressed(key),
            rl.is_key_released(key),
        );
    };

    let input = &mut *input;
    poll(&mut input.up);
    poll(&mut input.left);
    poll(&mut input.down);
    poll(&mut input.right);
    poll(&mut input.powerup);
    poll(&mut input.pause);
    poll(&mut input.fullscreen_toggle);
    poll(&mut input.quit);
    poll(&mut input.mode_debug);

    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
    if input.fullscreen_toggle.just_pressed {
        commands.trigger(SwitchFullScreenEvent {});
    }
    if input.pause.just_pressed {
        commands.trigger(TogglePauseEvent {});
    }
    if input.quit.just_pressed {
        commands.trigger(QuitEvent {});
    }
}
