//! Side-on player controller for rooms with gravity.
//!
//! The player walks perpendicular to gravity and falls along it. Gravity can
//! point in any of the four directions; the jump key is always the one
//! pointing away from the floor. Holding it keeps adding a decaying impulse
//! for `jump_frames` ticks, releasing it cuts the jump short.

use log::trace;
use raylib::prelude::Vector2;

use crate::components::direction::Axis;
use crate::components::gravity::Gravity;
use crate::components::player::Player;
use crate::events::cue::{Cue, SoundCue};
use crate::resources::input::InputSnapshot;
use crate::rooms::Room;
use crate::systems::collision::resolve;
use crate::systems::interaction::{PlayerSignal, touch_interactables};
use crate::systems::powerups::{attack, dash};

pub fn update_platform(
    player: &mut Player,
    input: &InputSnapshot,
    room: &mut Room,
    gravity: Gravity,
    cues: &mut Vec<Cue>,
) -> Option<PlayerSignal> {
    let dir = gravity.dir;
    let (dx, dy) = input.axes();

    // walking, across gravity
    let (perp, perp_axis, par_axis) = if dir.is_vertical() {
        (
            Vector2::new(player.speed * dx as f32, 0.0),
            Axis::Horizontal,
            Axis::Vertical,
        )
    } else {
        (
            Vector2::new(0.0, player.speed * dy as f32),
            Axis::Vertical,
            Axis::Horizontal,
        )
    };
    let perp = resolve(player, perp, room, perp_axis, cues).delta;

    // falling and jumping, along gravity
    let jump_held = input.jump_held(dir);
    let state = &mut player.platform;
    state.velocity = gravity.accelerate(state.velocity);
    if !jump_held {
        state.jump_timer = 0;
    } else if !state.in_air {
        state.in_air = true;
        state.jump_timer = player.jump_frames;
        cues.push(Cue::Sound(SoundCue::Jump));
        trace!("jump");
    }
    if state.jump_timer > 0 && jump_held {
        state.velocity -=
            dir.sign() * player.jump * state.jump_timer as f32 / player.jump_frames as f32;
        state.jump_timer -= 1;
    }

    let velocity = state.velocity;
    let par = if dir.is_vertical() {
        Vector2::new(0.0, velocity)
    } else {
        Vector2::new(velocity, 0.0)
    };
    let fall = resolve(player, par, room, par_axis, cues);

    let ground = dir.ground_side();
    let state = &mut player.platform;
    if fall.contacts.on(ground) {
        state.in_air = false;
        state.jump_timer = 0;
        state.velocity = 0.0;
    } else {
        state.in_air = true;
        if fall.contacts.on(ground.opposite()) {
            // bumped the ceiling, start falling
            state.velocity = 0.0;
        }
    }

    let step = match dash(player, input) {
        Some(dash_step) => resolve(player, dash_step, room, Axis::Both, cues).delta,
        None => perp + fall.delta,
    };
    player.move_by(step);

    attack(player, input, room);
    touch_interactables(player, room, cues)
}
