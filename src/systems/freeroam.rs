//! Eight-way top-down player controller.

use crate::components::direction::Axis;
use crate::components::player::Player;
use crate::events::cue::Cue;
use crate::resources::input::InputSnapshot;
use crate::rooms::Room;
use crate::systems::collision::resolve;
use crate::systems::interaction::{PlayerSignal, touch_interactables};
use crate::systems::powerups::{attack, dash, scale_to};

/// One tick of free-roam movement: walk or dash, resolve against solids,
/// attack, then touch whatever the player now overlaps.
pub fn update_free_roam(
    player: &mut Player,
    input: &InputSnapshot,
    room: &mut Room,
    cues: &mut Vec<Cue>,
) -> Option<PlayerSignal> {
    let walk = scale_to(input.axes(), player.speed);
    let step = dash(player, input).unwrap_or(walk);
    let sweep = resolve(player, step, room, Axis::Both, cues);
    player.move_by(sweep.delta);
    attack(player, input, room);
    touch_interactables(player, room, cues)
}
