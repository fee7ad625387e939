//! Doors sit in the middle of a room wall, just outside the arena.
//!
//! A door is `locked`, closed (`def`) or `open`; only open doors let the player
//! through. Walking past the door's center line triggers a room transition.

use super::direction::{Facing, Side};
use super::gameobject::{GameObject, ObjectId, ObjectKind};
use super::hitbox::Hitbox;
use crate::resources::animationstore::{AnimationStore, DOOR_SHEET};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorState {
    Locked,
    Closed,
    Open,
}

impl DoorState {
    pub fn animation_state(self) -> &'static str {
        match self {
            DoorState::Locked => "locked",
            DoorState::Closed => "def",
            DoorState::Open => "open",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Door {
    /// Wall the door is on.
    pub side: Side,
    pub state: DoorState,
}

impl Door {
    /// Whether the player's leading edge has crossed the door's center line.
    pub fn in_transition_zone(&self, door: &Hitbox, player: &Hitbox) -> bool {
        let c = door.center();
        match self.side {
            Side::Right => player.right() > c.x,
            Side::Left => player.left() < c.x,
            Side::Top => player.top() < c.y,
            Side::Bottom => player.bottom() > c.y,
        }
    }
}

impl GameObject {
    pub fn door_on(id: ObjectId, store: &AnimationStore, side: Side, state: DoorState) -> Self {
        let mut door = GameObject::animated(
            id,
            store,
            DOOR_SHEET,
            0.0,
            0.0,
            Facing::from(side),
            ObjectKind::Door(Door { side, state }),
        );
        door.set_animation_state(state.animation_state());
        door
    }

    /// Change a door's state and its animation together. No-op on other kinds.
    pub fn set_door_state(&mut self, state: DoorState) {
        if let ObjectKind::Door(door) = &mut self.kind {
            door.state = state;
            self.set_animation_state(state.animation_state());
        }
    }
}
