use super::direction::Facing;
use super::gameobject::{GameObject, ObjectId, ObjectKind};
use super::player::PowerColor;
use crate::resources::animationstore::{AnimationStore, POWERUP_SHEET};

/// Pickup that changes the player's color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Powerup {
    pub color: PowerColor,
}

impl GameObject {
    pub fn powerup_at(
        id: ObjectId,
        store: &AnimationStore,
        x: f32,
        y: f32,
        color: PowerColor,
    ) -> Self {
        let mut obj = GameObject::animated(
            id,
            store,
            POWERUP_SHEET,
            x,
            y,
            Facing::Right,
            ObjectKind::Powerup(Powerup { color }),
        );
        // the yellow orb is the sheet's default row
        let state = match color {
            PowerColor::Blue => "blue",
            PowerColor::Red => "red",
            PowerColor::Base | PowerColor::Yellow => "def",
        };
        obj.set_animation_state(state);
        obj
    }
}
