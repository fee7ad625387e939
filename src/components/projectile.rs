//! Arrows flying in a straight line.

use raylib::prelude::Vector2;

use super::direction::Facing;
use super::gameobject::{GameObject, ObjectFlags, ObjectId, ObjectKind};
use super::hitbox::Hitbox;

pub const ARROW_WIDTH: f32 = 32.0;
pub const ARROW_HEIGHT: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    /// Pixels per tick.
    pub velocity: Vector2,
}

impl GameObject {
    /// Deadly, breakable arrow travelling along `facing` at `speed`.
    pub fn arrow(id: ObjectId, x: f32, y: f32, facing: Facing, speed: f32) -> Self {
        let mut hitbox = Hitbox::new(x, y, ARROW_WIDTH, ARROW_HEIGHT);
        if facing.is_vertical() {
            hitbox.swap_dims();
        }
        let (ax, ay) = facing.axes();
        Self {
            id,
            hitbox,
            facing,
            flags: ObjectFlags {
                deadly: true,
                breakable: true,
                solid: false,
            },
            animation: None,
            kind: ObjectKind::Projectile(Projectile {
                velocity: Vector2::new(ax as f32 * speed, ay as f32 * speed),
            }),
        }
    }

    pub fn is_projectile(&self) -> bool {
        matches!(self.kind, ObjectKind::Projectile(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_flies_along_its_facing() {
        let mut arrow = GameObject::arrow(0, 10.0, 10.0, Facing::Down, 7.5);
        assert_eq!(arrow.hitbox.width(), ARROW_HEIGHT);
        assert_eq!(arrow.hitbox.height(), ARROW_WIDTH);
        arrow.update();
        arrow.update();
        assert_eq!(arrow.hitbox.left(), 10.0);
        assert_eq!(arrow.hitbox.top(), 25.0);
        assert!(arrow.is_deadly());
        assert!(arrow.is_breakable());
        assert!(!arrow.is_solid());
    }
}
