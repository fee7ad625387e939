//! Locked crates holding a single object.

use raylib::prelude::Vector2;

use super::direction::Facing;
use super::gameobject::{GameObject, ObjectFlags, ObjectId, ObjectKind};
use crate::resources::animationstore::{AnimationStore, CRATE_SHEET};

#[derive(Debug, Clone)]
pub struct Crate {
    /// Released into the room when the crate is unlocked.
    pub contents: Box<GameObject>,
}

impl Crate {
    /// Take the contents out, re-centered on `crate_center`.
    pub fn release(self, crate_center: Vector2) -> GameObject {
        let mut contents = *self.contents;
        contents.hitbox.set_center(crate_center);
        contents
    }
}

impl GameObject {
    pub fn crate_at(
        id: ObjectId,
        store: &AnimationStore,
        x: f32,
        y: f32,
        contents: GameObject,
    ) -> Self {
        GameObject::animated(
            id,
            store,
            CRATE_SHEET,
            x,
            y,
            Facing::Right,
            ObjectKind::Crate(Crate {
                contents: Box::new(contents),
            }),
        )
        .with_flags(ObjectFlags::SOLID)
    }
}
