//! Room objects.
//!
//! A [`GameObject`] is the common shape of everything a room owns: a hitbox,
//! a facing, the `solid`/`deadly`/`breakable` flags, an optional animation
//! cursor and an [`ObjectKind`] carrying per-kind data. Behavior that used to
//! depend on "what kind of object is this" is expressed through capability
//! methods ([`GameObject::is_solid`], [`GameObject::sprite`], ...) so callers
//! rarely match on the kind themselves.
//!
//! Kind-specific constructors live next to their payload types
//! ([`door`](super::door), [`key`](super::key), ...).

use raylib::prelude::Vector2;

use super::animation::Animation;
use super::cratebox::Crate;
use super::crumble::CrumblePlatform;
use super::direction::Facing;
use super::door::{Door, DoorState};
use super::hitbox::Hitbox;
use super::key::Key;
use super::powerup::Powerup;
use super::projectile::Projectile;
use crate::resources::animationstore::AnimationStore;

/// Stable identifier of an object, unique for the whole session.
pub type ObjectId = u32;

/// Edge length of the square spike image.
pub const SPIKE_SIZE: f32 = 32.0;

/// Hands out object ids. Owned by the session and lent to whoever creates
/// objects, so ids never repeat across rooms.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: ObjectId,
}

impl IdAllocator {
    pub fn next_id(&mut self) -> ObjectId {
        let id = self.next;
        self.next += 1;
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObjectFlags {
    /// Blocks movement.
    pub solid: bool,
    /// Kills the player on contact.
    pub deadly: bool,
    /// Destroyed by the attack powerup.
    pub breakable: bool,
}

impl ObjectFlags {
    pub const NONE: ObjectFlags = ObjectFlags {
        solid: false,
        deadly: false,
        breakable: false,
    };
    pub const SOLID: ObjectFlags = ObjectFlags {
        solid: true,
        deadly: false,
        breakable: false,
    };
}

/// Closed set of object kinds.
#[derive(Debug, Clone)]
pub enum ObjectKind {
    Platform,
    Spike,
    Door(Door),
    Key(Key),
    Crate(Crate),
    Powerup(Powerup),
    Crumble(CrumblePlatform),
    Projectile(Projectile),
}

/// What a per-tick object update asks its owner to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectUpdate {
    Keep,
    Remove,
}

#[derive(Debug, Clone)]
pub struct GameObject {
    pub id: ObjectId,
    pub hitbox: Hitbox,
    pub facing: Facing,
    pub flags: ObjectFlags,
    pub animation: Option<Animation>,
    pub kind: ObjectKind,
}

impl GameObject {
    /// Plain solid block stretched to the given rectangle.
    pub fn platform(id: ObjectId, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id,
            hitbox: Hitbox::new(x, y, width, height),
            facing: Facing::Right,
            flags: ObjectFlags::SOLID,
            animation: None,
            kind: ObjectKind::Platform,
        }
    }

    pub fn spike(id: ObjectId, x: f32, y: f32) -> Self {
        Self {
            id,
            hitbox: Hitbox::new(x, y, SPIKE_SIZE, SPIKE_SIZE),
            facing: Facing::Right,
            flags: ObjectFlags {
                deadly: true,
                ..ObjectFlags::NONE
            },
            animation: None,
            kind: ObjectKind::Spike,
        }
    }

    /// Animated object sized from its sheet's canonical frame. Vertical
    /// facings swap width and height of the hitbox only.
    pub fn animated(
        id: ObjectId,
        store: &AnimationStore,
        sheet: &'static str,
        x: f32,
        y: f32,
        facing: Facing,
        kind: ObjectKind,
    ) -> Self {
        let (w, h) = store.frame_size(sheet);
        let mut hitbox = Hitbox::new(x, y, w, h);
        if facing.is_vertical() {
            hitbox.swap_dims();
        }
        Self {
            id,
            hitbox,
            facing,
            flags: ObjectFlags::NONE,
            animation: Some(Animation::new(sheet)),
            kind,
        }
    }

    pub fn with_flags(mut self, flags: ObjectFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.hitbox.pos = Vector2::new(x, y);
        self
    }

    /// Doors are solid unless open; everything else uses its flag.
    pub fn is_solid(&self) -> bool {
        match &self.kind {
            ObjectKind::Door(door) => door.state != DoorState::Open,
            _ => self.flags.solid,
        }
    }

    pub fn is_deadly(&self) -> bool {
        self.flags.deadly
    }

    pub fn is_breakable(&self) -> bool {
        self.flags.breakable
    }

    /// Logical image name: the sheet for animated objects, the still image
    /// otherwise.
    pub fn sprite(&self) -> &'static str {
        if let Some(anim) = &self.animation {
            return anim.sheet;
        }
        match &self.kind {
            ObjectKind::Spike => "spike",
            ObjectKind::Projectile(_) => "arrow",
            _ => "platform",
        }
    }

    pub fn set_animation_state(&mut self, state: &'static str) {
        if let Some(anim) = self.animation.as_mut() {
            anim.set_state(state);
        }
    }

    pub fn advance_animation(&mut self, store: &AnimationStore) {
        if let Some(anim) = self.animation.as_mut() {
            anim.advance(store);
        }
    }

    /// Per-tick behavior of objects that change on their own.
    pub fn update(&mut self) -> ObjectUpdate {
        match &mut self.kind {
            ObjectKind::Crumble(crumble) => crumble.tick(),
            ObjectKind::Projectile(projectile) => {
                let step = projectile.velocity;
                self.hitbox.translate(step);
                ObjectUpdate::Keep
            }
            _ => ObjectUpdate::Keep,
        }
    }

    pub fn door(&self) -> Option<&Door> {
        match &self.kind {
            ObjectKind::Door(door) => Some(door),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<&Key> {
        match &self.kind {
            ObjectKind::Key(key) => Some(key),
            _ => None,
        }
    }

    pub fn key_mut(&mut self) -> Option<&mut Key> {
        match &mut self.kind {
            ObjectKind::Key(key) => Some(key),
            _ => None,
        }
    }
}
