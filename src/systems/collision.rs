//! Axis-separated collision resolver.
//!
//! Movement is checked one axis at a time: first the horizontal displacement
//! against the mover's current box, then the vertical displacement against
//! the box as it stands after the horizontal clamp (the horizontal delta itself
//! is not applied yet). A diagonal step whose axes are each free can still
//! end up clipping the corner of an obstacle.
//!
//! The resolver clamps the mover's box directly and returns the displacement
//! with every blocked component zeroed. The caller applies the rest.

use raylib::prelude::Vector2;
use smallvec::SmallVec;

use crate::components::direction::{Axis, Side};
use crate::components::gameobject::{GameObject, ObjectId};
use crate::components::hitbox::Hitbox;
use crate::events::cue::Cue;
use crate::rooms::Room;
use crate::systems::interaction::{crumble_on_contact, unlock_on_contact};

/// Anything that can be pushed against solids.
pub trait Mover {
    fn hitbox(&self) -> &Hitbox;
    fn hitbox_mut(&mut self) -> &mut Hitbox;

    /// Keys carried by the mover, most recent last. Movers without a key ring
    /// never unlock anything.
    fn key_ring(&mut self) -> Option<&mut Vec<GameObject>> {
        None
    }
}

impl Mover for GameObject {
    fn hitbox(&self) -> &Hitbox {
        &self.hitbox
    }

    fn hitbox_mut(&mut self) -> &mut Hitbox {
        &mut self.hitbox
    }
}

/// Sides of the mover that were stopped by a solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contacts {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Contacts {
    pub fn on(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
            Side::Top => self.top,
            Side::Bottom => self.bottom,
        }
    }

    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// Result of a sweep.
#[derive(Debug, Clone, Default)]
pub struct Sweep {
    /// Remaining displacement.
    pub delta: Vector2,
    /// Solids the swept box overlapped, in room order, without duplicates.
    pub touched: SmallVec<[ObjectId; 4]>,
    pub contacts: Contacts,
}

impl Sweep {
    fn touch(&mut self, id: ObjectId) {
        if !self.touched.contains(&id) {
            self.touched.push(id);
        }
    }
}

/// Sweep `mover` by `delta` against the solid objects in `objects`.
pub fn sweep(mover: &mut Hitbox, delta: Vector2, objects: &[GameObject], axis: Axis) -> Sweep {
    let mut out = Sweep {
        delta,
        ..Sweep::default()
    };

    if axis.horizontal() {
        let moved = mover.shifted(delta.x, 0.0);
        let mut blocked = false;
        for obj in objects.iter().filter(|o| o.is_solid()) {
            let wall = &obj.hitbox;
            if !moved.overlaps(wall) {
                continue;
            }
            if moved.right() > wall.left() && moved.right() < wall.right() {
                mover.set_right(wall.left());
                out.contacts.right = true;
            }
            if moved.left() < wall.right() && moved.left() > wall.left() {
                mover.set_left(wall.right());
                out.contacts.left = true;
            }
            out.touch(obj.id);
            blocked = true;
        }
        if blocked {
            out.delta.x = 0.0;
        }
    }

    if axis.vertical() {
        let moved = mover.shifted(0.0, delta.y);
        let mut blocked = false;
        for obj in objects.iter().filter(|o| o.is_solid()) {
            let wall = &obj.hitbox;
            if !moved.overlaps(wall) {
                continue;
            }
            if moved.bottom() > wall.top() && moved.bottom() < wall.bottom() {
                mover.set_bottom(wall.top());
                out.contacts.bottom = true;
            }
            if moved.top() < wall.bottom() && moved.top() > wall.top() {
                mover.set_top(wall.bottom());
                out.contacts.top = true;
            }
            out.touch(obj.id);
            blocked = true;
        }
        if blocked {
            out.delta.y = 0.0;
        }
    }

    out
}

/// Sweep `mover` through `room`, then run the contact side effects: unlock
/// locked doors and crates if the mover carries keys, and start crumbling
/// any touched crumble platform.
pub fn resolve<M: Mover>(
    mover: &mut M,
    delta: Vector2,
    room: &mut Room,
    axis: Axis,
    cues: &mut Vec<Cue>,
) -> Sweep {
    let result = sweep(mover.hitbox_mut(), delta, &room.objects, axis);
    if !result.touched.is_empty() {
        if let Some(keys) = mover.key_ring() {
            unlock_on_contact(keys, &result.touched, room, cues);
        }
        crumble_on_contact(&result.touched, room);
    }
    result
}
