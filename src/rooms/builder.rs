//! Shared room assembly: arena placement, doors and borders.

use raylib::prelude::Vector2;

use super::{MovementMode, Room, RoomId};
use crate::components::direction::Side;
use crate::components::door::DoorState;
use crate::components::gameobject::{GameObject, IdAllocator};
use crate::components::hitbox::Hitbox;
use crate::resources::animationstore::{AnimationStore, DOOR_SHEET};
use crate::resources::roomtable::RoomTable;

/// Everything a room layout needs from the session while it is built or
/// while its spawner runs.
pub struct RoomContext<'a> {
    pub table: &'a RoomTable,
    pub store: &'a AnimationStore,
    pub ids: &'a mut IdAllocator,
    pub rng: &'a mut fastrand::Rng,
    /// The whole render area; rooms are centered in it.
    pub area: Hitbox,
    pub move_speed: f32,
}

impl RoomContext<'_> {
    /// Edge of the default square room.
    pub fn default_room_size(&self) -> f32 {
        (self.area.height() * 9.0 / 10.0).floor()
    }

    /// Thickness of walls, half a door's length.
    pub fn wall_thickness(&self) -> f32 {
        self.store.frame_size(DOOR_SHEET).0 / 2.0
    }

    /// An empty room of the given size centered in the render area.
    pub fn room(
        &self,
        id: RoomId,
        difficulty: u32,
        width: f32,
        height: f32,
        entrance: Option<Side>,
        mode: MovementMode,
    ) -> Room {
        let mut bounds = Hitbox::new(0.0, 0.0, width, height);
        bounds.set_center(self.area.center());
        Room::new(id, difficulty, bounds, entrance, mode)
    }

    pub fn next_id(&mut self) -> u32 {
        self.ids.next_id()
    }

    pub fn platform(&mut self, x: f32, y: f32, w: f32, h: f32) -> GameObject {
        GameObject::platform(self.ids.next_id(), x, y, w, h)
    }

    pub fn spike(&mut self, x: f32, y: f32) -> GameObject {
        GameObject::spike(self.ids.next_id(), x, y)
    }

    /// A door in the middle of `side`, just outside the room, placed at the
    /// front of the room's objects.
    pub fn create_door(&mut self, room: &mut Room, side: Side, state: DoorState) -> u32 {
        let id = self.ids.next_id();
        let mut door = GameObject::door_on(id, self.store, side, state);
        let bounds = room.bounds;
        door.hitbox.set_center(bounds.center());
        match side {
            Side::Right => door.hitbox.set_left(bounds.right()),
            Side::Left => door.hitbox.set_right(bounds.left()),
            Side::Top => door.hitbox.set_bottom(bounds.top()),
            Side::Bottom => door.hitbox.set_top(bounds.bottom()),
        }
        room.push_door(door);
        id
    }

    /// Doors on every configured exit wall except `exclude` and walls that
    /// already carry a door. Exit doors start open or locked.
    pub fn create_exit_doors(
        &mut self,
        room: &mut Room,
        open: bool,
        exclude: Option<Side>,
    ) -> Vec<u32> {
        let state = if open {
            DoorState::Open
        } else {
            DoorState::Locked
        };
        let exits = self.table.spec(room.id).exit.clone();
        let mut created = Vec::new();
        for side in exits {
            if Some(side) == exclude || room.door_on(side).is_some() {
                continue;
            }
            created.push(self.create_door(room, side, state));
        }
        created
    }

    /// Exit doors, the closed entrance door, then borders around all of
    /// them.
    pub fn create_doors_and_borders(&mut self, room: &mut Room, open: bool) -> Vec<u32> {
        let entrance = room.entrance;
        let mut doors = self.create_exit_doors(room, open, entrance);
        if let Some(side) = entrance {
            doors.push(self.create_door(room, side, DoorState::Closed));
        }
        self.create_borders(room);
        doors
    }

    /// Walls around the room. A wall with a door is split into two pieces
    /// leaving the door's span open.
    pub fn create_borders(&mut self, room: &mut Room) {
        let b = room.bounds;
        let t = self.wall_thickness();
        let mut pieces: Vec<(f32, f32, f32, f32)> = Vec::new();
        for side in Side::ALL {
            let door = room.door_on(side).map(|d| d.hitbox);
            match (side, door) {
                (Side::Top | Side::Bottom, Some(d)) => {
                    let y = if side == Side::Top { b.top() - t } else { b.bottom() };
                    pieces.push((b.left(), y, d.left() - b.left(), t));
                    pieces.push((d.right(), y, b.right() - d.right(), t));
                }
                (Side::Left | Side::Right, Some(d)) => {
                    let x = if side == Side::Left { b.left() - t } else { b.right() };
                    pieces.push((x, b.top(), t, d.top() - b.top()));
                    pieces.push((x, d.bottom(), t, b.bottom() - d.bottom()));
                }
                (Side::Top, None) => pieces.push((b.left(), b.top() - t, b.width(), t)),
                (Side::Bottom, None) => pieces.push((b.left(), b.bottom(), b.width(), t)),
                (Side::Left, None) => pieces.push((b.left() - t, b.top(), t, b.height())),
                (Side::Right, None) => pieces.push((b.right(), b.top(), t, b.height())),
            }
        }
        for (x, y, w, h) in pieces {
            let wall = self.platform(x, y, w, h);
            room.objects.push(wall);
        }
    }

    /// Top-left corner that centers a `w`x`h` box on `center`.
    pub fn centered(center: Vector2, w: f32, h: f32) -> (f32, f32) {
        (center.x - w / 2.0, center.y - h / 2.0)
    }
}
