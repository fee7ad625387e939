//! Rooms: bounded arenas owning their objects.
//!
//! A [`Room`] is rebuilt from scratch every time it is entered. It owns its
//! objects (doors first, then layout objects, then borders), its pause and
//! death-sequence state and the spawner that keeps adding objects while the
//! room is active.
//!
//! Submodules:
//! - [`builder`] – room context, doors and borders shared by every layout
//! - [`layouts`] – the six hand-made rooms
//! - [`spawners`] – per-room dynamic object spawning

pub mod builder;
pub mod layouts;
pub mod spawners;

use crate::components::direction::Side;
use crate::components::door::Door;
use crate::components::gameobject::{GameObject, ObjectId, ObjectUpdate};
use crate::components::gravity::{Gravity, GravityDir};
use crate::components::hitbox::Hitbox;
use crate::resources::animationstore::AnimationStore;

pub use builder::RoomContext;
pub use layouts::build_room;
pub use spawners::Spawner;

/// Identifier of a room layout.
pub type RoomId = u32;

/// How the player moves in a room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementMode {
    /// Eight-way top-down movement.
    FreeRoam,
    /// Side-on movement under gravity.
    Platform(Gravity),
}

impl MovementMode {
    pub fn platform(dir: GravityDir) -> Self {
        MovementMode::Platform(Gravity::new(dir))
    }

    pub fn gravity(&self) -> Option<GravityDir> {
        match self {
            MovementMode::FreeRoam => None,
            MovementMode::Platform(g) => Some(g.dir),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    /// Number of earlier clears of this room; layouts add hazards with it.
    pub difficulty: u32,
    /// The playable rectangle. Walls and doors sit outside it.
    pub bounds: Hitbox,
    /// Wall the player came in through, `None` for a starting room.
    pub entrance: Option<Side>,
    pub mode: MovementMode,
    pub objects: Vec<GameObject>,
    /// Ticks since the room was created, counted while paused too.
    pub age: u32,
    pub paused: bool,
    /// Ticks left in the death sequence, `None` while the player is alive.
    pub death_countdown: Option<u32>,
    pub spawner: Spawner,
}

impl Room {
    pub fn new(
        id: RoomId,
        difficulty: u32,
        bounds: Hitbox,
        entrance: Option<Side>,
        mode: MovementMode,
    ) -> Self {
        Self {
            id,
            difficulty,
            bounds,
            entrance,
            mode,
            objects: Vec::new(),
            age: 0,
            paused: false,
            death_countdown: None,
            spawner: Spawner::Idle,
        }
    }

    pub fn in_death_sequence(&self) -> bool {
        self.death_countdown.is_some()
    }

    pub fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id == id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<GameObject> {
        let idx = self.index_of(id)?;
        Some(self.objects.remove(idx))
    }

    /// Doors go to the front of the collection.
    pub fn push_door(&mut self, door: GameObject) {
        self.objects.insert(0, door);
    }

    pub fn doors(&self) -> impl Iterator<Item = (&GameObject, &Door)> {
        self.objects.iter().filter_map(|o| o.door().map(|d| (o, d)))
    }

    pub fn door_on(&self, side: Side) -> Option<&GameObject> {
        self.doors().find(|(_, d)| d.side == side).map(|(o, _)| o)
    }

    pub fn door_on_mut(&mut self, side: Side) -> Option<&mut GameObject> {
        self.objects
            .iter_mut()
            .find(|o| o.door().is_some_and(|d| d.side == side))
    }

    /// Run per-object updates: crumble countdowns and projectile flight.
    /// Projectiles that have left `area` entirely are dropped.
    pub fn update_objects(&mut self, area: &Hitbox) {
        self.objects.retain_mut(|obj| {
            if obj.update() == ObjectUpdate::Remove {
                return false;
            }
            !(obj.is_projectile() && !area.overlaps(&obj.hitbox))
        });
    }

    pub fn advance_animations(&mut self, store: &AnimationStore) {
        for obj in &mut self.objects {
            obj.advance_animation(store);
        }
    }
}
