//! Dynamic spawning while a room is active.

use super::Room;
use super::builder::RoomContext;
use crate::components::direction::{Facing, Side};
use crate::components::door::DoorState;
use crate::components::gameobject::GameObject;
use crate::components::projectile::{ARROW_HEIGHT, ARROW_WIDTH};
use crate::events::cue::{Cue, SoundCue};
use crate::resources::animationstore::FPS;

/// Ticks between barrage volleys.
const VOLLEY_TICKS: u32 = FPS / 2;
/// The barrage room opens its exits at this age.
const BARRAGE_UNLOCK_AGE: u32 = FPS * 4;
/// No volleys from this age on.
const BARRAGE_END_AGE: u32 = FPS * 5;
/// Height of one barrage row.
const ROW_HEIGHT: i32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Spawner {
    #[default]
    Idle,
    /// Volleys of arrows every half second, then the exits open.
    ArrowBarrage,
    /// An arrow dropping near the right wall every second.
    FallingArrows,
}

/// Run the room's spawner for the current age. Does nothing while paused.
pub fn run_spawner(room: &mut Room, ctx: &mut RoomContext, cues: &mut Vec<Cue>) {
    if room.paused {
        return;
    }
    match room.spawner {
        Spawner::Idle => {}
        Spawner::ArrowBarrage => arrow_barrage(room, ctx, cues),
        Spawner::FallingArrows => {
            if room.age % FPS == 0 {
                let speed = ctx.move_speed * 1.5;
                let x = room.bounds.right() - 32.0 * 4.0 + 16.0 - ARROW_HEIGHT;
                let id = ctx.next_id();
                room.objects
                    .push(GameObject::arrow(id, x, -ARROW_WIDTH, Facing::Down, speed));
            }
        }
    }
}

fn arrow_barrage(room: &mut Room, ctx: &mut RoomContext, cues: &mut Vec<Cue>) {
    if room.age % VOLLEY_TICKS != 0 {
        return;
    }
    if room.age == BARRAGE_UNLOCK_AGE {
        let entrance = room.entrance;
        for obj in room.objects.iter_mut() {
            if obj.door().is_some_and(|d| Some(d.side) != entrance) {
                obj.set_door_state(DoorState::Open);
            }
        }
        cues.push(Cue::Sound(SoundCue::Unlock));
    } else if room.age < BARRAGE_END_AGE {
        let volley = room.age / VOLLEY_TICKS;
        if room.difficulty <= 1 {
            row_volley(room, ctx, volley);
        } else {
            scattered_volley(room, ctx);
        }
    }
}

/// Arrows along two 32 px rows of the room. At difficulty 0 each arrow
/// picks a side at random, at difficulty 1 both sides fire.
fn row_volley(room: &mut Room, ctx: &mut RoomContext, volley: u32) {
    let speed = ctx.move_speed * 1.5;
    let area = ctx.area;
    let top = room.bounds.top() as i32;
    let bottom = room.bounds.bottom() as i32;
    let rows = (top..bottom).filter(|p| p.rem_euclid(ROW_HEIGHT) == ROW_HEIGHT / 2);
    for (row, pixel) in rows.enumerate() {
        let row = row as u32;
        if row != volley * 2 && row != volley * 2 + 1 {
            continue;
        }
        let y = pixel as f32;
        let (from_left, from_right) = match room.difficulty {
            0 => {
                let left = ctx.rng.bool();
                (left, !left)
            }
            _ => (true, true),
        };
        if from_left {
            let id = ctx.next_id();
            room.objects
                .push(GameObject::arrow(id, -ARROW_WIDTH, y, Facing::Right, speed));
        }
        if from_right {
            let id = ctx.next_id();
            room.objects.push(GameObject::arrow(
                id,
                area.width(),
                area.height() - y - ARROW_HEIGHT,
                Facing::Left,
                speed,
            ));
        }
    }
}

/// Four coin flips, each launching an arrow from a random area edge across
/// the room.
fn scattered_volley(room: &mut Room, ctx: &mut RoomContext) {
    let speed = ctx.move_speed * 1.5;
    let area = ctx.area;
    let b = room.bounds;
    for _ in 0..4 {
        if !ctx.rng.bool() {
            continue;
        }
        let (x, y, facing) = if ctx.rng.bool() {
            let y = ctx.rng.i32(b.top() as i32 + 5..=b.bottom() as i32 - 5) as f32;
            let side = if ctx.rng.bool() { Side::Left } else { Side::Right };
            match side {
                Side::Left => (area.left(), y, Facing::Right),
                _ => (area.right(), y, Facing::Left),
            }
        } else {
            let x = ctx.rng.i32(b.left() as i32 + 5..=b.right() as i32 - 5) as f32;
            if ctx.rng.bool() {
                (x, area.bottom(), Facing::Up)
            } else {
                (x, area.top(), Facing::Down)
            }
        };
        let id = ctx.next_id();
        room.objects.push(GameObject::arrow(id, x, y, facing, speed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::gameobject::IdAllocator;
    use crate::components::hitbox::Hitbox;
    use crate::resources::animationstore::AnimationStore;
    use crate::resources::roomtable::RoomTable;
    use crate::rooms::build_room;

    struct Fixture {
        table: RoomTable,
        store: AnimationStore,
        ids: IdAllocator,
        rng: fastrand::Rng,
    }

    impl Fixture {
        fn new(seed: u64) -> Self {
            Self {
                table: RoomTable::builtin(),
                store: AnimationStore::builtin(),
                ids: IdAllocator::default(),
                rng: fastrand::Rng::with_seed(seed),
            }
        }

        fn ctx(&mut self) -> RoomContext<'_> {
            RoomContext {
                table: &self.table,
                store: &self.store,
                ids: &mut self.ids,
                rng: &mut self.rng,
                area: Hitbox::new(0.0, 0.0, 1280.0, 720.0),
                move_speed: 5.0,
            }
        }
    }

    fn arrows(room: &Room) -> usize {
        room.objects.iter().filter(|o| o.is_projectile()).count()
    }

    #[test]
    fn barrage_fires_every_half_second_until_unlock() {
        let mut fx = Fixture::new(4);
        let mut ctx = fx.ctx();
        let mut room = build_room(5, 1, Some(Side::Left), &mut ctx);
        let mut cues = Vec::new();

        run_spawner(&mut room, &mut ctx, &mut cues);
        // two rows, both sides
        assert_eq!(arrows(&room), 4);
        room.age = 1;
        run_spawner(&mut room, &mut ctx, &mut cues);
        assert_eq!(arrows(&room), 4);

        room.age = BARRAGE_UNLOCK_AGE;
        run_spawner(&mut room, &mut ctx, &mut cues);
        assert_eq!(arrows(&room), 4);
        assert_eq!(cues, vec![Cue::Sound(SoundCue::Unlock)]);
        for (_, door) in room.doors() {
            let expected = if door.side == Side::Left {
                DoorState::Closed
            } else {
                DoorState::Open
            };
            assert_eq!(door.state, expected);
        }

        room.age = BARRAGE_END_AGE;
        run_spawner(&mut room, &mut ctx, &mut cues);
        assert_eq!(arrows(&room), 4);
    }

    #[test]
    fn easy_barrage_picks_one_side_per_row() {
        let mut fx = Fixture::new(9);
        let mut ctx = fx.ctx();
        let mut room = build_room(5, 0, None, &mut ctx);
        let mut cues = Vec::new();
        room.age = VOLLEY_TICKS;
        run_spawner(&mut room, &mut ctx, &mut cues);
        assert_eq!(arrows(&room), 2);
    }

    #[test]
    fn paused_room_spawns_nothing() {
        let mut fx = Fixture::new(1);
        let mut ctx = fx.ctx();
        let mut room = build_room(5, 3, None, &mut ctx);
        room.paused = true;
        let mut cues = Vec::new();
        run_spawner(&mut room, &mut ctx, &mut cues);
        assert_eq!(arrows(&room), 0);
    }

    #[test]
    fn falling_arrows_drop_once_a_second() {
        let mut fx = Fixture::new(1);
        let mut ctx = fx.ctx();
        let mut room = build_room(6, 2, Some(Side::Top), &mut ctx);
        let mut cues = Vec::new();
        for age in 0..=FPS {
            room.age = age;
            run_spawner(&mut room, &mut ctx, &mut cues);
        }
        assert_eq!(arrows(&room), 2);
        let arrow = room.objects.iter().find(|o| o.is_projectile()).unwrap();
        assert_eq!(arrow.facing, Facing::Down);
        assert_eq!(arrow.hitbox.bottom(), 0.0);
    }
}
