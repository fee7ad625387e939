//! The six hand-made rooms.
//!
//! Each layout builds its objects relative to the room rectangle, then adds
//! doors and borders. Difficulty adds hazards or swaps safe platforms for
//! crumbling ones.

use log::info;

use super::builder::RoomContext;
use super::spawners::Spawner;
use super::{MovementMode, Room, RoomId};
use crate::components::direction::{Facing, Side};
use crate::components::door::DoorState;
use crate::components::gameobject::{GameObject, SPIKE_SIZE};
use crate::components::gravity::GravityDir;
use crate::components::player::PowerColor;
use crate::resources::animationstore::KEY_SHEET;

const LAYOUTS: [RoomId; 6] = [1, 2, 3, 4, 5, 6];

pub fn has_layout(id: RoomId) -> bool {
    LAYOUTS.contains(&id)
}

/// Build room `id` at `difficulty`, entered through `entrance`.
///
/// Panics for ids without a layout.
pub fn build_room(
    id: RoomId,
    difficulty: u32,
    entrance: Option<Side>,
    ctx: &mut RoomContext,
) -> Room {
    let room = match id {
        1 => stairs(ctx, difficulty, entrance),
        2 => spike_maze(ctx, difficulty, entrance),
        3 => key_vault(ctx, difficulty, entrance),
        4 => key_climb(ctx, difficulty, entrance),
        5 => arrow_barrage(ctx, difficulty, entrance),
        6 => spike_pit(ctx, difficulty, entrance),
        _ => panic!("no layout for room {id}"),
    };
    info!(
        "Built room {} (difficulty {}, entrance {:?}, {} objects)",
        id,
        difficulty,
        entrance,
        room.objects.len()
    );
    room
}

/// Random facing for crumble tiles.
fn random_facing(ctx: &mut RoomContext) -> Facing {
    const FACINGS: [Facing; 4] = [Facing::Right, Facing::Left, Facing::Up, Facing::Down];
    FACINGS[ctx.rng.usize(..FACINGS.len())]
}

/// Starting platform room: a block with two steps, spikes in the corner and
/// a red powerup in the middle.
fn stairs(ctx: &mut RoomContext, difficulty: u32, entrance: Option<Side>) -> Room {
    let size = ctx.default_room_size();
    let mut room = ctx.room(1, difficulty, size, size, entrance, MovementMode::platform(GravityDir::Down));
    let b = room.bounds;
    let s = SPIKE_SIZE;

    let (w, h) = (96.0, 96.0);
    let (x, y) = (b.right() - 2.0 * w, b.bottom() - h);
    room.objects.push(ctx.platform(x, y, w, h));
    let (w, h) = (w / 2.0, h / 2.0);
    room.objects.push(ctx.platform(x - w, y + h, w, h));
    room.objects.push(ctx.platform(x + w, y - h, w, h));

    if difficulty >= 1 {
        room.objects.push(ctx.spike(x - w - s, b.bottom() - s));
        room.objects.push(ctx.spike(x + w - s, y - s));
    }
    for i in 1..=3 {
        room.objects.push(ctx.spike(b.right() - s * i as f32, b.bottom() - s));
    }

    if difficulty > 0 {
        let facing = random_facing(ctx);
        let id = ctx.next_id();
        room.objects.push(GameObject::crumble_platform(
            id,
            ctx.store,
            b.center().x - 48.0,
            b.bottom() - 192.0,
            96.0,
            24.0,
            facing,
        ));
    }

    let id = ctx.next_id();
    let c = b.center();
    room.objects
        .push(GameObject::powerup_at(id, ctx.store, c.x, c.y, PowerColor::Red));

    ctx.create_doors_and_borders(&mut room, true);
    room
}

/// Starting free-roam room: a spiral of platforms and spikes.
fn spike_maze(ctx: &mut RoomContext, difficulty: u32, entrance: Option<Side>) -> Room {
    let size = ctx.default_room_size();
    let mut room = ctx.room(2, difficulty, size, size, entrance, MovementMode::FreeRoam);
    let b = room.bounds;
    let s = SPIKE_SIZE;
    let gap = 4.0;
    let step = s + gap;
    let cx = b.center().x - s / 2.0;
    let quarter = 0.5 * (b.center().y - b.top());
    let upper = b.center().y - quarter;
    let lower = b.center().y + quarter;

    for (col, row) in [(4.0, 1.0), (4.0, 0.0), (5.0, 1.0), (5.0, 0.0)] {
        room.objects.push(ctx.spike(cx - step * col, upper + step * row));
    }

    if difficulty <= 1 {
        room.objects.push(ctx.platform(cx - step, lower + gap, step * 5.0, s));
        room.objects.push(ctx.platform(cx, upper, step * 5.0, s));
        room.objects
            .push(ctx.platform(cx + step * 4.0, lower - step * 5.0, s, step * 6.0));
        room.objects
            .push(ctx.platform(cx - step * 4.0, lower - step * 4.0, s, step * 5.0));
    } else {
        room.objects.push(ctx.spike(cx - step, lower));
        for i in 0..5 {
            let i = i as f32;
            room.objects.push(ctx.spike(cx + step * i, lower));
            room.objects.push(ctx.spike(cx + step * i, upper));
            room.objects.push(ctx.spike(cx + step * 4.0, lower - step * (i + 1.0)));
            room.objects.push(ctx.spike(cx - step * 4.0, lower - step * i));
        }
    }

    if difficulty >= 1 {
        for i in 0..5 {
            let i = i as f32;
            let from_right = b.right() - s * (i + 1.0) - gap * i;
            room.objects.push(ctx.spike(b.left() + step * i, b.top()));
            room.objects.push(ctx.spike(b.left() + step * i, b.bottom() - s));
            room.objects.push(ctx.spike(from_right, b.bottom() - s));
            room.objects.push(ctx.spike(from_right, b.top()));
        }
    }

    ctx.create_doors_and_borders(&mut room, true);
    room
}

/// Chance that one exit of the key vault starts open.
fn open_door_chance(difficulty: u32) -> f32 {
    match difficulty {
        0 => 1.0,
        1 => 0.5,
        2 => 0.25,
        _ => 0.1,
    }
}

/// Half-height free-roam room with locked exits, a crate holding a blue
/// powerup and a key.
fn key_vault(ctx: &mut RoomContext, difficulty: u32, entrance: Option<Side>) -> Room {
    let size = ctx.default_room_size();
    let mut room = ctx.room(3, difficulty, size, size / 2.0, entrance, MovementMode::FreeRoam);
    ctx.create_doors_and_borders(&mut room, false);

    let chance = open_door_chance(difficulty);
    if ctx.rng.f32() < chance {
        let mut sides: Vec<Side> = Side::ALL.into_iter().filter(|s| Some(*s) != entrance).collect();
        let mut open = vec![sides.remove(ctx.rng.usize(..sides.len()))];
        if ctx.rng.f32() < chance / 2.0 {
            open.push(sides[ctx.rng.usize(..sides.len())]);
        }
        for side in open {
            if let Some(door) = room.door_on_mut(side) {
                door.set_door_state(DoorState::Open);
            }
        }
    }

    let b = room.bounds;
    let c = b.center();
    let powerup_id = ctx.next_id();
    let powerup = GameObject::powerup_at(powerup_id, ctx.store, 0.0, 0.0, PowerColor::Blue);
    let crate_id = ctx.next_id();
    room.objects.push(GameObject::crate_at(
        crate_id,
        ctx.store,
        c.x - (b.width() / 3.0).floor(),
        c.y - (b.height() / 3.0).floor(),
        powerup,
    ));

    let (kw, kh) = ctx.store.frame_size(KEY_SHEET);
    let (kx, ky) = RoomContext::centered(c, kw, kh);
    let key_id = ctx.next_id();
    room.objects
        .push(GameObject::key_at(key_id, ctx.store, kx, ky, ctx.move_speed));
    room
}

/// Wide platform room entered from the top with a key guarded by spikes.
fn key_climb(ctx: &mut RoomContext, difficulty: u32, entrance: Option<Side>) -> Room {
    let size = ctx.default_room_size();
    let width = (size * 3.0 / 2.0).floor();
    let mut room = ctx.room(4, difficulty, width, size, entrance, MovementMode::platform(GravityDir::Down));
    let b = room.bounds;
    let s = SPIKE_SIZE;

    for i in 1..=5 {
        room.objects.push(ctx.spike(b.right() - s * i as f32, b.bottom() - s));
    }
    if difficulty >= 1 {
        for i in 1..=2 {
            room.objects.push(ctx.spike(b.left(), b.bottom() - s * i as f32));
        }
    }

    let (kw, kh) = ctx.store.frame_size(KEY_SHEET);
    let key_id = ctx.next_id();
    room.objects.push(GameObject::key_at(
        key_id,
        ctx.store,
        b.center().x - kw / 2.0,
        b.bottom() - 192.0 - kh,
        ctx.move_speed,
    ));

    let (w, h) = (120.0 + (b.width() / 2.0).floor(), 48.0);
    let (x, y) = (b.center().x - w / 2.0, b.top() + h * 3.0);
    let ledge = 192.0;
    let pillar_x = b.right() - s * 5.0 - h;
    room.objects.push(ctx.platform(x, y, w, h));
    room.objects
        .push(ctx.platform(x, b.bottom() - ledge, (pillar_x - x).trunc(), h));
    room.objects.push(ctx.platform(pillar_x, b.bottom() - ledge, h, ledge));
    let post = ctx.platform(x - h, y, h, ledge - h);
    let post_box = post.hitbox;
    room.objects.push(post);

    if difficulty <= 1 {
        let facing = random_facing(ctx);
        let id = ctx.next_id();
        room.objects.push(GameObject::crumble_platform(
            id,
            ctx.store,
            b.right() - s * 5.0,
            b.bottom() - ledge,
            s * 5.0,
            h,
            facing,
        ));
    }

    for i in 0..4 {
        room.objects
            .push(ctx.spike(post_box.left() - s, post_box.top() + s * (i as f32 + 0.25)));
    }
    for i in 0..3 {
        room.objects
            .push(ctx.spike(b.center().x + s * (i as f32 + 2.0), b.bottom() - ledge - s));
    }
    room.objects
        .push(ctx.spike(b.center().x - s * 3.0, b.bottom() - ledge - s));
    if difficulty >= 1 {
        room.objects.push(ctx.spike(b.center().x - s * 4.0, y + h));
    }

    ctx.create_doors_and_borders(&mut room, true);
    room
}

/// Quarter-size free-roam room locked until the arrow barrage ends.
fn arrow_barrage(ctx: &mut RoomContext, difficulty: u32, entrance: Option<Side>) -> Room {
    let size = ctx.default_room_size();
    let mut room = ctx.room(5, difficulty, size / 2.0, size / 2.0, entrance, MovementMode::FreeRoam);
    ctx.create_doors_and_borders(&mut room, false);
    room.spawner = Spawner::ArrowBarrage;
    room
}

/// Wide platform room over a spike floor. Left and bottom doors stay
/// locked; at higher difficulty arrows rain down near the right wall.
fn spike_pit(ctx: &mut RoomContext, difficulty: u32, entrance: Option<Side>) -> Room {
    let size = ctx.default_room_size();
    let width = (size * 3.0 / 2.0).floor();
    let mut room = ctx.room(6, difficulty, width, size, entrance, MovementMode::platform(GravityDir::Down));
    let doors = ctx.create_doors_and_borders(&mut room, true);
    for id in doors {
        if let Some(door) = room.get_mut(id)
            && door
                .door()
                .is_some_and(|d| matches!(d.side, Side::Left | Side::Bottom))
        {
            door.set_door_state(DoorState::Locked);
        }
    }

    let b = room.bounds;
    let s = SPIKE_SIZE;
    room.objects.push(ctx.spike(b.right() - s, b.bottom() - s));
    room.objects.push(ctx.spike(b.left(), b.bottom() - s));
    for i in 1..7 {
        let i = i as f32;
        room.objects.push(ctx.spike(b.right() - s * (i + 1.0), b.bottom() - s));
        room.objects.push(ctx.spike(b.left() + s * i, b.bottom() - s));
    }

    let (w, h) = (48.0, 192.0);
    room.objects
        .push(ctx.platform(b.right() - s * 7.0 - w, b.bottom() - h, w, h));
    room.objects
        .push(ctx.platform(b.left() + s * 7.0, b.bottom() - h / 2.0, w, h / 2.0));

    let (ledge_w, ledge_h) = (128.0, 24.0);
    let ledges = [
        (b.left(), b.bottom() - h),
        (b.center().x - ledge_w / 2.0, b.bottom() - h),
    ];
    for (x, y) in ledges {
        if difficulty == 0 {
            room.objects.push(ctx.platform(x, y, ledge_w, ledge_h));
        } else {
            let facing = random_facing(ctx);
            let id = ctx.next_id();
            room.objects.push(GameObject::crumble_platform(
                id, ctx.store, x, y, ledge_w, ledge_h, facing,
            ));
        }
    }

    if difficulty >= 2 {
        room.spawner = Spawner::FallingArrows;
    }
    room
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::gameobject::{IdAllocator, ObjectKind};
    use crate::components::hitbox::Hitbox;
    use crate::resources::animationstore::AnimationStore;
    use crate::resources::roomtable::RoomTable;

    fn build(id: RoomId, difficulty: u32, entrance: Option<Side>, seed: u64) -> Room {
        let table = RoomTable::builtin();
        let store = AnimationStore::builtin();
        let mut ids = IdAllocator::default();
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut ctx = RoomContext {
            table: &table,
            store: &store,
            ids: &mut ids,
            rng: &mut rng,
            area: Hitbox::new(0.0, 0.0, 1280.0, 720.0),
            move_speed: 5.0,
        };
        build_room(id, difficulty, entrance, &mut ctx)
    }

    fn count(room: &Room, pred: impl Fn(&GameObject) -> bool) -> usize {
        room.objects.iter().filter(|o| pred(o)).count()
    }

    #[test]
    fn every_configured_room_builds() {
        let table = RoomTable::builtin();
        for spec in &table.rooms {
            for difficulty in 0..4 {
                let room = build(spec.id, difficulty, spec.enter.first().copied(), 1);
                assert_eq!(room.id, spec.id);
                assert!(room.objects.iter().any(|o| o.door().is_some()));
            }
        }
    }

    #[test]
    #[should_panic(expected = "no layout for room 12")]
    fn unknown_room_is_fatal() {
        build(12, 0, None, 1);
    }

    #[test]
    fn exit_doors_follow_the_table() {
        let table = RoomTable::builtin();
        for spec in &table.rooms {
            let entrance = spec.enter.first().copied();
            let room = build(spec.id, 0, entrance, 3);
            for side in &spec.exit {
                if Some(*side) != entrance {
                    assert!(room.door_on(*side).is_some(), "room {} lacks {side} door", spec.id);
                }
            }
            if let Some(side) = entrance {
                assert!(room.door_on(side).is_some());
            }
        }
    }

    #[test]
    fn difficulty_adds_spikes_to_the_stairs() {
        let easy = build(1, 0, None, 1);
        let hard = build(1, 1, None, 1);
        let spikes = |r: &Room| count(r, |o| matches!(o.kind, ObjectKind::Spike));
        assert_eq!(spikes(&easy) + 2, spikes(&hard));
        assert_eq!(count(&easy, |o| matches!(o.kind, ObjectKind::Crumble(_))), 0);
        assert_eq!(count(&hard, |o| matches!(o.kind, ObjectKind::Crumble(_))), 1);
    }

    #[test]
    fn key_vault_opens_a_door_at_difficulty_zero() {
        for seed in 0..20 {
            let room = build(3, 0, Some(Side::Left), seed);
            let open = room
                .doors()
                .filter(|(_, d)| d.state == DoorState::Open)
                .count();
            assert!((1..=2).contains(&open));
            let entrance = room.door_on(Side::Left).unwrap();
            assert_eq!(entrance.door().unwrap().state, DoorState::Closed);
            assert_eq!(count(&room, |o| o.key().is_some()), 1);
            assert_eq!(count(&room, |o| matches!(o.kind, ObjectKind::Crate(_))), 1);
        }
    }

    #[test]
    fn spike_pit_locks_left_and_bottom() {
        let room = build(6, 0, Some(Side::Top), 1);
        let state = |side| room.door_on(side).unwrap().door().unwrap().state;
        assert_eq!(state(Side::Left), DoorState::Locked);
        assert_eq!(state(Side::Bottom), DoorState::Locked);
        assert_eq!(state(Side::Right), DoorState::Open);
        assert_eq!(room.spawner, Spawner::Idle);
        assert_eq!(build(6, 2, Some(Side::Top), 1).spawner, Spawner::FallingArrows);
    }

    #[test]
    fn room_sizes() {
        assert_eq!(build(3, 0, None, 1).bounds.height(), 324.0);
        assert_eq!(build(4, 0, Some(Side::Top), 1).bounds.width(), 972.0);
        assert_eq!(build(5, 0, None, 1).bounds.width(), 324.0);
    }
}
