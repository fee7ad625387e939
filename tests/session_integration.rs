//! Session integration tests.
//!
//! These drive a [`Session`] frame by frame through whole scenarios: runs
//! that dead-end, keys spent on locked doors, crumbling floors and seeded
//! reproducibility.
//!
//! ```sh
//! cargo test --test session_integration
//! ```

use raylib::prelude::Vector2;

use rooms::components::direction::{Facing, Side};
use rooms::components::door::DoorState;
use rooms::components::gameobject::{GameObject, ObjectKind};
use rooms::components::gravity::{Gravity, GravityDir};
use rooms::components::hitbox::Hitbox;
use rooms::components::player::Player;
use rooms::events::cue::{Cue, SoundCue};
use rooms::resources::animationstore::AnimationStore;
use rooms::resources::input::InputSnapshot;
use rooms::resources::roomtable::{RoomSpec, RoomTable};
use rooms::resources::session::{Session, SessionSettings};
use rooms::rooms::{MovementMode, Room, RoomId};
use rooms::systems::platform::update_platform;

// =============================================================================
// Helpers
// =============================================================================

fn session_with(table: RoomTable, seed: u64, forced: Option<RoomId>) -> Session {
    let settings = SessionSettings {
        seed: Some(seed),
        forced_room: forced,
        ..SessionSettings::default()
    };
    Session::new(table, AnimationStore::builtin(), settings)
}

fn session(seed: u64, forced: Option<RoomId>) -> Session {
    session_with(RoomTable::builtin(), seed, forced)
}

fn toward(side: Side) -> InputSnapshot {
    let mut input = InputSnapshot::default();
    match side {
        Side::Left => input.left = true,
        Side::Right => input.right = true,
        Side::Top => input.up = true,
        Side::Bottom => input.down = true,
    }
    input
}

fn first_exit(s: &Session) -> Side {
    s.table().spec(s.room.id).exit[0]
}

// =============================================================================
// Room transitions
// =============================================================================

#[test]
fn dead_end_transition_resets_the_run() {
    let table = RoomTable {
        rooms: vec![RoomSpec::new(1, &[Side::Left, Side::Top], &[Side::Right])],
        first_start_rooms: vec![1],
        start_rooms: vec![1],
    };
    let mut s = session_with(table, 1, None);
    s.drain_cues().for_each(drop);

    s.load_next_room(Side::Right);

    assert_eq!(s.room.id, 1);
    assert_eq!(s.deaths(), 1);
    assert_eq!(s.room_deaths(1), 1);
    assert_eq!(s.room_clears(1), 1);
    assert_eq!(s.run_clears(), 0);
    assert_eq!(s.rooms_loaded().len(), 1);
    assert_eq!(s.drain_cues().collect::<Vec<_>>(), vec![Cue::QueueMusic(0)]);
}

#[test]
fn rooms_loaded_stays_bounded_and_shrinks_on_reset() {
    for seed in 0..10 {
        let mut s = session(seed, None);
        let rooms = s.table().len();
        for _ in 0..40 {
            let deaths = s.deaths();
            let exit = first_exit(&s);
            s.load_next_room(exit);
            assert!(s.rooms_loaded().len() <= rooms);
            assert!(s.rooms_loaded().contains(&s.room.id));
            if s.deaths() > deaths {
                assert_eq!(s.rooms_loaded().len(), 1);
            }
        }
    }
}

#[test]
fn music_tier_is_capped() {
    let mut s = session(4, Some(2));
    s.drain_cues().for_each(drop);
    let mut tiers = Vec::new();
    while s.deaths() == 0 {
        let exit = first_exit(&s);
        s.load_next_room(exit);
        tiers.extend(s.drain_cues().filter_map(|c| match c {
            Cue::QueueMusic(t) => Some(t),
            _ => None,
        }));
    }
    assert!(tiers.iter().all(|&t| t <= 2));
}

#[test]
fn seeded_sessions_are_reproducible() {
    let walk = |seed| {
        let mut s = session(seed, None);
        let mut visited = vec![s.room.id];
        for _ in 0..12 {
            let exit = first_exit(&s);
            s.load_next_room(exit);
            visited.push(s.room.id);
        }
        visited
    };
    assert_eq!(walk(99), walk(99));
}

// =============================================================================
// Keys and doors
// =============================================================================

#[test]
fn key_opens_a_locked_door_once() {
    let mut s = session(11, Some(3));
    s.drain_cues().for_each(drop);

    // the key sits at the room center, right under the player
    s.tick(&InputSnapshot::default());
    assert_eq!(s.player.keys.len(), 1);
    assert_eq!(s.drain_cues().collect::<Vec<_>>(), vec![Cue::Sound(SoundCue::Key)]);

    let (door_id, side, door_box) = s
        .room
        .doors()
        .find(|(_, d)| d.state == DoorState::Locked)
        .map(|(o, d)| (o.id, d.side, o.hitbox))
        .expect("the vault keeps at least two doors locked");

    let b = s.room.bounds;
    let hb = &mut s.player.hitbox;
    hb.set_center(door_box.center());
    match side {
        Side::Left => hb.set_left(b.left() + 1.0),
        Side::Right => hb.set_right(b.right() - 1.0),
        Side::Top => hb.set_top(b.top() + 1.0),
        Side::Bottom => hb.set_bottom(b.bottom() - 1.0),
    }

    let mut cues = Vec::new();
    for _ in 0..2 {
        s.tick(&toward(side));
        cues.extend(s.drain_cues());
    }

    let door = s.room.get(door_id).and_then(|o| o.door()).map(|d| d.state);
    assert_eq!(door, Some(DoorState::Open));
    assert!(s.player.keys.is_empty());
    assert!(s.room.objects.iter().all(|o| o.key().is_none()));
    let unlocks = cues
        .iter()
        .filter(|c| **c == Cue::Sound(SoundCue::Unlock))
        .count();
    assert_eq!(unlocks, 1);
    assert_eq!(s.room.id, 3);
}

// =============================================================================
// Crumbling floors
// =============================================================================

#[test]
fn crumble_platform_breaks_exactly_when_its_countdown_ends() {
    let store = AnimationStore::builtin();
    let area = Hitbox::new(0.0, 0.0, 1280.0, 720.0);
    let mut room = Room::new(
        1,
        1,
        Hitbox::new(0.0, 0.0, 640.0, 640.0),
        None,
        MovementMode::platform(GravityDir::Down),
    );
    room.objects.push(GameObject::crumble_platform(
        7,
        &store,
        200.0,
        300.0,
        256.0,
        32.0,
        Facing::Right,
    ));
    room.objects
        .push(GameObject::platform(8, 0.0, 600.0, 640.0, 40.0));

    let mut player = Player::new(&store, Vector2::new(320.0, 200.0), 5.0);
    player.enter_room(Some(GravityDir::Down));
    player.hitbox.set_bottom(300.0);
    let gravity = Gravity::new(GravityDir::Down);

    let countdown = |room: &Room| {
        room.get(7).map(|o| match &o.kind {
            ObjectKind::Crumble(c) => (c.crumbling, c.countdown),
            _ => unreachable!(),
        })
    };

    let tick = |room: &mut Room, player: &mut Player| {
        room.update_objects(&area);
        update_platform(player, &InputSnapshot::default(), room, gravity, &mut Vec::new());
    };

    tick(&mut room, &mut player);
    assert_eq!(countdown(&room), Some((true, 30)));

    // standing on it keeps touching it without restarting the countdown
    for t in 2..=30 {
        tick(&mut room, &mut player);
        assert_eq!(countdown(&room), Some((true, 31 - t)));
    }
    assert_eq!(countdown(&room), Some((true, 1)));

    tick(&mut room, &mut player);
    assert_eq!(countdown(&room), None);
    assert!(player.platform.in_air);
}
