//! Game session: the active room, the player and the run bookkeeping.
//!
//! The session is the only owner of mutable game state. One call to
//! [`Session::tick`] advances the whole simulation by one frame, in a fixed
//! order:
//!
//! 1. death countdown (a finished countdown resets the run and ends the tick)
//! 2. animations
//! 3. unless paused: attack swing, room objects, key trailing, the movement
//!    controller of the room's mode, then the room's spawner
//! 4. room age
//! 5. the player's signal: death or a door transition
//!
//! Side effects meant for the outside world (sounds, music changes) are
//! queued as [`Cue`]s and drained by the shell.

use bevy_ecs::prelude::*;
use log::{debug, info, warn};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::components::direction::Side;
use crate::components::gameobject::IdAllocator;
use crate::components::hitbox::Hitbox;
use crate::components::key::trail_keys;
use crate::components::player::Player;
use crate::events::cue::{Cue, SoundCue};
use crate::resources::animationstore::AnimationStore;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputSnapshot;
use crate::resources::roomtable::RoomTable;
use crate::rooms::spawners::run_spawner;
use crate::rooms::{MovementMode, Room, RoomContext, RoomId, build_room};
use crate::systems::freeroam::update_free_roam;
use crate::systems::interaction::PlayerSignal;
use crate::systems::platform::update_platform;
use crate::systems::powerups::advance_swing;

/// Session parameters that do not change during play.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Logical render area; rooms are centered in it.
    pub area: Hitbox,
    pub move_speed: f32,
    pub max_music_tier: u32,
    /// Start every run in this room.
    pub forced_room: Option<RoomId>,
    pub seed: Option<u64>,
}

impl SessionSettings {
    pub fn from_config(config: &GameConfig) -> Self {
        let (w, h) = config.render_size();
        Self {
            area: Hitbox::new(0.0, 0.0, w, h),
            move_speed: config.move_speed,
            max_music_tier: config.max_music_tier,
            forced_room: None,
            seed: None,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&GameConfig::new())
    }
}

/// What room layouts and spawners borrow from the session.
struct RoomKit {
    table: RoomTable,
    store: AnimationStore,
    ids: IdAllocator,
    rng: fastrand::Rng,
    area: Hitbox,
    move_speed: f32,
}

impl RoomKit {
    fn ctx(&mut self) -> RoomContext<'_> {
        RoomContext {
            table: &self.table,
            store: &self.store,
            ids: &mut self.ids,
            rng: &mut self.rng,
            area: self.area,
            move_speed: self.move_speed,
        }
    }
}

#[derive(Resource)]
pub struct Session {
    pub room: Room,
    pub player: Player,
    kit: RoomKit,
    max_music_tier: u32,
    forced_room: Option<RoomId>,
    /// Rooms entered since the last reset, the current one included.
    rooms_loaded: FxHashSet<RoomId>,
    room_clears: FxHashMap<RoomId, u32>,
    room_deaths: FxHashMap<RoomId, u32>,
    deaths: u32,
    /// Rooms cleared in the current run.
    run_clears: u32,
    first_run: bool,
    cues: Vec<Cue>,
}

impl Session {
    /// Start a session with a fresh run. The first run does not count as a
    /// death.
    pub fn new(table: RoomTable, store: AnimationStore, settings: SessionSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let forced_room = settings.forced_room.filter(|id| {
            let known = table.contains(*id);
            if !known {
                warn!("Ignoring forced start room {}: not in the room table", id);
            }
            known
        });
        let player = Player::new(&store, settings.area.center(), settings.move_speed);
        let placeholder = Room::new(0, 0, settings.area, None, MovementMode::FreeRoam);
        let mut session = Self {
            room: placeholder,
            player,
            kit: RoomKit {
                table,
                store,
                ids: IdAllocator::default(),
                rng,
                area: settings.area,
                move_speed: settings.move_speed,
            },
            max_music_tier: settings.max_music_tier,
            forced_room,
            rooms_loaded: FxHashSet::default(),
            room_clears: FxHashMap::default(),
            room_deaths: FxHashMap::default(),
            deaths: 0,
            run_clears: 0,
            first_run: true,
            cues: Vec::new(),
        };
        session.start_run(Cue::PlayMusic(0));
        session
    }

    pub fn store(&self) -> &AnimationStore {
        &self.kit.store
    }

    pub fn table(&self) -> &RoomTable {
        &self.kit.table
    }

    pub fn area(&self) -> Hitbox {
        self.kit.area
    }

    pub fn rooms_loaded(&self) -> &FxHashSet<RoomId> {
        &self.rooms_loaded
    }

    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    pub fn run_clears(&self) -> u32 {
        self.run_clears
    }

    pub fn room_clears(&self, id: RoomId) -> u32 {
        self.room_clears.get(&id).copied().unwrap_or(0)
    }

    pub fn room_deaths(&self, id: RoomId) -> u32 {
        self.room_deaths.get(&id).copied().unwrap_or(0)
    }

    /// Take the cues queued since the last drain.
    pub fn drain_cues(&mut self) -> std::vec::Drain<'_, Cue> {
        self.cues.drain(..)
    }

    /// Advance the simulation by one frame.
    pub fn tick(&mut self, input: &InputSnapshot) {
        if let Some(left) = self.room.death_countdown {
            if left > 1 {
                self.room.death_countdown = Some(left - 1);
            } else {
                self.reset();
                return;
            }
        }

        let store = &self.kit.store;
        self.player.animation.advance(store);
        if !self.room.paused {
            self.room.advance_animations(store);
            for key in &mut self.player.keys {
                key.advance_animation(store);
            }
        }

        let mut signal = None;
        if !self.room.paused {
            advance_swing(&mut self.player, &self.kit.store);
            self.room.update_objects(&self.kit.area);
            let center = self.player.hitbox.center();
            trail_keys(&mut self.player.keys, center);
            signal = match self.room.mode {
                MovementMode::FreeRoam => {
                    update_free_roam(&mut self.player, input, &mut self.room, &mut self.cues)
                }
                MovementMode::Platform(gravity) => update_platform(
                    &mut self.player,
                    input,
                    &mut self.room,
                    gravity,
                    &mut self.cues,
                ),
            };
            run_spawner(&mut self.room, &mut self.kit.ctx(), &mut self.cues);
        }
        self.room.age += 1;

        match signal {
            Some(PlayerSignal::Died) => self.begin_death(),
            Some(PlayerSignal::EnteredDoor(exit)) => self.load_next_room(exit),
            None => {}
        }
    }

    /// Toggle the user pause. Ignored during a death sequence.
    pub fn toggle_pause(&mut self) {
        if self.room.in_death_sequence() {
            return;
        }
        self.room.paused = !self.room.paused;
        info!(
            "Game {}",
            if self.room.paused { "paused" } else { "resumed" }
        );
    }

    /// Freeze the room and play the death animation of the current color.
    pub fn begin_death(&mut self) {
        if self.room.in_death_sequence() {
            return;
        }
        self.room.paused = true;
        self.room.death_countdown = Some(self.player.death_ticks(&self.kit.store));
        self.player.start_death_animation();
        self.cues.push(Cue::Sound(SoundCue::Death));
        self.cues.push(Cue::PauseMusic);
        info!("Player died in room {}", self.room.id);
    }

    /// End the run: count a death against the current room and start over.
    pub fn reset(&mut self) {
        let after_death = self.room.in_death_sequence();
        self.deaths += 1;
        *self.room_deaths.entry(self.room.id).or_default() += 1;
        info!(
            "Reset after room {} ({} deaths so far)",
            self.room.id, self.deaths
        );
        let music = if after_death {
            Cue::PlayMusic(0)
        } else {
            Cue::QueueMusic(0)
        };
        self.start_run(music);
    }

    /// Leave the current room through its `exit` wall and enter a room not
    /// yet visited in this run. With none left the run is complete and the
    /// session resets.
    pub fn load_next_room(&mut self, exit: Side) {
        self.run_clears += 1;
        *self.room_clears.entry(self.room.id).or_default() += 1;

        let entrance = exit.opposite();
        let candidates = self.kit.table.candidates(entrance, &self.rooms_loaded);
        if candidates.is_empty() {
            info!("No rooms left to enter from {}, run complete", entrance);
            self.reset();
            return;
        }

        let id = candidates[self.kit.rng.usize(..candidates.len())];
        let difficulty = self.room_clears(id);
        let room = build_room(id, difficulty, Some(entrance), &mut self.kit.ctx());
        self.rooms_loaded.insert(id);
        self.cues.push(Cue::Sound(SoundCue::Lock));
        let tier = self.run_clears.min(self.max_music_tier);
        self.cues.push(Cue::QueueMusic(tier));

        let b = room.bounds;
        let hb = &mut self.player.hitbox;
        match exit {
            Side::Right => hb.set_left(b.left()),
            Side::Left => hb.set_right(b.right()),
            Side::Top => hb.set_bottom(b.bottom()),
            Side::Bottom => hb.set_top(b.top()),
        }
        self.player.enter_room(room.mode.gravity());
        debug!("Entered room {} through {}", id, entrance);
        self.room = room;
    }

    fn pick_start_room(&mut self) -> RoomId {
        if let Some(id) = self.forced_room {
            return id;
        }
        let table = &self.kit.table;
        let pool = if self.first_run {
            &table.first_start_rooms
        } else {
            &table.start_rooms
        };
        pool[self.kit.rng.usize(..pool.len())]
    }

    fn start_run(&mut self, music: Cue) {
        self.run_clears = 0;
        self.player.reset_for_run();

        let id = self.pick_start_room();
        self.first_run = false;
        let difficulty = self.room_clears(id);
        let room = build_room(id, difficulty, None, &mut self.kit.ctx());
        self.rooms_loaded.clear();
        self.rooms_loaded.insert(id);

        self.player.hitbox.set_center(room.bounds.center());
        self.player.enter_room(room.mode.gravity());
        self.room = room;
        self.cues.push(music);
        info!("Run started in room {}", id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(seed: u64, forced: Option<RoomId>) -> Session {
        let settings = SessionSettings {
            seed: Some(seed),
            forced_room: forced,
            ..SessionSettings::default()
        };
        Session::new(RoomTable::builtin(), AnimationStore::builtin(), settings)
    }

    #[test]
    fn first_run_starts_in_a_first_start_room() {
        for seed in 0..20 {
            let mut s = session(seed, None);
            assert!([1, 2].contains(&s.room.id));
            assert_eq!(s.deaths(), 0);
            assert_eq!(s.rooms_loaded().len(), 1);
            assert_eq!(s.drain_cues().collect::<Vec<_>>(), vec![Cue::PlayMusic(0)]);
        }
    }

    #[test]
    fn player_starts_in_the_room_center() {
        let s = session(3, Some(2));
        assert_eq!(s.player.hitbox.center(), s.room.bounds.center());
    }

    #[test]
    fn unknown_forced_room_is_ignored() {
        let s = session(3, Some(42));
        assert!([1, 2].contains(&s.room.id));
    }

    #[test]
    fn death_sequence_counts_down_then_resets() {
        let mut s = session(5, Some(2));
        s.drain_cues().for_each(drop);
        s.begin_death();
        assert!(s.room.paused);
        assert_eq!(s.room.death_countdown, Some(30));
        assert_eq!(
            s.drain_cues().collect::<Vec<_>>(),
            vec![Cue::Sound(SoundCue::Death), Cue::PauseMusic]
        );

        for _ in 0..29 {
            s.tick(&InputSnapshot::default());
            assert!(s.room.in_death_sequence());
        }
        s.tick(&InputSnapshot::default());
        assert!(!s.room.in_death_sequence());
        assert_eq!(s.deaths(), 1);
        assert_eq!(s.room_deaths(2), 1);
        assert_eq!(s.drain_cues().collect::<Vec<_>>(), vec![Cue::PlayMusic(0)]);
    }

    #[test]
    fn pause_is_ignored_while_dying() {
        let mut s = session(5, Some(2));
        s.toggle_pause();
        assert!(s.room.paused);
        s.toggle_pause();
        assert!(!s.room.paused);
        s.begin_death();
        s.toggle_pause();
        assert!(s.room.paused);
    }

    #[test]
    fn paused_room_still_ages_but_does_not_move() {
        let mut s = session(5, Some(2));
        s.toggle_pause();
        let pos = s.player.hitbox.pos;
        let input = InputSnapshot {
            right: true,
            ..InputSnapshot::default()
        };
        s.tick(&input);
        assert_eq!(s.room.age, 1);
        assert_eq!(s.player.hitbox.pos, pos);
    }

    #[test]
    fn transition_enters_on_the_opposite_wall() {
        let mut s = session(8, Some(2));
        s.drain_cues().for_each(drop);
        s.load_next_room(Side::Right);
        assert_eq!(s.room.entrance, Some(Side::Left));
        assert_eq!(s.player.hitbox.left(), s.room.bounds.left());
        assert_eq!(s.run_clears(), 1);
        assert_eq!(s.room_clears(2), 1);
        assert_eq!(s.rooms_loaded().len(), 2);
        assert_eq!(
            s.drain_cues().collect::<Vec<_>>(),
            vec![Cue::Sound(SoundCue::Lock), Cue::QueueMusic(1)]
        );
    }
}
