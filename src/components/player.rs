//! The player character.
//!
//! The player is not part of any room's object list. It owns the keys it has
//! picked up and carries the timers of the dash and attack powerups plus the
//! physics state used in platform rooms.

use raylib::prelude::Vector2;
use serde::{Deserialize, Serialize};

use super::animation::Animation;
use super::direction::Facing;
use super::gameobject::GameObject;
use super::gravity::GravityDir;
use super::hitbox::Hitbox;
use crate::resources::animationstore::{ATTACK_SHEET, AnimationStore, FPS, PLAYER_SHEET};
use crate::systems::collision::Mover;

/// Powerup color. Blue enables the dash, red the attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerColor {
    #[default]
    #[serde(rename = "def")]
    Base,
    Yellow,
    Blue,
    Red,
}

impl PowerColor {
    pub fn animation_state(self) -> &'static str {
        match self {
            PowerColor::Base => "def",
            PowerColor::Yellow => "yellow",
            PowerColor::Blue => "blue",
            PowerColor::Red => "red",
        }
    }

    pub fn death_state(self) -> &'static str {
        match self {
            PowerColor::Base => "def-death",
            PowerColor::Yellow => "yellow-death",
            PowerColor::Blue => "blue-death",
            PowerColor::Red => "red-death",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashState {
    /// Ticks of dash left.
    pub timer: u32,
    /// Input direction frozen at activation, each axis in -1..=1.
    pub direction: (i8, i8),
    /// Displacement applied this tick.
    pub vector: Vector2,
}

impl DashState {
    pub fn is_active(&self) -> bool {
        self.timer > 0
    }
}

impl Default for DashState {
    fn default() -> Self {
        Self {
            timer: 0,
            direction: (0, 0),
            vector: Vector2::zero(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttackState {
    pub active: bool,
    /// Direction frozen when the swing started.
    pub direction: Facing,
    /// Swing animation cursor.
    pub swing: Animation,
}

impl Default for AttackState {
    fn default() -> Self {
        Self {
            active: false,
            direction: Facing::Right,
            swing: Animation::new(ATTACK_SHEET),
        }
    }
}

/// Motion along the gravity axis in platform rooms.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlatformState {
    /// Signed velocity along the gravity axis.
    pub velocity: f32,
    pub jump_timer: u32,
    pub in_air: bool,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub hitbox: Hitbox,
    pub facing: Facing,
    pub animation: Animation,
    pub speed: f32,
    pub color: PowerColor,
    /// Held keys, oldest first. The last one is used first.
    pub keys: Vec<GameObject>,
    pub dash: DashState,
    pub dash_speed: f32,
    pub dash_duration: u32,
    pub attack: AttackState,
    pub attack_reach: f32,
    pub platform: PlatformState,
    /// Jump impulse spread over `jump_frames`.
    pub jump: f32,
    pub jump_frames: u32,
}

impl Player {
    pub fn new(store: &AnimationStore, center: Vector2, speed: f32) -> Self {
        let (w, h) = store.frame_size(PLAYER_SHEET);
        let mut hitbox = Hitbox::new(0.0, 0.0, w, h);
        hitbox.set_center(center);
        Self {
            hitbox,
            facing: Facing::Down,
            animation: Animation::new(PLAYER_SHEET),
            speed,
            color: PowerColor::Base,
            keys: Vec::new(),
            dash: DashState::default(),
            dash_speed: speed * 2.0,
            dash_duration: FPS / 3,
            attack: AttackState::default(),
            attack_reach: w / 2.0,
            platform: PlatformState {
                in_air: true,
                ..PlatformState::default()
            },
            jump: 3.5,
            jump_frames: FPS / 10,
        }
    }

    /// Change color, restarting the matching animation.
    pub fn set_color(&mut self, color: PowerColor) {
        self.color = color;
        self.animation.set_state(color.animation_state());
    }

    pub fn start_death_animation(&mut self) {
        self.animation.set_state(self.color.death_state());
    }

    /// Ticks the death animation of the current color lasts.
    pub fn death_ticks(&self, store: &AnimationStore) -> u32 {
        store.cycle_ticks(PLAYER_SHEET, self.color.death_state())
    }

    /// Prepare for a new room. Platform rooms start the player falling,
    /// facing the way gravity pulls.
    pub fn enter_room(&mut self, gravity: Option<GravityDir>) {
        self.platform = PlatformState {
            velocity: 0.0,
            jump_timer: 0,
            in_air: true,
        };
        self.facing = match gravity {
            Some(dir) => dir.facing(),
            None => Facing::Down,
        };
    }

    /// Back to the state of a fresh run: no keys, base color, no powerup in
    /// flight.
    pub fn reset_for_run(&mut self) {
        self.keys.clear();
        self.dash = DashState::default();
        self.attack.active = false;
        self.attack.swing.rewind();
        self.set_color(PowerColor::Base);
    }

    /// Attack box: the player's box pushed `attack_reach` along the frozen
    /// attack direction.
    pub fn attack_hitbox(&self) -> Hitbox {
        let (dx, dy) = self.attack.direction.axes();
        self.hitbox
            .shifted(dx as f32 * self.attack_reach, dy as f32 * self.attack_reach)
    }

    pub fn move_by(&mut self, delta: Vector2) {
        self.hitbox.translate(delta);
    }
}

impl Mover for Player {
    fn hitbox(&self) -> &Hitbox {
        &self.hitbox
    }

    fn hitbox_mut(&mut self) -> &mut Hitbox {
        &mut self.hitbox
    }

    fn key_ring(&mut self) -> Option<&mut Vec<GameObject>> {
        Some(&mut self.keys)
    }
}
