//! Per-frame keyboard input resource.
//!
//! Captures the keys the game reacts to in the [`InputState`] resource. The
//! simulation never reads it directly: the session system copies the held
//! movement and powerup keys into an [`InputSnapshot`] once per tick.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::gravity::GravityDir;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is held this frame.
    pub active: bool,
    /// Whether the key went down this frame.
    pub just_pressed: bool,
    /// Whether the key went up this frame.
    pub just_released: bool,

    pub key_binding: KeyboardKey,
}

impl BoolState {
    pub fn bound_to(key_binding: KeyboardKey) -> Self {
        Self {
            key_binding,
            ..Self::default()
        }
    }

    /// Record this frame's state of the key.
    pub fn update(&mut self, down: bool, pressed: bool, released: bool) {
        self.active = down;
        self.just_pressed = pressed;
        self.just_released = released;
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: KeyboardKey::KEY_NULL,
        }
    }
}

/// Keyboard state of the game's fixed key set: WASD to move, space for the
/// powerup, P to pause, F for fullscreen, escape to quit and F11 for the
/// debug overlay.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub up: BoolState,
    pub left: BoolState,
    pub down: BoolState,
    pub right: BoolState,
    pub powerup: BoolState,
    pub pause: BoolState,
    pub fullscreen_toggle: BoolState,
    pub quit: BoolState,
    pub mode_debug: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            up: BoolState::bound_to(KeyboardKey::KEY_W),
            left: BoolState::bound_to(KeyboardKey::KEY_A),
            down: BoolState::bound_to(KeyboardKey::KEY_S),
            right: BoolState::bound_to(KeyboardKey::KEY_D),
            powerup: BoolState::bound_to(KeyboardKey::KEY_SPACE),
            pause: BoolState::bound_to(KeyboardKey::KEY_P),
            fullscreen_toggle: BoolState::bound_to(KeyboardKey::KEY_F),
            quit: BoolState::bound_to(KeyboardKey::KEY_ESCAPE),
            mode_debug: BoolState::bound_to(KeyboardKey::KEY_F11),
        }
    }
}

impl InputState {
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            up: self.up.active,
            down: self.down.active,
            left: self.left.active,
            right: self.right.active,
            powerup: self.powerup.active,
        }
    }
}

/// Held keys as seen by the simulation for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub powerup: bool,
}

impl InputSnapshot {
    /// Direction signs, `(right - left, down - up)`.
    pub fn axes(&self) -> (i8, i8) {
        (
            self.right as i8 - self.left as i8,
            self.down as i8 - self.up as i8,
        )
    }

    pub fn has_direction(&self) -> bool {
        self.axes() != (0, 0)
    }

    /// The key that jumps away from the floor under `gravity`.
    pub fn jump_held(&self, gravity: GravityDir) -> bool {
        match gravity {
            GravityDir::Down => self.up,
            GravityDir::Up => self.down,
            GravityDir::Left => self.right,
            GravityDir::Right => self.left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolstate_default() {
        let bs = BoolState::default();
        assert!(!bs.active);
        assert!(!bs.just_pressed);
        assert!(!bs.just_released);
        assert_eq!(bs.key_binding, KeyboardKey::KEY_NULL);
    }

    #[test]
    fn test_inputstate_default_key_bindings() {
        let input = InputState::default();
        assert_eq!(input.up.key_binding, KeyboardKey::KEY_W);
        assert_eq!(input.left.key_binding, KeyboardKey::KEY_A);
        assert_eq!(input.down.key_binding, KeyboardKey::KEY_S);
        assert_eq!(input.right.key_binding, KeyboardKey::KEY_D);
        assert_eq!(input.powerup.key_binding, KeyboardKey::KEY_SPACE);
        assert_eq!(input.pause.key_binding, KeyboardKey::KEY_P);
        assert_eq!(input.fullscreen_toggle.key_binding, KeyboardKey::KEY_F);
        assert_eq!(input.quit.key_binding, KeyboardKey::KEY_ESCAPE);
        assert_eq!(input.mode_debug.key_binding, KeyboardKey::KEY_F11);
    }

    #[test]
    fn test_snapshot_copies_held_keys() {
        let mut input = InputState::default();
        input.left.update(true, true, false);
        input.powerup.update(true, false, false);
        let snap = input.snapshot();
        assert_eq!(snap.axes(), (-1, 0));
        assert!(snap.powerup);
        assert!(snap.has_direction());
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let snap = InputSnapshot {
            up: true,
            down: true,
            ..InputSnapshot::default()
        };
        assert_eq!(snap.axes(), (0, 0));
        assert!(!snap.has_direction());
    }

    #[test]
    fn test_jump_key_points_away_from_gravity() {
        let snap = InputSnapshot {
            right: true,
            ..InputSnapshot::default()
        };
        assert!(snap.jump_held(GravityDir::Left));
        assert!(!snap.jump_held(GravityDir::Down));
    }
}
