//! Animation table registry.
//!
//! Every animated entity refers to a sprite sheet by logical name. A sheet has
//! one canonical frame size and a set of named states; each state selects a row
//! of the sheet, a frame count and the number of ticks one full cycle takes.
//!
//! Lookups of unknown sheets or states are programmer errors and panic with the
//! offending name.

use raylib::prelude::Rectangle;
use rustc_hash::FxHashMap;

/// Simulation rate. All timers in the game are counted in ticks at this rate.
pub const FPS: u32 = 60;

/// Pixels between neighbouring frames on a sheet.
pub const SPRITESHEET_SPACING: f32 = 4.0;

pub const PLAYER_SHEET: &str = "player-sheet";
pub const DOOR_SHEET: &str = "door-sheet";
pub const KEY_SHEET: &str = "key-sheet";
pub const CRUMBLE_SHEET: &str = "crumble_platform-sheet";
pub const POWERUP_SHEET: &str = "powerup-sheet";
pub const CRATE_SHEET: &str = "crate-sheet";
pub const ATTACK_SHEET: &str = "attack-sheet";

/// One named animation on a sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    /// Row of the sheet holding the frames.
    pub row: usize,
    /// Number of frames in the row.
    pub frame_count: usize,
    /// Ticks for one full cycle through all frames. Zero for static images.
    pub cycle: f32,
}

impl AnimationState {
    pub const fn new(row: usize, frame_count: usize, cycle: f32) -> Self {
        Self {
            row,
            frame_count,
            cycle,
        }
    }

    /// How much of a frame elapses per tick.
    pub fn step(&self) -> f32 {
        if self.cycle > 0.0 {
            self.frame_count as f32 / self.cycle
        } else {
            0.0
        }
    }
}

/// A sprite sheet with canonical (unrotated) frame dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSheet {
    pub frame_width: f32,
    pub frame_height: f32,
    pub states: FxHashMap<&'static str, AnimationState>,
}

impl SpriteSheet {
    pub fn new(frame_width: f32, frame_height: f32) -> Self {
        Self {
            frame_width,
            frame_height,
            states: FxHashMap::default(),
        }
    }

    pub fn with_state(mut self, name: &'static str, state: AnimationState) -> Self {
        self.states.insert(name, state);
        self
    }
}

/// Central registry of sprite sheets keyed by logical name.
#[derive(Debug, Clone)]
pub struct AnimationStore {
    pub sheets: FxHashMap<&'static str, SpriteSheet>,
}

impl Default for AnimationStore {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AnimationStore {
    pub fn empty() -> Self {
        Self {
            sheets: FxHashMap::default(),
        }
    }

    /// The game's sheet table.
    pub fn builtin() -> Self {
        let fps = FPS as f32;
        let mut store = Self::empty();
        store.insert(
            PLAYER_SHEET,
            SpriteSheet::new(32.0, 32.0)
                .with_state("def", AnimationState::new(0, 5, fps))
                .with_state("def-death", AnimationState::new(1, 5, fps / 2.0))
                .with_state("yellow", AnimationState::new(2, 5, fps))
                .with_state("yellow-death", AnimationState::new(3, 5, fps / 2.0))
                .with_state("blue", AnimationState::new(4, 5, fps))
                .with_state("blue-death", AnimationState::new(5, 5, fps / 2.0))
                .with_state("red", AnimationState::new(6, 5, fps))
                .with_state("red-death", AnimationState::new(7, 5, fps / 2.0)),
        );
        store.insert(
            DOOR_SHEET,
            SpriteSheet::new(128.0, 96.0)
                .with_state("locked", AnimationState::new(0, 1, 0.0))
                .with_state("def", AnimationState::new(1, 1, 0.0))
                .with_state("open", AnimationState::new(2, 1, 0.0)),
        );
        store.insert(
            KEY_SHEET,
            SpriteSheet::new(40.0, 24.0).with_state("def", AnimationState::new(0, 4, fps)),
        );
        store.insert(
            CRUMBLE_SHEET,
            SpriteSheet::new(128.0, 128.0)
                .with_state("def", AnimationState::new(0, 1, 0.0))
                .with_state("crumble", AnimationState::new(0, 4, fps / 2.0)),
        );
        store.insert(
            POWERUP_SHEET,
            SpriteSheet::new(24.0, 24.0)
                .with_state("def", AnimationState::new(0, 4, fps))
                .with_state("blue", AnimationState::new(1, 4, fps))
                .with_state("red", AnimationState::new(2, 4, fps)),
        );
        store.insert(
            CRATE_SHEET,
            SpriteSheet::new(48.0, 48.0).with_state("def", AnimationState::new(0, 1, 0.0)),
        );
        store.insert(
            ATTACK_SHEET,
            SpriteSheet::new(32.0, 32.0).with_state("def", AnimationState::new(0, 4, fps / 15.0)),
        );
        store
    }

    pub fn insert(&mut self, name: &'static str, sheet: SpriteSheet) {
        self.sheets.insert(name, sheet);
    }

    pub fn sheet(&self, name: &str) -> &SpriteSheet {
        self.sheets
            .get(name)
            .unwrap_or_else(|| panic!("unknown sprite sheet '{name}'"))
    }

    pub fn state(&self, sheet: &str, state: &str) -> &AnimationState {
        self.sheet(sheet)
            .states
            .get(state)
            .unwrap_or_else(|| panic!("sprite sheet '{sheet}' has no animation state '{state}'"))
    }

    pub fn has_state(&self, sheet: &str, state: &str) -> bool {
        self.sheets
            .get(sheet)
            .is_some_and(|s| s.states.contains_key(state))
    }

    /// Canonical frame size of a sheet.
    pub fn frame_size(&self, sheet: &str) -> (f32, f32) {
        let s = self.sheet(sheet);
        (s.frame_width, s.frame_height)
    }

    /// Source rectangle of `frame` in `state`, always in unrotated sheet space.
    pub fn frame_region(&self, sheet: &str, state: &str, frame: usize) -> Rectangle {
        let s = self.sheet(sheet);
        let st = self.state(sheet, state);
        Rectangle {
            x: frame as f32 * (s.frame_width + SPRITESHEET_SPACING),
            y: st.row as f32 * (s.frame_height + SPRITESHEET_SPACING),
            width: s.frame_width,
            height: s.frame_height,
        }
    }

    /// Ticks one full cycle of `state` takes, rounded down.
    pub fn cycle_ticks(&self, sheet: &str, state: &str) -> u32 {
        self.state(sheet, state).cycle as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_sheet_has_a_def_state() {
        let store = AnimationStore::builtin();
        for name in store.sheets.keys() {
            assert!(store.has_state(name, "def"), "sheet {name} lacks a def state");
        }
    }

    #[test]
    fn frame_region_uses_spacing_and_row() {
        let store = AnimationStore::builtin();
        let r = store.frame_region(PLAYER_SHEET, "blue", 2);
        assert_eq!(r.x, 2.0 * 36.0);
        assert_eq!(r.y, 4.0 * 36.0);
        assert_eq!(r.width, 32.0);
        assert_eq!(r.height, 32.0);
    }

    #[test]
    fn death_cycle_is_half_a_second() {
        let store = AnimationStore::builtin();
        assert_eq!(store.cycle_ticks(PLAYER_SHEET, "red-death"), FPS / 2);
        assert_eq!(store.cycle_ticks(CRUMBLE_SHEET, "crumble"), FPS / 2);
    }

    #[test]
    #[should_panic(expected = "no animation state 'sparkle'")]
    fn unknown_state_panics() {
        let store = AnimationStore::builtin();
        store.state(KEY_SHEET, "sparkle");
    }
}
