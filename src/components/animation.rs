use raylib::prelude::Rectangle;

use crate::resources::animationstore::AnimationStore;

/// Frame cursor of an animated entity.
///
/// `frame_time` counts down from 1 towards the next frame change. Each tick it
/// is reduced by `frame_count / cycle`, so a state with a cycle of 60 ticks and
/// 5 frames changes frame every 12 ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub sheet: &'static str,
    pub state: &'static str,
    pub frame: usize,
    pub frame_time: f32,
}

impl Animation {
    /// Cursor on `sheet` in its `def` state.
    pub fn new(sheet: &'static str) -> Self {
        Self::with_state(sheet, "def")
    }

    pub fn with_state(sheet: &'static str, state: &'static str) -> Self {
        Self {
            sheet,
            state,
            frame: 0,
            frame_time: 1.0,
        }
    }

    /// Switch to `state`, rewinding the cursor. Switching to the current state
    /// rewinds as well.
    pub fn set_state(&mut self, state: &'static str) {
        self.state = state;
        self.rewind();
    }

    pub fn rewind(&mut self) {
        self.frame = 0;
        self.frame_time = 1.0;
    }

    /// Advance one tick. Returns `true` when the frame index wrapped back to 0.
    ///
    /// Panics if the cursor's state is not in the sheet's table.
    pub fn advance(&mut self, store: &AnimationStore) -> bool {
        let state = store.state(self.sheet, self.state);
        if state.frame_count <= 1 {
            return false;
        }
        let mut wrapped = false;
        if self.frame_time <= 0.0 {
            self.frame_time = 1.0;
            self.frame += 1;
            if self.frame >= state.frame_count {
                self.frame = 0;
                wrapped = true;
            }
        }
        self.frame_time -= state.step();
        wrapped
    }

    /// Sheet region of the current frame.
    pub fn source(&self, store: &AnimationStore) -> Rectangle {
        store.frame_region(self.sheet, self.state, self.frame)
    }
}
