//! Wall-clock and frame counters.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct WorldTime {
    /// Seconds since start.
    pub elapsed: f32,
    /// Duration of the last frame in seconds.
    pub delta: f32,
    /// Frames run so far. The simulation advances exactly one tick per frame.
    pub frames: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            frames: 0,
        }
    }
}

impl WorldTime {
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
        self.delta = dt;
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates() {
        let mut t = WorldTime::default();
        t.advance(0.5);
        t.advance(0.25);
        assert_eq!(t.elapsed, 0.75);
        assert_eq!(t.delta, 0.25);
        assert_eq!(t.frames, 2);
    }
}
