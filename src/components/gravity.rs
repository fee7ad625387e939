use serde::{Deserialize, Serialize};

use super::direction::{Facing, Side};

/// Direction gravity pulls in a platform room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GravityDir {
    #[default]
    Down,
    Up,
    Left,
    Right,
}

impl GravityDir {
    /// Gravity along the y axis.
    pub fn is_vertical(self) -> bool {
        matches!(self, GravityDir::Down | GravityDir::Up)
    }

    /// +1 when gravity points toward growing coordinates.
    pub fn sign(self) -> f32 {
        match self {
            GravityDir::Down | GravityDir::Right => 1.0,
            GravityDir::Up | GravityDir::Left => -1.0,
        }
    }

    /// Side of the mover that rests on the ground.
    pub fn ground_side(self) -> Side {
        match self {
            GravityDir::Down => Side::Bottom,
            GravityDir::Up => Side::Top,
            GravityDir::Left => Side::Left,
            GravityDir::Right => Side::Right,
        }
    }

    pub fn facing(self) -> Facing {
        match self {
            GravityDir::Down => Facing::Down,
            GravityDir::Up => Facing::Up,
            GravityDir::Left => Facing::Left,
            GravityDir::Right => Facing::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    pub dir: GravityDir,
    /// Velocity gained per tick.
    pub accel: f32,
    /// Largest speed along the gravity axis.
    pub terminal: f32,
}

impl Gravity {
    pub const ACCEL: f32 = 0.5;
    pub const TERMINAL: f32 = 30.0;

    pub fn new(dir: GravityDir) -> Self {
        Self {
            dir,
            accel: Self::ACCEL,
            terminal: Self::TERMINAL,
        }
    }

    /// One tick of acceleration, clamped to terminal velocity.
    pub fn accelerate(&self, velocity: f32) -> f32 {
        (velocity + self.accel * self.dir.sign()).clamp(-self.terminal, self.terminal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_is_capped_at_terminal_both_ways() {
        let down = Gravity::new(GravityDir::Down);
        assert_eq!(down.accelerate(29.8), 30.0);
        assert_eq!(down.accelerate(0.0), 0.5);
        let up = Gravity::new(GravityDir::Up);
        assert_eq!(up.accelerate(-29.8), -30.0);
        assert_eq!(up.accelerate(0.0), -0.5);
    }

    #[test]
    fn ground_is_the_side_gravity_points_at() {
        assert_eq!(GravityDir::Down.ground_side(), Side::Bottom);
        assert_eq!(GravityDir::Left.ground_side(), Side::Left);
        assert_eq!(GravityDir::Up.ground_side().opposite(), Side::Bottom);
    }
}
