//! Direction vocabulary shared by objects, doors and the player.
//!
//! - [`Side`] names a wall of a room (and therefore a door position).
//! - [`Facing`] is one of the eight symbolic directions a game object can face.
//! - [`Axis`] restricts which axes the collision resolver checks.

use serde::{Deserialize, Serialize};

/// A wall of a rectangular room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    /// The wall a player enters through after leaving through `self`.
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }

    /// Left and right walls are vertical; their doors keep the sheet's size.
    pub fn is_vertical_wall(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Top => "top",
            Side::Bottom => "bottom",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the eight symbolic facing directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Facing {
    /// Build a facing from axis signs (`-1`, `0` or `1` each). `None` for (0, 0).
    pub fn from_axes(dx: i8, dy: i8) -> Option<Facing> {
        match (dx.signum(), dy.signum()) {
            (0, -1) => Some(Facing::Up),
            (0, 1) => Some(Facing::Down),
            (-1, 0) => Some(Facing::Left),
            (1, 0) => Some(Facing::Right),
            (-1, -1) => Some(Facing::UpLeft),
            (1, -1) => Some(Facing::UpRight),
            (-1, 1) => Some(Facing::DownLeft),
            (1, 1) => Some(Facing::DownRight),
            _ => None,
        }
    }

    /// Axis signs of this facing, screen coordinates (y grows downward).
    pub fn axes(self) -> (i8, i8) {
        match self {
            Facing::Up => (0, -1),
            Facing::Down => (0, 1),
            Facing::Left => (-1, 0),
            Facing::Right => (1, 0),
            Facing::UpLeft => (-1, -1),
            Facing::UpRight => (1, -1),
            Facing::DownLeft => (-1, 1),
            Facing::DownRight => (1, 1),
        }
    }

    /// Facings pointing up or down rotate sprites by a quarter turn and swap
    /// the hitbox dimensions.
    pub fn is_vertical(self) -> bool {
        matches!(self, Facing::Up | Facing::Down)
    }
}

impl From<Side> for Facing {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => Facing::Left,
            Side::Right => Facing::Right,
            Side::Top => Facing::Up,
            Side::Bottom => Facing::Down,
        }
    }
}

/// Axis selection for the collision resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    Horizontal,
    Vertical,
    #[default]
    Both,
}

impl Axis {
    pub fn horizontal(self) -> bool {
        matches!(self, Axis::Horizontal | Axis::Both)
    }

    pub fn vertical(self) -> bool {
        matches!(self, Axis::Vertical | Axis::Both)
    }
}
