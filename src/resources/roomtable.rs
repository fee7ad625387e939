//! Room configuration table.
//!
//! Maps each room id to the walls it can be entered through and the walls it
//! has exit doors on, plus the two sets starting rooms are drawn from. The
//! table is read-only once the session starts.
//!
//! ```json
//! {
//!   "rooms": [ { "id": 1, "enter": ["left", "top"], "exit": ["right"] } ],
//!   "first_start_rooms": [1],
//!   "start_rooms": [1]
//! }
//! ```

use arrayvec::ArrayVec;
use log::info;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::direction::Side;
use crate::rooms::RoomId;
use crate::rooms::layouts::has_layout;

/// Doors and entrances of one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub id: RoomId,
    pub enter: ArrayVec<Side, 4>,
    pub exit: ArrayVec<Side, 4>,
}

impl RoomSpec {
    pub fn new(id: RoomId, enter: &[Side], exit: &[Side]) -> Self {
        Self {
            id,
            enter: enter.iter().copied().collect(),
            exit: exit.iter().copied().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTable {
    pub rooms: Vec<RoomSpec>,
    /// Starting rooms of the very first run.
    pub first_start_rooms: Vec<RoomId>,
    /// Starting rooms of every later run.
    pub start_rooms: Vec<RoomId>,
}

impl Default for RoomTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RoomTable {
    pub fn builtin() -> Self {
        use Side::*;
        let all = [Left, Right, Top, Bottom];
        Self {
            rooms: vec![
                RoomSpec::new(1, &[Left, Top], &[Right]),
                RoomSpec::new(2, &all, &all),
                RoomSpec::new(3, &all, &all),
                RoomSpec::new(4, &[Top], &[Bottom]),
                RoomSpec::new(5, &all, &all),
                RoomSpec::new(6, &[Left, Bottom, Top], &[Left, Right, Bottom]),
            ],
            first_start_rooms: vec![1, 2],
            start_rooms: vec![1, 2, 3],
        }
    }

    pub fn from_json(text: &str) -> Result<Self, String> {
        let table: RoomTable =
            serde_json::from_str(text).map_err(|e| format!("Invalid room table: {}", e))?;
        table.validate()?;
        Ok(table)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read room table {:?}: {}", path, e))?;
        let table = Self::from_json(&text)?;
        info!("Loaded {} rooms from {:?}", table.rooms.len(), path);
        Ok(table)
    }

    /// Every id unique and buildable, every starting room configured.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = FxHashSet::default();
        for spec in &self.rooms {
            if !seen.insert(spec.id) {
                return Err(format!("Room {} is configured twice", spec.id));
            }
            if !has_layout(spec.id) {
                return Err(format!("Room {} has no layout", spec.id));
            }
        }
        if self.first_start_rooms.is_empty() || self.start_rooms.is_empty() {
            return Err("Starting room sets must not be empty".to_string());
        }
        for id in self.first_start_rooms.iter().chain(&self.start_rooms) {
            if !seen.contains(id) {
                return Err(format!("Starting room {} is not configured", id));
            }
        }
        Ok(())
    }

    /// Configuration of `id`. Asking for an unconfigured room is a bug.
    pub fn spec(&self, id: RoomId) -> &RoomSpec {
        self.rooms
            .iter()
            .find(|r| r.id == id)
            .unwrap_or_else(|| panic!("room {id} is not in the room table"))
    }

    pub fn contains(&self, id: RoomId) -> bool {
        self.rooms.iter().any(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Rooms enterable through `entrance` that are not in `visited`, in table
    /// order.
    pub fn candidates(&self, entrance: Side, visited: &FxHashSet<RoomId>) -> Vec<RoomId> {
        self.rooms
            .iter()
            .filter(|r| r.enter.contains(&entrance) && !visited.contains(&r.id))
            .map(|r| r.id)
            .collect()
    }
}
