//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for players (empires)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Unique identifier for fleets within a player's fleet list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FleetId(pub u32);

impl FleetId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Unique identifier for ships within a fleet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShipId(pub u32);

impl ShipId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Position of a fleet on the galaxy (strategic) map.
///
/// Not to be confused with `GridCoord`, which addresses a cell on the
/// tactical combat board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SectorCoord {
    pub x: i32,
    pub y: i32,
}

impl SectorCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}
