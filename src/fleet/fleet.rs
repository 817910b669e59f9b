//! Fleets and per-player fleet lists

use serde::{Deserialize, Serialize};

use crate::core::types::{FleetId, SectorCoord, ShipId};
use crate::fleet::ship::Ship;

/// Standing order a fleet was following when combat started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FleetPosture {
    #[default]
    Move,
    Patrol,
    /// Holding position; grants the defensive accuracy bonus in combat
    Defend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fleet {
    pub id: FleetId,
    pub name: String,
    pub coordinate: SectorCoord,
    pub posture: FleetPosture,
    pub ships: Vec<Ship>,
}

impl Fleet {
    pub fn new(id: FleetId, name: impl Into<String>, coordinate: SectorCoord) -> Self {
        Self {
            id,
            name: name.into(),
            coordinate,
            posture: FleetPosture::default(),
            ships: Vec::new(),
        }
    }

    pub fn with_posture(mut self, posture: FleetPosture) -> Self {
        self.posture = posture;
        self
    }

    pub fn with_ship(mut self, ship: Ship) -> Self {
        self.ships.push(ship);
        self
    }

    pub fn is_defending(&self) -> bool {
        self.posture == FleetPosture::Defend
    }

    /// A fleet made only of orbital installations
    pub fn is_starbase_fleet(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(|s| s.is_starbase)
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id == id)
    }

    pub fn ship_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.iter_mut().find(|s| s.id == id)
    }

    /// Remove a ship from the fleet, preserving the order of the rest
    pub fn remove_ship(&mut self, id: ShipId) -> Option<Ship> {
        let index = self.ships.iter().position(|s| s.id == id)?;
        Some(self.ships.remove(index))
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }
}

/// Ordered list of a player's fleets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetList {
    fleets: Vec<Fleet>,
}

impl FleetList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fleet: Fleet) {
        self.fleets.push(fleet);
    }

    pub fn get(&self, id: FleetId) -> Option<&Fleet> {
        self.fleets.iter().find(|f| f.id == id)
    }

    pub fn get_mut(&mut self, id: FleetId) -> Option<&mut Fleet> {
        self.fleets.iter_mut().find(|f| f.id == id)
    }

    pub fn index_of(&self, id: FleetId) -> Option<usize> {
        self.fleets.iter().position(|f| f.id == id)
    }

    pub fn remove(&mut self, id: FleetId) -> Option<Fleet> {
        let index = self.index_of(id)?;
        Some(self.fleets.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fleet> {
        self.fleets.iter()
    }

    pub fn len(&self) -> usize {
        self.fleets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fleets.is_empty()
    }
}
