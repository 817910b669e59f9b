//! Player (empire) records touched by combat

use serde::{Deserialize, Serialize};

use crate::core::types::PlayerId;
use crate::fleet::fleet::{Fleet, FleetList};
use crate::fleet::statistics::ShipStatistics;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub fleets: FleetList,
    pub statistics: ShipStatistics,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            fleets: FleetList::new(),
            statistics: ShipStatistics::new(),
        }
    }

    /// Add a fleet and count its ships as active in the service records
    pub fn commission(&mut self, fleet: Fleet) {
        for ship in &fleet.ships {
            self.statistics.add_active(&ship.design);
        }
        self.fleets.push(fleet);
    }
}
