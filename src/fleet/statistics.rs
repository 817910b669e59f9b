//! Per-design service record kept by each player

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Counters for one ship design
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignRecord {
    /// Ships of this design that entered a combat (one per ship per combat)
    pub combats: u32,
    pub kills: u32,
    pub losses: u32,
    /// Ships of this design currently in service
    pub active: u32,
    /// Surviving ships credited with a won combat
    pub victories: u32,
}

/// Service records keyed by design name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipStatistics {
    records: AHashMap<String, DesignRecord>,
}

impl ShipStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, design: &str) -> DesignRecord {
        self.records.get(design).copied().unwrap_or_default()
    }

    fn entry(&mut self, design: &str) -> &mut DesignRecord {
        self.records.entry(design.to_string()).or_default()
    }

    pub fn add_active(&mut self, design: &str) {
        self.entry(design).active += 1;
    }

    pub fn add_combat(&mut self, design: &str) {
        self.entry(design).combats += 1;
    }

    pub fn add_kill(&mut self, design: &str) {
        self.entry(design).kills += 1;
    }

    /// Record a destroyed ship: one more loss, one fewer in service
    pub fn add_loss(&mut self, design: &str) {
        let record = self.entry(design);
        record.losses += 1;
        record.active = record.active.saturating_sub(1);
    }

    pub fn add_victory(&mut self, design: &str) {
        self.entry(design).victories += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_design_is_zeroed() {
        let stats = ShipStatistics::new();
        assert_eq!(stats.record("Cruiser"), DesignRecord::default());
    }

    #[test]
    fn test_loss_decrements_active() {
        let mut stats = ShipStatistics::new();
        stats.add_active("Cruiser");
        stats.add_active("Cruiser");
        stats.add_loss("Cruiser");
        let record = stats.record("Cruiser");
        assert_eq!(record.losses, 1);
        assert_eq!(record.active, 1);
    }

    #[test]
    fn test_loss_never_underflows_active() {
        let mut stats = ShipStatistics::new();
        stats.add_loss("Scout");
        assert_eq!(stats.record("Scout").active, 0);
    }
}
