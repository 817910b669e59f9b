//! Combat event log for presentation and replay
//!
//! Animation, sound and replay viewers consume these. Combat logic never
//! reads them back.

use serde::{Deserialize, Serialize};

use crate::combat::combat_ship::CombatShipKey;
use crate::combat::damage::DamageSeverity;
use crate::combat::grid::GridCoord;
use crate::core::types::PlayerId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatEvent {
    pub round: u32,
    pub kind: CombatEventKind,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEventKind {
    CombatStarted { ships: usize },
    TurnStarted {
        ship: CombatShipKey,
    },
    ShipMoved {
        ship: CombatShipKey,
        from: GridCoord,
        to: GridCoord,
    },
    WeaponFired {
        shooter: CombatShipKey,
        slot: usize,
        target: CombatShipKey,
        severity: DamageSeverity,
    },
    ShipDestroyed {
        ship: CombatShipKey,
        by: CombatShipKey,
    },
    RoundEnded,
    CombatEnded { winner: Option<PlayerId> },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatLog {
    pub events: Vec<CombatEvent>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, round: u32, kind: CombatEventKind, description: String) {
        self.events.push(CombatEvent {
            round,
            kind,
            description,
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events appended after the first `seen`, for incremental consumers
    pub fn since(&self, seen: usize) -> &[CombatEvent] {
        self.events.get(seen..).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_since_returns_tail() {
        let mut log = CombatLog::new();
        log.push(0, CombatEventKind::CombatStarted { ships: 2 }, "start".into());
        log.push(1, CombatEventKind::RoundEnded, "round".into());
        assert_eq!(log.since(1).len(), 1);
        assert!(log.since(5).is_empty());
    }

    #[test]
    fn test_events_serialize_to_json() {
        let mut log = CombatLog::new();
        log.push(
            3,
            CombatEventKind::CombatEnded { winner: Some(PlayerId(2)) },
            "over".into(),
        );
        let json = serde_json::to_string(&log).expect("serializable");
        assert!(json.contains("CombatEnded"));
    }
}
