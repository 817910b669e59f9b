//! Per-ship combat state
//!
//! Wraps a ship by id with everything that only exists for the length of a
//! combat: board position, moves and shots left this turn, and which slots
//! already fired. Hull, shields and equipment stay on the `Ship`.

use serde::{Deserialize, Serialize};

use crate::combat::grid::GridCoord;
use crate::core::types::{PlayerId, ShipId};
use crate::fleet::ship::Ship;

/// Which fleet a combat ship came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Attacker,
    Defender,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }
}

/// Stable identity of a ship on the roster; survives reordering and removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatShipKey {
    pub side: Side,
    pub ship: ShipId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatShip {
    key: CombatShipKey,
    pub owner: PlayerId,
    pub position: GridCoord,
    pub moves_left: u32,
    /// One flag per equipment slot; set when the slot fires this turn
    used_components: Vec<bool>,
    pub ai_shots_left: u32,
    /// Flat accuracy bonus for fleets that were holding position
    pub bonus_accuracy: i32,
    /// Presentation only: defender sprites face the other way
    pub flipped: bool,
    /// Captured at deployment; decides roster order for the whole combat
    initiative: i32,
}

impl CombatShip {
    pub fn new(
        ship: &Ship,
        side: Side,
        owner: PlayerId,
        position: GridCoord,
        bonus_accuracy: i32,
    ) -> Self {
        let mut combat_ship = Self {
            key: CombatShipKey {
                side,
                ship: ship.id,
            },
            owner,
            position,
            moves_left: 0,
            used_components: Vec::new(),
            ai_shots_left: 0,
            bonus_accuracy,
            flipped: side == Side::Defender,
            initiative: ship.initiative(),
        };
        combat_ship.reset_turn_state(ship);
        combat_ship
    }

    pub fn key(&self) -> CombatShipKey {
        self.key
    }

    pub fn side(&self) -> Side {
        self.key.side
    }

    pub fn ship_id(&self) -> ShipId {
        self.key.ship
    }

    pub fn initiative(&self) -> i32 {
        self.initiative
    }

    /// Refill moves and shots and clear every slot flag
    pub fn reset_turn_state(&mut self, ship: &Ship) {
        self.moves_left = ship.tactical_speed();
        self.used_components = vec![false; ship.components.len()];
        self.ai_shots_left = ship.working_weapon_count() as u32;
    }

    /// Prepare for this ship's turn: shields regenerate one step, then the
    /// turn state is refreshed from the (possibly damaged) ship.
    pub fn begin_turn(&mut self, ship: &mut Ship) {
        ship.regenerate_shield();
        self.reset_turn_state(ship);
    }

    /// Slots past the end of the ship count as used
    pub fn is_component_used(&self, slot: usize) -> bool {
        self.used_components.get(slot).copied().unwrap_or(true)
    }

    pub fn mark_component_used(&mut self, slot: usize) {
        if let Some(flag) = self.used_components.get_mut(slot) {
            *flag = true;
        }
        self.ai_shots_left = self.ai_shots_left.saturating_sub(1);
    }

    /// Spend one move, returning false if none were left
    pub fn consume_move(&mut self) -> bool {
        if self.moves_left == 0 {
            return false;
        }
        self.moves_left -= 1;
        true
    }
}
