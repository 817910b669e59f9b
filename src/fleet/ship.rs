//! Ship instances
//!
//! A ship owns its hull points, shield and armor pools and its equipment
//! slots. Combat reads these and writes damage back; it never duplicates
//! them.

use serde::{Deserialize, Serialize};

use crate::core::types::ShipId;
use crate::fleet::component::{Component, ComponentKind, WeaponStats};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    pub name: String,
    /// Design (blueprint) name; statistics are tracked per design
    pub design: String,
    pub hull_points: u32,
    /// Current shield pool, regenerates one step per turn
    pub shield: u32,
    /// Current armor pool, never regenerates in combat
    pub armor: u32,
    pub base_initiative: i32,
    /// Orbital installations deploy in the starbase formation
    pub is_starbase: bool,
    pub components: Vec<Component>,
}

impl Ship {
    pub fn new(
        id: ShipId,
        name: impl Into<String>,
        design: impl Into<String>,
        hull_points: u32,
        components: Vec<Component>,
    ) -> Self {
        let mut ship = Self {
            id,
            name: name.into(),
            design: design.into(),
            hull_points,
            shield: 0,
            armor: 0,
            base_initiative: 0,
            is_starbase: false,
            components,
        };
        ship.shield = ship.max_shield();
        ship.armor = ship.total_armor();
        ship
    }

    pub fn with_initiative(mut self, initiative: i32) -> Self {
        self.base_initiative = initiative;
        self
    }

    pub fn as_starbase(mut self) -> Self {
        self.is_starbase = true;
        self
    }

    pub fn component(&self, slot: usize) -> Option<&Component> {
        self.components.get(slot)
    }

    fn working(&self) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(|c| c.is_working())
    }

    /// Cells this ship may move per turn (sum of working engines)
    pub fn tactical_speed(&self) -> u32 {
        self.working()
            .map(|c| match c.kind {
                ComponentKind::Engine { tactical_speed } => tactical_speed,
                _ => 0,
            })
            .sum()
    }

    /// Turn-order priority; higher acts first
    pub fn initiative(&self) -> i32 {
        self.base_initiative + self.targeting_bonus()
    }

    pub fn targeting_bonus(&self) -> i32 {
        self.working()
            .map(|c| match c.kind {
                ComponentKind::TargetingComputer { accuracy } => accuracy,
                _ => 0,
            })
            .sum()
    }

    pub fn jammer_defense(&self) -> i32 {
        self.working()
            .map(|c| match c.kind {
                ComponentKind::Jammer { defense } => defense,
                _ => 0,
            })
            .sum()
    }

    pub fn max_shield(&self) -> u32 {
        self.working()
            .map(|c| match c.kind {
                ComponentKind::ShieldGenerator { strength } => strength,
                _ => 0,
            })
            .sum()
    }

    fn total_armor(&self) -> u32 {
        self.components
            .iter()
            .map(|c| match c.kind {
                ComponentKind::ArmorPlate { value } => value,
                _ => 0,
            })
            .sum()
    }

    /// Raise shields by one step, up to what working generators sustain
    pub fn regenerate_shield(&mut self) {
        let max = self.max_shield();
        if self.shield < max {
            self.shield += 1;
        } else {
            // Generators may have been shot off; the pool cannot exceed them
            self.shield = max;
        }
    }

    /// Weapon stats for a slot only if the slot is a working weapon
    pub fn working_weapon(&self, slot: usize) -> Option<&WeaponStats> {
        self.component(slot)
            .filter(|c| c.is_working())
            .and_then(Component::weapon_stats)
    }

    pub fn working_weapon_count(&self) -> usize {
        self.working().filter(|c| c.is_weapon()).count()
    }

    /// Summed damage of working weapons; zero means non-combatant
    pub fn military_power(&self) -> u32 {
        self.working()
            .filter_map(Component::weapon_stats)
            .map(|w| w.damage)
            .sum()
    }

    pub fn has_military_power(&self) -> bool {
        self.military_power() > 0
    }

    pub fn is_destroyed(&self) -> bool {
        self.hull_points == 0
    }
}
