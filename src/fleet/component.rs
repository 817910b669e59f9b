//! Ship equipment slots
//!
//! Statistical definitions are data only; the combat core reads range,
//! accuracy and damage off `WeaponStats` and nothing else.

use serde::{Deserialize, Serialize};

/// Delivery mechanism of a weapon, which decides how shields apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Stopped by shields first, then armor
    Beam,
    /// Kinetic slug, ignores shields entirely
    Railgun,
    /// Warhead; shields only count for half
    Missile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub kind: WeaponKind,
    pub damage: u32,
    /// Maximum Chebyshev distance on the combat grid
    pub range: u32,
    /// Base d100 hit chance
    pub accuracy: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentKind {
    Weapon(WeaponStats),
    ShieldGenerator { strength: u32 },
    ArmorPlate { value: u32 },
    Engine { tactical_speed: u32 },
    TargetingComputer { accuracy: i32 },
    Jammer { defense: i32 },
}

/// One equipment slot on a ship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub kind: ComponentKind,
    pub hit_points: u32,
    pub max_hit_points: u32,
}

impl Component {
    pub fn new(name: impl Into<String>, kind: ComponentKind, hit_points: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            hit_points,
            max_hit_points: hit_points,
        }
    }

    pub fn weapon(name: impl Into<String>, stats: WeaponStats) -> Self {
        Self::new(name, ComponentKind::Weapon(stats), 1)
    }

    pub fn beam(damage: u32, range: u32) -> Self {
        Self::weapon(
            "Laser",
            WeaponStats {
                kind: WeaponKind::Beam,
                damage,
                range,
                accuracy: 75,
            },
        )
    }

    pub fn railgun(damage: u32, range: u32) -> Self {
        Self::weapon(
            "Railgun",
            WeaponStats {
                kind: WeaponKind::Railgun,
                damage,
                range,
                accuracy: 65,
            },
        )
    }

    pub fn missile(damage: u32, range: u32) -> Self {
        Self::weapon(
            "Missile",
            WeaponStats {
                kind: WeaponKind::Missile,
                damage,
                range,
                accuracy: 85,
            },
        )
    }

    pub fn engine(tactical_speed: u32) -> Self {
        Self::new("Engine", ComponentKind::Engine { tactical_speed }, 1)
    }

    pub fn shield(strength: u32) -> Self {
        Self::new("Shield", ComponentKind::ShieldGenerator { strength }, 1)
    }

    pub fn armor(value: u32) -> Self {
        Self::new("Armor plating", ComponentKind::ArmorPlate { value }, value.max(1))
    }

    /// Destroyed components keep their slot but stop functioning
    pub fn is_working(&self) -> bool {
        self.hit_points > 0
    }

    /// Weapon stats if this slot is a weapon, working or not
    pub fn weapon_stats(&self) -> Option<&WeaponStats> {
        match &self.kind {
            ComponentKind::Weapon(stats) => Some(stats),
            _ => None,
        }
    }

    pub fn is_weapon(&self) -> bool {
        self.weapon_stats().is_some()
    }

    /// Apply damage to this component, returning the overflow
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let absorbed = amount.min(self.hit_points);
        self.hit_points -= absorbed;
        amount - absorbed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_detection() {
        assert!(Component::beam(3, 3).is_weapon());
        assert!(!Component::engine(2).is_weapon());
    }

    #[test]
    fn test_take_damage_returns_overflow() {
        let mut plate = Component::armor(4);
        assert_eq!(plate.take_damage(6), 2);
        assert!(!plate.is_working());
    }

    #[test]
    fn test_broken_weapon_keeps_stats() {
        let mut gun = Component::railgun(4, 2);
        gun.take_damage(10);
        assert!(!gun.is_working());
        assert_eq!(gun.weapon_stats().map(|w| w.range), Some(2));
    }
}
