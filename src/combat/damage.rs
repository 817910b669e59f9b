//! Shot outcomes and damage resolution
//!
//! The session only looks at `ShotOutcome::is_destroyed`; everything else
//! here is for the presentation layer and for the default damage model.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::combat::constants::HIT_ROLL_SIDES;
use crate::core::config::CombatConfig;
use crate::fleet::component::{WeaponKind, WeaponStats};
use crate::fleet::ship::Ship;

/// How bad a resolved shot was, from harmless to fatal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DamageSeverity {
    /// Missed, or hit without leaving a mark
    NoDent,
    /// Stopped by shields or armor
    Absorbed,
    /// Got through to components and hull
    Damaged,
    Destroyed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotOutcome {
    pub severity: DamageSeverity,
    pub message: String,
}

impl ShotOutcome {
    pub fn new(severity: DamageSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.severity == DamageSeverity::Destroyed
    }
}

/// Everything about the firing side a damage model needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shot<'a> {
    pub weapon_name: &'a str,
    pub weapon: WeaponStats,
    pub bonus_accuracy: i32,
    pub targeting: i32,
    /// Cells between shooter and target. `StandardDamage` ignores it;
    /// resolvers with range falloff read it.
    pub distance: u32,
}

/// Turns a shot into damage on the target ship
pub trait DamageResolver: std::fmt::Debug {
    fn resolve(&self, shot: &Shot<'_>, target: &mut Ship, rng: &mut dyn RngCore) -> ShotOutcome;
}

/// Default damage model: d100 to hit, then shields, armor, components, hull
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardDamage {
    pub min_hit_chance: i32,
    pub max_hit_chance: i32,
}

impl Default for StandardDamage {
    fn default() -> Self {
        Self::from_config(&CombatConfig::default())
    }
}

impl StandardDamage {
    pub fn from_config(config: &CombatConfig) -> Self {
        Self {
            min_hit_chance: config.min_hit_chance,
            max_hit_chance: config.max_hit_chance,
        }
    }

    pub fn hit_chance(&self, shot: &Shot<'_>, target: &Ship) -> i32 {
        (shot.weapon.accuracy + shot.bonus_accuracy + shot.targeting - target.jammer_defense())
            .clamp(self.min_hit_chance, self.max_hit_chance)
    }

    /// Shield points that stand in front of this weapon
    fn effective_shield(kind: WeaponKind, shield: u32) -> u32 {
        match kind {
            WeaponKind::Beam => shield,
            WeaponKind::Missile => shield / 2,
            WeaponKind::Railgun => 0,
        }
    }
}

impl DamageResolver for StandardDamage {
    fn resolve(&self, shot: &Shot<'_>, target: &mut Ship, rng: &mut dyn RngCore) -> ShotOutcome {
        let chance = self.hit_chance(shot, target);
        let roll = rng.gen_range(1..=HIT_ROLL_SIDES);
        if roll > chance {
            return ShotOutcome::new(
                DamageSeverity::NoDent,
                format!("{} missed {} (rolled {roll} vs {chance})", shot.weapon_name, target.name),
            );
        }

        let mut remaining = shot.weapon.damage;
        if remaining == 0 {
            return ShotOutcome::new(
                DamageSeverity::NoDent,
                format!("{} hit {} without effect", shot.weapon_name, target.name),
            );
        }

        let shield = Self::effective_shield(shot.weapon.kind, target.shield);
        let blocked = remaining.min(shield);
        target.shield -= blocked;
        remaining -= blocked;
        if remaining == 0 {
            return ShotOutcome::new(
                DamageSeverity::Absorbed,
                format!("{}'s shields absorbed the {}", target.name, shot.weapon_name),
            );
        }

        let soaked = remaining.min(target.armor);
        target.armor -= soaked;
        remaining -= soaked;
        if remaining == 0 {
            return ShotOutcome::new(
                DamageSeverity::Absorbed,
                format!("{}'s armor absorbed the {}", target.name, shot.weapon_name),
            );
        }

        target.hull_points = target.hull_points.saturating_sub(remaining);
        if target.is_destroyed() {
            return ShotOutcome::new(
                DamageSeverity::Destroyed,
                format!("{} destroyed {}", shot.weapon_name, target.name),
            );
        }

        let working: Vec<usize> = target
            .components
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_working())
            .map(|(i, _)| i)
            .collect();
        let message = if working.is_empty() {
            format!("{} hit {}'s hull for {remaining}", shot.weapon_name, target.name)
        } else {
            let slot = working[rng.gen_range(0..working.len())];
            let component = &mut target.components[slot];
            component.take_damage(remaining);
            let state = if component.is_working() { "damaged" } else { "destroyed" };
            format!(
                "{} hit {} for {remaining}, {} {state}",
                shot.weapon_name, target.name, component.name
            )
        };
        ShotOutcome::new(DamageSeverity::Damaged, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ShipId;
    use crate::fleet::component::Component;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn shot(kind: WeaponKind, damage: u32) -> Shot<'static> {
        Shot {
            weapon_name: "Test gun",
            weapon: WeaponStats {
                kind,
                damage,
                range: 3,
                accuracy: 100,
            },
            bonus_accuracy: 0,
            targeting: 0,
            distance: 1,
        }
    }

    fn sure_hit() -> StandardDamage {
        StandardDamage {
            min_hit_chance: 100,
            max_hit_chance: 100,
        }
    }

    fn target(hull: u32, shield: u32, armor: u32) -> Ship {
        let mut components = vec![Component::engine(1)];
        if shield > 0 {
            components.push(Component::shield(shield));
        }
        if armor > 0 {
            components.push(Component::armor(armor));
        }
        Ship::new(ShipId(9), "Target", "Drone", hull, components)
    }

    #[test]
    fn test_severity_ordering() {
        assert!(DamageSeverity::NoDent < DamageSeverity::Absorbed);
        assert!(DamageSeverity::Damaged < DamageSeverity::Destroyed);
    }

    #[test]
    fn test_shield_absorbs_beam() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ship = target(10, 3, 0);
        let outcome = sure_hit().resolve(&shot(WeaponKind::Beam, 2), &mut ship, &mut rng);
        assert_eq!(outcome.severity, DamageSeverity::Absorbed);
        assert_eq!(ship.shield, 1);
        assert_eq!(ship.hull_points, 10);
    }

    #[test]
    fn test_railgun_bypasses_shield_into_armor() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ship = target(10, 3, 4);
        let outcome = sure_hit().resolve(&shot(WeaponKind::Railgun, 3), &mut ship, &mut rng);
        assert_eq!(outcome.severity, DamageSeverity::Absorbed);
        assert_eq!(ship.shield, 3);
        assert_eq!(ship.armor, 1);
    }

    #[test]
    fn test_missile_faces_half_shield() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ship = target(10, 4, 0);
        let outcome = sure_hit().resolve(&shot(WeaponKind::Missile, 5), &mut ship, &mut rng);
        assert_eq!(outcome.severity, DamageSeverity::Damaged);
        assert_eq!(ship.shield, 2);
        assert_eq!(ship.hull_points, 7);
    }

    #[test]
    fn test_overkill_destroys() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ship = target(3, 0, 0);
        let outcome = sure_hit().resolve(&shot(WeaponKind::Beam, 5), &mut ship, &mut rng);
        assert!(outcome.is_destroyed());
        assert!(ship.is_destroyed());
    }

    #[test]
    fn test_sure_miss_leaves_target_untouched() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let never = StandardDamage {
            min_hit_chance: 0,
            max_hit_chance: 0,
        };
        let mut ship = target(3, 1, 1);
        let before = ship.clone();
        let outcome = never.resolve(&shot(WeaponKind::Beam, 5), &mut ship, &mut rng);
        assert_eq!(outcome.severity, DamageSeverity::NoDent);
        assert_eq!(ship, before);
    }

    #[test]
    fn test_hit_chance_modifiers_and_clamp() {
        let model = StandardDamage::default();
        let mut s = shot(WeaponKind::Beam, 1);
        s.weapon.accuracy = 60;
        s.bonus_accuracy = 5;
        s.targeting = 10;
        let mut ship = target(5, 0, 0);
        assert_eq!(model.hit_chance(&s, &ship), 75);
        ship.components.push(Component::new(
            "Jammer",
            crate::fleet::component::ComponentKind::Jammer { defense: 90 },
            1,
        ));
        assert_eq!(model.hit_chance(&s, &ship), 5);
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let model = StandardDamage::default();
        let run = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut ship = target(20, 0, 0);
            (0..10)
                .map(|_| model.resolve(&shot(WeaponKind::Beam, 1), &mut ship, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
    }
}
