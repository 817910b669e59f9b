//! Headless combat resolution
//!
//! Drives a session with no presentation in between steps: every ship takes
//! its best legal shots, closes on the nearest enemy when it has none, and
//! hands the turn on. Bounded by `CombatConfig::max_rounds`.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::combat::combat_ship::{CombatShip, CombatShipKey};
use crate::combat::grid::GridCoord;
use crate::combat::session::Combat;
use crate::core::types::PlayerId;

/// How a fast resolution stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// One side was left standing
    Decided,
    /// Over without a winner (nobody armed, or mutual destruction)
    Stalemate,
    /// Both sides still fighting when the round budget ran out
    RoundLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoResolveReport {
    pub rounds: u32,
    pub winner: Option<PlayerId>,
    pub termination: Termination,
    pub shots_fired: u32,
}

/// Run the session until it is over or the round budget is spent.
///
/// Leaves the session open; call `handle_end_combat` afterwards to
/// reconcile fleets.
pub fn auto_resolve<R: RngCore>(combat: &mut Combat<'_>, rng: &mut R) -> AutoResolveReport {
    let max_rounds = combat.config().max_rounds;
    let mut shots_fired = 0;

    let termination = loop {
        if combat.is_combat_over() {
            break if combat.winning_side().is_some() {
                Termination::Decided
            } else {
                Termination::Stalemate
            };
        }
        if combat.round() > max_rounds {
            warn!(max_rounds, "Auto-resolve hit the round limit with both sides standing");
            break Termination::RoundLimit;
        }

        shots_fired += take_turn(combat, rng);

        if combat.is_combat_over() {
            continue;
        }
        combat.advance_turn();
    };

    let report = AutoResolveReport {
        rounds: combat.round().min(max_rounds),
        winner: combat.winner(),
        termination,
        shots_fired,
    };
    info!(
        rounds = report.rounds,
        shots = report.shots_fired,
        termination = ?report.termination,
        winner = ?report.winner,
        "Auto-resolve finished"
    );
    report
}

/// Play the current ship's turn. Returns the number of shots fired.
fn take_turn<R: RngCore>(combat: &mut Combat<'_>, rng: &mut R) -> u32 {
    let Some(key) = combat.current_key() else {
        return 0;
    };

    let mut shots = fire_at_will(combat, key, rng);
    while shots == 0 && step_toward_enemy(combat, key) {
        shots += fire_at_will(combat, key, rng);
    }
    debug!(ship = key.ship.0, shots, "Turn played");
    shots
}

/// Fire every weapon that has a legal target, heaviest gun first
fn fire_at_will<R: RngCore>(combat: &mut Combat<'_>, key: CombatShipKey, rng: &mut R) -> u32 {
    let mut shots = 0;
    while combat
        .combat_ship(key)
        .is_some_and(|s| s.ai_shots_left > 0)
    {
        let Some((slot, target)) = best_shot(combat, key) else {
            break;
        };
        combat.select_component(Some(slot));
        if combat.fire(target, rng).is_err() {
            break;
        }
        shots += 1;
        if combat.is_combat_over() {
            break;
        }
    }
    combat.select_component(None);
    shots
}

/// Highest-damage ready weapon, aimed at the weakest enemy it can reach
fn best_shot(combat: &Combat<'_>, key: CombatShipKey) -> Option<(usize, CombatShipKey)> {
    let ship = combat.ship(key)?;
    let mut weapons: Vec<(usize, u32)> = (0..ship.components.len())
        .filter_map(|slot| ship.working_weapon(slot).map(|w| (slot, w.damage)))
        .collect();
    weapons.sort_by(|a, b| b.1.cmp(&a.1));

    weapons.into_iter().find_map(|(slot, _)| {
        combat
            .roster()
            .iter()
            .map(CombatShip::key)
            .filter(|&target| combat.check_shot(key, slot, target).is_ok())
            .min_by_key(|&target| combat.ship(target).map_or(u32::MAX, |s| s.hull_points))
            .map(|target| (slot, target))
    })
}

/// Take one step that closes distance to the nearest enemy.
///
/// Returns false when no step gets closer (no moves left, already
/// adjacent, or boxed in).
fn step_toward_enemy(combat: &mut Combat<'_>, key: CombatShipKey) -> bool {
    let Some(from) = combat.combat_ship(key).map(|s| s.position) else {
        return false;
    };
    let Some(goal) = nearest_enemy(combat, key, from) else {
        return false;
    };

    let here = from.distance(&goal);
    let best = combat
        .legal_moves()
        .into_iter()
        .map(|cell| (cell.distance(&goal), cell))
        .filter(|(distance, _)| *distance < here)
        .min_by_key(|(distance, _)| *distance);

    match best {
        Some((_, cell)) => combat.move_current(cell).is_ok(),
        None => false,
    }
}

fn nearest_enemy(combat: &Combat<'_>, key: CombatShipKey, from: GridCoord) -> Option<GridCoord> {
    combat
        .roster()
        .iter()
        .filter(|s| s.side() == key.side.opponent())
        .map(|s| s.position)
        .min_by_key(|position| from.distance(position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CombatConfig;
    use crate::core::types::{FleetId, SectorCoord, ShipId};
    use crate::fleet::component::Component;
    use crate::fleet::fleet::Fleet;
    use crate::fleet::player::Player;
    use crate::fleet::ship::Ship;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn player(id: u32, ships: Vec<Ship>) -> Player {
        let mut p = Player::new(PlayerId(id), format!("Player {id}"));
        let mut fleet = Fleet::new(FleetId(id), "Fleet", SectorCoord::new(id as i32, 0));
        fleet.ships = ships;
        p.commission(fleet);
        p
    }

    fn cruiser(id: u32) -> Ship {
        Ship::new(
            ShipId(id),
            format!("Cruiser {id}"),
            "Cruiser",
            6,
            vec![Component::beam(4, 9), Component::engine(2)],
        )
    }

    #[test]
    fn test_unarmed_fleets_stalemate_immediately() {
        let hauler = |id| Ship::new(ShipId(id), "Hauler", "Hauler", 4, vec![Component::engine(1)]);
        let mut a = player(1, vec![hauler(1)]);
        let mut d = player(2, vec![hauler(2)]);
        let mut combat =
            Combat::new(&mut a, FleetId(1), &mut d, FleetId(2), CombatConfig::default())
                .expect("combat");
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let report = auto_resolve(&mut combat, &mut rng);
        assert_eq!(report.termination, Termination::Stalemate);
        assert_eq!(report.rounds, 1);
        assert_eq!(report.shots_fired, 0);
        assert_eq!(report.winner, None);
    }

    #[test]
    fn test_armed_side_wins_against_unarmed() {
        let hauler = Ship::new(ShipId(2), "Hauler", "Hauler", 4, vec![Component::engine(1)]);
        let mut a = player(1, vec![cruiser(1)]);
        let mut d = player(2, vec![hauler]);
        let mut combat =
            Combat::new(&mut a, FleetId(1), &mut d, FleetId(2), CombatConfig::default())
                .expect("combat");
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let report = auto_resolve(&mut combat, &mut rng);
        assert_eq!(report.termination, Termination::Decided);
        assert_eq!(report.winner, Some(PlayerId(1)));
        assert!(report.shots_fired > 0);
    }

    #[test]
    fn test_out_of_reach_fleets_hit_round_limit() {
        // Immobile short-range guns on opposite sides of the board
        let turret = |id| {
            Ship::new(ShipId(id), "Turret", "Turret", 5, vec![Component::beam(1, 1)])
        };
        let mut a = player(1, vec![turret(1)]);
        let mut d = player(2, vec![turret(2)]);
        let config = CombatConfig {
            max_rounds: 4,
            ..CombatConfig::default()
        };
        let mut combat = Combat::new(&mut a, FleetId(1), &mut d, FleetId(2), config)
            .expect("combat");
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let report = auto_resolve(&mut combat, &mut rng);
        assert_eq!(report.termination, Termination::RoundLimit);
        assert_eq!(report.rounds, 4);
        assert_eq!(report.winner, None);
    }

    #[test]
    fn test_closes_on_enemy_not_wingman() {
        let mut a = player(1, vec![cruiser(1), cruiser(2)]);
        let mut d = player(2, vec![cruiser(3)]);
        let combat =
            Combat::new(&mut a, FleetId(1), &mut d, FleetId(2), CombatConfig::default())
                .expect("combat");
        let lead = combat.current_key().expect("current ship");
        let from = combat.combat_ship(lead).map(|s| s.position).expect("deployed");
        // Wingman sits one cell away at (3,7); the enemy is at (4,1)
        assert_eq!(nearest_enemy(&combat, lead, from), Some(GridCoord::new(4, 1)));
    }

    #[test]
    fn test_same_seed_same_report() {
        let run = |seed| {
            let mut a = player(1, (1..=3).map(cruiser).collect());
            let mut d = player(2, (10..=12).map(cruiser).collect());
            let mut combat =
                Combat::new(&mut a, FleetId(1), &mut d, FleetId(2), CombatConfig::default())
                    .expect("combat");
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            auto_resolve(&mut combat, &mut rng)
        };
        assert_eq!(run(99), run(99));
    }
}
