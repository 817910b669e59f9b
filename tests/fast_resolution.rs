//! Headless resolution integration tests

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use stellar_tactics::combat::{auto_resolve, AutoResolveReport, Combat, Termination};
use stellar_tactics::core::{parse_combat_config, CombatConfig, FleetId, PlayerId, SectorCoord, ShipId};
use stellar_tactics::fleet::{Component, Fleet, FleetPosture, Player, Ship};

const A: FleetId = FleetId(1);
const D: FleetId = FleetId(2);

fn frigate(id: u32) -> Ship {
    Ship::new(
        ShipId(id),
        format!("Frigate {id}"),
        "Frigate",
        10,
        vec![
            Component::engine(2),
            Component::shield(2),
            Component::beam(3, 4),
            Component::railgun(2, 3),
        ],
    )
}

fn platform(id: u32) -> Ship {
    Ship::new(
        ShipId(id),
        format!("Platform {id}"),
        "Platform",
        20,
        vec![Component::armor(4), Component::missile(4, 6)],
    )
    .with_initiative(2)
    .as_starbase()
}

fn hauler(id: u32) -> Ship {
    Ship::new(ShipId(id), format!("Hauler {id}"), "Hauler", 6, vec![Component::engine(1)])
}

fn player(id: u32, fleet: FleetId, at: SectorCoord, ships: Vec<Ship>) -> Player {
    let mut p = Player::new(PlayerId(id), format!("Empire {id}"));
    let mut f = Fleet::new(fleet, "Task Force", at).with_posture(FleetPosture::Patrol);
    f.ships = ships;
    p.commission(f);
    p
}

fn resolve(attackers: Vec<Ship>, defenders: Vec<Ship>, config: CombatConfig, seed: u64) -> AutoResolveReport {
    let mut a = player(1, A, SectorCoord::new(5, 5), attackers);
    let mut d = player(2, D, SectorCoord::new(6, 5), defenders);
    let mut combat = Combat::new(&mut a, A, &mut d, D, config).expect("combat");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    auto_resolve(&mut combat, &mut rng)
}

#[test]
fn test_always_terminates_within_round_budget() {
    let config = parse_combat_config("max_rounds = 15\n").expect("valid config");
    for seed in 0..12 {
        let attackers = (1..=(seed as u32 % 5 + 1)).map(frigate).collect();
        let defenders = (100..=(100 + seed as u32 % 3)).map(frigate).collect();
        let report = resolve(attackers, defenders, config.clone(), seed);
        assert!(report.rounds <= 15, "seed {seed} ran {} rounds", report.rounds);
        match report.termination {
            Termination::Decided => assert!(report.winner.is_some()),
            Termination::Stalemate | Termination::RoundLimit => assert!(report.winner.is_none()),
        }
    }
}

#[test]
fn test_unarmed_fleets_resolve_without_spending_rounds() {
    let report = resolve(
        (1..=3).map(hauler).collect(),
        (10..=12).map(hauler).collect(),
        CombatConfig::default(),
        1,
    );
    assert_eq!(report.termination, Termination::Stalemate);
    assert_eq!(report.winner, None);
    assert_eq!(report.rounds, 1);
    assert_eq!(report.shots_fired, 0);
}

#[test]
fn test_fleet_against_starbase_terminates() {
    let report = resolve(
        (1..=6).map(frigate).collect(),
        (50..=52).map(platform).collect(),
        CombatConfig::default(),
        21,
    );
    assert!(report.rounds <= CombatConfig::default().max_rounds);
    assert!(report.shots_fired > 0);
}

#[test]
fn test_armed_fleet_beats_haulers() {
    let report = resolve(
        vec![frigate(1)],
        (10..=11).map(hauler).collect(),
        CombatConfig::default(),
        8,
    );
    assert_eq!(report.termination, Termination::Decided);
    assert_eq!(report.winner, Some(PlayerId(1)));
}

#[test]
fn test_same_seed_replays_identically() {
    let run = |seed| {
        resolve(
            (1..=4).map(frigate).collect(),
            (10..=13).map(frigate).collect(),
            CombatConfig::default(),
            seed,
        )
    };
    assert_eq!(run(1234), run(1234));
}

#[test]
fn test_reconciliation_after_auto_resolve() {
    let mut a = player(1, A, SectorCoord::new(5, 5), (1..=2).map(frigate).collect());
    let mut d = player(2, D, SectorCoord::new(6, 5), vec![hauler(10)]);
    let report = {
        let mut combat =
            Combat::new(&mut a, A, &mut d, D, CombatConfig::default()).expect("combat");
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let report = auto_resolve(&mut combat, &mut rng);
        let summary = combat.handle_end_combat();
        assert_eq!(summary.winner, report.winner);
        report
    };

    assert_eq!(report.termination, Termination::Decided);
    assert_eq!(a.fleets.get(A).map(|f| f.coordinate), Some(SectorCoord::new(6, 5)));
    assert!(d.fleets.is_empty());
    assert_eq!(d.statistics.record("Hauler").losses, 1);
}
