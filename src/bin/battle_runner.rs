//! Headless Battle Runner
//!
//! Builds two sample fleets, fights them out with the fast resolver and
//! prints the result. The seed is echoed back so any run can be replayed.

use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use stellar_tactics::combat::{auto_resolve, Combat, Termination};
use stellar_tactics::core::{load_combat_config, CombatConfig, FleetId, PlayerId, SectorCoord, ShipId};
use stellar_tactics::fleet::{Component, Fleet, FleetPosture, Player, Ship};

const ATTACKER_FLEET: FleetId = FleetId(1);
const DEFENDER_FLEET: FleetId = FleetId(2);

/// Headless Battle Runner - resolve a fleet engagement without a UI
#[derive(Parser, Debug)]
#[command(name = "battle_runner")]
#[command(about = "Resolve a tactical fleet battle headless and report the outcome")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Ships in the attacking fleet
    #[arg(long, default_value_t = 4)]
    attacker_ships: u32,

    /// Ships in the defending fleet
    #[arg(long, default_value_t = 4)]
    defender_ships: u32,

    /// Defender fields orbital starbases instead of a mobile fleet
    #[arg(long)]
    starbase: bool,

    /// Strip all weapons from both fleets
    #[arg(long)]
    unarmed: bool,

    /// Combat config TOML (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct BattleResult {
    outcome: Termination,
    winner: Option<u32>,
    rounds: u32,
    shots_fired: u32,
    attacker_survivors: usize,
    defender_survivors: usize,
    attacker_fleet_at: Option<SectorCoord>,
    defender_fleet_at: Option<SectorCoord>,
    events: usize,
    seed: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("stellar_tactics=info")),
        )
        .init();

    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let config = match &args.config {
        Some(path) => load_combat_config(path).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config '{}': {}", path.display(), e);
            eprintln!("Using default config");
            CombatConfig::default()
        }),
        None => CombatConfig::default(),
    };

    let mut attacker = Player::new(PlayerId(1), "Attacker");
    attacker.commission(create_fleet(
        ATTACKER_FLEET,
        SectorCoord::new(5, 5),
        args.attacker_ships,
        false,
        args.unarmed,
    ));
    let mut defender = Player::new(PlayerId(2), "Defender");
    defender.commission(
        create_fleet(
            DEFENDER_FLEET,
            SectorCoord::new(6, 5),
            args.defender_ships,
            args.starbase,
            args.unarmed,
        )
        .with_posture(FleetPosture::Defend),
    );

    let (report, summary) = {
        let mut combat = match Combat::new(
            &mut attacker,
            ATTACKER_FLEET,
            &mut defender,
            DEFENDER_FLEET,
            config,
        ) {
            Ok(combat) => combat,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        };
        let report = auto_resolve(&mut combat, &mut rng);
        (report, combat.handle_end_combat())
    };

    let result = BattleResult {
        outcome: report.termination,
        winner: report.winner.map(|p| p.0),
        rounds: report.rounds,
        shots_fired: report.shots_fired,
        attacker_survivors: summary.attacker_survivors,
        defender_survivors: summary.defender_survivors,
        attacker_fleet_at: attacker.fleets.get(ATTACKER_FLEET).map(|f| f.coordinate),
        defender_fleet_at: defender.fleets.get(DEFENDER_FLEET).map(|f| f.coordinate),
        events: summary.log.len(),
        seed,
    };

    match args.format.as_str() {
        "text" => print_text(&result),
        "json" => print_json(&result),
        other => {
            eprintln!("Unknown format '{other}', defaulting to json");
            print_json(&result);
        }
    }
}

fn print_json(result: &BattleResult) {
    match serde_json::to_string_pretty(result) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error: failed to serialize result: {e}"),
    }
}

fn print_text(result: &BattleResult) {
    let at = |c: Option<SectorCoord>| match c {
        Some(c) => format!("({}, {})", c.x, c.y),
        None => String::from("destroyed"),
    };
    println!("Battle Result");
    println!("=============");
    println!("Outcome: {:?}", result.outcome);
    match result.winner {
        Some(id) => println!("Winner: player {id}"),
        None => println!("Winner: none"),
    }
    println!("Rounds: {}", result.rounds);
    println!("Shots fired: {}", result.shots_fired);
    println!(
        "Survivors: attacker {}, defender {}",
        result.attacker_survivors, result.defender_survivors
    );
    println!("Attacker fleet: {}", at(result.attacker_fleet_at));
    println!("Defender fleet: {}", at(result.defender_fleet_at));
    println!("Events logged: {}", result.events);
    println!("Seed: {}", result.seed);
}

/// Sample fleet: frigates for a mobile fleet, gun platforms for a starbase
fn create_fleet(id: FleetId, at: SectorCoord, ships: u32, starbase: bool, unarmed: bool) -> Fleet {
    let mut fleet = Fleet::new(id, format!("Fleet {}", id.0), at);
    for n in 0..ships {
        let ship_id = ShipId(id.0 * 100 + n);
        let ship = if starbase {
            let mut components = vec![Component::shield(3), Component::armor(4)];
            if !unarmed {
                components.push(Component::missile(4, 6));
                components.push(Component::beam(3, 5));
            }
            Ship::new(ship_id, format!("Platform {}", n + 1), "Orbital Platform", 20, components)
                .with_initiative(2)
                .as_starbase()
        } else {
            let mut components = vec![Component::engine(2), Component::shield(2)];
            if !unarmed {
                components.push(Component::beam(3, 4));
                components.push(Component::railgun(2, 3));
            }
            Ship::new(ship_id, format!("Frigate {}", n + 1), "Frigate", 10, components)
        };
        fleet.ships.push(ship);
    }
    fleet
}
