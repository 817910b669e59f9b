//! Tactical combat - one battle between an attacking and a defending fleet
//!
//! - `session::Combat` owns the roster and drives turns, shots and moves
//! - `deployment` holds the fixed starting-position tables
//! - `line_of_fire` traces shots across the 9x9 board
//! - `damage::DamageResolver` is the seam for hit and damage models
//! - `auto_resolve` plays a whole battle headless

pub mod auto_resolve;
pub mod combat_ship;
pub mod constants;
pub mod damage;
pub mod deployment;
pub mod events;
pub mod grid;
pub mod line_of_fire;
pub mod roster;
pub mod session;

pub use auto_resolve::{auto_resolve, AutoResolveReport, Termination};
pub use combat_ship::{CombatShip, CombatShipKey, Side};
pub use damage::{DamageResolver, DamageSeverity, Shot, ShotOutcome, StandardDamage};
pub use deployment::DeploymentTable;
pub use events::{CombatEvent, CombatEventKind, CombatLog};
pub use grid::{GridCoord, GridDirection};
pub use line_of_fire::{line_cells, trace_line_of_fire, LineOfFire};
pub use roster::Roster;
pub use session::{Combat, CombatSummary, Rejection};
