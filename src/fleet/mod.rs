//! Fleet model - ships, fleets and the players that own them
//!
//! These are collaborators of the combat engine: combat reads their stats
//! and writes damage, losses and fleet moves back into them.

pub mod component;
pub mod fleet;
pub mod player;
pub mod ship;
pub mod statistics;

pub use component::{Component, ComponentKind, WeaponKind, WeaponStats};
pub use fleet::{Fleet, FleetList, FleetPosture};
pub use player::Player;
pub use ship::Ship;
pub use statistics::{DesignRecord, ShipStatistics};
