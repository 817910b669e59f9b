pub mod config;
pub mod error;
pub mod types;

pub use config::{load_combat_config, parse_combat_config, CombatConfig};
pub use error::{Result, TacticsError};
pub use types::{FleetId, PlayerId, SectorCoord, ShipId};
