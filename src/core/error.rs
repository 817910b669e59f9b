use thiserror::Error;

use crate::core::types::FleetId;

#[derive(Error, Debug)]
pub enum TacticsError {
    #[error("Deployment index {index} out of range for {table} table (max {max})")]
    DeploymentOutOfRange {
        table: &'static str,
        index: usize,
        max: usize,
    },

    #[error("Fleet not found: {0:?}")]
    FleetNotFound(FleetId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TacticsError>;
