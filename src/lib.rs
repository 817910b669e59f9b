//! Stellar Tactics - tactical fleet combat for a 4X space strategy game

pub mod combat;
pub mod core;
pub mod fleet;
