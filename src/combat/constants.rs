//! Combat constants - board geometry and table sizes

/// Width and height of the tactical board in cells
pub const GRID_SIZE: i32 = 9;

/// Highest valid coordinate on either axis
pub const GRID_MAX: i32 = GRID_SIZE - 1;

/// Column the deployment fans out from
pub const DEPLOYMENT_CENTER_COLUMN: i32 = 4;

/// Entries in the bottom and top deployment tables (two full ranks)
pub const BOTTOM_DEPLOYMENT_SLOTS: usize = 18;
pub const TOP_DEPLOYMENT_SLOTS: usize = BOTTOM_DEPLOYMENT_SLOTS;

/// Entries in the starbase deployment table (one rank, columns 1..=7)
pub const STARBASE_DEPLOYMENT_SLOTS: usize = 7;

/// Front and rear ranks for the attacker
pub const BOTTOM_FRONT_ROW: i32 = 7;
pub const BOTTOM_REAR_ROW: i32 = 8;

/// Front and rear ranks for the defender
pub const TOP_FRONT_ROW: i32 = 1;
pub const TOP_REAR_ROW: i32 = 0;

/// Rank for orbital installations
pub const STARBASE_ROW: i32 = 2;

/// d100 roll range
pub const HIT_ROLL_SIDES: i32 = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_fit_on_board() {
        assert_eq!(BOTTOM_DEPLOYMENT_SLOTS, 2 * GRID_SIZE as usize);
        assert!(STARBASE_DEPLOYMENT_SLOTS <= GRID_SIZE as usize);
    }

    #[test]
    fn test_sides_are_mirrored() {
        assert_eq!(BOTTOM_FRONT_ROW, GRID_MAX - TOP_FRONT_ROW);
        assert_eq!(BOTTOM_REAR_ROW, GRID_MAX - TOP_REAR_ROW);
    }
}
