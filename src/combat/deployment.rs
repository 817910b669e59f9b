//! Deployment tables - starting cells by position within the fleet
//!
//! Ships fan out from the center column: center, left, right, further left,
//! further right. The first five fill the front rank, the next five the rear
//! rank, then the outer columns of both ranks fill up.

use serde::{Deserialize, Serialize};

use crate::combat::constants::{
    BOTTOM_DEPLOYMENT_SLOTS, BOTTOM_FRONT_ROW, BOTTOM_REAR_ROW, DEPLOYMENT_CENTER_COLUMN,
    STARBASE_DEPLOYMENT_SLOTS, STARBASE_ROW, TOP_DEPLOYMENT_SLOTS, TOP_FRONT_ROW, TOP_REAR_ROW,
};
use crate::combat::grid::GridCoord;
use crate::core::error::{Result, TacticsError};

/// Column offsets from the center, in fill order
const FAN: [i32; 9] = [0, -1, 1, -2, 2, -3, 3, -4, 4];

/// Columns that fill in both ranks before the outer columns open up
const INNER_COLUMNS: usize = 5;
const OUTER_COLUMNS: usize = FAN.len() - INNER_COLUMNS;

const fn fan_column(order: usize) -> i32 {
    DEPLOYMENT_CENTER_COLUMN + FAN[order]
}

/// Inner columns of the front rank, inner columns of the rear rank, then
/// outer columns of the front rank and of the rear rank
const fn two_rank_table(front: i32, rear: i32) -> [GridCoord; BOTTOM_DEPLOYMENT_SLOTS] {
    let mut cells = [GridCoord::new(0, 0); BOTTOM_DEPLOYMENT_SLOTS];
    let mut i = 0;
    while i < INNER_COLUMNS {
        cells[i] = GridCoord::new(fan_column(i), front);
        cells[INNER_COLUMNS + i] = GridCoord::new(fan_column(i), rear);
        i += 1;
    }
    let mut j = 0;
    while j < OUTER_COLUMNS {
        let x = fan_column(INNER_COLUMNS + j);
        cells[2 * INNER_COLUMNS + j] = GridCoord::new(x, front);
        cells[2 * INNER_COLUMNS + OUTER_COLUMNS + j] = GridCoord::new(x, rear);
        j += 1;
    }
    cells
}

const fn starbase_table() -> [GridCoord; STARBASE_DEPLOYMENT_SLOTS] {
    let mut cells = [GridCoord::new(0, 0); STARBASE_DEPLOYMENT_SLOTS];
    let mut i = 0;
    while i < STARBASE_DEPLOYMENT_SLOTS {
        cells[i] = GridCoord::new(fan_column(i), STARBASE_ROW);
        i += 1;
    }
    cells
}

const BOTTOM_TABLE: [GridCoord; BOTTOM_DEPLOYMENT_SLOTS] =
    two_rank_table(BOTTOM_FRONT_ROW, BOTTOM_REAR_ROW);
const TOP_TABLE: [GridCoord; TOP_DEPLOYMENT_SLOTS] = two_rank_table(TOP_FRONT_ROW, TOP_REAR_ROW);
const STARBASE_TABLE: [GridCoord; STARBASE_DEPLOYMENT_SLOTS] = starbase_table();

/// Formation a fleet deploys in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeploymentTable {
    /// Attacker, rows 7 and 8
    Bottom,
    /// Defender, rows 1 and 0
    Top,
    /// Defending orbital installations, row 2
    Starbase,
}

impl DeploymentTable {
    fn cells(&self) -> &'static [GridCoord] {
        match self {
            DeploymentTable::Bottom => &BOTTOM_TABLE,
            DeploymentTable::Top => &TOP_TABLE,
            DeploymentTable::Starbase => &STARBASE_TABLE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DeploymentTable::Bottom => "bottom",
            DeploymentTable::Top => "top",
            DeploymentTable::Starbase => "starbase",
        }
    }

    /// Number of ships this formation can place
    pub fn capacity(&self) -> usize {
        self.cells().len()
    }

    /// Starting cell for the ship at `index` within its fleet.
    ///
    /// Fleets are capped before deployment, so an index past the table is
    /// an integration bug and returns an error instead of a guessed cell.
    pub fn coordinate(&self, index: usize) -> Result<GridCoord> {
        self.cells()
            .get(index)
            .copied()
            .ok_or(TacticsError::DeploymentOutOfRange {
                table: self.name(),
                index,
                max: self.capacity() - 1,
            })
    }
}
