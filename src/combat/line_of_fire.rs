//! Line-of-fire tracing on the combat grid
//!
//! A shot travels in `distance` unit steps from shooter to target, each
//! step rounded to the nearest cell. Any ship on an intermediate cell
//! stops the shot.

use serde::{Deserialize, Serialize};

use crate::combat::grid::GridCoord;

/// Why a line of fire is or is not open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineOfFire {
    Clear,
    /// Shooter and target share a cell
    SameCell,
    OutOfRange { distance: u32, range: u32 },
    /// First occupied cell along the line
    Blocked { at: GridCoord },
}

impl LineOfFire {
    pub fn is_clear(&self) -> bool {
        matches!(self, LineOfFire::Clear)
    }
}

/// Cells visited stepping from `from` to `to`, excluding `from`.
///
/// The last element is the stepped end cell, which always equals `to` for
/// integer endpoints.
pub fn line_cells(from: GridCoord, to: GridCoord) -> Vec<GridCoord> {
    let steps = from.distance(&to) as i32;
    if steps == 0 {
        return Vec::new();
    }

    let dx = to.x - from.x;
    let dy = to.y - from.y;
    (1..=steps)
        .map(|i| {
            // Scale before dividing so half-cell points stay exact
            let x = from.x as f64 + (dx * i) as f64 / steps as f64;
            let y = from.y as f64 + (dy * i) as f64 / steps as f64;
            GridCoord::new(x.round() as i32, y.round() as i32)
        })
        .collect()
}

/// Trace a shot, checking range and obstruction in one pass.
///
/// `occupied` must report cells holding a ship other than the shooter and
/// the target.
pub fn trace_line_of_fire<F>(from: GridCoord, to: GridCoord, range: u32, occupied: F) -> LineOfFire
where
    F: Fn(GridCoord) -> bool,
{
    let distance = from.distance(&to);
    if distance == 0 {
        return LineOfFire::SameCell;
    }
    if distance > range {
        return LineOfFire::OutOfRange { distance, range };
    }

    let cells = line_cells(from, to);
    let intermediate = cells.split_last().map_or(&[][..], |(_, rest)| rest);
    match intermediate.iter().find(|&&cell| occupied(cell)) {
        Some(&at) => LineOfFire::Blocked { at },
        None => LineOfFire::Clear,
    }
}
