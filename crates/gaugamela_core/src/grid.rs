//! Battlefield grid geometry.
//!
//! Cells are addressed by integer `(x, y)` with the origin at the top-left
//! corner. All range and movement checks use Manhattan distance.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Default battlefield width in cells.
pub const COLS: i32 = 20;

/// Default battlefield height in cells.
pub const ROWS: i32 = 15;

/// Default cell edge length in pixels.
pub const GRID_SIZE: i32 = 40;

/// A cell coordinate on the battlefield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    /// Column, growing to the right.
    pub x: i32,
    /// Row, growing downwards.
    pub y: i32,
}

impl GridPos {
    /// Create a cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance `|dx| + |dy|` to another cell.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// One greedy step toward `target`, moving on both axes at once.
    ///
    /// Each axis moves by the sign of its delta, so the step is diagonal
    /// whenever both deltas are non-zero.
    #[must_use]
    pub const fn step_toward(self, target: Self) -> Self {
        Self {
            x: self.x + (target.x - self.x).signum(),
            y: self.y + (target.y - self.y).signum(),
        }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Dimensions of the battlefield and its pixel mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// Width in cells.
    pub cols: i32,
    /// Height in cells.
    pub rows: i32,
    /// Edge length of one cell in pixels.
    pub cell_size: i32,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            cols: COLS,
            rows: ROWS,
            cell_size: GRID_SIZE,
        }
    }
}

impl Grid {
    /// Reject degenerate dimensions.
    pub fn validate(&self) -> Result<()> {
        if self.cols <= 0 || self.rows <= 0 {
            return Err(GameError::InvalidGrid(format!(
                "dimensions must be positive, got {}x{}",
                self.cols, self.rows
            )));
        }
        if self.cell_size <= 0 {
            return Err(GameError::InvalidGrid(format!(
                "cell size must be positive, got {}",
                self.cell_size
            )));
        }
        let width = self.cols.checked_mul(self.cell_size);
        let height = self.rows.checked_mul(self.cell_size);
        if width.is_none() || height.is_none() {
            return Err(GameError::InvalidGrid(format!(
                "{}x{} cells of {} px overflow the surface size",
                self.cols, self.rows, self.cell_size
            )));
        }
        Ok(())
    }

    /// Check whether a cell lies on the battlefield.
    #[must_use]
    pub const fn contains(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.x < self.cols && pos.y >= 0 && pos.y < self.rows
    }

    /// Map a surface-local pixel position to the cell under it.
    ///
    /// Returns `None` for positions left of or above the origin and for
    /// anything past the last row or column.
    #[must_use]
    pub fn cell_at(&self, px: f32, py: f32) -> Option<GridPos> {
        let size = self.cell_size as f32;
        let pos = GridPos::new((px / size).floor() as i32, (py / size).floor() as i32);
        self.contains(pos).then_some(pos)
    }

    /// Surface width in pixels.
    #[must_use]
    pub const fn width_px(&self) -> i32 {
        self.cols * self.cell_size
    }

    /// Surface height in pixels.
    #[must_use]
    pub const fn height_px(&self) -> i32 {
        self.rows * self.cell_size
    }

    /// Top-left pixel corner of a cell.
    #[must_use]
    pub const fn cell_origin(&self, pos: GridPos) -> (i32, i32) {
        (pos.x * self.cell_size, pos.y * self.cell_size)
    }

    /// Iterate every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = GridPos> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.cols).map(move |x| GridPos::new(x, y)))
    }
}
