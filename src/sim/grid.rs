//! Reveal grid (fog of war)
//!
//! A fixed 9×16 mask over the play field. A cell flips to revealed the first
//! time the ball's reference point lands in it and stays revealed until the
//! level is reloaded.

use crate::consts::{GRID_COLS, GRID_ROWS};

/// Total number of cells
pub const GRID_CELLS: usize = GRID_ROWS * GRID_COLS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealGrid {
    cells: [[bool; GRID_COLS]; GRID_ROWS],
    /// Maintained alongside `cells` so completion is O(1)
    revealed: usize,
}

impl Default for RevealGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl RevealGrid {
    /// All cells hidden
    pub fn new() -> Self {
        Self {
            cells: [[false; GRID_COLS]; GRID_ROWS],
            revealed: 0,
        }
    }

    /// Hide every cell again
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Cell `(row, col)` containing point `(x, y)` on a canvas of the given size
    ///
    /// Returns `None` when the point lies outside the canvas.
    pub fn cell_at(x: f32, y: f32, canvas_width: f32, canvas_height: f32) -> Option<(usize, usize)> {
        if canvas_width <= 0.0 || canvas_height <= 0.0 {
            return None;
        }
        let cell_w = canvas_width / GRID_COLS as f32;
        let cell_h = canvas_height / GRID_ROWS as f32;
        let col = (x / cell_w).floor();
        let row = (y / cell_h).floor();
        if row < 0.0 || col < 0.0 || row >= GRID_ROWS as f32 || col >= GRID_COLS as f32 {
            return None;
        }
        Some((row as usize, col as usize))
    }

    /// Mark a cell revealed. Returns true if it was hidden before.
    pub fn reveal(&mut self, row: usize, col: usize) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) if !*cell => {
                *cell = true;
                self.revealed += 1;
                true
            }
            _ => false,
        }
    }

    pub fn is_revealed(&self, row: usize, col: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    /// Every cell revealed
    pub fn is_complete(&self) -> bool {
        self.revealed == GRID_CELLS
    }

    /// Same answer as `is_complete`, computed by scanning every cell
    pub fn is_complete_scan(&self) -> bool {
        self.cells.iter().all(|row| row.iter().all(|&c| c))
    }

    /// Cells still under the fog, row-major
    pub fn iter_hidden(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, revealed)| !**revealed)
                .map(move |(c, _)| (r, c))
        })
    }
}
