//! Tile shapes and their unique cardinal rotations
//!
//! A shape is a set of occupied unit cells. Rotations are normalized so the
//! smallest row and column are zero and compared as sorted cell lists, which
//! collapses symmetric orientations into one.

use crate::io::configuration::{EMPTY_CELL, FILLED_CELL};
use crate::io::error::{Result, SolverError};
use std::collections::HashSet;

/// Cell offset as (row, col) relative to the shape anchor
pub type Offset = (usize, usize);

/// One normalized orientation of a shape
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rotation {
    cells: Vec<Offset>,
}

impl Rotation {
    /// Normalize offsets to start at the origin and sort them
    pub fn normalized(cells: &[Offset]) -> Self {
        let min_row = cells.iter().map(|&(row, _)| row).min().unwrap_or(0);
        let min_col = cells.iter().map(|&(_, col)| col).min().unwrap_or(0);

        let mut normalized: Vec<Offset> = cells
            .iter()
            .map(|&(row, col)| (row - min_row, col - min_col))
            .collect();
        normalized.sort_unstable();
        normalized.dedup();

        Self { cells: normalized }
    }

    /// Occupied offsets in row-major order
    pub fn cells(&self) -> &[Offset] {
        &self.cells
    }

    /// Number of occupied cells
    pub const fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Bounding box as (height, width)
    pub fn extent(&self) -> (usize, usize) {
        let height = self.cells.iter().map(|&(row, _)| row + 1).max().unwrap_or(0);
        let width = self.cells.iter().map(|&(_, col)| col + 1).max().unwrap_or(0);
        (height, width)
    }
}

/// Immutable set of occupied cells describing one tile type
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    cells: Vec<Offset>,
}

impl Shape {
    /// Build a shape directly from occupied offsets
    pub fn from_cells(cells: &[Offset]) -> Self {
        let mut cells = cells.to_vec();
        cells.sort_unstable();
        cells.dedup();
        Self { cells }
    }

    /// Parse a shape from text rows where `#` is occupied and `.` is empty
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidInput`] when a row contains any other
    /// character. The reported line is the 1-based row within the shape.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let mut cells = Vec::new();
        for (row, text) in rows.iter().enumerate() {
            for (col, ch) in text.as_ref().chars().enumerate() {
                match ch {
                    FILLED_CELL => cells.push((row, col)),
                    EMPTY_CELL => {}
                    other => {
                        return Err(SolverError::InvalidInput {
                            line: row + 1,
                            reason: format!("unexpected character '{other}' in tile shape"),
                        });
                    }
                }
            }
        }
        Ok(Self::from_cells(&cells))
    }

    /// Occupied offsets in row-major order
    pub fn cells(&self) -> &[Offset] {
        &self.cells
    }

    /// Number of occupied cells
    pub const fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Rotate 90° clockwise: (r, c) becomes (c, h - 1 - r)
    #[must_use]
    pub fn rotate_90(&self) -> Self {
        let height = self.cells.iter().map(|&(row, _)| row + 1).max().unwrap_or(0);
        let rotated: Vec<Offset> = self
            .cells
            .iter()
            .map(|&(row, col)| (col, height - 1 - row))
            .collect();
        Self::from_cells(&rotated)
    }

    /// The four cardinal rotations, unnormalized, starting with the shape itself
    pub fn cardinal_rotations(&self) -> [Self; 4] {
        let quarter = self.rotate_90();
        let half = quarter.rotate_90();
        let three_quarter = half.rotate_90();
        [self.clone(), quarter, half, three_quarter]
    }

    /// Distinct normalized rotations in first-seen order
    pub fn unique_rotations(&self) -> Vec<Rotation> {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();

        for rotated in self.cardinal_rotations() {
            let rotation = Rotation::normalized(rotated.cells());
            if seen.insert(rotation.clone()) {
                unique.push(rotation);
            }
        }

        unique
    }
}
