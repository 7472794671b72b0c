//! Rectangular area bounds and row-major cell indexing

use crate::spatial::shape::Rotation;
use std::fmt;

/// Bounded rectangular area measured in unit cells
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Region {
    /// Number of cell rows
    pub rows: usize,
    /// Number of cell columns
    pub cols: usize,
}

impl Region {
    /// Create a region of `rows` x `cols` cells
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells, saturating at `usize::MAX`
    pub const fn area(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// Total number of cells, `None` if the product overflows
    pub const fn checked_area(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Check if a cell lies inside the bounds
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Row-major index of a cell, if inside the bounds
    pub const fn cell_index(&self, row: usize, col: usize) -> Option<usize> {
        if !self.contains(row, col) {
            return None;
        }
        match row.checked_mul(self.cols) {
            Some(base) => base.checked_add(col),
            None => None,
        }
    }

    /// Convert a row-major index back to (row, col)
    pub const fn cell_position(&self, index: usize) -> Option<(usize, usize)> {
        if self.cols == 0 || index >= self.area() {
            None
        } else {
            Some((index / self.cols, index % self.cols))
        }
    }

    /// Anchors where a rotation's bounding box fits entirely inside the bounds
    pub fn anchors(&self, rotation: &Rotation) -> impl Iterator<Item = (usize, usize)> + use<> {
        let (height, width) = rotation.extent();
        let row_span = self.rows.saturating_add(1).saturating_sub(height.max(1));
        let col_span = self.cols.saturating_add(1).saturating_sub(width.max(1));
        (0..row_span).flat_map(move |row| (0..col_span).map(move |col| (row, col)))
    }

    /// Cell indices covered by `rotation` placed at `anchor`
    ///
    /// Returns `None` if any occupied cell falls outside the bounds.
    pub fn place(&self, rotation: &Rotation, anchor: (usize, usize)) -> Option<Vec<usize>> {
        rotation
            .cells()
            .iter()
            .map(|&(row, col)| self.cell_index(anchor.0 + row, anchor.1 + col))
            .collect()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}
