//! Witness tilings: the placements chosen by a successful search

use crate::spatial::region::Region;
use bitvec::prelude::*;
use ndarray::Array2;

/// One tile instance fixed at an anchor in one orientation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedTile {
    /// Instance index (primary column of the constraint matrix)
    pub instance: usize,
    /// Tile type index in the catalog
    pub kind: usize,
    /// Rotation index within the type's unique rotations
    pub rotation: usize,
    /// Top-left anchor as (row, col)
    pub anchor: (usize, usize),
    /// Row-major cell indices covered
    pub cells: Vec<usize>,
}

/// A set of placements inside a region
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tiling {
    region: Region,
    instance_count: usize,
    tiles: Vec<PlacedTile>,
}

impl Tiling {
    /// Assemble a tiling; `instance_count` is the number of instances that must appear
    pub fn new(region: Region, instance_count: usize, mut tiles: Vec<PlacedTile>) -> Self {
        tiles.sort_by_key(|tile| tile.instance);
        Self {
            region,
            instance_count,
            tiles,
        }
    }

    /// Area the tiles are placed in
    pub const fn region(&self) -> Region {
        self.region
    }

    /// Placements ordered by instance
    pub fn tiles(&self) -> &[PlacedTile] {
        &self.tiles
    }

    /// Check bounds, overlap and that every instance appears exactly once
    pub fn is_valid(&self) -> bool {
        let mut occupied = bitvec![0; self.region.area()];
        let mut placed = bitvec![0; self.instance_count];

        for tile in &self.tiles {
            let seen = placed.get(tile.instance).as_deref().copied();
            if seen != Some(false) {
                return false;
            }
            placed.set(tile.instance, true);

            for &cell in &tile.cells {
                let taken = occupied.get(cell).as_deref().copied();
                if taken != Some(false) {
                    return false;
                }
                occupied.set(cell, true);
            }
        }

        placed.all()
    }

    /// Grid of instance labels: 0 for empty, `instance + 1` for occupied
    pub fn layout(&self) -> Array2<usize> {
        let mut grid = Array2::zeros((self.region.rows, self.region.cols));
        for tile in &self.tiles {
            for &cell in &tile.cells {
                if let Some((row, col)) = self.region.cell_position(cell)
                    && let Some(slot) = grid.get_mut([row, col])
                {
                    *slot = tile.instance + 1;
                }
            }
        }
        grid
    }

    /// Text rendering with one letter per instance and `.` for empty cells
    pub fn render(&self) -> String {
        let layout = self.layout();
        let mut text = String::with_capacity(self.region.area() + self.region.rows);
        for row in layout.rows() {
            for &label in row {
                text.push(instance_letter(label));
            }
            text.push('\n');
        }
        text
    }
}

fn instance_letter(label: usize) -> char {
    if label == 0 {
        return '.';
    }
    let offset = ((label - 1) % 26) as u8;
    char::from(b'A' + offset)
}
