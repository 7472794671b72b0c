//! Constraint matrix construction for one area
//!
//! Columns `0..K` are the K required tile instances (primary, must be covered
//! once). Columns `K..K + rows * cols` are the grid cells in row-major order
//! (secondary, covered at most once). Each matrix row is one placement of one
//! rotation of one instance.

use crate::algorithm::links::DancingLinks;
use crate::io::configuration::MAX_AREA_CELLS;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::catalog::TileKind;
use crate::spatial::region::Region;
use crate::spatial::tiling::PlacedTile;

/// Reason an area was rejected before search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Infeasibility {
    /// The instances need more cells than the area has
    TooManyCells {
        /// Sum of instance cell counts
        required: usize,
        /// Cells in the area
        available: usize,
    },
    /// An instance has no in-bounds placement in any rotation
    NoPlacement {
        /// Offending instance
        instance: usize,
        /// Its tile type
        kind: usize,
    },
}

/// Populated matrix plus the placement behind every row id
#[derive(Clone, Debug)]
pub struct ConstraintMatrix {
    /// Link structure ready for search
    pub links: DancingLinks,
    /// Placement for each row id
    pub placements: Vec<PlacedTile>,
}

/// Result of [`MatrixBuilder::build`]
#[derive(Clone, Debug)]
pub enum BuildOutcome {
    /// Matrix ready for search
    Ready(ConstraintMatrix),
    /// Area rejected without search
    Infeasible(Infeasibility),
}

/// Builds the exact-cover matrix for one area and its required instances
pub struct MatrixBuilder<'a> {
    region: Region,
    instances: Vec<&'a TileKind>,
    rows_emitted: usize,
}

impl<'a> MatrixBuilder<'a> {
    /// Prepare a builder; `instances` are in primary column order
    pub const fn new(region: Region, instances: Vec<&'a TileKind>) -> Self {
        Self {
            region,
            instances,
            rows_emitted: 0,
        }
    }

    /// Sum of cells required by every instance
    pub fn required_cells(&self) -> usize {
        self.instances.iter().map(|kind| kind.cell_count()).sum()
    }

    /// Placement rows generated by the last call to [`build`](Self::build)
    pub const fn rows_emitted(&self) -> usize {
        self.rows_emitted
    }

    /// Check capacity, enumerate placements and populate the link structure
    ///
    /// Enumeration stops at the first instance without any placement.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidParameter`](crate::SolverError::InvalidParameter)
    /// when the region exceeds [`MAX_AREA_CELLS`], and propagates
    /// [`DancingLinks::add_row`] failures, which indicate a placement outside
    /// the declared columns.
    pub fn build(&mut self) -> Result<BuildOutcome> {
        self.rows_emitted = 0;

        let available = match self.region.checked_area() {
            Some(cells) if cells <= MAX_AREA_CELLS => cells,
            _ => {
                return Err(invalid_parameter(
                    "region",
                    &self.region,
                    &format!("areas are limited to {MAX_AREA_CELLS} cells"),
                ));
            }
        };
        let required = self.required_cells();
        if required > available {
            return Ok(BuildOutcome::Infeasible(Infeasibility::TooManyCells {
                required,
                available,
            }));
        }

        let instance_count = self.instances.len();
        let mut links = DancingLinks::new(instance_count, available);
        let mut placements = Vec::new();
        let mut columns = Vec::new();

        for (instance, kind) in self.instances.iter().enumerate() {
            let before = placements.len();

            for (rotation_index, rotation) in kind.rotations().iter().enumerate() {
                for anchor in self.region.anchors(rotation) {
                    let Some(cells) = self.region.place(rotation, anchor) else {
                        continue;
                    };

                    columns.clear();
                    columns.push(instance);
                    columns.extend(cells.iter().map(|&cell| instance_count + cell));

                    let row = placements.len();
                    links.add_row(row, &columns)?;
                    placements.push(PlacedTile {
                        instance,
                        kind: kind.index(),
                        rotation: rotation_index,
                        anchor,
                        cells,
                    });
                    self.rows_emitted += 1;
                }
            }

            if placements.len() == before {
                return Ok(BuildOutcome::Infeasible(Infeasibility::NoPlacement {
                    instance,
                    kind: kind.index(),
                }));
            }
        }

        Ok(BuildOutcome::Ready(ConstraintMatrix { links, placements }))
    }
}
