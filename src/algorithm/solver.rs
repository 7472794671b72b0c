//! Single-area solve: capacity check, matrix build, search, verdict

use crate::algorithm::matrix::{BuildOutcome, Infeasibility, MatrixBuilder};
use crate::algorithm::search::{SearchStats, find_cover};
use crate::io::error::Result;
use crate::spatial::catalog::{TileCatalog, TileKind};
use crate::spatial::region::Region;
use crate::spatial::tiling::Tiling;
use std::fmt;

/// Classification of an area after solving
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FitStatus {
    /// Instances need more cells than the area provides
    TooManyCells,
    /// Capacity suffices but no non-overlapping arrangement exists
    DoesNotFit,
    /// An arrangement exists
    Fits,
}

impl FitStatus {
    /// True only for [`FitStatus::Fits`]
    pub const fn fits(self) -> bool {
        matches!(self, Self::Fits)
    }

    /// Short human-readable label
    pub const fn label(self) -> &'static str {
        match self {
            Self::TooManyCells => "too many cells",
            Self::DoesNotFit => "doesn't fit",
            Self::Fits => "fits",
        }
    }
}

impl fmt::Display for FitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything learned from solving one area
#[derive(Clone, Debug)]
pub struct Verdict {
    /// Outcome classification
    pub status: FitStatus,
    /// Witness arrangement when the area fits
    pub tiling: Option<Tiling>,
    /// Placement rows generated for the matrix
    pub placements: usize,
    /// Search counters, zero when search never ran
    pub search: SearchStats,
}

impl Verdict {
    const fn rejected(status: FitStatus, placements: usize) -> Self {
        Self {
            status,
            tiling: None,
            placements,
            search: SearchStats {
                rows_tried: 0,
                backtracks: 0,
                max_depth: 0,
            },
        }
    }
}

/// Decide whether `instances` can all be placed inside `region`
///
/// # Errors
///
/// Returns an error only for structurally malformed matrices; infeasible
/// areas are reported through [`Verdict::status`].
pub fn solve(region: Region, instances: Vec<&TileKind>) -> Result<Verdict> {
    let instance_count = instances.len();
    let mut builder = MatrixBuilder::new(region, instances);

    let mut matrix = match builder.build()? {
        BuildOutcome::Ready(matrix) => matrix,
        BuildOutcome::Infeasible(reason) => {
            let status = match reason {
                Infeasibility::TooManyCells { .. } => FitStatus::TooManyCells,
                Infeasibility::NoPlacement { .. } => FitStatus::DoesNotFit,
            };
            tracing::trace!(%region, ?reason, "area rejected before search");
            return Ok(Verdict::rejected(status, builder.rows_emitted()));
        }
    };

    let (cover, search) = find_cover(&mut matrix.links);
    tracing::trace!(
        %region,
        placements = builder.rows_emitted(),
        rows_tried = search.rows_tried,
        backtracks = search.backtracks,
        max_depth = search.max_depth,
        "search finished"
    );

    let tiling = cover.map(|rows| {
        let tiles = rows
            .into_iter()
            .filter_map(|row| matrix.placements.get(row).cloned())
            .collect();
        Tiling::new(region, instance_count, tiles)
    });
    if let Some(tiling) = &tiling {
        tracing::trace!("witness tiling for {region}:\n{}", tiling.render());
    }

    Ok(Verdict {
        status: if tiling.is_some() {
            FitStatus::Fits
        } else {
            FitStatus::DoesNotFit
        },
        tiling,
        placements: builder.rows_emitted(),
        search,
    })
}

/// Expand per-type counts through `catalog` and solve
///
/// Counts whose cells exceed the area are rejected before any instance is
/// expanded.
///
/// # Errors
///
/// Returns [`SolverError::UnknownTileType`](crate::SolverError::UnknownTileType)
/// when the counts name a type missing from the catalog, and the errors of
/// [`solve`].
pub fn solve_counts(region: Region, catalog: &TileCatalog, counts: &[usize]) -> Result<Verdict> {
    catalog.check_kinds(counts)?;
    if catalog.required_cells(counts) > region.area() {
        tracing::trace!(%region, "area rejected before expanding instances");
        return Ok(Verdict::rejected(FitStatus::TooManyCells, 0));
    }
    solve(region, catalog.instances(counts)?)
}
