//! Per tile type rotation tables shared by every area in a batch

use crate::io::error::{Result, SolverError};
use crate::spatial::shape::{Rotation, Shape};

/// A tile type with its rotations precomputed
#[derive(Clone, Debug)]
pub struct TileKind {
    index: usize,
    shape: Shape,
    rotations: Vec<Rotation>,
}

impl TileKind {
    /// Precompute the unique rotations of `shape`
    pub fn new(index: usize, shape: Shape) -> Self {
        let rotations = shape.unique_rotations();
        Self {
            index,
            shape,
            rotations,
        }
    }

    /// Position of this type in the catalog
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Unrotated reference shape
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Distinct orientations
    pub fn rotations(&self) -> &[Rotation] {
        &self.rotations
    }

    /// Cells covered by one instance
    pub const fn cell_count(&self) -> usize {
        self.shape.cell_count()
    }
}

/// Ordered collection of tile types
///
/// Rotations are computed once when the catalog is built, then reused by
/// every area task.
#[derive(Clone, Debug, Default)]
pub struct TileCatalog {
    kinds: Vec<TileKind>,
}

impl TileCatalog {
    /// Build a catalog from reference shapes in type order
    pub fn new(shapes: Vec<Shape>) -> Self {
        let kinds = shapes
            .into_iter()
            .enumerate()
            .map(|(index, shape)| TileKind::new(index, shape))
            .collect();
        Self { kinds }
    }

    /// Number of tile types
    pub const fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Test if no tile types are defined
    pub const fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Look up a tile type
    pub fn kind(&self, index: usize) -> Option<&TileKind> {
        self.kinds.get(index)
    }

    /// Iterate tile types in order
    pub fn kinds(&self) -> impl Iterator<Item = &TileKind> {
        self.kinds.iter()
    }

    /// Expand per-type counts into the ordered list of required instances
    ///
    /// Instances are grouped by type in catalog order. Counts beyond the
    /// catalog are accepted only when zero.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::UnknownTileType`] when a non-zero count refers
    /// to a type the catalog does not define.
    pub fn instances(&self, counts: &[usize]) -> Result<Vec<&TileKind>> {
        self.check_kinds(counts)?;
        let mut instances = Vec::new();
        for (kind, &count) in self.kinds.iter().zip(counts) {
            instances.extend(std::iter::repeat_n(kind, count));
        }
        Ok(instances)
    }

    /// Check that every non-zero count names a defined tile type
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::UnknownTileType`] for the first count beyond
    /// the catalog that is not zero.
    pub fn check_kinds(&self, counts: &[usize]) -> Result<()> {
        match counts
            .iter()
            .enumerate()
            .skip(self.kinds.len())
            .find(|&(_, &count)| count > 0)
        {
            Some((kind, _)) => Err(SolverError::UnknownTileType {
                kind,
                available: self.kinds.len(),
            }),
            None => Ok(()),
        }
    }

    /// Total cells required by a count vector, ignoring unknown types
    ///
    /// Saturates at `usize::MAX` instead of overflowing.
    pub fn required_cells(&self, counts: &[usize]) -> usize {
        counts
            .iter()
            .zip(&self.kinds)
            .fold(0_usize, |total, (&count, kind)| {
                total.saturating_add(count.saturating_mul(kind.cell_count()))
            })
    }
}
