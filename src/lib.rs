//! Exact-cover packing of rotatable polyomino tiles into rectangular areas
//!
//! Each area is turned into a dancing links matrix with one primary column per
//! tile instance and one secondary column per cell, then searched with
//! Algorithm X. Batches of areas are spread over a worker pool that shares a
//! cache keyed by area size and tile counts.

#![forbid(unsafe_code)]

/// Dancing links, exact-cover search, and batch scheduling
pub mod algorithm;
/// Input parsing, configuration, logging, and reporting
pub mod io;
/// Tile shapes, rotations, areas, and tilings
pub mod spatial;

pub use io::error::{Result, SolverError};
