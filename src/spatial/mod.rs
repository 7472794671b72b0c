//! Tile geometry and area layout
//!
//! This module contains spatial-related functionality including:
//! - Tile shapes and their rotations
//! - Rotation tables per tile type
//! - Rectangular areas and placements within them
//! - Completed tilings

/// Rotation tables for every tile type of a puzzle
pub mod catalog;
/// Rectangular areas and tile placement
pub mod region;
/// Polyomino shapes and rotations
pub mod shape;
/// Validated layouts of placed tiles
pub mod tiling;

pub use region::Region;
