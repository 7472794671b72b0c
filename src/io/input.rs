//! Puzzle text parsing: tile type blocks followed by area lines
//!
//! ```text
//! 0:
//! ###
//! ##.
//! ##.
//!
//! 4x4: 0 0 0 0 2 0
//! ```
//!
//! Area lines are `<width>x<height>: <count>...`, where width is the number
//! of columns and counts are listed in tile type order.

use crate::algorithm::scheduler::AreaTask;
use crate::io::configuration::MAX_AREA_CELLS;
use crate::io::error::{Result, SolverError, invalid_input};
use crate::spatial::catalog::TileCatalog;
use crate::spatial::region::Region;
use crate::spatial::shape::Shape;
use std::path::Path;

/// One area line of the puzzle
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AreaSpec {
    /// 1-based line the area was declared on
    pub line: usize,
    /// Area bounds
    pub region: Region,
    /// Required instances per tile type
    pub counts: Vec<usize>,
}

/// Parsed puzzle: reference shapes and the areas to evaluate
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Puzzle {
    /// Reference shapes in tile type order
    pub shapes: Vec<Shape>,
    /// Areas in declaration order
    pub areas: Vec<AreaSpec>,
}

impl Puzzle {
    /// Precompute rotations for every tile type
    pub fn catalog(&self) -> TileCatalog {
        TileCatalog::new(self.shapes.clone())
    }

    /// One task per area, indexed by declaration order
    pub fn tasks(&self) -> Vec<AreaTask> {
        self.areas
            .iter()
            .enumerate()
            .map(|(index, area)| AreaTask::new(index, area.region, area.counts.clone()))
            .collect()
    }
}

/// Read and parse a puzzle file
///
/// # Errors
///
/// Returns [`SolverError::FileSystem`] if the file cannot be read, or any
/// error of [`parse_puzzle`].
pub fn read_puzzle(path: &Path) -> Result<Puzzle> {
    let text = std::fs::read_to_string(path).map_err(|source| SolverError::FileSystem {
        path: path.to_path_buf(),
        operation: "read puzzle",
        source,
    })?;
    parse_puzzle(&text)
}

/// Parse puzzle text
///
/// # Errors
///
/// Returns [`SolverError::InvalidInput`] naming the first offending line:
/// out-of-order tile type headers, bad shape characters, empty shapes,
/// malformed area lines, or non-zero counts for undefined tile types.
pub fn parse_puzzle(text: &str) -> Result<Puzzle> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut puzzle = Puzzle::default();
    let mut cursor = 0;

    while let Some(&line) = lines.get(cursor) {
        let number = cursor + 1;
        cursor += 1;

        if line.is_empty() {
            continue;
        }

        if let Some(index) = shape_header(line) {
            let index = index.map_err(|reason| invalid_input(number, &reason))?;
            if index != puzzle.shapes.len() {
                return Err(invalid_input(
                    number,
                    &format!("expected tile type {}, found {index}", puzzle.shapes.len()),
                ));
            }

            let start = cursor;
            while lines
                .get(cursor)
                .is_some_and(|row| !row.is_empty() && !row.contains(':'))
            {
                cursor += 1;
            }
            let rows = lines.get(start..cursor).unwrap_or_default();

            let shape = Shape::from_rows(rows).map_err(|error| match error {
                SolverError::InvalidInput { line, reason } => invalid_input(start + line, &reason),
                other => other,
            })?;
            if shape.cell_count() == 0 {
                return Err(invalid_input(
                    number,
                    &format!("tile type {index} has no occupied cells"),
                ));
            }
            puzzle.shapes.push(shape);
        } else if line.contains(':') {
            puzzle.areas.push(parse_area(line, number)?);
        } else {
            return Err(invalid_input(number, &format!("unrecognized line '{line}'")));
        }
    }

    for area in &puzzle.areas {
        let undefined = area
            .counts
            .iter()
            .enumerate()
            .skip(puzzle.shapes.len())
            .find(|&(_, &count)| count > 0);
        if let Some((kind, _)) = undefined {
            return Err(invalid_input(
                area.line,
                &format!(
                    "requires tile type {kind}, but only {} are defined",
                    puzzle.shapes.len()
                ),
            ));
        }
    }

    Ok(puzzle)
}

/// `Some` when the line is a `<index>:` header; the inner result carries parse failures
fn shape_header(line: &str) -> Option<std::result::Result<usize, String>> {
    let label = line.strip_suffix(':')?;
    if label.contains('x') {
        return None;
    }
    Some(
        label
            .trim()
            .parse::<usize>()
            .map_err(|_parse_error| format!("invalid tile type index '{label}'")),
    )
}

fn parse_area(line: &str, number: usize) -> Result<AreaSpec> {
    let (dimensions, counts) = line
        .split_once(':')
        .ok_or_else(|| invalid_input(number, &"missing ':' after area dimensions"))?;
    let dimensions = dimensions.trim();
    let (width, height) = dimensions.split_once('x').ok_or_else(|| {
        invalid_input(
            number,
            &format!("expected <width>x<height>, found '{dimensions}'"),
        )
    })?;

    let cols = parse_number(width, number, "width")?;
    let rows = parse_number(height, number, "height")?;
    let region = Region::new(rows, cols);
    match region.checked_area() {
        Some(cells) if cells <= MAX_AREA_CELLS => {}
        _ => {
            return Err(invalid_input(
                number,
                &format!("area {region} exceeds the limit of {MAX_AREA_CELLS} cells"),
            ));
        }
    }
    let counts = counts
        .split_whitespace()
        .map(|count| parse_number(count, number, "tile count"))
        .collect::<Result<Vec<_>>>()?;

    Ok(AreaSpec {
        line: number,
        region,
        counts,
    })
}

fn parse_number(text: &str, number: usize, what: &str) -> Result<usize> {
    let text = text.trim();
    text.parse()
        .map_err(|_parse_error| invalid_input(number, &format!("invalid {what} '{text}'")))
}
