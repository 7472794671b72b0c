//! Error types for matrix construction, input parsing and batch configuration

use std::fmt;
use std::path::PathBuf;

/// Main error type for all solver operations
///
/// Infeasible areas are not errors: they are reported through
/// [`FitStatus`](crate::algorithm::solver::FitStatus).
#[derive(Debug)]
pub enum SolverError {
    /// A link row references a column beyond the declared primary + secondary columns
    ColumnOutOfRange {
        /// Row identifier being inserted
        row: usize,
        /// Offending column index
        column: usize,
        /// Number of declared columns
        column_count: usize,
    },

    /// A link row lists the same column more than once
    DuplicateColumn {
        /// Row identifier being inserted
        row: usize,
        /// Column index that appeared twice
        column: usize,
    },

    /// A count vector requires instances of a tile type that does not exist
    UnknownTileType {
        /// Requested tile type index
        kind: usize,
        /// Number of tile types in the catalog
        available: usize,
    },

    /// Puzzle text could not be parsed
    InvalidInput {
        /// 1-based line number of the failure
        line: usize,
        /// Description of what is wrong with the line
        reason: String,
    },

    /// Runtime parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColumnOutOfRange {
                row,
                column,
                column_count,
            } => {
                write!(
                    f,
                    "Row {row} references column {column}, but only {column_count} columns exist"
                )
            }
            Self::DuplicateColumn { row, column } => {
                write!(f, "Row {row} lists column {column} more than once")
            }
            Self::UnknownTileType { kind, available } => {
                write!(
                    f,
                    "Tile type {kind} is required but only {available} tile types are defined"
                )
            }
            Self::InvalidInput { line, reason } => {
                write!(f, "Invalid input on line {line}: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, SolverError>;

impl From<std::io::Error> for SolverError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SolverError {
    SolverError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an input parsing error for a 1-based line number
pub fn invalid_input(line: usize, reason: &impl ToString) -> SolverError {
    SolverError::InvalidInput {
        line,
        reason: reason.to_string(),
    }
}
