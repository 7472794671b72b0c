/// Command-line parsing and batch orchestration
pub mod cli;
/// Constants and defaults shared across the crate
pub mod configuration;
/// Error types for parsing, matrix construction and file access
pub mod error;
/// Puzzle file parsing
pub mod input;
/// Tracing subscriber setup
pub mod logging;
/// Terminal progress display
pub mod progress;
/// Batch summary formatting
pub mod report;
