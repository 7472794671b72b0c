//! Scheduler constants and runtime configuration defaults

use std::time::Duration;

// Worker pool sizing
/// Upper bound on the default number of workers
pub const MAX_DEFAULT_WORKERS: usize = 8;

/// Capacity of the bounded task queue
pub const TASK_QUEUE_CAPACITY: usize = 64;

/// How long a worker blocks on an empty queue before polling again
pub const QUEUE_POLL_TIMEOUT: Duration = Duration::from_secs(1);

// Reporting
/// Number of most reused signatures listed in the summary
pub const TOP_REUSED_SIGNATURES: usize = 5;

/// Width of the batch progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Input format
/// Largest area, in cells, accepted for a single region
///
/// The constraint matrix holds one secondary column per cell, so larger areas
/// are rejected before any allocation.
pub const MAX_AREA_CELLS: usize = 1 << 20;

/// Character marking an occupied cell in a tile shape
pub const FILLED_CELL: char = '#';
/// Character marking an empty cell in a tile shape
pub const EMPTY_CELL: char = '.';

/// Default worker count: available parallelism capped at [`MAX_DEFAULT_WORKERS`]
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map_or(1, std::num::NonZeroUsize::get)
        .min(MAX_DEFAULT_WORKERS)
}
