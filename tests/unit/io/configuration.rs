//! Tests for configuration constants and defaults

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use tilefit::io::configuration::{
        EMPTY_CELL, FILLED_CELL, MAX_AREA_CELLS, MAX_DEFAULT_WORKERS, PROGRESS_BAR_WIDTH, QUEUE_POLL_TIMEOUT,
        TASK_QUEUE_CAPACITY, TOP_REUSED_SIGNATURES, default_worker_count,
    };

    // Tests default worker count stays within one and the cap
    // Verified by returning raw available parallelism
    #[test]
    fn test_default_worker_count_bounds() {
        let workers = default_worker_count();
        assert!(workers >= 1);
        assert!(workers <= MAX_DEFAULT_WORKERS);
    }

    // Tests constants hold the documented values
    // Verified by changing each constant
    #[test]
    fn test_constant_values() {
        assert_eq!(MAX_DEFAULT_WORKERS, 8);
        assert_eq!(QUEUE_POLL_TIMEOUT, Duration::from_secs(1));
        assert_eq!(TOP_REUSED_SIGNATURES, 5);
        assert_eq!(PROGRESS_BAR_WIDTH, 40);
        assert!(TASK_QUEUE_CAPACITY > 0);
        assert_ne!(FILLED_CELL, EMPTY_CELL);
        assert_eq!(MAX_AREA_CELLS, 1 << 20);
    }
}
