//! Tests for log level selection and subscriber installation

#[cfg(test)]
mod tests {
    use tilefit::io::logging::{env_filter, init_logging, verbosity_directive};

    // Tests each -v count maps to the next level
    // Verified by starting the default at info
    #[test]
    fn test_verbosity_directive() {
        assert_eq!(verbosity_directive(0), "warn");
        assert_eq!(verbosity_directive(1), "info");
        assert_eq!(verbosity_directive(2), "debug");
        assert_eq!(verbosity_directive(3), "trace");
        assert_eq!(verbosity_directive(9), "trace");
    }

    // Tests the filter builds for every verbosity
    // Verified by panicking on unparsable directives
    #[test]
    fn test_env_filter_builds() {
        for verbosity in 0..4 {
            let filter = env_filter(verbosity);
            assert!(!filter.to_string().is_empty());
        }
    }

    // Tests the global subscriber is installed at most once
    // Verified by replacing an existing subscriber
    #[test]
    fn test_init_logging_once() {
        let _first = init_logging(1);
        assert!(!init_logging(2));
    }
}
