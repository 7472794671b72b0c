//! Tests for the shared signature cache including concurrent deduplication and failure release

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::Barrier;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use tilefit::algorithm::cache::{CacheOutcome, Signature, SignatureCache};
    use tilefit::algorithm::solver::FitStatus;
    use tilefit::io::error::invalid_parameter;
    use tilefit::spatial::region::Region;

    fn signature(rows: usize, cols: usize, counts: &[usize]) -> Signature {
        Signature::new(Region::new(rows, cols), counts)
    }

    // Tests trailing zero counts do not change the key
    // Verified by keeping counts verbatim
    #[test]
    fn test_signature_trims_trailing_zeros() {
        assert_eq!(signature(4, 4, &[1, 0, 2, 0, 0]), signature(4, 4, &[1, 0, 2]));
        assert_eq!(signature(4, 4, &[0, 0]).counts(), &[] as &[usize]);
        assert_ne!(signature(4, 4, &[1, 0, 2]), signature(4, 4, &[1, 2]));
        assert_ne!(signature(4, 5, &[1]), signature(5, 4, &[1]));
    }

    // Tests first lookup computes and second lookup hits with the same result
    // Verified by removing the hit counter increment
    #[test]
    fn test_miss_then_hit() {
        let cache = SignatureCache::new();
        let key = signature(3, 3, &[1]);
        let mut computed = 0;

        let first = cache
            .get_or_compute(key.clone(), 0, || {
                computed += 1;
                Ok(FitStatus::Fits)
            })
            .expect("compute succeeds");
        assert_eq!(first, CacheOutcome::Miss {
            status: FitStatus::Fits
        });

        let second = cache
            .get_or_compute(key.clone(), 4, || {
                computed += 1;
                Ok(FitStatus::DoesNotFit)
            })
            .expect("cached lookup succeeds");
        assert_eq!(second, CacheOutcome::Hit {
            status: FitStatus::Fits,
            origin: 0,
            hits: 1
        });
        assert_eq!(first.status(), second.status());
        assert_eq!(computed, 1);

        let stats = cache.stats();
        assert_eq!(stats.unique_signatures, 1);
        assert_eq!(stats.total_hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(cache.peek(&key).map(|entry| entry.hits), Some(1));
    }

    // Tests a failed computation stores nothing and the next caller recomputes
    // Verified by storing a placeholder entry on error
    #[test]
    fn test_error_releases_signature() {
        let cache = SignatureCache::new();
        let key = signature(2, 2, &[1]);

        let failed =
            cache.get_or_compute(key.clone(), 0, || Err(invalid_parameter("area", &0, &"boom")));
        assert!(failed.is_err());
        assert!(cache.peek(&key).is_none());

        let retried = cache
            .get_or_compute(key.clone(), 1, || Ok(FitStatus::TooManyCells))
            .expect("retry succeeds");
        assert_eq!(retried, CacheOutcome::Miss {
            status: FitStatus::TooManyCells
        });
        assert_eq!(cache.stats().misses, 2);
    }

    // Tests a panicking computation does not leave the signature pending forever
    // Verified by removing the pending slot cleanup from the claim guard
    #[test]
    fn test_panic_releases_signature() {
        let cache = SignatureCache::new();
        let key = signature(2, 3, &[2]);

        let attempt = panic::catch_unwind(AssertUnwindSafe(|| {
            cache.get_or_compute(key.clone(), 0, || panic!("solver bug"))
        }));
        assert!(attempt.is_err());

        let outcome = cache
            .get_or_compute(key, 1, || Ok(FitStatus::Fits))
            .expect("recompute succeeds");
        assert_eq!(outcome.status(), FitStatus::Fits);
    }

    // Tests concurrent identical signatures compute once and hit n-1 times
    // Verified by releasing the lock without marking the signature pending
    #[test]
    fn test_concurrent_identical_signatures_compute_once() {
        const THREADS: usize = 8;
        let cache = SignatureCache::new();
        let computations = AtomicUsize::new(0);
        let barrier = Barrier::new(THREADS);

        let outcomes: Vec<CacheOutcome> = thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|index| {
                    let (cache, computations, barrier) = (&cache, &computations, &barrier);
                    scope.spawn(move || {
                        barrier.wait();
                        cache
                            .get_or_compute(signature(5, 12, &[1, 0, 1]), index, || {
                                computations.fetch_add(1, Ordering::SeqCst);
                                thread::sleep(std::time::Duration::from_millis(20));
                                Ok(FitStatus::DoesNotFit)
                            })
                            .expect("compute succeeds")
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("thread completes"))
                .collect()
        });

        assert_eq!(computations.load(Ordering::SeqCst), 1);
        let misses = outcomes
            .iter()
            .filter(|outcome| matches!(outcome, CacheOutcome::Miss { .. }))
            .count();
        assert_eq!(misses, 1);
        assert!(
            outcomes
                .iter()
                .all(|outcome| outcome.status() == FitStatus::DoesNotFit)
        );
        assert_eq!(cache.stats().total_hits, THREADS - 1);
    }

    // Tests reuse ranking orders by hits then by signature
    // Verified by sorting hits ascending
    #[test]
    fn test_top_reused_ordering() {
        let cache = SignatureCache::new();
        let popular = signature(4, 4, &[2]);
        let second = signature(3, 3, &[1]);
        let unused = signature(9, 9, &[1]);

        for key in [&popular, &second, &unused] {
            assert!(cache.get_or_compute(key.clone(), 0, || Ok(FitStatus::Fits)).is_ok());
        }
        for _ in 0..3 {
            assert!(cache.get_or_compute(popular.clone(), 1, || Ok(FitStatus::Fits)).is_ok());
        }
        assert!(cache.get_or_compute(second.clone(), 1, || Ok(FitStatus::Fits)).is_ok());

        let top = cache.top_reused(5);
        assert_eq!(top, vec![(popular, 3), (second, 1)]);
        assert_eq!(cache.top_reused(1).len(), 1);
    }

    // Tests signature display includes dimensions and counts
    // Verified by printing rows before columns
    #[test]
    fn test_signature_display() {
        assert_eq!(signature(5, 12, &[1, 0, 2, 0]).to_string(), "12x5 [1, 0, 2]");
    }
}
