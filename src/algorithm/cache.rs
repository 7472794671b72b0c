//! Shared result cache keyed by subproblem signature
//!
//! Areas with the same bounds and the same tile multiset have the same
//! answer, so only the first is solved. The cache is shared by reference
//! between workers and guarded by a mutex. A signature being computed is
//! marked pending; other workers asking for it wait on a condition variable
//! instead of solving it again, so each signature is solved once per batch.

use crate::algorithm::solver::FitStatus;
use crate::io::error::Result;
use crate::spatial::region::Region;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Canonical key for structurally identical areas
///
/// Trailing zero counts are dropped, so `[1, 0]` and `[1]` share a key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature {
    region: Region,
    counts: Vec<usize>,
}

impl Signature {
    /// Build the key for an area and its per-type instance counts
    pub fn new(region: Region, counts: &[usize]) -> Self {
        let used = counts
            .iter()
            .rposition(|&count| count > 0)
            .map_or(0, |last| last + 1);
        Self {
            region,
            counts: counts.iter().take(used).copied().collect(),
        }
    }

    /// Area bounds
    pub const fn region(&self) -> Region {
        self.region
    }

    /// Per-type counts without trailing zeros
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.region, self.counts)
    }
}

/// How a [`SignatureCache::get_or_compute`] call was served
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Served from an earlier computation
    Hit {
        /// Stored result
        status: FitStatus,
        /// Area index whose computation produced the result
        origin: usize,
        /// Hits recorded for this signature, including this one
        hits: usize,
    },
    /// Computed by this call and stored
    Miss {
        /// Freshly computed result
        status: FitStatus,
    },
}

impl CacheOutcome {
    /// Result regardless of how it was obtained
    pub const fn status(&self) -> FitStatus {
        match self {
            Self::Hit { status, .. } | Self::Miss { status } => *status,
        }
    }
}

/// Stored result for one signature
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheEntry {
    /// Classification of the area
    pub status: FitStatus,
    /// Area index that computed it
    pub origin: usize,
    /// Times the entry has been reused
    pub hits: usize,
}

/// Aggregate cache counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Distinct signatures with a stored result
    pub unique_signatures: usize,
    /// Reuses across all signatures
    pub total_hits: usize,
    /// Computations started
    pub misses: usize,
}

enum Slot {
    Pending,
    Ready(CacheEntry),
}

#[derive(Default)]
struct CacheState {
    slots: HashMap<Signature, Slot>,
    misses: usize,
}

/// Process-wide result cache shared by all workers of a batch
#[derive(Default)]
pub struct SignatureCache {
    state: Mutex<CacheState>,
    ready: Condvar,
}

impl SignatureCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    // Every mutation leaves the map consistent, so a poisoned lock is still usable
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached result for `signature` or compute and store it
    ///
    /// If another worker is computing the same signature, this call blocks
    /// until that result is stored and then counts as a hit. If that worker
    /// fails, one of the waiters takes over the computation.
    ///
    /// # Errors
    ///
    /// Propagates the error of `compute`; nothing is stored in that case.
    pub fn get_or_compute<F>(
        &self,
        signature: Signature,
        origin: usize,
        compute: F,
    ) -> Result<CacheOutcome>
    where
        F: FnOnce() -> Result<FitStatus>,
    {
        let mut state = self.lock();
        loop {
            let pending = match state.slots.get_mut(&signature) {
                Some(Slot::Ready(entry)) => {
                    entry.hits += 1;
                    return Ok(CacheOutcome::Hit {
                        status: entry.status,
                        origin: entry.origin,
                        hits: entry.hits,
                    });
                }
                Some(Slot::Pending) => true,
                None => false,
            };
            if !pending {
                break;
            }
            state = self
                .ready
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }

        state.slots.insert(signature.clone(), Slot::Pending);
        state.misses += 1;
        drop(state);

        let claim = PendingClaim {
            cache: self,
            signature: Some(signature),
        };
        let status = compute()?;
        claim.fulfil(CacheEntry {
            status,
            origin,
            hits: 0,
        });

        Ok(CacheOutcome::Miss { status })
    }

    /// Stored entry for a signature without counting a hit
    pub fn peek(&self, signature: &Signature) -> Option<CacheEntry> {
        let state = self.lock();
        match state.slots.get(signature) {
            Some(Slot::Ready(entry)) => Some(*entry),
            _ => None,
        }
    }

    /// Aggregate counters
    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        let mut stats = CacheStats {
            misses: state.misses,
            ..CacheStats::default()
        };
        for slot in state.slots.values() {
            if let Slot::Ready(entry) = slot {
                stats.unique_signatures += 1;
                stats.total_hits += entry.hits;
            }
        }
        stats
    }

    /// The `limit` most reused signatures, most hits first, ties by signature
    pub fn top_reused(&self, limit: usize) -> Vec<(Signature, usize)> {
        let state = self.lock();
        let mut reused: Vec<(Signature, usize)> = state
            .slots
            .iter()
            .filter_map(|(signature, slot)| match slot {
                Slot::Ready(entry) if entry.hits > 0 => Some((signature.clone(), entry.hits)),
                _ => None,
            })
            .collect();
        drop(state);

        reused.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        reused.truncate(limit);
        reused
    }
}

/// Ownership of a pending slot; releases it for another worker if dropped unfulfilled
struct PendingClaim<'c> {
    cache: &'c SignatureCache,
    signature: Option<Signature>,
}

impl PendingClaim<'_> {
    fn fulfil(mut self, entry: CacheEntry) {
        if let Some(signature) = self.signature.take() {
            self.cache
                .lock()
                .slots
                .insert(signature, Slot::Ready(entry));
            self.cache.ready.notify_all();
        }
    }
}

impl Drop for PendingClaim<'_> {
    fn drop(&mut self) {
        if let Some(signature) = self.signature.take() {
            self.cache.lock().slots.remove(&signature);
            self.cache.ready.notify_all();
        }
    }
}
