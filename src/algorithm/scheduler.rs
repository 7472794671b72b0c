//! Worker pool evaluating a batch of independent area tasks
//!
//! A producer thread feeds a bounded queue, followed by one shutdown
//! sentinel per worker. Workers share the receiving end, consult the
//! [`SignatureCache`] before solving, and publish a [`TaskReport`] per task in
//! completion order. The caller's thread aggregates reports and restores
//! submission order. A solve that errors or panics is reported as an
//! unresolved task; it never disappears from the totals.

use crate::algorithm::cache::{CacheOutcome, CacheStats, Signature, SignatureCache};
use crate::algorithm::solver::{FitStatus, solve_counts};
use crate::io::configuration::{
    QUEUE_POLL_TIMEOUT, TASK_QUEUE_CAPACITY, TOP_REUSED_SIGNATURES, default_worker_count,
};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::catalog::TileCatalog;
use crate::spatial::region::Region;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

/// One area to evaluate
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AreaTask {
    /// Caller's identifier for the area; reports are ordered by it
    pub index: usize,
    /// Area bounds
    pub region: Region,
    /// Required instances per tile type
    pub counts: Vec<usize>,
}

impl AreaTask {
    /// Create a task
    pub const fn new(index: usize, region: Region, counts: Vec<usize>) -> Self {
        Self {
            index,
            region,
            counts,
        }
    }

    /// Cache key shared by structurally identical tasks
    pub fn signature(&self) -> Signature {
        Signature::new(self.region, &self.counts)
    }
}

/// Final state of a task
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The area was classified
    Resolved(FitStatus),
    /// The worker failed on this task, or no report ever arrived
    Failed(String),
}

impl TaskOutcome {
    /// True only for a resolved fitting area
    pub const fn fits(&self) -> bool {
        matches!(self, Self::Resolved(FitStatus::Fits))
    }

    /// Status label: the fit status, or `"unresolved"` for failures
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Resolved(status) => status.label(),
            Self::Failed(_) => "unresolved",
        }
    }
}

/// Per-task result published by a worker
#[derive(Clone, Debug)]
pub struct TaskReport {
    /// Area identifier from the task
    pub index: usize,
    /// Area bounds
    pub region: Region,
    /// Required instances per tile type
    pub counts: Vec<usize>,
    /// Classification or failure
    pub outcome: TaskOutcome,
    /// Area whose cached result was reused, if any
    pub reused_from: Option<usize>,
    /// Worker that handled the task; `None` when no report arrived
    pub worker: Option<usize>,
    /// Wall time spent on the task, including cache waits
    pub elapsed: Duration,
}

/// Worker pool parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Number of concurrent workers
    pub workers: usize,
    /// Bound of the task queue
    pub queue_capacity: usize,
    /// How long a worker blocks on an empty queue before polling again
    pub poll_timeout: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            workers: default_worker_count(),
            queue_capacity: TASK_QUEUE_CAPACITY,
            poll_timeout: QUEUE_POLL_TIMEOUT,
        }
    }
}

impl SchedulerConfig {
    /// Default configuration with an explicit worker count
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidParameter`](crate::SolverError::InvalidParameter)
    /// when `workers` is zero.
    pub fn with_workers(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(invalid_parameter(
                "workers",
                &workers,
                &"at least one worker is required",
            ));
        }
        Ok(Self {
            workers,
            ..Self::default()
        })
    }
}

/// Everything produced by one batch
#[derive(Clone, Debug)]
pub struct BatchSummary {
    /// One report per submitted task, ordered by area index, then submission order
    pub reports: Vec<TaskReport>,
    /// Cache counters after the batch
    pub cache: CacheStats,
    /// Most reused signatures with their hit counts
    pub top_reused: Vec<(Signature, usize)>,
}

impl BatchSummary {
    /// Number of submitted tasks
    pub const fn total(&self) -> usize {
        self.reports.len()
    }

    /// Areas that fit
    pub fn fit_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| report.outcome.fits())
            .count()
    }

    /// Areas resolved with the given status
    pub fn count(&self, status: FitStatus) -> usize {
        self.reports
            .iter()
            .filter(|report| report.outcome == TaskOutcome::Resolved(status))
            .count()
    }

    /// Areas without a classification
    pub fn unresolved_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| matches!(report.outcome, TaskOutcome::Failed(_)))
            .count()
    }

    /// Areas answered from the cache
    pub fn reused_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| report.reused_from.is_some())
            .count()
    }
}

enum Job {
    /// Submission slot and the task submitted in it
    Area(usize, AreaTask),
    Shutdown,
}

/// Distributes area tasks over a fixed pool of workers sharing one cache
pub struct Scheduler<'a> {
    config: SchedulerConfig,
    catalog: &'a TileCatalog,
    cache: &'a SignatureCache,
}

impl<'a> Scheduler<'a> {
    /// Create a scheduler over a catalog and a shared cache
    pub const fn new(
        config: SchedulerConfig,
        catalog: &'a TileCatalog,
        cache: &'a SignatureCache,
    ) -> Self {
        Self {
            config,
            catalog,
            cache,
        }
    }

    /// Solve every task with the exact-cover solver
    ///
    /// `on_report` runs on the calling thread for each report as it arrives.
    pub fn run<F>(&self, tasks: Vec<AreaTask>, on_report: F) -> BatchSummary
    where
        F: FnMut(&TaskReport),
    {
        self.run_with(
            tasks,
            |task, catalog| Ok(solve_counts(task.region, catalog, &task.counts)?.status),
            on_report,
        )
    }

    /// Solve every task with a caller-supplied solve function
    ///
    /// The function is only called on cache misses.
    pub fn run_with<S, F>(&self, tasks: Vec<AreaTask>, solve: S, mut on_report: F) -> BatchSummary
    where
        S: Fn(&AreaTask, &TileCatalog) -> Result<FitStatus> + Sync,
        F: FnMut(&TaskReport),
    {
        let workers = self.config.workers.max(1);
        let expected: Vec<(usize, Region, Vec<usize>)> = tasks
            .iter()
            .map(|task| (task.index, task.region, task.counts.clone()))
            .collect();

        tracing::info!(tasks = expected.len(), workers, "starting batch");

        let (job_tx, job_rx) = mpsc::sync_channel::<Job>(self.config.queue_capacity.max(1));
        // Only workers hold the receiver, so the producer unblocks if they all exit
        let job_rx = Arc::new(Mutex::new(job_rx));
        let (report_tx, report_rx) = mpsc::channel::<(usize, TaskReport)>();
        // Keyed by submission slot, so tasks sharing an index cannot overwrite each other
        let mut received: Vec<Option<TaskReport>> = vec![None; expected.len()];

        thread::scope(|scope| {
            let solve = &solve;
            for worker in 0..workers {
                let jobs = Arc::clone(&job_rx);
                let reports = report_tx.clone();
                scope.spawn(move || self.work(worker, &jobs, &reports, solve));
            }
            drop(job_rx);
            drop(report_tx);

            scope.spawn(move || {
                for (slot, task) in tasks.into_iter().enumerate() {
                    if job_tx.send(Job::Area(slot, task)).is_err() {
                        return;
                    }
                }
                for _ in 0..workers {
                    if job_tx.send(Job::Shutdown).is_err() {
                        return;
                    }
                }
            });

            for (slot, report) in &report_rx {
                on_report(&report);
                if let Some(entry) = received.get_mut(slot) {
                    *entry = Some(report);
                }
            }
        });

        let mut reports: Vec<TaskReport> = expected
            .into_iter()
            .zip(received)
            .map(|((index, region, counts), report)| {
                report.unwrap_or_else(|| {
                    tracing::error!(area = index + 1, "no result received");
                    TaskReport {
                        index,
                        region,
                        counts,
                        outcome: TaskOutcome::Failed("no result received".to_string()),
                        reused_from: None,
                        worker: None,
                        elapsed: Duration::ZERO,
                    }
                })
            })
            .collect();
        reports.sort_by_key(|report| report.index);

        let summary = BatchSummary {
            reports,
            cache: self.cache.stats(),
            top_reused: self.cache.top_reused(TOP_REUSED_SIGNATURES),
        };
        tracing::info!(
            fit = summary.fit_count(),
            total = summary.total(),
            unresolved = summary.unresolved_count(),
            "batch finished"
        );
        summary
    }

    fn work<S>(
        &self,
        worker: usize,
        jobs: &Mutex<Receiver<Job>>,
        reports: &Sender<(usize, TaskReport)>,
        solve: &S,
    ) where
        S: Fn(&AreaTask, &TileCatalog) -> Result<FitStatus> + Sync,
    {
        let _span = tracing::debug_span!("worker", id = worker).entered();
        loop {
            let job = jobs
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .recv_timeout(self.config.poll_timeout);

            match job {
                Ok(Job::Area(slot, task)) => {
                    let report = self.process(worker, task, solve);
                    if reports.send((slot, report)).is_err() {
                        break;
                    }
                }
                Ok(Job::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {}
            }
        }
        tracing::debug!("worker stopped");
    }

    fn process<S>(&self, worker: usize, task: AreaTask, solve: &S) -> TaskReport
    where
        S: Fn(&AreaTask, &TileCatalog) -> Result<FitStatus> + Sync,
    {
        let started = Instant::now();
        let attempt = panic::catch_unwind(AssertUnwindSafe(|| {
            self.cache
                .get_or_compute(task.signature(), task.index, || solve(&task, self.catalog))
        }));

        let (outcome, reused_from) = match attempt {
            Ok(Ok(CacheOutcome::Hit {
                status,
                origin,
                hits,
            })) => {
                tracing::debug!(
                    area = task.index + 1,
                    region = %task.region,
                    %status,
                    same_as = origin + 1,
                    reused = hits,
                    "cached"
                );
                (TaskOutcome::Resolved(status), Some(origin))
            }
            Ok(Ok(CacheOutcome::Miss { status })) => {
                tracing::debug!(
                    area = task.index + 1,
                    region = %task.region,
                    %status,
                    elapsed_ms = started.elapsed().as_millis(),
                    "solved"
                );
                (TaskOutcome::Resolved(status), None)
            }
            Ok(Err(error)) => {
                tracing::warn!(area = task.index + 1, %error, "solve failed");
                (TaskOutcome::Failed(error.to_string()), None)
            }
            Err(payload) => {
                let reason = panic_reason(payload.as_ref());
                tracing::error!(area = task.index + 1, %reason, "worker panicked");
                (TaskOutcome::Failed(reason), None)
            }
        };

        TaskReport {
            index: task.index,
            region: task.region,
            counts: task.counts,
            outcome,
            reused_from,
            worker: Some(worker),
            elapsed: started.elapsed(),
        }
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .map_or_else(
            || "worker panicked".to_string(),
            |message| format!("worker panicked: {message}"),
        )
}
