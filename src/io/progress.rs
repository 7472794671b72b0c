//! Batch progress display while areas resolve

use crate::algorithm::scheduler::{TaskOutcome, TaskReport};
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};

/// Single progress bar over all areas of a batch
///
/// Each report advances the bar and prints one line above it describing the
/// area's outcome.
pub struct ProgressManager {
    bar: ProgressBar,
    total: usize,
    fits: usize,
}

impl ProgressManager {
    /// Create a visible bar for `total` areas
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(Self::style());
        Self {
            bar,
            total,
            fits: 0,
        }
    }

    /// Create a bar that draws nothing
    pub fn hidden(total: usize) -> Self {
        Self {
            bar: ProgressBar::hidden(),
            total,
            fits: 0,
        }
    }

    fn style() -> ProgressStyle {
        let template = format!(
            "[{{elapsed_precise}}] Areas: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        );
        ProgressStyle::default_bar()
            .template(&template)
            .unwrap_or_else(|_template_error| ProgressStyle::default_bar())
    }

    /// Advance the bar for one finished area
    pub fn record(&mut self, report: &TaskReport) {
        if report.outcome.fits() {
            self.fits += 1;
        }
        self.bar.println(Self::describe(report, self.total));
        self.bar.set_message(format!("{} fit", self.fits));
        self.bar.inc(1);
    }

    /// One-line description of a report
    pub fn describe(report: &TaskReport, total: usize) -> String {
        let mut line = format!(
            "Area {}/{}: {} ({} cells) - {}",
            report.index + 1,
            total,
            report.region,
            report.region.area(),
            report.outcome.label()
        );
        if let Some(origin) = report.reused_from {
            line.push_str(&format!(" (same as area {})", origin + 1));
        }
        if let TaskOutcome::Failed(reason) = &report.outcome {
            line.push_str(&format!(": {reason}"));
        }
        if let Some(worker) = report.worker {
            line.push_str(&format!(
                " [worker {worker}, {:.2}s]",
                report.elapsed.as_secs_f64()
            ));
        }
        line
    }

    /// Areas recorded so far that fit
    pub const fn fits(&self) -> usize {
        self.fits
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
