//! Final batch summary text

use crate::algorithm::scheduler::BatchSummary;
use crate::algorithm::solver::FitStatus;

/// Percentage of `part` in `total`, zero for an empty batch
pub const fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

/// Summary lines printed after a batch
pub fn summary_lines(summary: &BatchSummary) -> Vec<String> {
    let total = summary.total();
    let fit = summary.fit_count();
    let mut lines = vec![
        format!(
            "Fit: {fit}/{total} areas ({:.1}%)",
            percentage(fit, total)
        ),
        format!(
            "  {}: {}",
            FitStatus::TooManyCells,
            summary.count(FitStatus::TooManyCells)
        ),
        format!(
            "  {}: {}",
            FitStatus::DoesNotFit,
            summary.count(FitStatus::DoesNotFit)
        ),
        format!("  unresolved: {}", summary.unresolved_count()),
        format!("Reused from cache: {} areas", summary.reused_count()),
        format!(
            "Cache: {} unique signatures, {} total hits",
            summary.cache.unique_signatures, summary.cache.total_hits
        ),
    ];

    if !summary.top_reused.is_empty() {
        lines.push("Most reused signatures:".to_string());
        for (signature, hits) in &summary.top_reused {
            lines.push(format!("  {signature}: {hits} hits"));
        }
    }

    lines
}

/// Summary as a single block of text
pub fn render_summary(summary: &BatchSummary) -> String {
    let mut text = summary_lines(summary).join("\n");
    text.push('\n');
    text
}
