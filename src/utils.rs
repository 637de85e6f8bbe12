//! Formatting helpers for operator-facing output.

use crate::prune::{Outcome, PruneSummary};

/// Entries shown from each end of the worklist.
pub const PREVIEW_LEN: usize = 5;

/// Format the worklist preview: the first and last few entries plus totals.
pub fn format_preview(target: &str, entries: &[String], batch_size: usize, batches: usize) -> String {
    let mut message = format!(
        "About to delete {} item(s) under {target} in {batches} batch(es) of up to {batch_size}:\n",
        entries.len()
    );
    if entries.len() <= PREVIEW_LEN * 2 {
        for entry in entries {
            message.push_str(&format!("  {entry}\n"));
        }
    } else {
        for entry in &entries[..PREVIEW_LEN] {
            message.push_str(&format!("  {entry}\n"));
        }
        message.push_str(&format!(
            "  ... {} more ...\n",
            entries.len() - PREVIEW_LEN * 2
        ));
        for entry in &entries[entries.len() - PREVIEW_LEN..] {
            message.push_str(&format!("  {entry}\n"));
        }
    }
    message
}

/// One-paragraph summary printed when a run ends.
pub fn format_summary(summary: &PruneSummary) -> String {
    let verb = if summary.dry_run { "Would delete" } else { "Deleted" };
    let mut message = match summary.outcome {
        Outcome::Empty => format!("Nothing to do: {} has no entries.\n", summary.target),
        Outcome::Completed => format!(
            "Finished {}: {} batch(es) processed.\n",
            summary.target, summary.batches_processed
        ),
        Outcome::Cancelled => format!(
            "Cancelled {}: {} of {} batch(es) processed.\n",
            summary.target, summary.batches_processed, summary.batches
        ),
    };
    if summary.outcome != Outcome::Empty {
        message.push_str(&format!("{verb}: {}\n", summary.deleted.len()));
        message.push_str(&format!("Failed: {}\n", summary.failed.len()));
        for failed in &summary.failed {
            message.push_str(&format!("  {}: {}\n", failed.path, failed.error));
        }
    }
    message
}
