use crate::error::{Error, Result};
use crate::prune::{FailedEntry, Outcome, PruneSummary};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// JSON record of a run, rewritten after every batch.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub started_at: u64,
    pub updated_at: u64,
    pub hdfs_path: &'a str,
    pub outcome: Option<Outcome>,
    pub dry_run: bool,
    pub batch_size: usize,
    pub total_batches: usize,
    pub batches_processed: usize,
    pub total_entries: usize,
    pub total_deleted: usize,
    pub total_failed: usize,
    pub deleted_partitions: &'a [String],
    pub failed_partitions: &'a [FailedEntry],
}

impl<'a> RunReport<'a> {
    pub fn new(summary: &'a PruneSummary, started_at: u64, finished: bool) -> Self {
        Self {
            started_at,
            updated_at: unix_now(),
            hdfs_path: &summary.target,
            outcome: finished.then_some(summary.outcome),
            dry_run: summary.dry_run,
            batch_size: summary.batch_size,
            total_batches: summary.batches,
            batches_processed: summary.batches_processed,
            total_entries: summary.total,
            total_deleted: summary.deleted.len(),
            total_failed: summary.failed.len(),
            deleted_partitions: &summary.deleted,
            failed_partitions: &summary.failed,
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| Error::ReportWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}

pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
