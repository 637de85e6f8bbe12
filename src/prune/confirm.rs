use crate::error::Result;
use crate::prune::batch::Batch;
use std::path::Path;

/// The only answer that approves a whole run.
pub const AFFIRMATIVE: &str = "yes";

/// What the operator is asked to approve before the first batch.
#[derive(Debug, Clone, Copy)]
pub struct RunPlan<'a> {
    pub target: &'a str,
    pub total: usize,
    pub batch_size: usize,
    pub batches: usize,
    pub work_dir: &'a Path,
}

/// Gate in front of every destructive step.
///
/// Returning `Ok(false)` stops the run; already processed batches stay
/// deleted and nothing else is touched.
pub trait Confirmer {
    /// Approve the whole run after the preview has been shown.
    async fn confirm_run(&mut self, plan: &RunPlan<'_>) -> Result<bool>;

    /// Approve the next batch.
    async fn confirm_batch(&mut self, batch: &Batch, total_batches: usize) -> Result<bool>;
}

/// Which confirmation gates a run goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ConfirmMode {
    /// Type `yes` once, then acknowledge every batch
    #[default]
    Both,
    /// Type `yes` once before the first batch
    Run,
    /// Acknowledge every batch
    Batch,
}

impl ConfirmMode {
    pub fn gates_run(&self) -> bool {
        matches!(self, ConfirmMode::Both | ConfirmMode::Run)
    }

    pub fn gates_batches(&self) -> bool {
        matches!(self, ConfirmMode::Both | ConfirmMode::Batch)
    }
}

/// Exact, case-sensitive `yes`; only the line terminator is ignored.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim_end_matches(['\r', '\n']) == AFFIRMATIVE
}
