//! Batched, operator-gated deletion of every child of a remote directory.
//!
//! A run moves through
//!
//! ```text
//! Listing -> (empty) -> Done
//!         -> Batching -> Previewing -> AwaitingConfirm -> (denied) -> Cancelled
//!                                         ^         \-> (approved) -> Deleting
//!                                         \-------- more batches <------/
//!                                                   no batches left -> Done
//! ```
//!
//! `Done` and `Cancelled` both remove the on-disk batch state. Any other error
//! leaves it in place so the run can be resumed with [`PruneOptions::resume`].
//!
//! A raised [`Interrupt`] moves the run to `Cancelled` at the next entry, the
//! next batch, or the pending prompt or delay. An entry already being removed
//! is allowed to finish.

pub mod batch;
pub mod confirm;
pub mod interrupt;
pub mod report;
pub mod state;

use crate::error::{Error, Result};
use crate::storage::utils::path::last_segment;
use crate::storage::{Deleter, Lister};
use crate::utils::format_preview;
use globset::GlobMatcher;
use serde::Serialize;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Duration;

use self::batch::{Batch, BatchSizing, split_batches};
use self::confirm::{ConfirmMode, Confirmer, RunPlan};
pub use self::interrupt::{Interrupt, InterruptHandle};
use self::report::{RunReport, unix_now};
use self::state::WorkDir;

#[derive(Debug, Clone)]
pub struct PruneOptions {
    pub sizing: BatchSizing,
    pub confirm: ConfirmMode,
    pub skip_trash: bool,
    /// Pause between batches
    pub delay: Duration,
    pub dry_run: bool,
    /// Only entries whose last path segment matches are deleted
    pub name_filter: Option<GlobMatcher>,
    /// Directory that receives the per-run batch state
    pub work_root: PathBuf,
    /// Continue from the batch state of an interrupted run instead of listing
    pub resume: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

impl Default for PruneOptions {
    fn default() -> Self {
        Self {
            sizing: BatchSizing::Adaptive,
            confirm: ConfirmMode::Both,
            skip_trash: true,
            delay: Duration::ZERO,
            dry_run: false,
            name_filter: None,
            work_root: std::env::temp_dir(),
            resume: None,
            report: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The listing had no entries
    Empty,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedEntry {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneSummary {
    pub target: String,
    pub outcome: Outcome,
    pub dry_run: bool,
    pub batch_size: usize,
    pub total: usize,
    pub batches: usize,
    pub batches_processed: usize,
    pub deleted: Vec<String>,
    pub failed: Vec<FailedEntry>,
}

impl PruneSummary {
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_string(),
            outcome: Outcome::Empty,
            dry_run: false,
            batch_size: 0,
            total: 0,
            batches: 0,
            batches_processed: 0,
            deleted: Vec::new(),
            failed: Vec::new(),
        }
    }
}

enum State {
    Listing,
    Resuming(PathBuf),
    Batching(Vec<String>),
    Previewing,
    AwaitingConfirm,
    Deleting,
    Cancelled,
    Done,
}

/// Mutable bookkeeping for one run.
struct Run {
    summary: PruneSummary,
    work: Option<WorkDir>,
    queue: VecDeque<Batch>,
    started_at: u64,
}

/// Drives one prune run over a store that can list and remove entries.
pub struct Pruner<S, C> {
    store: S,
    confirmer: C,
    options: PruneOptions,
    interrupt: Interrupt,
}

impl<S, C> Pruner<S, C>
where
    S: Lister + Deleter,
    C: Confirmer,
{
    pub fn new(store: S, confirmer: C, options: PruneOptions) -> Self {
        Self {
            store,
            confirmer,
            options,
            interrupt: Interrupt::never(),
        }
    }

    /// Stop the run when `interrupt` is raised.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn confirmer(&self) -> &C {
        &self.confirmer
    }

    /// Run the workflow against `target` until it is done or cancelled.
    pub async fn run(&mut self, target: &str) -> Result<PruneSummary> {
        let mut run = Run {
            summary: PruneSummary::new(target),
            work: None,
            queue: VecDeque::new(),
            started_at: unix_now(),
        };
        run.summary.dry_run = self.options.dry_run;

        let mut state = match &self.options.resume {
            Some(dir) => State::Resuming(dir.clone()),
            None => State::Listing,
        };

        loop {
            if self.interrupt.is_set() {
                log::warn!("interrupted, skipping the remaining work");
                run.summary.outcome = Outcome::Cancelled;
                break;
            }

            let step = self.step(state, &mut run).await;
            state = match step {
                Ok(next) => next,
                Err(err) => {
                    if let Some(work) = &run.work {
                        log::error!(
                            "run stopped with batch state kept in {}; resume with --resume {}",
                            work.path().display(),
                            work.path().display()
                        );
                    }
                    return Err(err);
                }
            };

            match state {
                State::Done => {
                    if run.summary.batches > 0 {
                        run.summary.outcome = Outcome::Completed;
                    }
                    break;
                }
                State::Cancelled => {
                    run.summary.outcome = Outcome::Cancelled;
                    break;
                }
                _ => {}
            }
        }

        if let Some(work) = run.work.take() {
            work.cleanup()?;
        }
        self.write_report(&run, true)?;
        Ok(run.summary)
    }

    async fn step(&mut self, state: State, run: &mut Run) -> Result<State> {
        match state {
            State::Listing => {
                let target = run.summary.target.clone();
                let entries = self.store.list(&target).await?;
                log::info!("listed {} entries under {target}", entries.len());
                let entries = self.apply_name_filter(entries);
                if entries.is_empty() {
                    println!("Nothing to do: {target} has no entries.");
                    Ok(State::Done)
                } else {
                    Ok(State::Batching(entries))
                }
            }
            State::Resuming(dir) => {
                let work = WorkDir::open(&dir)?;
                if let Some(recorded) = work.target()?
                    && recorded != run.summary.target
                {
                    return Err(Error::InvalidArgument {
                        message: format!(
                            "{} holds batches for '{recorded}', not '{}'",
                            dir.display(),
                            run.summary.target
                        ),
                    });
                }
                let batches = work.load_batches()?;
                log::info!(
                    "resuming {} with {} remaining batch(es)",
                    dir.display(),
                    batches.len()
                );
                run.summary.total = batches.iter().map(Batch::len).sum();
                run.summary.batch_size = batches.iter().map(Batch::len).max().unwrap_or(0);
                // Batch files are dropped in order, so everything before the
                // first remaining index already finished.
                run.summary.batches = batches.last().map_or(0, |b| b.index);
                run.summary.batches_processed =
                    batches.first().map_or(0, |b| b.index.saturating_sub(1));
                run.queue = batches.into();
                run.work = Some(work);
                if run.queue.is_empty() {
                    println!("Nothing to do: no batches left in {}.", dir.display());
                    Ok(State::Done)
                } else {
                    Ok(State::Previewing)
                }
            }
            State::Batching(entries) => {
                let size = self.options.sizing.size_for(entries.len());
                let batches = split_batches(&entries, size);
                log::info!(
                    "split {} entries into {} batch(es) of up to {size}",
                    entries.len(),
                    batches.len()
                );

                let work = WorkDir::create(&self.options.work_root)?;
                if let Err(err) = work.write_batches(&run.summary.target, &batches) {
                    // Nothing was deleted yet, so a partial worklist is useless.
                    let _ = work.cleanup();
                    return Err(err);
                }

                run.summary.total = entries.len();
                run.summary.batch_size = size;
                run.summary.batches = batches.len();
                run.queue = batches.into();
                run.work = Some(work);
                Ok(State::Previewing)
            }
            State::Previewing => {
                let entries: Vec<String> = run
                    .queue
                    .iter()
                    .flat_map(|b| b.entries.iter().cloned())
                    .collect();
                print!(
                    "{}",
                    format_preview(
                        &run.summary.target,
                        &entries,
                        run.summary.batch_size,
                        run.queue.len()
                    )
                );
                let Some(work) = run.work.as_ref() else {
                    return Ok(State::Done);
                };
                println!("Batch files: {}", work.path().display());

                if self.options.confirm.gates_run() {
                    let plan = RunPlan {
                        target: &run.summary.target,
                        total: run.summary.total,
                        batch_size: run.summary.batch_size,
                        batches: run.queue.len(),
                        work_dir: work.path(),
                    };
                    let approved = tokio::select! {
                        biased;
                        _ = self.interrupt.wait() => false,
                        answer = self.confirmer.confirm_run(&plan) => answer?,
                    };
                    if !approved {
                        log::warn!("run not confirmed, nothing deleted");
                        return Ok(State::Cancelled);
                    }
                }
                Ok(State::AwaitingConfirm)
            }
            State::AwaitingConfirm => {
                let Some(batch) = run.queue.front() else {
                    return Ok(State::Done);
                };
                if self.options.confirm.gates_batches() {
                    let approved = tokio::select! {
                        biased;
                        _ = self.interrupt.wait() => false,
                        answer = self.confirmer.confirm_batch(batch, run.summary.batches) => answer?,
                    };
                    if !approved {
                        log::warn!("batch {} not confirmed, stopping", batch.index);
                        return Ok(State::Cancelled);
                    }
                }
                Ok(State::Deleting)
            }
            State::Deleting => {
                let Some(batch) = run.queue.pop_front() else {
                    return Ok(State::Done);
                };
                if !self.delete_batch(&batch, run).await {
                    log::warn!(
                        "interrupted during batch {}, its remaining entries were skipped",
                        batch.index
                    );
                    self.update_report(run);
                    return Ok(State::Cancelled);
                }
                run.summary.batches_processed += 1;
                // A stale batch file is replayed by --resume; the run goes on.
                if let Some(work) = &run.work
                    && let Err(err) = work.complete(&batch)
                {
                    log::warn!("could not retire batch {}: {err}", batch.index);
                }
                self.update_report(run);

                if !run.queue.is_empty() && !self.options.delay.is_zero() {
                    log::info!("waiting {:?} before the next batch", self.options.delay);
                    tokio::select! {
                        biased;
                        _ = self.interrupt.wait() => return Ok(State::Cancelled),
                        _ = tokio::time::sleep(self.options.delay) => {}
                    }
                }
                Ok(State::AwaitingConfirm)
            }
            State::Cancelled => Ok(State::Cancelled),
            State::Done => Ok(State::Done),
        }
    }

    /// Remove the entries of `batch` in order. Returns `false` when the
    /// interrupt stopped it before every entry was attempted.
    async fn delete_batch(&self, batch: &Batch, run: &mut Run) -> bool {
        println!(
            "Batch {}/{}: {} entries",
            batch.index,
            run.summary.batches,
            batch.len()
        );
        for entry in &batch.entries {
            if self.interrupt.is_set() {
                return false;
            }
            if self.options.dry_run {
                println!("Would delete: {entry}");
                run.summary.deleted.push(entry.clone());
                continue;
            }
            match self.store.remove(entry, self.options.skip_trash).await {
                Ok(()) => {
                    log::info!("deleted {entry}");
                    run.summary.deleted.push(entry.clone());
                }
                Err(err) => {
                    log::error!("failed to delete {entry}: {err}");
                    run.summary.failed.push(FailedEntry {
                        path: entry.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }
        true
    }

    fn apply_name_filter(&self, entries: Vec<String>) -> Vec<String> {
        let Some(matcher) = &self.options.name_filter else {
            return entries;
        };
        let before = entries.len();
        let kept: Vec<String> = entries
            .into_iter()
            .filter(|entry| matcher.is_match(last_segment(entry)))
            .collect();
        log::info!("--name kept {} of {before} entries", kept.len());
        kept
    }

    /// Progress snapshot; a failed write is not worth stopping the run for.
    fn update_report(&self, run: &Run) {
        if let Err(err) = self.write_report(run, false) {
            log::warn!("could not update report: {err}");
        }
    }

    fn write_report(&self, run: &Run, finished: bool) -> Result<()> {
        match &self.options.report {
            Some(path) => RunReport::new(&run.summary, run.started_at, finished).write(path),
            None => Ok(()),
        }
    }
}
