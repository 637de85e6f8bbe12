use crate::error::{Error, Result};
use crate::prune::batch::BatchSizing;
use crate::prune::confirm::ConfirmMode;
use crate::prune::{Interrupt, Outcome, PruneOptions, Pruner};
use crate::storage::StorageClient;
use crate::utils::format_summary;
use clap::Args as ClapArgs;
use std::path::PathBuf;

use super::context::CliContext;

fn parse_validated_path(path_str: &str) -> Result<String> {
    if path_str.trim().is_empty() {
        Err(Error::InvalidPath {
            path: path_str.to_string(),
        })
    } else {
        Ok(path_str.to_string())
    }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct PruneArgs {
    /// Remote directory whose children are deleted
    #[arg(value_name = "PATH", value_parser = parse_validated_path)]
    pub path: String,

    /// Fixed batch size (default: chosen from the number of entries)
    #[arg(short = 'b', long = "batch-size", value_name = "N")]
    pub batch_size: Option<usize>,

    /// Which confirmations to ask for
    #[arg(long, value_enum, default_value_t = ConfirmMode::Both)]
    pub confirm: ConfirmMode,

    /// Delete without asking for confirmation
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Move entries to the HDFS trash instead of deleting them outright
    #[arg(long = "use-trash")]
    pub use_trash: bool,

    /// Seconds to wait between batches
    #[arg(long, value_name = "SECS")]
    pub delay: Option<u64>,

    /// Show what would be deleted without deleting anything
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Only delete entries whose name matches this glob (e.g. 'dt=2023-*')
    #[arg(long, value_name = "GLOB")]
    pub name: Option<String>,

    /// Directory that holds the batch files of a run
    #[arg(long = "work-dir", value_name = "DIR", conflicts_with = "resume")]
    pub work_dir: Option<PathBuf>,

    /// Continue an interrupted run from its batch directory
    #[arg(long, value_name = "DIR")]
    pub resume: Option<PathBuf>,

    /// Write a JSON report of deleted and failed entries
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

pub async fn execute(ctx: &CliContext) -> Result<()> {
    let args = ctx.args();
    let settings = ctx.settings();
    let client = StorageClient::new(ctx.storage_config().clone()).await?;

    let name_filter = match &args.name {
        Some(pattern) => {
            let glob = globset::Glob::new(pattern).map_err(|e| Error::InvalidArgument {
                message: format!("invalid --name glob: {}", e),
            })?;
            Some(glob.compile_matcher())
        }
        None => None,
    };

    let options = PruneOptions {
        sizing: BatchSizing::from(settings.batch_size),
        confirm: args.confirm,
        skip_trash: settings.skip_trash,
        delay: settings.delay,
        dry_run: args.dry_run,
        name_filter,
        work_root: settings.work_dir.clone(),
        resume: args.resume.clone(),
        report: args.report.clone(),
    };
    log::debug!(
        "prune provider={} path={} options={:?}",
        client.provider().as_str(),
        args.path,
        options
    );

    let mut pruner =
        Pruner::new(client, ctx.prompt(), options).with_interrupt(Interrupt::on_ctrl_c());
    let summary = pruner.run(&args.path).await?;

    match summary.outcome {
        Outcome::Empty => Ok(()),
        Outcome::Completed => {
            print!("{}", format_summary(&summary));
            Ok(())
        }
        Outcome::Cancelled => {
            print!("{}", format_summary(&summary));
            Err(Error::CancelledByOperator {
                processed: summary.batches_processed,
                total: summary.batches,
            })
        }
    }
}
