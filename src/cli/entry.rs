use clap::{Args as ClapArgs, Parser};
use std::path::PathBuf;

use crate::error::Result;

use super::{
    context::CliContext,
    prompts::Prompt,
    prune::{self, PruneArgs},
};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "hdfs-prune",
    version = env!("CARGO_PKG_VERSION"),
    about = "Delete every partition under a remote directory in confirmed batches",
    after_help = "Batches are persisted before anything is deleted; an interrupted run can be continued with --resume."
)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(flatten)]
    pub prune: PruneArgs,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Storage backend (hdfs-cli|hdfs|fs)
    #[arg(long, value_name = "PROVIDER")]
    pub provider: Option<String>,
    /// hdfs executable used by the hdfs-cli provider
    #[arg(long = "hdfs-bin", value_name = "PATH")]
    pub hdfs_bin: Option<String>,
    /// HDFS name node address (hdfs provider)
    #[arg(long = "name-node", value_name = "URL")]
    pub name_node: Option<String>,
    /// Root path for the hdfs and fs providers
    #[arg(long = "root", value_name = "PATH")]
    pub root_path: Option<String>,
    /// Configuration file (default: per-user config dir, when present)
    #[arg(long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,
}

pub async fn run(args: Args) -> Result<()> {
    let prompt = Prompt::new(args.prune.force);
    run_with_prompt(args, prompt).await
}

pub async fn run_with_prompt(args: Args, prompt: Prompt) -> Result<()> {
    let ctx = CliContext::from_args(args, prompt)?;
    prune::execute(&ctx).await
}
