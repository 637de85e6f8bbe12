use crate::config::{ConfigRequest, PruneSettings, ResolvedConfig, StorageConfig, resolve};
use crate::error::Result;

use super::entry::Args;
use super::prompts::Prompt;
use super::prune::PruneArgs;

pub struct CliContext {
    args: PruneArgs,
    resolved: ResolvedConfig,
    prompt: Prompt,
}

impl CliContext {
    pub fn from_args(args: Args, prompt: Prompt) -> Result<Self> {
        let request = ConfigRequest {
            provider: args.global.provider.clone(),
            hdfs_bin: args.global.hdfs_bin.clone(),
            name_node: args.global.name_node.clone(),
            root_path: args.global.root_path.clone(),
            config_file: args.global.config_file.clone(),
            batch_size: args.prune.batch_size,
            delay_secs: args.prune.delay,
            use_trash: args.prune.use_trash,
            work_dir: args.prune.work_dir.clone(),
        };

        let resolved = resolve(request)?;
        log::debug!(
            "resolved provider={} settings={:?}",
            resolved.storage.provider.as_str(),
            resolved.prune
        );

        Ok(Self {
            args: args.prune,
            resolved,
            prompt,
        })
    }

    pub fn args(&self) -> &PruneArgs {
        &self.args
    }

    pub fn storage_config(&self) -> &StorageConfig {
        &self.resolved.storage
    }

    pub fn settings(&self) -> &PruneSettings {
        &self.resolved.prune
    }

    pub fn prompt(&self) -> Prompt {
        self.prompt
    }
}
