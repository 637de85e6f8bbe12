use crate::config::{ConfigFile, StorageProvider, prepare_storage_config, storage_config::StorageConfig};
use crate::error::{Error, Result};
use std::env;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

/// Values supplied on the command line; `None` falls through to the
/// environment, then the config file, then defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigRequest {
    pub provider: Option<String>,
    pub hdfs_bin: Option<String>,
    pub name_node: Option<String>,
    pub root_path: Option<String>,
    pub config_file: Option<PathBuf>,
    pub batch_size: Option<usize>,
    pub delay_secs: Option<u64>,
    pub use_trash: bool,
    pub work_dir: Option<PathBuf>,
}

/// Workflow tunables after merging every configuration source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneSettings {
    /// `None` selects the adaptive batch size.
    pub batch_size: Option<NonZeroUsize>,
    pub delay: Duration,
    pub skip_trash: bool,
    pub work_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub storage: StorageConfig,
    pub prune: PruneSettings,
}

pub fn resolve(request: ConfigRequest) -> Result<ResolvedConfig> {
    let file = ConfigFile::discover(request.config_file.as_deref())?;
    resolve_from_source(request, file, &env_value)
}

fn resolve_from_source(
    request: ConfigRequest,
    file: ConfigFile,
    get: &dyn Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig> {
    let storage = load_storage_config(&request, &file, get)?;
    let prune = load_prune_settings(&request, &file, get)?;
    Ok(ResolvedConfig { storage, prune })
}

fn load_storage_config(
    request: &ConfigRequest,
    file: &ConfigFile,
    get: &dyn Fn(&str) -> Option<String>,
) -> Result<StorageConfig> {
    let provider = match request
        .provider
        .clone()
        .or_else(|| get("STORAGE_PROVIDER"))
        .or_else(|| file.storage.provider.clone())
    {
        Some(raw) => StorageProvider::from_str(&raw)?,
        None => StorageProvider::HdfsCli,
    };

    let mut config = match provider {
        StorageProvider::HdfsCli => StorageConfig::hdfs_cli(
            request
                .hdfs_bin
                .clone()
                .or_else(|| get("HDFS_BIN"))
                .or_else(|| file.storage.hdfs_bin.clone()),
        ),
        StorageProvider::Hdfs => StorageConfig::hdfs(
            request
                .name_node
                .clone()
                .or_else(|| get("HDFS_NAME_NODE"))
                .or_else(|| file.storage.name_node.clone()),
            request
                .root_path
                .clone()
                .or_else(|| get("HDFS_ROOT_PATH"))
                .or_else(|| file.storage.root_path.clone()),
        ),
        StorageProvider::Fs => StorageConfig::fs(
            request
                .root_path
                .clone()
                .or_else(|| get("STORAGE_ROOT_PATH"))
                .or_else(|| file.storage.root_path.clone()),
        ),
    };

    prepare_storage_config(&mut config)?;
    Ok(config)
}

fn load_prune_settings(
    request: &ConfigRequest,
    file: &ConfigFile,
    get: &dyn Fn(&str) -> Option<String>,
) -> Result<PruneSettings> {
    let batch_size = match request.batch_size {
        Some(size) => Some(size),
        None => match get("PRUNE_BATCH_SIZE") {
            Some(raw) => Some(raw.parse::<usize>().map_err(|_| Error::InvalidArgument {
                message: format!("PRUNE_BATCH_SIZE must be a positive integer, got '{raw}'"),
            })?),
            None => file.prune.batch_size,
        },
    };
    let batch_size = match batch_size {
        Some(size) => Some(NonZeroUsize::new(size).ok_or_else(|| Error::InvalidArgument {
            message: "batch size must be at least 1".to_string(),
        })?),
        None => None,
    };

    let delay_secs = request
        .delay_secs
        .or(file.prune.delay_secs)
        .unwrap_or_default();

    // --use-trash on the command line always wins over a config file.
    let skip_trash = if request.use_trash {
        false
    } else {
        file.prune.skip_trash.unwrap_or(true)
    };

    let work_dir = request
        .work_dir
        .clone()
        .or_else(|| get("PRUNE_WORK_DIR").map(PathBuf::from))
        .or_else(|| file.prune.work_dir.clone())
        .unwrap_or_else(env::temp_dir);

    Ok(PruneSettings {
        batch_size,
        delay: Duration::from_secs(delay_secs),
        skip_trash,
        work_dir,
    })
}
