//! Optional TOML configuration file.
//!
//! ```toml
//! [storage]
//! provider = "hdfs-cli"
//! hdfs_bin = "/opt/hadoop/bin/hdfs"
//!
//! [prune]
//! batch_size = 50
//! delay_secs = 2
//! skip_trash = true
//! work_dir = "/var/tmp"
//! ```

use crate::error::{Error, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub prune: PruneSection,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StorageSection {
    pub provider: Option<String>,
    pub hdfs_bin: Option<String>,
    pub name_node: Option<String>,
    pub root_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PruneSection {
    pub batch_size: Option<usize>,
    pub delay_secs: Option<u64>,
    pub skip_trash: Option<bool>,
    pub work_dir: Option<PathBuf>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| Error::ConfigFileIo {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| Error::ConfigFileParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit` if given (it must exist), otherwise the per-user
    /// default location when a file is present there.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => {
                log::debug!("loading config file {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "hdfs-prune").map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}
