use crate::config::StorageProvider;

/// Storage configuration for the backend that lists and removes partitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub provider: StorageProvider,
    /// `hdfs` executable used by the CLI provider
    pub hdfs_bin: Option<String>,
    pub name_node: Option<String>,
    pub root_path: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: StorageProvider::HdfsCli,
            hdfs_bin: None,
            name_node: None,
            root_path: None,
        }
    }
}

impl StorageConfig {
    pub fn hdfs_cli(hdfs_bin: Option<String>) -> Self {
        Self {
            provider: StorageProvider::HdfsCli,
            hdfs_bin,
            ..Default::default()
        }
    }

    pub fn hdfs(name_node: Option<String>, root_path: Option<String>) -> Self {
        Self {
            provider: StorageProvider::Hdfs,
            name_node,
            root_path,
            ..Default::default()
        }
    }

    pub fn fs(root_path: Option<String>) -> Self {
        Self {
            provider: StorageProvider::Fs,
            root_path,
            ..Default::default()
        }
    }
}
