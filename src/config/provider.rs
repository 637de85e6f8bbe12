use crate::error::Error;
use std::str::FromStr;

/// Backends able to list and remove partitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageProvider {
    /// Shell out to the `hdfs dfs` command line
    HdfsCli,
    /// Native HDFS client through OpenDAL
    Hdfs,
    /// Local filesystem through OpenDAL
    Fs,
}

impl FromStr for StorageProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hdfs-cli" | "cli" => Ok(Self::HdfsCli),
            "hdfs" => Ok(Self::Hdfs),
            "fs" | "local" => Ok(Self::Fs),
            _ => Err(Error::UnsupportedProvider {
                provider: s.to_string(),
            }),
        }
    }
}

impl StorageProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageProvider::HdfsCli => "hdfs-cli",
            StorageProvider::Hdfs => "hdfs",
            StorageProvider::Fs => "fs",
        }
    }
}
