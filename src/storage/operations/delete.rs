use crate::error::Result;
use crate::storage::hdfs_cli::HdfsShell;
use crate::storage::utils::path::depth;
use futures::stream::TryStreamExt;
use opendal::{ErrorKind, Operator};

/// Trait for removing a single partition from remote storage.
pub trait Deleter {
    /// Recursively remove `path`.
    ///
    /// `skip_trash` bypasses the HDFS trash where the backend has one.
    async fn remove(&self, path: &str, skip_trash: bool) -> Result<()>;
}

/// Implementation of Deleter for OpenDAL Operator.
pub struct OpenDalDeleter {
    operator: Operator,
}

impl OpenDalDeleter {
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }
}

impl Deleter for OpenDalDeleter {
    async fn remove(&self, path: &str, _skip_trash: bool) -> Result<()> {
        let meta = match self.operator.stat(path).await {
            Ok(meta) => meta,
            // Already gone: nothing left to remove.
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        if !meta.mode().is_dir() {
            self.operator.delete(path).await?;
            return Ok(());
        }

        let lister = self.operator.lister_with(path).recursive(true).await?;
        let mut paths: Vec<String> = lister
            .map_ok(|entry| entry.path().to_string())
            .try_collect()
            .await?;
        if !paths.iter().any(|p| p == path) {
            paths.push(path.to_string());
        }
        // Children before parents so directories are empty when removed.
        paths.sort_by_key(|p| std::cmp::Reverse(depth(p)));

        for p in &paths {
            self.operator.delete(p).await?;
        }
        Ok(())
    }
}

/// Implementation of Deleter that runs `hdfs dfs -rm -r`.
pub struct HdfsCliDeleter {
    shell: HdfsShell,
}

impl HdfsCliDeleter {
    pub fn new(shell: HdfsShell) -> Self {
        Self { shell }
    }
}

impl Deleter for HdfsCliDeleter {
    async fn remove(&self, path: &str, skip_trash: bool) -> Result<()> {
        self.shell.rm(path, skip_trash).await
    }
}
