use crate::error::{Error, Result};
use crate::storage::hdfs_cli::{HdfsShell, parse_ls_output};
use crate::storage::utils::path::{as_dir_path, same_path};
use futures::stream::TryStreamExt;
use opendal::{ErrorKind, Operator};
use std::path::PathBuf;

/// Trait for enumerating the direct children of a remote directory.
pub trait Lister {
    /// List direct children of `path` in listing order.
    ///
    /// # Arguments
    /// * `path` - Directory whose children should be returned
    ///
    /// # Returns
    /// * `Result<Vec<String>>` - Child paths exactly as the backend reports them;
    ///   a missing `path` is an error, an empty directory is not
    async fn list(&self, path: &str) -> Result<Vec<String>>;
}

/// Implementation of Lister for OpenDAL Operator.
pub struct OpenDalLister {
    operator: Operator,
}

impl OpenDalLister {
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }
}

impl Lister for OpenDalLister {
    async fn list(&self, path: &str) -> Result<Vec<String>> {
        let dir = as_dir_path(path);
        match self.operator.stat(&dir).await {
            Ok(meta) if meta.mode().is_dir() => {}
            Ok(_) => {
                return Err(Error::InvalidArgument {
                    message: format!("'{path}' is not a directory"),
                });
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::PathNotFound {
                    path: PathBuf::from(path),
                });
            }
            Err(e) => return Err(e.into()),
        }

        let lister = self.operator.lister_with(&dir).recursive(false).await?;
        let entries: Vec<String> = lister
            .try_filter_map(|entry| {
                let keep = !same_path(entry.path(), &dir);
                async move { Ok(keep.then(|| entry.path().to_string())) }
            })
            .try_collect()
            .await?;
        Ok(entries)
    }
}

/// Implementation of Lister that parses `hdfs dfs -ls` output.
pub struct HdfsCliLister {
    shell: HdfsShell,
}

impl HdfsCliLister {
    pub fn new(shell: HdfsShell) -> Self {
        Self { shell }
    }
}

impl Lister for HdfsCliLister {
    async fn list(&self, path: &str) -> Result<Vec<String>> {
        let stdout = self.shell.ls(path).await?;
        Ok(parse_ls_output(&stdout, path))
    }
}
