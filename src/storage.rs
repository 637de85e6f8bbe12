use crate::config::{ProviderBackend, prepare_storage_backend};
pub use crate::config::{StorageProvider, storage_config::StorageConfig};
use crate::error::{Error, Result};
use opendal::Operator;

pub mod constants;
pub mod hdfs_cli;
mod operations;
pub mod utils;

use self::hdfs_cli::HdfsShell;
use self::operations::delete::{HdfsCliDeleter, OpenDalDeleter};
use self::operations::list::{HdfsCliLister, OpenDalLister};
pub use self::operations::{Deleter, Lister};
use crate::wrap_err;

#[derive(Clone)]
enum Backend {
    OpenDal(Operator),
    HdfsCli(HdfsShell),
}

/// Remote filesystem client used by the prune workflow
#[derive(Clone)]
pub struct StorageClient {
    backend: Backend,
    provider: StorageProvider,
}

impl StorageClient {
    pub async fn new(mut config: StorageConfig) -> Result<Self> {
        let provider = config.provider;
        let backend = prepare_storage_backend(&mut config)?;
        let backend = Self::build_backend(provider, &backend)?;
        Ok(Self { backend, provider })
    }

    pub fn provider(&self) -> StorageProvider {
        self.provider
    }

    /// The OpenDAL operator, for providers backed by one.
    pub fn operator(&self) -> Option<&Operator> {
        match &self.backend {
            Backend::OpenDal(operator) => Some(operator),
            Backend::HdfsCli(_) => None,
        }
    }

    #[allow(unused_variables)]
    fn build_backend(provider: StorageProvider, backend: &ProviderBackend) -> Result<Backend> {
        match backend {
            ProviderBackend::HdfsCli { bin } => Ok(Backend::HdfsCli(HdfsShell::new(bin.clone()))),
            ProviderBackend::Fs { root } => {
                #[cfg(feature = "fs")]
                {
                    let builder = opendal::services::Fs::default().root(root);
                    Ok(Backend::OpenDal(Operator::new(builder)?.finish()))
                }

                #[cfg(not(feature = "fs"))]
                {
                    Err(Error::UnsupportedProvider {
                        provider: format!("{} (feature disabled)", provider.as_str()),
                    })
                }
            }
            ProviderBackend::Hdfs { root, name_node } => {
                #[cfg(feature = "hdfs")]
                {
                    let builder = opendal::services::Hdfs::default()
                        .root(root)
                        .name_node(name_node);
                    Ok(Backend::OpenDal(Operator::new(builder)?.finish()))
                }

                #[cfg(not(feature = "hdfs"))]
                {
                    Err(Error::UnsupportedProvider {
                        provider: format!("{} (feature disabled)", provider.as_str()),
                    })
                }
            }
        }
    }
}

impl Lister for StorageClient {
    async fn list(&self, path: &str) -> Result<Vec<String>> {
        log::debug!("list provider={:?} path={}", self.provider, path);
        let result = match &self.backend {
            Backend::OpenDal(operator) => OpenDalLister::new(operator.clone()).list(path).await,
            Backend::HdfsCli(shell) => HdfsCliLister::new(shell.clone()).list(path).await,
        };
        wrap_err!(
            result,
            ListFailed {
                path: path.to_string()
            }
        )
    }
}

impl Deleter for StorageClient {
    async fn remove(&self, path: &str, skip_trash: bool) -> Result<()> {
        log::debug!(
            "remove provider={:?} path={} skip_trash={}",
            self.provider,
            path,
            skip_trash
        );
        let result = match &self.backend {
            Backend::OpenDal(operator) => {
                OpenDalDeleter::new(operator.clone())
                    .remove(path, skip_trash)
                    .await
            }
            Backend::HdfsCli(shell) => {
                HdfsCliDeleter::new(shell.clone())
                    .remove(path, skip_trash)
                    .await
            }
        };
        wrap_err!(
            result,
            DeleteFailed {
                path: path.to_string(),
                skip_trash: skip_trash
            }
        )
    }
}
