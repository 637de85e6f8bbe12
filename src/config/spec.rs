use crate::config::{StorageProvider, storage_config::StorageConfig};
use crate::error::{Error, Result};
use crate::storage::constants::{DEFAULT_FS_ROOT, DEFAULT_HDFS_BIN, DEFAULT_HDFS_ROOT};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Optional,
    Unsupported,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    requirement: Requirement,
    default: Option<&'static str>,
}

impl FieldRule {
    pub const fn required() -> Self {
        Self {
            requirement: Requirement::Required,
            default: None,
        }
    }

    pub const fn optional_with_default(default: &'static str) -> Self {
        Self {
            requirement: Requirement::Optional,
            default: Some(default),
        }
    }

    pub const fn unsupported() -> Self {
        Self {
            requirement: Requirement::Unsupported,
            default: None,
        }
    }

    /// Validate `value` against the rule, filling in the default and
    /// dropping values the provider does not understand.
    pub fn apply(
        &self,
        provider: StorageProvider,
        field: &'static str,
        value: &mut Option<String>,
    ) -> Result<()> {
        match self.requirement {
            Requirement::Required => {
                if value.is_none() {
                    return Err(Error::MissingConfigField {
                        provider: provider.as_str().to_string(),
                        field: field.to_string(),
                    });
                }
            }
            Requirement::Optional => {}
            Requirement::Unsupported => {
                if value.is_some() {
                    log::debug!("ignoring '{field}' for provider {}", provider.as_str());
                    *value = None;
                }
            }
        }

        if self.requirement != Requirement::Unsupported
            && value.is_none()
            && let Some(default) = self.default
        {
            *value = Some(default.to_string());
        }

        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ProviderSpec {
    hdfs_bin: FieldRule,
    root_path: FieldRule,
    name_node: FieldRule,
}

/// Fully resolved backend parameters, ready to build a client from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderBackend {
    HdfsCli { bin: String },
    Hdfs { root: String, name_node: String },
    Fs { root: String },
}

impl ProviderSpec {
    pub fn prepare(
        &self,
        provider: StorageProvider,
        config: &mut StorageConfig,
    ) -> Result<ProviderBackend> {
        self.hdfs_bin
            .apply(provider, "hdfs_bin", &mut config.hdfs_bin)?;
        self.root_path
            .apply(provider, "root_path", &mut config.root_path)?;
        self.name_node
            .apply(provider, "name_node", &mut config.name_node)?;

        let missing = |field: &str| Error::MissingConfigField {
            provider: provider.as_str().to_string(),
            field: field.to_string(),
        };

        let backend = match provider {
            StorageProvider::HdfsCli => ProviderBackend::HdfsCli {
                bin: config.hdfs_bin.clone().ok_or_else(|| missing("hdfs_bin"))?,
            },
            StorageProvider::Hdfs => ProviderBackend::Hdfs {
                root: config.root_path.clone().ok_or_else(|| missing("root_path"))?,
                name_node: config.name_node.clone().ok_or_else(|| missing("name_node"))?,
            },
            StorageProvider::Fs => ProviderBackend::Fs {
                root: config.root_path.clone().ok_or_else(|| missing("root_path"))?,
            },
        };

        Ok(backend)
    }
}

pub fn provider_spec(provider: StorageProvider) -> ProviderSpec {
    match provider {
        StorageProvider::HdfsCli => ProviderSpec {
            hdfs_bin: FieldRule::optional_with_default(DEFAULT_HDFS_BIN),
            root_path: FieldRule::unsupported(),
            name_node: FieldRule::unsupported(),
        },
        StorageProvider::Hdfs => ProviderSpec {
            hdfs_bin: FieldRule::unsupported(),
            root_path: FieldRule::optional_with_default(DEFAULT_HDFS_ROOT),
            name_node: FieldRule::required(),
        },
        StorageProvider::Fs => ProviderSpec {
            hdfs_bin: FieldRule::unsupported(),
            root_path: FieldRule::optional_with_default(DEFAULT_FS_ROOT),
            name_node: FieldRule::unsupported(),
        },
    }
}

pub fn prepare_storage_backend(config: &mut StorageConfig) -> Result<ProviderBackend> {
    provider_spec(config.provider).prepare(config.provider, config)
}

pub fn prepare_storage_config(config: &mut StorageConfig) -> Result<()> {
    prepare_storage_backend(config).map(|_| ())
}
