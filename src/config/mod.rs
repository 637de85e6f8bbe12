pub mod file;
pub mod loader;
pub mod provider;
pub mod spec;
pub mod storage_config;

pub use file::ConfigFile;
pub use loader::{ConfigRequest, PruneSettings, ResolvedConfig, resolve};
pub use provider::StorageProvider;
pub use spec::{ProviderBackend, prepare_storage_backend, prepare_storage_config};
pub use storage_config::StorageConfig;
