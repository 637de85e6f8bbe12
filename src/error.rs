use snafu::Snafu;
use std::path::PathBuf;
use toml::de::Error as TomlDeError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Environment variable '{key}' is required but not found"))]
    MissingEnvVar { key: String },

    #[snafu(display("Missing required configuration field '{field}' for provider '{provider}'"))]
    MissingConfigField { provider: String, field: String },

    #[snafu(display(
        "Unsupported storage provider: {provider}. Allowed: 'hdfs-cli' | 'hdfs' | 'fs'"
    ))]
    UnsupportedProvider { provider: String },

    #[snafu(display("Path not found: {}", path.display()))]
    PathNotFound { path: PathBuf },

    #[snafu(display("Invalid path: {path}"))]
    InvalidPath { path: String },

    #[snafu(display("Failed to list directory '{path}': {source}"))]
    ListFailed { path: String, source: Box<Error> },

    #[snafu(display("Failed to delete '{path}' (skip trash: {skip_trash}): {source}"))]
    DeleteFailed {
        path: String,
        skip_trash: bool,
        source: Box<Error>,
    },

    #[snafu(display("`{command}` exited with {status}: {stderr}"))]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[snafu(display(
        "Operation cancelled by operator after {processed} of {total} batch(es)"
    ))]
    CancelledByOperator { processed: usize, total: usize },

    #[snafu(display("Invalid batch state in '{}': {message}", path.display()))]
    BatchState { path: PathBuf, message: String },

    #[snafu(display("Failed to access batch state '{}': {source}", path.display()))]
    BatchStateIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Failed to read config file '{}': {source}", path.display()))]
    ConfigFileIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Failed to parse config file '{}': {source}", path.display()))]
    ConfigFileParse { path: PathBuf, source: TomlDeError },

    #[snafu(display("Failed to write report '{}': {source}", path.display()))]
    ReportWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Invalid argument: {message}"))]
    InvalidArgument { message: String },

    #[snafu(display("OpenDAL error: {source}"))]
    OpenDal { source: opendal::Error },

    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    #[snafu(display("JSON serialization error: {source}"))]
    Json { source: serde_json::Error },
}

impl From<opendal::Error> for Error {
    fn from(error: opendal::Error) -> Self {
        Error::OpenDal { source: error }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io { source: error }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json { source: error }
    }
}

impl Error {
    /// True when the operator stopped the run on purpose.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::CancelledByOperator { .. })
    }
}
