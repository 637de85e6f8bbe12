/// Executable used by the `hdfs-cli` provider when none is configured.
pub const DEFAULT_HDFS_BIN: &str = "hdfs";

/// Root for the native HDFS provider.
pub const DEFAULT_HDFS_ROOT: &str = "/";

/// Root for the local filesystem provider.
pub const DEFAULT_FS_ROOT: &str = "/";

/// Number of columns in an `hdfs dfs -ls` entry line; the path is the last one.
pub const LS_PATH_COLUMN: usize = 8;

/// Prefix of the summary line `hdfs dfs -ls` prints before the entries.
pub const LS_SUMMARY_PREFIX: &str = "Found ";
