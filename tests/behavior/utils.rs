use assert_cmd::Command;
use hdfs_prune::error::Result;
use libtest_mimic::{Failed, Trial};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SKIP_ENV: &str = "HDFS_PRUNE_SKIP_BEHAVIOR";

pub const CONFIG_ENV_KEYS: &[&str] = &[
    "STORAGE_PROVIDER",
    "STORAGE_ROOT_PATH",
    "HDFS_BIN",
    "HDFS_NAME_NODE",
    "HDFS_ROOT_PATH",
    "PRUNE_BATCH_SIZE",
    "PRUNE_WORK_DIR",
];

/// `hdfs-prune` with none of the caller's configuration leaking in.
pub fn hdfs_prune_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hdfs-prune").unwrap();
    for key in CONFIG_ENV_KEYS {
        cmd.env_remove(key);
    }
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("RUST_LOG", "info");
    cmd
}

/// A throwaway warehouse on the local filesystem plus a private directory
/// for batch state.
pub struct Fixture {
    root: TempDir,
    work: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
            work: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn work_dir(&self) -> &Path {
        self.work.path()
    }

    pub fn table_dir(&self, table: &str) -> PathBuf {
        self.root.path().join(table)
    }

    /// Create `count` partition directories under `table`, each with one
    /// data file.
    pub fn create_partitions(&self, table: &str, count: usize) -> Result<Vec<PathBuf>> {
        let table_dir = self.table_dir(table);
        fs::create_dir_all(&table_dir)?;
        let mut partitions = Vec::with_capacity(count);
        for i in 0..count {
            let dir = table_dir.join(format!("dt={i:04}"));
            fs::create_dir_all(&dir)?;
            fs::write(dir.join("part-00000.parquet"), b"data")?;
            partitions.push(dir);
        }
        Ok(partitions)
    }

    pub fn remaining(&self, table: &str) -> usize {
        fs::read_dir(self.table_dir(table))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    /// Run directories left behind in the work dir.
    pub fn leftover_runs(&self) -> Vec<PathBuf> {
        fs::read_dir(self.work.path())
            .map(|entries| entries.filter_map(|e| e.ok()).map(|e| e.path()).collect())
            .unwrap_or_default()
    }

    /// `hdfs-prune` against the fs provider rooted at this fixture.
    pub fn fs_cmd(&self) -> Command {
        let mut cmd = self.fs_base_cmd();
        cmd.arg("--work-dir").arg(self.work.path());
        cmd
    }

    /// Like [`Fixture::fs_cmd`], continuing the run stored in `run_dir`.
    pub fn fs_resume_cmd(&self, run_dir: &Path) -> Command {
        let mut cmd = self.fs_base_cmd();
        cmd.arg("--resume").arg(run_dir);
        cmd
    }

    fn fs_base_cmd(&self) -> Command {
        let mut cmd = hdfs_prune_cmd(self.work.path());
        cmd.arg("--provider")
            .arg("fs")
            .arg("--root")
            .arg(self.root.path());
        cmd
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_trial(name: &str, f: fn() -> Result<()>) -> Trial {
    Trial::test(format!("behavior::{name}"), move || {
        f().map_err(|err| Failed::from(err.to_string()))
    })
}

#[macro_export]
macro_rules! trials {
    ($($test:ident),* $(,)?) => {
        vec![$(
            build_trial(stringify!($test), $test),
        )*]
    };
}
