//! Backend that shells out to `hdfs dfs`.

use crate::error::{Error, Result};
use crate::storage::constants::{LS_PATH_COLUMN, LS_SUMMARY_PREFIX};
use crate::storage::utils::path::is_child_of;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

const NOT_FOUND_MARKER: &str = "No such file or directory";

/// Thin wrapper around the `hdfs` executable.
#[derive(Debug, Clone)]
pub struct HdfsShell {
    bin: String,
}

impl HdfsShell {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    pub fn bin(&self) -> &str {
        &self.bin
    }

    /// Raw `hdfs dfs -ls <path>` output.
    pub async fn ls(&self, path: &str) -> Result<String> {
        self.dfs(&["-ls", path]).await.map_err(|err| match err {
            Error::CommandFailed { ref stderr, .. } if stderr.contains(NOT_FOUND_MARKER) => {
                Error::PathNotFound {
                    path: PathBuf::from(path),
                }
            }
            other => other,
        })
    }

    /// `hdfs dfs -rm -r [-skipTrash] <path>`.
    pub async fn rm(&self, path: &str, skip_trash: bool) -> Result<()> {
        let mut args = vec!["-rm", "-r"];
        if skip_trash {
            args.push("-skipTrash");
        }
        args.push(path);
        self.dfs(&args).await.map(|_| ())
    }

    async fn dfs(&self, args: &[&str]) -> Result<String> {
        log::debug!("exec {} dfs {}", self.bin, args.join(" "));
        let output = Command::new(&self.bin)
            .arg("dfs")
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            return Err(Error::CommandFailed {
                command: format!("{} dfs {}", self.bin, args.join(" ")),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Extract the direct children of `target` from `hdfs dfs -ls` output.
///
/// The path column is taken verbatim (everything from the eighth column to
/// the end of the line, so names with spaces survive). The `Found N items`
/// summary, blank lines, lines with too few columns, and paths that are not
/// below `target` are dropped.
pub fn parse_ls_output(stdout: &str, target: &str) -> Vec<String> {
    let mut entries = Vec::new();
    for line in stdout.lines() {
        let line = line.trim_end();
        if line.trim().is_empty() || line.starts_with(LS_SUMMARY_PREFIX) {
            continue;
        }
        let Some(path) = path_column(line) else {
            log::warn!("skipping unrecognised listing line: {line}");
            continue;
        };
        if !is_child_of(path, target) {
            log::warn!("skipping '{path}': not below '{target}'");
            continue;
        }
        entries.push(path.to_string());
    }
    entries
}

fn path_column(line: &str) -> Option<&str> {
    let mut rest = line.trim_start();
    for _ in 1..LS_PATH_COLUMN {
        let end = rest.find(char::is_whitespace)?;
        rest = rest[end..].trim_start();
    }
    (!rest.is_empty()).then_some(rest)
}
