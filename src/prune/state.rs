//! On-disk run state: one text file per batch, one path per line.
//!
//! A run directory looks like
//!
//! ```text
//! hdfs-prune-5f0c.../
//!   target              # the directory being pruned
//!   batch_000001.txt
//!   batch_000002.txt
//! ```
//!
//! Batch files are written before anything is deleted and removed one by one
//! as their batch finishes, so an interrupted run can be resumed from what is
//! left.

use crate::error::{Error, Result};
use crate::prune::batch::Batch;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

const RUN_DIR_PREFIX: &str = "hdfs-prune-";
const BATCH_FILE_PREFIX: &str = "batch_";
const BATCH_FILE_SUFFIX: &str = ".txt";
const TARGET_FILENAME: &str = "target";

#[derive(Debug, Clone)]
pub struct WorkDir {
    path: PathBuf,
}

impl WorkDir {
    /// Create a fresh run directory below `root`.
    pub fn create(root: &Path) -> Result<Self> {
        fs::create_dir_all(root).map_err(|source| Error::BatchStateIo {
            path: root.to_path_buf(),
            source,
        })?;
        let path = root.join(format!("{RUN_DIR_PREFIX}{}", Uuid::new_v4()));
        fs::create_dir(&path).map_err(|source| Error::BatchStateIo {
            path: path.clone(),
            source,
        })?;
        log::debug!("created work dir {}", path.display());
        Ok(Self { path })
    }

    /// Reopen the run directory of an interrupted run.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(Error::BatchState {
                path: path.to_path_buf(),
                message: "not a directory".to_string(),
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn batch_file(&self, index: usize) -> PathBuf {
        self.path
            .join(format!("{BATCH_FILE_PREFIX}{index:06}{BATCH_FILE_SUFFIX}"))
    }

    /// Persist the whole worklist for `target`.
    pub fn write_batches(&self, target: &str, batches: &[Batch]) -> Result<()> {
        self.write_file(&self.path.join(TARGET_FILENAME), |w| writeln!(w, "{target}"))?;
        for batch in batches {
            if let Some(bad) = batch.entries.iter().find(|e| e.contains('\n')) {
                return Err(Error::BatchState {
                    path: self.batch_file(batch.index),
                    message: format!("entry contains a line break: {bad:?}"),
                });
            }
            self.write_file(&self.batch_file(batch.index), |w| {
                for entry in &batch.entries {
                    writeln!(w, "{entry}")?;
                }
                Ok(())
            })?;
        }
        Ok(())
    }

    /// Target recorded when the batches were written, if any.
    pub fn target(&self) -> Result<Option<String>> {
        let path = self.path.join(TARGET_FILENAME);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw.trim_end_matches(['\r', '\n']).to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::BatchStateIo { path, source }),
        }
    }

    /// Remaining batches in the order they were created.
    pub fn load_batches(&self) -> Result<Vec<Batch>> {
        let read_dir = fs::read_dir(&self.path).map_err(|source| Error::BatchStateIo {
            path: self.path.clone(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|source| Error::BatchStateIo {
                path: self.path.clone(),
                source,
            })?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if let Some(index) = parse_batch_index(&name) {
                files.push((name, index, entry.path()));
            }
        }
        files.sort_by(|a, b| a.0.cmp(&b.0));

        let mut batches = Vec::with_capacity(files.len());
        for (_, index, path) in files {
            let raw = fs::read_to_string(&path)
                .map_err(|source| Error::BatchStateIo { path, source })?;
            let entries = raw
                .lines()
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();
            batches.push(Batch { index, entries });
        }
        Ok(batches)
    }

    /// Drop the file of a fully processed batch.
    pub fn complete(&self, batch: &Batch) -> Result<()> {
        let path = self.batch_file(batch.index);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(Error::BatchStateIo { path, source }),
        }
    }

    /// Remove every batch file and the directory itself. Idempotent.
    pub fn cleanup(&self) -> Result<()> {
        match fs::remove_dir_all(&self.path) {
            Ok(()) => {
                log::debug!("removed work dir {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(Error::BatchStateIo {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write_file(
        &self,
        path: &Path,
        body: impl FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
    ) -> Result<()> {
        let io_err = |source| Error::BatchStateIo {
            path: path.to_path_buf(),
            source,
        };
        let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
        body(&mut writer).map_err(io_err)?;
        writer.flush().map_err(io_err)
    }
}

fn parse_batch_index(name: &str) -> Option<usize> {
    name.strip_prefix(BATCH_FILE_PREFIX)?
        .strip_suffix(BATCH_FILE_SUFFIX)?
        .parse()
        .ok()
}
