use crate::*;
use hdfs_prune::error::Result;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

pub fn tests(tests: &mut Vec<Trial>) {
    tests.extend(trials!(
        test_resume_finishes_remaining_batches,
        test_resume_rejects_other_target,
        test_resume_conflicts_with_work_dir
    ));
}

/// Lay out the state an interrupted run leaves behind.
fn write_run_dir(fixture: &Fixture, target: &str, batches: &[(usize, Vec<String>)]) -> Result<PathBuf> {
    let run_dir = fixture.work_dir().join("hdfs-prune-interrupted");
    fs::create_dir_all(&run_dir)?;
    fs::write(run_dir.join("target"), format!("{target}\n"))?;
    for (index, entries) in batches {
        let mut body = entries.join("\n");
        body.push('\n');
        fs::write(run_dir.join(format!("batch_{index:06}.txt")), body)?;
    }
    Ok(run_dir)
}

fn entry(table: &str, i: usize) -> String {
    format!("{table}/dt={i:04}/")
}

fn test_resume_finishes_remaining_batches() -> Result<()> {
    let fixture = Fixture::new();
    let partitions = fixture.create_partitions("events", 12)?;
    // Batch 1 (dt=0000..0004) finished before the interruption.
    for dir in &partitions[..5] {
        fs::remove_dir_all(dir)?;
    }
    let run_dir = write_run_dir(
        &fixture,
        "events",
        &[
            (2, (5..10).map(|i| entry("events", i)).collect()),
            (3, (10..12).map(|i| entry("events", i)).collect()),
        ],
    )?;

    fixture
        .fs_resume_cmd(&run_dir)
        .arg("-f")
        .arg("events")
        .assert()
        .success()
        .stdout(predicate::str::contains("About to delete 7 item(s)"))
        .stdout(predicate::str::contains("in 2 batch(es)"))
        .stdout(predicate::str::contains("Batch 2/3: 5 entries"))
        .stdout(predicate::str::contains("Batch 3/3: 2 entries"))
        .stdout(predicate::str::contains("Finished events: 3 batch(es) processed"));

    assert_eq!(fixture.remaining("events"), 0);
    assert!(!run_dir.exists());
    Ok(())
}

fn test_resume_rejects_other_target() -> Result<()> {
    let fixture = Fixture::new();
    fixture.create_partitions("events", 3)?;
    let run_dir = write_run_dir(
        &fixture,
        "clicks",
        &[(1, (0..3).map(|i| entry("clicks", i)).collect())],
    )?;

    fixture
        .fs_resume_cmd(&run_dir)
        .arg("-f")
        .arg("events")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("clicks"));

    assert_eq!(fixture.remaining("events"), 3);
    assert!(Path::new(&run_dir).join("batch_000001.txt").exists());
    Ok(())
}

fn test_resume_conflicts_with_work_dir() -> Result<()> {
    let fixture = Fixture::new();
    let run_dir = fixture.work_dir().join("hdfs-prune-interrupted");

    fixture
        .fs_cmd()
        .arg("--resume")
        .arg(&run_dir)
        .arg("events")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot be used with"));

    Ok(())
}
