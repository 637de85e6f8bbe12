use crate::*;
use hdfs_prune::error::Result;
use predicates::prelude::*;
use std::fs;

pub fn tests(tests: &mut Vec<Trial>) {
    tests.extend(trials!(
        test_prune_after_confirmation,
        test_prune_declined_keeps_everything,
        test_prune_confirmation_is_case_sensitive,
        test_prune_empty_directory,
        test_prune_missing_directory,
        test_prune_force_skips_prompts,
        test_prune_stops_when_batch_prompt_closes,
        test_prune_run_only_confirmation,
        test_prune_dry_run_keeps_everything,
        test_prune_name_filter,
        test_prune_writes_report
    ));
}

fn test_prune_after_confirmation() -> Result<()> {
    let fixture = Fixture::new();
    fixture.create_partitions("events", 12)?;

    // 12 entries -> two batches of up to 10: "yes" once, then Enter per batch.
    fixture
        .fs_cmd()
        .arg("events")
        .write_stdin("yes\n\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("About to delete 12 item(s)"))
        .stdout(predicate::str::contains("in 2 batch(es) of up to 10"))
        .stdout(predicate::str::contains("Batch 1/2: 10 entries"))
        .stdout(predicate::str::contains("Batch 2/2: 2 entries"))
        .stdout(predicate::str::contains("Deleted: 12"));

    assert_eq!(fixture.remaining("events"), 0);
    assert!(fixture.table_dir("events").is_dir());
    assert!(fixture.leftover_runs().is_empty());
    Ok(())
}

fn test_prune_declined_keeps_everything() -> Result<()> {
    let fixture = Fixture::new();
    fixture.create_partitions("events", 7)?;

    fixture
        .fs_cmd()
        .arg("events")
        .write_stdin("no\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cancelled"));

    assert_eq!(fixture.remaining("events"), 7);
    assert!(fixture.leftover_runs().is_empty());
    Ok(())
}

fn test_prune_confirmation_is_case_sensitive() -> Result<()> {
    let fixture = Fixture::new();
    fixture.create_partitions("events", 3)?;

    fixture
        .fs_cmd()
        .arg("events")
        .write_stdin("YES\n\n")
        .assert()
        .failure()
        .code(1);

    assert_eq!(fixture.remaining("events"), 3);
    Ok(())
}

fn test_prune_empty_directory() -> Result<()> {
    let fixture = Fixture::new();
    fs::create_dir_all(fixture.table_dir("events"))?;

    fixture
        .fs_cmd()
        .arg("events")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to do"));

    assert!(fixture.leftover_runs().is_empty());
    Ok(())
}

fn test_prune_missing_directory() -> Result<()> {
    let fixture = Fixture::new();

    fixture
        .fs_cmd()
        .arg("absent")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to list directory"));

    assert!(fixture.leftover_runs().is_empty());
    Ok(())
}

fn test_prune_force_skips_prompts() -> Result<()> {
    let fixture = Fixture::new();
    fixture.create_partitions("events", 25)?;

    fixture
        .fs_cmd()
        .arg("-f")
        .arg("events")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted: 25"));

    assert_eq!(fixture.remaining("events"), 0);
    assert!(fixture.leftover_runs().is_empty());
    Ok(())
}

fn test_prune_stops_when_batch_prompt_closes() -> Result<()> {
    let fixture = Fixture::new();
    fixture.create_partitions("events", 15)?;

    // One Enter covers batch 1; end of input declines batch 2.
    fixture
        .fs_cmd()
        .arg("--confirm")
        .arg("batch")
        .arg("events")
        .write_stdin("\n")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Cancelled events: 1 of 2 batch(es) processed"))
        .stderr(predicate::str::contains("cancelled"));

    assert_eq!(fixture.remaining("events"), 5);
    assert!(fixture.leftover_runs().is_empty());
    Ok(())
}

fn test_prune_run_only_confirmation() -> Result<()> {
    let fixture = Fixture::new();
    fixture.create_partitions("events", 15)?;

    fixture
        .fs_cmd()
        .arg("--confirm")
        .arg("run")
        .arg("events")
        .write_stdin("yes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted: 15"));

    assert_eq!(fixture.remaining("events"), 0);
    Ok(())
}

fn test_prune_dry_run_keeps_everything() -> Result<()> {
    let fixture = Fixture::new();
    fixture.create_partitions("events", 4)?;

    fixture
        .fs_cmd()
        .arg("-f")
        .arg("--dry-run")
        .arg("events")
        .assert()
        .success()
        .stdout(predicate::str::contains("Would delete: events/dt=0000/"))
        .stdout(predicate::str::contains("Would delete: 4"));

    assert_eq!(fixture.remaining("events"), 4);
    assert!(fixture.leftover_runs().is_empty());
    Ok(())
}

fn test_prune_name_filter() -> Result<()> {
    let fixture = Fixture::new();
    fixture.create_partitions("events", 12)?;

    fixture
        .fs_cmd()
        .arg("-f")
        .arg("--name")
        .arg("dt=000*")
        .arg("events")
        .assert()
        .success()
        .stdout(predicate::str::contains("About to delete 10 item(s)"));

    let mut left: Vec<String> = fs::read_dir(fixture.table_dir("events"))?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    left.sort();
    assert_eq!(left, vec!["dt=0010", "dt=0011"]);
    Ok(())
}

fn test_prune_writes_report() -> Result<()> {
    let fixture = Fixture::new();
    fixture.create_partitions("events", 6)?;
    let report = fixture.work_dir().join("report.json");

    fixture
        .fs_cmd()
        .arg("-f")
        .arg("--report")
        .arg(&report)
        .arg("events")
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report)?)?;
    assert_eq!(value["outcome"], "completed");
    assert_eq!(value["hdfs_path"], "events");
    assert_eq!(value["total_deleted"], 6);
    assert_eq!(value["total_failed"], 0);
    assert_eq!(value["batches_processed"], 1);
    Ok(())
}
