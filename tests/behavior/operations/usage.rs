use crate::*;
use hdfs_prune::error::Result;
use predicates::prelude::*;
use std::fs;

pub fn tests(tests: &mut Vec<Trial>) {
    tests.extend(trials!(
        test_missing_path_prints_usage,
        test_help_exits_cleanly,
        test_unsupported_provider_is_rejected,
        test_zero_batch_size_is_rejected,
        test_invalid_name_glob_is_rejected,
        test_config_file_supplies_provider
    ));
}

fn test_missing_path_prints_usage() -> Result<()> {
    let fixture = Fixture::new();

    hdfs_prune_cmd(fixture.work_dir())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage"));

    Ok(())
}

fn test_help_exits_cleanly() -> Result<()> {
    let fixture = Fixture::new();

    hdfs_prune_cmd(fixture.work_dir())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--batch-size"))
        .stdout(predicate::str::contains("--resume"));

    Ok(())
}

fn test_unsupported_provider_is_rejected() -> Result<()> {
    let fixture = Fixture::new();

    hdfs_prune_cmd(fixture.work_dir())
        .arg("--provider")
        .arg("s3")
        .arg("/warehouse/t")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unsupported storage provider"));

    Ok(())
}

fn test_zero_batch_size_is_rejected() -> Result<()> {
    let fixture = Fixture::new();
    fixture.create_partitions("t", 3)?;

    fixture
        .fs_cmd()
        .arg("--batch-size")
        .arg("0")
        .arg("-f")
        .arg("t")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("batch size"));

    assert_eq!(fixture.remaining("t"), 3);
    Ok(())
}

fn test_invalid_name_glob_is_rejected() -> Result<()> {
    let fixture = Fixture::new();
    fixture.create_partitions("t", 3)?;

    fixture
        .fs_cmd()
        .arg("--name")
        .arg("dt=[")
        .arg("-f")
        .arg("t")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--name"));

    assert_eq!(fixture.remaining("t"), 3);
    Ok(())
}

fn test_config_file_supplies_provider() -> Result<()> {
    let fixture = Fixture::new();
    fixture.create_partitions("t", 4)?;
    let config = fixture.work_dir().join("prune.toml");
    fs::write(
        &config,
        format!(
            "[storage]\nprovider = \"fs\"\nroot_path = {:?}\n\n[prune]\nbatch_size = 3\n",
            fixture.root().to_string_lossy()
        ),
    )?;
    let runs = fixture.work_dir().join("runs");

    hdfs_prune_cmd(fixture.work_dir())
        .arg("--config")
        .arg(&config)
        .arg("--work-dir")
        .arg(&runs)
        .arg("-f")
        .arg("t")
        .assert()
        .success()
        .stdout(predicate::str::contains("in 2 batch(es) of up to 3"));

    assert_eq!(fixture.remaining("t"), 0);
    Ok(())
}
