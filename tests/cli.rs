use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

fn nth_prime_cmd() -> Result<Command, Box<dyn std::error::Error>> {
    Ok(Command::cargo_bin("nth-prime")?)
}

#[test]
fn test_cli_single_index() -> Result<(), Box<dyn std::error::Error>> {
    nth_prime_cmd()?
        .arg("--quiet")
        .arg("4")
        .assert()
        .success()
        .stdout("11\n");
    Ok(())
}

#[test]
fn test_cli_negative_index_is_zero() -> Result<(), Box<dyn std::error::Error>> {
    nth_prime_cmd()?
        .args(["-q", "-5", "1"])
        .assert()
        .success()
        .stdout("2\n3\n");
    Ok(())
}

#[test]
fn test_cli_csv_range_to_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempdir()?;
    let output_path = temp_dir.path().join("results").join("primes.csv");

    nth_prime_cmd()?
        .args(["--from", "0", "--to", "4", "--format", "csv", "--output"])
        .arg(&output_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("Results written to"));

    let contents = std::fs::read_to_string(&output_path)?;
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "index,prime,strategy,elapsed_ms");
    assert!(lines[5].starts_with("4,11,plain,"));

    temp_dir.close()?;
    Ok(())
}

#[test]
fn test_cli_segmented_json() -> Result<(), Box<dyn std::error::Error>> {
    nth_prime_cmd()?
        .args([
            "--threshold",
            "0",
            "--window-size",
            "100",
            "--workers",
            "2",
            "--format",
            "json",
            "25",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"prime\": 101"))
        .stdout(predicate::str::contains("\"strategy\": \"segmented\""))
        .stderr(predicate::str::contains("Window Size: 100"));
    Ok(())
}

#[test]
fn test_cli_rejects_zero_window() -> Result<(), Box<dyn std::error::Error>> {
    nth_prime_cmd()?
        .args(["--window-size", "0", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("window size must be > 0"));
    Ok(())
}

#[test]
fn test_cli_requires_an_index() -> Result<(), Box<dyn std::error::Error>> {
    nth_prime_cmd()?
        .assert()
        .failure()
        .stderr(predicate::str::contains("no indices provided"));
    Ok(())
}

#[test]
fn test_cli_rejects_oversized_range() -> Result<(), Box<dyn std::error::Error>> {
    nth_prime_cmd()?
        .args(["--from", "0", "--to", "5000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("range too large"));
    Ok(())
}
