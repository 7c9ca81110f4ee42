//! Integration tests for the emtportal CLI

use std::process::{Command, Output};

/// Run the binary with routing pointed at a closed local port so every
/// lookup takes the offline fallback
fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_emtportal"))
        .env("EMTPORTAL_ROUTING__BASE_URL", "http://127.0.0.1:9")
        .env("EMTPORTAL_ROUTING__TIMEOUT_SECONDS", "2")
        .env("EMTPORTAL_LOGGING__LEVEL", "error")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Test that the CLI shows help with the explicit flag
#[test]
fn test_cli_help() {
    let output = run(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("emtportal"));
    assert!(stdout.contains("nearest"));
    assert!(stdout.contains("serve"));
}

/// Test that running without a subcommand fails with usage
#[test]
fn test_cli_requires_subcommand() {
    let output = run(&[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"));
}

/// Test nearest hospitals fall back to estimates when routing is down
#[test]
fn test_nearest_offline_uses_estimates() {
    let output = run(&["nearest", "--lat", "40.9276", "--lon", "-73.9976", "--limit", "3"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stdout: {stdout}\nstderr: {stderr}");
    assert!(stdout.contains("Hospitals nearest to 40.9276, -73.9976"));

    let lines: Vec<&str> = stdout.lines().skip(1).collect();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|line| line.contains(" - ~")));
}

/// Test error handling for out-of-range coordinates
#[test]
fn test_nearest_invalid_coordinate() {
    let output = run(&["nearest", "--lat", "200", "--lon", "-74"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid coordinate"));
}

/// Test custom config file option
#[test]
fn test_custom_config_with_hospital_file() {
    let dir = std::env::temp_dir();
    let hospitals = dir.join(format!("emtportal-cli-hospitals-{}.json", std::process::id()));
    let config = dir.join(format!("emtportal-cli-config-{}.toml", std::process::id()));
    std::fs::write(
        &hospitals,
        r#"[{"name": "Only Hospital", "address": "1 Main St", "phone": "555-0100", "trauma": true, "coordinates": [40.97236, -74.0]}]"#,
    )
    .unwrap();
    std::fs::write(
        &config,
        format!("[directory]\nhospitals_path = {:?}\n", hospitals.display().to_string()),
    )
    .unwrap();

    let output = run(&[
        "--config",
        config.to_str().unwrap(),
        "nearest",
        "--lat",
        "40.9",
        "--lon",
        "-74.0",
    ]);
    std::fs::remove_file(&hospitals).unwrap();
    std::fs::remove_file(&config).unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stdout: {stdout}");
    assert!(stdout.contains("Only Hospital [Trauma] - ~5 miles (9 min) - 555-0100"));
}
