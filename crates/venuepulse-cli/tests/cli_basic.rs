//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated config directory and verify
//! outputs.

use std::io::Write;
use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_venuepulse"))
        .args(args)
        .env("VENUEPULSE_HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(home: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_predict_weekend_json() {
    let home = tempfile::tempdir().unwrap();
    let output = run_json(
        home.path(),
        &["predict", "--hour", "14", "--weekend", "--seed", "9", "--json"],
    );

    assert_eq!(output["day"], "weekend");
    let points = output["points"].as_array().unwrap();
    assert_eq!(points.len(), 6);
    assert_eq!(points[0]["hour_label"], "Now");
    assert_eq!(points[0]["is_now"], true);
    assert_eq!(points[4]["hour_label"], "6p");
    assert_eq!(points[4]["level"], "active");
    assert_eq!(output["best_time"], "Now");
}

#[test]
fn test_predict_seed_is_reproducible() {
    let home = tempfile::tempdir().unwrap();
    let args = ["predict", "--hour", "7", "--weekday", "--seed", "42", "--json"];
    assert_eq!(run_json(home.path(), &args), run_json(home.path(), &args));
}

#[test]
fn test_predict_date_sets_day_kind() {
    let home = tempfile::tempdir().unwrap();
    // 2024-06-17 was a Monday
    let output = run_json(
        home.path(),
        &["predict", "--hour", "20", "--date", "2024-06-17", "--json"],
    );
    assert_eq!(output["day"], "weekday");
    assert_eq!(output["best_time"], "9p");
}

#[test]
fn test_predict_chart_output() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["predict", "--hour", "22", "--weekday"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Crowd forecast from 22:00 (weekday)"));
    assert!(stdout.contains("12a"));
    assert!(stdout.contains("Best time to visit: 11p"));
}

#[test]
fn test_predict_rejects_bad_input() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["predict", "--hour", "24"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("hour"));

    let (_, _, code) = run_cli(home.path(), &["predict", "--date", "June 1st"]);
    assert_ne!(code, 0);

    let (_, _, code) = run_cli(home.path(), &["predict", "--weekend", "--weekday"]);
    assert_ne!(code, 0);
}

#[test]
fn test_distance() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        home.path(),
        &["distance", "47.6062", "-122.3321", "47.6062", "-122.3321"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("0.00 mi"));
    assert!(stdout.contains("<0.1 mi"));

    let (stdout, _, code) = run_cli(
        home.path(),
        &["distance", "47.6062", "-122.3321", "45.5152", "-122.6784", "--km"],
    );
    assert_eq!(code, 0);
    assert!(stdout.trim().ends_with("km"));

    let (_, _, code) = run_cli(home.path(), &["distance", "95", "0", "0", "0"]);
    assert_ne!(code, 0);
}

#[test]
fn test_venues_nearby_uses_fallback_by_default() {
    let home = tempfile::tempdir().unwrap();
    let output = run_json(home.path(), &["venues", "nearby", "--json"]);
    let venues = output.as_array().unwrap();
    assert!(!venues.is_empty());
    assert!(venues
        .iter()
        .all(|v| v["venue"]["id"].as_str().unwrap().starts_with("fb-")));
}

#[test]
fn test_venues_nearby_falls_back_on_missing_file() {
    let home = tempfile::tempdir().unwrap();
    let missing = home.path().join("nope.json");
    let (stdout, stderr, code) = run_cli(
        home.path(),
        &["venues", "nearby", "--file", missing.to_str().unwrap(), "--sport", "tennis"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("Tennis"));
    assert!(stderr.contains("using fallback"));
}

#[test]
fn test_venues_from_file() {
    let home = tempfile::tempdir().unwrap();
    let path = home.path().join("venues.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(
        br#"[{"id": "v-1", "name": "Pier Courts", "latitude": 47.61, "longitude": -122.34,
              "sports": ["tennis"], "crowd_level": "busy"},
             {"id": "", "name": "Broken"}]"#,
    )
    .unwrap();

    let (stdout, _, code) = run_cli(
        home.path(),
        &["venues", "list", "--file", path.to_str().unwrap()],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("Pier Courts"));
    assert!(stdout.contains("Crowded"));
    assert!(stdout.contains("1 venue(s)"));

    let output = run_json(
        home.path(),
        &["venues", "nearby", "--file", path.to_str().unwrap(), "--radius", "2", "--json"],
    );
    assert_eq!(output.as_array().unwrap().len(), 1);
    assert_eq!(output[0]["venue"]["name"], "Pier Courts");
}

#[test]
fn test_config_get_set_reset() {
    let home = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "search.radius_miles"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "10.0");

    let (stdout, _, code) = run_cli(home.path(), &["config", "set", "user.role", "trainer"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");

    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "user.role"]);
    assert_eq!(stdout.trim(), "trainer");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "user.role", "coach"]);
    assert_ne!(code, 0);

    let (_, _, code) = run_cli(home.path(), &["config", "get", "no.such.key"]);
    assert_ne!(code, 0);

    let (stdout, _, code) = run_cli(home.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("reset"));
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "user.role"]);
    assert_eq!(stdout.trim(), "player");
}

#[test]
fn test_config_set_negative_longitude() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) =
        run_cli(home.path(), &["config", "set", "location.longitude", "-122.5"]);
    assert_eq!(code, 0, "{stderr}");
    assert_eq!(stdout.trim(), "ok");

    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "location.longitude"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "-122.5");
}

#[test]
fn test_config_set_numeric_text_for_string_keys() {
    let home = tempfile::tempdir().unwrap();
    for (key, value) in [("venues_file", "2024"), ("search.sport", "5")] {
        let (_, stderr, code) = run_cli(home.path(), &["config", "set", key, value]);
        assert_eq!(code, 0, "{key}: {stderr}");
        let (stdout, _, _) = run_cli(home.path(), &["config", "get", key]);
        assert_eq!(stdout.trim(), value);
    }
}

#[test]
fn test_config_errors_print_once() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "set", "user.role", "coach"]);
    assert_ne!(code, 0);
    assert!(stderr.starts_with("error: "));
    assert_eq!(stderr.matches("Invalid configuration value").count(), 1);
    assert_eq!(stderr.matches("coach").count(), 1);
}

#[test]
fn test_venues_nearby_explicit_origin_ignores_bad_config_location() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(home.path(), &["config", "set", "location.latitude", "200"]);
    assert_eq!(code, 0);

    let (_, _, code) = run_cli(home.path(), &["venues", "nearby", "--json"]);
    assert_ne!(code, 0);

    let output = run_json(
        home.path(),
        &["venues", "nearby", "--lat", "47.6062", "--lng", "-122.3321", "--json"],
    );
    assert!(!output.as_array().unwrap().is_empty());
}

#[test]
fn test_config_seed_drives_predict() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(home.path(), &["config", "set", "prediction.seed", "5"]);
    assert_eq!(code, 0);

    let from_config = run_json(home.path(), &["predict", "--hour", "8", "--weekday", "--json"]);
    let explicit = run_json(
        home.path(),
        &["predict", "--hour", "8", "--weekday", "--seed", "5", "--json"],
    );
    assert_eq!(from_config, explicit);
}

#[test]
fn test_config_path_is_in_home() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "path"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().ends_with("config.toml"));
    assert!(stdout.contains(home.path().to_str().unwrap()));
}
