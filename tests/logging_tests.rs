//! Integration test for the JSON log file sink
//!
//! Installs the global subscriber, so it lives in its own test binary.

use std::fs;

use tempfile::TempDir;
use tracker::{format_daily_report, LogConfig};

#[test]
fn test_lenient_rejection_is_written_to_log_file() {
    let dir = TempDir::new().unwrap();
    let config = LogConfig {
        file_path: Some(dir.path().join("tracker.log")),
        rotation: true,
        ..LogConfig::default()
    };
    tracker::logging::init_logging(&config).unwrap();

    assert_eq!(format_daily_report("garbage", 75.0, 1.75), "");

    let entries: Vec<serde_json::Value> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.file_name().unwrap().to_string_lossy().starts_with("tracker.log"))
        .flat_map(|p| {
            fs::read_to_string(p)
                .unwrap()
                .lines()
                .map(|l| serde_json::from_str(l).unwrap())
                .collect::<Vec<_>>()
        })
        .collect();

    let rejected: Vec<_> = entries
        .iter()
        .filter(|e| e["fields"]["operation"] == "daily_report")
        .collect();
    assert_eq!(rejected.len(), 1, "{:?}", entries);
    assert_eq!(rejected[0]["level"], "WARN");
    assert_eq!(rejected[0]["fields"]["record"], "garbage");
}
