//! Integration tests for diagnostic logging of rejected records
//!
//! Events are captured with an in-memory `fmt` subscriber scoped to each test.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use tracker::{
    format_daily_report, format_training_report, DailyStepsReporter, ErrorPolicy, TrackerError,
    TrainingReporter,
};

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn lines(&self) -> Vec<String> {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf)
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with WARN-and-above events captured, one line per event
fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(Level::WARN)
        .with_ansi(false)
        .without_time()
        .compact()
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs.lines())
}

#[test]
fn test_malformed_daily_record_logs_once() {
    for record in ["garbage", "-5,1h", ",1h", "100,", "100,zz", "1,2,3"] {
        let (text, lines) = capture_warnings(|| format_daily_report(record, 75.0, 1.75));
        assert_eq!(text, "", "record {:?}", record);
        assert_eq!(lines.len(), 1, "record {:?} logged {:?}", record, lines);
        assert!(lines[0].contains("WARN"));
    }
}

#[test]
fn test_daily_log_names_the_problem() {
    let (_, lines) = capture_warnings(|| format_daily_report("-5,1h", 75.0, 1.75));
    assert!(lines[0].contains("daily_report"));
    assert!(lines[0].contains("steps"));
}

#[test]
fn test_calorie_failure_in_daily_logs_once() {
    let (text, lines) = capture_warnings(|| format_daily_report("10000,1h", 0.0, 1.75));
    assert_eq!(text, "");
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("weight"));
}

#[test]
fn test_valid_daily_record_is_silent() {
    let (text, lines) = capture_warnings(|| format_daily_report("10000,1h", 75.0, 1.75));
    assert!(!text.is_empty());
    assert!(lines.is_empty(), "unexpected logs {:?}", lines);
}

#[test]
fn test_strict_training_does_not_log() {
    let (result, lines) = capture_warnings(|| format_training_report("679,Плавание,45m", 75.0, 1.75));
    assert!(result.is_err());
    assert!(lines.is_empty());
}

#[test]
fn test_lenient_training_logs_once() {
    let reporter = TrainingReporter::default().with_policy(ErrorPolicy::Lenient);
    let (result, lines) = capture_warnings(|| reporter.report("679,Плавание,45m", 75.0, 1.75));
    assert_eq!(result.unwrap(), "");
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("training_report"));
}

#[test]
fn test_strict_daily_does_not_log() {
    let reporter = DailyStepsReporter::default().with_policy(ErrorPolicy::Strict);
    let (result, lines) = capture_warnings(|| reporter.report("-5,1h", 75.0, 1.75));
    assert!(result.is_err());
    assert!(lines.is_empty());
}

#[test]
fn test_lenient_log_level_follows_severity() {
    let (_, lines) = capture_warnings(|| {
        ErrorPolicy::Lenient.resolve::<String>(
            Err(TrackerError::Compute {
                reason: "speed is zero".to_string(),
            }),
            "training_report",
            "1,Бег,1ns",
        )
    });
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("ERROR"), "{:?}", lines);

    let (_, lines) = capture_warnings(|| {
        ErrorPolicy::Lenient.resolve::<String>(
            Err(TrackerError::UnknownActivity {
                label: "Плавание".to_string(),
            }),
            "training_report",
            "679,Плавание,45m",
        )
    });
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("WARN"), "{:?}", lines);
}
