//! Daily step-count records and reports
//!
//! A daily record is `"<steps>,<duration>"`, for example `"12000,3h30m"`.
//! Daily activity is always walking and distance uses a fixed step length
//! rather than one derived from height.

use chrono::Duration;
use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::duration::{format_duration, parse_duration};
use crate::error::{Result, TrackerError};
use crate::formulas::{FormulaConfig, MetricsCalculator};
use crate::models::{BodyParams, DailyRecord};
use crate::policy::ErrorPolicy;

const DAILY_FIELDS: usize = 2;

/// Parse a daily record, rejecting non-positive steps and durations.
pub fn parse_daily_record(text: &str) -> Result<DailyRecord> {
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != DAILY_FIELDS {
        return Err(TrackerError::Format {
            expected: DAILY_FIELDS,
            actual: parts.len(),
            record: text.to_string(),
        });
    }

    let steps_field = parts[0].trim();
    if steps_field.is_empty() {
        return Err(TrackerError::parse("steps", steps_field, "value is missing"));
    }
    let steps = steps_field
        .parse::<i64>()
        .map_err(|e| TrackerError::parse("steps", steps_field, e))?;
    if steps <= 0 {
        return Err(TrackerError::validation("steps", steps));
    }

    let duration_field = parts[1].trim();
    if duration_field.is_empty() {
        return Err(TrackerError::parse("duration", duration_field, "value is missing"));
    }
    let duration =
        parse_duration(duration_field).map_err(|e| TrackerError::parse("duration", duration_field, e))?;
    if duration <= Duration::zero() {
        return Err(TrackerError::validation("duration", format_duration(&duration)));
    }

    Ok(DailyRecord { steps, duration })
}

/// Summary of one day's walking
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyReport {
    pub steps: i64,
    pub distance_km: f64,
    pub calories: f64,
}

impl fmt::Display for DailyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Количество шагов: {}.", self.steps)?;
        writeln!(f, "Дистанция составила {:.2} км.", self.distance_km)?;
        write!(f, "Вы сожгли {:.2} ккал.", self.calories)
    }
}

/// Builds daily step reports; lenient unless told otherwise
#[derive(Debug, Clone)]
pub struct DailyStepsReporter {
    calculator: MetricsCalculator,
    policy: ErrorPolicy,
}

impl Default for DailyStepsReporter {
    fn default() -> Self {
        Self::new(FormulaConfig::default())
    }
}

impl DailyStepsReporter {
    pub fn new(config: FormulaConfig) -> Self {
        Self {
            calculator: MetricsCalculator::new(config),
            policy: ErrorPolicy::Lenient,
        }
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Parse and compute one record, always propagating errors
    pub fn build(&self, record: &str, body: BodyParams) -> Result<DailyReport> {
        let parsed = parse_daily_record(record)?;
        let distance_km = self.calculator.daily_distance_km(parsed.steps);
        let calories = self.calculator.walking_calories(
            parsed.steps,
            body.weight_kg,
            body.height_m,
            parsed.duration,
        )?;
        debug!(record, steps = parsed.steps, distance_km, calories, "Daily metrics computed");

        Ok(DailyReport {
            steps: parsed.steps,
            distance_km,
            calories,
        })
    }

    /// Text report for one record, subject to the reporter's error policy.
    ///
    /// With the default lenient policy this never fails: a rejected record
    /// is logged once and yields an empty string.
    pub fn report(&self, record: &str, weight_kg: f64, height_m: f64) -> Result<String> {
        let result = self
            .build(record, BodyParams::new(weight_kg, height_m))
            .map(|report| report.to_string());
        self.policy.resolve(result, "daily_report", record)
    }
}

/// Text report for a daily record using the default constants.
///
/// Returns an empty string when the record cannot be reported; an empty
/// result means "no data", never a zero-activity day.
pub fn format_daily_report(record: &str, weight_kg: f64, height_m: f64) -> String {
    DailyStepsReporter::default()
        .report(record, weight_kg, height_m)
        .unwrap_or_default()
}
