//! Training session records and reports
//!
//! A training record is `"<steps>,<activity label>,<duration>"`, for example
//! `"679,Бег,45m"`. The label selects the walking or running calorie formula.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::duration::{self, parse_duration};
use crate::error::{Result, TrackerError};
use crate::formulas::{FormulaConfig, MetricsCalculator};
use crate::models::{Activity, ActivityRecord, BodyParams, DerivedMetrics};
use crate::policy::ErrorPolicy;

const TRAINING_FIELDS: usize = 3;

/// Parse a training record into steps, activity label and duration.
///
/// The step count may be negative here; callers validate it.
pub fn parse_training_record(text: &str) -> Result<ActivityRecord> {
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != TRAINING_FIELDS {
        return Err(TrackerError::Format {
            expected: TRAINING_FIELDS,
            actual: parts.len(),
            record: text.to_string(),
        });
    }

    let steps_field = parts[0].trim();
    let steps = steps_field
        .parse::<i64>()
        .map_err(|e| TrackerError::parse("steps", steps_field, e))?;

    let activity = parts[1].trim().to_string();

    let duration_field = parts[2].trim();
    let duration =
        parse_duration(duration_field).map_err(|e| TrackerError::parse("duration", duration_field, e))?;

    Ok(ActivityRecord {
        steps,
        activity,
        duration,
    })
}

/// Computed summary of one training session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    pub label: String,
    pub activity: Activity,
    pub duration_hours: f64,
    #[serde(flatten)]
    pub metrics: DerivedMetrics,
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Тип тренировки: {}", self.label)?;
        writeln!(f, "Длительность: {:.2} ч.", self.duration_hours)?;
        writeln!(f, "Дистанция: {:.2} км.", self.metrics.distance_km)?;
        writeln!(f, "Скорость: {:.2} км/ч", self.metrics.speed_kmh)?;
        write!(f, "Сожгли калорий: {:.2}", self.metrics.calories)
    }
}

/// Builds training reports with a given set of constants and error policy
#[derive(Debug, Clone)]
pub struct TrainingReporter {
    calculator: MetricsCalculator,
    policy: ErrorPolicy,
}

impl Default for TrainingReporter {
    fn default() -> Self {
        Self::new(FormulaConfig::default())
    }
}

impl TrainingReporter {
    pub fn new(config: FormulaConfig) -> Self {
        Self {
            calculator: MetricsCalculator::new(config),
            policy: ErrorPolicy::Strict,
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
    pub fn build(&self, record: &str, body: BodyParams) -> Result<TrainingReport> {
        let parsed = parse_training_record(record)?;
        let activity = self
            .calculator
            .config()
            .activity_for_label(&parsed.activity)
            .ok_or_else(|| TrackerError::UnknownActivity {
                label: parsed.activity.clone(),
            })?;

        let metrics = self
            .calculator
            .compute_metrics(activity, parsed.steps, body, parsed.duration)?;
        debug!(record, ?activity, ?metrics, "Training metrics computed");

        Ok(TrainingReport {
            label: parsed.activity,
            activity,
            duration_hours: duration::hours(&parsed.duration),
            metrics,
        })
    }

    /// Text report for one record, subject to the reporter's error policy.
    ///
    /// A lenient reporter yields an empty string for a rejected record.
    pub fn report(&self, record: &str, weight_kg: f64, height_m: f64) -> Result<String> {
        let result = self
            .build(record, BodyParams::new(weight_kg, height_m))
            .map(|report| report.to_string());
        self.policy.resolve(result, "training_report", record)
    }
}

/// Text report for a training record using the default constants.
pub fn format_training_report(record: &str, weight_kg: f64, height_m: f64) -> Result<String> {
    TrainingReporter::default().report(record, weight_kg, height_m)
}
