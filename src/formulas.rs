//! Distance, speed and calorie formulas
//!
//! All numeric constants are carried by [`FormulaConfig`] and injected into
//! [`MetricsCalculator`], so alternative coefficients can be swapped in
//! without touching the formulas themselves.
//!
//! # Example
//!
//! ```rust
//! use chrono::Duration;
//! use tracker::formulas::MetricsCalculator;
//!
//! let calc = MetricsCalculator::default();
//! let km = calc.distance_km(1000, 1.75);
//! assert!((km - 0.7245).abs() < 1e-9);
//!
//! let kcal = calc.running_calories(1000, 75.0, 1.75, Duration::minutes(10)).unwrap();
//! assert!(kcal > 0.0);
//! ```

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::duration;
use crate::error::{Result, TrackerError};
use crate::models::{Activity, BodyParams, DerivedMetrics};

pub const WALKING_LABEL: &str = "Ходьба";
pub const RUNNING_LABEL: &str = "Бег";

/// Named constants used by the formulas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormulaConfig {
    /// Step length as a fraction of body height
    pub step_length_coefficient: f64,

    /// Multiplier applied to the running formula result for walking
    pub walking_calories_coefficient: f64,

    /// Fixed step length in meters used by the daily step report
    pub daily_step_length_m: f64,

    pub meters_in_km: f64,
    pub minutes_in_hour: f64,

    /// Record label selecting the walking formula
    pub walking_label: String,

    /// Record label selecting the running formula
    pub running_label: String,
}

impl Default for FormulaConfig {
    fn default() -> Self {
        Self {
            step_length_coefficient: 0.414,
            walking_calories_coefficient: 0.029,
            daily_step_length_m: 0.65,
            meters_in_km: 1000.0,
            minutes_in_hour: 60.0,
            walking_label: WALKING_LABEL.to_string(),
            running_label: RUNNING_LABEL.to_string(),
        }
    }
}

impl FormulaConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let coefficients = [
            ("step_length_coefficient", self.step_length_coefficient),
            ("walking_calories_coefficient", self.walking_calories_coefficient),
            ("daily_step_length_m", self.daily_step_length_m),
            ("meters_in_km", self.meters_in_km),
            ("minutes_in_hour", self.minutes_in_hour),
        ];
        for (name, value) in coefficients {
            if !(value > 0.0) || !value.is_finite() {
                return Err(TrackerError::Configuration(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        if self.walking_label.trim().is_empty() || self.running_label.trim().is_empty() {
            return Err(TrackerError::Configuration(
                "Activity labels must not be empty".to_string(),
            ));
        }
        if self.walking_label == self.running_label {
            return Err(TrackerError::Configuration(format!(
                "Walking and running labels must differ, both are {:?}",
                self.walking_label
            )));
        }
        Ok(())
    }

    /// Map a record label to an activity by exact match
    pub fn activity_for_label(&self, label: &str) -> Option<Activity> {
        if label == self.walking_label {
            Some(Activity::Walking)
        } else if label == self.running_label {
            Some(Activity::Running)
        } else {
            None
        }
    }
}

/// Calculator applying the formulas with a fixed set of constants
#[derive(Debug, Clone, Default)]
pub struct MetricsCalculator {
    config: FormulaConfig,
}

impl MetricsCalculator {
    pub fn new(config: FormulaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormulaConfig {
        &self.config
    }

    /// Distance in km for a height-derived step length
    pub fn distance_km(&self, steps: i64, height_m: f64) -> f64 {
        let step_length = height_m * self.config.step_length_coefficient;
        steps as f64 * step_length / self.config.meters_in_km
    }

    /// Distance in km for the fixed daily step length
    pub fn daily_distance_km(&self, steps: i64) -> f64 {
        steps as f64 * self.config.daily_step_length_m / self.config.meters_in_km
    }

    /// Mean speed in km/h, `0.0` for a non-positive duration
    pub fn mean_speed_kmh(&self, steps: i64, height_m: f64, duration: Duration) -> f64 {
        if duration <= Duration::zero() {
            return 0.0;
        }
        let hours = duration::hours(&duration);
        if hours == 0.0 {
            return 0.0;
        }
        self.distance_km(steps, height_m) / hours
    }

    /// Calories burned running
    pub fn running_calories(
        &self,
        steps: i64,
        weight_kg: f64,
        height_m: f64,
        duration: Duration,
    ) -> Result<f64> {
        validate_inputs(steps, weight_kg, height_m, duration)?;

        let speed = self.mean_speed_kmh(steps, height_m, duration);
        if !(speed > 0.0) {
            return Err(TrackerError::Compute {
                reason: format!(
                    "mean speed is {} km/h for {} steps over {}",
                    speed,
                    steps,
                    duration::format_duration(&duration)
                ),
            });
        }

        let calories = weight_kg * speed * duration::minutes(&duration) / self.config.minutes_in_hour;
        debug!(steps, weight_kg, height_m, speed, calories, "Running calories computed");
        Ok(calories)
    }

    /// Calories burned walking
    ///
    /// This is the running formula scaled by `walking_calories_coefficient`.
    pub fn walking_calories(
        &self,
        steps: i64,
        weight_kg: f64,
        height_m: f64,
        duration: Duration,
    ) -> Result<f64> {
        let running = self.running_calories(steps, weight_kg, height_m, duration)?;
        Ok(running * self.config.walking_calories_coefficient)
    }

    /// Distance, speed and calories for one activity
    pub fn compute_metrics(
        &self,
        activity: Activity,
        steps: i64,
        body: BodyParams,
        duration: Duration,
    ) -> Result<DerivedMetrics> {
        let calories = match activity {
            Activity::Walking => {
                self.walking_calories(steps, body.weight_kg, body.height_m, duration)?
            }
            Activity::Running => {
                self.running_calories(steps, body.weight_kg, body.height_m, duration)?
            }
        };

        Ok(DerivedMetrics {
            distance_km: self.distance_km(steps, body.height_m),
            speed_kmh: self.mean_speed_kmh(steps, body.height_m, duration),
            calories,
        })
    }
}

fn validate_inputs(steps: i64, weight_kg: f64, height_m: f64, duration: Duration) -> Result<()> {
    if steps <= 0 {
        return Err(TrackerError::validation("steps", steps));
    }
    BodyParams::new(weight_kg, height_m).validate()?;
    if duration <= Duration::zero() {
        return Err(TrackerError::validation("duration", duration::format_duration(&duration)));
    }
    Ok(())
}

/// Distance in km using the default constants
pub fn distance_km(steps: i64, height_m: f64) -> f64 {
    MetricsCalculator::default().distance_km(steps, height_m)
}

/// Mean speed in km/h using the default constants
pub fn mean_speed_kmh(steps: i64, height_m: f64, duration: Duration) -> f64 {
    MetricsCalculator::default().mean_speed_kmh(steps, height_m, duration)
}

/// Running calories using the default constants
pub fn running_calories(steps: i64, weight_kg: f64, height_m: f64, duration: Duration) -> Result<f64> {
    MetricsCalculator::default().running_calories(steps, weight_kg, height_m, duration)
}

/// Walking calories using the default constants
pub fn walking_calories(steps: i64, weight_kg: f64, height_m: f64, duration: Duration) -> Result<f64> {
    MetricsCalculator::default().walking_calories(steps, weight_kg, height_m, duration)
}
