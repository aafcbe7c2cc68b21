use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};

/// Activity kinds with their own calorie formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    Walking,
    Running,
}

/// One parsed training record
///
/// The step count is kept signed; positivity is checked by the formulas
/// that consume it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord {
    pub steps: i64,
    pub activity: String,
    pub duration: Duration,
}

/// One parsed daily step record, with both fields already positive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyRecord {
    pub steps: i64,
    pub duration: Duration,
}

/// Body parameters of the person doing the activity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyParams {
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Height in meters
    pub height_m: f64,
}

impl BodyParams {
    pub fn new(weight_kg: f64, height_m: f64) -> Self {
        Self { weight_kg, height_m }
    }

    /// Reject non-positive weight or height
    pub fn validate(&self) -> Result<()> {
        if !(self.weight_kg > 0.0) {
            return Err(TrackerError::validation("weight", self.weight_kg));
        }
        if !(self.height_m > 0.0) {
            return Err(TrackerError::validation("height", self.height_m));
        }
        Ok(())
    }
}

/// Metrics derived from a record and body parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub distance_km: f64,
    pub speed_kmh: f64,
    pub calories: f64,
}
