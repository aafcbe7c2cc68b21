// Library interface for Tracker modules
// Distance, speed and calorie reports from activity log records

pub mod config;
pub mod daysteps;
pub mod duration;
pub mod error;
pub mod formulas;
pub mod logging;
pub mod models;
pub mod policy;
pub mod training;

// Re-export commonly used types for convenience
pub use models::*;
pub use config::{AppConfig, PolicySettings};
pub use daysteps::{format_daily_report, parse_daily_record, DailyReport, DailyStepsReporter};
pub use formulas::{FormulaConfig, MetricsCalculator};
pub use training::{format_training_report, parse_training_record, TrainingReport, TrainingReporter};
pub use error::{TrackerError, Result};
pub use logging::{LogConfig, LogLevel, LogFormat};
pub use policy::ErrorPolicy;
