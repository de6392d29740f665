// Library interface for FuelRS modules
// This allows integration tests and the CLI to share the calculators

pub mod advice;
pub mod carbs;
pub mod config;
pub mod drink;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod plan;
pub mod ratio;

// Re-export commonly used types for convenience
pub use models::*;
pub use advice::{Advisor, FuelingAdvisory, ProductCheck, ProductComposition, ProductVerdict, SessionContext};
pub use carbs::CarbohydrateDemandCalculator;
pub use drink::DrinkRecommender;
pub use ratio::RatioAdvisor;
pub use plan::{DurationRange, FuelingPlan, FuelingPlanner, ZoneMinutes};
pub use export::ReportFormat;
pub use error::{FuelRsError, InputError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
