//! Unified error hierarchy for FuelRS
//!
//! Every calculation either fully succeeds or is rejected with a typed error.
//! The core calculators fail on invalid input, or on values too large for
//! exact decimal arithmetic.

use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// Top-level error type for all FuelRS operations
#[derive(Debug, Error)]
pub enum FuelRsError {
    /// Workout input outside the domain of the formulas
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// Calculation errors
    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    /// Report export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Intensity zones that carry a carbohydrate surcharge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntensityZone {
    /// Zone 6/5 (VO2max)
    Vo2Max,
    /// Zone 4 (threshold)
    Threshold,
    /// Zone 3 (tempo)
    Tempo,
}

impl fmt::Display for IntensityZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntensityZone::Vo2Max => write!(f, "zone 6/5"),
            IntensityZone::Threshold => write!(f, "zone 4"),
            IntensityZone::Tempo => write!(f, "zone 3"),
        }
    }
}

/// Input validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// Duration must be strictly positive
    #[error("workout duration must be greater than 0 hours, got {duration_h}")]
    NonPositiveDuration { duration_h: Decimal },

    /// Duration supplied as a float was NaN or infinite
    #[error("workout duration must be a finite number")]
    NonFiniteDuration,

    /// Negative minutes in an intensity zone
    #[error("minutes in {zone} cannot be negative, got {value}")]
    NegativeZoneMinutes { zone: IntensityZone, value: i64 },

    /// Zone minutes too large to represent
    #[error("minutes in {zone} out of range: {value}")]
    ZoneMinutesOutOfRange { zone: IntensityZone, value: i64 },

    /// Negative nutrient amount on a product label
    #[error("{nutrient} per 100 g cannot be negative, got {value}")]
    NegativeNutrient { nutrient: String, value: Decimal },

    /// Invalid duration grid for a sweep
    #[error("invalid sweep range: {reason}")]
    InvalidSweep { reason: String },
}

/// Calculation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    /// Result does not fit the gram output type
    #[error("Numerical overflow in {calculation}")]
    Overflow { calculation: String },
}

/// Report export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for FuelRS operations
pub type Result<T> = std::result::Result<T, FuelRsError>;

impl FuelRsError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FuelRsError::InvalidInput(_) => ErrorSeverity::Warning,
            FuelRsError::Configuration(_) => ErrorSeverity::Warning,
            FuelRsError::Calculation(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            FuelRsError::InvalidInput(InputError::NonPositiveDuration { .. })
            | FuelRsError::InvalidInput(InputError::NonFiniteDuration) => {
                "Please enter a workout duration greater than 0 hours.".to_string()
            }
            FuelRsError::InvalidInput(InputError::NegativeZoneMinutes { zone, .. }) => {
                format!("Time spent in {} must be 0 minutes or more.", zone)
            }
            FuelRsError::Calculation(CalculationError::Overflow { .. }) => {
                "The workout values are too large to compute a plan.".to_string()
            }
            FuelRsError::Configuration(reason) => {
                format!("Could not load the configuration file: {}", reason)
            }
            FuelRsError::Export(ExportError::UnsupportedFormat(format)) => {
                format!(
                    "Unknown report format '{}'. Use text, json, csv or table.",
                    format
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Internal invariant broken
    Critical,
    /// Operation failed
    Error,
    /// Rejected input the user can correct
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_severity() {
        let err = FuelRsError::from(InputError::NonPositiveDuration { duration_h: dec!(0) });
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert_eq!(err.severity().to_tracing_level(), tracing::Level::WARN);

        let err = FuelRsError::from(CalculationError::Overflow {
            calculation: "total".to_string(),
        });
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_user_messages() {
        let err = FuelRsError::from(InputError::NegativeZoneMinutes {
            zone: IntensityZone::Threshold,
            value: -5,
        });
        assert!(err.user_message().contains("zone 4"));

        let err = FuelRsError::from(InputError::NonFiniteDuration);
        assert!(err.user_message().contains("greater than 0"));

        let err = FuelRsError::from(CalculationError::Overflow {
            calculation: "total carbohydrate".to_string(),
        });
        assert!(err.user_message().contains("too large"));

        let err = FuelRsError::Configuration("Failed to parse TOML configuration".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert!(err.user_message().contains("configuration file"));
    }

    #[test]
    fn test_display_includes_value() {
        let err = InputError::NonPositiveDuration { duration_h: dec!(-1.5) };
        assert_eq!(
            err.to_string(),
            "workout duration must be greater than 0 hours, got -1.5"
        );
    }
}
