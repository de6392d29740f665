use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CalculationError, InputError, IntensityZone};

/// Workout description supplied by the athlete
///
/// Duration is in hours; the zone fields count whole minutes spent in each
/// intensity band during the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutInput {
    /// Total workout duration in hours
    pub duration_h: Decimal,

    /// Minutes in zone 6/5 (VO2max)
    pub z6_minutes: u32,

    /// Minutes in zone 4 (threshold)
    pub z4_minutes: u32,

    /// Minutes in zone 3 (tempo)
    pub z3_minutes: u32,
}

impl WorkoutInput {
    /// Build a validated workout input
    pub fn new(
        duration_h: Decimal,
        z6_minutes: u32,
        z4_minutes: u32,
        z3_minutes: u32,
    ) -> Result<Self, InputError> {
        let input = WorkoutInput {
            duration_h,
            z6_minutes,
            z4_minutes,
            z3_minutes,
        };
        input.validate()?;
        Ok(input)
    }

    /// Build a workout input from signed zone minutes, rejecting negatives
    pub fn from_signed(
        duration_h: Decimal,
        z6_minutes: i64,
        z4_minutes: i64,
        z3_minutes: i64,
    ) -> Result<Self, InputError> {
        Self::new(
            duration_h,
            checked_zone_minutes(IntensityZone::Vo2Max, z6_minutes)?,
            checked_zone_minutes(IntensityZone::Threshold, z4_minutes)?,
            checked_zone_minutes(IntensityZone::Tempo, z3_minutes)?,
        )
    }

    /// Build a workout input from a floating point duration
    pub fn from_hours_f64(
        duration_h: f64,
        z6_minutes: u32,
        z4_minutes: u32,
        z3_minutes: u32,
    ) -> Result<Self, InputError> {
        if !duration_h.is_finite() {
            return Err(InputError::NonFiniteDuration);
        }
        let duration = Decimal::from_f64(duration_h).ok_or(InputError::NonFiniteDuration)?;
        Self::new(duration, z6_minutes, z4_minutes, z3_minutes)
    }

    /// Check the domain preconditions of the carbohydrate formulas
    pub fn validate(&self) -> Result<(), InputError> {
        if self.duration_h <= Decimal::ZERO {
            return Err(InputError::NonPositiveDuration {
                duration_h: self.duration_h,
            });
        }
        Ok(())
    }
}

/// Convert signed zone minutes, rejecting negative and oversized values
pub fn checked_zone_minutes(zone: IntensityZone, value: i64) -> Result<u32, InputError> {
    if value < 0 {
        return Err(InputError::NegativeZoneMinutes { zone, value });
    }
    u32::try_from(value).map_err(|_| InputError::ZoneMinutesOutOfRange { zone, value })
}

/// Carbohydrate targets for a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarbohydrateDemand {
    /// Total carbohydrate for the whole workout (g)
    pub total_g: u32,

    /// Hourly carbohydrate target (g/h), never above 120
    pub rate_g_per_h: u32,

    /// Whether the 120 g/h ceiling replaced the raw computation
    pub capped: bool,
}

/// Recommended glucose:fructose ratio, expressed as 1:f
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlucoseFructoseRatio {
    /// 1:0
    GlucoseOnly,
    /// 1:0.5
    OneToHalf,
    /// 1:0.8
    OneToPointEight,
    /// 1:1
    OneToOne,
}

impl GlucoseFructoseRatio {
    pub const ALL: [GlucoseFructoseRatio; 4] = [
        GlucoseFructoseRatio::GlucoseOnly,
        GlucoseFructoseRatio::OneToHalf,
        GlucoseFructoseRatio::OneToPointEight,
        GlucoseFructoseRatio::OneToOne,
    ];

    /// Glucose side of the ratio, always 1
    pub fn glucose_units(&self) -> Decimal {
        Decimal::ONE
    }

    /// Fructose side of the ratio
    pub fn fructose_units(&self) -> Decimal {
        match self {
            GlucoseFructoseRatio::GlucoseOnly => Decimal::ZERO,
            GlucoseFructoseRatio::OneToHalf => dec!(0.5),
            GlucoseFructoseRatio::OneToPointEight => dec!(0.8),
            GlucoseFructoseRatio::OneToOne => Decimal::ONE,
        }
    }

    /// The ratio as a (glucose, fructose) tuple
    pub fn as_tuple(&self) -> (Decimal, Decimal) {
        (self.glucose_units(), self.fructose_units())
    }

    /// Share of glucose in the mix: 1 / (1 + f)
    pub fn glucose_fraction(&self) -> Decimal {
        Decimal::ONE / (Decimal::ONE + self.fructose_units())
    }

    /// Share of fructose in the mix: f / (1 + f)
    pub fn fructose_fraction(&self) -> Decimal {
        self.fructose_units() / (Decimal::ONE + self.fructose_units())
    }

    /// Split a carbohydrate amount into (glucose, fructose) grams.
    ///
    /// Each part is rounded on its own, so the parts may sum to one gram
    /// more or less than `grams`.
    pub fn split(&self, grams: u32, calculation: &str) -> Result<(u32, u32), CalculationError> {
        let grams = Decimal::from(grams);
        let glucose = round_grams(grams * self.glucose_fraction(), calculation)?;
        let fructose = round_grams(grams * self.fructose_fraction(), calculation)?;
        Ok((glucose, fructose))
    }
}

impl fmt::Display for GlucoseFructoseRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.glucose_units(), self.fructose_units())
    }
}

/// Glucose/fructose split of the workout's carbohydrate total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioRecommendation {
    pub ratio: GlucoseFructoseRatio,
    pub glucose_g: u32,
    pub fructose_g: u32,
}

/// Drink formulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrinkType {
    /// Water with glucose (dextrose or maltodextrin) only
    GlucoseOnly,
    /// Water with glucose and fructose mixed in the recommended ratio
    GlucoseFructose,
}

impl DrinkType {
    pub fn label(&self) -> &'static str {
        match self {
            DrinkType::GlucoseOnly => "water + glucose only",
            DrinkType::GlucoseFructose => "water + glucose + fructose (ratio-respecting)",
        }
    }
}

impl fmt::Display for DrinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Standardized hourly drink composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkRecommendation {
    pub drink_type: DrinkType,

    /// Water volume per hour (mL)
    pub volume_ml_per_hour: u32,

    /// Glucose dissolved per hour of drink (g)
    pub glucose_g_per_hour: u32,

    /// Fructose dissolved per hour of drink (g)
    pub fructose_g_per_hour: u32,
}

/// Round a gram quantity to the nearest integer, ties to even
pub fn round_grams(value: Decimal, calculation: &str) -> Result<u32, CalculationError> {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);

    if rounded < Decimal::ZERO {
        return Err(CalculationError::Overflow {
            calculation: calculation.to_string(),
        });
    }

    rounded.to_u32().ok_or_else(|| CalculationError::Overflow {
        calculation: calculation.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workout_input_validation() {
        assert!(WorkoutInput::new(dec!(3.0), 0, 0, 0).is_ok());
        assert!(WorkoutInput::new(dec!(0.01), 10, 0, 0).is_ok());

        assert_eq!(
            WorkoutInput::new(dec!(0), 0, 0, 0),
            Err(InputError::NonPositiveDuration { duration_h: dec!(0) })
        );
        assert!(WorkoutInput::new(dec!(-2), 0, 0, 0).is_err());
    }

    #[test]
    fn test_signed_zone_minutes() {
        let input = WorkoutInput::from_signed(dec!(2.5), 10, 20, 30).unwrap();
        assert_eq!(input.z6_minutes, 10);
        assert_eq!(input.z4_minutes, 20);
        assert_eq!(input.z3_minutes, 30);

        assert_eq!(
            WorkoutInput::from_signed(dec!(2.5), 0, -1, 0),
            Err(InputError::NegativeZoneMinutes {
                zone: IntensityZone::Threshold,
                value: -1
            })
        );
        assert!(matches!(
            WorkoutInput::from_signed(dec!(2.5), 0, 0, i64::MAX),
            Err(InputError::ZoneMinutesOutOfRange { .. })
        ));
    }

    #[test]
    fn test_float_duration() {
        let input = WorkoutInput::from_hours_f64(2.25, 0, 0, 0).unwrap();
        assert_eq!(input.duration_h, dec!(2.25));

        assert_eq!(
            WorkoutInput::from_hours_f64(f64::NAN, 0, 0, 0),
            Err(InputError::NonFiniteDuration)
        );
        assert_eq!(
            WorkoutInput::from_hours_f64(f64::INFINITY, 0, 0, 0),
            Err(InputError::NonFiniteDuration)
        );
    }

    #[test]
    fn test_ratio_fractions_sum_to_one() {
        for ratio in GlucoseFructoseRatio::ALL {
            assert_eq!(ratio.glucose_fraction() + ratio.fructose_fraction(), Decimal::ONE);
        }
    }

    #[test]
    fn test_ratio_display() {
        assert_eq!(GlucoseFructoseRatio::GlucoseOnly.to_string(), "1:0");
        assert_eq!(GlucoseFructoseRatio::OneToHalf.to_string(), "1:0.5");
        assert_eq!(GlucoseFructoseRatio::OneToPointEight.to_string(), "1:0.8");
        assert_eq!(GlucoseFructoseRatio::OneToOne.to_string(), "1:1");
    }

    #[test]
    fn test_split() {
        // 160 * 2/3 = 106.67 -> 107, 160 * 1/3 = 53.33 -> 53
        assert_eq!(GlucoseFructoseRatio::OneToHalf.split(160, "test").unwrap(), (107, 53));
        // 40 / 1.8 = 22.22 -> 22, 40 * 0.8 / 1.8 = 17.78 -> 18
        assert_eq!(GlucoseFructoseRatio::OneToPointEight.split(40, "test").unwrap(), (22, 18));
        assert_eq!(GlucoseFructoseRatio::GlucoseOnly.split(75, "test").unwrap(), (75, 0));
    }

    #[test]
    fn test_split_rounds_parts_independently() {
        // 45 / 2 = 22.5 on both sides, ties go to even
        assert_eq!(GlucoseFructoseRatio::OneToOne.split(45, "test").unwrap(), (22, 22));
    }

    #[test]
    fn test_round_grams_ties_to_even() {
        assert_eq!(round_grams(dec!(82.5), "test").unwrap(), 82);
        assert_eq!(round_grams(dec!(83.5), "test").unwrap(), 84);
        assert_eq!(round_grams(dec!(53.333), "test").unwrap(), 53);
        assert!(round_grams(dec!(-1), "test").is_err());
    }

    #[test]
    fn test_drink_labels() {
        assert_eq!(DrinkType::GlucoseOnly.label(), "water + glucose only");
        assert_eq!(
            DrinkType::GlucoseFructose.to_string(),
            "water + glucose + fructose (ratio-respecting)"
        );
    }
}
