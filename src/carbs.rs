use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::error::{CalculationError, Result};
use crate::models::{round_grams, CarbohydrateDemand, WorkoutInput};

/// Workouts up to this long get the minimum base rate (h)
const SHORT_WORKOUT_H: Decimal = dec!(1.5);
/// Workouts at least this long get the maximum base rate (h)
const LONG_WORKOUT_H: Decimal = dec!(6.0);
/// Base rate for short workouts (g/h)
const MIN_BASE_RATE: Decimal = dec!(20);
/// Base rate for long workouts (g/h)
const MAX_BASE_RATE: Decimal = dec!(120);
/// Hard ceiling on the hourly intake (g/h)
pub const MAX_RATE_G_PER_H: u32 = 120;

/// Extra grams per minute spent in each intensity zone
const Z6_G_PER_MIN: Decimal = dec!(2);
const Z4_G_PER_MIN: Decimal = dec!(1);
const Z3_G_PER_MIN: Decimal = dec!(0.5);

/// Carbohydrate demand from workout duration and intensity
///
/// The base hourly rate grows linearly with duration between 1.5 h and 6 h,
/// time in the upper zones adds a fixed surcharge on top of the base total,
/// and the resulting hourly rate is capped at 120 g/h.
pub struct CarbohydrateDemandCalculator;

impl CarbohydrateDemandCalculator {
    /// Compute total and hourly carbohydrate targets from raw inputs
    pub fn compute(
        duration_h: Decimal,
        z6_minutes: u32,
        z4_minutes: u32,
        z3_minutes: u32,
    ) -> Result<CarbohydrateDemand> {
        let input = WorkoutInput::new(duration_h, z6_minutes, z4_minutes, z3_minutes)?;
        Self::for_workout(&input)
    }

    /// Compute total and hourly carbohydrate targets for a workout
    pub fn for_workout(input: &WorkoutInput) -> Result<CarbohydrateDemand> {
        input.validate()?;

        let duration = input.duration_h;
        let surcharge =
            Self::intensity_surcharge(input.z6_minutes, input.z4_minutes, input.z3_minutes);

        // raw_total / duration, expanded so each term is divided once
        let surcharge_rate =
            checked(surcharge.checked_div(duration), "intensity surcharge rate")?;
        let raw_rate = checked(
            Self::base_rate(duration).checked_add(surcharge_rate),
            "carbohydrate rate",
        )?;
        let max_rate = Decimal::from(MAX_RATE_G_PER_H);

        let (total, rate, capped) = if raw_rate > max_rate {
            let total = checked(max_rate.checked_mul(duration), "capped carbohydrate total")?;
            (total, max_rate, true)
        } else {
            let total = checked(
                Self::baseline_total(duration)?.checked_add(surcharge),
                "total carbohydrate",
            )?;
            (total, raw_rate, false)
        };

        let demand = CarbohydrateDemand {
            total_g: round_grams(total, "total carbohydrate")?,
            rate_g_per_h: round_grams(rate, "carbohydrate rate")?,
            capped,
        };

        debug!(
            duration_h = %duration,
            surcharge_g = %surcharge,
            raw_rate = %raw_rate,
            total_g = demand.total_g,
            rate_g_per_h = demand.rate_g_per_h,
            capped,
            "Computed carbohydrate demand"
        );

        Ok(demand)
    }

    /// Hourly base rate from duration alone (g/h)
    pub fn base_rate(duration_h: Decimal) -> Decimal {
        if duration_h <= SHORT_WORKOUT_H {
            MIN_BASE_RATE
        } else if duration_h >= LONG_WORKOUT_H {
            MAX_BASE_RATE
        } else {
            MIN_BASE_RATE + (duration_h - SHORT_WORKOUT_H) * (MAX_BASE_RATE - MIN_BASE_RATE)
                / (LONG_WORKOUT_H - SHORT_WORKOUT_H)
        }
    }

    /// Grams added for time spent in zones 6/5, 4 and 3
    pub fn intensity_surcharge(z6_minutes: u32, z4_minutes: u32, z3_minutes: u32) -> Decimal {
        Decimal::from(z6_minutes) * Z6_G_PER_MIN
            + Decimal::from(z4_minutes) * Z4_G_PER_MIN
            + Decimal::from(z3_minutes) * Z3_G_PER_MIN
    }

    /// base_rate * duration, with the interpolation divided last so exact
    /// half-gram totals stay exact
    fn baseline_total(duration_h: Decimal) -> std::result::Result<Decimal, CalculationError> {
        let total = if duration_h <= SHORT_WORKOUT_H {
            MIN_BASE_RATE.checked_mul(duration_h)
        } else if duration_h >= LONG_WORKOUT_H {
            MAX_BASE_RATE.checked_mul(duration_h)
        } else {
            // Bounded by the interpolation range
            Some(
                MIN_BASE_RATE * duration_h
                    + (duration_h - SHORT_WORKOUT_H) * (MAX_BASE_RATE - MIN_BASE_RATE) * duration_h
                        / (LONG_WORKOUT_H - SHORT_WORKOUT_H),
            )
        };
        checked(total, "baseline carbohydrate total")
    }
}

fn checked<T>(value: Option<T>, calculation: &str) -> std::result::Result<T, CalculationError> {
    value.ok_or_else(|| CalculationError::Overflow {
        calculation: calculation.to_string(),
    })
}
