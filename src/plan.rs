//! End-to-end fueling plan
//!
//! Runs the demand, ratio and drink calculators in sequence and attaches the
//! practical advice. The duration sweep evaluates many independent plans
//! with rayon, mirroring the duration range an athlete would scan through.

use rayon::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::advice::{Advisor, FuelingAdvisory, SessionContext};
use crate::carbs::CarbohydrateDemandCalculator;
use crate::drink::{DrinkRecommender, DRINK_CARBS_G_PER_HOUR};
use crate::error::{InputError, IntensityZone, Result};
use crate::models::{
    checked_zone_minutes, CarbohydrateDemand, DrinkRecommendation, RatioRecommendation,
    WorkoutInput,
};
use crate::ratio::RatioAdvisor;

/// Largest number of durations a single sweep may evaluate
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Complete fueling recommendation for one workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelingPlan {
    pub input: WorkoutInput,
    pub demand: CarbohydrateDemand,
    pub ratio: RatioRecommendation,
    pub drink: DrinkRecommendation,
    pub advisory: FuelingAdvisory,
}

impl FuelingPlan {
    /// Hourly carbohydrate left for gels and solids once the drink is counted
    pub fn solid_food_grams_per_hour(&self) -> u32 {
        self.demand
            .rate_g_per_h
            .saturating_sub(self.drink.glucose_g_per_hour + self.drink.fructose_g_per_hour)
    }

    /// Whether the drink alone covers the hourly target
    pub fn drink_covers_target(&self) -> bool {
        self.demand.rate_g_per_h <= DRINK_CARBS_G_PER_HOUR
    }
}

/// Zone minutes shared by every point of a sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneMinutes {
    pub z6: u32,
    pub z4: u32,
    pub z3: u32,
}

impl ZoneMinutes {
    /// Build zone minutes from signed values, rejecting negatives
    pub fn from_signed(z6: i64, z4: i64, z3: i64) -> std::result::Result<Self, InputError> {
        Ok(ZoneMinutes {
            z6: checked_zone_minutes(IntensityZone::Vo2Max, z6)?,
            z4: checked_zone_minutes(IntensityZone::Threshold, z4)?,
            z3: checked_zone_minutes(IntensityZone::Tempo, z3)?,
        })
    }
}

/// Duration grid for a sweep, in hours (inclusive bounds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationRange {
    pub from_h: Decimal,
    pub to_h: Decimal,
    pub step_h: Decimal,
}

impl Default for DurationRange {
    fn default() -> Self {
        Self {
            from_h: dec!(1.0),
            to_h: dec!(6.0),
            step_h: dec!(0.25),
        }
    }
}

impl DurationRange {
    /// Every duration on the grid, from `from_h` up to and including `to_h`
    pub fn durations(&self) -> std::result::Result<Vec<Decimal>, InputError> {
        if self.step_h <= Decimal::ZERO {
            return Err(InputError::InvalidSweep {
                reason: format!("step must be positive, got {}", self.step_h),
            });
        }
        if self.from_h <= Decimal::ZERO {
            return Err(InputError::InvalidSweep {
                reason: format!("start duration must be positive, got {}", self.from_h),
            });
        }
        if self.to_h < self.from_h {
            return Err(InputError::InvalidSweep {
                reason: format!("end {} is before start {}", self.to_h, self.from_h),
            });
        }

        let steps = (self.to_h - self.from_h)
            .checked_div(self.step_h)
            .and_then(|steps| steps.floor().to_usize())
            .filter(|steps| *steps < MAX_SWEEP_POINTS)
            .ok_or_else(|| InputError::InvalidSweep {
                reason: format!("more than {} durations requested", MAX_SWEEP_POINTS),
            })?;

        Ok((0..=steps)
            .map(|i| self.from_h + self.step_h * Decimal::from(i))
            .collect())
    }
}

/// Runs the full fueling pipeline
pub struct FuelingPlanner;

impl FuelingPlanner {
    /// Build the fueling plan for one workout
    pub fn plan(input: &WorkoutInput, context: SessionContext) -> Result<FuelingPlan> {
        let demand = CarbohydrateDemandCalculator::for_workout(input)?;
        let ratio = RatioAdvisor::advise(demand.rate_g_per_h, demand.total_g)?;
        let drink = DrinkRecommender::recommend(demand.rate_g_per_h, ratio.ratio)?;
        let advisory = Advisor::for_rate(demand.rate_g_per_h, context);

        debug!(
            duration_h = %input.duration_h,
            total_g = demand.total_g,
            rate_g_per_h = demand.rate_g_per_h,
            ratio = %ratio.ratio,
            %context,
            "Built fueling plan"
        );

        Ok(FuelingPlan {
            input: input.clone(),
            demand,
            ratio,
            drink,
            advisory,
        })
    }

    /// Build plans for every duration of a range with fixed zone minutes
    pub fn sweep(
        zones: ZoneMinutes,
        range: &DurationRange,
        context: SessionContext,
    ) -> Result<Vec<FuelingPlan>> {
        let durations = range.durations()?;

        info!(
            from_h = %range.from_h,
            to_h = %range.to_h,
            step_h = %range.step_h,
            points = durations.len(),
            "Sweeping workout durations"
        );

        durations
            .par_iter()
            .map(|duration| -> Result<FuelingPlan> {
                let input = WorkoutInput::new(*duration, zones.z6, zones.z4, zones.z3)?;
                Self::plan(&input, context)
            })
            .collect()
    }
}
