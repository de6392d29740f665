use tracing::debug;

use crate::error::Result;
use crate::models::{DrinkRecommendation, DrinkType, GlucoseFructoseRatio};

/// Water volume of the standard hourly bottle (mL)
pub const DRINK_VOLUME_ML_PER_HOUR: u32 = 500;
/// Carbohydrate dissolved in the standard hourly bottle (g)
pub const DRINK_CARBS_G_PER_HOUR: u32 = 40;

/// Standardized hourly drink formulation
pub struct DrinkRecommender;

impl DrinkRecommender {
    /// Compose the hourly drink for a ratio.
    ///
    /// The dose is fixed at 40 g in 500 mL whatever the athlete's target
    /// rate; `rate_g_per_h` does not change the formulation.
    pub fn recommend(
        rate_g_per_h: u32,
        ratio: GlucoseFructoseRatio,
    ) -> Result<DrinkRecommendation> {
        let (drink_type, glucose, fructose) = match ratio {
            GlucoseFructoseRatio::GlucoseOnly => {
                (DrinkType::GlucoseOnly, DRINK_CARBS_G_PER_HOUR, 0)
            }
            _ => {
                let (glucose, fructose) = ratio.split(DRINK_CARBS_G_PER_HOUR, "drink dose")?;
                (DrinkType::GlucoseFructose, glucose, fructose)
            }
        };

        debug!(
            rate_g_per_h,
            ratio = %ratio,
            drink = drink_type.label(),
            glucose,
            fructose,
            "Composed hourly drink"
        );

        Ok(DrinkRecommendation {
            drink_type,
            volume_ml_per_hour: DRINK_VOLUME_ML_PER_HOUR,
            glucose_g_per_hour: glucose,
            fructose_g_per_hour: fructose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glucose_only_drink() {
        let drink = DrinkRecommender::recommend(20, GlucoseFructoseRatio::GlucoseOnly).unwrap();

        assert_eq!(drink.drink_type, DrinkType::GlucoseOnly);
        assert_eq!(drink.volume_ml_per_hour, 500);
        assert_eq!(drink.glucose_g_per_hour, 40);
        assert_eq!(drink.fructose_g_per_hour, 0);
    }

    #[test]
    fn test_mixed_drinks() {
        let drink = DrinkRecommender::recommend(53, GlucoseFructoseRatio::OneToHalf).unwrap();
        assert_eq!(drink.drink_type, DrinkType::GlucoseFructose);
        assert_eq!((drink.glucose_g_per_hour, drink.fructose_g_per_hour), (27, 13));

        let drink = DrinkRecommender::recommend(90, GlucoseFructoseRatio::OneToPointEight).unwrap();
        assert_eq!((drink.glucose_g_per_hour, drink.fructose_g_per_hour), (22, 18));

        let drink = DrinkRecommender::recommend(120, GlucoseFructoseRatio::OneToOne).unwrap();
        assert_eq!((drink.glucose_g_per_hour, drink.fructose_g_per_hour), (20, 20));
    }

    #[test]
    fn test_dose_is_always_forty_grams_in_500_ml() {
        for ratio in GlucoseFructoseRatio::ALL {
            for rate in [0, 50, 75, 120] {
                let drink = DrinkRecommender::recommend(rate, ratio).unwrap();
                assert_eq!(drink.glucose_g_per_hour + drink.fructose_g_per_hour, 40);
                assert_eq!(drink.volume_ml_per_hour, 500);
            }
        }
    }

    #[test]
    fn test_rate_does_not_change_formulation() {
        let low = DrinkRecommender::recommend(10, GlucoseFructoseRatio::OneToOne).unwrap();
        let high = DrinkRecommender::recommend(120, GlucoseFructoseRatio::OneToOne).unwrap();
        assert_eq!(low, high);
    }
}
