use tracing::debug;

use crate::error::Result;
use crate::models::{GlucoseFructoseRatio, RatioRecommendation};

/// Upper bounds (inclusive, g/h) of the ratio tiers
const GLUCOSE_ONLY_MAX_RATE: u32 = 50;
const ONE_TO_HALF_MAX_RATE: u32 = 70;
const ONE_TO_POINT_EIGHT_MAX_RATE: u32 = 100;

/// Glucose:fructose ratio selection
///
/// Above roughly 50-60 g/h the intestinal glucose transporter saturates, so
/// higher intakes mix in fructose which uses a separate transporter.
pub struct RatioAdvisor;

impl RatioAdvisor {
    /// Recommend a ratio for the hourly rate and split the workout total by it
    pub fn advise(rate_g_per_h: u32, total_g: u32) -> Result<RatioRecommendation> {
        let ratio = Self::ratio_for_rate(rate_g_per_h);
        let (glucose_g, fructose_g) = ratio.split(total_g, "glucose/fructose split")?;

        debug!(
            rate_g_per_h,
            total_g,
            ratio = %ratio,
            glucose_g,
            fructose_g,
            "Selected glucose/fructose ratio"
        );

        Ok(RatioRecommendation {
            ratio,
            glucose_g,
            fructose_g,
        })
    }

    /// Ratio tier for an hourly carbohydrate rate
    pub fn ratio_for_rate(rate_g_per_h: u32) -> GlucoseFructoseRatio {
        if rate_g_per_h <= GLUCOSE_ONLY_MAX_RATE {
            GlucoseFructoseRatio::GlucoseOnly
        } else if rate_g_per_h <= ONE_TO_HALF_MAX_RATE {
            GlucoseFructoseRatio::OneToHalf
        } else if rate_g_per_h <= ONE_TO_POINT_EIGHT_MAX_RATE {
            GlucoseFructoseRatio::OneToPointEight
        } else {
            GlucoseFructoseRatio::OneToOne
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RatioAdvisor::ratio_for_rate(0), GlucoseFructoseRatio::GlucoseOnly);
        assert_eq!(RatioAdvisor::ratio_for_rate(50), GlucoseFructoseRatio::GlucoseOnly);
        assert_eq!(RatioAdvisor::ratio_for_rate(51), GlucoseFructoseRatio::OneToHalf);
        assert_eq!(RatioAdvisor::ratio_for_rate(70), GlucoseFructoseRatio::OneToHalf);
        assert_eq!(RatioAdvisor::ratio_for_rate(71), GlucoseFructoseRatio::OneToPointEight);
        assert_eq!(RatioAdvisor::ratio_for_rate(100), GlucoseFructoseRatio::OneToPointEight);
        assert_eq!(RatioAdvisor::ratio_for_rate(101), GlucoseFructoseRatio::OneToOne);
        assert_eq!(RatioAdvisor::ratio_for_rate(120), GlucoseFructoseRatio::OneToOne);
    }

    #[test]
    fn test_ratio_depends_on_rate_only() {
        let small = RatioAdvisor::advise(60, 100).unwrap();
        let large = RatioAdvisor::advise(60, 400).unwrap();

        assert_eq!(small.ratio, large.ratio);
        assert_eq!(small.ratio.as_tuple(), (dec!(1), dec!(0.5)));
    }

    #[test]
    fn test_split_of_total() {
        let advice = RatioAdvisor::advise(53, 160).unwrap();
        assert_eq!(advice.ratio, GlucoseFructoseRatio::OneToHalf);
        assert_eq!(advice.glucose_g, 107);
        assert_eq!(advice.fructose_g, 53);

        let advice = RatioAdvisor::advise(20, 20).unwrap();
        assert_eq!(advice.ratio, GlucoseFructoseRatio::GlucoseOnly);
        assert_eq!(advice.glucose_g, 20);
        assert_eq!(advice.fructose_g, 0);

        // 720 / 2 on each side
        let advice = RatioAdvisor::advise(120, 720).unwrap();
        assert_eq!(advice.ratio, GlucoseFructoseRatio::OneToOne);
        assert_eq!((advice.glucose_g, advice.fructose_g), (360, 360));
    }

    #[test]
    fn test_rounded_parts_may_miss_total_by_one() {
        // 1:1 split of an odd total: 22.5 + 22.5, both round down to even
        let advice = RatioAdvisor::advise(110, 45).unwrap();
        assert_eq!(advice.glucose_g + advice.fructose_g, 44);
    }

    #[test]
    fn test_one_to_point_eight_split() {
        // 270 / 1.8 = 150, 270 * 0.8 / 1.8 = 120
        let advice = RatioAdvisor::advise(90, 270).unwrap();
        assert_eq!(advice.ratio, GlucoseFructoseRatio::OneToPointEight);
        assert_eq!((advice.glucose_g, advice.fructose_g), (150, 120));
    }
}
