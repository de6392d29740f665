//! Practical fueling advice that accompanies the computed targets
//!
//! Covers hydration with the standard drink, the choice of solid foods for
//! training and racing, and a label check for industrial products.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::drink::{DRINK_CARBS_G_PER_HOUR, DRINK_VOLUME_ML_PER_HOUR};
use crate::error::InputError;

/// Below this hourly rate the carbohydrate in the drink is optional (g/h)
const OPTIONAL_DRINK_DOSE_BELOW_RATE: u32 = 50;

/// Maximum fat, protein or fiber per 100 g for a solid product
pub const MAX_SLOW_NUTRIENT_G_PER_100G: Decimal = dec!(2);

/// Kind of session the athlete is fueling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionContext {
    #[default]
    Training,
    Race,
}

impl std::str::FromStr for SessionContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "training" | "train" => Ok(SessionContext::Training),
            "race" | "racing" | "competition" => Ok(SessionContext::Race),
            _ => Err(format!("Invalid session context: {}", s)),
        }
    }
}

impl fmt::Display for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionContext::Training => write!(f, "training"),
            SessionContext::Race => write!(f, "race"),
        }
    }
}

/// Carbohydrate sources beyond the drink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodOption {
    Gels,
    RiceCakes,
    /// Commercial bars, subject to a label check
    CheckedBars,
}

impl FoodOption {
    pub fn description(&self) -> &'static str {
        match self {
            FoodOption::Gels => "gels, the best complement to the drink",
            FoodOption::RiceCakes => "rice cakes, easy to make at home",
            FoodOption::CheckedBars => "bars or other industrial solids, after checking the label",
        }
    }
}

/// Hydration advice for the standard drink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkAdvisory {
    /// Water to drink every hour regardless of carbohydrate (mL)
    pub water_ml_per_hour: u32,

    /// Whether the athlete may skip carbohydrate in the drink
    pub drink_dose_optional: bool,

    pub notes: Vec<String>,
}

/// Solid food advice for a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolidFoodGuidance {
    pub context: SessionContext,
    pub options: Vec<FoodOption>,
    pub notes: Vec<String>,
}

/// Everything an athlete should read alongside the numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelingAdvisory {
    pub drink: DrinkAdvisory,
    pub solid_food: SolidFoodGuidance,
    pub product_caveats: Vec<String>,
}

/// Nutrients that slow carbohydrate absorption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlowNutrient {
    Fat,
    Protein,
    Fiber,
}

impl fmt::Display for SlowNutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlowNutrient::Fat => write!(f, "fat"),
            SlowNutrient::Protein => write!(f, "protein"),
            SlowNutrient::Fiber => write!(f, "fiber"),
        }
    }
}

/// Nutrition label of a product, per 100 g
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductComposition {
    pub fat_g: Decimal,
    pub protein_g: Decimal,
    pub fiber_g: Decimal,

    /// Candy and sweets
    #[serde(default)]
    pub is_candy: bool,
}

/// A nutrient above the per-100 g limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceededNutrient {
    pub nutrient: SlowNutrient,
    pub grams_per_100g: Decimal,
}

/// Outcome of a product label check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ProductVerdict {
    Suitable,
    /// One or more slow nutrients above the limit
    Unsuitable { exceeded: Vec<ExceededNutrient> },
    /// Candy: additives, colorings and sweeteners make it a poor choice
    NotRecommended,
}

impl ProductVerdict {
    pub fn is_suitable(&self) -> bool {
        matches!(self, ProductVerdict::Suitable)
    }
}

/// Label check for solid products
pub struct ProductCheck;

impl ProductCheck {
    /// Evaluate a product's per-100 g composition
    pub fn evaluate(product: &ProductComposition) -> Result<ProductVerdict, InputError> {
        let nutrients = [
            (SlowNutrient::Fat, product.fat_g),
            (SlowNutrient::Protein, product.protein_g),
            (SlowNutrient::Fiber, product.fiber_g),
        ];

        for (nutrient, grams) in nutrients {
            if grams < Decimal::ZERO {
                return Err(InputError::NegativeNutrient {
                    nutrient: nutrient.to_string(),
                    value: grams,
                });
            }
        }

        if product.is_candy {
            return Ok(ProductVerdict::NotRecommended);
        }

        let exceeded: Vec<ExceededNutrient> = nutrients
            .into_iter()
            .filter(|(_, grams)| *grams > MAX_SLOW_NUTRIENT_G_PER_100G)
            .map(|(nutrient, grams)| ExceededNutrient {
                nutrient,
                grams_per_100g: grams,
            })
            .collect();

        if exceeded.is_empty() {
            Ok(ProductVerdict::Suitable)
        } else {
            Ok(ProductVerdict::Unsuitable { exceeded })
        }
    }
}

/// Builds the advice attached to a fueling plan
pub struct Advisor;

impl Advisor {
    pub fn for_rate(rate_g_per_h: u32, context: SessionContext) -> FuelingAdvisory {
        FuelingAdvisory {
            drink: Self::drink_advisory(rate_g_per_h),
            solid_food: Self::solid_food(context),
            product_caveats: Self::product_caveats(),
        }
    }

    pub fn drink_advisory(rate_g_per_h: u32) -> DrinkAdvisory {
        let drink_dose_optional = rate_g_per_h < OPTIONAL_DRINK_DOSE_BELOW_RATE;

        let mut notes = vec![
            format!(
                "Always drink {} mL of water per hour to help intestinal absorption.",
                DRINK_VOLUME_ML_PER_HOUR
            ),
            "With a commercial sports drink, check the carbohydrate amount and \
             glucose/fructose split of each serving."
                .to_string(),
        ];
        if drink_dose_optional {
            notes.push(format!(
                "Below {} g/h you do not need {} g/h of carbohydrate in the drink.",
                OPTIONAL_DRINK_DOSE_BELOW_RATE, DRINK_CARBS_G_PER_HOUR
            ));
        }

        DrinkAdvisory {
            water_ml_per_hour: DRINK_VOLUME_ML_PER_HOUR,
            drink_dose_optional,
            notes,
        }
    }

    pub fn solid_food(context: SessionContext) -> SolidFoodGuidance {
        match context {
            SessionContext::Training => SolidFoodGuidance {
                context,
                options: vec![
                    FoodOption::Gels,
                    FoodOption::RiceCakes,
                    FoodOption::CheckedBars,
                ],
                notes: vec![
                    format!(
                        "Avoid products with more than {} g of fat, protein or fiber per 100 g: \
                         they slow carbohydrate absorption and can upset digestion.",
                        MAX_SLOW_NUTRIENT_G_PER_100G
                    ),
                ],
            },
            SessionContext::Race => SolidFoodGuidance {
                context,
                options: vec![FoodOption::Gels],
                notes: vec![
                    "In races use gels only, for fast and reliable absorption.".to_string(),
                ],
            },
        }
    }

    pub fn product_caveats() -> Vec<String> {
        vec![
            "Always check the full composition of industrial products.".to_string(),
            "Some contain additives, colorings, sweeteners or processed ingredients \
             that are poor for long-term health."
                .to_string(),
            "Candy is not recommended even though it contains sugar.".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(fat: Decimal, protein: Decimal, fiber: Decimal) -> ProductComposition {
        ProductComposition {
            fat_g: fat,
            protein_g: protein,
            fiber_g: fiber,
            is_candy: false,
        }
    }

    #[test]
    fn test_session_context_parsing() {
        assert_eq!("training".parse::<SessionContext>().unwrap(), SessionContext::Training);
        assert_eq!("RACE".parse::<SessionContext>().unwrap(), SessionContext::Race);
        assert!("gym".parse::<SessionContext>().is_err());
    }

    #[test]
    fn test_suitable_product() {
        let verdict = ProductCheck::evaluate(&product(dec!(0.5), dec!(2), dec!(1.2))).unwrap();
        assert!(verdict.is_suitable());
    }

    #[test]
    fn test_product_over_limits() {
        let verdict = ProductCheck::evaluate(&product(dec!(8.5), dec!(2), dec!(3.1))).unwrap();

        match verdict {
            ProductVerdict::Unsuitable { exceeded } => {
                let nutrients: Vec<SlowNutrient> = exceeded.iter().map(|e| e.nutrient).collect();
                assert_eq!(nutrients, vec![SlowNutrient::Fat, SlowNutrient::Fiber]);
                assert_eq!(exceeded[0].grams_per_100g, dec!(8.5));
            }
            other => panic!("expected unsuitable product, got {:?}", other),
        }
    }

    #[test]
    fn test_candy_is_not_recommended() {
        let mut candy = product(dec!(0), dec!(0), dec!(0));
        candy.is_candy = true;

        assert_eq!(ProductCheck::evaluate(&candy).unwrap(), ProductVerdict::NotRecommended);
    }

    #[test]
    fn test_negative_label_value_rejected() {
        let err = ProductCheck::evaluate(&product(dec!(1), dec!(-1), dec!(1))).unwrap_err();
        assert!(matches!(err, InputError::NegativeNutrient { .. }));
    }

    #[test]
    fn test_drink_dose_optional_below_fifty() {
        assert!(Advisor::drink_advisory(49).drink_dose_optional);
        assert!(!Advisor::drink_advisory(50).drink_dose_optional);

        let advisory = Advisor::drink_advisory(20);
        assert_eq!(advisory.water_ml_per_hour, 500);
        assert_eq!(advisory.notes.len(), 3);
        assert_eq!(Advisor::drink_advisory(80).notes.len(), 2);
    }

    #[test]
    fn test_race_is_gels_only() {
        let race = Advisor::solid_food(SessionContext::Race);
        assert_eq!(race.options, vec![FoodOption::Gels]);

        let training = Advisor::solid_food(SessionContext::Training);
        assert!(training.options.contains(&FoodOption::RiceCakes));
        assert!(training.options.contains(&FoodOption::CheckedBars));
    }
}
