use super::ExportError;
use crate::plan::FuelingPlan;
use colored::*;
use std::io::Write;
use tabled::{settings::Style, Table, Tabled};

/// One line of the duration table
#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "Duration (h)")]
    duration: String,
    #[tabled(rename = "Total (g)")]
    total: u32,
    #[tabled(rename = "Rate (g/h)")]
    rate: String,
    #[tabled(rename = "Ratio")]
    ratio: String,
    #[tabled(rename = "Glucose (g)")]
    glucose: u32,
    #[tabled(rename = "Fructose (g)")]
    fructose: u32,
    #[tabled(rename = "Drink G/F (g/h)")]
    drink: String,
    #[tabled(rename = "Solids (g/h)")]
    solids: u32,
}

impl From<&FuelingPlan> for PlanRow {
    fn from(plan: &FuelingPlan) -> Self {
        PlanRow {
            duration: plan.input.duration_h.to_string(),
            total: plan.demand.total_g,
            rate: if plan.demand.capped {
                format!("{} (capped)", plan.demand.rate_g_per_h)
            } else {
                plan.demand.rate_g_per_h.to_string()
            },
            ratio: plan.ratio.ratio.to_string(),
            glucose: plan.ratio.glucose_g,
            fructose: plan.ratio.fructose_g,
            drink: format!(
                "{}/{}",
                plan.drink.glucose_g_per_hour, plan.drink.fructose_g_per_hour
            ),
            solids: plan.solid_food_grams_per_hour(),
        }
    }
}

/// Write plans as a table, one row per plan
pub fn write_plan_table<W: Write + ?Sized>(
    plans: &[FuelingPlan],
    writer: &mut W,
) -> Result<(), ExportError> {
    let rows: Vec<PlanRow> = plans.iter().map(PlanRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());

    writeln!(writer, "{}", table)?;
    Ok(())
}

/// Write a human-readable fueling report
pub fn write_plan_report<W: Write + ?Sized>(
    plan: &FuelingPlan,
    writer: &mut W,
) -> Result<(), ExportError> {
    let input = &plan.input;

    writeln!(writer, "{}", "FUELING PLAN".bold())?;
    writeln!(
        writer,
        "Workout: {} h (zone 6/5: {} min, zone 4: {} min, zone 3: {} min)",
        input.duration_h, input.z6_minutes, input.z4_minutes, input.z3_minutes
    )?;
    writeln!(writer)?;

    writeln!(
        writer,
        "{} {} g of carbohydrate",
        "Recommended total:".green().bold(),
        plan.demand.total_g
    )?;
    writeln!(writer, "That is about {} g/h", plan.demand.rate_g_per_h)?;
    if plan.demand.capped {
        writeln!(
            writer,
            "{}",
            "Hourly intake capped at 120 g/h; intensity surcharge not added.".yellow()
        )?;
    }
    writeln!(writer)?;

    writeln!(writer, "{}", "GLUCOSE / FRUCTOSE".cyan().bold())?;
    writeln!(writer, "Recommended ratio: {}", plan.ratio.ratio)?;
    writeln!(
        writer,
        "Glucose (or dextrose, maltodextrin): {} g",
        plan.ratio.glucose_g
    )?;
    writeln!(writer, "Fructose: {} g", plan.ratio.fructose_g)?;
    writeln!(writer)?;

    writeln!(writer, "{}", "DRINK PER HOUR".cyan().bold())?;
    writeln!(writer, "Type: {}", plan.drink.drink_type)?;
    writeln!(writer, "Volume: {} mL/h", plan.drink.volume_ml_per_hour)?;
    writeln!(writer, "Glucose in drink: {} g", plan.drink.glucose_g_per_hour)?;
    writeln!(writer, "Fructose in drink: {} g", plan.drink.fructose_g_per_hour)?;
    for note in &plan.advisory.drink.notes {
        writeln!(writer, "  • {}", note)?;
    }
    writeln!(writer)?;

    writeln!(
        writer,
        "{} ({})",
        "SOLID FOOD".cyan().bold(),
        plan.advisory.solid_food.context
    )?;
    if plan.drink_covers_target() {
        writeln!(writer, "The drink covers the hourly target. Optional extras:")?;
    } else {
        writeln!(
            writer,
            "Cover the remaining {} g/h with:",
            plan.solid_food_grams_per_hour()
        )?;
    }
    for option in &plan.advisory.solid_food.options {
        writeln!(writer, "  • {}", option.description())?;
    }
    for note in &plan.advisory.solid_food.notes {
        writeln!(writer, "  • {}", note)?;
    }
    writeln!(writer)?;

    writeln!(writer, "{}", "INDUSTRIAL PRODUCTS".yellow().bold())?;
    for caveat in &plan.advisory.product_caveats {
        writeln!(writer, "  • {}", caveat)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::SessionContext;
    use crate::models::WorkoutInput;
    use crate::plan::FuelingPlanner;
    use rust_decimal_macros::dec;

    fn plan(duration: rust_decimal::Decimal, z6: u32, context: SessionContext) -> FuelingPlan {
        let input = WorkoutInput::new(duration, z6, 0, 0).unwrap();
        FuelingPlanner::plan(&input, context).unwrap()
    }

    #[test]
    fn test_report_sections() {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        write_plan_report(&plan(dec!(3.0), 0, SessionContext::Training), &mut buffer).unwrap();
        let report = String::from_utf8(buffer).unwrap();

        assert!(report.contains("Recommended total: 160 g of carbohydrate"));
        assert!(report.contains("That is about 53 g/h"));
        assert!(report.contains("Recommended ratio: 1:0.5"));
        assert!(report.contains("Glucose in drink: 27 g"));
        assert!(report.contains("Cover the remaining 13 g/h with:"));
        assert!(report.contains("rice cakes"));
        assert!(!report.contains("capped"));
    }

    #[test]
    fn test_report_mentions_cap() {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        write_plan_report(&plan(dec!(6.0), 60, SessionContext::Race), &mut buffer).unwrap();
        let report = String::from_utf8(buffer).unwrap();

        assert!(report.contains("capped at 120 g/h"));
        assert!(report.contains("SOLID FOOD (race)"));
        assert!(!report.contains("rice cakes"));
    }

    #[test]
    fn test_report_when_drink_covers_target() {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        write_plan_report(&plan(dec!(1.0), 0, SessionContext::Training), &mut buffer).unwrap();
        let report = String::from_utf8(buffer).unwrap();

        assert!(report.contains("The drink covers the hourly target"));
        assert!(!report.contains("Cover the remaining"));
    }

    #[test]
    fn test_table_has_row_per_plan() {
        let plans = vec![
            plan(dec!(1.0), 0, SessionContext::Training),
            plan(dec!(6.0), 60, SessionContext::Training),
        ];

        let mut buffer = Vec::new();
        write_plan_table(&plans, &mut buffer).unwrap();
        let table = String::from_utf8(buffer).unwrap();

        assert!(table.contains("Duration (h)"));
        assert!(table.contains("120 (capped)"));
        assert!(table.contains("40/0"));
        assert!(table.contains("20/20"));
    }
}
