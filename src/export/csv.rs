use super::ExportError;
use crate::plan::FuelingPlan;
use csv::Writer;
use std::io::Write;

const HEADER: [&str; 14] = [
    "duration_h",
    "z6_minutes",
    "z4_minutes",
    "z3_minutes",
    "total_g",
    "rate_g_per_h",
    "capped",
    "ratio",
    "glucose_g",
    "fructose_g",
    "drink_type",
    "drink_volume_ml",
    "drink_glucose_g",
    "drink_fructose_g",
];

/// Write plans as CSV, one row per plan
pub fn write_plans<W: Write>(plans: &[FuelingPlan], writer: W) -> Result<(), ExportError> {
    let mut writer = Writer::from_writer(writer);

    writer.write_record(HEADER)?;

    for plan in plans {
        writer.write_record(&[
            plan.input.duration_h.to_string(),
            plan.input.z6_minutes.to_string(),
            plan.input.z4_minutes.to_string(),
            plan.input.z3_minutes.to_string(),
            plan.demand.total_g.to_string(),
            plan.demand.rate_g_per_h.to_string(),
            plan.demand.capped.to_string(),
            plan.ratio.ratio.to_string(),
            plan.ratio.glucose_g.to_string(),
            plan.ratio.fructose_g.to_string(),
            plan.drink.drink_type.label().to_string(),
            plan.drink.volume_ml_per_hour.to_string(),
            plan.drink.glucose_g_per_hour.to_string(),
            plan.drink.fructose_g_per_hour.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
