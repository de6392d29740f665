//! Report rendering for fueling plans and duration sweeps

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::plan::FuelingPlan;

pub use crate::error::ExportError;

pub mod csv;
pub mod json;
pub mod text;

/// Report format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
    Table,
}

impl std::str::FromStr for ReportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            "table" => Ok(ReportFormat::Table),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Write a single plan in the requested format
pub fn write_plan<W: Write + ?Sized>(
    plan: &FuelingPlan,
    format: ReportFormat,
    writer: &mut W,
) -> Result<(), ExportError> {
    match format {
        ReportFormat::Text => text::write_plan_report(plan, writer),
        ReportFormat::Json => json::write_json(plan, writer),
        ReportFormat::Csv => csv::write_plans(std::slice::from_ref(plan), writer),
        ReportFormat::Table => text::write_plan_table(std::slice::from_ref(plan), writer),
    }
}

/// Write a duration sweep in the requested format
pub fn write_sweep<W: Write + ?Sized>(
    plans: &[FuelingPlan],
    format: ReportFormat,
    writer: &mut W,
) -> Result<(), ExportError> {
    match format {
        ReportFormat::Text | ReportFormat::Table => text::write_plan_table(plans, writer),
        ReportFormat::Json => json::write_json(&plans, writer),
        ReportFormat::Csv => csv::write_plans(plans, writer),
    }
}

/// Create the output file, with its parent directories
pub fn create_output<P: AsRef<Path>>(output_path: P) -> Result<BufWriter<File>, ExportError> {
    if let Some(parent) = output_path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(BufWriter::new(File::create(output_path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::SessionContext;
    use crate::models::WorkoutInput;
    use crate::plan::FuelingPlanner;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn three_hour_plan() -> FuelingPlan {
        let input = WorkoutInput::new(dec!(3.0), 0, 0, 0).unwrap();
        FuelingPlanner::plan(&input, SessionContext::Training).unwrap()
    }

    #[test]
    fn test_report_format_parsing() {
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("txt".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert!(matches!(
            "pdf".parse::<ReportFormat>(),
            Err(ExportError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_every_format_writes_output() {
        let plan = three_hour_plan();

        for format in [
            ReportFormat::Text,
            ReportFormat::Json,
            ReportFormat::Csv,
            ReportFormat::Table,
        ] {
            let mut buffer = Vec::new();
            write_plan(&plan, format, &mut buffer).unwrap();
            let output = String::from_utf8(buffer).unwrap();
            assert!(output.contains("160"), "{:?} output missing total: {}", format, output);
        }
    }

    #[test]
    fn test_create_output_makes_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reports").join("plan.json");

        let mut writer = create_output(&path).unwrap();
        write_plan(&three_hour_plan(), ReportFormat::Json, &mut writer).unwrap();
        writer.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"total_g\": 160"));
    }
}
