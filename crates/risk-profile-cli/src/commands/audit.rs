use serde::Serialize;
use serde_json::Value;

use risk_profile_core::audit::{audit, CoverageReport};
use risk_profile_core::questionnaire::Questionnaire;
use risk_profile_core::reference::ReferenceData;
use tracing::info;

#[derive(Debug, Serialize)]
struct CheckDataOutput {
    complete: bool,
    data_dir: String,
    #[serde(flatten)]
    report: CoverageReport,
}

/// Coverage audit of the reference tables. Gaps are findings, not errors.
pub fn run_check_data(
    reference: &ReferenceData,
    data_dir: &std::path::Path,
) -> Result<Value, Box<dyn std::error::Error>> {
    let report = audit(&Questionnaire::standard(), reference);
    info!(
        missing_cells = report.missing_cells.len(),
        unknown_types = report.unknown_portfolio_types.len(),
        "coverage audit finished"
    );

    let output = CheckDataOutput {
        complete: report.is_complete(),
        data_dir: data_dir.display().to_string(),
        report,
    };
    Ok(serde_json::to_value(output)?)
}
