pub mod json;
pub mod text;

use std::fs;
use std::path::{Path, PathBuf};

use crate::model::scores::ScoreResult;
use crate::model::zones::ZoneThresholds;
use crate::report::json::render_results_json;
use crate::report::text::render_report_text;

pub const RESULTS_FILE: &str = "results.json";
pub const REPORT_FILE: &str = "report.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub results: PathBuf,
    pub report: PathBuf,
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

/// Writes `results.json` and `report.txt` into `out_dir`, creating it if needed.
pub fn write_reports(
    result: &ScoreResult,
    thresholds: &ZoneThresholds,
    out_dir: &Path,
) -> std::io::Result<ReportPaths> {
    fs::create_dir_all(out_dir)?;

    let results = out_dir.join(RESULTS_FILE);
    let json = render_results_json(result)?;
    fs::write(&results, json)?;

    let report = out_dir.join(REPORT_FILE);
    fs::write(&report, render_report_text(result, thresholds))?;

    Ok(ReportPaths { results, report })
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
