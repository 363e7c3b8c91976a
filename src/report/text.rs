use crate::model::scores::ScoreResult;
use crate::model::zones::ZoneThresholds;
use crate::report::format_f64_6;

pub fn render_summary_line(result: &ScoreResult) -> String {
    format!(
        "T={} K_eff={} zone={} dimensions={}",
        format_f64_6(result.t),
        format_f64_6(result.k_eff),
        result.zone,
        result.dimension_scores.len()
    )
}

pub fn render_report_text(result: &ScoreResult, thresholds: &ZoneThresholds) -> String {
    let mut out = String::new();

    out.push_str("PhiO Scoring Report\n");
    out.push_str("===================\n\n");

    out.push_str(&format!("T: {}\n", format_f64_6(result.t)));
    out.push_str(&format!("K_eff: {}\n", format_f64_6(result.k_eff)));
    out.push_str(&format!(
        "Zone: {} ({})\n\n",
        result.zone,
        band_label(result, thresholds)
    ));

    out.push_str("Dimension scores\n");
    if result.dimension_scores.is_empty() {
        out.push_str("  (none)\n");
    }
    for (dimension, value) in &result.dimension_scores {
        out.push_str(&format!("  {}: {}\n", dimension, format_f64_6(*value)));
    }

    out
}

fn band_label(result: &ScoreResult, thresholds: &ZoneThresholds) -> String {
    match (
        thresholds.lower_bound(result.zone),
        thresholds.upper_bound(result.zone),
    ) {
        (None, Some(hi)) => format!("T < {hi}"),
        (Some(lo), Some(hi)) => format!("{lo} <= T < {hi}"),
        (Some(lo), None) => format!("T >= {lo}"),
        (None, None) => "unbounded".to_string(),
    }
}
