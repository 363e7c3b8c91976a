use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;

use super::text::render_summary_line;
use super::*;
use crate::model::scores::DimensionScores;
use crate::model::zones::Zone;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("phio_report_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn sample_result() -> ScoreResult {
    let mut dimension_scores = DimensionScores::new();
    dimension_scores.insert("Cx".to_string(), 2.0);
    dimension_scores.insert("K".to_string(), 1.5);
    dimension_scores.insert("τ".to_string(), 3.0);
    ScoreResult {
        t: 4.75,
        k_eff: 0.25,
        zone: Zone::Z4,
        dimension_scores,
    }
}

#[test]
fn test_results_json_has_exact_contract_keys() {
    let json = render_results_json(&sample_result()).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    let obj = value.as_object().unwrap();
    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["K_eff", "T", "dimension_scores", "zone"]);
    assert_eq!(value["T"], 4.75);
    assert_eq!(value["K_eff"], 0.25);
    assert_eq!(value["zone"], "Z4");
    assert_eq!(value["dimension_scores"]["τ"], 3.0);
    assert!(json.contains("\"τ\""));
}

#[test]
fn test_write_reports_creates_outdir() {
    let dir = make_temp_dir().join("out");
    let paths = write_reports(&sample_result(), &ZoneThresholds::default_v1(), &dir).unwrap();
    assert_eq!(paths.results, dir.join(RESULTS_FILE));
    assert!(paths.results.exists());

    let text = fs::read_to_string(&paths.report).unwrap();
    assert!(text.contains("Zone: Z4 (T >= 3)"));
    assert!(text.contains("  K: 1.500000"));
}

#[test]
fn test_summary_line() {
    let line = render_summary_line(&sample_result());
    assert_eq!(line, "T=4.750000 K_eff=0.250000 zone=Z4 dimensions=3");
}

#[test]
fn test_report_text_band_labels() {
    let th = ZoneThresholds::default_v1();
    let mut result = sample_result();
    result.zone = Zone::Z0;
    assert!(text::render_report_text(&result, &th).contains("(T < 0)"));
    result.zone = Zone::Z2;
    assert!(text::render_report_text(&result, &th).contains("(1 <= T < 2)"));
    result.dimension_scores.clear();
    assert!(text::render_report_text(&result, &th).contains("(none)"));
}
