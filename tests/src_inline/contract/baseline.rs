use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("phio_baseline_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn report(timestamp: &str, zones: u64) -> Value {
    json!({
        "contract_version": "1.5",
        "validation_timestamp": timestamp,
        "instrument_hash": format!("sha256:{timestamp}"),
        "summary": {"zones_count": zones, "cli_help_valid": true},
        "cli": {"flags": ["--input", "--outdir"]}
    })
}

#[test]
fn test_strip_volatile_only_touches_top_level() {
    let value = json!({
        "validation_timestamp": "now",
        "instrument_path": "/bin/phio",
        "nested": {"validation_timestamp": "kept"}
    });
    let stripped = strip_volatile(&value);
    assert_eq!(stripped, json!({"nested": {"validation_timestamp": "kept"}}));
}

#[test]
fn test_canonicalize_sorts_nested_keys() {
    let value = json!({"b": {"z": 1, "a": [{"y": 2, "x": 3}]}, "a": null});
    let canonical = canonicalize(&value);
    let text = serde_json::to_string(&canonical).unwrap();
    assert_eq!(text, r#"{"a":null,"b":{"a":[{"x":3,"y":2}],"z":1}}"#);
}

#[test]
fn test_diff_ignores_volatile_keys() {
    assert!(diff_keys(&report("t1", 4), &report("t2", 4)).is_empty());
    assert_eq!(diff_keys(&report("t1", 4), &report("t1", 3)), vec!["summary"]);
}

#[test]
fn test_diff_reports_added_and_removed_keys() {
    let mut current = report("t", 4);
    current["extra"] = json!(1);
    let mut baseline = report("t", 4);
    baseline.as_object_mut().unwrap().remove("cli");
    assert_eq!(diff_keys(&baseline, &current), vec!["cli", "extra"]);
    assert_eq!(diff_keys(&json!([1]), &current), vec!["$root"]);
    assert!(diff_keys(&json!([1]), &json!([1])).is_empty());
}

#[test]
fn test_check_writes_then_matches_then_drifts() {
    let dir = make_temp_dir();
    let path = dir.join(".contract").join("contract_baseline.json");

    let outcome = check(&path, false, &report("t1", 4)).unwrap();
    assert_eq!(outcome, BaselineOutcome::Written { path: path.clone() });
    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.ends_with("}\n"));

    assert_eq!(check(&path, false, &report("t2", 4)).unwrap(), BaselineOutcome::Matched);

    assert_eq!(
        check(&path, false, &report("t3", 5)).unwrap(),
        BaselineOutcome::Drifted {
            keys: vec!["summary".to_string()]
        }
    );

    assert!(matches!(
        check(&path, true, &report("t4", 5)).unwrap(),
        BaselineOutcome::Written { .. }
    ));
    assert_eq!(check(&path, false, &report("t5", 5)).unwrap(), BaselineOutcome::Matched);
}

#[test]
fn test_check_rejects_corrupt_baseline() {
    let dir = make_temp_dir();
    let path = dir.join("baseline.json");
    fs::write(&path, "not json").unwrap();
    assert!(matches!(
        check(&path, false, &report("t", 4)),
        Err(AppError::InvalidJson(_))
    ));
}
