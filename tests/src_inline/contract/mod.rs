use std::sync::atomic::{AtomicUsize, Ordering};

use clap::{Arg, Command};
use serde_json::Value;

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("phio_contract_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_cli_contract_of_own_command_is_full() {
    let cli = extract_cli_contract(&Cli::command());
    assert!(cli.help_valid);
    assert!(cli.help_len > 0);
    assert_eq!(cli.subcommands, vec!["new-template", "score"]);
    assert_eq!(
        cli.flags,
        vec!["--agg_tau", "--agg_τ", "--help", "--input", "--outdir"]
    );
    assert!(cli.tau_aliases.has_tau_ascii);
    assert!(cli.tau_aliases.has_tau_unicode);
}

#[test]
fn test_cli_contract_of_bare_command() {
    let bare = Command::new("bare").subcommand(
        Command::new("score").arg(Arg::new("input").long("input")),
    );
    let cli = extract_cli_contract(&bare);
    assert_eq!(cli.subcommands, vec!["score"]);
    assert!(cli.flags.contains(&"--input".to_string()));
    assert!(!cli.flags.contains(&"--outdir".to_string()));
    assert!(!cli.tau_aliases.has_tau_ascii);
}

#[test]
fn test_zones_are_declared() {
    let zones = extract_zones(&ZoneThresholds::default_v1());
    assert_eq!(zones.zones.len(), 4);
    assert_eq!(zones.zones["Z1"], 0.0);
    assert_eq!(zones.zones["Z4"], 3.0);
    assert!(!zones.zones.contains_key("Z0"));
    assert_eq!(zones.boundaries, vec![0.0, 1.0, 2.0, 3.0]);
    assert_eq!(zones.method, "declared");
}

#[test]
fn test_formula_check_passes_on_neutral_template() {
    let formula = check_formula_contract();
    assert!(formula.golden_attempted);
    assert!(formula.golden_pass, "{formula:?}");
    assert!(formula.error.is_none());
    let expected = formula.k_eff_expected.unwrap();
    assert!((expected - 2.0 / 9.0).abs() < 1e-12);
    assert!((formula.t_observed.unwrap() - (8.0 - 2.0 / 9.0)).abs() < 1e-12);
}

#[test]
fn test_compliance_levels() {
    let cli = extract_cli_contract(&Cli::command());
    let zones = extract_zones(&ZoneThresholds::default_v1());

    let full = calculate_compliance_levels(&cli, &zones, &check_formula_contract());
    assert_eq!(full.global, ComplianceLevel::Full);
    assert_eq!(full.summary, "CLI:FULL/ZONES:FULL/FORMULA:FULL");

    let skipped = calculate_compliance_levels(&cli, &zones, &FormulaContract::not_attempted());
    assert_eq!(skipped.axes.formula, ComplianceLevel::Minimal);
    assert_eq!(skipped.global, ComplianceLevel::Minimal);

    let failed = FormulaContract::failed("boom".to_string());
    let partial = calculate_compliance_levels(&cli, &zones, &failed);
    assert_eq!(partial.axes.formula, ComplianceLevel::Partial);
    assert_eq!(partial.global, ComplianceLevel::Partial);

    let empty_zones = ZonesContract {
        zones: BTreeMap::new(),
        boundaries: vec![],
        attempted: true,
        method: "declared".to_string(),
    };
    let zl = calculate_compliance_levels(&cli, &empty_zones, &check_formula_contract());
    assert_eq!(zl.axes.zones, ComplianceLevel::Partial);
}

#[test]
fn test_report_serialization_shape() {
    let report = probe(true);
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["contract_version"], "1.5");
    assert_eq!(value["instrument_id"], "phi_otimes_o");
    assert_eq!(value["compliance"]["global"], "FULL");
    assert_eq!(value["summary"]["zones_count"], 4);
    assert_eq!(value["summary"]["formula_checked"], true);
    assert_eq!(value["summary"]["formula_pass"], true);
    assert_eq!(value["formula"]["declared"]["capacity_dimension"], "K");
    assert!(value["validation_timestamp"].as_str().unwrap().contains('T'));
}

#[test]
fn test_report_without_formula_check() {
    let value = serde_json::to_value(probe(false)).unwrap();
    assert_eq!(value["formula"]["golden_attempted"], false);
    assert_eq!(value["summary"]["formula_pass"], false);
    assert!(value["formula"].get("k_eff_expected").is_none());
    assert_eq!(value["compliance"]["summary"], "CLI:FULL/ZONES:FULL/FORMULA:MINIMAL");
}

#[test]
fn test_write_report_creates_parent() {
    let dir = make_temp_dir();
    let path = dir.join("reports").join("contract.json");
    write_report(&probe(false), &path).unwrap();
    let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["cli"]["required_flags"][0], "--input");
}
