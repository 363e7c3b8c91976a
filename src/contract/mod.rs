//! Contract report for the instrument: which subcommands and flags the CLI
//! exposes, which zone thresholds the engine declares, and whether the
//! formula reproduces its closed form on the neutral template.
//!
//! Everything is read from the live command definition and the engine's
//! declared constants; nothing is parsed out of source text.

pub mod baseline;

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use clap::CommandFactory;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::cli::Cli;
use crate::error::AppError;
use crate::model::aggregation::AggregationSpec;
use crate::model::formula::{
    self, DIM_CAPACITY, DIM_COMPLEXITY, DIM_DIFFICULTY, DIM_GENERALITY, DIM_TAU_ASCII,
    DIM_TAU_SYMBOL, FormulaDeclaration,
};
use crate::model::zones::{Zone, ZoneThresholds};
use crate::pipeline::score_payload;
use crate::report::json::render_pretty;
use crate::template::neutral_template;

pub const CONTRACT_VERSION: &str = "1.5";
pub const INSTRUMENT_ID: &str = "phi_otimes_o";
pub const PROBE_TEMPLATE_NAME: &str = "ContractProbe";

pub const REQUIRED_SUBCOMMANDS: [&str; 2] = ["new-template", "score"];
pub const REQUIRED_FLAGS: [&str; 2] = ["--input", "--outdir"];
const TRACKED_FLAGS: [&str; 5] = ["--input", "--outdir", "--help", "--agg_tau", "--agg_τ"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComplianceLevel {
    Minimal,
    Partial,
    Full,
}

impl ComplianceLevel {
    pub fn assess(full: bool, partial: bool) -> Self {
        if full {
            Self::Full
        } else if partial {
            Self::Partial
        } else {
            Self::Minimal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "MINIMAL",
            Self::Partial => "PARTIAL",
            Self::Full => "FULL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TauAliases {
    pub has_tau_ascii: bool,
    pub has_tau_unicode: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CliContract {
    pub help_valid: bool,
    pub help_len: usize,
    pub subcommands: Vec<String>,
    pub flags: Vec<String>,
    pub required_subcommands: Vec<String>,
    pub required_flags: Vec<String>,
    pub tau_aliases: TauAliases,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZonesContract {
    /// Inclusive lower bound per zone; `Z0` has none.
    pub zones: BTreeMap<String, f64>,
    pub boundaries: Vec<f64>,
    pub attempted: bool,
    pub method: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormulaContract {
    pub golden_attempted: bool,
    pub golden_pass: bool,
    pub declared: FormulaDeclaration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k_eff_expected: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t_expected: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k_eff_observed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t_observed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FormulaContract {
    fn not_attempted() -> Self {
        Self {
            golden_attempted: false,
            golden_pass: false,
            declared: formula::declaration(),
            k_eff_expected: None,
            t_expected: None,
            k_eff_observed: None,
            t_observed: None,
            error: None,
        }
    }

    fn failed(error: String) -> Self {
        Self {
            golden_attempted: true,
            error: Some(error),
            ..Self::not_attempted()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceAxes {
    pub cli: ComplianceLevel,
    pub zones: ComplianceLevel,
    pub formula: ComplianceLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Compliance {
    pub axes: ComplianceAxes,
    pub global: ComplianceLevel,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub cli_help_valid: bool,
    pub zones_attempted: bool,
    pub zones_count: usize,
    pub formula_checked: bool,
    pub formula_pass: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractReport {
    pub contract_version: String,
    pub instrument_id: String,
    pub instrument_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument_hash: Option<String>,
    pub validation_timestamp: String,
    pub compliance: Compliance,
    pub summary: ReportSummary,
    pub cli: CliContract,
    pub zones: ZonesContract,
    pub formula: FormulaContract,
}

/// Probes this binary's own command tree and engine constants.
pub fn probe(check_formula: bool) -> ContractReport {
    let command = Cli::command();
    generate_contract_report(&command, &ZoneThresholds::default_v1(), check_formula)
}

pub fn generate_contract_report(
    command: &clap::Command,
    thresholds: &ZoneThresholds,
    check_formula: bool,
) -> ContractReport {
    let cli = extract_cli_contract(command);
    let zones = extract_zones(thresholds);
    let formula = if check_formula {
        check_formula_contract()
    } else {
        FormulaContract::not_attempted()
    };
    let compliance = calculate_compliance_levels(&cli, &zones, &formula);

    let summary = ReportSummary {
        cli_help_valid: cli.help_valid,
        zones_attempted: zones.attempted,
        zones_count: zones.zones.len(),
        formula_checked: check_formula,
        formula_pass: check_formula && formula.golden_pass,
    };

    let (instrument_path, instrument_hash) = instrument_identity();

    tracing::info!(compliance = %compliance.summary, "contract report generated");

    ContractReport {
        contract_version: CONTRACT_VERSION.to_string(),
        instrument_id: INSTRUMENT_ID.to_string(),
        instrument_version: env!("CARGO_PKG_VERSION").to_string(),
        instrument_path,
        instrument_hash,
        validation_timestamp: chrono::Utc::now().to_rfc3339(),
        compliance,
        summary,
        cli,
        zones,
        formula,
    }
}

pub fn extract_cli_contract(command: &clap::Command) -> CliContract {
    let mut command = command.clone();
    command.build();
    let help_text = command.render_long_help().to_string();

    let present_subcommands: BTreeSet<&str> =
        command.get_subcommands().map(|sc| sc.get_name()).collect();
    let subcommands = REQUIRED_SUBCOMMANDS
        .iter()
        .filter(|name| present_subcommands.contains(*name))
        .map(|name| name.to_string())
        .collect();

    let mut longs = BTreeSet::new();
    collect_long_flags(&command, &mut longs);
    let flags: Vec<String> = TRACKED_FLAGS
        .iter()
        .filter(|flag| longs.contains(**flag))
        .map(|flag| flag.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    CliContract {
        help_valid: !help_text.trim().is_empty(),
        help_len: help_text.chars().count(),
        subcommands,
        tau_aliases: TauAliases {
            has_tau_ascii: longs.contains("--agg_tau"),
            has_tau_unicode: longs.contains("--agg_τ"),
        },
        flags,
        required_subcommands: REQUIRED_SUBCOMMANDS.iter().map(|s| s.to_string()).collect(),
        required_flags: REQUIRED_FLAGS.iter().map(|s| s.to_string()).collect(),
    }
}

fn collect_long_flags(command: &clap::Command, out: &mut BTreeSet<String>) {
    for arg in command.get_arguments() {
        if let Some(long) = arg.get_long() {
            out.insert(format!("--{long}"));
        }
    }
    for sub in command.get_subcommands() {
        collect_long_flags(sub, out);
    }
}

pub fn extract_zones(thresholds: &ZoneThresholds) -> ZonesContract {
    let zones = Zone::ALL
        .iter()
        .filter_map(|zone| {
            thresholds
                .lower_bound(*zone)
                .map(|bound| (zone.label().to_string(), bound))
        })
        .collect();

    ZonesContract {
        zones,
        boundaries: thresholds.boundaries.to_vec(),
        attempted: true,
        method: "declared".to_string(),
    }
}

/// Scores the neutral template in-process and checks `K_eff` and `T`
/// against the closed form.
pub fn check_formula_contract() -> FormulaContract {
    let template = neutral_template(PROBE_TEMPLATE_NAME);
    let payload = match template.to_value() {
        Ok(payload) => payload,
        Err(err) => return FormulaContract::failed(format!("template encoding failed: {err}")),
    };

    let result = match score_payload(&payload, &AggregationSpec::default()) {
        Ok((_, result)) => result,
        Err(err) => return FormulaContract::failed(format!("score failed: {err}")),
    };

    let scores = &result.dimension_scores;
    let Some(tau) = scores
        .get(DIM_TAU_SYMBOL)
        .or_else(|| scores.get(DIM_TAU_ASCII))
        .copied()
    else {
        return FormulaContract::failed("cannot identify tau dimension key (τ or tau)".to_string());
    };

    let value = |dimension: &str| scores.get(dimension).copied().unwrap_or(0.0);
    let cx = value(DIM_COMPLEXITY);
    let k = value(DIM_CAPACITY);
    let g = value(DIM_GENERALITY);
    let d = value(DIM_DIFFICULTY);

    let k_eff_expected = k / (1.0 + tau + g + d + cx);
    let t_expected = cx + tau + g + d - k_eff_expected;

    let golden_pass = formula::is_golden_close(result.k_eff, k_eff_expected)
        && formula::is_golden_close(result.t, t_expected);
    if !golden_pass {
        tracing::warn!(
            k_eff_expected,
            k_eff_observed = result.k_eff,
            t_expected,
            t_observed = result.t,
            "formula check failed"
        );
    }

    FormulaContract {
        golden_attempted: true,
        golden_pass,
        declared: formula::declaration(),
        k_eff_expected: Some(k_eff_expected),
        t_expected: Some(t_expected),
        k_eff_observed: Some(result.k_eff),
        t_observed: Some(result.t),
        error: None,
    }
}

pub fn calculate_compliance_levels(
    cli: &CliContract,
    zones: &ZonesContract,
    formula: &FormulaContract,
) -> Compliance {
    let cli_full = cli.help_valid
        && cli.subcommands.len() >= REQUIRED_SUBCOMMANDS.len()
        && REQUIRED_FLAGS
            .iter()
            .all(|flag| cli.flags.iter().any(|f| f == flag));
    let cli_level = ComplianceLevel::assess(cli_full, cli.help_valid);

    let zones_level = ComplianceLevel::assess(!zones.zones.is_empty(), zones.attempted);

    let formula_level = ComplianceLevel::assess(formula.golden_pass, formula.golden_attempted);

    let global = cli_level.min(zones_level).min(formula_level);

    Compliance {
        summary: format!(
            "CLI:{}/ZONES:{}/FORMULA:{}",
            cli_level.as_str(),
            zones_level.as_str(),
            formula_level.as_str()
        ),
        axes: ComplianceAxes {
            cli: cli_level,
            zones: zones_level,
            formula: formula_level,
        },
        global,
    }
}

pub fn write_report(report: &ContractReport, path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
        }
    }
    let json = render_pretty(report).map_err(|source| AppError::Encode {
        what: "contract report",
        source,
    })?;
    fs::write(path, json).map_err(|e| AppError::io(path, e))
}

fn instrument_identity() -> (Option<String>, Option<String>) {
    let Ok(exe) = std::env::current_exe() else {
        return (None, None);
    };
    let hash = fs::read(&exe).ok().map(|bytes| {
        let digest = Sha256::digest(&bytes);
        let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        format!("sha256:{hex}")
    });
    (Some(exe.display().to_string()), hash)
}

#[cfg(test)]
#[path = "../../tests/src_inline/contract/mod.rs"]
mod tests;
