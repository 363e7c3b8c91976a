use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand};
use serde_json::Value;

use crate::config::{BaselineConfig, InstrumentConfig};
use crate::contract;
use crate::contract::baseline::{self, BaselineOutcome};
use crate::error::AppError;
use crate::model::aggregation::AggregationSpec;
use crate::model::formula::{DIM_TAU_ASCII, DIM_TAU_SYMBOL};
use crate::model::zones::ZoneThresholds;
use crate::pipeline::score_with;
use crate::pipeline::stage1_validate::validate;
use crate::report::text::render_summary_line;
use crate::report::write_reports;
use crate::telemetry;
use crate::template::write_template;

pub const AGG_FLAG_PREFIX: &str = "--agg_";

#[derive(Parser, Debug)]
#[command(
    name = "PhiO",
    bin_name = "phio",
    about = "PhiO v0.1 instrument (contract harness).",
    after_help = "Contract flags: --input --outdir --agg_tau --agg_τ (aggregation: median|bottleneck).",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a template JSON input.
    NewTemplate(NewTemplateArgs),
    /// Score a JSON input and write results.json
    Score(ScoreArgs),
    /// Write a contract report covering CLI flags, zone thresholds and formula
    Probe(ProbeArgs),
    /// Compare a fresh contract report against the stored baseline
    Baseline(BaselineArgs),
}

#[derive(Args, Debug)]
pub struct NewTemplateArgs {
    /// System name
    #[arg(long)]
    pub name: String,
    /// Output JSON file path
    #[arg(long)]
    pub out: PathBuf,
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Input JSON file
    #[arg(long)]
    pub input: PathBuf,
    /// Output directory (results.json)
    #[arg(long)]
    pub outdir: PathBuf,
    /// Aggregation for tau (alias). Use with value: median|bottleneck
    #[arg(long = "agg_tau", value_name = "METHOD")]
    pub agg_tau: Option<String>,
    /// Aggregation for τ (alias). Use with value: median|bottleneck
    #[arg(long = "agg_τ", value_name = "METHOD")]
    pub agg_tau_symbol: Option<String>,
    /// Aggregation for any dimension, e.g. --agg Cx=bottleneck (repeatable)
    #[arg(long = "agg", value_name = "DIM=METHOD", value_parser = parse_agg_assignment)]
    pub agg: Vec<(String, String)>,
    /// Raw `--agg_<DIM> <METHOD>` tokens, lifted out of argv before clap runs.
    #[arg(skip)]
    pub agg_pairs: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Output JSON report path
    #[arg(long)]
    pub out: PathBuf,
    /// Also run a deterministic score of the neutral template to verify the formula
    #[arg(long)]
    pub check_formula: bool,
}

#[derive(Args, Debug)]
pub struct BaselineArgs {
    /// Baseline file (defaults to PHIO_BASELINE_PATH or .contract/contract_baseline.json)
    #[arg(long)]
    pub path: Option<PathBuf>,
    /// Overwrite the baseline instead of comparing (also PHIO_UPDATE_BASELINE=true)
    #[arg(long)]
    pub update: bool,
    /// Include the formula check in the compared report
    #[arg(long)]
    pub check_formula: bool,
}

impl Cli {
    /// Parses `std::env::args_os`, exiting with clap's usage message on error.
    pub fn parse_args() -> Self {
        Self::try_parse_args(std::env::args_os()).unwrap_or_else(|err| err.exit())
    }

    /// Like `try_parse_from`, but also accepts `--agg_<DIM> <METHOD>` pairs
    /// anywhere on the command line. They are only valid for `score`.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let (known, dynamic) = split_agg_args(args.into_iter().map(Into::into));
        let mut cli = Self::try_parse_from(known)?;
        match &mut cli.command {
            Command::Score(args) => args.agg_pairs = dynamic,
            _ => {
                if let Some(token) = dynamic.first() {
                    return Err(Cli::command().error(
                        ErrorKind::UnknownArgument,
                        format!("unexpected argument '{token}' found"),
                    ));
                }
            }
        }
        Ok(cli)
    }
}

/// Separates dynamic `--agg_<DIM>` flags (and their values) from the tokens
/// clap understands. The `--agg_tau` and `--agg_τ` flags stay with clap, and
/// nothing after a bare `--` is touched. A flag followed by another `--` flag
/// or by nothing is kept without a value.
pub fn split_agg_args<I>(args: I) -> (Vec<OsString>, Vec<String>)
where
    I: IntoIterator<Item = OsString>,
{
    let mut known = Vec::new();
    let mut dynamic = Vec::new();
    let mut tokens = args.into_iter().peekable();
    while let Some(token) = tokens.next() {
        if token == "--" {
            known.push(token);
            known.extend(tokens.by_ref());
            break;
        }
        if !token.to_str().is_some_and(is_dynamic_agg_flag) {
            known.push(token);
            continue;
        }
        let flag = token.to_string_lossy();
        match flag.split_once('=') {
            Some((name, value)) => {
                dynamic.push(name.to_string());
                dynamic.push(value.to_string());
            }
            None => {
                dynamic.push(flag.to_string());
                let takes_value = tokens
                    .peek()
                    .and_then(|next| next.to_str())
                    .is_some_and(|next| !next.starts_with("--"));
                if takes_value {
                    if let Some(value) = tokens.next() {
                        dynamic.push(value.to_string_lossy().into_owned());
                    }
                }
            }
        }
    }
    (known, dynamic)
}

fn is_dynamic_agg_flag(token: &str) -> bool {
    let Some(rest) = token.strip_prefix(AGG_FLAG_PREFIX) else {
        return false;
    };
    let dimension = rest.split_once('=').map_or(rest, |(name, _)| name);
    dimension != DIM_TAU_ASCII && dimension != DIM_TAU_SYMBOL
}

pub fn run(cli: Cli) -> Result<i32, AppError> {
    let config = InstrumentConfig::load()?;
    telemetry::init(&config.telemetry)?;
    execute(cli.command, &config)
}

pub fn execute(command: Command, config: &InstrumentConfig) -> Result<i32, AppError> {
    match command {
        Command::NewTemplate(args) => run_new_template(&args),
        Command::Score(args) => run_score(&args),
        Command::Probe(args) => run_probe(&args),
        Command::Baseline(args) => run_baseline(&args, &config.baseline),
    }
}

fn run_new_template(args: &NewTemplateArgs) -> Result<i32, AppError> {
    write_template(&args.out, &args.name).map_err(|e| AppError::io(&args.out, e))?;
    tracing::info!(path = %args.out.display(), "template written");
    Ok(0)
}

fn run_score(args: &ScoreArgs) -> Result<i32, AppError> {
    let raw = fs::read_to_string(&args.input).map_err(|e| AppError::io(&args.input, e))?;
    let payload: Value = serde_json::from_str(&raw).map_err(AppError::InvalidJson)?;
    let input = validate(&payload)?;

    let spec = AggregationSpec::from_pairs(aggregation_pairs(args)?)?;
    let thresholds = ZoneThresholds::default_v1();
    let result = score_with(&input.items, &spec, &thresholds)?;

    let paths = write_reports(&result, &thresholds, &args.outdir)
        .map_err(|e| AppError::io(&args.outdir, e))?;
    println!(
        "{} -> {}",
        render_summary_line(&result),
        paths.results.display()
    );
    Ok(0)
}

fn run_probe(args: &ProbeArgs) -> Result<i32, AppError> {
    let report = contract::probe(args.check_formula);
    contract::write_report(&report, &args.out)?;
    println!("Wrote contract report to: {}", args.out.display());
    Ok(0)
}

fn run_baseline(args: &BaselineArgs, config: &BaselineConfig) -> Result<i32, AppError> {
    let path = args.path.clone().unwrap_or_else(|| config.path.clone());
    let update = args.update || config.update;

    let report = contract::probe(args.check_formula);
    let current = serde_json::to_value(&report).map_err(|source| AppError::Encode {
        what: "contract report",
        source,
    })?;

    match baseline::check(&path, update, &current)? {
        BaselineOutcome::Written { path } => {
            println!("Wrote contract baseline to: {}", path.display());
            Ok(0)
        }
        BaselineOutcome::Matched => {
            println!("Contract baseline matches: {}", path.display());
            Ok(0)
        }
        BaselineOutcome::Drifted { keys } => {
            eprintln!(
                "Contract baseline drift detected in: {}\n\
                 If the change is intentional, rerun with --update or PHIO_UPDATE_BASELINE=true.",
                keys.join(", ")
            );
            Ok(1)
        }
    }
}

/// Collects aggregation pairs in precedence order: the explicit tau aliases,
/// then `--agg DIM=METHOD`, then `--agg_<DIM> <METHOD>` pairs in argv order.
/// Later pairs for the same literal dimension win.
pub fn aggregation_pairs(args: &ScoreArgs) -> Result<Vec<(String, String)>, AppError> {
    let mut pairs = Vec::new();
    if let Some(method) = &args.agg_tau {
        pairs.push((DIM_TAU_ASCII.to_string(), method.clone()));
    }
    if let Some(method) = &args.agg_tau_symbol {
        pairs.push((DIM_TAU_SYMBOL.to_string(), method.clone()));
    }
    pairs.extend(args.agg.iter().cloned());
    pairs.extend(parse_agg_pairs(&args.agg_pairs)?);
    Ok(pairs)
}

pub fn parse_agg_pairs(rest: &[String]) -> Result<Vec<(String, String)>, AppError> {
    let mut pairs = Vec::new();
    let mut tokens = rest.iter();
    while let Some(token) = tokens.next() {
        let dimension = token
            .strip_prefix(AGG_FLAG_PREFIX)
            .ok_or_else(|| AppError::usage(format!("Unknown argument: {token}")))?;
        if dimension.is_empty() {
            return Err(AppError::usage("Invalid aggregation flag"));
        }
        let method = tokens
            .next()
            .ok_or_else(|| AppError::usage(format!("Aggregation flag missing value: {token}")))?;
        pairs.push((dimension.to_string(), method.clone()));
    }
    Ok(pairs)
}

fn parse_agg_assignment(raw: &str) -> Result<(String, String), String> {
    let (dimension, method) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected DIM=METHOD, got '{raw}'"))?;
    if dimension.trim().is_empty() {
        return Err(format!("missing dimension in '{raw}'"));
    }
    Ok((dimension.trim().to_string(), method.to_string()))
}

#[cfg(test)]
#[path = "../tests/src_inline/cli.rs"]
mod tests;
