use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use caption_retime::alignment::report::{Meta, REPORT_SCHEMA_VERSION};
use caption_retime::{
    aggregate_reports, compute_case_report, CaseReport, Report, RetimeConfig, SegmentBounds,
    TimedWord, WordRetimerBuilder,
};
use chrono::Utc;
use clap::Parser;
use serde::Deserialize;

#[path = "retime_report/json_report_formatter.rs"]
mod json_report_formatter;

const LOG_ENV: &str = "CAPTION_RETIME_LOG";

#[derive(Debug, Parser)]
#[command(name = "retime_report")]
#[command(about = "Retime edited caption segments and report timing quality")]
struct Args {
    /// JSON array of cases: { id, segment_start, segment_end, words, new_text }.
    #[arg(long, env = "CAPTION_RETIME_REPORT_CASES")]
    cases: PathBuf,
    #[arg(long, env = "CAPTION_RETIME_REPORT_CONFIG")]
    config: Option<PathBuf>,
    /// Report destination. Printed to stdout when omitted.
    #[arg(long, env = "CAPTION_RETIME_REPORT_OUT")]
    out: Option<PathBuf>,
    /// Include every retimed word in the per-case report.
    #[arg(long, env = "CAPTION_RETIME_REPORT_WORDS", default_value_t = false)]
    words: bool,
    #[arg(long, env = "CAPTION_RETIME_REPORT_LIMIT")]
    limit: Option<usize>,
    #[arg(long, env = "CAPTION_RETIME_REPORT_OFFSET", default_value_t = 0)]
    offset: usize,
}

#[derive(Debug, Deserialize)]
struct Case {
    id: String,
    segment_start: f64,
    segment_end: f64,
    #[serde(default)]
    words: Vec<TimedWord>,
    new_text: String,
}

fn main() {
    init_logging();
    if let Err(err) = run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let env_filter = env::var(LOG_ENV).unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<(), String> {
    let args = Args::parse();

    let config = match args.config.as_deref() {
        Some(path) => RetimeConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => RetimeConfig::default(),
    };
    let similarity_threshold = config.similarity_threshold;
    let retimer = WordRetimerBuilder::new(config)
        .build()
        .map_err(|err| format!("Failed to build WordRetimer: {err}"))?;

    let mut cases = load_cases(&args.cases)?;
    if args.offset > 0 {
        cases = cases.into_iter().skip(args.offset).collect();
    }
    if let Some(limit) = args.limit {
        cases.truncate(limit);
    }
    if cases.is_empty() {
        return Err("No cases selected after applying offset/limit.".to_string());
    }
    tracing::info!(cases = cases.len(), similarity_threshold, "retiming cases");

    let mut case_reports: Vec<CaseReport> = Vec::with_capacity(cases.len());
    for case in &cases {
        let bounds = SegmentBounds::try_new(case.segment_start, case.segment_end)
            .map_err(|err| format!("{}: {err}", case.id))?;
        let output = retimer.retime_detailed(&case.words, &case.new_text, bounds);
        let report = compute_case_report(&case.id, &case.words, &output, bounds, args.words);
        tracing::debug!(
            id = %case.id,
            kept = report.edits.kept,
            replaced = report.edits.replaced,
            deleted = report.edits.deleted,
            inserted = report.edits.inserted,
            repaired = report.repaired_word_count,
            "case retimed"
        );
        if report.structural.violation_count() > 0 {
            tracing::warn!(id = %case.id, notes = ?report.notes, "case has structural violations");
        }
        case_reports.push(report);
    }

    let aggregates = aggregate_reports(&case_reports);
    let report = Report {
        schema_version: REPORT_SCHEMA_VERSION,
        meta: Meta {
            generated_at: Utc::now().to_rfc3339(),
            similarity_threshold,
            case_count: case_reports.len(),
        },
        cases: case_reports,
        aggregates,
    };

    match args.out.as_deref() {
        Some(path) => {
            json_report_formatter::write_report(path, &report)?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => json_report_formatter::print_report(&report)?,
    }
    Ok(())
}

fn load_cases(path: &Path) -> Result<Vec<Case>, String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read cases file '{}': {err}", path.display()))?;
    let cases: Vec<Case> = serde_json::from_str(&contents)
        .map_err(|err| format!("Failed to parse cases file '{}': {err}", path.display()))?;

    let mut seen = HashSet::with_capacity(cases.len());
    for case in &cases {
        if !seen.insert(case.id.as_str()) {
            return Err(format!("Duplicate case id '{}' in '{}'.", case.id, path.display()));
        }
    }
    Ok(cases)
}
