//! `fl`: offline scoring of a fantasy league season.
//!
//! Commands:
//! - `score`: load → score → write documents + run record → league check
//! - `validate`: load and score without writing
//! - `standings`: print the standings table
//! - `week`: carry team sheets forward to an upcoming race
//!
//! stdout carries command output; logs go to stderr.

#![forbid(unsafe_code)]

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const CHECK_MISMATCH: i32 = 3;
    pub const IO: i32 = 4;
    pub const SCORING: i32 = 5;
}

use std::collections::BTreeMap;
use std::process::ExitCode;

use clap::Parser;

use args::{Args, Command};
use fl_io::canonical_json::write_pretty_file;
use fl_io::layout::SeasonPaths;
use fl_io::loader;
use fl_io::run_record::RunRecord;
use fl_io::IoError;
use fl_pipeline::check::compare;
use fl_pipeline::{load_ctx, prepare_week, run_with_ctx, CheckReport, PipelineCtx, PipelineError, WeekAction};
use fl_report::{check_summary, standings_table, Documents};

const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error buckets for exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Malformed or inconsistent inputs (JSON shape, season data, team sheets).
    Validation(String),
    /// Reading or writing files.
    Io(String),
    /// A pick that the result tables cannot resolve.
    Scoring(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Scoring(m) => write!(f, "scoring: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args);

    let rc = match run(&args) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("fl: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

fn init_tracing(args: &Args) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(args.log_level())
        .with_target(false)
        .without_time()
        .init();
}

fn run(args: &Args) -> Result<i32, MainError> {
    let paths = args.paths();
    match &args.command {
        Command::Score { force } => score(paths, *force),
        Command::Validate => validate(paths),
        Command::Standings { top } => standings(paths, *top),
        Command::Week { race, force } => week(&paths, race, *force),
    }
}

/* ------------------------------ commands ------------------------------ */

fn score(paths: SeasonPaths, force: bool) -> Result<i32, MainError> {
    // --- LOAD ---
    let ctx = load_ctx(paths).map_err(map_pipeline_err)?;
    let digest = ctx.inputs_digest().map_err(map_pipeline_err)?;

    // --- RUN RECORD ---
    if !force {
        if let Some(record) = RunRecord::load(&ctx.paths).map_err(map_io_err)? {
            if record.is_current(&ctx.paths, ENGINE_VERSION, &digest) {
                tracing::info!(year = ctx.paths.year(), "inputs unchanged; outputs are current");
                println!("outputs up to date ({} races)", record.completed_races);
                return recheck(&ctx);
            }
        }
    }

    // --- PIPELINE ---
    let outs = run_with_ctx(&ctx).map_err(map_pipeline_err)?;

    // --- WRITE ---
    let docs = Documents::from_outputs(&outs);
    let p = &ctx.paths;
    for (path, doc) in [
        (p.manager_results(), &docs.results),
        (p.manager_statistics(), &docs.statistics),
        (p.manager_counts(), &docs.counts),
        (p.lineup_statistics(), &docs.lineup_statistics),
        (p.manager_check(), &docs.standings),
    ] {
        write_pretty_file(&path, doc).map_err(map_io_err)?;
    }
    let record = RunRecord {
        engine_version: ENGINE_VERSION.to_string(),
        year: p.year().to_string(),
        completed_races: ctx.completed,
        inputs_sha256: digest,
    };
    record.write(p).map_err(map_io_err)?;
    println!("scored {} races for {} teams", ctx.completed, outs.standings.rows.len());

    // --- CHECK ---
    Ok(report_check(outs.check.as_ref()))
}

/// League check against the standings written by the last run.
fn recheck(ctx: &PipelineCtx) -> Result<i32, MainError> {
    let Some(official) = &ctx.league_check else {
        return Ok(exitcodes::OK);
    };
    let path = ctx.paths.manager_check();
    let v = loader::read_json(&path, "standings").map_err(map_io_err)?;
    let computed: BTreeMap<String, f64> = serde_json::from_value(v)
        .map_err(|e| MainError::Validation(format!("{}: {e}", path.display())))?;
    Ok(report_check(Some(&compare(&computed, official))))
}

fn report_check(check: Option<&CheckReport>) -> i32 {
    match check {
        Some(report) => {
            print!("{}", check_summary(report));
            if report.is_clean() {
                exitcodes::OK
            } else {
                exitcodes::CHECK_MISMATCH
            }
        }
        None => exitcodes::OK,
    }
}

fn validate(paths: SeasonPaths) -> Result<i32, MainError> {
    let ctx = load_ctx(paths).map_err(map_pipeline_err)?;
    let outs = run_with_ctx(&ctx).map_err(map_pipeline_err)?;
    println!(
        "inputs ok: {} of {} races completed, {} teams",
        ctx.completed,
        ctx.info.races.len(),
        outs.standings.rows.len()
    );
    Ok(exitcodes::OK)
}

fn standings(paths: SeasonPaths, top: Option<usize>) -> Result<i32, MainError> {
    let ctx = load_ctx(paths).map_err(map_pipeline_err)?;
    let outs = run_with_ctx(&ctx).map_err(map_pipeline_err)?;
    print!("{}", standings_table(&outs.standings, top));
    Ok(exitcodes::OK)
}

fn week(paths: &SeasonPaths, race: &str, force: bool) -> Result<i32, MainError> {
    let report = prepare_week(paths, race, force).map_err(map_pipeline_err)?;
    for (manager, team, action) in &report.teams {
        let what = match action {
            WeekAction::CarriedForward { from } => format!("carried forward from {from}"),
            WeekAction::Blank => "blank sheet".to_string(),
            WeekAction::Kept => "kept".to_string(),
        };
        println!("{} / {}: {what}", manager, team);
    }
    Ok(exitcodes::OK)
}

/* ------------------------------ mapping ------------------------------ */

fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Io(_) => IO,
        MainError::Scoring(_) => SCORING,
    }
}

fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Json { .. } | IoError::Invalid { .. } => MainError::Validation(e.to_string()),
        IoError::Path { .. } | IoError::Missing { .. } => MainError::Io(e.to_string()),
    }
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::Io(io) => map_io_err(io),
        PipelineError::Season(_) | PipelineError::MalformedTeamSheet { .. } | PipelineError::UnknownRace(_) => {
            MainError::Validation(e.to_string())
        }
        PipelineError::MissingEntity { .. } => MainError::Scoring(e.to_string()),
    }
}
