//! fl_pipeline: deterministic season pipeline (load → score → statistics → counts → lineup → standings/check)
//! plus the weekly carry-forward of team sheets.
//!
//! Every run recomputes everything from the loaded inputs; nothing is updated
//! in place. JSON/hashing is delegated to `fl_io`, math to `fl_algo`.

#![forbid(unsafe_code)]

use thiserror::Error;

use fl_algo::ScoreError;
use fl_core::{CoreError, ManagerId, RaceName, Roster, TeamId};
use fl_io::IoError;

pub mod load;
pub mod score;
pub mod statistics;
pub mod counts;
pub mod lineup;
pub mod check;
pub mod weekly;

pub use check::{CheckReport, Mismatch, Standing, Standings};
pub use counts::{LeagueCounts, PositionCounts};
pub use lineup::{EntityStatistics, LineupStatistics};
pub use load::{load_ctx, PipelineCtx};
pub use score::{CategoryScores, LeagueSheets, ManagerResults};
pub use statistics::{CategoryStatistics, LeagueStatistics, PpvStatistics};
pub use weekly::{prepare_week, WeekAction, WeekReport};

/// Single error surface for the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error("season data: {0}")]
    Season(#[from] CoreError),

    #[error("{manager}/{team} race `{race}`: malformed team sheet: {reason}")]
    MalformedTeamSheet {
        manager: ManagerId,
        team: TeamId,
        race: RaceName,
        reason: String,
    },

    #[error("{manager}/{team} race `{race}`: {source}")]
    MissingEntity {
        manager: ManagerId,
        team: TeamId,
        race: RaceName,
        #[source]
        source: ScoreError,
    },

    #[error("race `{0}` is not in the season calendar")]
    UnknownRace(String),
}

/// Everything a scoring run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutputs {
    pub completed_races: Vec<RaceName>,
    /// Managers and teams in `Info.json` order, for document layout.
    pub roster: Roster,
    pub results: ManagerResults,
    pub statistics: LeagueStatistics,
    pub counts: LeagueCounts,
    pub lineup: LineupStatistics,
    pub standings: Standings,
    /// Present when a league check file exists.
    pub check: Option<CheckReport>,
}

/// Run every stage over a loaded context.
pub fn run_with_ctx(ctx: &PipelineCtx) -> Result<PipelineOutputs, PipelineError> {
    let races = ctx.completed_races();
    tracing::info!(year = ctx.paths.year(), races = races.len(), "scoring season");

    // --- PARSE SHEETS ---
    let sheets = score::parse_league_sheets(ctx)?;

    // --- SCORE ---
    let results = score::score_league(ctx, &sheets)?;
    tracing::debug!(teams = ctx.info.teams().count(), "scored all teams");

    // --- STATISTICS ---
    let statistics = statistics::compose(&results);

    // --- COUNTS ---
    let counts = counts::count_league(&sheets, races.len());

    // --- LINEUP ---
    let lineup = lineup::lineup_statistics(&ctx.tables)?;

    // --- STANDINGS / CHECK ---
    let standings = check::standings(&statistics);
    let check = ctx
        .league_check
        .as_ref()
        .map(|official| check::compare(&standings.totals(), official));
    if let Some(report) = &check {
        for m in &report.mismatches {
            tracing::warn!(team = %m.team, computed = ?m.computed, official = ?m.official, "league check mismatch");
        }
    }

    Ok(PipelineOutputs {
        completed_races: races.to_vec(),
        roster: ctx.info.managers.clone(),
        results,
        statistics,
        counts,
        lineup,
        standings,
        check,
    })
}
