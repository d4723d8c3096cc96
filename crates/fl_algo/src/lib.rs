// crates/fl_algo/src/lib.rs
#![forbid(unsafe_code)]

//! Pure scoring algorithms over already-loaded season data.
//!
//! No I/O, no shared state; every function is a deterministic map from
//! immutable inputs to a fresh output.

use std::collections::BTreeMap;

pub use fl_core::{Category, EntityName, ManagerId, TeamId};

// ----------------------------- Shared series types -----------------------------

/// One number per completed race.
pub type Series = Vec<f64>;

/// Running sum and running average of one score sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cumulative {
    pub sum: Series,
    pub average: Series,
}

/// Per-race ratio and cumulative ratio-of-sums.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointsPerValue {
    pub per_race: Series,
    pub average: Series,
}

/// Series keyed by manager, then team.
pub type TeamSeries = BTreeMap<ManagerId, BTreeMap<TeamId, Series>>;

// ----------------------------- Modules -----------------------------

pub mod resolve;
pub mod cumulative;
pub mod ppv;
pub mod usage;
pub mod ranking;

pub use cumulative::{aggregate, column_mean, column_sum, running_average, running_sum};
pub use ppv::points_per_value;
pub use ranking::{final_value, rank_desc, Ranked};
pub use resolve::{resolve_score, ScoreError, ScoringPolicy};
pub use usage::{UsagePosition, UsageTally};
