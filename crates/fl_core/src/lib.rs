//! fl_core: Core types shared by every layer of the league engine.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! engine (`fl_io`, `fl_algo`, `fl_pipeline`, `fl_report`, `fl_cli`).
//!
//! - Name newtypes: `ManagerId`, `TeamId`, `RaceName`, `EntityName`
//! - Season info (`Info.json` per year): races, manager rosters, sheet positions
//! - Team sheets and the closed `Perk` sum type
//! - Base result tables (driver/constructor points and values)
//! - Deterministic ordering helpers

#![forbid(unsafe_code)]

pub mod errors {
    use thiserror::Error;

    /// Core-domain validation errors.
    #[derive(Clone, Debug, Eq, PartialEq, Error)]
    pub enum CoreError {
        #[error("invalid name: {0:?}")]
        InvalidName(String),
        #[error("result table `{table}` is ragged: `{entity}` has {len} races, expected {expected}")]
        RaggedTable {
            table: &'static str,
            entity: String,
            len: usize,
            expected: usize,
        },
        #[error("`{entity}` is listed in `{present}` but not in `{missing}`")]
        UnmatchedEntity {
            entity: String,
            present: &'static str,
            missing: &'static str,
        },
        #[error("{completed} races have results but the season lists only {scheduled}")]
        SeasonOverrun { completed: usize, scheduled: usize },
        #[error("race `{0}` is listed more than once")]
        DuplicateRace(String),
        #[error("manager `{0}` has no teams")]
        EmptyRoster(String),
        #[error("team `{team}` is listed under both `{first}` and `{second}`")]
        DuplicateTeam {
            team: String,
            first: String,
            second: String,
        },
    }
}

pub mod ids;
pub mod season;
pub mod sheet;
pub mod tables;
pub mod determinism;

pub use errors::CoreError;
pub use ids::{EntityName, ManagerId, RaceName, TeamId};
pub use season::{Roster, SeasonInfo};
pub use sheet::{Perk, PerkKind, SheetError, TeamSheet, WireSheet};
pub use tables::{Category, EntityKind, ResultTables, ScoreTable};
