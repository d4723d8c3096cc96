//! Season directory layout.
//!
//! ```text
//! <root>/Info.json                              season info, keyed by year
//! <root>/Data/<year>/Lineup/Results.json        base result tables
//! <root>/Data/<year>/Lineup/Statistics.json     driver/constructor statistics
//! <root>/Data/<year>/<manager>/<team>.json      team sheets keyed by race
//! <root>/Data/<year>/Managers/Results.json      per-race team/manager scores
//! <root>/Data/<year>/Managers/Statistics.json   cumulative statistics
//! <root>/Data/<year>/Managers/Counts.json       usage counts
//! <root>/Data/<year>/Managers/Run_Record.json   input digest of the last run
//! <root>/Data/<year>/Manager_Check.json         computed standings
//! <root>/Data/<year>/League_Check.json          official standings (optional)
//! ```

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonPaths {
    root: PathBuf,
    year: String,
}

impl SeasonPaths {
    pub fn new(root: impl Into<PathBuf>, year: impl Into<String>) -> Self {
        SeasonPaths { root: root.into(), year: year.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn info(&self) -> PathBuf {
        self.root.join("Info.json")
    }

    pub fn season_dir(&self) -> PathBuf {
        self.root.join("Data").join(&self.year)
    }

    pub fn lineup_results(&self) -> PathBuf {
        self.season_dir().join("Lineup").join("Results.json")
    }

    pub fn lineup_statistics(&self) -> PathBuf {
        self.season_dir().join("Lineup").join("Statistics.json")
    }

    pub fn team_sheets(&self, manager: &str, team: &str) -> PathBuf {
        self.season_dir().join(manager).join(format!("{team}.json"))
    }

    pub fn managers_dir(&self) -> PathBuf {
        self.season_dir().join("Managers")
    }

    pub fn manager_results(&self) -> PathBuf {
        self.managers_dir().join("Results.json")
    }

    pub fn manager_statistics(&self) -> PathBuf {
        self.managers_dir().join("Statistics.json")
    }

    pub fn manager_counts(&self) -> PathBuf {
        self.managers_dir().join("Counts.json")
    }

    pub fn run_record(&self) -> PathBuf {
        self.managers_dir().join("Run_Record.json")
    }

    pub fn manager_check(&self) -> PathBuf {
        self.season_dir().join("Manager_Check.json")
    }

    pub fn league_check(&self) -> PathBuf {
        self.season_dir().join("League_Check.json")
    }

    /// Documents written by a scoring run.
    pub fn outputs(&self) -> [PathBuf; 5] {
        [
            self.manager_results(),
            self.manager_statistics(),
            self.manager_counts(),
            self.lineup_statistics(),
            self.manager_check(),
        ]
    }
}
