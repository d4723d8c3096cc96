//! LOAD stage: read every input of a season into memory.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use fl_core::{ManagerId, RaceName, ResultTables, SeasonInfo, TeamId};
use fl_io::hasher::sha256_canonical_value;
use fl_io::layout::SeasonPaths;
use fl_io::loader::{self, LeagueCheck, TeamHistory};
use fl_io::IoError;

use crate::PipelineError;

/// Loaded, validated inputs. `completed` is the common length of the result tables;
/// `histories` holds one entry per rostered team.
#[derive(Debug, Clone)]
pub struct PipelineCtx {
    pub paths: SeasonPaths,
    pub info: SeasonInfo,
    pub tables: ResultTables,
    pub completed: usize,
    pub histories: BTreeMap<ManagerId, BTreeMap<TeamId, TeamHistory>>,
    pub league_check: Option<LeagueCheck>,
}

pub fn load_ctx(paths: SeasonPaths) -> Result<PipelineCtx, PipelineError> {
    let info = loader::load_season_info(&paths)?;
    let tables = loader::load_result_tables(&paths)?;
    let completed = tables.completed_races()?;
    info.completed_races(completed)?;

    let mut histories: BTreeMap<ManagerId, BTreeMap<TeamId, TeamHistory>> = BTreeMap::new();
    for (manager, team) in info.teams() {
        let h = loader::load_team_history(&paths, manager.as_str(), team.as_str())?;
        histories.entry(manager.clone()).or_default().insert(team.clone(), h);
    }
    let league_check = loader::load_league_check(&paths)?;

    tracing::debug!(completed, teams = info.teams().count(), "loaded season inputs");
    Ok(PipelineCtx { paths, info, tables, completed, histories, league_check })
}

impl PipelineCtx {
    pub fn completed_races(&self) -> &[RaceName] {
        // bounded by load_ctx
        &self.info.races[..self.completed.min(self.info.races.len())]
    }

    /// SHA-256 over the canonical form of every scoring input
    /// (season info, result tables, all team sheets). Canonical form sorts
    /// object keys, so roster order is hashed separately as a list.
    pub fn inputs_digest(&self) -> Result<String, PipelineError> {
        let to_json = |what: &str, r: serde_json::Result<Value>| {
            r.map_err(|e| IoError::Json { path: format!("<{what}>"), msg: e.to_string() })
        };
        let info = to_json("season info", serde_json::to_value(&self.info))?;
        let tables = to_json("result tables", serde_json::to_value(&self.tables))?;

        let mut teams = Map::new();
        for (manager, by_team) in &self.histories {
            let m: Map<String, Value> = by_team
                .iter()
                .map(|(t, h)| (t.to_string(), h.to_value()))
                .collect();
            teams.insert(manager.to_string(), Value::Object(m));
        }

        let roster: Vec<Value> = self.info.managers.iter().map(|(m, ts)| json!([m, ts])).collect();

        let v = json!({
            "year": self.paths.year(),
            "info": info,
            "roster": roster,
            "results": tables,
            "teams": teams,
        });
        Ok(sha256_canonical_value(&v))
    }
}
