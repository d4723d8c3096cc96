//! Loader: read a season's local JSON documents into typed values.
//!
//! Shape errors are reported with the offending file path; domain checks
//! (`SeasonInfo::validate`, ragged result tables) surface as `IoError::Invalid`.

#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use fl_core::{ResultTables, SeasonInfo, WireSheet};

use crate::canonical_json::write_pretty_file;
use crate::layout::SeasonPaths;
use crate::{IoError, IoResult};

/// Official standings as displayed by the league: team → total points.
pub type LeagueCheck = BTreeMap<String, f64>;

// ----------------------------- Team sheet history -----------------------------

/// All sheets of one team, keyed by race name, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamHistory {
    sheets: Map<String, Value>,
}

impl TeamHistory {
    pub fn get(&self, race: &str) -> Option<&WireSheet> {
        self.sheets.get(race).and_then(Value::as_object)
    }

    pub fn contains(&self, race: &str) -> bool {
        self.sheets.contains_key(race)
    }

    pub fn insert(&mut self, race: &str, sheet: WireSheet) {
        self.sheets.insert(race.to_string(), Value::Object(sheet));
    }

    pub fn races(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.sheets.clone())
    }

    fn from_value(path: &Path, v: Value) -> IoResult<Self> {
        let Value::Object(sheets) = v else {
            return Err(IoError::invalid(path, "expected an object keyed by race"));
        };
        if let Some((race, _)) = sheets.iter().find(|(_, s)| !s.is_object()) {
            return Err(IoError::invalid(path, format!("sheet for race `{race}` is not an object")));
        }
        Ok(TeamHistory { sheets })
    }
}

// ----------------------------- Raw JSON -----------------------------

/// Read and parse a JSON document; a missing file is `IoError::Missing`.
pub fn read_json(path: &Path, what: &'static str) -> IoResult<Value> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(IoError::Missing { what, path: path.display().to_string() })
        }
        Err(e) => return Err(IoError::path(path, e)),
    };
    serde_json::from_str(&text).map_err(|e| IoError::json(path, e))
}

/// Like `read_json`, but a missing file is `Ok(None)`.
pub fn read_json_opt(path: &Path, what: &'static str) -> IoResult<Option<Value>> {
    match read_json(path, what) {
        Ok(v) => Ok(Some(v)),
        Err(IoError::Missing { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

fn from_value<T: DeserializeOwned>(path: &Path, v: Value) -> IoResult<T> {
    serde_json::from_value(v).map_err(|e| IoError::json(path, e))
}

// ----------------------------- Season documents -----------------------------

/// Season info for `paths.year()` from `Info.json`.
pub fn load_season_info(paths: &SeasonPaths) -> IoResult<SeasonInfo> {
    let path = paths.info();
    let mut all = match read_json(&path, "season info")? {
        Value::Object(m) => m,
        _ => return Err(IoError::invalid(&path, "expected an object keyed by year")),
    };
    let entry = all
        .remove(paths.year())
        .ok_or_else(|| IoError::invalid(&path, format!("no season `{}`", paths.year())))?;
    let info: SeasonInfo = from_value(&path, entry)?;
    info.validate().map_err(|e| IoError::invalid(&path, e.to_string()))?;
    tracing::debug!(
        year = paths.year(),
        races = info.races.len(),
        managers = info.managers.len(),
        "loaded season info"
    );
    Ok(info)
}

/// Base result tables; all series must have the same length.
pub fn load_result_tables(paths: &SeasonPaths) -> IoResult<ResultTables> {
    let path = paths.lineup_results();
    let tables: ResultTables = from_value(&path, read_json(&path, "result tables")?)?;
    tables
        .completed_races()
        .map_err(|e| IoError::invalid(&path, e.to_string()))?;
    Ok(tables)
}

pub fn load_team_history(paths: &SeasonPaths, manager: &str, team: &str) -> IoResult<TeamHistory> {
    let path = paths.team_sheets(manager, team);
    let v = read_json(&path, "team sheets")?;
    TeamHistory::from_value(&path, v)
}

/// A team without a sheet file yet starts with an empty history.
pub fn load_team_history_or_default(paths: &SeasonPaths, manager: &str, team: &str) -> IoResult<TeamHistory> {
    let path = paths.team_sheets(manager, team);
    match read_json_opt(&path, "team sheets")? {
        Some(v) => TeamHistory::from_value(&path, v),
        None => Ok(TeamHistory::default()),
    }
}

pub fn write_team_history(paths: &SeasonPaths, manager: &str, team: &str, history: &TeamHistory) -> IoResult<()> {
    write_pretty_file(&paths.team_sheets(manager, team), &history.to_value())
}

/// `League_Check.json` if present.
pub fn load_league_check(paths: &SeasonPaths) -> IoResult<Option<LeagueCheck>> {
    let path = paths.league_check();
    read_json_opt(&path, "league check")?
        .map(|v| from_value(&path, v))
        .transpose()
}
