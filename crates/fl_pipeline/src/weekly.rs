//! WEEKLY stage: prepare every team's sheet for an upcoming race.
//!
//! The new sheet is a copy of the latest earlier sheet whose perk is not a
//! one-race perk (`Limitless`, `Final Fix`); with no such sheet a blank one is
//! created from the season's sheet positions. Existing entries are left alone
//! unless `force` is set.

use fl_core::{ManagerId, RaceName, TeamId, TeamSheet, WireSheet};
use fl_io::layout::SeasonPaths;
use fl_io::loader::{self, TeamHistory};

use crate::PipelineError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekAction {
    CarriedForward { from: RaceName },
    Blank,
    /// Sheet already present; not overwritten.
    Kept,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekReport {
    pub race: RaceName,
    pub teams: Vec<(ManagerId, TeamId, WeekAction)>,
}

/// Sheet for the race following `earlier` (calendar order).
pub fn carry_forward(history: &TeamHistory, earlier: &[RaceName], positions: &[String]) -> (WireSheet, WeekAction) {
    for race in earlier.iter().rev() {
        let Some(sheet) = history.get(race.as_str()) else {
            continue;
        };
        match TeamSheet::wire_perk_kind(sheet) {
            Some(kind) if kind.is_single_race() => continue,
            Some(_) => {
                return (sheet.clone(), WeekAction::CarriedForward { from: race.clone() });
            }
            None => {
                tracing::warn!(race = %race, "unreadable perk; sheet not carried forward");
            }
        }
    }
    (TeamSheet::blank_wire(positions), WeekAction::Blank)
}

pub fn prepare_week(paths: &SeasonPaths, race: &str, force: bool) -> Result<WeekReport, PipelineError> {
    let info = loader::load_season_info(paths)?;
    let idx = info
        .race_index(race)
        .ok_or_else(|| PipelineError::UnknownRace(race.to_string()))?;
    let target = &info.races[idx];
    let earlier = &info.races[..idx];
    let positions = info.sheet_positions();

    let mut teams = Vec::new();
    for (manager, team) in info.teams() {
        let mut history = loader::load_team_history_or_default(paths, manager.as_str(), team.as_str())?;
        let action = if history.contains(target.as_str()) && !force {
            WeekAction::Kept
        } else {
            let (sheet, action) = carry_forward(&history, earlier, &positions);
            history.insert(target.as_str(), sheet);
            loader::write_team_history(paths, manager.as_str(), team.as_str(), &history)?;
            action
        };
        tracing::debug!(manager = %manager, team = %team, ?action, "prepared sheet");
        teams.push((manager.clone(), team.clone(), action));
    }
    tracing::info!(race = %target, teams = teams.len(), "weekly sheets prepared");
    Ok(WeekReport { race: target.clone(), teams })
}
