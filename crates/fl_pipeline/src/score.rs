//! SCORE stage: parse every team's sheets for the completed races and resolve
//! them into per-race Points and Values.
//!
//! Manager series are built from the raw team scores race by race:
//! `Manager <cat>` is the sum over the manager's teams, `Manager Average <cat>`
//! the mean over them.

use std::collections::BTreeMap;

use fl_algo::{column_mean, column_sum, resolve_score, Series, TeamSeries};
use fl_core::{Category, ManagerId, RaceName, TeamId, TeamSheet};

use crate::load::PipelineCtx;
use crate::PipelineError;

/// Typed sheets, one per completed race, per team.
pub type LeagueSheets = BTreeMap<ManagerId, BTreeMap<TeamId, Vec<TeamSheet>>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryScores {
    pub teams: TeamSeries,
    pub managers: BTreeMap<ManagerId, Series>,
    pub manager_average: BTreeMap<ManagerId, Series>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManagerResults {
    pub points: CategoryScores,
    pub values: CategoryScores,
}

impl ManagerResults {
    pub fn category(&self, cat: Category) -> &CategoryScores {
        match cat {
            Category::Points => &self.points,
            Category::Values => &self.values,
        }
    }

    fn category_mut(&mut self, cat: Category) -> &mut CategoryScores {
        match cat {
            Category::Points => &mut self.points,
            Category::Values => &mut self.values,
        }
    }
}

pub fn parse_league_sheets(ctx: &PipelineCtx) -> Result<LeagueSheets, PipelineError> {
    let races = ctx.completed_races();
    let mut out = LeagueSheets::new();

    for (manager, teams) in &ctx.histories {
        for (team, history) in teams {
            let malformed = |race: &RaceName, reason: String| PipelineError::MalformedTeamSheet {
                manager: manager.clone(),
                team: team.clone(),
                race: race.clone(),
                reason,
            };
            let sheets = races
                .iter()
                .map(|race| {
                    let wire = history
                        .get(race.as_str())
                        .ok_or_else(|| malformed(race, "no sheet for this race".into()))?;
                    TeamSheet::from_wire(wire).map_err(|e| malformed(race, e.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            out.entry(manager.clone()).or_default().insert(team.clone(), sheets);
        }
    }
    Ok(out)
}

pub fn score_league(ctx: &PipelineCtx, sheets: &LeagueSheets) -> Result<ManagerResults, PipelineError> {
    let races = ctx.completed_races();
    let mut results = ManagerResults::default();

    for cat in Category::ALL {
        let scores = results.category_mut(cat);
        for (manager, teams) in sheets {
            let mut by_team: BTreeMap<TeamId, Series> = BTreeMap::new();
            for (team, team_sheets) in teams {
                let series = team_sheets
                    .iter()
                    .zip(races)
                    .enumerate()
                    .map(|(i, (sheet, race))| {
                        resolve_score(sheet, cat, &ctx.tables, i).map_err(|source| PipelineError::MissingEntity {
                            manager: manager.clone(),
                            team: team.clone(),
                            race: race.clone(),
                            source,
                        })
                    })
                    .collect::<Result<Series, _>>()?;
                by_team.insert(team.clone(), series);
            }
            let rows = || by_team.values().map(Vec::as_slice);
            scores.managers.insert(manager.clone(), column_sum(rows()));
            scores.manager_average.insert(manager.clone(), column_mean(rows()));
            scores.teams.insert(manager.clone(), by_team);
        }
    }
    Ok(results)
}
