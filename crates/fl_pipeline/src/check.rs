//! STANDINGS / CHECK stage.
//!
//! Standings rank every team by its final cumulative points. The league check
//! compares those totals with the official league table, when one is present.

use std::collections::BTreeMap;

use fl_algo::{final_value, rank_desc};
use fl_core::{ManagerId, TeamId};
use fl_io::loader::LeagueCheck;

use crate::statistics::LeagueStatistics;

/// Absolute tolerance when comparing against official totals.
pub const CHECK_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub position: usize,
    pub manager: ManagerId,
    pub team: TeamId,
    pub points: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Standings {
    pub rows: Vec<Standing>,
}

impl Standings {
    /// Team → total points.
    pub fn totals(&self) -> BTreeMap<String, f64> {
        self.rows.iter().map(|r| (r.team.to_string(), r.points)).collect()
    }

    pub fn top(&self, n: usize) -> &[Standing] {
        &self.rows[..n.min(self.rows.len())]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub team: String,
    pub computed: Option<f64>,
    pub official: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckReport {
    pub checked: usize,
    pub mismatches: Vec<Mismatch>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }
}

pub fn standings(stats: &LeagueStatistics) -> Standings {
    let owner: BTreeMap<&TeamId, &ManagerId> = stats
        .points
        .team_sum
        .iter()
        .flat_map(|(m, teams)| teams.keys().map(move |t| (t, m)))
        .collect();
    let totals = stats
        .points
        .team_sum
        .values()
        .flat_map(|teams| teams.iter().map(|(t, s)| (t, final_value(s))));

    let rows = rank_desc(totals)
        .into_iter()
        .filter_map(|r| {
            let manager = (*owner.get(r.name)?).clone();
            Some(Standing { position: r.position, manager, team: r.name.clone(), points: r.value })
        })
        .collect();
    Standings { rows }
}

/// Compare computed team totals with the official ones. A team missing from
/// either side is a mismatch.
pub fn compare(computed: &BTreeMap<String, f64>, official: &LeagueCheck) -> CheckReport {
    let mut mismatches = Vec::new();
    for (team, &ours) in computed {
        match official.get(team) {
            Some(&theirs) if (ours - theirs).abs() <= CHECK_TOLERANCE => {}
            theirs => mismatches.push(Mismatch { team: team.clone(), computed: Some(ours), official: theirs.copied() }),
        }
    }
    for (team, &theirs) in official {
        if !computed.contains_key(team) {
            mismatches.push(Mismatch { team: team.clone(), computed: None, official: Some(theirs) });
        }
    }
    CheckReport { checked: computed.len(), mismatches }
}
