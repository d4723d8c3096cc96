//! COUNTS stage: pick-usage tallies per position at team, manager and league level.

use std::collections::BTreeMap;

use fl_algo::{UsagePosition, UsageTally};
use fl_core::{ManagerId, TeamId};

use crate::score::LeagueSheets;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionCounts {
    pub teams: BTreeMap<ManagerId, BTreeMap<TeamId, UsageTally>>,
    pub managers: BTreeMap<ManagerId, UsageTally>,
    pub league: UsageTally,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeagueCounts {
    pub positions: BTreeMap<UsagePosition, PositionCounts>,
}

pub fn count_position(sheets: &LeagueSheets, position: UsagePosition, races: usize) -> PositionCounts {
    let mut out = PositionCounts { league: UsageTally::new(races), ..PositionCounts::default() };
    for (manager, teams) in sheets {
        let mut manager_tally = UsageTally::new(races);
        let mut by_team = BTreeMap::new();
        for (team, team_sheets) in teams {
            let t = UsageTally::for_team(team_sheets, position);
            manager_tally.merge(&t);
            by_team.insert(team.clone(), t);
        }
        out.league.merge(&manager_tally);
        out.managers.insert(manager.clone(), manager_tally);
        out.teams.insert(manager.clone(), by_team);
    }
    out
}

pub fn count_league(sheets: &LeagueSheets, races: usize) -> LeagueCounts {
    LeagueCounts {
        positions: UsagePosition::ALL
            .into_iter()
            .map(|p| (p, count_position(sheets, p, races)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fl_core::{Perk, TeamSheet};

    fn sheet(drivers: &[&str], perk: Perk) -> TeamSheet {
        TeamSheet {
            drivers: drivers.iter().map(|d| d.parse().unwrap()).collect(),
            constructors: vec!["McLaren".parse().unwrap(), "Haas".parse().unwrap()],
            drs_boost: None,
            extra_drs: None,
            penalties: 0,
            perk,
        }
    }

    #[test]
    fn manager_and_league_totals_add_team_rows() {
        let mut sheets = LeagueSheets::new();
        let mut ann = BTreeMap::new();
        ann.insert("A1".parse().unwrap(), vec![sheet(&["Albon"], Perk::None), sheet(&["Ocon"], Perk::Limitless)]);
        ann.insert("A2".parse().unwrap(), vec![sheet(&["Albon"], Perk::None), sheet(&["Albon"], Perk::None)]);
        sheets.insert("Ann".parse().unwrap(), ann);
        let mut ben = BTreeMap::new();
        ben.insert("B1".parse().unwrap(), vec![sheet(&["Ocon"], Perk::NoNegative), sheet(&["Ocon"], Perk::None)]);
        sheets.insert("Ben".parse().unwrap(), ben);

        let c = count_league(&sheets, 2);
        let drivers = &c.positions[&UsagePosition::Driver];
        assert_eq!(drivers.managers["Ann"].get("Albon"), Some(&[2, 1][..]));
        assert_eq!(drivers.league.get("Ocon"), Some(&[1, 2][..]));
        assert_eq!(drivers.league.cumulative()["Albon"], vec![2, 3]);

        let perks = &c.positions[&UsagePosition::Perk];
        assert_eq!(perks.league.get("None"), Some(&[2, 2][..]));
        assert_eq!(perks.teams["Ben"]["B1"].get("No Negative"), Some(&[1, 0][..]));
        assert_eq!(c.positions[&UsagePosition::DrsBoost].league.counts().len(), 0);
    }
}
