//! STATISTICS stage: cumulative statistics for teams and managers.
//!
//! Per category: running sums and running averages at team and manager level,
//! plus the running sum of the manager's race-wise team mean. Points per value
//! pairs Points and Values of the same race.

use std::collections::BTreeMap;

use fl_algo::{aggregate, points_per_value, running_sum, Series, TeamSeries};
use fl_core::{Category, ManagerId};

use crate::score::{CategoryScores, ManagerResults};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryStatistics {
    pub team_sum: TeamSeries,
    pub team_running_average: TeamSeries,
    pub manager_sum: BTreeMap<ManagerId, Series>,
    pub manager_running_average: BTreeMap<ManagerId, Series>,
    /// Running sum of `Manager Average <cat>`.
    pub manager_sum_average: BTreeMap<ManagerId, Series>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PpvStatistics {
    pub team: TeamSeries,
    pub team_average: TeamSeries,
    pub manager: BTreeMap<ManagerId, Series>,
    pub manager_average: BTreeMap<ManagerId, Series>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeagueStatistics {
    pub points: CategoryStatistics,
    pub values: CategoryStatistics,
    pub ppv: PpvStatistics,
}

impl LeagueStatistics {
    pub fn category(&self, cat: Category) -> &CategoryStatistics {
        match cat {
            Category::Points => &self.points,
            Category::Values => &self.values,
        }
    }
}

fn category_statistics(scores: &CategoryScores) -> CategoryStatistics {
    let mut out = CategoryStatistics::default();
    for (manager, teams) in &scores.teams {
        let (sums, avgs): (BTreeMap<_, _>, BTreeMap<_, _>) = teams
            .iter()
            .map(|(team, s)| {
                let c = aggregate(s);
                ((team.clone(), c.sum), (team.clone(), c.average))
            })
            .unzip();
        out.team_sum.insert(manager.clone(), sums);
        out.team_running_average.insert(manager.clone(), avgs);
    }
    for (manager, weekly) in &scores.managers {
        let c = aggregate(weekly);
        out.manager_sum.insert(manager.clone(), c.sum);
        out.manager_running_average.insert(manager.clone(), c.average);
    }
    for (manager, mean) in &scores.manager_average {
        out.manager_sum_average.insert(manager.clone(), running_sum(mean));
    }
    out
}

fn ppv_statistics(results: &ManagerResults) -> PpvStatistics {
    let mut out = PpvStatistics::default();
    let (points, values) = (&results.points, &results.values);
    // both categories are scored from the same sheets, so keys line up
    debug_assert!(points.teams.keys().eq(values.teams.keys()));

    for ((manager, p_teams), v_teams) in points.teams.iter().zip(values.teams.values()) {
        debug_assert!(p_teams.keys().eq(v_teams.keys()));
        let mut per_race = BTreeMap::new();
        let mut average = BTreeMap::new();
        for ((team, p), v) in p_teams.iter().zip(v_teams.values()) {
            let r = points_per_value(p, v);
            per_race.insert(team.clone(), r.per_race);
            average.insert(team.clone(), r.average);
        }
        out.team.insert(manager.clone(), per_race);
        out.team_average.insert(manager.clone(), average);
    }
    for ((manager, p), v) in points.managers.iter().zip(values.managers.values()) {
        let r = points_per_value(p, v);
        out.manager.insert(manager.clone(), r.per_race);
        out.manager_average.insert(manager.clone(), r.average);
    }
    out
}

pub fn compose(results: &ManagerResults) -> LeagueStatistics {
    LeagueStatistics {
        points: category_statistics(&results.points),
        values: category_statistics(&results.values),
        ppv: ppv_statistics(results),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fl_core::TeamId;

    fn m(s: &str) -> ManagerId {
        s.parse().unwrap()
    }
    fn t(s: &str) -> TeamId {
        s.parse().unwrap()
    }

    fn results() -> ManagerResults {
        let mut r = ManagerResults::default();
        let mut teams = BTreeMap::new();
        teams.insert(t("A1"), vec![10.0, 0.0, -3.0, 7.0]);
        teams.insert(t("A2"), vec![2.0, 4.0, 3.0, 1.0]);
        r.points.teams.insert(m("Ann"), teams);
        r.points.managers.insert(m("Ann"), vec![12.0, 4.0, 0.0, 8.0]);
        r.points.manager_average.insert(m("Ann"), vec![6.0, 2.0, 0.0, 4.0]);

        let mut vteams = BTreeMap::new();
        vteams.insert(t("A1"), vec![50.0, 50.0, 0.0, 100.0]);
        vteams.insert(t("A2"), vec![40.0, 40.0, 40.0, 40.0]);
        r.values.teams.insert(m("Ann"), vteams);
        r.values.managers.insert(m("Ann"), vec![90.0, 90.0, 40.0, 140.0]);
        r.values.manager_average.insert(m("Ann"), vec![45.0, 45.0, 20.0, 70.0]);
        r
    }

    #[test]
    fn team_and_manager_running_series() {
        let s = compose(&results());
        assert_eq!(s.points.team_sum[&m("Ann")][&t("A1")], vec![10.0, 10.0, 7.0, 14.0]);
        assert_eq!(s.points.manager_sum[&m("Ann")], vec![12.0, 16.0, 16.0, 24.0]);
        assert_eq!(s.points.manager_running_average[&m("Ann")], vec![12.0, 8.0, 16.0 / 3.0, 6.0]);
        assert_eq!(s.points.manager_sum_average[&m("Ann")], vec![6.0, 8.0, 8.0, 12.0]);
    }

    #[test]
    fn ppv_uses_same_race_values_and_zero_policy() {
        let s = compose(&results());
        let a1 = &s.ppv.team[&m("Ann")][&t("A1")];
        // race 2 has zero value, race 1 zero points
        assert_eq!(a1, &vec![0.2, 0.0, 0.0, 0.07]);
        assert_eq!(s.ppv.manager[&m("Ann")][0], 12.0 / 90.0);
    }
}
