//! render_json.rs: keyed JSON documents of a scoring run.
//!
//! `Managers/Results.json`:
//!   `Team <cat>` {manager: {team: [..]}}, `Manager <cat>` {manager: [..]},
//!   `Manager Average <cat>` {manager: [..]}
//! `Managers/Statistics.json`:
//!   `Team Sum <cat>`, `Manager Sum <cat>`, `Team Running Average <cat>`,
//!   `Manager Running Average <cat>`, `Manager Sum Average <cat>`, then the
//!   four points-per-value blocks
//! `Managers/Counts.json`: per position `Teams`, `Teams Sum`, `Manager`,
//!   `Manager Sum`, `League`, `League Sum`
//! `Lineup/Statistics.json`: per `Driver`/`Team` prefix
//! `Manager_Check.json`: {team: points} in standings order
//!
//! Managers and teams appear in roster (`Info.json`) order.
//!
//! IMPORTANT: relies on `serde_json`'s `preserve_order` for key order.

use std::collections::BTreeMap;

use serde_json::{Map as JsonMap, Value};

use fl_algo::{Series, TeamSeries, UsagePosition, UsageTally};
use fl_core::{Category, EntityKind, EntityName, ManagerId, Roster, TeamId};
use fl_pipeline::{EntityStatistics, LeagueCounts, LeagueStatistics, LineupStatistics, ManagerResults, PipelineOutputs, Standings};

/// All documents of one run, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct Documents {
    pub results: Value,
    pub statistics: Value,
    pub counts: Value,
    pub lineup_statistics: Value,
    pub standings: Value,
}

impl Documents {
    pub fn from_outputs(out: &PipelineOutputs) -> Self {
        Documents {
            results: results_json(&out.results, &out.roster),
            statistics: statistics_json(&out.statistics, &out.roster),
            counts: counts_json(&out.counts, &out.roster),
            lineup_statistics: lineup_statistics_json(&out.lineup),
            standings: standings_json(&out.standings),
        }
    }
}

/* ----------------------------- documents ----------------------------- */

pub fn results_json(r: &ManagerResults, roster: &Roster) -> Value {
    let mut root = obj();
    for cat in Category::ALL {
        let c = r.category(cat);
        let l = cat.label();
        root.insert(format!("Team {l}"), by_team(&c.teams, roster));
        root.insert(format!("Manager {l}"), by_manager(&c.managers, roster));
        root.insert(format!("Manager Average {l}"), by_manager(&c.manager_average, roster));
    }
    Value::Object(root)
}

pub fn statistics_json(s: &LeagueStatistics, roster: &Roster) -> Value {
    let mut root = obj();
    for cat in Category::ALL {
        let c = s.category(cat);
        let l = cat.label();
        root.insert(format!("Team Sum {l}"), by_team(&c.team_sum, roster));
        root.insert(format!("Manager Sum {l}"), by_manager(&c.manager_sum, roster));
        root.insert(format!("Team Running Average {l}"), by_team(&c.team_running_average, roster));
        root.insert(format!("Manager Running Average {l}"), by_manager(&c.manager_running_average, roster));
        root.insert(format!("Manager Sum Average {l}"), by_manager(&c.manager_sum_average, roster));
    }
    root.insert("Team Points Per Value".into(), by_team(&s.ppv.team, roster));
    root.insert("Team Average Points Per Value".into(), by_team(&s.ppv.team_average, roster));
    root.insert("Manager Points Per Value".into(), by_manager(&s.ppv.manager, roster));
    root.insert("Manager Average Points Per Value".into(), by_manager(&s.ppv.manager_average, roster));
    Value::Object(root)
}

pub fn counts_json(c: &LeagueCounts, roster: &Roster) -> Value {
    let mut root = obj();
    for pos in UsagePosition::ALL {
        let Some(p) = c.positions.get(&pos) else {
            continue;
        };
        let l = pos.label();

        let mut teams = obj();
        let mut teams_sum = obj();
        for (manager, by_team) in in_roster_order(&p.teams, roster) {
            let mut t = obj();
            let mut ts = obj();
            for (team, tally) in teams_in_roster_order(by_team, roster, manager) {
                t.insert(team.to_string(), counts(tally.counts()));
                ts.insert(team.to_string(), counts(&tally.cumulative()));
            }
            teams.insert(manager.to_string(), Value::Object(t));
            teams_sum.insert(manager.to_string(), Value::Object(ts));
        }

        let mut managers = obj();
        let mut managers_sum = obj();
        for (manager, tally) in in_roster_order(&p.managers, roster) {
            managers.insert(manager.to_string(), counts(tally.counts()));
            managers_sum.insert(manager.to_string(), counts(&tally.cumulative()));
        }

        root.insert(format!("Teams {l}"), Value::Object(teams));
        root.insert(format!("Teams Sum {l}"), Value::Object(teams_sum));
        root.insert(format!("Manager {l}"), Value::Object(managers));
        root.insert(format!("Manager Sum {l}"), Value::Object(managers_sum));
        root.insert(format!("League {l}"), league(&p.league, false));
        root.insert(format!("League Sum {l}"), league(&p.league, true));
    }
    Value::Object(root)
}

pub fn lineup_statistics_json(s: &LineupStatistics) -> Value {
    let empty = BTreeMap::new();
    let mut root = obj();
    for kind in EntityKind::ALL {
        let prefix = kind.prefix();
        let stats = s.kinds.get(&kind).unwrap_or(&empty);
        root.insert(format!("{prefix} Sum Points"), entity_block(stats, |st| &st.points.sum));
        root.insert(format!("{prefix} Average Points"), entity_block(stats, |st| &st.points.average));
        root.insert(format!("{prefix} Sum Values"), entity_block(stats, |st| &st.values.sum));
        root.insert(format!("{prefix} Average Values"), entity_block(stats, |st| &st.values.average));
        root.insert(format!("{prefix} Points Per Value"), entity_block(stats, |st| &st.ppv.per_race));
        root.insert(
            format!("{prefix} Average Points Per Value"),
            entity_block(stats, |st| &st.ppv.average),
        );
    }
    Value::Object(root)
}

/// Team → final points, in standings order.
pub fn standings_json(s: &Standings) -> Value {
    let mut o = obj();
    for row in &s.rows {
        o.insert(row.team.to_string(), Value::from(row.points));
    }
    Value::Object(o)
}

/* ----------------------------- helpers ----------------------------- */

#[inline]
fn obj() -> JsonMap<String, Value> {
    JsonMap::new()
}

fn series(xs: &[f64]) -> Value {
    Value::Array(xs.iter().map(|x| Value::from(*x)).collect())
}

fn in_roster_order<'a, V>(
    m: &'a BTreeMap<ManagerId, V>,
    roster: &'a Roster,
) -> impl Iterator<Item = (&'a ManagerId, &'a V)> {
    roster.iter().filter_map(move |(manager, _)| Some((manager, m.get(manager)?)))
}

fn teams_in_roster_order<'a, V>(
    m: &'a BTreeMap<TeamId, V>,
    roster: &'a Roster,
    manager: &ManagerId,
) -> impl Iterator<Item = (&'a TeamId, &'a V)> {
    let teams = roster.get(manager.as_str()).unwrap_or_default();
    teams.iter().filter_map(move |team| Some((team, m.get(team)?)))
}

fn by_manager(m: &BTreeMap<ManagerId, Series>, roster: &Roster) -> Value {
    Value::Object(in_roster_order(m, roster).map(|(k, v)| (k.to_string(), series(v))).collect())
}

fn by_team(m: &TeamSeries, roster: &Roster) -> Value {
    Value::Object(
        in_roster_order(m, roster)
            .map(|(manager, teams)| {
                let inner = teams_in_roster_order(teams, roster, manager)
                    .map(|(t, v)| (t.to_string(), series(v)))
                    .collect();
                (manager.to_string(), Value::Object(inner))
            })
            .collect(),
    )
}

fn entity_block(stats: &BTreeMap<EntityName, EntityStatistics>, pick: fn(&EntityStatistics) -> &Series) -> Value {
    Value::Object(stats.iter().map(|(name, st)| (name.to_string(), series(pick(st)))).collect())
}

fn counts(m: &BTreeMap<String, Vec<u32>>) -> Value {
    Value::Object(
        m.iter()
            .map(|(k, v)| (k.clone(), Value::Array(v.iter().map(|x| Value::from(*x)).collect())))
            .collect(),
    )
}

fn league(t: &UsageTally, cumulative: bool) -> Value {
    if cumulative {
        counts(&t.cumulative())
    } else {
        counts(t.counts())
    }
}
