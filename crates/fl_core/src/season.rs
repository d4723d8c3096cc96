//! Season info: race calendar, manager rosters and team-sheet positions.
//!
//! Mirrors one year entry of `Info.json`:
//! `{ "Races": [..], "Managers": { manager: [teams] }, "Team": [positions] }`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CoreError;
use crate::ids::{ManagerId, RaceName, TeamId};
use crate::sheet::DEFAULT_POSITIONS;

/// Managers and their teams, in `Info.json` order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster(Vec<(ManagerId, Vec<TeamId>)>);

impl Roster {
    pub fn iter(&self) -> impl Iterator<Item = (&ManagerId, &[TeamId])> {
        self.0.iter().map(|(m, ts)| (m, ts.as_slice()))
    }

    pub fn get(&self, manager: &str) -> Option<&[TeamId]> {
        self.0
            .iter()
            .find(|(m, _)| m.as_str() == manager)
            .map(|(_, ts)| ts.as_slice())
    }

    pub fn contains(&self, manager: &str) -> bool {
        self.get(manager).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ManagerId, Vec<TeamId>)> for Roster {
    fn from_iter<I: IntoIterator<Item = (ManagerId, Vec<TeamId>)>>(iter: I) -> Self {
        Roster(iter.into_iter().collect())
    }
}

impl Serialize for Roster {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_map(self.0.iter().map(|(m, ts)| (m, ts)))
    }
}

impl<'de> Deserialize<'de> for Roster {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct RosterVisitor;

        impl<'de> Visitor<'de> for RosterVisitor {
            type Value = Roster;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of manager names to team names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Roster, A::Error> {
                let mut out: Vec<(ManagerId, Vec<TeamId>)> = Vec::new();
                while let Some((manager, teams)) = map.next_entry::<ManagerId, Vec<TeamId>>()? {
                    if out.iter().any(|(m, _)| *m == manager) {
                        return Err(de::Error::custom(format!("manager `{manager}` is listed more than once")));
                    }
                    out.push((manager, teams));
                }
                Ok(Roster(out))
            }
        }

        d.deserialize_map(RosterVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonInfo {
    #[serde(rename = "Races")]
    pub races: Vec<RaceName>,
    #[serde(rename = "Managers")]
    pub managers: Roster,
    /// Team-sheet positions used when a blank sheet is created.
    #[serde(rename = "Team", default, skip_serializing_if = "Vec::is_empty")]
    pub team_positions: Vec<String>,
}

impl SeasonInfo {
    /// Structural checks: unique races, non-empty rosters, team names unique league-wide.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut seen_races = BTreeSet::new();
        for r in &self.races {
            if !seen_races.insert(r.as_str()) {
                return Err(CoreError::DuplicateRace(r.to_string()));
            }
        }

        let mut owner: BTreeMap<&str, &ManagerId> = BTreeMap::new();
        for (manager, teams) in self.managers.iter() {
            if teams.is_empty() {
                return Err(CoreError::EmptyRoster(manager.to_string()));
            }
            for team in teams {
                if let Some(first) = owner.insert(team.as_str(), manager) {
                    return Err(CoreError::DuplicateTeam {
                        team: team.to_string(),
                        first: first.to_string(),
                        second: manager.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The first `completed` races of the calendar.
    pub fn completed_races(&self, completed: usize) -> Result<&[RaceName], CoreError> {
        self.races.get(..completed).ok_or(CoreError::SeasonOverrun {
            completed,
            scheduled: self.races.len(),
        })
    }

    pub fn race_index(&self, race: &str) -> Option<usize> {
        self.races.iter().position(|r| r.as_str() == race)
    }

    /// All (manager, team) pairs in roster order.
    pub fn teams(&self) -> impl Iterator<Item = (&ManagerId, &TeamId)> {
        self.managers
            .iter()
            .flat_map(|(m, ts)| ts.iter().map(move |t| (m, t)))
    }

    pub fn team_count(&self, manager: &str) -> usize {
        self.managers.get(manager).map_or(0, <[TeamId]>::len)
    }

    /// Sheet positions for blank sheets; falls back to the standard layout.
    pub fn sheet_positions(&self) -> Vec<String> {
        if self.team_positions.is_empty() {
            DEFAULT_POSITIONS.iter().map(|s| s.to_string()).collect()
        } else {
            self.team_positions.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn info(v: serde_json::Value) -> SeasonInfo {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn parses_info_entry() {
        let s = info(json!({
            "Races": ["Bahrain", "Jeddah"],
            "Managers": { "Ann": ["Ann GP", "Ann Two"], "Ben": ["Ben Racing"] }
        }));
        s.validate().unwrap();
        assert_eq!(s.teams().count(), 3);
        assert_eq!(s.team_count("Ann"), 2);
        assert_eq!(s.sheet_positions().len(), DEFAULT_POSITIONS.len());
        assert_eq!(s.race_index("Jeddah"), Some(1));
    }

    #[test]
    fn roster_keeps_info_order() {
        let s = info(json!({
            "Races": ["Bahrain"],
            "Managers": { "Zoe": ["Zoe B", "Zoe A"], "Ann": ["Ann GP"] }
        }));
        let pairs: Vec<_> = s.teams().map(|(m, t)| format!("{m}/{t}")).collect();
        assert_eq!(pairs, vec!["Zoe/Zoe B", "Zoe/Zoe A", "Ann/Ann GP"]);
        let back = serde_json::to_value(&s).unwrap();
        let managers: Vec<_> = back["Managers"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(managers, vec!["Zoe", "Ann"]);
    }

    #[test]
    fn duplicate_team_across_managers_rejected() {
        let s = info(json!({
            "Races": ["Bahrain"],
            "Managers": { "Ann": ["Shared"], "Ben": ["Shared"] }
        }));
        assert!(matches!(s.validate(), Err(CoreError::DuplicateTeam { .. })));
    }

    #[test]
    fn completed_beyond_calendar_is_an_error() {
        let s = info(json!({ "Races": ["Bahrain"], "Managers": { "Ann": ["A"] } }));
        assert_eq!(s.completed_races(1).unwrap().len(), 1);
        assert_eq!(
            s.completed_races(2),
            Err(CoreError::SeasonOverrun { completed: 2, scheduled: 1 })
        );
    }
}
