//! Base result tables: per-race points and values for every driver and constructor.
//!
//! Wire form (`Lineup/Results.json`):
//! `{ "Driver Points": {name: [..]}, "Driver Values": {..}, "Team Points": {..}, "Team Values": {..} }`.
//! Every series in every table has one entry per completed race.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::ids::EntityName;

/// Per-entity series, one number per completed race.
pub type ScoreTable = BTreeMap<EntityName, Vec<f64>>;

/// Scoring category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Points,
    Values,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Points, Category::Values];

    pub fn label(self) -> &'static str {
        match self {
            Category::Points => "Points",
            Category::Values => "Values",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    Driver,
    Constructor,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Driver, EntityKind::Constructor];

    /// Prefix used in table names (`Team` for constructors).
    pub fn prefix(self) -> &'static str {
        match self {
            EntityKind::Driver => "Driver",
            EntityKind::Constructor => "Team",
        }
    }

    pub fn table_name(self, cat: Category) -> &'static str {
        match (self, cat) {
            (EntityKind::Driver, Category::Points) => "Driver Points",
            (EntityKind::Driver, Category::Values) => "Driver Values",
            (EntityKind::Constructor, Category::Points) => "Team Points",
            (EntityKind::Constructor, Category::Values) => "Team Values",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTables {
    #[serde(rename = "Driver Points")]
    pub driver_points: ScoreTable,
    #[serde(rename = "Driver Values")]
    pub driver_values: ScoreTable,
    #[serde(rename = "Team Points")]
    pub constructor_points: ScoreTable,
    #[serde(rename = "Team Values")]
    pub constructor_values: ScoreTable,
}

impl ResultTables {
    pub fn table(&self, kind: EntityKind, cat: Category) -> &ScoreTable {
        match (kind, cat) {
            (EntityKind::Driver, Category::Points) => &self.driver_points,
            (EntityKind::Driver, Category::Values) => &self.driver_values,
            (EntityKind::Constructor, Category::Points) => &self.constructor_points,
            (EntityKind::Constructor, Category::Values) => &self.constructor_values,
        }
    }

    /// Points and Values series of every entity of `kind`, by name.
    /// Both tables must list the same entities.
    pub fn paired(&self, kind: EntityKind) -> Result<Vec<(&EntityName, &[f64], &[f64])>, CoreError> {
        let points = self.table(kind, Category::Points);
        let values = self.table(kind, Category::Values);
        let unmatched = |entity: &EntityName, present: Category, missing: Category| CoreError::UnmatchedEntity {
            entity: entity.to_string(),
            present: kind.table_name(present),
            missing: kind.table_name(missing),
        };
        if let Some(extra) = values.keys().find(|name| !points.contains_key(*name)) {
            return Err(unmatched(extra, Category::Values, Category::Points));
        }
        points
            .iter()
            .map(|(name, p)| match values.get(name) {
                Some(v) => Ok((name, p.as_slice(), v.as_slice())),
                None => Err(unmatched(name, Category::Points, Category::Values)),
            })
            .collect()
    }

    /// Number of completed races. Points and Values tables must name the same
    /// entities and all series of all tables must agree in length; an
    /// entirely empty set of tables means no race has been run.
    pub fn completed_races(&self) -> Result<usize, CoreError> {
        for kind in EntityKind::ALL {
            self.paired(kind)?;
        }
        let mut expected: Option<usize> = None;
        for kind in EntityKind::ALL {
            for cat in Category::ALL {
                let name = kind.table_name(cat);
                for (entity, series) in self.table(kind, cat) {
                    match expected {
                        None => expected = Some(series.len()),
                        Some(n) if n != series.len() => {
                            return Err(CoreError::RaggedTable {
                                table: name,
                                entity: entity.to_string(),
                                len: series.len(),
                                expected: n,
                            })
                        }
                        Some(_) => {}
                    }
                }
            }
        }
        Ok(expected.unwrap_or(0))
    }
}
