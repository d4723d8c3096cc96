//! Perk resolver: one team sheet, one race, one category → one score.
//!
//! Every perk is expressed as a `ScoringPolicy` and scored by a single
//! summation routine:
//! - `Values` is always drivers + constructors (no boost, no penalties),
//!   except `Limitless` which is a fixed 100.00.
//! - `Points` adds the DRS boost pick (once, undoubled) and penalties, then
//!   applies the perk: drop non-positive terms (`No Negative`), add twice the
//!   named driver (`Extra DRS`), or substitute replaced picks (`Final Fix`).
//!
//! A pick missing from its result table is fatal; the error names the
//! entity, the table and the race index.

use std::collections::BTreeMap;

use thiserror::Error;

use fl_core::{Category, EntityKind, EntityName, Perk, ResultTables, ScoreTable, TeamSheet};

/// Fixed team value reported for a `Limitless` race.
pub const LIMITLESS_VALUE: f64 = 100.00;

/// Extra copies of the `Extra DRS` driver on top of its normal contribution.
pub const EXTRA_DRS_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("`{entity}` not found in {table}")]
    MissingEntity {
        entity: String,
        table: &'static str,
        race_index: usize,
    },
    #[error("`{entity}` in {table} has no result for race index {race_index}")]
    MissingRace {
        entity: String,
        table: &'static str,
        race_index: usize,
    },
}

impl ScoreError {
    pub fn entity(&self) -> &str {
        match self {
            ScoreError::MissingEntity { entity, .. } | ScoreError::MissingRace { entity, .. } => entity,
        }
    }
}

/// How a perk changes the summation for one category.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoringPolicy<'a> {
    /// Score is this literal; picks are not looked up.
    pub fixed_total: Option<f64>,
    pub include_boost: bool,
    pub include_penalties: bool,
    /// Keep only strictly positive pick terms.
    pub drop_negative: bool,
    /// Driver whose score is added `multiplier` more times.
    pub bonus: Option<(&'a EntityName, f64)>,
    /// Picks scored from these literals instead of the tables.
    pub substitutions: BTreeMap<&'a str, &'a [f64]>,
}

impl<'a> ScoringPolicy<'a> {
    pub fn for_perk(perk: &'a Perk, category: Category) -> Self {
        let base = match category {
            Category::Points => ScoringPolicy {
                include_boost: true,
                include_penalties: true,
                ..ScoringPolicy::default()
            },
            Category::Values => ScoringPolicy::default(),
        };
        match (perk, category) {
            (Perk::None, _) | (Perk::Limitless, Category::Points) => base,
            (Perk::Limitless, Category::Values) => ScoringPolicy {
                fixed_total: Some(LIMITLESS_VALUE),
                ..base
            },
            (Perk::NoNegative, Category::Points) => ScoringPolicy { drop_negative: true, ..base },
            (Perk::ExtraDrs { driver }, Category::Points) => ScoringPolicy {
                bonus: Some((driver, EXTRA_DRS_MULTIPLIER)),
                ..base
            },
            (Perk::FinalFix { replaced, scores }, Category::Points) => ScoringPolicy {
                substitutions: replaced.iter().map(|n| (n.as_str(), scores.as_slice())).collect(),
                ..base
            },
            (Perk::NoNegative | Perk::ExtraDrs { .. } | Perk::FinalFix { .. }, Category::Values) => base,
        }
    }
}

fn lookup(
    table: &ScoreTable,
    table_name: &'static str,
    name: &EntityName,
    race_index: usize,
) -> Result<f64, ScoreError> {
    let series = table.get(name.as_str()).ok_or_else(|| ScoreError::MissingEntity {
        entity: name.to_string(),
        table: table_name,
        race_index,
    })?;
    series.get(race_index).copied().ok_or_else(|| ScoreError::MissingRace {
        entity: name.to_string(),
        table: table_name,
        race_index,
    })
}

/// Score one sheet for one race.
pub fn resolve_score(
    sheet: &TeamSheet,
    category: Category,
    tables: &ResultTables,
    race_index: usize,
) -> Result<f64, ScoreError> {
    let policy = ScoringPolicy::for_perk(&sheet.perk, category);
    score_with_policy(&policy, sheet, category, tables, race_index)
}

pub fn score_with_policy(
    policy: &ScoringPolicy<'_>,
    sheet: &TeamSheet,
    category: Category,
    tables: &ResultTables,
    race_index: usize,
) -> Result<f64, ScoreError> {
    if let Some(total) = policy.fixed_total {
        return Ok(total);
    }

    let drivers = tables.table(EntityKind::Driver, category);
    let constructors = tables.table(EntityKind::Constructor, category);
    let d_name = EntityKind::Driver.table_name(category);
    let c_name = EntityKind::Constructor.table_name(category);

    let mut terms: Vec<f64> = Vec::with_capacity(sheet.drivers.len() + sheet.constructors.len() + 2);
    let mut push_pick = |table: &ScoreTable, table_name: &'static str, name: &EntityName| {
        match policy.substitutions.get(name.as_str()) {
            Some(scores) => {
                terms.extend_from_slice(scores);
                Ok(())
            }
            None => lookup(table, table_name, name, race_index).map(|s| terms.push(s)),
        }
    };

    for name in &sheet.drivers {
        push_pick(drivers, d_name, name)?;
    }
    for name in &sheet.constructors {
        push_pick(constructors, c_name, name)?;
    }
    if policy.include_boost {
        if let Some(name) = &sheet.drs_boost {
            push_pick(drivers, d_name, name)?;
        }
    }

    let mut total: f64 = if policy.drop_negative {
        terms.iter().filter(|x| **x > 0.0).sum()
    } else {
        terms.iter().sum()
    };

    if let Some((name, multiplier)) = policy.bonus {
        total += lookup(drivers, d_name, name, race_index)? * multiplier;
    }
    if policy.include_penalties {
        total += sheet.penalties as f64;
    }
    Ok(total)
}
