//! LINEUP stage: statistics of every driver and constructor in the result tables.

use std::collections::BTreeMap;

use fl_algo::{aggregate, points_per_value, Cumulative, PointsPerValue};
use fl_core::{CoreError, EntityKind, EntityName, ResultTables};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityStatistics {
    pub points: Cumulative,
    pub values: Cumulative,
    pub ppv: PointsPerValue,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineupStatistics {
    pub kinds: BTreeMap<EntityKind, BTreeMap<EntityName, EntityStatistics>>,
}

pub fn lineup_statistics(tables: &ResultTables) -> Result<LineupStatistics, CoreError> {
    let mut kinds = BTreeMap::new();
    for kind in EntityKind::ALL {
        let stats: BTreeMap<EntityName, EntityStatistics> = tables
            .paired(kind)?
            .into_iter()
            .map(|(name, p, v)| {
                let s = EntityStatistics {
                    points: aggregate(p),
                    values: aggregate(v),
                    ppv: points_per_value(p, v),
                };
                (name.clone(), s)
            })
            .collect();
        kinds.insert(kind, stats);
    }
    Ok(LineupStatistics { kinds })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn driver_and_constructor_statistics() {
        let tables: ResultTables = serde_json::from_value(json!({
            "Driver Points": { "Norris": [10, 0, 20] },
            "Driver Values": { "Norris": [20.0, 20.0, 20.0] },
            "Team Points": { "McLaren": [30, 10, 0] },
            "Team Values": { "McLaren": [25.0, 0.0, 25.0] }
        }))
        .unwrap();
        let s = lineup_statistics(&tables).unwrap();

        let norris = &s.kinds[&EntityKind::Driver]["Norris"];
        assert_eq!(norris.points.sum, vec![10.0, 10.0, 30.0]);
        assert_eq!(norris.points.average, vec![10.0, 5.0, 10.0]);
        assert_eq!(norris.ppv.per_race, vec![0.5, 0.0, 1.0]);
        assert_eq!(norris.ppv.average, vec![0.5, 0.5, 0.75]);

        let mclaren = &s.kinds[&EntityKind::Constructor]["McLaren"];
        assert_eq!(mclaren.ppv.per_race, vec![1.2, 0.0, 0.0]);
        assert_eq!(mclaren.values.sum, vec![25.0, 25.0, 50.0]);
    }

    #[test]
    fn driver_missing_from_values_fails() {
        let tables: ResultTables = serde_json::from_value(json!({
            "Driver Points": { "Norris": [10, 0, 20], "Piastri": [8, 4, 2] },
            "Driver Values": { "Piastri": [29.0, 29.0, 29.1] },
            "Team Points": {},
            "Team Values": {}
        }))
        .unwrap();
        assert!(matches!(
            lineup_statistics(&tables),
            Err(CoreError::UnmatchedEntity { ref entity, .. }) if entity == "Norris"
        ));
    }
}
