//! Pick-frequency tallies.
//!
//! A tally holds one dense count array per label, pre-sized to the number of
//! completed races. A label first seen at race `k` already has explicit zeros
//! for races `0..k`.

use std::collections::BTreeMap;

use fl_core::{Perk, TeamSheet};

/// Sheet positions whose picks are tallied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UsagePosition {
    Driver,
    Constructor,
    DrsBoost,
    ExtraDrs,
    Perk,
}

impl UsagePosition {
    pub const ALL: [UsagePosition; 5] = [
        UsagePosition::Driver,
        UsagePosition::Constructor,
        UsagePosition::DrsBoost,
        UsagePosition::ExtraDrs,
        UsagePosition::Perk,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UsagePosition::Driver => "Driver",
            UsagePosition::Constructor => "Constructor",
            UsagePosition::DrsBoost => "DRS Boost",
            UsagePosition::ExtraDrs => "Extra DRS",
            UsagePosition::Perk => "Perks",
        }
    }

    /// Labels this sheet contributes at this position. Perks always contribute
    /// (`None` included); an empty boost or extra pick contributes nothing.
    pub fn picks(self, sheet: &TeamSheet) -> Vec<&str> {
        match self {
            UsagePosition::Driver => sheet.drivers.iter().map(|d| d.as_str()).collect(),
            UsagePosition::Constructor => sheet.constructors.iter().map(|c| c.as_str()).collect(),
            UsagePosition::DrsBoost => sheet.drs_boost.iter().map(|d| d.as_str()).collect(),
            UsagePosition::ExtraDrs => match (&sheet.extra_drs, &sheet.perk) {
                (Some(d), _) => vec![d.as_str()],
                (None, Perk::ExtraDrs { driver }) => vec![driver.as_str()],
                (None, _) => Vec::new(),
            },
            UsagePosition::Perk => vec![sheet.perk.kind().label()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageTally {
    races: usize,
    counts: BTreeMap<String, Vec<u32>>,
}

impl UsageTally {
    pub fn new(races: usize) -> Self {
        UsageTally { races, counts: BTreeMap::new() }
    }

    /// Tally one position over a team's sheets, one sheet per completed race.
    pub fn for_team(sheets: &[TeamSheet], position: UsagePosition) -> Self {
        let mut t = UsageTally::new(sheets.len());
        for (race, sheet) in sheets.iter().enumerate() {
            for label in position.picks(sheet) {
                t.record(race, label);
            }
        }
        t
    }

    pub fn races(&self) -> usize {
        self.races
    }

    /// Count one use of `label` at `race`. Races past the tally length are ignored.
    pub fn record(&mut self, race: usize, label: &str) {
        if race >= self.races {
            tracing::warn!(race, races = self.races, label, "usage outside tally range ignored");
            return;
        }
        let races = self.races;
        let row = self
            .counts
            .entry(label.to_string())
            .or_insert_with(|| vec![0; races]);
        row[race] += 1;
    }

    /// Add another tally race-by-race; the result spans the longer of the two.
    pub fn merge(&mut self, other: &UsageTally) {
        if other.races > self.races {
            self.races = other.races;
            for row in self.counts.values_mut() {
                row.resize(other.races, 0);
            }
        }
        let races = self.races;
        for (label, theirs) in &other.counts {
            let row = self
                .counts
                .entry(label.clone())
                .or_insert_with(|| vec![0; races]);
            for (o, x) in row.iter_mut().zip(theirs) {
                *o += x;
            }
        }
    }

    pub fn counts(&self) -> &BTreeMap<String, Vec<u32>> {
        &self.counts
    }

    pub fn get(&self, label: &str) -> Option<&[u32]> {
        self.counts.get(label).map(Vec::as_slice)
    }

    /// Running totals per label.
    pub fn cumulative(&self) -> BTreeMap<String, Vec<u32>> {
        self.counts
            .iter()
            .map(|(k, row)| {
                let run = row
                    .iter()
                    .scan(0u32, |acc, x| {
                        *acc += x;
                        Some(*acc)
                    })
                    .collect();
                (k.clone(), run)
            })
            .collect()
    }
}
