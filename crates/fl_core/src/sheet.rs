//! Team sheets and perks.
//!
//! A team sheet is persisted as a loose JSON object (manual entry). `TeamSheet::from_wire`
//! turns it into a typed record and reports the first offending field; the scoring
//! layers only ever see the typed form.
//!
//! Wire fields: `Driver 1`..`Driver 5`, `Constructor 1`..`Constructor 2`, `DRS Boost`
//! (alias `Turbo Driver`), `Extra DRS` (alias `Mega Driver`), `Penalties`, `Perks`,
//! and for a bare `Final Fix` tag also `Replaced` / `Replaced Scores`.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::ids::EntityName;

pub const DRIVER_SLOTS: usize = 5;
pub const CONSTRUCTOR_SLOTS: usize = 2;

pub const FIELD_DRS_BOOST: &str = "DRS Boost";
pub const FIELD_EXTRA_DRS: &str = "Extra DRS";
pub const FIELD_PENALTIES: &str = "Penalties";
pub const FIELD_PERKS: &str = "Perks";
pub const FIELD_REPLACED: &str = "Replaced";
pub const FIELD_REPLACED_SCORES: &str = "Replaced Scores";

const BOOST_ALIASES: &[&str] = &[FIELD_DRS_BOOST, "Turbo Driver"];
const EXTRA_ALIASES: &[&str] = &[FIELD_EXTRA_DRS, "Mega Driver"];

/// Spellings that mean "nothing selected" for optional picks and perks.
const PLACEHOLDERS: &[&str] = &["", "None", "none", "-"];

/// Positions of a freshly created (blank) sheet.
pub const DEFAULT_POSITIONS: &[&str] = &[
    "Driver 1",
    "Driver 2",
    "Driver 3",
    "Driver 4",
    "Driver 5",
    "Constructor 1",
    "Constructor 2",
    FIELD_DRS_BOOST,
    FIELD_EXTRA_DRS,
    FIELD_PENALTIES,
    FIELD_PERKS,
];

/// Raw JSON object as stored per race in a team file.
pub type WireSheet = Map<String, Value>;

/// Perk tag without payload; also the key used when tallying perk usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PerkKind {
    None,
    Limitless,
    NoNegative,
    ExtraDrs,
    FinalFix,
}

impl PerkKind {
    pub const ALL: [PerkKind; 5] = [
        PerkKind::None,
        PerkKind::Limitless,
        PerkKind::NoNegative,
        PerkKind::ExtraDrs,
        PerkKind::FinalFix,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PerkKind::None => "None",
            PerkKind::Limitless => "Limitless",
            PerkKind::NoNegative => "No Negative",
            PerkKind::ExtraDrs => "Extra DRS",
            PerkKind::FinalFix => "Final Fix",
        }
    }

    /// Parse a wire tag. `Mega` / `Mega Driver` are older names of Extra DRS.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let t = tag.trim();
        if PLACEHOLDERS.contains(&t) {
            return Some(PerkKind::None);
        }
        match t {
            "Limitless" => Some(PerkKind::Limitless),
            "No Negative" => Some(PerkKind::NoNegative),
            "Extra DRS" | "Mega" | "Mega Driver" => Some(PerkKind::ExtraDrs),
            "Final Fix" => Some(PerkKind::FinalFix),
            _ => None,
        }
    }

    /// One-week perks: the lineup reverts afterwards, so a sheet using one is
    /// never carried forward to the next race.
    pub fn is_single_race(self) -> bool {
        matches!(self, PerkKind::Limitless | PerkKind::FinalFix)
    }
}

/// Active perk for one team in one race. At most one is ever active.
#[derive(Debug, Clone, PartialEq)]
pub enum Perk {
    None,
    Limitless,
    NoNegative,
    /// Named driver's score counts three times in total.
    ExtraDrs { driver: EntityName },
    /// Picks named in `replaced` score every value of `scores` instead of their table value.
    FinalFix {
        replaced: Vec<EntityName>,
        scores: Vec<f64>,
    },
}

impl Perk {
    pub fn kind(&self) -> PerkKind {
        match self {
            Perk::None => PerkKind::None,
            Perk::Limitless => PerkKind::Limitless,
            Perk::NoNegative => PerkKind::NoNegative,
            Perk::ExtraDrs { .. } => PerkKind::ExtraDrs,
            Perk::FinalFix { .. } => PerkKind::FinalFix,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    #[error("missing field `{0}`")]
    MissingField(String),
    #[error("field `{field}`: {reason}")]
    InvalidField { field: String, reason: String },
    #[error("unknown perk `{0}`")]
    UnknownPerk(String),
}

impl SheetError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        SheetError::InvalidField { field: field.to_string(), reason: reason.into() }
    }
}

/// Typed team sheet for one race.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamSheet {
    pub drivers: Vec<EntityName>,
    pub constructors: Vec<EntityName>,
    pub drs_boost: Option<EntityName>,
    pub extra_drs: Option<EntityName>,
    pub penalties: i64,
    pub perk: Perk,
}

impl TeamSheet {
    pub fn from_wire(wire: &WireSheet) -> Result<Self, SheetError> {
        let drivers = (1..=DRIVER_SLOTS)
            .map(|i| required_pick(wire, &format!("Driver {i}")))
            .collect::<Result<Vec<_>, _>>()?;
        let constructors = (1..=CONSTRUCTOR_SLOTS)
            .map(|i| required_pick(wire, &format!("Constructor {i}")))
            .collect::<Result<Vec<_>, _>>()?;
        let drs_boost = optional_pick(wire, BOOST_ALIASES)?;
        let extra_drs = optional_pick(wire, EXTRA_ALIASES)?;
        let penalties = penalties(wire)?;
        let perk = perk(wire, extra_drs.as_ref())?;

        Ok(TeamSheet { drivers, constructors, drs_boost, extra_drs, penalties, perk })
    }

    /// Canonical wire form (array perk payloads, current field names).
    pub fn to_wire(&self) -> WireSheet {
        let mut m = Map::new();
        for (i, d) in self.drivers.iter().enumerate() {
            m.insert(format!("Driver {}", i + 1), Value::from(d.as_str()));
        }
        for (i, c) in self.constructors.iter().enumerate() {
            m.insert(format!("Constructor {}", i + 1), Value::from(c.as_str()));
        }
        let pick = |p: &Option<EntityName>| p.as_ref().map_or(Value::from("None"), |n| Value::from(n.as_str()));
        m.insert(FIELD_DRS_BOOST.into(), pick(&self.drs_boost));
        m.insert(FIELD_EXTRA_DRS.into(), pick(&self.extra_drs));
        m.insert(FIELD_PENALTIES.into(), Value::from(self.penalties));
        let perks = match &self.perk {
            Perk::None => Value::from("None"),
            Perk::Limitless | Perk::NoNegative => Value::from(self.perk.kind().label()),
            Perk::ExtraDrs { driver } => {
                Value::Array(vec![PerkKind::ExtraDrs.label().into(), driver.as_str().into()])
            }
            Perk::FinalFix { replaced, scores } => {
                m.insert(
                    FIELD_REPLACED.into(),
                    Value::Array(replaced.iter().map(|n| Value::from(n.as_str())).collect()),
                );
                m.insert(
                    FIELD_REPLACED_SCORES.into(),
                    Value::Array(scores.iter().map(|s| Value::from(*s)).collect()),
                );
                Value::from(PerkKind::FinalFix.label())
            }
        };
        m.insert(FIELD_PERKS.into(), perks);
        m
    }

    /// A blank sheet: every position present with an empty value.
    pub fn blank_wire(positions: &[String]) -> WireSheet {
        positions
            .iter()
            .map(|p| (p.clone(), Value::from("")))
            .collect()
    }

    /// Perk tag of a wire sheet without full parsing (used when carrying sheets forward).
    pub fn wire_perk_kind(wire: &WireSheet) -> Option<PerkKind> {
        match wire.get(FIELD_PERKS)? {
            Value::Null => Some(PerkKind::None),
            Value::String(s) => PerkKind::from_tag(s),
            Value::Array(items) => match items.first() {
                None => Some(PerkKind::None),
                Some(Value::String(s)) => PerkKind::from_tag(s),
                Some(_) => None,
            },
            _ => None,
        }
    }
}

/* ------------------------------- field parsers ------------------------------- */

fn is_placeholder(s: &str) -> bool {
    PLACEHOLDERS.contains(&s.trim())
}

fn parse_name(field: &str, s: &str) -> Result<EntityName, SheetError> {
    s.trim()
        .parse()
        .map_err(|e: crate::errors::CoreError| SheetError::invalid(field, e.to_string()))
}

fn required_pick(wire: &WireSheet, field: &str) -> Result<EntityName, SheetError> {
    match wire.get(field) {
        None => Err(SheetError::MissingField(field.to_string())),
        Some(Value::String(s)) if !is_placeholder(s) => parse_name(field, s),
        Some(Value::String(_)) | Some(Value::Null) => Err(SheetError::invalid(field, "no pick entered")),
        Some(other) => Err(SheetError::invalid(field, format!("expected a name, got {other}"))),
    }
}

/// First present alias wins; the field itself must exist, its value may be a placeholder.
fn optional_pick(wire: &WireSheet, aliases: &[&str]) -> Result<Option<EntityName>, SheetError> {
    let Some((field, value)) = aliases.iter().find_map(|k| wire.get(*k).map(|v| (*k, v))) else {
        return Err(SheetError::MissingField(aliases[0].to_string()));
    };
    match value {
        Value::Null => Ok(None),
        Value::String(s) if is_placeholder(s) => Ok(None),
        Value::String(s) => parse_name(field, s).map(Some),
        other => Err(SheetError::invalid(field, format!("expected a name, got {other}"))),
    }
}

fn penalties(wire: &WireSheet) -> Result<i64, SheetError> {
    let v = wire
        .get(FIELD_PENALTIES)
        .ok_or_else(|| SheetError::MissingField(FIELD_PENALTIES.to_string()))?;
    match v {
        Value::Null => Ok(0),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        _ => score_value(v)
            .filter(|x| x.fract() == 0.0)
            .map(|x| x as i64)
            .ok_or_else(|| SheetError::invalid(FIELD_PENALTIES, format!("expected an integer, got {v}"))),
    }
}

/// Numbers, or strings holding a number (manual entry).
fn score_value(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|x| x.is_finite()),
        _ => None,
    }
}

fn perk(wire: &WireSheet, extra_pick: Option<&EntityName>) -> Result<Perk, SheetError> {
    let v = wire
        .get(FIELD_PERKS)
        .ok_or_else(|| SheetError::MissingField(FIELD_PERKS.to_string()))?;

    let (tag, payload): (&str, &[Value]) = match v {
        Value::Null => return Ok(Perk::None),
        Value::String(s) => (s.as_str(), &[]),
        Value::Array(items) => match items.split_first() {
            None => return Ok(Perk::None),
            Some((Value::String(s), rest)) => (s.as_str(), rest),
            Some((other, _)) => {
                return Err(SheetError::invalid(FIELD_PERKS, format!("perk tag must be a string, got {other}")))
            }
        },
        other => return Err(SheetError::invalid(FIELD_PERKS, format!("unexpected value {other}"))),
    };

    let kind = PerkKind::from_tag(tag).ok_or_else(|| SheetError::UnknownPerk(tag.to_string()))?;
    match kind {
        PerkKind::None => Ok(Perk::None),
        PerkKind::Limitless => Ok(Perk::Limitless),
        PerkKind::NoNegative => Ok(Perk::NoNegative),
        PerkKind::ExtraDrs => {
            let driver = match payload.first() {
                Some(Value::String(s)) if !is_placeholder(s) => parse_name(FIELD_PERKS, s)?,
                _ => extra_pick
                    .cloned()
                    .ok_or_else(|| SheetError::invalid(FIELD_PERKS, "Extra DRS perk names no driver"))?,
            };
            Ok(Perk::ExtraDrs { driver })
        }
        PerkKind::FinalFix => final_fix(wire, payload),
    }
}

/// `["Final Fix", name1, score1, name2, score2]`, or the bare tag with
/// `Replaced` / `Replaced Scores` fields.
fn final_fix(wire: &WireSheet, payload: &[Value]) -> Result<Perk, SheetError> {
    let (replaced, scores) = if payload.is_empty() {
        let names = match wire.get(FIELD_REPLACED) {
            None => return Err(SheetError::MissingField(FIELD_REPLACED.to_string())),
            Some(Value::String(s)) => vec![parse_name(FIELD_REPLACED, s)?],
            Some(Value::Array(xs)) => xs
                .iter()
                .map(|x| match x {
                    Value::String(s) => parse_name(FIELD_REPLACED, s),
                    other => Err(SheetError::invalid(FIELD_REPLACED, format!("expected a name, got {other}"))),
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(SheetError::invalid(FIELD_REPLACED, format!("unexpected value {other}")))
            }
        };
        let scores = match wire.get(FIELD_REPLACED_SCORES) {
            None => return Err(SheetError::MissingField(FIELD_REPLACED_SCORES.to_string())),
            Some(Value::Array(xs)) => xs
                .iter()
                .map(|x| {
                    score_value(x).ok_or_else(|| {
                        SheetError::invalid(FIELD_REPLACED_SCORES, format!("expected a number, got {x}"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(x) => vec![score_value(x).ok_or_else(|| {
                SheetError::invalid(FIELD_REPLACED_SCORES, format!("expected a number, got {x}"))
            })?],
        };
        (names, scores)
    } else {
        if payload.len() % 2 != 0 {
            return Err(SheetError::invalid(FIELD_PERKS, "Final Fix payload must be name/score pairs"));
        }
        let mut names = Vec::new();
        let mut scores = Vec::new();
        for pair in payload.chunks(2) {
            match (&pair[0], score_value(&pair[1])) {
                (Value::String(n), Some(s)) => {
                    names.push(parse_name(FIELD_PERKS, n)?);
                    scores.push(s);
                }
                _ => return Err(SheetError::invalid(FIELD_PERKS, "Final Fix payload must be name/score pairs")),
            }
        }
        (names, scores)
    };

    if !(1..=2).contains(&replaced.len()) {
        return Err(SheetError::invalid(FIELD_REPLACED, "Final Fix replaces one or two picks"));
    }
    if scores.is_empty() {
        return Err(SheetError::invalid(FIELD_REPLACED_SCORES, "no replacement scores"));
    }
    Ok(Perk::FinalFix { replaced, scores })
}
