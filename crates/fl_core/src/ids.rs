//! Name newtypes for managers, teams, races and result-table entities.
//!
//! Names are free text (spaces allowed, e.g. "Red Bull") but must be non-empty,
//! carry no surrounding whitespace and contain no control characters.
//! Manager and team names also name files under the season directory, so they
//! must be a single path segment.
//! All types borrow as `str`, so maps keyed by them can be probed with `&str`.

use core::borrow::Borrow;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::CoreError;

const MAX_NAME_LEN: usize = 128;

fn is_name(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= MAX_NAME_LEN
        && s.trim().len() == s.len()
        && !s.chars().any(char::is_control)
}

fn is_path_segment(s: &str) -> bool {
    is_name(s) && !s.contains(['/', '\\']) && s != "." && s != ".."
}

macro_rules! def_name {
    ($(#[$meta:meta])* $name:ident, $valid:path) => {
        $(#[$meta])*
        #[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str { &self.0 }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
        }

        impl FromStr for $name {
            type Err = CoreError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if $valid(s) { Ok(Self(s.to_string())) } else { Err(CoreError::InvalidName(s.to_string())) }
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str { &self.0 }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str { &self.0 }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                let s = String::deserialize(d)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

def_name!(
    /// League manager (owner of one or more teams).
    ManagerId,
    is_path_segment
);
def_name!(
    /// Fantasy team name; unique across the whole league.
    TeamId,
    is_path_segment
);
def_name!(
    /// Race name as listed in the season calendar.
    RaceName,
    is_name
);
def_name!(
    /// Driver or constructor name as used in the result tables.
    EntityName,
    is_name
);
