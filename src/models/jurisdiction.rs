//! Jurisdiction codes used in the AUTHORITY column.

use std::str::FromStr;

use crate::error::PlacenamesError;

/// A naming jurisdiction contributing to the composite gazetteer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Jurisdiction {
    /// Australian Antarctic Division
    Aad,
    /// Australian Capital Territory
    Act,
    /// Australian Hydrographic Office
    Aho,
    /// New South Wales
    Nsw,
    /// Northern Territory
    Nt,
    /// Queensland
    Qld,
    /// South Australia
    Sa,
    /// Tasmania
    Tas,
    /// Victoria
    Vic,
    /// Western Australia
    Wa,
}

impl Jurisdiction {
    /// All jurisdictions in code order
    pub fn all() -> &'static [Jurisdiction] {
        &[
            Jurisdiction::Aad,
            Jurisdiction::Act,
            Jurisdiction::Aho,
            Jurisdiction::Nsw,
            Jurisdiction::Nt,
            Jurisdiction::Qld,
            Jurisdiction::Sa,
            Jurisdiction::Tas,
            Jurisdiction::Vic,
            Jurisdiction::Wa,
        ]
    }

    /// The code as stored in the AUTHORITY column
    pub fn code(&self) -> &'static str {
        match self {
            Jurisdiction::Aad => "AAD",
            Jurisdiction::Act => "ACT",
            Jurisdiction::Aho => "AHO",
            Jurisdiction::Nsw => "NSW",
            Jurisdiction::Nt => "NT",
            Jurisdiction::Qld => "QLD",
            Jurisdiction::Sa => "SA",
            Jurisdiction::Tas => "TAS",
            Jurisdiction::Vic => "VIC",
            Jurisdiction::Wa => "WA",
        }
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Jurisdiction {
    type Err = PlacenamesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Jurisdiction::all()
            .iter()
            .copied()
            .find(|j| j.code() == s.trim())
            .ok_or_else(|| PlacenamesError::Configuration(format!("unknown authority code '{}'", s)))
    }
}
