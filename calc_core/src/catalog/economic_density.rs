//! Economic Current Density Table
//!
//! Current densities (A/mm²) that balance conductor cost against resistive
//! losses, keyed by conductor and insulation and split into three bands of
//! annual utilization time.
//!
//! ## Band Selection
//!
//! | Utilization time (h/yr) | Band key         |
//! |-------------------------|------------------|
//! | 1000 ≤ t ≤ 3000         | `1000_to_3000`   |
//! | 3000 < t ≤ 5000         | `3000_to_5000`   |
//! | anything else           | `5000_plus`      |
//!
//! Times below 1000 h land in the `5000_plus` band. An entry that does not
//! list the selected band yields a density of 0.0.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Utilization-time band of the density table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeBand {
    /// 1000 to 3000 hours per year, both ends inclusive
    #[serde(rename = "1000_to_3000")]
    From1000To3000,
    /// Above 3000 up to 5000 hours per year
    #[serde(rename = "3000_to_5000")]
    From3000To5000,
    /// Above 5000 hours per year, and everything outside the other bands
    #[serde(rename = "5000_plus")]
    Over5000,
}

impl TimeBand {
    /// Pick the band for a utilization time in hours per year
    pub fn for_hours(hours: f64) -> Self {
        if (1000.0..=3000.0).contains(&hours) {
            TimeBand::From1000To3000
        } else if hours > 3000.0 && hours <= 5000.0 {
            TimeBand::From3000To5000
        } else {
            TimeBand::Over5000
        }
    }

    /// Key used in the catalog's coefficient map
    pub fn key(&self) -> &'static str {
        match self {
            TimeBand::From1000To3000 => "1000_to_3000",
            TimeBand::From3000To5000 => "3000_to_5000",
            TimeBand::Over5000 => "5000_plus",
        }
    }
}

impl std::fmt::Display for TimeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Density coefficients for one conductor/insulation pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicDensityEntry {
    pub conductor: String,
    pub insulation: String,
    /// Band key → density (A/mm²)
    pub coefficients: BTreeMap<String, f64>,
}

impl EconomicDensityEntry {
    /// True when conductor and insulation match, ignoring case (Unicode-aware)
    pub fn matches(&self, conductor: &str, insulation: &str) -> bool {
        self.conductor.to_lowercase() == conductor.to_lowercase()
            && self.insulation.to_lowercase() == insulation.to_lowercase()
    }

    /// Density for a band. A band the entry does not list reads as 0.0.
    pub fn coefficient(&self, band: TimeBand) -> f64 {
        self.coefficients.get(band.key()).copied().unwrap_or(0.0)
    }
}

/// Density entries in catalog file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EconomicDensityTable {
    entries: Vec<EconomicDensityEntry>,
}

impl EconomicDensityTable {
    pub fn new(entries: Vec<EconomicDensityEntry>) -> Self {
        EconomicDensityTable { entries }
    }

    /// Parse a table from its JSON text
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn entries(&self) -> &[EconomicDensityEntry] {
        &self.entries
    }

    /// First entry matching conductor and insulation (case-insensitive)
    pub fn entry_for(&self, conductor: &str, insulation: &str) -> Option<&EconomicDensityEntry> {
        self.entries.iter().find(|e| e.matches(conductor, insulation))
    }

    /// Economic current density (A/mm²) for a cable type and utilization time.
    ///
    /// Only the first matching entry is consulted. Returns `None` only when
    /// no entry matches; a missing band gives 0.0.
    pub fn density(&self, conductor: &str, insulation: &str, utilization_hours: f64) -> Option<f64> {
        self.entry_for(conductor, insulation)
            .map(|entry| entry.coefficient(TimeBand::for_hours(utilization_hours)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
