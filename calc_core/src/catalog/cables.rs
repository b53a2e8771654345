//! Standard Cable Catalog
//!
//! Allowable continuous currents for three-core power cables, grouped into
//! families by conductor, insulation and sheath. Each record carries the
//! rating at the three supply voltage tiers used by the sizing calculation.
//!
//! ## JSON Layout
//!
//! ```json
//! [
//!   {
//!     "conductor": "aluminium",
//!     "insulation": "paper",
//!     "sheath": "aluminium",
//!     "cables": [
//!       { "sech": 16, "up_to_3_kV": 90, "6_kV": 80, "10_kV": 75 }
//!     ]
//!   }
//! ]
//! ```
//!
//! A current of 0 means the cable is not rated at that tier.

use serde::{Deserialize, Serialize};

/// Supply voltage tier with its own column in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoltageTier {
    /// Up to 3 kV
    #[serde(rename = "3kV")]
    UpTo3kV,
    /// 6 kV
    #[serde(rename = "6kV")]
    Kv6,
    /// 10 kV
    #[serde(rename = "10kV")]
    Kv10,
}

impl VoltageTier {
    /// Select the tier for a supply voltage in kV.
    ///
    /// The voltage is truncated toward zero first, so 10.5 kV reads the
    /// 10 kV column. Anything that does not truncate to 3, 6 or 10 has no tier.
    pub fn from_kv(voltage_kv: f64) -> Option<Self> {
        match voltage_kv.trunc() as i64 {
            3 => Some(VoltageTier::UpTo3kV),
            6 => Some(VoltageTier::Kv6),
            10 => Some(VoltageTier::Kv10),
            _ => None,
        }
    }

    /// Get display name (e.g., "10 kV")
    pub fn display_name(&self) -> &'static str {
        match self {
            VoltageTier::UpTo3kV => "up to 3 kV",
            VoltageTier::Kv6 => "6 kV",
            VoltageTier::Kv10 => "10 kV",
        }
    }
}

impl std::fmt::Display for VoltageTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One standard cable size with its allowable currents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CableRecord {
    /// Conductor cross-section (mm²)
    #[serde(rename = "sech")]
    pub cross_section_mm2: u32,
    /// Allowable current up to 3 kV (A)
    #[serde(rename = "up_to_3_kV", default)]
    pub current_up_to_3kv_a: u32,
    /// Allowable current at 6 kV (A)
    #[serde(rename = "6_kV", default)]
    pub current_6kv_a: u32,
    /// Allowable current at 10 kV (A)
    #[serde(rename = "10_kV", default)]
    pub current_10kv_a: u32,
}

impl CableRecord {
    /// Allowable current at the given tier (A)
    pub fn allowable_current(&self, tier: VoltageTier) -> u32 {
        match tier {
            VoltageTier::UpTo3kV => self.current_up_to_3kv_a,
            VoltageTier::Kv6 => self.current_6kv_a,
            VoltageTier::Kv10 => self.current_10kv_a,
        }
    }
}

/// Cables sharing conductor, insulation and sheath, ascending by cross-section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableFamily {
    /// Conductor material (e.g., "copper", "aluminium")
    pub conductor: String,
    /// Insulation type (e.g., "paper", "plastic", "rubber")
    pub insulation: String,
    /// Sheath type (e.g., "lead", "pvc")
    pub sheath: String,
    /// Standard sizes in this family
    pub cables: Vec<CableRecord>,
}

impl CableFamily {
    /// Short description for reports (e.g., "aluminium / paper / aluminium")
    pub fn designation(&self) -> String {
        format!("{} / {} / {}", self.conductor, self.insulation, self.sheath)
    }
}

/// Cable families in catalog file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CableCatalog {
    families: Vec<CableFamily>,
}

impl CableCatalog {
    pub fn new(families: Vec<CableFamily>) -> Self {
        CableCatalog { families }
    }

    /// Parse a catalog from its JSON text
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Families in load order
    pub fn families(&self) -> &[CableFamily] {
        &self.families
    }

    /// Total number of cable records across all families
    pub fn record_count(&self) -> usize {
        self.families.iter().map(|f| f.cables.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voltage_tier_truncates() {
        assert_eq!(VoltageTier::from_kv(10.0), Some(VoltageTier::Kv10));
        assert_eq!(VoltageTier::from_kv(10.5), Some(VoltageTier::Kv10));
        assert_eq!(VoltageTier::from_kv(6.9), Some(VoltageTier::Kv6));
        assert_eq!(VoltageTier::from_kv(3.0), Some(VoltageTier::UpTo3kV));
        assert_eq!(VoltageTier::from_kv(0.4), None);
        assert_eq!(VoltageTier::from_kv(35.0), None);
        assert_eq!(VoltageTier::from_kv(f64::NAN), None);
    }

    #[test]
    fn test_record_field_names() {
        let json = r#"{ "sech": 16, "up_to_3_kV": 90, "6_kV": 80, "10_kV": 75 }"#;
        let record: CableRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.cross_section_mm2, 16);
        assert_eq!(record.allowable_current(VoltageTier::UpTo3kV), 90);
        assert_eq!(record.allowable_current(VoltageTier::Kv6), 80);
        assert_eq!(record.allowable_current(VoltageTier::Kv10), 75);
    }

    #[test]
    fn test_missing_ratings_default_to_zero() {
        let json = r#"{ "sech": 240, "up_to_3_kV": 375 }"#;
        let record: CableRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.current_6kv_a, 0);
        assert_eq!(record.current_10kv_a, 0);
    }

    #[test]
    fn test_catalog_preserves_file_order() {
        let json = r#"[
            { "conductor": "copper", "insulation": "paper", "sheath": "lead", "cables": [] },
            { "conductor": "aluminium", "insulation": "paper", "sheath": "aluminium",
              "cables": [{ "sech": 16, "up_to_3_kV": 90, "6_kV": 80, "10_kV": 75 }] }
        ]"#;
        let catalog = CableCatalog::from_json(json).unwrap();
        assert_eq!(catalog.families().len(), 2);
        assert_eq!(catalog.families()[0].conductor, "copper");
        assert_eq!(catalog.families()[1].designation(), "aluminium / paper / aluminium");
        assert_eq!(catalog.record_count(), 1);
    }
}
