//! # Reference Catalogs
//!
//! Read-only tables consumed by the cable sizing calculation:
//!
//! - **Cable catalog**: standard cable sizes with allowable currents per tier
//! - **Economic density table**: economic current density per cable type and
//!   utilization-time band
//!
//! Both are loaded once at startup into a [`Catalogs`] value and shared by
//! reference with every calculation. Nothing mutates them afterwards.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::catalog::Catalogs;
//!
//! let catalogs = Catalogs::builtin().unwrap();
//! assert!(!catalogs.cables.is_empty());
//! assert!(!catalogs.densities.is_empty());
//! ```

pub mod cables;
pub mod economic_density;

pub use cables::{CableCatalog, CableFamily, CableRecord, VoltageTier};
pub use economic_density::{EconomicDensityEntry, EconomicDensityTable, TimeBand};

use crate::errors::CalcResult;

/// Cable catalog shipped with the library
pub const BUILTIN_CABLE_CATALOG: &str = include_str!("../../data/pue.json");

/// Economic density table shipped with the library
pub const BUILTIN_DENSITY_TABLE: &str = include_str!("../../data/economic_density.json");

/// Immutable catalog pair passed into sizing calculations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogs {
    pub cables: CableCatalog,
    pub densities: EconomicDensityTable,
}

impl Catalogs {
    pub fn new(cables: CableCatalog, densities: EconomicDensityTable) -> Self {
        Catalogs { cables, densities }
    }

    /// Parse the catalogs embedded in the library
    pub fn builtin() -> CalcResult<Self> {
        Ok(Catalogs {
            cables: CableCatalog::from_json(BUILTIN_CABLE_CATALOG)?,
            densities: EconomicDensityTable::from_json(BUILTIN_DENSITY_TABLE)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalogs_parse() {
        let catalogs = Catalogs::builtin().unwrap();
        assert!(catalogs.cables.families().len() >= 2);
        assert!(catalogs.cables.record_count() > 20);
        assert!(catalogs.densities.entries().len() >= 2);
    }

    #[test]
    fn test_builtin_families_ascend_by_section() {
        let catalogs = Catalogs::builtin().unwrap();
        for family in catalogs.cables.families() {
            let sections: Vec<u32> = family.cables.iter().map(|c| c.cross_section_mm2).collect();
            assert!(
                sections.windows(2).all(|w| w[0] < w[1]),
                "{} not ascending",
                family.designation()
            );
        }
    }

    #[test]
    fn test_every_builtin_family_has_density() {
        let catalogs = Catalogs::builtin().unwrap();
        for family in catalogs.cables.families() {
            assert!(
                catalogs
                    .densities
                    .entry_for(&family.conductor, &family.insulation)
                    .is_some(),
                "no density for {}",
                family.designation()
            );
        }
    }
}
