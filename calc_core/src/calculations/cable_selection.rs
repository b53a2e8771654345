//! # Cable Selection
//!
//! Catalog lookups used by the sizing calculation:
//!
//! - [`find_suitable_cable`] - exact match of a post-contingency current
//!   against the allowable-current column for the supply voltage
//! - [`find_closest_section`] - smallest cross-section in a family that
//!   satisfies the thermal-stability requirement
//! - [`thermal_coefficient`] - thermal constant C by insulation type
//!
//! Scans run in catalog file order and the first match wins, so the same
//! catalog always yields the same selection.

use serde::{Deserialize, Serialize};

use crate::catalog::{CableCatalog, CableFamily, CableRecord, VoltageTier};
use crate::errors::{CalcError, CalcResult};

/// Thermal constant C for paper-insulated cables (A·s½/mm²)
pub const PAPER_THERMAL_COEFFICIENT: f64 = 92.0;

/// Thermal constant C for plastic-insulated cables
pub const PLASTIC_THERMAL_COEFFICIENT: f64 = 75.0;

/// Thermal constant C for rubber-insulated cables
pub const RUBBER_THERMAL_COEFFICIENT: f64 = 65.0;

/// A catalog record together with the family it belongs to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CableMatch<'a> {
    pub family: &'a CableFamily,
    pub record: &'a CableRecord,
}

/// A cross-section chosen for thermal stability and the voltage it runs at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionChoice {
    pub record: CableRecord,
    /// Supply voltage after the one-step demotion (kV)
    pub voltage_kv: f64,
}

/// Find the first catalog cable rated for exactly `current_a` at `voltage_kv`.
///
/// The allowable-current column is picked with [`VoltageTier::from_kv`]; a
/// voltage outside the three tiers matches nothing. Records with a zero
/// rating never match. This is an equality lookup: a cable rated one amp
/// higher is not returned.
pub fn find_suitable_cable(catalog: &CableCatalog, current_a: i64, voltage_kv: f64) -> Option<CableMatch<'_>> {
    let tier = VoltageTier::from_kv(voltage_kv)?;
    catalog.families().iter().find_map(|family| {
        family
            .cables
            .iter()
            .find(|record| {
                let rated = i64::from(record.allowable_current(tier));
                rated != 0 && rated == current_a
            })
            .map(|record| CableMatch { family, record })
    })
}

/// Pick the cross-section in `family` that covers `required_mm2`.
///
/// An exact cross-section match is taken first, otherwise the smallest
/// cross-section above the requirement. Either way the supply voltage is
/// stepped down one tier with [`demote_voltage`].
///
/// # Errors
///
/// `CalcError::NoAdequateSection` when every record in the family is smaller
/// than the requirement (including a NaN requirement).
pub fn find_closest_section(family: &CableFamily, required_mm2: f64, voltage_kv: f64) -> CalcResult<SectionChoice> {
    let exact = family
        .cables
        .iter()
        .find(|record| f64::from(record.cross_section_mm2) == required_mm2);

    let chosen = exact.or_else(|| {
        family
            .cables
            .iter()
            .filter(|record| f64::from(record.cross_section_mm2) >= required_mm2)
            .min_by_key(|record| record.cross_section_mm2)
    });

    match chosen {
        Some(record) => Ok(SectionChoice {
            record: *record,
            voltage_kv: demote_voltage(voltage_kv),
        }),
        None => Err(CalcError::NoAdequateSection {
            conductor: family.conductor.clone(),
            insulation: family.insulation.clone(),
            required_mm2,
        }),
    }
}

/// Step a supply voltage down one tier: 10 → 6, 6 → 3, anything else unchanged.
pub fn demote_voltage(voltage_kv: f64) -> f64 {
    if voltage_kv == 10.0 {
        6.0
    } else if voltage_kv == 6.0 {
        3.0
    } else {
        voltage_kv
    }
}

/// Thermal constant C for an insulation type (case-insensitive).
///
/// Unknown insulation types use the paper value.
pub fn thermal_coefficient(insulation: &str) -> f64 {
    match insulation.to_lowercase().as_str() {
        "plastic" => PLASTIC_THERMAL_COEFFICIENT,
        "rubber" => RUBBER_THERMAL_COEFFICIENT,
        _ => PAPER_THERMAL_COEFFICIENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(section: u32, up_to_3: u32, kv6: u32, kv10: u32) -> CableRecord {
        CableRecord {
            cross_section_mm2: section,
            current_up_to_3kv_a: up_to_3,
            current_6kv_a: kv6,
            current_10kv_a: kv10,
        }
    }

    fn family(conductor: &str, cables: Vec<CableRecord>) -> CableFamily {
        CableFamily {
            conductor: conductor.to_string(),
            insulation: "paper".to_string(),
            sheath: "lead".to_string(),
            cables,
        }
    }

    fn catalog() -> CableCatalog {
        CableCatalog::new(vec![
            family("copper", vec![record(16, 135, 120, 110), record(25, 180, 160, 140)]),
            family(
                "aluminium",
                vec![
                    record(10, 65, 60, 0),
                    record(16, 90, 80, 75),
                    record(25, 115, 105, 90),
                    record(50, 175, 155, 140),
                ],
            ),
        ])
    }

    #[test]
    fn test_exact_current_match() {
        let cat = catalog();
        let found = find_suitable_cable(&cat, 75, 10.0).unwrap();
        assert_eq!(found.family.conductor, "aluminium");
        assert_eq!(found.record.cross_section_mm2, 16);
    }

    #[test]
    fn test_first_family_wins() {
        let cat = catalog();
        // 140 A at 10 kV exists in both families
        let found = find_suitable_cable(&cat, 140, 10.0).unwrap();
        assert_eq!(found.family.conductor, "copper");
        assert_eq!(found.record.cross_section_mm2, 25);
    }

    #[test]
    fn test_no_nearest_match() {
        let cat = catalog();
        assert!(find_suitable_cable(&cat, 74, 10.0).is_none());
        assert!(find_suitable_cable(&cat, 76, 10.0).is_none());
    }

    #[test]
    fn test_column_follows_voltage() {
        let cat = catalog();
        assert_eq!(
            find_suitable_cable(&cat, 80, 6.0).unwrap().record.cross_section_mm2,
            16
        );
        assert_eq!(
            find_suitable_cable(&cat, 65, 3.0).unwrap().record.cross_section_mm2,
            10
        );
        // 75 A is only a 10 kV rating
        assert!(find_suitable_cable(&cat, 75, 6.0).is_none());
    }

    #[test]
    fn test_unknown_tier_matches_nothing() {
        let cat = catalog();
        assert!(find_suitable_cable(&cat, 75, 35.0).is_none());
        assert!(find_suitable_cable(&cat, 0, 0.0).is_none());
    }

    #[test]
    fn test_zero_rating_never_matches() {
        let cat = catalog();
        // aluminium 10 mm² has no 10 kV rating
        assert!(find_suitable_cable(&cat, 0, 10.0).is_none());
    }

    #[test]
    fn test_closest_section_rounds_up_and_demotes() {
        let cat = catalog();
        let fam = &cat.families()[1];
        let choice = find_closest_section(fam, 42.96, 10.0).unwrap();
        assert_eq!(choice.record.cross_section_mm2, 50);
        assert_eq!(choice.voltage_kv, 6.0);
    }

    #[test]
    fn test_exact_section_still_demotes() {
        let cat = catalog();
        let fam = &cat.families()[1];
        let choice = find_closest_section(fam, 25.0, 10.0).unwrap();
        assert_eq!(choice.record.cross_section_mm2, 25);
        assert_eq!(choice.voltage_kv, 6.0);

        let choice = find_closest_section(fam, 25.0, 6.0).unwrap();
        assert_eq!(choice.voltage_kv, 3.0);

        let choice = find_closest_section(fam, 25.0, 3.0).unwrap();
        assert_eq!(choice.voltage_kv, 3.0);
    }

    #[test]
    fn test_closest_section_picks_smallest_even_if_unsorted() {
        let fam = family(
            "copper",
            vec![record(95, 0, 0, 0), record(35, 0, 0, 0), record(70, 0, 0, 0)],
        );
        let choice = find_closest_section(&fam, 30.0, 6.0).unwrap();
        assert_eq!(choice.record.cross_section_mm2, 35);
    }

    #[test]
    fn test_no_adequate_section() {
        let cat = catalog();
        let fam = &cat.families()[1];
        let err = find_closest_section(fam, 51.0, 10.0).unwrap_err();
        assert_eq!(err.error_code(), "NO_ADEQUATE_SECTION");
        assert!(find_closest_section(fam, f64::NAN, 10.0).is_err());
    }

    #[test]
    fn test_demote_voltage() {
        assert_eq!(demote_voltage(10.0), 6.0);
        assert_eq!(demote_voltage(6.0), 3.0);
        assert_eq!(demote_voltage(3.0), 3.0);
        assert_eq!(demote_voltage(10.5), 10.5);
    }

    #[test]
    fn test_thermal_coefficient_ignores_case() {
        assert_eq!(thermal_coefficient("paper"), 92.0);
        assert_eq!(thermal_coefficient("PLASTIC"), 75.0);
        assert_eq!(thermal_coefficient("Rubber"), 65.0);
        assert_eq!(thermal_coefficient("unknown"), 92.0);
        assert_eq!(thermal_coefficient(""), 92.0);
    }
}
