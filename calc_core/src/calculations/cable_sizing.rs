//! # Cable Sizing (Thermal and Economic)
//!
//! Sizes a feeder cable for one branch of a double-circuit supply:
//!
//! 1. Normal current `I = (S/2) / (√3·U)` and post-contingency current
//!    `I_pa = trunc(2·I)`
//! 2. Catalog cable rated exactly for `I_pa` at the supply voltage
//! 3. Thermal-stability section `s = I_k·√t_f / C`
//! 4. Economic current density and economic section `s_ek = I / j_ek`
//! 5. Smallest section in the cable's family covering `s`, with the supply
//!    voltage stepped down one tier
//! 6. Source and transformer reactance check and initial short-circuit current
//!
//! A lookup miss stops the calculation at that step. The outcome still
//! carries everything computed up to that point so the report can show it.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::cable_sizing::{calculate, SizingInput, SizingOutcome};
//! use calc_core::catalog::Catalogs;
//!
//! let catalogs = Catalogs::builtin().unwrap();
//! let input = SizingInput::default();
//!
//! match calculate(&input, &catalogs) {
//!     SizingOutcome::Complete(result) => {
//!         println!("Section: {} mm² at {:.1} kV", result.section.record.cross_section_mm2, result.section.voltage_kv);
//!     }
//!     other => println!("Stopped early: {:?}", other.failure()),
//! }
//! ```


use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::cable_selection::{
    find_closest_section, find_suitable_cable, thermal_coefficient, SectionChoice,
};
use crate::catalog::{CableFamily, CableRecord, Catalogs};
use crate::errors::CalcError;

/// Input parameters for cable sizing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "short_circuit_current_a": 2500.0,
///   "fault_duration_s": 2.5,
///   "branch_power_kva": 1300.0,
///   "voltage_kv": 10.0,
///   "utilization_hours": 4000.0,
///   "short_circuit_power_mva": 2000.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingInput {
    /// Short-circuit current I_k (A)
    pub short_circuit_current_a: f64,
    /// Fault clearance time t_f (s)
    pub fault_duration_s: f64,
    /// Calculated power of the double-circuit branch S_m (kVA)
    pub branch_power_kva: f64,
    /// Supply voltage U (kV)
    pub voltage_kv: f64,
    /// Annual utilization time T_m (h)
    pub utilization_hours: f64,
    /// Short-circuit power of the source S_k (MVA)
    pub short_circuit_power_mva: f64,
}

impl Default for SizingInput {
    fn default() -> Self {
        SizingInput {
            short_circuit_current_a: 2500.0,
            fault_duration_s: 2.5,
            branch_power_kva: 1300.0,
            voltage_kv: 10.0,
            utilization_hours: 4000.0,
            short_circuit_power_mva: 2000.0,
        }
    }
}

impl SizingInput {
    /// Normal-mode current of one circuit (A)
    pub fn nominal_current_a(&self) -> f64 {
        (self.branch_power_kva / 2.0) / (3f64.sqrt() * self.voltage_kv)
    }
}

/// Post-contingency current: twice the normal current, truncated toward zero.
///
/// Non-finite values saturate, which never equals a catalog rating.
pub fn post_contingency_current_a(nominal_current_a: f64) -> i64 {
    (2.0 * nominal_current_a) as i64
}

/// Thermal-stability cross-section `I_k·√t_f / C` (mm²)
pub fn thermal_section_mm2(short_circuit_current_a: f64, fault_duration_s: f64, coefficient: f64) -> f64 {
    short_circuit_current_a * fault_duration_s.sqrt() / coefficient
}

/// Cable family fields shown in reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableSummary {
    pub conductor: String,
    pub insulation: String,
    pub sheath: String,
    /// The record whose rating matched the post-contingency current
    pub matched: CableRecord,
}

impl CableSummary {
    fn new(family: &CableFamily, matched: &CableRecord) -> Self {
        CableSummary {
            conductor: family.conductor.clone(),
            insulation: family.insulation.clone(),
            sheath: family.sheath.clone(),
            matched: *matched,
        }
    }
}

/// Source and transformer reactance check.
///
/// Standard values are `U_sn = u_k% = 10.5` on a 10 kV supply and 6.3
/// otherwise; `S_nom.t` follows the demoted voltage the same way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceCheck {
    /// Average nominal source voltage U_sn (kV)
    pub source_voltage_kv: f64,
    /// Transformer short-circuit voltage u_k (%)
    pub uk_percent: f64,
    /// Transformer rated power S_nom.t (MVA)
    pub transformer_power_mva: f64,
    /// Source reactance X_c (Ω)
    pub source_reactance_ohm: f64,
    /// Transformer reactance X_t (Ω)
    pub transformer_reactance_ohm: f64,
    /// X_Σ = X_c + X_t (Ω)
    pub total_reactance_ohm: f64,
    /// Initial three-phase short-circuit current I_p0 (kA)
    pub initial_current_ka: f64,
}

impl SourceCheck {
    pub fn calculate(voltage_kv: f64, resulting_voltage_kv: f64, short_circuit_power_mva: f64) -> Self {
        let (source_voltage_kv, uk_percent) = if voltage_kv == 10.0 { (10.5, 10.5) } else { (6.3, 6.3) };
        let transformer_power_mva = if resulting_voltage_kv == 10.0 { 10.5 } else { 6.3 };

        let u_sq = source_voltage_kv * source_voltage_kv;
        let source_reactance_ohm = u_sq / short_circuit_power_mva;
        let transformer_reactance_ohm = (uk_percent / 100.0) * u_sq / transformer_power_mva;
        let total_reactance_ohm = source_reactance_ohm + transformer_reactance_ohm;
        let initial_current_ka = source_voltage_kv / (3f64.sqrt() * total_reactance_ohm);

        SourceCheck {
            source_voltage_kv,
            uk_percent,
            transformer_power_mva,
            source_reactance_ohm,
            transformer_reactance_ohm,
            total_reactance_ohm,
            initial_current_ka,
        }
    }
}

/// Full sizing result when every lookup succeeded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    pub nominal_current_a: f64,
    pub post_contingency_current_a: i64,
    pub thermal_section_mm2: f64,
    pub cable: CableSummary,
    /// Economic current density j_ek (A/mm²)
    pub economic_density: f64,
    pub economic_section_mm2: f64,
    /// Section chosen for thermal stability and the demoted voltage
    pub section: SectionChoice,
    pub source_check: SourceCheck,
}

/// Where a sizing calculation ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum SizingOutcome {
    /// Every step succeeded
    Complete(SizingResult),
    /// No catalog cable is rated for the post-contingency current
    CableNotFound {
        post_contingency_current_a: i64,
        voltage_kv: f64,
    },
    /// The matched cable type has no economic density entry
    DensityNotFound {
        nominal_current_a: f64,
        post_contingency_current_a: i64,
        thermal_section_mm2: f64,
        cable: CableSummary,
    },
    /// The cable family has no section large enough for thermal stability
    NoAdequateSection {
        thermal_section_mm2: f64,
        cable: CableSummary,
    },
}

impl SizingOutcome {
    pub fn result(&self) -> Option<&SizingResult> {
        match self {
            SizingOutcome::Complete(result) => Some(result),
            _ => None,
        }
    }

    /// The lookup miss that ended the calculation, if any
    pub fn failure(&self) -> Option<CalcError> {
        match self {
            SizingOutcome::Complete(_) => None,
            SizingOutcome::CableNotFound {
                post_contingency_current_a,
                voltage_kv,
            } => Some(CalcError::CableNotFound {
                current_a: *post_contingency_current_a,
                voltage_kv: *voltage_kv,
            }),
            SizingOutcome::DensityNotFound { cable, .. } => {
                Some(CalcError::density_not_found(&cable.conductor, &cable.insulation))
            }
            SizingOutcome::NoAdequateSection {
                thermal_section_mm2,
                cable,
            } => Some(CalcError::NoAdequateSection {
                conductor: cable.conductor.clone(),
                insulation: cable.insulation.clone(),
                required_mm2: *thermal_section_mm2,
            }),
        }
    }
}

/// Run the sizing calculation against the loaded catalogs.
///
/// Pure function of its arguments: the same input and catalogs always give
/// the same outcome.
pub fn calculate(input: &SizingInput, catalogs: &Catalogs) -> SizingOutcome {
    let nominal_current_a = input.nominal_current_a();
    let post_contingency_current_a = post_contingency_current_a(nominal_current_a);

    let Some(found) = find_suitable_cable(&catalogs.cables, post_contingency_current_a, input.voltage_kv) else {
        debug!(
            current_a = post_contingency_current_a,
            voltage_kv = input.voltage_kv,
            "no cable rated for post-contingency current"
        );
        return SizingOutcome::CableNotFound {
            post_contingency_current_a,
            voltage_kv: input.voltage_kv,
        };
    };
    let cable = CableSummary::new(found.family, found.record);

    let thermal_section_mm2 = thermal_section_mm2(
        input.short_circuit_current_a,
        input.fault_duration_s,
        thermal_coefficient(&cable.insulation),
    );

    let Some(economic_density) =
        catalogs
            .densities
            .density(&cable.conductor, &cable.insulation, input.utilization_hours)
    else {
        debug!(
            conductor = %cable.conductor,
            insulation = %cable.insulation,
            "no economic density entry"
        );
        return SizingOutcome::DensityNotFound {
            nominal_current_a,
            post_contingency_current_a,
            thermal_section_mm2,
            cable,
        };
    };
    let economic_section_mm2 = nominal_current_a / economic_density;

    let section = match find_closest_section(found.family, thermal_section_mm2, input.voltage_kv) {
        Ok(section) => section,
        Err(e) => {
            debug!(error = %e, "thermal section not available");
            return SizingOutcome::NoAdequateSection {
                thermal_section_mm2,
                cable,
            };
        }
    };

    let source_check = SourceCheck::calculate(input.voltage_kv, section.voltage_kv, input.short_circuit_power_mva);

    SizingOutcome::Complete(SizingResult {
        nominal_current_a,
        post_contingency_current_a,
        thermal_section_mm2,
        cable,
        economic_density,
        economic_section_mm2,
        section,
        source_check,
    })
}
