//! # Short-Circuit Cascade
//!
//! Equivalent-circuit reduction from a high-voltage source through a
//! transformer onto the lower-voltage busbars and out along a feeder line.
//! Three- and two-phase short-circuit currents are computed at every stage
//! for the normal and the minimum operating regime.
//!
//! ## Stages
//!
//! 1. Transformer reactance `X_t = u_k,max·U_vn² / (100·S_nom.t)`
//! 2. Busbar impedance on the high-voltage side `X_sh = X_c + X_t`,
//!    `Z_sh = √(R_c² + X_sh²)`
//! 3. Fault currents at `U_vn`
//! 4. Reduction coefficient `k_pr = U_nn² / U_vn²`
//! 5. Busbar impedance referred to the low-voltage side
//! 6. Fault currents at `U_nn`
//! 7. Line impedance from the total length of all sections
//! 8. Total impedance at the end of the line
//! 9. Fault currents at the end of the line
//!
//! Every stage always runs. Zero inputs in the stage 3/6/9 divisors give
//! infinite or NaN currents, which are reported as they are.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::short_circuit::{calculate, CascadeInput};
//!
//! let result = calculate(&CascadeInput::default());
//! println!("X_t = {:.2} Ω", result.transformer_reactance_ohm);
//! println!("I(3) at point 10 = {:.2} A", result.line_end_currents.normal.three_phase_a);
//! ```


use serde::{Deserialize, Serialize};

/// Lengths of the feeder line sections (km)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSections {
    pub section_1_2: f64,
    pub section_2_3: f64,
    pub section_4_5: f64,
    pub section_5_6: f64,
    pub section_6_7: f64,
    pub section_7_8: f64,
    pub section_8_9: f64,
    pub section_9_10: f64,
}

impl Default for LineSections {
    fn default() -> Self {
        LineSections {
            section_1_2: 0.2,
            section_2_3: 0.35,
            section_4_5: 0.2,
            section_5_6: 0.6,
            section_6_7: 2.0,
            section_7_8: 2.55,
            section_8_9: 3.37,
            section_9_10: 3.1,
        }
    }
}

impl LineSections {
    /// Section lengths in line order
    pub fn lengths(&self) -> [f64; 8] {
        [
            self.section_1_2,
            self.section_2_3,
            self.section_4_5,
            self.section_5_6,
            self.section_6_7,
            self.section_7_8,
            self.section_8_9,
            self.section_9_10,
        ]
    }

    /// Total line length (km)
    pub fn total_km(&self) -> f64 {
        self.lengths().iter().sum()
    }
}

/// Input parameters for the short-circuit cascade.
///
/// ## JSON Example
///
/// ```json
/// {
///   "uk_max_percent": 11.1,
///   "hv_voltage_kv": 115.0,
///   "lv_voltage_kv": 11.0,
///   "transformer_power_mva": 6.3,
///   "source_resistance_normal_ohm": 10.65,
///   "source_reactance_normal_ohm": 24.02,
///   "source_resistance_min_ohm": 34.88,
///   "source_reactance_min_ohm": 65.68,
///   "line_resistance_ohm_per_km": 0.64,
///   "line_reactance_ohm_per_km": 0.363,
///   "sections": { "section_1_2": 0.2, "section_2_3": 0.35, "...": 0.0 }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CascadeInput {
    /// Maximum transformer short-circuit voltage u_k,max (%)
    pub uk_max_percent: f64,
    /// High-side nominal voltage U_vn (kV)
    pub hv_voltage_kv: f64,
    /// Low-side nominal voltage U_nn (kV)
    pub lv_voltage_kv: f64,
    /// Transformer rated power S_nom.t (MVA)
    pub transformer_power_mva: f64,
    /// Source resistance, normal regime R_c.n (Ω)
    pub source_resistance_normal_ohm: f64,
    /// Source reactance, normal regime X_c.n (Ω)
    pub source_reactance_normal_ohm: f64,
    /// Source resistance, minimum regime R_c.min (Ω)
    pub source_resistance_min_ohm: f64,
    /// Source reactance, minimum regime X_c.min (Ω)
    pub source_reactance_min_ohm: f64,
    /// Line resistance per km r_0 (Ω/km)
    pub line_resistance_ohm_per_km: f64,
    /// Line reactance per km x_0 (Ω/km)
    pub line_reactance_ohm_per_km: f64,
    pub sections: LineSections,
}

impl Default for CascadeInput {
    fn default() -> Self {
        CascadeInput {
            uk_max_percent: 11.1,
            hv_voltage_kv: 115.0,
            lv_voltage_kv: 11.0,
            transformer_power_mva: 6.3,
            source_resistance_normal_ohm: 10.65,
            source_reactance_normal_ohm: 24.02,
            source_resistance_min_ohm: 34.88,
            source_reactance_min_ohm: 65.68,
            line_resistance_ohm_per_km: 0.64,
            line_reactance_ohm_per_km: 0.363,
            sections: LineSections::default(),
        }
    }
}

/// Resistance, reactance and impedance magnitude of one equivalent circuit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Impedance {
    pub resistance_ohm: f64,
    pub reactance_ohm: f64,
    pub impedance_ohm: f64,
}

impl Impedance {
    pub fn new(resistance_ohm: f64, reactance_ohm: f64) -> Self {
        Impedance {
            resistance_ohm,
            reactance_ohm,
            impedance_ohm: (resistance_ohm * resistance_ohm + reactance_ohm * reactance_ohm).sqrt(),
        }
    }

    /// Refer this impedance to another voltage tier
    pub fn scaled(&self, k_pr: f64) -> Self {
        Impedance::new(self.resistance_ohm * k_pr, self.reactance_ohm * k_pr)
    }

    /// Series connection with another impedance
    pub fn plus(&self, other: &Impedance) -> Self {
        Impedance::new(
            self.resistance_ohm + other.resistance_ohm,
            self.reactance_ohm + other.reactance_ohm,
        )
    }
}

/// Three- and two-phase short-circuit currents (A)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaultCurrents {
    pub three_phase_a: f64,
    pub two_phase_a: f64,
}

impl FaultCurrents {
    /// `I(3) = U·1000 / (√3·Z)`, `I(2) = I(3)·√3/2`
    pub fn at(voltage_kv: f64, impedance_ohm: f64) -> Self {
        let three_phase_a = (voltage_kv * 1000.0) / (3f64.sqrt() * impedance_ohm);
        FaultCurrents {
            three_phase_a,
            two_phase_a: three_phase_a * (3f64.sqrt() / 2.0),
        }
    }
}

/// A value computed separately for the normal and minimum regimes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Regimes<T> {
    pub normal: T,
    pub minimum: T,
}

impl<T> Regimes<T> {
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Regimes<U> {
        Regimes {
            normal: f(&self.normal),
            minimum: f(&self.minimum),
        }
    }
}

/// Line totals from stage 7
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineImpedance {
    pub total_length_km: f64,
    pub resistance_ohm: f64,
    pub reactance_ohm: f64,
}

/// Every intermediate value of the cascade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CascadeResult {
    /// Stage 1: X_t (Ω)
    pub transformer_reactance_ohm: f64,
    /// Stage 2: busbar impedance on the high-voltage side
    pub hv_busbar: Regimes<Impedance>,
    /// Stage 3
    pub hv_busbar_currents: Regimes<FaultCurrents>,
    /// Stage 4: k_pr
    pub reduction_coefficient: f64,
    /// Stage 5: busbar impedance referred to the low-voltage side
    pub lv_busbar: Regimes<Impedance>,
    /// Stage 6
    pub lv_busbar_currents: Regimes<FaultCurrents>,
    /// Stage 7
    pub line: LineImpedance,
    /// Stage 8: total impedance at the end of the line
    pub line_end: Regimes<Impedance>,
    /// Stage 9
    pub line_end_currents: Regimes<FaultCurrents>,
}

/// Stage 1: transformer reactance (Ω).
///
/// Returns exactly 0 when any of the three inputs is zero.
pub fn transformer_reactance(uk_max_percent: f64, hv_voltage_kv: f64, transformer_power_mva: f64) -> f64 {
    if uk_max_percent == 0.0 || hv_voltage_kv == 0.0 || transformer_power_mva == 0.0 {
        return 0.0;
    }
    (uk_max_percent * hv_voltage_kv.powi(2)) / (100.0 * transformer_power_mva)
}

/// Stage 2: source plus transformer seen from the high-voltage busbars
pub fn busbar_impedance(source_resistance_ohm: f64, source_reactance_ohm: f64, transformer_reactance_ohm: f64) -> Impedance {
    Impedance::new(source_resistance_ohm, source_reactance_ohm + transformer_reactance_ohm)
}

/// Stage 4: square of the voltage ratio, 0 when either voltage is zero
pub fn reduction_coefficient(hv_voltage_kv: f64, lv_voltage_kv: f64) -> f64 {
    if hv_voltage_kv == 0.0 || lv_voltage_kv == 0.0 {
        return 0.0;
    }
    lv_voltage_kv.powi(2) / hv_voltage_kv.powi(2)
}

/// Stage 7: resistance and reactance of the whole line
pub fn line_impedance(sections: &LineSections, r0_ohm_per_km: f64, x0_ohm_per_km: f64) -> LineImpedance {
    let total_length_km = sections.total_km();
    LineImpedance {
        total_length_km,
        resistance_ohm: total_length_km * r0_ohm_per_km,
        reactance_ohm: total_length_km * x0_ohm_per_km,
    }
}

/// Run all nine stages.
///
/// Pure arithmetic with no lookups; identical inputs give bit-identical results.
pub fn calculate(input: &CascadeInput) -> CascadeResult {
    let transformer_reactance_ohm =
        transformer_reactance(input.uk_max_percent, input.hv_voltage_kv, input.transformer_power_mva);

    let hv_busbar = Regimes {
        normal: busbar_impedance(
            input.source_resistance_normal_ohm,
            input.source_reactance_normal_ohm,
            transformer_reactance_ohm,
        ),
        minimum: busbar_impedance(
            input.source_resistance_min_ohm,
            input.source_reactance_min_ohm,
            transformer_reactance_ohm,
        ),
    };
    let hv_busbar_currents = hv_busbar.map(|z| FaultCurrents::at(input.hv_voltage_kv, z.impedance_ohm));

    let reduction_coefficient = reduction_coefficient(input.hv_voltage_kv, input.lv_voltage_kv);
    let lv_busbar = hv_busbar.map(|z| z.scaled(reduction_coefficient));
    let lv_busbar_currents = lv_busbar.map(|z| FaultCurrents::at(input.lv_voltage_kv, z.impedance_ohm));

    let line = line_impedance(
        &input.sections,
        input.line_resistance_ohm_per_km,
        input.line_reactance_ohm_per_km,
    );
    let line_series = Impedance::new(line.resistance_ohm, line.reactance_ohm);
    let line_end = lv_busbar.map(|z| line_series.plus(z));
    let line_end_currents = line_end.map(|z| FaultCurrents::at(input.lv_voltage_kv, z.impedance_ohm));

    CascadeResult {
        transformer_reactance_ohm,
        hv_busbar,
        hv_busbar_currents,
        reduction_coefficient,
        lv_busbar,
        lv_busbar_currents,
        line,
        line_end,
        line_end_currents,
    }
}
