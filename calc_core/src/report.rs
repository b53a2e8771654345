//! # Text Reports
//!
//! Multi-line plain-text reports for calculation results. Every
//! intermediate value of a calculation is listed, in the order it was
//! computed.
//!
//! Precision: currents, resistances and sections to 2 decimals, the
//! post-contingency current as an integer, the resulting voltage to 1
//! decimal, the source check reactances and current to 4 decimals and the
//! reduction coefficient to 3 decimals.

use crate::calculations::cable_sizing::{CableSummary, SizingResult};
use crate::calculations::fuel::Composition;
use crate::calculations::imbalance::ImbalanceScenario;
use crate::calculations::short_circuit::{FaultCurrents, Impedance, Regimes};
use crate::calculations::{
    CalculationOutput, CascadeResult, EmissionResult, FuelResult, ImbalanceResult, MazutResult,
    ReliabilityResult, SizingOutcome, UndersupplyResult,
};

/// Render any calculation output
pub fn render(output: &CalculationOutput) -> String {
    match output {
        CalculationOutput::CableSizing(outcome) => sizing_report(outcome),
        CalculationOutput::ShortCircuit(result) => cascade_report(result),
        CalculationOutput::Fuel(result) => fuel_report(result),
        CalculationOutput::Mazut(result) => mazut_report(result),
        CalculationOutput::Emissions(result) => emissions_report(result),
        CalculationOutput::Imbalance(result) => imbalance_report(result),
        CalculationOutput::Reliability(result) => reliability_report(result),
        CalculationOutput::Undersupply(result) => undersupply_report(result),
    }
}

fn cable_line(cable: &CableSummary) -> String {
    format!(
        "Suitable cable: conductor {}, insulation {}, sheath {}",
        cable.conductor, cable.insulation, cable.sheath
    )
}

/// Cable sizing report. A calculation that stopped at a lookup miss
/// reports what it computed before the miss and why it stopped.
pub fn sizing_report(outcome: &SizingOutcome) -> String {
    match outcome {
        SizingOutcome::Complete(result) => complete_sizing_report(result),
        SizingOutcome::CableNotFound {
            post_contingency_current_a,
            ..
        } => [
            format!("Post-contingency current (I_pa): {post_contingency_current_a} A"),
            "No suitable cable found.".to_string(),
        ]
        .join("\n"),
        SizingOutcome::DensityNotFound {
            nominal_current_a,
            post_contingency_current_a,
            thermal_section_mm2,
            cable,
        } => [
            format!("Nominal current (I_nom): {nominal_current_a:.2} A"),
            format!("Post-contingency current (I_pa): {post_contingency_current_a} A"),
            format!("Thermal stability section (s): {thermal_section_mm2:.2} mm²"),
            cable_line(cable),
            "No economic current density found.".to_string(),
        ]
        .join("\n"),
        SizingOutcome::NoAdequateSection {
            thermal_section_mm2, ..
        } => format!("No suitable section found for thermal stability section {thermal_section_mm2:.2} mm²."),
    }
}

fn complete_sizing_report(r: &SizingResult) -> String {
    let c = &r.source_check;
    [
        format!("Nominal current (I_nom): {:.2} A", r.nominal_current_a),
        format!("Post-contingency current (I_pa): {} A", r.post_contingency_current_a),
        format!("Thermal stability section (s): {:.2} mm²", r.thermal_section_mm2),
        cable_line(&r.cable),
        format!("Economic current density: {:.2} A/mm²", r.economic_density),
        format!("Economic section: {:.2} mm²", r.economic_section_mm2),
        format!(
            "Conductor section: {} mm², rated voltage: {:.1} kV",
            r.section.record.cross_section_mm2, r.section.voltage_kv
        ),
        "Check:".to_string(),
        format!("U_sn = {:.2} kV", c.source_voltage_kv),
        format!("U_k% = {:.2} %", c.uk_percent),
        format!("S_nom.t = {:.2} MVA", c.transformer_power_mva),
        format!("Xc = {:.4} Ω", c.source_reactance_ohm),
        format!("Xt = {:.4} Ω", c.transformer_reactance_ohm),
        format!("Total reactance XΣ = {:.4} Ω", c.total_reactance_ohm),
        format!("Initial three-phase short-circuit current Ip0 = {:.4} kA", c.initial_current_ka),
    ]
    .join("\n")
}

fn impedance_lines(lines: &mut Vec<String>, name: &str, z: &Impedance) {
    lines.push(format!("R{name} = {:.2} Ω", z.resistance_ohm));
    lines.push(format!("X{name} = {:.2} Ω", z.reactance_ohm));
    lines.push(format!("Z{name} = {:.2} Ω", z.impedance_ohm));
}

fn current_lines(lines: &mut Vec<String>, currents: &Regimes<FaultCurrents>) {
    lines.push(format!("I(3) = {:.2} A", currents.normal.three_phase_a));
    lines.push(format!("I(2) = {:.2} A", currents.normal.two_phase_a));
    lines.push(format!("I(3).min = {:.2} A", currents.minimum.three_phase_a));
    lines.push(format!("I(2).min = {:.2} A", currents.minimum.two_phase_a));
}

/// Short-circuit cascade report, one block per stage
pub fn cascade_report(r: &CascadeResult) -> String {
    let mut lines = vec![format!("Transformer reactance: Xt = {:.2} Ω", r.transformer_reactance_ohm)];

    lines.push(String::new());
    lines.push("Busbars, high-voltage side:".to_string());
    impedance_lines(&mut lines, "sh", &r.hv_busbar.normal);
    impedance_lines(&mut lines, "sh.min", &r.hv_busbar.minimum);
    current_lines(&mut lines, &r.hv_busbar_currents);

    lines.push(String::new());
    lines.push(format!("Reduction coefficient: k_pr = {:.3}", r.reduction_coefficient));

    lines.push(String::new());
    lines.push("Busbars, referred to the low-voltage side:".to_string());
    impedance_lines(&mut lines, "sh.n", &r.lv_busbar.normal);
    impedance_lines(&mut lines, "sh.n.min", &r.lv_busbar.minimum);
    current_lines(&mut lines, &r.lv_busbar_currents);

    lines.push(String::new());
    lines.push(format!("Total line length: {:.2} km", r.line.total_length_km));
    lines.push(format!("Rl = {:.2} Ω", r.line.resistance_ohm));
    lines.push(format!("Xl = {:.2} Ω", r.line.reactance_ohm));

    lines.push(String::new());
    lines.push("End of line:".to_string());
    impedance_lines(&mut lines, "Σ.n", &r.line_end.normal);
    impedance_lines(&mut lines, "Σ.n.min", &r.line_end.minimum);
    current_lines(&mut lines, &r.line_end_currents);

    lines.join("\n")
}

fn composition_line(name: &str, c: &Composition) -> String {
    let mut line = format!(
        "{name} mass: H = {:.3} %, C = {:.3} %, S = {:.3} %, N = {:.3} %, O = {:.3} %",
        c.hydrogen, c.carbon, c.sulfur, c.nitrogen, c.oxygen
    );
    if let Some(ash) = c.ash {
        line.push_str(&format!(", A = {ash:.3} %"));
    }
    line
}

pub fn fuel_report(r: &FuelResult) -> String {
    [
        format!("Working to dry mass coefficient: {:.3}", r.dry_coefficient),
        format!("Working to combustible mass coefficient: {:.3}", r.combustible_coefficient),
        composition_line("Dry", &r.dry),
        composition_line("Combustible", &r.combustible),
        format!("Lower heating value, working mass: {:.3} MJ/kg", r.working_heat_mj_kg),
        format!("Lower heating value, dry mass: {:.3} MJ/kg", r.dry_heat_mj_kg),
        format!("Lower heating value, combustible mass: {:.3} MJ/kg", r.combustible_heat_mj_kg),
    ]
    .join("\n")
}

pub fn mazut_report(r: &MazutResult) -> String {
    [
        format!(
            "Working mass: C = {:.2} %, H = {:.2} %, O = {:.2} %, S = {:.2} %, A = {:.2} %",
            r.carbon, r.hydrogen, r.oxygen, r.sulfur, r.ash
        ),
        format!("Vanadium: {:.2} mg/kg", r.vanadium_mg_kg),
        format!("Lower heating value, working mass: {:.2} MJ/kg", r.working_heat_mj_kg),
    ]
    .join("\n")
}

pub fn emissions_report(r: &EmissionResult) -> String {
    [
        format!("Solid particle emission factor: {:.2} g/GJ", r.emission_factor_g_gj),
        format!("Gross emission: {:.2} t", r.gross_emission_t),
    ]
    .join("\n")
}

fn scenario_lines(lines: &mut Vec<String>, title: &str, s: &ImbalanceScenario) {
    lines.push(title.to_string());
    lines.push(format!("Share without imbalance: {:.2} %", s.share_without_imbalance * 100.0));
    lines.push(format!("Energy without imbalance: {:.2} MWh", s.energy_without_imbalance_mwh));
    lines.push(format!("Profit: {:.2}", s.profit));
    lines.push(format!("Energy with imbalance: {:.2} MWh", s.energy_with_imbalance_mwh));
    lines.push(format!("Penalty: {:.2}", s.penalty));
    lines.push(format!("Net profit: {:.2}", s.net_profit));
}

pub fn imbalance_report(r: &ImbalanceResult) -> String {
    let mut lines = Vec::new();
    scenario_lines(&mut lines, "Current forecast:", &r.before);
    lines.push(String::new());
    scenario_lines(&mut lines, "Improved forecast:", &r.after);
    lines.join("\n")
}

pub fn reliability_report(r: &ReliabilityResult) -> String {
    [
        format!("Single circuit failure rate ω_os = {:.4} 1/year", r.single_failure_rate),
        format!("Mean restoration time t_v.os = {:.2} h", r.single_restoration_time_h),
        format!("Emergency outage coefficient k_a = {:.6}", r.emergency_outage_coefficient),
        format!("Planned outage coefficient k_p = {:.6}", r.planned_outage_coefficient),
        format!("Double circuit failure rate ω_dk = {:.6} 1/year", r.double_failure_rate),
        format!(
            "With sectionalizing breaker ω_dc = {:.6} 1/year",
            r.double_failure_rate_with_switch
        ),
        r.conclusion().to_string(),
    ]
    .join("\n")
}

pub fn undersupply_report(r: &UndersupplyResult) -> String {
    [
        format!("Expected emergency undersupply: {:.2} kWh", r.emergency_undersupply_kwh),
        format!("Expected planned undersupply: {:.2} kWh", r.planned_undersupply_kwh),
        format!("Total losses: {:.2} UAH", r.losses),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{cable_sizing, run, short_circuit, CalculationRequest, SizingInput};
    use crate::catalog::{Catalogs, EconomicDensityTable};

    #[test]
    fn test_complete_sizing_report() {
        let catalogs = Catalogs::builtin().unwrap();
        let report = sizing_report(&cable_sizing::calculate(&SizingInput::default(), &catalogs));

        assert!(report.contains("Nominal current (I_nom): 37.53 A"));
        assert!(report.contains("Post-contingency current (I_pa): 75 A"));
        assert!(report.contains("Thermal stability section (s): 42.97 mm²"));
        assert!(report.contains("conductor aluminium, insulation paper"));
        assert!(report.contains("Economic current density: 1.40 A/mm²"));
        assert!(report.contains("Conductor section: 50 mm², rated voltage: 6.0 kV"));
        assert!(report.contains("Xc = 0.0551 Ω"));
        assert!(report.contains("Xt = 1.8375 Ω"));
    }

    #[test]
    fn test_cable_not_found_report() {
        let outcome = SizingOutcome::CableNotFound {
            post_contingency_current_a: 76,
            voltage_kv: 10.0,
        };
        assert_eq!(
            sizing_report(&outcome),
            "Post-contingency current (I_pa): 76 A\nNo suitable cable found."
        );
    }

    #[test]
    fn test_density_not_found_report() {
        let builtin = Catalogs::builtin().unwrap();
        let catalogs = Catalogs::new(builtin.cables, EconomicDensityTable::default());
        let outcome = cable_sizing::calculate(&SizingInput::default(), &catalogs);
        assert_eq!(
            sizing_report(&outcome),
            "Nominal current (I_nom): 37.53 A\n\
             Post-contingency current (I_pa): 75 A\n\
             Thermal stability section (s): 42.97 mm²\n\
             Suitable cable: conductor aluminium, insulation paper, sheath aluminium\n\
             No economic current density found."
        );
    }

    #[test]
    fn test_no_adequate_section_report() {
        let catalogs = Catalogs::builtin().unwrap();
        let input = SizingInput {
            short_circuit_current_a: 250_000.0,
            ..SizingInput::default()
        };
        let outcome = cable_sizing::calculate(&input, &catalogs);
        let report = sizing_report(&outcome);
        assert!(report.starts_with("No suitable section found"));
        assert!(report.contains("4296.57 mm²"));
    }

    #[test]
    fn test_cascade_report() {
        let report = cascade_report(&short_circuit::calculate(&short_circuit::CascadeInput::default()));
        assert!(report.contains("Xt = 233.01 Ω"));
        assert!(report.contains("k_pr = 0.009"));
        assert!(report.contains("Total line length: 12.37 km"));
    }

    #[test]
    fn test_render_dispatches() {
        let catalogs = Catalogs::builtin().unwrap();
        let output = run(&CalculationRequest::CableSizing(SizingInput::default()), &catalogs).unwrap();
        assert_eq!(
            render(&output),
            sizing_report(&cable_sizing::calculate(&SizingInput::default(), &catalogs))
        );
    }
}
