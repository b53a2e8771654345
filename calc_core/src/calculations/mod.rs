//! # Power Supply Calculations
//!
//! Each calculation follows the same pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input)` - Pure calculation function
//!
//! Cable sizing needs the loaded [`Catalogs`]; everything else depends only
//! on its input.
//!
//! ## Available Calculations
//!
//! - [`cable_sizing`] - Feeder cable by thermal stability and economic density
//! - [`cable_selection`] - Catalog lookups used by cable sizing
//! - [`short_circuit`] - Short-circuit currents along a transformer feeder
//! - [`fuel`] - Fuel composition and heating value
//! - [`emissions`] - Solid particle emissions from burning fuel
//! - [`imbalance`] - Solar plant revenue against a power forecast
//! - [`reliability`] - Single vs. double circuit supply and undersupply losses

pub mod cable_selection;
pub mod cable_sizing;
pub mod emissions;
pub mod fuel;
pub mod imbalance;
pub mod reliability;
pub mod short_circuit;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalogs;
use crate::errors::CalcResult;

pub use cable_sizing::{SizingInput, SizingOutcome, SizingResult};
pub use emissions::{EmissionInput, EmissionResult, FuelKind};
pub use fuel::{FuelInput, FuelResult, MazutInput, MazutResult};
pub use imbalance::{ImbalanceInput, ImbalanceResult};
pub use reliability::{ReliabilityInput, ReliabilityResult, UndersupplyInput, UndersupplyResult};
pub use short_circuit::{CascadeInput, CascadeResult};

/// Any calculation request, tagged by its `type`.
///
/// ## JSON Example
///
/// ```json
/// { "type": "Emissions", "fuel": "Coal", "mass_t": 1096363.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationRequest {
    CableSizing(SizingInput),
    ShortCircuit(CascadeInput),
    Fuel(FuelInput),
    Mazut(MazutInput),
    Emissions(EmissionInput),
    Imbalance(ImbalanceInput),
    Reliability(ReliabilityInput),
    Undersupply(UndersupplyInput),
}

impl CalculationRequest {
    /// Human-readable name of the calculation
    pub fn label(&self) -> &'static str {
        match self {
            CalculationRequest::CableSizing(_) => "Cable sizing",
            CalculationRequest::ShortCircuit(_) => "Short-circuit currents",
            CalculationRequest::Fuel(_) => "Fuel composition",
            CalculationRequest::Mazut(_) => "Fuel oil composition",
            CalculationRequest::Emissions(_) => "Particulate emissions",
            CalculationRequest::Imbalance(_) => "Solar forecast imbalance",
            CalculationRequest::Reliability(_) => "Supply reliability",
            CalculationRequest::Undersupply(_) => "Undersupply losses",
        }
    }

    /// The `type` tag as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationRequest::CableSizing(_) => "CableSizing",
            CalculationRequest::ShortCircuit(_) => "ShortCircuit",
            CalculationRequest::Fuel(_) => "Fuel",
            CalculationRequest::Mazut(_) => "Mazut",
            CalculationRequest::Emissions(_) => "Emissions",
            CalculationRequest::Imbalance(_) => "Imbalance",
            CalculationRequest::Reliability(_) => "Reliability",
            CalculationRequest::Undersupply(_) => "Undersupply",
        }
    }
}

/// Result of a [`CalculationRequest`], one variant per request type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "result")]
pub enum CalculationOutput {
    CableSizing(SizingOutcome),
    ShortCircuit(CascadeResult),
    Fuel(FuelResult),
    Mazut(MazutResult),
    Emissions(EmissionResult),
    Imbalance(ImbalanceResult),
    Reliability(ReliabilityResult),
    Undersupply(UndersupplyResult),
}

/// Run any calculation.
///
/// A cable sizing that stops at a lookup miss is still `Ok`; the miss is
/// carried inside the [`SizingOutcome`].
pub fn run(request: &CalculationRequest, catalogs: &Catalogs) -> CalcResult<CalculationOutput> {
    tracing::debug!(calc_type = request.calc_type(), "running calculation");

    let output = match request {
        CalculationRequest::CableSizing(input) => {
            CalculationOutput::CableSizing(cable_sizing::calculate(input, catalogs))
        }
        CalculationRequest::ShortCircuit(input) => CalculationOutput::ShortCircuit(short_circuit::calculate(input)),
        CalculationRequest::Fuel(input) => CalculationOutput::Fuel(fuel::calculate(input)),
        CalculationRequest::Mazut(input) => CalculationOutput::Mazut(fuel::calculate_mazut(input)),
        CalculationRequest::Emissions(input) => CalculationOutput::Emissions(emissions::calculate(input)?),
        CalculationRequest::Imbalance(input) => CalculationOutput::Imbalance(imbalance::calculate(input)?),
        CalculationRequest::Reliability(input) => CalculationOutput::Reliability(reliability::calculate(input)),
        CalculationRequest::Undersupply(input) => {
            CalculationOutput::Undersupply(reliability::calculate_undersupply(input))
        }
    };
    Ok(output)
}
