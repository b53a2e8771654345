//! # Fuel Composition
//!
//! Converts the elemental composition of a fuel between its working, dry and
//! combustible mass and estimates the lower heating value of each.
//!
//! - [`calculate`] - solid fuel given on the working mass
//! - [`calculate_mazut`] - fuel oil given on the combustible mass, recalculated
//!   to the working mass
//!
//! All compositions are mass percentages; heating values are MJ/kg.

use serde::{Deserialize, Serialize};

/// Working-mass composition of a solid fuel (%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelInput {
    pub hydrogen: f64,
    pub carbon: f64,
    pub sulfur: f64,
    pub nitrogen: f64,
    pub oxygen: f64,
    pub moisture: f64,
    pub ash: f64,
}

/// Elemental composition (%); ash is absent on the combustible mass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub hydrogen: f64,
    pub carbon: f64,
    pub sulfur: f64,
    pub nitrogen: f64,
    pub oxygen: f64,
    pub ash: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelResult {
    /// Working → dry mass coefficient
    pub dry_coefficient: f64,
    /// Working → combustible mass coefficient
    pub combustible_coefficient: f64,
    pub dry: Composition,
    pub combustible: Composition,
    /// Lower heating value of the working mass (MJ/kg)
    pub working_heat_mj_kg: f64,
    pub dry_heat_mj_kg: f64,
    pub combustible_heat_mj_kg: f64,
}

pub fn calculate(input: &FuelInput) -> FuelResult {
    let w = input.moisture;
    let a = input.ash;
    let k_dry = 100.0 / (100.0 - w);
    let k_comb = 100.0 / (100.0 - w - a);

    let dry = Composition {
        hydrogen: input.hydrogen * k_dry,
        carbon: input.carbon * k_dry,
        sulfur: input.sulfur * k_dry,
        nitrogen: input.nitrogen * k_dry,
        oxygen: input.oxygen * k_dry,
        ash: Some(a * k_dry),
    };
    let combustible = Composition {
        hydrogen: input.hydrogen * k_comb,
        carbon: input.carbon * k_comb,
        sulfur: input.sulfur * k_comb,
        nitrogen: input.nitrogen * k_comb,
        oxygen: input.oxygen * k_comb,
        ash: None,
    };

    // Mendeleev formula, kJ/kg → MJ/kg
    let working_heat_mj_kg =
        (339.0 * input.carbon + 1030.0 * input.hydrogen - 108.8 * (input.oxygen - input.sulfur) - 25.0 * w) / 1000.0;
    let dry_heat_mj_kg = (working_heat_mj_kg + 0.025 * w) * 100.0 / (100.0 - w);
    let combustible_heat_mj_kg = (working_heat_mj_kg + 0.025 * w) * 100.0 / (100.0 - w - a);

    FuelResult {
        dry_coefficient: k_dry,
        combustible_coefficient: k_comb,
        dry,
        combustible,
        working_heat_mj_kg,
        dry_heat_mj_kg,
        combustible_heat_mj_kg,
    }
}

/// Fuel oil composition on the combustible mass, plus moisture and ash.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MazutInput {
    pub carbon: f64,
    pub hydrogen: f64,
    pub oxygen: f64,
    pub sulfur: f64,
    /// Lower heating value of the combustible mass (MJ/kg)
    pub combustible_heat_mj_kg: f64,
    /// Vanadium content of the combustible mass (mg/kg)
    pub vanadium_mg_kg: f64,
    /// Moisture of the working mass (%)
    pub moisture: f64,
    /// Ash of the dry mass (%)
    pub ash: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MazutResult {
    pub carbon: f64,
    pub hydrogen: f64,
    pub oxygen: f64,
    pub sulfur: f64,
    pub ash: f64,
    pub vanadium_mg_kg: f64,
    /// Lower heating value of the working mass (MJ/kg)
    pub working_heat_mj_kg: f64,
}

pub fn calculate_mazut(input: &MazutInput) -> MazutResult {
    let w = input.moisture;
    let to_working = (100.0 - w - input.ash) / 100.0;
    let ash = input.ash * (100.0 - w) / 100.0;

    MazutResult {
        carbon: input.carbon * to_working,
        hydrogen: input.hydrogen * to_working,
        oxygen: input.oxygen * to_working,
        sulfur: input.sulfur * to_working,
        ash,
        vanadium_mg_kg: input.vanadium_mg_kg * (100.0 - w) / 100.0,
        // uses the working-mass ash
        working_heat_mj_kg: input.combustible_heat_mj_kg * (100.0 - w - ash) / 100.0 - 0.025 * w,
    }
}
