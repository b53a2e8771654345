//! # Particulate Emissions
//!
//! Emission factor of solid particles and the gross emission for burning a
//! given mass of fuel:
//!
//! - `k = (10⁶ / Q) · a · (A / (100 − G)) · (1 − η)` (g/GJ)
//! - `E = 10⁻⁶ · k · B · Q` (t)
//!
//! where Q is the lower heating value, A the ash content, G the combustible
//! matter in fly ash, a the fly-ash share and η the ash collector efficiency.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Fuels with tabulated burning properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelKind {
    /// Donetsk gas coal, grade GR
    Coal,
    /// High-sulfur fuel oil, grade 40
    FuelOil,
    /// Natural gas (no solid particles)
    NaturalGas,
}

/// Burning properties used by the emission formula
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelProperties {
    /// Lower heating value Q (MJ/kg)
    pub heating_value_mj_kg: f64,
    /// Ash content of the working mass A (%)
    pub ash_percent: f64,
    /// Combustible matter in fly ash G (%)
    pub fly_ash_combustibles_percent: f64,
    /// Share of ash carried away as fly ash a
    pub fly_ash_share: f64,
    /// Ash collector efficiency η
    pub collector_efficiency: f64,
}

impl FuelKind {
    /// Burning properties, `None` for fuels without solid particles
    pub fn properties(&self) -> Option<FuelProperties> {
        match self {
            FuelKind::Coal => Some(FuelProperties {
                heating_value_mj_kg: 20.47,
                ash_percent: 25.20,
                fly_ash_combustibles_percent: 1.5,
                fly_ash_share: 0.8,
                collector_efficiency: 0.985,
            }),
            FuelKind::FuelOil => Some(FuelProperties {
                heating_value_mj_kg: 40.40,
                ash_percent: 0.15,
                fly_ash_combustibles_percent: 0.0,
                fly_ash_share: 1.0,
                collector_efficiency: 0.985,
            }),
            FuelKind::NaturalGas => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FuelKind::Coal => "Donetsk gas coal GR",
            FuelKind::FuelOil => "High-sulfur fuel oil 40",
            FuelKind::NaturalGas => "Natural gas",
        }
    }
}

impl std::str::FromStr for FuelKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "coal" => Ok(FuelKind::Coal),
            "fuel-oil" | "fuel_oil" | "mazut" => Ok(FuelKind::FuelOil),
            "natural-gas" | "natural_gas" | "gas" => Ok(FuelKind::NaturalGas),
            _ => Err(CalcError::invalid_input(
                "fuel",
                s,
                "Expected coal, fuel-oil or natural-gas",
            )),
        }
    }
}

impl std::fmt::Display for FuelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionInput {
    pub fuel: FuelKind,
    /// Burned fuel mass B (t)
    pub mass_t: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionResult {
    /// Emission factor k (g/GJ)
    pub emission_factor_g_gj: f64,
    /// Gross emission E (t)
    pub gross_emission_t: f64,
}

impl EmissionInput {
    pub fn validate(&self) -> CalcResult<()> {
        if self.mass_t.is_nan() || self.mass_t <= 0.0 {
            return Err(CalcError::invalid_input(
                "mass_t",
                self.mass_t.to_string(),
                "Fuel mass must be positive",
            ));
        }
        Ok(())
    }
}

pub fn calculate(input: &EmissionInput) -> CalcResult<EmissionResult> {
    input.validate()?;

    let Some(p) = input.fuel.properties() else {
        return Ok(EmissionResult {
            emission_factor_g_gj: 0.0,
            gross_emission_t: 0.0,
        });
    };

    let emission_factor_g_gj = (1e6 / p.heating_value_mj_kg)
        * p.fly_ash_share
        * (p.ash_percent / (100.0 - p.fly_ash_combustibles_percent))
        * (1.0 - p.collector_efficiency);
    let gross_emission_t = 1e-6 * emission_factor_g_gj * input.mass_t * p.heating_value_mj_kg;

    Ok(EmissionResult {
        emission_factor_g_gj,
        gross_emission_t,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coal_emission_factor() {
        let r = calculate(&EmissionInput {
            fuel: FuelKind::Coal,
            mass_t: 1_096_363.0,
        })
        .unwrap();
        // 10⁶/20.47 · 0.8 · 25.2/98.5 · 0.015
        assert!((r.emission_factor_g_gj - 149.98).abs() < 0.01);
        assert!((r.gross_emission_t - 3365.9).abs() < 0.5);
    }

    #[test]
    fn test_fuel_oil_emission_factor() {
        let r = calculate(&EmissionInput {
            fuel: FuelKind::FuelOil,
            mass_t: 70_945.0,
        })
        .unwrap();
        assert!((r.emission_factor_g_gj - 0.557).abs() < 0.001);
    }

    #[test]
    fn test_gas_has_no_particles() {
        let r = calculate(&EmissionInput {
            fuel: FuelKind::NaturalGas,
            mass_t: 84_762.0,
        })
        .unwrap();
        assert_eq!(r.emission_factor_g_gj, 0.0);
        assert_eq!(r.gross_emission_t, 0.0);
    }

    #[test]
    fn test_fuel_kind_from_str() {
        assert_eq!("Coal".parse::<FuelKind>().unwrap(), FuelKind::Coal);
        assert_eq!("mazut".parse::<FuelKind>().unwrap(), FuelKind::FuelOil);
        assert_eq!("natural-gas".parse::<FuelKind>().unwrap(), FuelKind::NaturalGas);
        assert!("peat".parse::<FuelKind>().is_err());
    }

    #[test]
    fn test_mass_must_be_positive() {
        for mass_t in [0.0, -1.0, f64::NAN] {
            let err = calculate(&EmissionInput {
                fuel: FuelKind::Coal,
                mass_t,
            })
            .unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT");
        }
    }
}
