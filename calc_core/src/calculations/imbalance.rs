//! # Solar Forecast Imbalance
//!
//! Revenue of a solar plant selling against a daily power forecast. Energy
//! delivered inside the tolerance band `[Pc − σ₂, Pc + σ₂]` is paid for;
//! energy outside it is charged as a penalty at the same price.
//!
//! The share of energy inside the band is the integral of a normal
//! distribution N(Pc, σ) over the band, evaluated with the trapezoidal rule.
//! The calculation is run for the current forecast error σ₁ and again for
//! the improved error σ₂.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Trapezoid count for the band integral
pub const INTEGRATION_STEPS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImbalanceInput {
    /// Average daily power Pc (MW)
    pub daily_power_mw: f64,
    /// Current forecast standard deviation σ₁ (MW)
    pub current_std_dev_mw: f64,
    /// Improved forecast standard deviation σ₂ (MW)
    pub future_std_dev_mw: f64,
    /// Electricity price V (thousand UAH per MWh)
    pub energy_price: f64,
}

impl Default for ImbalanceInput {
    fn default() -> Self {
        ImbalanceInput {
            daily_power_mw: 5.0,
            current_std_dev_mw: 1.0,
            future_std_dev_mw: 0.25,
            energy_price: 7.0,
        }
    }
}

/// Revenue figures for one forecast accuracy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImbalanceScenario {
    /// Share of energy inside the tolerance band
    pub share_without_imbalance: f64,
    /// Energy inside the band (MWh)
    pub energy_without_imbalance_mwh: f64,
    pub profit: f64,
    /// Energy outside the band (MWh)
    pub energy_with_imbalance_mwh: f64,
    pub penalty: f64,
    pub net_profit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImbalanceResult {
    pub before: ImbalanceScenario,
    pub after: ImbalanceScenario,
}

/// Normal probability density at `p`
pub fn normal_density(p: f64, mean: f64, std_dev: f64) -> f64 {
    (1.0 / (std_dev * (2.0 * PI).sqrt())) * (-(p - mean).powi(2) / (2.0 * std_dev.powi(2))).exp()
}

/// Trapezoidal integral of N(mean, std_dev) over `[lower, upper]`
pub fn integrate_normal(mean: f64, std_dev: f64, lower: f64, upper: f64) -> f64 {
    let step = (upper - lower) / INTEGRATION_STEPS as f64;
    (0..INTEGRATION_STEPS)
        .map(|i| {
            let x1 = lower + i as f64 * step;
            let x2 = lower + (i + 1) as f64 * step;
            0.5 * (normal_density(x1, mean, std_dev) + normal_density(x2, mean, std_dev)) * step
        })
        .sum()
}

fn scenario(daily_power_mw: f64, share: f64, price: f64) -> ImbalanceScenario {
    let energy_without_imbalance_mwh = daily_power_mw * 24.0 * share;
    let energy_with_imbalance_mwh = daily_power_mw * 24.0 * (1.0 - share);
    let profit = energy_without_imbalance_mwh * price;
    let penalty = energy_with_imbalance_mwh * price;
    ImbalanceScenario {
        share_without_imbalance: share,
        energy_without_imbalance_mwh,
        profit,
        energy_with_imbalance_mwh,
        penalty,
        net_profit: profit - penalty,
    }
}

impl ImbalanceInput {
    pub fn validate(&self) -> CalcResult<()> {
        let fields = [
            ("daily_power_mw", self.daily_power_mw),
            ("current_std_dev_mw", self.current_std_dev_mw),
            ("future_std_dev_mw", self.future_std_dev_mw),
            ("energy_price", self.energy_price),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"));
            }
        }
        Ok(())
    }
}

pub fn calculate(input: &ImbalanceInput) -> CalcResult<ImbalanceResult> {
    input.validate()?;

    let pc = input.daily_power_mw;
    let lower = pc - input.future_std_dev_mw;
    let upper = pc + input.future_std_dev_mw;

    let share_before = integrate_normal(pc, input.current_std_dev_mw, lower, upper);
    let share_after = integrate_normal(pc, input.future_std_dev_mw, lower, upper);

    Ok(ImbalanceResult {
        before: scenario(pc, share_before, input.energy_price),
        after: scenario(pc, share_after, input.energy_price),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_over_one_sigma() {
        // ±1σ of a normal distribution holds 68.27 % of the mass
        let share = integrate_normal(0.0, 1.0, -1.0, 1.0);
        assert!((share - 0.6827).abs() < 1e-4);
    }

    #[test]
    fn test_reference_case() {
        let r = calculate(&ImbalanceInput::default()).unwrap();

        // σ₁ = 1: band ±0.25 holds about 19.7 %
        assert!((r.before.share_without_imbalance - 0.1974).abs() < 1e-3);
        assert!((r.before.energy_without_imbalance_mwh - 23.7).abs() < 0.1);
        assert!(r.before.net_profit < 0.0);

        // σ₂ = 0.25: band is ±1σ
        assert!((r.after.share_without_imbalance - 0.6827).abs() < 1e-3);
        assert!((r.after.energy_without_imbalance_mwh - 81.9).abs() < 0.1);
        assert!(r.after.net_profit > 0.0);
    }

    #[test]
    fn test_energy_split_adds_up() {
        let r = calculate(&ImbalanceInput::default()).unwrap();
        for s in [r.before, r.after] {
            assert!((s.energy_without_imbalance_mwh + s.energy_with_imbalance_mwh - 120.0).abs() < 1e-9);
            assert!((s.net_profit - (s.profit - s.penalty)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rejects_non_finite_input() {
        let input = ImbalanceInput {
            energy_price: f64::NAN,
            ..ImbalanceInput::default()
        };
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");
    }
}
