//! # Supply Reliability
//!
//! Compares a single-circuit supply against a double-circuit one built from
//! the same equipment, and estimates the cost of undersupplied energy.
//!
//! Equipment failure data (ω, t_v, μ, t_p) comes from a fixed reference
//! table, [`EQUIPMENT`]. Lines are counted per kilometre, busbars per
//! connection, everything else once.

use serde::{Deserialize, Serialize};

/// Hours in a year
pub const HOURS_PER_YEAR: f64 = 8760.0;

/// Reference failure data for one kind of equipment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Equipment {
    pub id: u32,
    pub name: &'static str,
    /// Failure rate ω (1/year)
    pub failure_rate: f64,
    /// Mean restoration time t_v (h)
    pub restoration_time_h: f64,
    /// Planned outage rate μ (1/year)
    pub planned_outage_rate: f64,
    /// Mean planned outage duration t_p (h)
    pub planned_outage_h: f64,
    /// Failure rate is per kilometre of line
    pub requires_length: bool,
    /// Failure rate is per connection
    pub requires_quantity: bool,
}

const fn equipment(
    id: u32,
    name: &'static str,
    failure_rate: f64,
    restoration_time_h: f64,
    planned_outage_rate: f64,
    planned_outage_h: f64,
    requires_length: bool,
    requires_quantity: bool,
) -> Equipment {
    Equipment {
        id,
        name,
        failure_rate,
        restoration_time_h,
        planned_outage_rate,
        planned_outage_h,
        requires_length,
        requires_quantity,
    }
}

pub const EQUIPMENT: [Equipment; 16] = [
    equipment(1, "Overhead line 110 kV", 0.007, 10.0, 0.167, 35.0, true, false),
    equipment(2, "Overhead line 35 kV", 0.02, 8.0, 0.167, 35.0, true, false),
    equipment(3, "Overhead line 10 kV", 0.02, 10.0, 0.167, 35.0, true, false),
    equipment(4, "Cable line 10 kV (trench)", 0.03, 44.0, 1.0, 9.0, true, false),
    equipment(5, "Cable line 10 kV (cable channel)", 0.005, 17.5, 1.0, 9.0, true, false),
    equipment(6, "Busbars 10 kV", 0.03, 2.0, 0.167, 5.0, false, true),
    equipment(7, "Transformer 110 kV", 0.015, 100.0, 1.0, 43.0, false, false),
    equipment(8, "Transformer 35 kV", 0.02, 80.0, 1.0, 28.0, false, false),
    equipment(9, "Transformer 10 kV (cable network)", 0.005, 60.0, 0.5, 10.0, false, false),
    equipment(10, "Transformer 10 kV (overhead network)", 0.05, 60.0, 0.5, 10.0, false, false),
    equipment(11, "Circuit breaker 110 kV (SF6)", 0.01, 30.0, 0.1, 30.0, false, false),
    equipment(12, "Circuit breaker 10 kV (low-oil)", 0.02, 15.0, 0.33, 15.0, false, false),
    equipment(13, "Circuit breaker 10 kV (vacuum)", 0.01, 15.0, 0.33, 15.0, false, false),
    equipment(14, "Circuit breaker 0.38 kV", 0.05, 4.0, 0.33, 10.0, false, false),
    equipment(15, "Electric motor 6-10 kV", 0.1, 160.0, 0.5, 0.0, false, false),
    equipment(16, "Electric motor 0.38 kV", 0.1, 50.0, 0.5, 0.0, false, false),
];

/// Look up reference equipment by id
pub fn equipment_by_id(id: u32) -> Option<&'static Equipment> {
    EQUIPMENT.iter().find(|e| e.id == id)
}

/// One piece of equipment in the supply circuit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectedEquipment {
    pub id: u32,
    /// Line length (km), used when the equipment requires it
    #[serde(default)]
    pub length_km: f64,
    /// Connection count, used when the equipment requires it
    #[serde(default)]
    pub quantity: u32,
}

impl SelectedEquipment {
    /// Multiplier applied to the reference failure rate
    pub fn multiplier(&self, equipment: &Equipment) -> f64 {
        if equipment.requires_quantity {
            f64::from(self.quantity)
        } else if equipment.requires_length {
            self.length_km
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityInput {
    pub equipment: Vec<SelectedEquipment>,
    /// Sectionalizing breaker of the double circuit
    pub switch_id: u32,
}

impl Default for ReliabilityInput {
    fn default() -> Self {
        ReliabilityInput {
            equipment: vec![
                SelectedEquipment { id: 1, length_km: 10.0, quantity: 0 },
                SelectedEquipment { id: 7, length_km: 0.0, quantity: 0 },
                SelectedEquipment { id: 11, length_km: 0.0, quantity: 0 },
                SelectedEquipment { id: 6, length_km: 0.0, quantity: 1 },
            ],
            switch_id: 11,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityResult {
    /// Failure rate of the single circuit ω_os (1/year)
    pub single_failure_rate: f64,
    /// Mean restoration time of the single circuit (h)
    pub single_restoration_time_h: f64,
    /// Emergency outage coefficient k_a
    pub emergency_outage_coefficient: f64,
    /// Planned outage coefficient k_p
    pub planned_outage_coefficient: f64,
    /// Simultaneous failure rate of both circuits ω_dk (1/year)
    pub double_failure_rate: f64,
    /// ω_dk plus the sectionalizing breaker (1/year)
    pub double_failure_rate_with_switch: f64,
}

impl ReliabilityResult {
    pub fn single_circuit_less_reliable(&self) -> bool {
        self.single_failure_rate > self.double_failure_rate_with_switch
    }

    pub fn conclusion(&self) -> &'static str {
        if self.single_circuit_less_reliable() {
            "Single-circuit supply is less reliable than double-circuit supply"
        } else {
            "Double-circuit supply is less reliable than single-circuit supply"
        }
    }
}

pub fn calculate(input: &ReliabilityInput) -> ReliabilityResult {
    let mut failure_rate = 0.0;
    let mut weighted_restoration = 0.0;
    let mut max_planned_outage_h: f64 = 0.0;

    for selected in &input.equipment {
        let Some(eq) = equipment_by_id(selected.id) else {
            tracing::debug!(id = selected.id, "unknown equipment id skipped");
            continue;
        };
        let m = selected.multiplier(eq);
        failure_rate += eq.failure_rate * m;
        weighted_restoration += eq.restoration_time_h * eq.failure_rate * m;
        max_planned_outage_h = max_planned_outage_h.max(eq.planned_outage_h);
    }

    let (restoration_time_h, k_a, k_p) = if failure_rate > 0.0 {
        let t_v = weighted_restoration / failure_rate;
        (
            t_v,
            failure_rate * t_v / HOURS_PER_YEAR,
            1.2 * max_planned_outage_h / HOURS_PER_YEAR,
        )
    } else {
        (0.0, 0.0, 0.0)
    };

    let double_failure_rate = 2.0 * failure_rate * (k_a + k_p);
    let switch_rate = equipment_by_id(input.switch_id).map_or(0.0, |e| e.failure_rate);

    ReliabilityResult {
        single_failure_rate: failure_rate,
        single_restoration_time_h: restoration_time_h,
        emergency_outage_coefficient: k_a,
        planned_outage_coefficient: k_p,
        double_failure_rate,
        double_failure_rate_with_switch: double_failure_rate + switch_rate,
    }
}

/// Undersupplied energy and its cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UndersupplyInput {
    /// Failure rate ω (1/year)
    pub failure_rate: f64,
    /// Mean restoration time t_v (years)
    pub restoration_time: f64,
    /// Maximum load P_m (kW)
    pub max_load_kw: f64,
    /// Planned outage coefficient k_p
    pub planned_outage_coefficient: f64,
    /// Annual utilization time T_m (h)
    pub utilization_hours: f64,
    /// Specific loss for emergency undersupply (UAH/kWh)
    pub emergency_loss_per_kwh: f64,
    /// Specific loss for planned undersupply (UAH/kWh)
    pub planned_loss_per_kwh: f64,
}

impl Default for UndersupplyInput {
    fn default() -> Self {
        UndersupplyInput {
            failure_rate: 0.1,
            restoration_time: 0.045,
            max_load_kw: 5120.0,
            planned_outage_coefficient: 0.004,
            utilization_hours: 6451.0,
            emergency_loss_per_kwh: 23.6,
            planned_loss_per_kwh: 17.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UndersupplyResult {
    /// Expected emergency undersupply M_a (kWh)
    pub emergency_undersupply_kwh: f64,
    /// Expected planned undersupply M_p (kWh)
    pub planned_undersupply_kwh: f64,
    /// Total losses (UAH)
    pub losses: f64,
}

pub fn calculate_undersupply(input: &UndersupplyInput) -> UndersupplyResult {
    let energy = input.max_load_kw * input.utilization_hours;
    let emergency_undersupply_kwh = input.failure_rate * input.restoration_time * energy;
    let planned_undersupply_kwh = input.planned_outage_coefficient * energy;

    UndersupplyResult {
        emergency_undersupply_kwh,
        planned_undersupply_kwh,
        losses: input.emergency_loss_per_kwh * emergency_undersupply_kwh
            + input.planned_loss_per_kwh * planned_undersupply_kwh,
    }
}
