//! # Form Input
//!
//! Builds calculation inputs from flat string key/value pairs as submitted
//! by a web form or typed at a prompt.
//!
//! Cable sizing and the short-circuit cascade read their fields leniently by
//! default: a value that is not a number reads as `0.0` and the calculation
//! continues with it. [`ParseMode::Strict`] turns such a value into
//! [`CalcError::InvalidInput`]. The imbalance form is always strict.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::{CascadeInput, ImbalanceInput, SizingInput};
use crate::calculations::short_circuit::LineSections;
use crate::errors::{CalcError, CalcResult};

/// Form field values keyed by field name
pub type FormValues = HashMap<String, String>;

/// Sizing form field names, in input order
pub const SIZING_FIELDS: [&str; 6] = ["currentIk", "timeTf", "powerSm", "voltage", "timeTm", "powerKZ"];

/// Cascade form field names, in input order
pub const CASCADE_FIELDS: [&str; 18] = [
    "uKmax",
    "uVn",
    "uNn",
    "sNomT",
    "rc_n",
    "xc_n",
    "rc_min",
    "xc_min",
    "r0",
    "x0",
    "section1_2",
    "section2_3",
    "section4_5",
    "section5_6",
    "section6_7",
    "section7_8",
    "section8_9",
    "section9_10",
];

/// Imbalance form field names, in input order
pub const IMBALANCE_FIELDS: [&str; 4] = ["dailyPower", "currentStdDev", "futureStdDev", "energyCost"];

/// How unparsable numeric fields are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    /// Unparsable values read as 0.0
    #[default]
    Lenient,
    /// Unparsable values are an error
    Strict,
}

/// Parse a decimal number, reading anything unparsable as `0.0`.
///
/// The text is not trimmed. Non-empty text that fails to parse is logged.
pub fn parse_lenient(field: &str, text: &str) -> f64 {
    match text.parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            if !text.is_empty() {
                warn!(field, value = text, "not a number, using 0");
            }
            0.0
        }
    }
}

/// Parse a decimal number, rejecting anything unparsable.
pub fn parse_strict(field: &str, text: &str) -> CalcResult<f64> {
    text.parse::<f64>()
        .map_err(|_| CalcError::invalid_input(field, text, "Expected a decimal number"))
}

struct FormReader<'a> {
    values: &'a FormValues,
    mode: ParseMode,
}

impl FormReader<'_> {
    fn number(&self, field: &str) -> CalcResult<f64> {
        // A missing field reads as an empty one
        let text = self.values.get(field).map(String::as_str).unwrap_or("");
        match self.mode {
            ParseMode::Lenient => Ok(parse_lenient(field, text)),
            ParseMode::Strict => parse_strict(field, text),
        }
    }
}

/// Build a [`SizingInput`] from the sizing form.
pub fn sizing_input(values: &FormValues, mode: ParseMode) -> CalcResult<SizingInput> {
    let form = FormReader { values, mode };
    Ok(SizingInput {
        short_circuit_current_a: form.number("currentIk")?,
        fault_duration_s: form.number("timeTf")?,
        branch_power_kva: form.number("powerSm")?,
        voltage_kv: form.number("voltage")?,
        utilization_hours: form.number("timeTm")?,
        short_circuit_power_mva: form.number("powerKZ")?,
    })
}

/// Build a [`CascadeInput`] from the short-circuit form.
pub fn cascade_input(values: &FormValues, mode: ParseMode) -> CalcResult<CascadeInput> {
    let form = FormReader { values, mode };
    Ok(CascadeInput {
        uk_max_percent: form.number("uKmax")?,
        hv_voltage_kv: form.number("uVn")?,
        lv_voltage_kv: form.number("uNn")?,
        transformer_power_mva: form.number("sNomT")?,
        source_resistance_normal_ohm: form.number("rc_n")?,
        source_reactance_normal_ohm: form.number("xc_n")?,
        source_resistance_min_ohm: form.number("rc_min")?,
        source_reactance_min_ohm: form.number("xc_min")?,
        line_resistance_ohm_per_km: form.number("r0")?,
        line_reactance_ohm_per_km: form.number("x0")?,
        sections: LineSections {
            section_1_2: form.number("section1_2")?,
            section_2_3: form.number("section2_3")?,
            section_4_5: form.number("section4_5")?,
            section_5_6: form.number("section5_6")?,
            section_6_7: form.number("section6_7")?,
            section_7_8: form.number("section7_8")?,
            section_8_9: form.number("section8_9")?,
            section_9_10: form.number("section9_10")?,
        },
    })
}

/// Build an [`ImbalanceInput`] from the imbalance form. Always strict.
pub fn imbalance_input(values: &FormValues) -> CalcResult<ImbalanceInput> {
    let form = FormReader {
        values,
        mode: ParseMode::Strict,
    };
    Ok(ImbalanceInput {
        daily_power_mw: form.number("dailyPower")?,
        current_std_dev_mw: form.number("currentStdDev")?,
        future_std_dev_mw: form.number("futureStdDev")?,
        energy_price: form.number("energyCost")?,
    })
}

/// Default sizing form values as the form shows them
pub fn sizing_defaults() -> FormValues {
    let d = SizingInput::default();
    to_values(
        &SIZING_FIELDS,
        &[
            d.short_circuit_current_a,
            d.fault_duration_s,
            d.branch_power_kva,
            d.voltage_kv,
            d.utilization_hours,
            d.short_circuit_power_mva,
        ],
    )
}

fn to_values(fields: &[&str], numbers: &[f64]) -> FormValues {
    fields
        .iter()
        .zip(numbers)
        .map(|(field, value)| (field.to_string(), value.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormValues {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(parse_lenient("x", "2.5"), 2.5);
        assert_eq!(parse_lenient("x", "1e3"), 1000.0);
        assert_eq!(parse_lenient("x", ""), 0.0);
        assert_eq!(parse_lenient("x", "abc"), 0.0);
        // no trimming
        assert_eq!(parse_lenient("x", " 2.5"), 0.0);
        assert_eq!(parse_lenient("x", "2,5"), 0.0);
    }

    #[test]
    fn test_parse_strict() {
        assert_eq!(parse_strict("x", "-4").unwrap(), -4.0);
        let err = parse_strict("timeTf", "two").unwrap_err();
        assert_eq!(
            err,
            CalcError::invalid_input("timeTf", "two", "Expected a decimal number")
        );
    }

    #[test]
    fn test_sizing_defaults_round_trip() {
        let input = sizing_input(&sizing_defaults(), ParseMode::Strict).unwrap();
        assert_eq!(input, SizingInput::default());
    }

    #[test]
    fn test_sizing_lenient_zeroes_bad_fields() {
        let mut values = sizing_defaults();
        values.insert("timeTf".to_string(), "abc".to_string());
        values.remove("powerKZ");

        let input = sizing_input(&values, ParseMode::Lenient).unwrap();
        assert_eq!(input.fault_duration_s, 0.0);
        assert_eq!(input.short_circuit_power_mva, 0.0);
        assert_eq!(input.short_circuit_current_a, 2500.0);

        let err = sizing_input(&values, ParseMode::Strict).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_cascade_form() {
        let values = form(&[
            ("uKmax", "11.1"),
            ("uVn", "115"),
            ("uNn", "11"),
            ("sNomT", "6.3"),
            ("rc_n", "10.65"),
            ("xc_n", "24.02"),
            ("rc_min", "34.88"),
            ("xc_min", "65.68"),
            ("r0", "0.64"),
            ("x0", "0.363"),
            ("section1_2", "0.2"),
            ("section2_3", "0.35"),
            ("section4_5", "0.2"),
            ("section5_6", "0.6"),
            ("section6_7", "2.0"),
            ("section7_8", "2.55"),
            ("section8_9", "3.37"),
            ("section9_10", "3.1"),
        ]);
        assert_eq!(values.len(), CASCADE_FIELDS.len());
        let input = cascade_input(&values, ParseMode::Strict).unwrap();
        assert_eq!(input, CascadeInput::default());
    }

    #[test]
    fn test_empty_cascade_form_is_all_zero() {
        let input = cascade_input(&FormValues::new(), ParseMode::Lenient).unwrap();
        assert_eq!(input.hv_voltage_kv, 0.0);
        assert_eq!(input.sections.total_km(), 0.0);
    }

    #[test]
    fn test_imbalance_form_is_strict() {
        let values = form(&[
            ("dailyPower", "5"),
            ("currentStdDev", "1"),
            ("futureStdDev", "0.25"),
            ("energyCost", "seven"),
        ]);
        assert!(IMBALANCE_FIELDS.iter().all(|f| values.contains_key(*f)));
        let err = imbalance_input(&values).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let mut values = values;
        values.insert("energyCost".to_string(), "7".to_string());
        assert_eq!(imbalance_input(&values).unwrap(), ImbalanceInput::default());
    }
}
