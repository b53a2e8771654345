//! # Error Types
//!
//! Structured error types for calc_core. Lookup misses carry the value that
//! failed to match so the caller can explain which step of a calculation
//! stopped and why.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_mass(mass_t: f64) -> CalcResult<()> {
//!     if mass_t <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "mass_t",
//!             mass_t.to_string(),
//!             "Fuel mass must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (not numeric, out of range)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// No catalog cable is rated for exactly this current at this voltage
    #[error("No cable rated for {current_a} A at {voltage_kv} kV")]
    CableNotFound { current_a: i64, voltage_kv: f64 },

    /// No economic density entry for this conductor/insulation pair
    #[error("No economic current density for {conductor}/{insulation}")]
    DensityNotFound {
        conductor: String,
        insulation: String,
    },

    /// The cable family has nothing at or above the required cross-section
    #[error("No section of at least {required_mm2:.2} mm² in the {conductor}/{insulation} family")]
    NoAdequateSection {
        conductor: String,
        insulation: String,
        required_mm2: f64,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DensityNotFound error
    pub fn density_not_found(conductor: impl Into<String>, insulation: impl Into<String>) -> Self {
        CalcError::DensityNotFound {
            conductor: conductor.into(),
            insulation: insulation.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for catalog lookup misses, which end a calculation with a
    /// partial report rather than aborting the request.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(
            self,
            CalcError::CableNotFound { .. }
                | CalcError::DensityNotFound { .. }
                | CalcError::NoAdequateSection { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::CableNotFound { .. } => "CABLE_NOT_FOUND",
            CalcError::DensityNotFound { .. } => "DENSITY_NOT_FOUND",
            CalcError::NoAdequateSection { .. } => "NO_ADEQUATE_SECTION",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("mass_t", "-5.0", "Fuel mass must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::density_not_found("copper", "paper").error_code(),
            "DENSITY_NOT_FOUND"
        );
        let miss = CalcError::CableNotFound {
            current_a: 75,
            voltage_kv: 10.0,
        };
        assert_eq!(miss.error_code(), "CABLE_NOT_FOUND");
        assert!(miss.is_lookup_miss());
        assert!(!CalcError::file_error("open", "pue.json", "missing").is_lookup_miss());
    }

    #[test]
    fn test_display_mentions_required_section() {
        let err = CalcError::NoAdequateSection {
            conductor: "aluminium".to_string(),
            insulation: "paper".to_string(),
            required_mm2: 512.345,
        };
        assert!(err.to_string().contains("512.35 mm²"));
    }
}
