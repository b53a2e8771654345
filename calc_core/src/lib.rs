//! # calc_core - Power Supply Calculation Engine
//!
//! `calc_core` is the computational heart of Voltcalc: cable sizing against
//! reference catalogs, short-circuit currents, fuel and emission estimates,
//! and supply reliability. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Read-only catalogs**: Loaded once, shared by reference
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::{run, CalculationRequest, SizingInput};
//! use calc_core::catalog::Catalogs;
//! use calc_core::report::render;
//!
//! let catalogs = Catalogs::builtin().unwrap();
//! let output = run(&CalculationRequest::CableSizing(SizingInput::default()), &catalogs).unwrap();
//! println!("{}", render(&output));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - All calculation types
//! - [`catalog`] - Cable catalog and economic density table
//! - [`forms`] - Inputs from string form fields
//! - [`report`] - Plain-text reports
//! - [`errors`] - Structured error types
//! - [`file_io`] - Catalog and request files

pub mod calculations;
pub mod catalog;
pub mod errors;
pub mod file_io;
pub mod forms;
pub mod report;

// Re-export commonly used types at crate root for convenience
pub use calculations::{run, CalculationOutput, CalculationRequest};
pub use catalog::Catalogs;
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_catalogs, load_request, save_json};
