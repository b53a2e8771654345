//! # File I/O Module
//!
//! Loads catalogs and calculation requests from JSON files and writes
//! calculation output.
//!
//! - **Catalogs**: cable catalog and economic density table, read once at
//!   startup
//! - **Requests**: a single [`CalculationRequest`] per file
//! - **Atomic saves**: output is written to `.tmp`, synced and renamed so a
//!   reader never sees a half-written file
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::file_io::load_catalogs;
//! use std::path::Path;
//!
//! let catalogs = load_catalogs(Path::new("data/pue.json"), Path::new("data/economic_density.json"))?;
//! println!("{} cable records", catalogs.cables.record_count());
//! # Ok::<(), calc_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::calculations::CalculationRequest;
use crate::catalog::{CableCatalog, Catalogs, EconomicDensityTable};
use crate::errors::{CalcError, CalcResult};

fn read_to_string(path: &Path) -> CalcResult<String> {
    let mut file = File::open(path).map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let contents = read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// Load a cable catalog file.
///
/// # Returns
///
/// * `Ok(CableCatalog)` - Families in file order
/// * `Err(CalcError::FileError)` - Missing or unreadable file
/// * `Err(CalcError::SerializationError)` - Malformed JSON
pub fn load_cable_catalog(path: &Path) -> CalcResult<CableCatalog> {
    let catalog: CableCatalog = load_json(path)?;
    info!(
        path = %path.display(),
        families = catalog.families().len(),
        records = catalog.record_count(),
        "loaded cable catalog"
    );
    Ok(catalog)
}

/// Load an economic density table file.
pub fn load_density_table(path: &Path) -> CalcResult<EconomicDensityTable> {
    let table: EconomicDensityTable = load_json(path)?;
    info!(path = %path.display(), entries = table.entries().len(), "loaded economic density table");
    Ok(table)
}

/// Load both catalogs. Either failure aborts the load.
pub fn load_catalogs(cable_path: &Path, density_path: &Path) -> CalcResult<Catalogs> {
    Ok(Catalogs::new(load_cable_catalog(cable_path)?, load_density_table(density_path)?))
}

/// Load a calculation request file.
pub fn load_request(path: &Path) -> CalcResult<CalculationRequest> {
    load_json(path)
}

/// Save any serializable value as pretty JSON with atomic write semantics.
///
/// The value is written to a temporary file next to `path`, synced to disk
/// and renamed over `path`.
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value)?;

    let tmp_path = path.with_extension("json.tmp");

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .sync_all()
        .map_err(|e| CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{run, CalculationOutput, SizingInput};
    use crate::catalog::{BUILTIN_CABLE_CATALOG, BUILTIN_DENSITY_TABLE};
    use tempfile::tempdir;

    #[test]
    fn test_load_catalogs_from_files() {
        let dir = tempdir().unwrap();
        let cable_path = dir.path().join("pue.json");
        let density_path = dir.path().join("density.json");
        fs::write(&cable_path, BUILTIN_CABLE_CATALOG).unwrap();
        fs::write(&density_path, BUILTIN_DENSITY_TABLE).unwrap();

        let loaded = load_catalogs(&cable_path, &density_path).unwrap();
        assert_eq!(loaded, Catalogs::builtin().unwrap());
    }

    #[test]
    fn test_missing_file_is_file_error() {
        let dir = tempdir().unwrap();
        let err = load_cable_catalog(&dir.path().join("missing.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
        match err {
            CalcError::FileError { operation, .. } => assert_eq!(operation, "open"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_catalog_is_serialization_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "[{\"conductor\": \"copper\"").unwrap();

        let err = load_density_table(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_load_request() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("request.json");
        fs::write(&path, r#"{"type": "Undersupply", "failure_rate": 0.1, "restoration_time": 0.045,
            "max_load_kw": 5120, "planned_outage_coefficient": 0.004, "utilization_hours": 6451,
            "emergency_loss_per_kwh": 23.6, "planned_loss_per_kwh": 17.6}"#)
            .unwrap();

        let request = load_request(&path).unwrap();
        assert_eq!(request.calc_type(), "Undersupply");
    }

    #[test]
    fn test_save_json_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.json");
        let catalogs = Catalogs::builtin().unwrap();
        let output = run(&CalculationRequest::CableSizing(SizingInput::default()), &catalogs).unwrap();

        save_json(&output, &path).unwrap();

        assert!(!path.with_extension("json.tmp").exists());
        let loaded: CalculationOutput = load_json(&path).unwrap();
        assert_eq!(loaded, output);
    }
}
