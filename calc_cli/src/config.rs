use std::path::{Path, PathBuf};

use calc_core::catalog::Catalogs;
use calc_core::file_io::{load_cable_catalog, load_density_table};
use calc_core::forms::ParseMode;
use calc_core::CalcResult;

use crate::cli::Cli;

/// Settings resolved once from flags and environment
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    pub cable_catalog: Option<PathBuf>,
    pub density_catalog: Option<PathBuf>,
    pub parse_mode: ParseMode,
    pub json: bool,
    pub output: Option<PathBuf>,
}

impl CliConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        CliConfig {
            cable_catalog: cli.cable_catalog.clone(),
            density_catalog: cli.density_catalog.clone(),
            parse_mode: if cli.strict { ParseMode::Strict } else { ParseMode::Lenient },
            json: cli.json,
            output: cli.output.clone(),
        }
    }

    /// Load the configured catalogs, falling back to the built-in ones
    pub fn load_catalogs(&self) -> CalcResult<Catalogs> {
        let builtin = Catalogs::builtin()?;
        let cables = match self.cable_catalog.as_deref() {
            Some(path) => load_cable_catalog(path)?,
            None => builtin.cables,
        };
        let densities = match self.density_catalog.as_deref() {
            Some(path) => load_density_table(path)?,
            None => builtin.densities,
        };
        Ok(Catalogs::new(cables, densities))
    }

    /// Catalog sources for the startup log line
    pub fn catalog_sources(&self) -> (String, String) {
        (describe(self.cable_catalog.as_deref()), describe(self.density_catalog.as_deref()))
    }
}

fn describe(path: Option<&Path>) -> String {
    path.map_or_else(|| "built-in".to_string(), |p| p.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults_use_builtin_catalogs() {
        let cli = Cli::try_parse_from(["voltcalc", "sizing"]).unwrap();
        let config = CliConfig::from_cli(&cli);
        assert_eq!(config.parse_mode, ParseMode::Lenient);
        if config.cable_catalog.is_none() && config.density_catalog.is_none() {
            assert_eq!(config.load_catalogs().unwrap(), Catalogs::builtin().unwrap());
        }
    }

    #[test]
    fn test_strict_flag() {
        let cli = Cli::try_parse_from(["voltcalc", "--strict", "sizing"]).unwrap();
        assert_eq!(CliConfig::from_cli(&cli).parse_mode, ParseMode::Strict);
    }

    #[test]
    fn test_missing_catalog_file_fails() {
        let cli = Cli::try_parse_from(["voltcalc", "--cable-catalog", "/nonexistent/pue.json", "sizing"]).unwrap();
        let err = CliConfig::from_cli(&cli).load_catalogs().unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_catalog_sources() {
        let config = CliConfig {
            cable_catalog: Some(PathBuf::from("pue.json")),
            density_catalog: None,
            parse_mode: ParseMode::Lenient,
            json: false,
            output: None,
        };
        assert_eq!(config.catalog_sources(), ("pue.json".to_string(), "built-in".to_string()));
    }
}
