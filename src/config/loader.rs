//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! settings and the income bracket table from a configuration directory.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::BracketTable;

use super::bracket_source::BracketTableLoader;
use super::types::Settings;

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/kinderopvang_2026/
/// ├── settings.yaml      # Table name, year, tax factor, bracket source
/// └── toeslagtabel.csv   # Income bracket table
/// ```
///
/// # Example
///
/// ```no_run
/// use childcare_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/kinderopvang_2026").unwrap();
/// println!("{} bands, tax factor {}", loader.brackets().len(), loader.tax_factor());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: Settings,
    brackets: BracketTable,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if:
    /// - `settings.yaml` is missing or invalid
    /// - the configured bracket source is missing, unreadable or malformed
    ///
    /// ```no_run
    /// use childcare_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/kinderopvang_2026")?;
    /// # Ok::<(), childcare_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings_path = path.join("settings.yaml");
        let settings = Self::load_yaml::<Settings>(&settings_path)?;

        // u8::try_from alone would let Latin-1 characters through
        let delimiter = Some(settings.bracket_source.delimiter)
            .filter(char::is_ascii)
            .and_then(|c| u8::try_from(c).ok())
            .ok_or_else(|| EngineError::ConfigParseError {
                path: settings_path.display().to_string(),
                message: format!(
                    "bracket_source.delimiter must be a single ASCII character, got '{}'",
                    settings.bracket_source.delimiter
                ),
            })?;

        let brackets = BracketTableLoader::new()
            .with_delimiter(delimiter)
            .load(path.join(&settings.bracket_source.file))?;

        Ok(Self { settings, brackets })
    }

    /// Builds a loader from values already in memory.
    pub fn from_parts(settings: Settings, brackets: BracketTable) -> Self {
        Self { settings, brackets }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the income bracket table.
    pub fn brackets(&self) -> &BracketTable {
        &self.brackets
    }

    /// Returns the default tax factor.
    pub fn tax_factor(&self) -> Decimal {
        self.settings.tax_factor
    }

    /// Returns the tolerance for an `EQUAL` verdict, zero when comparing exactly.
    pub fn equality_tolerance(&self) -> Decimal {
        self.settings
            .comparison
            .equality_tolerance
            .unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataLoadError;
    use crate::models::UpperBound;
    use std::path::PathBuf;
    use std::str::FromStr;
    use uuid::Uuid;

    fn config_path() -> &'static str {
        "./config/kinderopvang_2026"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// A fresh directory holding only `settings.yaml`.
    fn settings_dir(name: &str, settings: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("{}_{}", name, Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("settings.yaml"), settings).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.settings().name, "Kinderopvangtoeslag 2026");
        assert_eq!(loader.settings().year, 2026);
        assert_eq!(loader.tax_factor(), dec("0.50"));
        assert_eq!(loader.equality_tolerance(), Decimal::ZERO);
    }

    #[test]
    fn test_bracket_table_loaded_and_well_formed() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let table = loader.brackets();

        assert!(table.len() > 10);
        assert!(table.well_formedness_issues().is_empty());
        assert_eq!(table.bands()[0].lower_bound, Decimal::ZERO);
        assert_eq!(table.bands()[0].subsidy_pct, dec("0.96"));

        let last = table.bands()[table.len() - 1];
        assert_eq!(last.upper_bound, UpperBound::Unbounded);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("settings.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_missing_bracket_file_is_data_load_error() {
        let dir = settings_dir(
            "childcare_engine_missing_csv",
            "name: test\nyear: 2026\nbracket_source:\n  file: nowhere.csv\n",
        );

        let result = ConfigLoader::load(&dir);
        fs::remove_dir_all(&dir).unwrap();

        match result {
            Err(EngineError::DataLoad(DataLoadError::SourceNotFound { path })) => {
                assert!(path.contains("nowhere.csv"));
            }
            other => panic!("Expected SourceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_settings_is_parse_error() {
        let dir = settings_dir("childcare_engine_bad_yaml", "name: [unclosed\n");

        let result = ConfigLoader::load(&dir);
        fs::remove_dir_all(&dir).unwrap();

        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_non_ascii_delimiter_is_parse_error() {
        let dir = settings_dir(
            "childcare_engine_latin1_delimiter",
            "name: test\nyear: 2026\nbracket_source:\n  file: table.csv\n  delimiter: \"é\"\n",
        );

        let result = ConfigLoader::load(&dir);
        fs::remove_dir_all(&dir).unwrap();

        match result {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("single ASCII character"));
                assert!(message.contains('é'));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_equality_tolerance_from_settings() {
        let settings: Settings = serde_yaml::from_str(
            "name: t\nyear: 2026\nbracket_source:\n  file: x.csv\ncomparison:\n  equality_tolerance: \"0.01\"\n",
        )
        .unwrap();
        let loader = ConfigLoader::from_parts(settings, BracketTable::new(vec![]));

        assert_eq!(loader.equality_tolerance(), dec("0.01"));
    }
}
