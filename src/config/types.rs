//! Configuration types for the childcare cost engine.
//!
//! These structures are deserialized from `settings.yaml`.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Default tax factor: half of every gross euro lost is felt net.
fn default_tax_factor() -> Decimal {
    Decimal::new(50, 2)
}

fn default_delimiter() -> char {
    ','
}

/// Where the income bracket table comes from.
#[derive(Debug, Clone, Deserialize)]
pub struct BracketSourceConfig {
    /// CSV file name, relative to the configuration directory.
    pub file: String,
    /// Field delimiter of the CSV file.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

/// How scenario totals are compared.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComparisonSettings {
    /// Totals closer than this are reported as equal. `None` compares exactly.
    #[serde(default)]
    pub equality_tolerance: Option<Decimal>,
}

/// Contents of `settings.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Human-readable name of the subsidy table (e.g. "Kinderopvangtoeslag 2026").
    pub name: String,
    /// The subsidy year the table applies to.
    pub year: u16,
    /// Effective tax rate applied to gross income loss, in [0, 1].
    #[serde(default = "default_tax_factor")]
    pub tax_factor: Decimal,
    /// The bracket table source.
    pub bracket_source: BracketSourceConfig,
    /// Comparison behaviour.
    #[serde(default)]
    pub comparison: ComparisonSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_settings_use_defaults() {
        let yaml = r#"
name: "Test table"
year: 2026
bracket_source:
  file: "brackets.csv"
"#;

        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.tax_factor, Decimal::new(5, 1));
        assert_eq!(settings.bracket_source.delimiter, ',');
        assert!(settings.comparison.equality_tolerance.is_none());
    }

    #[test]
    fn test_full_settings() {
        let yaml = r#"
name: "Kinderopvangtoeslag 2026"
year: 2026
tax_factor: "0.495"
bracket_source:
  file: "toeslagtabel.csv"
  delimiter: ";"
comparison:
  equality_tolerance: "0.005"
"#;

        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.tax_factor, Decimal::new(495, 3));
        assert_eq!(settings.bracket_source.delimiter, ';');
        assert_eq!(
            settings.comparison.equality_tolerance,
            Some(Decimal::new(5, 3))
        );
    }
}
