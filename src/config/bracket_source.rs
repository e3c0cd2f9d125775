//! Income bracket table loading.
//!
//! The published subsidy table is a spreadsheet whose column titles change
//! from year to year ("Toetsingsinkomen vanaf", "Vergoedingspercentage
//! eerste kind", ...). The loader finds the three columns it needs by
//! keyword, maps every row onto [`IncomeBand`] straight away and fails at
//! load time when a column or value cannot be mapped. Subsidy percentages
//! must come out between 0 and 1, so "96%" loads and a bare "96" does not.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::error::DataLoadError;
use crate::models::{BracketTable, IncomeBand, UpperBound};

/// Upper-bound cell values meaning "and higher", compared after lowercasing
/// and collapsing whitespace.
pub const UNBOUNDED_MARKERS: [&str; 2] = ["en hoger", "and higher"];

/// The three columns a bracket source must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketColumn {
    /// Subsidy percentage for the first child.
    SubsidyPct,
    /// Lowest income of the band.
    LowerBound,
    /// Highest income of the band, or the "and higher" marker.
    UpperBound,
}

impl BracketColumn {
    /// All required columns, in the order they are matched.
    pub const ALL: [BracketColumn; 3] = [
        BracketColumn::SubsidyPct,
        BracketColumn::LowerBound,
        BracketColumn::UpperBound,
    ];

    /// Canonical name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            BracketColumn::SubsidyPct => "subsidy_pct",
            BracketColumn::LowerBound => "lower_bound",
            BracketColumn::UpperBound => "upper_bound",
        }
    }

    /// Keyword sets, Dutch first. A header matches a set when it contains
    /// every keyword of it.
    fn keyword_sets(&self) -> &'static [&'static [&'static str]] {
        match self {
            BracketColumn::SubsidyPct => &[&["vergoedingspercentage", "eerste"], &["percentage", "first"]],
            BracketColumn::LowerBound => &[&["toetsingsinkomen", "vanaf"], &["income", "from"]],
            BracketColumn::UpperBound => &[&["tot", "met"], &["income", "up_to"]],
        }
    }
}

/// Normalizes a header: trimmed, lowercased, spaces replaced by underscores.
///
/// ```
/// use childcare_engine::config::normalize_header;
///
/// assert_eq!(normalize_header(" Toetsingsinkomen vanaf "), "toetsingsinkomen_vanaf");
/// ```
pub fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .replace(' ', "_")
}

/// Returns the index of the column for `column`.
///
/// Keyword sets are tried in order; for each set the first header (in
/// source order) containing all its keywords wins.
fn find_column(headers: &[String], column: BracketColumn) -> Option<usize> {
    column.keyword_sets().iter().find_map(|keywords| {
        headers
            .iter()
            .position(|header| keywords.iter().all(|k| header.contains(k)))
    })
}

/// Parses an amount or percentage cell.
///
/// Whitespace and a leading `€` are ignored and a trailing `%` divides by
/// 100. A lone `,` is a decimal comma. When both `,` and `.` appear, the
/// last one is the decimal separator and the other groups thousands.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let compact = compact.trim_start_matches('€');

    let (number, is_percent) = match compact.strip_suffix('%') {
        Some(number) => (number, true),
        None => (compact, false),
    };

    let normalized = match (number.rfind(','), number.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => number.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => number.replace(',', ""),
        (Some(_), None) => number.replace(',', "."),
        _ => number.to_string(),
    };

    let value = Decimal::from_str(&normalized).ok()?;
    Some(if is_percent {
        value / Decimal::ONE_HUNDRED
    } else {
        value
    })
}

/// Parses an upper-bound cell: an amount or an "and higher" marker.
pub fn parse_upper_bound(raw: &str) -> Option<UpperBound> {
    let marker = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    if UNBOUNDED_MARKERS.contains(&marker.as_str()) {
        return Some(UpperBound::Unbounded);
    }
    parse_amount(raw).map(UpperBound::Bounded)
}

/// Loads income bracket tables from CSV.
///
/// # Example
///
/// ```
/// use childcare_engine::config::BracketTableLoader;
///
/// let csv = "\
/// Toetsingsinkomen vanaf;Toetsingsinkomen tot en met;Vergoedingspercentage eerste kind
/// 0;29999;96%
/// 30000;en hoger;33,3%
/// ";
///
/// let table = BracketTableLoader::new()
///     .with_delimiter(b';')
///     .load_from_reader(csv.as_bytes(), "inline")
///     .unwrap();
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BracketTableLoader {
    delimiter: u8,
}

impl Default for BracketTableLoader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl BracketTableLoader {
    /// Creates a loader for comma-separated files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Loads a bracket table from a CSV file.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<BracketTable, DataLoadError> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DataLoadError::SourceNotFound {
                path: path_str.clone(),
            },
            _ => DataLoadError::SourceUnreadable {
                path: path_str.clone(),
                message: e.to_string(),
            },
        })?;

        self.load_from_reader(file, &path_str)
    }

    /// Loads a bracket table from any reader. `source` names it in errors
    /// and log lines.
    pub fn load_from_reader<R: Read>(
        &self,
        reader: R,
        source: &str,
    ) -> Result<BracketTable, DataLoadError> {
        let unreadable = |e: csv::Error| DataLoadError::SourceUnreadable {
            path: source.to_string(),
            message: e.to_string(),
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(unreadable)?
            .iter()
            .map(normalize_header)
            .collect();

        let mut indices = [0usize; 3];
        for (slot, column) in indices.iter_mut().zip(BracketColumn::ALL) {
            *slot = find_column(&headers, column).ok_or_else(|| DataLoadError::MissingColumn {
                path: source.to_string(),
                column: column.name().to_string(),
            })?;
        }
        let [pct_idx, lower_idx, upper_idx] = indices;

        let mut bands = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(unreadable)?;
            if record.iter().all(|field| field.is_empty()) {
                continue;
            }

            let row = i + 1;
            let cell = |idx: usize| record.get(idx).unwrap_or("");
            let invalid = |column: BracketColumn, idx: usize| DataLoadError::InvalidValue {
                path: source.to_string(),
                row,
                column: column.name().to_string(),
                value: cell(idx).to_string(),
            };

            // A bare "96,0" without '%' would otherwise read as 9600%
            let subsidy_pct = parse_amount(cell(pct_idx))
                .filter(|pct| (Decimal::ZERO..=Decimal::ONE).contains(pct))
                .ok_or_else(|| invalid(BracketColumn::SubsidyPct, pct_idx))?;
            let lower_bound = parse_amount(cell(lower_idx))
                .ok_or_else(|| invalid(BracketColumn::LowerBound, lower_idx))?;
            let upper_bound = parse_upper_bound(cell(upper_idx))
                .ok_or_else(|| invalid(BracketColumn::UpperBound, upper_idx))?;

            bands.push(IncomeBand {
                lower_bound,
                upper_bound,
                subsidy_pct,
            });
        }

        if bands.is_empty() {
            return Err(DataLoadError::EmptyTable {
                path: source.to_string(),
            });
        }

        let table = BracketTable::new(bands);
        for issue in table.well_formedness_issues() {
            warn!(source = %source, issue = ?issue, "Income bracket table is not well formed");
        }
        info!(source = %source, bands = table.len(), "Loaded income bracket table");

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn load_semicolon(csv: &str) -> Result<BracketTable, DataLoadError> {
        BracketTableLoader::new()
            .with_delimiter(b';')
            .load_from_reader(csv.as_bytes(), "test.csv")
    }

    const DUTCH_TABLE: &str = "\
Toetsingsinkomen vanaf;Toetsingsinkomen tot en met;Vergoedingspercentage eerste kind;Vergoedingspercentage tweede en volgende kind
30000;en hoger;33,3%;67,1%
0;19999;96%;96%
20000;29999;80,5%;95%
";

    #[test]
    fn test_normalize_header() {
        assert_eq!(
            normalize_header("\u{feff}Vergoedingspercentage eerste kind"),
            "vergoedingspercentage_eerste_kind"
        );
        assert_eq!(normalize_header("  Income From "), "income_from");
    }

    #[test]
    fn test_parse_amount_formats() {
        assert_eq!(parse_amount("56413"), Some(dec("56413")));
        assert_eq!(parse_amount("€ 1.234,56"), Some(dec("1234.56")));
        assert_eq!(parse_amount("1,234.56"), Some(dec("1234.56")));
        assert_eq!(parse_amount("11,23"), Some(dec("11.23")));
        assert_eq!(parse_amount("96%"), Some(dec("0.96")));
        assert_eq!(parse_amount("33,3 %"), Some(dec("0.333")));
        assert_eq!(parse_amount("0.96"), Some(dec("0.96")));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("veel"), None);
    }

    #[test]
    fn test_parse_upper_bound_marker_is_case_and_space_insensitive() {
        assert_eq!(parse_upper_bound("en hoger"), Some(UpperBound::Unbounded));
        assert_eq!(parse_upper_bound("  En   Hoger "), Some(UpperBound::Unbounded));
        assert_eq!(parse_upper_bound("AND HIGHER"), Some(UpperBound::Unbounded));
        assert_eq!(
            parse_upper_bound("29999"),
            Some(UpperBound::Bounded(dec("29999")))
        );
        assert_eq!(parse_upper_bound("hoger"), None);
    }

    #[test]
    fn test_load_dutch_table_sorted() {
        let table = load_semicolon(DUTCH_TABLE).unwrap();

        assert_eq!(table.len(), 3);
        let bands = table.bands();
        assert_eq!(bands[0].lower_bound, dec("0"));
        assert_eq!(bands[0].subsidy_pct, dec("0.96"));
        assert_eq!(bands[1].subsidy_pct, dec("0.805"));
        assert_eq!(bands[2].lower_bound, dec("30000"));
        assert_eq!(bands[2].upper_bound, UpperBound::Unbounded);
        assert_eq!(bands[2].subsidy_pct, dec("0.333"));
    }

    #[test]
    fn test_first_child_column_wins_over_second_child() {
        let table = load_semicolon(DUTCH_TABLE).unwrap();
        // Second-child column holds 95% for this band
        assert_eq!(table.bands()[1].subsidy_pct, dec("0.805"));
    }

    #[test]
    fn test_load_english_headers() {
        let csv = "\
Income from,Income up to,Percentage first child
0,49999,0.90
50000,and higher,0.40
";
        let table = BracketTableLoader::new()
            .load_from_reader(csv.as_bytes(), "english.csv")
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.bands()[1].upper_bound, UpperBound::Unbounded);
        assert_eq!(table.bands()[1].subsidy_pct, dec("0.40"));
    }

    #[test]
    fn test_missing_column_fails_at_load() {
        let csv = "\
Toetsingsinkomen vanaf;Vergoedingspercentage eerste kind
0;96%
";
        match load_semicolon(csv) {
            Err(DataLoadError::MissingColumn { path, column }) => {
                assert_eq!(path, "test.csv");
                assert_eq!(column, "upper_bound");
            }
            other => panic!("Expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_cell_reports_row_and_column() {
        let csv = "\
Toetsingsinkomen vanaf;Toetsingsinkomen tot en met;Vergoedingspercentage eerste kind
0;19999;96%
20000;29999;veel
";
        match load_semicolon(csv) {
            Err(DataLoadError::InvalidValue {
                row, column, value, ..
            }) => {
                assert_eq!(row, 2);
                assert_eq!(column, "subsidy_pct");
                assert_eq!(value, "veel");
            }
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_percentage_without_sign_is_out_of_range() {
        let csv = "\
Toetsingsinkomen vanaf;Toetsingsinkomen tot en met;Vergoedingspercentage eerste kind
0;22346;96,0
";
        match load_semicolon(csv) {
            Err(DataLoadError::InvalidValue { row, column, value, .. }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "subsidy_pct");
                assert_eq!(value, "96,0");
            }
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_short_row_is_invalid_not_a_panic() {
        let csv = "\
Toetsingsinkomen vanaf;Toetsingsinkomen tot en met;Vergoedingspercentage eerste kind
0;19999
";
        assert!(matches!(
            load_semicolon(csv),
            Err(DataLoadError::InvalidValue { row: 1, .. })
        ));
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let csv = "\
Toetsingsinkomen vanaf;Toetsingsinkomen tot en met;Vergoedingspercentage eerste kind
0;19999;96%
;;
20000;en hoger;50%
";
        let table = load_semicolon(csv).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_headers_only_is_empty_table() {
        let csv = "Toetsingsinkomen vanaf;Toetsingsinkomen tot en met;Vergoedingspercentage eerste kind\n";
        assert!(matches!(
            load_semicolon(csv),
            Err(DataLoadError::EmptyTable { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_source_not_found() {
        match BracketTableLoader::new().load("/nonexistent/toeslagtabel.csv") {
            Err(DataLoadError::SourceNotFound { path }) => {
                assert!(path.contains("toeslagtabel.csv"));
            }
            other => panic!("Expected SourceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_table_still_loads() {
        let csv = "\
Toetsingsinkomen vanaf;Toetsingsinkomen tot en met;Vergoedingspercentage eerste kind
0;25000;96%
20000;en hoger;50%
";
        let table = load_semicolon(csv).unwrap();
        assert_eq!(table.well_formedness_issues().len(), 1);
    }
}
