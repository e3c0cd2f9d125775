//! Error types for the childcare cost engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Loading the income bracket table has its own [`DataLoadError`], which is
//! folded into the crate-wide [`EngineError`].
//!
//! A bracket that cannot be found for an income is not an error; see
//! [`crate::models::BracketLookup::NotFound`].

use thiserror::Error;

/// Failure to turn a bracket source into a usable [`crate::models::BracketTable`].
///
/// # Example
///
/// ```
/// use childcare_engine::error::DataLoadError;
///
/// let error = DataLoadError::MissingColumn {
///     path: "toeslagtabel.csv".to_string(),
///     column: "lower_bound".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Bracket source 'toeslagtabel.csv' has no column matching 'lower_bound'"
/// );
/// ```
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// The bracket source does not exist or could not be opened.
    #[error("Bracket source not found: {path}")]
    SourceNotFound {
        /// The path that was not found.
        path: String,
    },

    /// The bracket source exists but could not be read as a table.
    #[error("Failed to read bracket source '{path}': {message}")]
    SourceUnreadable {
        /// The path of the source.
        path: String,
        /// A description of the read error.
        message: String,
    },

    /// None of the headers matched the keywords of a required column.
    #[error("Bracket source '{path}' has no column matching '{column}'")]
    MissingColumn {
        /// The path of the source.
        path: String,
        /// The canonical column name that could not be matched.
        column: String,
    },

    /// A cell could not be parsed into a value for its column.
    #[error("Invalid value '{value}' for '{column}' in row {row} of '{path}'")]
    InvalidValue {
        /// The path of the source.
        path: String,
        /// The 1-based data row number (header excluded).
        row: usize,
        /// The canonical column name.
        column: String,
        /// The raw cell content.
        value: String,
    },

    /// The source had headers but no data rows.
    #[error("Bracket source '{path}' contains no income bands")]
    EmptyTable {
        /// The path of the source.
        path: String,
    },
}

/// The main error type for the childcare cost engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The income bracket table could not be loaded.
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),

    /// Settings file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Settings file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An input value lies outside the range the calculator accepts.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The offending field, as a dotted path (e.g. "scenario_a.parent_1.leave_days_per_week").
        field: String,
        /// A description of the allowed range.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
