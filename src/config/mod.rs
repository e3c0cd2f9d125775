//! Configuration loading for the childcare cost engine.
//!
//! A configuration directory holds `settings.yaml` (table name, year, tax
//! factor, comparison settings) and the income bracket table it points to,
//! a CSV export of the published subsidy table.
//!
//! # Example
//!
//! ```no_run
//! use childcare_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/kinderopvang_2026").unwrap();
//! println!("Loaded table: {}", config.settings().name);
//! ```

mod bracket_source;
mod loader;
mod types;

pub use bracket_source::{
    BracketColumn, BracketTableLoader, UNBOUNDED_MARKERS, normalize_header, parse_amount,
    parse_upper_bound,
};
pub use loader::ConfigLoader;
pub use types::{BracketSourceConfig, ComparisonSettings, Settings};
