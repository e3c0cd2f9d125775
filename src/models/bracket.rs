//! Income bracket models.
//!
//! An income bracket (or band) maps a range of adjusted household income to
//! the percentage of the capped childcare rate that is subsidised.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The upper limit of an income band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpperBound {
    /// The band ends at this amount, inclusive.
    Bounded(Decimal),
    /// The band covers every income from its lower bound upwards ("en hoger").
    Unbounded,
}

impl UpperBound {
    /// Returns the bounded amount, or `None` for an unbounded band.
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            UpperBound::Bounded(amount) => Some(*amount),
            UpperBound::Unbounded => None,
        }
    }

    /// Returns true if this is the open-ended upper limit.
    pub fn is_unbounded(&self) -> bool {
        matches!(self, UpperBound::Unbounded)
    }
}

/// A single row of the subsidy table.
///
/// # Example
///
/// ```
/// use childcare_engine::models::{IncomeBand, UpperBound};
/// use rust_decimal::Decimal;
///
/// let band = IncomeBand {
///     lower_bound: Decimal::new(20_000, 0),
///     upper_bound: UpperBound::Bounded(Decimal::new(29_999, 0)),
///     subsidy_pct: Decimal::new(96, 2),
/// };
/// assert!(band.contains(Decimal::new(29_999, 0)));
/// assert!(!band.contains(Decimal::new(30_000, 0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeBand {
    /// The lowest annual income in this band, inclusive.
    pub lower_bound: Decimal,
    /// The highest annual income in this band.
    pub upper_bound: UpperBound,
    /// Subsidised fraction of the capped hourly rate (0..1).
    pub subsidy_pct: Decimal,
}

impl IncomeBand {
    /// Returns true if `income` falls inside this band.
    ///
    /// Both ends are inclusive; an unbounded band matches every income at or
    /// above its lower bound.
    pub fn contains(&self, income: Decimal) -> bool {
        match self.upper_bound {
            UpperBound::Unbounded => income >= self.lower_bound,
            UpperBound::Bounded(upper) => self.lower_bound <= income && income <= upper,
        }
    }
}

/// A structural problem found in a bracket table.
///
/// Issues are reported, never enforced: resolution keeps picking the first
/// matching band in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableIssue {
    /// A band's upper bound lies below its lower bound.
    InvertedBand {
        /// Index of the band in the sorted table.
        index: usize,
    },
    /// Two consecutive bands share part of their range.
    Overlap {
        /// Index of the earlier band.
        index: usize,
    },
    /// Incomes between two consecutive bands match neither.
    Gap {
        /// Index of the earlier band.
        index: usize,
        /// Upper bound of the earlier band.
        from: Decimal,
        /// Lower bound of the later band.
        to: Decimal,
    },
    /// An unbounded band is followed by further bands.
    UnboundedNotLast {
        /// Index of the unbounded band.
        index: usize,
    },
}

/// The outcome of looking up an income in a [`BracketTable`].
///
/// `NotFound` is kept apart from a band paying 0% so that a display can say
/// "no bracket found" instead of showing a zero subsidy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BracketLookup {
    /// The income falls in the band at `index`.
    Found {
        /// Position of the band in the sorted table.
        index: usize,
        /// The matching band.
        band: IncomeBand,
    },
    /// No band contains the income.
    NotFound,
}

impl BracketLookup {
    /// Returns the subsidy percentage to calculate with: the band's
    /// percentage, or zero when no band matched.
    pub fn subsidy_pct(&self) -> Decimal {
        match self {
            BracketLookup::Found { band, .. } => band.subsidy_pct,
            BracketLookup::NotFound => Decimal::ZERO,
        }
    }

    /// Returns the matching band, if any.
    pub fn band(&self) -> Option<&IncomeBand> {
        match self {
            BracketLookup::Found { band, .. } => Some(band),
            BracketLookup::NotFound => None,
        }
    }

    /// Returns true if a band matched.
    pub fn is_found(&self) -> bool {
        matches!(self, BracketLookup::Found { .. })
    }
}

/// A matched band together with the bands either side of it in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketNeighbors {
    /// The income that was looked up.
    pub income: Decimal,
    /// The band before the match, absent for the first band.
    pub previous: Option<IncomeBand>,
    /// The matching band.
    pub current: IncomeBand,
    /// The band after the match, absent for the last band.
    pub next: Option<IncomeBand>,
}

/// Amount that separates two contiguous whole-euro bands (e.g. 29 999 / 30 000).
const CONTIGUOUS_STEP: Decimal = Decimal::ONE;

/// The income bracket table, sorted ascending by lower bound.
///
/// Built once when the bracket source is loaded and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTable {
    bands: Vec<IncomeBand>,
}

impl BracketTable {
    /// Creates a table from bands in any order.
    ///
    /// The sort is stable, so bands sharing a lower bound keep their source
    /// order and the first of them wins resolution.
    pub fn new(bands: Vec<IncomeBand>) -> Self {
        let mut sorted = bands;
        sorted.sort_by(|a, b| a.lower_bound.cmp(&b.lower_bound));
        Self { bands: sorted }
    }

    /// Returns all bands in ascending order.
    pub fn bands(&self) -> &[IncomeBand] {
        &self.bands
    }

    /// Returns the band at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&IncomeBand> {
        self.bands.get(index)
    }

    /// Returns the number of bands.
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Returns true if the table has no bands.
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Lists the places where the table is not contiguous and non-overlapping.
    ///
    /// Consecutive bounded bands are contiguous when the next lower bound is
    /// at most one unit above the previous upper bound, which is how whole
    /// euro tables are published.
    pub fn well_formedness_issues(&self) -> Vec<TableIssue> {
        let mut issues = Vec::new();

        for (index, band) in self.bands.iter().enumerate() {
            if let UpperBound::Bounded(upper) = band.upper_bound {
                if upper < band.lower_bound {
                    issues.push(TableIssue::InvertedBand { index });
                }
            }

            let Some(next) = self.bands.get(index + 1) else {
                continue;
            };

            match band.upper_bound {
                UpperBound::Unbounded => issues.push(TableIssue::UnboundedNotLast { index }),
                UpperBound::Bounded(upper) => {
                    if next.lower_bound <= upper {
                        issues.push(TableIssue::Overlap { index });
                    } else if next.lower_bound.saturating_sub(upper) > CONTIGUOUS_STEP {
                        issues.push(TableIssue::Gap {
                            index,
                            from: upper,
                            to: next.lower_bound,
                        });
                    }
                }
            }
        }

        issues
    }
}
