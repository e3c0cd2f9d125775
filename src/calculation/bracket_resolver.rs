//! Income bracket resolution.
//!
//! This module maps an adjusted household income to the band of the subsidy
//! table that contains it.

use rust_decimal::Decimal;

use crate::models::{BracketLookup, BracketNeighbors, BracketTable};

/// Finds the band containing `income`.
///
/// Bands are scanned in ascending order and the first match wins. A bounded
/// band matches when `lower <= income <= upper`; an unbounded band matches
/// any income at or above its lower bound. Overlapping bands are not
/// detected here: the earlier band wins.
///
/// # Examples
///
/// ```
/// use childcare_engine::calculation::resolve;
/// use childcare_engine::models::{BracketLookup, BracketTable, IncomeBand, UpperBound};
/// use rust_decimal::Decimal;
///
/// let table = BracketTable::new(vec![
///     IncomeBand {
///         lower_bound: Decimal::ZERO,
///         upper_bound: UpperBound::Bounded(Decimal::new(29_999, 0)),
///         subsidy_pct: Decimal::new(96, 2),
///     },
///     IncomeBand {
///         lower_bound: Decimal::new(30_000, 0),
///         upper_bound: UpperBound::Unbounded,
///         subsidy_pct: Decimal::new(33, 2),
///     },
/// ]);
///
/// let lookup = resolve(&table, Decimal::new(250_000, 0));
/// assert_eq!(lookup.subsidy_pct(), Decimal::new(33, 2));
///
/// let lookup = resolve(&table, Decimal::new(-1, 0));
/// assert_eq!(lookup, BracketLookup::NotFound);
/// assert_eq!(lookup.subsidy_pct(), Decimal::ZERO);
/// ```
pub fn resolve(table: &BracketTable, income: Decimal) -> BracketLookup {
    table
        .bands()
        .iter()
        .enumerate()
        .find(|(_, band)| band.contains(income))
        .map(|(index, band)| BracketLookup::Found { index, band: *band })
        .unwrap_or(BracketLookup::NotFound)
}

/// Finds the band containing `income` along with its neighbours.
///
/// Returns `None` when no band matches. The previous band is absent for the
/// first band of the table and the next band is absent for the last.
pub fn resolve_with_neighbors(table: &BracketTable, income: Decimal) -> Option<BracketNeighbors> {
    let BracketLookup::Found { index, band } = resolve(table, income) else {
        return None;
    };

    let previous = index
        .checked_sub(1)
        .and_then(|i| table.get(i))
        .copied();
    let next = table.get(index + 1).copied();

    Some(BracketNeighbors {
        income,
        previous,
        current: band,
        next,
    })
}
