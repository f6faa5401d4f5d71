//! Multi-pass balance resolution.
//!
//! Three passes run in strict order, each field independently, stopping per
//! field as soon as a value is found:
//!
//! 1. key-value pairs (labels in the extracted form fields),
//! 2. table cells horizontally adjacent to a label cell,
//! 3. row-position fallback (first row for starting, last row for ending).
//!
//! Nothing here fails: a field no pass can resolve defaults to 0.0 with
//! [`BalanceSource::Default`] so callers can surface a warning.

use crate::labels::LabelMatcher;
use crate::model::{BalanceResolution, BalanceSource, ResolvedBalance, StructuredDocument, Table};
use crate::money::parse_amount;

/// Resolve starting and ending balances via the ordered pass cascade.
///
/// Within the key-value pass the scan keeps input order and the last
/// matching pair wins; documents with repeated balance-like labels (per-page
/// running balances) therefore resolve to the final occurrence.
pub fn resolve_balances(matcher: &LabelMatcher, doc: &StructuredDocument) -> BalanceResolution {
    let mut starting: Option<ResolvedBalance> = None;
    let mut ending: Option<ResolvedBalance> = None;

    // Pass 1: key-value pairs. A matching key assigns even when its value is
    // unparseable (lossy 0.0), mirroring the form-field contract: the label
    // was found, the field is considered resolved.
    for pair in &doc.key_value_pairs {
        let key = pair.key.as_deref().unwrap_or("").to_lowercase();
        let value = pair.value.as_deref().unwrap_or("");

        if matcher.is_starting(&key) {
            starting = Some(ResolvedBalance {
                value: parse_amount(value).unwrap_or(0.0),
                source: BalanceSource::KeyValue,
            });
        }
        if matcher.is_ending(&key) {
            ending = Some(ResolvedBalance {
                value: parse_amount(value).unwrap_or(0.0),
                source: BalanceSource::KeyValue,
            });
        }
    }

    // Pass 2: label cells with a numeric neighbor in the same table row.
    if starting.is_none() || ending.is_none() {
        for table in &doc.tables {
            for cell in &table.cells {
                let text = cell.content.to_lowercase();

                if starting.is_none() && matcher.is_starting(&text) {
                    if let Some(value) = adjacent_value(table, cell.row, cell.col) {
                        starting = Some(ResolvedBalance {
                            value,
                            source: BalanceSource::TableAdjacent,
                        });
                    }
                }
                if ending.is_none() && matcher.is_ending(&text) {
                    if let Some(value) = adjacent_value(table, cell.row, cell.col) {
                        ending = Some(ResolvedBalance {
                            value,
                            source: BalanceSource::TableAdjacent,
                        });
                    }
                }
            }
        }
    }

    // Pass 3: positional fallback. Statements tend to open with the prior
    // balance in the first data row and close with the new balance in the
    // last.
    if starting.is_none() {
        if let Some(value) = first_nonzero_in_row(doc, RowPick::First) {
            starting = Some(ResolvedBalance { value, source: BalanceSource::RowPosition });
        }
    }
    if ending.is_none() {
        if let Some(value) = first_nonzero_in_row(doc, RowPick::Last) {
            ending = Some(ResolvedBalance { value, source: BalanceSource::RowPosition });
        }
    }

    BalanceResolution {
        starting: starting.unwrap_or_else(ResolvedBalance::unresolved),
        ending: ending.unwrap_or_else(ResolvedBalance::unresolved),
    }
}

/// First non-zero parse among same-row cells exactly one column left or
/// right of (row, col). Zero-valued and unparseable neighbors are skipped;
/// a neighbor holding "0.00" is indistinguishable from a failed parse at
/// this point, so neither terminates the search.
fn adjacent_value(table: &Table, row: u32, col: u32) -> Option<f64> {
    for candidate in &table.cells {
        if candidate.row != row {
            continue;
        }
        // col is unsigned; compare via +1 on both sides to avoid underflow.
        if candidate.col == col + 1 || candidate.col + 1 == col {
            if let Some(value) = parse_amount(&candidate.content) {
                if value != 0.0 {
                    return Some(value);
                }
            }
        }
    }
    None
}

enum RowPick {
    First,
    Last,
}

/// Scan row 0 (First) or each table's maximum row (Last), in table/cell
/// iteration order, and return the first non-zero parse.
fn first_nonzero_in_row(doc: &StructuredDocument, pick: RowPick) -> Option<f64> {
    for table in &doc.tables {
        let target = match pick {
            RowPick::First => 0,
            RowPick::Last => match table.cells.iter().map(|c| c.row).max() {
                Some(max) => max,
                None => continue,
            },
        };

        for cell in table.cells.iter().filter(|c| c.row == target) {
            if let Some(value) = parse_amount(&cell.content) {
                if value != 0.0 {
                    return Some(value);
                }
            }
        }
    }
    None
}
