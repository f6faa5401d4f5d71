//! Transaction extraction from table grids.

use crate::model::{Direction, StructuredDocument, Table, TransactionRecord};
use crate::money::parse_amount_lossy;

/// Extract transaction records from every table, skipping each table's
/// header row (row 0 by convention).
///
/// Cells group by distinct row index: rows in first-seen order, cells in
/// original order within a row, no column sort. A row needs at least three
/// cells: position 0 is the date, 1 the description, 2 the amount; shorter
/// rows drop silently. Strictly positive amounts are credits, everything
/// else (including unparseable amounts, which read as 0.0) a debit.
///
/// Each qualifying row emits exactly one record, however many cells it has.
pub fn extract_transactions(doc: &StructuredDocument) -> Vec<TransactionRecord> {
    let mut records = Vec::new();
    for table in &doc.tables {
        extract_from_table(table, &mut records);
    }
    records
}

fn extract_from_table(table: &Table, out: &mut Vec<TransactionRecord>) {
    let mut row_order: Vec<u32> = Vec::new();
    for cell in &table.cells {
        if cell.row > 0 && !row_order.contains(&cell.row) {
            row_order.push(cell.row);
        }
    }

    for row in row_order {
        let fields: Vec<&str> = table
            .cells
            .iter()
            .filter(|c| c.row == row)
            .map(|c| c.content.as_str())
            .collect();

        if fields.len() < 3 {
            continue;
        }

        let amount = parse_amount_lossy(fields[2]);
        out.push(TransactionRecord {
            date: fields[0].to_string(),
            description: fields[1].to_string(),
            amount,
            direction: if amount > 0.0 { Direction::Credit } else { Direction::Debit },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;

    fn cell(row: u32, col: u32, content: &str) -> Cell {
        Cell { row, col, content: content.into() }
    }

    fn doc_with_rows(rows: &[&[&str]]) -> StructuredDocument {
        let mut cells = Vec::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, content) in row.iter().enumerate() {
                cells.push(cell(r as u32, c as u32, content));
            }
        }
        StructuredDocument { key_value_pairs: vec![], tables: vec![Table { cells }] }
    }

    #[test]
    fn header_row_is_skipped() {
        let doc = doc_with_rows(&[
            &["Date", "Description", "Amount"],
            &["01/02", "Deposit", "200.00"],
        ]);
        let records = extract_transactions(&doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, "01/02");
        assert_eq!(records[0].description, "Deposit");
        assert_eq!(records[0].amount, 200.0);
        assert_eq!(records[0].direction, Direction::Credit);
    }

    #[test]
    fn qualifying_row_emits_single_record() {
        // A five-cell row still yields one record, not one per cell.
        let doc = doc_with_rows(&[
            &["Date", "Description", "Amount", "Ref", "Balance"],
            &["01/03", "Check 101", "-45.00", "101", "955.00"],
        ]);
        let records = extract_transactions(&doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, -45.0);
        assert_eq!(records[0].direction, Direction::Debit);
    }

    #[test]
    fn short_rows_are_dropped() {
        let doc = doc_with_rows(&[
            &["Date", "Description", "Amount"],
            &["01/04", "Fee"],
            &["01/05", "Deposit", "75.00"],
        ]);
        let records = extract_transactions(&doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, "01/05");
    }

    #[test]
    fn unparseable_amount_reads_as_zero_debit() {
        let doc = doc_with_rows(&[
            &["Date", "Description", "Amount"],
            &["01/06", "Pending", "n/a"],
        ]);
        let records = extract_transactions(&doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, 0.0);
        assert_eq!(records[0].direction, Direction::Debit);
    }

    #[test]
    fn rows_collected_across_tables_in_order() {
        let t1 = Table {
            cells: vec![
                cell(1, 0, "01/02"),
                cell(1, 1, "Deposit"),
                cell(1, 2, "200.00"),
            ],
        };
        let t2 = Table {
            cells: vec![
                cell(1, 0, "01/09"),
                cell(1, 1, "Withdrawal"),
                cell(1, 2, "-50.00"),
            ],
        };
        let doc = StructuredDocument { key_value_pairs: vec![], tables: vec![t1, t2] };
        let records = extract_transactions(&doc);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description, "Deposit");
        assert_eq!(records[1].description, "Withdrawal");
    }

    #[test]
    fn cells_keep_original_order_within_a_row() {
        // Cells arrive column-out-of-order; positions follow iteration
        // order, not column index.
        let table = Table {
            cells: vec![
                cell(1, 2, "09/01"),
                cell(1, 0, "Refund"),
                cell(1, 1, "30.00"),
            ],
        };
        let doc = StructuredDocument { key_value_pairs: vec![], tables: vec![table] };
        let records = extract_transactions(&doc);
        assert_eq!(records[0].date, "09/01");
        assert_eq!(records[0].description, "Refund");
        assert_eq!(records[0].amount, 30.0);
    }

    #[test]
    fn extraction_is_idempotent() {
        let doc = doc_with_rows(&[
            &["Date", "Description", "Amount"],
            &["01/02", "Deposit", "200.00"],
            &["01/03", "Check", "-45.00"],
        ]);
        assert_eq!(extract_transactions(&doc), extract_transactions(&doc));
    }
}
