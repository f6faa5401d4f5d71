//! Full-pipeline scenarios: structured document in, statement report out.

use tally_engine::model::{BalanceSource, Cell, Direction, KeyValuePair, Table};
use tally_engine::{run, ReconConfig, StructuredDocument};

fn kv(key: &str, value: &str) -> KeyValuePair {
    KeyValuePair { key: Some(key.into()), value: Some(value.into()) }
}

fn cell(row: u32, col: u32, content: &str) -> Cell {
    Cell { row, col, content: content.into() }
}

fn transaction_table(rows: &[&[&str]]) -> Table {
    let mut cells = vec![cell(0, 0, "Date"), cell(0, 1, "Description"), cell(0, 2, "Amount")];
    for (i, row) in rows.iter().enumerate() {
        for (c, content) in row.iter().enumerate() {
            cells.push(cell(i as u32 + 1, c as u32, content));
        }
    }
    Table { cells }
}

#[test]
fn balanced_statement_reconciles_cleanly() {
    let doc = StructuredDocument {
        key_value_pairs: vec![
            kv("Previous Balance", "$1,000.00"),
            kv("New Balance", "1,200.00"),
        ],
        tables: vec![transaction_table(&[&["01/02", "Deposit", "200.00"]])],
    };

    let report = run(&ReconConfig::default(), "jan.pdf", &doc).unwrap();
    let r = &report.reconciliation;

    assert_eq!(r.starting_balance, 1000.0);
    assert_eq!(r.ending_balance, 1200.0);
    assert_eq!(report.transactions.len(), 1);
    assert_eq!(report.transactions[0].direction, Direction::Credit);
    assert_eq!(r.total_transactions, 200.0);
    assert_eq!(r.expected_ending, 1200.0);
    assert_eq!(r.variance, 0.0);
    assert!(!r.is_discrepant);
    assert!(report.unresolved_fields().is_empty());
}

#[test]
fn short_deposit_produces_discrepancy() {
    let doc = StructuredDocument {
        key_value_pairs: vec![
            kv("Previous Balance", "$1,000.00"),
            kv("New Balance", "1,200.00"),
        ],
        tables: vec![transaction_table(&[&["01/02", "Deposit", "150.00"]])],
    };

    let report = run(&ReconConfig::default(), "jan.pdf", &doc).unwrap();
    let r = &report.reconciliation;

    assert_eq!(r.expected_ending, 1150.0);
    assert_eq!(r.variance, 50.0);
    assert!(r.is_discrepant);
}

#[test]
fn row_position_fallback_assigns_starting_balance() {
    // No key-value matches; first table is all headers, the second carries a
    // non-zero figure in row 0.
    let doc = StructuredDocument {
        key_value_pairs: vec![kv("Account Holder", "J. Doe")],
        tables: vec![
            Table { cells: vec![cell(0, 0, "Date"), cell(0, 1, "Desc"), cell(0, 2, "Amount")] },
            Table { cells: vec![cell(0, 0, "500.00")] },
        ],
    };

    let report = run(&ReconConfig::default(), "feb.pdf", &doc).unwrap();
    assert_eq!(report.reconciliation.starting_balance, 500.0);
    assert_eq!(report.starting_source, BalanceSource::RowPosition);
}

#[test]
fn unresolvable_document_degrades_to_zero_with_warnings() {
    let doc = StructuredDocument {
        key_value_pairs: vec![kv("Account Number", "12345")],
        tables: vec![],
    };

    let report = run(&ReconConfig::default(), "empty.pdf", &doc).unwrap();
    assert_eq!(report.reconciliation.starting_balance, 0.0);
    assert_eq!(report.reconciliation.ending_balance, 0.0);
    assert_eq!(
        report.unresolved_fields(),
        vec!["starting balance", "ending balance"]
    );
}

#[test]
fn debits_subtract_from_expected_ending() {
    let doc = StructuredDocument {
        key_value_pairs: vec![
            kv("Opening Balance", "1,000.00"),
            kv("Closing Balance", "800.00"),
        ],
        tables: vec![transaction_table(&[
            &["01/05", "Rent", "-250.00"],
            &["01/09", "Salary", "50.00"],
        ])],
    };

    let report = run(&ReconConfig::default(), "mar.pdf", &doc).unwrap();
    let r = &report.reconciliation;

    assert_eq!(report.transactions[0].direction, Direction::Debit);
    assert_eq!(report.transactions[1].direction, Direction::Credit);
    // Debit of -250.0 contributes +250.0 to net flow: total = 250 + 50.
    assert_eq!(r.total_transactions, 300.0);
    assert_eq!(r.expected_ending, 1300.0);
    assert_eq!(r.variance, -500.0);
    assert!(r.is_discrepant);
}

#[test]
fn fixture_json_round_trips_through_the_pipeline() {
    let fixture = r#"{
        "key_value_pairs": [
            { "key": "Previous Balance", "value": "$250.00" },
            { "key": "New Balance", "value": "$300.00" }
        ],
        "tables": [
            { "cells": [
                { "row": 0, "col": 0, "content": "Date" },
                { "row": 0, "col": 1, "content": "Description" },
                { "row": 0, "col": 2, "content": "Amount" },
                { "row": 1, "col": 0, "content": "02/14" },
                { "row": 1, "col": 1, "content": "Deposit" },
                { "row": 1, "col": 2, "content": "50.00" }
            ] }
        ]
    }"#;

    let doc: StructuredDocument = serde_json::from_str(fixture).unwrap();
    let report = run(&ReconConfig::default(), "fixture.json", &doc).unwrap();
    assert_eq!(report.reconciliation.variance, 0.0);
    assert!(!report.reconciliation.is_discrepant);
}

#[test]
fn custom_tolerance_widens_the_clean_band() {
    let doc = StructuredDocument {
        key_value_pairs: vec![
            kv("Previous Balance", "100.00"),
            kv("New Balance", "100.75"),
        ],
        tables: vec![],
    };

    let strict = run(&ReconConfig::default(), "a.pdf", &doc).unwrap();
    assert!(strict.reconciliation.is_discrepant);

    let config = ReconConfig::from_toml("[tolerance]\nvariance = 1.0").unwrap();
    let loose = run(&config, "a.pdf", &doc).unwrap();
    assert!(!loose.reconciliation.is_discrepant);
}
