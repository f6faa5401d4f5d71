use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One grid position in an extracted table, addressed by row and column
/// index. The upstream service makes no uniqueness guarantee for
/// (row, col); lookups must tolerate duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    pub content: String,
}

/// An unordered bag of cells. No contiguity or rectangularity guarantee;
/// row 0 is a header row by convention, not structurally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    pub cells: Vec<Cell>,
}

/// A label/value association extracted from document layout
/// (e.g. "Previous Balance: $1,000.00"). Either side may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyValuePair {
    pub key: Option<String>,
    pub value: Option<String>,
}

/// The upstream analysis service's structured extraction of one document.
/// The engine only reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuredDocument {
    #[serde(default)]
    pub key_value_pairs: Vec<KeyValuePair>,
    #[serde(default)]
    pub tables: Vec<Table>,
}

// ---------------------------------------------------------------------------
// Balance resolution
// ---------------------------------------------------------------------------

/// Which pass produced a balance. `Default` marks a field no pass could
/// resolve: the value is 0.0 and callers should surface a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceSource {
    KeyValue,
    TableAdjacent,
    RowPosition,
    Default,
}

impl std::fmt::Display for BalanceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeyValue => write!(f, "key_value"),
            Self::TableAdjacent => write!(f, "table_adjacent"),
            Self::RowPosition => write!(f, "row_position"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// A resolved balance with its provenance. A value of 0.0 with a
/// non-`Default` source is a genuine zero; with `Default` it means
/// "could not resolve".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedBalance {
    pub value: f64,
    pub source: BalanceSource,
}

impl ResolvedBalance {
    pub fn unresolved() -> Self {
        Self { value: 0.0, source: BalanceSource::Default }
    }

    pub fn is_resolved(&self) -> bool {
        self.source != BalanceSource::Default
    }
}

/// Output of the balance pass cascade: both fields always defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BalanceResolution {
    pub starting: ResolvedBalance,
    pub ending: ResolvedBalance,
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Credit,
    Debit,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Credit => write!(f, "credit"),
            Self::Debit => write!(f, "debit"),
        }
    }
}

/// One transaction row lifted from a table: positions 0/1/2 of the row are
/// date, description, amount. Derived per reconciliation, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: String,
    pub description: String,
    pub amount: f64,
    pub direction: Direction,
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// Variance computation for one statement. Created once per document,
/// immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReconciliationResult {
    pub starting_balance: f64,
    pub ending_balance: f64,
    /// Net flow: credit amounts added as-is, debit amounts subtracted as-is.
    pub total_transactions: f64,
    pub expected_ending: f64,
    pub actual_ending: f64,
    pub variance: f64,
    pub is_discrepant: bool,
}

// ---------------------------------------------------------------------------
// Per-document report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub file: String,
    pub engine_version: String,
    pub run_at: String,
}

/// Everything the aggregation collaborators need for one statement.
#[derive(Debug, Clone, Serialize)]
pub struct StatementReport {
    pub meta: ReportMeta,
    pub starting_source: BalanceSource,
    pub ending_source: BalanceSource,
    pub transactions: Vec<TransactionRecord>,
    pub reconciliation: ReconciliationResult,
}

impl StatementReport {
    /// Fields the resolver could not locate, for warning output.
    pub fn unresolved_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.starting_source == BalanceSource::Default {
            fields.push("starting balance");
        }
        if self.ending_source == BalanceSource::Default {
            fields.push("ending balance");
        }
        fields
    }
}
