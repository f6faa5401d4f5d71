/// Error type for report writers.
#[derive(Debug)]
pub enum ReportError {
    /// File or directory I/O error
    Io(String),
    /// Serialization error (CSV or JSON)
    Serialize(String),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io(msg) => write!(f, "I/O error: {}", msg),
            ReportError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<std::io::Error> for ReportError {
    fn from(e: std::io::Error) -> Self {
        ReportError::Io(e.to_string())
    }
}
