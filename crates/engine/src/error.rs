use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad tolerance, empty synonym list, etc.).
    ConfigValidation(String),
    /// A label synonym that cannot be compiled into a pattern.
    BadLabel(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::BadLabel(msg) => write!(f, "bad label synonym: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
