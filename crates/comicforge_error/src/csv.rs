//! Tabular-input error types.

/// Kinds of CSV ingestion errors.
///
/// Rows missing required values are dropped silently by the parser and are
/// not errors; these kinds cover input that cannot be read at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CsvErrorKind {
    /// Failed to read the input source
    #[display("Failed to read CSV input: {}", _0)]
    Read(String),
    /// Input was structurally malformed
    #[display("Failed to parse CSV: {}", _0)]
    Malformed(String),
}

/// CSV error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("CSV Error: {} at line {} in {}", kind, line, file)]
pub struct CsvError {
    /// The kind of error that occurred
    pub kind: CsvErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CsvError {
    /// Create a new CSV error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CsvErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
