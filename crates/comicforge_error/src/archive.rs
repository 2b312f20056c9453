//! Archive export error types.

/// Kinds of archive export errors.
///
/// Per-entry fetch/decode failures are skipped by the exporter, not raised;
/// these kinds cover failures of the archive itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ArchiveErrorKind {
    /// Failed to create or write the output file
    #[display("Failed to write archive: {}", _0)]
    Io(String),
    /// ZIP encoding failed
    #[display("Failed to build archive: {}", _0)]
    Zip(String),
}

/// Archive error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Archive Error: {} at line {} in {}", kind, line, file)]
pub struct ArchiveError {
    /// The kind of error that occurred
    pub kind: ArchiveErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ArchiveError {
    /// Create a new archive error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ArchiveErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
