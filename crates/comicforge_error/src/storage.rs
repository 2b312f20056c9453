//! Session storage error types.
//!
//! Covers loading character and template images from disk into a session.

/// Kinds of session storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to read a directory of uploads
    #[display("Failed to read directory: {}", _0)]
    DirectoryRead(String),
    /// Failed to read an image file
    #[display("Failed to read file: {}", _0)]
    FileRead(String),
    /// Failed to write a file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// File could not be decoded as an image
    #[display("Failed to read image dimensions: {}", _0)]
    InvalidImage(String),
    /// Character filename violates the naming rule
    #[display("Invalid character filename: {}", _0)]
    InvalidFilename(String),
    /// Session template cap exceeded
    #[display("Too many templates: {} exceeds the limit of {}", count, max)]
    TooManyTemplates {
        /// Number of template files found
        count: usize,
        /// Maximum templates allowed per session
        max: usize,
    },
}

/// Session storage error with location tracking.
///
/// # Examples
///
/// ```
/// use comicforge_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::FileRead("/tmp/x.png".to_string()));
/// assert!(format!("{}", err).contains("/tmp/x.png"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
