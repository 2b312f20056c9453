//! Top-level error wrapper types.

use crate::{
    ArchiveError, BatchError, ConfigError, CsvError, GenerationError, HttpError, StorageError,
    UsersError,
};

/// This is the foundation error enum, one variant per workspace concern.
///
/// # Examples
///
/// ```
/// use comicforge_error::{ComicforgeError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: ComicforgeError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ComicforgeErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// CSV ingestion error
    #[from(CsvError)]
    Csv(CsvError),
    /// Image generation error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Session storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Batch precondition error
    #[from(BatchError)]
    Batch(BatchError),
    /// Archive export error
    #[from(ArchiveError)]
    Archive(ArchiveError),
    /// User directory error
    #[from(UsersError)]
    Users(UsersError),
}

/// Comicforge error with kind discrimination.
///
/// # Examples
///
/// ```
/// use comicforge_error::{ComicforgeResult, ConfigError};
///
/// fn might_fail() -> ComicforgeResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Comicforge Error: {}", _0)]
pub struct ComicforgeError(Box<ComicforgeErrorKind>);

impl ComicforgeError {
    /// Create a new error from a kind.
    pub fn new(kind: ComicforgeErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ComicforgeErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to ComicforgeErrorKind
impl<T> From<T> for ComicforgeError
where
    T: Into<ComicforgeErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Comicforge operations.
pub type ComicforgeResult<T> = std::result::Result<T, ComicforgeError>;
