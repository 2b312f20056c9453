//! User directory error types.

/// Kinds of user directory errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum UsersErrorKind {
    /// No record exists for the given user id
    #[display("User not found: {}", _0)]
    NotFound(String),
    /// The document store rejected the request
    #[display("Document store request failed: {}", _0)]
    Store(String),
    /// Transport-level failure reaching the document store
    #[display("Document store unreachable: {}", _0)]
    Transport(String),
    /// A stored document could not be mapped to a user record
    #[display("Malformed user document: {}", _0)]
    Decode(String),
}

/// User directory error with location tracking.
///
/// # Examples
///
/// ```
/// use comicforge_error::{UsersError, UsersErrorKind};
///
/// let err = UsersError::new(UsersErrorKind::NotFound("uid-123".to_string()));
/// assert!(format!("{}", err).contains("uid-123"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Users Error: {} at line {} in {}", kind, line, file)]
pub struct UsersError {
    /// The kind of error that occurred
    pub kind: UsersErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl UsersError {
    /// Create a new users error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: UsersErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
