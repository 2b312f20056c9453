//! Batch precondition error types.

/// Kinds of batch precondition failures.
///
/// All of these are hard stops checked before any task leaves `Pending`;
/// none of them can occur once a batch has started.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum BatchErrorKind {
    /// The task list is empty (including the empty-CSV "no data" case)
    #[display("No generation tasks: upload a CSV with at least one valid row")]
    NoTasks,
    /// No panel templates are registered in the session
    #[display("No panel templates: upload at least one template image")]
    NoTemplates,
    /// A single template lookup failed (per-task re-lookup or manual entry)
    #[display("Template \"{}\" not found", _0)]
    TemplateNotFound(String),
    /// One or more task template names do not resolve to a registered template
    #[display("{}", detail)]
    UnmatchedTemplates {
        /// Unmatched normalized template names, in first-seen order
        missing: Vec<String>,
        /// Preformatted diagnostic listing unmatched and registered names
        /// with their character lengths
        detail: String,
    },
}

/// Batch error with location tracking.
///
/// # Examples
///
/// ```
/// use comicforge_error::{BatchError, BatchErrorKind};
///
/// let err = BatchError::new(BatchErrorKind::NoTasks);
/// assert!(format!("{}", err).contains("No generation tasks"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Batch Error: {} at line {} in {}", kind, line, file)]
pub struct BatchError {
    /// The kind of error that occurred
    pub kind: BatchErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl BatchError {
    /// Create a new batch error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: BatchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
