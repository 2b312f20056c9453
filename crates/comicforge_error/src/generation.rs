//! Image-generation error types and retry classification.

/// Generation-specific error conditions.
///
/// The variants mirror the failure surface of the remote image API in
/// priority order: credential problems, quota exhaustion, transient
/// overload, content-policy refusals, and a generic fallback carrying the
/// remote message unchanged. The empty-result family covers structurally
/// valid responses that contain no usable image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// API key not found in environment
    #[display("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,
    /// The remote service rejected the credential
    #[display("Invalid API key: obtain a valid key from Google AI Studio")]
    InvalidApiKey,
    /// Quota or billing limit reached
    #[display("API usage limit reached: check quota and billing settings")]
    QuotaExceeded,
    /// Service is overloaded; the call may succeed after a delay
    #[display("Service overloaded: {}", _0)]
    Overloaded(String),
    /// The service returned no image, likely due to a content-policy refusal
    #[display("Likely content-policy violation: adjust the prompt and retry")]
    ContentPolicy,
    /// Response contained zero candidates
    #[display("Image generation failed: response contained no candidates")]
    EmptyResponse,
    /// First candidate carried no content parts
    #[display("Image generation failed: candidate contained no content")]
    MissingContent,
    /// No inline image data in any part of the first candidate
    #[display("Image generation failed: no image data in response")]
    MissingImageData,
    /// Returned image payload failed to decode
    #[display("Base64 decode error: {}", _0)]
    Decode(String),
    /// API request failed with the remote service's own message
    #[display("Image generation error: {}", _0)]
    Api(String),
    /// Transport-level failure before any response was received
    #[display("Transport error: {}", _0)]
    Transport(String),
}

impl GenerationErrorKind {
    /// Whether this failure indicates a transiently overloaded service.
    ///
    /// The retry wrapper doubles its attempt-scaled delay for overloaded
    /// failures; every other failure class keeps the base schedule.
    pub fn is_overloaded(&self) -> bool {
        matches!(self, GenerationErrorKind::Overloaded(_))
    }

    /// Whether the response was structurally valid but carried no image.
    ///
    /// Empty results are never worth re-submitting unchanged.
    pub fn is_empty_result(&self) -> bool {
        matches!(
            self,
            GenerationErrorKind::EmptyResponse
                | GenerationErrorKind::MissingContent
                | GenerationErrorKind::MissingImageData
        )
    }
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use comicforge_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::MissingApiKey);
/// assert!(format!("{}", err).contains("GEMINI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Trait for errors that carry a retry classification.
///
/// The batch retry wrapper retries every failure until its attempt budget is
/// exhausted; the classification only selects the delay schedule. Overloaded
/// failures escalate to twice the attempt-scaled delay.
///
/// # Examples
///
/// ```
/// use comicforge_error::{GenerationError, GenerationErrorKind, RetryClass};
///
/// let err = GenerationError::new(GenerationErrorKind::Overloaded(
///     "503 Service Unavailable".to_string(),
/// ));
/// assert!(err.is_overloaded());
/// ```
pub trait RetryClass {
    /// Returns true if the failure indicates a transiently overloaded service.
    fn is_overloaded(&self) -> bool;
}

impl RetryClass for GenerationError {
    fn is_overloaded(&self) -> bool {
        self.kind.is_overloaded()
    }
}
