//! Parsed tabular input rows.

use serde::{Deserialize, Serialize};

/// One row of the uploaded CSV after header aliasing and field cleanup.
///
/// The page number stays a string at this stage (trimmed, trailing comma
/// stripped); it is coerced to an integer when the row becomes a
/// [`crate::GenerationTask`]. The template name has already been normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvRow {
    /// Page number field, trimmed with any trailing comma stripped
    pub page_number: String,
    /// Normalized template name
    pub template_name: String,
    /// Trimmed generation prompt
    pub prompt: String,
}

impl CsvRow {
    /// Create a row from already-processed fields.
    pub fn new(
        page_number: impl Into<String>,
        template_name: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            page_number: page_number.into(),
            template_name: template_name.into(),
            prompt: prompt.into(),
        }
    }

    /// Whether all three fields survived processing.
    pub fn is_complete(&self) -> bool {
        !self.page_number.is_empty() && !self.template_name.is_empty() && !self.prompt.is_empty()
    }
}
