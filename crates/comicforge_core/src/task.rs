//! Generation tasks and their lifecycle.

use crate::{CsvRow, ImageRef};
use serde::{Deserialize, Serialize};

/// Status and result of a generation task.
///
/// Transitions are `Pending → Generating → {Completed | Error}`; the
/// terminal states are never left, and the whole field is replaced on each
/// transition rather than mutated piecemeal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TaskStatus {
    /// Waiting to be picked up by the orchestrator
    Pending,
    /// Generation call in flight
    Generating,
    /// Finished with a generated page image
    Completed {
        /// The generated page
        image: ImageRef,
    },
    /// Finished with a failure
    Error {
        /// Message of the final underlying error
        message: String,
    },
}

impl TaskStatus {
    /// Short label for progress output.
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Generating => "generating",
            TaskStatus::Completed { .. } => "completed",
            TaskStatus::Error { .. } => "error",
        }
    }

    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed { .. } | TaskStatus::Error { .. })
    }
}

/// One page-generation task.
///
/// Created `Pending` from a parsed CSV row or the manual form. Immutable
/// apart from [`TaskStatus`], which is replaced wholesale on each
/// transition.
///
/// # Examples
///
/// ```
/// use comicforge_core::{GenerationTask, TaskStatus};
///
/// let task = GenerationTask::new(3, "テンプレ1", "a quiet rooftop scene");
/// assert_eq!(task.status, TaskStatus::Pending);
/// assert!(task.image().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationTask {
    /// Page number used for output naming
    pub page_number: u32,
    /// Normalized template name this task resolves against
    pub template_name: String,
    /// Generation prompt
    pub prompt: String,
    /// Current status and result
    #[serde(flatten)]
    pub status: TaskStatus,
}

impl GenerationTask {
    /// Create a pending task.
    pub fn new(page_number: u32, template_name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            page_number,
            template_name: template_name.into(),
            prompt: prompt.into(),
            status: TaskStatus::Pending,
        }
    }

    /// Build a pending task from a parsed CSV row.
    ///
    /// A page number that fails to parse becomes 0 rather than failing
    /// the row.
    pub fn from_row(row: &CsvRow) -> Self {
        Self::new(
            row.page_number.parse().unwrap_or(0),
            row.template_name.clone(),
            row.prompt.clone(),
        )
    }

    /// Return a copy of this task with its status replaced.
    pub fn with_status(&self, status: TaskStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// The generated image, if the task completed.
    pub fn image(&self) -> Option<&ImageRef> {
        match &self.status {
            TaskStatus::Completed { image } => Some(image),
            _ => None,
        }
    }

    /// The failure message, if the task errored.
    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            TaskStatus::Error { message } => Some(message),
            _ => None,
        }
    }
}
