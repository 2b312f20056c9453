//! Generator and progress-reporting traits.

use comicforge_core::{AspectRatio, GenerationTask, ImageRef, ImageSize};
use comicforge_error::GenerationError;

/// One image-generation request.
///
/// Assembled per task by the orchestrator: the task prompt, every session
/// character image in upload order, the resolved template image, and the
/// template's aspect bucket with the requested resolution tier.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    /// Generation prompt
    pub prompt: String,
    /// Character reference images, in input order
    pub character_images: Vec<ImageRef>,
    /// Panel-layout template image, if any
    pub template: Option<ImageRef>,
    /// Aspect bucket for the generated page
    pub aspect_ratio: AspectRatio,
    /// Requested resolution tier
    pub image_size: ImageSize,
}

impl ImageRequest {
    /// Create a request with no reference images.
    pub fn text_only(prompt: impl Into<String>, aspect_ratio: AspectRatio, image_size: ImageSize) -> Self {
        Self {
            prompt: prompt.into(),
            character_images: Vec::new(),
            template: None,
            aspect_ratio,
            image_size,
        }
    }
}

/// Driver for a single remote image-generation call.
///
/// Implementations issue exactly one request per invocation; retry and
/// sequencing live above this seam in the batch layer.
#[async_trait::async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate one image for the given request.
    async fn generate(&self, request: &ImageRequest) -> Result<ImageRef, GenerationError>;

    /// Name of the backing provider, for logging.
    fn provider_name(&self) -> &'static str;
}

/// Observer of per-task batch progress.
///
/// Called synchronously from the orchestration loop; implementations should
/// return quickly.
pub trait ProgressObserver: Send {
    /// A task has left `Pending` and its generation call is starting.
    fn on_task_started(&mut self, index: usize, total: usize, task: &GenerationTask);

    /// A task has reached a terminal status.
    fn on_task_finished(&mut self, index: usize, total: usize, task: &GenerationTask);
}

/// Observer that discards all progress events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl ProgressObserver for NullObserver {
    fn on_task_started(&mut self, _index: usize, _total: usize, _task: &GenerationTask) {}

    fn on_task_finished(&mut self, _index: usize, _total: usize, _task: &GenerationTask) {}
}
