//! Sequential batch orchestration.

use crate::{RetryPolicy, SessionState};
use comicforge_core::{GenerationTask, ImageSize, TaskStatus, debug_chars};
use comicforge_error::{BatchError, BatchErrorKind, ComicforgeResult};
use comicforge_interface::{ImageGenerator, ImageRequest, ProgressObserver};
use tracing::{debug, info, instrument};

/// Resolution tier used for every batch and manual generation.
pub const BATCH_IMAGE_SIZE: ImageSize = ImageSize::TwoK;

/// Drives generation tasks one at a time through template resolution,
/// generation with retry, and status transition.
///
/// Task state machine: `Pending → Generating → {Completed | Error}`,
/// terminal once reached. Preconditions are checked once, before anything
/// transitions; there is no partial batch execution. Once running, tasks
/// are processed strictly sequentially and one task's failure never halts
/// the batch.
///
/// The API credential is validated when the generator is constructed, so a
/// runner can only exist with a credentialed client behind it.
pub struct BatchRunner<G> {
    generator: G,
    retry: RetryPolicy,
}

impl<G: ImageGenerator> BatchRunner<G> {
    /// Create a runner with the default retry policy.
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            retry: RetryPolicy::default(),
        }
    }

    /// Create a runner with an explicit retry policy.
    pub fn with_retry(generator: G, retry: RetryPolicy) -> Self {
        Self { generator, retry }
    }

    /// Check every batch precondition without transitioning any task.
    ///
    /// Hard stops, in order: at least one task must exist (an empty CSV
    /// parse lands here as "no data"), at least one template must be
    /// registered, and every task's normalized template name must resolve
    /// to a registered template. The unmatched-name diagnostic lists each
    /// missing name with its character length next to the full registered
    /// list, because the usual culprit is an invisible character.
    pub fn check_preconditions(
        tasks: &[GenerationTask],
        session: &SessionState,
    ) -> Result<(), BatchError> {
        if tasks.is_empty() {
            return Err(BatchError::new(BatchErrorKind::NoTasks));
        }
        if session.templates().is_empty() {
            return Err(BatchError::new(BatchErrorKind::NoTemplates));
        }

        let mut missing: Vec<String> = Vec::new();
        for task in tasks {
            if session.find_template(&task.template_name).is_none()
                && !missing.contains(&task.template_name)
            {
                debug!(
                    name = %task.template_name,
                    chars = %debug_chars(&task.template_name),
                    "Unmatched template name"
                );
                missing.push(task.template_name.clone());
            }
        }

        if !missing.is_empty() {
            let detail = unmatched_detail(&missing, session);
            return Err(BatchError::new(BatchErrorKind::UnmatchedTemplates {
                missing,
                detail,
            }));
        }
        Ok(())
    }

    /// Run every task to a terminal status, strictly sequentially.
    ///
    /// Each task slot is replaced wholesale on every transition. The
    /// template is re-looked-up per task rather than cached from the
    /// precondition pass. Per-task failures are captured into that task's
    /// `Error` status; the loop always proceeds to the next task.
    #[instrument(skip_all, fields(tasks = tasks.len()))]
    pub async fn run(
        &self,
        session: &SessionState,
        tasks: &mut [GenerationTask],
        observer: &mut dyn ProgressObserver,
    ) -> Result<(), BatchError> {
        Self::check_preconditions(tasks, session)?;

        let total = tasks.len();
        for index in 0..total {
            tasks[index] = tasks[index].with_status(TaskStatus::Generating);
            observer.on_task_started(index, total, &tasks[index]);
            info!(
                page = tasks[index].page_number,
                template = %tasks[index].template_name,
                "Generating page {}/{}",
                index + 1,
                total
            );

            let status = self.generate_for(session, &tasks[index]).await;

            tasks[index] = tasks[index].with_status(status);
            observer.on_task_finished(index, total, &tasks[index]);
        }
        Ok(())
    }

    /// One-off generation outside CSV ingestion.
    ///
    /// Bypasses the batch precondition scan; the template must still
    /// resolve. On success returns a new `Completed` task for the caller to
    /// append to its task list.
    #[instrument(skip(self, session, prompt))]
    pub async fn run_single(
        &self,
        session: &SessionState,
        template_name: &str,
        prompt: &str,
        page_number: u32,
    ) -> ComicforgeResult<GenerationTask> {
        let template = session.find_template(template_name).ok_or_else(|| {
            BatchError::new(BatchErrorKind::TemplateNotFound(template_name.to_string()))
        })?;

        let request = ImageRequest {
            prompt: prompt.to_string(),
            character_images: session.character_images(),
            template: Some(template.image.clone()),
            aspect_ratio: template.aspect_ratio,
            image_size: BATCH_IMAGE_SIZE,
        };

        let image = self.retry.run(&self.generator, &request).await?;
        let task = GenerationTask::new(page_number, template_name, prompt)
            .with_status(TaskStatus::Completed { image });
        Ok(task)
    }

    /// Resolve a task's template and run its generation call.
    async fn generate_for(&self, session: &SessionState, task: &GenerationTask) -> TaskStatus {
        let template = match session.find_template(&task.template_name) {
            Some(template) => template,
            None => {
                return TaskStatus::Error {
                    message: BatchErrorKind::TemplateNotFound(task.template_name.clone())
                        .to_string(),
                };
            }
        };

        let request = ImageRequest {
            prompt: task.prompt.clone(),
            character_images: session.character_images(),
            template: Some(template.image.clone()),
            aspect_ratio: template.aspect_ratio,
            image_size: BATCH_IMAGE_SIZE,
        };

        match self.retry.run(&self.generator, &request).await {
            Ok(image) => TaskStatus::Completed { image },
            Err(err) => TaskStatus::Error {
                message: err.kind.to_string(),
            },
        }
    }
}

/// Build the unmatched-template diagnostic.
fn unmatched_detail(missing: &[String], session: &SessionState) -> String {
    let mut lines = vec!["The following templates were not found:".to_string()];
    for name in missing {
        lines.push(format!("  \"{}\" (length: {})", name, name.chars().count()));
    }
    lines.push(String::new());
    lines.push("Registered templates:".to_string());
    if session.templates().is_empty() {
        lines.push("  (none)".to_string());
    } else {
        for template in session.templates() {
            lines.push(format!(
                "  \"{}\" (length: {})",
                template.name,
                template.name.chars().count()
            ));
        }
    }
    lines.push(String::new());
    lines.push(
        "Names must exactly match the template filename with its image extension stripped."
            .to_string(),
    );
    lines.join("\n")
}
