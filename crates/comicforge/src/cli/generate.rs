//! Generation command handlers.

use comicforge::{
    ArchiveEntry, BatchRunner, ComicforgeConfig, ComicforgeResult, GeminiImageClient,
    GenerationTask, ProgressObserver, SessionState, TaskStatus, export_archive, page_filename,
    parse_csv_path,
};
use comicforge_error::{StorageError, StorageErrorKind};
use std::path::Path;
use tracing::info;

/// Observer printing one progress line per task transition.
struct ConsoleObserver;

impl ProgressObserver for ConsoleObserver {
    fn on_task_started(&mut self, index: usize, total: usize, task: &GenerationTask) {
        println!(
            "[{}/{}] page {} ({}) ... generating",
            index + 1,
            total,
            task.page_number,
            task.template_name
        );
    }

    fn on_task_finished(&mut self, index: usize, total: usize, task: &GenerationTask) {
        match &task.status {
            TaskStatus::Completed { image } => println!(
                "[{}/{}] page {} ... completed ({} bytes)",
                index + 1,
                total,
                task.page_number,
                image.data.len()
            ),
            TaskStatus::Error { message } => println!(
                "[{}/{}] page {} ... error: {}",
                index + 1,
                total,
                task.page_number,
                message
            ),
            _ => {}
        }
    }
}

/// Build the generation client from configuration and `GEMINI_API_KEY`.
fn build_client(config: &ComicforgeConfig) -> ComicforgeResult<GeminiImageClient> {
    let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
    Ok(GeminiImageClient::with_model(
        api_key,
        &config.generation.model,
    )?)
}

/// Load session uploads from the given directories.
async fn load_session(
    templates_dir: &Path,
    characters_dir: Option<&Path>,
) -> ComicforgeResult<SessionState> {
    let mut session = SessionState::new();
    session.load_templates(templates_dir).await?;
    if let Some(dir) = characters_dir {
        session.load_characters(dir).await?;
    }
    Ok(session)
}

/// `comicforge generate`: the batch path.
pub async fn run_generate(
    csv: &Path,
    templates_dir: &Path,
    characters_dir: Option<&Path>,
    out: &Path,
) -> ComicforgeResult<()> {
    let config = ComicforgeConfig::load()?;
    // Credential check happens here, before any task can transition.
    let client = build_client(&config)?;
    let session = load_session(templates_dir, characters_dir).await?;

    let rows = parse_csv_path(csv)?;
    let mut tasks: Vec<GenerationTask> = rows.iter().map(GenerationTask::from_row).collect();
    info!(
        tasks = tasks.len(),
        templates = session.templates().len(),
        characters = session.characters().len(),
        "Starting batch generation"
    );

    let runner = BatchRunner::with_retry(client, config.retry_policy());
    runner
        .run(&session, &mut tasks, &mut ConsoleObserver)
        .await?;

    let completed = tasks.iter().filter(|t| t.image().is_some()).count();
    let failed = tasks.len() - completed;
    println!("Batch finished: {} completed, {} failed", completed, failed);

    if completed == 0 {
        println!("No completed pages, skipping archive");
        return Ok(());
    }

    // Only completed tasks with an image are eligible for the archive.
    let entries: Vec<ArchiveEntry> = tasks
        .iter()
        .filter_map(|task| {
            task.image()
                .map(|image| ArchiveEntry::data(image.clone(), page_filename(task.page_number)))
        })
        .collect();

    let summary = export_archive(&entries, out).await?;
    println!(
        "Saved {} page(s) to {}",
        summary.written.len(),
        out.display()
    );
    Ok(())
}

/// `comicforge generate-one`: the manual path.
pub async fn run_generate_one(
    template: &str,
    prompt: &str,
    page: u32,
    templates_dir: &Path,
    characters_dir: Option<&Path>,
    out_dir: &Path,
) -> ComicforgeResult<()> {
    let config = ComicforgeConfig::load()?;
    let client = build_client(&config)?;
    let session = load_session(templates_dir, characters_dir).await?;

    let runner = BatchRunner::with_retry(client, config.retry_policy());
    let task = runner.run_single(&session, template, prompt, page).await?;

    let path = out_dir.join(page_filename(task.page_number));
    if let Some(image) = task.image() {
        tokio::fs::write(&path, &image.data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        println!("Saved {}", path.display());
    }

    println!("{}", serde_json::to_string_pretty(&task.status).unwrap_or_default());
    Ok(())
}
