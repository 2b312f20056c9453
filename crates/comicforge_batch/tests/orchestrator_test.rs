//! Tests for batch preconditions and the sequential orchestration loop.

use comicforge_batch::{BatchRunner, RetryPolicy, SessionState};
use std::time::Duration;
use comicforge_core::{
    GenerationTask, ImageRef, PanelTemplate, TaskStatus,
};
use comicforge_error::{BatchErrorKind, GenerationError, GenerationErrorKind};
use comicforge_interface::{ImageGenerator, ImageRequest, NullObserver, ProgressObserver};
use std::sync::{Arc, Mutex};

/// Generator that fails whenever the prompt contains "fail".
struct PromptKeyedGenerator {
    calls: Arc<Mutex<Vec<String>>>,
}

impl PromptKeyedGenerator {
    fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn call_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait::async_trait]
impl ImageGenerator for PromptKeyedGenerator {
    async fn generate(&self, request: &ImageRequest) -> Result<ImageRef, GenerationError> {
        self.calls.lock().unwrap().push(request.prompt.clone());
        if request.prompt.contains("fail") {
            Err(GenerationError::new(GenerationErrorKind::Api(
                "synthetic failure".to_string(),
            )))
        } else {
            Ok(ImageRef::png(vec![0xAB]))
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Observer recording (event, index, status label) triples.
#[derive(Default)]
struct RecordingObserver {
    events: Vec<(String, usize, String)>,
}

impl ProgressObserver for RecordingObserver {
    fn on_task_started(&mut self, index: usize, _total: usize, task: &GenerationTask) {
        self.events
            .push(("start".to_string(), index, task.status.label().to_string()));
    }

    fn on_task_finished(&mut self, index: usize, _total: usize, task: &GenerationTask) {
        self.events
            .push(("finish".to_string(), index, task.status.label().to_string()));
    }
}

fn template(name: &str) -> PanelTemplate {
    PanelTemplate::new(name, ImageRef::png(vec![1, 2, 3]), 896, 1200)
}

/// Single attempt, zero delay: failures in these tests are deterministic,
/// so the retry schedule only adds wall-clock time.
fn runner(generator: PromptKeyedGenerator) -> BatchRunner<PromptKeyedGenerator> {
    BatchRunner::with_retry(generator, RetryPolicy::new(1, Duration::ZERO))
}

fn session_with(names: &[&str]) -> SessionState {
    let mut session = SessionState::new();
    for name in names {
        session.add_template(template(name));
    }
    session
}

#[tokio::test]
async fn empty_task_list_is_a_reportable_error() {
    let runner = runner(PromptKeyedGenerator::new());
    let session = session_with(&["A"]);
    let mut tasks: Vec<GenerationTask> = Vec::new();

    let err = runner
        .run(&session, &mut tasks, &mut NullObserver)
        .await
        .unwrap_err();
    assert_eq!(err.kind, BatchErrorKind::NoTasks);
}

#[tokio::test]
async fn missing_templates_reject_the_batch() {
    let runner = runner(PromptKeyedGenerator::new());
    let session = SessionState::new();
    let mut tasks = vec![GenerationTask::new(1, "A", "p")];

    let err = runner
        .run(&session, &mut tasks, &mut NullObserver)
        .await
        .unwrap_err();
    assert_eq!(err.kind, BatchErrorKind::NoTemplates);
    assert_eq!(tasks[0].status, TaskStatus::Pending);
}

#[tokio::test]
async fn unmatched_template_name_rejects_whole_batch() {
    let generator = PromptKeyedGenerator::new();
    let calls = generator.call_log();
    let runner = BatchRunner::new(generator);
    let session = session_with(&["A"]);
    let mut tasks = vec![
        GenerationTask::new(1, "A", "p1"),
        GenerationTask::new(2, "B", "p2"),
    ];

    let err = runner
        .run(&session, &mut tasks, &mut NullObserver)
        .await
        .unwrap_err();

    match err.kind {
        BatchErrorKind::UnmatchedTemplates { missing, detail } => {
            assert_eq!(missing, vec!["B".to_string()]);
            assert!(detail.contains("\"B\" (length: 1)"));
            assert!(detail.contains("Registered templates"));
            assert!(detail.contains("\"A\" (length: 1)"));
        }
        other => panic!("unexpected error kind: {:?}", other),
    }

    // No task transitioned out of pending, and no generation call happened.
    assert!(tasks.iter().all(|t| t.status == TaskStatus::Pending));
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn one_failure_never_halts_the_batch() {
    let runner = runner(PromptKeyedGenerator::new());
    let session = session_with(&["A"]);
    let mut tasks = vec![
        GenerationTask::new(1, "A", "always fail"),
        GenerationTask::new(2, "A", "fine"),
    ];
    let mut observer = RecordingObserver::default();

    runner
        .run(&session, &mut tasks, &mut observer)
        .await
        .unwrap();

    assert_eq!(
        tasks[0].error_message(),
        Some("Image generation error: synthetic failure")
    );
    assert!(tasks[1].image().is_some());

    // Strictly sequential: start/finish pairs in task order.
    let shape: Vec<(&str, usize, &str)> = observer
        .events
        .iter()
        .map(|(e, i, s)| (e.as_str(), *i, s.as_str()))
        .collect();
    assert_eq!(
        shape,
        vec![
            ("start", 0, "generating"),
            ("finish", 0, "error"),
            ("start", 1, "generating"),
            ("finish", 1, "completed"),
        ]
    );
}

#[tokio::test]
async fn run_single_bypasses_batch_preconditions() {
    let runner = runner(PromptKeyedGenerator::new());
    let session = session_with(&["A"]);

    // No tasks exist, which would fail the batch precondition scan.
    let task = runner
        .run_single(&session, "A", "one-off page", 7)
        .await
        .unwrap();

    assert_eq!(task.page_number, 7);
    assert_eq!(task.template_name, "A");
    assert!(task.image().is_some());
    assert!(task.status.is_terminal());
}

#[tokio::test]
async fn run_single_requires_a_resolvable_template() {
    let runner = runner(PromptKeyedGenerator::new());
    let session = session_with(&["A"]);

    let err = runner
        .run_single(&session, "B", "one-off page", 1)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Template \"B\" not found"));
}
