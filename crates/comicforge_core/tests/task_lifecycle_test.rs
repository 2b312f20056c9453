//! Tests for task lifecycle and image reference round-trips.

use comicforge_core::{CsvRow, GenerationTask, ImageRef, TaskStatus};

#[test]
fn task_from_row_coerces_page_number() {
    let row = CsvRow::new("3", "テンプレ1", "X");
    let task = GenerationTask::from_row(&row);
    assert_eq!(task.page_number, 3);
    assert_eq!(task.template_name, "テンプレ1");
    assert_eq!(task.status, TaskStatus::Pending);

    let bad = CsvRow::new("three", "テンプレ1", "X");
    assert_eq!(GenerationTask::from_row(&bad).page_number, 0);
}

#[test]
fn status_is_replaced_wholesale() {
    let task = GenerationTask::new(1, "テンプレ1", "prompt");
    let generating = task.with_status(TaskStatus::Generating);
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(generating.status, TaskStatus::Generating);

    let image = ImageRef::png(vec![1, 2, 3]);
    let completed = generating.with_status(TaskStatus::Completed { image: image.clone() });
    assert!(completed.status.is_terminal());
    assert_eq!(completed.image(), Some(&image));
    assert_eq!(completed.error_message(), None);

    let failed = task.with_status(TaskStatus::Error {
        message: "Service overloaded".to_string(),
    });
    assert!(failed.status.is_terminal());
    assert_eq!(failed.error_message(), Some("Service overloaded"));
}

#[test]
fn image_ref_round_trips_through_data_url() {
    let image = ImageRef::new("image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0]);
    let url = image.to_data_url();
    assert!(url.starts_with("data:image/jpeg;base64,"));
    assert_eq!(ImageRef::from_data_url(&url).unwrap(), image);
}

#[test]
fn image_ref_rejects_non_data_urls() {
    assert!(ImageRef::from_data_url("https://example.com/x.png").is_err());
    assert!(ImageRef::from_data_url("data:image/png;base64,!!!").is_err());
}

#[test]
fn task_serializes_with_inline_status() {
    let task = GenerationTask::new(2, "テンプレ2", "p").with_status(TaskStatus::Completed {
        image: ImageRef::png(vec![9]),
    });
    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["status"], "completed");
    assert!(json["image"].as_str().unwrap().starts_with("data:image/png;base64,"));
}
