//! Tests for archive export.

use comicforge_archive::{ArchiveEntry, export_archive, page_filename};
use comicforge_core::ImageRef;
use std::io::Read;
use tempfile::TempDir;

fn read_entry_names(path: &std::path::Path) -> Vec<String> {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

#[tokio::test]
async fn exports_every_resolvable_entry() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("comic_pages.zip");

    let entries = vec![
        ArchiveEntry::data(ImageRef::png(vec![1, 1, 1]), page_filename(1)),
        ArchiveEntry::url(ImageRef::png(vec![2, 2]).to_data_url(), page_filename(2)),
    ];

    let summary = export_archive(&entries, &out).await.unwrap();
    assert_eq!(summary.written, vec!["page_1.png", "page_2.png"]);
    assert!(summary.skipped.is_empty());
    assert_eq!(read_entry_names(&out), vec!["page_1.png", "page_2.png"]);
}

#[tokio::test]
async fn skips_failing_entries_without_aborting() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("comic_pages.zip");

    let entries = vec![
        ArchiveEntry::data(ImageRef::png(vec![1]), page_filename(1)),
        // Malformed data URL: decode fails, entry is skipped.
        ArchiveEntry::url("data:image/png;base64,!not-base64!", page_filename(2)),
        ArchiveEntry::data(ImageRef::png(vec![3]), page_filename(3)),
    ];

    let summary = export_archive(&entries, &out).await.unwrap();
    assert_eq!(summary.written, vec!["page_1.png", "page_3.png"]);
    assert_eq!(summary.skipped, vec!["page_2.png"]);
    assert_eq!(read_entry_names(&out), vec!["page_1.png", "page_3.png"]);
}

#[tokio::test]
async fn skips_unfetchable_urls() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("comic_pages.zip");

    let entries = vec![
        ArchiveEntry::url("not a url at all", page_filename(1)),
        ArchiveEntry::data(ImageRef::png(vec![9]), page_filename(2)),
    ];

    let summary = export_archive(&entries, &out).await.unwrap();
    assert_eq!(summary.written, vec!["page_2.png"]);
    assert_eq!(summary.skipped, vec!["page_1.png"]);
}

#[tokio::test]
async fn archived_bytes_round_trip() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("comic_pages.zip");
    let payload = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A];

    let entries = vec![ArchiveEntry::data(
        ImageRef::png(payload.clone()),
        page_filename(12),
    )];
    export_archive(&entries, &out).await.unwrap();

    let file = std::fs::File::open(&out).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut entry = archive.by_name("page_12.png").unwrap();
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes).unwrap();
    assert_eq!(bytes, payload);
}
