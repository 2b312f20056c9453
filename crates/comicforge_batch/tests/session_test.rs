//! Tests for session loading of templates and characters.

use comicforge_batch::SessionState;
use comicforge_core::AspectRatio;
use comicforge_error::StorageErrorKind;
use std::path::Path;
use tempfile::TempDir;

fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
    let image = image::RgbaImage::new(width, height);
    image.save(dir.join(name)).unwrap();
}

fn write_jpg(dir: &Path, name: &str, width: u32, height: u32) {
    let image = image::RgbImage::new(width, height);
    image.save(dir.join(name)).unwrap();
}

#[tokio::test]
async fn loads_templates_with_normalized_names_and_buckets() {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "テンプレ 1.png", 896, 1200);
    write_jpg(dir.path(), "wide.jpg", 1920, 1080);

    let mut session = SessionState::new();
    session.load_templates(dir.path()).await.unwrap();

    assert_eq!(session.templates().len(), 2);

    let tall = session.find_template("テンプレ1").unwrap();
    assert_eq!(tall.width, 896);
    assert_eq!(tall.height, 1200);
    assert_eq!(tall.aspect_ratio, AspectRatio::Tall3x4);
    assert_eq!(tall.image.mime_type, "image/png");

    let wide = session.find_template("wide").unwrap();
    assert_eq!(wide.aspect_ratio, AspectRatio::Wide16x9);
    assert_eq!(wide.image.mime_type, "image/jpeg");
}

#[tokio::test]
async fn skips_non_image_files() {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "テンプレ1.png", 100, 100);
    std::fs::write(dir.path().join("notes.txt"), "not an image").unwrap();

    let mut session = SessionState::new();
    session.load_templates(dir.path()).await.unwrap();
    assert_eq!(session.templates().len(), 1);
}

#[tokio::test]
async fn enforces_the_template_cap() {
    let dir = TempDir::new().unwrap();
    for i in 0..31 {
        write_png(dir.path(), &format!("t{:02}.png", i), 10, 10);
    }

    let mut session = SessionState::new();
    let err = session.load_templates(dir.path()).await.unwrap_err();
    assert_eq!(
        err.kind,
        StorageErrorKind::TooManyTemplates { count: 31, max: 30 }
    );
    assert!(session.templates().is_empty());
}

#[tokio::test]
async fn character_names_are_normalized_like_template_names() {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "サトル.png", 896, 1200);

    let mut session = SessionState::new();
    session.load_characters(dir.path()).await.unwrap();

    assert_eq!(session.characters().len(), 1);
    assert_eq!(session.characters()[0].name, "サトル");
}

#[tokio::test]
async fn rejects_hiragana_character_filenames() {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "さとる.png", 10, 10);

    let mut session = SessionState::new();
    let err = session.load_characters(dir.path()).await.unwrap_err();
    assert!(matches!(err.kind, StorageErrorKind::InvalidFilename(_)));
}

#[tokio::test]
async fn rejects_latin_only_character_filenames() {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "hero.png", 10, 10);

    let mut session = SessionState::new();
    let err = session.load_characters(dir.path()).await.unwrap_err();
    assert!(matches!(err.kind, StorageErrorKind::InvalidFilename(_)));
}

#[tokio::test]
async fn removal_releases_entities() {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "テンプレ1.png", 10, 10);

    let mut session = SessionState::new();
    session.load_templates(dir.path()).await.unwrap();
    let id = session.templates()[0].id;

    assert!(session.remove_template(id));
    assert!(!session.remove_template(id));
    assert!(session.find_template("テンプレ1").is_none());
}
