//! ZIP export of completed pages.
//!
//! The exporter sees only (image source, filename) pairs; callers filter to
//! completed tasks before invoking it. A per-item fetch or decode failure
//! is logged and skipped without aborting the remaining items.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use comicforge_core::ImageRef;
use comicforge_error::{ArchiveError, ArchiveErrorKind};
use std::io::{Cursor, Write};
use std::path::Path;
use tracing::{info, instrument, warn};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Where an archive entry's image bytes come from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Self-contained payload
    Data(ImageRef),
    /// `data:` URL, decoded before insertion
    DataUrl(String),
    /// Remote URL, fetched before insertion
    Url(String),
}

/// One (image source, filename) pair destined for the archive.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Image bytes or where to get them
    pub source: ImageSource,
    /// Name of the entry inside the archive
    pub filename: String,
}

impl ArchiveEntry {
    /// Entry from a self-contained image.
    pub fn data(image: ImageRef, filename: impl Into<String>) -> Self {
        Self {
            source: ImageSource::Data(image),
            filename: filename.into(),
        }
    }

    /// Entry from a `data:` or remote URL.
    pub fn url(url: impl Into<String>, filename: impl Into<String>) -> Self {
        let url = url.into();
        let source = if url.starts_with("data:") {
            ImageSource::DataUrl(url)
        } else {
            ImageSource::Url(url)
        };
        Self {
            source,
            filename: filename.into(),
        }
    }
}

/// What the exporter actually wrote and what it had to skip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Entry names written into the archive
    pub written: Vec<String>,
    /// Entry names skipped after a fetch/decode failure
    pub skipped: Vec<String>,
}

/// Archive entry name for a page.
///
/// # Examples
///
/// ```
/// use comicforge_archive::page_filename;
///
/// assert_eq!(page_filename(3), "page_3.png");
/// ```
pub fn page_filename(page_number: u32) -> String {
    format!("page_{}.png", page_number)
}

/// Bundle entries into one deflate ZIP at `out`.
///
/// Items whose bytes cannot be obtained are skipped with a warning; the
/// archive is still produced for the rest. Only the archive itself failing
/// to build or save is an error.
#[instrument(skip(entries), fields(entries = entries.len(), out = %out.display()))]
pub async fn export_archive(
    entries: &[ArchiveEntry],
    out: &Path,
) -> Result<ArchiveSummary, ArchiveError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut summary = ArchiveSummary::default();

    for entry in entries {
        let bytes = match resolve_bytes(&entry.source).await {
            Ok(bytes) => bytes,
            Err(reason) => {
                warn!(filename = %entry.filename, %reason, "Skipping archive entry");
                summary.skipped.push(entry.filename.clone());
                continue;
            }
        };

        writer
            .start_file(entry.filename.as_str(), options)
            .map_err(|e| ArchiveError::new(ArchiveErrorKind::Zip(e.to_string())))?;
        writer
            .write_all(&bytes)
            .map_err(|e| ArchiveError::new(ArchiveErrorKind::Zip(e.to_string())))?;
        summary.written.push(entry.filename.clone());
    }

    let cursor = writer
        .finish()
        .map_err(|e| ArchiveError::new(ArchiveErrorKind::Zip(e.to_string())))?;

    tokio::fs::write(out, cursor.into_inner())
        .await
        .map_err(|e| {
            ArchiveError::new(ArchiveErrorKind::Io(format!("{}: {}", out.display(), e)))
        })?;

    info!(
        written = summary.written.len(),
        skipped = summary.skipped.len(),
        "Saved archive"
    );
    Ok(summary)
}

/// Obtain the raw bytes for one entry.
async fn resolve_bytes(source: &ImageSource) -> Result<Vec<u8>, String> {
    match source {
        ImageSource::Data(image) => Ok(image.data.clone()),
        ImageSource::DataUrl(url) => ImageRef::from_data_url(url)
            .map(|image| image.data)
            .map_err(|e| e.to_string()),
        ImageSource::Url(url) => {
            let response = reqwest::get(url).await.map_err(|e| e.to_string())?;
            let response = response.error_for_status().map_err(|e| e.to_string())?;
            let bytes = response.bytes().await.map_err(|e| e.to_string())?;
            Ok(bytes.to_vec())
        }
    }
}
