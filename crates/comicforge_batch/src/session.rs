//! Session state: uploaded characters and templates.
//!
//! The session owns the binary payloads of every upload; removing an entity
//! or dropping the session releases them. Loading happens at the CLI
//! boundary, which is also where the template cap and filename rules are
//! enforced.

use comicforge_core::{
    CharacterImage, ImageRef, MAX_TEMPLATES, PanelTemplate, image_stem, normalize,
    validate_character_filename,
};
use comicforge_error::{StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Recommended template and character width in pixels.
pub const RECOMMENDED_WIDTH: u32 = 896;
/// Recommended template and character height in pixels.
pub const RECOMMENDED_HEIGHT: u32 = 1200;

/// Uploaded characters and templates for one generation session.
#[derive(Debug, Default)]
pub struct SessionState {
    characters: Vec<CharacterImage>,
    templates: Vec<PanelTemplate>,
}

impl SessionState {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered character images, in upload order.
    pub fn characters(&self) -> &[CharacterImage] {
        &self.characters
    }

    /// Registered panel templates, in upload order.
    pub fn templates(&self) -> &[PanelTemplate] {
        &self.templates
    }

    /// Register a character image.
    pub fn add_character(&mut self, character: CharacterImage) {
        self.characters.push(character);
    }

    /// Register a panel template.
    pub fn add_template(&mut self, template: PanelTemplate) {
        self.templates.push(template);
    }

    /// Remove a character by name, releasing its payload. Returns whether a
    /// character was removed.
    pub fn remove_character(&mut self, name: &str) -> bool {
        let before = self.characters.len();
        self.characters.retain(|c| c.name != name);
        self.characters.len() != before
    }

    /// Remove a template by id, releasing its payload. Returns whether a
    /// template was removed.
    pub fn remove_template(&mut self, id: uuid::Uuid) -> bool {
        let before = self.templates.len();
        self.templates.retain(|t| t.id != id);
        self.templates.len() != before
    }

    /// Find a template by its normalized name.
    pub fn find_template(&self, name: &str) -> Option<&PanelTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Load every template image from a directory into this session.
    ///
    /// Template names are the normalized filename stems. Rejects directories
    /// holding more than [`MAX_TEMPLATES`] images; the cap belongs to this
    /// upload boundary, not to the data types.
    #[instrument(skip(self))]
    pub async fn load_templates(&mut self, dir: &Path) -> Result<(), StorageError> {
        let files = image_files(dir).await?;
        if self.templates.len() + files.len() > MAX_TEMPLATES {
            return Err(StorageError::new(StorageErrorKind::TooManyTemplates {
                count: self.templates.len() + files.len(),
                max: MAX_TEMPLATES,
            }));
        }

        for path in files {
            let (image, width, height) = read_image(&path).await?;
            check_recommended_size(&path, width, height);

            let name = normalize(image_stem(&file_name(&path)));
            let template = PanelTemplate::new(name, image, width, height);
            info!(
                name = %template.name,
                width,
                height,
                aspect_ratio = %template.aspect_ratio,
                "Registered panel template"
            );
            self.templates.push(template);
        }
        Ok(())
    }

    /// Load every character image from a directory into this session.
    ///
    /// Filenames must pass the katakana/kanji rule; a violation aborts the
    /// load before any network call can happen. Character names get the same
    /// normalization as template names.
    #[instrument(skip(self))]
    pub async fn load_characters(&mut self, dir: &Path) -> Result<(), StorageError> {
        for path in image_files(dir).await? {
            let filename = file_name(&path);
            validate_character_filename(&filename).map_err(|rule| {
                StorageError::new(StorageErrorKind::InvalidFilename(format!(
                    "{}: {}",
                    filename, rule
                )))
            })?;

            let (image, width, height) = read_image(&path).await?;
            check_recommended_size(&path, width, height);

            let name = normalize(image_stem(&filename));
            info!(name = %name, "Registered character image");
            self.characters.push(CharacterImage::new(name, image));
        }
        Ok(())
    }

    /// Clone every character image payload, in upload order.
    pub fn character_images(&self) -> Vec<ImageRef> {
        self.characters.iter().map(|c| c.image.clone()).collect()
    }
}

/// Collect image files (`.png`, `.jpg`, `.jpeg`) in a directory, sorted by
/// filename for deterministic registration order.
async fn image_files(dir: &Path) -> Result<Vec<PathBuf>, StorageError> {
    let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| {
        StorageError::new(StorageErrorKind::DirectoryRead(format!(
            "{}: {}",
            dir.display(),
            e
        )))
    })?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| {
        StorageError::new(StorageErrorKind::DirectoryRead(format!(
            "{}: {}",
            dir.display(),
            e
        )))
    })? {
        let path = entry.path();
        if path.is_file() && is_image_path(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            e.eq_ignore_ascii_case("png")
                || e.eq_ignore_ascii_case("jpg")
                || e.eq_ignore_ascii_case("jpeg")
        })
        .unwrap_or(false)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn mime_for_path(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => "image/png",
        _ => "image/jpeg",
    }
}

/// Read an image file and probe its pixel dimensions.
async fn read_image(path: &Path) -> Result<(ImageRef, u32, u32), StorageError> {
    let data = tokio::fs::read(path).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;

    let (width, height) = image::image_dimensions(path).map_err(|e| {
        StorageError::new(StorageErrorKind::InvalidImage(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;

    Ok((ImageRef::new(mime_for_path(path), data), width, height))
}

fn check_recommended_size(path: &Path, width: u32, height: u32) {
    if width != RECOMMENDED_WIDTH || height != RECOMMENDED_HEIGHT {
        warn!(
            file = %path.display(),
            width,
            height,
            "Image is not the recommended {}x{}px",
            RECOMMENDED_WIDTH,
            RECOMMENDED_HEIGHT
        );
    }
}
