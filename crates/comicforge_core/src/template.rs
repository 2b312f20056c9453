//! Panel-layout templates.

use crate::{AspectRatio, ImageRef};
use uuid::Uuid;

/// Maximum number of templates a session may register.
///
/// Enforced by the session loader (the upload boundary), not by this type.
pub const MAX_TEMPLATES: usize = 30;

/// A panel-layout template registered in the session.
///
/// The name MUST be produced by the normalizer from the filename stem;
/// CSV rows match templates by exact equality on that normalized name.
/// The id is generated at creation and stable for the template's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelTemplate {
    /// Opaque unique identifier
    pub id: Uuid,
    /// Normalized template name
    pub name: String,
    /// The template image
    pub image: ImageRef,
    /// Pixel width
    pub width: u32,
    /// Pixel height
    pub height: u32,
    /// Bucket classified from the pixel dimensions
    pub aspect_ratio: AspectRatio,
}

impl PanelTemplate {
    /// Create a new template, generating its id and classifying its aspect
    /// bucket from the given dimensions. `name` must already be normalized.
    pub fn new(name: impl Into<String>, image: ImageRef, width: u32, height: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            image,
            width,
            height,
            aspect_ratio: AspectRatio::classify(width, height),
        }
    }
}
