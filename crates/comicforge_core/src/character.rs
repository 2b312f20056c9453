//! Character reference images.

use crate::ImageRef;

/// A character reference image uploaded into the session.
///
/// The name is derived once from the filename at creation (extension
/// stripped, then normalized) and never re-derived afterwards. The binary
/// payload is owned by the session and released when the character is
/// removed or the session is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterImage {
    /// Display name, referenced from prompts by exact text
    pub name: String,
    /// The character reference image
    pub image: ImageRef,
}

impl CharacterImage {
    /// Create a new character image. `name` must already be normalized.
    pub fn new(name: impl Into<String>, image: ImageRef) -> Self {
        Self {
            name: name.into(),
            image,
        }
    }
}
