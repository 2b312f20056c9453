//! Core data types for the Comicforge batch comic generator.
//!
//! This crate provides the foundation data types shared across the
//! workspace: name normalization, aspect-ratio classification, image
//! references, and the session entities (characters, templates, tasks).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aspect;
mod character;
mod image;
mod normalize;
mod row;
mod size;
mod task;
mod template;

pub use aspect::AspectRatio;
pub use character::CharacterImage;
pub use image::{DataUrlError, ImageRef};
pub use normalize::{FilenameRule, debug_chars, image_stem, normalize, validate_character_filename};
pub use row::CsvRow;
pub use size::ImageSize;
pub use task::{GenerationTask, TaskStatus};
pub use template::{MAX_TEMPLATES, PanelTemplate};
