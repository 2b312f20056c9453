//! Google Gemini image-generation implementation.
//!
//! The image models are not covered by the general-purpose SDK wrappers
//! (multimodal inline parts plus an image-output generation config), so this
//! module speaks the REST protocol directly: serde wire types in
//! [`wire`] and a thin `reqwest` client in [`client`].

mod client;
pub mod wire;

pub use client::{DEFAULT_IMAGE_MODEL, GeminiImageClient};

/// Result type for Gemini operations.
pub type GeminiResult<T> = std::result::Result<T, comicforge_error::GenerationError>;
