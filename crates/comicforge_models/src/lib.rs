//! Model-provider clients for Comicforge.
//!
//! Currently one provider: the Google Gemini image API ("Nano Banana"),
//! driven over its REST surface.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod gemini;

pub use gemini::{DEFAULT_IMAGE_MODEL, GeminiImageClient};
