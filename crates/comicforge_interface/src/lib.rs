//! Trait seams for the Comicforge workspace.
//!
//! The batch orchestrator drives any [`ImageGenerator`]; progress flows out
//! through any [`ProgressObserver`]. Keeping the traits in their own crate
//! lets the orchestration layer stay free of transport dependencies and
//! lets tests substitute mocks.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ImageGenerator, ImageRequest, NullObserver, ProgressObserver};
