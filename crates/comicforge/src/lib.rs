//! Batch comic-page generation from CSV prompts via the Gemini image API.
//!
//! This facade crate re-exports the workspace surface and carries the
//! layered configuration loader used by the `comicforge` binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;

pub use comicforge_archive::{ArchiveEntry, ArchiveSummary, export_archive, page_filename};
pub use comicforge_batch::{BatchRunner, RetryPolicy, SessionState, parse_csv_path, parse_csv_str};
pub use comicforge_core::{
    AspectRatio, CharacterImage, CsvRow, GenerationTask, ImageRef, ImageSize, PanelTemplate,
    TaskStatus, normalize,
};
pub use comicforge_error::{ComicforgeError, ComicforgeErrorKind, ComicforgeResult};
pub use comicforge_interface::{ImageGenerator, ImageRequest, NullObserver, ProgressObserver};
pub use comicforge_models::GeminiImageClient;
pub use comicforge_users::{
    FirestoreUserDirectory, MemoryUserDirectory, UserDirectory, UserProfile, UserRecord,
    UserStatus,
};

pub use config::ComicforgeConfig;
