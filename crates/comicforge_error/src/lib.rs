//! Error types for the Comicforge library.
//!
//! This crate provides the foundation error types used throughout the
//! Comicforge workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use comicforge_error::{ComicforgeResult, HttpError};
//!
//! fn fetch_data() -> ComicforgeResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod archive;
mod batch;
mod config;
mod csv;
mod error;
mod generation;
mod http;
mod storage;
mod users;

pub use archive::{ArchiveError, ArchiveErrorKind};
pub use batch::{BatchError, BatchErrorKind};
pub use config::ConfigError;
pub use csv::{CsvError, CsvErrorKind};
pub use error::{ComicforgeError, ComicforgeErrorKind, ComicforgeResult};
pub use generation::{GenerationError, GenerationErrorKind, RetryClass};
pub use http::HttpError;
pub use storage::{StorageError, StorageErrorKind};
pub use users::{UsersError, UsersErrorKind};
