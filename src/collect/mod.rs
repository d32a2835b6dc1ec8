//! Loading env files into an environment store.
//!
//! This module handles:
//! - The ordered filename list and its defaults
//! - Best-effort file reading (missing or empty files are skipped)
//! - Applying entries with last-write-wins semantics

pub mod loader;
pub mod types;

pub use loader::{DEFAULT_FILENAMES, Loader, collect};
pub use types::{LoadedFile, SourcedEntry};
