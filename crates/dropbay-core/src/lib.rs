//! # Dropbay Core
//!
//! Platform-independent state for multi-file upload dropzones.
//!
//! This crate holds everything a dropzone decides: which files are accepted,
//! how each entry's transfer progresses, what error banner to show and how
//! the container looks. The UI crate only forwards host events and renders
//! the resulting [`view::DropzoneView`].
//!
//! ## Modules
//!
//! - [`batch`] - Upload batch manager (add, remove, progress, observers)
//! - [`session`] - Dropzone controller tying a batch to its configuration
//! - [`validation`] - Per-file size/type checks run on drop
//! - [`progress`] - Entry progress and its forward-only transitions
//! - [`dropzone`] - Derived drag-and-drop container state
//! - [`view`] - Render description for a dropzone
//! - [`transfer`] - Uploader trait and progress driver
//! - [`bucket`] - Declarative upload buckets
//! - [`messages`] - User-facing rejection messages
//! - [`format`] - Human-readable file sizes
//! - [`config`] - Batch configuration and constants
//! - [`error`] - Error types

#![forbid(unsafe_code)]

pub mod batch;
pub mod bucket;
pub mod config;
pub mod dropzone;
pub mod entry;
pub mod error;
pub mod format;
pub mod messages;
pub mod progress;
pub mod session;
pub mod transfer;
pub mod validation;
pub mod view;

pub use batch::{BatchObserver, UploadBatch};
pub use config::BatchConfig;
pub use entry::{EntryKey, FileBlob, FileEntry, UploadedUrls};
pub use error::Rejection;
pub use progress::Progress;
pub use session::DropzoneSession;
