//! Error types for dropbay-core.
//!
//! Rejections are user-facing and recoverable: they are stored as state and
//! rendered as a single banner line, never propagated as failures. The
//! remaining enums cover progress bookkeeping, transfers and configuration.

use thiserror::Error;

use crate::entry::EntryKey;
use crate::progress::Progress;

/// Reasons a drop (or part of one) was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// A file exceeded the configured byte limit
    #[error("file exceeds the {0} byte limit")]
    FileTooLarge(u64),
    /// A file did not match the accepted types
    #[error("file type is not accepted")]
    InvalidFileType,
    /// Adding the files would exceed the configured count
    #[error("more than {0} file(s)")]
    TooManyFiles(usize),
    /// Fallback for causes the host reported but we do not recognise
    #[error("file is not supported")]
    UnsupportedFile,
}

/// Errors from mutating an [`UploadBatch`](crate::batch::UploadBatch).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BatchError {
    /// The requested progress would move an entry backwards
    #[error("entry {key}: cannot move from {from} to {to}")]
    InvalidTransition {
        key: EntryKey,
        from: Progress,
        to: Progress,
    },
}

/// Errors that can occur while transferring a file.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransferError {
    /// The uploader reported a failure
    #[error("Upload failed: {0}")]
    Failed(String),
    /// The entry has already started or finished transferring
    #[error("Entry {0} is not pending")]
    NotPending(EntryKey),
    /// No entry with this key exists in the batch
    #[error("Entry {0} not found")]
    NotFound(EntryKey),
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document could not be parsed
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document parsed but describes an unusable configuration
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl From<TransferError> for String {
    fn from(err: TransferError) -> String {
        err.to_string()
    }
}

impl From<BatchError> for String {
    fn from(err: BatchError) -> String {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_error_to_string() {
        let msg: String = TransferError::Failed("connection reset".to_string()).into();
        assert_eq!(msg, "Upload failed: connection reset");
    }

    #[test]
    fn test_invalid_transition_display() {
        let err = BatchError::InvalidTransition {
            key: EntryKey::from_raw(7),
            from: Progress::Complete,
            to: Progress::Pending,
        };
        assert_eq!(err.to_string(), "entry f-7: cannot move from complete to pending");
    }
}
