//! File entries and their keys.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::progress::Progress;

/// Reference to a file picked or dropped by the user.
///
/// The bytes stay with the host; the batch only needs the metadata used for
/// validation and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileBlob {
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// MIME type as reported by the host, if any
    pub mime_type: Option<String>,
}

impl FileBlob {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Lowercased extension including the leading dot (".png"), if any.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(format!(".{}", ext.to_ascii_lowercase()))
    }
}

/// Identifier for one entry, unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryKey(u64);

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

impl EntryKey {
    /// Allocates the next key from the process-wide counter.
    pub fn next() -> Self {
        EntryKey(NEXT_KEY.fetch_add(1, Ordering::Relaxed))
    }

    /// Wraps a raw value. Keys built this way are not reserved from the counter.
    pub fn from_raw(raw: u64) -> Self {
        EntryKey(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f-{}", self.0)
    }
}

/// Where a finished upload can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedUrls {
    pub url: String,
    /// Only image buckets produce thumbnails
    pub thumbnail_url: Option<String>,
}

/// One file's record within a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub file: FileBlob,
    pub key: EntryKey,
    pub progress: Progress,
    /// Present once the transfer has completed
    pub urls: Option<UploadedUrls>,
}

impl FileEntry {
    /// Creates a pending entry with a fresh key.
    pub fn pending(file: FileBlob) -> Self {
        Self {
            file,
            key: EntryKey::next(),
            progress: Progress::Pending,
            urls: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<EntryKey> = (0..1000).map(|_| EntryKey::next()).collect();
        assert_eq!(keys.len(), 1000);
    }

    #[test]
    fn test_keys_increase() {
        let a = EntryKey::next();
        let b = EntryKey::next();
        assert!(b > a);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(EntryKey::from_raw(42).to_string(), "f-42");
    }

    #[test]
    fn test_extension() {
        assert_eq!(FileBlob::new("photo.PNG", 1).extension().as_deref(), Some(".png"));
        assert_eq!(FileBlob::new("archive.tar.gz", 1).extension().as_deref(), Some(".gz"));
        assert_eq!(FileBlob::new("README", 1).extension(), None);
        assert_eq!(FileBlob::new(".bashrc", 1).extension(), None);
        assert_eq!(FileBlob::new("trailing.", 1).extension(), None);
    }

    #[test]
    fn test_pending_entry() {
        let entry = FileEntry::pending(FileBlob::new("a.txt", 10));
        assert!(entry.progress.is_pending());
        assert!(entry.urls.is_none());
    }
}
