//! The upload batch manager.
//!
//! [`UploadBatch`] owns the ordered list of [`FileEntry`] values for one
//! dropzone. It never transfers anything itself: an external uploader reports
//! progress through [`UploadBatch::set_progress`] and the batch reflects it.
//!
//! # Examples
//!
//! ```
//! use dropbay_core::batch::UploadBatch;
//! use dropbay_core::config::BatchConfig;
//! use dropbay_core::entry::FileBlob;
//! use dropbay_core::progress::Progress;
//!
//! let config = BatchConfig::new().with_max_files(2);
//! let mut batch = UploadBatch::new();
//!
//! let added = batch
//!     .add_files(vec![FileBlob::new("a.txt", 10)], &config)
//!     .unwrap();
//! let key = added[0].key;
//!
//! batch.set_progress(key, Progress::Uploading(42.0)).unwrap();
//! batch.set_progress(key, Progress::Complete).unwrap();
//! assert_eq!(batch.get(key).unwrap().progress, Progress::Complete);
//! ```

use tracing::{debug, warn};

use crate::config::BatchConfig;
use crate::entry::{EntryKey, FileBlob, FileEntry, UploadedUrls};
use crate::error::{BatchError, Rejection};
use crate::progress::Progress;

/// Receives notifications when a batch changes.
///
/// Both methods default to no-ops so observers only implement what they need.
pub trait BatchObserver {
    /// Called with the entries created by a successful `add_files`.
    fn on_files_added(&mut self, _added: &[FileEntry]) {}

    /// Called with the full list after any change.
    fn on_change(&mut self, _entries: &[FileEntry]) {}
}

/// Per-state counts for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BatchSummary {
    pub pending: usize,
    pub uploading: usize,
    pub complete: usize,
    pub failed: usize,
    /// Mean percentage over entries that have started (complete counts as 100)
    pub percent: f64,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.pending + self.uploading + self.complete + self.failed
    }

    /// True once every entry reached `Complete` or `Error`.
    pub fn is_settled(&self) -> bool {
        self.pending == 0 && self.uploading == 0
    }
}

/// Ordered collection of entries managed under one configuration.
#[derive(Default)]
pub struct UploadBatch {
    entries: Vec<FileEntry>,
    observers: Vec<Box<dyn BatchObserver>>,
}

impl std::fmt::Debug for UploadBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadBatch")
            .field("entries", &self.entries)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl UploadBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a batch around existing entries, e.g. when restoring UI state.
    pub fn from_entries(entries: Vec<FileEntry>) -> Self {
        Self {
            entries,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn BatchObserver>) {
        self.observers.push(observer);
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: EntryKey) -> Option<&FileEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Entries that have not been handed to an uploader yet.
    pub fn pending(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter().filter(|e| e.progress.is_pending())
    }

    /// Appends `candidates` as new pending entries.
    ///
    /// When `config.max_files` is set and the batch would end up larger than
    /// it, nothing is added and `Rejection::TooManyFiles` is returned.
    pub fn add_files(
        &mut self,
        candidates: Vec<FileBlob>,
        config: &BatchConfig,
    ) -> Result<Vec<FileEntry>, Rejection> {
        if let Some(max_files) = config.max_files {
            if self.entries.len() + candidates.len() > max_files {
                debug!(
                    current = self.entries.len(),
                    incoming = candidates.len(),
                    max_files,
                    "Rejecting files: batch limit reached"
                );
                return Err(Rejection::TooManyFiles(max_files));
            }
        }

        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let added: Vec<FileEntry> = candidates.into_iter().map(FileEntry::pending).collect();
        self.entries.extend(added.iter().cloned());
        debug!(added = added.len(), total = self.entries.len(), "Added files to batch");

        for observer in self.observers.iter_mut() {
            observer.on_files_added(&added);
            observer.on_change(&self.entries);
        }

        Ok(added)
    }

    /// Removes the entry with `key`, whatever its progress.
    ///
    /// Unknown keys leave the batch unchanged.
    pub fn remove_entry(&mut self, key: EntryKey) -> &[FileEntry] {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != key);

        if self.entries.len() != before {
            debug!(%key, "Removed entry");
            self.notify_change();
        }
        &self.entries
    }

    /// Records new progress for the entry with `key`.
    ///
    /// Unknown keys are a no-op. Moving an entry backwards (out of `Complete`
    /// or `Error`, or to a lower percentage) fails and leaves it untouched.
    /// Percentages are clamped into `0.0..=100.0`, NaN counting as zero.
    pub fn set_progress(
        &mut self,
        key: EntryKey,
        progress: Progress,
    ) -> Result<&[FileEntry], BatchError> {
        let progress = progress.normalized();
        let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) else {
            debug!(%key, "Progress for unknown entry ignored");
            return Ok(&self.entries);
        };

        if !entry.progress.can_advance_to(&progress) {
            warn!(%key, from = %entry.progress, to = %progress, "Rejected backwards progress");
            return Err(BatchError::InvalidTransition {
                key,
                from: entry.progress,
                to: progress,
            });
        }

        if entry.progress != progress {
            entry.progress = progress;
            self.notify_change();
        }
        Ok(&self.entries)
    }

    /// Marks an entry complete and stores where it was uploaded to.
    pub fn complete_with_urls(
        &mut self,
        key: EntryKey,
        urls: UploadedUrls,
    ) -> Result<&[FileEntry], BatchError> {
        self.set_progress(key, Progress::Complete)?;
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.urls = Some(urls);
            self.notify_change();
        }
        Ok(&self.entries)
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.entries.clear();
        self.notify_change();
    }

    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary::default();
        let mut started = 0usize;
        let mut percent_sum = 0.0;

        for entry in &self.entries {
            match entry.progress {
                Progress::Pending => summary.pending += 1,
                Progress::Uploading(p) => {
                    summary.uploading += 1;
                    started += 1;
                    percent_sum += p;
                }
                Progress::Complete => {
                    summary.complete += 1;
                    started += 1;
                    percent_sum += 100.0;
                }
                Progress::Error => summary.failed += 1,
            }
        }

        if started > 0 {
            summary.percent = percent_sum / started as f64;
        }
        summary
    }

    fn notify_change(&mut self) {
        for observer in self.observers.iter_mut() {
            observer.on_change(&self.entries);
        }
    }
}

/// Whether input should be disabled for a batch of `current_count` entries.
///
/// An explicit `override_disabled` always wins; otherwise input is disabled
/// once the batch holds `max_files` entries.
pub fn derive_disabled(
    config: &BatchConfig,
    current_count: usize,
    override_disabled: Option<bool>,
) -> bool {
    if let Some(disabled) = override_disabled {
        return disabled;
    }
    config
        .max_files
        .is_some_and(|max_files| current_count >= max_files)
}
