//! Render description for a dropzone.
//!
//! The UI crate turns a [`DropzoneView`] into markup; everything it shows is
//! decided here so it can be tested without a renderer.

use crate::dropzone::DropzoneState;
use crate::entry::{EntryKey, FileEntry};
use crate::format::format_file_size;
use crate::progress::Progress;

/// What to show at the right edge of an entry row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Pending: a remove button
    Remove,
    /// In flight: rounded percentage
    Percent(u8),
    /// Finished: a check mark
    Complete,
    /// Failed: a warning icon
    Warning,
}

/// One row in the file list.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRow {
    pub key: EntryKey,
    pub name: String,
    pub size_label: String,
    pub indicator: Indicator,
    /// Progress bar fill, only while uploading
    pub bar_percent: Option<f64>,
    pub removable: bool,
    /// Link to the uploaded file once complete
    pub url: Option<String>,
}

impl EntryRow {
    pub fn from_entry(entry: &FileEntry) -> Self {
        let indicator = match entry.progress {
            Progress::Pending => Indicator::Remove,
            Progress::Uploading(p) => Indicator::Percent(p.round().clamp(0.0, 100.0) as u8),
            Progress::Complete => Indicator::Complete,
            Progress::Error => Indicator::Warning,
        };

        Self {
            key: entry.key,
            name: entry.file.name.clone(),
            size_label: format_file_size(Some(entry.file.size)),
            indicator,
            bar_percent: entry.progress.percent(),
            removable: entry.progress.is_pending(),
            url: entry.urls.as_ref().map(|u| u.url.clone()),
        }
    }
}

/// Everything a dropzone renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DropzoneView {
    pub state: DropzoneState,
    /// Single-line banner under the container
    pub error: Option<String>,
    pub rows: Vec<EntryRow>,
}

impl DropzoneView {
    pub fn new(state: DropzoneState, error: Option<String>, entries: &[FileEntry]) -> Self {
        Self {
            state,
            error,
            rows: entries.iter().map(EntryRow::from_entry).collect(),
        }
    }

    /// Full container class: base class plus state modifier.
    pub fn container_class(&self) -> String {
        format!("db-dropzone {}", self.state.css_class())
    }
}
