//! Dropzone controller.
//!
//! A [`DropzoneSession`] is what a multi-file dropzone widget holds: the batch,
//! its configuration, the caller's disabled override and whatever the last
//! drop left behind. Host events go in, a [`DropzoneView`] comes out.
//!
//! # Examples
//!
//! ```
//! use dropbay_core::config::BatchConfig;
//! use dropbay_core::entry::FileBlob;
//! use dropbay_core::session::DropzoneSession;
//!
//! let config = BatchConfig::new().with_max_files(2).with_max_size(1_048_576);
//! let mut session = DropzoneSession::new(config);
//!
//! session.handle_drop(vec![
//!     FileBlob::new("notes.txt", 500),
//!     FileBlob::new("video.mp4", 2_000_000),
//! ]);
//!
//! assert_eq!(session.batch().len(), 1);
//! assert_eq!(
//!     session.error_message().as_deref(),
//!     Some("The file is too large. Max size is 1 MB.")
//! );
//! ```

use tracing::{debug, info};

use crate::batch::{derive_disabled, UploadBatch};
use crate::config::BatchConfig;
use crate::dropzone::{derive_dropzone_state, DragSignals, DropzoneState};
use crate::entry::{EntryKey, FileBlob, FileEntry};
use crate::error::{BatchError, Rejection};
use crate::messages::{derive_error_message, rejection_message};
use crate::progress::Progress;
use crate::validation::{drag_items_valid, validate_drop, FileRejection};
use crate::view::DropzoneView;

#[derive(Debug)]
pub struct DropzoneSession {
    batch: UploadBatch,
    config: BatchConfig,
    disabled_override: Option<bool>,
    last_rejections: Vec<FileRejection>,
    custom_error: Option<Rejection>,
    drag: DragSignals,
}

impl DropzoneSession {
    pub fn new(config: BatchConfig) -> Self {
        Self::with_batch(config, UploadBatch::new())
    }

    pub fn with_batch(config: BatchConfig, batch: UploadBatch) -> Self {
        Self {
            batch,
            config,
            disabled_override: None,
            last_rejections: Vec::new(),
            custom_error: None,
            drag: DragSignals::default(),
        }
    }

    pub fn batch(&self) -> &UploadBatch {
        &self.batch
    }

    pub fn batch_mut(&mut self) -> &mut UploadBatch {
        &mut self.batch
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn last_rejections(&self) -> &[FileRejection] {
        &self.last_rejections
    }

    /// Forces input on or off; `None` returns to the capacity-based default.
    pub fn set_disabled(&mut self, disabled: Option<bool>) {
        self.disabled_override = disabled;
    }

    pub fn disabled_override(&self) -> Option<bool> {
        self.disabled_override
    }

    pub fn is_disabled(&self) -> bool {
        derive_disabled(&self.config, self.batch.len(), self.disabled_override)
    }

    /// Records drag signals from the host as-is.
    pub fn set_drag(&mut self, signals: DragSignals) {
        self.drag = signals;
    }

    pub fn drag(&self) -> DragSignals {
        self.drag
    }

    /// Files entered or moved over the dropzone.
    pub fn drag_over(&mut self, items_valid: Option<bool>) {
        self.drag = self.drag.drag_over(items_valid);
    }

    /// Files entered or moved over the dropzone, with whatever the host
    /// exposed about them before the drop.
    pub fn drag_over_items(&mut self, items: &[FileBlob]) {
        let items_valid = drag_items_valid(items, &self.config);
        self.drag_over(items_valid);
    }

    /// The pointer left the dropzone without dropping.
    pub fn drag_leave(&mut self) {
        self.drag = self.drag.drag_leave();
    }

    /// Keyboard focus moved onto or off the dropzone's input.
    pub fn set_focused(&mut self, focused: bool) {
        self.drag.focused = focused;
    }

    /// Handles a drop or picker selection.
    ///
    /// Files are validated individually, survivors are added to the batch and
    /// the drag state returns to idle. Returns the entries that were added.
    /// Refusals are kept as state for [`error_message`](Self::error_message).
    pub fn handle_drop(&mut self, files: Vec<FileBlob>) -> Vec<FileEntry> {
        let Some(accepted) = self.begin_drop(files) else {
            return Vec::new();
        };
        self.admit(accepted)
    }

    /// Handles a drop that should replace the batch contents.
    ///
    /// The current entries are only dropped once at least one new file passed
    /// validation; a refused replacement leaves them in place.
    pub fn replace_with(&mut self, files: Vec<FileBlob>) -> Vec<FileEntry> {
        let Some(accepted) = self.begin_drop(files) else {
            return Vec::new();
        };
        debug!(replaced = self.batch.len(), "Replacing batch contents");
        self.batch.clear();
        self.admit(accepted)
    }

    /// Resets drag state and validates a drop. Returns the accepted files, or
    /// `None` when nothing should be added.
    fn begin_drop(&mut self, files: Vec<FileBlob>) -> Option<Vec<FileBlob>> {
        self.drag = DragSignals::default();

        if self.is_disabled() {
            debug!(files = files.len(), "Drop ignored: dropzone disabled");
            return None;
        }

        self.custom_error = None;
        let outcome = validate_drop(files, &self.config);
        self.last_rejections = outcome.rejections;

        if !self.last_rejections.is_empty() {
            info!(
                rejected = self.last_rejections.len(),
                accepted = outcome.accepted.len(),
                "Some dropped files were rejected"
            );
        }

        if outcome.accepted.is_empty() {
            None
        } else {
            Some(outcome.accepted)
        }
    }

    fn admit(&mut self, accepted: Vec<FileBlob>) -> Vec<FileEntry> {
        match self.batch.add_files(accepted, &self.config) {
            Ok(added) => added,
            Err(rejection) => {
                info!(%rejection, "Drop refused");
                self.custom_error = Some(rejection);
                Vec::new()
            }
        }
    }

    /// Removes a pending entry. Entries that started uploading stay put.
    ///
    /// Returns whether anything was removed.
    pub fn remove(&mut self, key: EntryKey) -> bool {
        match self.batch.get(key) {
            Some(entry) if entry.progress.is_pending() => {
                self.batch.remove_entry(key);
                true
            }
            Some(entry) => {
                debug!(%key, progress = %entry.progress, "Refusing to remove started entry");
                false
            }
            None => false,
        }
    }

    pub fn set_progress(&mut self, key: EntryKey, progress: Progress) -> Result<(), BatchError> {
        self.batch.set_progress(key, progress).map(|_| ())
    }

    /// Banner text. A refusal computed against the live batch wins over
    /// per-file rejections from the last drop.
    pub fn error_message(&self) -> Option<String> {
        if let Some(custom) = &self.custom_error {
            return Some(rejection_message(custom));
        }
        derive_error_message(&self.last_rejections, &self.config)
    }

    pub fn container_state(&self) -> DropzoneState {
        derive_dropzone_state(self.drag, self.is_disabled())
    }

    pub fn view(&self) -> DropzoneView {
        DropzoneView::new(
            self.container_state(),
            self.error_message(),
            self.batch.entries(),
        )
    }
}
