//! End-to-end tests for the dropzone workflow.
//!
//! These tests exercise the full path a widget takes:
//! 1. Drop: validation → batch admission → error banner
//! 2. Upload: uploader callbacks → progress → completed rows
//!
//! Run with: `cargo test -p dropbay-core --test integration_tests`

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use dropbay_core::batch::{BatchObserver, UploadBatch};
use dropbay_core::bucket::BucketRouter;
use dropbay_core::config::BatchConfig;
use dropbay_core::dropzone::DropzoneState;
use dropbay_core::entry::{FileBlob, FileEntry, UploadedUrls};
use dropbay_core::error::TransferError;
use dropbay_core::format::format_file_size;
use dropbay_core::progress::Progress;
use dropbay_core::session::DropzoneSession;
use dropbay_core::transfer::{upload_pending, Uploader};
use dropbay_core::view::Indicator;

// ============================================================================
// Test Fixtures
// ============================================================================

/// Counts every notification the batch sends.
#[derive(Default)]
struct Notifications {
    added: usize,
    changes: usize,
    last_len: usize,
}

struct Counter(Rc<RefCell<Notifications>>);

impl BatchObserver for Counter {
    fn on_files_added(&mut self, added: &[FileEntry]) {
        self.0.borrow_mut().added += added.len();
    }

    fn on_change(&mut self, entries: &[FileEntry]) {
        let mut n = self.0.borrow_mut();
        n.changes += 1;
        n.last_len = entries.len();
    }
}

/// Reports 25/50/75/100 and succeeds, except for files named `fail.*`.
struct QuarterUploader;

#[async_trait(?Send)]
impl Uploader for QuarterUploader {
    async fn upload(
        &self,
        file: &FileBlob,
        on_progress: &mut dyn FnMut(f64),
    ) -> Result<UploadedUrls, TransferError> {
        for step in [25.0, 50.0, 75.0, 100.0] {
            on_progress(step);
        }
        if file.name.starts_with("fail.") {
            return Err(TransferError::Failed("storage unavailable".to_string()));
        }
        Ok(UploadedUrls {
            url: format!("https://files.example/{}", file.name),
            thumbnail_url: Some(format!("https://files.example/thumb/{}", file.name)),
        })
    }
}

// ============================================================================
// Drop handling
// ============================================================================

#[test]
fn test_oversized_file_rejected_before_batch() {
    let config = BatchConfig::new().with_max_files(2).with_max_size(1_048_576);
    let mut session = DropzoneSession::new(config);

    let added = session.handle_drop(vec![
        FileBlob::new("small.txt", 500),
        FileBlob::new("large.bin", 2_000_000),
    ]);

    assert_eq!(added.len(), 1);
    assert_eq!(session.batch().len(), 1);
    assert_eq!(session.batch().entries()[0].progress, Progress::Pending);
    assert_eq!(
        session.error_message().as_deref(),
        Some("The file is too large. Max size is 1 MB.")
    );
    assert_eq!(session.container_state(), DropzoneState::Idle);
}

#[test]
fn test_batch_limit_is_all_or_nothing() {
    let config = BatchConfig::new().with_max_files(3);
    let mut batch = UploadBatch::new();

    batch
        .add_files(vec![FileBlob::new("a", 1), FileBlob::new("b", 1)], &config)
        .unwrap();
    let before = batch.entries().to_vec();

    let err = batch
        .add_files(vec![FileBlob::new("c", 1), FileBlob::new("d", 1)], &config)
        .unwrap_err();

    assert_eq!(err.to_string(), "more than 3 file(s)");
    assert_eq!(batch.entries(), before.as_slice());
}

#[test]
fn test_observers_see_adds_and_removals() {
    let log = Rc::new(RefCell::new(Notifications::default()));
    let mut batch = UploadBatch::new();
    batch.subscribe(Box::new(Counter(log.clone())));

    let added = batch
        .add_files(
            vec![FileBlob::new("a", 1), FileBlob::new("b", 1)],
            &BatchConfig::default(),
        )
        .unwrap();
    batch.remove_entry(added[0].key);

    let log = log.borrow();
    assert_eq!(log.added, 2);
    assert_eq!(log.changes, 2);
    assert_eq!(log.last_len, 1);
}

#[test]
fn test_image_bucket_widget() {
    let router = BucketRouter::demo();
    let config = router
        .get("publicImages")
        .map(|bucket| bucket.batch_config(Some(1)))
        .unwrap();
    let mut session = DropzoneSession::new(config);

    session.drag_over(Some(false));
    assert_eq!(session.container_state(), DropzoneState::RejectPreview);
    session.drag_leave();
    assert_eq!(session.container_state(), DropzoneState::Idle);

    session.drag_over(None);
    assert_eq!(session.container_state(), DropzoneState::Focused);

    session.handle_drop(vec![FileBlob::new("notes.txt", 10).with_mime_type("text/plain")]);
    assert_eq!(session.error_message().as_deref(), Some("Invalid file type."));
    assert!(session.batch().is_empty());

    session.handle_drop(vec![FileBlob::new("cat.png", 2048).with_mime_type("image/png")]);
    assert_eq!(session.error_message(), None);
    assert!(session.is_disabled());
    assert_eq!(session.view().state, DropzoneState::Disabled);
}

// ============================================================================
// Upload flow
// ============================================================================

#[tokio::test]
async fn test_upload_all_pending() {
    let mut session = DropzoneSession::new(BatchConfig::new().with_max_files(5));
    session.handle_drop(vec![
        FileBlob::new("ok.png", 1536),
        FileBlob::new("fail.png", 2048),
    ]);

    let results = upload_pending(&mut session, &QuarterUploader).await;
    assert_eq!(results.len(), 2);

    let view = session.view();
    assert_eq!(view.rows[0].indicator, Indicator::Complete);
    assert_eq!(view.rows[0].size_label, format_file_size(Some(1536)));
    assert_eq!(
        view.rows[0].url.as_deref(),
        Some("https://files.example/ok.png")
    );
    assert_eq!(view.rows[1].indicator, Indicator::Warning);
    assert!(view.rows.iter().all(|row| !row.removable));

    // Finished entries cannot be removed through the widget
    let key = view.rows[0].key;
    assert!(!session.remove(key));
    assert_eq!(session.batch().len(), 2);
}

#[tokio::test]
async fn test_terminal_progress_is_sticky() {
    let mut batch = UploadBatch::new();
    let key = batch
        .add_files(vec![FileBlob::new("a", 1)], &BatchConfig::default())
        .unwrap()[0]
        .key;

    upload_pending(&mut batch, &QuarterUploader).await;
    assert_eq!(batch.get(key).unwrap().progress, Progress::Complete);

    assert!(batch.set_progress(key, Progress::Uploading(10.0)).is_err());
    assert!(batch.set_progress(key, Progress::Error).is_err());
    assert_eq!(batch.get(key).unwrap().progress, Progress::Complete);
}
