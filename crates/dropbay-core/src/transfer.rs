//! The seam between a batch and whatever actually moves the bytes.
//!
//! Transfers are performed by an [`Uploader`] (a hosted storage client, or a
//! simulation in the demo app). [`drive_upload`] hands it one pending entry
//! and feeds every progress callback into the batch, finishing with
//! `Complete` or `Error`. Everything runs on the UI event loop, so futures are
//! `?Send` and the batch is reached through a [`BatchHandle`] instead of being
//! borrowed across await points.

use async_trait::async_trait;
use instant::Instant;
use tracing::{info, warn};

use crate::batch::UploadBatch;
use crate::entry::{EntryKey, FileBlob, UploadedUrls};
use crate::error::TransferError;
use crate::progress::Progress;
use crate::session::DropzoneSession;

/// Something that can upload a file and report progress while doing so.
#[async_trait(?Send)]
pub trait Uploader {
    /// Upload `file`, calling `on_progress` with percentages in `0.0..=100.0`.
    async fn upload(
        &self,
        file: &FileBlob,
        on_progress: &mut dyn FnMut(f64),
    ) -> Result<UploadedUrls, TransferError>;
}

/// Short-lived mutable access to the batch an upload reports into.
pub trait BatchHandle {
    fn with_batch<R>(&mut self, f: impl FnOnce(&mut UploadBatch) -> R) -> R;
}

impl BatchHandle for UploadBatch {
    fn with_batch<R>(&mut self, f: impl FnOnce(&mut UploadBatch) -> R) -> R {
        f(self)
    }
}

impl BatchHandle for DropzoneSession {
    fn with_batch<R>(&mut self, f: impl FnOnce(&mut UploadBatch) -> R) -> R {
        f(self.batch_mut())
    }
}

/// Uploads the pending entry `key` and mirrors its progress into the batch.
///
/// Callbacks that would move progress backwards are logged and dropped. If
/// the entry is removed mid-transfer the remaining updates are no-ops.
pub async fn drive_upload<H, U>(
    handle: &mut H,
    key: EntryKey,
    uploader: &U,
) -> Result<UploadedUrls, TransferError>
where
    H: BatchHandle,
    U: Uploader + ?Sized,
{
    let file = handle.with_batch(|batch| match batch.get(key) {
        None => Err(TransferError::NotFound(key)),
        Some(entry) if !entry.progress.is_pending() => Err(TransferError::NotPending(key)),
        Some(entry) => Ok(entry.file.clone()),
    })?;

    let started = Instant::now();
    apply(handle, key, Progress::Uploading(0.0));

    let result = {
        let mut on_progress = |percent: f64| apply(handle, key, Progress::uploading(percent));
        uploader.upload(&file, &mut on_progress).await
    };

    let elapsed_ms = started.elapsed().as_millis() as u64;
    match result {
        Ok(urls) => {
            let stored = handle.with_batch(|batch| {
                batch.complete_with_urls(key, urls.clone()).map(|_| ())
            });
            if let Err(err) = stored {
                warn!(%key, %err, "Upload finished but entry could not be completed");
            }
            info!(%key, name = %file.name, elapsed_ms, "Upload complete");
            Ok(urls)
        }
        Err(err) => {
            apply(handle, key, Progress::Error);
            warn!(%key, name = %file.name, elapsed_ms, %err, "Upload failed");
            Err(err)
        }
    }
}

/// Uploads every pending entry, one after another, in batch order.
pub async fn upload_pending<H, U>(
    handle: &mut H,
    uploader: &U,
) -> Vec<(EntryKey, Result<UploadedUrls, TransferError>)>
where
    H: BatchHandle,
    U: Uploader + ?Sized,
{
    let keys: Vec<EntryKey> =
        handle.with_batch(|batch| batch.pending().map(|entry| entry.key).collect());

    let mut results = Vec::with_capacity(keys.len());
    for key in keys {
        let result = drive_upload(handle, key, uploader).await;
        results.push((key, result));
    }
    results
}

fn apply<H: BatchHandle>(handle: &mut H, key: EntryKey, progress: Progress) {
    let applied = handle.with_batch(|batch| batch.set_progress(key, progress).map(|_| ()));
    if let Err(err) = applied {
        warn!(%err, "Ignoring progress update");
    }
}
