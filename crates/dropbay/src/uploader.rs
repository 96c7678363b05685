//! Upload plumbing for the demo.
//!
//! The hosted storage service is not part of this app, so uploads are
//! simulated: progress ticks on a timer and the result URLs are fabricated
//! from the bucket and file name. The bucket's size limit is enforced the way
//! the service would, which exercises the failure path for oversized files
//! that slipped past a widget without a client-side limit.

use std::time::Duration;

use async_trait::async_trait;
use dioxus::prelude::*;
use dropbay_core::bucket::{Bucket, BucketKind};
use dropbay_core::entry::{FileBlob, UploadedUrls};
use dropbay_core::error::TransferError;
use dropbay_core::transfer::{BatchHandle, Uploader};
use dropbay_core::{DropzoneSession, UploadBatch};

/// Base URL for fabricated upload results.
const DEMO_ORIGIN: &str = "https://files.dropbay.dev";

/// Number of progress ticks per simulated upload.
const TICKS: u32 = 10;

/// Pretends to upload into a bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedUploader {
    bucket: Bucket,
    /// Delay between progress ticks
    tick: Duration,
    /// Path input sent with each upload (e.g. "post")
    input: Option<String>,
}

impl SimulatedUploader {
    pub fn new(bucket: Bucket) -> Self {
        Self {
            bucket,
            tick: Duration::from_millis(120),
            input: None,
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn bucket(&self) -> &Bucket {
        &self.bucket
    }

    fn urls_for(&self, file: &FileBlob) -> UploadedUrls {
        let mut path = vec![self.bucket.name.clone()];
        if let Some(input) = &self.input {
            path.push(input.clone());
        }
        path.push(file.name.replace(' ', "-"));
        let path = path.join("/");

        UploadedUrls {
            url: format!("{}/{}", DEMO_ORIGIN, path),
            thumbnail_url: match self.bucket.kind {
                BucketKind::Image => Some(format!("{}/thumbnails/{}", DEMO_ORIGIN, path)),
                BucketKind::File => None,
            },
        }
    }
}

#[async_trait(?Send)]
impl Uploader for SimulatedUploader {
    async fn upload(
        &self,
        file: &FileBlob,
        on_progress: &mut dyn FnMut(f64),
    ) -> Result<UploadedUrls, TransferError> {
        if !self.bucket.accepts_input(self.input.as_deref()) {
            return Err(TransferError::Failed(format!(
                "bucket {} does not accept input {:?}",
                self.bucket.name, self.input
            )));
        }

        for tick in 1..=TICKS {
            sleep(self.tick).await;

            // The service checks the size once half the bytes are in
            if tick == TICKS / 2 {
                if let Some(max_size) = self.bucket.max_size {
                    if file.size > max_size {
                        return Err(TransferError::Failed(format!(
                            "{} exceeds the bucket limit",
                            file.name
                        )));
                    }
                }
            }

            on_progress(f64::from(tick) * 100.0 / f64::from(TICKS));
        }

        Ok(self.urls_for(file))
    }
}

/// Gives the transfer driver access to a session held in a signal.
///
/// Each update takes the write guard only for the duration of the closure, so
/// nothing is held across an await point.
#[derive(Clone, Copy)]
pub struct SessionHandle(pub Signal<DropzoneSession>);

impl BatchHandle for SessionHandle {
    fn with_batch<R>(&mut self, f: impl FnOnce(&mut UploadBatch) -> R) -> R {
        let mut session = self.0.write();
        f(session.batch_mut())
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep(duration: Duration) {
    gloo_timers::future::TimeoutFuture::new(duration.as_millis() as u32).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}
