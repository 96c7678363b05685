//! UI components for the Dropbay demo.
//!
//! - [`MultiFileDropzone`]: drop several files, upload them as they arrive
//! - [`SingleImageDropzone`]: pick one image, upload it on request
//! - `file_row`: one entry in a dropzone's file list
//!
//! Components hold a `Signal<DropzoneSession>` and render the session's
//! [`DropzoneView`](dropbay_core::view::DropzoneView). All validation and
//! progress bookkeeping happens in `dropbay-core`.

mod file_row;
mod multi_file_dropzone;
mod single_image_dropzone;

pub use file_row::FileRow;
pub use multi_file_dropzone::MultiFileDropzone;
pub use single_image_dropzone::SingleImageDropzone;

use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;
use dropbay_core::bucket::BucketRouter;
use dropbay_core::config::DEFAULT_MAX_FILES;
use dropbay_core::entry::FileEntry;
use dropbay_core::format::format_file_size;
use dropbay_core::transfer::upload_pending;
use dropbay_core::DropzoneSession;

use crate::uploader::{SessionHandle, SimulatedUploader};
use crate::utils::SignalExt;

/// Bucket the multi-file widget uploads into.
const FILES_BUCKET: &str = "protectedFiles";
/// Bucket the single-image widget uploads into.
const IMAGES_BUCKET: &str = "publicImages";
/// Path input sent with image uploads.
const IMAGE_INPUT: &str = "post";

/// Demo page: both widgets side by side plus the bucket list.
#[component]
pub fn App() -> Element {
    let router = use_hook(BucketRouter::demo);

    let (Some(files_bucket), Some(images_bucket)) = (
        router.get(FILES_BUCKET).cloned(),
        router.get(IMAGES_BUCKET).cloned(),
    ) else {
        warn!("Demo buckets missing from router");
        return rsx! {
            div { class: "db-error", "Upload buckets are not configured." }
        };
    };

    let files_uploader = SimulatedUploader::new(files_bucket.clone());
    let image_uploader = SimulatedUploader::new(images_bucket).with_input(IMAGE_INPUT);

    let files_config = files_bucket.batch_config(Some(DEFAULT_MAX_FILES));
    let mut session = use_signal(move || DropzoneSession::new(files_config));
    let mut uploading = use_signal(|| false);

    // Start uploading as soon as files land; one task drains the batch at a time
    let on_files_added = move |added: Vec<FileEntry>| {
        info!("{} file(s) queued for upload", added.len());
        if uploading() {
            return;
        }
        // Claim the flag before spawning so a second drop cannot start another drain
        uploading.set(true);
        let uploader = files_uploader.clone();
        spawn(async move {
            let mut handle = SessionHandle(session);
            // New drops during a run are picked up by the next pass
            while session.peek_with(|s| s.batch().pending().next().is_some()) {
                let results = upload_pending(&mut handle, &uploader).await;
                let failed = results.iter().filter(|(_, r)| r.is_err()).count();
                info!("Upload pass finished: {} file(s), {} failed", results.len(), failed);
            }
            uploading.set(false);
        });
    };

    let summary = session.read().batch().summary();
    let bucket_names: Vec<(String, String)> = router
        .names()
        .filter_map(|name| router.get(name))
        .map(|bucket| {
            let limit = match bucket.max_size {
                Some(_) => format_file_size(bucket.max_size),
                None => "no limit".to_string(),
            };
            (bucket.name.clone(), limit)
        })
        .collect();

    rsx! {
        main { class: "db-page",
            header { class: "db-header",
                h1 { "Dropbay" }
                p { class: "db-subtitle", "Drag-and-drop uploads with live progress" }
            }

            div { class: "db-grid",
                section { class: "db-card",
                    h2 { "Files" }
                    MultiFileDropzone { session, on_files_added }
                    div { class: "db-summary",
                        "{summary.complete} uploaded · {summary.uploading} in progress · {summary.failed} failed"
                    }
                    button {
                        class: "db-secondary-button",
                        r#type: "button",
                        disabled: uploading() || summary.total() == 0,
                        onclick: move |_| session.mutate(|s| s.batch_mut().clear()),
                        "Clear"
                    }
                }

                section { class: "db-card",
                    h2 { "Image" }
                    SingleImageDropzone { uploader: image_uploader }
                }
            }

            section { class: "db-card db-buckets",
                h2 { "Buckets" }
                ul {
                    for (name, limit) in bucket_names {
                        li { key: "{name}",
                            span { class: "db-bucket-name", "{name}" }
                            span { class: "db-bucket-limit", "{limit}" }
                        }
                    }
                }
            }
        }
    }
}
