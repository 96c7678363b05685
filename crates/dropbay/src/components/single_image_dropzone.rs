use dioxus::html::{FileData, HasFileData};
use dioxus::logger::tracing::{error, info};
use dioxus::prelude::*;
use dropbay_core::entry::FileEntry;
use dropbay_core::format::format_file_size;
use dropbay_core::transfer::drive_upload;
use dropbay_core::DropzoneSession;

use super::multi_file_dropzone::to_blobs;
use crate::uploader::{SessionHandle, SimulatedUploader};
use crate::utils::SignalExt;

/// Single-image dropzone with an explicit upload button.
///
/// Holds one file at a time: a new drop replaces whatever is there unless an
/// upload is in flight. Size and type limits come from the uploader's bucket.
#[component]
pub fn SingleImageDropzone(uploader: SimulatedUploader) -> Element {
    let config = uploader.bucket().batch_config(Some(1));
    let mut session = use_signal(move || {
        let mut session = DropzoneSession::new(config);
        // Replacing the file is allowed, so a full batch does not lock input
        session.set_disabled(Some(false));
        session
    });

    let view = session.read().view();
    let current: Option<FileEntry> = session.read().batch().entries().first().cloned();
    let uploading = current
        .as_ref()
        .is_some_and(|entry| entry.progress.percent().is_some());
    let can_upload = current
        .as_ref()
        .is_some_and(|entry| entry.progress.is_pending());
    let container_class = view.container_class();
    let bar_percent = view.rows.first().and_then(|row| row.bar_percent);
    let max_size_label = format_file_size(uploader.bucket().max_size);

    let body = match current.as_ref() {
        Some(entry) => rsx! {
            div { class: "db-preview",
                div { class: "db-preview-name", "{entry.file.name}" }
                div { class: "db-preview-size", {format_file_size(Some(entry.file.size))} }
            }
        },
        None => rsx! {
            div { class: "db-dropzone-content",
                div { class: "db-dropzone-icon", "🖼" }
                div { class: "db-dropzone-title", "Drop an image, or click to select" }
                div { class: "db-dropzone-subtitle", "Max size {max_size_label}" }
            }
        },
    };

    let mut replace_file = move |files: Vec<FileData>| {
        let blobs = to_blobs(files);
        if blobs.is_empty() {
            return;
        }
        // The current file stays unless the new one is accepted
        let added = session.mutate(|s| s.replace_with(blobs));
        if let Some(entry) = added.first() {
            info!("Selected image {}", entry.file.name);
        }
    };

    let start_upload = {
        let uploader = uploader.clone();
        move |_| {
            let Some(key) = session.peek_with(|s| s.batch().pending().next().map(|e| e.key))
            else {
                return;
            };
            let uploader = uploader.clone();
            spawn(async move {
                session.mutate(|s| s.set_disabled(Some(true)));
                let mut handle = SessionHandle(session);
                match drive_upload(&mut handle, key, &uploader).await {
                    Ok(urls) => info!("Image available at {}", urls.url),
                    Err(e) => error!("Image upload failed: {}", e),
                }
                session.mutate(|s| s.set_disabled(Some(false)));
            });
        }
    };

    rsx! {
        section { class: "db-single",
            label {
                class: "{container_class} db-dropzone--single",
                ondragenter: move |evt: DragEvent| {
                    evt.prevent_default();
                    let items = to_blobs(evt.files());
                    session.mutate(|s| s.drag_over_items(&items));
                },
                ondragover: move |evt: DragEvent| {
                    evt.prevent_default();
                },
                ondragleave: move |_| {
                    session.mutate(|s| s.drag_leave());
                },
                ondrop: move |evt: DragEvent| {
                    evt.prevent_default();
                    if !uploading {
                        replace_file(evt.files());
                    }
                },

                input {
                    r#type: "file",
                    class: "db-hidden-input",
                    accept: "image/*",
                    disabled: uploading,
                    onfocus: move |_| {
                        session.mutate(|s| s.set_focused(true));
                    },
                    onblur: move |_| {
                        session.mutate(|s| s.set_focused(false));
                    },
                    onchange: move |evt: FormEvent| {
                        replace_file(evt.files());
                    },
                }

                {body}
            }

            if let Some(error) = view.error.clone() {
                div { class: "db-error", role: "alert", "{error}" }
            }

            if let Some(pct) = bar_percent {
                div { class: "db-progress",
                    div { class: "db-progress-bar", style: "width: {pct}%" }
                }
            }

            button {
                class: "db-upload-button",
                r#type: "button",
                disabled: !can_upload,
                onclick: start_upload,
                if uploading { "Uploading..." } else { "Upload" }
            }

            if let Some(urls) = current.as_ref().and_then(|entry| entry.urls.clone()) {
                div { class: "db-links",
                    a { href: "{urls.url}", target: "_blank", "URL" }
                    if let Some(thumbnail) = urls.thumbnail_url {
                        a { href: "{thumbnail}", target: "_blank", "THUMBNAIL" }
                    }
                }
            }
        }
    }
}
