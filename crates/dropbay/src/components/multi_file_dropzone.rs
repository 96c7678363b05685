use dioxus::html::{FileData, HasFileData};
use dioxus::logger::tracing::{debug, info};
use dioxus::prelude::*;
use dropbay_core::entry::{FileBlob, FileEntry};
use dropbay_core::DropzoneSession;

use super::file_row::FileRow;
use crate::utils::SignalExt;

/// Multi-file dropzone bound to a session signal.
///
/// Files can be dropped on the container or picked through the hidden input
/// it wraps. Accepted files are announced through `on_files_added`; the caller
/// decides when to upload them.
#[component]
pub fn MultiFileDropzone(
    session: Signal<DropzoneSession>,
    on_files_added: EventHandler<Vec<FileEntry>>,
    #[props(default)] disabled: Option<bool>,
) -> Element {
    let mut session = session;

    // Push the caller's override into the session whenever the prop changes
    use_effect(use_reactive!(|disabled| {
        if session.peek_with(|s| s.disabled_override() != disabled) {
            session.mutate(|s| s.set_disabled(disabled));
        }
    }));

    let view = session.read().view();
    let accepts_input = view.state.accepts_input();
    let container_class = view.container_class();

    let mut accept_files = move |files: Vec<FileData>| {
        let blobs = to_blobs(files);
        if blobs.is_empty() {
            return;
        }

        debug!("Dropzone received {} file(s)", blobs.len());
        let added = session.mutate(|s| s.handle_drop(blobs));
        if !added.is_empty() {
            info!("Accepted {} file(s) into the batch", added.len());
            on_files_added.call(added);
        }
    };

    rsx! {
        section { class: "db-multi",
            label {
                class: "{container_class}",
                ondragenter: move |evt: DragEvent| {
                    evt.prevent_default();
                    // Hosts that expose dragged files get an accept/reject preview
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
                    accept_files(evt.files());
                },

                input {
                    r#type: "file",
                    class: "db-hidden-input",
                    multiple: true,
                    disabled: !accepts_input,
                    onfocus: move |_| {
                        session.mutate(|s| s.set_focused(true));
                    },
                    onblur: move |_| {
                        session.mutate(|s| s.set_focused(false));
                    },
                    onchange: move |evt: FormEvent| {
                        accept_files(evt.files());
                    },
                }

                div { class: "db-dropzone-content",
                    div { class: "db-dropzone-icon", "⬆" }
                    div { class: "db-dropzone-title", "Drag & drop files here, or click to select" }
                }
            }

            if let Some(error) = view.error.clone() {
                div { class: "db-error", role: "alert", "{error}" }
            }

            if !view.rows.is_empty() {
                div { class: "db-file-list",
                    for row in view.rows.iter().cloned() {
                        FileRow {
                            key: "{row.key}",
                            row,
                            on_remove: move |key| {
                                if !session.mutate(|s| s.remove(key)) {
                                    debug!("Entry {} is no longer removable", key);
                                }
                            },
                        }
                    }
                }
            }
        }
    }
}

/// Convert host file handles into the core crate's metadata type.
pub(crate) fn to_blobs(files: Vec<FileData>) -> Vec<FileBlob> {
    files
        .into_iter()
        .map(|file| {
            let blob = FileBlob::new(file.name(), file.size());
            match file.content_type() {
                Some(mime) if !mime.is_empty() => blob.with_mime_type(mime),
                _ => blob,
            }
        })
        .collect()
}
