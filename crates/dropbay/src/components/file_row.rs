use dioxus::prelude::*;
use dropbay_core::entry::EntryKey;
use dropbay_core::view::{EntryRow, Indicator};

/// Individual file row with name, size and progress indicator
#[component]
pub fn FileRow(row: EntryRow, on_remove: EventHandler<EntryKey>) -> Element {
    let key = row.key;
    let removable = row.removable;
    let remove_label = format!("Remove {}", row.name);

    // Pending rows get a remove button; the rest show transfer status
    let status = match row.indicator {
        Indicator::Remove => rsx! {
            button {
                class: "db-icon-button",
                r#type: "button",
                "aria-label": "{remove_label}",
                disabled: !removable,
                onclick: move |_| on_remove.call(key),
                "🗑"
            }
        },
        Indicator::Percent(pct) => rsx! {
            span { class: "db-spinner" }
            span { class: "db-file-percent", "{pct}%" }
        },
        Indicator::Complete => rsx! {
            span { class: "db-file-done", "aria-label": "Uploaded", "✔" }
        },
        Indicator::Warning => rsx! {
            span { class: "db-file-warning", "aria-label": "Upload failed", "⚠" }
        },
    };

    rsx! {
        div { class: "db-file-row",
            div { class: "db-file-main",
                div { class: "db-file-icon", "📄" }
                div { class: "db-file-text",
                    div { class: "db-file-name", title: "{row.name}", "{row.name}" }
                    div { class: "db-file-size", "{row.size_label}" }
                }
                div { class: "db-file-grow" }
                div { class: "db-file-status", {status} }
            }

            if let Some(pct) = row.bar_percent {
                div { class: "db-progress",
                    div { class: "db-progress-bar", style: "width: {pct}%" }
                }
            }

            if let Some(url) = row.url.clone() {
                a {
                    class: "db-file-link",
                    href: "{url}",
                    target: "_blank",
                    "Open"
                }
            }
        }
    }
}
