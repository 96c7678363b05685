//! Dropbay - drag-and-drop uploads for web and desktop.
//!
//! The Dioxus front-end for [`dropbay_core`]. It renders two widgets, a
//! multi-file dropzone and a single-image dropzone, and wires them to a
//! simulated storage service.
//!
//! # Platform Support
//!
//! - **Web (WASM)**: timers via `gloo-timers`
//! - **Desktop**: timers via `tokio`

// Enforce memory safety: forbid all unsafe code
#![forbid(unsafe_code)]

pub mod components;
pub mod uploader;
pub mod utils;
