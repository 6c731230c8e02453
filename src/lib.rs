//! # reservation-story
//!
//! Leptos + WASM form for building a daily reservation-availability story
//! and exporting it as a PNG for social-media posting.
//!
//! The operator edits per-slot availability in the control panel; every edit
//! is mirrored into the styled preview, which the export pipeline rasterizes
//! at 1080×1920. The slot model itself lives in the `schedule` crate; this
//! crate holds the reactive state, the components, and the browser glue.
//!
//! Browser-only code is gated behind the `csr` feature. Without it every
//! browser helper is a no-op, so the crate builds and tests on the host.

pub mod app;
pub mod components;
pub mod config;
pub mod export;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger unavailable: {e}");
    }
    leptos::mount::mount_to_body(app::App);
}
