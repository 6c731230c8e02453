//! Export pipeline: rasterize the story preview into a downloadable PNG.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`pipeline`] owns the ordering, the busy guard, and the cleanup rules and
//! is written against the [`pipeline::CaptureHost`] trait so it runs on the
//! host in tests. [`web`] implements that trait against the DOM and the
//! html2canvas global; [`paint`] is the canvas fallback used when that global
//! is missing.

#[cfg(feature = "csr")]
pub mod paint;
pub mod pipeline;
#[cfg(feature = "csr")]
pub mod web;

/// Failures of a single export run. Each carries the browser's description
/// of what went wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("required element missing: {0}")]
    MissingElement(String),
    #[error("failed to clone preview: {0}")]
    Clone(String),
    #[error("failed to place capture node: {0}")]
    Layout(String),
    #[error("rasterization failed: {0}")]
    Rasterize(String),
    #[error("PNG encoding failed: {0}")]
    Encode(String),
    #[error("download failed: {0}")]
    Download(String),
}
