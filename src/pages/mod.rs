//! Top-level page components.

pub mod editor;
