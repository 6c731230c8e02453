//! UI components for the editor page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The control panel writes through [`crate::state::app::AppState`]; the
//! story preview only reads it. Slot rows on both sides are keyed by
//! [`schedule::SlotId`], so a status edit touches a single preview row.

pub mod control_panel;
pub mod export_button;
pub mod preview_slots;
pub mod slot_controls;
pub mod story_preview;
