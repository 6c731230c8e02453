//! Domain model for the reservation story builder.
//!
//! This crate has no browser dependency. It owns the fixed slot lists, the
//! availability vocabulary, the weekend truncation rule, and the slot board
//! that both the control panel and the preview are rendered from. The
//! `reservation-story` client crate wraps these types in reactive signals.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`slot`] | Time slots, periods, and the fixed slot lists |
//! | [`status`] | Availability codes with glyphs and style tags |
//! | [`calendar`] | Date parsing, weekend rule, and date labels |
//! | [`board`] | Rendered rows with stable ids and their assignments |
//! | [`preview`] | Read-only snapshot of the story composition |
//! | [`theme`] | Preview themes and their palettes |
//! | [`error`] | Domain error type |

pub mod board;
pub mod calendar;
pub mod error;
pub mod preview;
pub mod slot;
pub mod status;
pub mod theme;

pub use board::{SlotBoard, SlotId, SlotRow};
pub use error::ScheduleError;
pub use slot::{Period, TimeSlot};
pub use status::StatusCode;
pub use theme::Theme;
