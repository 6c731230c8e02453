//! Sync bridge: apply one selector change to the slot board.
//!
//! The board row with the given [`SlotId`] is the source of truth for its
//! status. [`crate::state::app::AppState`] publishes the result to that
//! row's status signal; nothing is re-rendered.

use schedule::{Period, ScheduleError, SlotBoard, SlotId, StatusCode};

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Updated { previous: StatusCode, current: StatusCode },
    /// The row is gone, typically because the period was re-rendered while
    /// the change event was queued.
    MissingRow,
}

/// Set the status of row `id` in `period` from a raw selector value.
///
/// A missing row is a no-op. An unknown `code` means the selector offered a
/// value outside the vocabulary, which is a programming error: it is
/// reported, and the row is left as it was.
///
/// # Errors
///
/// Returns [`ScheduleError::UnknownStatus`] when `code` is not in the
/// vocabulary and the row exists.
pub fn update_slot_preview(
    board: &mut SlotBoard,
    period: Period,
    id: SlotId,
    code: &str,
) -> Result<SyncOutcome, ScheduleError> {
    if board.row(period, id).is_none() {
        return Ok(SyncOutcome::MissingRow);
    }
    let current = StatusCode::from_code(code)?;
    Ok(match board.set_status(period, id, current) {
        Some(previous) => SyncOutcome::Updated { previous, current },
        None => SyncOutcome::MissingRow,
    })
}
