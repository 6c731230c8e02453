//! Slot board: the rendered rows of both periods and their assignments.
//!
//! DESIGN
//! ======
//! Every render of a period mints a fresh [`SlotId`] per row. The control
//! selector and the preview row derive their element ids from that same id,
//! so a status change is addressed by identity rather than by list position.
//! Re-rendering a period drops its old ids; a late event carrying one of
//! them simply finds no row.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::slot::{Period, TimeSlot};
use crate::status::StatusCode;

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

/// Identity of one rendered row, shared by its control and preview elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(Uuid);

impl SlotId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SlotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One rendered slot and the status the operator assigned to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRow {
    pub id: SlotId,
    pub period: Period,
    pub time: TimeSlot,
    pub status: StatusCode,
}

impl SlotRow {
    /// Element id of the row's status selector.
    #[must_use]
    pub fn control_dom_id(&self) -> String {
        format!("{}-select-{}", self.period.tag(), self.id)
    }

    /// Element id of the row's preview line.
    #[must_use]
    pub fn preview_dom_id(&self) -> String {
        format!("{}-preview-{}", self.period.tag(), self.id)
    }
}

/// Rows of both periods, in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotBoard {
    morning: Vec<SlotRow>,
    afternoon: Vec<SlotRow>,
    /// Row id to position within its period.
    index: HashMap<SlotId, usize>,
}

impl SlotBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A board with both periods rendered for `date`.
    #[must_use]
    pub fn for_date(date: NaiveDate) -> Self {
        let mut board = Self::new();
        board.render_date(date);
        board
    }

    /// Re-render both periods for `date`, resetting every assignment.
    pub fn render_date(&mut self, date: NaiveDate) {
        for period in Period::ALL {
            self.render_period(period, &period.slots_for(date));
        }
    }

    /// Replace the rows of `period` with fresh rows for `slots`.
    ///
    /// Prior assignments of the period are discarded; every new row starts
    /// at [`StatusCode::Open`].
    pub fn render_period(&mut self, period: Period, slots: &[TimeSlot]) -> &[SlotRow] {
        let rows = slots
            .iter()
            .map(|&time| SlotRow { id: SlotId::new(), period, time, status: StatusCode::default() })
            .collect::<Vec<_>>();

        for (position, row) in rows.iter().enumerate() {
            self.index.insert(row.id, position);
        }
        let replaced = std::mem::replace(self.rows_mut(period), rows);
        for row in &replaced {
            self.index.remove(&row.id);
        }

        self.rows(period)
    }

    #[must_use]
    pub fn rows(&self, period: Period) -> &[SlotRow] {
        match period {
            Period::Morning => &self.morning,
            Period::Afternoon => &self.afternoon,
        }
    }

    /// Look up a live row by id within `period`.
    #[must_use]
    pub fn row(&self, period: Period, id: SlotId) -> Option<&SlotRow> {
        let position = *self.index.get(&id)?;
        self.rows(period).get(position).filter(|row| row.id == id)
    }

    /// Assign `status` to the row `id` of `period`.
    ///
    /// Returns the previous status, or `None` when no such row is live.
    pub fn set_status(&mut self, period: Period, id: SlotId, status: StatusCode) -> Option<StatusCode> {
        let position = *self.index.get(&id)?;
        let row = self.rows_mut(period).get_mut(position).filter(|row| row.id == id)?;
        Some(std::mem::replace(&mut row.status, status))
    }

    fn rows_mut(&mut self, period: Period) -> &mut Vec<SlotRow> {
        match period {
            Period::Morning => &mut self.morning,
            Period::Afternoon => &mut self.afternoon,
        }
    }
}
