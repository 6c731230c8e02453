//! Read-only snapshot of the story composition.
//!
//! The live preview is rendered reactively from the board and form signals;
//! [`PreviewDocument`] is the same content frozen at one instant, used where
//! a plain value is easier to work with (the canvas fallback painter).

use chrono::NaiveDate;

use crate::board::{SlotBoard, SlotRow};
use crate::calendar;
use crate::slot::Period;
use crate::status::StatusCode;
use crate::theme::Theme;

#[cfg(test)]
#[path = "preview_test.rs"]
mod preview_test;

/// One line of the preview list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRow {
    pub dom_id: String,
    pub time: String,
    pub status: StatusCode,
    pub glyph: &'static str,
    pub style_tag: &'static str,
}

impl From<&SlotRow> for PreviewRow {
    fn from(row: &SlotRow) -> Self {
        Self {
            dom_id: row.preview_dom_id(),
            time: row.time.to_string(),
            status: row.status,
            glyph: row.status.glyph(),
            style_tag: row.status.style_tag(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSection {
    pub period: Period,
    pub rows: Vec<PreviewRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewDocument {
    pub theme: Theme,
    pub date_label: String,
    pub sections: Vec<PreviewSection>,
    pub comment: String,
    pub brand: String,
}

impl PreviewDocument {
    /// Freeze the current composition.
    #[must_use]
    pub fn compose(
        theme: Theme,
        date: NaiveDate,
        board: &SlotBoard,
        comment: &str,
        store_name: &str,
        placeholder: &str,
    ) -> Self {
        let sections = Period::ALL
            .into_iter()
            .map(|period| PreviewSection {
                period,
                rows: board.rows(period).iter().map(PreviewRow::from).collect(),
            })
            .collect();

        Self {
            theme,
            date_label: calendar::preview_date_label(date),
            sections,
            comment: comment.to_owned(),
            brand: brand_label(store_name, placeholder).to_owned(),
        }
    }
}

/// Text of the brand tag: the store name, or `placeholder` when empty.
#[must_use]
pub fn brand_label<'a>(store_name: &'a str, placeholder: &'a str) -> &'a str {
    if store_name.is_empty() { placeholder } else { store_name }
}
