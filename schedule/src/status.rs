//! Availability vocabulary: the three codes an operator can assign to a slot.
//!
//! The code strings are what the `<select>` elements carry as option values,
//! so they are the only representation that crosses the DOM boundary. Every
//! other piece of the UI works with [`StatusCode`].

use crate::error::ScheduleError;

#[cfg(test)]
#[path = "status_test.rs"]
mod status_test;

/// Display data for one availability state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusOption {
    /// Value carried by the selector option.
    pub code: &'static str,
    /// Character rendered in the preview.
    pub glyph: &'static str,
    /// CSS class applied to the preview glyph.
    pub style_tag: &'static str,
}

/// The fixed vocabulary, in selector order. Indexed by `StatusCode as usize`.
pub static STATUS_OPTIONS: [StatusOption; 3] = [
    StatusOption { code: "o", glyph: "〇", style_tag: "status-o" },
    StatusOption { code: "x", glyph: "×", style_tag: "status-x" },
    StatusOption { code: "triangle", glyph: "△", style_tag: "status-triangle" },
];

/// Availability of a single slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusCode {
    #[default]
    Open = 0,
    Closed = 1,
    Maybe = 2,
}

impl StatusCode {
    pub const ALL: [StatusCode; 3] = [StatusCode::Open, StatusCode::Closed, StatusCode::Maybe];

    /// Resolve a selector value against the vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::UnknownStatus`] if `code` is not one of
    /// `o`, `x`, `triangle`.
    pub fn from_code(code: &str) -> Result<Self, ScheduleError> {
        Self::ALL
            .into_iter()
            .find(|status| status.code() == code)
            .ok_or_else(|| ScheduleError::UnknownStatus { code: code.to_owned() })
    }

    #[must_use]
    pub fn option(self) -> &'static StatusOption {
        &STATUS_OPTIONS[self as usize]
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        self.option().code
    }

    #[must_use]
    pub fn glyph(self) -> &'static str {
        self.option().glyph
    }

    #[must_use]
    pub fn style_tag(self) -> &'static str {
        self.option().style_tag
    }
}
