//! Preview themes.
//!
//! The preview root carries `data-theme=<slug>` and the stylesheet does the
//! rest. The palette exists for the canvas fallback painter, which cannot
//! read CSS.

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Natural,
    Pop,
    Night,
}

/// Colors as CSS color strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub card: &'static str,
    pub text: &'static str,
    pub accent: &'static str,
    pub open: &'static str,
    pub closed: &'static str,
    pub maybe: &'static str,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Natural, Theme::Pop, Theme::Night];

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Natural => "natural",
            Self::Pop => "pop",
            Self::Night => "night",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Natural => "Natural",
            Self::Pop => "Pop",
            Self::Night => "Night",
        }
    }

    /// Resolve a `<select>` value.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::UnknownTheme`] for any value that is not a
    /// theme slug.
    pub fn from_slug(slug: &str) -> Result<Self, ScheduleError> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.slug() == slug)
            .ok_or_else(|| ScheduleError::UnknownTheme { slug: slug.to_owned() })
    }

    #[must_use]
    pub const fn palette(self) -> Palette {
        match self {
            Self::Natural => Palette {
                background: "#f4efe6",
                card: "#fffaf2",
                text: "#4a3f35",
                accent: "#a67c52",
                open: "#5a8f5a",
                closed: "#b55050",
                maybe: "#c9962c",
            },
            Self::Pop => Palette {
                background: "#ffe3ec",
                card: "#ffffff",
                text: "#33243b",
                accent: "#ff5c8a",
                open: "#1fa67a",
                closed: "#e23b3b",
                maybe: "#f2a900",
            },
            Self::Night => Palette {
                background: "#15171f",
                card: "#232634",
                text: "#eceff4",
                accent: "#88c0d0",
                open: "#a3be8c",
                closed: "#bf616a",
                maybe: "#ebcb8b",
            },
        }
    }
}
