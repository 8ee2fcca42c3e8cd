#![forbid(unsafe_code)]

//! Light/dark theme selection.

/// Page color theme, following `prefers-color-scheme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Class toggled on `<body>` while the dark theme is active.
    pub const BODY_CLASS: &'static str = "dark-mode";

    #[must_use]
    pub const fn from_preference(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}
