#![forbid(unsafe_code)]

//! Keyboard shortcuts: Escape closes the menu, Alt+Up/Down walks sections.

/// Minimal keydown snapshot. `key` is the DOM `KeyboardEvent.key` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub alt: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            alt: false,
        }
    }

    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }
}

/// What a keydown asks the page to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    CloseMenu,
    NextSection,
    PreviousSection,
    None,
}

impl KeyAction {
    #[must_use]
    pub fn from_input(input: &KeyInput) -> Self {
        match (input.key.as_str(), input.alt) {
            ("Escape", _) => Self::CloseMenu,
            ("ArrowDown", true) => Self::NextSection,
            ("ArrowUp", true) => Self::PreviousSection,
            _ => Self::None,
        }
    }
}
