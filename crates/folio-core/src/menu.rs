#![forbid(unsafe_code)]

//! Two-state mobile navigation menu.

use tracing::debug;

/// Visual and logical menu state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// Body scrolling is locked while the overlay is open.
    #[must_use]
    pub const fn body_scroll_locked(self) -> bool {
        self.is_open()
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }
}

/// Something that may change the menu state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuTrigger {
    /// The hamburger button.
    Button,
    /// A click outside both the button and the menu panel.
    OutsideClick,
    /// Escape key.
    Escape,
    /// In-page navigation (nav link, anchor, keyboard).
    Navigate,
    /// Viewport resized to `width` CSS px.
    Resize { width: f64 },
}

/// Menu state machine. Only the button opens the menu; every other trigger
/// can only close it.
#[derive(Debug, Clone)]
pub struct MobileMenu {
    state: MenuState,
    breakpoint: f64,
}

impl MobileMenu {
    #[must_use]
    pub const fn new(breakpoint: f64) -> Self {
        Self {
            state: MenuState::Closed,
            breakpoint,
        }
    }

    #[must_use]
    pub const fn state(&self) -> MenuState {
        self.state
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Apply a trigger. Returns the new state if a transition happened.
    pub fn apply(&mut self, trigger: MenuTrigger) -> Option<MenuState> {
        let next = match trigger {
            MenuTrigger::Button => self.state.toggled(),
            MenuTrigger::Resize { width } if width <= self.breakpoint => return None,
            MenuTrigger::OutsideClick
            | MenuTrigger::Escape
            | MenuTrigger::Navigate
            | MenuTrigger::Resize { .. } => MenuState::Closed,
        };
        if next == self.state {
            return None;
        }
        debug!(?trigger, from = ?self.state, to = ?next, "menu transition");
        self.state = next;
        Some(next)
    }
}
