#![forbid(unsafe_code)]

//! Browser events, reduced to what the page coordinator needs.

use crate::form::{ContactSubmission, Field};
use crate::keyboard::KeyInput;
use crate::reveal::IntersectionEntry;

/// One host event.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Window scrolled; the offset is read through the host.
    Scroll,
    /// Click on a `.nav-link` whose `data-section` names `section`.
    NavLinkClick { section: String },
    /// Click on an `a[href^="#"]` that is not a nav link.
    AnchorClick { href: String },
    MenuButtonClick,
    /// Click outside both the menu button and the menu panel.
    OutsideClick,
    /// Window resized; the width is read through the host.
    Resize,
    Key(KeyInput),
    FieldBlur { field: Field, value: String },
    FieldInput { field: Field },
    Submit(ContactSubmission),
    ScrollTopClick,
    Intersections(Vec<IntersectionEntry>),
    ColorScheme { prefers_dark: bool },
}

/// What the host must do with the DOM event that produced a [`PageEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dispatch {
    pub prevent_default: bool,
}

impl Dispatch {
    pub(crate) const PASS: Self = Self {
        prevent_default: false,
    };
    pub(crate) const PREVENT: Self = Self {
        prevent_default: true,
    };
}
