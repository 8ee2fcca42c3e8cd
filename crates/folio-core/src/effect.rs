#![forbid(unsafe_code)]

//! DOM commands issued by the page coordinator.

use crate::form::Field;
use crate::menu::MenuState;
use crate::section::NavbarStyle;
use crate::theme::Theme;

/// Host-assigned handle for an observed element (reveal target, skill bar,
/// lazy image).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

/// Handle for one success notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(pub u64);

/// One change the host must make to the page.
///
/// Effects are emitted in the order they must be applied and always carry
/// the full target state, so applying the same effect twice is harmless.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Mark the nav link whose `data-section` equals `section` as active and
    /// clear every other link.
    HighlightNav { section: String },
    SetNavbarStyle(NavbarStyle),
    /// Smooth-scroll the element with this id to the top of the viewport.
    ScrollIntoView { id: String },
    /// Smooth-scroll the document to offset 0.
    ScrollToTop,
    SetScrollTopVisible(bool),
    /// Menu button and panel classes plus the body scroll lock.
    SetMenu(MenuState),
    /// Replace any error annotation on `field` with `message`.
    ShowFieldError { field: Field, message: String },
    ClearFieldError { field: Field },
    /// Disable the submit button and show the sending label, or restore it.
    SetSubmitLoading(bool),
    ShowToast { toast: ToastId, message: String },
    /// Start the toast's exit animation.
    DismissToast { toast: ToastId },
    RemoveToast { toast: ToastId },
    ResetForm,
    /// Add the `in-view` class.
    Reveal { element: ElementId },
    /// Animate a skill bar to its target width.
    FillSkillBar { element: ElementId, width: String },
    /// Swap `data-src` into `src`.
    LoadImage { element: ElementId },
    Unobserve { element: ElementId },
    SetTheme(Theme),
}
