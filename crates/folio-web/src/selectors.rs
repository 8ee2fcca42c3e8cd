#![forbid(unsafe_code)]

//! DOM contract: ids, classes, selectors and injected CSS.
//!
//! Kept free of `web-sys` so the strings can be checked by native tests.

use folio_core::{ElementId, MenuState};

pub const NAVBAR_ID: &str = "navbar";
pub const NAV_LINKS: &str = ".nav-link";
pub const NAV_SECTION_ATTR: &str = "data-section";
pub const MENU_BUTTON_ID: &str = "mobile-menu";
pub const NAV_MENU_ID: &str = "nav-menu";
pub const SECTIONS: &str = "section[id]";
/// In-page anchors. Nav links have their own handler.
pub const IN_PAGE_ANCHORS: &str = "a[href^=\"#\"]:not(.nav-link)";

pub const ACTIVE_CLASS: &str = "active";
pub const SCROLL_ANIMATE_CLASS: &str = "scroll-animate";
pub const IN_VIEW_CLASS: &str = "in-view";

/// Blocks tagged with [`SCROLL_ANIMATE_CLASS`] at startup.
pub const REVEAL_TARGETS: [&str; 5] = [
    ".hero-content",
    ".about-content",
    ".skill-card",
    ".project-card",
    ".contact-content",
];
pub const ANIMATED: &str = ".scroll-animate";
pub const SKILL_BARS: &str = ".skill-progress";
pub const SKILL_WIDTH_ATTR: &str = "data-width";
pub const LAZY_IMAGES: &str = "img[data-src]";
pub const LAZY_SRC_ATTR: &str = "data-src";
pub const LAZY_CLASS: &str = "lazy";

/// Attribute carrying the adapter-assigned [`ElementId`] of an observed
/// element.
pub const ELEMENT_ID_ATTR: &str = "data-folio-id";

pub const CONTACT_FORM_ID: &str = "contactForm";
pub const FORM_CONTROLS: &str = "input, textarea";
pub const FORM_GROUP: &str = ".form-group";
pub const FIELD_ERROR_CLASS: &str = "field-error";
pub const FIELD_ERROR: &str = ".field-error";
pub const SUBMIT_BUTTON: &str = ".contact-form button[type=\"submit\"]";
pub const ERROR_COLOR: &str = "#ef4444";
pub const FIELD_ERROR_CSS: &str = "color: #ef4444; font-size: 0.8rem; margin-top: 0.25rem;";

pub const SEND_ICON_CLASS: &str = "fas fa-paper-plane";
pub const SPINNER_ICON_CLASS: &str = "fas fa-spinner fa-spin";

pub const SCROLL_TOP_CLASS: &str = "scroll-top-btn";
pub const SCROLL_TOP_ICON_HTML: &str = "<i class=\"fas fa-arrow-up\"></i>";
pub const SCROLL_TOP_CSS: &str = "position: fixed; bottom: 30px; right: 30px; \
    width: 50px; height: 50px; border-radius: 50%; \
    background: linear-gradient(135deg, var(--primary), var(--primary-dark)); \
    border: none; color: white; font-size: 1.2rem; cursor: pointer; \
    transition: all 0.3s ease; z-index: 1000; opacity: 0; visibility: hidden; \
    box-shadow: var(--shadow-lg);";
/// `(transform, box-shadow)` while hovered and at rest.
pub const SCROLL_TOP_HOVER: (&str, &str) = (
    "translateY(-3px) scale(1.05)",
    "var(--shadow-glow), var(--shadow-xl)",
);
pub const SCROLL_TOP_REST: (&str, &str) = ("translateY(0) scale(1)", "var(--shadow-lg)");

pub const TOAST_CLASS: &str = "form-success";
pub const TOAST_CSS: &str = "position: fixed; top: 20px; right: 20px; \
    background: linear-gradient(135deg, #43e97b, #38f9d7); color: white; \
    padding: 1rem 1.5rem; border-radius: 12px; \
    box-shadow: 0 8px 24px rgba(0, 0, 0, 0.12); z-index: 9999; \
    animation: slideIn 0.3s ease-out;";
pub const TOAST_ROW_CSS: &str = "display: flex; align-items: center; gap: 0.5rem;";
pub const TOAST_ICON_CLASS: &str = "fas fa-check-circle";
pub const TOAST_EXIT_ANIMATION: &str = "slideOut 0.3s ease-out forwards";

/// Keyframes and hover rule appended to `<head>` once at startup.
pub const PAGE_CSS: &str = "\
@keyframes slideIn {
    from { transform: translateX(100%); opacity: 0; }
    to { transform: translateX(0); opacity: 1; }
}
@keyframes slideOut {
    from { transform: translateX(0); opacity: 1; }
    to { transform: translateX(100%); opacity: 0; }
}
.scroll-top-btn:hover {
    animation: bounce 0.6s infinite alternate;
}
@keyframes bounce {
    from { transform: translateY(-3px) scale(1.05); }
    to { transform: translateY(-8px) scale(1.08); }
}
";

pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// Render `id` for [`ELEMENT_ID_ATTR`].
#[must_use]
pub fn element_id_attr(id: ElementId) -> String {
    id.0.to_string()
}

/// Parse an [`ELEMENT_ID_ATTR`] value.
#[must_use]
pub fn parse_element_id(value: &str) -> Option<ElementId> {
    value.trim().parse().ok().map(ElementId)
}

/// `<body>` overflow for a menu state.
#[must_use]
pub const fn body_overflow(state: MenuState) -> &'static str {
    if state.body_scroll_locked() {
        "hidden"
    } else {
        ""
    }
}

/// `(opacity, visibility)` of the scroll-to-top button.
#[must_use]
pub const fn scroll_top_style(visible: bool) -> (&'static str, &'static str) {
    if visible {
        ("1", "visible")
    } else {
        ("0", "hidden")
    }
}

/// `(icon class, opacity)` of the submit button.
#[must_use]
pub const fn submit_button_style(loading: bool) -> (&'static str, &'static str) {
    if loading {
        (SPINNER_ICON_CLASS, "0.7")
    } else {
        (SEND_ICON_CLASS, "1")
    }
}
