#![forbid(unsafe_code)]

//! Scroll spy: which section is in view, and how the header should look.

use tracing::debug;

/// Vertical extent of one `section[id]`, read from the rendered layout.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionLayout {
    pub id: String,
    /// Offset of the section's top edge from the document top, in CSS px.
    pub top: f64,
    /// Rendered height in CSS px.
    pub height: f64,
}

impl SectionLayout {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// Whether `offset` falls in `[top - lookback, top - lookback + height)`.
    #[must_use]
    pub fn contains(&self, offset: f64, lookback: f64) -> bool {
        let start = self.top - lookback;
        offset >= start && offset < start + self.height
    }
}

/// Section under `offset`. Overlaps resolve to the last match in document
/// order.
#[must_use]
pub fn section_at(sections: &[SectionLayout], offset: f64, lookback: f64) -> Option<&SectionLayout> {
    sections
        .iter()
        .rev()
        .find(|section| section.contains(offset, lookback))
}

/// Tracks the active section id.
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    active: String,
    lookback: f64,
}

impl ScrollSpy {
    pub fn new(initial: impl Into<String>, lookback: f64) -> Self {
        Self {
            active: initial.into(),
            lookback,
        }
    }

    #[must_use]
    pub fn active(&self) -> &str {
        &self.active
    }

    /// Re-evaluate against fresh layout. Returns the new id when the active
    /// section changed.
    pub fn observe(&mut self, sections: &[SectionLayout], offset: f64) -> Option<&str> {
        let hit = section_at(sections, offset, self.lookback)?;
        if hit.id == self.active {
            return None;
        }
        debug!(from = %self.active, to = %hit.id, offset, "active section changed");
        self.active.clone_from(&hit.id);
        Some(&self.active)
    }

    /// Force the active section. Returns `true` if it changed.
    pub fn set_active(&mut self, id: &str) -> bool {
        if self.active == id {
            return false;
        }
        self.active = id.to_owned();
        true
    }
}

/// Header appearance as a function of scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarStyle {
    /// Near the top: more transparent, lighter blur.
    Translucent,
    /// Scrolled past the threshold: more opaque, heavier blur.
    Scrolled,
}

impl NavbarStyle {
    /// `Scrolled` iff `offset >= threshold`.
    #[must_use]
    pub fn for_offset(offset: f64, threshold: f64) -> Self {
        if offset >= threshold {
            Self::Scrolled
        } else {
            Self::Translucent
        }
    }

    #[must_use]
    pub const fn background(self) -> &'static str {
        match self {
            Self::Translucent => "rgba(255, 255, 255, 0.15)",
            Self::Scrolled => "rgba(255, 255, 255, 0.8)",
        }
    }

    #[must_use]
    pub const fn backdrop_filter(self) -> &'static str {
        match self {
            Self::Translucent => "blur(10px)",
            Self::Scrolled => "blur(20px)",
        }
    }

    #[must_use]
    pub const fn box_shadow(self) -> &'static str {
        match self {
            Self::Translucent => "0 8px 32px rgba(31, 38, 135, 0.37)",
            Self::Scrolled => "0 8px 32px rgba(31, 38, 135, 0.2)",
        }
    }
}

/// Scroll-to-top control visibility: shown iff `offset >= threshold`.
#[must_use]
pub fn scroll_top_visible(offset: f64, threshold: f64) -> bool {
    offset >= threshold
}

/// Neighbor of `current` in `order`. An unknown `current` steps forward to
/// the first entry and has no predecessor.
#[must_use]
pub fn neighbor<'a>(order: &'a [String], current: &str, forward: bool) -> Option<&'a str> {
    let position = order.iter().position(|id| id == current);
    let target = match (position, forward) {
        (Some(idx), true) => idx.checked_add(1)?,
        (Some(idx), false) => idx.checked_sub(1)?,
        (None, true) => 0,
        (None, false) => return None,
    };
    order.get(target).map(String::as_str)
}
