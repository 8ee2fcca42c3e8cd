#![forbid(unsafe_code)]

//! Layout queries the page coordinator makes against the host document.

use crate::section::SectionLayout;

/// Read-only view of the rendered page.
///
/// Values are read at call time; the coordinator never caches them between
/// events.
pub trait PageHost {
    /// Vertical scroll offset in CSS px.
    fn scroll_offset(&self) -> f64;

    /// Every `section[id]`, in document order.
    fn section_layouts(&self) -> Vec<SectionLayout>;

    /// Whether an element with this id exists.
    fn has_element(&self, id: &str) -> bool;

    /// Viewport width in CSS px.
    fn viewport_width(&self) -> f64;
}

/// Plain-data [`PageHost`] for tests and non-browser tooling.
#[derive(Debug, Clone, Default)]
pub struct LayoutSnapshot {
    pub scroll_offset: f64,
    pub viewport_width: f64,
    pub sections: Vec<SectionLayout>,
    /// Ids of elements that are not sections but can be scroll targets.
    pub extra_ids: Vec<String>,
}

impl LayoutSnapshot {
    /// Sections stacked back to back from offset 0.
    pub fn stacked<'a>(sections: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let mut top = 0.0;
        let sections = sections
            .into_iter()
            .map(|(id, height)| {
                let layout = SectionLayout::new(id, top, height);
                top += height;
                layout
            })
            .collect();
        Self {
            scroll_offset: 0.0,
            viewport_width: 1_280.0,
            sections,
            extra_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn scrolled_to(mut self, offset: f64) -> Self {
        self.scroll_offset = offset;
        self
    }

    #[must_use]
    pub fn with_viewport_width(mut self, width: f64) -> Self {
        self.viewport_width = width;
        self
    }

    /// Top edge of the section with this id.
    #[must_use]
    pub fn section_top(&self, id: &str) -> Option<f64> {
        self.sections
            .iter()
            .find(|section| section.id == id)
            .map(|section| section.top)
    }
}

impl PageHost for LayoutSnapshot {
    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn section_layouts(&self) -> Vec<SectionLayout> {
        self.sections.clone()
    }

    fn has_element(&self, id: &str) -> bool {
        self.sections.iter().any(|section| section.id == id)
            || self.extra_ids.iter().any(|extra| extra == id)
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }
}
