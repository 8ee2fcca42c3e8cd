#![forbid(unsafe_code)]

//! Scroll-triggered reveals: staggered fade-ins, skill bar fills, and lazy
//! image loads.
//!
//! The host runs the intersection observers and forwards each callback batch
//! as a slice of [`IntersectionEntry`]. [`RevealTracker::plan`] turns a batch
//! into effects with delays; the page coordinator emits the zero-delay ones
//! and schedules the rest as timers.

use std::collections::HashSet;

use core::time::Duration;
use tracing::warn;

use crate::effect::{Effect, ElementId};

/// Observed element family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedKind {
    /// `.scroll-animate` element that gains `in-view`.
    Animate,
    /// `.skill-progress` bar with its `data-width` target.
    SkillBar { width: String },
    /// `img[data-src]`.
    LazyImage,
}

/// One entry of an intersection observer callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub element: ElementId,
    pub kind: ObservedKind,
    pub intersecting: bool,
}

impl IntersectionEntry {
    pub fn new(element: ElementId, kind: ObservedKind, intersecting: bool) -> Self {
        Self {
            element,
            kind,
            intersecting,
        }
    }
}

/// An effect to apply after `delay`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedEffect {
    pub delay: Duration,
    pub effect: Effect,
}

impl PlannedEffect {
    fn now(effect: Effect) -> Self {
        Self {
            delay: Duration::ZERO,
            effect,
        }
    }
}

/// Remembers which animate targets already have a reveal planned.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    stagger: Duration,
    skill_bar_delay: Duration,
    revealed: HashSet<ElementId>,
}

impl RevealTracker {
    #[must_use]
    pub fn new(stagger: Duration, skill_bar_delay: Duration) -> Self {
        Self {
            stagger,
            skill_bar_delay,
            revealed: HashSet::new(),
        }
    }

    #[must_use]
    pub fn is_revealed(&self, element: ElementId) -> bool {
        self.revealed.contains(&element)
    }

    /// Plan effects for one callback batch.
    ///
    /// The stagger index is the entry's position in the batch, counting
    /// entries that are not intersecting, matching how observers deliver
    /// batches in document order.
    pub fn plan(&mut self, entries: &[IntersectionEntry]) -> Vec<PlannedEffect> {
        let mut planned = Vec::new();
        for (index, entry) in entries.iter().enumerate() {
            if !entry.intersecting {
                continue;
            }
            match &entry.kind {
                ObservedKind::Animate => {
                    if !self.revealed.insert(entry.element) {
                        continue;
                    }
                    let steps = u32::try_from(index).unwrap_or(u32::MAX);
                    planned.push(PlannedEffect {
                        delay: self.stagger.saturating_mul(steps),
                        effect: Effect::Reveal {
                            element: entry.element,
                        },
                    });
                }
                ObservedKind::SkillBar { width } => {
                    planned.push(PlannedEffect::now(Effect::Unobserve {
                        element: entry.element,
                    }));
                    let width = width.trim();
                    if width.is_empty() {
                        warn!(element = entry.element.0, "skill bar has no target width");
                        continue;
                    }
                    planned.push(PlannedEffect {
                        delay: self.skill_bar_delay,
                        effect: Effect::FillSkillBar {
                            element: entry.element,
                            width: width.to_owned(),
                        },
                    });
                }
                ObservedKind::LazyImage => {
                    planned.push(PlannedEffect::now(Effect::LoadImage {
                        element: entry.element,
                    }));
                    planned.push(PlannedEffect::now(Effect::Unobserve {
                        element: entry.element,
                    }));
                }
            }
        }
        planned
    }
}
