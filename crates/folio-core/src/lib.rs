#![forbid(unsafe_code)]

//! `folio-core` holds the behavior of a single-page portfolio site without
//! touching the DOM.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (a `wasm-bindgen` adapter
//!   in the browser, or a test) pushes [`PageEvent`]s and answers layout
//!   queries through [`PageHost`].
//! - **Deterministic time**: the host advances a monotonic clock explicitly;
//!   every delayed action is a cancellable timer in a [`TimerQueue`].
//! - **Commands out**: state changes are reported as [`Effect`]s that the host
//!   drains with [`PortfolioPage::take_effects`] and applies to the page.

pub mod clock;
pub mod config;
pub mod effect;
pub mod event;
pub mod form;
pub mod host;
pub mod keyboard;
pub mod menu;
pub mod page;
pub mod reveal;
pub mod section;
pub mod theme;
pub mod throttle;
pub mod timer;

pub use clock::DeterministicClock;
pub use config::{ConfigError, FolioConfig};
pub use effect::{Effect, ElementId, ToastId};
pub use event::{Dispatch, PageEvent};
pub use form::{ContactSubmission, Field, FieldProblem, FormPhase, Validation, classify_field};
pub use host::{LayoutSnapshot, PageHost};
pub use keyboard::{KeyAction, KeyInput};
pub use menu::{MenuState, MenuTrigger, MobileMenu};
pub use page::PortfolioPage;
pub use reveal::{IntersectionEntry, ObservedKind};
pub use section::{NavbarStyle, ScrollSpy, SectionLayout};
pub use theme::Theme;
pub use throttle::{Throttle, ThrottleDecision};
pub use timer::{TimerId, TimerQueue};
