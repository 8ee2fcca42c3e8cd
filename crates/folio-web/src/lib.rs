#![forbid(unsafe_code)]

//! Browser adapter for [`folio_core`].
//!
//! The adapter owns the DOM: it registers listeners, turns browser events
//! into [`folio_core::PageEvent`]s, answers layout queries, applies the
//! resulting [`folio_core::Effect`]s and arms a single `setTimeout` for the
//! core's next timer deadline.
//!
//! JavaScript entry points (wasm32 only):
//!
//! | export             | effect                                         |
//! |--------------------|------------------------------------------------|
//! | `start()`          | wire the page with the default configuration   |
//! | `startWithConfig`  | same, with a JSON [`folio_core::FolioConfig`]  |
//! | `scrollToSection`  | smooth-scroll to an element id                 |
//! | `toggleMobileMenu` | open or close the mobile menu                  |

pub mod selectors;

#[cfg(target_arch = "wasm32")]
mod console_log;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{scroll_to_section, start, start_with_config, toggle_mobile_menu};
