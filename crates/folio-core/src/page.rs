#![forbid(unsafe_code)]

//! Platform-independent page coordinator.
//!
//! [`PortfolioPage`] owns every piece of mutable page state (active section,
//! menu state, scroll guard, form phase) and is the only thing the browser
//! adapter talks to. No JS/WASM types here.
//!
//! # Driving the page
//!
//! ```
//! use folio_core::{Effect, FolioConfig, LayoutSnapshot, PageEvent, PortfolioPage};
//!
//! let host = LayoutSnapshot::stacked([("home", 800.0), ("about", 600.0)]);
//! let mut page = PortfolioPage::new(FolioConfig::default());
//! page.init(&host);
//!
//! let dispatch = page.handle(PageEvent::NavLinkClick { section: "about".into() }, &host);
//! assert!(dispatch.prevent_default);
//! assert!(page.take_effects().contains(&Effect::ScrollIntoView { id: "about".into() }));
//!
//! // The scroll spy stays paused until the smooth scroll settles.
//! assert!(page.is_scrolling());
//! page.advance_time_ms(1_000.0, &host);
//! assert!(!page.is_scrolling());
//! ```

use core::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::clock::DeterministicClock;
use crate::config::{FolioConfig, MessageContext};
use crate::effect::{Effect, ToastId};
use crate::event::{Dispatch, PageEvent};
use crate::form::{ContactSubmission, Field, FieldRules, FormPhase, Validation, classify_field};
use crate::host::PageHost;
use crate::keyboard::{KeyAction, KeyInput};
use crate::menu::{MenuState, MenuTrigger, MobileMenu};
use crate::reveal::{IntersectionEntry, RevealTracker};
use crate::section::{NavbarStyle, ScrollSpy, neighbor, scroll_top_visible};
use crate::theme::Theme;
use crate::throttle::{Throttle, ThrottleDecision};
use crate::timer::{TimerId, TimerQueue};

#[derive(Debug, Clone)]
enum TimerKind {
    ScrollGuardRelease,
    ScrollTrailing,
    SubmissionComplete,
    ToastDismiss(ToastId),
    ToastRemove(ToastId),
    /// Emit a prepared effect (staggered reveals, skill bar fills).
    Emit(Effect),
}

/// Single page-wide coordinator, constructed once at startup.
#[derive(Debug)]
pub struct PortfolioPage {
    config: FolioConfig,
    field_rules: FieldRules,
    clock: DeterministicClock,
    timers: TimerQueue<TimerKind>,
    scroll_throttle: Throttle,
    /// Pending trailing scroll evaluation.
    trailing_scroll: Option<TimerId>,
    /// Set while a programmatic smooth scroll is assumed to be running.
    scroll_guard: Option<TimerId>,
    spy: ScrollSpy,
    menu: MobileMenu,
    form_phase: FormPhase,
    reveal: RevealTracker,
    /// Last applied header style, `None` before the first evaluation.
    navbar: Option<NavbarStyle>,
    scroll_top_visible: Option<bool>,
    theme: Option<Theme>,
    next_toast: u64,
    effects: Vec<Effect>,
}

impl Default for PortfolioPage {
    fn default() -> Self {
        Self::new(FolioConfig::default())
    }
}

impl PortfolioPage {
    pub fn new(config: FolioConfig) -> Self {
        let spy = ScrollSpy::new(
            config.navigation.initial_section.clone(),
            config.scroll.section_lookback_px,
        );
        Self {
            field_rules: config.field_rules(),
            clock: DeterministicClock::new(),
            timers: TimerQueue::new(),
            scroll_throttle: Throttle::new(config.scroll.throttle()),
            trailing_scroll: None,
            scroll_guard: None,
            spy,
            menu: MobileMenu::new(config.menu.breakpoint_px),
            form_phase: FormPhase::Idle,
            reveal: RevealTracker::new(config.reveal.stagger(), config.reveal.skill_bar_delay()),
            navbar: None,
            scroll_top_visible: None,
            theme: None,
            next_toast: 1,
            effects: Vec::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    #[must_use]
    pub fn active_section(&self) -> &str {
        self.spy.active()
    }

    #[must_use]
    pub fn menu_state(&self) -> MenuState {
        self.menu.state()
    }

    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.menu.is_open()
    }

    /// Whether the scroll spy is paused for a programmatic smooth scroll.
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.scroll_guard.is_some()
    }

    #[must_use]
    pub fn form_phase(&self) -> FormPhase {
        self.form_phase
    }

    /// Current deterministic time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// When the host should next call [`set_time`](Self::set_time) or
    /// [`advance_time`](Self::advance_time).
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Drain queued effects in application order.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Sync header style and scroll-to-top visibility with the current
    /// offset. Call once after the document is ready.
    pub fn init(&mut self, host: &impl PageHost) {
        let offset = host.scroll_offset();
        self.apply_navbar(offset);
        self.apply_scroll_top(offset);
        info!(
            sections = host.section_layouts().len(),
            active = self.spy.active(),
            "portfolio page initialized"
        );
    }

    /// Process one host event.
    pub fn handle(&mut self, event: PageEvent, host: &impl PageHost) -> Dispatch {
        trace!(?event, now_ms = self.clock.now().as_millis() as u64, "page event");
        let dispatch = match event {
            PageEvent::Scroll => {
                self.on_scroll(host);
                Dispatch::PASS
            }
            PageEvent::NavLinkClick { section } => {
                self.navigate(&section, host);
                Dispatch::PREVENT
            }
            PageEvent::AnchorClick { href } => self.on_anchor_click(&href, host),
            PageEvent::MenuButtonClick => {
                self.apply_menu(MenuTrigger::Button);
                Dispatch::PASS
            }
            PageEvent::OutsideClick => {
                self.apply_menu(MenuTrigger::OutsideClick);
                Dispatch::PASS
            }
            PageEvent::Resize => {
                self.apply_menu(MenuTrigger::Resize {
                    width: host.viewport_width(),
                });
                Dispatch::PASS
            }
            PageEvent::Key(input) => self.on_key(&input, host),
            PageEvent::FieldBlur { field, value } => {
                self.on_field_blur(field, &value);
                Dispatch::PASS
            }
            PageEvent::FieldInput { field } => {
                self.effects.push(Effect::ClearFieldError { field });
                Dispatch::PASS
            }
            PageEvent::Submit(submission) => {
                self.on_submit(&submission);
                Dispatch::PREVENT
            }
            PageEvent::ScrollTopClick => {
                self.effects.push(Effect::ScrollToTop);
                Dispatch::PASS
            }
            PageEvent::Intersections(entries) => {
                self.on_intersections(&entries);
                Dispatch::PASS
            }
            PageEvent::ColorScheme { prefers_dark } => {
                self.apply_theme(Theme::from_preference(prefers_dark));
                Dispatch::PASS
            }
        };
        self.fire_due(host);
        dispatch
    }

    /// Advance the deterministic clock by `dt` and fire due timers.
    pub fn advance_time(&mut self, dt: Duration, host: &impl PageHost) {
        self.clock.advance(dt);
        self.fire_due(host);
    }

    /// Advance the clock by `dt_ms` milliseconds. Non-finite and
    /// non-positive values are ignored.
    pub fn advance_time_ms(&mut self, dt_ms: f64, host: &impl PageHost) {
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }
        let max_secs = Duration::MAX.as_secs_f64();
        let secs = (dt_ms / 1000.0).min(max_secs);
        let dt = Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX);
        self.advance_time(dt, host);
    }

    /// Move the clock to absolute time `now` (never backwards) and fire due
    /// timers.
    pub fn set_time(&mut self, now: Duration, host: &impl PageHost) {
        self.clock.set(now);
        self.fire_due(host);
    }

    /// Smooth-scroll to the element with `id` and pause the scroll spy until
    /// the scroll is assumed done. Missing targets are skipped silently.
    ///
    /// Returns `true` if a scroll was started.
    pub fn scroll_to_section(&mut self, id: &str, host: &impl PageHost) -> bool {
        if !host.has_element(id) {
            debug!(id, "scroll target not found");
            return false;
        }
        if let Some(previous) = self.scroll_guard.take() {
            self.timers.cancel(previous);
        }
        let release_at = self
            .clock
            .now()
            .saturating_add(self.config.scroll.smooth_scroll_guard());
        self.scroll_guard = Some(self.timers.schedule(release_at, TimerKind::ScrollGuardRelease));
        self.effects.push(Effect::ScrollIntoView { id: id.to_owned() });
        true
    }

    /// Toggle the mobile menu, as the menu button does.
    pub fn toggle_menu(&mut self) {
        self.apply_menu(MenuTrigger::Button);
    }

    // -----------------------------------------------------------------------
    // Scroll
    // -----------------------------------------------------------------------

    fn on_scroll(&mut self, host: &impl PageHost) {
        self.apply_scroll_top(host.scroll_offset());
        match self.scroll_throttle.hit(self.clock.now()) {
            ThrottleDecision::Run => {
                if let Some(pending) = self.trailing_scroll.take() {
                    self.timers.cancel(pending);
                }
                self.evaluate_scroll(host);
            }
            ThrottleDecision::Defer { at } => {
                if let Some(pending) = self.trailing_scroll.take() {
                    self.timers.cancel(pending);
                }
                self.trailing_scroll = Some(self.timers.schedule(at, TimerKind::ScrollTrailing));
            }
        }
    }

    fn evaluate_scroll(&mut self, host: &impl PageHost) {
        if self.is_scrolling() {
            trace!("scroll spy paused during smooth scroll");
            return;
        }
        let offset = host.scroll_offset();
        let sections = host.section_layouts();
        if let Some(active) = self.spy.observe(&sections, offset) {
            let section = active.to_owned();
            self.effects.push(Effect::HighlightNav { section });
        }
        self.apply_navbar(offset);
    }

    fn apply_navbar(&mut self, offset: f64) {
        let style = NavbarStyle::for_offset(offset, self.config.scroll.navbar_threshold_px);
        if self.navbar != Some(style) {
            self.navbar = Some(style);
            self.effects.push(Effect::SetNavbarStyle(style));
        }
    }

    fn apply_scroll_top(&mut self, offset: f64) {
        let visible = scroll_top_visible(offset, self.config.scroll.scroll_top_threshold_px);
        if self.scroll_top_visible != Some(visible) {
            self.scroll_top_visible = Some(visible);
            self.effects.push(Effect::SetScrollTopVisible(visible));
        }
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Shared path for nav links, anchors and keyboard navigation.
    fn navigate(&mut self, id: &str, host: &impl PageHost) {
        self.scroll_to_section(id, host);
        if self.spy.set_active(id) {
            debug!(section = id, "active section set by navigation");
        }
        self.effects.push(Effect::HighlightNav {
            section: id.to_owned(),
        });
        self.apply_menu(MenuTrigger::Navigate);
    }

    fn on_anchor_click(&mut self, href: &str, host: &impl PageHost) -> Dispatch {
        let Some(id) = href.strip_prefix('#').filter(|id| !id.is_empty()) else {
            return Dispatch::PASS;
        };
        if host.has_element(id) {
            self.navigate(id, host);
        } else {
            debug!(href, "anchor target not found");
        }
        Dispatch::PREVENT
    }

    fn on_key(&mut self, input: &KeyInput, host: &impl PageHost) -> Dispatch {
        let forward = match KeyAction::from_input(input) {
            KeyAction::CloseMenu => {
                self.apply_menu(MenuTrigger::Escape);
                return Dispatch::PASS;
            }
            KeyAction::None => return Dispatch::PASS,
            KeyAction::NextSection => true,
            KeyAction::PreviousSection => false,
        };
        let Some(target) =
            neighbor(&self.config.navigation.section_order, self.spy.active(), forward)
                .map(str::to_owned)
        else {
            return Dispatch::PASS;
        };
        self.navigate(&target, host);
        Dispatch::PREVENT
    }

    fn apply_menu(&mut self, trigger: MenuTrigger) {
        if let Some(state) = self.menu.apply(trigger) {
            self.effects.push(Effect::SetMenu(state));
        }
    }

    fn apply_theme(&mut self, theme: Theme) {
        if self.theme != Some(theme) {
            debug!(?theme, "theme changed");
            self.theme = Some(theme);
            self.effects.push(Effect::SetTheme(theme));
        }
    }

    // -----------------------------------------------------------------------
    // Contact form
    // -----------------------------------------------------------------------

    /// Blur checks the trimmed value for every field, email included; submit
    /// matches the email as typed.
    fn on_field_blur(&mut self, field: Field, value: &str) {
        let effect = match classify_field(field, value.trim(), &self.field_rules) {
            Validation::Valid => Effect::ClearFieldError { field },
            Validation::Invalid(problem) => Effect::ShowFieldError {
                field,
                message: self
                    .config
                    .form
                    .messages
                    .for_problem(field, problem, MessageContext::Blur),
            },
        };
        self.effects.push(effect);
    }

    fn on_submit(&mut self, submission: &ContactSubmission) {
        if self.form_phase == FormPhase::Submitting {
            warn!("submit ignored while a submission is in flight");
            return;
        }
        let problems = submission.problems(&self.field_rules);
        if !problems.is_empty() {
            debug!(failing = problems.len(), "contact form rejected");
            for (field, problem) in problems {
                let message =
                    self.config
                        .form
                        .messages
                        .for_problem(field, problem, MessageContext::Submit);
                self.effects.push(Effect::ShowFieldError { field, message });
            }
            return;
        }

        self.form_phase = FormPhase::Submitting;
        self.effects.push(Effect::SetSubmitLoading(true));
        let complete_at = self
            .clock
            .now()
            .saturating_add(self.config.form.submit_latency());
        self.timers.schedule(complete_at, TimerKind::SubmissionComplete);
        info!(
            name_chars = submission.name.trim().chars().count(),
            message_chars = submission.message.trim().chars().count(),
            "contact form submitted"
        );
    }

    fn complete_submission(&mut self) {
        self.form_phase = FormPhase::Idle;
        self.effects.push(Effect::SetSubmitLoading(false));

        let toast = ToastId(self.next_toast);
        self.next_toast = self.next_toast.saturating_add(1);
        self.effects.push(Effect::ShowToast {
            toast,
            message: self.config.form.messages.success.clone(),
        });
        let dismiss_at = self
            .clock
            .now()
            .saturating_add(self.config.form.toast_visible());
        self.timers.schedule(dismiss_at, TimerKind::ToastDismiss(toast));

        self.effects.push(Effect::ResetForm);
        info!(toast = toast.0, "contact form submission completed");
    }

    // -----------------------------------------------------------------------
    // Reveals
    // -----------------------------------------------------------------------

    fn on_intersections(&mut self, entries: &[IntersectionEntry]) {
        let now = self.clock.now();
        for planned in self.reveal.plan(entries) {
            if planned.delay.is_zero() {
                self.effects.push(planned.effect);
            } else {
                self.timers
                    .schedule(now.saturating_add(planned.delay), TimerKind::Emit(planned.effect));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Timers
    // -----------------------------------------------------------------------

    fn fire_due(&mut self, host: &impl PageHost) {
        let now = self.clock.now();
        while let Some((id, kind)) = self.timers.pop_due(now) {
            self.fire(id, kind, host);
        }
    }

    fn fire(&mut self, id: TimerId, kind: TimerKind, host: &impl PageHost) {
        match kind {
            TimerKind::ScrollGuardRelease => {
                if self.scroll_guard == Some(id) {
                    self.scroll_guard = None;
                    trace!("smooth scroll guard released");
                    // Scroll events during the smooth scroll were skipped.
                    self.evaluate_scroll(host);
                }
            }
            TimerKind::ScrollTrailing => {
                if self.trailing_scroll == Some(id) {
                    self.trailing_scroll = None;
                }
                self.scroll_throttle.mark_run(self.clock.now());
                self.evaluate_scroll(host);
            }
            TimerKind::SubmissionComplete => self.complete_submission(),
            TimerKind::ToastDismiss(toast) => {
                self.effects.push(Effect::DismissToast { toast });
                let remove_at = self
                    .clock
                    .now()
                    .saturating_add(self.config.form.toast_exit());
                self.timers.schedule(remove_at, TimerKind::ToastRemove(toast));
            }
            TimerKind::ToastRemove(toast) => self.effects.push(Effect::RemoveToast { toast }),
            TimerKind::Emit(effect) => self.effects.push(effect),
        }
    }
}
