#![forbid(unsafe_code)]

use core::time::Duration;

use folio_core::{
    ContactSubmission, Effect, ElementId, Field, FolioConfig, FormPhase, IntersectionEntry,
    KeyInput, LayoutSnapshot, MenuState, NavbarStyle, ObservedKind, PageEvent, PortfolioPage,
    ToastId,
};
use pretty_assertions::assert_eq;

fn portfolio() -> LayoutSnapshot {
    LayoutSnapshot::stacked([
        ("home", 800.0),
        ("about", 600.0),
        ("skills", 700.0),
        ("projects", 900.0),
        ("contact", 500.0),
    ])
}

fn ready_page(host: &LayoutSnapshot) -> PortfolioPage {
    let mut page = PortfolioPage::new(FolioConfig::default());
    page.init(host);
    page.take_effects();
    page
}

fn at(page: &mut PortfolioPage, host: &LayoutSnapshot, ms: u64) {
    page.set_time(Duration::from_millis(ms), host);
}

fn valid_submission() -> ContactSubmission {
    ContactSubmission::new("Ada", "ada@example.com", "I'd like to talk about a project.")
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[test]
fn nav_click_highlights_only_target() {
    let host = portfolio();
    let mut page = ready_page(&host);

    let dispatch = page.handle(
        PageEvent::NavLinkClick {
            section: "projects".into(),
        },
        &host,
    );

    assert!(dispatch.prevent_default);
    assert_eq!(
        page.take_effects(),
        vec![
            Effect::ScrollIntoView {
                id: "projects".into()
            },
            Effect::HighlightNav {
                section: "projects".into()
            },
        ]
    );
    assert_eq!(page.active_section(), "projects");
    assert!(page.is_scrolling());
}

#[test]
fn nav_click_closes_open_menu() {
    let host = portfolio();
    let mut page = ready_page(&host);
    page.handle(PageEvent::MenuButtonClick, &host);
    page.take_effects();

    page.handle(
        PageEvent::NavLinkClick {
            section: "about".into(),
        },
        &host,
    );

    assert_eq!(
        page.take_effects(),
        vec![
            Effect::ScrollIntoView { id: "about".into() },
            Effect::HighlightNav {
                section: "about".into()
            },
            Effect::SetMenu(MenuState::Closed),
        ]
    );
    assert!(!page.is_menu_open());
}

#[test]
fn nav_click_to_missing_section_still_highlights() {
    let host = portfolio();
    let mut page = ready_page(&host);

    page.handle(
        PageEvent::NavLinkClick {
            section: "blog".into(),
        },
        &host,
    );

    assert_eq!(
        page.take_effects(),
        vec![Effect::HighlightNav {
            section: "blog".into()
        }]
    );
    assert!(!page.is_scrolling());
}

#[test]
fn anchor_clicks() {
    let host = portfolio();
    let mut page = ready_page(&host);

    let bare = page.handle(PageEvent::AnchorClick { href: "#".into() }, &host);
    assert!(!bare.prevent_default);
    assert!(page.take_effects().is_empty());

    let missing = page.handle(
        PageEvent::AnchorClick {
            href: "#nowhere".into(),
        },
        &host,
    );
    assert!(missing.prevent_default);
    assert!(page.take_effects().is_empty());

    let about = page.handle(
        PageEvent::AnchorClick {
            href: "#about".into(),
        },
        &host,
    );
    assert!(about.prevent_default);
    assert_eq!(
        page.take_effects(),
        vec![
            Effect::ScrollIntoView { id: "about".into() },
            Effect::HighlightNav {
                section: "about".into()
            },
        ]
    );
}

#[test]
fn keyboard_walks_sections() {
    let host = portfolio();
    let mut page = ready_page(&host);

    let up = page.handle(PageEvent::Key(KeyInput::new("ArrowUp").with_alt()), &host);
    assert!(!up.prevent_default);
    assert!(page.take_effects().is_empty());

    let down = page.handle(PageEvent::Key(KeyInput::new("ArrowDown").with_alt()), &host);
    assert!(down.prevent_default);
    assert_eq!(page.active_section(), "about");

    page.handle(PageEvent::Key(KeyInput::new("ArrowDown").with_alt()), &host);
    assert_eq!(page.active_section(), "skills");
    assert_eq!(
        page.take_effects().last(),
        Some(&Effect::HighlightNav {
            section: "skills".into()
        })
    );

    let plain = page.handle(PageEvent::Key(KeyInput::new("ArrowDown")), &host);
    assert!(!plain.prevent_default);
    assert_eq!(page.active_section(), "skills");
}

#[test]
fn keyboard_stops_at_last_section() {
    let host = portfolio();
    let mut page = ready_page(&host);
    page.handle(
        PageEvent::NavLinkClick {
            section: "contact".into(),
        },
        &host,
    );
    page.take_effects();

    let down = page.handle(PageEvent::Key(KeyInput::new("ArrowDown").with_alt()), &host);
    assert!(!down.prevent_default);
    assert!(page.take_effects().is_empty());
}

// ---------------------------------------------------------------------------
// Scroll spy
// ---------------------------------------------------------------------------

#[test]
fn scroll_runs_on_leading_edge_and_catches_up() {
    let mut host = portfolio();
    let mut page = ready_page(&host);

    at(&mut page, &host, 1_000);
    host.scroll_offset = 750.0;
    page.handle(PageEvent::Scroll, &host);
    assert_eq!(
        page.take_effects(),
        vec![
            Effect::SetScrollTopVisible(true),
            Effect::HighlightNav {
                section: "about".into()
            },
            Effect::SetNavbarStyle(NavbarStyle::Scrolled),
        ]
    );

    at(&mut page, &host, 1_030);
    host.scroll_offset = 2_050.0;
    page.handle(PageEvent::Scroll, &host);
    assert!(page.take_effects().is_empty());
    assert_eq!(page.active_section(), "about");

    at(&mut page, &host, 1_099);
    assert!(page.take_effects().is_empty());

    at(&mut page, &host, 1_100);
    assert_eq!(
        page.take_effects(),
        vec![Effect::HighlightNav {
            section: "projects".into()
        }]
    );
    assert_eq!(page.active_section(), "projects");
}

#[test]
fn trailing_run_reads_layout_at_fire_time() {
    let mut host = portfolio();
    let mut page = ready_page(&host);

    at(&mut page, &host, 500);
    host.scroll_offset = 10.0;
    page.handle(PageEvent::Scroll, &host);
    at(&mut page, &host, 520);
    page.handle(PageEvent::Scroll, &host);
    page.take_effects();

    host.scroll_offset = 1_500.0;
    at(&mut page, &host, 600);
    assert_eq!(
        page.take_effects(),
        vec![
            Effect::HighlightNav {
                section: "skills".into()
            },
            Effect::SetNavbarStyle(NavbarStyle::Scrolled),
        ]
    );
}

#[test]
fn scroll_spy_paused_while_smooth_scrolling() {
    let mut host = portfolio();
    let mut page = ready_page(&host);

    page.handle(
        PageEvent::NavLinkClick {
            section: "contact".into(),
        },
        &host,
    );
    page.take_effects();

    at(&mut page, &host, 200);
    host.scroll_offset = 1_000.0;
    page.handle(PageEvent::Scroll, &host);
    // Only the unthrottled scroll-to-top check runs.
    assert_eq!(page.take_effects(), vec![Effect::SetScrollTopVisible(true)]);
    assert_eq!(page.active_section(), "contact");

    // Release re-reads the page where the skipped scroll left it.
    at(&mut page, &host, 1_000);
    assert!(!page.is_scrolling());
    assert_eq!(
        page.take_effects(),
        vec![
            Effect::HighlightNav {
                section: "about".into()
            },
            Effect::SetNavbarStyle(NavbarStyle::Scrolled),
        ]
    );

    host.scroll_offset = 3_100.0;
    page.handle(PageEvent::Scroll, &host);
    assert_eq!(
        page.take_effects(),
        vec![Effect::HighlightNav {
            section: "contact".into()
        }]
    );
    assert_eq!(page.active_section(), "contact");
}

#[test]
fn guard_release_restores_navbar_after_scrolling_home() {
    let mut host = portfolio().scrolled_to(2_000.0);
    let mut page = ready_page(&host);

    page.handle(
        PageEvent::NavLinkClick {
            section: "home".into(),
        },
        &host,
    );
    for (ms, offset) in [(100, 1_500.0), (250, 800.0), (400, 200.0), (550, 0.0)] {
        at(&mut page, &host, ms);
        host.scroll_offset = offset;
        page.handle(PageEvent::Scroll, &host);
    }
    assert_eq!(page.active_section(), "home");
    assert!(
        !page
            .take_effects()
            .contains(&Effect::SetNavbarStyle(NavbarStyle::Translucent))
    );

    at(&mut page, &host, 5_000);
    assert_eq!(
        page.take_effects(),
        vec![Effect::SetNavbarStyle(NavbarStyle::Translucent)]
    );
    assert_eq!(page.active_section(), "home");
}

#[test]
fn navbar_toggles_exactly_at_threshold() {
    let mut host = portfolio();
    let mut page = ready_page(&host);

    at(&mut page, &host, 1_000);
    host.scroll_offset = 99.0;
    page.handle(PageEvent::Scroll, &host);
    assert!(page.take_effects().is_empty());

    at(&mut page, &host, 2_000);
    host.scroll_offset = 100.0;
    page.handle(PageEvent::Scroll, &host);
    assert_eq!(
        page.take_effects(),
        vec![Effect::SetNavbarStyle(NavbarStyle::Scrolled)]
    );
}

#[test]
fn scroll_top_control() {
    let mut host = portfolio();
    let mut page = ready_page(&host);

    host.scroll_offset = 300.0;
    page.handle(PageEvent::Scroll, &host);
    assert_eq!(page.take_effects().first(), Some(&Effect::SetScrollTopVisible(true)));

    // Unthrottled: hides again inside the same throttle window.
    host.scroll_offset = 299.0;
    page.handle(PageEvent::Scroll, &host);
    assert_eq!(page.take_effects(), vec![Effect::SetScrollTopVisible(false)]);

    page.handle(PageEvent::ScrollTopClick, &host);
    assert_eq!(page.take_effects(), vec![Effect::ScrollToTop]);
}

// ---------------------------------------------------------------------------
// Mobile menu
// ---------------------------------------------------------------------------

#[test]
fn menu_toggled_twice_returns_to_closed_unlocked() {
    let host = portfolio();
    let mut page = ready_page(&host);

    page.handle(PageEvent::MenuButtonClick, &host);
    assert!(page.menu_state().body_scroll_locked());
    page.handle(PageEvent::MenuButtonClick, &host);

    assert_eq!(
        page.take_effects(),
        vec![
            Effect::SetMenu(MenuState::Open),
            Effect::SetMenu(MenuState::Closed),
        ]
    );
    assert!(!page.is_menu_open());
    assert!(!page.menu_state().body_scroll_locked());
}

#[test]
fn menu_closing_paths() {
    let host = portfolio().with_viewport_width(600.0);
    let mut page = ready_page(&host);

    page.toggle_menu();
    page.handle(PageEvent::OutsideClick, &host);
    assert!(!page.is_menu_open());

    page.toggle_menu();
    page.handle(PageEvent::Key(KeyInput::new("Escape")), &host);
    assert!(!page.is_menu_open());

    page.toggle_menu();
    page.handle(PageEvent::Resize, &host);
    assert!(page.is_menu_open(), "narrow viewport keeps menu open");

    let wide = host.clone().with_viewport_width(1_024.0);
    page.handle(PageEvent::Resize, &wide);
    assert!(!page.is_menu_open());

    assert_eq!(
        page.take_effects(),
        vec![
            Effect::SetMenu(MenuState::Open),
            Effect::SetMenu(MenuState::Closed),
            Effect::SetMenu(MenuState::Open),
            Effect::SetMenu(MenuState::Closed),
            Effect::SetMenu(MenuState::Open),
            Effect::SetMenu(MenuState::Closed),
        ]
    );
}

#[test]
fn outside_click_with_closed_menu_does_nothing() {
    let host = portfolio();
    let mut page = ready_page(&host);
    page.handle(PageEvent::OutsideClick, &host);
    page.handle(PageEvent::Key(KeyInput::new("Escape")), &host);
    assert!(page.take_effects().is_empty());
}

// ---------------------------------------------------------------------------
// Contact form
// ---------------------------------------------------------------------------

#[test]
fn valid_submission_loads_then_succeeds_and_resets() {
    let host = portfolio();
    let mut page = ready_page(&host);

    let dispatch = page.handle(PageEvent::Submit(valid_submission()), &host);
    assert!(dispatch.prevent_default);
    assert_eq!(page.take_effects(), vec![Effect::SetSubmitLoading(true)]);
    assert_eq!(page.form_phase(), FormPhase::Submitting);

    at(&mut page, &host, 1_999);
    assert!(page.take_effects().is_empty());

    at(&mut page, &host, 2_000);
    assert_eq!(
        page.take_effects(),
        vec![
            Effect::SetSubmitLoading(false),
            Effect::ShowToast {
                toast: ToastId(1),
                message: "Message sent! I'll get back to you soon.".into(),
            },
            Effect::ResetForm,
        ]
    );
    assert_eq!(page.form_phase(), FormPhase::Idle);

    at(&mut page, &host, 7_000);
    assert_eq!(
        page.take_effects(),
        vec![Effect::DismissToast { toast: ToastId(1) }]
    );
    at(&mut page, &host, 7_300);
    assert_eq!(
        page.take_effects(),
        vec![Effect::RemoveToast { toast: ToastId(1) }]
    );
    assert_eq!(page.pending_timers(), 0);
}

#[test]
fn invalid_submission_annotates_each_failing_field() {
    let host = portfolio();
    let mut page = ready_page(&host);

    let dispatch = page.handle(
        PageEvent::Submit(ContactSubmission::new("a", "a@b", "too short")),
        &host,
    );

    assert!(dispatch.prevent_default);
    assert_eq!(
        page.take_effects(),
        vec![
            Effect::ShowFieldError {
                field: Field::Name,
                message: "Please enter a valid name".into(),
            },
            Effect::ShowFieldError {
                field: Field::Email,
                message: "Please enter a valid email".into(),
            },
            Effect::ShowFieldError {
                field: Field::Message,
                message: "The message must be at least 10 characters".into(),
            },
        ]
    );
    assert_eq!(page.form_phase(), FormPhase::Idle);
    assert_eq!(page.pending_timers(), 0);
}

#[test]
fn partially_invalid_submission_only_flags_failures() {
    let host = portfolio();
    let mut page = ready_page(&host);

    page.handle(
        PageEvent::Submit(ContactSubmission::new("Al", "a.com", "1234567890")),
        &host,
    );

    assert_eq!(
        page.take_effects(),
        vec![Effect::ShowFieldError {
            field: Field::Email,
            message: "Please enter a valid email".into(),
        }]
    );
}

#[test]
fn submit_while_in_flight_is_ignored() {
    let host = portfolio();
    let mut page = ready_page(&host);

    page.handle(PageEvent::Submit(valid_submission()), &host);
    page.take_effects();
    at(&mut page, &host, 1_500);
    let again = page.handle(PageEvent::Submit(valid_submission()), &host);

    assert!(again.prevent_default);
    assert!(page.take_effects().is_empty());
    at(&mut page, &host, 2_000);
    assert!(page.take_effects().contains(&Effect::ResetForm));
    // Only the toast dismissal is left; the ignored submit scheduled nothing.
    assert_eq!(page.pending_timers(), 1);
    assert_eq!(page.form_phase(), FormPhase::Idle);
}

#[test]
fn blur_and_input_feedback() {
    let host = portfolio();
    let mut page = ready_page(&host);

    page.handle(
        PageEvent::FieldBlur {
            field: Field::Email,
            value: "bad".into(),
        },
        &host,
    );
    page.handle(PageEvent::FieldInput { field: Field::Email }, &host);
    page.handle(
        PageEvent::FieldBlur {
            field: Field::Email,
            value: "a@b.c".into(),
        },
        &host,
    );
    page.handle(
        PageEvent::FieldBlur {
            field: Field::Message,
            value: "123456789".into(),
        },
        &host,
    );

    assert_eq!(
        page.take_effects(),
        vec![
            Effect::ShowFieldError {
                field: Field::Email,
                message: "Invalid email".into(),
            },
            Effect::ClearFieldError { field: Field::Email },
            Effect::ClearFieldError { field: Field::Email },
            Effect::ShowFieldError {
                field: Field::Message,
                message: "Message is too short".into(),
            },
        ]
    );
}

#[test]
fn consecutive_toasts_get_distinct_ids() {
    let host = portfolio();
    let mut page = ready_page(&host);

    page.handle(PageEvent::Submit(valid_submission()), &host);
    at(&mut page, &host, 2_000);
    page.handle(PageEvent::Submit(valid_submission()), &host);
    at(&mut page, &host, 4_000);

    let toasts: Vec<ToastId> = page
        .take_effects()
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::ShowToast { toast, .. } => Some(toast),
            _ => None,
        })
        .collect();
    assert_eq!(toasts, vec![ToastId(1), ToastId(2)]);
}

// ---------------------------------------------------------------------------
// Reveals
// ---------------------------------------------------------------------------

#[test]
fn reveals_are_staggered_and_skill_bars_fill_later() {
    let host = portfolio();
    let mut page = ready_page(&host);

    page.handle(
        PageEvent::Intersections(vec![
            IntersectionEntry::new(ElementId(1), ObservedKind::Animate, true),
            IntersectionEntry::new(ElementId(2), ObservedKind::Animate, true),
        ]),
        &host,
    );
    page.handle(
        PageEvent::Intersections(vec![IntersectionEntry::new(
            ElementId(3),
            ObservedKind::SkillBar {
                width: "90%".into(),
            },
            true,
        )]),
        &host,
    );
    assert_eq!(
        page.take_effects(),
        vec![
            Effect::Reveal {
                element: ElementId(1)
            },
            Effect::Unobserve {
                element: ElementId(3)
            },
        ]
    );

    at(&mut page, &host, 100);
    assert_eq!(
        page.take_effects(),
        vec![Effect::Reveal {
            element: ElementId(2)
        }]
    );

    at(&mut page, &host, 200);
    assert_eq!(
        page.take_effects(),
        vec![Effect::FillSkillBar {
            element: ElementId(3),
            width: "90%".into(),
        }]
    );
}

#[test]
fn custom_config_changes_thresholds() {
    let mut config = FolioConfig::default();
    config.scroll.navbar_threshold_px = 40.0;
    config.form.submit_latency_ms = 500;
    let host = portfolio().scrolled_to(50.0);
    let mut page = PortfolioPage::new(config);

    page.init(&host);
    assert_eq!(
        page.take_effects(),
        vec![
            Effect::SetNavbarStyle(NavbarStyle::Scrolled),
            Effect::SetScrollTopVisible(false),
        ]
    );

    page.handle(PageEvent::Submit(valid_submission()), &host);
    at(&mut page, &host, 500);
    assert_eq!(page.form_phase(), FormPhase::Idle);
}
