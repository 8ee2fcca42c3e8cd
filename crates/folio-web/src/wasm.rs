#![forbid(unsafe_code)]

//! `wasm-bindgen` exports and DOM wiring for [`PortfolioPage`].
//!
//! Only compiled on `wasm32` targets.

use std::cell::RefCell;
use std::collections::HashMap;

use folio_core::{
    ContactSubmission, Dispatch, Effect, ElementId, Field, FolioConfig, IntersectionEntry,
    KeyInput, MenuState, NavbarStyle, ObservedKind, PageEvent, PageHost, PortfolioPage,
    SectionLayout, Theme, ToastId,
};
use js_sys::{Array, Reflect};
use tracing::{debug, error, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, ErrorEvent, Event, EventTarget, HtmlButtonElement, HtmlElement,
    HtmlFormElement, HtmlImageElement, HtmlInputElement, HtmlTextAreaElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent,
    MediaQueryListEvent, Node, NodeList, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, ScrollToOptions, Window,
};
use web_time::Instant;

use crate::console_log;
use crate::selectors;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "folio panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("folio panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

// ---------------------------------------------------------------------------
// Page state
// ---------------------------------------------------------------------------

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

/// Run `f` against the started page.
///
/// Returns `None` before `start`, during teardown, and for a dispatch that
/// arrives while another one is still applying effects.
fn with_app<R>(f: impl FnOnce(&mut App) -> R) -> Option<R> {
    APP.try_with(|cell| {
        let Ok(mut slot) = cell.try_borrow_mut() else {
            warn!("re-entrant page dispatch dropped");
            return None;
        };
        slot.as_mut().map(f)
    })
    .ok()
    .flatten()
}

fn is_started() -> bool {
    APP.try_with(|cell| cell.try_borrow().map_or(true, |slot| slot.is_some()))
        .unwrap_or(true)
}

fn dispatch(event: PageEvent) -> Dispatch {
    with_app(|app| app.dispatch(event)).unwrap_or_default()
}

/// Live DOM as seen by the core.
struct Dom {
    window: Window,
    document: Document,
}

impl PageHost for Dom {
    fn scroll_offset(&self) -> f64 {
        self.window.page_y_offset().unwrap_or(0.0)
    }

    fn section_layouts(&self) -> Vec<SectionLayout> {
        elements(self.document.query_selector_all(selectors::SECTIONS))
            .into_iter()
            .filter_map(|element| {
                let section = element.dyn_into::<HtmlElement>().ok()?;
                Some(SectionLayout::new(
                    section.id(),
                    f64::from(section.offset_top()),
                    f64::from(section.offset_height()),
                ))
            })
            .collect()
    }

    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or(0.0)
    }
}

impl Dom {
    /// Menu button and nav menu, when both are in the page.
    fn menu_elements(&self) -> Option<(Element, Element)> {
        Some((
            self.document.get_element_by_id(selectors::MENU_BUTTON_ID)?,
            self.document.get_element_by_id(selectors::NAV_MENU_ID)?,
        ))
    }
}

/// An element handed to an intersection observer.
struct Tracked {
    element: Element,
    observer: IntersectionObserver,
}

struct App {
    page: PortfolioPage,
    dom: Dom,
    origin: Instant,
    wake: Closure<dyn FnMut()>,
    wake_handle: Option<i32>,
    tracked: HashMap<ElementId, Tracked>,
    toasts: HashMap<ToastId, Element>,
    scroll_top: Option<HtmlElement>,
}

impl App {
    fn sync_clock(&mut self) {
        self.page.set_time(self.origin.elapsed(), &self.dom);
    }

    fn dispatch(&mut self, event: PageEvent) -> Dispatch {
        self.sync_clock();
        let dispatch = self.page.handle(event, &self.dom);
        self.flush();
        dispatch
    }

    /// Apply queued effects and re-arm the wake-up timer.
    fn flush(&mut self) {
        for effect in self.page.take_effects() {
            self.apply(effect);
        }
        self.arm_wake();
    }

    fn arm_wake(&mut self) {
        if let Some(handle) = self.wake_handle.take() {
            self.dom.window.clear_timeout_with_handle(handle);
        }
        let Some(deadline) = self.page.next_deadline() else {
            return;
        };
        let delay = deadline.saturating_sub(self.page.now());
        // Round up so the timer never fires before the deadline.
        let delay_ms = i32::try_from(delay.as_millis().saturating_add(1)).unwrap_or(i32::MAX);
        match self
            .dom
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.wake.as_ref().unchecked_ref(),
                delay_ms,
            ) {
            Ok(handle) => self.wake_handle = Some(handle),
            Err(err) => warn!(?err, "failed to arm page timer"),
        }
    }

    fn html_by_id(&self, id: &str) -> Option<HtmlElement> {
        self.dom
            .document
            .get_element_by_id(id)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::HighlightNav { section } => self.highlight_nav(&section),
            Effect::SetNavbarStyle(style) => self.set_navbar_style(style),
            Effect::ScrollIntoView { id } => self.scroll_into_view(&id),
            Effect::ScrollToTop => {
                let options = ScrollToOptions::new();
                options.set_top(0.0);
                options.set_behavior(ScrollBehavior::Smooth);
                self.dom.window.scroll_to_with_scroll_to_options(&options);
            }
            Effect::SetScrollTopVisible(visible) => {
                if let Some(button) = &self.scroll_top {
                    let (opacity, visibility) = selectors::scroll_top_style(visible);
                    set_style(button, "opacity", opacity);
                    set_style(button, "visibility", visibility);
                }
            }
            Effect::SetMenu(state) => self.set_menu(state),
            Effect::ShowFieldError { field, message } => self.show_field_error(field, &message),
            Effect::ClearFieldError { field } => self.clear_field_error(field),
            Effect::SetSubmitLoading(loading) => self.set_submit_loading(loading),
            Effect::ShowToast { toast, message } => self.show_toast(toast, &message),
            Effect::DismissToast { toast } => {
                if let Some(container) = self
                    .toasts
                    .get(&toast)
                    .and_then(|element| element.dyn_ref::<HtmlElement>())
                {
                    set_style(container, "animation", selectors::TOAST_EXIT_ANIMATION);
                }
            }
            Effect::RemoveToast { toast } => {
                if let Some(container) = self.toasts.remove(&toast) {
                    container.remove();
                }
            }
            Effect::ResetForm => {
                if let Some(form) = self
                    .dom
                    .document
                    .get_element_by_id(selectors::CONTACT_FORM_ID)
                    .and_then(|element| element.dyn_into::<HtmlFormElement>().ok())
                {
                    form.reset();
                }
            }
            Effect::Reveal { element } => {
                if let Some(tracked) = self.tracked.get(&element) {
                    let _ = tracked.element.class_list().add_1(selectors::IN_VIEW_CLASS);
                }
            }
            Effect::FillSkillBar { element, width } => {
                if let Some(bar) = self
                    .tracked
                    .get(&element)
                    .and_then(|tracked| tracked.element.dyn_ref::<HtmlElement>())
                {
                    set_style(bar, "width", &width);
                }
            }
            Effect::LoadImage { element } => {
                if let Some(image) = self
                    .tracked
                    .get(&element)
                    .and_then(|tracked| tracked.element.dyn_ref::<HtmlImageElement>())
                {
                    if let Some(src) = image.get_attribute(selectors::LAZY_SRC_ATTR) {
                        image.set_src(&src);
                    }
                    let _ = image.class_list().remove_1(selectors::LAZY_CLASS);
                }
            }
            Effect::Unobserve { element } => {
                if let Some(tracked) = self.tracked.get(&element) {
                    tracked.observer.unobserve(&tracked.element);
                }
            }
            Effect::SetTheme(theme) => {
                if let Some(body) = self.dom.document.body() {
                    let _ = body
                        .class_list()
                        .toggle_with_force(Theme::BODY_CLASS, theme.is_dark());
                }
            }
        }
    }

    fn highlight_nav(&self, section: &str) {
        for link in elements(self.dom.document.query_selector_all(selectors::NAV_LINKS)) {
            let active = link.get_attribute(selectors::NAV_SECTION_ATTR).as_deref() == Some(section);
            let _ = link
                .class_list()
                .toggle_with_force(selectors::ACTIVE_CLASS, active);
        }
    }

    fn set_navbar_style(&self, style: NavbarStyle) {
        let Some(navbar) = self.html_by_id(selectors::NAVBAR_ID) else {
            return;
        };
        set_style(&navbar, "background", style.background());
        set_style(&navbar, "backdrop-filter", style.backdrop_filter());
        set_style(&navbar, "box-shadow", style.box_shadow());
    }

    fn scroll_into_view(&self, id: &str) {
        let Some(target) = self.dom.document.get_element_by_id(id) else {
            return;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        target.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn set_menu(&self, state: MenuState) {
        let Some((button, menu)) = self.dom.menu_elements() else {
            return;
        };
        for element in [button, menu] {
            let _ = element
                .class_list()
                .toggle_with_force(selectors::ACTIVE_CLASS, state.is_open());
        }
        if let Some(body) = self.dom.document.body() {
            set_style(&body, "overflow", selectors::body_overflow(state));
        }
    }

    fn show_field_error(&self, field: Field, message: &str) {
        let Some(control) = self.html_by_id(field.name()) else {
            return;
        };
        let Ok(Some(group)) = control.closest(selectors::FORM_GROUP) else {
            return;
        };
        remove_field_error(&group);
        set_style(&control, "border-color", selectors::ERROR_COLOR);

        let Ok(note) = self.dom.document.create_element("div") else {
            return;
        };
        note.set_class_name(selectors::FIELD_ERROR_CLASS);
        let _ = note.set_attribute("style", selectors::FIELD_ERROR_CSS);
        note.set_text_content(Some(message));
        let _ = group.append_child(&note);
    }

    fn clear_field_error(&self, field: Field) {
        let Some(control) = self.html_by_id(field.name()) else {
            return;
        };
        set_style(&control, "border-color", "");
        if let Ok(Some(group)) = control.closest(selectors::FORM_GROUP) {
            remove_field_error(&group);
        }
    }

    fn set_submit_loading(&self, loading: bool) {
        let Ok(Some(button)) = self.dom.document.query_selector(selectors::SUBMIT_BUTTON) else {
            return;
        };
        let (icon_class, opacity) = selectors::submit_button_style(loading);
        if let Some(button) = button.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(loading);
            set_style(button, "opacity", opacity);
        }
        let messages = &self.page.config().form.messages;
        if let Ok(Some(label)) = button.query_selector("span") {
            let text = if loading {
                &messages.sending_label
            } else {
                &messages.submit_label
            };
            label.set_text_content(Some(text.as_str()));
        }
        if let Ok(Some(icon)) = button.query_selector("i") {
            icon.set_class_name(icon_class);
        }
    }

    fn show_toast(&mut self, toast: ToastId, message: &str) {
        let document = &self.dom.document;
        let Some(body) = document.body() else {
            return;
        };
        let (Ok(container), Ok(row), Ok(icon), Ok(text)) = (
            document.create_element("div"),
            document.create_element("div"),
            document.create_element("i"),
            document.create_element("span"),
        ) else {
            return;
        };
        container.set_class_name(selectors::TOAST_CLASS);
        let _ = container.set_attribute("style", selectors::TOAST_CSS);
        let _ = container.set_attribute("role", "status");
        let _ = row.set_attribute("style", selectors::TOAST_ROW_CSS);
        icon.set_class_name(selectors::TOAST_ICON_CLASS);
        text.set_text_content(Some(message));
        let _ = row.append_child(&icon);
        let _ = row.append_child(&text);
        let _ = container.append_child(&row);
        if body.append_child(&container).is_ok() {
            self.toasts.insert(toast, container);
        }
    }
}

// ---------------------------------------------------------------------------
// DOM helpers
// ---------------------------------------------------------------------------

fn elements(list: Result<NodeList, JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = element.style().set_property(property, value) {
        debug!(property, ?err, "style update rejected");
    }
}

fn remove_field_error(group: &Element) {
    if let Ok(Some(existing)) = group.query_selector(selectors::FIELD_ERROR) {
        existing.remove();
    }
}

fn control_value(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn read_submission(document: &Document) -> ContactSubmission {
    let value = |field: Field| {
        document
            .get_element_by_id(field.name())
            .map(|element| control_value(&element))
            .unwrap_or_default()
    };
    ContactSubmission::new(
        value(Field::Name),
        value(Field::Email),
        value(Field::Message),
    )
}

/// Attach `handler` for the lifetime of the page.
fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Family {
    Animate,
    SkillBar,
    LazyImage,
}

impl Family {
    const ALL: [Self; 3] = [Self::Animate, Self::SkillBar, Self::LazyImage];

    const fn selector(self) -> &'static str {
        match self {
            Self::Animate => selectors::ANIMATED,
            Self::SkillBar => selectors::SKILL_BARS,
            Self::LazyImage => selectors::LAZY_IMAGES,
        }
    }

    fn configure(self, init: &IntersectionObserverInit) {
        match self {
            Self::Animate => {
                init.set_threshold(&JsValue::from_f64(0.1));
                init.set_root_margin("0px 0px -50px 0px");
            }
            Self::SkillBar => init.set_threshold(&JsValue::from_f64(0.5)),
            Self::LazyImage => {}
        }
    }

    fn entry(self, entry: &IntersectionObserverEntry) -> Option<IntersectionEntry> {
        let target = entry.target();
        let element = selectors::parse_element_id(&target.get_attribute(selectors::ELEMENT_ID_ATTR)?)?;
        let kind = match self {
            Self::Animate => ObservedKind::Animate,
            Self::SkillBar => ObservedKind::SkillBar {
                width: target
                    .get_attribute(selectors::SKILL_WIDTH_ATTR)
                    .unwrap_or_default(),
            },
            Self::LazyImage => ObservedKind::LazyImage,
        };
        Some(IntersectionEntry::new(element, kind, entry.is_intersecting()))
    }
}

fn observe_family(
    document: &Document,
    family: Family,
    tracked: &mut HashMap<ElementId, Tracked>,
) -> Result<(), JsValue> {
    let targets = elements(document.query_selector_all(family.selector()));
    if targets.is_empty() {
        return Ok(());
    }
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, _observer: IntersectionObserver| {
            let batch: Vec<IntersectionEntry> = entries
                .iter()
                .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                .filter_map(|entry| family.entry(&entry))
                .collect();
            if !batch.is_empty() {
                dispatch(PageEvent::Intersections(batch));
            }
        },
    );
    let init = IntersectionObserverInit::new();
    family.configure(&init);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();

    for element in targets {
        let id = ElementId(u32::try_from(tracked.len()).unwrap_or(u32::MAX));
        element.set_attribute(selectors::ELEMENT_ID_ATTR, &selectors::element_id_attr(id))?;
        observer.observe(&element);
        tracked.insert(
            id,
            Tracked {
                element,
                observer: observer.clone(),
            },
        );
    }
    debug!(?family, observed = tracked.len(), "intersection observer ready");
    Ok(())
}

fn inject_page_css(document: &Document) {
    let (Some(head), Ok(style)) = (document.head(), document.create_element("style")) else {
        return;
    };
    style.set_text_content(Some(selectors::PAGE_CSS));
    let _ = head.append_child(&style);
}

fn create_scroll_top_button(document: &Document) -> Option<HtmlElement> {
    let body = document.body()?;
    let button = document
        .create_element("button")
        .ok()?
        .dyn_into::<HtmlElement>()
        .ok()?;
    button.set_class_name(selectors::SCROLL_TOP_CLASS);
    button.set_inner_html(selectors::SCROLL_TOP_ICON_HTML);
    let _ = button.set_attribute("style", selectors::SCROLL_TOP_CSS);
    let _ = button.set_attribute("aria-label", "Scroll to top");
    body.append_child(&button).ok()?;
    Some(button)
}

fn wire_scroll_top(button: &HtmlElement) -> Result<(), JsValue> {
    listen(button, "click", |_| {
        dispatch(PageEvent::ScrollTopClick);
    })?;
    for (kind, (transform, shadow)) in [
        ("mouseenter", selectors::SCROLL_TOP_HOVER),
        ("mouseleave", selectors::SCROLL_TOP_REST),
    ] {
        let target = button.clone();
        listen(button, kind, move |_| {
            set_style(&target, "transform", transform);
            set_style(&target, "box-shadow", shadow);
        })?;
    }
    Ok(())
}

fn wire_navigation(document: &Document) -> Result<(), JsValue> {
    for link in elements(document.query_selector_all(selectors::NAV_LINKS)) {
        let source = link.clone();
        listen(&link, "click", move |event| {
            event.prevent_default();
            let Some(section) = source.get_attribute(selectors::NAV_SECTION_ATTR) else {
                debug!("nav link without a target section");
                return;
            };
            dispatch(PageEvent::NavLinkClick { section });
        })?;
    }

    for anchor in elements(document.query_selector_all(selectors::IN_PAGE_ANCHORS)) {
        let source = anchor.clone();
        listen(&anchor, "click", move |event| {
            let href = source.get_attribute("href").unwrap_or_default();
            if dispatch(PageEvent::AnchorClick { href }).prevent_default {
                event.prevent_default();
            }
        })?;
    }

    listen(document, "keydown", |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let mut input = KeyInput::new(key.key());
        if key.alt_key() {
            input = input.with_alt();
        }
        if dispatch(PageEvent::Key(input)).prevent_default {
            event.prevent_default();
        }
    })
}

fn wire_menu(window: &Window, document: &Document) -> Result<(), JsValue> {
    let (Some(button), Some(menu)) = (
        document.get_element_by_id(selectors::MENU_BUTTON_ID),
        document.get_element_by_id(selectors::NAV_MENU_ID),
    ) else {
        debug!("mobile menu markup missing");
        return Ok(());
    };
    listen(&button, "click", |_| {
        dispatch(PageEvent::MenuButtonClick);
    })?;
    listen(document, "click", move |event| {
        let target = event.target().and_then(|target| target.dyn_into::<Node>().ok());
        let inside = target
            .as_ref()
            .is_some_and(|node| button.contains(Some(node)) || menu.contains(Some(node)));
        if !inside {
            dispatch(PageEvent::OutsideClick);
        }
    })?;
    listen(window, "resize", |_| {
        dispatch(PageEvent::Resize);
    })
}

fn wire_contact_form(document: &Document) -> Result<(), JsValue> {
    let Some(form) = document.get_element_by_id(selectors::CONTACT_FORM_ID) else {
        debug!("contact form missing");
        return Ok(());
    };
    let source = document.clone();
    listen(&form, "submit", move |event| {
        event.prevent_default();
        dispatch(PageEvent::Submit(read_submission(&source)));
    })?;

    for control in elements(form.query_selector_all(selectors::FORM_CONTROLS)) {
        let Some(field) = control
            .get_attribute("name")
            .as_deref()
            .and_then(Field::from_name)
        else {
            continue;
        };
        let source = control.clone();
        listen(&control, "blur", move |_| {
            dispatch(PageEvent::FieldBlur {
                field,
                value: control_value(&source),
            });
        })?;
        listen(&control, "input", move |_| {
            dispatch(PageEvent::FieldInput { field });
        })?;
    }
    Ok(())
}

/// Current `prefers-color-scheme: dark` match; later changes are
/// dispatched as they happen.
fn watch_color_scheme(window: &Window) -> bool {
    let Ok(Some(query)) = window.match_media(selectors::DARK_SCHEME_QUERY) else {
        return false;
    };
    let prefers_dark = query.matches();
    let watched = listen(&query, "change", |event| {
        if let Some(change) = event.dyn_ref::<MediaQueryListEvent>() {
            dispatch(PageEvent::ColorScheme {
                prefers_dark: change.matches(),
            });
        }
    });
    if let Err(err) = watched {
        debug!(?err, "color scheme changes not observed");
    }
    prefers_dark
}

fn log_page_load() {
    let elapsed_ms = web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now());
    if let Some(elapsed_ms) = elapsed_ms {
        info!(load_ms = elapsed_ms.round() as u64, "page loaded");
    }
}

fn wire_diagnostics(window: &Window, document: &Document) -> Result<(), JsValue> {
    if document.ready_state() == "complete" {
        log_page_load();
    } else {
        listen(window, "load", |_| log_page_load())?;
    }
    listen(window, "error", |event| {
        if let Some(failure) = event.dyn_ref::<ErrorEvent>() {
            error!(
                error = %failure.message(),
                file = %failure.filename(),
                line = failure.lineno(),
                "uncaught script error"
            );
        }
    })
}

fn wire(config: FolioConfig) -> Result<(), JsValue> {
    if is_started() {
        warn!("portfolio page already started");
        return Ok(());
    }
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    inject_page_css(&document);
    let scroll_top = create_scroll_top_button(&document);
    for selector in selectors::REVEAL_TARGETS {
        for element in elements(document.query_selector_all(selector)) {
            let _ = element.class_list().add_1(selectors::SCROLL_ANIMATE_CLASS);
        }
    }
    let mut tracked = HashMap::new();
    for family in Family::ALL {
        observe_family(&document, family, &mut tracked)?;
    }

    let app = App {
        page: PortfolioPage::new(config),
        dom: Dom {
            window: window.clone(),
            document: document.clone(),
        },
        origin: Instant::now(),
        wake: Closure::<dyn FnMut()>::new(|| {
            with_app(|app| {
                app.wake_handle = None;
                app.sync_clock();
                app.flush();
            });
        }),
        wake_handle: None,
        tracked,
        toasts: HashMap::new(),
        scroll_top: scroll_top.clone(),
    };
    let stored = APP
        .try_with(|cell| {
            cell.try_borrow_mut()
                .map(|mut slot| *slot = Some(app))
                .is_ok()
        })
        .unwrap_or(false);
    if !stored {
        return Err(JsValue::from_str("page state unavailable"));
    }

    listen(&window, "scroll", |_| {
        dispatch(PageEvent::Scroll);
    })?;
    wire_navigation(&document)?;
    wire_menu(&window, &document)?;
    wire_contact_form(&document)?;
    if let Some(button) = &scroll_top {
        wire_scroll_top(button)?;
    }
    wire_diagnostics(&window, &document)?;

    let prefers_dark = watch_color_scheme(&window);
    with_app(|app| {
        app.page.init(&app.dom);
        app.dispatch(PageEvent::ColorScheme { prefers_dark });
    });
    info!("portfolio initialized");
    Ok(())
}

fn boot(config: FolioConfig) -> Result<(), JsValue> {
    install_panic_hook();
    console_log::init(config.tracing_level());

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    if document.ready_state() != "loading" {
        return wire(config);
    }
    let ready = Closure::once_into_js(move || {
        if let Err(err) = wire(config) {
            console_error(&format!("folio start failed: {err:?}"));
        }
    });
    document.add_event_listener_with_callback("DOMContentLoaded", ready.unchecked_ref())
}

// ---------------------------------------------------------------------------
// Exports
// ---------------------------------------------------------------------------

/// Wire the page with the default configuration. Runs once the DOM is
/// parsed; later calls are ignored.
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    boot(FolioConfig::default())
}

/// Like [`start`], with a JSON-encoded [`FolioConfig`]. Missing fields take
/// their defaults; an invalid config is rejected.
#[wasm_bindgen(js_name = startWithConfig)]
pub fn start_with_config(config_json: &str) -> Result<(), JsValue> {
    install_panic_hook();
    let config = FolioConfig::from_json_str(config_json)
        .and_then(FolioConfig::validated)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    boot(config)
}

/// Smooth-scroll to the element with `id`. Unknown ids are ignored.
#[wasm_bindgen(js_name = scrollToSection)]
pub fn scroll_to_section(id: &str) {
    with_app(|app| {
        app.sync_clock();
        app.page.scroll_to_section(id, &app.dom);
        app.flush();
    });
}

/// Toggle the mobile menu. Does nothing when the menu markup is missing.
#[wasm_bindgen(js_name = toggleMobileMenu)]
pub fn toggle_mobile_menu() {
    with_app(|app| {
        if app.dom.menu_elements().is_none() {
            debug!("mobile menu markup missing");
            return;
        }
        app.sync_clock();
        app.page.toggle_menu();
        app.flush();
    });
}
