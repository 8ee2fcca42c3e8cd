#![forbid(unsafe_code)]

//! Tunable page behavior as data.
//!
//! [`FolioConfig`] groups every threshold, delay, and user-facing string the
//! page uses. With the `config` feature it can be loaded from TOML or JSON;
//! every field defaults to the built-in value, so a partial file only
//! overrides what it names.
//!
//! ```toml
//! log_level = "debug"
//!
//! [scroll]
//! navbar_threshold_px = 80.0
//!
//! [form]
//! submit_latency_ms = 1500
//! ```

#[cfg(feature = "config")]
use std::path::Path;
use std::str::FromStr;

use core::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::form::{Field, FieldProblem, FieldRules};

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "config")]
    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    #[cfg(feature = "config")]
    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Top-level page configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct FolioConfig {
    pub scroll: ScrollConfig,
    pub navigation: NavigationConfig,
    pub menu: MenuConfig,
    pub form: FormConfig,
    pub reveal: RevealConfig,
    /// Maximum log level: `trace`, `debug`, `info`, `warn` or `error`.
    pub log_level: String,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            scroll: ScrollConfig::default(),
            navigation: NavigationConfig::default(),
            menu: MenuConfig::default(),
            form: FormConfig::default(),
            reveal: RevealConfig::default(),
            log_level: "info".into(),
        }
    }
}

impl FolioConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Return `self` if [`validate`](Self::validate) finds no problems.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Check every parameter. An empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (name, value) in [
            ("scroll.section_lookback_px", self.scroll.section_lookback_px),
            ("scroll.navbar_threshold_px", self.scroll.navbar_threshold_px),
            ("scroll.scroll_top_threshold_px", self.scroll.scroll_top_threshold_px),
            ("menu.breakpoint_px", self.menu.breakpoint_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{name} must be a finite value >= 0, got {value}"));
            }
        }

        if self.scroll.throttle_ms == 0 {
            errors.push("scroll.throttle_ms must be > 0".into());
        }
        if self.scroll.smooth_scroll_guard_ms == 0 {
            errors.push("scroll.smooth_scroll_guard_ms must be > 0".into());
        }
        if self.form.submit_latency_ms == 0 {
            errors.push("form.submit_latency_ms must be > 0".into());
        }
        if self.form.toast_visible_ms == 0 {
            errors.push("form.toast_visible_ms must be > 0".into());
        }
        if self.form.name_min_chars == 0 {
            errors.push("form.name_min_chars must be > 0".into());
        }
        if self.form.message_min_chars == 0 {
            errors.push("form.message_min_chars must be > 0".into());
        }

        let order = &self.navigation.section_order;
        if order.is_empty() {
            errors.push("navigation.section_order must not be empty".into());
        } else if !order.contains(&self.navigation.initial_section) {
            errors.push(format!(
                "navigation.initial_section {:?} is not in navigation.section_order",
                self.navigation.initial_section
            ));
        }

        if tracing::Level::from_str(&self.log_level).is_err() {
            errors.push(format!("log_level {:?} is not a tracing level", self.log_level));
        }

        errors
    }

    /// Parsed [`log_level`](Self::log_level), falling back to `INFO`.
    #[must_use]
    pub fn tracing_level(&self) -> tracing::Level {
        tracing::Level::from_str(&self.log_level).unwrap_or(tracing::Level::INFO)
    }

    #[must_use]
    pub fn field_rules(&self) -> FieldRules {
        FieldRules {
            name_min_chars: self.form.name_min_chars,
            message_min_chars: self.form.message_min_chars,
        }
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Scroll spy, header and scroll-to-top parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ScrollConfig {
    /// A section becomes active this many px before its top edge. Default: 100.
    pub section_lookback_px: f64,
    /// Header switches to the scrolled style at this offset. Default: 100.
    pub navbar_threshold_px: f64,
    /// Scroll-to-top control appears at this offset. Default: 300.
    pub scroll_top_threshold_px: f64,
    /// Minimum spacing between scroll evaluations. Default: 100.
    pub throttle_ms: u64,
    /// Scroll spy pause after a programmatic smooth scroll. Default: 1000.
    pub smooth_scroll_guard_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            section_lookback_px: 100.0,
            navbar_threshold_px: 100.0,
            scroll_top_threshold_px: 300.0,
            throttle_ms: 100,
            smooth_scroll_guard_ms: 1_000,
        }
    }
}

impl ScrollConfig {
    #[must_use]
    pub const fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    #[must_use]
    pub const fn smooth_scroll_guard(&self) -> Duration {
        Duration::from_millis(self.smooth_scroll_guard_ms)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct NavigationConfig {
    pub initial_section: String,
    /// Sections walked by Alt+ArrowUp / Alt+ArrowDown.
    pub section_order: Vec<String>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            initial_section: "home".into(),
            section_order: ["home", "about", "skills", "projects", "contact"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct MenuConfig {
    /// The open menu closes when the viewport grows wider than this. Default: 768.
    pub breakpoint_px: f64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: 768.0,
        }
    }
}

/// Contact form rules, simulated latency and notification timing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct FormConfig {
    pub name_min_chars: usize,
    pub message_min_chars: usize,
    pub submit_latency_ms: u64,
    pub toast_visible_ms: u64,
    /// Length of the toast exit animation.
    pub toast_exit_ms: u64,
    pub messages: FormMessages,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            name_min_chars: 2,
            message_min_chars: 10,
            submit_latency_ms: 2_000,
            toast_visible_ms: 5_000,
            toast_exit_ms: 300,
            messages: FormMessages::default(),
        }
    }
}

impl FormConfig {
    #[must_use]
    pub const fn submit_latency(&self) -> Duration {
        Duration::from_millis(self.submit_latency_ms)
    }

    #[must_use]
    pub const fn toast_visible(&self) -> Duration {
        Duration::from_millis(self.toast_visible_ms)
    }

    #[must_use]
    pub const fn toast_exit(&self) -> Duration {
        Duration::from_millis(self.toast_exit_ms)
    }
}

/// When a field message is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageContext {
    Submit,
    Blur,
}

/// User-facing form strings. `{min}` is replaced by the length limit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct FormMessages {
    pub name_submit: String,
    pub name_blur: String,
    pub email_submit: String,
    pub email_blur: String,
    pub message_submit: String,
    pub message_blur: String,
    pub success: String,
    pub submit_label: String,
    pub sending_label: String,
}

impl Default for FormMessages {
    fn default() -> Self {
        Self {
            name_submit: "Please enter a valid name".into(),
            name_blur: "Name is too short".into(),
            email_submit: "Please enter a valid email".into(),
            email_blur: "Invalid email".into(),
            message_submit: "The message must be at least {min} characters".into(),
            message_blur: "Message is too short".into(),
            success: "Message sent! I'll get back to you soon.".into(),
            submit_label: "Send Message".into(),
            sending_label: "Sending...".into(),
        }
    }
}

impl FormMessages {
    /// Message for `problem` on `field`.
    #[must_use]
    pub fn for_problem(&self, field: Field, problem: FieldProblem, context: MessageContext) -> String {
        let template = match (field, context) {
            (Field::Name, MessageContext::Submit) => &self.name_submit,
            (Field::Name, MessageContext::Blur) => &self.name_blur,
            (Field::Email, MessageContext::Submit) => &self.email_submit,
            (Field::Email, MessageContext::Blur) => &self.email_blur,
            (Field::Message, MessageContext::Submit) => &self.message_submit,
            (Field::Message, MessageContext::Blur) => &self.message_blur,
        };
        match problem {
            FieldProblem::TooShort { min } => template.replace("{min}", &min.to_string()),
            FieldProblem::InvalidEmail => template.clone(),
        }
    }
}

/// Reveal animation timing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct RevealConfig {
    /// Delay between consecutive reveals in one observer batch. Default: 100.
    pub stagger_ms: u64,
    /// Delay before a visible skill bar starts filling. Default: 200.
    pub skill_bar_delay_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            stagger_ms: 100,
            skill_bar_delay_ms: 200,
        }
    }
}

impl RevealConfig {
    #[must_use]
    pub const fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }

    #[must_use]
    pub const fn skill_bar_delay(&self) -> Duration {
        Duration::from_millis(self.skill_bar_delay_ms)
    }
}
