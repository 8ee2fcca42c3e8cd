#![forbid(unsafe_code)]

//! Contact form rules and submission state.
//!
//! Validation is a pure function of `(field, value)`; nothing here knows
//! about the DOM. The page coordinator turns results into
//! [`Effect::ShowFieldError`](crate::Effect::ShowFieldError) /
//! [`Effect::ClearFieldError`](crate::Effect::ClearFieldError).

use std::sync::LazyLock;

use regex_lite::Regex;

/// Local part, `@`, and a dotted domain, with no whitespace anywhere.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// One of the three contact form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    /// Form control `name` / element `id`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

/// Why a field value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    /// Fewer than `min` characters after trimming.
    TooShort { min: usize },
    /// Not shaped like `local@domain.tld`.
    InvalidEmail,
}

/// Outcome of checking one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(FieldProblem),
}

impl Validation {
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Length limits for the free-text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRules {
    pub name_min_chars: usize,
    pub message_min_chars: usize,
}

impl Default for FieldRules {
    fn default() -> Self {
        Self {
            name_min_chars: 2,
            message_min_chars: 10,
        }
    }
}

/// Check one field value.
///
/// Name and message are trimmed and counted in chars. The email is matched
/// as given, so surrounding whitespace makes it invalid.
#[must_use]
pub fn classify_field(field: Field, value: &str, rules: &FieldRules) -> Validation {
    match field {
        Field::Name => min_chars(value, rules.name_min_chars),
        Field::Message => min_chars(value, rules.message_min_chars),
        Field::Email if EMAIL_PATTERN.is_match(value) => Validation::Valid,
        Field::Email => Validation::Invalid(FieldProblem::InvalidEmail),
    }
}

fn min_chars(value: &str, min: usize) -> Validation {
    if value.trim().chars().count() >= min {
        Validation::Valid
    } else {
        Validation::Invalid(FieldProblem::TooShort { min })
    }
}

/// Values read from the form on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    /// Every failing field, in form order. Empty means the submission may
    /// proceed.
    #[must_use]
    pub fn problems(&self, rules: &FieldRules) -> Vec<(Field, FieldProblem)> {
        Field::ALL
            .into_iter()
            .filter_map(|field| match classify_field(field, self.value(field), rules) {
                Validation::Valid => None,
                Validation::Invalid(problem) => Some((field, problem)),
            })
            .collect()
    }
}

/// Submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    /// Simulated request in flight; further submits are ignored.
    Submitting,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(field: Field, value: &str) -> bool {
        classify_field(field, value, &FieldRules::default()).is_valid()
    }

    #[test]
    fn name_needs_two_chars() {
        assert!(!check(Field::Name, ""));
        assert!(!check(Field::Name, "a"));
        assert!(!check(Field::Name, "   a  "));
        assert!(check(Field::Name, "Al"));
        assert!(check(Field::Name, "Zoë"));
    }

    #[test]
    fn name_counts_chars_not_bytes() {
        assert!(!check(Field::Name, "é"));
        assert!(check(Field::Name, "éé"));
    }

    #[test]
    fn email_shapes() {
        assert!(check(Field::Email, "a@b.c"));
        assert!(check(Field::Email, "first.last@mail.example.org"));
        assert!(!check(Field::Email, "a@b"));
        assert!(!check(Field::Email, "a.com"));
        assert!(!check(Field::Email, "a @b.c"));
        assert!(!check(Field::Email, "a@@b.c"));
        assert!(!check(Field::Email, ""));
        assert!(!check(Field::Email, " a@b.c"));
    }

    #[test]
    fn email_problem_kind() {
        assert_eq!(
            classify_field(Field::Email, "nope", &FieldRules::default()),
            Validation::Invalid(FieldProblem::InvalidEmail)
        );
    }

    #[test]
    fn message_needs_ten_chars() {
        assert!(!check(Field::Message, "123456789"));
        assert!(check(Field::Message, "1234567890"));
        assert!(!check(Field::Message, "  123456789  "));
        assert_eq!(
            classify_field(Field::Message, "short", &FieldRules::default()),
            Validation::Invalid(FieldProblem::TooShort { min: 10 })
        );
    }

    #[test]
    fn custom_rules_apply() {
        let rules = FieldRules {
            name_min_chars: 4,
            message_min_chars: 1,
        };
        assert!(!classify_field(Field::Name, "Ann", &rules).is_valid());
        assert!(classify_field(Field::Message, "k", &rules).is_valid());
    }

    #[test]
    fn field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
        assert_eq!(Field::from_name("phone"), None);
    }

    #[test]
    fn submission_lists_every_failure_in_form_order() {
        let submission = ContactSubmission::new("a", "bad", "hi");
        let fields: Vec<Field> = submission
            .problems(&FieldRules::default())
            .into_iter()
            .map(|(field, _)| field)
            .collect();
        assert_eq!(fields, vec![Field::Name, Field::Email, Field::Message]);
    }

    #[test]
    fn valid_submission_has_no_problems() {
        let submission = ContactSubmission::new("Ada", "ada@example.com", "Hello there, Ada here.");
        assert!(submission.problems(&FieldRules::default()).is_empty());
    }
}
