use crate::models::{BookingField, BookingForm};
use regex::Regex;
use std::fmt;

/// Why an input refused the value it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputIssue {
    /// Required input left blank
    Missing(BookingField),

    /// Value does not match the input's type (email, tel, date, time)
    Malformed(BookingField),
}

impl InputIssue {
    pub fn field(&self) -> BookingField {
        match self {
            InputIssue::Missing(field) | InputIssue::Malformed(field) => *field,
        }
    }
}

impl fmt::Display for InputIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputIssue::Missing(field) => write!(f, "{} is required", field.label()),
            InputIssue::Malformed(field) => write!(f, "{} is not valid", field.label()),
        }
    }
}

/// Input-layer checks applied before the form may be submitted.
///
/// Mirrors what the browser enforces on the homepage form: every field but the
/// service picker is `required`, and the email, phone, date and time inputs
/// only accept values of their type.
///
/// # Fields
///
/// Patterns are compiled once at construction:
///
/// - `email_pattern`: `local@domain.tld`, no whitespace
/// - `phone_pattern`: digits with optional leading `+` and spaces, dashes or parentheses
/// - `date_pattern`: `YYYY-MM-DD`
/// - `time_pattern`: `HH:MM` on a 24h clock
pub struct InputValidator {
    email_pattern: Regex,
    phone_pattern: Regex,
    date_pattern: Regex,
    time_pattern: Regex,
}

impl InputValidator {
    pub fn new() -> Self {
        Self {
            email_pattern: Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"),
            phone_pattern: Regex::new(r"^\+?[0-9][0-9 ()\-]{5,}$").expect("Invalid phone regex"),
            date_pattern: Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$")
                .expect("Invalid date regex"),
            time_pattern: Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("Invalid time regex"),
        }
    }

    /// Check a single field value.
    ///
    /// `required` only rejects an empty value; patterns are matched against
    /// the trimmed value.
    pub fn check_field(&self, field: BookingField, value: &str) -> Option<InputIssue> {
        if field.is_required() && value.is_empty() {
            return Some(InputIssue::Missing(field));
        }
        let value = value.trim();

        let pattern = match field {
            BookingField::Email => &self.email_pattern,
            BookingField::Phone => &self.phone_pattern,
            BookingField::Date => &self.date_pattern,
            BookingField::Time => &self.time_pattern,
            BookingField::Name | BookingField::Service => return None,
        };

        if pattern.is_match(value) {
            None
        } else {
            Some(InputIssue::Malformed(field))
        }
    }

    /// Check the whole form; an empty result means it may be submitted.
    pub fn validate(&self, form: &BookingForm) -> Vec<InputIssue> {
        BookingField::ALL
            .into_iter()
            .filter_map(|field| self.check_field(field, form.get(field)))
            .collect()
    }
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServiceKind;

    fn valid_form() -> BookingForm {
        BookingForm {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "+91 98765-43210".to_string(),
            service: ServiceKind::Xray,
            date: "2026-11-02".to_string(),
            time: "09:15".to_string(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let validator = InputValidator::new();
        assert!(validator.validate(&valid_form()).is_empty());
    }

    #[test]
    fn test_empty_form_reports_required_fields() {
        let validator = InputValidator::new();
        let issues = validator.validate(&BookingForm::default());

        assert_eq!(issues.len(), 5);
        assert!(issues.iter().all(|i| matches!(i, InputIssue::Missing(_))));
        assert!(!issues.iter().any(|i| i.field() == BookingField::Service));
    }

    #[test]
    fn test_malformed_values() {
        let validator = InputValidator::new();

        assert_eq!(
            validator.check_field(BookingField::Email, "asha.example.com"),
            Some(InputIssue::Malformed(BookingField::Email))
        );
        assert_eq!(
            validator.check_field(BookingField::Phone, "call me"),
            Some(InputIssue::Malformed(BookingField::Phone))
        );
        assert_eq!(
            validator.check_field(BookingField::Date, "02/11/2026"),
            Some(InputIssue::Malformed(BookingField::Date))
        );
        assert_eq!(
            validator.check_field(BookingField::Time, "24:00"),
            Some(InputIssue::Malformed(BookingField::Time))
        );
    }

    #[test]
    fn test_whitespace_satisfies_required() {
        let validator = InputValidator::new();

        assert_eq!(validator.check_field(BookingField::Name, "   "), None);
        assert_eq!(
            validator.check_field(BookingField::Email, "   "),
            Some(InputIssue::Malformed(BookingField::Email))
        );
        assert_eq!(validator.check_field(BookingField::Time, " 09:15 "), None);
    }

    #[test]
    fn test_issue_display_uses_labels() {
        assert_eq!(
            InputIssue::Missing(BookingField::Name).to_string(),
            "Full Name is required"
        );
        assert_eq!(
            InputIssue::Malformed(BookingField::Email).to_string(),
            "Email Address is not valid"
        );
    }
}
