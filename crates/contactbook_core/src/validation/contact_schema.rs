//! Contact create/update schemas.
//!
//! # Responsibility
//! - `validate_create`: require `email` + `name`, accept optional
//!   `phone`/`company`.
//! - `validate_update`: same per-field rules with every field optional.
//!
//! # Invariants
//! - Unknown keys are ignored.
//! - `ValidationError` always carries at least one issue, in field order.

use crate::model::contact::{ContactPatch, NewContact};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum accepted `name` length in characters.
pub const NAME_MIN_CHARS: usize = 2;

pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email address";
pub const NAME_TOO_SHORT_MESSAGE: &str = "Name must be at least 2 characters";
pub const REQUIRED_MESSAGE: &str = "Required";

// Local part may not start with a dot; the `..` rule is checked separately
// because the regex engine has no look-around.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("valid email regex")
});

/// Untyped submission: field name -> raw string value.
///
/// A missing key means the field was not submitted at all.
pub type FieldMap = BTreeMap<String, String>;

/// Contact fields known to the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ContactField {
    Email,
    Name,
    Phone,
    Company,
}

impl ContactField {
    /// Wire name used in field maps and error output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Company => "company",
        }
    }
}

impl Display for ContactField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One violated field and the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: ContactField,
    pub message: &'static str,
}

/// Schema rejection carrying every violated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// All issues, ordered by field.
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Returns the issue message for `field`, if that field failed.
    pub fn message_for(&self, field: ContactField) -> Option<&'static str> {
        self.issues
            .iter()
            .find(|issue| issue.field == field)
            .map(|issue| issue.message)
    }

    /// Field names that failed, ordered by field.
    pub fn fields(&self) -> Vec<ContactField> {
        self.issues.iter().map(|issue| issue.field).collect()
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, issue) in self.issues.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", issue.field, issue.message)?;
        }
        Ok(())
    }
}

impl Error for ValidationError {}

/// Validates a create submission.
///
/// # Errors
/// - `email` missing or not a syntactically valid address.
/// - `name` missing or shorter than [`NAME_MIN_CHARS`].
pub fn validate_create(raw: &FieldMap) -> Result<NewContact, ValidationError> {
    let mut issues = Vec::new();

    let email = required(raw, ContactField::Email, &mut issues);
    if let Some(value) = email {
        check_email(value, &mut issues);
    }
    let name = required(raw, ContactField::Name, &mut issues);
    if let Some(value) = name {
        check_name(value, &mut issues);
    }

    if !issues.is_empty() {
        return Err(ValidationError { issues });
    }

    Ok(NewContact {
        email: email.unwrap_or_default().to_string(),
        name: name.unwrap_or_default().to_string(),
        phone: optional(raw, ContactField::Phone),
        company: optional(raw, ContactField::Company),
    })
}

/// Validates a partial update submission.
///
/// An empty map is valid and yields an empty patch.
pub fn validate_update(raw: &FieldMap) -> Result<ContactPatch, ValidationError> {
    let mut issues = Vec::new();

    let email = optional(raw, ContactField::Email);
    if let Some(value) = email.as_deref() {
        check_email(value, &mut issues);
    }
    let name = optional(raw, ContactField::Name);
    if let Some(value) = name.as_deref() {
        check_name(value, &mut issues);
    }

    if !issues.is_empty() {
        return Err(ValidationError { issues });
    }

    Ok(ContactPatch {
        email,
        name,
        phone: optional(raw, ContactField::Phone),
        company: optional(raw, ContactField::Company),
    })
}

/// Returns whether `value` is a syntactically valid email address.
pub fn is_valid_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_RE.is_match(value)
}

fn required<'a>(
    raw: &'a FieldMap,
    field: ContactField,
    issues: &mut Vec<FieldIssue>,
) -> Option<&'a str> {
    let value = raw.get(field.as_str()).map(String::as_str);
    if value.is_none() {
        issues.push(FieldIssue {
            field,
            message: REQUIRED_MESSAGE,
        });
    }
    value
}

fn optional(raw: &FieldMap, field: ContactField) -> Option<String> {
    raw.get(field.as_str()).cloned()
}

fn check_email(value: &str, issues: &mut Vec<FieldIssue>) {
    if !is_valid_email(value) {
        issues.push(FieldIssue {
            field: ContactField::Email,
            message: INVALID_EMAIL_MESSAGE,
        });
    }
}

fn check_name(value: &str, issues: &mut Vec<FieldIssue>) {
    if value.chars().count() < NAME_MIN_CHARS {
        issues.push(FieldIssue {
            field: ContactField::Name,
            message: NAME_TOO_SHORT_MESSAGE,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::is_valid_email;

    #[test]
    fn email_accepts_common_shapes() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(is_valid_email("o'neil@example.ie"));
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        for value in [
            "",
            "not-an-email",
            "@x.com",
            "a@",
            "a@x",
            "a@x.c",
            ".a@x.com",
            "a..b@x.com",
            "a.@x.com",
            "a@-x.com",
            "a b@x.com",
        ] {
            assert!(!is_valid_email(value), "`{value}` should be rejected");
        }
    }
}
