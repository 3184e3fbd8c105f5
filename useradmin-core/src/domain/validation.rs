//! Form validation gate
//!
//! Runs synchronously on submit, before any request is issued. Every rule is
//! evaluated so the form can show one message per invalid field.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::user::{UserId, UserPayload};

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const NAME_MIN_CHARS: usize = 2;

pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters";
pub const EMAIL_INVALID: &str = "Invalid email format";

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

/// Validated form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Email,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
        }
    }
}

/// Raw values of the add/edit form, exactly as typed
///
/// `id` is the hidden id field: blank in create mode, the edited user's id in
/// edit mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Field-level validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.values().map(String::as_str).collect();
        f.write_str(&messages.join("; "))
    }
}

/// A form that passed validation, ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUser {
    /// Present in edit mode; selects update over create
    pub id: Option<UserId>,
    pub payload: UserPayload,
}

/// Validate form values
///
/// Name and email are trimmed before the checks; the trimmed values are what
/// gets sent.
pub fn validate(values: &FormValues) -> std::result::Result<ValidatedUser, FieldErrors> {
    let name = values.name.trim();
    let email = values.email.trim();

    let mut errors = FieldErrors::default();
    if name.chars().count() < NAME_MIN_CHARS {
        errors.insert(FormField::Name, NAME_TOO_SHORT);
    }
    if !email_regex().is_match(email) {
        errors.insert(FormField::Email, EMAIL_INVALID);
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    let id = values.id.trim();
    Ok(ValidatedUser {
        id: (!id.is_empty()).then(|| UserId::new(id)),
        payload: UserPayload::new(name, email, Some(values.phone.clone())),
    })
}
