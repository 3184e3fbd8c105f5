//! User domain model

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Server-assigned user identifier
///
/// The users API hands out numeric ids, but nothing on the client depends on
/// that, so ids are held as opaque text and accepted as either a JSON number
/// or a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        let value: JsonValue = Deserialize::deserialize(deserializer)?;
        match value {
            JsonValue::Number(n) => Ok(Self(n.to_string())),
            JsonValue::String(s) if !s.is_empty() => Ok(Self(s)),
            _ => Err(D::Error::custom("expected number or non-empty string for id")),
        }
    }
}

/// One account record as returned by the users API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_phone")]
    pub phone: Option<String>,
}

/// Placeholder shown for a missing phone number
pub const PHONE_PLACEHOLDER: &str = "-";

impl User {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            phone: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = normalize_phone(Some(phone.into()));
        self
    }

    /// Phone number, or the placeholder when absent
    pub fn phone_or_placeholder(&self) -> &str {
        self.phone.as_deref().unwrap_or(PHONE_PLACEHOLDER)
    }

    /// Case-insensitive substring match on name and email
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
    }
}

/// Mutation body for create and update requests: `{name, email, phone}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl UserPayload {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: Option<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: normalize_phone(phone),
        }
    }

    /// Materialize the payload as a stored user under `id`
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
        }
    }
}

/// Blank phone numbers are treated as absent
pub(crate) fn normalize_phone(phone: Option<String>) -> Option<String> {
    phone
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
}

fn deserialize_phone<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(normalize_phone(value))
}
