use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A saved job description as listed by `GET /jds`.
/// Only the name is used as a key; the content stays on the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JdEntry {
    pub name: String,
    #[serde(default, deserialize_with = "super::deserialize_optional_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl JdEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timestamp: None,
        }
    }
}
