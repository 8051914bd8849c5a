use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::errors::{BanterError, BanterResult};

/// A weighted edge recording that the owning statement was observed as a
/// reply to another statement's text.
///
/// The link carries no back-reference to its owner; it names only the prompt
/// text and how often the reply was seen.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseLink {
    /// Text of the statement being pointed to (the prompt).
    text: String,
    /// Number of observed times the owning statement answered this prompt.
    occurrence: u32,
}

impl ResponseLink {
    /// Create a link for a single observation (occurrence 1).
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            occurrence: 1,
        }
    }

    /// Create a link with an explicit occurrence count, e.g. when loading
    /// from storage.
    pub fn with_occurrence(text: impl Into<String>, occurrence: u32) -> Self {
        Self {
            text: text.into(),
            occurrence,
        }
    }

    /// Parse a link from its serialized record shape
    /// `{ "text": string, "occurrence": integer }`.
    ///
    /// A missing `occurrence` defaults to 1. Anything else malformed fails
    /// with [`BanterError::InvalidLink`].
    pub fn from_value(value: &Value) -> BanterResult<Self> {
        let record = value.as_object().ok_or_else(|| BanterError::InvalidLink {
            reason: format!("expected a response object, got {value}"),
        })?;

        let text = record
            .get("text")
            .and_then(Value::as_str)
            .ok_or_else(|| BanterError::InvalidLink {
                reason: "response text must be a string".to_string(),
            })?;

        let occurrence = match record.get("occurrence") {
            None => 1,
            Some(raw) => raw
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| BanterError::InvalidLink {
                    reason: format!("occurrence must be a non-negative integer, got {raw}"),
                })?,
        };

        Ok(Self::with_occurrence(text, occurrence))
    }

    /// The prompt text this link points to.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// How many times the owning statement answered this prompt.
    pub fn occurrence(&self) -> u32 {
        self.occurrence
    }

    /// Record one more observation.
    pub fn increment(&mut self) {
        self.occurrence = self.occurrence.saturating_add(1);
    }

    /// Overwrite the occurrence count (replace semantics, used when merging
    /// storage state).
    pub fn set_occurrence(&mut self, occurrence: u32) {
        self.occurrence = occurrence;
    }
}

/// Identity equality: two links are equal if they point at the same text.
///
/// A link's identity is the text it points to, not its weight; the
/// statement-level deduplication invariant (at most one link per distinct
/// text) reads as plain equality.
impl PartialEq for ResponseLink {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for ResponseLink {}

impl fmt::Display for ResponseLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
