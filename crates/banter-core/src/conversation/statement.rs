use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::link::ResponseLink;
use crate::errors::BanterResult;

/// Record keys owned by the statement itself; extra data may not shadow them.
const RESERVED_KEYS: [&str; 2] = ["text", "in_response_to"];

/// A single spoken entity: a sentence or phrase someone can say, together
/// with the set of prompts it has been observed answering.
///
/// The text is the statement's identity within a corpus: two statements with
/// equal text are the same entity. The response links are kept private so
/// every construction path re-establishes the deduplication invariant (at
/// most one link per distinct prompt text).
#[derive(Debug, Clone)]
pub struct Statement {
    /// The utterance content; the natural identity key.
    text: String,
    /// Prompts this statement has answered, in insertion order, deduplicated
    /// by prompt text.
    in_response_to: Vec<ResponseLink>,
    /// Open extension point, serialized flattened at the top level. Not used
    /// by the matching algorithm.
    extra: Map<String, Value>,
}

/// Intermediate shape for deserialization; unknown keys collect into `extra`,
/// so the reserved keys can never leak into the extension map.
#[derive(Deserialize)]
struct StatementRecord {
    text: String,
    #[serde(default)]
    in_response_to: Vec<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Statement {
    /// Create a statement with no recorded prompts and no extra data.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            in_response_to: Vec::new(),
            extra: Map::new(),
        }
    }

    /// The utterance content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The prompts this statement has been observed answering.
    pub fn in_response_to(&self) -> &[ResponseLink] {
        &self.in_response_to
    }

    /// Whether a link to `text` is on record.
    pub fn responds_to(&self, text: &str) -> bool {
        self.in_response_to.iter().any(|link| link.text() == text)
    }

    /// Record one observation of this statement answering the link's prompt.
    ///
    /// If a link with the same text already exists its occurrence is
    /// incremented by one; otherwise the link is appended keeping the
    /// occurrence it carries.
    pub fn add_response(&mut self, link: ResponseLink) {
        match self.link_position(link.text()) {
            Some(index) => self.in_response_to[index].increment(),
            None => self.in_response_to.push(link),
        }
    }

    /// Merge a link using replace semantics: an existing link's occurrence is
    /// overwritten with the given value instead of incremented.
    ///
    /// This is the primitive storage backends use when reconciling persisted
    /// state, where the caller has already computed the final count.
    pub fn upsert_response(&mut self, link: ResponseLink) {
        match self.link_position(link.text()) {
            Some(index) => self.in_response_to[index].set_occurrence(link.occurrence()),
            None => self.in_response_to.push(link),
        }
    }

    /// Remove the link matching `text`. Returns whether a removal occurred.
    pub fn remove_response(&mut self, text: &str) -> bool {
        match self.link_position(text) {
            Some(index) => {
                self.in_response_to.remove(index);
                true
            }
            None => false,
        }
    }

    /// Occurrence of the link matching the other statement's text, or 0 if
    /// this statement was never observed answering it.
    pub fn get_response_count(&self, other: &Statement) -> u32 {
        self.in_response_to
            .iter()
            .find(|link| link.text() == other.text())
            .map(|link| link.occurrence())
            .unwrap_or(0)
    }

    /// Attach extension data under `key`.
    ///
    /// Returns false (and stores nothing) when `key` is one of the reserved
    /// record keys `text` / `in_response_to`.
    pub fn set_extra(&mut self, key: impl Into<String>, value: Value) -> bool {
        let key = key.into();
        if RESERVED_KEYS.contains(&key.as_str()) {
            return false;
        }
        self.extra.insert(key, value);
        true
    }

    /// Look up extension data by key.
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// All extension data, keyed as it will appear in the serialized record.
    pub fn extra_data(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Snapshot this statement as a value-object record:
    /// `{ "text", "in_response_to": [ { "text", "occurrence" } ], ...extra }`.
    ///
    /// Extra data is merged at the top level; [`Statement::from_value`]
    /// round-trips the result.
    pub fn serialize(&self) -> Value {
        let mut record = Map::new();
        record.insert("text".to_string(), Value::String(self.text.clone()));
        let links: Vec<Value> = self
            .in_response_to
            .iter()
            .map(|link| json!({ "text": link.text(), "occurrence": link.occurrence() }))
            .collect();
        record.insert("in_response_to".to_string(), Value::Array(links));
        for (key, value) in &self.extra {
            record.insert(key.clone(), value.clone());
        }
        Value::Object(record)
    }

    /// Reconstruct a statement from its serialized record shape.
    ///
    /// The deduplication invariant is re-established on the way in: duplicate
    /// prompt texts in foreign input are merged by summing their occurrence
    /// counts. A malformed `in_response_to` entry fails with
    /// [`crate::errors::BanterError::InvalidLink`]; any other shape problem
    /// surfaces as a serialization error.
    pub fn from_value(value: Value) -> BanterResult<Self> {
        let record: StatementRecord = serde_json::from_value(value)?;
        let mut statement = Statement::new(record.text);
        statement.extra = record.extra;
        for entry in &record.in_response_to {
            let link = ResponseLink::from_value(entry)?;
            statement.merge_response(link);
        }
        Ok(statement)
    }

    /// Merge semantics for foreign input: duplicate texts sum occurrences.
    fn merge_response(&mut self, link: ResponseLink) {
        match self.link_position(link.text()) {
            Some(index) => {
                let existing = &mut self.in_response_to[index];
                existing.set_occurrence(existing.occurrence().saturating_add(link.occurrence()));
            }
            None => self.in_response_to.push(link),
        }
    }

    fn link_position(&self, text: &str) -> Option<usize> {
        self.in_response_to.iter().position(|link| link.text() == text)
    }
}

/// Identity equality: two statements are equal if they have the same text.
///
/// Response links and extra data are content, not identity; a statement
/// loaded from storage compares equal to a freshly constructed one with the
/// same text.
impl PartialEq for Statement {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Statement {}

/// Hash must agree with the text-only equality.
impl Hash for Statement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
