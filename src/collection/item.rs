//! Request items and their event handlers.
//!
//! Only the fields the linearizer works with are typed. Everything else an item
//! carries in the document is kept in `rest` and written back untouched.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Listener kind of the event handler that holds test scripts.
pub const TEST_LISTENER: &str = "test";

/// Opaque item identity, unique within one collection read.
///
/// Taken from the document when present, generated otherwise, so it is not
/// stable across reads and never used to resolve jump targets.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A leaf of the collection tree: one request plus its scripts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestItem {
    /// Run-local identity, generated when the document has no `id`.
    #[serde(skip)]
    pub id: ItemId,
    /// `id` as written in the document; generated ids are never written out.
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    pub name: String,
    pub request: Value,
    #[serde(rename = "event", skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub listen: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<Script>,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl Event {
    pub fn is_test(&self) -> bool {
        self.listen == TEST_LISTENER
    }
}

/// Script body as a mutable line buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default, deserialize_with = "deserialize_exec")]
    pub exec: Vec<String>,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl Script {
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exec: lines.into_iter().map(Into::into).collect(),
            rest: Map::new(),
        }
    }
}

/// `exec` shapes found in exported collections.
#[derive(Deserialize)]
#[serde(untagged)]
enum ExecSpec {
    Lines(Vec<String>),
    // Older exports store the whole script as one string.
    Text(String),
}

fn deserialize_exec<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<ExecSpec>::deserialize(deserializer)? {
        Some(ExecSpec::Lines(lines)) => lines,
        Some(ExecSpec::Text(text)) => text.split('\n').map(str::to_string).collect(),
        None => Vec::new(),
    })
}
