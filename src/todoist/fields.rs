//! Request field helpers shared by every tool handler.
//!
//! `Fields` builds a partial record: a key is present only when the caller
//! supplied a value for it. `Some(false)`, `Some(0)` and `Some("")` are
//! supplied values and are kept; `None` is the only absent marker.
//!
//! Query strings are stricter: [`query_pairs`] drops every falsy value before
//! the URL is built, so `limit = 0` never reaches the upstream service.

use serde::Serialize;
use serde_json::{Map, Value};

pub type JsonObject = Map<String, Value>;

/// Partial record builder for request bodies and query parameters.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Fields(JsonObject);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always include `key`.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Include `key` only when the caller supplied a value.
    pub fn with_opt<V: Into<Value>>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.0.insert(key.to_string(), value.into());
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_body(self) -> Value {
        Value::Object(self.0)
    }

    pub fn into_query(self) -> JsonObject {
        self.0
    }
}

/// JavaScript-style truthiness used when building query strings.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Convert query parameters to URL pairs, dropping falsy values.
///
/// Arrays are joined with commas (the upstream `ids` filter format).
pub fn query_pairs(query: &JsonObject) -> Vec<(String, String)> {
    query
        .iter()
        .filter(|(_, v)| is_truthy(v))
        .map(|(k, v)| (k.clone(), query_value(v)))
        .collect()
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(query_value)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

/// `/<collection>/<id>` with `id` percent-encoded as a single path segment.
///
/// Returns `None` for ids that cannot name one resource: empty, `.` or `..`.
pub fn resource_path(collection: &str, id: &str) -> Option<String> {
    if matches!(id, "" | "." | "..") {
        return None;
    }
    Some(format!("/{}/{}", collection, urlencoding::encode(id)))
}

/// Target location for a task move. At least one field is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl Destination {
    /// Returns `None` when no destination field is supplied. Empty strings
    /// count as absent.
    pub fn from_parts(
        project_id: Option<String>,
        section_id: Option<String>,
        parent_id: Option<String>,
    ) -> Option<Self> {
        let project_id = project_id.filter(|id| !id.is_empty());
        let section_id = section_id.filter(|id| !id.is_empty());
        let parent_id = parent_id.filter(|id| !id.is_empty());
        if project_id.is_none() && section_id.is_none() && parent_id.is_none() {
            return None;
        }
        Some(Self {
            project_id,
            section_id,
            parent_id,
        })
    }

    /// Build the `item_move` command arguments for `task_id`.
    pub fn move_args(&self, task_id: &str) -> Value {
        Fields::new()
            .with("id", task_id)
            .with_opt("project_id", self.project_id.clone())
            .with_opt("section_id", self.section_id.clone())
            .with_opt("parent_id", self.parent_id.clone())
            .into_body()
    }
}
