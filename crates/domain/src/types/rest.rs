//! Request and response shapes for the REST-over-database gateway

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query-string filters for a REST resource.
///
/// Filters use the gateway's operator syntax: `col=eq.value`,
/// `col=in.(a,b)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestQuery {
    params: Vec<(String, String)>,
}

impl RestQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns to return (`select=id,email`).
    #[must_use]
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".into(), columns.into()));
        self
    }

    #[must_use]
    pub fn eq(mut self, column: &str, value: impl std::fmt::Display) -> Self {
        self.params.push((column.into(), format!("eq.{value}")));
        self
    }

    #[must_use]
    pub fn in_list<S: AsRef<str>>(mut self, column: &str, values: &[S]) -> Self {
        let joined = values.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");
        self.params.push((column.into(), format!("in.({joined})")));
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.params.push(("limit".into(), limit.to_string()));
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Value of the first parameter named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

/// Options for inserts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertOptions {
    /// Conflict columns; turns the insert into a merge-duplicates upsert
    pub on_conflict: Option<String>,
    /// Ask the gateway to echo inserted rows
    pub return_representation: bool,
}

impl InsertOptions {
    /// Plain insert that returns the created rows.
    pub fn representation() -> Self {
        Self { on_conflict: None, return_representation: true }
    }

    /// Upsert on `columns`, returning the affected rows.
    pub fn upsert(columns: &str) -> Self {
        Self { on_conflict: Some(columns.to_string()), return_representation: true }
    }

    /// Insert without asking for a representation.
    pub fn minimal() -> Self {
        Self::default()
    }
}

/// Status and decoded body of a REST call.
///
/// Non-2xx statuses are data, not errors: callers branch on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestResponse {
    pub status: u16,
    /// Parsed JSON, or a JSON string holding the raw text
    pub body: Value,
}

impl RestResponse {
    pub const fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// 200 or 201, the statuses the seed flows accept.
    pub const fn is_ok_or_created(&self) -> bool {
        self.status == 200 || self.status == 201
    }

    /// Rows of an array body; empty for anything else.
    pub fn rows(&self) -> &[Value] {
        self.body.as_array().map_or(&[], Vec::as_slice)
    }

    /// `id` of the first row of a successful array response.
    pub fn first_id(&self) -> Option<String> {
        if self.status != 200 && self.status != 201 {
            return None;
        }
        self.rows().first().and_then(|row| row.get("id")).and_then(value_as_id)
    }
}

/// Ids come back as UUID strings; tolerate numeric keys as well.
pub fn value_as_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
