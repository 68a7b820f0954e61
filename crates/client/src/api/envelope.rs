//! JSON envelopes returned by the REST API.

use serde::Deserialize;
use serde_json::Value;

/// Server-side error payload: a single string, a list, or field → message(s).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ServerErrors {
    One(String),
    Many(Vec<String>),
    Fields(serde_json::Map<String, Value>),
}

impl ServerErrors {
    pub fn is_empty(&self) -> bool {
        match self {
            ServerErrors::One(s) => s.trim().is_empty(),
            ServerErrors::Many(v) => v.is_empty(),
            ServerErrors::Fields(m) => m.is_empty(),
        }
    }

    /// Flatten into one human-readable line.
    pub fn joined(&self) -> String {
        match self {
            ServerErrors::One(s) => s.clone(),
            ServerErrors::Many(v) => v.join(", "),
            ServerErrors::Fields(m) => m
                .iter()
                .map(|(field, msg)| match msg {
                    Value::String(s) => format!("{field}: {s}"),
                    Value::Array(items) => format!(
                        "{field}: {}",
                        items
                            .iter()
                            .map(|i| i.as_str().map(str::to_string).unwrap_or_else(|| i.to_string()))
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                    other => format!("{field}: {other}"),
                })
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

/// `{ data, errors?, message? }` envelope for details and mutations.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<ServerErrors>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Envelope {
    /// Server message for an error case: `message`, else joined `errors`.
    pub fn error_message(&self) -> Option<String> {
        self.message
            .as_ref()
            .filter(|m| !m.trim().is_empty())
            .cloned()
            .or_else(|| {
                self.errors
                    .as_ref()
                    .filter(|e| !e.is_empty())
                    .map(ServerErrors::joined)
            })
    }

    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|e| !e.is_empty())
    }
}
