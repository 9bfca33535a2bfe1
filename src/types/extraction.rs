// src/types/extraction.rs
//! Wire types for the extraction service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The fields the extraction service is expected to fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeField {
    FullName,
    Email,
    Skills,
    Experience,
    Education,
}

impl ResumeField {
    /// Display order of the result cards.
    pub const ALL: [ResumeField; 5] = [
        Self::FullName,
        Self::Email,
        Self::Skills,
        Self::Experience,
        Self::Education,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::FullName => "fullname",
            Self::Email => "email",
            Self::Skills => "skills",
            Self::Experience => "experience",
            Self::Education => "education",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Email => "Email",
            Self::Skills => "Skills",
            Self::Experience => "Experience",
            Self::Education => "Education",
        }
    }
}

/// Response of `/extract/pdf` and `/extract/text`.
///
/// The service returns a loosely shaped record, so the whole JSON value is
/// kept and the known fields are read out of it on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractionResult(Value);

impl ExtractionResult {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// Text of a known field, or `None` when it is absent or empty.
    pub fn field(&self, field: ResumeField) -> Option<String> {
        self.0.get(field.key()).and_then(display_text)
    }

    /// Two-space indented JSON of the full response.
    pub fn pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

/// Card text for a field value, following browser truthiness: `null`,
/// `false`, `0` and `""` count as missing. Arrays are always shown, joined
/// with "," (an empty array gives an empty card). Objects are shown as
/// compact JSON.
fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(join_items(items)),
        other => Some(other.to_string()),
    }
}

fn join_items(items: &[Value]) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Array(nested) => join_items(nested),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Error payload of a non-success response (FastAPI style).
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Human-readable message carried by `detail`, if any.
    ///
    /// `detail` is usually a string; validation failures carry a list of
    /// objects with a `msg` entry each.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Array(items) => {
                let messages: Vec<String> = items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s.clone()),
                        other => other.get("msg").and_then(Value::as_str).map(str::to_string),
                    })
                    .collect();
                if messages.is_empty() {
                    None
                } else {
                    Some(messages.join("; "))
                }
            }
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TextExtractionRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
