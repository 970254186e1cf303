// src/extractors/attribute.rs

// --- Imports ---
use serde::{Deserialize, Serialize};
use serde_json::Number;

// --- Constants ---
// pdfinfo field names that get friendlier record keys
const RENAMES: &[(&str, &str)] = &[
    ("creationdate", "created"),
    ("moddate", "modified"),
];

// --- Data Structures ---

/// A value as it lands in the metadata record.
///
/// Serialized untagged, so a record renders as a plain JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypedValue {
    String(String),
    Number(Number),
    /// Only ever `false`: pdfinfo's "no".
    Bool(bool),
    /// pdfinfo's "none".
    Null,
}

impl TypedValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TypedValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TypedValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TypedValue::Null)
    }
}

/// One renamed and coerced `Key: Value` line.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedAttribute {
    pub name: String,
    pub value: TypedValue,
}

// --- Coercion ---

/// Lower-cases a raw pdfinfo key and turns each whitespace character into `_`.
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Maps an already-normalized key through the rename table.
pub fn rename_key(key: &str) -> &str {
    RENAMES
        .iter()
        .find(|(from, _)| *from == key)
        .map(|(_, to)| *to)
        .unwrap_or(key)
}

/// Converts a full-string numeric literal; partial matches and non-finite values are rejected.
fn parse_number(value: &str) -> Option<Number> {
    if value.is_empty() {
        return None;
    }
    if let Ok(int) = value.parse::<i64>() {
        return Some(Number::from(int));
    }
    value.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Turns one `(key, value)` pair into a typed attribute. Pure and infallible.
pub fn coerce(key: &str, value: &str) -> TypedAttribute {
    let name = rename_key(key).to_string();

    let value = match value {
        "no" => TypedValue::Bool(false),
        "none" => TypedValue::Null,
        other => parse_number(other)
            .map(TypedValue::Number)
            .unwrap_or_else(|| TypedValue::String(other.to_string())),
    };

    TypedAttribute { name, value }
}
