//! The structured-output contract for a résumé analysis.
//!
//! `analysis_schema()` is derived from [`AnalysisResult`] with `schemars`, so the
//! records and the contract cannot drift. It is sent to the model as the response
//! constraint (via `gemini_schema()`) and every response is checked against it with
//! `validate_against_schema()` before being deserialized.

use std::sync::OnceLock;

use schemars::gen::SchemaSettings;
use serde_json::{json, Value};
use thiserror::Error;

use crate::analysis::result::AnalysisResult;

/// Required top-level sections, in display order.
#[cfg(test)]
pub const TOP_LEVEL_SECTIONS: [&str; 9] = [
    "candidate_info",
    "ats_analysis",
    "market_intel",
    "advanced_insights",
    "recruiter_review",
    "resume_tailoring",
    "skill_gap_analysis",
    "interview_prep",
    "career_roadmap",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("missing required field `{0}`")]
    MissingField(String),

    #[error("field `{path}` should be of type {expected}")]
    WrongType { path: String, expected: String },

    #[error("field `{path}` has value {value:?}, expected one of {allowed:?}")]
    NotInEnum {
        path: String,
        value: String,
        allowed: Vec<String>,
    },
}

/// Generates the contract from the typed records, with every nested record inlined
/// (the model endpoint does not follow `$ref`).
fn build_schema() -> Value {
    let generator = SchemaSettings::draft07()
        .with(|settings| {
            settings.inline_subschemas = true;
        })
        .into_generator();
    let root = generator.into_root_schema_for::<AnalysisResult>();

    let mut schema = json!(root.schema);
    if let Some(map) = schema.as_object_mut() {
        map.remove("title");
    }
    schema
}

/// The canonical schema, in JSON Schema vocabulary (lower-case type names).
pub fn analysis_schema() -> &'static Value {
    static SCHEMA: OnceLock<Value> = OnceLock::new();
    SCHEMA.get_or_init(build_schema)
}

/// The canonical schema in Gemini's `responseSchema` dialect.
pub fn gemini_schema() -> &'static Value {
    static SCHEMA: OnceLock<Value> = OnceLock::new();
    SCHEMA.get_or_init(|| to_gemini_schema(analysis_schema()))
}

/// Gemini's OpenAPI subset spells type names in upper case (`OBJECT`, `STRING`, ...).
pub fn to_gemini_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    let converted = match (key.as_str(), value) {
                        ("type", Value::String(t)) => Value::String(t.to_uppercase()),
                        _ => to_gemini_schema(value),
                    };
                    (key.clone(), converted)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(to_gemini_schema).collect()),
        other => other.clone(),
    }
}

/// Checks `value` against `schema`, returning the first violation found.
pub fn validate_against_schema(value: &Value, schema: &Value) -> Result<(), SchemaViolation> {
    validate_node(value, schema, "")
}

fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn wrong_type(path: &str, expected: &str) -> SchemaViolation {
    SchemaViolation::WrongType {
        path: if path.is_empty() { "<root>".to_string() } else { path.to_string() },
        expected: expected.to_string(),
    }
}

fn validate_node(value: &Value, schema: &Value, path: &str) -> Result<(), SchemaViolation> {
    let Some(expected) = schema.get("type").and_then(Value::as_str) else {
        return Ok(());
    };

    match expected {
        "object" => {
            let obj = value.as_object().ok_or_else(|| wrong_type(path, expected))?;
            if let Some(required) = schema.get("required").and_then(Value::as_array) {
                for key in required.iter().filter_map(Value::as_str) {
                    if !obj.contains_key(key) {
                        return Err(SchemaViolation::MissingField(child_path(path, key)));
                    }
                }
            }
            if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
                for (key, sub_schema) in properties {
                    if let Some(child) = obj.get(key) {
                        validate_node(child, sub_schema, &child_path(path, key))?;
                    }
                }
            }
        }
        "array" => {
            let items = value.as_array().ok_or_else(|| wrong_type(path, expected))?;
            if let Some(item_schema) = schema.get("items") {
                for (i, item) in items.iter().enumerate() {
                    validate_node(item, item_schema, &format!("{path}[{i}]"))?;
                }
            }
        }
        "string" => {
            let s = value.as_str().ok_or_else(|| wrong_type(path, expected))?;
            if let Some(allowed) = schema.get("enum").and_then(Value::as_array) {
                if !allowed.iter().any(|a| a.as_str() == Some(s)) {
                    return Err(SchemaViolation::NotInEnum {
                        path: path.to_string(),
                        value: s.to_string(),
                        allowed: allowed
                            .iter()
                            .filter_map(Value::as_str)
                            .map(String::from)
                            .collect(),
                    });
                }
            }
        }
        "integer" => {
            if !(value.is_i64() || value.is_u64()) {
                return Err(wrong_type(path, expected));
            }
        }
        "number" => {
            if !value.is_number() {
                return Err(wrong_type(path, expected));
            }
        }
        "boolean" => {
            if !value.is_boolean() {
                return Err(wrong_type(path, expected));
            }
        }
        _ => {}
    }

    Ok(())
}
