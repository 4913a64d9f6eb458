//! Structured validation of JSON request bodies
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.2.0
//!
//! ## Changelog
//! - 1.0.0: Field-level issue collection for object payloads

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One problem found in a request body.
///
/// `path` names the offending field (empty for the body itself).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub path: Vec<String>,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: &[&str], message: impl Into<String>) -> Self {
        ValidationIssue {
            path: path.iter().map(|p| p.to_string()).collect(),
            message: message.into(),
        }
    }

    /// Issue that concerns the whole body
    pub fn root(message: impl Into<String>) -> Self {
        Self::new(&[], message)
    }
}

/// Human-readable kind of a JSON value, as used in issue messages
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Collects every field problem of an object payload instead of stopping at
/// the first one.
///
/// ```ignore
/// let mut v = ObjectValidator::new(&body);
/// let message = v.string("message");
/// let persona = v.string("personaType");
/// let issues = v.into_issues();
/// ```
pub struct ObjectValidator<'a> {
    object: Option<&'a Map<String, Value>>,
    issues: Vec<ValidationIssue>,
}

impl<'a> ObjectValidator<'a> {
    pub fn new(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => ObjectValidator {
                object: Some(map),
                issues: Vec::new(),
            },
            other => ObjectValidator {
                object: None,
                issues: vec![ValidationIssue::root(format!(
                    "Expected object, received {}",
                    json_kind(other)
                ))],
            },
        }
    }

    /// Required string field
    pub fn string(&mut self, field: &str) -> Option<String> {
        match self.field(field)? {
            Value::String(s) => Some(s.clone()),
            other => {
                self.type_mismatch(field, "string", other);
                None
            }
        }
    }

    /// Required integer field (floats are rejected)
    pub fn integer(&mut self, field: &str) -> Option<i64> {
        match self.field(field)? {
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(i),
                None => {
                    let message = if n.is_f64() {
                        "Expected integer, received float"
                    } else {
                        "Integer out of range"
                    };
                    self.issues.push(ValidationIssue::new(&[field], message));
                    None
                }
            },
            other => {
                self.type_mismatch(field, "integer", other);
                None
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }

    fn field(&mut self, field: &str) -> Option<&'a Value> {
        // A non-object body was already reported once
        let object = self.object?;
        match object.get(field) {
            Some(Value::Null) | None => {
                self.issues.push(ValidationIssue::new(&[field], "Required"));
                None
            }
            Some(value) => Some(value),
        }
    }

    fn type_mismatch(&mut self, field: &str, expected: &str, got: &Value) {
        self.issues.push(ValidationIssue::new(
            &[field],
            format!("Expected {expected}, received {}", json_kind(got)),
        ));
    }
}
