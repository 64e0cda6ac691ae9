//! Schema validation for untrusted site configuration JSON.
//!
//! Parsing happens in two steps: serde checks the structure (required keys,
//! value types) and `validator` checks field contents (URLs, e-mail, blank
//! names). Both failures are reported as a [`SchemaError`]; nothing panics.

use serde_json::Value;
use thiserror::Error;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::models::SiteConfig;

/// A single field that failed content validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted JSON path, e.g. `downloads.apk.dialog.panUrl` or `sections[0].items[2].slug`.
    pub path: String,
    pub message: String,
}

/// Errors produced while validating a site configuration.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Malformed site config: {0}")]
    Malformed(String),

    #[error("Invalid site config: {}", format_fields(.0))]
    Invalid(Vec<FieldError>),
}

impl SchemaError {
    /// Paths of every offending field.
    pub fn paths(&self) -> Vec<&str> {
        match self {
            SchemaError::Malformed(_) => Vec::new(),
            SchemaError::Invalid(fields) => fields.iter().map(|f| f.path.as_str()).collect(),
        }
    }
}

fn format_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.path, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl SiteConfig {
    /// Parse and validate a configuration from an arbitrary JSON value.
    pub fn from_value(raw: Value) -> Result<Self, SchemaError> {
        if !raw.is_object() {
            return Err(SchemaError::Malformed(format!(
                "expected a JSON object, found {}",
                json_kind(&raw)
            )));
        }

        let config: SiteConfig =
            serde_json::from_value(raw).map_err(|e| SchemaError::Malformed(e.to_string()))?;

        config
            .validate()
            .map_err(|errors| SchemaError::Invalid(flatten_errors(&errors)))?;

        Ok(config)
    }

    /// Parse and validate a configuration from JSON text.
    pub fn from_json_str(raw: &str) -> Result<Self, SchemaError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| SchemaError::Malformed(e.to_string()))?;
        Self::from_value(value)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Flatten nested validator errors into sorted path/message pairs.
pub fn flatten_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect_errors(errors, "", &mut out);
    out.sort_by(|a, b| a.path.cmp(&b.path));
    out
}

fn collect_errors(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let field = to_camel_case(&field.to_string());
        let path = if prefix.is_empty() {
            field
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for e in field_errors {
                    out.push(FieldError {
                        path: path.clone(),
                        message: e
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string()),
                    });
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_errors(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_errors(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

/// Validator reports Rust field names; the wire format is camelCase.
fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
