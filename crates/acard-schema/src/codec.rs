//! # Wire Codec
//!
//! Text to typed tree and back. Decoding is two-phase: the text is parsed
//! into an untyped tree, then the [`Validator`] checks and materializes it.
//! A syntax failure is [`SchemaError::MalformedInput`] and never reaches the
//! validator, so callers can tell "not JSON at all" from "JSON that is not a
//! card".
//!
//! Encoding writes fields in declaration order, omits absent optional
//! fields and empty optional lists, and ends with a newline. JSON output
//! is pretty-printed with two-space indentation.

use std::fmt;
use std::path::Path;

use acard_core::{DocPath, DocumentNode, RawDocument};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::validate::Validator;

/// Supported text formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireFormat {
    Json,
    /// Same tree as JSON; converted into the JSON data model before validation.
    Yaml,
}

impl WireFormat {
    /// Pick the format from a file extension: `.yaml`/`.yml` is YAML,
    /// anything else JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse text into an untyped value without validating it.
///
/// # Errors
///
/// Returns `SchemaError::MalformedInput` if the text is not well-formed.
pub fn parse(text: &str, format: WireFormat) -> Result<Value, SchemaError> {
    let malformed = |reason: String| SchemaError::MalformedInput { format, reason };
    match format {
        WireFormat::Json => serde_json::from_str(text).map_err(|e| malformed(e.to_string())),
        WireFormat::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(text).map_err(|e| malformed(e.to_string()))?;
            yaml_to_json(&yaml)
        }
    }
}

/// Parse and validate text as a node of kind `T`.
///
/// # Errors
///
/// Returns `SchemaError::MalformedInput` for syntax errors and
/// `SchemaError::ValidationFailed` for documents that parse but do not
/// conform.
pub fn decode<T: DocumentNode>(
    text: &str,
    format: WireFormat,
    validator: &Validator,
) -> Result<T, SchemaError> {
    let value = parse(text, format)?;
    let (doc, root) = RawDocument::from_json(&value);
    validator.validate_as(&doc, root)
}

/// Read, parse and validate a document file. The format follows the
/// file extension.
///
/// # Errors
///
/// Returns `SchemaError::DocumentLoadError` if the file cannot be read,
/// otherwise as [`decode`].
pub fn decode_file<T: DocumentNode>(path: &Path, validator: &Validator) -> Result<T, SchemaError> {
    let text = std::fs::read_to_string(path).map_err(|e| SchemaError::DocumentLoadError {
        path: path.display().to_string(),
        reason: format!("cannot read file: {e}"),
    })?;
    tracing::debug!(path = %path.display(), "decoding document");
    decode(&text, WireFormat::from_path(path), validator)
}

/// Write a typed node as text.
///
/// # Errors
///
/// Returns `SchemaError::Serialization` if the node cannot be written.
pub fn encode<T: Serialize>(node: &T, format: WireFormat) -> Result<String, SchemaError> {
    match format {
        WireFormat::Json => {
            let mut text = serde_json::to_string_pretty(node)
                .map_err(|e| SchemaError::Serialization(e.to_string()))?;
            text.push('\n');
            Ok(text)
        }
        WireFormat::Yaml => {
            serde_yaml::to_string(node).map_err(|e| SchemaError::Serialization(e.to_string()))
        }
    }
}

/// Convert a parsed YAML document into the JSON data model.
///
/// Tags are dropped and scalar keys are stringified. Anything a card cannot
/// express in JSON is rejected with the document path where it occurs.
///
/// # Errors
///
/// Returns `SchemaError::MalformedInput` for non-finite floats, non-scalar
/// keys, and keys that collide once stringified.
pub fn yaml_to_json(yaml: &serde_yaml::Value) -> Result<Value, SchemaError> {
    yaml_node(yaml, &DocPath::root()).map_err(|reason| SchemaError::MalformedInput {
        format: WireFormat::Yaml,
        reason,
    })
}

fn yaml_node(yaml: &serde_yaml::Value, path: &DocPath) -> Result<Value, String> {
    use serde_yaml::Value as Yaml;

    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(*b),
        Yaml::Number(n) => Value::Number(yaml_number(n, path)?),
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Sequence(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| yaml_node(item, &path.index(i)))
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(entries) => {
            let mut object = Map::new();
            for (key, value) in entries {
                let key = match key {
                    Yaml::String(s) => s.clone(),
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    _ => return Err(format!("non-scalar mapping key at {path}")),
                };
                let value = yaml_node(value, &path.field(&key))?;
                if object.insert(key.clone(), value).is_some() {
                    return Err(format!("duplicate key {key:?} at {path}"));
                }
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_node(&tagged.value, path)?,
    })
}

fn yaml_number(n: &serde_yaml::Number, path: &DocPath) -> Result<serde_json::Number, String> {
    if let Some(i) = n.as_i64() {
        return Ok(i.into());
    }
    if let Some(u) = n.as_u64() {
        return Ok(u.into());
    }
    n.as_f64()
        .and_then(serde_json::Number::from_f64)
        .ok_or_else(|| format!("number {n} at {path} has no JSON form"))
}
