//! # Validation Options
//!
//! The two policy questions the data model leaves open are configuration,
//! not hard-coded behavior:
//!
//! - what happens to fields a contract does not name ([`UnknownFields`]);
//! - whether input ids must be unique across the whole document.
//!
//! Options load from a YAML or JSON file, then environment overrides apply:
//!
//! | Variable | Values |
//! |----------|--------|
//! | `ACARD_UNKNOWN_FIELDS` | `ignore`, `reject` |
//! | `ACARD_UNIQUE_INPUT_IDS` | `true`, `false` |
//! | `ACARD_MAX_DEPTH` | positive integer |

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::WireFormat;
use crate::error::SchemaError;

/// Default bound on node nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Policy for fields that a node's contract does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFields {
    /// Accept and drop them. Documents written for later format versions
    /// still validate.
    #[default]
    Ignore,
    /// Report each as a defect.
    Reject,
}

impl FromStr for UnknownFields {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(Self::Ignore),
            "reject" => Ok(Self::Reject),
            other => Err(SchemaError::Config(format!(
                "unknown-field policy must be \"ignore\" or \"reject\", got {other:?}"
            ))),
        }
    }
}

/// Knobs of the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    pub unknown_fields: UnknownFields,
    /// Reject a document in which two inputs share an id.
    pub unique_input_ids: bool,
    /// Deepest nesting accepted before validation stops descending. Objects
    /// and arrays each count as one level.
    pub max_depth: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            unknown_fields: UnknownFields::Ignore,
            unique_input_ids: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ValidationOptions {
    /// Closed validation with unique input ids.
    pub fn strict() -> Self {
        Self {
            unknown_fields: UnknownFields::Reject,
            unique_input_ids: true,
            ..Self::default()
        }
    }

    /// Load options from a YAML or JSON file. Missing keys keep defaults.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Config` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SchemaError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let options: Self = match WireFormat::from_path(path) {
            WireFormat::Yaml => serde_yaml::from_str(&content).map_err(|e| {
                SchemaError::Config(format!("invalid YAML in {}: {e}", path.display()))
            })?,
            WireFormat::Json => serde_json::from_str(&content).map_err(|e| {
                SchemaError::Config(format!("invalid JSON in {}: {e}", path.display()))
            })?,
        };
        options.checked()
    }

    /// Apply `ACARD_*` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Config` if a variable holds an invalid value.
    pub fn with_env_overrides(self) -> Result<Self, SchemaError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides read through `lookup`, keyed by variable name.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SchemaError> {
        if let Some(raw) = lookup("ACARD_UNKNOWN_FIELDS") {
            self.unknown_fields = raw.trim().parse()?;
        }
        if let Some(raw) = lookup("ACARD_UNIQUE_INPUT_IDS") {
            self.unique_input_ids = raw.trim().parse().map_err(|_| {
                SchemaError::Config(format!(
                    "ACARD_UNIQUE_INPUT_IDS must be \"true\" or \"false\", got {raw:?}"
                ))
            })?;
        }
        if let Some(raw) = lookup("ACARD_MAX_DEPTH") {
            self.max_depth = raw.trim().parse().map_err(|_| {
                SchemaError::Config(format!("ACARD_MAX_DEPTH must be an integer, got {raw:?}"))
            })?;
        }
        self.checked()
    }

    fn checked(self) -> Result<Self, SchemaError> {
        if self.max_depth == 0 {
            return Err(SchemaError::Config("max_depth must be at least 1".to_string()));
        }
        Ok(self)
    }
}
