//! # Schema Errors
//!
//! Every failure of the registry, validator and codec is recoverable by the
//! caller. Validation failures carry the complete, path-annotated defect
//! list in [`SchemaError::ValidationFailed`]; wire-format syntax failures are
//! kept apart as [`SchemaError::MalformedInput`].

use acard_core::NodeKind;
use thiserror::Error;

use crate::codec::WireFormat;
use crate::validate::ValidationViolations;

/// Error from the schema layer.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A tag is in neither the element nor the action set.
    #[error("unknown tag {tag:?}")]
    UnknownTag {
        /// The rejected tag.
        tag: String,
    },

    /// The text could not be parsed in its wire format at all.
    #[error("malformed {format} input: {reason}")]
    MalformedInput {
        /// Format the text was parsed as.
        format: WireFormat,
        /// Parser message.
        reason: String,
    },

    /// The document parsed but does not conform to the data model.
    #[error("validation failed for {kind}:\n{violations}")]
    ValidationFailed {
        /// Position the root node was validated as.
        kind: NodeKind,
        /// Defects grouped per node, in document order.
        violations: ValidationViolations,
    },

    /// A document file could not be read.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path of the document.
        path: String,
        /// Why it could not be loaded.
        reason: String,
    },

    /// Validation options could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// A typed tree could not be written or materialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The exported JSON Schema could not be compiled.
    #[error("json schema export error: {0}")]
    Export(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SchemaError {
    /// The defect list, when this is a validation failure.
    pub fn violations(&self) -> Option<&ValidationViolations> {
        match self {
            Self::ValidationFailed { violations, .. } => Some(violations),
            _ => None,
        }
    }
}
