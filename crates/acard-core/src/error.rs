//! # Error Types
//!
//! Errors raised by the document model itself. Schema validation failures
//! are not errors of this crate: they are reported as structured defect
//! lists by `acard-schema`.

use thiserror::Error;

use crate::raw::NodeId;

/// Top-level error type for the document model.
#[derive(Error, Debug)]
pub enum CardError {
    /// A string did not belong to a closed enumeration.
    #[error("unknown {enumeration} value: {value:?}")]
    UnknownValue {
        /// Name of the enumeration that was being parsed.
        enumeration: &'static str,
        /// The rejected string.
        value: String,
    },

    /// A custom column width spelled like a width keyword.
    #[error("column width {0:?} is a keyword, not a custom width")]
    KeywordWidth(String),

    /// A node reappeared on its own ancestor path while walking an arena.
    #[error("cyclic structure: node {node} is its own ancestor")]
    CyclicStructure {
        /// The node that closed the cycle.
        node: NodeId,
    },

    /// A node id does not belong to the arena it was resolved against.
    #[error("dangling node reference: {0}")]
    DanglingNode(NodeId),

    /// JSON serialization or deserialization of a model value failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
