//! # acard-schema: Registry, Validation & Codec
//!
//! Everything between untrusted card text and the typed tree of
//! `acard-core`.
//!
//! ## Schema Registry (`registry`)
//!
//! Static field contracts for every element and action tag and for the
//! fixed-tag kinds. Key functions:
//!
//! - [`contract_for`] - the contract of a tag, or `UnknownTag`.
//! - [`is_element_tag`] / [`is_action_tag`] - closed-set membership.
//!
//! ## Validation (`validate`)
//!
//! [`Validator`] walks an untyped [`RawDocument`](acard_core::RawDocument)
//! against the registry, collects every defect grouped per node with its
//! document path, and materializes the typed tree only when none was found.
//! The walk is cycle-safe and depth-bounded.
//!
//! ## Codec (`codec`)
//!
//! [`decode`] / [`encode`] for JSON and YAML. Syntax failures are
//! [`SchemaError::MalformedInput`], never validation failures.
//!
//! ## Export (`export`)
//!
//! The registry as a Draft 2020-12 JSON Schema, compiled with `jsonschema`.
//!
//! ## Crate Policy
//!
//! - Depends only on `acard-core` internally.
//! - Validation is pure: no I/O, no global mutable state. A [`Validator`]
//!   may be shared across threads.
//! - Unknown fields and input id uniqueness are policy, selected through
//!   [`ValidationOptions`]; neither is hard-coded.

pub mod codec;
pub mod config;
pub mod error;
pub mod export;
pub mod registry;
pub mod validate;

pub use codec::{decode, decode_file, encode, parse, WireFormat};
pub use config::{UnknownFields, ValidationOptions, DEFAULT_MAX_DEPTH};
pub use error::SchemaError;
pub use registry::{
    action_contract, all_tagged_contracts, contract_for, contract_for_kind, element_contract,
    is_action_tag, is_element_tag, Contract, FieldKind, FieldSpec, Presence,
};
pub use validate::{DefectKind, NodeViolations, TypedNode, ValidationViolations, Validator};
