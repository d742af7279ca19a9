//! # JSON Schema Export
//!
//! Renders the registry as a Draft 2020-12 JSON Schema so editors and other
//! tooling can check cards without this crate. Every contract becomes one
//! `$defs` entry; the element and action unions are `oneOf` lists whose
//! branches are told apart by a `const` on `type`.
//!
//! The exported schema accepts exactly the JSON documents the [`Validator`]
//! accepts under the same options, except for the input id uniqueness mode
//! and the depth limit, which JSON Schema cannot express.
//!
//! [`Validator`]: crate::validate::Validator

use acard_core::{NodeKind, SCHEMA_URI};
use serde_json::{json, Map, Value};

use crate::config::{UnknownFields, ValidationOptions};
use crate::error::SchemaError;
use crate::registry::{self, Contract, FieldKind};

const DRAFT_2020_12: &str = "https://json-schema.org/draft/2020-12/schema";

const FIXED_KINDS: [NodeKind; 5] = [
    NodeKind::Card,
    NodeKind::ShowableCard,
    NodeKind::Column,
    NodeKind::Fact,
    NodeKind::Choice,
];

/// Build the JSON Schema of a root card.
pub fn json_schema(options: &ValidationOptions) -> Value {
    let closed = options.unknown_fields == UnknownFields::Reject;
    let mut defs = Map::new();

    let fixed = FIXED_KINDS
        .iter()
        .filter_map(|kind| registry::contract_for_kind(*kind));
    for contract in fixed.chain(registry::all_tagged_contracts()) {
        defs.insert(contract.name().to_string(), contract_schema(contract, closed));
    }

    for kind in [NodeKind::Element, NodeKind::Action] {
        let branches: Vec<Value> = registry::all_tagged_contracts()
            .filter(|contract| contract.kind == kind)
            .map(|contract| reference(contract.name()))
            .collect();
        defs.insert(kind.as_str().to_string(), json!({ "oneOf": branches }));
    }

    json!({
        "$schema": DRAFT_2020_12,
        "title": "Adaptive Card 1.0",
        "description": format!("Cards conforming to {SCHEMA_URI}"),
        "$ref": "#/$defs/Card",
        "$defs": defs,
    })
}

/// Compile the exported schema.
///
/// # Errors
///
/// Returns `SchemaError::Export` if the schema does not compile.
pub fn compile(options: &ValidationOptions) -> Result<jsonschema::Validator, SchemaError> {
    let schema = json_schema(options);
    let mut opts = jsonschema::options();
    opts.with_draft(jsonschema::Draft::Draft202012);
    opts.build(&schema)
        .map_err(|e| SchemaError::Export(e.to_string()))
}

fn reference(name: &str) -> Value {
    json!({ "$ref": format!("#/$defs/{name}") })
}

fn contract_schema(contract: &Contract, closed: bool) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    if let Some(tag) = contract.tag {
        properties.insert("type".to_string(), json!({ "const": tag }));
        required.push(Value::from("type"));
    }
    for spec in contract.fields() {
        properties.insert(spec.name.to_string(), field_schema(spec.kind));
        if spec.is_required() {
            required.push(Value::from(spec.name));
        }
    }

    let mut schema = Map::new();
    schema.insert("type".to_string(), Value::from("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), Value::Array(required));
    }
    if closed {
        schema.insert("additionalProperties".to_string(), Value::Bool(false));
    }
    Value::Object(schema)
}

fn field_schema(kind: FieldKind) -> Value {
    let array_of = |name: &str| json!({ "type": "array", "items": reference(name) });
    match kind {
        FieldKind::String => json!({ "type": "string" }),
        FieldKind::Bool => json!({ "type": "boolean" }),
        FieldKind::Count => json!({ "type": "integer", "minimum": 0, "maximum": u32::MAX }),
        FieldKind::Number => json!({ "type": "number" }),
        FieldKind::Enum(values) => json!({ "enum": values }),
        FieldKind::Width => json!({ "type": ["string", "number"] }),
        FieldKind::Opaque => json!({ "type": ["string", "object"] }),
        FieldKind::Elements => array_of(NodeKind::Element.as_str()),
        FieldKind::Columns => array_of(NodeKind::Column.as_str()),
        FieldKind::Facts => array_of(NodeKind::Fact.as_str()),
        FieldKind::Choices => array_of(NodeKind::Choice.as_str()),
        FieldKind::Images => array_of("Image"),
        FieldKind::Actions => array_of(NodeKind::Action.as_str()),
        FieldKind::ShowableCard => reference(NodeKind::ShowableCard.as_str()),
    }
}
