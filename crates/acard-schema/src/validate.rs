//! # Structural Validation
//!
//! Confirms that an untyped node tree conforms to the card data model and
//! materializes the typed tree from it.
//!
//! ## Batch Reporting
//!
//! Validation never stops at the first defect. Every defect found on a node
//! is collected into one [`NodeViolations`] group carrying the node's
//! JSON Pointer path, and the groups are returned in document order inside
//! [`ValidationViolations`]. A document author sees the complete defect
//! list in one pass.
//!
//! Two rules keep the list free of noise:
//!
//! - a node whose `type` is unrecognized reports only that, and so does a
//!   node of a sum kind (Element, Action) with no `type` at all, since no
//!   contract applies to its fields;
//! - a field that is present and well-formed never produces a defect, no
//!   matter what is wrong with its siblings.
//!
//! ## Termination
//!
//! A [`RawDocument`] can share nodes between parents and can contain
//! cycles. The walk tracks the container nodes on its active descent path
//! and reports `CyclicStructure` when one reappears; a node reachable from
//! two siblings is visited twice and is not a cycle. Every object and every
//! array on the path counts one level toward
//! [`ValidationOptions::max_depth`], so a container element nested in an
//! `items` list costs two. Going past the limit reports `DepthExceeded` and
//! the walk does not descend further.
//!
//! ## Materialization
//!
//! The walk projects every accepted node onto its contract fields. Unknown
//! fields are dropped from the projection under the `Ignore` policy, so the
//! typed tree only ever holds modeled data. The projection is converted to
//! the typed tree only when no defect was found.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use acard_core::{
    Action, Card, Choice, Column, DocPath, DocumentNode, Element, ElementTag, Fact, NodeId,
    NodeKind, RawDocument, RawNode, ShowableCard,
};
use serde_json::{Map, Number, Value};

use crate::config::{UnknownFields, ValidationOptions};
use crate::error::SchemaError;
use crate::registry::{self, Contract, FieldKind, FieldSpec};

/// One defect found on a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefectKind {
    /// The node has no `type` field.
    MissingTypeTag,
    /// The `type` field names a tag outside the set allowed at this position.
    UnknownTag { tag: String },
    /// A required field is absent.
    MissingRequiredField { field: &'static str },
    /// A field is present with a value of the wrong kind. An empty `field`
    /// means the node itself has the wrong kind.
    FieldTypeMismatch {
        field: String,
        expected: String,
        found: String,
    },
    /// A field the contract does not declare, under the `Reject` policy.
    UnknownField { field: String },
    /// The node contains itself.
    CyclicStructure,
    /// An input id already used by the input at `first`.
    DuplicateInputId { id: String, first: DocPath },
    /// Nesting exceeds the configured limit.
    DepthExceeded { limit: usize },
}

impl DefectKind {
    /// The field the defect is about, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredField { field } => Some(*field),
            Self::FieldTypeMismatch { field, .. } | Self::UnknownField { field }
                if !field.is_empty() =>
            {
                Some(field.as_str())
            }
            _ => None,
        }
    }
}

impl fmt::Display for DefectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTypeTag => f.write_str("missing \"type\" tag"),
            Self::UnknownTag { tag } => write!(f, "unknown tag {tag:?}"),
            Self::MissingRequiredField { field } => {
                write!(f, "missing required field {field:?}")
            }
            Self::FieldTypeMismatch {
                field,
                expected,
                found,
            } => {
                if field.is_empty() {
                    write!(f, "expected {expected}, found {found}")
                } else {
                    write!(f, "field {field:?}: expected {expected}, found {found}")
                }
            }
            Self::UnknownField { field } => write!(f, "unknown field {field:?}"),
            Self::CyclicStructure => f.write_str("cyclic structure: node contains itself"),
            Self::DuplicateInputId { id, first } => {
                write!(f, "duplicate input id {id:?} (first used at {first})")
            }
            Self::DepthExceeded { limit } => {
                write!(f, "depth exceeds {limit} nested objects and arrays")
            }
        }
    }
}

/// All defects found on one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeViolations {
    /// JSON Pointer to the node.
    pub path: DocPath,
    /// The node's tag or kind, when it could be determined.
    pub tag: Option<String>,
    pub defects: Vec<DefectKind>,
}

impl fmt::Display for NodeViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "  {} ({tag}):", self.path)?,
            None => write!(f, "  {}:", self.path)?,
        }
        for defect in &self.defects {
            write!(f, "\n    {defect}")?;
        }
        Ok(())
    }
}

/// Defects of a whole document, grouped per node in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationViolations {
    nodes: Vec<NodeViolations>,
}

impl ValidationViolations {
    /// Returns the total number of defects.
    pub fn len(&self) -> usize {
        self.nodes.iter().map(|node| node.defects.len()).sum()
    }

    /// Returns true if there are no defects.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The per-node groups.
    pub fn nodes(&self) -> &[NodeViolations] {
        &self.nodes
    }

    /// Every defect with the path of its node.
    pub fn violations(&self) -> impl Iterator<Item = (&DocPath, &DefectKind)> {
        self.nodes
            .iter()
            .flat_map(|node| node.defects.iter().map(move |defect| (&node.path, defect)))
    }

    /// The group of the node at `path`, if it has defects.
    pub fn at(&self, path: &str) -> Option<&NodeViolations> {
        self.nodes.iter().find(|node| node.path.as_str() == path)
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<NodeViolations> {
        self.nodes
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

/// A validated node of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedNode {
    Card(Card),
    ShowableCard(ShowableCard),
    Element(Element),
    Action(Action),
    Column(Column),
    Fact(Fact),
    Choice(Choice),
}

impl TypedNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Card(_) => NodeKind::Card,
            Self::ShowableCard(_) => NodeKind::ShowableCard,
            Self::Element(_) => NodeKind::Element,
            Self::Action(_) => NodeKind::Action,
            Self::Column(_) => NodeKind::Column,
            Self::Fact(_) => NodeKind::Fact,
            Self::Choice(_) => NodeKind::Choice,
        }
    }

    /// Serialize the node into its wire value.
    pub fn to_value(&self) -> Result<Value, SchemaError> {
        let value = match self {
            Self::Card(node) => serde_json::to_value(node),
            Self::ShowableCard(node) => serde_json::to_value(node),
            Self::Element(node) => serde_json::to_value(node),
            Self::Action(node) => serde_json::to_value(node),
            Self::Column(node) => serde_json::to_value(node),
            Self::Fact(node) => serde_json::to_value(node),
            Self::Choice(node) => serde_json::to_value(node),
        };
        value.map_err(|e| SchemaError::Serialization(e.to_string()))
    }
}

/// Contract-driven validator.
///
/// Holds only its options; the registry is static. A `Validator` can be
/// shared across threads and used for any number of documents.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidationOptions,
}

impl Validator {
    pub fn new(options: ValidationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Validate the node `root` of `doc` as `kind`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::ValidationFailed` with every defect found.
    pub fn validate(
        &self,
        doc: &RawDocument,
        root: NodeId,
        kind: NodeKind,
    ) -> Result<TypedNode, SchemaError> {
        let value = self.project(doc, root, kind)?;
        let typed = match kind {
            NodeKind::Card => TypedNode::Card(materialize(value)?),
            NodeKind::ShowableCard => TypedNode::ShowableCard(materialize(value)?),
            NodeKind::Element => TypedNode::Element(materialize(value)?),
            NodeKind::Action => TypedNode::Action(materialize(value)?),
            NodeKind::Column => TypedNode::Column(materialize(value)?),
            NodeKind::Fact => TypedNode::Fact(materialize(value)?),
            NodeKind::Choice => TypedNode::Choice(materialize(value)?),
        };
        Ok(typed)
    }

    /// Validate the node `root` of `doc` as the kind of `T`.
    pub fn validate_as<T: DocumentNode>(
        &self,
        doc: &RawDocument,
        root: NodeId,
    ) -> Result<T, SchemaError> {
        let value = self.project(doc, root, T::KIND)?;
        materialize(value)
    }

    /// Validate a JSON value as the kind of `T`.
    pub fn validate_value<T: DocumentNode>(&self, value: &Value) -> Result<T, SchemaError> {
        let (doc, root) = RawDocument::from_json(value);
        self.validate_as(&doc, root)
    }

    /// Walk the tree and return its projection onto the contracts, or every
    /// defect found.
    fn project(
        &self,
        doc: &RawDocument,
        root: NodeId,
        kind: NodeKind,
    ) -> Result<Value, SchemaError> {
        tracing::debug!(%kind, nodes = doc.len(), "validating document");
        let mut walk = Walk {
            doc,
            options: &self.options,
            active: HashSet::new(),
            groups: Vec::new(),
            inputs: HashMap::new(),
        };
        let value = walk.node(root, kind, &DocPath::root(), 0);
        let nodes: Vec<NodeViolations> = walk
            .groups
            .into_iter()
            .filter(|group| !group.defects.is_empty())
            .collect();
        if nodes.is_empty() {
            tracing::debug!(%kind, "document is valid");
            Ok(value)
        } else {
            let violations = ValidationViolations { nodes };
            tracing::debug!(%kind, defects = violations.len(), "document is invalid");
            Err(SchemaError::ValidationFailed { kind, violations })
        }
    }
}

fn materialize<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, SchemaError> {
    serde_json::from_value(value).map_err(|e| SchemaError::Serialization(e.to_string()))
}

/// Contract selected for an object node, or why none applies.
enum Selected {
    Contract(&'static Contract),
    /// Sum-kind node whose tag could not be resolved; its fields are not checked.
    Unresolved,
}

struct Walk<'a> {
    doc: &'a RawDocument,
    options: &'a ValidationOptions,
    /// Container nodes on the current descent path.
    active: HashSet<NodeId>,
    /// Defect groups in document order; a slot is reserved per visited node.
    groups: Vec<NodeViolations>,
    /// First path of every input id seen.
    inputs: HashMap<String, DocPath>,
}

impl<'a> Walk<'a> {
    fn open_group(&mut self, path: &DocPath, tag: Option<String>) -> usize {
        self.groups.push(NodeViolations {
            path: path.clone(),
            tag,
            defects: Vec::new(),
        });
        self.groups.len() - 1
    }

    fn defect(&mut self, group: usize, defect: DefectKind) {
        if let Some(group) = self.groups.get_mut(group) {
            group.defects.push(defect);
        }
    }

    /// Report a defect in a group of its own at `path`.
    fn report(&mut self, path: &DocPath, defect: DefectKind) {
        let group = self.open_group(path, None);
        self.defect(group, defect);
    }

    /// Resolve `id`, guarding against dangling ids, cycles and depth.
    /// On success the node is on the active path if it is a container.
    fn enter(&mut self, id: NodeId, path: &DocPath, depth: usize) -> Option<&'a RawNode> {
        let doc = self.doc;
        let Some(node) = doc.get(id) else {
            self.report(
                path,
                DefectKind::FieldTypeMismatch {
                    field: path.last_segment().unwrap_or_default(),
                    expected: "node".to_string(),
                    found: "dangling node reference".to_string(),
                },
            );
            return None;
        };
        if node.is_container() {
            if self.active.contains(&id) {
                tracing::debug!(node = %id, %path, "cycle detected");
                self.report(path, DefectKind::CyclicStructure);
                return None;
            }
            if depth >= self.options.max_depth {
                self.report(
                    path,
                    DefectKind::DepthExceeded {
                        limit: self.options.max_depth,
                    },
                );
                return None;
            }
            self.active.insert(id);
        }
        Some(node)
    }

    fn leave(&mut self, id: NodeId) {
        self.active.remove(&id);
    }

    /// Validate one node at a kind position and return its projection.
    fn node(&mut self, id: NodeId, kind: NodeKind, path: &DocPath, depth: usize) -> Value {
        self.node_with(id, kind, None, path, depth)
    }

    /// Validate one node. `only` restricts an element position to one tag.
    fn node_with(
        &mut self,
        id: NodeId,
        kind: NodeKind,
        only: Option<ElementTag>,
        path: &DocPath,
        depth: usize,
    ) -> Value {
        let Some(node) = self.enter(id, path, depth) else {
            return Value::Null;
        };
        tracing::trace!(%kind, %path, "validating node");
        let RawNode::Object(entries) = node else {
            self.report(
                path,
                DefectKind::FieldTypeMismatch {
                    field: path.last_segment().unwrap_or_default(),
                    expected: format!("{kind} object"),
                    found: node.kind_name().to_string(),
                },
            );
            self.leave(id);
            return Value::Null;
        };

        let (group, selected) = self.select(id, kind, only, path);
        let value = match selected {
            Selected::Contract(contract) => {
                let value = self.fields(contract, entries, group, path, depth);
                if kind == NodeKind::Element {
                    self.check_input_id(contract, &value, group, path);
                }
                value
            }
            Selected::Unresolved => Value::Null,
        };
        self.leave(id);
        value
    }

    /// Pick the contract for an object node and open its defect group.
    fn select(
        &mut self,
        id: NodeId,
        kind: NodeKind,
        only: Option<ElementTag>,
        path: &DocPath,
    ) -> (usize, Selected) {
        let fixed = match (kind, only) {
            (NodeKind::Element, Some(tag)) => Some(registry::element_contract(tag)),
            (kind, _) => registry::contract_for_kind(kind),
        };
        let doc = self.doc;
        let tag_node = doc.field(id, "type").and_then(|tag| doc.get(tag));

        // A fixed-tag node without its tag is still checked field by field;
        // one carrying some other tag is not.
        if let Some(contract) = fixed {
            let group = self.open_group(path, Some(contract.name().to_string()));
            let defect = match (contract.tag, tag_node) {
                (None, _) | (Some(_), None) => None,
                (Some(expected), Some(RawNode::String(tag))) if tag == expected => None,
                (Some(_), Some(RawNode::String(tag))) => {
                    Some(DefectKind::UnknownTag { tag: tag.clone() })
                }
                (Some(_), Some(other)) => Some(tag_mismatch(other)),
            };
            if contract.tag.is_some() && tag_node.is_none() {
                self.defect(group, DefectKind::MissingTypeTag);
            }
            return match defect {
                Some(defect) => {
                    self.defect(group, defect);
                    (group, Selected::Unresolved)
                }
                None => (group, Selected::Contract(contract)),
            };
        }

        match tag_node {
            None => {
                let group = self.open_group(path, None);
                self.defect(group, DefectKind::MissingTypeTag);
                (group, Selected::Unresolved)
            }
            Some(RawNode::String(tag)) => {
                let group = self.open_group(path, Some(tag.clone()));
                match sum_contract(kind, tag) {
                    Some(contract) => (group, Selected::Contract(contract)),
                    None => {
                        self.defect(group, DefectKind::UnknownTag { tag: tag.clone() });
                        (group, Selected::Unresolved)
                    }
                }
            }
            Some(other) => {
                let group = self.open_group(path, None);
                self.defect(group, tag_mismatch(other));
                (group, Selected::Unresolved)
            }
        }
    }

    /// Check every contract field of an object and build the projection.
    fn fields(
        &mut self,
        contract: &'static Contract,
        entries: &'a [(String, NodeId)],
        group: usize,
        path: &DocPath,
        depth: usize,
    ) -> Value {
        let mut projected = Map::new();
        if let Some(tag) = contract.tag {
            projected.insert("type".to_string(), Value::String(tag.to_string()));
        }

        for spec in contract.fields() {
            let Some(child) = first_entry(entries, spec.name) else {
                if spec.is_required() {
                    self.defect(group, DefectKind::MissingRequiredField { field: spec.name });
                }
                continue;
            };
            if let Some(value) = self.field(spec, child, group, path, depth) {
                projected.insert(spec.name.to_string(), value);
            }
        }

        for (key, _) in entries {
            if key == "type" || contract.field(key).is_some() {
                continue;
            }
            match self.options.unknown_fields {
                UnknownFields::Ignore => {
                    tracing::trace!(%path, field = %key, "ignoring unknown field");
                }
                UnknownFields::Reject => {
                    self.defect(group, DefectKind::UnknownField { field: key.clone() });
                }
            }
        }

        Value::Object(projected)
    }

    /// Check one present field and return its projected value.
    fn field(
        &mut self,
        spec: &'static FieldSpec,
        child: NodeId,
        group: usize,
        path: &DocPath,
        depth: usize,
    ) -> Option<Value> {
        let child_path = path.field(spec.name);
        let item_kind = match spec.kind {
            FieldKind::Elements | FieldKind::Images => NodeKind::Element,
            FieldKind::Columns => NodeKind::Column,
            FieldKind::Facts => NodeKind::Fact,
            FieldKind::Choices => NodeKind::Choice,
            FieldKind::Actions => NodeKind::Action,
            FieldKind::ShowableCard => {
                return Some(self.node(child, NodeKind::ShowableCard, &child_path, depth + 1));
            }
            FieldKind::Opaque => return self.opaque(spec, child, group, &child_path, depth),
            _ => return self.primitive(spec, child, group),
        };
        let only = (spec.kind == FieldKind::Images).then_some(ElementTag::Image);
        self.sequence(spec, child, item_kind, only, group, &child_path, depth)
    }

    #[allow(clippy::too_many_arguments)]
    fn sequence(
        &mut self,
        spec: &'static FieldSpec,
        id: NodeId,
        item_kind: NodeKind,
        only: Option<ElementTag>,
        group: usize,
        path: &DocPath,
        depth: usize,
    ) -> Option<Value> {
        let node = self.enter(id, path, depth + 1)?;
        let RawNode::Array(items) = node else {
            self.defect(group, mismatch(spec, node));
            self.leave(id);
            return None;
        };
        let values = items
            .iter()
            .enumerate()
            .map(|(i, item)| self.node_with(*item, item_kind, only, &path.index(i), depth + 2))
            .collect();
        self.leave(id);
        Some(Value::Array(values))
    }

    fn primitive(
        &mut self,
        spec: &'static FieldSpec,
        id: NodeId,
        group: usize,
    ) -> Option<Value> {
        let doc = self.doc;
        let Some(node) = doc.get(id) else {
            self.defect(
                group,
                DefectKind::FieldTypeMismatch {
                    field: spec.name.to_string(),
                    expected: spec.kind.to_string(),
                    found: "dangling node reference".to_string(),
                },
            );
            return None;
        };
        let value = match (spec.kind, node) {
            (FieldKind::String, RawNode::String(s)) => Some(Value::String(s.clone())),
            (FieldKind::Bool, RawNode::Bool(b)) => Some(Value::Bool(*b)),
            (FieldKind::Number, RawNode::Number(n)) => Some(Value::Number(n.clone())),
            (FieldKind::Count, RawNode::Number(n)) => count(n).map(Value::from),
            (FieldKind::Enum(values), RawNode::String(s)) if values.iter().any(|v| v == s) => {
                Some(Value::String(s.clone()))
            }
            (FieldKind::Width, RawNode::String(s)) => Some(Value::String(s.clone())),
            (FieldKind::Width, RawNode::Number(n)) => Some(Value::Number(n.clone())),
            _ => None,
        };
        if value.is_none() {
            self.defect(group, mismatch(spec, node));
        }
        value
    }

    /// A free-form payload: a string, or an object of arbitrary acyclic content.
    fn opaque(
        &mut self,
        spec: &'static FieldSpec,
        id: NodeId,
        group: usize,
        path: &DocPath,
        depth: usize,
    ) -> Option<Value> {
        match self.doc.get(id) {
            Some(RawNode::String(s)) => Some(Value::String(s.clone())),
            Some(RawNode::Object(_)) => self.free_form(id, path, depth + 1),
            Some(other) => {
                self.defect(group, mismatch(spec, other));
                None
            }
            None => {
                self.defect(
                    group,
                    DefectKind::FieldTypeMismatch {
                        field: spec.name.to_string(),
                        expected: spec.kind.to_string(),
                        found: "dangling node reference".to_string(),
                    },
                );
                None
            }
        }
    }

    fn free_form(&mut self, id: NodeId, path: &DocPath, depth: usize) -> Option<Value> {
        let node = self.enter(id, path, depth)?;
        let value = match node {
            RawNode::Null => Some(Value::Null),
            RawNode::Bool(b) => Some(Value::Bool(*b)),
            RawNode::Number(n) => Some(Value::Number(n.clone())),
            RawNode::String(s) => Some(Value::String(s.clone())),
            RawNode::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| self.free_form(*item, &path.index(i), depth + 1))
                .collect::<Option<Vec<_>>>()
                .map(Value::Array),
            RawNode::Object(entries) => {
                let mut map = Map::new();
                let mut complete = true;
                for (key, child) in entries {
                    match self.free_form(*child, &path.field(key), depth + 1) {
                        Some(value) => {
                            map.insert(key.clone(), value);
                        }
                        None => complete = false,
                    }
                }
                complete.then_some(Value::Object(map))
            }
        };
        self.leave(id);
        value
    }

    fn check_input_id(
        &mut self,
        contract: &'static Contract,
        value: &Value,
        group: usize,
        path: &DocPath,
    ) {
        if !self.options.unique_input_ids {
            return;
        }
        let is_input = contract
            .tag
            .and_then(|tag| ElementTag::from_str(tag).ok())
            .is_some_and(|tag| tag.is_input());
        let Some(id) = value.get("id").and_then(Value::as_str).filter(|_| is_input) else {
            return;
        };
        match self.inputs.get(id) {
            Some(first) => {
                let defect = DefectKind::DuplicateInputId {
                    id: id.to_string(),
                    first: first.clone(),
                };
                self.defect(group, defect);
            }
            None => {
                self.inputs.insert(id.to_string(), path.clone());
            }
        }
    }
}

/// Contract of a tagged node at a sum-kind position.
fn sum_contract(kind: NodeKind, tag: &str) -> Option<&'static Contract> {
    match kind {
        NodeKind::Element if registry::is_element_tag(tag) => registry::contract_for(tag).ok(),
        NodeKind::Action if registry::is_action_tag(tag) => registry::contract_for(tag).ok(),
        _ => None,
    }
}

fn first_entry(entries: &[(String, NodeId)], name: &str) -> Option<NodeId> {
    entries
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, id)| *id)
}

fn count(n: &Number) -> Option<u64> {
    n.as_u64().filter(|v| u32::try_from(*v).is_ok())
}

fn mismatch(spec: &FieldSpec, node: &RawNode) -> DefectKind {
    let found = match node {
        RawNode::String(s) => format!("string {s:?}"),
        RawNode::Number(n) => format!("number {n}"),
        other => other.kind_name().to_string(),
    };
    DefectKind::FieldTypeMismatch {
        field: spec.name.to_string(),
        expected: spec.kind.to_string(),
        found,
    }
}

fn tag_mismatch(node: &RawNode) -> DefectKind {
    DefectKind::FieldTypeMismatch {
        field: "type".to_string(),
        expected: "string".to_string(),
        found: node.kind_name().to_string(),
    }
}
