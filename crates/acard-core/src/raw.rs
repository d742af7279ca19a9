//! # Untyped Node Arena
//!
//! [`RawDocument`] is the untyped tree the validator consumes. Nodes live in
//! a flat arena and refer to their children by [`NodeId`], so one node may be
//! reachable from several parents, including from its own descendants.
//! A JSON value always converts into an acyclic arena; trees assembled by
//! hand (or by an authoring tool that shares nodes) may not be acyclic, and
//! every walk over an arena must guard against that.

use std::collections::HashSet;
use std::fmt;

use serde_json::{Map, Number, Value};

use crate::error::CardError;

/// Index of a node inside one [`RawDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One untyped node. Containers hold child ids, not children.
#[derive(Debug, Clone, PartialEq)]
pub enum RawNode {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<NodeId>),
    /// Object entries in source order.
    Object(Vec<(String, NodeId)>),
}

impl RawNode {
    /// Name of the node's primitive kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Returns true for arrays and objects.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Object(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Arena of untyped nodes.
#[derive(Debug, Clone, Default)]
pub struct RawDocument {
    nodes: Vec<RawNode>,
}

impl RawDocument {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a JSON value into a fresh arena, returning it with its root id.
    pub fn from_json(value: &Value) -> (Self, NodeId) {
        let mut doc = Self::new();
        let root = doc.insert_json(value);
        (doc, root)
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node and return its id.
    pub fn push(&mut self, node: RawNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Replace the node stored at `id`, returning the previous node.
    ///
    /// This is how shared or cyclic structure is assembled: push a
    /// placeholder, push children that refer to it, then replace it.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::DanglingNode`] if `id` is not in this arena.
    pub fn replace(&mut self, id: NodeId, node: RawNode) -> Result<RawNode, CardError> {
        let slot = self
            .nodes
            .get_mut(id.0)
            .ok_or(CardError::DanglingNode(id))?;
        Ok(std::mem::replace(slot, node))
    }

    /// Resolve a node id.
    pub fn get(&self, id: NodeId) -> Option<&RawNode> {
        self.nodes.get(id.0)
    }

    /// Look up the first entry named `name` on an object node.
    pub fn field(&self, object: NodeId, name: &str) -> Option<NodeId> {
        match self.get(object)? {
            RawNode::Object(entries) => entries
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, child)| *child),
            _ => None,
        }
    }

    /// Insert a JSON value (and all of its descendants) into the arena.
    pub fn insert_json(&mut self, value: &Value) -> NodeId {
        let node = match value {
            Value::Null => RawNode::Null,
            Value::Bool(b) => RawNode::Bool(*b),
            Value::Number(n) => RawNode::Number(n.clone()),
            Value::String(s) => RawNode::String(s.clone()),
            Value::Array(items) => {
                RawNode::Array(items.iter().map(|item| self.insert_json(item)).collect())
            }
            Value::Object(map) => RawNode::Object(
                map.iter()
                    .map(|(key, child)| (key.clone(), self.insert_json(child)))
                    .collect(),
            ),
        };
        self.push(node)
    }

    /// Convert the subtree rooted at `id` back into a JSON value.
    ///
    /// Shared subtrees are copied once per parent.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::CyclicStructure`] if a container reappears on its
    /// own ancestor path, or [`CardError::DanglingNode`] for ids outside the
    /// arena.
    pub fn to_json(&self, id: NodeId) -> Result<Value, CardError> {
        let mut active = HashSet::new();
        self.to_json_inner(id, &mut active)
    }

    fn to_json_inner(&self, id: NodeId, active: &mut HashSet<NodeId>) -> Result<Value, CardError> {
        let node = self.get(id).ok_or(CardError::DanglingNode(id))?;
        if node.is_container() && !active.insert(id) {
            return Err(CardError::CyclicStructure { node: id });
        }
        let value = match node {
            RawNode::Null => Value::Null,
            RawNode::Bool(b) => Value::Bool(*b),
            RawNode::Number(n) => Value::Number(n.clone()),
            RawNode::String(s) => Value::String(s.clone()),
            RawNode::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.to_json_inner(*item, active))
                    .collect::<Result<_, _>>()?,
            ),
            RawNode::Object(entries) => {
                let mut map = Map::new();
                for (key, child) in entries {
                    map.insert(key.clone(), self.to_json_inner(*child, active)?);
                }
                Value::Object(map)
            }
        };
        active.remove(&id);
        Ok(value)
    }
}
