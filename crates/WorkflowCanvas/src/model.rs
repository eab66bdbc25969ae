//! # Core Data Models
//!
//! This module defines the workflow graph: nodes placed from the module catalog and
//! directed connections between them. `GraphState` is the store that owns both
//! collections and enforces the graph invariants:
//!
//! - node positions are never negative (graph-space has no negative region),
//! - connections never form a self-loop,
//! - at most one connection exists per ordered `(from, to)` pair,
//! - a connection never references a node that is not in the store.
//!
//! The store holds no rendering or interaction logic.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a Node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

/// Unique identifier for a Connection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(pub String);

impl NodeId {
    /// Generates a fresh `node-<uuid>` identifier.
    pub fn generate() -> Self {
        Self(format!("node-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ConnectionId {
    /// Generates a fresh `conn-<uuid>` identifier.
    pub fn generate() -> Self {
        Self(format!("conn-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for ConnectionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A value entered for one of a node's configurable fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

/// A placed instance of a catalog module.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Catalog key of the module this node instantiates.
    pub module_id: String,
    /// Label shown on the node body.
    pub display_name: String,
    /// Graph-space position of the top-left corner.
    pub position: Vec2,
    /// Values entered through the property editor, keyed by field name.
    #[serde(default)]
    pub field_values: HashMap<String, FieldValue>,
}

impl Node {
    pub fn new(
        id: impl Into<NodeId>,
        module_id: impl Into<String>,
        display_name: impl Into<String>,
        position: Vec2,
    ) -> Self {
        Self {
            id: id.into(),
            module_id: module_id.into(),
            display_name: display_name.into(),
            position: position.max(Vec2::ZERO),
            field_values: HashMap::new(),
        }
    }
}

/// A directed edge from the output side of one node to the input side of another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub from: NodeId,
    pub to: NodeId,
}

/// What the user currently has selected. Selecting one kind clears the other.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Node(NodeId),
    Connection(ConnectionId),
}

impl Selection {
    pub fn node(&self) -> Option<&NodeId> {
        match self {
            Selection::Node(id) => Some(id),
            _ => None,
        }
    }

    pub fn connection(&self) -> Option<&ConnectionId> {
        match self {
            Selection::Connection(id) => Some(id),
            _ => None,
        }
    }
}

/// The Graph Store.
///
/// Nodes and connections are kept in insertion order, which is also the paint order
/// (later nodes are drawn on top). All mutation goes through the methods below so the
/// invariants listed in the module docs always hold. Every mutation is safe to repeat:
/// operations on missing ids are no-ops.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GraphState {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
}

impl GraphState {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn connection(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| &c.id == id)
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Inserts a node, clamping its position into the non-negative region.
    ///
    /// Returns `false` (and leaves the store untouched) if a node with the same id exists.
    pub fn insert_node(&mut self, mut node: Node) -> bool {
        if self.contains_node(&node.id) {
            return false;
        }
        node.position = node.position.max(Vec2::ZERO);
        self.nodes.push(node);
        true
    }

    /// Batch insert. Nodes whose id is already taken are skipped.
    ///
    /// Returns the number of nodes actually inserted.
    pub fn insert_nodes(&mut self, nodes: impl IntoIterator<Item = Node>) -> usize {
        nodes
            .into_iter()
            .map(|node| self.insert_node(node))
            .filter(|inserted| *inserted)
            .count()
    }

    /// Overwrites a node's position, clamping both coordinates to be non-negative.
    ///
    /// Returns `false` if the node does not exist.
    pub fn move_node(&mut self, id: &NodeId, x: f32, y: f32) -> bool {
        match self.nodes.iter_mut().find(|n| &n.id == id) {
            Some(node) => {
                node.position = Vec2::new(x, y).max(Vec2::ZERO);
                true
            }
            None => false,
        }
    }

    /// Creates a connection `from -> to`.
    ///
    /// Self-loops, duplicate ordered pairs and pairs referencing unknown nodes are
    /// ignored and yield `None`.
    pub fn create_connection(&mut self, from: &NodeId, to: &NodeId) -> Option<ConnectionId> {
        if from == to || self.has_connection(from, to) {
            return None;
        }
        if !self.contains_node(from) || !self.contains_node(to) {
            return None;
        }
        let id = ConnectionId::generate();
        self.connections.push(Connection {
            id: id.clone(),
            from: from.clone(),
            to: to.clone(),
        });
        Some(id)
    }

    pub fn has_connection(&self, from: &NodeId, to: &NodeId) -> bool {
        self.connections
            .iter()
            .any(|c| &c.from == from && &c.to == to)
    }

    /// Removes a connection by id. No-op if absent.
    pub fn delete_connection(&mut self, id: &ConnectionId) -> Option<Connection> {
        let idx = self.connections.iter().position(|c| &c.id == id)?;
        Some(self.connections.remove(idx))
    }

    /// Removes a node and every connection where it is either endpoint.
    pub fn delete_node(&mut self, id: &NodeId) -> Option<Node> {
        let idx = self.nodes.iter().position(|n| &n.id == id)?;
        let node = self.nodes.remove(idx);
        self.connections.retain(|c| &c.from != id && &c.to != id);
        Some(node)
    }

    /// Replaces a node's field values. Returns `false` if the node does not exist.
    pub fn set_field_values(&mut self, id: &NodeId, values: HashMap<String, FieldValue>) -> bool {
        match self.nodes.iter_mut().find(|n| &n.id == id) {
            Some(node) => {
                node.field_values = values;
                true
            }
            None => false,
        }
    }

    /// Connections arriving at `id`.
    pub fn incoming<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a Connection> + 'a {
        self.connections.iter().filter(move |c| &c.to == id)
    }

    /// The source node of the first connection arriving at `id`.
    ///
    /// The property editor uses this to offer values inherited from the previous step.
    pub fn upstream_of(&self, id: &NodeId) -> Option<&Node> {
        self.incoming(id).next().and_then(|c| self.node(&c.from))
    }
}
