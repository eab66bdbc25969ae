//! # Workflow Editor
//!
//! The owner of the graph store. It holds the committed graph, the current selection
//! and the module catalog, and turns the canvas' `LogicEvent`s into store mutations.
//! Property editors and page shells talk to it through the same methods.

use glam::Vec2;
use std::collections::HashMap;

use crate::CanvasProps;
use crate::catalog::ModuleCatalog;
use crate::config::CanvasConfig;
use crate::error::EditorError;
use crate::interaction::LogicEvent;
use crate::model::{ConnectionId, FieldValue, GraphState, Node, NodeId, Selection};

/// Id of the node seeded from the catalog's "start" module.
pub const START_NODE_ID: &str = "node-start";
/// Id of the node seeded from the catalog's "export" module.
pub const EXPORT_NODE_ID: &str = "node-export";

pub struct WorkflowEditor {
    graph: GraphState,
    selection: Selection,
    catalog: ModuleCatalog,
    node_size: Vec2,
}

impl WorkflowEditor {
    pub fn new(catalog: ModuleCatalog, config: &CanvasConfig) -> Self {
        Self {
            graph: GraphState::default(),
            selection: Selection::None,
            catalog,
            node_size: config.node_size,
        }
    }

    /// Creates an editor seeded with the "start" and "export" nodes, top-aligned around
    /// the vertical middle of a canvas `canvas_height` pixels tall.
    pub fn with_default_nodes(
        catalog: ModuleCatalog,
        config: &CanvasConfig,
        canvas_height: f32,
    ) -> Self {
        let mut editor = Self::new(catalog, config);
        let top = (canvas_height * 0.5 - editor.node_size.y * 0.5).max(100.0);

        for (id, module_id, x) in [
            (START_NODE_ID, "start", 60.0),
            (EXPORT_NODE_ID, "export", 1200.0),
        ] {
            match editor.catalog.get(module_id) {
                Some(module) => {
                    let node = Node::new(id, module_id, module.name.clone(), Vec2::new(x, top));
                    editor.graph.insert_node(node);
                }
                None => tracing::warn!(module_id, "Default module missing from catalog"),
            }
        }
        editor
    }

    pub fn graph(&self) -> &GraphState {
        &self.graph
    }

    pub fn catalog(&self) -> &ModuleCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selection.node().and_then(|id| self.graph.node(id))
    }

    /// The controlled inputs to pass to the canvas this frame.
    pub fn canvas_props(&self, running: bool) -> CanvasProps {
        CanvasProps {
            selected_connection: self.selection.connection().cloned(),
            running,
        }
    }

    /// Applies one canvas intent to the store and selection.
    pub fn apply(&mut self, event: &LogicEvent) {
        match event {
            LogicEvent::NodeClicked(id) => self.select_node(id),
            LogicEvent::NodeMoved { id, position } => {
                self.graph.move_node(id, position.x, position.y);
            }
            LogicEvent::ConnectionCreated { from, to } => {
                if let Some(id) = self.graph.create_connection(from, to) {
                    tracing::info!(connection_id = %id, %from, %to, "Connection created");
                }
            }
            LogicEvent::ConnectionClicked(Some(id)) => {
                if self.graph.connection(id).is_some() {
                    self.selection = Selection::Connection(id.clone());
                }
            }
            LogicEvent::ConnectionClicked(None) => self.selection = Selection::None,
            LogicEvent::ConnectionDeleteRequested(id) => self.delete_connection(id),
            LogicEvent::ModuleDropped {
                module_id,
                position,
            } => {
                if let Err(e) = self.add_module_node(module_id, *position) {
                    tracing::warn!(error = %e, "Ignoring dropped module");
                }
            }
            LogicEvent::DragOver { .. } | LogicEvent::RepaintNeeded => {}
        }
    }

    /// Applies a batch of canvas intents in order.
    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a LogicEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Selects a node if its module is known to the catalog.
    pub fn select_node(&mut self, id: &NodeId) {
        let Some(node) = self.graph.node(id) else {
            return;
        };
        if self.catalog.get(&node.module_id).is_none() {
            tracing::warn!(node_id = %id, module_id = %node.module_id, "Clicked node has no catalog module");
            return;
        }
        self.selection = Selection::Node(id.clone());
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
    }

    /// Places a new node for `module_id`, centred on the graph-space point `center`.
    pub fn add_module_node(&mut self, module_id: &str, center: Vec2) -> Result<NodeId, EditorError> {
        let module = self
            .catalog
            .get(module_id)
            .ok_or_else(|| EditorError::UnknownModule(module_id.to_string()))?;

        let node = Node::new(
            NodeId::generate(),
            module_id,
            module.name.clone(),
            center - self.node_size * 0.5,
        );
        let id = node.id.clone();
        self.insert_node(node)?;
        tracing::info!(node_id = %id, module_id, "Node placed");
        Ok(id)
    }

    /// Inserts a prepared node, e.g. when a template supplies its initial graph.
    pub fn insert_node(&mut self, node: Node) -> Result<(), EditorError> {
        let id = node.id.clone();
        if self.graph.insert_node(node) {
            Ok(())
        } else {
            Err(EditorError::DuplicateNode(id))
        }
    }

    /// Deletes a node and its connections, clearing the selection if it pointed at either.
    pub fn delete_node(&mut self, id: &NodeId) -> Option<Node> {
        let node = self.graph.delete_node(id)?;
        let selection_gone = match &self.selection {
            Selection::Node(selected) => selected == id,
            Selection::Connection(selected) => self.graph.connection(selected).is_none(),
            Selection::None => false,
        };
        if selection_gone {
            self.selection = Selection::None;
        }
        tracing::info!(node_id = %id, "Node deleted");
        Some(node)
    }

    pub fn delete_connection(&mut self, id: &ConnectionId) {
        if self.graph.delete_connection(id).is_some() {
            tracing::info!(connection_id = %id, "Connection deleted");
        }
        if self.selection.connection() == Some(id) {
            self.selection = Selection::None;
        }
    }

    /// Replaces a node's field values, as saved from the property editor.
    pub fn save_fields(
        &mut self,
        id: &NodeId,
        values: HashMap<String, FieldValue>,
    ) -> Result<(), EditorError> {
        if self.graph.set_field_values(id, values) {
            Ok(())
        } else {
            Err(EditorError::UnknownNode(id.clone()))
        }
    }

    /// The value of `field` on a node, falling back to the catalog default.
    pub fn field_value(&self, id: &NodeId, field: &str) -> Option<FieldValue> {
        let node = self.graph.node(id)?;
        if let Some(value) = node.field_values.get(field) {
            return Some(value.clone());
        }
        self.catalog
            .get(&node.module_id)?
            .field(field)?
            .default_field_value()
    }
}
