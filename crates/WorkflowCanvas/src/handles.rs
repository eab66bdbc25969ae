//! # Connection Handles
//!
//! Each node has an output handle on its right edge and an input handle on its left
//! edge, both vertically centred. Where a handle actually ends up on screen depends on
//! how the host laid the node out, so positions are resolved through the
//! [`HandleLocator`] capability:
//!
//! - [`MeasuredHandles`] holds rectangles the host reports after painting (client space).
//! - [`ComputedHandles`] derives positions from the node position and the configured size.
//!
//! [`HandleResolver`] prefers the measured geometry and falls back to the computed one
//! when a measurement is missing (e.g. before the first paint).

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::CanvasConfig;
use crate::math::Rect;
use crate::model::{Node, NodeId};
use crate::view::View;

/// Which side of a node a handle sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleSide {
    /// Left edge. Accepts connections.
    Input,
    /// Right edge. Starts connections.
    Output,
}

/// Something that can tell where a node's handle is, in graph space.
pub trait HandleLocator {
    fn locate(&self, node: &Node, side: HandleSide) -> Option<Vec2>;
}

/// Geometric handle positions derived from the node position and size.
#[derive(Clone, Copy, Debug)]
pub struct ComputedHandles {
    pub node_size: Vec2,
    pub radius: f32,
}

impl ComputedHandles {
    pub fn from_config(config: &CanvasConfig) -> Self {
        Self {
            node_size: config.node_size,
            radius: config.handle_radius,
        }
    }

    pub fn position(&self, node: &Node, side: HandleSide) -> Vec2 {
        let center_y = node.position.y + self.node_size.y * 0.5;
        match side {
            HandleSide::Output => {
                Vec2::new(node.position.x + self.node_size.x + self.radius, center_y)
            }
            HandleSide::Input => Vec2::new(node.position.x - self.radius, center_y),
        }
    }
}

impl HandleLocator for ComputedHandles {
    fn locate(&self, node: &Node, side: HandleSide) -> Option<Vec2> {
        Some(self.position(node, side))
    }
}

/// Handle rectangles as actually painted by the host, in client space.
///
/// Hosts record these after laying out a frame and pass them back with the next
/// `InputState`. Stale entries for deleted nodes are harmless: lookups are by id.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MeasuredHandles {
    rects: HashMap<NodeId, [Option<Rect>; 2]>,
}

impl MeasuredHandles {
    fn slot(side: HandleSide) -> usize {
        match side {
            HandleSide::Input => 0,
            HandleSide::Output => 1,
        }
    }

    /// Records the client-space rectangle of a painted handle.
    pub fn record(&mut self, node: NodeId, side: HandleSide, client_rect: Rect) {
        self.rects.entry(node).or_default()[Self::slot(side)] = Some(client_rect);
    }

    pub fn get(&self, node: &NodeId, side: HandleSide) -> Option<Rect> {
        self.rects.get(node).and_then(|slots| slots[Self::slot(side)])
    }
}

/// Resolves handle positions, preferring measured geometry.
pub struct HandleResolver<'a> {
    measured: Option<&'a MeasuredHandles>,
    view: &'a View,
    fallback: ComputedHandles,
}

impl<'a> HandleResolver<'a> {
    pub fn new(measured: Option<&'a MeasuredHandles>, view: &'a View, config: &CanvasConfig) -> Self {
        Self {
            measured,
            view,
            fallback: ComputedHandles::from_config(config),
        }
    }

    /// Graph-space centre of a node's handle. Never fails thanks to the fallback.
    pub fn resolve(&self, node: &Node, side: HandleSide) -> Vec2 {
        self.measured
            .and_then(|m| m.get(&node.id, side))
            .map(|rect| self.view.client_to_graph(rect.center()))
            .unwrap_or_else(|| self.fallback.position(node, side))
    }
}

impl HandleLocator for HandleResolver<'_> {
    fn locate(&self, node: &Node, side: HandleSide) -> Option<Vec2> {
        Some(self.resolve(node, side))
    }
}
