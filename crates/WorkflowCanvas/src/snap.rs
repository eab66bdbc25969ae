//! Proximity detection for connection targets.

use glam::Vec2;

use crate::config::SnapConfig;
use crate::handles::{HandleLocator, HandleSide};
use crate::math::Rect;
use crate::model::{Node, NodeId};

/// The forgiving region around a node's input side.
///
/// Spans `margin.x` on both sides of the left edge and the body height plus `margin.y`
/// above and below.
pub fn input_region(node: &Node, node_size: Vec2, snap: &SnapConfig) -> Rect {
    let margin = snap.region_margin;
    Rect::from_min_max(
        Vec2::new(node.position.x - margin.x, node.position.y - margin.y),
        Vec2::new(node.position.x + margin.x, node.position.y + node_size.y + margin.y),
    )
}

/// Finds the node whose input handle the pointer should snap to.
///
/// A node is eligible if the pointer is inside its input region, or closer than
/// `snap.distance` to its input handle. Among eligible nodes the one with the nearest
/// input handle wins; ties keep the earlier node. `exclude` (the connection source)
/// is never returned.
pub fn find_snap_target<'a>(
    pointer: Vec2,
    nodes: impl IntoIterator<Item = &'a Node>,
    exclude: Option<&NodeId>,
    handles: &impl HandleLocator,
    node_size: Vec2,
    snap: &SnapConfig,
) -> Option<NodeId> {
    let mut closest: Option<(&NodeId, f32)> = None;

    for node in nodes {
        if exclude == Some(&node.id) {
            continue;
        }
        let Some(input) = handles.locate(node, HandleSide::Input) else {
            continue;
        };

        let distance = pointer.distance(input);
        let in_region = input_region(node, node_size, snap).contains(pointer);
        if !in_region && distance >= snap.distance {
            continue;
        }

        if closest.is_none_or(|(_, best)| distance < best) {
            closest = Some((&node.id, distance));
        }
    }

    closest.map(|(id, _)| id.clone())
}
