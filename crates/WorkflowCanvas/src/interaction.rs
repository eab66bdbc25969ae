use glam::Vec2;

use crate::config::CanvasConfig;
use crate::handles::{HandleResolver, HandleSide};
use crate::input::{InputState, Key};
use crate::math::{self, Rect};
use crate::model::{ConnectionId, GraphState, NodeId};
use crate::snap;
use crate::view::View;

/// Events emitted by the Canvas logic to the host application.
///
/// The Canvas never mutates the graph itself; the owner applies these intents to its
/// store and passes the updated graph back on the next frame.
#[derive(Clone, Debug, PartialEq)]
pub enum LogicEvent {
    /// A node was clicked (pressed and released without moving).
    NodeClicked(NodeId),
    /// A dragged node should move to `position` (graph space, already clamped).
    NodeMoved { id: NodeId, position: Vec2 },
    /// Request to connect `from`'s output to `to`'s input.
    ConnectionCreated { from: NodeId, to: NodeId },
    /// A connection curve was clicked. `None` means the background was clicked and
    /// the selection should be cleared.
    ConnectionClicked(Option<ConnectionId>),
    /// Delete/Backspace was pressed while a connection was selected.
    ConnectionDeleteRequested(ConnectionId),
    /// A palette drag is hovering the canvas at `position` (graph space).
    DragOver { position: Vec2 },
    /// A palette module was dropped at `position` (graph space).
    ModuleDropped { module_id: String, position: Vec2 },
    /// The graph visual state has changed, requiring a repaint.
    /// This is useful for power efficiency (e.g., only render when dirty).
    RepaintNeeded,
}

/// The current state of the pointer session. Exactly one session can be active.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum InteractionMode {
    /// No active interaction.
    #[default]
    Idle,
    /// User is repositioning a node.
    DraggingNode {
        node: NodeId,
        /// `pointer - node.position` at press time (Graph Space).
        offset: Vec2,
        /// Set once a pointer move was observed; a session without one is a click.
        moved: bool,
    },
    /// User is dragging a new connection out of a node's output handle.
    DraggingConnection {
        source: NodeId,
        /// Current temporary endpoint of the wire (Graph Space).
        cursor: Vec2,
        /// Node whose input the wire currently snaps to.
        snap_target: Option<NodeId>,
    },
}

impl InteractionMode {
    pub fn dragging_node(&self) -> Option<&NodeId> {
        match self {
            InteractionMode::DraggingNode { node, .. } => Some(node),
            _ => None,
        }
    }

    pub fn connecting_from(&self) -> Option<&NodeId> {
        match self {
            InteractionMode::DraggingConnection { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn snap_target(&self) -> Option<&NodeId> {
        match self {
            InteractionMode::DraggingConnection { snap_target, .. } => snap_target.as_ref(),
            _ => None,
        }
    }
}

/// Pointer bookkeeping carried between frames.
///
/// Press and release edges, and whether the pointer moved, are derived by comparing the
/// current `InputState` to these values.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    pub primary_was_down: bool,
    pub last_pointer: Option<Vec2>,
    pub hovered_node: Option<NodeId>,
    pub hovered_connection: Option<ConnectionId>,
}

/// What lies under a graph-space point.
#[derive(Clone, Debug, PartialEq)]
pub enum HitTarget {
    OutputHandle(NodeId),
    InputHandle(NodeId),
    Node(NodeId),
    Connection(ConnectionId),
    Background,
}

impl HitTarget {
    /// The node this hit belongs to, handles included.
    pub fn node(&self) -> Option<&NodeId> {
        match self {
            HitTarget::OutputHandle(id) | HitTarget::InputHandle(id) | HitTarget::Node(id) => {
                Some(id)
            }
            _ => None,
        }
    }
}

/// Graph-space rectangle of a node body.
pub fn node_rect(position: Vec2, config: &CanvasConfig) -> Rect {
    Rect::new(position, config.node_size)
}

/// Hit-tests a graph-space point.
///
/// Handles win over node bodies, node bodies over curves. Nodes are tested front to
/// back: the node being dragged first, then in reverse paint order.
pub fn hit_test(
    graph: &GraphState,
    config: &CanvasConfig,
    handles: &HandleResolver<'_>,
    dragging: Option<&NodeId>,
    pos: Vec2,
) -> HitTarget {
    let front_to_back = || {
        let dragged = dragging.and_then(|id| graph.node(id));
        dragged.into_iter().chain(
            graph
                .nodes()
                .iter()
                .rev()
                .filter(move |n| Some(&n.id) != dragging),
        )
    };

    for node in front_to_back() {
        if handles.resolve(node, HandleSide::Output).distance(pos) <= config.handle_hit_radius {
            return HitTarget::OutputHandle(node.id.clone());
        }
        if handles.resolve(node, HandleSide::Input).distance(pos) <= config.handle_hit_radius {
            return HitTarget::InputHandle(node.id.clone());
        }
    }

    for node in front_to_back() {
        if node_rect(node.position, config).contains(pos) {
            return HitTarget::Node(node.id.clone());
        }
    }

    for connection in graph.connections().iter().rev() {
        let (Some(from), Some(to)) = (graph.node(&connection.from), graph.node(&connection.to))
        else {
            continue;
        };
        let start = handles.resolve(from, HandleSide::Output);
        let end = handles.resolve(to, HandleSide::Input);
        if math::distance_to_curve(pos, start, end, &config.curve) <= config.connection_hit_tolerance
        {
            return HitTarget::Connection(connection.id.clone());
        }
    }

    HitTarget::Background
}

/// Size of the scrollable content: every node plus one node of padding, never smaller
/// than the viewport.
pub fn content_extent(graph: &GraphState, config: &CanvasConfig, view: &View) -> Vec2 {
    graph
        .nodes()
        .iter()
        .map(|n| n.position + config.node_size * 2.0)
        .fold(view.viewport_size, Vec2::max)
}

/// Handles user interactions and updates the transient canvas state.
///
/// This function acts as the central state machine for the Canvas. It processes
/// input based on the current `InteractionMode` and transitions between states.
/// It emits `LogicEvent`s when the owner needs to act (e.g., connection created).
///
/// # Arguments
/// * `mode` - The current interaction mode (will be mutated on state transitions).
/// * `pointer` - Pointer bookkeeping from the previous frame.
/// * `view` - The viewport state, mutated when scrolling.
/// * `config` - Configuration settings (e.g., snap tuning).
/// * `input` - The input state for the current frame.
/// * `graph` - The latest graph snapshot. Read only.
/// * `selected_connection` - The owner's currently selected connection.
/// * `events` - A buffer to push `LogicEvent`s into.
#[allow(clippy::too_many_arguments)]
pub fn handle_interactions(
    mode: &mut InteractionMode,
    pointer: &mut PointerTracker,
    view: &mut View,
    config: &CanvasConfig,
    input: &InputState,
    graph: &GraphState,
    selected_connection: Option<&ConnectionId>,
    events: &mut Vec<LogicEvent>,
) {
    // Keyboard Shortcuts
    if !input.text_input_focused
        && (input.key_pressed(Key::Delete) || input.key_pressed(Key::Backspace))
        && let Some(id) = selected_connection
    {
        events.push(LogicEvent::ConnectionDeleteRequested(id.clone()));
        events.push(LogicEvent::RepaintNeeded);
    }

    // Pointer handling sees the scroll offset the host painted (and measured) with.
    let next_mode = {
        let view = &*view;
        let handles = HandleResolver::new(input.measured_handles.as_ref(), view, config);
        let frame = Frame {
            pointer_graph: view.client_to_graph(input.pointer_pos),
            in_canvas: view.contains_client(input.pointer_pos),
            pressed: input.mouse_buttons.primary && !pointer.primary_was_down,
            released: !input.mouse_buttons.primary && pointer.primary_was_down,
            moved: pointer
                .last_pointer
                .is_some_and(|last| last != input.pointer_pos),
        };

        if !frame.in_canvas {
            clear_hover(pointer, events);
        }

        match mode {
            InteractionMode::Idle => {
                handle_idle(pointer, config, input, graph, &handles, &frame, events)
            }
            InteractionMode::DraggingNode {
                node,
                offset,
                moved,
            } => handle_dragging_node(graph, node, *offset, moved, &frame, events),
            InteractionMode::DraggingConnection {
                source,
                cursor,
                snap_target,
            } => handle_dragging_connection(
                config,
                graph,
                &handles,
                source,
                cursor,
                snap_target,
                &frame,
                events,
            ),
        }
    };

    if let Some(new_mode) = next_mode {
        tracing::debug!(from = ?mode, to = ?new_mode, "Interaction mode changed");
        if new_mode == InteractionMode::Idle {
            clear_hover(pointer, events);
        }
        *mode = new_mode;
    }

    // Scrolling
    if input.scroll_delta != Vec2::ZERO {
        let extent = content_extent(graph, config, view);
        if view.scroll_by(input.scroll_delta * config.scroll_speed, extent) {
            events.push(LogicEvent::RepaintNeeded);
        }
    }

    pointer.primary_was_down = input.mouse_buttons.primary;
    pointer.last_pointer = Some(input.pointer_pos);
}

/// Per-frame pointer facts shared by the state handlers.
struct Frame {
    pointer_graph: Vec2,
    in_canvas: bool,
    pressed: bool,
    released: bool,
    moved: bool,
}

fn clear_hover(pointer: &mut PointerTracker, events: &mut Vec<LogicEvent>) {
    if pointer.hovered_node.take().is_some() | pointer.hovered_connection.take().is_some() {
        events.push(LogicEvent::RepaintNeeded);
    }
}

/// Handles the `Idle` state.
///
/// Tracks hover, palette drops, and checks for a press to transition into:
/// - `DraggingConnection` (pressing an output handle)
/// - `DraggingNode` (pressing a node body)
///
/// Pressing a curve or the background emits a selection event and stays `Idle`.
fn handle_idle(
    pointer: &mut PointerTracker,
    config: &CanvasConfig,
    input: &InputState,
    graph: &GraphState,
    handles: &HandleResolver<'_>,
    frame: &Frame,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionMode> {
    if !frame.in_canvas {
        return None;
    }

    if let Some(drag) = &input.external_drag {
        if drag.released {
            events.push(LogicEvent::ModuleDropped {
                module_id: drag.module_id.clone(),
                position: frame.pointer_graph,
            });
            events.push(LogicEvent::RepaintNeeded);
        } else {
            events.push(LogicEvent::DragOver {
                position: frame.pointer_graph,
            });
        }
        return None;
    }

    let hit = hit_test(graph, config, handles, None, frame.pointer_graph);

    let hovered_node = hit.node().cloned();
    let hovered_connection = match &hit {
        HitTarget::Connection(id) => Some(id.clone()),
        _ => None,
    };
    if hovered_node != pointer.hovered_node || hovered_connection != pointer.hovered_connection {
        pointer.hovered_node = hovered_node;
        pointer.hovered_connection = hovered_connection;
        events.push(LogicEvent::RepaintNeeded);
    }

    if !frame.pressed {
        return None;
    }

    match hit {
        HitTarget::OutputHandle(source) => {
            events.push(LogicEvent::RepaintNeeded);
            Some(InteractionMode::DraggingConnection {
                source,
                cursor: frame.pointer_graph,
                snap_target: None,
            })
        }
        // Input handles only accept connections.
        HitTarget::InputHandle(_) => None,
        HitTarget::Node(id) => {
            let position = graph.node(&id)?.position;
            events.push(LogicEvent::RepaintNeeded);
            Some(InteractionMode::DraggingNode {
                node: id,
                offset: frame.pointer_graph - position,
                moved: false,
            })
        }
        HitTarget::Connection(id) => {
            events.push(LogicEvent::ConnectionClicked(Some(id)));
            events.push(LogicEvent::RepaintNeeded);
            None
        }
        HitTarget::Background => {
            events.push(LogicEvent::ConnectionClicked(None));
            None
        }
    }
}

/// Handles the `DraggingNode` state.
///
/// Each pointer move repositions the node at `pointer - offset`, clamped to the
/// non-negative region. Releasing without any move is reported as a click.
fn handle_dragging_node(
    graph: &GraphState,
    node: &NodeId,
    offset: Vec2,
    moved: &mut bool,
    frame: &Frame,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionMode> {
    if !graph.contains_node(node) {
        tracing::debug!(node_id = %node, "Dragged node disappeared, ending drag");
        return Some(InteractionMode::Idle);
    }

    // A move reported together with the release still counts as a drag.
    if frame.moved {
        *moved = true;
        let position = (frame.pointer_graph - offset).max(Vec2::ZERO);
        events.push(LogicEvent::NodeMoved {
            id: node.clone(),
            position,
        });
        events.push(LogicEvent::RepaintNeeded);
    }

    if frame.released {
        if !*moved {
            events.push(LogicEvent::NodeClicked(node.clone()));
        }
        events.push(LogicEvent::RepaintNeeded);
        return Some(InteractionMode::Idle);
    }
    None
}

/// Handles the `DraggingConnection` state.
///
/// Updates the temporary wire endpoint and the snap target whenever the pointer moves,
/// including on the release frame. On release, the snap target (or, failing that, a
/// fresh check at the release point) becomes the connection's target.
#[allow(clippy::too_many_arguments)]
fn handle_dragging_connection(
    config: &CanvasConfig,
    graph: &GraphState,
    handles: &HandleResolver<'_>,
    source: &NodeId,
    cursor: &mut Vec2,
    snap_target: &mut Option<NodeId>,
    frame: &Frame,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionMode> {
    if !graph.contains_node(source) {
        tracing::debug!(node_id = %source, "Connection source disappeared, cancelling");
        return Some(InteractionMode::Idle);
    }
    if snap_target.as_ref().is_some_and(|t| !graph.contains_node(t)) {
        *snap_target = None;
    }

    let find_target = |pos: Vec2| {
        snap::find_snap_target(
            pos,
            graph.nodes(),
            Some(source),
            handles,
            config.node_size,
            &config.snap,
        )
    };

    if frame.moved {
        *cursor = frame.pointer_graph;
        *snap_target = find_target(frame.pointer_graph);
        events.push(LogicEvent::RepaintNeeded);
    }

    if frame.released {
        let target = snap_target.take().or_else(|| find_target(frame.pointer_graph));
        match target {
            Some(to) if &to != source => {
                tracing::debug!(from = %source, to = %to, "Connection gesture completed");
                events.push(LogicEvent::ConnectionCreated {
                    from: source.clone(),
                    to,
                });
            }
            _ => tracing::debug!(from = %source, "Connection released without target"),
        }
        events.push(LogicEvent::RepaintNeeded);
        return Some(InteractionMode::Idle);
    }
    None
}
