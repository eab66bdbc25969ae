use bitflags::bitflags;
use glam::{Vec2, Vec4};

use crate::CanvasProps;
use crate::config::CanvasConfig;
use crate::handles::{HandleResolver, HandleSide};
use crate::interaction::{InteractionMode, PointerTracker};
use crate::math;
use crate::model::{GraphState, Node};
use crate::render::{Dash, DrawCommand, RenderList, TextAnchor};
use crate::view::View;

bitflags! {
    /// Transient visual state of a node for the current frame.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct NodeVisual: u8 {
        /// The pointer is over the node or one of its handles.
        const HOVERED = 1 << 0;
        /// The node is being dragged.
        const DRAGGING = 1 << 1;
        /// A connection is being dragged out of this node.
        const CONNECTING_SOURCE = 1 << 2;
        /// The in-progress connection snaps to this node's input.
        const SNAP_TARGET = 1 << 3;
    }
}

impl NodeVisual {
    pub fn for_node(node: &Node, mode: &InteractionMode, pointer: &PointerTracker) -> Self {
        let mut flags = NodeVisual::empty();
        flags.set(
            NodeVisual::HOVERED,
            pointer.hovered_node.as_ref() == Some(&node.id),
        );
        flags.set(NodeVisual::DRAGGING, mode.dragging_node() == Some(&node.id));
        flags.set(
            NodeVisual::CONNECTING_SOURCE,
            mode.connecting_from() == Some(&node.id),
        );
        flags.set(NodeVisual::SNAP_TARGET, mode.snap_target() == Some(&node.id));
        flags
    }

    fn output_active(self) -> bool {
        self.intersects(NodeVisual::HOVERED | NodeVisual::CONNECTING_SOURCE)
    }

    fn input_active(self) -> bool {
        self.intersects(NodeVisual::HOVERED | NodeVisual::SNAP_TARGET)
    }
}

/// Everything the painter reads for one frame.
pub struct PaintContext<'a> {
    pub view: &'a View,
    pub config: &'a CanvasConfig,
    pub graph: &'a GraphState,
    pub mode: &'a InteractionMode,
    pub pointer: &'a PointerTracker,
    pub props: &'a CanvasProps,
    pub handles: &'a HandleResolver<'a>,
    /// Current dash offset of the running overlay.
    pub flow_phase: f32,
}

/// High-level renderer for the workflow graph.
///
/// The `Painter` converts the graph and the transient interaction state into concrete
/// drawing commands (`RenderList`). Layers, back to front:
/// - Background and grid
/// - Connection curves (with the running overlay)
/// - The in-progress connection preview
/// - Nodes and their handles, the dragged node last
/// - The empty-canvas hint
pub struct Painter;

impl Painter {
    /// Generates a list of draw commands to render the entire graph.
    pub fn draw_graph(ctx: &PaintContext<'_>) -> RenderList {
        let mut draw_list = Vec::new();

        Self::draw_background(ctx, &mut draw_list);
        Self::draw_connections(ctx, &mut draw_list);
        Self::draw_preview(ctx, &mut draw_list);

        let dragging = ctx.mode.dragging_node();
        let (top, rest): (Vec<&Node>, Vec<&Node>) = ctx
            .graph
            .nodes()
            .iter()
            .partition(|n| Some(&n.id) == dragging);
        for node in rest.into_iter().chain(top) {
            Self::draw_node(ctx, node, &mut draw_list);
        }

        if ctx.graph.nodes().is_empty() {
            let style = &ctx.config.style;
            draw_list.push(DrawCommand::Text {
                pos: ctx.view.origin + ctx.view.viewport_size * 0.5,
                anchor: TextAnchor::Center,
                text: style.empty_hint.clone(),
                color: style.hint_color,
                size: 14.0,
            });
        }

        draw_list
    }

    /// Renders the background and a grid that scrolls with the content.
    fn draw_background(ctx: &PaintContext<'_>, draw_list: &mut RenderList) {
        let view = ctx.view;
        let style = &ctx.config.style;

        draw_list.push(DrawCommand::Rect {
            pos: view.origin,
            size: view.viewport_size,
            color: style.background_color,
            corner_radius: 0.0,
            stroke_width: 0.0,
            stroke_color: None,
        });

        let grid = style.grid_size;
        if grid <= 0.0 {
            return;
        }
        let (min, max) = view.visible_graph_bounds();

        // Vertical Lines
        let mut x = (min.x / grid).ceil() * grid;
        while x <= max.x {
            draw_list.push(DrawCommand::Line {
                start: view.graph_to_client(Vec2::new(x, min.y)),
                end: view.graph_to_client(Vec2::new(x, max.y)),
                color: style.grid_color,
                width: 1.0,
            });
            x += grid;
        }

        // Horizontal Lines
        let mut y = (min.y / grid).ceil() * grid;
        while y <= max.y {
            draw_list.push(DrawCommand::Line {
                start: view.graph_to_client(Vec2::new(min.x, y)),
                end: view.graph_to_client(Vec2::new(max.x, y)),
                color: style.grid_color,
                width: 1.0,
            });
            y += grid;
        }
    }

    fn draw_connections(ctx: &PaintContext<'_>, draw_list: &mut RenderList) {
        let edge = &ctx.config.style.edge;
        let flow = &ctx.config.style.flow;

        for connection in ctx.graph.connections() {
            let (Some(from), Some(to)) = (
                ctx.graph.node(&connection.from),
                ctx.graph.node(&connection.to),
            ) else {
                tracing::warn!(
                    connection_id = %connection.id,
                    from = %connection.from,
                    to = %connection.to,
                    "Skipping connection with a missing endpoint node"
                );
                continue;
            };

            let start = ctx
                .view
                .graph_to_client(ctx.handles.resolve(from, HandleSide::Output));
            let end = ctx
                .view
                .graph_to_client(ctx.handles.resolve(to, HandleSide::Input));
            let (cp1, cp2) = math::calculate_bezier_points(start, end, &ctx.config.curve);

            let selected = ctx.props.selected_connection.as_ref() == Some(&connection.id);
            let hovered = ctx.pointer.hovered_connection.as_ref() == Some(&connection.id);
            let (color, width) = if selected {
                (edge.selected_color, edge.selected_width)
            } else if hovered {
                (edge.hover_color, edge.hover_width)
            } else {
                (edge.color, edge.width)
            };

            draw_list.push(DrawCommand::Bezier {
                start,
                cp1,
                cp2,
                end,
                color,
                width,
                dash: None,
            });

            if ctx.props.running {
                draw_list.push(DrawCommand::Bezier {
                    start,
                    cp1,
                    cp2,
                    end,
                    color: flow.color,
                    width: flow.width,
                    dash: Some(Dash {
                        dash: flow.dash.x,
                        gap: flow.dash.y,
                        offset: ctx.flow_phase,
                    }),
                });
            }
        }
    }

    /// Renders the wire being dragged out of an output handle.
    fn draw_preview(ctx: &PaintContext<'_>, draw_list: &mut RenderList) {
        let InteractionMode::DraggingConnection {
            source,
            cursor,
            snap_target,
        } = ctx.mode
        else {
            return;
        };
        let Some(source_node) = ctx.graph.node(source) else {
            return;
        };

        let end = snap_target
            .as_ref()
            .filter(|target| *target != source)
            .and_then(|target| ctx.graph.node(target))
            .map(|target| ctx.handles.resolve(target, HandleSide::Input))
            .unwrap_or(*cursor);

        let start = ctx
            .view
            .graph_to_client(ctx.handles.resolve(source_node, HandleSide::Output));
        let end = ctx.view.graph_to_client(end);
        let (cp1, cp2) = math::calculate_bezier_points(start, end, &ctx.config.curve);

        let edge = &ctx.config.style.edge;
        let mut color = edge.color;
        color.w *= edge.preview_opacity;

        draw_list.push(DrawCommand::Bezier {
            start,
            cp1,
            cp2,
            end,
            color,
            width: edge.width,
            dash: Some(Dash {
                dash: edge.preview_dash.x,
                gap: edge.preview_dash.y,
                offset: 0.0,
            }),
        });
    }

    fn draw_node(ctx: &PaintContext<'_>, node: &Node, draw_list: &mut RenderList) {
        let style = &ctx.config.style;
        let visual = NodeVisual::for_node(node, ctx.mode, ctx.pointer);
        let screen_pos = ctx.view.graph_to_client(node.position);
        let size = ctx.config.node_size;

        let highlighted = visual.intersects(NodeVisual::HOVERED | NodeVisual::DRAGGING);
        draw_list.push(DrawCommand::Rect {
            pos: screen_pos,
            size,
            color: style.node.color,
            corner_radius: style.node.corner_radius,
            stroke_width: 2.0,
            stroke_color: Some(if highlighted {
                style.node.active_border_color
            } else {
                style.node.border_color
            }),
        });

        draw_list.push(DrawCommand::Text {
            pos: screen_pos + size * 0.5,
            anchor: TextAnchor::Center,
            text: node.display_name.clone(),
            color: style.node.text_color,
            size: style.node.font_size,
        });

        // Render Handles
        let handle = &style.handle;
        for side in [HandleSide::Output, HandleSide::Input] {
            let active = match side {
                HandleSide::Output => visual.output_active(),
                HandleSide::Input => visual.input_active(),
            };
            let snapped = side == HandleSide::Input && visual.contains(NodeVisual::SNAP_TARGET);

            let (color, border): (Vec4, Vec4) = if snapped {
                (handle.snap_color, handle.active_border_color)
            } else if active {
                (handle.active_color, handle.active_border_color)
            } else {
                (handle.idle_color, handle.idle_border_color)
            };
            let radius = if active {
                ctx.config.handle_radius * handle.active_scale
            } else {
                ctx.config.handle_radius
            };

            draw_list.push(DrawCommand::Circle {
                center: ctx.view.graph_to_client(ctx.handles.resolve(node, side)),
                radius,
                color,
                stroke_width: 2.0,
                stroke_color: Some(border),
            });
        }
    }
}
