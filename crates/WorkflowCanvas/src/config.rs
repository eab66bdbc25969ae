//! # Configuration
//!
//! This module defines the configuration struct for the Canvas.
//!
//! The geometry constants below are product tuning values. They are kept as named
//! defaults so that snapping and curve shape stay identical across hosts.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

/// Width of a node body in graph-space pixels.
pub const NODE_WIDTH: f32 = 120.0;
/// Height of a node body in graph-space pixels.
pub const NODE_HEIGHT: f32 = 60.0;
/// Radius of the circular input/output handles.
pub const HANDLE_RADIUS: f32 = 5.0;
/// Pointer distance to an input handle below which a node becomes a snap target.
pub const SNAP_DISTANCE: f32 = 100.0;
/// Horizontal half-width of the snap region centred on a node's left edge.
pub const SNAP_MARGIN_X: f32 = 50.0;
/// Vertical margin added above and below a node's body for the snap region.
pub const SNAP_MARGIN_Y: f32 = 20.0;
/// Curve control-point offset as a fraction of the endpoint distance.
pub const BEZIER_OFFSET_FACTOR: f32 = 0.4;
/// Lower clamp of the curve control-point offset.
pub const BEZIER_MIN_OFFSET: f32 = 50.0;
/// Upper clamp of the curve control-point offset.
pub const BEZIER_MAX_OFFSET: f32 = 150.0;
/// Spacing of the background grid.
pub const GRID_SIZE: f32 = 20.0;

/// Configuration parameters for the Canvas.
///
/// These settings allow the host application to tune the feel of the canvas interactions.
/// Every field has a default, so hosts may deserialize partial overrides.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Size of every node body. Default: 120x60.
    pub node_size: Vec2,
    /// Radius of the connection handles. Default: 5.0.
    pub handle_radius: f32,
    /// Pointer distance at which a handle counts as hit. Default: 8.0.
    pub handle_hit_radius: f32,
    /// Max pointer distance to a curve for it to be clicked. Default: 6.0.
    pub connection_hit_tolerance: f32,
    /// Multiplier applied to wheel deltas when scrolling. Default: 1.0.
    pub scroll_speed: f32,
    /// Snap detection tuning.
    pub snap: SnapConfig,
    /// Connection curve shape.
    pub curve: CurveConfig,
    /// Visual styling configuration.
    pub style: CanvasStyle,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            node_size: Vec2::new(NODE_WIDTH, NODE_HEIGHT),
            handle_radius: HANDLE_RADIUS,
            handle_hit_radius: 8.0,
            connection_hit_tolerance: 6.0,
            scroll_speed: 1.0,
            snap: SnapConfig::default(),
            curve: CurveConfig::default(),
            style: CanvasStyle::default(),
        }
    }
}

/// Tuning of the proximity snap used while creating connections.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Distance threshold to a node's input handle.
    pub distance: f32,
    /// Margins of the forgiving region around a node's input side.
    /// `x` is the half-width around the left edge, `y` extends the body height.
    pub region_margin: Vec2,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            distance: SNAP_DISTANCE,
            region_margin: Vec2::new(SNAP_MARGIN_X, SNAP_MARGIN_Y),
        }
    }
}

/// Shape of the connection curves.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    pub offset_factor: f32,
    pub min_offset: f32,
    pub max_offset: f32,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            offset_factor: BEZIER_OFFSET_FACTOR,
            min_offset: BEZIER_MIN_OFFSET,
            max_offset: BEZIER_MAX_OFFSET,
        }
    }
}

/// Builds an RGBA colour from 8-bit channels.
pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Vec4 {
    Vec4::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a)
}

/// Visual styling configuration for the Canvas.
///
/// Colors are RGBA `glam::Vec4` values in the 0.0 - 1.0 range.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasStyle {
    /// Background color of the canvas.
    pub background_color: Vec4,
    /// Color of the grid lines.
    pub grid_color: Vec4,
    /// Distance between grid lines.
    pub grid_size: f32,
    pub node: NodeStyle,
    pub edge: EdgeStyle,
    pub handle: HandleStyle,
    /// Animated overlay drawn on every curve while the workflow is running.
    pub flow: FlowStyle,
    /// Color of the hint shown on an empty canvas.
    pub hint_color: Vec4,
    /// Text shown on an empty canvas.
    pub empty_hint: String,
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self {
            background_color: rgba(0xf9, 0xfa, 0xfb, 1.0),
            grid_color: rgba(0xe5, 0xe7, 0xeb, 1.0),
            grid_size: GRID_SIZE,
            node: NodeStyle::default(),
            edge: EdgeStyle::default(),
            handle: HandleStyle::default(),
            flow: FlowStyle::default(),
            hint_color: rgba(0x9c, 0xa3, 0xaf, 1.0),
            empty_hint: "Drag modules from the library to start building a workflow".to_string(),
        }
    }
}

/// Visual style for a Node.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeStyle {
    pub color: Vec4,
    pub border_color: Vec4,
    /// Border used while the node is hovered or dragged.
    pub active_border_color: Vec4,
    pub text_color: Vec4,
    pub corner_radius: f32,
    pub font_size: f32,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            color: rgba(0xff, 0xff, 0xff, 1.0),
            border_color: rgba(0x8f, 0xc9, 0xc2, 1.0),
            active_border_color: rgba(0x4a, 0x9b, 0x94, 1.0),
            text_color: rgba(0x37, 0x41, 0x51, 1.0),
            corner_radius: 8.0,
            font_size: 14.0,
        }
    }
}

/// Visual style for connection curves.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeStyle {
    pub color: Vec4,
    pub width: f32,
    pub hover_color: Vec4,
    pub hover_width: f32,
    pub selected_color: Vec4,
    pub selected_width: f32,
    /// Dash length and gap of the in-progress preview curve.
    pub preview_dash: Vec2,
    pub preview_opacity: f32,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            color: rgba(0x4a, 0x9b, 0x94, 1.0),
            width: 2.5,
            hover_color: rgba(0x3a, 0x8b, 0x83, 1.0),
            hover_width: 3.0,
            selected_color: rgba(0x2d, 0x7a, 0x73, 1.0),
            selected_width: 4.0,
            preview_dash: Vec2::new(6.0, 4.0),
            preview_opacity: 0.7,
        }
    }
}

/// Visual style for connection handles.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleStyle {
    /// Fill of a handle on an idle node (drawn faded).
    pub idle_color: Vec4,
    pub idle_border_color: Vec4,
    /// Fill of a handle on a hovered or connecting node.
    pub active_color: Vec4,
    pub active_border_color: Vec4,
    /// Fill of the input handle of the current snap target.
    pub snap_color: Vec4,
    /// Radius multiplier of an active handle.
    pub active_scale: f32,
}

impl Default for HandleStyle {
    fn default() -> Self {
        Self {
            idle_color: rgba(0xd1, 0xd5, 0xdb, 0.4),
            idle_border_color: rgba(0x9c, 0xa3, 0xaf, 0.4),
            active_color: rgba(0x4a, 0x9b, 0x94, 1.0),
            active_border_color: rgba(0x3a, 0x8b, 0x83, 1.0),
            snap_color: rgba(0x2d, 0x7a, 0x73, 1.0),
            active_scale: 1.2,
        }
    }
}

/// The "running" overlay: a dashed curve whose dash offset loops continuously.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowStyle {
    pub color: Vec4,
    pub width: f32,
    /// Dash length and gap.
    pub dash: Vec2,
    /// Seconds for the dash offset to advance by one full pattern.
    pub cycle_secs: f32,
}

impl Default for FlowStyle {
    fn default() -> Self {
        Self {
            color: rgba(0x60, 0xd4, 0xc3, 0.8),
            width: 3.0,
            dash: Vec2::new(8.0, 4.0),
            cycle_secs: 1.5,
        }
    }
}
