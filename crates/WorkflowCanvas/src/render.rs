//! # Rendering System
//!
//! Instead of drawing directly, the Canvas outputs a display list of `DrawCommand`s.
//! The host application (macroquad, Egui, a browser, etc.) is responsible for interpreting
//! these commands and drawing pixels.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

/// Dash pattern for stroked curves.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dash {
    /// Length of each dash in pixels.
    pub dash: f32,
    /// Length of each gap in pixels.
    pub gap: f32,
    /// Offset into the pattern at the start of the curve.
    pub offset: f32,
}

/// Horizontal anchoring of text relative to its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAnchor {
    /// `pos` is the top-left corner of the text.
    TopLeft,
    /// `pos` is the centre of the text.
    Center,
}

/// A single drawing primitive.
///
/// Coordinates are in **Client Space** (Pixels).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// A filled rounded rectangle with an optional stroke.
    Rect {
        /// Top-left position in screen pixels.
        pos: Vec2,
        /// Size in screen pixels.
        size: Vec2,
        /// Fill color (RGBA, 0.0 - 1.0).
        color: Vec4,
        /// Radius of the corners in pixels.
        corner_radius: f32,
        /// Width of the border stroke in pixels.
        stroke_width: f32,
        /// Color of the border stroke.
        stroke_color: Option<Vec4>,
    },
    /// A filled circle with an optional stroke, used for connection handles.
    Circle {
        center: Vec2,
        radius: f32,
        color: Vec4,
        stroke_width: f32,
        stroke_color: Option<Vec4>,
    },
    /// A straight line segment.
    Line {
        /// Start point in screen pixels.
        start: Vec2,
        /// End point in screen pixels.
        end: Vec2,
        /// Line color (RGBA, 0.0 - 1.0).
        color: Vec4,
        /// Line thickness in pixels.
        width: f32,
    },
    /// Text to be rendered.
    Text {
        pos: Vec2,
        anchor: TextAnchor,
        /// The font itself is chosen by the consumer.
        text: String,
        /// Text color.
        color: Vec4,
        /// Font size in pixels (approximate).
        size: f32,
    },
    /// A cubic Bezier curve, used for connection wires.
    Bezier {
        /// Start point.
        start: Vec2,
        /// Control Point 1.
        cp1: Vec2,
        /// Control Point 2.
        cp2: Vec2,
        /// End point.
        end: Vec2,
        /// Curve color.
        color: Vec4,
        /// Curve thickness.
        width: f32,
        /// Dash pattern; `None` draws a solid stroke.
        dash: Option<Dash>,
    },
}

/// A list of draw commands representing the current frame.
pub type RenderList = Vec<DrawCommand>;
