//! # Viewport System
//!
//! This module handles the coordinate mathematics of the scrollable canvas.
//! Pointer events arrive in **Client Space** (window pixels); the graph lives in
//! **Graph Space** (unscrolled content pixels whose origin is the canvas content's
//! top-left corner).
//!
//! Every conversion, whether drag offsets, drag moves, connection endpoints or snap
//! checks, goes through the same pair of functions so the cursor and the dragged
//! element never drift apart.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The View combines the canvas placement in the window with its scroll offset.
/// It serves as the single source of truth for coordinate conversions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct View {
    /// Client-space position of the canvas' top-left corner.
    pub origin: Vec2,
    /// Current scroll offset of the canvas content. Never negative.
    pub scroll: Vec2,
    /// The size of the visible area in pixels.
    pub viewport_size: Vec2,
}

impl Default for View {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            scroll: Vec2::ZERO,
            viewport_size: Vec2::new(800.0, 600.0),
        }
    }
}

impl View {
    /// Creates a new View system.
    pub fn new(origin: Vec2, viewport_size: Vec2) -> Self {
        Self {
            origin,
            scroll: Vec2::ZERO,
            viewport_size,
        }
    }

    /// Converts a point from **Client Space** to **Graph Space**.
    ///
    /// Formula: `Graph = Client - Origin + Scroll`
    pub fn client_to_graph(&self, client_pos: Vec2) -> Vec2 {
        client_pos - self.origin + self.scroll
    }

    /// Converts a point from **Graph Space** to **Client Space**.
    ///
    /// Formula: `Client = Graph + Origin - Scroll`
    pub fn graph_to_client(&self, graph_pos: Vec2) -> Vec2 {
        graph_pos + self.origin - self.scroll
    }

    /// Whether a client-space point lies inside the visible canvas area.
    pub fn contains_client(&self, client_pos: Vec2) -> bool {
        let local = client_pos - self.origin;
        local.x >= 0.0
            && local.y >= 0.0
            && local.x <= self.viewport_size.x
            && local.y <= self.viewport_size.y
    }

    /// Graph-space rectangle currently visible, as `(min, max)`.
    pub fn visible_graph_bounds(&self) -> (Vec2, Vec2) {
        (self.scroll, self.scroll + self.viewport_size)
    }

    /// Scrolls by `delta`, keeping the offset within `[0, content_extent - viewport]`.
    ///
    /// Returns `true` if the offset changed.
    pub fn scroll_by(&mut self, delta: Vec2, content_extent: Vec2) -> bool {
        let max_scroll = (content_extent - self.viewport_size).max(Vec2::ZERO);
        let next = (self.scroll + delta).clamp(Vec2::ZERO, max_scroll);
        let changed = next != self.scroll;
        self.scroll = next;
        changed
    }
}
