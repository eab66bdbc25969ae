//! # WorkflowCanvas
//!
//! `workflow_canvas` is a headless node-and-connection editor for workflow graphs.
//! It handles interaction state, coordinate mathematics and hit-testing, while
//! delegating rendering to the host application.
//!
//! ## Core Architecture
//! - **Model (`src/model.rs`)**: The graph store (nodes, connections) and its invariants.
//! - **Editor (`src/editor.rs`)**: The owner of the store; applies the canvas' intents.
//! - **View (`src/view.rs`)**: Client <-> graph coordinate conversion with scrolling.
//! - **Interaction (`src/interaction.rs`)**: The pointer state machine.
//! - **Render (`src/render.rs`)**: Outputs a list of `DrawCommand`s for the host to render.
//!
//! The canvas is controlled: it reads the graph, never writes it, and reports what the
//! user asked for as [`LogicEvent`]s.

pub mod catalog;
pub mod config;
pub mod editor;
pub mod error;
pub mod handles;
pub mod input;
pub mod interaction;
pub mod math;
pub mod model;
pub mod painter;
pub mod render;
pub mod snap;
pub mod view;

use glam::Vec2;
use handles::HandleResolver;
use input::InputState;
use interaction::PointerTracker;
use model::{ConnectionId, GraphState, NodeId};
use painter::{PaintContext, Painter};
use render::RenderList;
use view::View;

// Re-exports for convenience
pub use catalog::ModuleCatalog;
pub use config::CanvasConfig;
pub use editor::WorkflowEditor;
pub use interaction::{InteractionMode, LogicEvent};

/// Controlled inputs owned by the host and passed in every frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CanvasProps {
    /// The owner's currently selected connection, highlighted and deletable by key.
    pub selected_connection: Option<ConnectionId>,
    /// Purely visual: animates a flow overlay on every connection.
    pub running: bool,
}

/// The main entry point for the library.
///
/// The `Canvas` struct holds the transient state of the editor (viewport, pointer
/// session, hover) and configuration. It is intended to be instantiated once and reused.
pub struct Canvas {
    /// Configuration settings.
    pub config: CanvasConfig,
    /// The Viewport system handling coordinate transforms.
    pub view: View,
    /// Current interaction mode.
    pub interaction_mode: InteractionMode,
    /// Pointer bookkeeping between frames.
    pub pointer: PointerTracker,
    flow_phase: f32,
}

impl Canvas {
    /// Creates a new Canvas instance with the given configuration.
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            config,
            view: View::default(),
            interaction_mode: InteractionMode::Idle,
            pointer: PointerTracker::default(),
            flow_phase: 0.0,
        }
    }

    /// Updates where the canvas sits in the window and how large it is.
    ///
    /// This should be called whenever the host application's window or panel layout changes.
    pub fn update_viewport(&mut self, origin: Vec2, size: Vec2) {
        self.view.origin = origin;
        self.view.viewport_size = size;
    }

    /// Node currently under the pointer, if any.
    pub fn hovered_node(&self) -> Option<&NodeId> {
        self.pointer.hovered_node.as_ref()
    }

    /// Current dash offset of the running overlay.
    pub fn flow_phase(&self) -> f32 {
        self.flow_phase
    }

    /// The core update loop.
    ///
    /// This function should be called every frame (or on event) with the latest graph.
    /// It returns a list of drawing commands (`RenderList`) that the host application
    /// should render, and the intents the owner should apply to its store.
    pub fn update(
        &mut self,
        input: &InputState,
        dt: f32,
        graph: &GraphState,
        props: &CanvasProps,
    ) -> (RenderList, Vec<LogicEvent>) {
        let mut logic_events = Vec::new();

        // 1. Handle Interactions (Scroll, Select, Drag, Connect)
        interaction::handle_interactions(
            &mut self.interaction_mode,
            &mut self.pointer,
            &mut self.view,
            &self.config,
            input,
            graph,
            props.selected_connection.as_ref(),
            &mut logic_events,
        );

        // 2. Animate
        self.advance_flow(dt, props.running);
        if props.running && !graph.connections().is_empty() {
            logic_events.push(LogicEvent::RepaintNeeded);
        }

        // 3. Render
        let handles = HandleResolver::new(input.measured_handles.as_ref(), &self.view, &self.config);
        let draw_list = Painter::draw_graph(&PaintContext {
            view: &self.view,
            config: &self.config,
            graph,
            mode: &self.interaction_mode,
            pointer: &self.pointer,
            props,
            handles: &handles,
            flow_phase: self.flow_phase,
        });

        (draw_list, logic_events)
    }

    fn advance_flow(&mut self, dt: f32, running: bool) {
        let flow = &self.config.style.flow;
        let pattern = flow.dash.x + flow.dash.y;
        if !running || pattern <= 0.0 || flow.cycle_secs <= 0.0 {
            self.flow_phase = 0.0;
            return;
        }
        self.flow_phase = (self.flow_phase + dt * pattern / flow.cycle_secs) % pattern;
    }
}
