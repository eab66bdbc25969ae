//! # Input Protocol
//!
//! This module defines the input state that the host application must pass to the Canvas every frame.
//!
//! The pointer position must be reported even while it is outside the canvas: an active
//! node drag or connection keeps tracking it and completes on release wherever that
//! happens.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::handles::MeasuredHandles;

/// State of mouse buttons.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct MouseButtons {
    /// Primary (left) button is held.
    pub primary: bool,
}

/// Standard keyboard keys that the Canvas cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Delete,
    Backspace,
}

/// A module being dragged in from the host's palette.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExternalDrag {
    /// Catalog id of the dragged module.
    pub module_id: String,
    /// True on the frame the drag is released.
    pub released: bool,
}

/// The input state for a single frame.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InputState {
    /// Current position of the pointer in Client Space (window pixels).
    pub pointer_pos: Vec2,
    /// State of mouse buttons.
    pub mouse_buttons: MouseButtons,
    /// Wheel delta this frame, in pixels. Positive scrolls content towards the bottom/right.
    pub scroll_delta: Vec2,
    /// Keys pressed *this frame*.
    pub pressed_keys: Vec<Key>,
    /// True while a text input (e.g. a property editor field) has keyboard focus.
    /// Delete/Backspace are then left to the text field.
    pub text_input_focused: bool,
    /// Palette drag hovering the window, if any.
    pub external_drag: Option<ExternalDrag>,
    /// Handle geometry measured by the host after the previous paint.
    pub measured_handles: Option<MeasuredHandles>,
}

impl InputState {
    /// Whether `key` was pressed this frame.
    pub fn key_pressed(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }
}
