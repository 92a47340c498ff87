//! Pointer and keyboard input, already mapped into image-pixel space.
//!
//! The host translates its native events (and undoes pan/zoom) before
//! handing them to the plan.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Only the primary button draws.
    pub fn is_primary(self) -> bool {
        self == MouseButton::Left
    }
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false, meta: false };
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false, meta: false };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in image-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position } => position,
        }
    }

    /// Primary-button press at `position`.
    pub fn down(position: Point) -> Self {
        PointerEvent::Down { position, button: MouseButton::Left }
    }

    /// Primary-button release at `position`.
    pub fn up(position: Point) -> Self {
        PointerEvent::Up { position, button: MouseButton::Left }
    }

    pub fn moved(position: Point) -> Self {
        PointerEvent::Move { position }
    }
}

/// Editor commands bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shortcut {
    Undo,
    Redo,
    /// Drop the current draft.
    Cancel,
    /// Close the polygon being traced.
    FinishPolygon,
}

impl Shortcut {
    /// Map a key name (as reported by the host, e.g. `"z"` or `"Escape"`)
    /// to a command.
    ///
    /// Ctrl/Cmd+Z undoes, Ctrl/Cmd+Shift+Z and Ctrl/Cmd+Y redo.
    pub fn from_key(key: &str, modifiers: Modifiers) -> Option<Self> {
        match key {
            "Escape" => Some(Shortcut::Cancel),
            "Enter" if !modifiers.command() => Some(Shortcut::FinishPolygon),
            _ if modifiers.command() => {
                if key.eq_ignore_ascii_case("z") {
                    Some(if modifiers.shift { Shortcut::Redo } else { Shortcut::Undo })
                } else if key.eq_ignore_ascii_case("y") {
                    Some(Shortcut::Redo)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}
