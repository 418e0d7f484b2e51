//! Input abstraction layer.
//!
//! Normalizes mouse, touch, and stylus events into a unified `InputEvent`
//! enum consumed by the drawing surface. Coordinates are canvas-local: the
//! host subtracts the canvas' client rect before building the event.

/// Keyboard modifier state at the time of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };
}

/// A normalized input event from any pointing device or the keyboard.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start, pen contact).
    PointerDown { x: f32, y: f32 },

    /// Pointer moved, whether or not a button is held.
    PointerMove { x: f32, y: f32 },

    /// Pointer released.
    PointerUp { x: f32, y: f32 },

    /// The platform aborted the gesture (touch cancel, lost capture).
    PointerCancel,

    /// Keyboard key press. `key` is the `KeyboardEvent.key` value.
    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    pub fn from_pointer_down(x: f32, y: f32) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn from_pointer_move(x: f32, y: f32) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn from_pointer_up(x: f32, y: f32) -> Self {
        Self::PointerUp { x, y }
    }

    pub fn from_key(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self::Key {
            key: key.into(),
            modifiers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pointer_constructors_keep_coordinates() {
        assert_eq!(
            InputEvent::from_pointer_down(1.0, 2.0),
            InputEvent::PointerDown { x: 1.0, y: 2.0 }
        );
        assert_eq!(
            InputEvent::from_pointer_up(3.0, 4.0),
            InputEvent::PointerUp { x: 3.0, y: 4.0 }
        );
    }

    #[test]
    fn key_event_carries_modifiers() {
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        assert_eq!(
            InputEvent::from_key("Enter", ctrl),
            InputEvent::Key {
                key: "Enter".to_string(),
                modifiers: ctrl,
            }
        );
    }
}
