#![forbid(unsafe_code)]

//! Input-event model and focus primitives shared by the Vetrina overlay stack.

pub mod event;

pub use event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Identifier for a focusable element inside a popup.
///
/// The embedding layer assigns these; the overlay crate only orders and
/// cycles them.
pub type FocusId = u64;
