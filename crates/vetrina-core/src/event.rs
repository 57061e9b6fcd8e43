//! Keyboard and mouse events delivered to the overlay layer.
//!
//! The embedder translates whatever input source it has (browser events,
//! terminal input, test scripts) into these types. Only the keys the
//! overlay layer reacts to are modelled; everything else arrives as
//! [`KeyCode::Char`] and is ignored by the popup registry.

use bitflags::bitflags;

bitflags! {
    /// Keyboard modifier state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const CTRL  = 0b0000_0010;
        const ALT   = 0b0000_0100;
    }
}

/// Logical key identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    Tab,
    /// Shift+Tab as reported by sources that pre-resolve it.
    BackTab,
    Enter,
    Escape,
    Backspace,
    Left,
    Right,
    Up,
    Down,
}

/// Press/release/repeat phase of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A plain key press with no modifiers.
    pub const fn press(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
            kind: KeyEventKind::Press,
        }
    }

    /// A key press with the given modifiers.
    pub const fn press_with(code: KeyCode, modifiers: Modifiers) -> Self {
        Self {
            code,
            modifiers,
            kind: KeyEventKind::Press,
        }
    }

    /// Whether this event is a Tab-forward press.
    pub fn is_tab_forward(&self) -> bool {
        self.kind == KeyEventKind::Press
            && self.code == KeyCode::Tab
            && !self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Whether this event is a Tab-backward press (Shift+Tab or BackTab).
    pub fn is_tab_backward(&self) -> bool {
        self.kind == KeyEventKind::Press
            && (self.code == KeyCode::BackTab
                || (self.code == KeyCode::Tab && self.modifiers.contains(Modifiers::SHIFT)))
    }
}

/// Mouse button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Mouse event phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    Moved,
}

/// A mouse event at viewport coordinates.
///
/// The overlay layer never hit-tests coordinates itself; the embedder
/// resolves the target and passes it alongside the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub x: u16,
    pub y: u16,
}

impl MouseEvent {
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self { kind, x, y }
    }

    /// Whether this is a left-button press.
    pub fn is_left_down(&self) -> bool {
        self.kind == MouseEventKind::Down(MouseButton::Left)
    }
}

/// An input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
}

impl Event {
    /// Shorthand for an Escape press.
    pub const fn escape() -> Self {
        Self::Key(KeyEvent::press(KeyCode::Escape))
    }

    /// Shorthand for a Tab press.
    pub const fn tab() -> Self {
        Self::Key(KeyEvent::press(KeyCode::Tab))
    }

    /// Shorthand for a Shift+Tab press.
    pub const fn back_tab() -> Self {
        Self::Key(KeyEvent::press_with(KeyCode::Tab, Modifiers::SHIFT))
    }

    /// Shorthand for a left-button mouse press at the given position.
    pub const fn left_click(x: u16, y: u16) -> Self {
        Self::Mouse(MouseEvent::new(
            MouseEventKind::Down(MouseButton::Left),
            x,
            y,
        ))
    }

    /// Whether this event is an Escape press.
    pub fn is_escape_press(&self) -> bool {
        matches!(
            self,
            Event::Key(KeyEvent {
                code: KeyCode::Escape,
                kind: KeyEventKind::Press,
                ..
            })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_tab_is_forward() {
        let key = KeyEvent::press(KeyCode::Tab);
        assert!(key.is_tab_forward());
        assert!(!key.is_tab_backward());
    }

    #[test]
    fn shift_tab_is_backward() {
        let key = KeyEvent::press_with(KeyCode::Tab, Modifiers::SHIFT);
        assert!(key.is_tab_backward());
        assert!(!key.is_tab_forward());
    }

    #[test]
    fn back_tab_is_backward() {
        let key = KeyEvent::press(KeyCode::BackTab);
        assert!(key.is_tab_backward());
    }

    #[test]
    fn tab_release_moves_nothing() {
        let key = KeyEvent {
            code: KeyCode::Tab,
            modifiers: Modifiers::empty(),
            kind: KeyEventKind::Release,
        };
        assert!(!key.is_tab_forward());
        assert!(!key.is_tab_backward());
    }

    #[test]
    fn escape_shorthand() {
        assert!(Event::escape().is_escape_press());
        assert!(!Event::tab().is_escape_press());
    }

    #[test]
    fn left_click_shorthand() {
        let Event::Mouse(mouse) = Event::left_click(3, 7) else {
            panic!("expected mouse event");
        };
        assert!(mouse.is_left_down());
        assert_eq!((mouse.x, mouse.y), (3, 7));
    }

    #[test]
    fn modifier_combination() {
        let mods = Modifiers::SHIFT | Modifiers::CTRL;
        assert!(mods.contains(Modifiers::SHIFT));
        assert!(!mods.contains(Modifiers::ALT));
    }
}
