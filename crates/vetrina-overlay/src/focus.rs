#![forbid(unsafe_code)]

//! Keyboard-focus confinement for an open popup.
//!
//! A [`FocusTrap`] owns the ordered list of focusable descendants the
//! embedder declared for a popup. While the trap is active, Tab from the
//! last element wraps to the first and Shift+Tab from the first wraps to
//! the last; focus never leaves the list.
//!
//! # Invariants
//!
//! - `current()` is always a member of the declared order, or `None`.
//! - `activate` followed by `release` restores the focus target that was
//!   remembered at activation, regardless of how focus moved in between.
//!
//! # Failure Modes
//!
//! - An empty trap activates without focusing anything; `next`/`prev`
//!   return `None` (no panic).
//! - `focus()` on an id outside the order is ignored and returns `false`.

use vetrina_core::{FocusId, KeyEvent};

/// Tab-cycling focus confinement for one popup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusTrap {
    order: Vec<FocusId>,
    current: Option<usize>,
    restore_to: Option<FocusId>,
}

impl FocusTrap {
    /// Create a trap over the given focus order.
    pub fn new(order: Vec<FocusId>) -> Self {
        Self {
            order,
            current: None,
            restore_to: None,
        }
    }

    /// Number of focusable elements.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the trap has no focusable elements.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The currently focused element, if any.
    pub fn current(&self) -> Option<FocusId> {
        self.current.map(|i| self.order[i])
    }

    /// Activate the trap: remember `restore_to` and focus the first
    /// element. Returns the newly focused element, or `None` for an
    /// empty trap.
    pub fn activate(&mut self, restore_to: Option<FocusId>) -> Option<FocusId> {
        self.restore_to = restore_to;
        self.current = if self.order.is_empty() { None } else { Some(0) };
        self.current()
    }

    /// Release the trap, clearing focus state and yielding the element
    /// focus should return to.
    pub fn release(&mut self) -> Option<FocusId> {
        self.current = None;
        self.restore_to.take()
    }

    /// Focus a specific element. Returns `false` if it is not part of
    /// the trap.
    pub fn focus(&mut self, id: FocusId) -> bool {
        match self.order.iter().position(|&f| f == id) {
            Some(index) => {
                self.current = Some(index);
                true
            }
            None => false,
        }
    }

    /// Move focus forward, wrapping from the last element to the first.
    pub fn next(&mut self) -> Option<FocusId> {
        if self.order.is_empty() {
            return None;
        }
        let index = match self.current {
            Some(i) if i + 1 < self.order.len() => i + 1,
            _ => 0,
        };
        self.current = Some(index);
        self.current()
    }

    /// Move focus backward, wrapping from the first element to the last.
    pub fn prev(&mut self) -> Option<FocusId> {
        if self.order.is_empty() {
            return None;
        }
        let index = match self.current {
            Some(i) if i > 0 => i - 1,
            _ => self.order.len() - 1,
        };
        self.current = Some(index);
        self.current()
    }

    /// Handle a key event, moving focus for Tab / Shift+Tab presses.
    ///
    /// Returns the newly focused element when the event was consumed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<FocusId> {
        if key.is_tab_forward() {
            self.next()
        } else if key.is_tab_backward() {
            self.prev()
        } else {
            None
        }
    }
}
