#![forbid(unsafe_code)]

//! Typed popup registry with stacking order and input routing.
//!
//! # Invariants
//!
//! - A popup name is registered at most once; re-registration returns the
//!   existing id (idempotent init).
//! - Z-order is strictly increasing: every `open` assigns a z-index above
//!   any previously assigned one, so the most recently opened popup is
//!   topmost.
//! - The scroll lock is engaged exactly while at least one popup is open.
//! - Only the topmost open popup's focus trap receives Tab navigation,
//!   and only its close restores the remembered focus target.
//!
//! # Failure Modes
//!
//! - `open`/`close` on an unknown id log an error and return
//!   [`OverlayError::UnknownPopup`]; nothing changes.
//! - `close` on a popup that is already closed is a logged no-op.
//! - The by-name helpers swallow errors after logging and report plain
//!   success/failure, for callers that treat popups as fire-and-forget.

use core::fmt;
use std::collections::VecDeque;

use ahash::AHashMap;
use vetrina_core::{Event, FocusId};

use crate::carousel::Carousel;
use crate::error::OverlayError;
use crate::focus::FocusTrap;
use crate::form::FormModel;
use crate::popup::config::{CloseOptions, FormResetPolicy, OpenOptions, PopupConfig};

/// Base z-index for the popup layer, leaving the page content below it.
const BASE_Z: u32 = 1000;

/// Z-index increment between opens (leaves room for embedder layers).
const Z_INCREMENT: u32 = 10;

/// Unique identifier for a registered popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopupId(u64);

impl PopupId {
    /// The raw id value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PopupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The part of a popup a pointer event landed on, as resolved by the
/// embedder's hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PopupPart {
    /// The tinted area outside the content box.
    Backdrop,
    /// The content box itself.
    Content,
    /// A dedicated close/cancel control.
    CloseTrigger,
}

/// A pointer hit on a popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopupHit {
    pub id: PopupId,
    pub part: PopupPart,
}

impl PopupHit {
    pub const fn new(id: PopupId, part: PopupPart) -> Self {
        Self { id, part }
    }
}

/// Lifecycle notification, queued on the registry and drained by
/// interested page code.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PopupNotice {
    Opened { id: PopupId, name: String },
    Closed { id: PopupId, name: String },
}

/// Describes a popup to be registered.
#[derive(Debug, Clone)]
pub struct PopupBuilder {
    name: String,
    config: PopupConfig,
    form: FormModel,
    focusables: Vec<FocusId>,
    carousel_items: Option<usize>,
}

impl PopupBuilder {
    /// Start describing a popup with the given unique name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: PopupConfig::default(),
            form: FormModel::new(),
            focusables: Vec::new(),
            carousel_items: None,
        }
    }

    /// Set the popup's configuration.
    pub fn config(mut self, config: PopupConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach the popup's form model.
    pub fn form(mut self, form: FormModel) -> Self {
        self.form = form;
        self
    }

    /// Declare the ordered focusable descendants for the focus trap.
    pub fn focusables(mut self, order: Vec<FocusId>) -> Self {
        self.focusables = order;
        self
    }

    /// Attach a carousel over `items` entries.
    pub fn carousel(mut self, items: usize) -> Self {
        self.carousel_items = Some(items);
        self
    }
}

/// The state record for one registered popup.
#[derive(Debug)]
pub struct PopupRecord {
    id: PopupId,
    name: String,
    config: PopupConfig,
    is_open: bool,
    z_index: u32,
    form: FormModel,
    trap: FocusTrap,
    carousel: Option<Carousel>,
}

impl PopupRecord {
    pub fn id(&self) -> PopupId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &PopupConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Z-index assigned at the most recent open. Meaningful only while
    /// the popup is open.
    pub fn z_index(&self) -> u32 {
        self.z_index
    }

    pub fn form(&self) -> &FormModel {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormModel {
        &mut self.form
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref()
    }

    pub fn carousel_mut(&mut self) -> Option<&mut Carousel> {
        self.carousel.as_mut()
    }

    /// Replace the carousel with one over `items` entries, starting at
    /// index 0. Used by popups whose image count varies per open.
    pub fn set_carousel(&mut self, items: usize) {
        self.carousel = Some(Carousel::new(items));
    }

    /// The element focus currently rests on inside this popup, if its
    /// trap is active.
    pub fn focused(&self) -> Option<FocusId> {
        self.trap.current()
    }
}

/// Registry of popups with stacking, focus, scroll lock, and notices.
#[derive(Debug, Default)]
pub struct PopupRegistry {
    records: AHashMap<PopupId, PopupRecord>,
    by_name: AHashMap<String, PopupId>,
    next_id: u64,
    next_z: u32,
    scroll_locked: bool,
    focused: Option<FocusId>,
    notices: VecDeque<PopupNotice>,
}

impl PopupRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Registration ---

    /// Register a popup. Registering a name that already exists returns
    /// the existing id without touching its state.
    pub fn register(&mut self, builder: PopupBuilder) -> PopupId {
        if let Some(&existing) = self.by_name.get(&builder.name) {
            tracing::debug!(name = %builder.name, popup = %existing, "popup already registered; reusing");
            return existing;
        }

        let id = PopupId(self.next_id);
        self.next_id += 1;

        let record = PopupRecord {
            id,
            name: builder.name.clone(),
            config: builder.config,
            is_open: false,
            z_index: 0,
            form: builder.form,
            trap: FocusTrap::new(builder.focusables),
            carousel: builder.carousel_items.map(Carousel::new),
        };

        self.by_name.insert(builder.name, id);
        self.records.insert(id, record);
        tracing::debug!(popup = %id, "popup registered");
        id
    }

    // --- Queries ---

    pub fn get(&self, id: PopupId) -> Option<&PopupRecord> {
        self.records.get(&id)
    }

    pub fn get_mut(&mut self, id: PopupId) -> Option<&mut PopupRecord> {
        self.records.get_mut(&id)
    }

    /// Look up a popup by its registered name.
    pub fn id_of(&self, name: &str) -> Option<PopupId> {
        self.by_name.get(name).copied()
    }

    /// Number of currently open popups.
    pub fn open_count(&self) -> usize {
        self.records.values().filter(|r| r.is_open).count()
    }

    /// Whether any popup is open.
    pub fn any_open(&self) -> bool {
        self.records.values().any(|r| r.is_open)
    }

    /// The open popup with the highest z-index.
    pub fn top_most(&self) -> Option<PopupId> {
        self.records
            .values()
            .filter(|r| r.is_open)
            .max_by_key(|r| r.z_index)
            .map(|r| r.id)
    }

    /// Whether page scrolling is currently locked by an open popup.
    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// The element keyboard focus currently rests on.
    pub fn focused(&self) -> Option<FocusId> {
        self.focused
    }

    /// Record where page focus rests outside any popup, so the next open
    /// knows what to restore on close.
    pub fn set_page_focus(&mut self, id: FocusId) {
        self.focused = Some(id);
    }

    /// Drain queued lifecycle notices in emission order.
    pub fn drain_notices(&mut self) -> Vec<PopupNotice> {
        self.notices.drain(..).collect()
    }

    // --- Lifecycle ---

    /// Open a popup.
    ///
    /// With `close_others` (the default), every other open popup is closed
    /// first, so at most one popup is visible. The popup is assigned a
    /// fresh topmost z-index, the scroll lock engages, and its focus trap
    /// activates on the first focusable descendant.
    pub fn open(&mut self, id: PopupId, options: OpenOptions) -> Result<(), OverlayError> {
        if !self.records.contains_key(&id) {
            tracing::error!(popup = %id, "open requested for unregistered popup");
            return Err(OverlayError::UnknownPopup(id));
        }

        let OpenOptions {
            close_others,
            after_open,
        } = options;

        if close_others {
            self.close_all();
        }

        let previous_focus = self.focused;
        let z_index = BASE_Z + self.next_z;
        self.next_z += Z_INCREMENT;

        let Some(record) = self.records.get_mut(&id) else {
            return Err(OverlayError::UnknownPopup(id));
        };
        record.is_open = true;
        record.z_index = z_index;
        let focused = record.trap.activate(previous_focus);
        if let Some(callback) = after_open {
            callback(record);
        }
        let name = record.name.clone();

        if let Some(focus) = focused {
            self.focused = Some(focus);
        }
        self.scroll_locked = true;
        self.notices.push_back(PopupNotice::Opened {
            id,
            name: name.clone(),
        });
        tracing::debug!(popup = %id, name = %name, z = z_index, "popup opened");
        Ok(())
    }

    /// Close a popup.
    ///
    /// The form resets per the popup's policy unless overridden. The
    /// scroll lock is released only when no other popup remains open.
    /// Closing the topmost popup restores focus to wherever it rested
    /// before that popup opened; closing a lower popup leaves focus alone.
    pub fn close(&mut self, id: PopupId, options: CloseOptions) -> Result<(), OverlayError> {
        let was_top = self.top_most() == Some(id);
        let CloseOptions {
            reset_form,
            after_close,
        } = options;

        let Some(record) = self.records.get_mut(&id) else {
            tracing::error!(popup = %id, "close requested for unregistered popup");
            return Err(OverlayError::UnknownPopup(id));
        };
        if !record.is_open {
            tracing::debug!(popup = %id, "close requested for popup that is not open");
            return Ok(());
        }

        record.is_open = false;
        let reset = reset_form.unwrap_or(record.config.reset_policy == FormResetPolicy::OnClose);
        if reset {
            record.form.reset();
            if let Some(carousel) = record.carousel.as_mut() {
                carousel.rewind();
            }
        }
        let restore = record.trap.release();
        if let Some(callback) = after_close {
            callback(record);
        }
        let name = record.name.clone();

        if was_top && let Some(focus) = restore {
            self.focused = Some(focus);
        }
        if !self.any_open() {
            self.scroll_locked = false;
        }
        self.notices.push_back(PopupNotice::Closed {
            id,
            name: name.clone(),
        });
        tracing::debug!(popup = %id, name = %name, "popup closed");
        Ok(())
    }

    /// Close every open popup, topmost first.
    pub fn close_all(&mut self) {
        let mut open: Vec<(u32, PopupId)> = self
            .records
            .values()
            .filter(|r| r.is_open)
            .map(|r| (r.z_index, r.id))
            .collect();
        open.sort_by(|a, b| b.0.cmp(&a.0));
        for (_, id) in open {
            // Ids were collected from live records; close cannot fail here.
            let _ = self.close(id, CloseOptions::default());
        }
    }

    // --- Legacy by-name helpers ---

    /// Open a popup by name with default options. Unknown names log an
    /// error and report `false`.
    pub fn open_by_name(&mut self, name: &str) -> bool {
        match self.id_of(name) {
            Some(id) => self.open(id, OpenOptions::default()).is_ok(),
            None => {
                tracing::error!(name, "open requested for unknown popup name");
                false
            }
        }
    }

    /// Close a popup by name with default options. Unknown names log an
    /// error and report `false`.
    pub fn close_by_name(&mut self, name: &str) -> bool {
        match self.id_of(name) {
            Some(id) => self.close(id, CloseOptions::default()).is_ok(),
            None => {
                tracing::error!(name, "close requested for unknown popup name");
                false
            }
        }
    }

    // --- Event routing ---

    /// Route an input event to the popup layer.
    ///
    /// Escape closes the topmost open popup (when it allows it). Tab and
    /// Shift+Tab cycle the topmost popup's focus trap. Left-button presses
    /// are interpreted against the embedder-resolved `hit`: backdrop hits
    /// close the popup (when allowed), content hits are swallowed without
    /// closing, close-trigger hits always close.
    ///
    /// Returns whether the event was consumed.
    pub fn handle_event(&mut self, event: &Event, hit: Option<PopupHit>) -> bool {
        match event {
            Event::Key(_) if event.is_escape_press() => {
                let Some(top) = self.top_most() else {
                    return false;
                };
                let allowed = self
                    .records
                    .get(&top)
                    .is_some_and(|r| r.config.close_on_escape);
                if allowed {
                    self.close(top, CloseOptions::default()).is_ok()
                } else {
                    false
                }
            }
            Event::Key(key) if key.is_tab_forward() || key.is_tab_backward() => {
                let Some(top) = self.top_most() else {
                    return false;
                };
                let Some(record) = self.records.get_mut(&top) else {
                    return false;
                };
                match record.trap.handle_key(key) {
                    Some(focus) => {
                        self.focused = Some(focus);
                        true
                    }
                    None => false,
                }
            }
            Event::Mouse(mouse) if mouse.is_left_down() => {
                let Some(PopupHit { id, part }) = hit else {
                    return false;
                };
                let Some(record) = self.records.get(&id) else {
                    tracing::error!(popup = %id, "pointer hit on unregistered popup");
                    return false;
                };
                if !record.is_open {
                    return false;
                }
                match part {
                    // Clicks inside the content box never reach the backdrop.
                    PopupPart::Content => true,
                    PopupPart::CloseTrigger => self.close(id, CloseOptions::default()).is_ok(),
                    PopupPart::Backdrop => {
                        if record.config.close_on_backdrop {
                            self.close(id, CloseOptions::default()).is_ok()
                        } else {
                            false
                        }
                    }
                }
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::popup::config::PopupKind;
    use tracing_test::traced_test;

    fn plain(name: &str) -> PopupBuilder {
        PopupBuilder::new(name)
    }

    fn with_fields(name: &str) -> PopupBuilder {
        PopupBuilder::new(name)
            .form(FormModel::new().field("name", "").field("price", "0"))
            .focusables(vec![1, 2, 3])
    }

    #[test]
    fn register_is_idempotent_by_name() {
        let mut registry = PopupRegistry::new();
        let a = registry.register(plain("filterPopup"));
        let b = registry.register(plain("filterPopup"));
        assert_eq!(a, b);
        assert_eq!(registry.id_of("filterPopup"), Some(a));
    }

    #[test]
    fn registered_popup_starts_closed() {
        let mut registry = PopupRegistry::new();
        let id = registry.register(plain("modal"));
        assert!(!registry.get(id).unwrap().is_open());
        assert!(!registry.any_open());
        assert!(!registry.scroll_locked());
    }

    #[test]
    fn open_closes_others_by_default() {
        let mut registry = PopupRegistry::new();
        let a = registry.register(plain("a"));
        let b = registry.register(plain("b"));

        registry.open(a, OpenOptions::default()).unwrap();
        registry.open(b, OpenOptions::default()).unwrap();

        assert!(!registry.get(a).unwrap().is_open());
        assert!(registry.get(b).unwrap().is_open());
        assert_eq!(registry.open_count(), 1);
    }

    #[test]
    fn close_others_opt_out_keeps_both() {
        let mut registry = PopupRegistry::new();
        let a = registry.register(plain("a"));
        let b = registry.register(plain("b"));

        registry.open(a, OpenOptions::default()).unwrap();
        registry
            .open(b, OpenOptions::new().close_others(false))
            .unwrap();

        assert_eq!(registry.open_count(), 2);
        assert_eq!(registry.top_most(), Some(b));
    }

    #[test]
    fn scroll_lock_released_only_by_last_close() {
        let mut registry = PopupRegistry::new();
        let a = registry.register(plain("a"));
        let b = registry.register(plain("b"));

        registry.open(a, OpenOptions::default()).unwrap();
        registry
            .open(b, OpenOptions::new().close_others(false))
            .unwrap();
        assert!(registry.scroll_locked());

        registry.close(b, CloseOptions::default()).unwrap();
        assert!(registry.scroll_locked());

        registry.close(a, CloseOptions::default()).unwrap();
        assert!(!registry.scroll_locked());
    }

    #[test]
    fn unknown_popup_open_is_error() {
        let mut registry = PopupRegistry::new();
        let id = registry.register(plain("only"));
        registry.close(id, CloseOptions::default()).unwrap();

        let ghost = PopupId(999);
        assert_eq!(
            registry.open(ghost, OpenOptions::default()),
            Err(OverlayError::UnknownPopup(ghost))
        );
        assert_eq!(
            registry.close(ghost, CloseOptions::default()),
            Err(OverlayError::UnknownPopup(ghost))
        );
    }

    #[traced_test]
    #[test]
    fn unknown_popup_open_logs_error() {
        let mut registry = PopupRegistry::new();
        let _ = registry.open(PopupId(42), OpenOptions::default());
        assert!(logs_contain("open requested for unregistered popup"));
    }

    #[test]
    fn close_on_closed_popup_is_noop() {
        let mut registry = PopupRegistry::new();
        let id = registry.register(plain("a"));
        assert!(registry.close(id, CloseOptions::default()).is_ok());
        assert!(registry.drain_notices().is_empty());
    }

    #[test]
    fn z_order_strictly_increasing() {
        let mut registry = PopupRegistry::new();
        let a = registry.register(plain("a"));
        let b = registry.register(plain("b"));

        registry.open(a, OpenOptions::default()).unwrap();
        let z_a = registry.get(a).unwrap().z_index();
        registry
            .open(b, OpenOptions::new().close_others(false))
            .unwrap();
        let z_b = registry.get(b).unwrap().z_index();
        assert!(z_b > z_a);

        // Re-opening A raises it above B.
        registry
            .open(a, OpenOptions::new().close_others(false))
            .unwrap();
        assert!(registry.get(a).unwrap().z_index() > z_b);
        assert_eq!(registry.top_most(), Some(a));
    }

    #[test]
    fn escape_with_nothing_open_is_noop() {
        let mut registry = PopupRegistry::new();
        registry.register(plain("a"));
        assert!(!registry.handle_event(&Event::escape(), None));
    }

    #[test]
    fn escape_closes_only_topmost() {
        let mut registry = PopupRegistry::new();
        let a = registry.register(plain("a"));
        let b = registry.register(plain("b"));
        registry.open(a, OpenOptions::default()).unwrap();
        registry
            .open(b, OpenOptions::new().close_others(false))
            .unwrap();

        assert!(registry.handle_event(&Event::escape(), None));
        assert!(registry.get(a).unwrap().is_open());
        assert!(!registry.get(b).unwrap().is_open());
    }

    #[test]
    fn escape_honours_popup_config() {
        let mut registry = PopupRegistry::new();
        let id = registry.register(
            PopupBuilder::new("sticky").config(PopupConfig::default().close_on_escape(false)),
        );
        registry.open(id, OpenOptions::default()).unwrap();

        assert!(!registry.handle_event(&Event::escape(), None));
        assert!(registry.get(id).unwrap().is_open());
    }

    #[test]
    fn backdrop_click_closes_content_click_does_not() {
        let mut registry = PopupRegistry::new();
        let id = registry.register(plain("a"));
        registry.open(id, OpenOptions::default()).unwrap();

        let click = Event::left_click(0, 0);
        let content = PopupHit::new(id, PopupPart::Content);
        assert!(registry.handle_event(&click, Some(content)));
        assert!(registry.get(id).unwrap().is_open());

        let backdrop = PopupHit::new(id, PopupPart::Backdrop);
        assert!(registry.handle_event(&click, Some(backdrop)));
        assert!(!registry.get(id).unwrap().is_open());
    }

    #[test]
    fn backdrop_click_respects_config() {
        let mut registry = PopupRegistry::new();
        let id = registry.register(
            PopupBuilder::new("pinned").config(PopupConfig::default().close_on_backdrop(false)),
        );
        registry.open(id, OpenOptions::default()).unwrap();

        let click = Event::left_click(0, 0);
        let backdrop = PopupHit::new(id, PopupPart::Backdrop);
        assert!(!registry.handle_event(&click, Some(backdrop)));
        assert!(registry.get(id).unwrap().is_open());

        // A dedicated close trigger works regardless.
        let trigger = PopupHit::new(id, PopupPart::CloseTrigger);
        assert!(registry.handle_event(&click, Some(trigger)));
        assert!(!registry.get(id).unwrap().is_open());
    }

    #[test]
    fn open_activates_focus_trap_and_close_restores() {
        let mut registry = PopupRegistry::new();
        let id = registry.register(with_fields("editDealerPopup"));

        registry.set_page_focus(77);
        registry.open(id, OpenOptions::default()).unwrap();
        assert_eq!(registry.focused(), Some(1));

        registry.close(id, CloseOptions::default()).unwrap();
        assert_eq!(registry.focused(), Some(77));
    }

    #[test]
    fn tab_cycles_topmost_trap() {
        let mut registry = PopupRegistry::new();
        let id = registry.register(with_fields("editDealerPopup"));
        registry.open(id, OpenOptions::default()).unwrap();

        assert!(registry.handle_event(&Event::tab(), None));
        assert_eq!(registry.focused(), Some(2));
        assert!(registry.handle_event(&Event::tab(), None));
        assert!(registry.handle_event(&Event::tab(), None));
        // Wrapped from last back to first.
        assert_eq!(registry.focused(), Some(1));

        assert!(registry.handle_event(&Event::back_tab(), None));
        assert_eq!(registry.focused(), Some(3));
    }

    #[test]
    fn stacked_close_restores_focus_through_layers() {
        let mut registry = PopupRegistry::new();
        let a = registry.register(PopupBuilder::new("a").focusables(vec![1, 2]));
        let b = registry.register(PopupBuilder::new("b").focusables(vec![10, 11]));

        registry.set_page_focus(100);
        registry.open(a, OpenOptions::default()).unwrap();
        assert_eq!(registry.focused(), Some(1));

        registry
            .open(b, OpenOptions::new().close_others(false))
            .unwrap();
        assert_eq!(registry.focused(), Some(10));

        registry.close(b, CloseOptions::default()).unwrap();
        assert_eq!(registry.focused(), Some(1));

        registry.close(a, CloseOptions::default()).unwrap();
        assert_eq!(registry.focused(), Some(100));
    }

    #[test]
    fn closing_lower_popup_leaves_focus_alone() {
        let mut registry = PopupRegistry::new();
        let a = registry.register(PopupBuilder::new("a").focusables(vec![1]));
        let b = registry.register(PopupBuilder::new("b").focusables(vec![10]));

        registry.open(a, OpenOptions::default()).unwrap();
        registry
            .open(b, OpenOptions::new().close_others(false))
            .unwrap();
        assert_eq!(registry.focused(), Some(10));

        registry.close(a, CloseOptions::default()).unwrap();
        assert_eq!(registry.focused(), Some(10));
    }

    #[test]
    fn form_resets_on_close_by_default() {
        let mut registry = PopupRegistry::new();
        let id = registry.register(with_fields("editDealerPopup"));
        registry.open(id, OpenOptions::default()).unwrap();
        registry
            .get_mut(id)
            .unwrap()
            .form_mut()
            .set("name", "Rossi Auto")
            .unwrap();

        registry.close(id, CloseOptions::default()).unwrap();
        assert_eq!(registry.get(id).unwrap().form().get("name"), Some(""));
    }

    #[test]
    fn form_reset_opt_out_per_call() {
        let mut registry = PopupRegistry::new();
        let id = registry.register(with_fields("editDealerPopup"));
        registry.open(id, OpenOptions::default()).unwrap();
        registry
            .get_mut(id)
            .unwrap()
            .form_mut()
            .set("name", "Rossi Auto")
            .unwrap();

        registry
            .close(id, CloseOptions::new().reset_form(false))
            .unwrap();
        assert_eq!(
            registry.get(id).unwrap().form().get("name"),
            Some("Rossi Auto")
        );
    }

    #[test]
    fn keep_policy_preserves_form() {
        let mut registry = PopupRegistry::new();
        let id = registry.register(
            PopupBuilder::new("filterPopup")
                .config(
                    PopupConfig::default()
                        .kind(PopupKind::Filter)
                        .reset_policy(FormResetPolicy::Keep),
                )
                .form(FormModel::new().field("brand", "")),
        );
        registry.open(id, OpenOptions::default()).unwrap();
        registry
            .get_mut(id)
            .unwrap()
            .form_mut()
            .set("brand", "Fiat")
            .unwrap();

        registry.close(id, CloseOptions::default()).unwrap();
        assert_eq!(registry.get(id).unwrap().form().get("brand"), Some("Fiat"));
    }

    #[test]
    fn carousel_rewinds_on_close() {
        let mut registry = PopupRegistry::new();
        let id = registry.register(PopupBuilder::new("carDetailsPopup").carousel(3));
        registry.open(id, OpenOptions::default()).unwrap();
        registry.get_mut(id).unwrap().carousel_mut().unwrap().next();

        registry.close(id, CloseOptions::default()).unwrap();
        assert_eq!(registry.get(id).unwrap().carousel().unwrap().current(), 0);
    }

    #[test]
    fn notices_emitted_in_order() {
        let mut registry = PopupRegistry::new();
        let a = registry.register(plain("a"));
        let b = registry.register(plain("b"));

        registry.open(a, OpenOptions::default()).unwrap();
        registry.open(b, OpenOptions::default()).unwrap();

        let notices = registry.drain_notices();
        assert_eq!(
            notices,
            vec![
                PopupNotice::Opened {
                    id: a,
                    name: "a".into()
                },
                PopupNotice::Closed {
                    id: a,
                    name: "a".into()
                },
                PopupNotice::Opened {
                    id: b,
                    name: "b".into()
                },
            ]
        );
        assert!(registry.drain_notices().is_empty());
    }

    #[test]
    fn open_and_close_callbacks_run() {
        let mut registry = PopupRegistry::new();
        let id = registry.register(with_fields("editDealerPopup"));

        registry
            .open(
                id,
                OpenOptions::new().after_open(|record| {
                    record.form_mut().set("name", "Bianchi Motors").unwrap();
                }),
            )
            .unwrap();
        assert_eq!(
            registry.get(id).unwrap().form().get("name"),
            Some("Bianchi Motors")
        );

        registry
            .close(
                id,
                CloseOptions::new()
                    .reset_form(false)
                    .after_close(|record| {
                        record.form_mut().set("price", "1").unwrap();
                    }),
            )
            .unwrap();
        assert_eq!(registry.get(id).unwrap().form().get("price"), Some("1"));
    }

    #[test]
    fn close_all_closes_top_first() {
        let mut registry = PopupRegistry::new();
        let a = registry.register(plain("a"));
        let b = registry.register(plain("b"));
        registry.open(a, OpenOptions::default()).unwrap();
        registry
            .open(b, OpenOptions::new().close_others(false))
            .unwrap();
        registry.drain_notices();

        registry.close_all();
        let notices = registry.drain_notices();
        assert_eq!(
            notices,
            vec![
                PopupNotice::Closed {
                    id: b,
                    name: "b".into()
                },
                PopupNotice::Closed {
                    id: a,
                    name: "a".into()
                },
            ]
        );
        assert!(!registry.any_open());
    }

    #[test]
    fn by_name_helpers() {
        let mut registry = PopupRegistry::new();
        let id = registry.register(plain("filterPopup"));

        assert!(registry.open_by_name("filterPopup"));
        assert!(registry.get(id).unwrap().is_open());
        assert!(registry.close_by_name("filterPopup"));
        assert!(!registry.get(id).unwrap().is_open());

        assert!(!registry.open_by_name("missing"));
        assert!(!registry.close_by_name("missing"));
    }

    #[test]
    fn reopen_emits_opened_again() {
        let mut registry = PopupRegistry::new();
        let id = registry.register(plain("a"));
        registry.open(id, OpenOptions::default()).unwrap();
        registry.drain_notices();

        registry
            .open(id, OpenOptions::new().close_others(false))
            .unwrap();
        let notices = registry.drain_notices();
        assert_eq!(
            notices,
            vec![PopupNotice::Opened {
                id,
                name: "a".into()
            }]
        );
    }
}
