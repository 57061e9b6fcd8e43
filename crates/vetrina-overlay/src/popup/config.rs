//! Per-popup configuration and per-call open/close options.

use core::fmt;

use crate::popup::PopupRecord;

/// The popup surface families the storefront uses.
///
/// This is behavioural metadata for the embedder (styling, placement);
/// the lifecycle treats all kinds identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PopupKind {
    #[default]
    Modal,
    Overlay,
    Popup,
    Filter,
    CarDetails,
}

/// What happens to a popup's form when it closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormResetPolicy {
    /// Reset the form to its defaults on close (the usual behaviour).
    #[default]
    OnClose,
    /// Keep whatever the user entered.
    Keep,
}

/// Static configuration attached to a popup at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopupConfig {
    pub kind: PopupKind,
    /// Whether Escape closes this popup when it is topmost.
    pub close_on_escape: bool,
    /// Whether a click on the backdrop closes this popup.
    pub close_on_backdrop: bool,
    /// Form handling on close.
    pub reset_policy: FormResetPolicy,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            kind: PopupKind::Modal,
            close_on_escape: true,
            close_on_backdrop: true,
            reset_policy: FormResetPolicy::OnClose,
        }
    }
}

impl PopupConfig {
    pub fn kind(mut self, kind: PopupKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = close;
        self
    }

    pub fn close_on_backdrop(mut self, close: bool) -> Self {
        self.close_on_backdrop = close;
        self
    }

    pub fn reset_policy(mut self, policy: FormResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }
}

type PopupCallback = Box<dyn FnOnce(&mut PopupRecord)>;

/// Options for a single `open` call.
pub struct OpenOptions {
    /// Close every other open popup first. Defaults to `true`, so at most
    /// one popup is open unless a caller opts out.
    pub close_others: bool,
    pub(crate) after_open: Option<PopupCallback>,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            close_others: true,
            after_open: None,
        }
    }
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close_others(mut self, close: bool) -> Self {
        self.close_others = close;
        self
    }

    /// Run a callback against the record once the popup is open, before
    /// the `Opened` notice is queued.
    pub fn after_open(mut self, callback: impl FnOnce(&mut PopupRecord) + 'static) -> Self {
        self.after_open = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for OpenOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenOptions")
            .field("close_others", &self.close_others)
            .field("after_open", &self.after_open.is_some())
            .finish()
    }
}

/// Options for a single `close` call.
#[derive(Default)]
pub struct CloseOptions {
    /// Override the popup's [`FormResetPolicy`] for this call.
    /// `None` defers to the policy.
    pub reset_form: Option<bool>,
    pub(crate) after_close: Option<PopupCallback>,
}

impl CloseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset_form(mut self, reset: bool) -> Self {
        self.reset_form = Some(reset);
        self
    }

    /// Run a callback against the record once the popup is closed, before
    /// the `Closed` notice is queued.
    pub fn after_close(mut self, callback: impl FnOnce(&mut PopupRecord) + 'static) -> Self {
        self.after_close = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for CloseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloseOptions")
            .field("reset_form", &self.reset_form)
            .field("after_close", &self.after_close.is_some())
            .finish()
    }
}
