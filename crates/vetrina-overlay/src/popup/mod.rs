#![forbid(unsafe_code)]

//! Popup lifecycle: registration, open/close transitions, stacking,
//! event routing, and notices.
//!
//! The [`PopupRegistry`] is the explicit replacement for document
//! scanning: whatever code creates a popup surface registers it once
//! via [`PopupBuilder`], then drives it through [`PopupRegistry::open`],
//! [`PopupRegistry::close`] and [`PopupRegistry::handle_event`].

mod config;
mod registry;

pub use config::{CloseOptions, FormResetPolicy, OpenOptions, PopupConfig, PopupKind};
pub use registry::{
    PopupBuilder, PopupHit, PopupId, PopupNotice, PopupPart, PopupRecord, PopupRegistry,
};
