#![forbid(unsafe_code)]

//! Headless popup/overlay lifecycle management for the Vetrina storefront.
//!
//! This crate owns the *state* of every popup-like surface on a page:
//! open/closed flags, stacking order, keyboard-focus confinement, form
//! contents and reset policy, and carousel indices for image cycling
//! inside popups. Rendering and networking belong to the embedder.
//!
//! Popups are registered explicitly by whatever code creates them; there
//! is no document scanning. The [`popup::PopupRegistry`] is the single
//! entry point:
//!
//! ```
//! use vetrina_core::Event;
//! use vetrina_overlay::popup::{OpenOptions, PopupBuilder, PopupRegistry};
//!
//! let mut registry = PopupRegistry::new();
//! let id = registry.register(PopupBuilder::new("filterPopup"));
//!
//! registry.open(id, OpenOptions::default()).unwrap();
//! assert_eq!(registry.top_most(), Some(id));
//!
//! // Escape closes the topmost popup.
//! registry.handle_event(&Event::escape(), None);
//! assert!(!registry.any_open());
//! ```

pub mod carousel;
pub mod error;
pub mod focus;
pub mod form;
pub mod pages;
pub mod popup;

pub use carousel::Carousel;
pub use error::OverlayError;
pub use focus::FocusTrap;
pub use form::{FormField, FormModel};
pub use popup::{
    CloseOptions, FormResetPolicy, OpenOptions, PopupBuilder, PopupConfig, PopupHit, PopupId,
    PopupKind, PopupNotice, PopupPart, PopupRecord, PopupRegistry,
};
