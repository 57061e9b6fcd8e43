//! Error taxonomy for overlay operations.
//!
//! Nothing here is fatal: a missing popup aborts the one operation that
//! named it, and form rejections leave the form untouched. Queries that
//! can simply find nothing return `Option` instead.

use crate::popup::PopupId;

/// Errors returned by registry and form operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OverlayError {
    /// The operation named a popup id the registry has never seen.
    #[error("no popup registered under id {0}")]
    UnknownPopup(PopupId),

    /// A form write named a field that does not exist.
    #[error("form has no field named `{0}`")]
    UnknownField(String),

    /// A form write violated the field's minimum constraint.
    #[error("value `{value}` for field `{field}` is below the minimum `{min}`")]
    BelowMinimum {
        field: String,
        value: String,
        min: String,
    },
}
