//! Ordered form model held by a popup record.
//!
//! Field values are strings, mirroring what the surrounding pages read
//! and write (everything crosses the wire as text). A field may carry a
//! minimum constraint; comparison is lexicographic, which is correct for
//! the ISO dates it is used with.
//!
//! # Invariants
//!
//! - Field names are unique within a form.
//! - `reset()` restores every field to its default and clears the submit
//!   action; it never fails.
//!
//! # Failure Modes
//!
//! - `set` on an unknown field returns [`OverlayError::UnknownField`] and
//!   changes nothing.
//! - `set` below a field minimum returns [`OverlayError::BelowMinimum`]
//!   and changes nothing.

use crate::error::OverlayError;

/// A single named field with a default value and an optional minimum.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormField {
    name: String,
    value: String,
    default: String,
    min: Option<String>,
}

impl FormField {
    /// The field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The default the field resets to.
    pub fn default_value(&self) -> &str {
        &self.default
    }

    /// The minimum constraint, if any.
    pub fn min(&self) -> Option<&str> {
        self.min.as_deref()
    }
}

/// An ordered collection of form fields plus a submit action.
///
/// Order matters only for iteration (it matches the order fields were
/// declared in); lookups are by name. Forms are small, so lookups are
/// linear scans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormModel {
    fields: Vec<FormField>,
    action: Option<String>,
}

impl FormModel {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field with a default value.
    ///
    /// Redeclaring an existing name replaces its default and resets the
    /// current value.
    pub fn field(mut self, name: impl Into<String>, default: impl Into<String>) -> Self {
        let name = name.into();
        let default = default.into();
        if let Some(existing) = self.fields.iter_mut().find(|f| f.name == name) {
            existing.value = default.clone();
            existing.default = default;
        } else {
            self.fields.push(FormField {
                name,
                value: default.clone(),
                default,
                min: None,
            });
        }
        self
    }

    /// Declare a field with a default value and a minimum constraint.
    pub fn field_with_min(
        mut self,
        name: impl Into<String>,
        default: impl Into<String>,
        min: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let min = min.into();
        self = self.field(name.clone(), default);
        if let Some(existing) = self.fields.iter_mut().find(|f| f.name == name) {
            existing.min = Some(min);
        }
        self
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the form has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.fields.iter()
    }

    /// Current value of a field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Set a field value.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), OverlayError> {
        let value = value.into();
        let Some(field) = self.fields.iter_mut().find(|f| f.name == name) else {
            return Err(OverlayError::UnknownField(name.to_owned()));
        };
        if let Some(min) = &field.min
            && !value.is_empty()
            && value.as_str() < min.as_str()
        {
            return Err(OverlayError::BelowMinimum {
                field: name.to_owned(),
                value,
                min: min.clone(),
            });
        }
        field.value = value;
        Ok(())
    }

    /// Tighten (or set) the minimum constraint on a field.
    ///
    /// A current value below the new minimum is left in place; it will be
    /// rejected on the next `set`.
    pub fn set_min(&mut self, name: &str, min: impl Into<String>) -> Result<(), OverlayError> {
        let Some(field) = self.fields.iter_mut().find(|f| f.name == name) else {
            return Err(OverlayError::UnknownField(name.to_owned()));
        };
        field.min = Some(min.into());
        Ok(())
    }

    /// The submit endpoint, if one has been set.
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Set the submit endpoint.
    pub fn set_action(&mut self, action: impl Into<String>) {
        self.action = Some(action.into());
    }

    /// Whether any field differs from its default.
    pub fn is_dirty(&self) -> bool {
        self.fields.iter().any(|f| f.value != f.default)
    }

    /// Restore every field to its default and clear the submit action.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value = field.default.clone();
        }
        self.action = None;
    }
}
