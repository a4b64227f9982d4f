//! Bound fields: a field descriptor paired with its live value, error and
//! widget state.
//!
//! [`FormController::render`](crate::form::FormController::render) returns
//! one [`BoundField`] per descriptor, in schema order. A presentation layer
//! turns these into visual output.

use formwright_core::ComponentSize;

use crate::fields::{Autocomplete, FieldDescriptor, KindTag};
use crate::value::Value;
use crate::widgets::WidgetView;

/// A form field bound to data and validation state.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundField {
    /// The field name.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    pub kind: KindTag,
    /// Size token: the field's own, else the form's.
    pub size: ComponentSize,
    pub autocomplete: Option<Autocomplete>,
    /// The current value from the value store.
    pub value: Value,
    /// The current validation error message, if any.
    pub error: Option<String>,
    pub required: bool,
    /// Whether the value differs from its initial value.
    pub dirty: bool,
    /// The widget's interaction state.
    pub widget: WidgetView,
}

impl BoundField {
    /// Creates a new `BoundField` from a descriptor and current state.
    pub fn new(
        field: &FieldDescriptor,
        form_size: ComponentSize,
        value: Value,
        error: Option<String>,
        dirty: bool,
        widget: WidgetView,
    ) -> Self {
        Self {
            name: field.name.clone(),
            label: field.label.clone(),
            kind: field.kind_tag(),
            size: field.size.unwrap_or(form_size),
            autocomplete: field.autocomplete,
            value,
            error,
            required: field.required.is_required(),
            dirty,
            widget,
        }
    }

    /// Returns `true` if this field has an error.
    pub const fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// The HTML-style id for this field.
    pub fn auto_id(&self) -> String {
        format!("id_{}", self.name)
    }
}
