//! # formwright-forms
//!
//! The schema-driven form engine. A list of [`FieldDescriptor`]s is mounted
//! into a [`FormController`], which owns the live values, runs validation,
//! and keeps one input widget per field with its interaction state.
//!
//! ## Modules
//!
//! - [`value`] - Field values and the value record
//! - [`fields`] - Field descriptors and kind-specific configuration
//! - [`schema`] - JSON schema loading and schema checks
//! - [`store`] - The value store
//! - [`validation`] - Required, kind and custom validation
//! - [`widgets`] - Input widgets and their events and views
//! - [`countries`] - Country data for phone fields
//! - [`animation`] - Animation handles supplied by the host
//! - [`bound_field`] - Per-field render views
//! - [`form`] - The form controller
//!
//! ## Example
//!
//! ```
//! use formwright_forms::{FieldDescriptor, FieldKind, FormController, SelectOption, WidgetEvent};
//!
//! let fields = vec![
//!     FieldDescriptor::new("languages", FieldKind::checkbox(vec![
//!         SelectOption::new("Rust", "rust"),
//!         SelectOption::new("Go", "go"),
//!     ])),
//! ];
//! let mut form = FormController::mount(fields, |_| Ok(())).unwrap();
//! form.dispatch("languages", WidgetEvent::Toggle(0)).unwrap();
//! assert_eq!(form.value("languages").unwrap().to_string(), "rust");
//! ```

pub mod animation;
pub mod bound_field;
pub mod countries;
pub mod fields;
pub mod form;
pub mod schema;
pub mod store;
pub mod validation;
pub mod value;
pub mod widgets;

pub use animation::{AnimationHandle, SharedAnimation};
pub use bound_field::BoundField;
pub use countries::{Country, CountryDataset};
pub use fields::{
    Autocomplete, CalendarConfig, CheckboxConfig, DropdownConfig, FieldDescriptor, FieldKind,
    KindTag, PhoneConfig, Required, SelectOption, TextareaConfig, Validity,
};
pub use form::{FormController, MountOptions, SetOptions, SubmitOutcome};
pub use schema::{check_schema, parse_schema};
pub use store::ValueStore;
pub use validation::ValidationResult;
pub use value::{Value, ValueRecord};
pub use widgets::{ValueIntent, WidgetEvent, WidgetView};
