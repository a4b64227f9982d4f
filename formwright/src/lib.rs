//! # formwright
//!
//! A schema-driven form engine for Rust.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient access.
//! You can depend on `formwright` to get the entire engine, or depend on
//! individual crates for finer-grained control.
//!
//! ```
//! use formwright::forms::{FieldDescriptor, FieldKind, FormController, SubmitOutcome};
//!
//! let fields = vec![FieldDescriptor::new("name", FieldKind::Text).required(true)];
//! let mut form = FormController::mount(fields, |_values| Ok(())).unwrap();
//!
//! assert!(matches!(form.submit(), SubmitOutcome::Rejected { .. }));
//! ```

/// Core types: settings, logging, size and theme tokens, and error types.
pub use formwright_core as core;

/// Field schemas, value store, validation, input widgets, and the form controller.
#[cfg(feature = "forms")]
pub use formwright_forms as forms;

/// Signal dispatcher for decoupled change notifications.
#[cfg(feature = "signals")]
pub use formwright_signals as signals;

pub use formwright_core::{FormError, FormResult, Settings, ValidationError};
