//! Core error types for the formwright engine.
//!
//! Two kinds of failure exist and they never mix:
//!
//! - [`FormError`] covers configuration and misuse. It is fatal for the
//!   operation that produced it and is returned through [`FormResult`].
//! - [`ValidationError`] is a recoverable, per-field problem with the
//!   user's input. It is stored in the validation result and displayed
//!   inline; it is never returned as an `Err`.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Error code for a required field that has no value.
pub const CODE_REQUIRED: &str = "required";
/// Error code for a value rejected by a kind-level check (number, email).
pub const CODE_INVALID: &str = "invalid";
/// Error code for a value rejected by a custom validator.
pub const CODE_CUSTOM: &str = "custom";

/// A per-field validation failure.
///
/// # Examples
///
/// ```
/// use formwright_core::error::ValidationError;
///
/// let err = ValidationError::new("This field is required.", "required");
/// assert_eq!(err.to_string(), "This field is required.");
/// assert!(err.is_required());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The message shown next to the field.
    pub message: String,
    /// A short code identifying the failure (`required`, `invalid`, `custom`).
    pub code: String,
    /// Additional parameters providing context for the message.
    pub params: BTreeMap<String, String>,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a message and code.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            params: BTreeMap::new(),
        }
    }

    /// Creates a `required` error.
    pub fn required(message: impl Into<String>) -> Self {
        Self::new(message, CODE_REQUIRED)
    }

    /// Creates an `invalid` error from a kind-level check.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(message, CODE_INVALID)
    }

    /// Creates a `custom` error from a field validator.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::new(message, CODE_CUSTOM)
    }

    /// Adds a parameter to this validation error.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Returns `true` if this error came from the required check.
    pub fn is_required(&self) -> bool {
        self.code == CODE_REQUIRED
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// The primary error type for the formwright engine.
///
/// Configuration variants are raised while a schema is processed and abort
/// the mount: the engine never renders a partial form. The remaining
/// variants report misuse of a mounted form (events addressed to fields
/// that do not exist, events a widget cannot handle) or I/O while loading
/// settings.
#[derive(Error, Debug)]
pub enum FormError {
    // ── Configuration ────────────────────────────────────────────────

    /// A schema entry names a field kind the engine does not know.
    #[error("Unknown field kind: {0}")]
    UnknownFieldKind(String),

    /// Two schema entries share the same field name.
    #[error("Duplicate field name: {0}")]
    DuplicateField(String),

    /// A field kind is missing configuration it cannot work without.
    #[error("Missing configuration for field '{field}': {detail}")]
    MissingConfig {
        /// The field whose configuration is incomplete.
        field: String,
        /// What is missing.
        detail: String,
    },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Runtime misuse ───────────────────────────────────────────────

    /// A value or event was addressed to a field that is not in the schema.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A widget received an event it does not handle.
    #[error("Field '{field}' does not handle event {event}")]
    UnsupportedEvent {
        /// The field that received the event.
        field: String,
        /// The event name.
        event: String,
    },

    /// An event referred to an option that does not exist.
    #[error("Invalid option for field '{field}': {detail}")]
    InvalidOption {
        /// The field that received the event.
        field: String,
        /// What was wrong with the option.
        detail: String,
    },

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FormError {
    /// Returns `true` for errors raised while processing a schema or settings.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownFieldKind(_)
                | Self::DuplicateField(_)
                | Self::MissingConfig { .. }
                | Self::ConfigurationError(_)
        )
    }

    /// Shorthand for a [`FormError::MissingConfig`].
    pub fn missing_config(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MissingConfig {
            field: field.into(),
            detail: detail.into(),
        }
    }
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, FormError>`.
pub type FormResult<T> = Result<T, FormError>;
