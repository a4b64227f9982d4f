//! # formwright-core
//!
//! Core types, settings, logging, and error types for the formwright engine.
//! This crate has no engine dependencies and provides the foundation for all other crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Engine settings and global configuration
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration
//! - [`size`] - Component size tokens
//! - [`theme`] - Theme tokens and explicit theme application

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod size;
pub mod theme;

// Re-export the most commonly used types at the crate root.
pub use error::{FormError, FormResult, ValidationError};
pub use settings::{Settings, SETTINGS};
pub use size::ComponentSize;
