//! Settings system for the formwright engine.
//!
//! This module provides the [`Settings`] struct, which holds all engine configuration,
//! and [`LazySettings`], a globally-accessible, lazily-initialized settings instance.
//! Forms read their defaults (messages, widget defaults, date formats) from here.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::size::ComponentSize;

/// When a value write re-runs that field's validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Fields validate on submit; after the first submit attempt every
    /// change revalidates the changed field.
    #[default]
    OnSubmit,
    /// Every change revalidates the changed field.
    OnChange,
}

/// The first day of a calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// ISO weeks.
    #[default]
    Monday,
    /// US-style weeks.
    Sunday,
}

/// The complete set of engine settings.
///
/// # Examples
///
/// ```
/// use formwright_core::settings::{Settings, ValidationMode};
///
/// let settings = Settings::default();
/// assert_eq!(settings.required_message, "This field is required.");
/// assert_eq!(settings.validation_mode, ValidationMode::OnSubmit);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty logs).
    pub debug: bool,
    /// The log level (e.g. "info", "debug", "warn").
    pub log_level: String,
    /// The size token used when a field does not set its own.
    pub component_size: ComponentSize,

    // ── Validation ───────────────────────────────────────────────────

    /// When value writes trigger revalidation.
    pub validation_mode: ValidationMode,
    /// Message for a required field without a value.
    pub required_message: String,
    /// Message for a `number` field whose text is not a number.
    pub invalid_number_message: String,
    /// Message for an `email` field whose text is not an address.
    pub invalid_email_message: String,
    /// Fallback message when a validator rejects without saying why.
    pub invalid_message: String,

    // ── Widgets ──────────────────────────────────────────────────────

    /// Textarea rows when the field does not configure them.
    pub textarea_rows: u32,
    /// Counter denominator for a textarea without a character cap.
    pub textarea_max: usize,
    /// Years before and after the current year offered by the calendar.
    pub calendar_year_span: i32,
    /// The first column of the calendar day grid.
    pub week_start: WeekStart,
    /// `chrono` format for the selected date shown in the calendar field.
    pub date_display_format: String,
    /// `chrono` format for the month label above the day grid.
    pub month_label_format: String,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Core
            debug: true,
            log_level: "info".to_string(),
            component_size: ComponentSize::Md,

            // Validation
            validation_mode: ValidationMode::OnSubmit,
            required_message: "This field is required.".to_string(),
            invalid_number_message: "Enter a number.".to_string(),
            invalid_email_message: "Enter a valid email address.".to_string(),
            invalid_message: "Enter a valid value.".to_string(),

            // Widgets
            textarea_rows: 10,
            textarea_max: 200,
            calendar_year_span: 20,
            week_start: WeekStart::Monday,
            date_display_format: "%d.%m.%Y".to_string(),
            month_label_format: "%b %Y".to_string(),

            // Extra
            extra: HashMap::new(),
        }
    }
}

/// A lazily-initialized, globally-accessible settings container.
///
/// Call [`configure`](LazySettings::configure) once at startup to set the
/// settings, then use [`get`](LazySettings::get) to access them.
///
/// # Panics
///
/// [`get`](LazySettings::get) panics if settings have not been configured.
/// [`configure`](LazySettings::configure) panics if called more than once.
pub struct LazySettings {
    inner: OnceLock<Settings>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Configures the global settings. Must be called exactly once.
    ///
    /// # Panics
    ///
    /// Panics if settings have already been configured.
    pub fn configure(&self, settings: Settings) {
        self.inner
            .set(settings)
            .expect("Settings have already been configured");
    }

    /// Returns a reference to the configured settings.
    ///
    /// # Panics
    ///
    /// Panics if settings have not been configured.
    pub fn get(&self) -> &Settings {
        self.inner
            .get()
            .expect("Settings have not been configured. Call SETTINGS.configure() first.")
    }

    /// Returns the configured settings, if any.
    pub fn try_get(&self) -> Option<&Settings> {
        self.inner.get()
    }

    /// Returns `true` if settings have been configured.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global settings instance.
///
/// Call `SETTINGS.configure(settings)` once at application startup; forms
/// mounted without explicit settings pick them up through [`current`].
pub static SETTINGS: LazySettings = LazySettings::new();

/// Returns a copy of the global settings, or the defaults when none were configured.
pub fn current() -> Settings {
    SETTINGS.try_get().cloned().unwrap_or_default()
}
