//! Settings loading from configuration files.
//!
//! This module provides functions to load [`Settings`] from TOML files, JSON
//! files, and to apply environment variable overrides.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `FORMWRIGHT_DEBUG` | `debug` |
//! | `FORMWRIGHT_LOG_LEVEL` | `log_level` |
//! | `FORMWRIGHT_COMPONENT_SIZE` | `component_size` |
//! | `FORMWRIGHT_VALIDATION_MODE` | `validation_mode` (`on_submit` / `on_change`) |
//! | `FORMWRIGHT_REQUIRED_MESSAGE` | `required_message` |
//! | `FORMWRIGHT_WEEK_START` | `week_start` (`monday` / `sunday`) |
//! | `FORMWRIGHT_DATE_DISPLAY_FORMAT` | `date_display_format` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use formwright_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file("config/forms.toml").unwrap();
//! let settings = settings_loader::from_json_file_with_env("config/forms.json").unwrap();
//! ```

use std::path::Path;

use crate::error::FormError;
use crate::settings::{Settings, ValidationMode, WeekStart};

/// Loads settings from a TOML string.
///
/// Any fields not present in the TOML keep their default values.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, FormError> {
    // Deserialize into a serde_json::Value first so the document can be
    // deep-merged over the serialized defaults.
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| FormError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, FormError> {
    let content = read_config(path.as_ref(), "TOML")?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, FormError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<Settings, FormError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| FormError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, FormError> {
    let content = read_config(path.as_ref(), "JSON")?;
    from_json_str(&content)
}

/// Loads settings from a JSON file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file_with_env(path: impl AsRef<Path>) -> Result<Settings, FormError> {
    let mut settings = from_json_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
///
/// Unparseable values for enum-typed settings are ignored with a warning.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("FORMWRIGHT_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Ok(val) = std::env::var("FORMWRIGHT_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("FORMWRIGHT_COMPONENT_SIZE") {
        match val.parse() {
            Ok(size) => settings.component_size = size,
            Err(e) => tracing::warn!(value = %val, error = %e, "ignoring FORMWRIGHT_COMPONENT_SIZE"),
        }
    }

    if let Ok(val) = std::env::var("FORMWRIGHT_VALIDATION_MODE") {
        match val.to_lowercase().as_str() {
            "on_submit" | "onsubmit" => settings.validation_mode = ValidationMode::OnSubmit,
            "on_change" | "onchange" => settings.validation_mode = ValidationMode::OnChange,
            _ => tracing::warn!(value = %val, "ignoring FORMWRIGHT_VALIDATION_MODE"),
        }
    }

    if let Ok(val) = std::env::var("FORMWRIGHT_REQUIRED_MESSAGE") {
        settings.required_message = val;
    }

    if let Ok(val) = std::env::var("FORMWRIGHT_WEEK_START") {
        match val.to_lowercase().as_str() {
            "monday" => settings.week_start = WeekStart::Monday,
            "sunday" => settings.week_start = WeekStart::Sunday,
            _ => tracing::warn!(value = %val, "ignoring FORMWRIGHT_WEEK_START"),
        }
    }

    if let Ok(val) = std::env::var("FORMWRIGHT_DATE_DISPLAY_FORMAT") {
        settings.date_display_format = val;
    }
}

// ============================================================
// Helpers
// ============================================================

fn read_config(path: &Path, format: &str) -> Result<String, FormError> {
    std::fs::read_to_string(path).map_err(|e| {
        FormError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

fn merge_over_defaults(value: serde_json::Value, format: &str) -> Result<Settings, FormError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        FormError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        FormError::ConfigurationError(format!("Failed to deserialize settings from {format}: {e}"))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size::ComponentSize;

    // ── TOML loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            debug = false
            required_message = "Pflichtfeld"
            component_size = "lg"
            week_start = "sunday"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.required_message, "Pflichtfeld");
        assert_eq!(settings.component_size, ComponentSize::Lg);
        assert_eq!(settings.week_start, WeekStart::Sunday);
        // Defaults preserved
        assert_eq!(settings.textarea_rows, 10);
    }

    #[test]
    fn test_from_toml_str_extra_table() {
        let toml = r#"
            [extra]
            brand = "acme"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert_eq!(
            settings.extra.get("brand"),
            Some(&serde_json::json!("acme"))
        );
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert!(settings.debug);
        assert_eq!(settings.validation_mode, ValidationMode::OnSubmit);
    }

    #[test]
    fn test_from_toml_str_malformed() {
        let err = from_toml_str("debug = = true").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        let err = from_toml_str("textarea_rows = \"ten\"").unwrap_err();
        assert!(err.to_string().contains("TOML"));
    }

    // ── JSON loading ────────────────────────────────────────────────

    #[test]
    fn test_from_json_str_basic() {
        let json = r#"{"validation_mode": "on_change", "calendar_year_span": 5}"#;
        let settings = from_json_str(json).unwrap();
        assert_eq!(settings.validation_mode, ValidationMode::OnChange);
        assert_eq!(settings.calendar_year_span, 5);
        assert_eq!(settings.month_label_format, "%b %Y");
    }

    #[test]
    fn test_from_json_str_malformed() {
        assert!(from_json_str("{not json").is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let err = from_toml_file("/nonexistent/forms.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read TOML file"));
    }

    #[test]
    fn test_from_toml_file_round_trip() {
        let dir = std::env::temp_dir();
        let path = dir.join("formwright_settings_loader_test.toml");
        std::fs::write(&path, "log_level = \"debug\"\n").unwrap();
        let settings = from_toml_file(&path).unwrap();
        assert_eq!(settings.log_level, "debug");
        std::fs::remove_file(&path).ok();
    }

    // ── Environment overrides ───────────────────────────────────────

    #[test]
    fn test_env_overrides() {
        std::env::set_var("FORMWRIGHT_REQUIRED_MESSAGE", "Bitte ausfüllen");
        std::env::set_var("FORMWRIGHT_VALIDATION_MODE", "on_change");
        std::env::set_var("FORMWRIGHT_COMPONENT_SIZE", "bogus");

        let settings = from_env();
        assert_eq!(settings.required_message, "Bitte ausfüllen");
        assert_eq!(settings.validation_mode, ValidationMode::OnChange);
        // Unparseable size is ignored
        assert_eq!(settings.component_size, ComponentSize::Md);

        std::env::remove_var("FORMWRIGHT_REQUIRED_MESSAGE");
        std::env::remove_var("FORMWRIGHT_VALIDATION_MODE");
        std::env::remove_var("FORMWRIGHT_COMPONENT_SIZE");
    }

    // ── Helpers ─────────────────────────────────────────────────────

    #[test]
    fn test_merge_json_nested() {
        let base = serde_json::json!({"a": {"b": 1, "c": 2}, "d": 3});
        let over = serde_json::json!({"a": {"b": 10}});
        let merged = merge_json(base, over);
        assert_eq!(merged, serde_json::json!({"a": {"b": 10, "c": 2}, "d": 3}));
    }
}
