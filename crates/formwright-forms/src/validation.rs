//! Validation orchestrator.
//!
//! Each field is checked in three steps, stopping at the first failure:
//! 1. Required check: an empty value on a required field.
//! 2. Kind check: email addresses and numbers must look like one.
//! 3. The field's custom validator, if any.
//!
//! The custom validator runs for empty values of non-required fields too,
//! so it can reject emptiness itself. A panicking validator is a bug and
//! is not caught here.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use formwright_core::{Settings, ValidationError};

use crate::fields::{FieldDescriptor, FieldKind, Validity};
use crate::value::{Value, ValueRecord};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$")
        .expect("valid regex")
});

/// Per-field validation outcome for a whole form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    entries: BTreeMap<String, Option<ValidationError>>,
}

impl ValidationResult {
    /// Creates an empty result (nothing validated yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome for one field.
    pub fn insert(&mut self, name: impl Into<String>, outcome: Option<ValidationError>) {
        self.entries.insert(name.into(), outcome);
    }

    /// Forgets a field.
    pub fn remove(&mut self, name: &str) {
        self.entries.remove(name);
    }

    /// Forgets every field.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The error for `name`, if it was validated and failed.
    pub fn error(&self, name: &str) -> Option<&ValidationError> {
        self.entries.get(name).and_then(Option::as_ref)
    }

    /// The error message for `name`, if any.
    pub fn message(&self, name: &str) -> Option<&str> {
        self.error(name).map(|e| e.message.as_str())
    }

    /// Returns `true` if no validated field has an error.
    pub fn is_valid(&self) -> bool {
        self.entries.values().all(Option::is_none)
    }

    /// Returns `true` if `name` has been validated at least once.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All failing fields with their errors, in name order.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &ValidationError)> {
        self.entries
            .iter()
            .filter_map(|(name, e)| e.as_ref().map(|e| (name.as_str(), e)))
    }

    /// The raw entries: `None` for a valid field.
    pub const fn entries(&self) -> &BTreeMap<String, Option<ValidationError>> {
        &self.entries
    }
}

/// Validates one field value.
pub fn validate_field(
    field: &FieldDescriptor,
    value: &Value,
    settings: &Settings,
) -> Option<ValidationError> {
    if value.is_empty() {
        if let Some(msg) = field.required.message(&settings.required_message) {
            return Some(ValidationError::required(msg));
        }
    } else if let Some(err) = check_kind(&field.kind, value, settings) {
        return Some(err);
    }

    let validator = field.validate.as_ref()?;
    match validator(value) {
        Validity::Valid => None,
        Validity::Invalid(msg) if msg.is_empty() => {
            tracing::warn!(
                field = %field.name,
                "validator rejected a value without a message"
            );
            Some(ValidationError::custom(settings.invalid_message.clone()))
        }
        Validity::Invalid(msg) => Some(ValidationError::custom(msg)),
    }
}

/// Validates every field in `fields` against `values`.
pub fn validate_all(
    fields: &[FieldDescriptor],
    values: &ValueRecord,
    settings: &Settings,
) -> ValidationResult {
    let mut result = ValidationResult::new();
    for field in fields {
        let value = values.get(&field.name).unwrap_or(&Value::Null);
        result.insert(field.name.clone(), validate_field(field, value, settings));
    }
    result
}

fn check_kind(kind: &FieldKind, value: &Value, settings: &Settings) -> Option<ValidationError> {
    match kind {
        FieldKind::Email => {
            let ok = value.as_str().is_some_and(|s| EMAIL_RE.is_match(s));
            (!ok).then(|| ValidationError::invalid(settings.invalid_email_message.clone()))
        }
        FieldKind::Number => {
            let ok = match value {
                Value::Int(_) => true,
                Value::Float(f) => f.is_finite(),
                Value::String(s) => s.trim().parse::<f64>().is_ok_and(f64::is_finite),
                _ => false,
            };
            (!ok).then(|| ValidationError::invalid(settings.invalid_number_message.clone()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    fn settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn test_required_empty_uses_generic_message() {
        let field = FieldDescriptor::new("name", FieldKind::Text).required(true);
        let err = validate_field(&field, &Value::Null, &settings()).unwrap();
        assert!(err.is_required());
        assert_eq!(err.message, "This field is required.");
    }

    #[test]
    fn test_required_custom_message() {
        let field = FieldDescriptor::new("name", FieldKind::Text).required_message("Name please");
        let err = validate_field(&field, &Value::from(""), &settings()).unwrap();
        assert_eq!(err.message, "Name please");
    }

    #[test]
    fn test_required_failure_skips_validator() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        let field = FieldDescriptor::new("tags", FieldKind::checkbox(vec![]))
            .required(true)
            .validate(move |_| {
                c.fetch_add(1, Ordering::SeqCst);
                Validity::invalid("custom")
            });
        let err = validate_field(&field, &Value::List(vec![]), &settings()).unwrap();
        assert!(err.is_required());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_validator_runs_for_empty_optional_field() {
        let field = FieldDescriptor::new("nickname", FieldKind::Text)
            .validate(|v| if v.is_empty() { Validity::invalid("Say something") } else { Validity::Valid });
        let err = validate_field(&field, &Value::Null, &settings()).unwrap();
        assert_eq!(err.message, "Say something");
        assert_eq!(err.code, "custom");
        assert!(validate_field(&field, &Value::from("x"), &settings()).is_none());
    }

    #[test]
    fn test_empty_validator_message_falls_back() {
        let field = FieldDescriptor::new("x", FieldKind::Text).validate(|_| Validity::invalid(""));
        let err = validate_field(&field, &Value::from("a"), &settings()).unwrap();
        assert_eq!(err.message, "Enter a valid value.");
    }

    #[test]
    fn test_email_kind_check() {
        let field = FieldDescriptor::new("email", FieldKind::Email).validate(|_| Validity::Valid);
        assert!(validate_field(&field, &Value::from("ada@example.com"), &settings()).is_none());
        let err = validate_field(&field, &Value::from("not-an-email"), &settings()).unwrap();
        assert_eq!(err.code, "invalid");
        assert_eq!(err.message, "Enter a valid email address.");
        // Empty optional email is fine.
        assert!(validate_field(&field, &Value::from(""), &settings()).is_none());
    }

    #[test]
    fn test_number_kind_check() {
        let field = FieldDescriptor::new("age", FieldKind::Number);
        assert!(validate_field(&field, &Value::from(42), &settings()).is_none());
        assert!(validate_field(&field, &Value::from(1.5), &settings()).is_none());
        assert!(validate_field(&field, &Value::from(" 7 "), &settings()).is_none());
        let err = validate_field(&field, &Value::from("seven"), &settings()).unwrap();
        assert_eq!(err.message, "Enter a number.");
    }

    #[test]
    fn test_kind_failure_skips_validator() {
        let field = FieldDescriptor::new("age", FieldKind::Number)
            .validate(|_| Validity::invalid("should not run"));
        let err = validate_field(&field, &Value::from("x"), &settings()).unwrap();
        assert_eq!(err.code, "invalid");
    }

    #[test]
    #[should_panic(expected = "validator bug")]
    fn test_validator_panic_propagates() {
        let field = FieldDescriptor::new("x", FieldKind::Text).validate(|_| panic!("validator bug"));
        let _ = validate_field(&field, &Value::from("a"), &settings());
    }

    #[test]
    fn test_validate_all() {
        let fields = vec![
            FieldDescriptor::new("a", FieldKind::Text).required(true),
            FieldDescriptor::new("b", FieldKind::Text),
        ];
        let mut values = ValueRecord::new();
        values.insert("b".into(), Value::from("ok"));
        let result = validate_all(&fields, &values, &settings());
        assert!(!result.is_valid());
        assert_eq!(result.message("a"), Some("This field is required."));
        assert_eq!(result.message("b"), None);
        assert!(result.contains("b"));
        assert_eq!(result.errors().count(), 1);
    }
}
