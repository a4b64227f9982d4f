//! The value store: the single owner of a form's field values.
//!
//! Every write goes through [`ValueStore::set`] or [`ValueStore::initialize`].
//! Writes are synchronous; the next [`ValueStore::get`] observes them.
//! A field is dirty when its current value differs from the value it was
//! initialized with.

use std::collections::BTreeMap;

use crate::value::{Value, ValueRecord};

/// Holds current and initial field values.
#[derive(Debug, Clone, Default)]
pub struct ValueStore {
    values: ValueRecord,
    defaults: BTreeMap<String, Value>,
}

impl ValueStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current value of `name`, if it has one.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns the current value of `name`, treating a missing entry as `Null`.
    pub fn get_or_null(&self, name: &str) -> &Value {
        const NULL: &Value = &Value::Null;
        self.values.get(name).unwrap_or(NULL)
    }

    /// Writes `value` under `name`. Returns `true` if the stored value changed.
    ///
    /// Writing the value that is already stored is a no-op.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        if self.values.get(name) == Some(&value) {
            return false;
        }
        tracing::debug!(field = name, value = %value, "value written");
        self.values.insert(name.to_string(), value);
        true
    }

    /// Writes `value` under `name` and records it as the field's initial
    /// value, so the field is not dirty afterwards.
    pub fn initialize(&mut self, name: &str, value: Value) {
        self.defaults.insert(name.to_string(), value.clone());
        self.values.insert(name.to_string(), value);
    }

    /// Removes `name` entirely. Used when a field leaves the schema.
    pub fn remove(&mut self, name: &str) {
        self.values.remove(name);
        self.defaults.remove(name);
    }

    /// The live value record.
    pub const fn watch_all(&self) -> &ValueRecord {
        &self.values
    }

    /// Returns `true` if `name` differs from its initial value.
    pub fn is_dirty(&self, name: &str) -> bool {
        let default = self.defaults.get(name).unwrap_or(&Value::Null);
        let current = self.values.get(name).unwrap_or(&Value::Null);
        default != current
    }

    /// Names of all dirty fields, in name order.
    pub fn dirty_fields(&self) -> Vec<&str> {
        self.values
            .keys()
            .filter(|name| self.is_dirty(name))
            .map(String::as_str)
            .collect()
    }

    /// Restores every field to its initial value.
    pub fn reset(&mut self) {
        self.values.retain(|name, _| self.defaults.contains_key(name));
        for (name, value) in &self.defaults {
            self.values.insert(name.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let mut store = ValueStore::new();
        assert!(store.get("name").is_none());
        assert!(store.set("name", Value::from("Ada")));
        assert_eq!(store.get("name"), Some(&Value::from("Ada")));
    }

    #[test]
    fn test_set_same_value_is_noop() {
        let mut store = ValueStore::new();
        assert!(store.set("name", Value::from("Ada")));
        assert!(!store.set("name", Value::from("Ada")));
        assert_eq!(store.watch_all().len(), 1);
    }

    #[test]
    fn test_initialize_is_not_dirty() {
        let mut store = ValueStore::new();
        store.initialize("country", Value::from("de"));
        assert!(!store.is_dirty("country"));
        store.set("country", Value::from("fr"));
        assert!(store.is_dirty("country"));
        assert_eq!(store.dirty_fields(), vec!["country"]);
        store.set("country", Value::from("de"));
        assert!(store.dirty_fields().is_empty());
    }

    #[test]
    fn test_unknown_field_written_is_dirty() {
        let mut store = ValueStore::new();
        store.set("notes", Value::from("x"));
        assert!(store.is_dirty("notes"));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut store = ValueStore::new();
        store.initialize("a", Value::from(1));
        store.set("a", Value::from(2));
        store.set("b", Value::from("stray"));
        store.reset();
        assert_eq!(store.get("a"), Some(&Value::from(1)));
        assert!(store.get("b").is_none());
        assert!(store.dirty_fields().is_empty());
    }

    #[test]
    fn test_remove() {
        let mut store = ValueStore::new();
        store.initialize("a", Value::from(1));
        store.remove("a");
        assert!(store.get("a").is_none());
        assert_eq!(store.get_or_null("a"), &Value::Null);
    }
}
