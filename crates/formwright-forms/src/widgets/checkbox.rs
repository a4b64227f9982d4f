//! Checkbox group: one toggle per option, the field value is the list of
//! selected option values.

use formwright_core::{FormError, FormResult};

use super::{unsupported, InputWidget, ValueIntent, WidgetEvent, WidgetView};
use crate::animation::{HandleDebug, SharedAnimation};
use crate::fields::{CheckboxConfig, KindTag, SelectOption};
use crate::value::Value;

/// One toggle of a checkbox group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxOptionView {
    pub label: String,
    pub checked: bool,
}

/// Renderable state of a checkbox group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxView {
    pub options: Vec<CheckboxOptionView>,
}

struct CheckboxOption {
    option: SelectOption,
    animation: Option<SharedAnimation>,
}

/// A group of toggles writing a list value.
pub struct CheckboxGroup {
    name: String,
    options: Vec<CheckboxOption>,
}

impl std::fmt::Debug for CheckboxGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for o in &self.options {
            list.entry(&(&o.option.label, HandleDebug(&o.animation)));
        }
        list.finish()
    }
}

impl CheckboxGroup {
    /// Creates a group. Fails if `config` has no options.
    pub fn new(name: &str, config: &CheckboxConfig) -> FormResult<Self> {
        if config.selection.is_empty() {
            return Err(FormError::missing_config(name, "checkbox group needs at least one option"));
        }
        Ok(Self {
            name: name.to_string(),
            options: config
                .selection
                .iter()
                .cloned()
                .map(|option| CheckboxOption {
                    option,
                    animation: None,
                })
                .collect(),
        })
    }

    fn selected(current: &Value) -> Vec<Value> {
        match current {
            Value::List(items) => items.clone(),
            Value::Null => Vec::new(),
            // A scalar left over from an initial value counts as one selection.
            other if other.is_empty() => Vec::new(),
            other => vec![other.clone()],
        }
    }

    fn toggle(&self, index: usize, current: &Value) -> FormResult<Value> {
        let entry = self.options.get(index).ok_or_else(|| FormError::InvalidOption {
            field: self.name.clone(),
            detail: format!("no option at index {index} (have {})", self.options.len()),
        })?;
        let value = &entry.option.value;
        let mut selected = Self::selected(current);
        if let Some(pos) = selected.iter().position(|v| v == value) {
            selected.remove(pos);
            if let Some(anim) = &entry.animation {
                anim.reverse();
            }
        } else {
            selected.push(value.clone());
            if let Some(anim) = &entry.animation {
                anim.play();
            }
        }
        Ok(Value::List(selected))
    }
}

impl InputWidget for CheckboxGroup {
    fn kind(&self) -> KindTag {
        KindTag::Checkbox
    }

    fn handle(&mut self, event: WidgetEvent, current: &Value) -> FormResult<Vec<ValueIntent>> {
        match event {
            WidgetEvent::Toggle(index) => {
                let value = self.toggle(index, current)?;
                Ok(vec![ValueIntent::set(&self.name, value)])
            }
            WidgetEvent::Blur => Ok(Vec::new()),
            other => Err(unsupported(&self.name, &other)),
        }
    }

    fn view(&self, current: &Value) -> WidgetView {
        let selected = Self::selected(current);
        WidgetView::Checkbox(CheckboxView {
            options: self
                .options
                .iter()
                .map(|o| CheckboxOptionView {
                    label: o.option.label.clone(),
                    checked: selected.contains(&o.option.value),
                })
                .collect(),
        })
    }

    fn attach_animation(&mut self, index: usize, handle: SharedAnimation) -> FormResult<()> {
        let len = self.options.len();
        let entry = self.options.get_mut(index).ok_or_else(|| FormError::InvalidOption {
            field: self.name.clone(),
            detail: format!("no option at index {index} (have {len})"),
        })?;
        entry.animation = Some(handle);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::animation::testing::RecordingAnimation;

    fn group() -> CheckboxGroup {
        let config = CheckboxConfig {
            selection: vec![
                SelectOption::new("A", "a"),
                SelectOption::new("B", "b"),
                SelectOption::new("C", "c"),
            ],
        };
        CheckboxGroup::new("letters", &config).unwrap()
    }

    fn toggle(g: &mut CheckboxGroup, index: usize, current: &Value) -> Value {
        g.handle(WidgetEvent::Toggle(index), current).unwrap().remove(0).value
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut g = group();
        let v = toggle(&mut g, 0, &Value::Null);
        let v = toggle(&mut g, 1, &v);
        assert_eq!(v, Value::from(vec!["a", "b"]));
        let v = toggle(&mut g, 0, &v);
        assert_eq!(v, Value::from(vec!["b"]));
    }

    #[test]
    fn test_remaining_order_preserved() {
        let mut g = group();
        let start = Value::from(vec!["c", "a", "b"]);
        assert_eq!(toggle(&mut g, 0, &start), Value::from(vec!["c", "b"]));
    }

    #[test]
    fn test_animation_play_and_reverse() {
        let mut g = group();
        let anim = Arc::new(RecordingAnimation::default());
        g.attach_animation(1, anim.clone()).unwrap();
        let v = toggle(&mut g, 1, &Value::Null);
        toggle(&mut g, 1, &v);
        toggle(&mut g, 0, &Value::Null);
        assert_eq!(anim.calls(), vec!["play", "reverse"]);
    }

    #[test]
    fn test_attach_out_of_range() {
        let mut g = group();
        let anim = Arc::new(RecordingAnimation::default());
        assert!(g.attach_animation(5, anim).is_err());
    }

    #[test]
    fn test_view_checked_state() {
        let g = group();
        let WidgetView::Checkbox(view) = g.view(&Value::from(vec!["b"])) else {
            panic!("expected checkbox view");
        };
        let checked: Vec<bool> = view.options.iter().map(|o| o.checked).collect();
        assert_eq!(checked, vec![false, true, false]);
    }

    #[test]
    fn test_requires_options() {
        assert!(CheckboxGroup::new("x", &CheckboxConfig::default()).is_err());
    }
}
