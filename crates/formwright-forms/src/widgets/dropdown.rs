//! Single-choice dropdown.
//!
//! Interaction states are `closed` and `open`. Activating the trigger (click
//! or Enter) toggles between them; choosing an option writes its value and
//! closes; losing focus closes.

use formwright_core::{FormError, FormResult};

use super::{unsupported, InputWidget, ValueIntent, WidgetEvent, WidgetView};
use crate::fields::{DropdownConfig, KindTag, SelectOption};
use crate::value::Value;

/// One entry of the open option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOptionView {
    pub label: String,
    /// What the list shows for this option.
    pub display: String,
    pub selected: bool,
}

/// Renderable state of a dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownView {
    pub open: bool,
    /// Text in the closed placeholder slot.
    pub placeholder_text: String,
    /// Whether an option matching the current value exists.
    pub has_selection: bool,
    pub options: Vec<DropdownOptionView>,
    pub dropdown_height: Option<String>,
}

/// A single-choice dropdown.
#[derive(Debug, Clone)]
pub struct Dropdown {
    name: String,
    selection: Vec<SelectOption>,
    placeholder: Option<String>,
    dropdown_height: Option<String>,
    open: bool,
}

impl Dropdown {
    /// Creates a dropdown. Fails if `config` has no options.
    pub fn new(name: &str, config: &DropdownConfig) -> FormResult<Self> {
        if config.selection.is_empty() {
            return Err(FormError::missing_config(name, "dropdown needs at least one option"));
        }
        Ok(Self {
            name: name.to_string(),
            selection: config.selection.clone(),
            placeholder: config.placeholder.clone(),
            dropdown_height: config.dropdown_height.clone(),
            open: false,
        })
    }

    /// Whether the option list is open.
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// The configured options.
    pub fn options(&self) -> &[SelectOption] {
        &self.selection
    }

    /// Index of the option whose value equals `current`.
    pub fn selected_index(&self, current: &Value) -> Option<usize> {
        if current.is_null() {
            return None;
        }
        self.selection.iter().position(|o| &o.value == current)
    }

    /// Without a placeholder the first option is chosen on mount, so the
    /// field never starts in a state the user cannot reproduce.
    fn auto_selects(&self) -> bool {
        self.placeholder.as_deref().map_or(true, str::is_empty)
    }

    fn toggle(&mut self) {
        self.open = !self.open;
        tracing::debug!(field = %self.name, open = self.open, "dropdown toggled");
    }

    fn close(&mut self) {
        self.open = false;
    }

    /// Chooses the option at `index`, closing the list.
    pub fn choose(&mut self, index: usize) -> FormResult<&SelectOption> {
        let option = self.selection.get(index).ok_or_else(|| FormError::InvalidOption {
            field: self.name.clone(),
            detail: format!("no option at index {index} (have {})", self.selection.len()),
        })?;
        self.open = false;
        Ok(option)
    }

    /// Applies a trigger/focus event that only affects open state.
    /// Returns `false` for events this method does not handle.
    pub(crate) fn apply_focus_event(&mut self, event: &WidgetEvent) -> bool {
        match event {
            WidgetEvent::Activate | WidgetEvent::KeyEnter => self.toggle(),
            WidgetEvent::Blur => self.close(),
            _ => return false,
        }
        true
    }
}

impl InputWidget for Dropdown {
    fn kind(&self) -> KindTag {
        KindTag::Dropdown
    }

    fn on_mount(&mut self, current: &Value) -> Vec<ValueIntent> {
        if self.auto_selects() && current.is_empty() {
            let first = self.selection[0].value.clone();
            tracing::debug!(field = %self.name, value = %first, "dropdown auto-selected first option");
            return vec![ValueIntent::initial(&self.name, first)];
        }
        Vec::new()
    }

    fn handle(&mut self, event: WidgetEvent, _current: &Value) -> FormResult<Vec<ValueIntent>> {
        if self.apply_focus_event(&event) {
            return Ok(Vec::new());
        }
        match event {
            WidgetEvent::SelectOption(index) => {
                let value = self.choose(index)?.value.clone();
                Ok(vec![ValueIntent::validated(&self.name, value)])
            }
            WidgetEvent::ClearSelection => {
                self.close();
                Ok(vec![ValueIntent::validated(&self.name, Value::Null)])
            }
            other => Err(unsupported(&self.name, &other)),
        }
    }

    fn view(&self, current: &Value) -> WidgetView {
        WidgetView::Dropdown(self.render(current))
    }
}

impl Dropdown {
    /// The dropdown's own view, for widgets embedding a dropdown.
    pub fn render(&self, current: &Value) -> DropdownView {
        let selected = self.selected_index(current);
        let placeholder_text = match selected {
            Some(i) => self.selection[i].selected_display().to_string(),
            None => self.placeholder.clone().unwrap_or_default(),
        };
        let options = self
            .selection
            .iter()
            .enumerate()
            .map(|(i, o)| DropdownOptionView {
                label: o.label.clone(),
                display: o.list_display().to_string(),
                selected: Some(i) == selected,
            })
            .collect();
        DropdownView {
            open: self.open,
            placeholder_text,
            has_selection: selected.is_some(),
            options,
            dropdown_height: self.dropdown_height.clone(),
        }
    }
}
