//! Phone number input: a country selector fused with a local number.
//!
//! The widget keeps the selected country and the typed digits privately and
//! writes one composite value under the field's own name: the country's
//! dial code followed by the digits, or `""` while no country is selected.

use formwright_core::{FormError, FormResult};

use super::dropdown::{Dropdown, DropdownView};
use super::{unsupported, InputWidget, ValueIntent, WidgetEvent, WidgetView};
use crate::countries::{Country, CountryDataset};
use crate::fields::{DropdownConfig, KindTag, PhoneConfig, SelectOption};
use crate::value::Value;

/// Renderable state of a phone input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneView {
    /// The internal country selector.
    pub country_selector: DropdownView,
    pub selected_country: Option<String>,
    pub dial_code: Option<String>,
    pub flag: Option<String>,
    pub digits: String,
}

/// A phone number input.
#[derive(Debug, Clone)]
pub struct PhoneInput {
    name: String,
    countries: Vec<Country>,
    selector: Dropdown,
    country: Option<usize>,
    digits: String,
}

impl PhoneInput {
    /// Creates a phone input over `dataset`, restricted to the allow-list.
    ///
    /// Fails if the allow-list leaves no country to choose from.
    pub fn new(name: &str, config: &PhoneConfig, dataset: &CountryDataset) -> FormResult<Self> {
        let countries = dataset.filtered(config.country_allow_list.as_deref());
        if countries.is_empty() {
            return Err(FormError::missing_config(name, "no country matches the allow-list"));
        }
        let selection = countries
            .iter()
            .map(|c| {
                SelectOption::new(&c.full_name, c.full_name.as_str()).placeholder_display(&c.flag)
            })
            .collect();
        let mut selector_config = DropdownConfig::new(selection).placeholder(" ");
        selector_config.dropdown_height = config.dropdown_height.clone();
        Ok(Self {
            name: name.to_string(),
            selector: Dropdown::new(&format!("{name}.country"), &selector_config)?,
            countries,
            country: None,
            digits: String::new(),
        })
    }

    /// The selected country, if any.
    pub fn country(&self) -> Option<&Country> {
        self.country.and_then(|i| self.countries.get(i))
    }

    /// The dial code of the selected country.
    pub fn dial_code(&self) -> Option<&str> {
        self.country().map(|c| c.dial_code.as_str())
    }

    /// The countries offered, in display order.
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Dial code plus digits, or `""` without a country.
    pub fn composite(&self) -> String {
        match self.dial_code() {
            Some(dial) => format!("{dial}{}", self.digits),
            None => String::new(),
        }
    }

    fn select_by_name(&mut self, full_name: &str) -> FormResult<()> {
        let index = self
            .countries
            .iter()
            .position(|c| c.full_name.eq_ignore_ascii_case(full_name))
            .ok_or_else(|| FormError::InvalidOption {
                field: self.name.clone(),
                detail: format!("country '{full_name}' is not offered"),
            })?;
        self.selector.choose(index)?;
        self.country = Some(index);
        Ok(())
    }

    fn selector_value(&self) -> Value {
        self.country()
            .map_or(Value::Null, |c| Value::from(c.full_name.as_str()))
    }

    fn recompute(&self) -> Vec<ValueIntent> {
        let value = self.composite();
        tracing::debug!(field = %self.name, value = %value, "phone composite recomputed");
        vec![ValueIntent::set(&self.name, value)]
    }
}

impl InputWidget for PhoneInput {
    fn kind(&self) -> KindTag {
        KindTag::Phone
    }

    fn on_mount(&mut self, current: &Value) -> Vec<ValueIntent> {
        if !current.is_empty() {
            tracing::warn!(
                field = %self.name,
                value = %current,
                "phone value cannot be split into country and digits, widget starts empty"
            );
        }
        vec![ValueIntent::initial(&self.name, self.composite())]
    }

    fn handle(&mut self, event: WidgetEvent, _current: &Value) -> FormResult<Vec<ValueIntent>> {
        if self.selector.apply_focus_event(&event) {
            return Ok(Vec::new());
        }
        match event {
            WidgetEvent::SelectOption(index) => {
                self.selector.choose(index)?;
                self.country = Some(index);
            }
            WidgetEvent::SelectCountry(Some(full_name)) => self.select_by_name(&full_name)?,
            WidgetEvent::SelectCountry(None) | WidgetEvent::ClearSelection => {
                self.country = None;
            }
            WidgetEvent::Digits(digits) | WidgetEvent::Input(digits) => {
                self.digits = digits;
            }
            other => return Err(unsupported(&self.name, &other)),
        }
        Ok(self.recompute())
    }

    fn view(&self, _current: &Value) -> WidgetView {
        WidgetView::Phone(PhoneView {
            country_selector: self.selector.render(&self.selector_value()),
            selected_country: self.country().map(|c| c.full_name.clone()),
            dial_code: self.dial_code().map(str::to_string),
            flag: self.country().map(|c| c.flag.clone()),
            digits: self.digits.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> CountryDataset {
        CountryDataset::from_json(
            r#"[
                {"name": "a", "full_name": "Alpha", "dial_code": "+1", "flag": "a.svg"},
                {"name": "b", "full_name": "Beta", "dial_code": "+44", "flag": "b.svg"}
            ]"#,
        )
        .unwrap()
    }

    fn phone() -> PhoneInput {
        PhoneInput::new("phone", &PhoneConfig::default(), &dataset()).unwrap()
    }

    fn last_value(intents: &[ValueIntent]) -> &Value {
        &intents.last().unwrap().value
    }

    #[test]
    fn test_mount_writes_empty_initial_value() {
        let mut p = phone();
        assert_eq!(p.on_mount(&Value::Null), vec![ValueIntent::initial("phone", "")]);
    }

    #[test]
    fn test_mount_replaces_existing_value() {
        let mut p = phone();
        let intents = p.on_mount(&Value::from("+15551234"));
        assert_eq!(intents, vec![ValueIntent::initial("phone", "")]);
        assert_eq!(p.dial_code(), None);
    }

    #[test]
    fn test_country_then_digits() {
        let mut p = phone();
        let i = p.handle(WidgetEvent::SelectCountry(Some("Alpha".into())), &Value::Null).unwrap();
        assert_eq!(last_value(&i), &Value::from("+1"));
        let i = p.handle(WidgetEvent::Digits("5551234".into()), &Value::Null).unwrap();
        assert_eq!(last_value(&i), &Value::from("+15551234"));
        assert!(!i[0].validate);
    }

    #[test]
    fn test_digits_without_country_stay_empty() {
        let mut p = phone();
        let i = p.handle(WidgetEvent::Digits("5551234".into()), &Value::Null).unwrap();
        assert_eq!(last_value(&i), &Value::from(""));
    }

    #[test]
    fn test_clearing_country_resets_value() {
        let mut p = phone();
        p.handle(WidgetEvent::SelectOption(1), &Value::Null).unwrap();
        p.handle(WidgetEvent::Digits("2071838750".into()), &Value::Null).unwrap();
        assert_eq!(p.composite(), "+442071838750");
        let i = p.handle(WidgetEvent::SelectCountry(None), &Value::Null).unwrap();
        assert_eq!(last_value(&i), &Value::from(""));
        let PhoneView { digits, dial_code, .. } = match p.view(&Value::Null) {
            WidgetView::Phone(v) => v,
            other => panic!("unexpected view {other:?}"),
        };
        assert_eq!(digits, "2071838750");
        assert_eq!(dial_code, None);
    }

    #[test]
    fn test_allow_list_filters() {
        let config = PhoneConfig {
            country_allow_list: Some(vec!["beta".into()]),
            dropdown_height: None,
        };
        let mut p = PhoneInput::new("phone", &config, &dataset()).unwrap();
        assert_eq!(p.countries().len(), 1);
        let err = p
            .handle(WidgetEvent::SelectCountry(Some("Alpha".into())), &Value::Null)
            .unwrap_err();
        assert!(matches!(err, FormError::InvalidOption { .. }));
    }

    #[test]
    fn test_selector_open_state() {
        let mut p = phone();
        assert!(p.handle(WidgetEvent::Activate, &Value::Null).unwrap().is_empty());
        p.handle(WidgetEvent::SelectOption(0), &Value::Null).unwrap();
        let WidgetView::Phone(view) = p.view(&Value::Null) else {
            panic!("expected phone view");
        };
        assert!(!view.country_selector.open);
        assert_eq!(view.country_selector.placeholder_text, "a.svg");
        assert_eq!(view.flag.as_deref(), Some("a.svg"));
    }

    #[test]
    fn test_unselected_selector_shows_blank_placeholder() {
        let p = phone();
        let WidgetView::Phone(view) = p.view(&Value::Null) else {
            panic!("expected phone view");
        };
        assert_eq!(view.country_selector.placeholder_text, " ");
        assert!(!view.country_selector.has_selection);
    }
}
