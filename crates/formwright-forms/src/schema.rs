//! Schema documents and schema checks.
//!
//! [`parse_schema`] reads the loosely typed JSON form description (one
//! `inputConfig` object carrying sub-configs for every kind) and turns it
//! into [`FieldDescriptor`]s with a closed [`FieldKind`]. Sub-configs that do
//! not belong to a field's kind are ignored. Validators are code, so they
//! are attached to the returned descriptors afterwards.
//!
//! [`check_schema`] rejects schemas no form can be mounted from. It runs on
//! every mount and schema update.
//!
//! ## Examples
//!
//! ```
//! use formwright_forms::schema::parse_schema;
//! use formwright_forms::fields::KindTag;
//!
//! let fields = parse_schema(r#"[
//!     {"name": "email", "label": "Email", "type": "email", "required": "We need your email"},
//!     {"name": "topic", "label": "Topic", "type": "dropdown",
//!      "inputConfig": {"dropDown": {"selection": [{"label": "Sales", "value": "sales"}]}}}
//! ]"#).unwrap();
//!
//! assert_eq!(fields[1].kind_tag(), KindTag::Dropdown);
//! ```

use std::collections::HashSet;

use serde::Deserialize;

use formwright_core::{ComponentSize, FormError, FormResult};

use crate::countries::CountryDataset;
use crate::fields::{
    Autocomplete, CalendarConfig, CheckboxConfig, DropdownConfig, FieldDescriptor, FieldKind,
    KindTag, PhoneConfig, Required, TextareaConfig,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    name: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    required: RawRequired,
    #[serde(default)]
    input_config: RawInputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRequired {
    Flag(bool),
    Message(String),
}

impl Default for RawRequired {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl From<RawRequired> for Required {
    fn from(raw: RawRequired) -> Self {
        match raw {
            RawRequired::Flag(flag) => Self::from(flag),
            // An empty message is falsy: the field is optional.
            RawRequired::Message(msg) if msg.is_empty() => Self::No,
            RawRequired::Message(msg) => Self::Message(msg),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawInputConfig {
    size: Option<ComponentSize>,
    autocomplete: Option<Autocomplete>,
    text_area: Option<TextareaConfig>,
    drop_down: Option<DropdownConfig>,
    phone: Option<PhoneConfig>,
    calendar: Option<CalendarConfig>,
    checkbox: Option<CheckboxConfig>,
}

impl RawField {
    fn into_descriptor(self) -> FormResult<FieldDescriptor> {
        let tag: KindTag = self.kind.parse()?;
        let cfg = self.input_config;
        let kind = match tag {
            KindTag::Text => FieldKind::Text,
            KindTag::Number => FieldKind::Number,
            KindTag::Password => FieldKind::Password,
            KindTag::Email => FieldKind::Email,
            KindTag::Textarea => FieldKind::Textarea(cfg.text_area.unwrap_or_default()),
            KindTag::Dropdown => FieldKind::Dropdown(cfg.drop_down.unwrap_or_default()),
            KindTag::Phone => {
                let mut phone = cfg.phone.unwrap_or_default();
                // The country selector shares the dropdown height setting.
                if phone.dropdown_height.is_none() {
                    phone.dropdown_height = cfg.drop_down.and_then(|d| d.dropdown_height);
                }
                FieldKind::Phone(phone)
            }
            KindTag::Calendar => FieldKind::Calendar(cfg.calendar.unwrap_or_default()),
            KindTag::Checkbox => FieldKind::Checkbox(cfg.checkbox.unwrap_or_default()),
        };

        let mut field = FieldDescriptor::new(self.name, kind);
        if let Some(label) = self.label {
            field.label = label;
        }
        field.required = self.required.into();
        field.size = cfg.size;
        field.autocomplete = cfg.autocomplete;
        Ok(field)
    }
}

/// Parses a JSON array of field objects into descriptors and checks them.
pub fn parse_schema(json: &str) -> FormResult<Vec<FieldDescriptor>> {
    let raw: Vec<RawField> = serde_json::from_str(json)?;
    let fields = raw
        .into_iter()
        .map(RawField::into_descriptor)
        .collect::<FormResult<Vec<_>>>()?;
    check_schema(&fields, CountryDataset::builtin())?;
    Ok(fields)
}

/// Checks that a form can be mounted from `fields`.
///
/// Returns the first problem found:
/// - an empty or duplicate field name,
/// - a dropdown or checkbox group without options,
/// - a phone allow-list that matches no country in `countries`,
/// - an explicitly empty calendar year list.
pub fn check_schema(fields: &[FieldDescriptor], countries: &CountryDataset) -> FormResult<()> {
    let mut seen = HashSet::new();
    for field in fields {
        if field.name.is_empty() {
            return Err(FormError::ConfigurationError(
                "field name must not be empty".to_string(),
            ));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(FormError::DuplicateField(field.name.clone()));
        }
        check_kind_config(field, countries)?;
    }
    Ok(())
}

fn check_kind_config(field: &FieldDescriptor, countries: &CountryDataset) -> FormResult<()> {
    let problem = match &field.kind {
        FieldKind::Dropdown(cfg) if cfg.selection.is_empty() => Some("dropdown has no options"),
        FieldKind::Checkbox(cfg) if cfg.selection.is_empty() => {
            Some("checkbox group has no options")
        }
        FieldKind::Phone(cfg) => cfg
            .country_allow_list
            .as_deref()
            .filter(|allow| countries.filtered(Some(*allow)).is_empty())
            .map(|_| "country allow-list matches no country"),
        FieldKind::Calendar(cfg) => cfg
            .years_to_select
            .as_ref()
            .filter(|years| years.is_empty())
            .map(|_| "years_to_select is empty"),
        _ => None,
    };
    match problem {
        Some(detail) => Err(FormError::missing_config(&field.name, detail)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::SelectOption;

    #[test]
    fn test_parse_full_document() {
        let json = r#"[
            {"name": "first_name", "label": "First name", "type": "text", "required": true,
             "inputConfig": {"size": "lg", "autocomplete": "given-name"}},
            {"name": "bio", "label": "Bio", "type": "textarea",
             "inputConfig": {"textArea": {"rows": 4, "max": 300}}},
            {"name": "phone", "label": "Phone", "type": "phone", "required": "Phone please",
             "inputConfig": {"phone": {"countryWhiteList": ["germany"]},
                             "dropDown": {"dropdownHeight": "12rem"}}},
            {"name": "date", "label": "Date", "type": "calendar",
             "inputConfig": {"calendar": {"yearsToSelect": [2024, 2025]}}},
            {"name": "langs", "label": "Languages", "type": "checkbox",
             "inputConfig": {"checkbox": {"selection": [{"label": "Rust", "value": "rust"}]}}}
        ]"#;
        let fields = parse_schema(json).unwrap();
        assert_eq!(fields.len(), 5);

        assert_eq!(fields[0].required, Required::Yes);
        assert_eq!(fields[0].size, Some(ComponentSize::Lg));
        assert_eq!(fields[0].autocomplete, Some(Autocomplete::GivenName));

        assert_eq!(
            fields[1].kind,
            FieldKind::Textarea(TextareaConfig {
                rows: Some(4),
                max: Some(300)
            })
        );

        let FieldKind::Phone(phone) = &fields[2].kind else {
            panic!("expected phone");
        };
        assert_eq!(phone.country_allow_list, Some(vec!["germany".to_string()]));
        assert_eq!(phone.dropdown_height.as_deref(), Some("12rem"));
        assert_eq!(fields[2].required, Required::Message("Phone please".into()));

        assert_eq!(
            fields[4].kind,
            FieldKind::checkbox(vec![SelectOption::new("Rust", "rust")])
        );
    }

    #[test]
    fn test_foreign_sub_configs_are_ignored() {
        let json = r#"[{"name": "n", "type": "number",
            "inputConfig": {"textArea": {"rows": 2}, "calendar": {"yearsToSelect": []}}}]"#;
        let fields = parse_schema(json).unwrap();
        assert_eq!(fields[0].kind, FieldKind::Number);
        assert_eq!(fields[0].label, "n");
    }

    #[test]
    fn test_empty_required_message_is_optional() {
        let fields = parse_schema(r#"[{"name": "n", "type": "text", "required": ""}]"#).unwrap();
        assert_eq!(fields[0].required, Required::No);
    }

    #[test]
    fn test_unknown_kind() {
        let err = parse_schema(r#"[{"name": "n", "type": "slider"}]"#).unwrap_err();
        assert!(matches!(err, FormError::UnknownFieldKind(k) if k == "slider"));
    }

    #[test]
    fn test_dropdown_without_config_fails() {
        let err = parse_schema(r#"[{"name": "d", "type": "dropdown"}]"#).unwrap_err();
        assert!(matches!(err, FormError::MissingConfig { ref field, .. } if field == "d"));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_schema("[{").unwrap_err();
        assert!(matches!(err, FormError::SerializationError(_)));
    }

    #[test]
    fn test_check_duplicates() {
        let fields = vec![
            FieldDescriptor::new("a", FieldKind::Text),
            FieldDescriptor::new("a", FieldKind::Email),
        ];
        let err = check_schema(&fields, CountryDataset::builtin()).unwrap_err();
        assert!(matches!(err, FormError::DuplicateField(n) if n == "a"));
    }

    #[test]
    fn test_check_phone_allow_list() {
        let ok = FieldDescriptor::new(
            "p",
            FieldKind::Phone(PhoneConfig {
                country_allow_list: Some(vec!["GERMANY".into()]),
                dropdown_height: None,
            }),
        );
        assert!(check_schema(&[ok], CountryDataset::builtin()).is_ok());

        let bad = FieldDescriptor::new(
            "p",
            FieldKind::Phone(PhoneConfig {
                country_allow_list: Some(vec!["atlantis".into()]),
                dropdown_height: None,
            }),
        );
        assert!(check_schema(&[bad], CountryDataset::builtin()).is_err());
    }

    #[test]
    fn test_check_empty_name() {
        let err = check_schema(
            &[FieldDescriptor::new("", FieldKind::Text)],
            CountryDataset::builtin(),
        )
        .unwrap_err();
        assert!(err.is_configuration());
    }
}
