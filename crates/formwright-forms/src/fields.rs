//! Field descriptors: the declarative schema of one form field.
//!
//! A [`FieldDescriptor`] names a field, labels it, says whether it is
//! required, carries an optional custom validator, and selects an input
//! kind. Each [`FieldKind`] variant carries only the configuration that
//! kind understands, so a textarea can never be handed a country list.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use formwright_core::{ComponentSize, FormError};

use crate::value::Value;

/// Whether a field must have a value, and what to say when it doesn't.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Required {
    /// The field may stay empty.
    #[default]
    No,
    /// The field must have a value; the generic required message is used.
    Yes,
    /// The field must have a value; this message is used.
    Message(String),
}

impl Required {
    /// Returns `true` unless this is [`Required::No`].
    pub const fn is_required(&self) -> bool {
        !matches!(self, Self::No)
    }

    /// The message to show, falling back to `default` for [`Required::Yes`].
    pub fn message<'a>(&'a self, default: &'a str) -> Option<&'a str> {
        match self {
            Self::No => None,
            Self::Yes => Some(default),
            Self::Message(msg) => Some(msg),
        }
    }
}

impl From<bool> for Required {
    fn from(required: bool) -> Self {
        if required {
            Self::Yes
        } else {
            Self::No
        }
    }
}

impl From<&str> for Required {
    fn from(msg: &str) -> Self {
        Self::Message(msg.to_string())
    }
}

impl From<String> for Required {
    fn from(msg: String) -> Self {
        Self::Message(msg)
    }
}

/// The outcome of a custom validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validity {
    /// The value is acceptable.
    Valid,
    /// The value is rejected with this message.
    Invalid(String),
}

impl Validity {
    /// Shorthand for [`Validity::Invalid`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

impl From<Result<(), String>> for Validity {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::Valid,
            Err(msg) => Self::Invalid(msg),
        }
    }
}

/// A custom validator. Must be total: it returns a [`Validity`] for every
/// value, including `Null`. A panic inside it is a bug in the validator and
/// propagates to the caller.
pub type ValidateFn = Arc<dyn Fn(&Value) -> Validity + Send + Sync>;

/// One selectable option of a dropdown or checkbox group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    /// Text shown for the option.
    pub label: String,
    /// Value written to the store when the option is chosen.
    #[serde(default)]
    pub value: Value,
    /// Replaces the label in the open option list.
    #[serde(default, alias = "option")]
    pub display_override: Option<String>,
    /// Replaces the label in the closed placeholder slot.
    #[serde(default, alias = "placeholderOption")]
    pub placeholder_display_override: Option<String>,
}

impl SelectOption {
    /// Creates an option without display overrides.
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            display_override: None,
            placeholder_display_override: None,
        }
    }

    /// Sets the display used in the open option list.
    #[must_use]
    pub fn display(mut self, display: impl Into<String>) -> Self {
        self.display_override = Some(display.into());
        self
    }

    /// Sets the display used in the closed placeholder slot.
    #[must_use]
    pub fn placeholder_display(mut self, display: impl Into<String>) -> Self {
        self.placeholder_display_override = Some(display.into());
        self
    }

    /// What the open option list shows for this option.
    pub fn list_display(&self) -> &str {
        self.display_override.as_deref().unwrap_or(&self.label)
    }

    /// What the closed placeholder slot shows when this option is selected.
    pub fn selected_display(&self) -> &str {
        self.placeholder_display_override
            .as_deref()
            .or(self.display_override.as_deref())
            .unwrap_or(&self.label)
    }
}

/// Textarea options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextareaConfig {
    /// Visible rows.
    pub rows: Option<u32>,
    /// Character cap; longer input is truncated.
    pub max: Option<usize>,
}

/// Dropdown options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DropdownConfig {
    /// The options, in display order. Must not be empty.
    pub selection: Vec<SelectOption>,
    /// Text shown while nothing is selected. Without one, the first option
    /// is selected on mount.
    pub placeholder: Option<String>,
    /// Height of the open list, passed through to the presentation layer.
    pub dropdown_height: Option<String>,
}

impl DropdownConfig {
    /// Creates a dropdown config from its options.
    pub fn new(selection: Vec<SelectOption>) -> Self {
        Self {
            selection,
            ..Self::default()
        }
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Sets the open list height.
    #[must_use]
    pub fn dropdown_height(mut self, height: impl Into<String>) -> Self {
        self.dropdown_height = Some(height.into());
        self
    }
}

/// Phone number options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhoneConfig {
    /// Country names offered in the selector (case-insensitive). `None`
    /// offers every country in the dataset.
    #[serde(alias = "countryWhiteList")]
    pub country_allow_list: Option<Vec<String>>,
    /// Height of the open country list.
    pub dropdown_height: Option<String>,
}

/// Calendar options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarConfig {
    /// Years offered by the year picker, in display order.
    pub years_to_select: Option<Vec<i32>>,
}

/// Checkbox group options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckboxConfig {
    /// One toggle per option. Must not be empty.
    pub selection: Vec<SelectOption>,
}

/// The input kind of a field, with that kind's configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// Numeric text input.
    Number,
    /// Masked text input.
    Password,
    /// Email address input.
    Email,
    /// Multi-line text.
    Textarea(TextareaConfig),
    /// Single choice from a list.
    Dropdown(DropdownConfig),
    /// Country selector fused with a local number.
    Phone(PhoneConfig),
    /// Date picker.
    Calendar(CalendarConfig),
    /// Multiple choice, one toggle per option.
    Checkbox(CheckboxConfig),
}

impl FieldKind {
    /// The tag naming this kind in a schema document.
    pub const fn tag(&self) -> KindTag {
        match self {
            Self::Text => KindTag::Text,
            Self::Number => KindTag::Number,
            Self::Password => KindTag::Password,
            Self::Email => KindTag::Email,
            Self::Textarea(_) => KindTag::Textarea,
            Self::Dropdown(_) => KindTag::Dropdown,
            Self::Phone(_) => KindTag::Phone,
            Self::Calendar(_) => KindTag::Calendar,
            Self::Checkbox(_) => KindTag::Checkbox,
        }
    }

    /// A dropdown over `selection`.
    pub fn dropdown(selection: Vec<SelectOption>) -> Self {
        Self::Dropdown(DropdownConfig::new(selection))
    }

    /// A checkbox group over `selection`.
    pub fn checkbox(selection: Vec<SelectOption>) -> Self {
        Self::Checkbox(CheckboxConfig { selection })
    }

    /// A phone field offering every country.
    pub fn phone() -> Self {
        Self::Phone(PhoneConfig::default())
    }

    /// A calendar with the default year window.
    pub fn calendar() -> Self {
        Self::Calendar(CalendarConfig::default())
    }

    /// A textarea with default rows and no cap.
    pub fn textarea() -> Self {
        Self::Textarea(TextareaConfig::default())
    }
}

/// The bare name of a field kind, as written in schema documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindTag {
    Text,
    Number,
    Password,
    Email,
    Textarea,
    Dropdown,
    Phone,
    Calendar,
    Checkbox,
}

impl KindTag {
    /// The schema spelling of this tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Password => "password",
            Self::Email => "email",
            Self::Textarea => "textarea",
            Self::Dropdown => "dropdown",
            Self::Phone => "phone",
            Self::Calendar => "calendar",
            Self::Checkbox => "checkbox",
        }
    }
}

impl fmt::Display for KindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KindTag {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "number" => Ok(Self::Number),
            "password" => Ok(Self::Password),
            "email" => Ok(Self::Email),
            "textarea" => Ok(Self::Textarea),
            "dropdown" => Ok(Self::Dropdown),
            "phone" => Ok(Self::Phone),
            "calendar" => Ok(Self::Calendar),
            "checkbox" => Ok(Self::Checkbox),
            other => Err(FormError::UnknownFieldKind(other.to_string())),
        }
    }
}

/// Browser autofill hints passed through to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Autocomplete {
    Name,
    GivenName,
    FamilyName,
    Email,
    Tel,
    AddressLine1,
    AddressLine2,
    AddressLevel2,
    AddressLevel1,
    PostalCode,
    CountryName,
    NewPassword,
    CurrentPassword,
    Organization,
}

/// Complete description of one form field.
///
/// # Examples
///
/// ```
/// use formwright_forms::fields::{FieldDescriptor, FieldKind, Validity};
///
/// let field = FieldDescriptor::new("first_name", FieldKind::Text)
///     .required_message("Please tell us your name.")
///     .validate(|v| match v.as_str() {
///         Some(s) if s.len() > 40 => Validity::invalid("Too long."),
///         _ => Validity::Valid,
///     });
///
/// assert_eq!(field.label, "first name");
/// assert!(field.required.is_required());
/// ```
#[derive(Clone)]
pub struct FieldDescriptor {
    /// Key into the value record; unique within a schema.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    /// The input kind and its configuration.
    pub kind: FieldKind,
    /// Whether a value is required.
    pub required: Required,
    /// Custom validator run after the required check.
    pub validate: Option<ValidateFn>,
    /// Size token override for this field.
    pub size: Option<ComponentSize>,
    /// Autofill hint.
    pub autocomplete: Option<Autocomplete>,
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("validate", &self.validate.as_ref().map(|_| "<fn>"))
            .field("size", &self.size)
            .field("autocomplete", &self.autocomplete)
            .finish()
    }
}

impl FieldDescriptor {
    /// Creates a new optional field whose label is derived from its name.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        let label = name.replace('_', " ");
        Self {
            name,
            label,
            kind,
            required: Required::No,
            validate: None,
            size: None,
            autocomplete: None,
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets whether this field is required (generic message).
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = Required::from(required);
        self
    }

    /// Makes this field required with a custom message.
    #[must_use]
    pub fn required_message(mut self, msg: impl Into<String>) -> Self {
        self.required = Required::Message(msg.into());
        self
    }

    /// Sets the custom validator.
    #[must_use]
    pub fn validate<F>(mut self, validator: F) -> Self
    where
        F: Fn(&Value) -> Validity + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(validator));
        self
    }

    /// Sets the size token.
    #[must_use]
    pub const fn size(mut self, size: ComponentSize) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the autofill hint.
    #[must_use]
    pub const fn autocomplete(mut self, hint: Autocomplete) -> Self {
        self.autocomplete = Some(hint);
        self
    }

    /// The kind tag of this field.
    pub const fn kind_tag(&self) -> KindTag {
        self.kind.tag()
    }
}
