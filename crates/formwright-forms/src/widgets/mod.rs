//! Input widgets.
//!
//! A widget turns one field descriptor plus the field's current value into
//! interaction state and a renderable [`WidgetView`]. Widgets own only their
//! transient UI state (open/closed, month cursor, typed digits). They never
//! hold the field's value: a widget that wants to change it returns
//! [`ValueIntent`]s, and the form controller applies them through the value
//! store's single write path.
//!
//! [`create_widget`] dispatches on [`FieldKind`] exhaustively.

pub mod basic;
pub mod calendar;
pub mod checkbox;
pub mod dropdown;
pub mod phone;
pub mod textarea;

use std::fmt;

use chrono::NaiveDate;

use formwright_core::{FormError, FormResult, Settings};

use crate::animation::SharedAnimation;
use crate::countries::CountryDataset;
use crate::fields::{FieldDescriptor, FieldKind, KindTag};
use crate::value::Value;

pub use basic::{BasicInput, BasicView};
pub use calendar::{CalendarDay, CalendarInput, CalendarView};
pub use checkbox::{CheckboxGroup, CheckboxOptionView, CheckboxView};
pub use dropdown::{Dropdown, DropdownOptionView, DropdownView};
pub use phone::{PhoneInput, PhoneView};
pub use textarea::{TextareaInput, TextareaView};

/// A request from a widget to write a field value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueIntent {
    /// The field to write.
    pub field: String,
    /// The new value.
    pub value: Value,
    /// Revalidate the field right after the write.
    pub validate: bool,
    /// Record the value as the field's initial value (not dirty).
    pub initial: bool,
}

impl ValueIntent {
    /// A plain user write.
    pub fn set(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            validate: false,
            initial: false,
        }
    }

    /// A user write that revalidates immediately.
    pub fn validated(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            validate: true,
            ..Self::set(field, value)
        }
    }

    /// A mount-time write that does not make the field dirty.
    pub fn initial(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            initial: true,
            ..Self::set(field, value)
        }
    }
}

/// A UI event addressed to one field's widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// Text typed into a text-like input (replaces the whole text).
    Input(String),
    /// Click on the widget's trigger area.
    Activate,
    /// Enter pressed while the widget has focus.
    KeyEnter,
    /// The widget lost focus.
    Blur,
    /// An option of a dropdown was chosen, by index.
    SelectOption(usize),
    /// The dropdown selection was cleared.
    ClearSelection,
    /// A checkbox option was toggled, by index.
    Toggle(usize),
    /// Pointer pressed somewhere in the document.
    PointerDown {
        /// Whether the press landed inside the widget's bounds.
        inside: bool,
    },
    /// Touch started somewhere in the document.
    TouchStart {
        /// Whether the touch landed inside the widget's bounds.
        inside: bool,
    },
    /// A day cell of the calendar grid was clicked.
    PickDay(NaiveDate),
    /// Calendar forward navigation.
    NextMonth,
    /// Calendar backward navigation.
    PrevMonth,
    /// The calendar month label was clicked.
    ToggleYearPicker,
    /// A year in the year picker was clicked.
    PickYear(i32),
    /// A country was chosen (by display name) or cleared.
    SelectCountry(Option<String>),
    /// The local digits of a phone field changed.
    Digits(String),
}

impl WidgetEvent {
    /// Short event name used in errors and logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Input(_) => "input",
            Self::Activate => "activate",
            Self::KeyEnter => "key_enter",
            Self::Blur => "blur",
            Self::SelectOption(_) => "select_option",
            Self::ClearSelection => "clear_selection",
            Self::Toggle(_) => "toggle",
            Self::PointerDown { .. } => "pointer_down",
            Self::TouchStart { .. } => "touch_start",
            Self::PickDay(_) => "pick_day",
            Self::NextMonth => "next_month",
            Self::PrevMonth => "prev_month",
            Self::ToggleYearPicker => "toggle_year_picker",
            Self::PickYear(_) => "pick_year",
            Self::SelectCountry(_) => "select_country",
            Self::Digits(_) => "digits",
        }
    }
}

impl fmt::Display for WidgetEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Renderable state of one widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetView {
    Basic(BasicView),
    Textarea(TextareaView),
    Dropdown(DropdownView),
    Checkbox(CheckboxView),
    Calendar(CalendarView),
    Phone(PhoneView),
}

/// Environment a widget is created in.
#[derive(Debug, Clone, Copy)]
pub struct WidgetContext<'a> {
    /// Engine settings (messages, calendar and textarea defaults).
    pub settings: &'a Settings,
    /// The date the calendar treats as today.
    pub today: NaiveDate,
    /// Countries offered by phone widgets.
    pub countries: &'a CountryDataset,
}

/// Behaviour shared by all input widgets.
///
/// All implementations must be `Send + Sync` so a mounted form can move
/// between threads.
pub trait InputWidget: Send + Sync + fmt::Debug {
    /// The field kind this widget serves.
    fn kind(&self) -> KindTag;

    /// Called once after the widget is created, with the field's current
    /// value. Returns writes the widget needs at mount time.
    fn on_mount(&mut self, _current: &Value) -> Vec<ValueIntent> {
        Vec::new()
    }

    /// Handles one UI event and returns the value writes it causes.
    fn handle(&mut self, event: WidgetEvent, current: &Value) -> FormResult<Vec<ValueIntent>>;

    /// Current renderable state.
    fn view(&self, current: &Value) -> WidgetView;

    /// Gives the widget an animation handle for the option at `index`.
    fn attach_animation(&mut self, _index: usize, _handle: SharedAnimation) -> FormResult<()> {
        Err(FormError::ConfigurationError(format!(
            "{} widgets do not take animation handles",
            self.kind()
        )))
    }
}

/// Builds the widget for `field`.
///
/// Fails with a configuration error when the field's kind configuration is
/// unusable (for example a dropdown without options).
pub fn create_widget(
    field: &FieldDescriptor,
    ctx: &WidgetContext<'_>,
) -> FormResult<Box<dyn InputWidget>> {
    let widget: Box<dyn InputWidget> = match &field.kind {
        FieldKind::Text | FieldKind::Number | FieldKind::Password | FieldKind::Email => {
            Box::new(BasicInput::new(&field.name, field.kind_tag()))
        }
        FieldKind::Textarea(config) => Box::new(TextareaInput::new(&field.name, config, ctx.settings)),
        FieldKind::Dropdown(config) => Box::new(Dropdown::new(&field.name, config)?),
        FieldKind::Checkbox(config) => Box::new(CheckboxGroup::new(&field.name, config)?),
        FieldKind::Calendar(config) => Box::new(CalendarInput::new(&field.name, config, ctx)?),
        FieldKind::Phone(config) => Box::new(PhoneInput::new(&field.name, config, ctx.countries)?),
    };
    Ok(widget)
}

pub(crate) fn unsupported(field: &str, event: &WidgetEvent) -> FormError {
    FormError::UnsupportedEvent {
        field: field.to_string(),
        event: event.name().to_string(),
    }
}
