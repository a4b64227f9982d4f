//! The form controller.
//!
//! [`FormController`] composes the value store, the validation orchestrator
//! and one widget per field. It is the only thing that writes the value
//! store: widget events come in through [`FormController::dispatch`],
//! direct writes through [`FormController::set_value`], and both end in the
//! same write path.
//!
//! Every changed write is followed, before any observer is notified, by the
//! field's revalidation whenever the field is being validated at all (the
//! write asked for it, the form validates on change, the form was already
//! submitted, or the field already shows a validation outcome).
//!
//! ## Examples
//!
//! ```
//! use formwright_forms::fields::{FieldDescriptor, FieldKind};
//! use formwright_forms::form::{FormController, SetOptions, SubmitOutcome};
//!
//! let fields = vec![FieldDescriptor::new("email", FieldKind::Email).required(true)];
//! let mut form = FormController::mount(fields, |values| {
//!     println!("submitted {values:?}");
//!     Ok(())
//! })
//! .unwrap();
//!
//! assert!(matches!(form.submit(), SubmitOutcome::Rejected { .. }));
//! form.set_value("email", "ada@example.com", SetOptions::default()).unwrap();
//! assert!(form.submit().is_submitted());
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use formwright_core::logging::form_span;
use formwright_core::settings::{self, ValidationMode};
use formwright_core::{FormError, FormResult, Settings};
use formwright_signals::Signal;

use crate::animation::SharedAnimation;
use crate::bound_field::BoundField;
use crate::countries::CountryDataset;
use crate::fields::FieldDescriptor;
use crate::schema::check_schema;
use crate::store::ValueStore;
use crate::validation::{validate_all, validate_field, ValidationResult};
use crate::value::{Value, ValueRecord};
use crate::widgets::{create_widget, InputWidget, ValueIntent, WidgetContext, WidgetEvent, WidgetView};

/// The caller's submit handler. An `Err` becomes the form-level error message.
pub type SubmitHandler = Box<dyn FnMut(&ValueRecord) -> Result<(), String> + Send>;

/// Options for [`FormController::mount_with`].
#[derive(Debug, Clone, Default)]
pub struct MountOptions {
    /// Settings for this form; the global settings when `None`.
    pub settings: Option<Settings>,
    /// The calendar's "today"; the local date when `None`.
    pub today: Option<NaiveDate>,
    /// Initial field values. They do not make fields dirty.
    ///
    /// Phone fields cannot take one: the widget has no way to split a
    /// composite number back into country and digits, so it logs a warning
    /// and starts from `""`.
    pub initial: ValueRecord,
    /// Country list for phone fields; the built-in dataset when `None`.
    pub countries: Option<CountryDataset>,
    /// Identifier used in log spans.
    pub form_id: Option<String>,
}

/// Options for [`FormController::set_value`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Revalidate the field right after the write.
    pub validate_immediately: bool,
}

impl SetOptions {
    /// Options that revalidate immediately.
    pub const fn validated() -> Self {
        Self {
            validate_immediately: true,
        }
    }
}

/// What happened on [`FormController::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Every field was valid and the handler accepted the values.
    Submitted {
        /// The record handed to the handler.
        values: ValueRecord,
    },
    /// At least one field failed validation; the handler was not called.
    Rejected {
        /// Error message per failing field.
        errors: BTreeMap<String, String>,
    },
    /// The handler was called and returned an error.
    HandlerFailed {
        /// The handler's message, now also the form-level error message.
        message: String,
    },
}

impl SubmitOutcome {
    /// Returns `true` for [`SubmitOutcome::Submitted`].
    pub const fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted { .. })
    }

    /// Whether the host should suppress its default submit side effects
    /// (page navigation). Always `true`: submission is the handler's job.
    pub const fn prevent_default(&self) -> bool {
        true
    }
}

/// A mounted form.
pub struct FormController {
    fields: Vec<FieldDescriptor>,
    widgets: BTreeMap<String, Box<dyn InputWidget>>,
    store: ValueStore,
    validation: ValidationResult,
    settings: Settings,
    today: NaiveDate,
    countries: CountryDataset,
    initial: ValueRecord,
    handler: SubmitHandler,
    values_changed: Signal<ValueRecord>,
    error_message_changed: Signal<Option<String>>,
    error_message: Option<String>,
    snapshot: serde_json::Value,
    submit_count: usize,
    span: tracing::Span,
}

impl fmt::Debug for FormController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("fields", &self.fields.iter().map(|fd| &fd.name).collect::<Vec<_>>())
            .field("values", self.store.watch_all())
            .field("validation", &self.validation)
            .field("error_message", &self.error_message)
            .field("submit_count", &self.submit_count)
            .finish_non_exhaustive()
    }
}

impl FormController {
    /// Mounts a form with default options.
    pub fn mount<F>(fields: Vec<FieldDescriptor>, handler: F) -> FormResult<Self>
    where
        F: FnMut(&ValueRecord) -> Result<(), String> + Send + 'static,
    {
        Self::mount_with(fields, handler, MountOptions::default())
    }

    /// Mounts a form.
    ///
    /// Fails fast with a configuration error if any field cannot be
    /// rendered; nothing is partially mounted.
    pub fn mount_with<F>(
        fields: Vec<FieldDescriptor>,
        handler: F,
        options: MountOptions,
    ) -> FormResult<Self>
    where
        F: FnMut(&ValueRecord) -> Result<(), String> + Send + 'static,
    {
        let settings = options.settings.unwrap_or_else(settings::current);
        let countries = options
            .countries
            .unwrap_or_else(|| CountryDataset::builtin().clone());
        let span = form_span(options.form_id.as_deref().unwrap_or("form"));
        let _guard = span.enter();

        check_schema(&fields, &countries)?;
        for name in options.initial.keys() {
            if !fields.iter().any(|f| &f.name == name) {
                tracing::warn!(field = %name, "initial value for unknown field ignored");
            }
        }

        let mut form = Self {
            fields: Vec::new(),
            widgets: BTreeMap::new(),
            store: ValueStore::new(),
            validation: ValidationResult::new(),
            settings,
            today: options.today.unwrap_or_else(|| chrono::Local::now().date_naive()),
            countries,
            initial: options.initial,
            handler: Box::new(handler),
            values_changed: Signal::new(),
            error_message_changed: Signal::new(),
            error_message: None,
            snapshot: serde_json::Value::Null,
            submit_count: 0,
            span: span.clone(),
        };
        // Mount-time intents are checked against the field list.
        form.fields = fields.clone();
        for field in &fields {
            form.mount_field(field, false)?;
        }
        form.snapshot = serde_json::to_value(form.store.watch_all())?;
        tracing::debug!(fields = form.fields.len(), "form mounted");
        Ok(form)
    }

    /// Creates the widget for `field` and applies its mount-time writes.
    ///
    /// A `kept` field was already mounted under an earlier schema: its
    /// stored value stays, and while it is dirty the widget's mount-time
    /// writes are dropped.
    fn mount_field(&mut self, field: &FieldDescriptor, kept: bool) -> FormResult<()> {
        if !kept {
            if let Some(value) = self.initial.get(&field.name) {
                self.store.initialize(&field.name, value.clone());
            }
        }
        let ctx = WidgetContext {
            settings: &self.settings,
            today: self.today,
            countries: &self.countries,
        };
        let mut widget = create_widget(field, &ctx)?;
        let intents = widget.on_mount(self.store.get_or_null(&field.name));
        self.widgets.insert(field.name.clone(), widget);
        let preserve = kept && self.store.is_dirty(&field.name);
        for intent in intents {
            if preserve && intent.initial {
                tracing::debug!(field = %field.name, "mount-time write skipped, field is dirty");
                continue;
            }
            self.apply(intent)?;
        }
        Ok(())
    }

    // ── Write path ───────────────────────────────────────────────────

    /// Writes a value directly, bypassing the field's widget.
    pub fn set_value(
        &mut self,
        name: &str,
        value: impl Into<Value>,
        options: SetOptions,
    ) -> FormResult<()> {
        let span = self.span.clone();
        let _guard = span.enter();
        self.write(name, value.into(), options.validate_immediately)?;
        Ok(())
    }

    /// Routes a UI event to the field's widget and applies the resulting writes.
    pub fn dispatch(&mut self, name: &str, event: WidgetEvent) -> FormResult<()> {
        let span = self.span.clone();
        let _guard = span.enter();
        let widget = self
            .widgets
            .get_mut(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        tracing::debug!(field = name, event = %event, "widget event");
        let intents = widget.handle(event, self.store.get_or_null(name))?;
        for intent in intents {
            self.apply(intent)?;
        }
        Ok(())
    }

    fn apply(&mut self, intent: ValueIntent) -> FormResult<()> {
        if intent.initial {
            self.require_field(&intent.field)?;
            self.store.initialize(&intent.field, intent.value);
            return Ok(());
        }
        self.write(&intent.field, intent.value, intent.validate)?;
        Ok(())
    }

    /// The single write path. Returns whether the value changed.
    fn write(&mut self, name: &str, value: Value, validate_immediately: bool) -> FormResult<bool> {
        let index = self.require_field(name)?;
        if !self.store.set(name, value) {
            return Ok(false);
        }
        let revalidate = validate_immediately
            || self.settings.validation_mode == ValidationMode::OnChange
            || self.submit_count > 0
            || self.validation.contains(name);
        if revalidate {
            let outcome = validate_field(&self.fields[index], self.store.get_or_null(name), &self.settings);
            tracing::debug!(field = name, valid = outcome.is_none(), "field revalidated");
            self.validation.insert(name, outcome);
        }
        self.notify_if_changed()?;
        Ok(true)
    }

    fn require_field(&self, name: &str) -> FormResult<usize> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    /// Fires "values changed" if the record differs structurally from the
    /// last one observers saw. A values change clears the form-level error.
    fn notify_if_changed(&mut self) -> FormResult<()> {
        let snapshot = serde_json::to_value(self.store.watch_all())?;
        if snapshot == self.snapshot {
            return Ok(());
        }
        self.snapshot = snapshot;
        self.set_error_message(None);
        self.values_changed.send(self.store.watch_all());
        Ok(())
    }

    // ── Schema ───────────────────────────────────────────────────────

    /// Replaces the field list.
    ///
    /// Fields that left the schema are dropped with their values; new
    /// fields, and fields whose kind changed, get a fresh widget. Fields
    /// that stay keep their values. If any field is dirty, the whole form
    /// is revalidated.
    pub fn update_schema(&mut self, fields: Vec<FieldDescriptor>) -> FormResult<()> {
        let span = self.span.clone();
        let _guard = span.enter();
        check_schema(&fields, &self.countries)?;

        let old = std::mem::take(&mut self.fields);
        for gone in old.iter().filter(|o| !fields.iter().any(|f| f.name == o.name)) {
            self.widgets.remove(&gone.name);
            self.store.remove(&gone.name);
            self.validation.remove(&gone.name);
        }
        // Mount-time intents address the new field list.
        self.fields = fields.clone();
        for field in &fields {
            match old.iter().find(|o| o.name == field.name) {
                Some(previous) if previous.kind == field.kind => {}
                Some(_) => self.mount_field(field, true)?,
                None => self.mount_field(field, false)?,
            }
        }

        let dirty = self.store.dirty_fields().len();
        if dirty > 0 {
            self.validation = validate_all(&self.fields, self.store.watch_all(), &self.settings);
            tracing::debug!(
                dirty,
                valid = self.validation.is_valid(),
                "schema changed, form revalidated"
            );
        }
        self.notify_if_changed()
    }

    // ── Submission ───────────────────────────────────────────────────

    /// Validates every field and, if all pass, hands the values to the
    /// submit handler.
    pub fn submit(&mut self) -> SubmitOutcome {
        let span = self.span.clone();
        let _guard = span.enter();
        self.submit_count += 1;
        self.validation = validate_all(&self.fields, self.store.watch_all(), &self.settings);

        if !self.validation.is_valid() {
            let errors: BTreeMap<String, String> = self
                .validation
                .errors()
                .map(|(name, e)| (name.to_string(), e.message.clone()))
                .collect();
            tracing::info!(errors = errors.len(), "submit rejected");
            return SubmitOutcome::Rejected { errors };
        }

        let values = self.store.watch_all().clone();
        match (self.handler)(&values) {
            Ok(()) => {
                tracing::info!(fields = values.len(), "form submitted");
                SubmitOutcome::Submitted { values }
            }
            Err(message) => {
                tracing::info!(%message, "submit handler failed");
                self.set_error_message(Some(message.clone()));
                SubmitOutcome::HandlerFailed { message }
            }
        }
    }

    /// Number of submit attempts since mount or the last reset.
    pub const fn submit_count(&self) -> usize {
        self.submit_count
    }

    /// Restores initial values, clears validation and the form-level error,
    /// and resets every widget's interaction state.
    pub fn reset(&mut self) -> FormResult<()> {
        let span = self.span.clone();
        let _guard = span.enter();
        self.store.reset();
        self.validation.clear();
        self.submit_count = 0;
        self.widgets.clear();
        self.set_error_message(None);
        let fields = self.fields.clone();
        for field in &fields {
            self.mount_field(field, false)?;
        }
        tracing::debug!("form reset");
        self.notify_if_changed()
    }

    // ── Form-level error message ─────────────────────────────────────

    /// Sets the form-level error message, notifying observers on change.
    pub fn set_error_message(&mut self, message: Option<String>) {
        if self.error_message == message {
            return;
        }
        self.error_message = message;
        self.error_message_changed.send(&self.error_message);
    }

    /// The form-level error message.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    // ── Observers ────────────────────────────────────────────────────

    /// Fired with the full record whenever it changes structurally.
    pub const fn values_changed(&self) -> &Signal<ValueRecord> {
        &self.values_changed
    }

    /// Fired whenever the form-level error message changes.
    pub const fn error_message_changed(&self) -> &Signal<Option<String>> {
        &self.error_message_changed
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The current value of `name`.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.store.get(name)
    }

    /// The live value record.
    pub const fn values(&self) -> &ValueRecord {
        self.store.watch_all()
    }

    /// The current validation result.
    pub const fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    /// The current error message of `name`, if any.
    pub fn error(&self, name: &str) -> Option<&str> {
        self.validation.message(name)
    }

    /// Whether `name` differs from its initial value.
    pub fn is_dirty(&self, name: &str) -> bool {
        self.store.is_dirty(name)
    }

    /// The field descriptors, in schema order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// The settings this form runs with.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The widget state of one field.
    pub fn widget_view(&self, name: &str) -> FormResult<WidgetView> {
        let widget = self
            .widgets
            .get(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        Ok(widget.view(self.store.get_or_null(name)))
    }

    /// One bound field per descriptor, in schema order.
    pub fn render(&self) -> Vec<BoundField> {
        self.fields
            .iter()
            .filter_map(|field| {
                let widget = self.widgets.get(&field.name)?;
                let value = self.store.get_or_null(&field.name);
                Some(BoundField::new(
                    field,
                    self.settings.component_size,
                    value.clone(),
                    self.validation.message(&field.name).map(str::to_string),
                    self.store.is_dirty(&field.name),
                    widget.view(value),
                ))
            })
            .collect()
    }

    /// Gives a checkbox option of `field` an animation handle.
    pub fn attach_animation(
        &mut self,
        field: &str,
        option_index: usize,
        handle: SharedAnimation,
    ) -> FormResult<()> {
        self.widgets
            .get_mut(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?
            .attach_animation(option_index, handle)
    }
}
