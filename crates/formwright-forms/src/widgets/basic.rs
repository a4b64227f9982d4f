//! Single-line inputs: text, number, password and email.

use formwright_core::FormResult;

use super::{unsupported, InputWidget, ValueIntent, WidgetEvent, WidgetView};
use crate::fields::KindTag;
use crate::value::Value;

/// Renderable state of a single-line input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicView {
    /// The HTML-style input type (`text`, `number`, `password`, `email`).
    pub input_type: &'static str,
    /// The text currently shown.
    pub text: String,
    /// Whether the input holds any content.
    pub filled: bool,
}

/// A single-line input.
#[derive(Debug, Clone)]
pub struct BasicInput {
    name: String,
    kind: KindTag,
}

impl BasicInput {
    /// Creates an input for `name`. `kind` must be one of the single-line kinds.
    pub fn new(name: &str, kind: KindTag) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }

    fn parse(&self, text: String) -> Value {
        if self.kind != KindTag::Number {
            return Value::String(text);
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Value::Null
        } else if let Ok(i) = trimmed.parse::<i64>() {
            Value::Int(i)
        } else if let Ok(f) = trimmed.parse::<f64>() {
            Value::Float(f)
        } else {
            // Kept as typed so validation can report it.
            Value::String(text)
        }
    }
}

impl InputWidget for BasicInput {
    fn kind(&self) -> KindTag {
        self.kind
    }

    fn handle(&mut self, event: WidgetEvent, _current: &Value) -> FormResult<Vec<ValueIntent>> {
        match event {
            WidgetEvent::Input(text) => Ok(vec![ValueIntent::set(&self.name, self.parse(text))]),
            WidgetEvent::Blur | WidgetEvent::Activate | WidgetEvent::KeyEnter => Ok(Vec::new()),
            other => Err(unsupported(&self.name, &other)),
        }
    }

    fn view(&self, current: &Value) -> WidgetView {
        WidgetView::Basic(BasicView {
            input_type: self.kind.as_str(),
            text: current.to_string(),
            filled: !current.is_empty(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(widget: &mut BasicInput, text: &str) -> Value {
        let intents = widget.handle(WidgetEvent::Input(text.into()), &Value::Null).unwrap();
        assert_eq!(intents.len(), 1);
        assert!(!intents[0].validate);
        intents[0].value.clone()
    }

    #[test]
    fn test_text_input_keeps_string() {
        let mut w = BasicInput::new("name", KindTag::Text);
        assert_eq!(write(&mut w, " Ada "), Value::from(" Ada "));
        assert_eq!(write(&mut w, ""), Value::from(""));
    }

    #[test]
    fn test_number_input_parses() {
        let mut w = BasicInput::new("age", KindTag::Number);
        assert_eq!(write(&mut w, "42"), Value::Int(42));
        assert_eq!(write(&mut w, "4.5"), Value::Float(4.5));
        assert_eq!(write(&mut w, "  "), Value::Null);
        assert_eq!(write(&mut w, "4x"), Value::from("4x"));
    }

    #[test]
    fn test_view() {
        let w = BasicInput::new("pw", KindTag::Password);
        let WidgetView::Basic(view) = w.view(&Value::from("secret")) else {
            panic!("expected basic view");
        };
        assert_eq!(view.input_type, "password");
        assert_eq!(view.text, "secret");
        assert!(view.filled);
    }

    #[test]
    fn test_unsupported_event() {
        let mut w = BasicInput::new("name", KindTag::Text);
        let err = w.handle(WidgetEvent::NextMonth, &Value::Null).unwrap_err();
        assert!(err.to_string().contains("next_month"));
    }
}
