//! Multi-line text input with an optional character cap.

use formwright_core::{FormResult, Settings};

use super::{unsupported, InputWidget, ValueIntent, WidgetEvent, WidgetView};
use crate::fields::{KindTag, TextareaConfig};
use crate::value::Value;

/// Renderable state of a textarea.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextareaView {
    pub text: String,
    pub rows: u32,
    /// `"{len}/{max}"`.
    pub counter: String,
    /// The counter is only shown when a cap is configured.
    pub show_counter: bool,
}

/// A multi-line text input.
#[derive(Debug, Clone)]
pub struct TextareaInput {
    name: String,
    rows: u32,
    max: Option<usize>,
    counter_max: usize,
}

impl TextareaInput {
    pub fn new(name: &str, config: &TextareaConfig, settings: &Settings) -> Self {
        Self {
            name: name.to_string(),
            rows: config.rows.unwrap_or(settings.textarea_rows),
            max: config.max,
            counter_max: config.max.unwrap_or(settings.textarea_max),
        }
    }

    fn truncate(&self, text: String) -> String {
        match self.max {
            Some(max) if text.chars().count() > max => text.chars().take(max).collect(),
            _ => text,
        }
    }
}

impl InputWidget for TextareaInput {
    fn kind(&self) -> KindTag {
        KindTag::Textarea
    }

    fn handle(&mut self, event: WidgetEvent, _current: &Value) -> FormResult<Vec<ValueIntent>> {
        match event {
            WidgetEvent::Input(text) => {
                let text = self.truncate(text);
                Ok(vec![ValueIntent::set(&self.name, text)])
            }
            WidgetEvent::Blur | WidgetEvent::Activate => Ok(Vec::new()),
            other => Err(unsupported(&self.name, &other)),
        }
    }

    fn view(&self, current: &Value) -> WidgetView {
        WidgetView::Textarea(TextareaView {
            text: current.to_string(),
            rows: self.rows,
            counter: format!("{}/{}", current.len(), self.counter_max),
            show_counter: self.max.is_some(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_to_max_chars() {
        let config = TextareaConfig {
            rows: None,
            max: Some(5),
        };
        let mut w = TextareaInput::new("bio", &config, &Settings::default());
        let intents = w.handle(WidgetEvent::Input("äöüßxyz".into()), &Value::Null).unwrap();
        assert_eq!(intents[0].value, Value::from("äöüßx"));
    }

    #[test]
    fn test_view_defaults() {
        let w = TextareaInput::new("bio", &TextareaConfig::default(), &Settings::default());
        let WidgetView::Textarea(view) = w.view(&Value::from("hello")) else {
            panic!("expected textarea view");
        };
        assert_eq!(view.rows, 10);
        assert_eq!(view.counter, "5/200");
        assert!(!view.show_counter);
    }

    #[test]
    fn test_view_with_cap() {
        let config = TextareaConfig {
            rows: Some(3),
            max: Some(50),
        };
        let w = TextareaInput::new("bio", &config, &Settings::default());
        let WidgetView::Textarea(view) = w.view(&Value::Null) else {
            panic!("expected textarea view");
        };
        assert_eq!(view.rows, 3);
        assert_eq!(view.counter, "0/50");
        assert!(view.show_counter);
    }
}
