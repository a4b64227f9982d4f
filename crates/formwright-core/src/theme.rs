//! Theme tokens and explicit theme application.
//!
//! A [`Theme`] is plain data. Nothing is applied on load: the host calls
//! [`apply_theme`] once at startup (and again whenever it swaps themes),
//! handing in a [`ThemeTarget`] that knows how to set style properties on
//! its document root.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// Primary/secondary/tertiary shades of one color role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shades {
    pub primary_color: String,
    pub secondary_color: String,
    pub tertiary_color: String,
}

impl Shades {
    fn new(primary: &str, secondary: &str, tertiary: &str) -> Self {
        Self {
            primary_color: primary.to_string(),
            secondary_color: secondary.to_string(),
            tertiary_color: tertiary.to_string(),
        }
    }
}

/// Status colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusColors {
    pub success: String,
    pub warning: String,
    pub danger: String,
}

/// All color roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colors {
    pub background: Shades,
    pub font: Shades,
    pub accent: Shades,
    pub shadow: Shades,
    pub border: Shades,
    pub status: StatusColors,
}

/// One value per size token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeScale {
    pub xs: String,
    pub sm: String,
    pub md: String,
    pub lg: String,
    pub xl: String,
}

/// Values for call-to-action, paragraph and header text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRoles {
    pub cta: String,
    pub para: String,
    pub header: String,
}

/// Font settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: String,
    pub font_size: SizeScale,
    pub letter_spacing: TextRoles,
    pub line_height: TextRoles,
}

/// Spacing steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spacing {
    pub sm: String,
    pub md: String,
    pub lg: String,
    pub xl: String,
}

/// Corner radii.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Radius {
    pub sm: String,
    pub md: String,
    pub lg: String,
    pub round: String,
}

/// Transition durations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub fast: String,
    pub normal: String,
    pub slow: String,
}

/// Motion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motion {
    pub duration: Durations,
    pub easing: String,
}

/// Stacking levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZIndex {
    pub zero: i32,
    pub low: i32,
    pub mid: i32,
    pub high: i32,
    pub full: i32,
}

/// The visual style family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeStyle {
    Morphism,
    #[default]
    Classic,
}

/// A complete set of theme tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub colors: Colors,
    pub typography: Typography,
    pub spacing: Spacing,
    pub radius: Radius,
    pub motion: Motion,
    pub z_index: ZIndex,
    pub style: ThemeStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            colors: Colors {
                background: Shades::new("hsl(0, 0%, 95%)", "hsl(0, 0%, 90%)", "hsl(0, 0%, 88%)"),
                font: Shades::new("hsl(0, 0%, 15%)", "hsl(0, 0%, 20%)", "hsl(0, 0%, 25%)"),
                accent: Shades::new("hsl(30, 100%, 44%)", "hsl(30, 100%, 52%)", "hsl(30, 100%, 60%)"),
                shadow: Shades::new("hsl(0, 0%, 95%)", "hsl(0, 0%, 95%)", "hsl(0, 0%, 95%)"),
                border: Shades::new("hsl(0, 0%, 90%)", "hsl(0, 0%, 85%)", "hsl(255, 0%, 15%)"),
                status: StatusColors {
                    success: "hsl(125, 73%, 42%)".to_string(),
                    warning: "hsl(43, 100%, 70%)".to_string(),
                    danger: "hsl(0, 100%, 50%)".to_string(),
                },
            },
            typography: Typography {
                font_family: "'Inter', system-ui, -apple-system, sans-serif".to_string(),
                font_size: SizeScale {
                    xs: "0.75rem".to_string(),
                    sm: "0.875rem".to_string(),
                    md: "1rem".to_string(),
                    lg: "1.125rem".to_string(),
                    xl: "1.25rem".to_string(),
                },
                letter_spacing: TextRoles {
                    cta: "1px".to_string(),
                    para: "0px".to_string(),
                    header: "-1px".to_string(),
                },
                line_height: TextRoles {
                    cta: "1.2".to_string(),
                    para: "1.5".to_string(),
                    header: "1.1".to_string(),
                },
            },
            spacing: Spacing {
                sm: "4px".to_string(),
                md: "8px".to_string(),
                lg: "12px".to_string(),
                xl: "16px".to_string(),
            },
            radius: Radius {
                sm: "2px".to_string(),
                md: "6px".to_string(),
                lg: "12px".to_string(),
                round: "50%".to_string(),
            },
            motion: Motion {
                duration: Durations {
                    fast: "100ms".to_string(),
                    normal: "200ms".to_string(),
                    slow: "400ms".to_string(),
                },
                easing: "linear".to_string(),
            },
            z_index: ZIndex {
                zero: 0,
                low: 2,
                mid: 4,
                high: 8,
                full: 16,
            },
            style: ThemeStyle::Classic,
        }
    }
}

/// Something that accepts style custom properties, usually a document root.
pub trait ThemeTarget {
    /// Sets one custom property (`--colors-font-primaryColor` → `hsl(...)`).
    fn set_property(&mut self, name: &str, value: &str);
}

impl ThemeTarget for BTreeMap<String, String> {
    fn set_property(&mut self, name: &str, value: &str) {
        self.insert(name.to_string(), value.to_string());
    }
}

/// Flattens a theme into custom properties named after the token path.
///
/// # Examples
///
/// ```
/// use formwright_core::theme::{to_css_variables, Theme};
///
/// let vars = to_css_variables(&Theme::default()).unwrap();
/// assert_eq!(vars["--spacing-md"], "8px");
/// assert_eq!(vars["--zIndex-high"], "8");
/// ```
pub fn to_css_variables(theme: &Theme) -> Result<BTreeMap<String, String>, FormError> {
    let json = serde_json::to_value(theme)?;
    let mut vars = BTreeMap::new();
    flatten("", &json, &mut vars);
    Ok(vars)
}

fn flatten(prefix: &str, value: &serde_json::Value, out: &mut BTreeMap<String, String>) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}-{key}")
                };
                flatten(&path, child, out);
            }
        }
        serde_json::Value::String(s) => {
            out.insert(format!("--{prefix}"), s.clone());
        }
        serde_json::Value::Null => {}
        other => {
            out.insert(format!("--{prefix}"), other.to_string());
        }
    }
}

/// Writes every token of `theme` to `target`.
///
/// Returns the number of properties written.
pub fn apply_theme(theme: &Theme, target: &mut dyn ThemeTarget) -> Result<usize, FormError> {
    let vars = to_css_variables(theme)?;
    for (name, value) in &vars {
        target.set_property(name, value);
    }
    tracing::debug!(properties = vars.len(), "theme applied");
    Ok(vars.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_variable_names_follow_token_paths() {
        let vars = to_css_variables(&Theme::default()).unwrap();
        assert_eq!(vars["--colors-background-primaryColor"], "hsl(0, 0%, 95%)");
        assert_eq!(vars["--typography-fontSize-sm"], "0.875rem");
        assert_eq!(vars["--motion-duration-slow"], "400ms");
        assert_eq!(vars["--style"], "classic");
    }

    #[test]
    fn test_apply_theme_writes_every_token() {
        let mut root: BTreeMap<String, String> = BTreeMap::new();
        let written = apply_theme(&Theme::default(), &mut root).unwrap();
        assert_eq!(written, root.len());
        assert_eq!(root["--radius-round"], "50%");
    }

    #[test]
    fn test_apply_custom_theme_overrides() {
        let mut theme = Theme::default();
        theme.colors.accent.primary_color = "rebeccapurple".to_string();
        theme.style = ThemeStyle::Morphism;

        let mut root: BTreeMap<String, String> = BTreeMap::new();
        apply_theme(&theme, &mut root).unwrap();
        assert_eq!(root["--colors-accent-primaryColor"], "rebeccapurple");
        assert_eq!(root["--style"], "morphism");
    }
}
