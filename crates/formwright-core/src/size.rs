//! Component size tokens.
//!
//! The presentation layer maps these tokens onto CSS scale classes; the
//! engine only carries them from the schema and settings to the views.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// The size scale accepted by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentSize {
    /// Extra small.
    Xs,
    /// Small.
    Sm,
    /// Medium (the default for input widgets).
    #[default]
    Md,
    /// Large.
    Lg,
    /// Extra large.
    Xl,
}

impl ComponentSize {
    /// Returns the token as it appears in style sheets (`xs`, `sm`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
        }
    }
}

impl fmt::Display for ComponentSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentSize {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xs" => Ok(Self::Xs),
            "sm" => Ok(Self::Sm),
            "md" => Ok(Self::Md),
            "lg" => Ok(Self::Lg),
            "xl" => Ok(Self::Xl),
            other => Err(FormError::ConfigurationError(format!(
                "Unknown component size '{other}' (expected xs, sm, md, lg or xl)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_md() {
        assert_eq!(ComponentSize::default(), ComponentSize::Md);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("LG".parse::<ComponentSize>().unwrap(), ComponentSize::Lg);
        assert_eq!(ComponentSize::Xs.to_string(), "xs");
        assert!("huge".parse::<ComponentSize>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ComponentSize::Sm).unwrap();
        assert_eq!(json, "\"sm\"");
        let parsed: ComponentSize = serde_json::from_str("\"xl\"").unwrap();
        assert_eq!(parsed, ComponentSize::Xl);
    }
}
