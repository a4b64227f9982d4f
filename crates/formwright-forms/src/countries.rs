//! Country reference data for the phone widget.
//!
//! The built-in dataset covers the common calling regions. Hosts with their
//! own list load it with [`CountryDataset::from_json`].

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use formwright_core::FormResult;

/// One country entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, lowercase.
    pub name: String,
    /// Display name; also the value of the country selector.
    pub full_name: String,
    /// Calling code including the leading `+`.
    pub dial_code: String,
    /// Flag image reference for the presentation layer.
    pub flag: String,
}

/// A read-only list of countries, sorted by display name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CountryDataset {
    countries: Vec<Country>,
}

const BUILTIN: &[(&str, &str, &str)] = &[
    ("ar", "Argentina", "+54"),
    ("at", "Austria", "+43"),
    ("au", "Australia", "+61"),
    ("be", "Belgium", "+32"),
    ("bg", "Bulgaria", "+359"),
    ("br", "Brazil", "+55"),
    ("ca", "Canada", "+1"),
    ("ch", "Switzerland", "+41"),
    ("cl", "Chile", "+56"),
    ("cn", "China", "+86"),
    ("co", "Colombia", "+57"),
    ("cy", "Cyprus", "+357"),
    ("cz", "Czech Republic", "+420"),
    ("de", "Germany", "+49"),
    ("dk", "Denmark", "+45"),
    ("ee", "Estonia", "+372"),
    ("eg", "Egypt", "+20"),
    ("es", "Spain", "+34"),
    ("fi", "Finland", "+358"),
    ("fr", "France", "+33"),
    ("gb", "United Kingdom", "+44"),
    ("gr", "Greece", "+30"),
    ("hr", "Croatia", "+385"),
    ("hu", "Hungary", "+36"),
    ("id", "Indonesia", "+62"),
    ("ie", "Ireland", "+353"),
    ("il", "Israel", "+972"),
    ("in", "India", "+91"),
    ("is", "Iceland", "+354"),
    ("it", "Italy", "+39"),
    ("jp", "Japan", "+81"),
    ("ke", "Kenya", "+254"),
    ("kr", "South Korea", "+82"),
    ("li", "Liechtenstein", "+423"),
    ("lt", "Lithuania", "+370"),
    ("lu", "Luxembourg", "+352"),
    ("lv", "Latvia", "+371"),
    ("ma", "Morocco", "+212"),
    ("mt", "Malta", "+356"),
    ("mx", "Mexico", "+52"),
    ("my", "Malaysia", "+60"),
    ("ng", "Nigeria", "+234"),
    ("nl", "Netherlands", "+31"),
    ("no", "Norway", "+47"),
    ("nz", "New Zealand", "+64"),
    ("ph", "Philippines", "+63"),
    ("pl", "Poland", "+48"),
    ("pt", "Portugal", "+351"),
    ("ro", "Romania", "+40"),
    ("rs", "Serbia", "+381"),
    ("sa", "Saudi Arabia", "+966"),
    ("se", "Sweden", "+46"),
    ("sg", "Singapore", "+65"),
    ("si", "Slovenia", "+386"),
    ("sk", "Slovakia", "+421"),
    ("th", "Thailand", "+66"),
    ("tr", "Turkey", "+90"),
    ("ua", "Ukraine", "+380"),
    ("us", "United States", "+1"),
    ("vn", "Vietnam", "+84"),
    ("za", "South Africa", "+27"),
];

static DEFAULT_DATASET: Lazy<CountryDataset> = Lazy::new(|| {
    CountryDataset::new(
        BUILTIN
            .iter()
            .map(|(code, full_name, dial)| Country {
                name: (*code).to_string(),
                full_name: (*full_name).to_string(),
                dial_code: (*dial).to_string(),
                flag: format!("flags/{code}.svg"),
            })
            .collect(),
    )
});

impl CountryDataset {
    /// Builds a dataset, sorting entries by display name (case-insensitive).
    pub fn new(mut countries: Vec<Country>) -> Self {
        countries.sort_by_key(|c| c.full_name.to_lowercase());
        Self { countries }
    }

    /// The built-in dataset.
    pub fn builtin() -> &'static Self {
        &DEFAULT_DATASET
    }

    /// Parses a JSON array of `{name, full_name, dial_code, flag}` objects.
    pub fn from_json(json: &str) -> FormResult<Self> {
        let countries: Vec<Country> = serde_json::from_str(json)?;
        Ok(Self::new(countries))
    }

    /// All entries in display order.
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Entries whose display name appears in `allow_list` (case-insensitive).
    /// `None` keeps every entry.
    pub fn filtered(&self, allow_list: Option<&[String]>) -> Vec<Country> {
        match allow_list {
            None => self.countries.clone(),
            Some(allowed) => {
                let allowed: Vec<String> = allowed.iter().map(|a| a.to_lowercase()).collect();
                self.countries
                    .iter()
                    .filter(|c| allowed.contains(&c.full_name.to_lowercase()))
                    .cloned()
                    .collect()
            }
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    /// Returns `true` if the dataset has no entries.
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_sorted() {
        let names: Vec<&str> = CountryDataset::builtin()
            .countries()
            .iter()
            .map(|c| c.full_name.as_str())
            .collect();
        let mut sorted = names.clone();
        sorted.sort_by_key(|n| n.to_lowercase());
        assert_eq!(names, sorted);
        assert_eq!(names.first(), Some(&"Argentina"));
    }

    #[test]
    fn test_builtin_entries() {
        let germany = CountryDataset::builtin().filtered(Some(&["Germany".to_string()]));
        assert_eq!(germany.len(), 1);
        assert_eq!(germany[0].dial_code, "+49");
        assert_eq!(germany[0].flag, "flags/de.svg");
        assert!(CountryDataset::builtin()
            .filtered(Some(&["Atlantis".to_string()]))
            .is_empty());
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let allow = vec!["germany".to_string(), "FRANCE".to_string()];
        let list = CountryDataset::builtin().filtered(Some(&allow));
        let names: Vec<&str> = list.iter().map(|c| c.full_name.as_str()).collect();
        assert_eq!(names, vec!["France", "Germany"]);
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"name": "zz", "full_name": "Zedland", "dial_code": "+999", "flag": "z.svg"},
            {"name": "aa", "full_name": "Aland", "dial_code": "+111", "flag": "a.svg"}
        ]"#;
        let ds = CountryDataset::from_json(json).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.countries()[0].full_name, "Aland");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = CountryDataset::from_json("{not json").unwrap_err();
        assert!(matches!(err, formwright_core::FormError::SerializationError(_)));
    }
}
