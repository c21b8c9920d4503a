//! Static registry of filterable dimensions and their allowed values.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// A selectable value and its display text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// One filterable dimension, e.g. "Hospital".
///
/// `options` keeps declaration order; the UI lists them in that order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    #[serde(default)]
    pub options: Vec<FilterOption>,
}

impl FilterConfig {
    pub fn new(
        kind: impl Into<String>,
        label: impl Into<String>,
        options: Vec<FilterOption>,
    ) -> Self {
        Self {
            kind: kind.into(),
            label: label.into(),
            options,
        }
    }

    /// Looks up an option by its value.
    pub fn option(&self, value: &str) -> Option<&FilterOption> {
        self.options.iter().find(|option| option.value == value)
    }
}

/// Immutable, ordered set of [`FilterConfig`]s keyed by `type`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FilterCatalog {
    configs: Vec<FilterConfig>,
}

impl FilterCatalog {
    /// Builds a catalog, rejecting duplicate types and duplicate option
    /// values within one dimension.
    pub fn new(configs: Vec<FilterConfig>) -> Result<Self, CatalogError> {
        let mut seen_types = HashSet::new();
        for config in &configs {
            if !seen_types.insert(config.kind.as_str()) {
                return Err(CatalogError::DuplicateType(config.kind.clone()));
            }
            let mut seen_values = HashSet::new();
            for option in &config.options {
                if !seen_values.insert(option.value.as_str()) {
                    return Err(CatalogError::DuplicateOption {
                        kind: config.kind.clone(),
                        value: option.value.clone(),
                    });
                }
            }
        }
        Ok(Self { configs })
    }

    /// Parses a JSON array of filter configs and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let configs: Vec<FilterConfig> =
            serde_json::from_str(json).map_err(|err| CatalogError::Parse(err.to_string()))?;
        Self::new(configs)
    }

    /// A catalog with no dimensions.
    pub fn empty() -> Self {
        Self {
            configs: Vec::new(),
        }
    }

    /// Default catalog for the Ghana AMU point prevalence dashboards.
    pub fn ghana_amu() -> Self {
        Self {
            configs: ghana_amu_configs(),
        }
    }

    pub fn configs(&self) -> &[FilterConfig] {
        &self.configs
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    pub fn config(&self, kind: &str) -> Option<&FilterConfig> {
        self.configs.iter().find(|config| config.kind == kind)
    }

    /// Every dimension as a `{value: type, label}` option, catalog order.
    pub fn list_types(&self) -> Vec<FilterOption> {
        self.configs
            .iter()
            .map(|config| FilterOption::new(config.kind.clone(), config.label.clone()))
            .collect()
    }

    /// Options of one dimension; empty when the type is unknown.
    pub fn list_values(&self, kind: &str) -> Vec<FilterOption> {
        self.config(kind)
            .map(|config| config.options.clone())
            .unwrap_or_default()
    }

    /// Chip text for a selection.
    ///
    /// Falls back to the raw value when the option is unknown, and to the
    /// raw type as well when the dimension is unknown.
    pub fn describe(&self, kind: &str, value: &str) -> String {
        match self.config(kind) {
            Some(config) => match config.option(value) {
                Some(option) => format!("{}: {}", config.label, option.label),
                None => format!("{}: {value}", config.label),
            },
            None => format!("{kind}: {value}"),
        }
    }
}

impl Default for FilterCatalog {
    fn default() -> Self {
        Self::ghana_amu()
    }
}

impl<'de> Deserialize<'de> for FilterCatalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let configs = Vec::<FilterConfig>::deserialize(deserializer)?;
        FilterCatalog::new(configs).map_err(serde::de::Error::custom)
    }
}

fn options(pairs: &[(&str, &str)]) -> Vec<FilterOption> {
    pairs
        .iter()
        .map(|(value, label)| FilterOption::new(*value, *label))
        .collect()
}

fn ghana_amu_configs() -> Vec<FilterConfig> {
    vec![
        FilterConfig::new(
            "hospital",
            "Hospital",
            options(&[
                ("korle_bu", "Korle-Bu Teaching Hospital"),
                ("komfo_anokye", "Komfo Anokye Teaching Hospital"),
                ("tamale", "Tamale Teaching Hospital"),
                ("cape_coast", "Cape Coast Teaching Hospital"),
                ("ho", "Ho Teaching Hospital"),
                ("eastern_regional", "Eastern Regional Hospital"),
                ("greater_accra_regional", "Greater Accra Regional Hospital"),
                ("volta_regional", "Volta Regional Hospital"),
            ]),
        ),
        FilterConfig::new(
            "ward",
            "Ward",
            options(&[
                ("medical", "Medical Ward"),
                ("surgical", "Surgical Ward"),
                ("paediatric", "Paediatric Ward"),
                ("obstetrics_gynaecology", "Obstetrics & Gynaecology"),
                ("icu", "Intensive Care Unit"),
                ("neonatal", "Neonatal Unit"),
            ]),
        ),
        FilterConfig::new(
            "sex",
            "Sex",
            options(&[("male", "Male"), ("female", "Female")]),
        ),
        FilterConfig::new(
            "year",
            "Year",
            options(&[
                ("2019", "2019"),
                ("2020", "2020"),
                ("2021", "2021"),
                ("2022", "2022"),
                ("2023", "2023"),
                ("2024", "2024"),
            ]),
        ),
        FilterConfig::new(
            "age_group",
            "Age Group",
            options(&[
                ("0-4", "0-4 years"),
                ("5-14", "5-14 years"),
                ("15-24", "15-24 years"),
                ("25-44", "25-44 years"),
                ("45-64", "45-64 years"),
                ("65+", "65+ years"),
            ]),
        ),
        FilterConfig::new(
            "specimen",
            "Specimen",
            options(&[
                ("blood", "Blood"),
                ("urine", "Urine"),
                ("wound_swab", "Wound Swab"),
                ("sputum", "Sputum"),
                ("csf", "Cerebrospinal Fluid"),
                ("stool", "Stool"),
            ]),
        ),
        FilterConfig::new(
            "indication",
            "Indication",
            options(&[
                ("cai", "Community-Acquired Infection"),
                ("hai", "Hospital-Acquired Infection"),
                ("sp", "Surgical Prophylaxis"),
                ("mp", "Medical Prophylaxis"),
                ("unknown", "Unknown"),
            ]),
        ),
        FilterConfig::new(
            "atc_class",
            "ATC Class",
            options(&[
                ("J01C", "J01C Beta-lactam antibacterials, penicillins"),
                ("J01D", "J01D Other beta-lactam antibacterials"),
                ("J01F", "J01F Macrolides, lincosamides and streptogramins"),
                ("J01G", "J01G Aminoglycoside antibacterials"),
                ("J01M", "J01M Quinolone antibacterials"),
                ("J01X", "J01X Other antibacterials"),
                ("P01A", "P01A Agents against amoebiasis"),
            ]),
        ),
        FilterConfig::new(
            "aware_category",
            "AWaRe Category",
            options(&[
                ("access", "Access"),
                ("watch", "Watch"),
                ("reserve", "Reserve"),
                ("not_recommended", "Not Recommended"),
            ]),
        ),
    ]
}
