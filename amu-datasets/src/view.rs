//! Dashboard views and the dataset variants each one can show.

use std::collections::HashSet;

use amu_core::ActiveFilter;
use serde::{Deserialize, Serialize};

use crate::chart::ChartData;
use crate::DatasetError;

/// A `(type, value)` pair a variant requires to be active.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FilterKey {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl FilterKey {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }

    pub fn is_active_in(&self, active: &[ActiveFilter]) -> bool {
        active
            .iter()
            .any(|filter| filter.matches(&self.kind, &self.value))
    }
}

/// Pre-baked data shown when every `when` key is active.
///
/// An empty `when` marks the aggregate variant shown by default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetVariant {
    #[serde(default)]
    pub when: Vec<FilterKey>,
    pub data: ChartData,
}

impl DatasetVariant {
    pub fn aggregate(data: ChartData) -> Self {
        Self {
            when: Vec::new(),
            data,
        }
    }

    pub fn when(keys: &[(&str, &str)], data: ChartData) -> Self {
        Self {
            when: keys
                .iter()
                .map(|(kind, value)| FilterKey::new(*kind, *value))
                .collect(),
            data,
        }
    }

    pub fn is_aggregate(&self) -> bool {
        self.when.is_empty()
    }

    /// True when every required key is active. Aggregates never match.
    pub fn matches(&self, active: &[ActiveFilter]) -> bool {
        !self.is_aggregate() && self.when.iter().all(|key| key.is_active_in(active))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardView {
    pub id: String,
    pub title: String,
    pub variants: Vec<DatasetVariant>,
}

impl DashboardView {
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.variants.is_empty() {
            return Err(DatasetError::EmptyView(self.id.clone()));
        }
        self.variants
            .iter()
            .try_for_each(|variant| variant.data.validate())
    }

    /// First variant with no requirements.
    pub fn aggregate(&self) -> Option<&DatasetVariant> {
        self.variants.iter().find(|variant| variant.is_aggregate())
    }
}

/// Ordered collection of views with unique ids.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct ViewRegistry {
    views: Vec<DashboardView>,
}

impl ViewRegistry {
    pub fn new(views: Vec<DashboardView>) -> Result<Self, DatasetError> {
        let mut ids = HashSet::new();
        for view in &views {
            if !ids.insert(view.id.as_str()) {
                return Err(DatasetError::DuplicateView(view.id.clone()));
            }
            view.validate()?;
        }
        Ok(Self { views })
    }

    pub fn views(&self) -> &[DashboardView] {
        &self.views
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.views.iter().map(|view| view.id.as_str())
    }

    pub fn get(&self, id: &str) -> Option<&DashboardView> {
        self.views.iter().find(|view| view.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&DashboardView, DatasetError> {
        self.get(id)
            .ok_or_else(|| DatasetError::UnknownView(id.to_string()))
    }
}

impl<'de> Deserialize<'de> for ViewRegistry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let views = Vec::<DashboardView>::deserialize(deserializer)?;
        ViewRegistry::new(views).map_err(serde::de::Error::custom)
    }
}
