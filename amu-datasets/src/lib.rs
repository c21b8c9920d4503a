//! Dataset variants for the AMU dashboard views and the strategies that
//! choose between them from a view's active filters.

mod builtin;
pub mod chart;
pub mod select;
pub mod view;

use amu_core::ActiveFilter;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use chart::{ChartData, ChartKind, Series};
pub use select::{FirstMatch, MostSpecific, SelectionStrategy, VariantSelector};
pub use view::{DashboardView, DatasetVariant, FilterKey, ViewRegistry};

/// Settings shared by every view of a dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub selection: SelectionStrategy,
    /// Colors applied to the selected chart; `None` keeps dataset colors.
    #[serde(default)]
    pub palette: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    #[error("cannot read views: {0}")]
    Parse(String),
    #[error("duplicate view id `{0}`")]
    DuplicateView(String),
    #[error("view `{0}` has no dataset variants")]
    EmptyView(String),
    #[error("series `{series}` of chart `{chart}` has {actual} values, expected {expected}")]
    LengthMismatch {
        chart: String,
        series: String,
        expected: usize,
        actual: usize,
    },
    #[error("unknown view `{0}`")]
    UnknownView(String),
    #[error("no dataset of view `{0}` applies to the active filters")]
    NoVariant(String),
}

impl ViewRegistry {
    /// Ghana AMU views with pre-baked survey figures.
    pub fn builtin() -> Self {
        ViewRegistry::new(builtin::views()).unwrap_or_default()
    }
}

/// Parses a JSON array of views.
pub fn load_views_str(json: &str) -> Result<ViewRegistry, DatasetError> {
    let value: Value =
        serde_json::from_str(json).map_err(|err| DatasetError::Parse(err.to_string()))?;
    load_views_value(&value)
}

/// Builds a registry from an already-parsed `serde_json::Value`.
pub fn load_views_value(value: &Value) -> Result<ViewRegistry, DatasetError> {
    let views: Vec<DashboardView> = serde_json::from_value(value.clone())
        .map_err(|err| DatasetError::Parse(err.to_string()))?;
    ViewRegistry::new(views)
}

/// Picks the chart a view shows for `active` and applies the palette.
pub fn resolve_view(
    registry: &ViewRegistry,
    id: &str,
    active: &[ActiveFilter],
    config: &DashboardConfig,
) -> Result<ChartData, DatasetError> {
    let view = registry.require(id)?;
    let variant = config
        .selection
        .select(view, active)
        .ok_or_else(|| DatasetError::NoVariant(id.to_string()))?;
    debug!("view `{id}` resolved to `{}`", variant.data.title);

    let data = variant.data.clone();
    Ok(match &config.palette {
        Some(palette) => data.recolor(palette),
        None => data,
    })
}
