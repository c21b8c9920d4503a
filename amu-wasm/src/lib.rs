//! Framework-neutral WASM <-> JavaScript bridge for the filter model.

use amu_core::{ActiveFilter, FilterCatalog, FilterSession};
use amu_datasets::{resolve_view, DashboardConfig, DatasetError, SelectionStrategy, ViewRegistry};
use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct JsDashboardConfig {
    #[serde(default)]
    selection: Option<SelectionStrategy>,
    #[serde(default)]
    palette: Option<Vec<String>>,
}

impl From<JsDashboardConfig> for DashboardConfig {
    fn from(cfg: JsDashboardConfig) -> Self {
        let mut base = DashboardConfig::default();
        if let Some(selection) = cfg.selection {
            base.selection = selection;
        }
        if cfg.palette.is_some() {
            base.palette = cfg.palette;
        }
        base
    }
}

/// Installs the panic hook and routes `log` records to the browser console.
#[wasm_bindgen]
pub fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        _ = console_log::init_with_level(log::Level::Debug);
    }
}

fn read_catalog(catalog: Option<JsValue>) -> Result<FilterCatalog, JsValue> {
    match catalog {
        Some(js_catalog) => from_value(js_catalog)
            .map_err(|err| JsValue::from_str(&format!("Cannot read catalog: {err}"))),
        None => Ok(FilterCatalog::ghana_amu()),
    }
}

fn read_config(config: Option<JsValue>) -> Result<DashboardConfig, JsValue> {
    match config {
        Some(js_cfg) => {
            let cfg: JsDashboardConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Cannot read config: {err}")))?;
            Ok(DashboardConfig::from(cfg))
        }
        None => Ok(DashboardConfig::default()),
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(|err| JsValue::from_str(&format!("Cannot serialize result: {err}")))
}

/// `[{value, label}]` for every dimension of the catalog.
#[wasm_bindgen(js_name = listTypes)]
pub fn list_types(catalog: Option<JsValue>) -> Result<JsValue, JsValue> {
    to_js(&read_catalog(catalog)?.list_types())
}

#[wasm_bindgen(js_name = listValues)]
pub fn list_values(kind: &str, catalog: Option<JsValue>) -> Result<JsValue, JsValue> {
    to_js(&read_catalog(catalog)?.list_values(kind))
}

#[wasm_bindgen]
pub fn describe(kind: &str, value: &str, catalog: Option<JsValue>) -> Result<String, JsValue> {
    Ok(read_catalog(catalog)?.describe(kind, value))
}

/// Picks the dataset a view shows for an array of active filters.
#[wasm_bindgen(js_name = resolveView)]
pub fn resolve_view_js(
    view_id: &str,
    active_filters: JsValue,
    views: Option<JsValue>,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    let active: Vec<ActiveFilter> = from_value(active_filters)
        .map_err(|err| JsValue::from_str(&format!("Cannot read active filters: {err}")))?;
    let registry = match views {
        Some(js_views) => {
            let value = from_value::<serde_json::Value>(js_views)
                .map_err(|err| JsValue::from_str(&format!("Cannot read views JSON: {err}")))?;
            amu_datasets::load_views_value(&value)
                .map_err(|err| JsValue::from_str(&format_dataset_error(err)))?
        }
        None => ViewRegistry::builtin(),
    };
    let cfg = read_config(config)?;

    let chart = resolve_view(&registry, view_id, &active, &cfg)
        .map_err(|err| JsValue::from_str(&format_dataset_error(err)))?;
    to_js(&chart)
}

fn format_dataset_error(err: DatasetError) -> String {
    format!("Dataset error: {err}")
}

/// A filter session owned by one JavaScript view.
#[wasm_bindgen]
pub struct FilterSessionHandle {
    catalog: FilterCatalog,
    session: FilterSession,
}

#[wasm_bindgen]
impl FilterSessionHandle {
    /// Starts an empty session over `catalog`, or the Ghana AMU catalog.
    #[wasm_bindgen(constructor)]
    pub fn new(catalog: Option<JsValue>) -> Result<FilterSessionHandle, JsValue> {
        Ok(Self {
            catalog: read_catalog(catalog)?,
            session: FilterSession::new(),
        })
    }

    #[wasm_bindgen(getter = pendingType)]
    pub fn pending_type(&self) -> String {
        self.session.pending_type().to_string()
    }

    #[wasm_bindgen(setter = pendingType)]
    pub fn set_pending_type(&mut self, kind: String) {
        self.session.set_pending_type(kind);
    }

    #[wasm_bindgen(getter = pendingValue)]
    pub fn pending_value(&self) -> String {
        self.session.pending_value().to_string()
    }

    #[wasm_bindgen(setter = pendingValue)]
    pub fn set_pending_value(&mut self, value: String) {
        self.session.set_pending_value(value);
    }

    #[wasm_bindgen(getter = canAdd)]
    pub fn can_add(&self) -> bool {
        self.session.can_add()
    }

    #[wasm_bindgen(getter = activeFilters)]
    pub fn active_filters(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.active_filters())
    }

    /// Options for the pending type, for the value dropdown.
    #[wasm_bindgen(js_name = pendingOptions)]
    pub fn pending_options(&self) -> Result<JsValue, JsValue> {
        to_js(&self.catalog.list_values(self.session.pending_type()))
    }

    /// Returns `"added"`, `"incomplete"` or `"duplicate"`.
    #[wasm_bindgen(js_name = addFilter)]
    pub fn add_filter(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.session.add_filter(&self.catalog))
    }

    /// Throws on an out-of-range index instead of ignoring it.
    #[wasm_bindgen(js_name = removeFilter)]
    pub fn remove_filter(&mut self, index: usize) -> Result<(), JsValue> {
        let len = self.session.active_filters().len();
        if index >= len {
            return Err(JsValue::from_str(&format!(
                "removeFilter index {index} out of range for {len} active filters"
            )));
        }
        self.session.remove_filter(index);
        Ok(())
    }

    #[wasm_bindgen(js_name = clearAllFilters)]
    pub fn clear_all_filters(&mut self) {
        self.session.clear_all_filters();
    }

    /// Serialized session state for debugging or hand-off.
    #[wasm_bindgen(js_name = toJSON)]
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session)
    }
}
