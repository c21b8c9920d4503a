#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-amu-ui]";

/// Default CSS for the filter bar and chart panel, with overridable tokens.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --amu-font-family: 'Inter', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --amu-bg: #ffffff;
  --amu-surface: #f6f8f7;
  --amu-border: rgba(100, 116, 139, 0.28);
  --amu-radius: 12px;
  --amu-text: #1f2933;
  --amu-muted: #52606d;
  --amu-accent: #1b5e20;
  --amu-accent-text: #ffffff;
  --amu-chip-bg: rgba(27, 94, 32, 0.1);
  --amu-chip-text: #1b5e20;
}

.amu-view {
  font-family: var(--amu-font-family);
  background: var(--amu-bg);
  color: var(--amu-text);
  border-radius: var(--amu-radius);
  display: flex;
  flex-direction: column;
  gap: 20px;
  padding: 24px;
  box-shadow: 0 16px 32px rgba(15, 23, 42, 0.08);
}

.filter-bar {
  display: flex;
  flex-direction: column;
  gap: 12px;
  background: var(--amu-surface);
  border: 1px solid var(--amu-border);
  border-radius: var(--amu-radius);
  padding: 16px;
}

.filter-controls {
  display: flex;
  flex-wrap: wrap;
  gap: 10px;
  align-items: center;
}

.filter-controls select {
  min-width: 200px;
  padding: 8px 10px;
  border: 1px solid var(--amu-border);
  border-radius: 8px;
  background: var(--amu-bg);
  color: inherit;
}

.filter-controls button,
.filter-clear {
  padding: 8px 14px;
  border-radius: 8px;
  border: none;
  cursor: pointer;
  font-weight: 600;
}

.filter-controls button {
  background: var(--amu-accent);
  color: var(--amu-accent-text);
}

.filter-controls button:disabled {
  opacity: 0.45;
  cursor: not-allowed;
}

.filter-chips {
  display: flex;
  flex-wrap: wrap;
  gap: 8px;
  list-style: none;
  margin: 0;
  padding: 0;
}

.filter-chip {
  display: inline-flex;
  align-items: center;
  gap: 6px;
  padding: 4px 10px;
  border-radius: 999px;
  background: var(--amu-chip-bg);
  color: var(--amu-chip-text);
  font-size: 0.875rem;
}

.filter-chip button {
  border: none;
  background: transparent;
  color: inherit;
  cursor: pointer;
  font-size: 1rem;
  line-height: 1;
}

.filter-clear {
  align-self: flex-start;
  background: transparent;
  color: var(--amu-muted);
}

.chart-panel h3 {
  margin: 0 0 12px;
}

.chart-panel table {
  width: 100%;
  border-collapse: collapse;
}

.chart-panel th,
.chart-panel td {
  text-align: left;
  padding: 6px 8px;
  border-bottom: 1px solid var(--amu-border);
}

.chart-swatch {
  display: inline-block;
  width: 10px;
  height: 10px;
  border-radius: 2px;
  margin-right: 6px;
}

.chart-empty {
  color: var(--amu-muted);
}

@media (max-width: 640px) {
  .filter-controls {
    flex-direction: column;
    align-items: stretch;
  }

  .filter-controls select {
    min-width: 0;
  }
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document has no <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-amu-ui", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}
