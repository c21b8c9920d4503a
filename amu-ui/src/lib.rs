//! Filter bar and chart panel for one AMU dashboard view, for WebAssembly.

#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use crate::styles;
    use amu_core::{AddOutcome, FilterCatalog, FilterOption, FilterSession};
    use amu_datasets::{resolve_view, ChartData, DashboardConfig, ViewRegistry};
    use log::debug;
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::prelude::*;
    use web_sys::{console, Document, Element, HtmlSelectElement, Window};
    use yew::prelude::*;
    use yew::TargetCast;

    #[derive(Properties, PartialEq)]
    pub struct AmuViewProps {
        pub view_id: String,
        pub catalog: FilterCatalog,
        pub registry: ViewRegistry,
        pub config: DashboardConfig,
    }

    #[function_component(AmuView)]
    fn amu_view(props: &AmuViewProps) -> Html {
        use_effect_with((), |_| {
            if let Some(window) = web_sys::window() {
                if let Some(document) = window.document() {
                    if let Err(err) = styles::ensure_styles(&document) {
                        console::error_1(&err);
                    }
                }
            }
            || ()
        });

        let session = use_state(FilterSession::new);

        let on_type_change = {
            let session = session.clone();
            Callback::from(move |event: Event| {
                let select: HtmlSelectElement = event.target_unchecked_into();
                let mut next = (*session).clone();
                next.set_pending_type(select.value());
                session.set(next);
            })
        };

        let on_value_change = {
            let session = session.clone();
            Callback::from(move |event: Event| {
                let select: HtmlSelectElement = event.target_unchecked_into();
                let mut next = (*session).clone();
                next.set_pending_value(select.value());
                session.set(next);
            })
        };

        let on_add = {
            let session = session.clone();
            let catalog = props.catalog.clone();
            Callback::from(move |_| {
                let mut next = (*session).clone();
                let outcome = next.add_filter(&catalog);
                if outcome != AddOutcome::Added {
                    debug!("add filter skipped: {outcome:?}");
                    return;
                }
                session.set(next);
            })
        };

        let on_clear = {
            let session = session.clone();
            Callback::from(move |_| {
                let mut next = (*session).clone();
                next.clear_all_filters();
                session.set(next);
            })
        };

        let chart = match resolve_view(
            &props.registry,
            &props.view_id,
            session.active_filters(),
            &props.config,
        ) {
            Ok(chart) => Some(chart),
            Err(err) => {
                console::warn_1(&JsValue::from_str(&err.to_string()));
                None
            }
        };

        html! {
            <div class="amu-view">
                <section class="filter-bar" aria-label="Filters">
                    <div class="filter-controls">
                        { render_select("Filter by", &props.catalog.list_types(), session.pending_type(), on_type_change) }
                        { render_select("Value", &props.catalog.list_values(session.pending_type()), session.pending_value(), on_value_change) }
                        <button type="button" onclick={on_add} disabled={!session.can_add()}>{"Add Filter"}</button>
                    </div>
                    { render_chips(session.clone()) }
                    {
                        if session.active_filters().is_empty() {
                            Html::default()
                        } else {
                            html! { <button type="button" class="filter-clear" onclick={on_clear}>{"Clear all"}</button> }
                        }
                    }
                </section>
                <section class="chart-panel" aria-live="polite">
                    {
                        match chart {
                            Some(chart) => render_chart(&chart),
                            None => html! { <p class="chart-empty">{"No data for the selected filters."}</p> },
                        }
                    }
                </section>
            </div>
        }
    }

    fn render_select(
        placeholder: &str,
        options: &[FilterOption],
        selected: &str,
        onchange: Callback<Event>,
    ) -> Html {
        html! {
            <select onchange={onchange} disabled={options.is_empty()} aria-label={placeholder.to_string()}>
                <option value="" selected={selected.is_empty()}>{ placeholder }</option>
                {
                    for options.iter().map(|option| html! {
                        <option value={option.value.clone()} selected={option.value == selected}>
                            { option.label.clone() }
                        </option>
                    })
                }
            </select>
        }
    }

    fn render_chips(session: UseStateHandle<FilterSession>) -> Html {
        html! {
            <ul class="filter-chips">
                {
                    for session.active_filters().iter().enumerate().map(|(index, filter)| {
                        let session = session.clone();
                        let onclick = Callback::from(move |_| {
                            let mut next = (*session).clone();
                            next.remove_filter(index);
                            session.set(next);
                        });
                        html! {
                            <li class="filter-chip">
                                <span>{ filter.label.clone() }</span>
                                <button type="button" onclick={onclick} aria-label={format!("Remove {}", filter.label)}>{"×"}</button>
                            </li>
                        }
                    })
                }
            </ul>
        }
    }

    fn render_chart(chart: &ChartData) -> Html {
        html! {
            <>
                <h3>{ chart.title.clone() }</h3>
                <table data-kind={format!("{:?}", chart.kind).to_lowercase()}>
                    <thead>
                        <tr>
                            <th></th>
                            { for chart.series.iter().map(|series| html! {
                                <th>
                                    { series.color.as_deref().map(render_swatch).unwrap_or_default() }
                                    { series.name.clone() }
                                </th>
                            }) }
                        </tr>
                    </thead>
                    <tbody>
                        { for chart.labels.iter().enumerate().map(|(index, label)| html! {
                            <tr>
                                <td>
                                    { chart.category_colors.get(index).map(|color| render_swatch(color)).unwrap_or_default() }
                                    { label.clone() }
                                </td>
                                { for chart.series.iter().map(|series| html! {
                                    <td>{ format_value(series.values.get(index).copied()) }</td>
                                }) }
                            </tr>
                        }) }
                    </tbody>
                </table>
            </>
        }
    }

    fn render_swatch(color: &str) -> Html {
        html! { <span class="chart-swatch" style={format!("background: {color}")}></span> }
    }

    fn format_value(value: Option<f64>) -> String {
        value
            .map(|value| format!("{value:.1}"))
            .unwrap_or_else(|| "--".to_string())
    }

    #[wasm_bindgen]
    pub fn mount_dashboard_view(
        selector: &str,
        view_id: &str,
        config: Option<JsValue>,
    ) -> Result<(), JsValue> {
        _ = console_log::init_with_level(log::Level::Debug);

        let window: Window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Cannot access document"))?;

        let target: Element = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("Invalid selector: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("No element matches selector"))?;

        let config: DashboardConfig = match config {
            Some(js_cfg) => from_value(js_cfg)?,
            None => DashboardConfig::default(),
        };

        yew::Renderer::<AmuView>::with_root_and_props(
            target,
            AmuViewProps {
                view_id: view_id.to_string(),
                catalog: FilterCatalog::ghana_amu(),
                registry: ViewRegistry::builtin(),
                config,
            },
        )
        .render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::mount_dashboard_view;

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_dashboard_view(
    _: &str,
    _: &str,
    _: Option<wasm_bindgen::JsValue>,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "amu-ui only supports the wasm32 target",
    ))
}
