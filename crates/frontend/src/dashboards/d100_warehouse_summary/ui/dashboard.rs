use contracts::dashboards::d100_warehouse_summary::DashboardData;
use js_sys::{Object, Reflect};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement};

use crate::dashboards::d100_warehouse_summary::chart_js::Chart;
use crate::dashboards::d100_warehouse_summary::charts::{
    plan_charts, ChartConfig, DashboardChart, TooltipText,
};
use crate::dashboards::d100_warehouse_summary::data::{load_dashboard_data, DashboardDataError};
use crate::shared::dom;

/// Точка входа дашборда: читает данные и строит графики.
///
/// Нет элемента с данными - это обычная страница без дашборда, тихо выходим.
/// Битый JSON - в лог, ни одного графика. Секция неверной формы пропускается
/// с предупреждением, остальные графики строятся.
pub fn init_dashboard() -> usize {
    match load_dashboard_data() {
        Ok(parsed) => {
            for skipped in &parsed.skipped {
                log::warn!("{}", skipped);
            }
            let created = render_dashboard(&parsed.data);
            log::info!("Dashboard charts created: {}", created);
            created
        }
        Err(DashboardDataError::MissingElement) => {
            log::debug!("{}", DashboardDataError::MissingElement);
            0
        }
        Err(err) => {
            log::error!("{}", err);
            0
        }
    }
}

/// Строит каждый график, для которого есть и данные, и canvas.
/// Возвращает количество созданных графиков.
pub fn render_dashboard(data: &DashboardData) -> usize {
    let Some(document) = dom::document() else {
        return 0;
    };

    let planned = plan_charts(data, |id| document.get_element_by_id(id).is_some());
    let mut created = 0;
    for (chart, config) in planned {
        match mount_chart(&document, chart, &config) {
            Ok(_) => created += 1,
            Err(err) => log::error!("Failed to render chart '{}': {:?}", chart.canvas_id(), err),
        }
    }
    created
}

fn mount_chart(
    document: &Document,
    chart: DashboardChart,
    config: &ChartConfig,
) -> Result<Chart, JsValue> {
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(chart.canvas_id())
        .ok_or_else(|| JsValue::from_str("Canvas not found"))?
        .dyn_into()?;

    let js_config = config
        .serialize(&Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    if let Some(tooltip) = &config.tooltip {
        attach_tooltip(&js_config, tooltip.clone())?;
    }

    Chart::new(&canvas, &js_config)
}

/// `options.plugins.tooltip.callbacks.<name> = function (context) {...}`
fn attach_tooltip(js_config: &JsValue, tooltip: TooltipText) -> Result<(), JsValue> {
    let options = Reflect::get(js_config, &JsValue::from_str("options"))?;
    let plugins = Reflect::get(&options, &JsValue::from_str("plugins"))?;

    let callback_name = tooltip.callback_name();
    let callback = Closure::<dyn Fn(JsValue) -> JsValue>::new(move |context: JsValue| {
        let label = Reflect::get(&context, &JsValue::from_str("label"))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default();
        let value = Reflect::get(&context, &JsValue::from_str("parsed"))
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let index = Reflect::get(&context, &JsValue::from_str("dataIndex"))
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as usize;
        JsValue::from_str(&tooltip.render(&label, value, index))
    });

    let callbacks = Object::new();
    Reflect::set(
        &callbacks,
        &JsValue::from_str(callback_name),
        &callback.into_js_value(),
    )?;
    let tooltip_options = Object::new();
    Reflect::set(&tooltip_options, &JsValue::from_str("callbacks"), &callbacks)?;
    Reflect::set(&plugins, &JsValue::from_str("tooltip"), &tooltip_options)?;
    Ok(())
}
