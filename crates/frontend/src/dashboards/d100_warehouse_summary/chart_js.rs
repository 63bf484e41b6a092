//! Привязка к глобальному `Chart` (Chart.js подключается шаблоном страницы).

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

#[wasm_bindgen]
extern "C" {
    /// Экземпляр графика Chart.js
    pub type Chart;

    /// `new Chart(canvas, config)`; ошибка, если Chart.js не загружен
    /// или конфигурация отвергнута
    #[wasm_bindgen(constructor, catch)]
    pub fn new(canvas: &HtmlCanvasElement, config: &JsValue) -> Result<Chart, JsValue>;
}
