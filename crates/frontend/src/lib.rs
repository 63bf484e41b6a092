pub mod app;
pub mod dashboards;
pub mod layout;
pub mod shared;
pub mod system;

use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    app::init();
}

/// Для inline-скриптов шаблонов: `wasm.showError("...")`
#[wasm_bindgen(js_name = showError)]
pub fn show_error(message: &str) {
    shared::flash::show_error(message);
}


/// `wasm.showFlash("Guardado", "success")`: категории как у flash сервера
#[wasm_bindgen(js_name = showFlash)]
pub fn show_flash(message: &str, category: &str) {
    let severity = shared::flash::FlashSeverity::from_category(category);
    if let Err(e) = shared::flash::show_flash(message, severity) {
        log::error!("Failed to show flash '{}': {:?}", message, e);
    }
}
