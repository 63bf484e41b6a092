//! Запуск поведения страницы.
//!
//! Сервер уже отрендерил HTML; каждый модуль сам проверяет, есть ли на
//! странице его элементы, и молча пропускает чужие страницы.

use crate::dashboards::init_dashboard;
use crate::layout::init_layout;
use crate::shared::config::{init_config, load_from_document};
use crate::shared::flash::init_flash_messages;
use crate::shared::styles::inject_runtime_styles;
use crate::system::auth::{init_auth_forms, init_focus_tracking};
use crate::system::users::mount_users_page;

pub fn init() {
    init_config(load_from_document());

    if let Err(e) = inject_runtime_styles() {
        log::error!("Failed to inject runtime styles: {:?}", e);
    }

    init_layout();
    let flashes = init_flash_messages();

    init_auth_forms();

    let charts = init_dashboard();
    let users = mount_users_page();
    // После монтирования: кнопки модальных окон уже в DOM
    init_focus_tracking();

    log::info!(
        "Page initialized (flash: {}, charts: {}, users modals: {})",
        flashes,
        charts,
        users
    );
}
