//! Настройки UI.
//!
//! Значения по умолчанию совпадают с вёрсткой сервера. Шаблон может
//! переопределить любое поле через
//! `<script id="ui-config" type="application/json">{...}</script>`.

use once_cell::sync::OnceCell;
use serde::Deserialize;

pub const UI_CONFIG_ELEMENT_ID: &str = "ui-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Ширина viewport (px), до которой включительно раскладка считается мобильной
    pub mobile_breakpoint_px: f64,
    /// Ширина открытого сайдбара (px)
    pub sidebar_width_px: f64,
    /// Через сколько flash-сообщение закрывается само
    pub flash_timeout_ms: u32,
    /// Длительность анимации исчезновения
    pub flash_fade_ms: u32,
    /// Префикс модуля пользователей
    pub users_prefix: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint_px: 768.0,
            sidebar_width_px: 280.0,
            flash_timeout_ms: 5000,
            flash_fade_ms: 300,
            users_prefix: "/usuarios".to_string(),
        }
    }
}

impl UiConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid UI config: {}", e))
    }
}

static CONFIG: OnceCell<UiConfig> = OnceCell::new();

/// Текущая конфигурация (default, если `init_config` не вызывался)
pub fn ui_config() -> &'static UiConfig {
    CONFIG.get_or_init(UiConfig::default)
}

/// Устанавливает конфигурацию один раз при старте
pub fn init_config(config: UiConfig) {
    if CONFIG.set(config).is_err() {
        log::warn!("UI config already initialized, keeping the first one");
    }
}

/// Читает переопределения из документа.
///
/// Нет элемента - defaults; битый JSON - defaults и запись в лог.
pub fn load_from_document() -> UiConfig {
    let text = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(UI_CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    match text {
        Some(json) => UiConfig::from_json(&json).unwrap_or_else(|e| {
            log::error!("{}", e);
            UiConfig::default()
        }),
        None => UiConfig::default(),
    }
}
