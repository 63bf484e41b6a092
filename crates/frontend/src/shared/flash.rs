//! Flash-сообщения: автоматическое и ручное закрытие.
//!
//! Сообщения рендерит сервер (`.flash.flash-<категория>` с кнопкой внутри),
//! клиент добавляет свои через [`show_flash`] / [`show_error`]. Любое
//! сообщение закрывается по таймеру или по кнопке через одну и ту же
//! последовательность: анимация исчезновения, затем удаление узла.

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::shared::config::ui_config;
use crate::shared::dom;

pub const FLASH_SELECTOR: &str = ".flash";
pub const FLASH_CONTAINER_CLASS: &str = "flash-container";
const PHASE_ATTR: &str = "data-flash-phase";

/// Категория сообщения (совпадает с категориями flash на сервере)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashSeverity {
    Success,
    Danger,
    Warning,
    Info,
}

impl FlashSeverity {
    pub fn css_class(&self) -> &'static str {
        match self {
            FlashSeverity::Success => "flash-success",
            FlashSeverity::Danger => "flash-danger",
            FlashSeverity::Warning => "flash-warning",
            FlashSeverity::Info => "flash-info",
        }
    }

    /// Категория flash сервера (`success`, `danger`, `warning`, `info`).
    /// Неизвестная категория показывается как `info`.
    pub fn from_category(category: &str) -> Self {
        match category.trim().to_ascii_lowercase().as_str() {
            "success" => FlashSeverity::Success,
            "danger" | "error" => FlashSeverity::Danger,
            "warning" => FlashSeverity::Warning,
            _ => FlashSeverity::Info,
        }
    }
}

/// CSS-анимация исчезновения той же длительности, что и задержка удаления
pub fn fade_animation(fade_ms: u32) -> String {
    format!("slideOut {}s ease", f64::from(fade_ms) / 1000.0)
}

/// Фаза жизни одного сообщения. Хранится в атрибуте узла, поэтому
/// повторное закрытие (таймер после кнопки) ничего не делает.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashPhase {
    Visible,
    FadingOut,
    Removed,
}

impl FlashPhase {
    pub fn as_attr(&self) -> &'static str {
        match self {
            FlashPhase::Visible => "visible",
            FlashPhase::FadingOut => "fading",
            FlashPhase::Removed => "removed",
        }
    }

    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("fading") => FlashPhase::FadingOut,
            Some("removed") => FlashPhase::Removed,
            _ => FlashPhase::Visible,
        }
    }

    /// Начать исчезновение. `None` - уже закрывается или удалено.
    pub fn begin_dismiss(self) -> Option<FlashPhase> {
        match self {
            FlashPhase::Visible => Some(FlashPhase::FadingOut),
            _ => None,
        }
    }

    /// Завершить исчезновение. `None` - удалять нечего.
    pub fn finish(self) -> Option<FlashPhase> {
        match self {
            FlashPhase::FadingOut => Some(FlashPhase::Removed),
            _ => None,
        }
    }
}

fn phase_of(element: &Element) -> FlashPhase {
    FlashPhase::from_attr(element.get_attribute(PHASE_ATTR).as_deref())
}

fn set_phase(element: &Element, phase: FlashPhase) {
    let _ = element.set_attribute(PHASE_ATTR, phase.as_attr());
}

/// Закрывает сообщение: анимация, затем удаление из DOM.
pub fn dismiss(element: Element) {
    let Some(next) = phase_of(&element).begin_dismiss() else {
        return;
    };
    set_phase(&element, next);

    let fade_ms = ui_config().flash_fade_ms;
    dom::set_style(&element, "animation", &fade_animation(fade_ms));
    spawn_local(async move {
        TimeoutFuture::new(fade_ms).await;
        remove_if_attached(&element);
    });
}

fn remove_if_attached(element: &Element) {
    let Some(next) = phase_of(element).finish() else {
        return;
    };
    set_phase(element, next);
    if element.parent_element().is_some() {
        element.remove();
    }
}

fn schedule_auto_dismiss(element: Element) {
    let timeout_ms = ui_config().flash_timeout_ms;
    spawn_local(async move {
        TimeoutFuture::new(timeout_ms).await;
        dismiss(element);
    });
}

fn wire_close_button(element: &Element) {
    let Ok(Some(button)) = element.query_selector("button") else {
        return;
    };
    // Серверная разметка может содержать inline onclick, который удаляет узел сразу
    button.remove_attribute("onclick").ok();
    let target = element.clone();
    dom::listen(&button, "click", move |_| dismiss(target.clone()));
}

/// Подключает все flash-сообщения, отрендеренные сервером.
pub fn init_flash_messages() -> usize {
    let messages = dom::query_all_in_document(FLASH_SELECTOR);
    for message in &messages {
        wire_close_button(message);
        schedule_auto_dismiss(message.clone());
    }
    if !messages.is_empty() {
        log::debug!("Flash messages scheduled: {}", messages.len());
    }
    messages.len()
}

fn flash_container() -> Result<Element, JsValue> {
    let document = dom::document().ok_or_else(|| JsValue::from_str("Document not available"))?;
    if let Some(container) = document.query_selector(&format!(".{}", FLASH_CONTAINER_CLASS))? {
        return Ok(container);
    }

    let container = document.create_element("div")?;
    container.set_class_name(FLASH_CONTAINER_CLASS);
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("Document body not available"))?;
    body.append_child(&container)?;
    Ok(container)
}

/// Показывает новое сообщение с тем же поведением, что и серверные.
pub fn show_flash(message: &str, severity: FlashSeverity) -> Result<Element, JsValue> {
    let document = dom::document().ok_or_else(|| JsValue::from_str("Document not available"))?;

    let flash = document.create_element("div")?;
    flash.set_class_name(&format!("flash {}", severity.css_class()));
    flash.append_child(&document.create_text_node(message))?;

    let button = document.create_element("button")?;
    button.set_attribute("type", "button")?;
    button.set_text_content(Some("\u{00d7}"));
    flash.append_child(&button)?;

    flash_container()?.append_child(&flash)?;

    wire_close_button(&flash);
    schedule_auto_dismiss(flash.clone());
    Ok(flash)
}

/// Временное сообщение об ошибке
pub fn show_error(message: &str) {
    if let Err(e) = show_flash(message, FlashSeverity::Danger) {
        log::error!("Failed to show error flash '{}': {:?}", message, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_close_then_timer() {
        // кнопка
        let phase = FlashPhase::Visible.begin_dismiss().unwrap();
        assert_eq!(phase, FlashPhase::FadingOut);
        // таймер 5 с сработал во время анимации
        assert_eq!(phase.begin_dismiss(), None);
        // удаление выполняется ровно один раз
        let removed = phase.finish().unwrap();
        assert_eq!(removed, FlashPhase::Removed);
        assert_eq!(removed.finish(), None);
        assert_eq!(removed.begin_dismiss(), None);
    }

    #[test]
    fn test_finish_without_dismiss_is_noop() {
        assert_eq!(FlashPhase::Visible.finish(), None);
    }

    #[test]
    fn test_unmarked_node_is_visible() {
        assert_eq!(FlashPhase::from_attr(None), FlashPhase::Visible);
        assert_eq!(FlashPhase::from_attr(Some("garbage")), FlashPhase::Visible);
    }

    #[test]
    fn test_severity_classes() {
        assert_eq!(FlashSeverity::Danger.css_class(), "flash-danger");
        assert_eq!(FlashSeverity::Success.css_class(), "flash-success");
    }

    #[test]
    fn test_severity_from_server_category() {
        assert_eq!(FlashSeverity::from_category("success"), FlashSeverity::Success);
        assert_eq!(FlashSeverity::from_category("Warning"), FlashSeverity::Warning);
        assert_eq!(FlashSeverity::from_category("danger"), FlashSeverity::Danger);
        assert_eq!(FlashSeverity::from_category("message"), FlashSeverity::Info);
    }

    #[test]
    fn test_fade_animation_follows_delay() {
        assert_eq!(fade_animation(300), "slideOut 0.3s ease");
        assert_eq!(fade_animation(1500), "slideOut 1.5s ease");
        assert_eq!(fade_animation(0), "slideOut 0s ease");
    }
}
