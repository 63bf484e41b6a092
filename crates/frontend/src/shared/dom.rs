//! Мелкие помощники для работы с DOM серверных страниц.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement};

pub fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

/// Текущая ширина viewport в CSS-пикселях
pub fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

pub fn query(selector: &str) -> Option<Element> {
    document()?.query_selector(selector).ok().flatten()
}

pub fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_all_in_document(selector: &str) -> Vec<Element> {
    match document().and_then(|d| d.document_element()) {
        Some(root) => query_all(&root, selector),
        None => Vec::new(),
    }
}

pub fn input_by_id(id: &str) -> Option<HtmlInputElement> {
    document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlInputElement>()
        .ok()
}

/// Элемент, на котором произошло событие
pub fn event_target_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// Ближайший предок (или сам target), подходящий под селектор
pub fn closest_from_event(event: &Event, selector: &str) -> Option<Element> {
    event_target_element(event)?.closest(selector).ok().flatten()
}

pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(el) = element.dyn_ref::<HtmlElement>() {
        let _ = el.style().set_property(property, value);
    }
}

/// Вешает обработчик на всё время жизни страницы.
pub fn listen<F>(target: &EventTarget, event_name: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if let Err(e) = target.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
    {
        log::error!("Failed to add '{}' listener: {:?}", event_name, e);
    }
    closure.forget();
}

/// Обработчик на `document` (делегирование событий)
pub fn listen_document<F>(event_name: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    if let Some(document) = document() {
        listen(&document, event_name, handler);
    }
}

pub fn listen_window<F>(event_name: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    if let Some(window) = web_sys::window() {
        listen(&window, event_name, handler);
    }
}

/// Блокирующий alert браузера
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
