//! Вкладки серверных страниц (`.tab-btn[data-tab]` → `#tab-<имя>`).

use web_sys::Event;

use crate::shared::dom;

pub const TAB_BUTTON_SELECTOR: &str = ".tab-btn";
pub const TAB_CONTENT_SELECTOR: &str = ".tab-content";
pub const ACTIVE_CLASS: &str = "active";

pub fn tab_content_id(tab: &str) -> String {
    format!("tab-{}", tab)
}

/// Активирует вкладку, по кнопке которой кликнули.
/// Событие передаётся явно; клик не по вкладке игнорируется.
pub fn switch_tab(event: &Event) {
    let Some(button) = dom::closest_from_event(event, TAB_BUTTON_SELECTOR) else {
        return;
    };
    let Some(tab) = button.get_attribute("data-tab") else {
        log::warn!("Tab button without data-tab attribute");
        return;
    };

    for element in dom::query_all_in_document(TAB_BUTTON_SELECTOR)
        .into_iter()
        .chain(dom::query_all_in_document(TAB_CONTENT_SELECTOR))
    {
        let _ = element.class_list().remove_1(ACTIVE_CLASS);
    }

    let _ = button.class_list().add_1(ACTIVE_CLASS);
    match dom::document().and_then(|d| d.get_element_by_id(&tab_content_id(&tab))) {
        Some(content) => {
            let _ = content.class_list().add_1(ACTIVE_CLASS);
        }
        None => log::warn!("Tab content '{}' not found", tab_content_id(&tab)),
    }
}

pub fn init_tabs() {
    if dom::query(TAB_BUTTON_SELECTOR).is_none() {
        return;
    }
    dom::listen_document("click", |event| switch_tab(&event));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_content_id() {
        assert_eq!(tab_content_id("empleados"), "tab-empleados");
    }
}
