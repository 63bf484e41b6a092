//! Стили, которые нужны только клиентскому коду (анимация flash, спиннер,
//! подсветка фокуса, кнопка меню на мобильных). Вставляются в `<head>` при старте.

use wasm_bindgen::JsValue;

use crate::shared::dom;

const STYLE_ELEMENT_ID: &str = "almacen-runtime-styles";

pub const RUNTIME_STYLES: &str = r#"
@keyframes slideOut {
    from {
        transform: translateX(0);
        opacity: 1;
    }
    to {
        transform: translateX(100%);
        opacity: 0;
    }
}

.loading-spinner {
    display: inline-block;
    width: 16px;
    height: 16px;
    border: 2px solid #ffffff;
    border-radius: 50%;
    border-top-color: transparent;
    animation: spin 1s ease-in-out infinite;
    margin-right: 8px;
}

@keyframes spin {
    to { transform: rotate(360deg); }
}

.form-group.focused label {
    color: #7c3aed;
}

.form-group.focused .form-control {
    border-color: #7c3aed;
    box-shadow: 0 0 0 3px rgba(124, 58, 237, 0.1);
}

@media (max-width: 768px) {
    .menu-toggle {
        display: block;
        position: fixed;
        top: 15px;
        left: 15px;
        z-index: 1000;
        background: #7c3aed;
        color: white;
        border: none;
        border-radius: 5px;
        padding: 10px;
        cursor: pointer;
    }
}
"#;

/// Вставляет стили один раз (повторный вызов ничего не делает)
pub fn inject_runtime_styles() -> Result<(), JsValue> {
    let document = dom::document().ok_or_else(|| JsValue::from_str("Document not available"))?;
    if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return Ok(());
    }
    let style = document.create_element("style")?;
    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(RUNTIME_STYLES));
    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document head not available"))?;
    head.append_child(&style)?;
    Ok(())
}
