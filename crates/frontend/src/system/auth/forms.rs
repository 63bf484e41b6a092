//! Формы входа и регистрации (`.auth-form`).
//!
//! Формы отправляются нативно; здесь только проверка перед отправкой
//! и блокировка кнопки от повторного нажатия.

use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlButtonElement, HtmlFormElement};

use crate::shared::dom;
use crate::shared::flash::show_error;
use crate::shared::form_validator::{
    is_valid_ci, is_valid_email, is_valid_password, mark_field, MSG_INVALID_EMAIL,
};

pub const AUTH_FORM_SELECTOR: &str = ".auth-form";

pub const MSG_SHORT_PASSWORD: &str = "La contraseña debe tener al menos 6 caracteres";
pub const MSG_SHORT_CI: &str = "El CI debe tener al menos 6 dígitos";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPage {
    Login,
    Registration,
}

impl AuthPage {
    /// Страница определяется по пути URL
    pub fn from_path(path: &str) -> Option<Self> {
        if path.contains("login") {
            Some(AuthPage::Login)
        } else if path.contains("registro") {
            Some(AuthPage::Registration)
        } else {
            None
        }
    }

    /// Подпись кнопки во время отправки
    pub fn busy_label(&self) -> &'static str {
        match self {
            AuthPage::Login => "Ingresando...",
            AuthPage::Registration => "Registrando...",
        }
    }
}

/// Первое невалидное поле формы
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field_id: &'static str,
    pub message: &'static str,
}

/// Вход: сначала email, потом пароль. Отсутствующее поле не проверяется.
pub fn check_login(email: Option<&str>, password: Option<&str>) -> Result<(), FieldError> {
    if let Some(email) = email {
        if !is_valid_email(email) {
            return Err(FieldError {
                field_id: "email",
                message: MSG_INVALID_EMAIL,
            });
        }
    }
    if let Some(password) = password {
        if !is_valid_password(password) {
            return Err(FieldError {
                field_id: "password",
                message: MSG_SHORT_PASSWORD,
            });
        }
    }
    Ok(())
}

/// Регистрация: сначала пароль, потом CI
pub fn check_registration(password: Option<&str>, ci: Option<&str>) -> Result<(), FieldError> {
    if let Some(password) = password {
        if !is_valid_password(password) {
            return Err(FieldError {
                field_id: "password",
                message: MSG_SHORT_PASSWORD,
            });
        }
    }
    if let Some(ci) = ci {
        if !is_valid_ci(ci) {
            return Err(FieldError {
                field_id: "ci",
                message: MSG_SHORT_CI,
            });
        }
    }
    Ok(())
}

fn field_value(id: &str) -> Option<String> {
    dom::input_by_id(id).map(|input| input.value())
}

fn handle_submit(page: AuthPage, form: &HtmlFormElement, event: &Event) {
    let result = match page {
        AuthPage::Login => check_login(
            field_value("email").as_deref(),
            field_value("password").as_deref(),
        ),
        AuthPage::Registration => check_registration(
            field_value("password").as_deref(),
            field_value("ci").as_deref(),
        ),
    };

    match result {
        Err(err) => {
            event.prevent_default();
            if let Some(input) = dom::input_by_id(err.field_id) {
                mark_field(&input, false);
            }
            show_error(err.message);
        }
        Ok(()) => {
            if let Some(button) = submit_button(form) {
                button.set_inner_html(page.busy_label());
                button.set_disabled(true);
            }
        }
    }
}

fn submit_button(form: &HtmlFormElement) -> Option<HtmlButtonElement> {
    form.query_selector("button[type=\"submit\"]")
        .ok()
        .flatten()?
        .dyn_into::<HtmlButtonElement>()
        .ok()
}

/// Подключает проверку к форме входа или регистрации на текущей странице
pub fn init_auth_forms() {
    let Some(form) = dom::query(AUTH_FORM_SELECTOR).and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    else {
        return;
    };
    let path = web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default();
    let Some(page) = AuthPage::from_path(&path) else {
        return;
    };

    let target = form.clone();
    dom::listen(&form, "submit", move |event| handle_submit(page, &target, &event));
    log::debug!("Auth form validation attached: {:?}", page);
}

const ORIGINAL_TEXT_ATTR: &str = "data-original-text";
const FOCUSED_CLASS: &str = "focused";

/// Состояние «Procesando...» для кнопки и возврат исходной подписи
pub fn set_loading(button: &HtmlButtonElement, loading: bool) {
    if loading {
        if button.get_attribute(ORIGINAL_TEXT_ATTR).is_none() {
            let _ = button.set_attribute(ORIGINAL_TEXT_ATTR, &button.inner_html());
        }
        button.set_inner_html("<div class=\"loading-spinner\"></div> Procesando...");
        button.set_disabled(true);
    } else {
        let original = button
            .get_attribute(ORIGINAL_TEXT_ATTR)
            .unwrap_or_else(|| "Enviar".to_string());
        button.set_inner_html(&original);
        button.set_disabled(false);
    }
}

/// Поля, родитель которых подсвечивается при фокусе
pub fn is_focus_tracked(tag_name: &str) -> bool {
    matches!(
        tag_name.to_ascii_lowercase().as_str(),
        "input" | "select" | "textarea"
    )
}

fn set_parent_focused(event: &Event, focused: bool) {
    let Some(target) = dom::event_target_element(event) else {
        return;
    };
    if !is_focus_tracked(&target.tag_name()) {
        return;
    }
    if let Some(parent) = target.parent_element() {
        let classes = parent.class_list();
        let _ = if focused {
            classes.add_1(FOCUSED_CLASS)
        } else {
            classes.remove_1(FOCUSED_CLASS)
        };
    }
}

/// Запоминает исходные подписи кнопок и подсвечивает родителя поля с фокусом.
///
/// Фокус отслеживается делегированно (`focusin`/`focusout` на document),
/// поэтому поля, смонтированные позже, тоже подсвечиваются.
pub fn init_focus_tracking() {
    for element in dom::query_all_in_document("button") {
        if element.get_attribute(ORIGINAL_TEXT_ATTR).is_none() {
            let _ = element.set_attribute(ORIGINAL_TEXT_ATTR, &element.inner_html());
        }
    }

    dom::listen_document("focusin", |event| set_parent_focused(&event, true));
    dom::listen_document("focusout", |event| set_parent_focused(&event, false));
}
