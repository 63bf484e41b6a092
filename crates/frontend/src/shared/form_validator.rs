//! Лёгкая клиентская проверка форм перед нативной отправкой.
//!
//! Сами функции отправку не блокируют: решение принимает вызывающий обработчик.

use once_cell::sync::Lazy;
use regex::Regex;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlFormElement, HtmlInputElement};

use crate::shared::dom;

pub const ERROR_BORDER_COLOR: &str = "#ef4444";
pub const DEFAULT_BORDER_COLOR: &str = "#e5e7eb";

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_CI_LEN: usize = 6;

pub const MSG_REQUIRED_FIELDS: &str = "Por favor completa todos los campos obligatorios";
pub const MSG_INVALID_EMAIL: &str = "Por favor ingresa un email válido";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Форма адреса: `x@y.z` без пробелов; домен глубже не проверяется
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

pub fn is_valid_ci(ci: &str) -> bool {
    ci.chars().count() >= MIN_CI_LEN
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Красная рамка для ошибочного поля, обычная - для корректного
pub fn mark_field(element: &Element, valid: bool) {
    let color = if valid {
        DEFAULT_BORDER_COLOR
    } else {
        ERROR_BORDER_COLOR
    };
    dom::set_style(element, "border-color", color);
}

/// Проверяет все `input[required]` формы и подсвечивает пустые.
pub fn validate_form(form: &HtmlFormElement) -> bool {
    let mut is_valid = true;
    for element in dom::query_all(form, "input[required]") {
        let Some(input) = element.dyn_ref::<HtmlInputElement>() else {
            continue;
        };
        let filled = !is_blank(&input.value());
        mark_field(&element, filled);
        is_valid &= filled;
    }
    is_valid
}
