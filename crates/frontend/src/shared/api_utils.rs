//! API utilities for frontend-backend communication
//!
//! Сервер и API живут на одном origin: страница отрендерена тем же приложением,
//! которое отвечает на `/usuarios/api/...`.

use crate::shared::config::ui_config;

/// Get the base URL for API requests
///
/// # Returns
/// - Origin of the current page like "http://localhost:5000"
/// - Empty string if window is not available (relative URLs still work)
pub fn api_base() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/usuarios/api/roles");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// URL внутри модуля пользователей (`/usuarios` по умолчанию)
pub fn users_url(path: &str) -> String {
    api_url(&users_path(&ui_config().users_prefix, path))
}

/// Относительный путь модуля пользователей, без origin
pub fn users_path(prefix: &str, path: &str) -> String {
    format!("{}{}", prefix.trim_end_matches('/'), path)
}
