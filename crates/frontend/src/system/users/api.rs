use contracts::system::users::{Role, UserRecord};
use gloo_net::http::Request;
use web_sys::AbortSignal;

use crate::shared::api_utils::users_url;

/// Fetch the role catalog
pub async fn fetch_roles() -> Result<Vec<Role>, String> {
    let response = Request::get(&users_url("/api/roles"))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to fetch roles: {}", response.status()));
    }

    response
        .json::<Vec<Role>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Fetch one user record for editing
///
/// `signal` прерывает запрос, когда модальное окно закрыли или открыли заново.
pub async fn fetch_user(id: i64, signal: Option<&AbortSignal>) -> Result<UserRecord, String> {
    let response = Request::get(&users_url(&format!("/api/usuario/{}", id)))
        .abort_signal(signal)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to fetch user {}: {}", id, response.status()));
    }

    response
        .json::<UserRecord>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
