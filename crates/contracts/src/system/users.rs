use serde::{Deserialize, Deserializer, Serialize};

/// Роль сотрудника (`GET /usuarios/api/roles`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id_rol: i64,
    pub nombre_rol: String,
}

/// Запись пользователя (`GET /usuarios/api/usuario/:id`).
///
/// Одна и та же форма ответа для сотрудников и клиентов: клиентские поля
/// приходят только для клиентов, роли только для сотрудников.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub id_persona: Option<i64>,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellido_paterno: String,
    #[serde(default)]
    pub apellido_materno: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub ci: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub fecha_nacimiento: Option<String>,

    // Клиент
    #[serde(default)]
    pub tipo_cliente: Option<String>,
    #[serde(default)]
    pub categoria_cliente: Option<String>,
    #[serde(default)]
    pub empresa: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub limite_credito: Option<String>,
    #[serde(default)]
    pub observaciones: Option<String>,

    // Сотрудник
    /// Имена ролей через запятую (GROUP_CONCAT на стороне сервера)
    #[serde(default)]
    pub roles_string: Option<String>,
    /// Явный список id ролей, если сервер его отдаёт
    #[serde(default)]
    pub roles: Option<Vec<i64>>,
}

/// Числовые поля (CI, лимит кредита) сервер может отдать и числом, и строкой
/// (Decimal из MySQL сериализуется строкой).
fn number_or_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(serde_json::Number),
        Text(String),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Number(n) => n.to_string(),
        Raw::Text(s) => s,
    }))
}
