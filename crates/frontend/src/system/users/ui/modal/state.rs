use contracts::system::users::{Role, UserRecord};
use std::collections::BTreeSet;

use crate::shared::api_utils::users_path;
use crate::shared::date_utils::normalize_date_input;

pub const DEFAULT_CLIENT_TYPE: &str = "Minorista";
pub const DEFAULT_CLIENT_CATEGORY: &str = "Básico";
pub const CLIENT_TYPES: &[&str] = &["Minorista", "Mayorista"];
pub const CLIENT_CATEGORIES: &[&str] = &["Básico", "Regular", "Premium"];

/// Вид пользователя: от него зависят поля, заголовки и адреса формы
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserKind {
    Employee,
    Client,
}

impl UserKind {
    pub fn modal_id(&self) -> &'static str {
        match self {
            UserKind::Employee => "modalEmpleado",
            UserKind::Client => "modalCliente",
        }
    }

    pub fn form_id(&self) -> &'static str {
        match self {
            UserKind::Employee => "formEmpleado",
            UserKind::Client => "formCliente",
        }
    }

    pub fn title_id(&self) -> &'static str {
        match self {
            UserKind::Employee => "tituloModalEmpleado",
            UserKind::Client => "tituloModalCliente",
        }
    }

    pub fn create_title(&self) -> &'static str {
        match self {
            UserKind::Employee => "Nuevo Empleado",
            UserKind::Client => "Nuevo Cliente",
        }
    }

    pub fn edit_title(&self) -> &'static str {
        match self {
            UserKind::Employee => "Editar Empleado",
            UserKind::Client => "Editar Cliente",
        }
    }

    fn slug(&self) -> &'static str {
        match self {
            UserKind::Employee => "empleado",
            UserKind::Client => "cliente",
        }
    }

    pub fn create_path(&self) -> String {
        format!("/crear-{}", self.slug())
    }

    pub fn edit_path(&self, id: i64) -> String {
        format!("/editar-{}/{}", self.slug(), id)
    }

    pub fn load_error_message(&self) -> &'static str {
        match self {
            UserKind::Employee => "Error al cargar los datos del empleado",
            UserKind::Client => "Error al cargar los datos del cliente",
        }
    }
}

/// Состояние модального окна
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Closed,
    /// Окно ещё закрыто, ждём запись с сервера
    Loading { id: i64, ticket: u64 },
    Create,
    Edit { id: i64 },
}

/// Поля формы пользователя (значения как в полях ввода)
#[derive(Debug, Clone, PartialEq)]
pub struct UserForm {
    pub nombre: String,
    pub apellido_paterno: String,
    pub apellido_materno: String,
    pub ci: String,
    pub email: String,
    pub fecha_nacimiento: String,
    pub password: String,
    pub tipo_cliente: String,
    pub categoria_cliente: String,
    pub empresa: String,
    pub limite_credito: String,
    pub observaciones: String,
    /// Отмеченные роли (id)
    pub roles: BTreeSet<i64>,
    /// Имена ролей из записи, пришедшей раньше каталога ролей
    pub pending_role_names: Vec<String>,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            nombre: String::new(),
            apellido_paterno: String::new(),
            apellido_materno: String::new(),
            ci: String::new(),
            email: String::new(),
            fecha_nacimiento: String::new(),
            password: String::new(),
            tipo_cliente: DEFAULT_CLIENT_TYPE.to_string(),
            categoria_cliente: DEFAULT_CLIENT_CATEGORY.to_string(),
            empresa: String::new(),
            limite_credito: "0".to_string(),
            observaciones: String::new(),
            roles: BTreeSet::new(),
            pending_role_names: Vec::new(),
        }
    }
}

impl UserForm {
    /// Заполнение из записи сервера; пустые необязательные поля - "" или 0
    pub fn from_record(kind: UserKind, record: &UserRecord, catalog: &[Role]) -> Self {
        let mut form = UserForm {
            nombre: record.nombre.clone(),
            apellido_paterno: record.apellido_paterno.clone(),
            apellido_materno: record.apellido_materno.clone().unwrap_or_default(),
            ci: record.ci.clone().unwrap_or_default(),
            email: record.email.clone(),
            fecha_nacimiento: record
                .fecha_nacimiento
                .as_deref()
                .map(normalize_date_input)
                .unwrap_or_default(),
            ..UserForm::default()
        };

        match kind {
            UserKind::Employee => {
                let names = role_names(record);
                if record.roles.is_none() && catalog.is_empty() && !names.is_empty() {
                    form.pending_role_names = names;
                } else {
                    form.roles = roles_for_record(record, catalog);
                }
            }
            UserKind::Client => {
                form.tipo_cliente = record
                    .tipo_cliente
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CLIENT_TYPE.to_string());
                form.categoria_cliente = record
                    .categoria_cliente
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CLIENT_CATEGORY.to_string());
                form.empresa = record.empresa.clone().unwrap_or_default();
                form.limite_credito = record
                    .limite_credito
                    .clone()
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| "0".to_string());
                form.observaciones = record.observaciones.clone().unwrap_or_default();
            }
        }
        form
    }

    /// Отмечает роли, отложенные до загрузки каталога. `true` - что-то изменилось.
    pub fn resolve_pending_roles(&mut self, catalog: &[Role]) -> bool {
        if self.pending_role_names.is_empty() || catalog.is_empty() {
            return false;
        }
        let names = std::mem::take(&mut self.pending_role_names);
        self.roles = match_role_names(&names, catalog);
        true
    }

    pub fn set_role(&mut self, id: i64, checked: bool) {
        if checked {
            self.roles.insert(id);
        } else {
            self.roles.remove(&id);
        }
    }
}

/// Роли сотрудника для отметки чекбоксов.
///
/// Явный список id предпочтительнее; если сервер его не прислал, имена из
/// `roles_string` (через запятую) сравниваются с каталогом целиком, а не
/// вхождением подстроки.
pub fn roles_for_record(record: &UserRecord, catalog: &[Role]) -> BTreeSet<i64> {
    if let Some(ids) = &record.roles {
        return ids.iter().copied().collect();
    }

    match_role_names(&role_names(record), catalog)
}

/// Имена ролей из `roles_string` (через запятую)
fn role_names(record: &UserRecord) -> Vec<String> {
    record
        .roles_string
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn match_role_names(names: &[String], catalog: &[Role]) -> BTreeSet<i64> {
    catalog
        .iter()
        .filter(|role| names.iter().any(|name| name.eq_ignore_ascii_case(&role.nombre_rol)))
        .map(|role| role.id_rol)
        .collect()
}

/// Поле формы: имя в HTML и доступ к значению
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Nombre,
    ApellidoPaterno,
    ApellidoMaterno,
    Ci,
    Email,
    FechaNacimiento,
    Password,
    TipoCliente,
    CategoriaCliente,
    Empresa,
    LimiteCredito,
    Observaciones,
}

impl UserField {
    pub fn name(&self) -> &'static str {
        match self {
            UserField::Nombre => "nombre",
            UserField::ApellidoPaterno => "apellido_paterno",
            UserField::ApellidoMaterno => "apellido_materno",
            UserField::Ci => "ci",
            UserField::Email => "email",
            UserField::FechaNacimiento => "fecha_nacimiento",
            UserField::Password => "password",
            UserField::TipoCliente => "tipo_cliente",
            UserField::CategoriaCliente => "categoria_cliente",
            UserField::Empresa => "empresa",
            UserField::LimiteCredito => "limite_credito",
            UserField::Observaciones => "observaciones",
        }
    }

    pub fn get<'a>(&self, form: &'a UserForm) -> &'a str {
        match self {
            UserField::Nombre => &form.nombre,
            UserField::ApellidoPaterno => &form.apellido_paterno,
            UserField::ApellidoMaterno => &form.apellido_materno,
            UserField::Ci => &form.ci,
            UserField::Email => &form.email,
            UserField::FechaNacimiento => &form.fecha_nacimiento,
            UserField::Password => &form.password,
            UserField::TipoCliente => &form.tipo_cliente,
            UserField::CategoriaCliente => &form.categoria_cliente,
            UserField::Empresa => &form.empresa,
            UserField::LimiteCredito => &form.limite_credito,
            UserField::Observaciones => &form.observaciones,
        }
    }

    pub fn set(&self, form: &mut UserForm, value: String) {
        let slot = match self {
            UserField::Nombre => &mut form.nombre,
            UserField::ApellidoPaterno => &mut form.apellido_paterno,
            UserField::ApellidoMaterno => &mut form.apellido_materno,
            UserField::Ci => &mut form.ci,
            UserField::Email => &mut form.email,
            UserField::FechaNacimiento => &mut form.fecha_nacimiento,
            UserField::Password => &mut form.password,
            UserField::TipoCliente => &mut form.tipo_cliente,
            UserField::CategoriaCliente => &mut form.categoria_cliente,
            UserField::Empresa => &mut form.empresa,
            UserField::LimiteCredito => &mut form.limite_credito,
            UserField::Observaciones => &mut form.observaciones,
        };
        *slot = value;
    }
}

/// Модель модального окна одного вида пользователя.
///
/// ```text
/// Closed -> Create -> Closed
/// Closed -> Loading(id) -> Edit(id) -> Closed
///                  \-> Closed (ошибка загрузки)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ModalFormState {
    pub kind: UserKind,
    pub mode: ModalMode,
    pub form: UserForm,
    next_ticket: u64,
}

impl ModalFormState {
    pub fn new(kind: UserKind) -> Self {
        Self {
            kind,
            mode: ModalMode::Closed,
            form: UserForm::default(),
            next_ticket: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.mode, ModalMode::Create | ModalMode::Edit { .. })
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, ModalMode::Edit { .. })
    }

    /// Новый пользователь: всё сбрасывается
    pub fn open_create(&mut self) {
        self.form = UserForm::default();
        self.mode = ModalMode::Create;
    }

    /// Начало редактирования: окно остаётся закрытым до ответа сервера.
    /// Возвращает билет, которым должен быть помечен ответ.
    pub fn begin_edit(&mut self, id: i64) -> u64 {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.form = UserForm::default();
        self.mode = ModalMode::Loading { id, ticket };
        ticket
    }

    fn pending_ticket(&self, ticket: u64) -> Option<i64> {
        match self.mode {
            ModalMode::Loading { id, ticket: current } if current == ticket => Some(id),
            _ => None,
        }
    }

    /// Ответ сервера. `false` - ответ устарел (окно закрыли или открыли заново).
    pub fn complete_edit(&mut self, ticket: u64, record: &UserRecord, catalog: &[Role]) -> bool {
        let Some(id) = self.pending_ticket(ticket) else {
            return false;
        };
        self.form = UserForm::from_record(self.kind, record, catalog);
        self.mode = ModalMode::Edit { id };
        true
    }

    /// Ошибка загрузки. `true` - ошибка актуальна и её надо показать.
    pub fn fail_edit(&mut self, ticket: u64) -> bool {
        if self.pending_ticket(ticket).is_none() {
            return false;
        }
        self.mode = ModalMode::Closed;
        true
    }

    pub fn close(&mut self) {
        self.mode = ModalMode::Closed;
    }

    /// Каталог ролей загрузился: отмечаем роли уже открытой записи
    pub fn roles_loaded(&mut self, catalog: &[Role]) -> bool {
        self.is_editing() && self.form.resolve_pending_roles(catalog)
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            self.kind.edit_title()
        } else {
            self.kind.create_title()
        }
    }

    /// Куда отправляется форма
    pub fn action(&self, prefix: &str) -> String {
        let path = match self.mode {
            ModalMode::Edit { id } => self.kind.edit_path(id),
            _ => self.kind.create_path(),
        };
        users_path(prefix, &path)
    }

    /// CI неизменяем после создания
    pub fn ci_disabled(&self) -> bool {
        self.is_editing()
    }

    /// Пароль вводится только при создании
    pub fn password_visible(&self) -> bool {
        !self.is_editing()
    }

    pub fn password_required(&self) -> bool {
        self.password_visible()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Role> {
        vec![
            Role {
                id_rol: 1,
                nombre_rol: "Administrador".into(),
            },
            Role {
                id_rol: 2,
                nombre_rol: "Almacenero".into(),
            },
            Role {
                id_rol: 3,
                nombre_rol: "Admin".into(),
            },
        ]
    }

    fn employee_record() -> UserRecord {
        UserRecord {
            nombre: "Ana".into(),
            apellido_paterno: "Rojas".into(),
            ci: Some("1234567".into()),
            email: "ana@almacen.bo".into(),
            fecha_nacimiento: Some("Thu, 15 Mar 1990 00:00:00 GMT".into()),
            roles_string: Some("Administrador, Almacenero".into()),
            ..UserRecord::default()
        }
    }

    #[test]
    fn test_open_create() {
        let mut state = ModalFormState::new(UserKind::Employee);
        state.open_create();
        assert!(state.is_open());
        assert_eq!(state.title(), "Nuevo Empleado");
        assert_eq!(state.action("/usuarios"), "/usuarios/crear-empleado");
        assert!(!state.ci_disabled());
        assert!(state.password_visible());
        assert!(state.password_required());
        assert!(state.form.roles.is_empty());
    }

    #[test]
    fn test_edit_flow() {
        let mut state = ModalFormState::new(UserKind::Employee);
        let ticket = state.begin_edit(7);
        assert!(!state.is_open());

        assert!(state.complete_edit(ticket, &employee_record(), &catalog()));
        assert!(state.is_open());
        assert_eq!(state.mode, ModalMode::Edit { id: 7 });
        assert_eq!(state.title(), "Editar Empleado");
        assert_eq!(state.action("/usuarios"), "/usuarios/editar-empleado/7");
        assert!(state.ci_disabled());
        assert!(!state.password_visible());
        assert!(!state.password_required());
        assert_eq!(state.form.nombre, "Ana");
        assert_eq!(state.form.apellido_materno, "");
        assert_eq!(state.form.fecha_nacimiento, "1990-03-15");
        assert_eq!(state.form.roles, BTreeSet::from([1, 2]));
    }

    #[test]
    fn test_create_after_edit_resets_form() {
        let mut state = ModalFormState::new(UserKind::Employee);
        let ticket = state.begin_edit(7);
        state.complete_edit(ticket, &employee_record(), &catalog());
        state.close();

        state.open_create();
        assert!(!state.ci_disabled());
        assert!(state.password_visible());
        assert!(state.password_required());
        assert_eq!(state.form, UserForm::default());
        assert_eq!(state.action("/usuarios"), "/usuarios/crear-empleado");
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = ModalFormState::new(UserKind::Client);
        let first = state.begin_edit(1);
        let second = state.begin_edit(2);

        assert!(!state.complete_edit(first, &employee_record(), &[]));
        assert_eq!(state.mode, ModalMode::Loading { id: 2, ticket: second });
        assert!(state.complete_edit(second, &employee_record(), &[]));
        assert_eq!(state.mode, ModalMode::Edit { id: 2 });
    }

    #[test]
    fn test_close_before_response() {
        let mut state = ModalFormState::new(UserKind::Client);
        let ticket = state.begin_edit(3);
        state.close();
        assert!(!state.complete_edit(ticket, &employee_record(), &[]));
        assert!(!state.fail_edit(ticket));
        assert_eq!(state.mode, ModalMode::Closed);
    }

    #[test]
    fn test_create_while_loading_wins() {
        let mut state = ModalFormState::new(UserKind::Client);
        let ticket = state.begin_edit(3);
        state.open_create();
        assert!(!state.complete_edit(ticket, &employee_record(), &[]));
        assert_eq!(state.mode, ModalMode::Create);
    }

    #[test]
    fn test_failed_load_keeps_modal_closed() {
        let mut state = ModalFormState::new(UserKind::Employee);
        let ticket = state.begin_edit(9);
        assert!(state.fail_edit(ticket));
        assert!(!state.is_open());
        assert!(!state.fail_edit(ticket));
    }

    #[test]
    fn test_client_record_defaults() {
        let record = UserRecord {
            nombre: "Luis".into(),
            apellido_paterno: "Paz".into(),
            email: "luis@empresa.bo".into(),
            ..UserRecord::default()
        };
        let form = UserForm::from_record(UserKind::Client, &record, &[]);
        assert_eq!(form.tipo_cliente, DEFAULT_CLIENT_TYPE);
        assert_eq!(form.categoria_cliente, DEFAULT_CLIENT_CATEGORY);
        assert_eq!(form.empresa, "");
        assert_eq!(form.limite_credito, "0");
        assert_eq!(form.observaciones, "");
        assert_eq!(form.ci, "");
    }

    #[test]
    fn test_client_record_values() {
        let record = UserRecord {
            tipo_cliente: Some("Mayorista".into()),
            categoria_cliente: Some("Premium".into()),
            empresa: Some("Distribuidora Sur".into()),
            limite_credito: Some("1500.00".into()),
            observaciones: Some("Paga a 30 días".into()),
            ..UserRecord::default()
        };
        let mut state = ModalFormState::new(UserKind::Client);
        let ticket = state.begin_edit(12);
        state.complete_edit(ticket, &record, &[]);
        assert_eq!(state.action("/usuarios"), "/usuarios/editar-cliente/12");
        assert_eq!(state.title(), "Editar Cliente");
        assert_eq!(state.form.tipo_cliente, "Mayorista");
        assert_eq!(state.form.limite_credito, "1500.00");
        assert_eq!(state.form.empresa, "Distribuidora Sur");
        assert!(state.form.roles.is_empty());
    }

    #[test]
    fn test_roles_prefer_explicit_ids() {
        let record = UserRecord {
            roles: Some(vec![3]),
            roles_string: Some("Administrador".into()),
            ..UserRecord::default()
        };
        assert_eq!(roles_for_record(&record, &catalog()), BTreeSet::from([3]));
    }

    #[test]
    fn test_roles_match_whole_names() {
        // "Admin" не должен отмечаться из-за вхождения в "Administrador"
        let record = UserRecord {
            roles_string: Some("Administrador".into()),
            ..UserRecord::default()
        };
        assert_eq!(roles_for_record(&record, &catalog()), BTreeSet::from([1]));
        assert!(roles_for_record(&UserRecord::default(), &catalog()).is_empty());
    }

    #[test]
    fn test_field_access() {
        let mut form = UserForm::default();
        UserField::Email.set(&mut form, "x@y.z".into());
        assert_eq!(UserField::Email.get(&form), "x@y.z");
        assert_eq!(UserField::LimiteCredito.get(&form), "0");
        assert_eq!(UserField::ApellidoPaterno.name(), "apellido_paterno");
    }

    #[test]
    fn test_set_role() {
        let mut form = UserForm::default();
        form.set_role(2, true);
        form.set_role(5, true);
        form.set_role(2, false);
        assert_eq!(form.roles, BTreeSet::from([5]));
    }

    #[test]
    fn test_roles_resolved_when_catalog_arrives_late() {
        let mut state = ModalFormState::new(UserKind::Employee);
        let ticket = state.begin_edit(7);
        assert!(state.complete_edit(ticket, &employee_record(), &[]));
        assert!(state.form.roles.is_empty());

        assert!(state.roles_loaded(&catalog()));
        assert_eq!(state.form.roles, BTreeSet::from([1, 2]));
        assert!(state.form.pending_role_names.is_empty());
        // повторная загрузка ничего не меняет
        assert!(!state.roles_loaded(&catalog()));
    }

    #[test]
    fn test_late_catalog_ignored_for_create() {
        let mut state = ModalFormState::new(UserKind::Employee);
        state.open_create();
        assert!(!state.roles_loaded(&catalog()));
        assert!(state.form.roles.is_empty());
    }
}
