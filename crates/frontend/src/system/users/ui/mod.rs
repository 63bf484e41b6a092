pub mod modal;

use contracts::system::users::Role;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::shared::dom;
use crate::system::users::api;
use modal::{UserKind, UserModal, UserModalController};

/// Точка монтирования модальных окон на странице пользователей
pub const MOUNT_POINT_ID: &str = "usuarios-modals";

const ACTION_ATTR: &str = "data-user-action";
const ID_ATTR: &str = "data-user-id";

/// Действие серверной кнопки (`data-user-action` + `data-user-id`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Create(UserKind),
    Edit(UserKind, i64),
}

impl UserAction {
    /// `None` для неизвестного действия или редактирования без корректного id
    pub fn parse(action: &str, id: Option<&str>) -> Option<Self> {
        let parsed_id = || id.and_then(|v| v.trim().parse::<i64>().ok());
        match action {
            "new-employee" => Some(UserAction::Create(UserKind::Employee)),
            "new-client" => Some(UserAction::Create(UserKind::Client)),
            "edit-employee" => parsed_id().map(|id| UserAction::Edit(UserKind::Employee, id)),
            "edit-client" => parsed_id().map(|id| UserAction::Edit(UserKind::Client, id)),
            _ => None,
        }
    }

    pub fn kind(&self) -> UserKind {
        match self {
            UserAction::Create(kind) | UserAction::Edit(kind, _) => *kind,
        }
    }
}

/// Пара контроллеров страницы пользователей
#[derive(Clone, Copy)]
pub struct UsersModals {
    pub employee: UserModalController,
    pub client: UserModalController,
}

impl UsersModals {
    pub fn new(roles: RwSignal<Vec<Role>>) -> Self {
        Self {
            employee: UserModalController::new(UserKind::Employee, roles),
            client: UserModalController::new(UserKind::Client, roles),
        }
    }

    pub fn controller(&self, kind: UserKind) -> UserModalController {
        match kind {
            UserKind::Employee => self.employee,
            UserKind::Client => self.client,
        }
    }

    pub fn dispatch(&self, action: UserAction) {
        log::debug!("User action: {:?}", action);
        let controller = self.controller(action.kind());
        match action {
            UserAction::Create(_) => controller.open_create(),
            UserAction::Edit(_, id) => controller.open_edit(id),
        }
    }
}

/// Каталог ролей загружается один раз. Если запись сотрудника пришла раньше,
/// её роли отмечаются сейчас.
fn load_roles(modals: UsersModals) {
    spawn_local(async move {
        match api::fetch_roles().await {
            Ok(list) => {
                log::debug!("Roles loaded: {}", list.len());
                modals.employee.state.update(|s| {
                    if s.roles_loaded(&list) {
                        log::debug!("Pending employee roles resolved");
                    }
                });
                modals.employee.roles.set(list);
            }
            Err(e) => log::error!("Failed to load roles: {}", e),
        }
    });
}

/// Делегированный обработчик кликов по кнопкам с `data-user-action`
fn listen_user_actions(modals: UsersModals) {
    dom::listen_document("click", move |event| {
        let Some(button) = dom::closest_from_event(&event, &format!("[{}]", ACTION_ATTR)) else {
            return;
        };
        let action = button.get_attribute(ACTION_ATTR).unwrap_or_default();
        let id = button.get_attribute(ID_ATTR);
        match UserAction::parse(&action, id.as_deref()) {
            Some(action) => {
                event.prevent_default();
                modals.dispatch(action);
            }
            None => log::warn!("Unknown user action '{}' (id: {:?})", action, id),
        }
    });
}

#[component]
pub fn UsersPage() -> impl IntoView {
    let roles = RwSignal::new(Vec::<Role>::new());
    let modals = UsersModals::new(roles);

    load_roles(modals);
    listen_user_actions(modals);

    view! {
        <UserModal controller=modals.employee />
        <UserModal controller=modals.client />
    }
}

/// Монтирует модальные окна, если страница их предусматривает
pub fn mount_users_page() -> bool {
    let Some(mount) = dom::document()
        .and_then(|d| d.get_element_by_id(MOUNT_POINT_ID))
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return false;
    };

    leptos::mount::mount_to(mount, UsersPage).forget();
    log::info!("Users modals mounted");
    true
}
