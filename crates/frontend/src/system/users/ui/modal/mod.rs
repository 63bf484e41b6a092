pub mod state;

use contracts::system::users::Role;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{HtmlButtonElement, HtmlFormElement};

use crate::shared::config::ui_config;
use crate::shared::dom;
use crate::shared::flash::show_error;
use crate::shared::form_validator::{
    is_valid_email, mark_field, validate_form, MSG_INVALID_EMAIL, MSG_REQUIRED_FIELDS,
};
use crate::shared::request_slot::RequestSlot;
use crate::system::auth::forms::set_loading;
use crate::system::users::api;

pub use state::{ModalFormState, ModalMode, UserField, UserForm, UserKind};
use state::{CLIENT_CATEGORIES, CLIENT_TYPES};

/// Управление модальным окном одного вида пользователя.
///
/// Copy-структура из сигналов: её можно раздавать обработчикам так же,
/// как контекст приложения.
#[derive(Clone, Copy)]
pub struct UserModalController {
    pub kind: UserKind,
    pub state: RwSignal<ModalFormState>,
    pub roles: RwSignal<Vec<Role>>,
    request: StoredValue<RequestSlot, LocalStorage>,
}

impl UserModalController {
    pub fn new(kind: UserKind, roles: RwSignal<Vec<Role>>) -> Self {
        Self {
            kind,
            state: RwSignal::new(ModalFormState::new(kind)),
            roles,
            request: StoredValue::new_local(RequestSlot::new()),
        }
    }

    pub fn open_create(&self) {
        self.request.with_value(|slot| slot.cancel());
        self.state.update(|s| s.open_create());
    }

    /// Окно откроется только после загрузки записи
    pub fn open_edit(&self, id: i64) {
        let mut ticket = 0;
        self.state.update(|s| ticket = s.begin_edit(id));
        let signal = self.request.with_value(|slot| slot.restart());

        let this = *self;
        spawn_local(async move {
            match api::fetch_user(id, signal.as_ref()).await {
                Ok(record) => {
                    let catalog = this.roles.get_untracked();
                    let mut applied = false;
                    this.state
                        .update(|s| applied = s.complete_edit(ticket, &record, &catalog));
                    if !applied {
                        log::debug!("Discarded stale user record {}", id);
                    }
                }
                Err(e) => {
                    let mut current = false;
                    this.state.update(|s| current = s.fail_edit(ticket));
                    if current {
                        log::error!("Failed to load user {}: {}", id, e);
                        dom::alert(this.kind.load_error_message());
                    } else {
                        log::debug!("User request {} dropped: {}", id, e);
                    }
                }
            }
        });
    }

    pub fn close(&self) {
        self.request.with_value(|slot| slot.cancel());
        self.state.update(|s| s.close());
    }
}

fn submit_button(form: &HtmlFormElement) -> Option<HtmlButtonElement> {
    form.query_selector("button[type=\"submit\"]")
        .ok()
        .flatten()?
        .dyn_into::<HtmlButtonElement>()
        .ok()
}

/// Текстовое поле, связанное с [`UserForm`]
#[component]
fn FieldInput(
    state: RwSignal<ModalFormState>,
    field: UserField,
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] required: bool,
    #[prop(optional)] disabled: Option<Signal<bool>>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            <input
                type=input_type
                name=field.name()
                required=required
                disabled=move || disabled.map(|d| d.get()).unwrap_or(false)
                prop:value=move || state.with(|s| field.get(&s.form).to_string())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    state.update(|s| field.set(&mut s.form, value));
                }
            />
        </div>
    }
}

/// Выпадающий список клиента (тип, категория)
#[component]
fn FieldSelect(
    state: RwSignal<ModalFormState>,
    field: UserField,
    label: &'static str,
    options: &'static [&'static str],
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            <select
                name=field.name()
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    state.update(|s| field.set(&mut s.form, value));
                }
            >
                {options
                    .iter()
                    .map(|option| {
                        let option = *option;
                        view! {
                            <option
                                value=option
                                prop:selected=move || state.with(|s| field.get(&s.form) == option)
                            >
                                {option}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

/// Модальное окно создания/редактирования сотрудника или клиента.
///
/// Форма отправляется нативным POST; перед отправкой проверяются
/// обязательные поля и формат email.
#[component]
pub fn UserModal(controller: UserModalController) -> impl IntoView {
    let kind = controller.kind;
    let state = controller.state;
    let prefix = ui_config().users_prefix.clone();

    let modal_class = move || {
        if state.with(|s| s.is_open()) {
            "modal active"
        } else {
            "modal"
        }
    };
    let ci_disabled = Signal::derive(move || state.with(|s| s.ci_disabled()));
    let password_display = move || {
        if state.with(|s| s.password_visible()) {
            "flex"
        } else {
            "none"
        }
    };

    // Клик по подложке, а не по содержимому
    let on_backdrop = move |ev: leptos::ev::MouseEvent| {
        let on_backdrop = dom::event_target_element(&ev)
            .map(|el| el.class_list().contains("modal"))
            .unwrap_or(false);
        if on_backdrop {
            controller.close();
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        let Some(form) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlFormElement>().ok())
        else {
            return;
        };

        if !validate_form(&form) {
            ev.prevent_default();
            show_error(MSG_REQUIRED_FIELDS);
            return;
        }

        let email = state.with_untracked(|s| s.form.email.clone());
        if !is_valid_email(&email) {
            ev.prevent_default();
            if let Ok(Some(input)) = form.query_selector("input[name=\"email\"]") {
                mark_field(&input, false);
            }
            show_error(MSG_INVALID_EMAIL);
            return;
        }

        if let Some(button) = submit_button(&form) {
            set_loading(&button, true);
        }
    };

    let roles = controller.roles;
    let role_checkboxes = move || {
        (kind == UserKind::Employee).then(|| {
            view! {
                <div class="form-group">
                    <label>"Roles"</label>
                    <div id="rolesCheckbox" class="roles-checkbox">
                        <For
                            each=move || roles.get()
                            key=|role| role.id_rol
                            children=move |role: Role| {
                                let id = role.id_rol;
                                let input_id = format!("rol_{}", id);
                                view! {
                                    <div class="checkbox-item">
                                        <input
                                            type="checkbox"
                                            name="roles[]"
                                            id=input_id.clone()
                                            value=id.to_string()
                                            prop:checked=move || state.with(|s| s.form.roles.contains(&id))
                                            on:change=move |ev| {
                                                let checked = event_target_checked(&ev);
                                                state.update(|s| s.form.set_role(id, checked));
                                            }
                                        />
                                        <label for=input_id>{role.nombre_rol}</label>
                                    </div>
                                }
                            }
                        />
                    </div>
                </div>
            }
        })
    };

    let client_fields = move || {
        (kind == UserKind::Client).then(|| {
            view! {
                <div class="form-row">
                    <FieldSelect state=state field=UserField::TipoCliente label="Tipo de cliente" options=CLIENT_TYPES />
                    <FieldSelect state=state field=UserField::CategoriaCliente label="Categoría" options=CLIENT_CATEGORIES />
                </div>
                <div class="form-row">
                    <FieldInput state=state field=UserField::Empresa label="Empresa" />
                    <FieldInput state=state field=UserField::LimiteCredito label="Límite de crédito" input_type="number" />
                </div>
                <div class="form-group">
                    <label>"Observaciones"</label>
                    <textarea
                        name=UserField::Observaciones.name()
                        rows="3"
                        prop:value=move || state.with(|s| s.form.observaciones.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            state.update(|s| s.form.observaciones = value);
                        }
                    ></textarea>
                </div>
            }
        })
    };

    view! {
        <div id=kind.modal_id() class=modal_class on:click=on_backdrop>
            <div class="modal-content">
                <div class="modal-header">
                    <h3 id=kind.title_id()>{move || state.with(|s| s.title())}</h3>
                    <button type="button" class="close-modal" on:click=move |_| controller.close()>
                        "×"
                    </button>
                </div>

                <form
                    id=kind.form_id()
                    method="POST"
                    action=move || state.with(|s| s.action(&prefix))
                    on:submit=on_submit
                >
                    <div class="form-row">
                        <FieldInput state=state field=UserField::Nombre label="Nombre" required=true />
                        <FieldInput state=state field=UserField::ApellidoPaterno label="Apellido paterno" required=true />
                    </div>
                    <div class="form-row">
                        <FieldInput state=state field=UserField::ApellidoMaterno label="Apellido materno" />
                        <FieldInput
                            state=state
                            field=UserField::Ci
                            label="CI"
                            required=true
                            disabled=ci_disabled
                        />
                    </div>
                    <div class="form-row">
                        <FieldInput state=state field=UserField::Email label="Email" input_type="email" required=true />
                        <FieldInput state=state field=UserField::FechaNacimiento label="Fecha de nacimiento" input_type="date" />
                    </div>
                    <div class="form-group" style:display=password_display>
                        <label>"Contraseña"</label>
                        <input
                            type="password"
                            name=UserField::Password.name()
                            required=move || state.with(|s| s.password_required())
                            prop:value=move || state.with(|s| s.form.password.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|s| s.form.password = value);
                            }
                        />
                    </div>

                    {role_checkboxes}
                    {client_fields}

                    <div class="form-actions">
                        <button type="button" class="btn btn-secondary" on:click=move |_| controller.close()>
                            "Cancelar"
                        </button>
                        <button type="submit" class="btn btn-primary">
                            "Guardar"
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
