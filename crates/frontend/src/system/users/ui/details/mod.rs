use contracts::system::users::{CreateUserDto, UpdateUserDto, User, UserRole};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::icons::icon;
use crate::system::users::api;

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[component]
pub fn CreateUserForm<F1, F2>(on_close: F1, on_created: F2) -> impl IntoView
where
    F1: Fn() + 'static + Copy + Send + Sync,
    F2: Fn() + 'static + Copy + Send + Sync,
{
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let role = RwSignal::new(UserRole::Technician.as_str().to_string());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let on_save = move |_| {
        let dto = CreateUserDto {
            email: email.get(),
            password: password.get(),
            first_name: first_name.get(),
            last_name: last_name.get(),
            phone: non_empty(phone.get()),
            role: UserRole::from_code(&role.get()).unwrap_or_default(),
        };

        set_saving.set(true);
        set_error.set(None);

        spawn_local(async move {
            match api::create_user(dto).await {
                Ok(user) => {
                    leptos::logging::log!("✅ User {} created", user.email);
                    on_created();
                }
                Err(e) => {
                    set_error.set(Some(format!("Failed to create user: {}", e)));
                    set_saving.set(false);
                }
            }
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close()>
            <div class="modal" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">"New user"</h2>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close()>
                        {icon("x")}
                    </Button>
                </div>

                <div class="modal-body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                    <div class="form__group">
                        <Label>"Email *"</Label>
                        <Input value=email input_type=InputType::Email />
                    </div>
                    <div class="form__group">
                        <Label>"Password *"</Label>
                        <Input value=password input_type=InputType::Password />
                    </div>
                    <div class="form__row">
                        <div class="form__group">
                            <Label>"First name *"</Label>
                            <Input value=first_name />
                        </div>
                        <div class="form__group">
                            <Label>"Last name"</Label>
                            <Input value=last_name />
                        </div>
                    </div>
                    <div class="form__group">
                        <Label>"Phone"</Label>
                        <Input value=phone />
                    </div>
                    <div class="form__group">
                        <Label>"Role"</Label>
                        <Select value=role>
                            {UserRole::ALL
                                .iter()
                                .map(|r| view! { <option value=r.as_str()>{r.label()}</option> })
                                .collect_view()}
                        </Select>
                    </div>
                </div>

                <div class="modal-footer">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_close()
                        disabled=Signal::derive(move || saving.get())
                    >
                        "Cancel"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=on_save
                        disabled=Signal::derive(move || saving.get())
                    >
                        {move || if saving.get() { "Saving..." } else { "Create user" }}
                    </Button>
                </div>
            </div>
        </div>
    }
}

/// Профиль и активность; роль меняется прямо в таблице
#[component]
pub fn EditUserForm<F1, F2>(user: User, on_close: F1, on_saved: F2) -> impl IntoView
where
    F1: Fn() + 'static + Copy + Send + Sync,
    F2: Fn(User) + 'static + Copy + Send + Sync,
{
    let first_name = RwSignal::new(user.first_name.clone());
    let last_name = RwSignal::new(user.last_name.clone());
    let phone = RwSignal::new(user.phone.clone().unwrap_or_default());
    let is_active = RwSignal::new(user.is_active);
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let title = format!("Edit: {}", user.email);
    let user_id = user.id.to_string();

    let on_save = move |_| {
        if first_name.get().trim().is_empty() {
            set_error.set(Some("First name is required".to_string()));
            return;
        }
        set_saving.set(true);
        set_error.set(None);

        let dto = UpdateUserDto {
            first_name: Some(first_name.get()),
            last_name: Some(last_name.get()),
            phone: Some(phone.get()),
            is_active: Some(is_active.get()),
        };
        let id = user_id.clone();

        spawn_local(async move {
            match api::update_user(id, dto).await {
                Ok(updated) => on_saved(updated),
                Err(e) => {
                    set_error.set(Some(format!("Failed to save: {}", e)));
                    set_saving.set(false);
                }
            }
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close()>
            <div class="modal" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close()>
                        {icon("x")}
                    </Button>
                </div>

                <div class="modal-body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                    <div class="form__group">
                        <Label>"First name"</Label>
                        <Input value=first_name disabled=Signal::derive(move || saving.get()) />
                    </div>
                    <div class="form__group">
                        <Label>"Last name"</Label>
                        <Input value=last_name disabled=Signal::derive(move || saving.get()) />
                    </div>
                    <div class="form__group">
                        <Label>"Phone"</Label>
                        <Input value=phone disabled=Signal::derive(move || saving.get()) />
                    </div>
                    <div class="form__group">
                        <Checkbox checked=is_active label="Active" />
                    </div>
                </div>

                <div class="modal-footer">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_close()
                        disabled=Signal::derive(move || saving.get())
                    >
                        "Cancel"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=on_save
                        disabled=Signal::derive(move || saving.get())
                    >
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </Button>
                </div>
            </div>
        </div>
    }
}
