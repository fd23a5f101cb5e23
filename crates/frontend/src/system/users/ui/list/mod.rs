mod state;

use contracts::system::users::{UpdateUserDto, User, UserRole};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::ui::Badge as UiBadge;
use crate::shared::date_utils::{format_date, format_opt_date};
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    cmp_text, get_sort_class, get_sort_indicator, highlight_matches, sort_list, Sortable,
};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::RequireAdmin;
use crate::system::users::api;
use state::create_state;

impl Sortable for User {
    fn compare_by_field(&self, other: &Self, field: &str) -> std::cmp::Ordering {
        match field {
            "email" => cmp_text(&self.email, &other.email),
            "role" => self.role.cmp(&other.role),
            "is_active" => self.is_active.cmp(&other.is_active),
            "created_at" => self.created_at.cmp(&other.created_at),
            "last_login" => self.last_login.cmp(&other.last_login),
            _ => cmp_text(&self.display_name(), &other.display_name()),
        }
    }
}

#[component]
pub fn UsersListPage() -> impl IntoView {
    view! {
        <RequireAdmin>
            <UsersList />
        </RequireAdmin>
    }
}

#[component]
fn UsersList() -> impl IntoView {
    let state = create_state();
    let all_users: RwSignal<Vec<User>> = RwSignal::new(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let (show_create_form, set_show_create_form) = signal(false);
    let editing_user: RwSignal<Option<User>> = RwSignal::new(None);

    let (auth_state, _) = use_auth();
    let current_user_id = move || {
        auth_state
            .get()
            .user
            .map(|u| u.id.to_string())
            .unwrap_or_default()
    };

    let refresh_view = move || {
        let mut data = all_users.get_untracked();
        state.update(|s| {
            sort_list(&mut data, &s.sort_field, s.sort_ascending);
            s.items = data;
        });
    };

    // Фильтр уходит в запрос, сортировка локальная
    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        let filter = state.with_untracked(|s| s.filter());
        spawn_local(async move {
            match api::fetch_users(filter).await {
                Ok(data) => {
                    leptos::logging::log!("👥 Loaded {} users", data.len());
                    all_users.set(data);
                    state.update(|s| s.is_loaded = true);
                    refresh_view();
                }
                Err(e) => {
                    log::warn!("Failed to load users: {}", e);
                    set_error.set(Some(format!("Failed to load users: {}", e)));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_data();
        }
    });

    let search_signal = RwSignal::new(String::new());

    let apply_search = move || {
        state.update(|s| s.search_query = search_signal.get_untracked());
        load_data();
    };

    let reset_filters = move || {
        search_signal.set(String::new());
        state.update(|s| {
            s.search_query.clear();
            s.role.clear();
            s.active.clear();
        });
        load_data();
    };

    let toggle_sort = move |field: &'static str| {
        move |_| {
            state.update(|s| {
                if s.sort_field == field {
                    s.sort_ascending = !s.sort_ascending;
                } else {
                    s.sort_field = field.to_string();
                    s.sort_ascending = true;
                }
            });
            refresh_view();
        }
    };

    // Обновлённая строка заменяет старую без перезагрузки списка
    let replace_user = move |updated: User| {
        all_users.update(|list| {
            if let Some(row) = list.iter_mut().find(|u| u.id == updated.id) {
                *row = updated;
            }
        });
        refresh_view();
    };

    let on_role_change = move |id: String, code: String| {
        let Some(role) = UserRole::from_code(&code) else {
            return;
        };
        spawn_local(async move {
            match api::change_role(id, role).await {
                Ok(user) => {
                    leptos::logging::log!("🔑 Role of {} changed to {}", user.email, role.as_str());
                    replace_user(user);
                }
                Err(e) => {
                    log::warn!("Failed to change role: {}", e);
                    set_error.set(Some(format!("Failed to change role: {}", e)));
                    refresh_view();
                }
            }
        });
    };

    let on_toggle_active = move |user: User| {
        let dto = UpdateUserDto {
            is_active: Some(!user.is_active),
            ..Default::default()
        };
        spawn_local(async move {
            match api::update_user(user.id.to_string(), dto).await {
                Ok(updated) => replace_user(updated),
                Err(e) => set_error.set(Some(format!("Failed to update user: {}", e))),
            }
        });
    };

    let on_delete = move |user: User| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!("Delete user {}?", user.display_name()))
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_user(user.id.to_string()).await {
                Ok(()) => {
                    leptos::logging::log!("🗑️ User {} deleted", user.email);
                    all_users.update(|list| list.retain(|u| u.id != user.id));
                    refresh_view();
                }
                Err(e) => set_error.set(Some(format!("Failed to delete user: {}", e))),
            }
        });
    };

    let sort_header = move |label: &'static str, field: &'static str| {
        view! {
            <div class="table__sortable-header" style="cursor:pointer;" on:click=toggle_sort(field)>
                {label}
                <span class=move || state.with(|s| get_sort_class(&s.sort_field, field))>
                    {move || state.with(|s| get_sort_indicator(&s.sort_field, field, s.sort_ascending))}
                </span>
            </div>
        }
    };

    view! {
        <PageFrame page_id="sys_users--list" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Users"</h1>
                    <UiBadge variant="primary">
                        {move || state.get().items.len().to_string()}
                    </UiBadge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| set_show_create_form.set(true)
                    >
                        {icon("plus")}
                        " New user"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <div class="filter-panel">
                    <div class="filter-panel-content">
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <div style="flex: 1; max-width: 320px;">
                                <Input value=search_signal placeholder="Name or email..." />
                            </div>
                            <select
                                class="form__select"
                                prop:value=move || state.get().role
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    state.update(|s| s.role = value);
                                    load_data();
                                }
                            >
                                <option value="">"All roles"</option>
                                {UserRole::ALL
                                    .iter()
                                    .map(|r| view! { <option value=r.as_str()>{r.label()}</option> })
                                    .collect_view()}
                            </select>
                            <select
                                class="form__select"
                                prop:value=move || state.get().active
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    state.update(|s| s.active = value);
                                    load_data();
                                }
                            >
                                <option value="">"Any status"</option>
                                <option value="active">"Active"</option>
                                <option value="inactive">"Inactive"</option>
                            </select>
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| apply_search()
                                disabled=Signal::derive(move || loading.get())
                            >
                                "Search"
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| reset_filters()
                            >
                                "Reset"
                            </Button>
                        </Flex>
                    </div>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell resizable=false min_width=160.0>
                                    {sort_header("Name", "name")}
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=180.0>
                                    {sort_header("Email", "email")}
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=160.0>
                                    {sort_header("Role", "role")}
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=90.0>
                                    {sort_header("Status", "is_active")}
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=110.0>
                                    {sort_header("Created", "created_at")}
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=110.0>
                                    {sort_header("Last login", "last_login")}
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=120.0></TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || state.get().items
                                key=|u| (u.id.clone(), u.role, u.is_active, u.display_name())
                                children=move |user| {
                                    let query = state.with_untracked(|s| s.search_query.clone());
                                    let user_id = user.id.to_string();
                                    let is_self = user_id == current_user_id();
                                    let role_code = user.role.as_str();
                                    let for_edit = user.clone();
                                    let for_toggle = user.clone();
                                    let for_delete = user.clone();
                                    let toggle_label = if user.is_active { "Deactivate" } else { "Activate" };
                                    let display_name_hl = highlight_matches(&user.display_name(), &query);
                                    let email_hl = highlight_matches(&user.email, &query);
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-weight: 500;">
                                                        {display_name_hl}
                                                    </span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {email_hl}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <select
                                                    class="form__select form__select--compact"
                                                    prop:value=role_code
                                                    disabled=is_self
                                                    on:change=move |ev| on_role_change(user_id.clone(), event_target_value(&ev))
                                                >
                                                    {UserRole::ALL
                                                        .iter()
                                                        .map(|r| view! {
                                                            <option value=r.as_str() selected=r.as_str() == role_code>{r.label()}</option>
                                                        })
                                                        .collect_view()}
                                                </select>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {if user.is_active {
                                                        view! { <UiBadge variant="success">"Active"</UiBadge> }.into_any()
                                                    } else {
                                                        view! { <UiBadge variant="error">"Inactive"</UiBadge> }.into_any()
                                                    }}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format_date(user.created_at)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format_opt_date(user.last_login)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Flex gap=FlexGap::Small>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| editing_user.set(Some(for_edit.clone()))
                                                        attr:title="Edit"
                                                    >
                                                        {icon("user")}
                                                    </Button>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        disabled=is_self
                                                        on_click=move |_| on_toggle_active(for_toggle.clone())
                                                        attr:title=toggle_label
                                                    >
                                                        {icon(if user.is_active { "x" } else { "check" })}
                                                    </Button>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        disabled=is_self
                                                        on_click=move |_| on_delete(for_delete.clone())
                                                        attr:title="Delete"
                                                    >
                                                        {icon("delete")}
                                                    </Button>
                                                </Flex>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                <Show when=move || state.with(|s| s.is_loaded && s.items.is_empty())>
                    <div class="empty-state">"No users match the current filters."</div>
                </Show>

                {move || show_create_form.get().then(|| view! {
                    <super::details::CreateUserForm
                        on_close=move || set_show_create_form.set(false)
                        on_created=move || {
                            set_show_create_form.set(false);
                            load_data();
                        }
                    />
                })}

                {move || editing_user.get().map(|user| view! {
                    <super::details::EditUserForm
                        user=user
                        on_close=move || editing_user.set(None)
                        on_saved=move |updated: User| {
                            editing_user.set(None);
                            replace_user(updated);
                        }
                    />
                })}
            </div>
        </PageFrame>
    }
}
