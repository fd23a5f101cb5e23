//! Верхняя панель: переключатель меню, пользователь и его роль, выход.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::config::use_mock;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, set_auth_state) = use_auth();

    let is_sidebar_visible = move || ctx.left_open.get();

    let logout = move |_| {
        ctx.close_all();
        spawn_local(async move {
            do_logout(set_auth_state).await;
        });
    };

    let role_label = move || {
        auth_state
            .get()
            .role()
            .map(|r| r.label())
            .unwrap_or_default()
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {move || if is_sidebar_visible() {
                        icon("panel-left-close")
                    } else {
                        icon("panel-left-open")
                    }}
                </button>
                <span class="top-header__title">"CMMS"</span>
                <Show when=use_mock>
                    <span class="badge badge--warning">"Mock data"</span>
                </Show>
            </div>

            <div class="top-header__actions">
                <button
                    class="top-header__icon-btn"
                    title="Settings"
                    on:click=move |_| ctx.open_tab("sys_settings", "Settings")
                >
                    {icon("settings")}
                </button>

                <div class="top-header__user">
                    {icon("user")}
                    <div class="top-header__user-text">
                        <span class="top-header__user-name">
                            {move || auth_state.get().display_name()}
                        </span>
                        <span class="top-header__user-role">{role_label}</span>
                    </div>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Log out">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
