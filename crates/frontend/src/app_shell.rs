//! Корневые компоненты приложения:
//! - `AppShell` - auth gate (LoginPage или MainLayout)
//! - `MainLayout` - Shell + Sidebar + вкладки

use crate::layout::global_context::{replace_url, AppGlobalContext, Tab as TabData};
use crate::layout::left::Sidebar;
use crate::layout::tabs::{TabPage, DASHBOARD_KEY};
use crate::layout::Shell;
use crate::system::auth::context::{use_auth, use_auth_restoring};
use crate::system::pages::login::LoginPage;
use leptos::logging::log;
use leptos::prelude::*;
use thaw::Spinner;

/// Основной layout. Без открытых вкладок (свежий вход) открывает дашборд роли
/// и ставит в адресную строку её домашний маршрут.
#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let (auth_state, _) = use_auth();

    tabs_store.init_router_integration();

    if tabs_store.opened.with_untracked(|tabs| tabs.is_empty()) {
        if let Some(role) = auth_state.get_untracked().role() {
            log!("🏠 Landing on {} for role {}", role.home_route(), role.as_str());
            replace_url(role.home_route());
            tabs_store.open_tab(DASHBOARD_KEY, "Dashboard");
        }
    }

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=move || {
                view! {
                    <For
                        each=move || tabs_store.opened.get()
                        key=|tab| tab.key.clone()
                        children=move |tab: TabData| {
                            view! { <TabPage tab=tab tabs_store=tabs_store /> }
                        }
                    />
                }
                .into_any()
            }
        />
    }
}

/// Пока восстанавливается сессия, показывается спиннер вместо формы входа
#[component]
pub fn AppShell() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let restoring = use_auth_restoring();

    view! {
        <Show
            when=move || !restoring.get()
            fallback=|| view! {
                <div class="app-loading">
                    <Spinner />
                </div>
            }
        >
            <Show
                when=move || auth_state.get().is_authenticated()
                fallback=|| view! { <LoginPage /> }
            >
                <MainLayout />
            </Show>
        </Show>
    }
}
