use leptos::prelude::*;

use super::context::use_auth;
use crate::system::pages::login::LoginPage;

/// Component that requires authentication
/// Shows the login page if there is no session
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().is_authenticated()
            fallback=|| view! { <LoginPage /> }
        >
            {children()}
        </Show>
    }
}

/// Component that requires a permission (`resource:action`)
#[component]
pub fn RequirePermission(
    permission: &'static str,
    #[prop(optional, into)] fallback: Option<ViewFn>,
    children: ChildrenFn,
) -> impl IntoView {
    let (auth_state, _) = use_auth();
    let fallback = fallback.unwrap_or_else(|| {
        ViewFn::from(move || {
            view! {
                <div class="alert alert--warning">
                    "Access denied. You do not have permission to view this page."
                </div>
            }
        })
    });

    view! {
        <Show
            when=move || auth_state.get().can(permission)
            fallback=move || fallback.run()
        >
            {children()}
        </Show>
    }
}

/// Только для администраторов (super_admin и admin)
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().is_authenticated() && auth_state.get().is_admin()
            fallback=|| view! {
                <div class="alert alert--warning">"Access denied. Admin privileges required."</div>
            }
        >
            {children()}
        </Show>
    }
}
