//! Боковое меню: группы по роли, сворачиваемые по клику

use super::menu::{nav_items_for_role, NavGroup, NavItem};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use leptos::prelude::*;

#[component]
fn SidebarItem(item: NavItem, #[prop(optional)] nested: bool) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let NavItem { key, label, icon: icon_name } = item;

    view! {
        <div
            class="app-sidebar__item"
            class:app-sidebar__item--active=move || ctx.active.get().as_deref() == Some(key)
            style:padding-left=if nested { "24px" } else { "12px" }
            on:click=move |_| ctx.open_tab(key, label)
        >
            <div class="app-sidebar__item-content">
                {icon(icon_name)}
                <span>{label}</span>
            </div>
        </div>
    }
}

#[component]
fn SidebarGroup(group: NavGroup, expanded_groups: RwSignal<Vec<&'static str>>) -> impl IntoView {
    // Группа из одного пункта показывается самим пунктом
    if let [single] = group.items.as_slice() {
        let item = single.clone();
        return view! { <SidebarItem item=item /> }.into_any();
    }

    let gid = group.id;
    let is_expanded = move || expanded_groups.get().contains(&gid);
    let toggle = move |_| {
        expanded_groups.update(|items| {
            if let Some(pos) = items.iter().position(|x| *x == gid) {
                items.remove(pos);
            } else {
                items.push(gid);
            }
        });
    };
    let items = StoredValue::new(group.items);

    view! {
        <div>
            <div class="app-sidebar__item app-sidebar__item--group" style:padding-left="12px" on:click=toggle>
                <div class="app-sidebar__item-content">
                    {icon(group.icon)}
                    <span>{group.label}</span>
                </div>
                <div class="app-sidebar__chevron" class:app-sidebar__chevron--expanded=is_expanded>
                    {icon("chevron-right")}
                </div>
            </div>
            <Show when=is_expanded>
                <div class="app-sidebar__children">
                    {items
                        .get_value()
                        .into_iter()
                        .map(|item| view! { <SidebarItem item=item nested=true /> })
                        .collect_view()}
                </div>
            </Show>
        </div>
    }
    .into_any()
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let expanded_groups = RwSignal::new(vec!["assets", "maintenance", "inventory"]);

    let groups = move || {
        auth_state
            .get()
            .role()
            .map(nav_items_for_role)
            .unwrap_or_default()
    };

    view! {
        <nav class="app-sidebar__content">
            {move || {
                groups()
                    .into_iter()
                    .map(|group| view! { <SidebarGroup group=group expanded_groups=expanded_groups /> })
                    .collect_view()
            }}
        </nav>
    }
}
