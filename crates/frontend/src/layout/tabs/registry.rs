//! Tab content registry - маппинг tab.key → View.
//!
//! Списки открываются по ключу агрегата (`a001_equipment`), карточки по
//! ключу `{aggregate}_detail_{id}`; `id == "new"` открывает форму создания.

use crate::dashboards::d400_dashboard::Dashboard;
use crate::domain::a001_equipment::ui::{details::EquipmentDetail, list::EquipmentList};
use crate::domain::a002_equipment_category::ui::list::CategoryList;
use crate::domain::a003_location::ui::{details::LocationDetail, list::LocationList};
use crate::domain::a004_part::ui::{details::PartDetail, list::PartList};
use crate::domain::a005_work_order::ui::{
    details::WorkOrderDetail, kanban::KanbanBoard, list::WorkOrderList,
};
use crate::domain::a006_maintenance_schedule::ui::{details::ScheduleDetail, list::ScheduleList};
use crate::domain::a007_team::ui::{details::TeamDetail, list::TeamList};
use crate::domain::a008_organization::ui::{details::OrganizationDetail, list::OrganizationList};
use crate::layout::global_context::AppGlobalContext;
use crate::system::audit_log::ui::list::AuditLogPage;
use crate::system::auth::guard::{RequireAdmin, RequirePermission};
use crate::system::pages::settings::SettingsPage;
use crate::system::users::ui::list::UsersListPage;
use leptos::logging::log;
use leptos::prelude::*;

use super::tab_labels::{split_detail_key, DASHBOARD_KEY, KANBAN_KEY, NEW_ID};

/// Рендерит контент вкладки по её ключу; неизвестный ключ даёт заглушку
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();
    let on_close = Callback::new(move |_| tabs_store.close_tab(&key_for_close));

    match key {
        DASHBOARD_KEY => view! { <Dashboard /> }.into_any(),

        "a001_equipment" => view! {
            <RequirePermission permission="equipment:read">
                <EquipmentList />
            </RequirePermission>
        }
        .into_any(),
        "a002_equipment_category" => view! {
            <RequirePermission permission="equipment:read">
                <CategoryList />
            </RequirePermission>
        }
        .into_any(),
        "a003_location" => view! {
            <RequirePermission permission="equipment:read">
                <LocationList />
            </RequirePermission>
        }
        .into_any(),
        "a004_part" => view! {
            <RequirePermission permission="parts:read">
                <PartList />
            </RequirePermission>
        }
        .into_any(),
        "a005_work_order" => view! {
            <RequirePermission permission="workorder:read">
                <WorkOrderList />
            </RequirePermission>
        }
        .into_any(),
        KANBAN_KEY => view! {
            <RequirePermission permission="workorder:read">
                <KanbanBoard />
            </RequirePermission>
        }
        .into_any(),
        "a006_maintenance_schedule" => view! {
            <RequirePermission permission="schedule:read">
                <ScheduleList />
            </RequirePermission>
        }
        .into_any(),

        "a007_team" => view! {
            <RequirePermission permission="team:read">
                <TeamList />
            </RequirePermission>
        }
        .into_any(),
        "a008_organization" => view! {
            <RequirePermission permission="organization:read">
                <OrganizationList />
            </RequirePermission>
        }
        .into_any(),

        "sys_users" => view! { <UsersListPage /> }.into_any(),
        "sys_audit_log" => view! { <AuditLogPage /> }.into_any(),
        "sys_settings" => view! {
            <RequireAdmin>
                <SettingsPage />
            </RequireAdmin>
        }
        .into_any(),

        k => match split_detail_key(k) {
            Some((aggregate, id)) => {
                log!("✅ Creating detail view: {} / {}", aggregate, id);
                render_detail(aggregate, id, on_close)
            }
            None => {
                log!("⚠️ Unknown tab type: {}", key);
                view! { <div class="placeholder">{"Not implemented yet"}</div> }.into_any()
            }
        },
    }
}

fn render_detail(aggregate: &str, id: &str, on_close: Callback<()>) -> AnyView {
    let id_opt = (id != NEW_ID).then(|| id.to_string());

    match aggregate {
        "a001_equipment" => view! { <EquipmentDetail id=id_opt on_close=on_close /> }.into_any(),
        "a003_location" => view! { <LocationDetail id=id_opt on_close=on_close /> }.into_any(),
        "a004_part" => view! { <PartDetail id=id_opt on_close=on_close /> }.into_any(),
        "a005_work_order" => {
            let id = id.to_string();
            view! { <WorkOrderDetail id=id on_close=on_close /> }.into_any()
        }
        "a006_maintenance_schedule" => {
            view! { <ScheduleDetail id=id_opt on_close=on_close /> }.into_any()
        }
        "a007_team" => view! {
            <RequirePermission permission="team:read">
                <TeamDetail id=id_opt.clone() on_close=on_close />
            </RequirePermission>
        }
        .into_any(),
        "a008_organization" => view! {
            <RequirePermission permission="organization:read">
                <OrganizationDetail id=id_opt.clone() on_close=on_close />
            </RequirePermission>
        }
        .into_any(),
        _ => {
            log!("⚠️ Unknown detail aggregate: {}", aggregate);
            view! { <div class="placeholder">{"Not implemented yet"}</div> }.into_any()
        }
    }
}
