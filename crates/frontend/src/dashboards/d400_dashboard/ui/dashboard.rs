use chrono::Utc;
use contracts::dashboards::d400_dashboard::{assigned_to, CountBy};
use contracts::domain::a005_work_order::WorkOrder;
use contracts::system::users::UserRole;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::report_issue::ReportIssuePanel;
use super::sections::{
    equipment_breakdown, kpi_cards, low_stock_list, maintenance_list, users_by_role,
    work_order_breakdown, work_order_list,
};
use crate::dashboards::d400_dashboard::api::{self, DashboardSnapshot};
use crate::domain::a001_equipment::ui::list::status_variant as equipment_variant;
use crate::shared::components::ui::Badge as UiBadge;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::system::auth::context::use_auth;

fn dashboard_title(role: UserRole) -> &'static str {
    match role {
        UserRole::SuperAdmin | UserRole::Admin => "Organization overview",
        UserRole::Manager => "Maintenance dashboard",
        UserRole::Technician => "My work",
        UserRole::Operator => "Equipment status",
        UserRole::Viewer => "Overview",
    }
}

/// Дашборд текущего пользователя; содержимое зависит от роли
#[component]
pub fn Dashboard() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let role = move || auth_state.get().role().unwrap_or_default();
    let snapshot: RwSignal<Option<DashboardSnapshot>> = RwSignal::new(None);
    let role_counts: RwSignal<Option<CountBy<UserRole>>> = RwSignal::new(None);
    let (error, set_error) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        let current = role();
        let with_users = current.is_admin();
        spawn_local(async move {
            match api::fetch_snapshot(current).await {
                Ok(data) => {
                    leptos::logging::log!(
                        "📊 Dashboard data: {} equipment, {} work orders",
                        data.equipment.len(),
                        data.work_orders.len()
                    );
                    snapshot.set(Some(data));
                }
                Err(e) => {
                    log::warn!("Failed to load dashboard: {}", e);
                    set_error.set(Some(format!("Failed to load dashboard: {}", e)));
                }
            }
            if with_users {
                match api::fetch_users_by_role().await {
                    Ok(counts) => role_counts.set(Some(counts)),
                    Err(e) => log::warn!("User counts unavailable: {}", e),
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load_data());

    let on_reported = Callback::new(move |order: WorkOrder| {
        set_notice.set(Some(format!("Issue reported, work order {} created", order.id)));
        load_data();
    });

    let content = move || {
        let Some(data) = snapshot.get() else {
            return view! { <div class="page__loading"><Spinner /></div> }.into_any();
        };
        let now = Utc::now();
        let summary = data.summary(now);

        match role() {
            UserRole::SuperAdmin | UserRole::Admin => view! {
                {kpi_cards(&summary, false)}
                <div class="dashboard__grid">
                    {equipment_breakdown(&summary)}
                    {move || role_counts.get().map(|counts| users_by_role(&counts))}
                </div>
                {work_order_breakdown(&summary)}
                {work_order_list("Recent work orders", summary.recent_work_orders.clone(), now, "No work orders yet")}
            }
            .into_any(),
            UserRole::Manager => view! {
                {kpi_cards(&summary, false)}
                {work_order_breakdown(&summary)}
                <div class="dashboard__grid">
                    {maintenance_list("Upcoming maintenance", summary.upcoming_maintenance.clone())}
                    {low_stock_list(summary.low_stock_parts.clone())}
                </div>
                {work_order_list("Recent work orders", summary.recent_work_orders.clone(), now, "No work orders yet")}
            }
            .into_any(),
            UserRole::Technician => {
                let me = auth_state.get_untracked().display_name();
                let mine: Vec<WorkOrder> = assigned_to(&data.work_orders, &me).into_iter().cloned().collect();
                let overdue: Vec<WorkOrder> = data
                    .work_orders
                    .iter()
                    .filter(|w| w.is_overdue(now))
                    .cloned()
                    .collect();
                view! {
                    <div class="dashboard__grid">
                        {work_order_list("My tasks", mine, now, "Nothing assigned to you")}
                        {work_order_list("Overdue work orders", overdue, now, "No overdue work orders")}
                    </div>
                    {maintenance_list("Overdue maintenance", summary.overdue_maintenance.clone())}
                }
                .into_any()
            }
            UserRole::Operator => view! {
                <div class="dashboard__grid">
                    {equipment_breakdown(&summary)}
                    <ReportIssuePanel equipment=data.equipment.clone() on_reported=on_reported />
                </div>
                <div class="dashboard__panel">
                    <h3 class="dashboard__panel-title">"Equipment"</h3>
                    <ul class="dashboard__list">
                        {data
                            .equipment
                            .iter()
                            .cloned()
                            .map(|e| view! {
                                <li class="dashboard__list-item">
                                    <span>{e.name.clone()}</span>
                                    <span class="dashboard__muted">{e.location_name.clone()}</span>
                                    <UiBadge variant=equipment_variant(e.status)>{e.status.label()}</UiBadge>
                                </li>
                            })
                            .collect_view()}
                    </ul>
                </div>
            }
            .into_any(),
            UserRole::Viewer => view! {
                {kpi_cards(&summary, true)}
                {work_order_breakdown(&summary)}
            }
            .into_any(),
        }
    };

    view! {
        <PageFrame page_id="d400_dashboard--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{move || dashboard_title(role())}</h1>
                    <span class="dashboard__muted">{move || auth_state.get().display_name()}</span>
                </div>
                <div class="page__header-right">
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
                {move || notice.get().map(|msg| view! { <div class="alert alert--success">{msg}</div> })}
                {content}
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_has_a_title() {
        for role in UserRole::ALL {
            assert!(!dashboard_title(role).is_empty());
        }
        assert_eq!(dashboard_title(UserRole::Technician), "My work");
    }
}
