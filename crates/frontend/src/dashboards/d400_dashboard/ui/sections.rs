//! Блоки ролевых дашбордов. Все функции рисуют готовые данные без собственного состояния.

use chrono::{DateTime, Utc};
use contracts::dashboards::d400_dashboard::{CountBy, DashboardSummary};
use contracts::domain::a004_part::Part;
use contracts::domain::a005_work_order::WorkOrder;
use contracts::domain::a006_maintenance_schedule::MaintenanceSchedule;
use contracts::domain::common::AggregateRoot;
use contracts::system::users::UserRole;
use leptos::prelude::*;

use crate::domain::a001_equipment::ui::list::status_variant as equipment_variant;
use crate::domain::a004_part::ui::list::stock_variant;
use crate::domain::a005_work_order::ui::{priority_variant, status_variant};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::title_for_key;
use crate::shared::components::stat_card::StatCard;
use crate::shared::components::ui::Badge as UiBadge;
use crate::shared::date_utils::{due_label, format_date};

fn stat(value: impl ToString) -> Signal<Option<String>> {
    Signal::stored(Some(value.to_string()))
}

/// Основные показатели; `compact` оставляет только первую строку
pub fn kpi_cards(summary: &DashboardSummary, compact: bool) -> impl IntoView {
    let overdue_status = if summary.overdue_work_orders > 0 { "error" } else { "success" };
    let health_status = match summary.average_health {
        h if h >= 80.0 => "success",
        h if h >= 50.0 => "warning",
        _ => "error",
    };
    let low_stock = summary.low_stock_parts.len();

    view! {
        <div class="dashboard__cards">
            <StatCard label="Equipment" icon_name="equipment" value=stat(summary.total_equipment) />
            <StatCard label="Active work orders" icon_name="work-orders" value=stat(summary.active_work_orders) />
            <StatCard
                label="Overdue work orders"
                icon_name="alert"
                value=stat(summary.overdue_work_orders)
                status=overdue_status
            />
            <StatCard
                label="Average health"
                icon_name="check"
                value=stat(format!("{:.1}%", summary.average_health))
                status=health_status
            />
        </div>
        {(!compact).then(|| view! {
            <div class="dashboard__cards">
                <StatCard label="Pending" icon_name="kanban" value=stat(summary.pending_work_orders) />
                <StatCard
                    label="Completion rate"
                    icon_name="check"
                    value=stat(format!("{}%", summary.completion_rate()))
                    subtitle=Signal::stored(Some(format!("{} of {} completed", summary.completed_work_orders, summary.total_work_orders)))
                />
                <StatCard
                    label="Upcoming maintenance"
                    icon_name="schedule"
                    value=stat(summary.upcoming_maintenance.len())
                    status={if summary.overdue_maintenance.is_empty() { "" } else { "warning" }}
                />
                <StatCard
                    label="Low stock parts"
                    icon_name="parts"
                    value=stat(low_stock)
                    status={if low_stock > 0 { "warning" } else { "success" }}
                />
            </div>
        })}
    }
}

/// Горизонтальные полосы "значение / максимум"
fn count_bars<T: Copy + 'static>(
    title: &'static str,
    counts: &CountBy<T>,
    label: fn(&T) -> &'static str,
    variant: fn(T) -> &'static str,
) -> impl IntoView {
    let max = counts.iter().map(|(_, n)| *n).max().unwrap_or(0).max(1);
    view! {
        <div class="dashboard__panel">
            <h3 class="dashboard__panel-title">{title}</h3>
            <div class="count-bars">
                {counts
                    .iter()
                    .map(|(key, n)| {
                        let width = format!("width: {}%;", n * 100 / max);
                        view! {
                            <div class="count-bars__row">
                                <span class="count-bars__label">{label(key)}</span>
                                <div class="count-bars__track">
                                    <div class=format!("count-bars__fill count-bars__fill--{}", variant(*key)) style=width></div>
                                </div>
                                <span class="count-bars__value">{*n}</span>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

pub fn work_order_breakdown(summary: &DashboardSummary) -> impl IntoView {
    view! {
        <div class="dashboard__grid">
            {count_bars("Work orders by status", &summary.work_orders_by_status, |s| s.label(), status_variant)}
            {count_bars("Work orders by priority", &summary.work_orders_by_priority, |p| p.label(), priority_variant)}
        </div>
    }
}

pub fn equipment_breakdown(summary: &DashboardSummary) -> impl IntoView {
    count_bars("Equipment by status", &summary.equipment_by_status, |s| s.label(), equipment_variant)
}

pub fn users_by_role(counts: &CountBy<UserRole>) -> impl IntoView {
    count_bars("Users by role", counts, |r| r.label(), |_| "primary")
}

/// Список нарядов; клик открывает карточку во вкладке
pub fn work_order_list(
    title: &'static str,
    orders: Vec<WorkOrder>,
    now: DateTime<Utc>,
    empty: &'static str,
) -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let is_empty = orders.is_empty();
    view! {
        <div class="dashboard__panel">
            <h3 class="dashboard__panel-title">{title}</h3>
            {is_empty.then(|| view! { <div class="empty-state">{empty}</div> })}
            <ul class="dashboard__list">
                {orders
                    .into_iter()
                    .map(|wo| {
                        let key = WorkOrder::detail_key(wo.id.as_str());
                        let overdue = wo.is_overdue(now);
                        view! {
                            <li class="dashboard__list-item">
                                <a
                                    href="#"
                                    class="table__link"
                                    on:click=move |ev| {
                                        ev.prevent_default();
                                        tabs_store.open_tab(&key, &title_for_key(&key));
                                    }
                                >
                                    {format!("{} {}", wo.id, wo.title)}
                                </a>
                                <UiBadge variant=status_variant(wo.status)>{wo.status.label()}</UiBadge>
                                <UiBadge variant=priority_variant(wo.priority)>{wo.priority.label()}</UiBadge>
                                <span class="dashboard__muted" class:text-error=overdue>
                                    {due_label(wo.due_date, now)}
                                </span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}

pub fn maintenance_list(title: &'static str, schedules: Vec<MaintenanceSchedule>) -> impl IntoView {
    let is_empty = schedules.is_empty();
    view! {
        <div class="dashboard__panel">
            <h3 class="dashboard__panel-title">{title}</h3>
            {is_empty.then(|| view! { <div class="empty-state">"Nothing scheduled"</div> })}
            <ul class="dashboard__list">
                {schedules
                    .into_iter()
                    .map(|s| view! {
                        <li class="dashboard__list-item">
                            <span>{s.equipment_name.clone()}</span>
                            <span class="dashboard__muted">{s.schedule_type.label()}</span>
                            <span class="dashboard__muted">{format_date(s.next_due)}</span>
                        </li>
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}

pub fn low_stock_list(parts: Vec<Part>) -> impl IntoView {
    let is_empty = parts.is_empty();
    view! {
        <div class="dashboard__panel">
            <h3 class="dashboard__panel-title">"Low stock"</h3>
            {is_empty.then(|| view! { <div class="empty-state">"All parts are stocked"</div> })}
            <ul class="dashboard__list">
                {parts
                    .into_iter()
                    .map(|p| {
                        let level = p.stock_level();
                        view! {
                            <li class="dashboard__list-item">
                                <span>{p.name.clone()}</span>
                                <span class="dashboard__muted">{p.part_number.clone()}</span>
                                <UiBadge variant=stock_variant(level)>
                                    {format!("{} ({} on hand)", level.label(), p.quantity_on_hand)}
                                </UiBadge>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}
