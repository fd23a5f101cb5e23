use chrono::Utc;
use contracts::domain::a005_work_order::WorkOrder;
use contracts::domain::a006_maintenance_schedule::{self as schedule, MaintenanceSchedule, SchedulePatch};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::{due_state, DueState};
use crate::domain::a005_work_order::ui::priority_variant;
use crate::domain::a006_maintenance_schedule::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{title_for_key, NEW_ID};
use crate::shared::components::ui::Badge as UiBadge;
use crate::shared::date_utils::{format_date, format_opt_date};
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    cmp_text, get_sort_class, get_sort_indicator, highlight_matches, sort_list, SortState, Sortable,
};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_auth;

impl Sortable for MaintenanceSchedule {
    fn compare_by_field(&self, other: &Self, field: &str) -> std::cmp::Ordering {
        match field {
            "equipment" => cmp_text(&self.equipment_name, &other.equipment_name),
            "type" => self.schedule_type.as_str().cmp(other.schedule_type.as_str()),
            "priority" => self.priority.cmp(&other.priority),
            "last_performed" => self.last_performed.cmp(&other.last_performed),
            _ => self.next_due.cmp(&other.next_due),
        }
    }
}

/// Отбор по сроку: все / ближайшие / просроченные
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DueFilter {
    All,
    Upcoming,
    Overdue,
}

#[component]
pub fn ScheduleList() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();
    let all_items: RwSignal<Vec<MaintenanceSchedule>> = RwSignal::new(Vec::new());
    let sort = RwSignal::new(SortState::new("next_due"));
    let search = RwSignal::new(String::new());
    let due_filter = RwSignal::new(DueFilter::All);
    let generating: RwSignal<Option<String>> = RwSignal::new(None);
    let (error, set_error) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let can_manage = move || auth_state.get().can("schedule:update");
    let can_generate = move || auth_state.get().can("workorder:create");

    let upcoming_count = Memo::new(move |_| {
        all_items.with(|list| schedule::upcoming(list, Utc::now(), schedule::DEFAULT_UPCOMING_DAYS).len())
    });
    let overdue_count = Memo::new(move |_| all_items.with(|list| schedule::overdue(list, Utc::now()).len()));

    let visible = Memo::new(move |_| {
        let now = Utc::now();
        let query = search.get().trim().to_lowercase();
        let mode = due_filter.get();
        let mut rows: Vec<MaintenanceSchedule> = all_items.with(|list| match mode {
            DueFilter::All => list.iter().collect::<Vec<_>>(),
            DueFilter::Upcoming => schedule::upcoming(list, now, schedule::DEFAULT_UPCOMING_DAYS),
            DueFilter::Overdue => schedule::overdue(list, now),
        }
        .into_iter()
        .filter(|s| query.is_empty() || s.equipment_name.to_lowercase().contains(&query))
        .cloned()
        .collect());
        sort.with(|s| sort_list(&mut rows, &s.field, s.ascending));
        rows
    });

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_schedules().await {
                Ok(data) => {
                    leptos::logging::log!("📅 Loaded {} maintenance schedules", data.len());
                    all_items.set(data);
                }
                Err(e) => {
                    log::warn!("Failed to load schedules: {}", e);
                    set_error.set(Some(format!("Failed to load schedules: {}", e)));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load_data());

    let open_tab = move |key: String| tabs_store.open_tab(&key, &title_for_key(&key));

    let on_toggle_active = move |item: MaintenanceSchedule| {
        spawn_local(async move {
            match api::update_schedule(item.id.to_string(), SchedulePatch::active(!item.is_active)).await {
                Ok(updated) => all_items.update(|list| {
                    if let Some(row) = list.iter_mut().find(|s| s.id == updated.id) {
                        *row = updated;
                    }
                }),
                Err(e) => set_error.set(Some(format!("Failed to update schedule: {}", e))),
            }
        });
    };

    let on_generate = move |id: String| {
        generating.set(Some(id.clone()));
        set_notice.set(None);
        spawn_local(async move {
            match api::generate_work_order(id).await {
                Ok(order) => {
                    leptos::logging::log!("🛠️ Generated work order {}", order.id);
                    set_notice.set(Some(format!("Work order {} created", order.id)));
                    open_tab(WorkOrder::detail_key(order.id.as_str()));
                }
                Err(e) => set_error.set(Some(format!("Failed to generate work order: {}", e))),
            }
            generating.set(None);
        });
    };

    let on_delete = move |item: MaintenanceSchedule| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!("Delete schedule for {}?", item.equipment_name))
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_schedule(item.id.to_string()).await {
                Ok(()) => all_items.update(|list| list.retain(|s| s.id != item.id)),
                Err(e) => set_error.set(Some(format!("Failed to delete schedule: {}", e))),
            }
        });
    };

    let sort_header = move |label: &'static str, field: &'static str| {
        view! {
            <div
                class="table__sortable-header"
                style="cursor:pointer;"
                on:click=move |_| sort.update(|s| s.toggle(field))
            >
                {label}
                <span class=move || sort.with(|s| get_sort_class(&s.field, field))>
                    {move || sort.with(|s| get_sort_indicator(&s.field, field, s.ascending))}
                </span>
            </div>
        }
    };

    let filter_button = move |label: &'static str, mode: DueFilter, count: Option<Memo<usize>>| {
        view! {
            <Button
                appearance=move || if due_filter.get() == mode { ButtonAppearance::Primary } else { ButtonAppearance::Secondary }
                on_click=move |_| due_filter.set(mode)
            >
                {label}
                {count.map(|c| view! { <span class="filter-count">{move || format!(" ({})", c.get())}</span> })}
            </Button>
        }
    };

    view! {
        <PageFrame page_id="a006_maintenance_schedule--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{MaintenanceSchedule::list_name()}</h1>
                    <UiBadge variant="primary">{move || visible.get().len().to_string()}</UiBadge>
                </div>
                <div class="page__header-right">
                    <Show when=can_manage>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| open_tab(MaintenanceSchedule::detail_key(NEW_ID))
                        >
                            {icon("plus")}
                            " New schedule"
                        </Button>
                    </Show>
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

                <div class="filter-panel">
                    <div class="filter-panel-content">
                        <Flex gap=FlexGap::Small align=FlexAlign::Center>
                            <div style="flex: 1; max-width: 320px;">
                                <Input value=search placeholder="Equipment..." />
                            </div>
                            {filter_button("All", DueFilter::All, None)}
                            {filter_button("Upcoming", DueFilter::Upcoming, Some(upcoming_count))}
                            {filter_button("Overdue", DueFilter::Overdue, Some(overdue_count))}
                        </Flex>
                    </div>
                </div>

                <Show
                    when=move || !(loading.get() && all_items.with(|l| l.is_empty()))
                    fallback=|| view! { <div class="page__loading"><Spinner /></div> }
                >
                    <div class="table-wrapper">
                        <Table attr:style="width: 100%;">
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell resizable=false min_width=200.0>
                                        {sort_header("Equipment", "equipment")}
                                    </TableHeaderCell>
                                    <TableHeaderCell resizable=false min_width=120.0>
                                        {sort_header("Type", "type")}
                                    </TableHeaderCell>
                                    <TableHeaderCell resizable=false min_width=130.0>"Frequency"</TableHeaderCell>
                                    <TableHeaderCell resizable=false min_width=90.0>
                                        {sort_header("Priority", "priority")}
                                    </TableHeaderCell>
                                    <TableHeaderCell resizable=false min_width=110.0>
                                        {sort_header("Last performed", "last_performed")}
                                    </TableHeaderCell>
                                    <TableHeaderCell resizable=false min_width=110.0>
                                        {sort_header("Next due", "next_due")}
                                    </TableHeaderCell>
                                    <TableHeaderCell resizable=false min_width=100.0>"State"</TableHeaderCell>
                                    <TableHeaderCell resizable=false min_width=160.0></TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                <For
                                    each=move || visible.get()
                                    key=|s| (s.id.clone(), s.is_active, s.next_due, s.frequency_value)
                                    children=move |item: MaintenanceSchedule| {
                                        let query = search.get_untracked();
                                        let key = MaintenanceSchedule::detail_key(item.id.as_str());
                                        let state = due_state(&item, Utc::now());
                                        let id = item.id.to_string();
                                        let is_active = item.is_active;
                                        let for_toggle = item.clone();
                                        let for_delete = item.clone();
                                        let is_busy = {
                                            let id = id.clone();
                                            move || generating.get().as_deref() == Some(id.as_str())
                                        };
                                        let equipment_name_hl = highlight_matches(&item.equipment_name, &query);
                                        let frequency_label = item.frequency_label();
                                        view! {
                                            <TableRow>
                                                <TableCell>
                                                    <TableCellLayout truncate=true>
                                                        <a
                                                            href="#"
                                                            class="table__link"
                                                            on:click=move |ev| {
                                                                ev.prevent_default();
                                                                open_tab(key.clone());
                                                            }
                                                        >
                                                            {equipment_name_hl}
                                                        </a>
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>{item.schedule_type.label()}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>{frequency_label}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>
                                                        <UiBadge variant=priority_variant(item.priority)>{item.priority.label()}</UiBadge>
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>{format_opt_date(item.last_performed)}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>
                                                        <span class:text-error=state == DueState::Overdue>
                                                            {format_date(item.next_due)}
                                                        </span>
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>
                                                        <UiBadge variant=state.badge_variant()>{state.label()}</UiBadge>
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <Flex gap=FlexGap::Small>
                                                        <Show when=move || can_generate() && is_active>
                                                            <Button
                                                                appearance=ButtonAppearance::Subtle
                                                                on_click={
                                                                    let id = id.clone();
                                                                    move |_| on_generate(id.clone())
                                                                }
                                                                disabled=Signal::derive(is_busy.clone())
                                                                attr:title="Generate work order"
                                                            >
                                                                {icon("work-orders")}
                                                            </Button>
                                                        </Show>
                                                        <Show when=can_manage>
                                                            <Button
                                                                appearance=ButtonAppearance::Subtle
                                                                on_click={
                                                                    let item = for_toggle.clone();
                                                                    move |_| on_toggle_active(item.clone())
                                                                }
                                                                attr:title=if for_toggle.is_active { "Deactivate" } else { "Activate" }
                                                            >
                                                                {icon(if for_toggle.is_active { "x" } else { "check" })}
                                                            </Button>
                                                            <Button
                                                                appearance=ButtonAppearance::Subtle
                                                                on_click={
                                                                    let item = for_delete.clone();
                                                                    move |_| on_delete(item.clone())
                                                                }
                                                                attr:title="Delete"
                                                            >
                                                                {icon("delete")}
                                                            </Button>
                                                        </Show>
                                                    </Flex>
                                                </TableCell>
                                            </TableRow>
                                        }
                                    }
                                />
                            </TableBody>
                        </Table>
                    </div>
                </Show>
            </div>
        </PageFrame>
    }
}

