mod state;

use contracts::domain::a001_equipment::{Equipment, EquipmentStatus, HealthLevel};
use contracts::domain::a002_equipment_category::EquipmentCategory;
use contracts::domain::a003_location::Location;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_equipment::api;
use crate::domain::a002_equipment_category::api::fetch_categories;
use crate::domain::a003_location::api::fetch_locations;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{title_for_key, NEW_ID};
use crate::shared::components::ui::{Badge as UiBadge, HealthBar};
use crate::shared::date_utils::format_opt_date;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    cmp_text, get_sort_class, get_sort_indicator, highlight_matches, sort_list, Sortable,
};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_auth;
use state::create_state;

impl Sortable for Equipment {
    fn compare_by_field(&self, other: &Self, field: &str) -> std::cmp::Ordering {
        match field {
            "serial_number" => cmp_text(&self.serial_number, &other.serial_number),
            "category" => cmp_text(&self.category_name, &other.category_name),
            "location" => cmp_text(&self.location_name, &other.location_name),
            "status" => self.status.as_str().cmp(other.status.as_str()),
            "health_score" => self.health_score.cmp(&other.health_score),
            "last_maintenance" => self.last_maintenance_date.cmp(&other.last_maintenance_date),
            _ => cmp_text(&self.name, &other.name),
        }
    }
}

pub fn status_variant(status: EquipmentStatus) -> &'static str {
    match status {
        EquipmentStatus::Operational => "success",
        EquipmentStatus::Maintenance => "warning",
        EquipmentStatus::Down => "error",
        EquipmentStatus::Scrapped => "neutral",
    }
}

pub fn health_level_class(level: HealthLevel) -> &'static str {
    match level {
        HealthLevel::Good => "good",
        HealthLevel::Fair => "fair",
        HealthLevel::Poor => "poor",
    }
}

#[component]
pub fn EquipmentList() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();
    let state = create_state();
    let all_items: RwSignal<Vec<Equipment>> = RwSignal::new(Vec::new());
    let categories: RwSignal<Vec<EquipmentCategory>> = RwSignal::new(Vec::new());
    let locations: RwSignal<Vec<Location>> = RwSignal::new(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let can_create = move || auth_state.get().can("equipment:create");
    let can_delete = move || auth_state.get().can("equipment:delete");

    // Фильтрация и сортировка на клиенте
    let refresh_view = move || {
        let source = all_items.get_untracked();
        state.update(|s| {
            let mut data = s.filter.apply(&source);
            sort_list(&mut data, &s.sort_field, s.sort_ascending);
            s.total_count = source.len();
            s.items = data;
        });
    };

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_equipment().await {
                Ok(data) => {
                    leptos::logging::log!("🏭 Loaded {} equipment items", data.len());
                    all_items.set(data);
                    state.update(|s| s.is_loaded = true);
                    refresh_view();
                }
                Err(e) => {
                    log::warn!("Failed to load equipment: {}", e);
                    set_error.set(Some(format!("Failed to load equipment: {}", e)));
                }
            }
            set_loading.set(false);
        });
    };

    let load_references = move || {
        spawn_local(async move {
            if let Ok(list) = fetch_categories().await {
                categories.set(list);
            }
            if let Ok(list) = fetch_locations().await {
                locations.set(list);
            }
        });
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_data();
            load_references();
        }
    });

    let search_signal = RwSignal::new(String::new());
    Effect::new(move |_| {
        let query = search_signal.get();
        if state.with_untracked(|s| s.filter.search != query) {
            state.update(|s| s.filter.search = query);
            refresh_view();
        }
    });

    let clear_filters = move || {
        search_signal.set(String::new());
        state.update(|s| s.filter.clear());
        refresh_view();
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

    let open_detail = move |id: String| {
        let key = Equipment::detail_key(&id);
        tabs_store.open_tab(&key, &title_for_key(&key));
    };

    let on_delete = move |item: Equipment| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message(&format!("Delete {}?", item.name)).ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_equipment(item.id.to_string()).await {
                Ok(()) => {
                    leptos::logging::log!("🗑️ Equipment {} deleted", item.id);
                    all_items.update(|list| list.retain(|e| e.id != item.id));
                    refresh_view();
                }
                Err(e) => set_error.set(Some(format!("Failed to delete equipment: {}", e))),
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
        <PageFrame page_id="a001_equipment--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Equipment::list_name()}</h1>
                    <UiBadge variant="primary">{move || state.get().counter_label()}</UiBadge>
                </div>
                <div class="page__header-right">
                    <Show when=can_create>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| open_detail(NEW_ID.to_string())
                        >
                            {icon("plus")}
                            " Add equipment"
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

                <div class="filter-panel">
                    <div class="filter-panel-content">
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <div style="flex: 1; max-width: 320px;">
                                <Input value=search_signal placeholder="Name or serial number..." />
                            </div>
                            <select
                                class="form__select"
                                prop:value=move || state.get().filter.category_id
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    state.update(|s| s.filter.category_id = value);
                                    refresh_view();
                                }
                            >
                                <option value="">"All categories"</option>
                                {move || categories
                                    .get()
                                    .into_iter()
                                    .map(|c| view! { <option value=c.id.0.clone()>{c.name}</option> })
                                    .collect_view()}
                            </select>
                            <select
                                class="form__select"
                                prop:value=move || state.get().filter.location_id
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    state.update(|s| s.filter.location_id = value);
                                    refresh_view();
                                }
                            >
                                <option value="">"All locations"</option>
                                {move || locations
                                    .get()
                                    .into_iter()
                                    .map(|l| view! { <option value=l.id.0.clone()>{l.name}</option> })
                                    .collect_view()}
                            </select>
                            <select
                                class="form__select"
                                prop:value=move || state.get().filter.status
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    state.update(|s| s.filter.status = value);
                                    refresh_view();
                                }
                            >
                                <option value="">"All statuses"</option>
                                {EquipmentStatus::ALL
                                    .iter()
                                    .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                    .collect_view()}
                            </select>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| clear_filters()
                                disabled=Signal::derive(move || !state.with(|s| s.filter.is_active()))
                            >
                                "Clear filters"
                            </Button>
                        </Flex>
                    </div>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell resizable=false min_width=200.0>
                                    {sort_header("Name", "name")}
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=140.0>
                                    {sort_header("Serial", "serial_number")}
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=120.0>
                                    {sort_header("Category", "category")}
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=160.0>
                                    {sort_header("Location", "location")}
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=110.0>
                                    {sort_header("Status", "status")}
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=140.0>
                                    {sort_header("Health", "health_score")}
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=120.0>
                                    {sort_header("Last service", "last_maintenance")}
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=60.0></TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || state.get().items
                                key=|e| (e.id.clone(), e.status, e.health_score, e.name.clone())
                                children=move |item: Equipment| {
                                    let query = state.with_untracked(|s| s.filter.search.clone());
                                    let id = item.id.to_string();
                                    let for_delete = item.clone();
                                    let name_hl = highlight_matches(&item.name, &query);
                                    let serial_hl = highlight_matches(&item.serial_number, &query);
                                    let health_level = health_level_class(item.health_level());
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <a
                                                        href="#"
                                                        class="table__link"
                                                        on:click=move |ev| {
                                                            ev.prevent_default();
                                                            open_detail(id.clone());
                                                        }
                                                    >
                                                        {name_hl}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {serial_hl}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{item.category_name.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{item.location_name.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <UiBadge variant=status_variant(item.status)>{item.status.label()}</UiBadge>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <HealthBar
                                                    score=item.health_score
                                                    level=health_level
                                                />
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format_opt_date(item.last_maintenance_date)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Show when=can_delete>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click={
                                                            let for_delete = for_delete.clone();
                                                            move |_| on_delete(for_delete.clone())
                                                        }
                                                        attr:title="Delete"
                                                    >
                                                        {icon("delete")}
                                                    </Button>
                                                </Show>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                <Show when=move || state.with(|s| s.is_loaded && s.items.is_empty())>
                    <div class="empty-state">"No equipment matches the current filters."</div>
                </Show>
            </div>
        </PageFrame>
    }
}
