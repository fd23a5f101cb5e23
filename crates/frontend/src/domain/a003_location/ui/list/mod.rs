use contracts::domain::a003_location::{Location, LocationStatus};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a003_location::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{title_for_key, NEW_ID};
use crate::shared::components::ui::Badge as UiBadge;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    cmp_text, get_sort_class, get_sort_indicator, highlight_matches, sort_list, SortState, Sortable,
};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_auth;

impl Sortable for Location {
    fn compare_by_field(&self, other: &Self, field: &str) -> std::cmp::Ordering {
        match field {
            "type" => self.location_type.as_str().cmp(other.location_type.as_str()),
            "status" => self.status.as_str().cmp(other.status.as_str()),
            "city" => cmp_text(&self.city, &other.city),
            "equipment_count" => self.equipment_count.cmp(&other.equipment_count),
            _ => cmp_text(&self.name, &other.name),
        }
    }
}

fn status_variant(status: LocationStatus) -> &'static str {
    match status {
        LocationStatus::Active => "success",
        LocationStatus::Inactive => "neutral",
        LocationStatus::Maintenance => "warning",
    }
}

#[component]
pub fn LocationList() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();
    let all_items: RwSignal<Vec<Location>> = RwSignal::new(Vec::new());
    let sort = RwSignal::new(SortState::new("name"));
    let search = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let can_edit = move || auth_state.get().can("equipment:update");

    // Поиск по названию и городу
    let visible = Memo::new(move |_| {
        let query = search.get().trim().to_lowercase();
        let mut rows: Vec<Location> = all_items
            .get()
            .into_iter()
            .filter(|l| {
                query.is_empty()
                    || l.name.to_lowercase().contains(&query)
                    || l.city.to_lowercase().contains(&query)
            })
            .collect();
        sort.with(|s| sort_list(&mut rows, &s.field, s.ascending));
        rows
    });

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_locations().await {
                Ok(data) => {
                    leptos::logging::log!("📍 Loaded {} locations", data.len());
                    all_items.set(data);
                }
                Err(e) => {
                    log::warn!("Failed to load locations: {}", e);
                    set_error.set(Some(format!("Failed to load locations: {}", e)));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load_data());

    let open_detail = move |id: String| {
        let key = Location::detail_key(&id);
        tabs_store.open_tab(&key, &title_for_key(&key));
    };

    let on_delete = move |item: Location| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message(&format!("Delete location {}?", item.name)).ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_location(item.id.to_string()).await {
                Ok(()) => all_items.update(|list| list.retain(|l| l.id != item.id)),
                Err(e) => set_error.set(Some(format!("Failed to delete location: {}", e))),
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

    view! {
        <PageFrame page_id="a003_location--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Location::list_name()}</h1>
                    <UiBadge variant="primary">{move || visible.get().len().to_string()}</UiBadge>
                </div>
                <div class="page__header-right">
                    <Show when=can_edit>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| open_detail(NEW_ID.to_string())
                        >
                            {icon("plus")}
                            " New location"
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
                        <div style="max-width: 320px;">
                            <Input value=search placeholder="Name or city..." />
                        </div>
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
                                    <TableHeaderCell resizable=false min_width=180.0>
                                        {sort_header("Name", "name")}
                                    </TableHeaderCell>
                                    <TableHeaderCell resizable=false min_width=100.0>
                                        {sort_header("Type", "type")}
                                    </TableHeaderCell>
                                    <TableHeaderCell resizable=false min_width=100.0>
                                        {sort_header("Status", "status")}
                                    </TableHeaderCell>
                                    <TableHeaderCell resizable=false min_width=260.0>
                                        {sort_header("Address", "city")}
                                    </TableHeaderCell>
                                    <TableHeaderCell resizable=false min_width=90.0>
                                        {sort_header("Equipment", "equipment_count")}
                                    </TableHeaderCell>
                                    <TableHeaderCell resizable=false min_width=140.0>"Manager"</TableHeaderCell>
                                    <TableHeaderCell resizable=false min_width=60.0></TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                <For
                                    each=move || visible.get()
                                    key=|l| (l.id.clone(), l.updated_at)
                                    children=move |item: Location| {
                                        let query = search.get_untracked();
                                        let id = item.id.to_string();
                                        let for_delete = item.clone();
                                        let name_hl = highlight_matches(&item.name, &query);
                                        let full_address = item.full_address();
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
                                                    <TableCellLayout>{item.location_type.label()}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>
                                                        <UiBadge variant=status_variant(item.status)>{item.status.label()}</UiBadge>
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout truncate=true>{full_address}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>{item.equipment_count}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout truncate=true>
                                                        {item.manager.clone().unwrap_or_default()}
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <Show when=can_edit>
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
