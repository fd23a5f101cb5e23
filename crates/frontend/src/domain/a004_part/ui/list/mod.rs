mod adjust_stock;

use contracts::domain::a004_part::{Part, StockLevel};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a004_part::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{title_for_key, NEW_ID};
use crate::shared::components::ui::Badge as UiBadge;
use crate::shared::date_utils::format_money;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    cmp_text, get_sort_class, get_sort_indicator, highlight_matches, sort_list, SortState, Sortable,
};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_auth;
use adjust_stock::AdjustStockModal;

impl Sortable for Part {
    fn compare_by_field(&self, other: &Self, field: &str) -> std::cmp::Ordering {
        match field {
            "part_number" => cmp_text(&self.part_number, &other.part_number),
            "category" => cmp_text(&self.category, &other.category),
            "quantity" => self.quantity_on_hand.cmp(&other.quantity_on_hand),
            "unit_cost" => self.unit_cost.total_cmp(&other.unit_cost),
            "total_value" => self.total_value.total_cmp(&other.total_value),
            _ => cmp_text(&self.name, &other.name),
        }
    }
}

pub fn stock_variant(level: StockLevel) -> &'static str {
    match level {
        StockLevel::Out => "error",
        StockLevel::Low => "warning",
        StockLevel::Reorder => "primary",
        StockLevel::Ok => "success",
    }
}

#[component]
pub fn PartList() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();
    let all_items: RwSignal<Vec<Part>> = RwSignal::new(Vec::new());
    let sort = RwSignal::new(SortState::new("name"));
    let search = RwSignal::new(String::new());
    let low_only = RwSignal::new(false);
    let adjusting: RwSignal<Option<Part>> = RwSignal::new(None);
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let can_manage = move || auth_state.get().can("parts:update");
    let can_use = move || auth_state.get().can("parts:use") || can_manage();

    let visible = Memo::new(move |_| {
        let query = search.get().trim().to_lowercase();
        let low = low_only.get();
        let mut rows: Vec<Part> = all_items
            .get()
            .into_iter()
            .filter(|p| !low || p.stock_level().needs_attention())
            .filter(|p| {
                query.is_empty()
                    || p.name.to_lowercase().contains(&query)
                    || p.part_number.to_lowercase().contains(&query)
            })
            .collect();
        sort.with(|s| sort_list(&mut rows, &s.field, s.ascending));
        rows
    });

    let inventory_value = move || visible.with(|rows| rows.iter().map(|p| p.total_value).sum::<f64>());

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_parts().await {
                Ok(data) => {
                    leptos::logging::log!("🔩 Loaded {} parts", data.len());
                    all_items.set(data);
                }
                Err(e) => {
                    log::warn!("Failed to load parts: {}", e);
                    set_error.set(Some(format!("Failed to load parts: {}", e)));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load_data());

    let replace_part = move |updated: Part| {
        all_items.update(|list| {
            if let Some(row) = list.iter_mut().find(|p| p.id == updated.id) {
                *row = updated;
            }
        });
    };

    let open_detail = move |id: String| {
        let key = Part::detail_key(&id);
        tabs_store.open_tab(&key, &title_for_key(&key));
    };

    let on_delete = move |item: Part| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message(&format!("Delete part {}?", item.part_number)).ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_part(item.id.to_string()).await {
                Ok(()) => all_items.update(|list| list.retain(|p| p.id != item.id)),
                Err(e) => set_error.set(Some(format!("Failed to delete part: {}", e))),
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
        <PageFrame page_id="a004_part--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Part::list_name()}</h1>
                    <UiBadge variant="primary">{move || visible.get().len().to_string()}</UiBadge>
                    <span class="page__subtitle">
                        {move || format!("Value: {}", format_money(inventory_value()))}
                    </span>
                </div>
                <div class="page__header-right">
                    <Show when=can_manage>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| open_detail(NEW_ID.to_string())
                        >
                            {icon("plus")}
                            " New part"
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
                        <Flex gap=FlexGap::Small align=FlexAlign::Center>
                            <div style="flex: 1; max-width: 320px;">
                                <Input value=search placeholder="Name or part number..." />
                            </div>
                            <Checkbox checked=low_only label="Low stock only" />
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
                                <TableHeaderCell resizable=false min_width=120.0>
                                    {sort_header("Part #", "part_number")}
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=110.0>
                                    {sort_header("Category", "category")}
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=140.0>"Location"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=90.0>
                                    {sort_header("On hand", "quantity")}
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=110.0>"Stock"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=90.0>
                                    {sort_header("Unit cost", "unit_cost")}
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=100.0>
                                    {sort_header("Value", "total_value")}
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=100.0></TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible.get()
                                key=|p| (p.id.clone(), p.quantity_on_hand, p.updated_at)
                                children=move |item: Part| {
                                    let query = search.get_untracked();
                                    let id = item.id.to_string();
                                    let level = item.stock_level();
                                    let for_adjust = item.clone();
                                    let for_delete = item.clone();
                                    let name_hl = highlight_matches(&item.name, &query);
                                    let part_number_hl = highlight_matches(&item.part_number, &query);
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
                                                    {part_number_hl}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{item.category.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {item.location_name.clone().unwrap_or_default()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {format!("{} / min {}", item.quantity_on_hand, item.minimum_stock_level)}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <UiBadge variant=stock_variant(level)>{level.label()}</UiBadge>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format_money(item.unit_cost)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format_money(item.total_value)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Flex gap=FlexGap::Small>
                                                    <Show when=can_use>
                                                        <Button
                                                            appearance=ButtonAppearance::Subtle
                                                            on_click={
                                                                let item = for_adjust.clone();
                                                                move |_| adjusting.set(Some(item.clone()))
                                                            }
                                                            attr:title="Adjust stock"
                                                        >
                                                            {icon("parts")}
                                                        </Button>
                                                    </Show>
                                                    <Show when=can_manage>
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

                {move || adjusting.get().map(|part| view! {
                    <AdjustStockModal
                        part=part
                        on_close=move || adjusting.set(None)
                        on_adjusted=move |updated: Part| {
                            adjusting.set(None);
                            replace_part(updated);
                        }
                    />
                })}
            </div>
        </PageFrame>
    }
}
