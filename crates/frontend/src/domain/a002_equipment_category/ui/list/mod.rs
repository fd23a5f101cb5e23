//! Справочник категорий: список с модальной формой создания и правки

use contracts::domain::a002_equipment_category::{EquipmentCategory, EquipmentCategoryDto};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a002_equipment_category::api;
use crate::shared::components::ui::Badge as UiBadge;
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_text, sort_list, Sortable};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_auth;

impl Sortable for EquipmentCategory {
    fn compare_by_field(&self, other: &Self, field: &str) -> std::cmp::Ordering {
        match field {
            "description" => self.description.cmp(&other.description),
            _ => cmp_text(&self.name, &other.name),
        }
    }
}

#[component]
pub fn CategoryList() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let items: RwSignal<Vec<EquipmentCategory>> = RwSignal::new(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    // None: форма закрыта; Some(dto): создание (id = None) или правка
    let editing: RwSignal<Option<EquipmentCategoryDto>> = RwSignal::new(None);

    let can_edit = move || auth_state.get().can("equipment:update");

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_categories().await {
                Ok(mut data) => {
                    leptos::logging::log!("🏷️ Loaded {} categories", data.len());
                    sort_list(&mut data, "name", true);
                    items.set(data);
                }
                Err(e) => {
                    log::warn!("Failed to load categories: {}", e);
                    set_error.set(Some(format!("Failed to load categories: {}", e)));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load_data());

    let on_delete = move |item: EquipmentCategory| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message(&format!("Delete category {}?", item.name)).ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_category(item.id.to_string()).await {
                Ok(()) => items.update(|list| list.retain(|c| c.id != item.id)),
                Err(e) => set_error.set(Some(format!("Failed to delete category: {}", e))),
            }
        });
    };

    view! {
        <PageFrame page_id="a002_equipment_category--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{EquipmentCategory::list_name()}</h1>
                    <UiBadge variant="primary">{move || items.get().len().to_string()}</UiBadge>
                </div>
                <div class="page__header-right">
                    <Show when=can_edit>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| editing.set(Some(EquipmentCategoryDto::default()))
                        >
                            {icon("plus")}
                            " New category"
                        </Button>
                    </Show>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell resizable=false min_width=200.0>"Name"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=300.0>"Description"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=100.0></TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || items.get()
                                key=|c| (c.id.clone(), c.name.clone(), c.description.clone())
                                children=move |item: EquipmentCategory| {
                                    let for_edit = item.to_dto();
                                    let for_delete = item.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-weight: 500;">{item.name.clone()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {item.description.clone().unwrap_or_default()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Show when=can_edit>
                                                    {
                                                    let for_edit = for_edit.clone();
                                                    let for_delete = for_delete.clone();
                                                    view! {
                                                    <Flex gap=FlexGap::Small>
                                                        <Button
                                                            appearance=ButtonAppearance::Subtle
                                                            on_click={
                                                                let dto = for_edit.clone();
                                                                move |_| editing.set(Some(dto.clone()))
                                                            }
                                                            attr:title="Edit"
                                                        >
                                                            {icon("category")}
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
                                                    </Flex>
                                                    }
                                                    }
                                                </Show>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                {move || editing.get().map(|dto| view! {
                    <CategoryForm
                        dto=dto
                        existing=items.get_untracked()
                        on_close=move || editing.set(None)
                        on_saved=move || {
                            editing.set(None);
                            load_data();
                        }
                    />
                })}
            </div>
        </PageFrame>
    }
}

#[component]
fn CategoryForm<F1, F2>(
    dto: EquipmentCategoryDto,
    existing: Vec<EquipmentCategory>,
    on_close: F1,
    on_saved: F2,
) -> impl IntoView
where
    F1: Fn() + 'static + Copy + Send + Sync,
    F2: Fn() + 'static + Copy + Send + Sync,
{
    let id = dto.id.clone();
    let title = if id.is_some() { "Edit category" } else { "New category" };
    let name = RwSignal::new(dto.name);
    let description = RwSignal::new(dto.description);
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);
    let existing = StoredValue::new(existing);

    let on_save = move |_| {
        let dto = EquipmentCategoryDto {
            id: id.clone(),
            name: name.get(),
            description: description.get(),
        };
        if let Err(msg) = existing.with_value(|list| dto.validate(list)) {
            set_error.set(Some(msg));
            return;
        }

        set_saving.set(true);
        spawn_local(async move {
            let result = match dto.id.clone() {
                Some(id) => api::update_category(id, dto).await,
                None => api::create_category(dto).await,
            };
            match result {
                Ok(saved) => {
                    leptos::logging::log!("✅ Category {} saved", saved.name);
                    on_saved();
                }
                Err(e) => {
                    set_error.set(Some(e.to_string()));
                    set_saving.set(false);
                }
            }
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close()>
            <div class="modal" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close()>
                        {icon("x")}
                    </Button>
                </div>

                <div class="modal-body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
                    <div class="form__group">
                        <Label>"Name *"</Label>
                        <Input value=name />
                    </div>
                    <div class="form__group">
                        <Label>"Description"</Label>
                        <Input value=description />
                    </div>
                </div>

                <div class="modal-footer">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close()>
                        "Cancel"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=on_save
                        disabled=Signal::derive(move || saving.get())
                    >
                        {icon("save")}
                        {move || if saving.get() { " Saving..." } else { " Save" }}
                    </Button>
                </div>
            </div>
        </div>
    }
}
