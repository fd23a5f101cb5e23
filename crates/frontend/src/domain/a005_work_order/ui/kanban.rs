//! Канбан-доска нарядов.
//!
//! Карточки перетаскиваются между колонками (HTML5 DnD). Статус меняется
//! на доске сразу и откатывается, если сервер вернул ошибку.

use chrono::{DateTime, Utc};
use contracts::domain::a005_work_order::{
    group_by_status, move_card, WorkOrder, WorkOrderId, WorkOrderPatch, WorkOrderStatus,
};
use leptos::ev::DragEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::create::WorkOrderCreateForm;
use super::details::WorkOrderDetail;
use super::priority_variant;
use crate::domain::a005_work_order::api;
use crate::shared::components::ui::Badge as UiBadge;
use crate::shared::date_utils::due_label;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_CUSTOM;
use crate::system::auth::context::use_auth;

const DRAG_FORMAT: &str = "text/plain";

#[component]
fn KanbanCard(
    order: WorkOrder,
    now: DateTime<Utc>,
    draggable: bool,
    dragging: RwSignal<Option<WorkOrderId>>,
    on_open: Callback<String>,
) -> impl IntoView {
    let id = order.id.clone();
    let id_for_open = order.id.to_string();
    let (done, total) = order.task_progress();
    let overdue = order.is_overdue(now);
    let initials = order.assignee.as_ref().map(|a| a.initials());

    let on_drag_start = move |ev: DragEvent| {
        if let Some(dt) = ev.data_transfer() {
            if let Err(e) = dt.set_data(DRAG_FORMAT, id.as_str()) {
                log::warn!("dataTransfer.setData failed: {:?}", e);
            }
            dt.set_effect_allowed("move");
        }
        dragging.set(Some(id.clone()));
    };

    view! {
        <div
            class="kanban-card"
            class:kanban-card--overdue=overdue
            class:kanban-card--dragging={
                let id = order.id.clone();
                move || dragging.with(|d| d.as_ref() == Some(&id))
            }
            draggable=if draggable { "true" } else { "false" }
            on:dragstart=on_drag_start
            on:dragend=move |_| dragging.set(None)
            on:click=move |_| on_open.run(id_for_open.clone())
        >
            <div class="kanban-card__top">
                <span class="kanban-card__id">{order.id.to_string()}</span>
                <UiBadge variant=priority_variant(order.priority)>{order.priority.label()}</UiBadge>
            </div>
            <div class="kanban-card__title">{order.title.clone()}</div>
            <div class="kanban-card__bottom">
                <span class="kanban-card__due">{due_label(order.due_date, now)}</span>
                {(total > 0).then(|| view! {
                    <span class="kanban-card__tasks">{format!("☑ {}/{}", done, total)}</span>
                })}
                {initials.map(|i| view! { <span class="kanban-card__avatar">{i}</span> })}
            </div>
        </div>
    }
}

#[component]
pub fn KanbanBoard() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let orders: RwSignal<Vec<WorkOrder>> = RwSignal::new(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let dragging: RwSignal<Option<WorkOrderId>> = RwSignal::new(None);
    let drag_over: RwSignal<Option<WorkOrderStatus>> = RwSignal::new(None);
    let selected: RwSignal<Option<String>> = RwSignal::new(None);
    let (show_create, set_show_create) = signal(false);

    let can_update = move || auth_state.get().can("workorder:update");
    let can_create = move || auth_state.get().can("workorder:create");

    let columns = Memo::new(move |_| orders.with(|list| group_by_status(list)));

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_work_orders().await {
                Ok(data) => {
                    leptos::logging::log!("📋 Kanban loaded {} work orders", data.len());
                    orders.set(data);
                }
                Err(e) => {
                    log::warn!("Failed to load work orders: {}", e);
                    set_error.set(Some(format!("Failed to load work orders: {}", e)));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load_data());

    let replace_order = move |updated: WorkOrder| {
        orders.update(|list| {
            if let Some(row) = list.iter_mut().find(|wo| wo.id == updated.id) {
                *row = updated;
            }
        });
    };

    // Оптимистичный перенос; при ошибке карточка возвращается на место
    let drop_card = move |id: WorkOrderId, target: WorkOrderStatus| {
        let mut previous = None;
        orders.update(|list| previous = move_card(list, &id, target));
        let Some(previous) = previous else {
            return;
        };
        leptos::logging::log!("🧲 {} moved {} → {}", id, previous.as_str(), target.as_str());
        spawn_local(async move {
            match api::update_work_order(id.to_string(), WorkOrderPatch::status(target)).await {
                Ok(updated) => replace_order(updated),
                Err(e) => {
                    log::warn!("Status update for {} failed, rolling back: {}", id, e);
                    orders.update(|list| {
                        move_card(list, &id, previous);
                    });
                    set_error.set(Some(format!("Could not move {}: {}", id, e)));
                }
            }
        });
    };

    let on_drop = move |ev: DragEvent, target: WorkOrderStatus| {
        ev.prevent_default();
        drag_over.set(None);
        let from_transfer = ev
            .data_transfer()
            .and_then(|dt| dt.get_data(DRAG_FORMAT).ok())
            .filter(|s| !s.is_empty())
            .map(WorkOrderId);
        let Some(id) = from_transfer.or_else(|| dragging.get_untracked()) else {
            return;
        };
        dragging.set(None);
        drop_card(id, target);
    };

    let open_card = Callback::new(move |id: String| selected.set(Some(id)));

    view! {
        <PageFrame page_id="a005_work_order_kanban--custom" category=PAGE_CAT_CUSTOM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Work Order Board"</h1>
                </div>
                <div class="page__header-right">
                    <Show when=can_create>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| set_show_create.set(true)
                        >
                            {icon("plus")}
                            " New work order"
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

            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="kanban">
                <For
                    each=move || columns.get()
                    key=|col| (col.status, col.items.iter().map(|wo| (wo.id.to_string(), wo.status.as_str())).collect::<Vec<_>>())
                    children=move |col| {
                        let status = col.status;
                        let count = col.len();
                        let now = Utc::now();
                        let draggable = can_update();
                        view! {
                            <div
                                class="kanban__column"
                                class:kanban__column--over=move || drag_over.get() == Some(status)
                                on:dragover=move |ev: DragEvent| {
                                    ev.prevent_default();
                                    if drag_over.get_untracked() != Some(status) {
                                        drag_over.set(Some(status));
                                    }
                                }
                                on:dragleave=move |_| {
                                    if drag_over.get_untracked() == Some(status) {
                                        drag_over.set(None);
                                    }
                                }
                                on:drop=move |ev: DragEvent| on_drop(ev, status)
                            >
                                <div class="kanban__column-header">
                                    <span>{col.title}</span>
                                    <span class="kanban__count">{count}</span>
                                </div>
                                <div class="kanban__cards">
                                    {col
                                        .items
                                        .into_iter()
                                        .map(|order| view! {
                                            <KanbanCard
                                                order=order
                                                now=now
                                                draggable=draggable
                                                dragging=dragging
                                                on_open=open_card
                                            />
                                        })
                                        .collect_view()}
                                </div>
                            </div>
                        }
                    }
                />
            </div>

            {move || selected.get().map(|id| view! {
                <div class="drawer-overlay" on:click=move |_| selected.set(None)>
                    <div class="drawer" on:click=move |ev| ev.stop_propagation()>
                        <WorkOrderDetail
                            id=id
                            on_close=move |_| selected.set(None)
                            on_changed=Callback::new(move |wo: WorkOrder| replace_order(wo))
                        />
                    </div>
                </div>
            })}

            {move || show_create.get().then(|| view! {
                <WorkOrderCreateForm
                    on_close=move || set_show_create.set(false)
                    on_created=move |wo: WorkOrder| {
                        set_show_create.set(false);
                        orders.update(|list| list.push(wo));
                    }
                />
            })}
        </PageFrame>
    }
}
