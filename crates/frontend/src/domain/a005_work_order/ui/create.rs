//! Модальная форма создания наряда

use chrono::{Duration, Utc};
use contracts::domain::a001_equipment::Equipment;
use contracts::domain::a005_work_order::{WorkOrder, WorkOrderDto, WorkOrderType};
use contracts::domain::common::Priority;
use contracts::system::users::{User, UserFilter};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_equipment::api::fetch_equipment;
use crate::domain::a005_work_order::api;
use crate::shared::icons::icon;
use crate::system::users::api::fetch_users;

/// Срок по умолчанию: через неделю
fn default_due() -> String {
    (Utc::now() + Duration::days(7)).format("%Y-%m-%dT%H:%M").to_string()
}

#[component]
pub fn WorkOrderCreateForm<F1, F2>(on_close: F1, on_created: F2) -> impl IntoView
where
    F1: Fn() + 'static + Copy + Send + Sync,
    F2: Fn(WorkOrder) + 'static + Copy + Send + Sync,
{
    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let priority = RwSignal::new(Priority::Medium.as_str().to_string());
    let work_order_type = RwSignal::new(WorkOrderType::Maintenance.as_str().to_string());
    let assignee = RwSignal::new(String::new());
    let equipment_id = RwSignal::new(String::new());
    let due_date = RwSignal::new(default_due());
    let users: RwSignal<Vec<User>> = RwSignal::new(Vec::new());
    let equipment: RwSignal<Vec<Equipment>> = RwSignal::new(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    // Справочники необязательны: без них форма работает без выбора
    spawn_local(async move {
        let filter = UserFilter {
            is_active: Some(true),
            ..Default::default()
        };
        match fetch_users(filter).await {
            Ok(list) => users.set(list),
            Err(e) => log::warn!("Assignee list unavailable: {}", e),
        }
        match fetch_equipment().await {
            Ok(list) => equipment.set(list),
            Err(e) => log::warn!("Equipment list unavailable: {}", e),
        }
    });

    let on_save = move |_| {
        let dto = WorkOrderDto {
            id: None,
            title: title.get(),
            description: description.get(),
            priority: Priority::from_code(&priority.get()).unwrap_or_default(),
            work_order_type: WorkOrderType::from_code(&work_order_type.get()).unwrap_or_default(),
            assignee_name: assignee.get(),
            equipment_id: equipment_id.get(),
            due_date: due_date.get(),
        };
        if let Err(msg) = dto.validate() {
            set_error.set(Some(msg));
            return;
        }

        set_saving.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::create_work_order(dto).await {
                Ok(order) => {
                    leptos::logging::log!("🆕 Work order {} created", order.id);
                    on_created(order);
                }
                Err(e) => {
                    set_error.set(Some(format!("Failed to create work order: {}", e)));
                    set_saving.set(false);
                }
            }
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close()>
            <div class="modal modal--wide" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">"New work order"</h2>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close()>
                        {icon("x")}
                    </Button>
                </div>

                <div class="modal-body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                    <div class="form__group">
                        <Label>"Title *"</Label>
                        <Input value=title placeholder="Replace compressor valve" />
                    </div>
                    <div class="form__group">
                        <Label>"Description"</Label>
                        <textarea
                            class="form__textarea"
                            rows="3"
                            prop:value=move || description.get()
                            on:input=move |ev| description.set(event_target_value(&ev))
                        ></textarea>
                    </div>
                    <div class="form__row">
                        <div class="form__group">
                            <Label>"Priority"</Label>
                            <Select value=priority>
                                {Priority::ALL
                                    .iter()
                                    .map(|p| view! { <option value=p.as_str()>{p.label()}</option> })
                                    .collect_view()}
                            </Select>
                        </div>
                        <div class="form__group">
                            <Label>"Type"</Label>
                            <Select value=work_order_type>
                                {WorkOrderType::ALL
                                    .iter()
                                    .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                                    .collect_view()}
                            </Select>
                        </div>
                    </div>
                    <div class="form__row">
                        <div class="form__group">
                            <Label>"Assignee"</Label>
                            <select
                                class="form__select"
                                prop:value=move || assignee.get()
                                on:change=move |ev| assignee.set(event_target_value(&ev))
                            >
                                <option value="">"Unassigned"</option>
                                {move || users
                                    .get()
                                    .into_iter()
                                    .map(|u| {
                                        let name = u.display_name();
                                        view! { <option value=name.clone()>{name.clone()}</option> }
                                    })
                                    .collect_view()}
                            </select>
                        </div>
                        <div class="form__group">
                            <Label>"Equipment"</Label>
                            <select
                                class="form__select"
                                prop:value=move || equipment_id.get()
                                on:change=move |ev| equipment_id.set(event_target_value(&ev))
                            >
                                <option value="">"None"</option>
                                {move || equipment
                                    .get()
                                    .into_iter()
                                    .map(|e| view! { <option value=e.id.0.clone()>{e.name}</option> })
                                    .collect_view()}
                            </select>
                        </div>
                    </div>
                    <div class="form__group">
                        <Label>"Due date *"</Label>
                        <input
                            class="form__input"
                            type="datetime-local"
                            prop:value=move || due_date.get()
                            on:input=move |ev| due_date.set(event_target_value(&ev))
                        />
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
                        {icon("plus")}
                        {move || if saving.get() { " Creating..." } else { " Create" }}
                    </Button>
                </div>
            </div>
        </div>
    }
}
