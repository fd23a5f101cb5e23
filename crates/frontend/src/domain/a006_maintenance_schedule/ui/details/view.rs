use super::view_model::ScheduleDetailsVm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_label, title_for_key};
use crate::shared::date_utils::{format_date, format_opt_date};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::system::auth::context::use_auth;
use contracts::domain::a005_work_order::WorkOrder;
use contracts::domain::a006_maintenance_schedule::{FrequencyType, MaintenanceSchedule, ScheduleType};
use contracts::domain::common::{AggregateRoot, Priority};
use leptos::prelude::*;
use std::rc::Rc;
use thaw::*;

#[component]
pub fn ScheduleDetail(id: Option<String>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let vm = ScheduleDetailsVm::new(id.clone());
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();
    let form = vm.form;
    let loaded = vm.loaded;

    if let Some(id_val) = id.clone() {
        let tab_key = MaintenanceSchedule::detail_key(&id_val);
        Effect::new(move || {
            if let Some(s) = loaded.get() {
                tabs_store.update_tab_title(
                    &tab_key,
                    &detail_tab_label(MaintenanceSchedule::element_name(), &s.equipment_name),
                );
            }
        });
    }

    let is_edit = id.is_some();
    let title = if is_edit { "Edit schedule" } else { "New schedule" };
    let can_generate = move || is_edit && auth_state.get().can("workorder:create");
    let is_saving = vm.is_saving;
    let is_generating = vm.is_generating;
    let equipment = vm.equipment;
    let error = vm.error;
    let notice = vm.notice;
    let vm_save = vm.clone();
    let vm_valid = vm.clone();
    let vm_generate = vm.clone();
    let vm_active = vm.clone();

    let handle_save = move |_| {
        let on_saved = Rc::new(move |_| on_close.run(()));
        vm_save.save_command(on_saved);
    };

    let handle_generate = move |_| {
        let on_generated = Rc::new(move |order: WorkOrder| {
            let key = WorkOrder::detail_key(order.id.as_str());
            tabs_store.open_tab(&key, &title_for_key(&key));
        });
        vm_generate.generate_command(on_generated);
    };

    view! {
        <PageFrame page_id="a006_maintenance_schedule--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h2>{title}</h2>
                </div>
                <div class="page__header-right">
                    <Show when=can_generate>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=handle_generate.clone()
                            disabled=Signal::derive(move || is_generating.get())
                        >
                            {icon("work-orders")}
                            {move || if is_generating.get() { " Generating..." } else { " Generate work order" }}
                        </Button>
                    </Show>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=handle_save
                        disabled=Signal::derive(move || is_saving.get() || !vm_valid.is_form_valid()())
                    >
                        {icon("save")}
                        " Save"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        {icon("x")}
                        " Close"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}
                {move || notice.get().map(|msg| view! { <div class="alert alert--success">{msg}</div> })}

                <div class="details-section">
                    <h4 class="details-section__title">"Schedule"</h4>
                    <div class="details-grid--3col">
                        <div class="form__group">
                            <label class="form__label">"Equipment"</label>
                            <select
                                class="form__select"
                                prop:value=move || form.get().equipment_id
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.update(|f| f.equipment_id = value);
                                }
                            >
                                <option value="">"Select equipment..."</option>
                                {move || {
                                    equipment
                                        .get()
                                        .into_iter()
                                        .map(|e| view! { <option value=e.id.to_string()>{e.name.clone()}</option> })
                                        .collect_view()
                                }}
                            </select>
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Type"</label>
                            <select
                                class="form__select"
                                prop:value=move || form.get().schedule_type.as_str()
                                on:change=move |ev| {
                                    if let Some(t) = ScheduleType::from_code(&event_target_value(&ev)) {
                                        form.update(|f| f.schedule_type = t);
                                    }
                                }
                            >
                                {ScheduleType::ALL
                                    .iter()
                                    .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                                    .collect_view()}
                            </select>
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Priority"</label>
                            <select
                                class="form__select"
                                prop:value=move || form.get().priority.as_str()
                                on:change=move |ev| {
                                    if let Some(p) = Priority::from_code(&event_target_value(&ev)) {
                                        form.update(|f| f.priority = p);
                                    }
                                }
                            >
                                {Priority::ALL
                                    .iter()
                                    .map(|p| view! { <option value=p.as_str()>{p.label()}</option> })
                                    .collect_view()}
                            </select>
                        </div>
                    </div>
                </div>

                <div class="details-section">
                    <h4 class="details-section__title">"Frequency"</h4>
                    <div class="details-grid--3col">
                        <div class="form__group">
                            <label class="form__label">"Every"</label>
                            <input
                                class="form__input"
                                type="number"
                                min="1"
                                prop:value=move || form.get().frequency_value.to_string()
                                on:input=move |ev| {
                                    let value = event_target_value(&ev).trim().parse::<u32>().unwrap_or(0);
                                    form.update(|f| f.frequency_value = value);
                                }
                            />
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Unit"</label>
                            <select
                                class="form__select"
                                prop:value=move || form.get().frequency_type.as_str()
                                on:change=move |ev| {
                                    if let Some(f) = FrequencyType::from_code(&event_target_value(&ev)) {
                                        form.update(|d| d.frequency_type = f);
                                    }
                                }
                            >
                                {FrequencyType::ALL
                                    .iter()
                                    .map(|f| view! { <option value=f.as_str()>{f.label()}</option> })
                                    .collect_view()}
                            </select>
                        </div>
                    </div>
                </div>

                {move || loaded.get().map(|s| {
                    let vm_active = vm_active.clone();
                    let active = s.is_active;
                    view! {
                        <div class="details-section">
                            <h4 class="details-section__title">"Status"</h4>
                            <div class="details-grid--3col">
                                <div class="form__group">
                                    <label class="form__label">"Frequency"</label>
                                    <div class="form__static">{s.frequency_label()}</div>
                                </div>
                                <div class="form__group">
                                    <label class="form__label">"Last performed"</label>
                                    <div class="form__static">{format_opt_date(s.last_performed)}</div>
                                </div>
                                <div class="form__group">
                                    <label class="form__label">"Next due"</label>
                                    <div class="form__static">{format_date(s.next_due)}</div>
                                </div>
                                <div class="form__group">
                                    <label class="form__label">
                                        <input
                                            type="checkbox"
                                            prop:checked=active
                                            on:change=move |ev| vm_active.set_active(event_target_checked(&ev))
                                        />
                                        " Active"
                                    </label>
                                </div>
                            </div>
                        </div>
                    }
                })}
            </div>
        </PageFrame>
    }
}
