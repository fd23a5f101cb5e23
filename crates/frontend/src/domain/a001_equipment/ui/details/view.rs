use super::view_model::EquipmentDetailsVm;
use crate::shared::date_utils::{parse_input_date, to_input_date};
use contracts::domain::a001_equipment::EquipmentStatus;
use leptos::prelude::*;

/// Поля формы оборудования
#[component]
pub fn EquipmentForm(vm: EquipmentDetailsVm) -> impl IntoView {
    let form = vm.form;
    let categories = vm.categories;
    let locations = vm.locations;

    view! {
        <div class="details-section">
            <h4 class="details-section__title">"General"</h4>
            <div class="details-grid--3col">
                <div class="form__group">
                    <label class="form__label">"Name"</label>
                    <input
                        class="form__input"
                        type="text"
                        prop:value=move || form.get().name
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                        placeholder="Industrial HVAC Unit"
                    />
                </div>
                <div class="form__group">
                    <label class="form__label">"Serial number"</label>
                    <input
                        class="form__input"
                        type="text"
                        prop:value=move || form.get().serial_number
                        on:input=move |ev| form.update(|f| f.serial_number = event_target_value(&ev))
                    />
                </div>
                <div class="form__group">
                    <label class="form__label">"Status"</label>
                    <select
                        class="form__select"
                        prop:value=move || form.get().status.as_str()
                        on:change=move |ev| {
                            if let Some(status) = EquipmentStatus::from_code(&event_target_value(&ev)) {
                                form.update(|f| f.status = status);
                            }
                        }
                    >
                        {EquipmentStatus::ALL
                            .iter()
                            .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                            .collect_view()}
                    </select>
                </div>
                <div class="form__group">
                    <label class="form__label">"Category"</label>
                    <select
                        class="form__select"
                        prop:value=move || form.get().category_id
                        on:change=move |ev| form.update(|f| f.category_id = event_target_value(&ev))
                    >
                        <option value="">"Select category..."</option>
                        {move || {
                            categories
                                .get()
                                .into_iter()
                                .map(|c| view! { <option value=c.id.0.clone()>{c.name}</option> })
                                .collect_view()
                        }}
                    </select>
                </div>
                <div class="form__group">
                    <label class="form__label">"Location"</label>
                    <select
                        class="form__select"
                        prop:value=move || form.get().location_id
                        on:change=move |ev| form.update(|f| f.location_id = event_target_value(&ev))
                    >
                        <option value="">"Select location..."</option>
                        {move || {
                            locations
                                .get()
                                .into_iter()
                                .map(|l| view! { <option value=l.id.0.clone()>{l.name}</option> })
                                .collect_view()
                        }}
                    </select>
                </div>
                <div class="form__group">
                    <label class="form__label">"Health score"</label>
                    <input
                        class="form__input"
                        type="number"
                        min="0"
                        max="100"
                        prop:value=move || form.get().health_score.to_string()
                        on:input=move |ev| {
                            if let Ok(score) = event_target_value(&ev).parse::<u8>() {
                                form.update(|f| f.health_score = score);
                            }
                        }
                    />
                </div>
            </div>
        </div>

        <div class="details-section">
            <h4 class="details-section__title">"Specification"</h4>
            <div class="details-grid--3col">
                <div class="form__group">
                    <label class="form__label">"Manufacturer"</label>
                    <input
                        class="form__input"
                        type="text"
                        prop:value=move || form.get().manufacturer
                        on:input=move |ev| form.update(|f| f.manufacturer = event_target_value(&ev))
                    />
                </div>
                <div class="form__group">
                    <label class="form__label">"Model"</label>
                    <input
                        class="form__input"
                        type="text"
                        prop:value=move || form.get().model
                        on:input=move |ev| form.update(|f| f.model = event_target_value(&ev))
                    />
                </div>
                <div></div>
                <div class="form__group">
                    <label class="form__label">"Purchase date"</label>
                    <input
                        class="form__input"
                        type="date"
                        prop:value=move || to_input_date(form.get().purchase_date)
                        on:change=move |ev| {
                            form.update(|f| f.purchase_date = parse_input_date(&event_target_value(&ev)))
                        }
                    />
                </div>
                <div class="form__group">
                    <label class="form__label">"Warranty expiration"</label>
                    <input
                        class="form__input"
                        type="date"
                        prop:value=move || to_input_date(form.get().warranty_expiration)
                        on:change=move |ev| {
                            form.update(|f| f.warranty_expiration = parse_input_date(&event_target_value(&ev)))
                        }
                    />
                </div>
            </div>
            <div class="form__group">
                <label class="form__label">"Description"</label>
                <textarea
                    class="form__textarea"
                    rows="3"
                    prop:value=move || form.get().description
                    on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                ></textarea>
            </div>
        </div>
    }
}
