mod view_model;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::shared::date_utils::format_money;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use contracts::domain::a004_part::{Part, PartDto, PartStatus};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use std::rc::Rc;
use thaw::*;
use view_model::PartDetailsVm;

fn text_field(
    form: RwSignal<PartDto>,
    label: &'static str,
    get: fn(&PartDto) -> String,
    set: fn(&mut PartDto, String),
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">{label}</label>
            <input
                class="form__input"
                type="text"
                prop:value=move || form.with(get)
                on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
            />
        </div>
    }
}

/// Целое неотрицательное поле; нечисловой ввод игнорируется
fn count_field(
    form: RwSignal<PartDto>,
    label: &'static str,
    get: fn(&PartDto) -> u32,
    set: fn(&mut PartDto, u32),
    disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label">{label}</label>
            <input
                class="form__input"
                type="number"
                min="0"
                disabled=move || disabled.get()
                prop:value=move || form.with(get).to_string()
                on:input=move |ev| {
                    if let Ok(v) = event_target_value(&ev).parse::<u32>() {
                        form.update(|f| set(f, v));
                    }
                }
            />
        </div>
    }
}

#[component]
pub fn PartDetail(id: Option<String>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let vm = PartDetailsVm::new(id.clone());
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let form = vm.form;
    let locations = vm.locations;

    if let Some(id_val) = id.clone() {
        let tab_key = Part::detail_key(&id_val);
        Effect::new(move || {
            let number = form.with(|f| f.part_number.clone());
            if !number.is_empty() {
                tabs_store.update_tab_title(&tab_key, &detail_tab_label(Part::element_name(), &number));
            }
        });
    }

    // Остаток у существующей позиции меняется только корректировкой
    let qty_locked = Signal::derive(move || form.with(|f| f.id.is_some()));

    let title = if id.is_some() { "Edit part" } else { "New part" };
    let is_saving = vm.is_saving;
    let vm_save = vm.clone();
    let vm_valid = vm.clone();
    let vm_total = vm.clone();

    let handle_save = move |_| {
        let on_saved = Rc::new(move |_| on_close.run(()));
        vm_save.save_command(on_saved);
    };

    view! {
        <PageFrame page_id="a004_part--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h2>{title}</h2>
                </div>
                <div class="page__header-right">
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
                {move || vm.error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

                <div class="details-section">
                    <h4 class="details-section__title">"Part"</h4>
                    <div class="details-grid--3col">
                        {text_field(form, "Name", |f| f.name.clone(), |f, v| f.name = v)}
                        {text_field(form, "Part number", |f| f.part_number.clone(), |f, v| f.part_number = v)}
                        {text_field(form, "Category", |f| f.category.clone(), |f, v| f.category = v)}
                        {text_field(form, "Manufacturer", |f| f.manufacturer.clone(), |f, v| f.manufacturer = v)}
                        {text_field(form, "Model number", |f| f.model_number.clone(), |f, v| f.model_number = v)}
                        <div class="form__group">
                            <label class="form__label">"Status"</label>
                            <select
                                class="form__select"
                                prop:value=move || form.get().status.as_str()
                                on:change=move |ev| {
                                    if let Some(s) = PartStatus::from_code(&event_target_value(&ev)) {
                                        form.update(|f| f.status = s);
                                    }
                                }
                            >
                                {PartStatus::ALL
                                    .iter()
                                    .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                    .collect_view()}
                            </select>
                        </div>
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Description"</label>
                        <textarea
                            class="form__textarea"
                            rows="2"
                            prop:value=move || form.get().description
                            on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                        ></textarea>
                    </div>
                </div>

                <div class="details-section">
                    <h4 class="details-section__title">"Stock"</h4>
                    <div class="details-grid--3col">
                        <div class="form__group">
                            <label class="form__label">"Storage location"</label>
                            <select
                                class="form__select"
                                prop:value=move || form.get().location_id
                                on:change=move |ev| form.update(|f| f.location_id = event_target_value(&ev))
                            >
                                <option value="">"Select location..."</option>
                                {move || locations
                                    .get()
                                    .into_iter()
                                    .map(|l| view! { <option value=l.id.0.clone()>{l.name}</option> })
                                    .collect_view()}
                            </select>
                        </div>
                        {count_field(form, "On hand", |f| f.quantity_on_hand, |f, v| f.quantity_on_hand = v, qty_locked)}
                        {count_field(form, "Minimum level", |f| f.minimum_stock_level, |f, v| f.minimum_stock_level = v, Signal::stored(false))}
                        {count_field(form, "Reorder point", |f| f.reorder_point, |f, v| f.reorder_point = v, Signal::stored(false))}
                        <div class="form__group">
                            <label class="form__label">"Unit cost"</label>
                            <input
                                class="form__input"
                                type="number"
                                min="0"
                                step="0.01"
                                prop:value=move || form.get().unit_cost.to_string()
                                on:input=move |ev| {
                                    if let Ok(v) = event_target_value(&ev).parse::<f64>() {
                                        form.update(|f| f.unit_cost = v);
                                    }
                                }
                            />
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Total value"</label>
                            <div class="form__static">{move || format_money(vm_total.total_value()())}</div>
                        </div>
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}
