use super::view_model::LocationDetailsVm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use contracts::domain::a003_location::{Location, LocationDto, LocationStatus, LocationType};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use std::rc::Rc;
use thaw::*;

/// Текстовое поле, привязанное к одному полю формы
fn text_field(
    form: RwSignal<LocationDto>,
    label: &'static str,
    get: fn(&LocationDto) -> String,
    set: fn(&mut LocationDto, String),
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

#[component]
pub fn LocationDetail(id: Option<String>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let vm = LocationDetailsVm::new(id.clone());
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let form = vm.form;

    if let Some(id_val) = id.clone() {
        let tab_key = Location::detail_key(&id_val);
        Effect::new(move || {
            let name = form.with(|f| f.name.clone());
            if !name.is_empty() {
                tabs_store.update_tab_title(&tab_key, &detail_tab_label(Location::element_name(), &name));
            }
        });
    }

    let title = if id.is_some() { "Edit location" } else { "New location" };
    let is_saving = vm.is_saving;
    let equipment_count = vm.equipment_count;
    let vm_save = vm.clone();
    let vm_valid = vm.clone();

    let handle_save = move |_| {
        let on_saved = Rc::new(move |_| on_close.run(()));
        vm_save.save_command(on_saved);
    };

    view! {
        <PageFrame page_id="a003_location--detail" category=PAGE_CAT_DETAIL>
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
                    <h4 class="details-section__title">"Location"</h4>
                    <div class="details-grid--3col">
                        {text_field(form, "Name", |f| f.name.clone(), |f, v| f.name = v)}
                        <div class="form__group">
                            <label class="form__label">"Type"</label>
                            <select
                                class="form__select"
                                prop:value=move || form.get().location_type.as_str()
                                on:change=move |ev| {
                                    if let Some(t) = LocationType::from_code(&event_target_value(&ev)) {
                                        form.update(|f| f.location_type = t);
                                    }
                                }
                            >
                                {LocationType::ALL
                                    .iter()
                                    .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                                    .collect_view()}
                            </select>
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Status"</label>
                            <select
                                class="form__select"
                                prop:value=move || form.get().status.as_str()
                                on:change=move |ev| {
                                    if let Some(s) = LocationStatus::from_code(&event_target_value(&ev)) {
                                        form.update(|f| f.status = s);
                                    }
                                }
                            >
                                {LocationStatus::ALL
                                    .iter()
                                    .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                    .collect_view()}
                            </select>
                        </div>
                    </div>
                </div>

                <div class="details-section">
                    <h4 class="details-section__title">"Address"</h4>
                    <div class="details-grid--3col">
                        {text_field(form, "Street", |f| f.address.clone(), |f, v| f.address = v)}
                        {text_field(form, "City", |f| f.city.clone(), |f, v| f.city = v)}
                        {text_field(form, "State", |f| f.state.clone(), |f, v| f.state = v)}
                        {text_field(form, "ZIP", |f| f.zip_code.clone(), |f, v| f.zip_code = v)}
                    </div>
                </div>

                <div class="details-section">
                    <h4 class="details-section__title">"Contact"</h4>
                    <div class="details-grid--3col">
                        {text_field(form, "Manager", |f| f.manager.clone(), |f, v| f.manager = v)}
                        {text_field(form, "Phone", |f| f.contact_phone.clone(), |f, v| f.contact_phone = v)}
                        <Show when=move || form.with(|f| f.id.is_some())>
                            <div class="form__group">
                                <label class="form__label">"Equipment on site"</label>
                                <div class="form__static">{move || equipment_count.get()}</div>
                            </div>
                        </Show>
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}
