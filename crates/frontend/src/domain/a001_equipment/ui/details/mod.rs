//! Карточка оборудования (создание и редактирование)

mod view;
mod view_model;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use contracts::domain::a001_equipment::Equipment;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use std::rc::Rc;
use thaw::*;
use view::EquipmentForm;
use view_model::EquipmentDetailsVm;

#[component]
pub fn EquipmentDetail(id: Option<String>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let vm = EquipmentDetailsVm::new(id.clone());
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    if let Some(id_val) = id.clone() {
        let tab_key = Equipment::detail_key(&id_val);
        let form = vm.form;
        Effect::new(move || {
            let name = form.with(|f| f.name.clone());
            if !name.is_empty() {
                tabs_store.update_tab_title(&tab_key, &detail_tab_label(Equipment::element_name(), &name));
            }
        });
    }

    let vm_header = vm.clone();
    let vm_content = vm.clone();

    view! {
        <PageFrame page_id="a001_equipment--detail" category=PAGE_CAT_DETAIL>
            <Header vm=vm_header is_edit=id.is_some() on_close=on_close />
            <div class="page__content">
                {move || vm.error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}
                <EquipmentForm vm=vm_content.clone() />
            </div>
        </PageFrame>
    }
}

#[component]
fn Header(vm: EquipmentDetailsVm, is_edit: bool, on_close: Callback<()>) -> impl IntoView {
    let title = if is_edit { "Edit equipment" } else { "New equipment" };
    let vm_save = vm.clone();
    let is_saving = vm.is_saving;

    let handle_save = move |_| {
        let on_saved = Rc::new(move |_| on_close.run(()));
        vm_save.save_command(on_saved);
    };

    view! {
        <div class="page__header">
            <div class="page__header-left">
                <h2>{title}</h2>
            </div>
            <div class="page__header-right">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=handle_save
                    disabled=Signal::derive({
                        let vm = vm.clone();
                        move || is_saving.get() || !vm.is_form_valid()()
                    })
                >
                    {icon("save")}
                    {move || if is_saving.get() { " Saving..." } else { " Save" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    {icon("x")}
                    " Close"
                </Button>
            </div>
        </div>
    }
}
