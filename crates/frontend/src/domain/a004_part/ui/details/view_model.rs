use crate::domain::a003_location::api::fetch_locations;
use crate::domain::a004_part::api;
use contracts::domain::a003_location::Location;
use contracts::domain::a004_part::{PartDto, PartPatch};
use leptos::prelude::*;
use std::rc::Rc;

#[derive(Clone)]
pub struct PartDetailsVm {
    pub form: RwSignal<PartDto>,
    pub locations: RwSignal<Vec<Location>>,
    pub error: RwSignal<Option<String>>,
    pub is_saving: RwSignal<bool>,
}

impl PartDetailsVm {
    pub fn new(id: Option<String>) -> Self {
        let vm = Self {
            form: RwSignal::new(PartDto::default()),
            locations: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
            is_saving: RwSignal::new(false),
        };

        let locations = vm.locations;
        wasm_bindgen_futures::spawn_local(async move {
            if let Ok(list) = fetch_locations().await {
                locations.set(list);
            }
        });

        if let Some(id) = id {
            vm.load(id);
        }
        vm
    }

    pub fn is_form_valid(&self) -> impl Fn() -> bool + '_ {
        move || self.form.with(|f| f.validate().is_ok())
    }

    /// Стоимость остатка по текущим значениям формы
    pub fn total_value(&self) -> impl Fn() -> f64 + '_ {
        move || self.form.with(|f| f.quantity_on_hand as f64 * f.unit_cost)
    }

    pub fn load(&self, id: String) {
        let form = self.form;
        let error = self.error;
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_part(id).await {
                Ok(part) => form.set(part.to_dto()),
                Err(e) => error.set(Some(format!("Failed to load part: {}", e))),
            }
        });
    }

    pub fn save_command(&self, on_saved: Rc<dyn Fn(())>) {
        let current = self.form.get();
        if let Err(msg) = current.validate() {
            self.error.set(Some(msg));
            return;
        }

        let error = self.error;
        let is_saving = self.is_saving;
        is_saving.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = match current.id.clone() {
                Some(id) => api::update_part(id, PartPatch::from_dto(&current)).await,
                None => api::create_part(current).await,
            };
            is_saving.set(false);
            match result {
                Ok(part) => {
                    leptos::logging::log!("💾 Part {} saved", part.part_number);
                    (on_saved)(());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    }
}
