use crate::domain::a001_equipment::api;
use crate::domain::a002_equipment_category::api::fetch_categories;
use crate::domain::a003_location::api::fetch_locations;
use contracts::domain::a001_equipment::{EquipmentDto, EquipmentPatch};
use contracts::domain::a002_equipment_category::EquipmentCategory;
use contracts::domain::a003_location::Location;
use leptos::prelude::*;
use std::rc::Rc;

/// ViewModel карточки оборудования
#[derive(Clone)]
pub struct EquipmentDetailsVm {
    pub form: RwSignal<EquipmentDto>,
    pub error: RwSignal<Option<String>>,
    pub is_saving: RwSignal<bool>,
    pub categories: RwSignal<Vec<EquipmentCategory>>,
    pub locations: RwSignal<Vec<Location>>,
}

impl EquipmentDetailsVm {
    pub fn new(id: Option<String>) -> Self {
        let vm = Self {
            form: RwSignal::new(EquipmentDto::default()),
            error: RwSignal::new(None),
            is_saving: RwSignal::new(false),
            categories: RwSignal::new(Vec::new()),
            locations: RwSignal::new(Vec::new()),
        };

        vm.load_references();
        if let Some(id) = id {
            vm.load(id);
        }

        vm
    }

    pub fn is_form_valid(&self) -> impl Fn() -> bool + '_ {
        move || self.form.with(|f| f.validate().is_ok())
    }

    /// Справочники для выпадающих списков
    fn load_references(&self) {
        let categories = self.categories;
        let locations = self.locations;
        let error = self.error;

        wasm_bindgen_futures::spawn_local(async move {
            match fetch_categories().await {
                Ok(list) => categories.set(list),
                Err(e) => error.set(Some(format!("Failed to load categories: {}", e))),
            }
            match fetch_locations().await {
                Ok(list) => locations.set(list),
                Err(e) => error.set(Some(format!("Failed to load locations: {}", e))),
            }
        });
    }

    pub fn load(&self, id: String) {
        let form = self.form;
        let error = self.error;

        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_equipment_by_id(id).await {
                Ok(item) => form.set(item.to_dto()),
                Err(e) => error.set(Some(format!("Failed to load equipment: {}", e))),
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
        error.set(None);

        wasm_bindgen_futures::spawn_local(async move {
            let result = match current.id.clone() {
                Some(id) => api::update_equipment(id, EquipmentPatch::from_dto(&current)).await,
                None => api::create_equipment(current).await,
            };
            is_saving.set(false);
            match result {
                Ok(saved) => {
                    leptos::logging::log!("💾 Equipment {} saved", saved.id);
                    (on_saved)(());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    }
}
