use crate::domain::a003_location::api;
use contracts::domain::a003_location::{LocationDto, LocationPatch};
use leptos::prelude::*;
use std::rc::Rc;

#[derive(Clone)]
pub struct LocationDetailsVm {
    pub form: RwSignal<LocationDto>,
    pub equipment_count: RwSignal<u32>,
    pub error: RwSignal<Option<String>>,
    pub is_saving: RwSignal<bool>,
}

impl LocationDetailsVm {
    pub fn new(id: Option<String>) -> Self {
        let vm = Self {
            form: RwSignal::new(LocationDto::default()),
            equipment_count: RwSignal::new(0),
            error: RwSignal::new(None),
            is_saving: RwSignal::new(false),
        };
        if let Some(id) = id {
            vm.load(id);
        }
        vm
    }

    pub fn is_form_valid(&self) -> impl Fn() -> bool + '_ {
        move || self.form.with(|f| f.validate().is_ok())
    }

    pub fn load(&self, id: String) {
        let form = self.form;
        let equipment_count = self.equipment_count;
        let error = self.error;

        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_location(id).await {
                Ok(location) => {
                    equipment_count.set(location.equipment_count);
                    form.set(location.to_dto());
                }
                Err(e) => error.set(Some(format!("Failed to load location: {}", e))),
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
                Some(id) => api::update_location(id, LocationPatch::from_dto(&current)).await,
                None => api::create_location(current).await,
            };
            is_saving.set(false);
            match result {
                Ok(_) => (on_saved)(()),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    }
}
