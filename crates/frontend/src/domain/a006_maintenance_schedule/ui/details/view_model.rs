use crate::domain::a001_equipment::api::fetch_equipment;
use crate::domain::a006_maintenance_schedule::api;
use contracts::domain::a001_equipment::Equipment;
use contracts::domain::a005_work_order::WorkOrder;
use contracts::domain::a006_maintenance_schedule::{MaintenanceSchedule, ScheduleDto, SchedulePatch};
use leptos::prelude::*;
use std::rc::Rc;

#[derive(Clone)]
pub struct ScheduleDetailsVm {
    pub form: RwSignal<ScheduleDto>,
    /// Загруженная версия: сроки и активность редактируются не через форму
    pub loaded: RwSignal<Option<MaintenanceSchedule>>,
    pub equipment: RwSignal<Vec<Equipment>>,
    pub error: RwSignal<Option<String>>,
    pub notice: RwSignal<Option<String>>,
    pub is_saving: RwSignal<bool>,
    pub is_generating: RwSignal<bool>,
}

impl ScheduleDetailsVm {
    pub fn new(id: Option<String>) -> Self {
        let vm = Self {
            form: RwSignal::new(ScheduleDto::default()),
            loaded: RwSignal::new(None),
            equipment: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
            notice: RwSignal::new(None),
            is_saving: RwSignal::new(false),
            is_generating: RwSignal::new(false),
        };
        vm.load_equipment();
        if let Some(id) = id {
            vm.load(id);
        }
        vm
    }

    pub fn is_form_valid(&self) -> impl Fn() -> bool + '_ {
        move || self.form.with(|f| f.validate().is_ok())
    }

    fn load_equipment(&self) {
        let equipment = self.equipment;
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_equipment().await {
                Ok(list) => equipment.set(list),
                Err(e) => log::warn!("Failed to load equipment for schedule form: {}", e),
            }
        });
    }

    pub fn load(&self, id: String) {
        let form = self.form;
        let loaded = self.loaded;
        let error = self.error;

        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_schedule(id).await {
                Ok(schedule) => {
                    form.set(schedule.to_dto());
                    loaded.set(Some(schedule));
                }
                Err(e) => error.set(Some(format!("Failed to load schedule: {}", e))),
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
                Some(id) => api::update_schedule(id, SchedulePatch::from_dto(&current)).await,
                None => api::create_schedule(current).await,
            };
            is_saving.set(false);
            match result {
                Ok(_) => (on_saved)(()),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    }

    pub fn set_active(&self, is_active: bool) {
        let Some(id) = self.form.with_untracked(|f| f.id.clone()) else {
            return;
        };
        let loaded = self.loaded;
        let error = self.error;

        wasm_bindgen_futures::spawn_local(async move {
            match api::update_schedule(id, SchedulePatch::active(is_active)).await {
                Ok(schedule) => loaded.set(Some(schedule)),
                Err(e) => error.set(Some(format!("Failed to update schedule: {}", e))),
            }
        });
    }

    pub fn generate_command(&self, on_generated: Rc<dyn Fn(WorkOrder)>) {
        let Some(id) = self.form.with_untracked(|f| f.id.clone()) else {
            return;
        };
        let error = self.error;
        let notice = self.notice;
        let is_generating = self.is_generating;
        is_generating.set(true);
        notice.set(None);

        wasm_bindgen_futures::spawn_local(async move {
            let result = api::generate_work_order(id).await;
            is_generating.set(false);
            match result {
                Ok(order) => {
                    leptos::logging::log!("🛠️ Generated work order {}", order.id);
                    notice.set(Some(format!("Work order {} created", order.id)));
                    (on_generated)(order);
                }
                Err(e) => error.set(Some(format!("Failed to generate work order: {}", e))),
            }
        });
    }
}
