use crate::domain::a008_organization::api;
use contracts::domain::a008_organization::{OrganizationDto, OrganizationStats};
use contracts::system::audit::AuditLog;
use leptos::prelude::*;
use std::rc::Rc;

/// Сколько последних событий показывать в карточке
pub const ACTIVITY_LIMIT: usize = 10;

#[derive(Clone)]
pub struct OrganizationDetailsVm {
    pub form: RwSignal<OrganizationDto>,
    pub stats: RwSignal<Option<OrganizationStats>>,
    pub activity: RwSignal<Vec<AuditLog>>,
    pub error: RwSignal<Option<String>>,
    pub is_saving: RwSignal<bool>,
}

impl OrganizationDetailsVm {
    pub fn new(id: Option<String>) -> Self {
        let vm = Self {
            form: RwSignal::new(OrganizationDto::default()),
            stats: RwSignal::new(None),
            activity: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
            is_saving: RwSignal::new(false),
        };
        if let Some(id) = id {
            vm.load(id);
        }
        vm
    }

    /// Уникальность slug проверяет сервер, здесь только обязательные поля
    pub fn is_form_valid(&self) -> impl Fn() -> bool + '_ {
        move || self.form.with(|f| f.validate(&[]).is_ok())
    }

    pub fn load(&self, id: String) {
        let form = self.form;
        let stats = self.stats;
        let activity = self.activity;
        let error = self.error;

        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_organization(id.clone()).await {
                Ok(org) => form.set(org.to_dto()),
                Err(e) => {
                    error.set(Some(format!("Failed to load organization: {}", e)));
                    return;
                }
            }
            match api::fetch_stats(id.clone()).await {
                Ok(s) => stats.set(Some(s)),
                Err(e) => log::warn!("Organization stats unavailable: {}", e),
            }
            match api::fetch_activity(id).await {
                Ok(mut logs) => {
                    logs.truncate(ACTIVITY_LIMIT);
                    activity.set(logs);
                }
                Err(e) => log::warn!("Organization activity unavailable: {}", e),
            }
        });
    }

    pub fn save_command(&self, on_saved: Rc<dyn Fn(())>) {
        let current = self.form.get();
        if let Err(msg) = current.validate(&[]) {
            self.error.set(Some(msg));
            return;
        }

        let error = self.error;
        let is_saving = self.is_saving;
        is_saving.set(true);

        wasm_bindgen_futures::spawn_local(async move {
            let result = match current.id.clone() {
                Some(id) => api::update_organization(id, current).await,
                None => api::create_organization(current).await,
            };
            is_saving.set(false);
            match result {
                Ok(org) => {
                    leptos::logging::log!("🏢 Saved organization {}", org.slug);
                    (on_saved)(());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    }
}
