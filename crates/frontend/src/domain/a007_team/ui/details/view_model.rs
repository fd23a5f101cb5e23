use crate::domain::a003_location::api as locations_api;
use crate::domain::a007_team::api;
use crate::system::users::api as users_api;
use contracts::domain::a003_location::Location;
use contracts::domain::a005_work_order::WorkOrder;
use contracts::domain::a007_team::{Team, TeamDto, TeamMemberRole};
use contracts::system::users::{User, UserFilter};
use leptos::prelude::*;
use std::rc::Rc;

/// Варианты руководителя: активные пользователи по алфавиту
pub fn leader_choices(users: &[User]) -> Vec<(String, String)> {
    let mut choices: Vec<(String, String)> = users
        .iter()
        .filter(|u| u.is_active)
        .map(|u| (u.id.to_string(), u.display_name()))
        .collect();
    choices.sort_by(|a, b| a.1.to_lowercase().cmp(&b.1.to_lowercase()));
    choices
}

#[derive(Clone)]
pub struct TeamDetailsVm {
    pub form: RwSignal<TeamDto>,
    pub team: RwSignal<Option<Team>>,
    pub users: RwSignal<Vec<User>>,
    pub locations: RwSignal<Vec<Location>>,
    pub available: RwSignal<Vec<User>>,
    pub work_orders: RwSignal<Vec<WorkOrder>>,
    pub error: RwSignal<Option<String>>,
    pub is_saving: RwSignal<bool>,
}

impl TeamDetailsVm {
    pub fn new(id: Option<String>) -> Self {
        let vm = Self {
            form: RwSignal::new(TeamDto::default()),
            team: RwSignal::new(None),
            users: RwSignal::new(Vec::new()),
            locations: RwSignal::new(Vec::new()),
            available: RwSignal::new(Vec::new()),
            work_orders: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
            is_saving: RwSignal::new(false),
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

    /// Справочники формы; без прав на пользователей список руководителей пуст
    fn load_references(&self) {
        let users = self.users;
        let locations = self.locations;
        wasm_bindgen_futures::spawn_local(async move {
            let filter = UserFilter {
                is_active: Some(true),
                ..Default::default()
            };
            match users_api::fetch_users(filter).await {
                Ok(list) => users.set(list),
                Err(e) => log::warn!("Leader candidates unavailable: {}", e),
            }
            match locations_api::fetch_locations().await {
                Ok(list) => locations.set(list),
                Err(e) => log::warn!("Locations unavailable: {}", e),
            }
        });
    }

    pub fn load(&self, id: String) {
        let vm = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_team(id.clone()).await {
                Ok(team) => vm.apply_team(team),
                Err(e) => {
                    vm.error.set(Some(format!("Failed to load team: {}", e)));
                    return;
                }
            }
            match api::fetch_team_work_orders(id).await {
                Ok(list) => vm.work_orders.set(list),
                Err(e) => log::warn!("Team work orders unavailable: {}", e),
            }
        });
    }

    fn apply_team(&self, team: Team) {
        self.form.set(team.to_dto());
        self.team.set(Some(team.clone()));
        self.refresh_available(team.id.to_string());
    }

    fn refresh_available(&self, id: String) {
        let available = self.available;
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_available_users(id).await {
                Ok(list) => available.set(list),
                Err(e) => log::warn!("Available users unavailable: {}", e),
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
                Some(id) => api::update_team(id, current).await,
                None => api::create_team(current).await,
            };
            is_saving.set(false);
            match result {
                Ok(team) => {
                    leptos::logging::log!("👷 Saved team {}", team.name);
                    (on_saved)(());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    }

    pub fn add_member_command(&self, user_id: String, role: TeamMemberRole) {
        let Some(id) = self.form.with_untracked(|f| f.id.clone()) else {
            return;
        };
        let vm = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match api::add_member(id, user_id, role).await {
                Ok(team) => vm.apply_team(team),
                Err(e) => vm.error.set(Some(format!("Failed to add member: {}", e))),
            }
        });
    }

    pub fn remove_member_command(&self, user_id: String) {
        let Some(id) = self.form.with_untracked(|f| f.id.clone()) else {
            return;
        };
        let vm = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match api::remove_member(id, user_id).await {
                Ok(team) => vm.apply_team(team),
                Err(e) => vm.error.set(Some(format!("Failed to remove member: {}", e))),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::mock_seed;
    use chrono::Utc;

    #[test]
    fn test_leader_choices_skip_inactive_and_sort() {
        let users = mock_seed::seed(Utc::now()).users.list();
        let choices = leader_choices(&users);
        assert_eq!(choices.len(), 6);
        assert_eq!(choices[0], ("4".to_string(), "Alex Johnson".to_string()));
        assert!(choices.iter().all(|(_, name)| name != "Tom Wilson"));
    }
}
