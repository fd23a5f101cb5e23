use contracts::system::users::{User, UserFilter, UserRole};
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct UsersListState {
    pub items: Vec<User>,
    /// Код роли или пустая строка (все роли)
    pub role: String,
    /// "active", "inactive" или пусто
    pub active: String,
    pub search_query: String,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub is_loaded: bool,
}

impl Default for UsersListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            role: String::new(),
            active: String::new(),
            search_query: String::new(),
            sort_field: "name".to_string(),
            sort_ascending: true,
            is_loaded: false,
        }
    }
}

impl UsersListState {
    pub fn filter(&self) -> UserFilter {
        UserFilter {
            role: UserRole::from_code(&self.role),
            is_active: match self.active.as_str() {
                "active" => Some(true),
                "inactive" => Some(false),
                _ => None,
            },
            search: self.search_query.clone(),
        }
    }
}

pub fn create_state() -> RwSignal<UsersListState> {
    RwSignal::new(UsersListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_state() {
        let state = UsersListState {
            role: "technician".into(),
            active: "inactive".into(),
            search_query: "tom".into(),
            ..Default::default()
        };
        let f = state.filter();
        assert_eq!(f.role, Some(UserRole::Technician));
        assert_eq!(f.is_active, Some(false));
        assert_eq!(f.search, "tom");

        assert_eq!(UsersListState::default().filter(), UserFilter::default());
    }
}
