use contracts::system::audit::{AuditAction, AuditFilter};
use leptos::prelude::*;

use crate::shared::date_utils::parse_input_date;

#[derive(Clone, Debug, Default)]
pub struct AuditListState {
    /// Код действия или пусто
    pub action: String,
    pub resource_type: String,
    /// Даты из `<input type="date">`
    pub start_date: String,
    pub end_date: String,
    pub search_query: String,
    pub is_loaded: bool,
}

impl AuditListState {
    pub fn filter(&self) -> AuditFilter {
        let resource_type = self.resource_type.trim();
        AuditFilter {
            search: self.search_query.clone(),
            action: AuditAction::from_code(&self.action),
            resource_type: (!resource_type.is_empty()).then(|| resource_type.to_string()),
            user_id: None,
            start_date: parse_input_date(&self.start_date),
            end_date: parse_input_date(&self.end_date),
        }
    }
}

pub fn create_state() -> RwSignal<AuditListState> {
    RwSignal::new(AuditListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_filter_from_state() {
        let state = AuditListState {
            action: "status_change".into(),
            resource_type: " workorder ".into(),
            start_date: "2025-03-01".into(),
            end_date: "not a date".into(),
            search_query: "wo-1003".into(),
            ..Default::default()
        };
        let f = state.filter();
        assert_eq!(f.action, Some(AuditAction::StatusChange));
        assert_eq!(f.resource_type.as_deref(), Some("workorder"));
        assert_eq!(f.start_date, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(f.end_date, None);
        assert_eq!(f.search, "wo-1003");

        assert_eq!(AuditListState::default().filter(), AuditFilter::default());
    }
}
