use chrono::{DateTime, Utc};
use contracts::domain::a005_work_order::WorkOrder;
use leptos::prelude::*;

/// Фильтры списка нарядов; пустая строка означает "все"
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkOrderListFilter {
    pub search: String,
    pub status: String,
    pub priority: String,
    pub overdue_only: bool,
}

impl WorkOrderListFilter {
    pub fn matches(&self, wo: &WorkOrder, now: DateTime<Utc>) -> bool {
        let query = self.search.trim().to_lowercase();
        if !query.is_empty()
            && !wo.title.to_lowercase().contains(&query)
            && !wo.id.as_str().to_lowercase().contains(&query)
            && !wo
                .assignee_name()
                .map(|n| n.to_lowercase().contains(&query))
                .unwrap_or(false)
        {
            return false;
        }
        if !self.status.is_empty() && wo.status.as_str() != self.status {
            return false;
        }
        if !self.priority.is_empty() && wo.priority.as_str() != self.priority {
            return false;
        }
        !self.overdue_only || wo.is_overdue(now)
    }
}

#[derive(Clone, Debug)]
pub struct WorkOrderListState {
    pub filter: WorkOrderListFilter,
    pub sort_field: String,
    pub sort_ascending: bool,
}

impl Default for WorkOrderListState {
    fn default() -> Self {
        Self {
            filter: WorkOrderListFilter::default(),
            sort_field: "due_date".to_string(),
            sort_ascending: true,
        }
    }
}

pub fn create_state() -> RwSignal<WorkOrderListState> {
    RwSignal::new(WorkOrderListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use contracts::domain::a005_work_order::{WorkOrderDto, WorkOrderId, WorkOrderStatus};
    use contracts::domain::common::Priority;

    fn order(id: &str, title: &str, assignee: &str, priority: Priority, due_in_days: i64) -> WorkOrder {
        let now = Utc::now();
        let dto = WorkOrderDto {
            title: title.into(),
            priority,
            assignee_name: assignee.into(),
            due_date: (now + Duration::days(due_in_days)).to_rfc3339(),
            ..Default::default()
        };
        WorkOrder::from_dto(WorkOrderId::new(id), &dto, now).unwrap()
    }

    #[test]
    fn test_search_covers_id_title_and_assignee() {
        let now = Utc::now();
        let wo = order("WO-1001", "HVAC filter replacement", "Mike Tech", Priority::High, 3);
        let mut filter = WorkOrderListFilter {
            search: "wo-1001".into(),
            ..Default::default()
        };
        assert!(filter.matches(&wo, now));
        filter.search = "mike".into();
        assert!(filter.matches(&wo, now));
        filter.search = "conveyor".into();
        assert!(!filter.matches(&wo, now));
    }

    #[test]
    fn test_status_priority_and_overdue() {
        let now = Utc::now();
        let mut wo = order("WO-1002", "Belt", "", Priority::Low, -1);
        let filter = WorkOrderListFilter {
            priority: "low".into(),
            overdue_only: true,
            ..Default::default()
        };
        assert!(filter.matches(&wo, now));

        wo.status = WorkOrderStatus::Completed;
        assert!(!filter.matches(&wo, now));

        let filter = WorkOrderListFilter {
            status: "pending".into(),
            ..Default::default()
        };
        wo.status = WorkOrderStatus::Pending;
        assert!(filter.matches(&wo, now));
    }
}
