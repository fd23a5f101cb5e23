pub mod create;
pub mod details;
pub mod kanban;
pub mod list;

use contracts::domain::a005_work_order::WorkOrderStatus;
use contracts::domain::common::Priority;

/// Вариант бейджа для статуса наряда
pub fn status_variant(status: WorkOrderStatus) -> &'static str {
    match status {
        WorkOrderStatus::Pending => "neutral",
        WorkOrderStatus::InProgress => "primary",
        WorkOrderStatus::InReview => "warning",
        WorkOrderStatus::Completed => "success",
        WorkOrderStatus::OnHold | WorkOrderStatus::Cancelled => "error",
    }
}

pub fn priority_variant(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "neutral",
        Priority::Medium => "primary",
        Priority::High => "warning",
        Priority::Critical => "error",
    }
}
