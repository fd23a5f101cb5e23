pub mod aggregate;
pub mod kanban;

pub use aggregate::{
    next_work_order_id, Assignee, ReportIssueRequest, WorkOrder, WorkOrderComment, WorkOrderDto, WorkOrderId,
    WorkOrderPatch, WorkOrderStatus, WorkOrderTask, WorkOrderType, SYSTEM_AUTHOR,
};
pub use kanban::{allowed_transitions, group_by_status, move_card, KanbanColumn, StatusAction, STATUS_ORDER};
