use super::aggregate::{WorkOrder, WorkOrderId, WorkOrderStatus};

/// Колонки доски в порядке отображения
pub const STATUS_ORDER: [WorkOrderStatus; 4] = [
    WorkOrderStatus::Pending,
    WorkOrderStatus::InProgress,
    WorkOrderStatus::InReview,
    WorkOrderStatus::Completed,
];

#[derive(Debug, Clone, PartialEq)]
pub struct KanbanColumn {
    pub status: WorkOrderStatus,
    pub title: &'static str,
    pub items: Vec<WorkOrder>,
}

impl KanbanColumn {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Разложить наряды по колонкам.
///
/// Наряды со статусом без колонки (on-hold, cancelled) на доску не попадают;
/// порядок внутри колонки совпадает с порядком входа.
pub fn group_by_status(orders: &[WorkOrder]) -> Vec<KanbanColumn> {
    STATUS_ORDER
        .iter()
        .map(|status| KanbanColumn {
            status: *status,
            title: status.label(),
            items: orders
                .iter()
                .filter(|wo| wo.status == *status)
                .cloned()
                .collect(),
        })
        .collect()
}

/// Оптимистичный перенос карточки.
///
/// Возвращает прежний статус, если карточка реально сменила колонку.
/// Для отката достаточно вызвать повторно с прежним статусом.
pub fn move_card(
    orders: &mut [WorkOrder],
    id: &WorkOrderId,
    target: WorkOrderStatus,
) -> Option<WorkOrderStatus> {
    let order = orders.iter_mut().find(|wo| &wo.id == id)?;
    if order.status == target {
        return None;
    }
    let previous = order.status;
    order.status = target;
    Some(previous)
}

/// Кнопка смены статуса в карточке наряда
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusAction {
    pub label: &'static str,
    pub target: WorkOrderStatus,
    pub primary: bool,
}

pub fn allowed_transitions(status: WorkOrderStatus) -> Vec<StatusAction> {
    match status {
        WorkOrderStatus::Pending => vec![StatusAction {
            label: "Start Work",
            target: WorkOrderStatus::InProgress,
            primary: true,
        }],
        WorkOrderStatus::InProgress => vec![
            StatusAction {
                label: "Review",
                target: WorkOrderStatus::InReview,
                primary: false,
            },
            StatusAction {
                label: "Complete",
                target: WorkOrderStatus::Completed,
                primary: true,
            },
        ],
        WorkOrderStatus::InReview => vec![StatusAction {
            label: "Approve & Complete",
            target: WorkOrderStatus::Completed,
            primary: true,
        }],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a005_work_order::WorkOrderDto;
    use chrono::Utc;

    fn order(id: &str, status: WorkOrderStatus) -> WorkOrder {
        let dto = WorkOrderDto {
            title: format!("Order {}", id),
            due_date: "2025-01-15".into(),
            ..Default::default()
        };
        let mut wo = WorkOrder::from_dto(WorkOrderId::new(id), &dto, Utc::now()).unwrap();
        wo.status = status;
        wo
    }

    fn board() -> Vec<WorkOrder> {
        vec![
            order("WO-1001", WorkOrderStatus::Pending),
            order("WO-1002", WorkOrderStatus::Pending),
            order("WO-1003", WorkOrderStatus::InProgress),
            order("WO-1004", WorkOrderStatus::OnHold),
            order("WO-1005", WorkOrderStatus::Completed),
            order("WO-1006", WorkOrderStatus::InReview),
        ]
    }

    fn ids(column: &KanbanColumn) -> Vec<&str> {
        column.items.iter().map(|wo| wo.id.as_str()).collect()
    }

    #[test]
    fn test_group_by_status_keeps_column_order() {
        let columns = group_by_status(&board());
        let titles: Vec<_> = columns.iter().map(|c| c.title).collect();
        assert_eq!(titles, ["Pending", "In Progress", "In Review", "Completed"]);
        assert_eq!(ids(&columns[0]), ["WO-1001", "WO-1002"]);
        assert_eq!(ids(&columns[1]), ["WO-1003"]);
        assert_eq!(ids(&columns[2]), ["WO-1006"]);
        assert_eq!(ids(&columns[3]), ["WO-1005"]);
    }

    #[test]
    fn test_group_by_status_drops_unmapped_statuses() {
        let total: usize = group_by_status(&board()).iter().map(|c| c.len()).sum();
        assert_eq!(total, 5);
        assert!(group_by_status(&[]).iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_move_card_and_rollback() {
        let mut orders = board();
        let id = WorkOrderId::new("WO-1001");

        let previous = move_card(&mut orders, &id, WorkOrderStatus::InReview);
        assert_eq!(previous, Some(WorkOrderStatus::Pending));
        assert_eq!(ids(&group_by_status(&orders)[2]), ["WO-1001", "WO-1006"]);

        if let Some(prev) = previous {
            move_card(&mut orders, &id, prev);
        }
        let statuses: Vec<_> = orders.iter().map(|wo| wo.status).collect();
        let original: Vec<_> = board().iter().map(|wo| wo.status).collect();
        assert_eq!(statuses, original);
    }

    #[test]
    fn test_move_card_same_column_is_noop() {
        let mut orders = board();
        let id = WorkOrderId::new("WO-1003");
        assert_eq!(move_card(&mut orders, &id, WorkOrderStatus::InProgress), None);
        assert_eq!(
            move_card(&mut orders, &WorkOrderId::new("WO-9"), WorkOrderStatus::Completed),
            None
        );
    }

    #[test]
    fn test_allowed_transitions() {
        let targets = |s| {
            allowed_transitions(s)
                .into_iter()
                .map(|a| (a.label, a.target))
                .collect::<Vec<_>>()
        };
        assert_eq!(
            targets(WorkOrderStatus::Pending),
            [("Start Work", WorkOrderStatus::InProgress)]
        );
        assert_eq!(
            targets(WorkOrderStatus::InProgress),
            [
                ("Review", WorkOrderStatus::InReview),
                ("Complete", WorkOrderStatus::Completed)
            ]
        );
        assert_eq!(
            targets(WorkOrderStatus::InReview),
            [("Approve & Complete", WorkOrderStatus::Completed)]
        );
        assert!(targets(WorkOrderStatus::Completed).is_empty());
    }
}
