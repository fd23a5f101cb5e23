use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::a001_equipment::{Equipment, EquipmentStatus};
use crate::domain::a004_part::{low_stock, Part};
use crate::domain::a005_work_order::{WorkOrder, WorkOrderStatus, WorkOrderType};
use crate::domain::a006_maintenance_schedule::{overdue, upcoming, MaintenanceSchedule, DEFAULT_UPCOMING_DAYS};
use crate::domain::common::Priority;
use crate::system::users::{User, UserRole};

/// Сколько последних нарядов показывать на дашборде
pub const RECENT_LIMIT: usize = 5;

/// Счётчики по всем значениям перечисления, в порядке `ALL`
pub type CountBy<T> = Vec<(T, usize)>;

/// Сводка для ролевых дашбордов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_equipment: usize,
    pub equipment_by_status: CountBy<EquipmentStatus>,
    pub average_health: f64,

    pub total_work_orders: usize,
    pub active_work_orders: usize,
    pub pending_work_orders: usize,
    pub overdue_work_orders: usize,
    pub completed_work_orders: usize,
    pub work_orders_by_status: CountBy<WorkOrderStatus>,
    pub work_orders_by_type: CountBy<WorkOrderType>,
    pub work_orders_by_priority: CountBy<Priority>,

    pub upcoming_maintenance: Vec<MaintenanceSchedule>,
    pub overdue_maintenance: Vec<MaintenanceSchedule>,
    pub low_stock_parts: Vec<Part>,
    pub recent_work_orders: Vec<WorkOrder>,
}

impl DashboardSummary {
    pub fn compute(
        equipment: &[Equipment],
        work_orders: &[WorkOrder],
        schedules: &[MaintenanceSchedule],
        parts: &[Part],
        now: DateTime<Utc>,
    ) -> Self {
        let average_health = if equipment.is_empty() {
            0.0
        } else {
            let sum: u32 = equipment.iter().map(|e| e.health_score as u32).sum();
            (sum as f64 / equipment.len() as f64 * 10.0).round() / 10.0
        };

        let mut recent: Vec<WorkOrder> = work_orders.to_vec();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(RECENT_LIMIT);

        Self {
            total_equipment: equipment.len(),
            equipment_by_status: count_by(&EquipmentStatus::ALL, equipment, |e| e.status),
            average_health,

            total_work_orders: work_orders.len(),
            active_work_orders: work_orders.iter().filter(|w| !w.status.is_closed()).count(),
            pending_work_orders: count_status(work_orders, WorkOrderStatus::Pending),
            overdue_work_orders: work_orders.iter().filter(|w| w.is_overdue(now)).count(),
            completed_work_orders: count_status(work_orders, WorkOrderStatus::Completed),
            work_orders_by_status: count_by(&WorkOrderStatus::ALL, work_orders, |w| w.status),
            work_orders_by_type: count_by(&WorkOrderType::ALL, work_orders, |w| {
                w.work_order_type
            }),
            work_orders_by_priority: count_by(&Priority::ALL, work_orders, |w| w.priority),

            upcoming_maintenance: upcoming(schedules, now, DEFAULT_UPCOMING_DAYS)
                .into_iter()
                .cloned()
                .collect(),
            overdue_maintenance: overdue(schedules, now).into_iter().cloned().collect(),
            low_stock_parts: low_stock(parts).into_iter().cloned().collect(),
            recent_work_orders: recent,
        }
    }

    /// Доля завершённых нарядов в процентах
    pub fn completion_rate(&self) -> u32 {
        if self.total_work_orders == 0 {
            return 0;
        }
        (self.completed_work_orders as f64 / self.total_work_orders as f64 * 100.0).round() as u32
    }

    pub fn equipment_count(&self, status: EquipmentStatus) -> usize {
        lookup(&self.equipment_by_status, status)
    }

    pub fn work_order_count(&self, status: WorkOrderStatus) -> usize {
        lookup(&self.work_orders_by_status, status)
    }
}

/// Незавершённые наряды исполнителя, ближайший срок первым
pub fn assigned_to<'a>(work_orders: &'a [WorkOrder], assignee: &str) -> Vec<&'a WorkOrder> {
    let mut mine: Vec<_> = work_orders
        .iter()
        .filter(|w| w.status != WorkOrderStatus::Completed)
        .filter(|w| {
            w.assignee_name()
                .is_some_and(|name| name.eq_ignore_ascii_case(assignee.trim()))
        })
        .collect();
    mine.sort_by_key(|w| w.due_date);
    mine
}

pub fn users_by_role(users: &[User]) -> CountBy<UserRole> {
    count_by(&UserRole::ALL, users, |u| u.role)
}

fn count_status(orders: &[WorkOrder], status: WorkOrderStatus) -> usize {
    orders.iter().filter(|w| w.status == status).count()
}

fn count_by<T, K, F>(keys: &[K], items: &[T], key_of: F) -> CountBy<K>
where
    K: Copy + PartialEq,
    F: Fn(&T) -> K,
{
    keys.iter()
        .map(|k| (*k, items.iter().filter(|i| key_of(i) == *k).count()))
        .collect()
}

fn lookup<K: PartialEq>(counts: &[(K, usize)], key: K) -> usize {
    counts
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, n)| *n)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_equipment::{EquipmentDto, EquipmentId};
    use crate::domain::a004_part::{PartDto, PartId};
    use crate::domain::a005_work_order::{WorkOrderDto, WorkOrderId};
    use crate::domain::a006_maintenance_schedule::{MaintenanceScheduleId, ScheduleDto};
    use chrono::Duration;

    fn equipment(id: &str, status: EquipmentStatus, health: u8) -> Equipment {
        let dto = EquipmentDto {
            name: format!("Unit {}", id),
            category_id: "1".into(),
            location_id: "1".into(),
            serial_number: format!("SN-{}", id),
            status,
            health_score: health,
            ..Default::default()
        };
        Equipment::from_dto(
            EquipmentId::new(id),
            &dto,
            "HVAC".into(),
            "Main".into(),
            Utc::now(),
        )
    }

    fn order(id: &str, status: WorkOrderStatus, due_offset: i64, age: i64, who: &str) -> WorkOrder {
        let now = Utc::now();
        let dto = WorkOrderDto {
            title: id.into(),
            assignee_name: who.into(),
            due_date: (now + Duration::days(due_offset)).to_rfc3339(),
            ..Default::default()
        };
        let mut wo =
            WorkOrder::from_dto(WorkOrderId::new(id), &dto, now - Duration::hours(age)).unwrap();
        wo.status = status;
        wo
    }

    fn fixture() -> (Vec<Equipment>, Vec<WorkOrder>, Vec<MaintenanceSchedule>, Vec<Part>) {
        let now = Utc::now();
        let equipment = vec![
            equipment("1", EquipmentStatus::Operational, 92),
            equipment("2", EquipmentStatus::Maintenance, 65),
            equipment("3", EquipmentStatus::Down, 32),
        ];
        let orders = vec![
            order("WO-1", WorkOrderStatus::Pending, -1, 10, "Alex Johnson"),
            order("WO-2", WorkOrderStatus::InProgress, 3, 9, "Alex Johnson"),
            order("WO-3", WorkOrderStatus::Completed, -5, 8, "Alex Johnson"),
            order("WO-4", WorkOrderStatus::Pending, 2, 7, ""),
            order("WO-5", WorkOrderStatus::Cancelled, -2, 6, ""),
            order("WO-6", WorkOrderStatus::InReview, 1, 5, "Tom Wilson"),
        ];
        let mut schedules = Vec::new();
        for (id, offset) in [("s1", 3), ("s2", -2), ("s3", 20)] {
            let dto = ScheduleDto {
                equipment_id: "1".into(),
                ..Default::default()
            };
            let mut s = MaintenanceSchedule::from_dto(MaintenanceScheduleId::new(id), &dto, None, now);
            s.next_due = now + Duration::days(offset);
            schedules.push(s);
        }
        let parts = [(25, 10, 15), (5, 8, 10), (0, 0, 0)]
            .iter()
            .enumerate()
            .map(|(i, (qty, min, reorder))| {
                let dto = PartDto {
                    name: format!("Part {}", i),
                    part_number: format!("P-{}", i),
                    location_id: "1".into(),
                    quantity_on_hand: *qty,
                    minimum_stock_level: *min,
                    reorder_point: *reorder,
                    unit_cost: 1.0,
                    ..Default::default()
                };
                Part::from_dto(PartId::new(i.to_string()), &dto, None, now)
            })
            .collect();
        (equipment, orders, schedules, parts)
    }

    #[test]
    fn test_compute_counts() {
        let (eq, wo, sch, parts) = fixture();
        let s = DashboardSummary::compute(&eq, &wo, &sch, &parts, Utc::now());

        assert_eq!(s.total_equipment, 3);
        assert_eq!(s.equipment_count(EquipmentStatus::Down), 1);
        assert_eq!(s.equipment_count(EquipmentStatus::Scrapped), 0);
        assert_eq!(s.average_health, 63.0);

        assert_eq!(s.total_work_orders, 6);
        assert_eq!(s.active_work_orders, 4);
        assert_eq!(s.pending_work_orders, 2);
        assert_eq!(s.overdue_work_orders, 1);
        assert_eq!(s.completed_work_orders, 1);
        assert_eq!(s.work_order_count(WorkOrderStatus::InReview), 1);
        assert_eq!(s.completion_rate(), 17);

        assert_eq!(s.upcoming_maintenance.len(), 1);
        assert_eq!(s.overdue_maintenance.len(), 1);
        assert_eq!(s.low_stock_parts.len(), 2);
    }

    #[test]
    fn test_recent_orders_newest_first() {
        let (eq, wo, sch, parts) = fixture();
        let s = DashboardSummary::compute(&eq, &wo, &sch, &parts, Utc::now());
        let ids: Vec<_> = s.recent_work_orders.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, ["WO-6", "WO-5", "WO-4", "WO-3", "WO-2"]);
    }

    #[test]
    fn test_empty_inputs() {
        let s = DashboardSummary::compute(&[], &[], &[], &[], Utc::now());
        assert_eq!(s.average_health, 0.0);
        assert_eq!(s.completion_rate(), 0);
        assert!(s.recent_work_orders.is_empty());
    }

    #[test]
    fn test_assigned_to_skips_completed() {
        let (_, wo, _, _) = fixture();
        let ids: Vec<_> = assigned_to(&wo, "alex johnson")
            .iter()
            .map(|w| w.id.as_str())
            .collect();
        assert_eq!(ids, ["WO-1", "WO-2"]);
    }
}
