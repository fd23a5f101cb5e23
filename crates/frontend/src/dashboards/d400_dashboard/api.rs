use chrono::{DateTime, Utc};
use contracts::dashboards::d400_dashboard::{users_by_role, CountBy, DashboardSummary};
use contracts::domain::a001_equipment::Equipment;
use contracts::domain::a004_part::Part;
use contracts::domain::a005_work_order::WorkOrder;
use contracts::domain::a006_maintenance_schedule::MaintenanceSchedule;
use contracts::system::permissions::has_permission;
use contracts::system::users::{UserFilter, UserRole};

use crate::domain::{a001_equipment, a004_part, a005_work_order, a006_maintenance_schedule};
use crate::shared::api_client::ApiError;
use crate::shared::config::{use_mock, MockOp};
use crate::shared::mock_store;
use crate::system::users::api::fetch_users;

/// Исходные списки для всех ролевых дашбордов
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub equipment: Vec<Equipment>,
    pub work_orders: Vec<WorkOrder>,
    pub schedules: Vec<MaintenanceSchedule>,
    pub parts: Vec<Part>,
}

impl DashboardSnapshot {
    pub fn summary(&self, now: DateTime<Utc>) -> DashboardSummary {
        DashboardSummary::compute(
            &self.equipment,
            &self.work_orders,
            &self.schedules,
            &self.parts,
            now,
        )
    }
}

/// Какие списки роль вправе читать; остальные остаются пустыми
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotScope {
    pub equipment: bool,
    pub work_orders: bool,
    pub schedules: bool,
    pub parts: bool,
}

impl SnapshotScope {
    pub fn for_role(role: UserRole) -> Self {
        Self {
            equipment: has_permission(role, "equipment:read"),
            work_orders: has_permission(role, "workorder:read"),
            schedules: has_permission(role, "schedule:read"),
            parts: has_permission(role, "parts:read"),
        }
    }
}

/// Список, если он в области видимости; 403 не роняет весь дашборд
async fn fetch_scoped<T, F>(allowed: bool, what: &str, fetch: F) -> Result<Vec<T>, ApiError>
where
    F: std::future::Future<Output = Result<Vec<T>, ApiError>>,
{
    if !allowed {
        return Ok(Vec::new());
    }
    match fetch.await {
        Err(ApiError::Forbidden) => {
            log::warn!("Dashboard: no access to {}, section left empty", what);
            Ok(Vec::new())
        }
        other => other,
    }
}

/// В mock-режиме одна задержка на весь снимок, иначе до четырёх запросов подряд
pub async fn fetch_snapshot(role: UserRole) -> Result<DashboardSnapshot, ApiError> {
    let scope = SnapshotScope::for_role(role);
    if use_mock() {
        return mock_store::call(MockOp::List, move |db| {
            Ok(DashboardSnapshot {
                equipment: scoped(scope.equipment, || db.equipment.list()),
                work_orders: scoped(scope.work_orders, || db.work_orders.list()),
                schedules: scoped(scope.schedules, || db.schedules.list()),
                parts: scoped(scope.parts, || db.parts.list()),
            })
        })
        .await;
    }
    Ok(DashboardSnapshot {
        equipment: fetch_scoped(
            scope.equipment,
            "equipment",
            a001_equipment::api::fetch_equipment(),
        )
        .await?,
        work_orders: fetch_scoped(
            scope.work_orders,
            "work orders",
            a005_work_order::api::fetch_work_orders(),
        )
        .await?,
        schedules: fetch_scoped(
            scope.schedules,
            "schedules",
            a006_maintenance_schedule::api::fetch_schedules(),
        )
        .await?,
        parts: fetch_scoped(scope.parts, "parts", a004_part::api::fetch_parts()).await?,
    })
}

fn scoped<T>(allowed: bool, list: impl FnOnce() -> Vec<T>) -> Vec<T> {
    if allowed {
        list()
    } else {
        Vec::new()
    }
}

pub async fn fetch_users_by_role() -> Result<CountBy<UserRole>, ApiError> {
    let users = fetch_users(UserFilter::default()).await?;
    Ok(users_by_role(&users))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_follows_read_permissions() {
        let technician = SnapshotScope::for_role(UserRole::Technician);
        assert!(technician.equipment && technician.work_orders && technician.parts);
        assert!(!technician.schedules);

        let operator = SnapshotScope::for_role(UserRole::Operator);
        assert!(operator.equipment && operator.work_orders);
        assert!(!operator.schedules && !operator.parts);

        for role in [UserRole::SuperAdmin, UserRole::Manager, UserRole::Viewer] {
            let scope = SnapshotScope::for_role(role);
            assert!(scope.equipment && scope.work_orders && scope.schedules && scope.parts);
        }
    }

    #[test]
    fn test_scoped_skips_disallowed_lists() {
        assert_eq!(scoped(false, || vec![1, 2]), Vec::<i32>::new());
        assert_eq!(scoped(true, || vec![1, 2]), vec![1, 2]);
    }
}
