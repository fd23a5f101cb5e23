use chrono::Utc;
use contracts::domain::a005_work_order::{next_work_order_id, WorkOrder};
use contracts::domain::a006_maintenance_schedule::{
    self as schedule, MaintenanceSchedule, MaintenanceScheduleId, ScheduleDto, SchedulePatch,
};
use contracts::shared::endpoints::{schedules as ep, with_id};

use crate::shared::api_client::{self, ApiError};
use crate::shared::config::{use_mock, MockOp};
use crate::shared::mock_store::{self, MockDb};

fn equipment_name(db: &MockDb, equipment_id: &str) -> Option<String> {
    db.equipment.find(equipment_id).map(|e| e.name.clone())
}

pub async fn fetch_schedules() -> Result<Vec<MaintenanceSchedule>, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::List, |db| Ok(db.schedules.list())).await;
    }
    api_client::get(ep::LIST).await
}

pub async fn fetch_schedule(id: String) -> Result<MaintenanceSchedule, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::Get, move |db| db.schedules.get(&id)).await;
    }
    api_client::get(&with_id(ep::ITEM, &id)).await
}

/// Графики со сроком в ближайшие `DEFAULT_UPCOMING_DAYS` дней
pub async fn fetch_upcoming() -> Result<Vec<MaintenanceSchedule>, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::List, |db| {
            Ok(schedule::upcoming(db.schedules.rows(), Utc::now(), schedule::DEFAULT_UPCOMING_DAYS)
                .into_iter()
                .cloned()
                .collect())
        })
        .await;
    }
    api_client::get(ep::UPCOMING).await
}

pub async fn fetch_overdue() -> Result<Vec<MaintenanceSchedule>, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::List, |db| {
            Ok(schedule::overdue(db.schedules.rows(), Utc::now())
                .into_iter()
                .cloned()
                .collect())
        })
        .await;
    }
    api_client::get(ep::OVERDUE).await
}

pub async fn create_schedule(dto: ScheduleDto) -> Result<MaintenanceSchedule, ApiError> {
    dto.validate()?;
    if use_mock() {
        return mock_store::call(MockOp::Mutate, move |db| {
            let name = equipment_name(db, dto.equipment_id.trim());
            let id = MaintenanceScheduleId::new(db.schedules.next_id());
            Ok(db
                .schedules
                .insert(MaintenanceSchedule::from_dto(id, &dto, name, Utc::now())))
        })
        .await;
    }
    api_client::post(ep::LIST, &dto).await
}

pub async fn update_schedule(
    id: String,
    mut patch: SchedulePatch,
) -> Result<MaintenanceSchedule, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::Mutate, move |db| {
            if let Some(equipment_id) = &patch.equipment_id {
                patch.equipment_name = Some(
                    equipment_name(db, equipment_id.as_str())
                        .unwrap_or_else(|| schedule::UNKNOWN_EQUIPMENT.to_string()),
                );
            }
            db.schedules.update_with(&id, |item| {
                patch.apply(item);
                Ok(())
            })
        })
        .await;
    }
    api_client::put(&with_id(ep::ITEM, &id), &patch).await
}

pub async fn delete_schedule(id: String) -> Result<(), ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::Mutate, move |db| db.schedules.remove(&id)).await;
    }
    api_client::delete(&with_id(ep::ITEM, &id)).await
}

/// Наряд по графику: pending, тип и приоритет из графика, срок = next_due
pub async fn generate_work_order(id: String) -> Result<WorkOrder, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::List, move |db| {
            let source = db.schedules.get(&id)?;
            let wo_id = next_work_order_id(db.work_orders.rows());
            let order = source.to_work_order(wo_id, Utc::now());
            Ok(db.work_orders.insert(order))
        })
        .await;
    }
    api_client::post(&with_id(ep::GENERATE_WORK_ORDER, &id), &()).await
}
