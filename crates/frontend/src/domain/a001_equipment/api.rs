use chrono::Utc;
use contracts::domain::a001_equipment::{Equipment, EquipmentDto, EquipmentId, EquipmentPatch};
use contracts::domain::a005_work_order::{next_work_order_id, ReportIssueRequest, WorkOrder};
use contracts::shared::endpoints::{equipment as ep, with_id};

use crate::shared::api_client::{self, ApiError};
use crate::shared::config::{use_mock, MockOp};
use crate::shared::mock_store::{self, MockDb};

pub async fn fetch_equipment() -> Result<Vec<Equipment>, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::List, |db| Ok(db.equipment.list())).await;
    }
    api_client::get(ep::LIST).await
}

pub async fn fetch_equipment_by_id(id: String) -> Result<Equipment, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::Get, move |db| db.equipment.get(&id)).await;
    }
    api_client::get(&with_id(ep::ITEM, &id)).await
}

/// Имена категории и локации по id; отсутствующие дают пустую строку
fn resolve_names(db: &MockDb, category_id: &str, location_id: &str) -> (String, String) {
    let category = db
        .categories
        .find(category_id)
        .map(|c| c.name.clone())
        .unwrap_or_default();
    let location = db
        .locations
        .find(location_id)
        .map(|l| l.name.clone())
        .unwrap_or_default();
    (category, location)
}

pub async fn create_equipment(dto: EquipmentDto) -> Result<Equipment, ApiError> {
    dto.validate()?;
    if use_mock() {
        return mock_store::call(MockOp::Mutate, move |db| {
            let (category_name, location_name) =
                resolve_names(db, &dto.category_id, &dto.location_id);
            let id = EquipmentId::new(db.equipment.next_id());
            let item = Equipment::from_dto(id, &dto, category_name, location_name, Utc::now());
            Ok(db.equipment.insert(item))
        })
        .await;
    }
    api_client::post(ep::LIST, &dto).await
}

pub async fn update_equipment(id: String, mut patch: EquipmentPatch) -> Result<Equipment, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::Mutate, move |db| {
            let category_id = patch.category_id.as_ref().map(|c| c.as_str().to_string());
            let location_id = patch.location_id.as_ref().map(|l| l.as_str().to_string());
            let (category_name, location_name) = resolve_names(
                db,
                category_id.as_deref().unwrap_or_default(),
                location_id.as_deref().unwrap_or_default(),
            );
            if category_id.is_some() {
                patch.category_name = Some(category_name);
            }
            if location_id.is_some() {
                patch.location_name = Some(location_name);
            }
            db.equipment.update_with(&id, |item| {
                patch.apply(item);
                Ok(())
            })
        })
        .await;
    }
    api_client::put(&with_id(ep::ITEM, &id), &patch).await
}

pub async fn delete_equipment(id: String) -> Result<(), ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::Mutate, move |db| db.equipment.remove(&id)).await;
    }
    api_client::delete(&with_id(ep::ITEM, &id)).await
}

/// Заявка о неисправности: создаёт наряд на ремонт в статусе pending
pub async fn report_issue(id: String, request: ReportIssueRequest) -> Result<WorkOrder, ApiError> {
    request.validate()?;
    if use_mock() {
        return mock_store::call(MockOp::Mutate, move |db| {
            db.equipment.get(&id)?;
            let now = Utc::now();
            let dto = request.to_work_order_dto(&id, now);
            let order = WorkOrder::from_dto(next_work_order_id(db.work_orders.rows()), &dto, now)?;
            Ok(db.work_orders.insert(order))
        })
        .await;
    }
    api_client::post(&with_id(ep::REPORT_ISSUE, &id), &request).await
}
