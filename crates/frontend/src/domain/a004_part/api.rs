use chrono::Utc;
use contracts::domain::a004_part::{AdjustStockRequest, Part, PartDto, PartId, PartPatch};
use contracts::shared::endpoints::{parts as ep, with_id};

use crate::shared::api_client::{self, ApiError};
use crate::shared::config::{use_mock, MockOp};
use crate::shared::mock_store::{self, MockDb};

/// Склад по умолчанию, если локация не найдена
const DEFAULT_LOCATION_NAME: &str = "Main Warehouse";

fn location_name(db: &MockDb, location_id: &str) -> String {
    db.locations
        .find(location_id)
        .map(|l| l.name.clone())
        .unwrap_or_else(|| DEFAULT_LOCATION_NAME.to_string())
}

pub async fn fetch_parts() -> Result<Vec<Part>, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::List, |db| Ok(db.parts.list())).await;
    }
    api_client::get(ep::LIST).await
}

pub async fn fetch_part(id: String) -> Result<Part, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::Get, move |db| db.parts.get(&id)).await;
    }
    api_client::get(&with_id(ep::ITEM, &id)).await
}

pub async fn fetch_low_stock() -> Result<Vec<Part>, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::List, |db| {
            Ok(contracts::domain::a004_part::low_stock(db.parts.rows())
                .into_iter()
                .cloned()
                .collect())
        })
        .await;
    }
    api_client::get(ep::LOW_STOCK).await
}

pub async fn create_part(dto: PartDto) -> Result<Part, ApiError> {
    dto.validate()?;
    if use_mock() {
        return mock_store::call(MockOp::Mutate, move |db| {
            let name = location_name(db, &dto.location_id);
            let id = PartId::new(db.parts.next_id());
            Ok(db.parts.insert(Part::from_dto(id, &dto, Some(name), Utc::now())))
        })
        .await;
    }
    api_client::post(ep::LIST, &dto).await
}

pub async fn update_part(id: String, mut patch: PartPatch) -> Result<Part, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::Mutate, move |db| {
            if let Some(location_id) = &patch.location_id {
                patch.location_name = Some(location_name(db, location_id.as_str()));
            }
            db.parts.update_with(&id, |item| {
                patch.apply(item, Utc::now());
                Ok(())
            })
        })
        .await;
    }
    api_client::put(&with_id(ep::ITEM, &id), &patch).await
}

/// Корректировка остатка; уход в минус отклоняется
pub async fn adjust_stock(id: String, request: AdjustStockRequest) -> Result<Part, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::Mutate, move |db| {
            db.parts
                .update_with(&id, |item| item.adjust_stock(request.delta, Utc::now()))
        })
        .await;
    }
    api_client::post(&with_id(ep::ADJUST_STOCK, &id), &request).await
}

pub async fn delete_part(id: String) -> Result<(), ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::Mutate, move |db| db.parts.remove(&id)).await;
    }
    api_client::delete(&with_id(ep::ITEM, &id)).await
}
