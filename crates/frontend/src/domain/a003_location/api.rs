use chrono::Utc;
use contracts::domain::a003_location::{Location, LocationDto, LocationId, LocationPatch};
use contracts::shared::endpoints::{locations as ep, with_id};

use crate::shared::api_client::{self, ApiError};
use crate::shared::config::{use_mock, MockOp};
use crate::shared::mock_store;

/// Список локаций (в mock-режиме со своей задержкой)
pub async fn fetch_locations() -> Result<Vec<Location>, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::LocationsList, |db| Ok(db.locations.list())).await;
    }
    api_client::get(ep::LIST).await
}

pub async fn fetch_location(id: String) -> Result<Location, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::Get, move |db| db.locations.get(&id)).await;
    }
    api_client::get(&with_id(ep::ITEM, &id)).await
}

pub async fn create_location(dto: LocationDto) -> Result<Location, ApiError> {
    dto.validate()?;
    if use_mock() {
        return mock_store::call(MockOp::Mutate, move |db| {
            let id = LocationId::new(db.locations.next_id());
            Ok(db.locations.insert(Location::from_dto(id, &dto, Utc::now())))
        })
        .await;
    }
    api_client::post(ep::LIST, &dto).await
}

pub async fn update_location(id: String, patch: LocationPatch) -> Result<Location, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::Mutate, move |db| {
            db.locations.update_with(&id, |item| {
                patch.apply(item, Utc::now());
                Ok(())
            })
        })
        .await;
    }
    api_client::put(&with_id(ep::ITEM, &id), &patch).await
}

pub async fn delete_location(id: String) -> Result<(), ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::Mutate, move |db| db.locations.remove(&id)).await;
    }
    api_client::delete(&with_id(ep::ITEM, &id)).await
}
