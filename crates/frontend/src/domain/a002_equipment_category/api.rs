use contracts::domain::a002_equipment_category::{
    EquipmentCategory, EquipmentCategoryDto, EquipmentCategoryId,
};
use contracts::shared::endpoints::{categories as ep, with_id};

use crate::shared::api_client::{self, ApiError};
use crate::shared::config::{use_mock, MockOp};
use crate::shared::mock_store;

pub async fn fetch_categories() -> Result<Vec<EquipmentCategory>, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::List, |db| Ok(db.categories.list())).await;
    }
    api_client::get(ep::LIST).await
}

pub async fn create_category(dto: EquipmentCategoryDto) -> Result<EquipmentCategory, ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::Mutate, move |db| {
            dto.validate(db.categories.rows())?;
            let mut item = EquipmentCategory {
                id: EquipmentCategoryId::new(db.categories.next_id()),
                name: String::new(),
                description: None,
            };
            item.update(&dto);
            Ok(db.categories.insert(item))
        })
        .await;
    }
    api_client::post(ep::LIST, &dto).await
}

/// Id из пути главнее id в теле: проверка уникальности исключает саму категорию
fn bind_id(id: &str, mut dto: EquipmentCategoryDto) -> EquipmentCategoryDto {
    dto.id = Some(id.to_string());
    dto
}

pub async fn update_category(
    id: String,
    dto: EquipmentCategoryDto,
) -> Result<EquipmentCategory, ApiError> {
    let dto = bind_id(&id, dto);
    if use_mock() {
        return mock_store::call(MockOp::Mutate, move |db| {
            dto.validate(db.categories.rows())?;
            db.categories.update_with(&id, |item| {
                item.update(&dto);
                Ok(())
            })
        })
        .await;
    }
    api_client::put(&with_id(ep::ITEM, &id), &dto).await
}

pub async fn delete_category(id: String) -> Result<(), ApiError> {
    if use_mock() {
        return mock_store::call(MockOp::Mutate, move |db| db.categories.remove(&id)).await;
    }
    api_client::delete(&with_id(ep::ITEM, &id)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_validates_against_path_id() {
        let existing = vec![EquipmentCategory {
            id: EquipmentCategoryId::new("1"),
            name: "HVAC".into(),
            description: None,
        }];
        let dto = EquipmentCategoryDto {
            id: None,
            name: "hvac".into(),
            description: "Heating".into(),
        };
        assert!(dto.validate(&existing).is_err());

        let bound = bind_id("1", dto);
        assert_eq!(bound.id.as_deref(), Some("1"));
        assert!(bound.validate(&existing).is_ok());
        assert!(bind_id("2", bound).validate(&existing).is_err());
    }
}
