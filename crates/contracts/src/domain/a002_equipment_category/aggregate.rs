use serde::{Deserialize, Serialize};

use crate::domain::common::AggregateRoot;

crate::string_id!(
    /// Идентификатор категории оборудования
    EquipmentCategoryId
);

/// Категория оборудования (HVAC, Electrical, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentCategory {
    pub id: EquipmentCategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl EquipmentCategory {
    pub fn to_dto(&self) -> EquipmentCategoryDto {
        EquipmentCategoryDto {
            id: Some(self.id.0.clone()),
            name: self.name.clone(),
            description: self.description.clone().unwrap_or_default(),
        }
    }

    pub fn update(&mut self, dto: &EquipmentCategoryDto) {
        self.name = dto.name.trim().to_string();
        let description = dto.description.trim();
        self.description = if description.is_empty() {
            None
        } else {
            Some(description.to_string())
        };
    }
}

impl AggregateRoot for EquipmentCategory {
    type Id = EquipmentCategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "equipment_category"
    }

    fn element_name() -> &'static str {
        "Category"
    }

    fn list_name() -> &'static str {
        "Equipment Categories"
    }

    fn api_path() -> &'static str {
        "/categories"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentCategoryDto {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
}

impl EquipmentCategoryDto {
    /// Валидация с проверкой уникальности имени среди `existing`
    pub fn validate(&self, existing: &[EquipmentCategory]) -> Result<(), String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Category name is required".into());
        }
        let lowered = name.to_lowercase();
        let taken = existing.iter().any(|c| {
            c.name.trim().to_lowercase() == lowered && Some(c.id.as_str()) != self.id.as_deref()
        });
        if taken {
            return Err(format!("Category '{}' already exists", name));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<EquipmentCategory> {
        ["HVAC", "Electrical"]
            .iter()
            .enumerate()
            .map(|(i, name)| EquipmentCategory {
                id: EquipmentCategoryId::new((i + 1).to_string()),
                name: name.to_string(),
                description: None,
            })
            .collect()
    }

    #[test]
    fn test_duplicate_name_rejected_case_insensitive() {
        let dto = EquipmentCategoryDto {
            name: "hvac".into(),
            ..Default::default()
        };
        assert!(dto.validate(&categories()).is_err());
    }

    #[test]
    fn test_duplicate_name_rejected_for_non_ascii() {
        let mut existing = categories();
        existing.push(EquipmentCategory {
            id: EquipmentCategoryId::new("3"),
            name: "Электрика".into(),
            description: None,
        });
        let dto = EquipmentCategoryDto {
            name: " электрика ".into(),
            ..Default::default()
        };
        assert_eq!(
            dto.validate(&existing),
            Err("Category 'электрика' already exists".to_string())
        );
    }

    #[test]
    fn test_renaming_self_is_allowed() {
        let dto = EquipmentCategoryDto {
            id: Some("1".into()),
            name: "HVAC".into(),
            description: "Heating".into(),
        };
        assert!(dto.validate(&categories()).is_ok());

        let mut category = categories().remove(0);
        category.update(&dto);
        assert_eq!(category.description.as_deref(), Some("Heating"));
    }
}
