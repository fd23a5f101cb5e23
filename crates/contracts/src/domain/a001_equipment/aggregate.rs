use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::a002_equipment_category::EquipmentCategoryId;
use crate::domain::a003_location::LocationId;
use crate::domain::common::AggregateRoot;

// ============================================================================
// ID Type
// ============================================================================

crate::string_id!(
    /// Уникальный идентификатор единицы оборудования
    EquipmentId
);

// ============================================================================
// Status
// ============================================================================

/// Эксплуатационный статус оборудования
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    #[default]
    Operational,
    Maintenance,
    Down,
    Scrapped,
}

impl EquipmentStatus {
    pub const ALL: [EquipmentStatus; 4] = [
        EquipmentStatus::Operational,
        EquipmentStatus::Maintenance,
        EquipmentStatus::Down,
        EquipmentStatus::Scrapped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Operational => "operational",
            EquipmentStatus::Maintenance => "maintenance",
            EquipmentStatus::Down => "down",
            EquipmentStatus::Scrapped => "scrapped",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EquipmentStatus::Operational => "Operational",
            EquipmentStatus::Maintenance => "Maintenance",
            EquipmentStatus::Down => "Down",
            EquipmentStatus::Scrapped => "Scrapped",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == code)
    }
}

/// Оценка состояния по health score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthLevel {
    Good,
    Fair,
    Poor,
}

impl HealthLevel {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            HealthLevel::Good
        } else if score >= 50 {
            HealthLevel::Fair
        } else {
            HealthLevel::Poor
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Единица оборудования
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: EquipmentId,
    pub name: String,
    pub category_id: EquipmentCategoryId,
    #[serde(default)]
    pub category_name: String,
    pub location_id: LocationId,
    #[serde(default)]
    pub location_name: String,
    pub serial_number: String,
    pub status: EquipmentStatus,
    pub health_score: u8,
    #[serde(default)]
    pub last_maintenance_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub warranty_expiration: Option<NaiveDate>,
}

impl Equipment {
    /// Создать запись из формы. Имена категории и локации передаются уже разрешёнными.
    pub fn from_dto(
        id: EquipmentId,
        dto: &EquipmentDto,
        category_name: String,
        location_name: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: dto.name.trim().to_string(),
            category_id: EquipmentCategoryId::new(dto.category_id.clone()),
            category_name,
            location_id: LocationId::new(dto.location_id.clone()),
            location_name,
            serial_number: dto.serial_number.trim().to_string(),
            status: dto.status,
            health_score: dto.health_score,
            last_maintenance_date: None,
            created_at: now,
            description: non_empty(&dto.description),
            model: non_empty(&dto.model),
            manufacturer: non_empty(&dto.manufacturer),
            purchase_date: dto.purchase_date,
            warranty_expiration: dto.warranty_expiration,
        }
    }

    pub fn health_level(&self) -> HealthLevel {
        HealthLevel::from_score(self.health_score)
    }

    /// Гарантия истекла на указанную дату
    pub fn is_warranty_expired(&self, today: NaiveDate) -> bool {
        self.warranty_expiration.map(|d| d < today).unwrap_or(false)
    }

    pub fn to_dto(&self) -> EquipmentDto {
        EquipmentDto {
            id: Some(self.id.0.clone()),
            name: self.name.clone(),
            category_id: self.category_id.0.clone(),
            location_id: self.location_id.0.clone(),
            serial_number: self.serial_number.clone(),
            status: self.status,
            health_score: self.health_score,
            description: self.description.clone().unwrap_or_default(),
            model: self.model.clone().unwrap_or_default(),
            manufacturer: self.manufacturer.clone().unwrap_or_default(),
            purchase_date: self.purchase_date,
            warranty_expiration: self.warranty_expiration,
        }
    }
}

impl AggregateRoot for Equipment {
    type Id = EquipmentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "equipment"
    }

    fn element_name() -> &'static str {
        "Equipment"
    }

    fn list_name() -> &'static str {
        "Equipment"
    }

    fn api_path() -> &'static str {
        "/equipment"
    }
}

// ============================================================================
// DTOs
// ============================================================================

/// Модель формы оборудования (создание и редактирование)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentDto {
    pub id: Option<String>,
    pub name: String,
    pub category_id: String,
    pub location_id: String,
    pub serial_number: String,
    pub status: EquipmentStatus,
    pub health_score: u8,
    pub description: String,
    pub model: String,
    pub manufacturer: String,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiration: Option<NaiveDate>,
}

impl Default for EquipmentDto {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            category_id: String::new(),
            location_id: String::new(),
            serial_number: String::new(),
            status: EquipmentStatus::Operational,
            health_score: 100,
            description: String::new(),
            model: String::new(),
            manufacturer: String::new(),
            purchase_date: None,
            warranty_expiration: None,
        }
    }
}

impl EquipmentDto {
    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".into());
        }
        if self.serial_number.trim().is_empty() {
            return Err("Serial number is required".into());
        }
        if self.category_id.trim().is_empty() {
            return Err("Category is required".into());
        }
        if self.location_id.trim().is_empty() {
            return Err("Location is required".into());
        }
        if self.health_score > 100 {
            return Err("Health score must be between 0 and 100".into());
        }
        if let (Some(purchased), Some(warranty)) = (self.purchase_date, self.warranty_expiration) {
            if warranty < purchased {
                return Err("Warranty cannot expire before the purchase date".into());
            }
        }
        Ok(())
    }
}

/// Частичное обновление: заданные поля перезаписывают текущие значения
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<EquipmentCategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<LocationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EquipmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_maintenance_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warranty_expiration: Option<NaiveDate>,
}

impl EquipmentPatch {
    /// Полный патч из формы редактирования
    pub fn from_dto(dto: &EquipmentDto) -> Self {
        Self {
            name: Some(dto.name.trim().to_string()),
            category_id: Some(EquipmentCategoryId::new(dto.category_id.clone())),
            category_name: None,
            location_id: Some(LocationId::new(dto.location_id.clone())),
            location_name: None,
            serial_number: Some(dto.serial_number.trim().to_string()),
            status: Some(dto.status),
            health_score: Some(dto.health_score),
            last_maintenance_date: None,
            description: Some(dto.description.clone()),
            model: Some(dto.model.clone()),
            manufacturer: Some(dto.manufacturer.clone()),
            purchase_date: dto.purchase_date,
            warranty_expiration: dto.warranty_expiration,
        }
    }

    pub fn status(status: EquipmentStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn apply(&self, target: &mut Equipment) {
        if let Some(v) = &self.name {
            target.name = v.clone();
        }
        if let Some(v) = &self.category_id {
            target.category_id = v.clone();
        }
        if let Some(v) = &self.category_name {
            target.category_name = v.clone();
        }
        if let Some(v) = &self.location_id {
            target.location_id = v.clone();
        }
        if let Some(v) = &self.location_name {
            target.location_name = v.clone();
        }
        if let Some(v) = &self.serial_number {
            target.serial_number = v.clone();
        }
        if let Some(v) = self.status {
            target.status = v;
        }
        if let Some(v) = self.health_score {
            target.health_score = v.min(100);
        }
        if let Some(v) = self.last_maintenance_date {
            target.last_maintenance_date = Some(v);
        }
        // Пустая строка в текстовых полях означает "очистить"
        if let Some(v) = &self.description {
            target.description = non_empty(v);
        }
        if let Some(v) = &self.model {
            target.model = non_empty(v);
        }
        if let Some(v) = &self.manufacturer {
            target.manufacturer = non_empty(v);
        }
        if self.purchase_date.is_some() {
            target.purchase_date = self.purchase_date;
        }
        if self.warranty_expiration.is_some() {
            target.warranty_expiration = self.warranty_expiration;
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Equipment {
        let dto = EquipmentDto {
            name: "Industrial HVAC Unit".into(),
            category_id: "1".into(),
            location_id: "1".into(),
            serial_number: "HVAC-2023-001".into(),
            health_score: 92,
            model: "CoolMaster 3000".into(),
            ..Default::default()
        };
        Equipment::from_dto(
            EquipmentId::new("1"),
            &dto,
            "HVAC".into(),
            "Main Building - Roof".into(),
            Utc::now(),
        )
    }

    #[test]
    fn test_from_dto_drops_empty_optionals() {
        let e = sample();
        assert_eq!(e.model.as_deref(), Some("CoolMaster 3000"));
        assert_eq!(e.manufacturer, None);
        assert_eq!(e.category_name, "HVAC");
    }

    #[test]
    fn test_validate() {
        let mut dto = sample().to_dto();
        assert!(dto.validate().is_ok());

        dto.serial_number = "  ".into();
        assert_eq!(dto.validate(), Err("Serial number is required".to_string()));

        dto.serial_number = "X".into();
        dto.health_score = 101;
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_patch_merges_only_present_fields() {
        let mut e = sample();
        let patch = EquipmentPatch {
            status: Some(EquipmentStatus::Down),
            health_score: Some(30),
            ..Default::default()
        };
        patch.apply(&mut e);
        assert_eq!(e.status, EquipmentStatus::Down);
        assert_eq!(e.health_score, 30);
        assert_eq!(e.name, "Industrial HVAC Unit");
        assert_eq!(e.health_level(), HealthLevel::Poor);
    }

    #[test]
    fn test_health_levels() {
        assert_eq!(HealthLevel::from_score(80), HealthLevel::Good);
        assert_eq!(HealthLevel::from_score(79), HealthLevel::Fair);
        assert_eq!(HealthLevel::from_score(50), HealthLevel::Fair);
        assert_eq!(HealthLevel::from_score(49), HealthLevel::Poor);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(EquipmentStatus::from_code("down"), Some(EquipmentStatus::Down));
        assert_eq!(EquipmentStatus::from_code("broken"), None);
        assert_eq!(
            serde_json::to_string(&EquipmentStatus::Operational).unwrap(),
            "\"operational\""
        );
    }
}
