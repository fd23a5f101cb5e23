use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stock::StockLevel;
use crate::domain::a003_location::LocationId;
use crate::domain::common::AggregateRoot;

// ============================================================================
// ID Type
// ============================================================================

crate::string_id!(
    /// Идентификатор запчасти
    PartId
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartStatus {
    #[default]
    Active,
    Obsolete,
    Discontinued,
}

impl PartStatus {
    pub const ALL: [PartStatus; 3] = [
        PartStatus::Active,
        PartStatus::Obsolete,
        PartStatus::Discontinued,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartStatus::Active => "active",
            PartStatus::Obsolete => "obsolete",
            PartStatus::Discontinued => "discontinued",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PartStatus::Active => "Active",
            PartStatus::Obsolete => "Obsolete",
            PartStatus::Discontinued => "Discontinued",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == code)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Позиция склада запчастей.
///
/// Инвариант: `total_value == quantity_on_hand * unit_cost`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: PartId,
    pub name: String,
    pub part_number: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub model_number: Option<String>,
    pub location_id: LocationId,
    #[serde(default)]
    pub location_name: Option<String>,
    pub quantity_on_hand: u32,
    pub minimum_stock_level: u32,
    pub reorder_point: u32,
    pub unit_cost: f64,
    pub total_value: f64,
    pub status: PartStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Part {
    /// Новая позиция всегда активна; стоимость пересчитывается
    pub fn from_dto(
        id: PartId,
        dto: &PartDto,
        location_name: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut part = Self {
            id,
            name: dto.name.trim().to_string(),
            part_number: dto.part_number.trim().to_string(),
            description: dto.description.trim().to_string(),
            category: dto.category.trim().to_string(),
            manufacturer: dto.manufacturer.trim().to_string(),
            model_number: non_empty(&dto.model_number),
            location_id: LocationId::new(dto.location_id.clone()),
            location_name,
            quantity_on_hand: dto.quantity_on_hand,
            minimum_stock_level: dto.minimum_stock_level,
            reorder_point: dto.reorder_point,
            unit_cost: dto.unit_cost,
            total_value: 0.0,
            status: PartStatus::Active,
            created_at: now,
            updated_at: now,
        };
        part.recalc_total();
        part
    }

    pub fn recalc_total(&mut self) {
        self.total_value = round_cents(self.quantity_on_hand as f64 * self.unit_cost);
    }

    pub fn stock_level(&self) -> StockLevel {
        StockLevel::classify(
            self.quantity_on_hand,
            self.minimum_stock_level,
            self.reorder_point,
        )
    }

    /// Остаток после корректировки, если он помещается в u32
    pub fn stock_after(&self, delta: i64) -> Option<u32> {
        i64::from(self.quantity_on_hand)
            .checked_add(delta)
            .and_then(|next| u32::try_from(next).ok())
    }

    /// Приход (delta > 0) или расход (delta < 0) со склада
    pub fn adjust_stock(&mut self, delta: i64, now: DateTime<Utc>) -> Result<(), String> {
        let Some(next) = self.stock_after(delta) else {
            return Err(if delta < 0 {
                format!(
                    "Cannot remove {} units: only {} on hand",
                    delta.unsigned_abs(),
                    self.quantity_on_hand
                )
            } else {
                format!("Stock cannot exceed {} units", MAX_STOCK_DELTA)
            });
        };
        self.quantity_on_hand = next;
        self.recalc_total();
        self.updated_at = now;
        Ok(())
    }

    pub fn to_dto(&self) -> PartDto {
        PartDto {
            id: Some(self.id.0.clone()),
            name: self.name.clone(),
            part_number: self.part_number.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            manufacturer: self.manufacturer.clone(),
            model_number: self.model_number.clone().unwrap_or_default(),
            location_id: self.location_id.0.clone(),
            quantity_on_hand: self.quantity_on_hand,
            minimum_stock_level: self.minimum_stock_level,
            reorder_point: self.reorder_point,
            unit_cost: self.unit_cost,
            status: self.status,
        }
    }
}

impl AggregateRoot for Part {
    type Id = PartId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "part"
    }

    fn element_name() -> &'static str {
        "Part"
    }

    fn list_name() -> &'static str {
        "Parts Inventory"
    }

    fn api_path() -> &'static str {
        "/parts"
    }
}

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartDto {
    pub id: Option<String>,
    pub name: String,
    pub part_number: String,
    pub description: String,
    pub category: String,
    pub manufacturer: String,
    pub model_number: String,
    pub location_id: String,
    pub quantity_on_hand: u32,
    pub minimum_stock_level: u32,
    pub reorder_point: u32,
    pub unit_cost: f64,
    pub status: PartStatus,
}

impl PartDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Part name is required".into());
        }
        if self.part_number.trim().is_empty() {
            return Err("Part number is required".into());
        }
        if self.location_id.trim().is_empty() {
            return Err("Storage location is required".into());
        }
        if !self.unit_cost.is_finite() || self.unit_cost < 0.0 {
            return Err("Unit cost must be a non-negative number".into());
        }
        if self.reorder_point < self.minimum_stock_level {
            return Err("Reorder point cannot be below the minimum stock level".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<LocationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_on_hand: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_stock_level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reorder_point: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PartStatus>,
}

impl PartPatch {
    pub fn from_dto(dto: &PartDto) -> Self {
        Self {
            name: Some(dto.name.trim().to_string()),
            part_number: Some(dto.part_number.trim().to_string()),
            description: Some(dto.description.clone()),
            category: Some(dto.category.clone()),
            manufacturer: Some(dto.manufacturer.clone()),
            model_number: Some(dto.model_number.clone()),
            location_id: Some(LocationId::new(dto.location_id.clone())),
            location_name: None,
            quantity_on_hand: Some(dto.quantity_on_hand),
            minimum_stock_level: Some(dto.minimum_stock_level),
            reorder_point: Some(dto.reorder_point),
            unit_cost: Some(dto.unit_cost),
            status: Some(dto.status),
        }
    }

    /// Применить патч; total_value пересчитывается всегда
    pub fn apply(&self, target: &mut Part, now: DateTime<Utc>) {
        if let Some(v) = &self.name {
            target.name = v.clone();
        }
        if let Some(v) = &self.part_number {
            target.part_number = v.clone();
        }
        if let Some(v) = &self.description {
            target.description = v.trim().to_string();
        }
        if let Some(v) = &self.category {
            target.category = v.trim().to_string();
        }
        if let Some(v) = &self.manufacturer {
            target.manufacturer = v.trim().to_string();
        }
        if let Some(v) = &self.model_number {
            target.model_number = non_empty(v);
        }
        if let Some(v) = &self.location_id {
            target.location_id = v.clone();
        }
        if let Some(v) = &self.location_name {
            target.location_name = Some(v.clone());
        }
        if let Some(v) = self.quantity_on_hand {
            target.quantity_on_hand = v;
        }
        if let Some(v) = self.minimum_stock_level {
            target.minimum_stock_level = v;
        }
        if let Some(v) = self.reorder_point {
            target.reorder_point = v;
        }
        if let Some(v) = self.unit_cost {
            target.unit_cost = v;
        }
        if let Some(v) = self.status {
            target.status = v;
        }
        target.recalc_total();
        target.updated_at = now;
    }
}

/// Запрос на корректировку остатка (`POST /parts/:id/adjust-stock`)
/// Предел одной корректировки: остаток хранится в u32
pub const MAX_STOCK_DELTA: i64 = u32::MAX as i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustStockRequest {
    pub delta: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
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

    fn valve() -> Part {
        let dto = PartDto {
            name: "Compressor Valve".into(),
            part_number: "CV-2024-X".into(),
            location_id: "1".into(),
            quantity_on_hand: 25,
            minimum_stock_level: 10,
            reorder_point: 15,
            unit_cost: 45.99,
            status: PartStatus::Obsolete,
            ..Default::default()
        };
        Part::from_dto(PartId::new("1"), &dto, Some("Main Warehouse".into()), Utc::now())
    }

    #[test]
    fn test_create_computes_total_and_forces_active() {
        let part = valve();
        assert_eq!(part.total_value, 1149.75);
        assert_eq!(part.status, PartStatus::Active);
    }

    #[test]
    fn test_patch_recomputes_total() {
        let mut part = valve();
        PartPatch {
            quantity_on_hand: Some(4),
            ..Default::default()
        }
        .apply(&mut part, Utc::now());
        assert_eq!(part.total_value, 183.96);

        PartPatch {
            unit_cost: Some(10.0),
            ..Default::default()
        }
        .apply(&mut part, Utc::now());
        assert_eq!(part.total_value, 40.0);
    }

    #[test]
    fn test_adjust_stock() {
        let mut part = valve();
        assert!(part.adjust_stock(-5, Utc::now()).is_ok());
        assert_eq!(part.quantity_on_hand, 20);
        assert_eq!(part.total_value, 919.8);

        assert!(part.adjust_stock(-21, Utc::now()).is_err());
        assert_eq!(part.quantity_on_hand, 20);
    }

    #[test]
    fn test_adjust_stock_extreme_deltas() {
        let mut part = valve();
        assert_eq!(
            part.adjust_stock(i64::MAX, Utc::now()),
            Err(format!("Stock cannot exceed {} units", MAX_STOCK_DELTA))
        );
        assert_eq!(
            part.adjust_stock(i64::MIN, Utc::now()),
            Err("Cannot remove 9223372036854775808 units: only 25 on hand".to_string())
        );
        assert_eq!(part.quantity_on_hand, 25);

        assert_eq!(part.stock_after(MAX_STOCK_DELTA - 25), Some(u32::MAX));
        assert_eq!(part.stock_after(MAX_STOCK_DELTA), None);
        assert!(part.adjust_stock(75, Utc::now()).is_ok());
        assert_eq!(part.quantity_on_hand, 100);
    }

    #[test]
    fn test_validate_reorder_point() {
        let mut dto = valve().to_dto();
        assert!(dto.validate().is_ok());
        dto.reorder_point = 5;
        assert!(dto.validate().is_err());
    }
}
