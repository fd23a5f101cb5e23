use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::AggregateRoot;

// ============================================================================
// ID Type
// ============================================================================

crate::string_id!(
    /// Идентификатор локации (склад, офис, объект, транспорт)
    LocationId
);

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    #[default]
    Warehouse,
    Office,
    JobSite,
    Vehicle,
}

impl LocationType {
    pub const ALL: [LocationType; 4] = [
        LocationType::Warehouse,
        LocationType::Office,
        LocationType::JobSite,
        LocationType::Vehicle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Warehouse => "warehouse",
            LocationType::Office => "office",
            LocationType::JobSite => "job_site",
            LocationType::Vehicle => "vehicle",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LocationType::Warehouse => "Warehouse",
            LocationType::Office => "Office",
            LocationType::JobSite => "Job Site",
            LocationType::Vehicle => "Vehicle",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationStatus {
    #[default]
    Active,
    Inactive,
    Maintenance,
}

impl LocationStatus {
    pub const ALL: [LocationStatus; 3] = [
        LocationStatus::Active,
        LocationStatus::Inactive,
        LocationStatus::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationStatus::Active => "active",
            LocationStatus::Inactive => "inactive",
            LocationStatus::Maintenance => "maintenance",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LocationStatus::Active => "Active",
            LocationStatus::Inactive => "Inactive",
            LocationStatus::Maintenance => "Maintenance",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == code)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    #[serde(rename = "type")]
    pub location_type: LocationType,
    pub status: LocationStatus,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub equipment_count: u32,
    #[serde(default)]
    pub manager: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Location {
    /// Новая локация: счётчик оборудования обнулён, метки времени = now
    pub fn from_dto(id: LocationId, dto: &LocationDto, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: dto.name.trim().to_string(),
            location_type: dto.location_type,
            status: dto.status,
            address: dto.address.trim().to_string(),
            city: dto.city.trim().to_string(),
            state: dto.state.trim().to_string(),
            zip_code: dto.zip_code.trim().to_string(),
            equipment_count: 0,
            manager: non_empty(&dto.manager),
            contact_phone: non_empty(&dto.contact_phone),
            created_at: now,
            updated_at: now,
        }
    }

    /// "123 Market St, San Francisco, CA, 94105" без пустых частей
    pub fn full_address(&self) -> String {
        [&self.address, &self.city, &self.state, &self.zip_code]
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn to_dto(&self) -> LocationDto {
        LocationDto {
            id: Some(self.id.0.clone()),
            name: self.name.clone(),
            location_type: self.location_type,
            status: self.status,
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
            manager: self.manager.clone().unwrap_or_default(),
            contact_phone: self.contact_phone.clone().unwrap_or_default(),
        }
    }
}

impl AggregateRoot for Location {
    type Id = LocationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "location"
    }

    fn element_name() -> &'static str {
        "Location"
    }

    fn list_name() -> &'static str {
        "Locations"
    }

    fn api_path() -> &'static str {
        "/locations"
    }
}

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationDto {
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub location_type: LocationType,
    pub status: LocationStatus,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub manager: String,
    pub contact_phone: String,
}

impl LocationDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Location name is required".into());
        }
        if self.city.trim().is_empty() {
            return Err("City is required".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub location_type: Option<LocationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LocationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

impl LocationPatch {
    pub fn from_dto(dto: &LocationDto) -> Self {
        Self {
            name: Some(dto.name.trim().to_string()),
            location_type: Some(dto.location_type),
            status: Some(dto.status),
            address: Some(dto.address.clone()),
            city: Some(dto.city.clone()),
            state: Some(dto.state.clone()),
            zip_code: Some(dto.zip_code.clone()),
            manager: Some(dto.manager.clone()),
            contact_phone: Some(dto.contact_phone.clone()),
        }
    }

    /// Применить патч и обновить `updated_at`
    pub fn apply(&self, target: &mut Location, now: DateTime<Utc>) {
        if let Some(v) = &self.name {
            target.name = v.clone();
        }
        if let Some(v) = self.location_type {
            target.location_type = v;
        }
        if let Some(v) = self.status {
            target.status = v;
        }
        if let Some(v) = &self.address {
            target.address = v.trim().to_string();
        }
        if let Some(v) = &self.city {
            target.city = v.trim().to_string();
        }
        if let Some(v) = &self.state {
            target.state = v.trim().to_string();
        }
        if let Some(v) = &self.zip_code {
            target.zip_code = v.trim().to_string();
        }
        if let Some(v) = &self.manager {
            target.manager = non_empty(v);
        }
        if let Some(v) = &self.contact_phone {
            target.contact_phone = non_empty(v);
        }
        target.updated_at = now;
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
    use chrono::Duration;

    fn dto() -> LocationDto {
        LocationDto {
            name: "Main Warehouse".into(),
            address: "123 Market St".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            zip_code: "94105".into(),
            manager: "John Doe".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_location_starts_empty() {
        let now = Utc::now();
        let loc = Location::from_dto(LocationId::new("1"), &dto(), now);
        assert_eq!(loc.equipment_count, 0);
        assert_eq!(loc.created_at, now);
        assert_eq!(loc.updated_at, now);
        assert_eq!(loc.contact_phone, None);
    }

    #[test]
    fn test_full_address_skips_blank_parts() {
        let mut loc = Location::from_dto(LocationId::new("1"), &dto(), Utc::now());
        assert_eq!(loc.full_address(), "123 Market St, San Francisco, CA, 94105");
        loc.state = " ".into();
        assert_eq!(loc.full_address(), "123 Market St, San Francisco, 94105");
    }

    #[test]
    fn test_patch_touches_updated_at() {
        let created = Utc::now() - Duration::days(1);
        let mut loc = Location::from_dto(LocationId::new("1"), &dto(), created);
        let later = Utc::now();
        LocationPatch {
            status: Some(LocationStatus::Maintenance),
            manager: Some(String::new()),
            ..Default::default()
        }
        .apply(&mut loc, later);
        assert_eq!(loc.status, LocationStatus::Maintenance);
        assert_eq!(loc.manager, None);
        assert_eq!(loc.created_at, created);
        assert_eq!(loc.updated_at, later);
    }

    #[test]
    fn test_type_serialized_as_type_field() {
        let loc = Location::from_dto(LocationId::new("1"), &dto(), Utc::now());
        let json = serde_json::to_value(&loc).unwrap();
        assert_eq!(json["type"], "warehouse");
    }
}
