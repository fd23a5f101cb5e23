//! Клиентская фильтрация списка оборудования.
//!
//! Пустое значение любого критерия означает "все".

use serde::{Deserialize, Serialize};

use super::aggregate::Equipment;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentFilter {
    /// Подстрока в названии или серийном номере (без учёта регистра)
    pub search: String,
    pub category_id: String,
    pub location_id: String,
    /// Код статуса (`EquipmentStatus::as_str`)
    pub status: String,
}

impl EquipmentFilter {
    pub fn matches(&self, item: &Equipment) -> bool {
        let query = self.search.trim().to_lowercase();
        if !query.is_empty()
            && !item.name.to_lowercase().contains(&query)
            && !item.serial_number.to_lowercase().contains(&query)
        {
            return false;
        }
        if !self.category_id.is_empty() && item.category_id.as_str() != self.category_id {
            return false;
        }
        if !self.location_id.is_empty() && item.location_id.as_str() != self.location_id {
            return false;
        }
        if !self.status.is_empty() && item.status.as_str() != self.status {
            return false;
        }
        true
    }

    /// Отфильтровать с сохранением исходного порядка
    pub fn apply(&self, items: &[Equipment]) -> Vec<Equipment> {
        items.iter().filter(|e| self.matches(e)).cloned().collect()
    }

    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty()
            || !self.category_id.is_empty()
            || !self.location_id.is_empty()
            || !self.status.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_equipment::{EquipmentDto, EquipmentId, EquipmentStatus};
    use chrono::Utc;

    fn item(id: &str, name: &str, serial: &str, cat: &str, loc: &str, status: EquipmentStatus) -> Equipment {
        let dto = EquipmentDto {
            name: name.into(),
            serial_number: serial.into(),
            category_id: cat.into(),
            location_id: loc.into(),
            status,
            ..Default::default()
        };
        Equipment::from_dto(EquipmentId::new(id), &dto, String::new(), String::new(), Utc::now())
    }

    fn fleet() -> Vec<Equipment> {
        vec![
            item("1", "Industrial HVAC Unit", "HVAC-2023-001", "1", "1", EquipmentStatus::Operational),
            item("2", "Conveyor Belt Motor", "MTR-500-X", "4", "2", EquipmentStatus::Maintenance),
            item("3", "Main Switchboard", "ELEC-MAIN-01", "2", "1", EquipmentStatus::Operational),
            item("4", "Delivery Truck", "VIN-987654321", "5", "4", EquipmentStatus::Down),
        ]
    }

    fn ids(items: &[Equipment]) -> Vec<&str> {
        items.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_returns_all() {
        let filter = EquipmentFilter::default();
        assert!(!filter.is_active());
        assert_eq!(filter.apply(&fleet()).len(), 4);
    }

    #[test]
    fn test_search_by_name_or_serial_case_insensitive() {
        let list = fleet();
        let mut filter = EquipmentFilter {
            search: "hvac".into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&list)), vec!["1"]);

        filter.search = "mtr-500".into();
        assert_eq!(ids(&filter.apply(&list)), vec!["2"]);
    }

    #[test]
    fn test_criteria_combine() {
        let list = fleet();
        let filter = EquipmentFilter {
            location_id: "1".into(),
            status: "operational".into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&list)), vec!["1", "3"]);

        let filter = EquipmentFilter {
            location_id: "1".into(),
            category_id: "2".into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&list)), vec!["3"]);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut filter = EquipmentFilter {
            search: "x".into(),
            status: "down".into(),
            ..Default::default()
        };
        assert!(filter.is_active());
        filter.clear();
        assert_eq!(filter, EquipmentFilter::default());
    }
}
