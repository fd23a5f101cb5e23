use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::a001_equipment::EquipmentId;
use crate::domain::a005_work_order::{
    WorkOrder, WorkOrderId, WorkOrderStatus, WorkOrderType, SYSTEM_AUTHOR,
};
use crate::domain::common::{AggregateRoot, Priority};

// ============================================================================
// ID Type
// ============================================================================

crate::string_id!(
    /// Идентификатор графика ТО
    MaintenanceScheduleId
);

pub const UNKNOWN_EQUIPMENT: &str = "Unknown Equipment";

/// Срок первого обслуживания для нового графика
const FIRST_DUE_DAYS: i64 = 30;

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleType {
    #[default]
    Preventive,
    Predictive,
    ConditionBased,
}

impl ScheduleType {
    pub const ALL: [ScheduleType; 3] = [
        ScheduleType::Preventive,
        ScheduleType::Predictive,
        ScheduleType::ConditionBased,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleType::Preventive => "preventive",
            ScheduleType::Predictive => "predictive",
            ScheduleType::ConditionBased => "condition_based",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScheduleType::Preventive => "Preventive",
            ScheduleType::Predictive => "Predictive",
            ScheduleType::ConditionBased => "Condition Based",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == code)
    }

    /// Тип наряда, который порождает график
    pub fn work_order_type(&self) -> WorkOrderType {
        match self {
            ScheduleType::Preventive => WorkOrderType::Maintenance,
            ScheduleType::Predictive | ScheduleType::ConditionBased => WorkOrderType::Inspection,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyType {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl FrequencyType {
    pub const ALL: [FrequencyType; 4] = [
        FrequencyType::Daily,
        FrequencyType::Weekly,
        FrequencyType::Monthly,
        FrequencyType::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FrequencyType::Daily => "daily",
            FrequencyType::Weekly => "weekly",
            FrequencyType::Monthly => "monthly",
            FrequencyType::Yearly => "yearly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FrequencyType::Daily => "Daily",
            FrequencyType::Weekly => "Weekly",
            FrequencyType::Monthly => "Monthly",
            FrequencyType::Yearly => "Yearly",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == code)
    }

    fn unit(&self) -> &'static str {
        match self {
            FrequencyType::Daily => "day",
            FrequencyType::Weekly => "week",
            FrequencyType::Monthly => "month",
            FrequencyType::Yearly => "year",
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceSchedule {
    pub id: MaintenanceScheduleId,
    pub equipment_id: EquipmentId,
    pub equipment_name: String,
    #[serde(rename = "type")]
    pub schedule_type: ScheduleType,
    pub frequency_type: FrequencyType,
    pub frequency_value: u32,
    #[serde(default)]
    pub last_performed: Option<DateTime<Utc>>,
    pub next_due: DateTime<Utc>,
    pub priority: Priority,
    pub is_active: bool,
}

impl MaintenanceSchedule {
    /// Новый график активен, первое обслуживание через 30 дней
    pub fn from_dto(
        id: MaintenanceScheduleId,
        dto: &ScheduleDto,
        equipment_name: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            equipment_id: EquipmentId::new(dto.equipment_id.trim()),
            equipment_name: equipment_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_EQUIPMENT.to_string()),
            schedule_type: dto.schedule_type,
            frequency_type: dto.frequency_type,
            frequency_value: dto.frequency_value.max(1),
            last_performed: None,
            next_due: now + Duration::days(FIRST_DUE_DAYS),
            priority: dto.priority,
            is_active: true,
        }
    }

    /// "Every month", "Every 3 months"
    pub fn frequency_label(&self) -> String {
        let unit = self.frequency_type.unit();
        match self.frequency_value {
            0 | 1 => format!("Every {}", unit),
            n => format!("Every {} {}s", n, unit),
        }
    }

    /// Черновик наряда по графику: pending, приоритет и срок из графика
    pub fn to_work_order(&self, id: WorkOrderId, now: DateTime<Utc>) -> WorkOrder {
        let mut order = WorkOrder {
            id,
            title: format!(
                "{} maintenance: {}",
                self.schedule_type.label(),
                self.equipment_name
            ),
            description: format!(
                "Generated from maintenance schedule {} ({})",
                self.id,
                self.frequency_label().to_lowercase()
            ),
            status: WorkOrderStatus::Pending,
            priority: self.priority,
            work_order_type: self.schedule_type.work_order_type(),
            assignee: None,
            equipment_id: Some(self.equipment_id.clone()),
            due_date: self.next_due,
            created_at: now,
            tasks: Vec::new(),
            comments: Vec::new(),
        };
        order.add_comment(SYSTEM_AUTHOR, "Work order created", now);
        order
    }

    pub fn to_dto(&self) -> ScheduleDto {
        ScheduleDto {
            id: Some(self.id.0.clone()),
            equipment_id: self.equipment_id.0.clone(),
            schedule_type: self.schedule_type,
            frequency_type: self.frequency_type,
            frequency_value: self.frequency_value,
            priority: self.priority,
        }
    }
}

impl AggregateRoot for MaintenanceSchedule {
    type Id = MaintenanceScheduleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "maintenance_schedule"
    }

    fn element_name() -> &'static str {
        "Maintenance Schedule"
    }

    fn list_name() -> &'static str {
        "Maintenance Schedules"
    }

    fn api_path() -> &'static str {
        "/schedules"
    }
}

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDto {
    pub id: Option<String>,
    pub equipment_id: String,
    #[serde(rename = "type")]
    pub schedule_type: ScheduleType,
    pub frequency_type: FrequencyType,
    pub frequency_value: u32,
    pub priority: Priority,
}

impl Default for ScheduleDto {
    fn default() -> Self {
        Self {
            id: None,
            equipment_id: String::new(),
            schedule_type: ScheduleType::default(),
            frequency_type: FrequencyType::default(),
            frequency_value: 1,
            priority: Priority::default(),
        }
    }
}

impl ScheduleDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.equipment_id.trim().is_empty() {
            return Err("Equipment is required".into());
        }
        if self.frequency_value == 0 {
            return Err("Frequency must be at least 1".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchedulePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_id: Option<EquipmentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schedule_type: Option<ScheduleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_type: Option<FrequencyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_value: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_performed: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_due: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl SchedulePatch {
    pub fn from_dto(dto: &ScheduleDto) -> Self {
        Self {
            equipment_id: Some(EquipmentId::new(dto.equipment_id.trim())),
            schedule_type: Some(dto.schedule_type),
            frequency_type: Some(dto.frequency_type),
            frequency_value: Some(dto.frequency_value),
            priority: Some(dto.priority),
            ..Default::default()
        }
    }

    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Default::default()
        }
    }

    pub fn apply(&self, target: &mut MaintenanceSchedule) {
        if let Some(v) = &self.equipment_id {
            target.equipment_id = v.clone();
        }
        if let Some(v) = &self.equipment_name {
            target.equipment_name = v.clone();
        }
        if let Some(v) = self.schedule_type {
            target.schedule_type = v;
        }
        if let Some(v) = self.frequency_type {
            target.frequency_type = v;
        }
        if let Some(v) = self.frequency_value {
            target.frequency_value = v.max(1);
        }
        if let Some(v) = self.last_performed {
            target.last_performed = Some(v);
        }
        if let Some(v) = self.next_due {
            target.next_due = v;
        }
        if let Some(v) = self.priority {
            target.priority = v;
        }
        if let Some(v) = self.is_active {
            target.is_active = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(value: u32, freq: FrequencyType) -> MaintenanceSchedule {
        let dto = ScheduleDto {
            equipment_id: "1".into(),
            frequency_type: freq,
            frequency_value: value,
            priority: Priority::High,
            ..Default::default()
        };
        MaintenanceSchedule::from_dto(
            MaintenanceScheduleId::new("1"),
            &dto,
            Some("Industrial HVAC Unit".into()),
            Utc::now(),
        )
    }

    #[test]
    fn test_create_defaults() {
        let now = Utc::now();
        let dto = ScheduleDto {
            equipment_id: "42".into(),
            ..Default::default()
        };
        let s = MaintenanceSchedule::from_dto(MaintenanceScheduleId::new("5"), &dto, None, now);
        assert!(s.is_active);
        assert_eq!(s.equipment_name, UNKNOWN_EQUIPMENT);
        assert_eq!(s.next_due, now + Duration::days(30));
        assert_eq!(s.last_performed, None);
    }

    #[test]
    fn test_frequency_label() {
        assert_eq!(schedule(3, FrequencyType::Monthly).frequency_label(), "Every 3 months");
        assert_eq!(schedule(1, FrequencyType::Yearly).frequency_label(), "Every year");
        assert_eq!(schedule(2, FrequencyType::Weekly).frequency_label(), "Every 2 weeks");
    }

    #[test]
    fn test_work_order_type_mapping() {
        assert_eq!(ScheduleType::Preventive.work_order_type(), WorkOrderType::Maintenance);
        assert_eq!(ScheduleType::Predictive.work_order_type(), WorkOrderType::Inspection);
        assert_eq!(
            ScheduleType::ConditionBased.work_order_type(),
            WorkOrderType::Inspection
        );
    }

    #[test]
    fn test_generated_work_order() {
        let s = schedule(3, FrequencyType::Monthly);
        let now = Utc::now();
        let wo = s.to_work_order(WorkOrderId::new("WO-1007"), now);
        assert_eq!(wo.status, WorkOrderStatus::Pending);
        assert_eq!(wo.priority, Priority::High);
        assert_eq!(wo.due_date, s.next_due);
        assert_eq!(wo.equipment_id, Some(EquipmentId::new("1")));
        assert_eq!(wo.work_order_type, WorkOrderType::Maintenance);
        assert_eq!(wo.title, "Preventive maintenance: Industrial HVAC Unit");
        assert_eq!(wo.comments.len(), 1);
    }

    #[test]
    fn test_validate_and_patch() {
        let mut dto = ScheduleDto::default();
        assert!(dto.validate().is_err());
        dto.equipment_id = "1".into();
        assert!(dto.validate().is_ok());
        dto.frequency_value = 0;
        assert!(dto.validate().is_err());

        let mut s = schedule(3, FrequencyType::Monthly);
        SchedulePatch::active(false).apply(&mut s);
        assert!(!s.is_active);
        assert_eq!(s.frequency_value, 3);
    }
}
