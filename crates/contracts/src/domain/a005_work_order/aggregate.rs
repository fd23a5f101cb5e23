use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::a001_equipment::EquipmentId;
use crate::domain::common::{AggregateRoot, Priority};

// ============================================================================
// ID Type
// ============================================================================

crate::string_id!(
    /// Номер заказ-наряда вида `WO-1001`
    WorkOrderId
);

const ID_PREFIX: &str = "WO-";
const FIRST_NUMBER: u64 = 1001;

/// Следующий номер в последовательности `WO-<n>`.
///
/// Номера, не подходящие под шаблон, игнорируются.
pub fn next_work_order_id(existing: &[WorkOrder]) -> WorkOrderId {
    let next = existing
        .iter()
        .filter_map(|wo| wo.id.as_str().strip_prefix(ID_PREFIX))
        .filter_map(|n| n.parse::<u64>().ok())
        .max()
        .map(|max| max + 1)
        .unwrap_or(FIRST_NUMBER);
    WorkOrderId(format!("{}{}", ID_PREFIX, next))
}

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkOrderStatus {
    #[default]
    Pending,
    InProgress,
    InReview,
    Completed,
    OnHold,
    Cancelled,
}

impl WorkOrderStatus {
    pub const ALL: [WorkOrderStatus; 6] = [
        WorkOrderStatus::Pending,
        WorkOrderStatus::InProgress,
        WorkOrderStatus::InReview,
        WorkOrderStatus::Completed,
        WorkOrderStatus::OnHold,
        WorkOrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkOrderStatus::Pending => "pending",
            WorkOrderStatus::InProgress => "in-progress",
            WorkOrderStatus::InReview => "in-review",
            WorkOrderStatus::Completed => "completed",
            WorkOrderStatus::OnHold => "on-hold",
            WorkOrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkOrderStatus::Pending => "Pending",
            WorkOrderStatus::InProgress => "In Progress",
            WorkOrderStatus::InReview => "In Review",
            WorkOrderStatus::Completed => "Completed",
            WorkOrderStatus::OnHold => "On Hold",
            WorkOrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == code)
    }

    /// Закрытый наряд не может быть просрочен
    pub fn is_closed(&self) -> bool {
        matches!(self, WorkOrderStatus::Completed | WorkOrderStatus::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderType {
    #[default]
    Maintenance,
    Repair,
    Installation,
    Inspection,
}

impl WorkOrderType {
    pub const ALL: [WorkOrderType; 4] = [
        WorkOrderType::Maintenance,
        WorkOrderType::Repair,
        WorkOrderType::Installation,
        WorkOrderType::Inspection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkOrderType::Maintenance => "maintenance",
            WorkOrderType::Repair => "repair",
            WorkOrderType::Installation => "installation",
            WorkOrderType::Inspection => "inspection",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkOrderType::Maintenance => "Maintenance",
            WorkOrderType::Repair => "Repair",
            WorkOrderType::Installation => "Installation",
            WorkOrderType::Inspection => "Inspection",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == code)
    }
}

// ============================================================================
// Nested entities
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Assignee {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: None,
        }
    }

    /// Инициалы для аватара-заглушки: "Alex Johnson" -> "AJ"
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrderTask {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrderComment {
    pub id: String,
    pub author: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

pub const SYSTEM_AUTHOR: &str = "System";

// ============================================================================
// Aggregate Root
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: WorkOrderId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: WorkOrderStatus,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub work_order_type: WorkOrderType,
    #[serde(default)]
    pub assignee: Option<Assignee>,
    #[serde(default)]
    pub equipment_id: Option<EquipmentId>,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tasks: Vec<WorkOrderTask>,
    #[serde(default)]
    pub comments: Vec<WorkOrderComment>,
}

impl WorkOrder {
    /// Новый наряд: статус pending и системный комментарий о создании
    pub fn from_dto(
        id: WorkOrderId,
        dto: &WorkOrderDto,
        now: DateTime<Utc>,
    ) -> Result<Self, String> {
        let due_date = dto.parse_due_date()?;
        let mut order = Self {
            id,
            title: dto.title.trim().to_string(),
            description: dto.description.trim().to_string(),
            status: WorkOrderStatus::Pending,
            priority: dto.priority,
            work_order_type: dto.work_order_type,
            assignee: dto.assignee(),
            equipment_id: non_empty(&dto.equipment_id).map(EquipmentId),
            due_date,
            created_at: now,
            tasks: Vec::new(),
            comments: Vec::new(),
        };
        order.add_comment(SYSTEM_AUTHOR, "Work order created", now);
        Ok(order)
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date < now && !self.status.is_closed()
    }

    /// (выполнено, всего)
    pub fn task_progress(&self) -> (usize, usize) {
        let done = self.tasks.iter().filter(|t| t.completed).count();
        (done, self.tasks.len())
    }

    pub fn assignee_name(&self) -> Option<&str> {
        self.assignee.as_ref().map(|a| a.name.as_str())
    }

    /// Переключить отметку задачи; false если задачи нет
    pub fn toggle_task(&mut self, task_id: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    pub fn add_task(&mut self, text: &str) -> Result<(), String> {
        let text = text.trim();
        if text.is_empty() {
            return Err("Task text is required".into());
        }
        let id = format!("t{}", next_seq(self.tasks.iter().map(|t| t.id.as_str()), 't'));
        self.tasks.push(WorkOrderTask {
            id,
            text: text.to_string(),
            completed: false,
        });
        Ok(())
    }

    pub fn add_comment(&mut self, author: &str, message: &str, now: DateTime<Utc>) {
        let id = format!("c{}", next_seq(self.comments.iter().map(|c| c.id.as_str()), 'c'));
        self.comments.push(WorkOrderComment {
            id,
            author: author.to_string(),
            message: message.trim().to_string(),
            created_at: now,
        });
    }

    pub fn to_dto(&self) -> WorkOrderDto {
        WorkOrderDto {
            id: Some(self.id.0.clone()),
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            work_order_type: self.work_order_type,
            assignee_name: self.assignee_name().unwrap_or_default().to_string(),
            equipment_id: self
                .equipment_id
                .as_ref()
                .map(|id| id.0.clone())
                .unwrap_or_default(),
            due_date: self.due_date.format("%Y-%m-%dT%H:%M").to_string(),
        }
    }
}

impl AggregateRoot for WorkOrder {
    type Id = WorkOrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "work_order"
    }

    fn element_name() -> &'static str {
        "Work Order"
    }

    fn list_name() -> &'static str {
        "Work Orders"
    }

    fn api_path() -> &'static str {
        "/workorders"
    }
}

// ============================================================================
// DTOs
// ============================================================================

/// Модель формы создания наряда
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkOrderDto {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub work_order_type: WorkOrderType,
    pub assignee_name: String,
    pub equipment_id: String,
    /// `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM` или RFC 3339
    pub due_date: String,
}

impl WorkOrderDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title is required".into());
        }
        if self.due_date.trim().is_empty() {
            return Err("Due date is required".into());
        }
        self.parse_due_date().map(|_| ())
    }

    pub fn parse_due_date(&self) -> Result<DateTime<Utc>, String> {
        let raw = self.due_date.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
            return Ok(naive.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
            .ok_or_else(|| format!("Invalid due date: {}", raw))
    }

    pub fn assignee(&self) -> Option<Assignee> {
        non_empty(&self.assignee_name).map(Assignee::named)
    }
}

/// Частичное обновление наряда.
///
/// `assignee: Some(None)` снимает исполнителя.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkOrderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkOrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub work_order_type: Option<WorkOrderType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Option<Assignee>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_id: Option<EquipmentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<WorkOrderTask>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<WorkOrderComment>>,
}

impl WorkOrderPatch {
    pub fn status(status: WorkOrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn tasks(tasks: Vec<WorkOrderTask>) -> Self {
        Self {
            tasks: Some(tasks),
            ..Default::default()
        }
    }

    pub fn comments(comments: Vec<WorkOrderComment>) -> Self {
        Self {
            comments: Some(comments),
            ..Default::default()
        }
    }

    pub fn from_dto(dto: &WorkOrderDto) -> Result<Self, String> {
        Ok(Self {
            title: Some(dto.title.trim().to_string()),
            description: Some(dto.description.trim().to_string()),
            priority: Some(dto.priority),
            work_order_type: Some(dto.work_order_type),
            assignee: Some(dto.assignee()),
            equipment_id: non_empty(&dto.equipment_id).map(EquipmentId),
            due_date: Some(dto.parse_due_date()?),
            ..Default::default()
        })
    }

    pub fn apply(&self, target: &mut WorkOrder) {
        if let Some(v) = &self.title {
            target.title = v.clone();
        }
        if let Some(v) = &self.description {
            target.description = v.clone();
        }
        if let Some(v) = self.status {
            target.status = v;
        }
        if let Some(v) = self.priority {
            target.priority = v;
        }
        if let Some(v) = self.work_order_type {
            target.work_order_type = v;
        }
        if let Some(v) = &self.assignee {
            target.assignee = v.clone();
        }
        if let Some(v) = &self.equipment_id {
            target.equipment_id = Some(v.clone());
        }
        if let Some(v) = self.due_date {
            target.due_date = v;
        }
        if let Some(v) = &self.tasks {
            target.tasks = v.clone();
        }
        if let Some(v) = &self.comments {
            target.comments = v.clone();
        }
    }
}

/// Заявка оператора о неисправности (`POST /equipment/:id/report-issue`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportIssueRequest {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub reporter: String,
}

impl ReportIssueRequest {
    /// Срок устранения от момента заявки
    pub const RESPONSE_DAYS: i64 = 2;

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Describe the issue in the title".into());
        }
        Ok(())
    }

    /// Форма наряда на ремонт для указанного оборудования
    pub fn to_work_order_dto(&self, equipment_id: &str, now: DateTime<Utc>) -> WorkOrderDto {
        let mut description = self.description.trim().to_string();
        if !self.reporter.trim().is_empty() {
            if !description.is_empty() {
                description.push_str("\n\n");
            }
            description.push_str(&format!("Reported by {}", self.reporter.trim()));
        }
        WorkOrderDto {
            id: None,
            title: self.title.trim().to_string(),
            description,
            priority: self.priority,
            work_order_type: WorkOrderType::Repair,
            assignee_name: String::new(),
            equipment_id: equipment_id.to_string(),
            due_date: (now + chrono::Duration::days(Self::RESPONSE_DAYS)).to_rfc3339(),
        }
    }
}

fn next_seq<'a>(ids: impl Iterator<Item = &'a str>, prefix: char) -> u64 {
    ids.filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|n| n.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
        + 1
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

    fn dto() -> WorkOrderDto {
        WorkOrderDto {
            title: "HVAC System Maintenance".into(),
            description: "Quarterly check".into(),
            priority: Priority::High,
            assignee_name: "Alex Johnson".into(),
            due_date: "2025-01-15T09:00".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_next_id_continues_sequence() {
        let now = Utc::now();
        assert_eq!(next_work_order_id(&[]).as_str(), "WO-1001");

        let a = WorkOrder::from_dto(WorkOrderId::new("WO-1006"), &dto(), now).unwrap();
        let b = WorkOrder::from_dto(WorkOrderId::new("legacy"), &dto(), now).unwrap();
        assert_eq!(next_work_order_id(&[a, b]).as_str(), "WO-1007");
    }

    #[test]
    fn test_create_starts_pending_with_system_comment() {
        let now = Utc::now();
        let wo = WorkOrder::from_dto(WorkOrderId::new("WO-1"), &dto(), now).unwrap();
        assert_eq!(wo.status, WorkOrderStatus::Pending);
        assert_eq!(wo.assignee_name(), Some("Alex Johnson"));
        assert_eq!(wo.comments.len(), 1);
        assert_eq!(wo.comments[0].author, SYSTEM_AUTHOR);
        assert_eq!(wo.comments[0].message, "Work order created");
        assert_eq!(wo.due_date.to_rfc3339(), "2025-01-15T09:00:00+00:00");
    }

    #[test]
    fn test_due_date_formats() {
        let mut d = dto();
        d.due_date = "2025-01-20".into();
        assert!(d.validate().is_ok());
        d.due_date = "2025-01-20T17:00:00Z".into();
        assert!(d.validate().is_ok());
        d.due_date = "20.01.2025".into();
        assert!(d.validate().is_err());
        d.due_date = String::new();
        assert_eq!(d.validate(), Err("Due date is required".to_string()));
    }

    #[test]
    fn test_overdue_ignores_closed_orders() {
        let now = Utc::now();
        let mut wo = WorkOrder::from_dto(WorkOrderId::new("WO-1"), &dto(), now).unwrap();
        wo.due_date = now - Duration::hours(1);
        assert!(wo.is_overdue(now));
        wo.status = WorkOrderStatus::Completed;
        assert!(!wo.is_overdue(now));
        wo.status = WorkOrderStatus::InReview;
        wo.due_date = now + Duration::hours(1);
        assert!(!wo.is_overdue(now));
    }

    #[test]
    fn test_tasks_and_comments() {
        let now = Utc::now();
        let mut wo = WorkOrder::from_dto(WorkOrderId::new("WO-1"), &dto(), now).unwrap();
        assert_eq!(wo.task_progress(), (0, 0));
        wo.add_task("Inspect filters").unwrap();
        wo.add_task("Clean coils").unwrap();
        assert!(wo.add_task("  ").is_err());
        assert!(wo.toggle_task("t1"));
        assert!(!wo.toggle_task("t9"));
        assert_eq!(wo.task_progress(), (1, 2));

        wo.add_comment("Alex Johnson", " On it ", now);
        assert_eq!(wo.comments[1].id, "c2");
        assert_eq!(wo.comments[1].message, "On it");
    }

    #[test]
    fn test_patch_can_unassign() {
        let now = Utc::now();
        let mut wo = WorkOrder::from_dto(WorkOrderId::new("WO-1"), &dto(), now).unwrap();
        WorkOrderPatch {
            assignee: Some(None),
            ..Default::default()
        }
        .apply(&mut wo);
        assert_eq!(wo.assignee, None);

        WorkOrderPatch::status(WorkOrderStatus::InProgress).apply(&mut wo);
        assert_eq!(wo.status, WorkOrderStatus::InProgress);
        assert_eq!(wo.title, "HVAC System Maintenance");
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&WorkOrderStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        assert_eq!(
            WorkOrderStatus::from_code("on-hold"),
            Some(WorkOrderStatus::OnHold)
        );
        assert_eq!(Assignee::named("sarah connor").initials(), "SC");
    }

    #[test]
    fn test_report_issue_becomes_pending_repair() {
        let now = Utc::now();
        let req = ReportIssueRequest {
            title: "Strange noise".into(),
            description: "Grinding sound from the motor".into(),
            priority: Priority::High,
            reporter: "Omar Haddad".into(),
        };
        assert!(req.validate().is_ok());
        let dto = req.to_work_order_dto("2", now);
        assert_eq!(dto.work_order_type, WorkOrderType::Repair);
        assert!(dto.description.ends_with("Reported by Omar Haddad"));

        let wo = WorkOrder::from_dto(WorkOrderId::new("WO-1007"), &dto, now).unwrap();
        assert_eq!(wo.status, WorkOrderStatus::Pending);
        assert_eq!(wo.equipment_id.as_ref().map(|e| e.as_str()), Some("2"));
        assert!(wo.due_date > now);
        assert!(ReportIssueRequest::default().validate().is_err());
    }
}
