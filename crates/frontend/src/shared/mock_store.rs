//! In-memory хранилище mock-режима.
//!
//! Одна база на процесс (thread-local), заполняется при первом обращении.
//! Каждый вызов сначала выдерживает задержку из конфигурации.

use std::cell::RefCell;

use chrono::Utc;
use contracts::domain::a001_equipment::Equipment;
use contracts::domain::a002_equipment_category::EquipmentCategory;
use contracts::domain::a003_location::Location;
use contracts::domain::a004_part::Part;
use contracts::domain::a005_work_order::WorkOrder;
use contracts::domain::a006_maintenance_schedule::MaintenanceSchedule;
use contracts::domain::a007_team::Team;
use contracts::domain::a008_organization::Organization;
use contracts::system::audit::{AuditAction, AuditLog, AuditLogId};
use contracts::system::users::User;
use gloo_timers::future::TimeoutFuture;

use super::api_client::ApiError;
use super::config::{config, MockOp};
use super::mock_seed;

/// Строка таблицы с текстовым идентификатором
pub trait MockRow: Clone {
    fn row_id(&self) -> &str;
}

macro_rules! mock_row {
    ($($ty:ty),* $(,)?) => {
        $(impl MockRow for $ty {
            fn row_id(&self) -> &str {
                self.id.as_str()
            }
        })*
    };
}

mock_row!(
    Equipment,
    EquipmentCategory,
    Location,
    Part,
    WorkOrder,
    MaintenanceSchedule,
    User,
    Team,
    Organization,
    AuditLog,
);

#[derive(Debug, Clone, Default)]
pub struct MockTable<T> {
    rows: Vec<T>,
}

impl<T: MockRow> MockTable<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows }
    }

    pub fn list(&self) -> Vec<T> {
        self.rows.clone()
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: &str) -> Result<T, ApiError> {
        self.rows
            .iter()
            .find(|r| r.row_id() == id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.rows.iter().find(|r| r.row_id() == id)
    }

    pub fn insert(&mut self, row: T) -> T {
        self.rows.push(row.clone());
        row
    }

    /// Изменить строку на месте; ошибка замыкания отклоняет изменение целиком
    pub fn update_with<F>(&mut self, id: &str, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut T) -> Result<(), String>,
    {
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.row_id() == id)
            .ok_or(ApiError::NotFound)?;
        let mut draft = row.clone();
        f(&mut draft).map_err(ApiError::Mock)?;
        *row = draft.clone();
        Ok(draft)
    }

    pub fn remove(&mut self, id: &str) -> Result<(), ApiError> {
        let before = self.rows.len();
        self.rows.retain(|r| r.row_id() != id);
        if self.rows.len() == before {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }

    /// Следующий числовой id (максимум + 1); нечисловые id не учитываются
    pub fn next_id(&self) -> String {
        let max = self
            .rows
            .iter()
            .filter_map(|r| r.row_id().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        (max + 1).to_string()
    }
}

pub struct MockDb {
    pub equipment: MockTable<Equipment>,
    pub categories: MockTable<EquipmentCategory>,
    pub locations: MockTable<Location>,
    pub parts: MockTable<Part>,
    pub work_orders: MockTable<WorkOrder>,
    pub schedules: MockTable<MaintenanceSchedule>,
    pub users: MockTable<User>,
    pub teams: MockTable<Team>,
    pub organizations: MockTable<Organization>,
    pub audit_logs: MockTable<AuditLog>,
}

impl MockDb {
    /// Записать событие в журнал аудита
    pub fn audit(
        &mut self,
        actor: Option<&User>,
        action: AuditAction,
        resource_type: &str,
        resource_id: Option<&str>,
        details: impl Into<String>,
    ) {
        let id = AuditLogId::new(self.audit_logs.next_id());
        let entry = AuditLog::new(id, actor, action, resource_type, resource_id, details, Utc::now());
        log::debug!("🧪 audit {}", entry.title());
        self.audit_logs.insert(entry);
    }
}

thread_local! {
    static DB: RefCell<MockDb> = RefCell::new(mock_seed::seed(Utc::now()));
}

pub fn with_db<R>(f: impl FnOnce(&mut MockDb) -> R) -> R {
    DB.with(|db| f(&mut db.borrow_mut()))
}

/// Выдержать задержку операции
pub async fn simulate(op: MockOp) {
    let ms = config().mock.latency.for_op(op);
    log::debug!("🧪 mock {:?}: {} ms", op, ms);
    TimeoutFuture::new(ms).await;
}

/// Задержка, затем операция над базой
pub async fn call<R>(
    op: MockOp,
    f: impl FnOnce(&mut MockDb) -> Result<R, ApiError>,
) -> Result<R, ApiError> {
    simulate(op).await;
    with_db(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_equipment_category::EquipmentCategoryId;

    fn category(id: &str, name: &str) -> EquipmentCategory {
        EquipmentCategory {
            id: EquipmentCategoryId::new(id),
            name: name.into(),
            description: None,
        }
    }

    fn table() -> MockTable<EquipmentCategory> {
        MockTable::new(vec![category("1", "HVAC"), category("2", "Fleet")])
    }

    #[test]
    fn test_get_and_missing_id() {
        let t = table();
        assert_eq!(t.get("2").unwrap().name, "Fleet");
        assert_eq!(t.get("9"), Err(ApiError::NotFound));
    }

    #[test]
    fn test_update_with_is_atomic() {
        let mut t = table();
        let updated = t
            .update_with("1", |c| {
                c.name = "Climate".into();
                Ok(())
            })
            .unwrap();
        assert_eq!(updated.name, "Climate");

        let rejected = t.update_with("2", |c| {
            c.name = "Broken".into();
            Err("nope".into())
        });
        assert_eq!(rejected, Err(ApiError::Mock("nope".into())));
        assert_eq!(t.get("2").unwrap().name, "Fleet");
        assert_eq!(
            t.update_with("7", |_| Ok(())),
            Err(ApiError::NotFound)
        );
    }

    #[test]
    fn test_insert_remove_and_next_id() {
        let mut t = table();
        assert_eq!(t.next_id(), "3");
        t.insert(category("3", "Plumbing"));
        assert_eq!(t.len(), 3);
        assert!(t.remove("1").is_ok());
        assert_eq!(t.remove("1"), Err(ApiError::NotFound));
        assert_eq!(t.next_id(), "4");
    }

    #[test]
    fn test_db_is_seeded_once() {
        let before = with_db(|db| db.equipment.len());
        assert_eq!(before, 4);
        with_db(|db| db.equipment.remove("4")).unwrap();
        assert_eq!(with_db(|db| db.equipment.len()), 3);
        assert_eq!(with_db(|db| db.work_orders.len()), 6);
    }

    #[test]
    fn test_audit_appends_with_next_id() {
        let mut db = mock_seed::seed(Utc::now());
        let before = db.audit_logs.len();
        let admin = db.users.get("2").unwrap();
        db.audit(Some(&admin), AuditAction::Delete, "team", Some("3"), "Deleted team Fleet Crew");
        assert_eq!(db.audit_logs.len(), before + 1);
        let entry = db.audit_logs.get(&(before + 1).to_string()).unwrap();
        assert_eq!(entry.user_name, "Priya Patel");
        assert_eq!(entry.resource_id.as_deref(), Some("3"));
    }
}
