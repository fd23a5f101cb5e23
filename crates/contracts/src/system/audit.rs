//! Журнал аудита: кто, что и когда сделал с какой записью.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::users::{User, UserId, UserRole};

crate::string_id!(
    /// Идентификатор записи журнала
    AuditLogId
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Login,
    Logout,
    StatusChange,
    Assignment,
}

impl AuditAction {
    pub const ALL: [AuditAction; 7] = [
        AuditAction::Create,
        AuditAction::Update,
        AuditAction::Delete,
        AuditAction::Login,
        AuditAction::Logout,
        AuditAction::StatusChange,
        AuditAction::Assignment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
            AuditAction::Login => "login",
            AuditAction::Logout => "logout",
            AuditAction::StatusChange => "status_change",
            AuditAction::Assignment => "assignment",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AuditAction::Create => "Create",
            AuditAction::Update => "Update",
            AuditAction::Delete => "Delete",
            AuditAction::Login => "Login",
            AuditAction::Logout => "Logout",
            AuditAction::StatusChange => "Status Change",
            AuditAction::Assignment => "Assignment",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: AuditLogId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// Имя на момент события; "System" для фоновых действий
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_role: Option<UserRole>,
    pub action: AuditAction,
    pub resource_type: String,
    #[serde(default)]
    pub resource_id: Option<String>,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default = "default_success")]
    pub success: bool,
    pub created_at: DateTime<Utc>,
}

fn default_success() -> bool {
    true
}

impl AuditLog {
    pub fn new(
        id: AuditLogId,
        actor: Option<&User>,
        action: AuditAction,
        resource_type: &str,
        resource_id: Option<&str>,
        details: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id: actor.map(|u| u.id.clone()),
            user_name: actor
                .map(|u| u.display_name())
                .unwrap_or_else(|| "System".to_string()),
            user_role: actor.map(|u| u.role),
            action,
            resource_type: resource_type.to_string(),
            resource_id: resource_id.map(str::to_string),
            details: details.into(),
            ip_address: None,
            success: true,
            created_at: now,
        }
    }

    /// Заголовок строки журнала: "Status Change · workorder WO-1001"
    pub fn title(&self) -> String {
        match &self.resource_id {
            Some(id) => format!("{} · {} {}", self.action.label(), self.resource_type, id),
            None => format!("{} · {}", self.action.label(), self.resource_type),
        }
    }

    pub fn concerns(&self, resource_type: &str, resource_id: &str) -> bool {
        self.resource_type == resource_type && self.resource_id.as_deref() == Some(resource_id)
    }
}

/// Фильтр `GET /audit-logs`; `search` применяется только на клиенте
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditFilter {
    pub search: String,
    pub action: Option<AuditAction>,
    pub resource_type: Option<String>,
    pub user_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl AuditFilter {
    pub fn matches(&self, log: &AuditLog) -> bool {
        if self.action.is_some_and(|a| a != log.action) {
            return false;
        }
        if let Some(rt) = &self.resource_type {
            if &log.resource_type != rt {
                return false;
            }
        }
        if let Some(uid) = &self.user_id {
            if log.user_id.as_ref().map(|u| u.as_str()) != Some(uid.as_str()) {
                return false;
            }
        }
        let day = log.created_at.date_naive();
        if self.start_date.is_some_and(|start| day < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| day > end) {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || log.action.label().to_lowercase().contains(&needle)
            || log.user_name.to_lowercase().contains(&needle)
            || log.details.to_lowercase().contains(&needle)
            || log.resource_type.to_lowercase().contains(&needle)
    }

    /// Отфильтровать, новые сверху
    pub fn apply(&self, logs: &[AuditLog]) -> Vec<AuditLog> {
        let mut out: Vec<AuditLog> = logs.iter().filter(|l| self.matches(l)).cloned().collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }

    pub fn query_params(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("resource_type", self.resource_type.clone()),
            ("user_id", self.user_id.clone()),
            ("action", self.action.map(|a| a.as_str().to_string())),
            ("start_date", self.start_date.map(|d| d.format("%Y-%m-%d").to_string())),
            ("end_date", self.end_date.map(|d| d.format("%Y-%m-%d").to_string())),
        ]
    }
}

/// История одной записи (`GET /audit-logs/:resource/:id`), новые сверху
pub fn resource_history(logs: &[AuditLog], resource_type: &str, resource_id: &str) -> Vec<AuditLog> {
    let mut out: Vec<AuditLog> = logs
        .iter()
        .filter(|l| l.concerns(resource_type, resource_id))
        .cloned()
        .collect();
    out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn admin() -> User {
        User {
            id: UserId::new("2"),
            email: "admin@cmms.local".into(),
            first_name: "Sarah".into(),
            last_name: "Johnson".into(),
            phone: None,
            role: UserRole::Admin,
            is_active: true,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    fn journal() -> Vec<AuditLog> {
        let base = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        let sarah = admin();
        vec![
            AuditLog::new(AuditLogId::new("1"), Some(&sarah), AuditAction::Login, "auth", None, "Signed in", base),
            AuditLog::new(
                AuditLogId::new("2"),
                Some(&sarah),
                AuditAction::Create,
                "team",
                Some("3"),
                "Created team Fleet Crew",
                base + Duration::days(1),
            ),
            AuditLog::new(
                AuditLogId::new("3"),
                None,
                AuditAction::StatusChange,
                "workorder",
                Some("WO-1001"),
                "Pending -> In Progress",
                base + Duration::days(2),
            ),
        ]
    }

    #[test]
    fn test_new_entry_from_actor() {
        let logs = journal();
        assert_eq!(logs[0].user_name, "Sarah Johnson");
        assert_eq!(logs[0].user_role, Some(UserRole::Admin));
        assert!(logs[0].success);
        assert_eq!(logs[2].user_name, "System");
        assert_eq!(logs[2].title(), "Status Change · workorder WO-1001");
        assert_eq!(logs[0].title(), "Login · auth");
    }

    #[test]
    fn test_filter_newest_first_and_search() {
        let logs = journal();
        let all = AuditFilter::default().apply(&logs);
        assert_eq!(all[0].id.as_str(), "3");

        let f = AuditFilter {
            search: "fleet".into(),
            ..Default::default()
        };
        assert_eq!(f.apply(&logs).len(), 1);

        let f = AuditFilter {
            search: "sarah".into(),
            ..Default::default()
        };
        assert_eq!(f.apply(&logs).len(), 2);
    }

    #[test]
    fn test_filter_by_action_user_and_dates() {
        let logs = journal();
        let f = AuditFilter {
            action: Some(AuditAction::Create),
            user_id: Some("2".into()),
            ..Default::default()
        };
        assert_eq!(f.apply(&logs).len(), 1);

        let f = AuditFilter {
            start_date: NaiveDate::from_ymd_opt(2025, 3, 11),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 11),
            ..Default::default()
        };
        let hits = f.apply(&logs);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].resource_type, "team");
    }

    #[test]
    fn test_query_params_and_history() {
        let f = AuditFilter {
            action: Some(AuditAction::StatusChange),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 1),
            search: "ignored".into(),
            ..Default::default()
        };
        let params = f.query_params();
        assert_eq!(params[2], ("action", Some("status_change".to_string())));
        assert_eq!(params[3], ("start_date", Some("2025-03-01".to_string())));
        assert_eq!(params[0], ("resource_type", None));

        let history = resource_history(&journal(), "team", "3");
        assert_eq!(history.len(), 1);
        assert!(resource_history(&journal(), "team", "4").is_empty());
        assert_eq!(AuditAction::from_code("assignment"), Some(AuditAction::Assignment));
    }
}
