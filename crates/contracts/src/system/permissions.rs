//! Права ролей в формате `ресурс:действие` с поддержкой `ресурс:*` и `*`.

use super::users::UserRole;

pub fn role_permissions(role: UserRole) -> &'static [&'static str] {
    match role {
        UserRole::SuperAdmin => &["*"],
        UserRole::Admin => &[
            "organization:*",
            "user:*",
            "equipment:*",
            "workorder:*",
            "schedule:*",
            "parts:*",
            "report:*",
            "team:*",
            "audit:read",
        ],
        UserRole::Manager => &[
            "equipment:*",
            "workorder:*",
            "schedule:*",
            "parts:*",
            "report:read",
            "team:*",
        ],
        UserRole::Technician => &[
            "equipment:read",
            "equipment:update",
            "workorder:read",
            "workorder:update",
            "parts:read",
            "parts:use",
            "team:read",
        ],
        UserRole::Operator => &[
            "equipment:read",
            "equipment:report_issue",
            "workorder:create",
            "workorder:read",
        ],
        UserRole::Viewer => &[
            "equipment:read",
            "workorder:read",
            "schedule:read",
            "parts:read",
            "report:read",
            "team:read",
        ],
    }
}

/// Точное совпадение, затем `ресурс:*`, затем `*`
pub fn has_permission(role: UserRole, permission: &str) -> bool {
    let granted = role_permissions(role);
    if granted.iter().any(|p| *p == permission) {
        return true;
    }
    let resource = permission.split(':').next().unwrap_or(permission);
    let wildcard = format!("{}:*", resource);
    granted.iter().any(|p| *p == wildcard || *p == "*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_super_admin_has_everything() {
        assert!(has_permission(UserRole::SuperAdmin, "user:delete"));
        assert!(has_permission(UserRole::SuperAdmin, "anything"));
    }

    #[test]
    fn test_resource_wildcard() {
        assert!(has_permission(UserRole::Manager, "workorder:delete"));
        assert!(!has_permission(UserRole::Manager, "user:read"));
        assert!(has_permission(UserRole::Manager, "report:read"));
        assert!(!has_permission(UserRole::Manager, "report:export"));
    }

    #[test]
    fn test_exact_grants() {
        assert!(has_permission(UserRole::Technician, "parts:use"));
        assert!(!has_permission(UserRole::Technician, "parts:create"));
        assert!(has_permission(UserRole::Operator, "equipment:report_issue"));
        assert!(!has_permission(UserRole::Viewer, "workorder:create"));
        assert!(!has_permission(UserRole::Viewer, "user:read"));
    }

    #[test]
    fn test_team_and_audit_grants() {
        assert!(has_permission(UserRole::Manager, "team:delete"));
        assert!(has_permission(UserRole::Technician, "team:read"));
        assert!(!has_permission(UserRole::Technician, "team:update"));
        assert!(!has_permission(UserRole::Operator, "team:read"));
        assert!(has_permission(UserRole::Admin, "audit:read"));
        assert!(!has_permission(UserRole::Manager, "audit:read"));
        assert!(!has_permission(UserRole::Manager, "organization:read"));
    }
}
