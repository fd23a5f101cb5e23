//! Состав бокового меню по роли пользователя.

use contracts::system::permissions::has_permission;
use contracts::system::users::UserRole;

use crate::layout::tabs::tab_labels::{tab_label_for_key, DASHBOARD_KEY, KANBAN_KEY};

#[derive(Clone, Debug, PartialEq)]
pub struct NavItem {
    /// Ключ вкладки
    pub key: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NavGroup {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub items: Vec<NavItem>,
}

/// (ключ, иконка, право; None = доступно всем, "admin" = только администраторам)
type Entry = (&'static str, &'static str, Option<&'static str>);

const ADMIN_ONLY: &str = "admin";

fn menu_definition() -> Vec<(&'static str, &'static str, &'static str, Vec<Entry>)> {
    vec![
        (
            "overview",
            "Overview",
            "dashboard",
            vec![(DASHBOARD_KEY, "dashboard", None)],
        ),
        (
            "assets",
            "Assets",
            "equipment",
            vec![
                ("a001_equipment", "equipment", Some("equipment:read")),
                ("a002_equipment_category", "category", Some("equipment:read")),
                ("a003_location", "location", Some("equipment:read")),
            ],
        ),
        (
            "maintenance",
            "Maintenance",
            "work-orders",
            vec![
                ("a005_work_order", "work-orders", Some("workorder:read")),
                (KANBAN_KEY, "kanban", Some("workorder:read")),
                ("a006_maintenance_schedule", "schedule", Some("schedule:read")),
                ("a007_team", "team", Some("team:read")),
            ],
        ),
        (
            "inventory",
            "Inventory",
            "parts",
            vec![("a004_part", "parts", Some("parts:read"))],
        ),
        (
            "system",
            "System",
            "settings",
            vec![
                ("a008_organization", "organization", Some("organization:read")),
                ("sys_users", "users", Some(ADMIN_ONLY)),
                ("sys_audit_log", "audit", Some("audit:read")),
                ("sys_settings", "settings", Some(ADMIN_ONLY)),
            ],
        ),
    ]
}

fn allowed(role: UserRole, permission: Option<&str>) -> bool {
    match permission {
        None => true,
        Some(ADMIN_ONLY) => role.is_admin(),
        Some(p) => has_permission(role, p),
    }
}

/// Группы меню, видимые роли; пустые группы отбрасываются
pub fn nav_items_for_role(role: UserRole) -> Vec<NavGroup> {
    menu_definition()
        .into_iter()
        .filter_map(|(id, label, icon, entries)| {
            let items: Vec<NavItem> = entries
                .into_iter()
                .filter(|(_, _, permission)| allowed(role, *permission))
                .map(|(key, icon, _)| NavItem {
                    key,
                    label: tab_label_for_key(key),
                    icon,
                })
                .collect();
            (!items.is_empty()).then_some(NavGroup {
                id,
                label,
                icon,
                items,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(role: UserRole) -> Vec<&'static str> {
        nav_items_for_role(role)
            .into_iter()
            .flat_map(|g| g.items.into_iter().map(|i| i.key))
            .collect()
    }

    #[test]
    fn test_super_admin_sees_everything() {
        let all = keys(UserRole::SuperAdmin);
        assert_eq!(all.len(), 13);
        assert!(all.contains(&"sys_users"));
        assert!(all.contains(&"sys_settings"));
        assert!(all.contains(&"sys_audit_log"));
    }

    #[test]
    fn test_settings_only_for_admins() {
        assert!(keys(UserRole::Admin).contains(&"sys_settings"));
        for role in [
            UserRole::Manager,
            UserRole::Technician,
            UserRole::Operator,
            UserRole::Viewer,
        ] {
            assert!(!keys(role).contains(&"sys_settings"), "{:?} sees settings", role);
        }
    }

    #[test]
    fn test_teams_and_organizations_follow_permissions() {
        let manager = keys(UserRole::Manager);
        assert!(manager.contains(&"a007_team"));
        assert!(!manager.contains(&"a008_organization"));
        assert!(!manager.contains(&"sys_audit_log"));

        let admin = keys(UserRole::Admin);
        assert!(admin.contains(&"a008_organization"));
        assert!(admin.contains(&"sys_audit_log"));

        assert!(!keys(UserRole::Operator).contains(&"a007_team"));
        assert!(keys(UserRole::Viewer).contains(&"a007_team"));
    }

    #[test]
    fn test_operator_menu() {
        let k = keys(UserRole::Operator);
        assert!(k.contains(&"a001_equipment"));
        assert!(k.contains(&KANBAN_KEY));
        assert!(!k.contains(&"a004_part"));
        assert!(!k.contains(&"a006_maintenance_schedule"));
        assert!(!k.contains(&"sys_users"));
        let groups: Vec<_> = nav_items_for_role(UserRole::Operator)
            .into_iter()
            .map(|g| g.id)
            .collect();
        assert!(!groups.contains(&"inventory"));
    }

    #[test]
    fn test_viewer_and_technician() {
        let viewer = keys(UserRole::Viewer);
        assert!(viewer.contains(&"a006_maintenance_schedule"));
        assert!(!viewer.contains(&"sys_users"));

        let tech = keys(UserRole::Technician);
        assert!(tech.contains(&"a004_part"));
        assert!(!tech.contains(&"a006_maintenance_schedule"));
    }

    #[test]
    fn test_labels_resolved() {
        for group in nav_items_for_role(UserRole::SuperAdmin) {
            for item in group.items {
                assert!(!item.label.is_empty(), "no label for {}", item.key);
            }
        }
    }
}
