//! Заголовки вкладок: единственный источник правды.
//!
//! Для агрегатов берутся `list_name`/`element_name` из contracts.

use contracts::domain::a001_equipment::Equipment;
use contracts::domain::a002_equipment_category::EquipmentCategory;
use contracts::domain::a003_location::Location;
use contracts::domain::a004_part::Part;
use contracts::domain::a005_work_order::WorkOrder;
use contracts::domain::a006_maintenance_schedule::MaintenanceSchedule;
use contracts::domain::a007_team::Team;
use contracts::domain::a008_organization::Organization;
use contracts::domain::common::AggregateRoot;

/// Ключ вкладки канбан-доски
pub const KANBAN_KEY: &str = "a005_work_order_kanban";
pub const DASHBOARD_KEY: &str = "d400_dashboard";
/// Суффикс detail-ключа для создания новой записи
pub const NEW_ID: &str = "new";

/// Читаемый заголовок вкладки; неизвестный ключ даёт пустую строку
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        DASHBOARD_KEY => "Dashboard",
        "a001_equipment" => Equipment::list_name(),
        "a002_equipment_category" => EquipmentCategory::list_name(),
        "a003_location" => Location::list_name(),
        "a004_part" => Part::list_name(),
        "a005_work_order" => WorkOrder::list_name(),
        KANBAN_KEY => "Kanban Board",
        "a006_maintenance_schedule" => MaintenanceSchedule::list_name(),
        "a007_team" => Team::list_name(),
        "a008_organization" => Organization::list_name(),

        "sys_users" => "Users",
        "sys_audit_log" => "Audit Logs",
        "sys_settings" => "Settings",

        _ => "",
    }
}

/// Имя элемента агрегата по ключу списка (для detail-вкладок)
pub fn entity_element_name(aggregate_key: &str) -> &'static str {
    match aggregate_key {
        "a001_equipment" => Equipment::element_name(),
        "a002_equipment_category" => EquipmentCategory::element_name(),
        "a003_location" => Location::element_name(),
        "a004_part" => Part::element_name(),
        "a005_work_order" => WorkOrder::element_name(),
        "a006_maintenance_schedule" => MaintenanceSchedule::element_name(),
        "a007_team" => Team::element_name(),
        "a008_organization" => Organization::element_name(),
        _ => "",
    }
}

/// «<entity> · <identifier>»
pub fn detail_tab_label(entity_label: &str, identifier: &str) -> String {
    format!("{} · {}", entity_label, identifier)
}

/// Разбор detail-ключа `{aggregate}_detail_{id}` → (aggregate, id)
pub fn split_detail_key(key: &str) -> Option<(&str, &str)> {
    let (aggregate, id) = key.split_once("_detail_")?;
    if aggregate.is_empty() || id.is_empty() {
        return None;
    }
    Some((aggregate, id))
}

/// Заголовок для любой вкладки, включая detail; fallback: сам ключ
pub fn title_for_key(key: &str) -> String {
    let label = tab_label_for_key(key);
    if !label.is_empty() {
        return label.to_string();
    }
    match split_detail_key(key) {
        Some((aggregate, NEW_ID)) => format!("New {}", entity_element_name(aggregate)),
        Some((aggregate, id)) => detail_tab_label(entity_element_name(aggregate), id),
        None => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_labels() {
        assert_eq!(tab_label_for_key("a001_equipment"), "Equipment");
        assert_eq!(tab_label_for_key(KANBAN_KEY), "Kanban Board");
        assert_eq!(tab_label_for_key("nope"), "");
    }

    #[test]
    fn test_detail_keys() {
        let key = WorkOrder::detail_key("WO-1001");
        assert_eq!(key, "a005_work_order_detail_WO-1001");
        assert_eq!(split_detail_key(&key), Some(("a005_work_order", "WO-1001")));
        assert_eq!(split_detail_key("a001_equipment_detail_"), None);
        assert_eq!(split_detail_key("a001_equipment"), None);

        assert_eq!(title_for_key(&key), "Work Order · WO-1001");
        assert_eq!(title_for_key(&Equipment::detail_key(NEW_ID)), "New Equipment");
        assert_eq!(title_for_key("sys_users"), "Users");
        assert_eq!(title_for_key("zzz"), "zzz");
        assert_eq!(title_for_key(&Team::detail_key("2")), "Team · 2");
        assert_eq!(title_for_key(&Organization::detail_key(NEW_ID)), "New Organization");
        assert_eq!(title_for_key("sys_audit_log"), "Audit Logs");
    }
}
