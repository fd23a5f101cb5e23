//! Категории страниц, открываемых во вкладках.
//!
//! Корневой элемент страницы получает `id` вида `{entity}--{category}`
//! (например `"a001_equipment--list"`) и атрибут `data-page-category`.

/// Таблица записей с фильтрами
pub const PAGE_CAT_LIST: &str = "list";

/// Карточка одной записи (создание и редактирование)
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Дашборд
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Администрирование (пользователи, настройки)
pub const PAGE_CAT_SYSTEM: &str = "system";

/// Свободная вёрстка (канбан-доска)
pub const PAGE_CAT_CUSTOM: &str = "custom";

pub const ALL_CATEGORIES: &[&str] = &[
    PAGE_CAT_LIST,
    PAGE_CAT_DETAIL,
    PAGE_CAT_DASHBOARD,
    PAGE_CAT_SYSTEM,
    PAGE_CAT_CUSTOM,
];

/// Проверка формата `{entity}--{category}`
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && is_known_category(category),
        None => false,
    }
}

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids() {
        assert!(is_valid_page_id("a005_work_order--custom"));
        assert!(is_valid_page_id("sys_users--system"));
        assert!(!is_valid_page_id("a001_equipment"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a001_equipment--grid"));
    }
}
