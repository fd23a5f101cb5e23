//! Вкладки:
//! - `page` - обёртка контента вкладки
//! - `registry` - маппинг tab.key → View
//! - `tab_labels` - заголовки вкладок

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::{detail_tab_label, tab_label_for_key, title_for_key, DASHBOARD_KEY, KANBAN_KEY, NEW_ID};
