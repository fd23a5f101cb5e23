use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

use super::tabs::tab_label_for_key;

/// Открытые вкладки (MDI) и видимость боковой панели
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
        }
    }

    /// `?active=<key>` при загрузке открывает вкладку; дальше URL следует за активной вкладкой
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if let Some(active_key) = active_from_query(&search) {
            let title = tab_label_for_key(&active_key);
            let title = if title.is_empty() {
                active_key.clone()
            } else {
                title.to_string()
            };
            self.open_tab(&active_key, &title);
        }

        let this = *self;
        Effect::new(move |_| {
            let Some(active_key) = this.active.get() else {
                return;
            };
            let new_search = query_for_active(&active_key);
            let location = window().map(|w| w.location());
            let current_search = location
                .as_ref()
                .and_then(|l| l.search().ok())
                .unwrap_or_default();
            if current_search == new_search {
                return;
            }
            let path = location
                .and_then(|l| l.pathname().ok())
                .unwrap_or_else(|| "/".to_string());
            replace_url(&format!("{}{}", path, new_search));
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        leptos::logging::log!("🔷 open_tab: key='{}', title='{}'", key, title);
        let exists = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == key));
        if !exists {
            self.opened.update(|tabs| {
                tabs.push(Tab {
                    key: key.to_string(),
                    title: title.to_string(),
                });
            });
        }
        self.activate_tab(key);
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn update_tab_title(&self, key: &str, new_title: &str) {
        self.opened.update(|tabs| {
            if let Some(tab) = tabs.iter_mut().find(|t| t.key == key) {
                tab.title = new_title.to_string();
            }
        });
    }

    pub fn close_tab(&self, key: &str) {
        leptos::logging::log!("🔴 close_tab: key='{}'", key);
        self.opened.update(|tabs| tabs.retain(|tab| tab.key != key));
        if self
            .active
            .with_untracked(|active| active.as_deref() == Some(key))
        {
            let next_active = self
                .opened
                .with_untracked(|tabs| tabs.last().map(|t| t.key.clone()));
            self.active.set(next_active);
        }
    }

    /// Закрыть все вкладки (при выходе из системы)
    pub fn close_all(&self) {
        self.opened.set(vec![]);
        self.active.set(None);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

/// Заменить адрес в строке браузера без перезагрузки
pub fn replace_url(url: &str) {
    if let Some(history) = window().and_then(|w| w.history().ok()) {
        if let Err(e) = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(url)) {
            log::warn!("history.replaceState failed: {:?}", e);
        }
    }
}

fn active_from_query(search: &str) -> Option<String> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").filter(|k| !k.is_empty()).cloned()
}

fn query_for_active(key: &str) -> String {
    let query = serde_qs::to_string(&HashMap::from([("active", key)])).unwrap_or_default();
    format!("?{}", query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_query_roundtrip() {
        let q = query_for_active("a005_work_order_detail_WO-1001");
        assert_eq!(q, "?active=a005_work_order_detail_WO-1001");
        assert_eq!(
            active_from_query(&q).as_deref(),
            Some("a005_work_order_detail_WO-1001")
        );
    }

    #[test]
    fn test_active_query_missing_or_empty() {
        assert_eq!(active_from_query(""), None);
        assert_eq!(active_from_query("?active="), None);
        assert_eq!(active_from_query("?other=1"), None);
    }
}
