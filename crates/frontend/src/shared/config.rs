//! Конфигурация клиента.
//!
//! Значения по умолчанию встроены в сборку (`DEFAULT_CONFIG`), адрес API и
//! режим mock переопределяются через localStorage.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::sync::RwLock;
use web_sys::window;

pub const BASE_URL_KEY: &str = "cmms_api_base_url";
pub const USE_MOCK_KEY: &str = "cmms_use_mock";

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "http://localhost:8000/api/v1"

[mock]
enabled = true

[mock.latency]
list = 800
get = 600
mutate = 1000
kanban_list = 800
kanban_update = 500
kanban_get = 400
locations_list = 1000
"#;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub mock: MockConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MockConfig {
    pub enabled: bool,
    pub latency: LatencyConfig,
}

/// Задержки mock-сервиса, мс
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LatencyConfig {
    pub list: u32,
    pub get: u32,
    pub mutate: u32,
    pub kanban_list: u32,
    pub kanban_update: u32,
    pub kanban_get: u32,
    pub locations_list: u32,
}

/// Вид операции mock-сервиса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockOp {
    List,
    Get,
    Mutate,
    KanbanList,
    KanbanUpdate,
    KanbanGet,
    LocationsList,
}

impl LatencyConfig {
    pub fn for_op(&self, op: MockOp) -> u32 {
        match op {
            MockOp::List => self.list,
            MockOp::Get => self.get,
            MockOp::Mutate => self.mutate,
            MockOp::KanbanList => self.kanban_list,
            MockOp::KanbanUpdate => self.kanban_update,
            MockOp::KanbanGet => self.kanban_get,
            MockOp::LocationsList => self.locations_list,
        }
    }
}

impl AppConfig {
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Переопределения из localStorage; пустые и нераспознанные значения игнорируются
    pub fn apply_overrides(&mut self, base_url: Option<String>, use_mock: Option<String>) {
        if let Some(url) = base_url {
            let url = url.trim().trim_end_matches('/');
            if !url.is_empty() {
                self.api.base_url = url.to_string();
            }
        }
        match use_mock.as_deref().map(str::trim) {
            Some("true") | Some("1") => self.mock.enabled = true,
            Some("false") | Some("0") => self.mock.enabled = false,
            _ => {}
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        // DEFAULT_CONFIG покрыт тестом, поэтому разбор не падает
        match Self::parse(DEFAULT_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Embedded config is invalid: {}", e);
                Self {
                    api: ApiConfig {
                        base_url: "http://localhost:8000/api/v1".to_string(),
                    },
                    mock: MockConfig {
                        enabled: true,
                        latency: LatencyConfig {
                            list: 800,
                            get: 600,
                            mutate: 1000,
                            kanban_list: 800,
                            kanban_update: 500,
                            kanban_get: 400,
                            locations_list: 1000,
                        },
                    },
                }
            }
        }
    }
}

static CONFIG: Lazy<RwLock<AppConfig>> = Lazy::new(|| RwLock::new(load_config()));

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn read_item(key: &str) -> Option<String> {
    get_local_storage()?.get_item(key).ok()?
}

fn write_item(key: &str, value: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(key, value);
    }
}

fn load_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.apply_overrides(read_item(BASE_URL_KEY), read_item(USE_MOCK_KEY));
    log::info!(
        "Config loaded: api={}, mock={}",
        config.api.base_url,
        config.mock.enabled
    );
    config
}

/// Текущая конфигурация (копия)
pub fn config() -> AppConfig {
    match CONFIG.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

pub fn use_mock() -> bool {
    config().mock.enabled
}

pub fn api_base_url() -> String {
    config().api.base_url
}

fn update(f: impl FnOnce(&mut AppConfig)) {
    match CONFIG.write() {
        Ok(mut guard) => f(&mut guard),
        Err(poisoned) => f(&mut poisoned.into_inner()),
    }
}

/// Включить/выключить mock и сохранить выбор
pub fn set_mock_enabled(enabled: bool) {
    write_item(USE_MOCK_KEY, if enabled { "true" } else { "false" });
    update(|c| c.mock.enabled = enabled);
    log::info!("Mock mode set to {}", enabled);
}

/// Сменить адрес API и сохранить выбор
pub fn set_api_base_url(url: &str) {
    let url = url.trim().trim_end_matches('/').to_string();
    if url.is_empty() {
        return;
    }
    write_item(BASE_URL_KEY, &url);
    update(|c| c.api.base_url = url.clone());
    log::info!("API base URL set to {}", url);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = AppConfig::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/api/v1");
        assert!(config.mock.enabled);
        assert_eq!(config.mock.latency.for_op(MockOp::List), 800);
        assert_eq!(config.mock.latency.for_op(MockOp::KanbanUpdate), 500);
        assert_eq!(config.mock.latency.for_op(MockOp::KanbanGet), 400);
        assert_eq!(config.mock.latency.for_op(MockOp::LocationsList), 1000);
    }

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides(Some("https://cmms.example.com/api/v1/".into()), Some("false".into()));
        assert_eq!(config.api.base_url, "https://cmms.example.com/api/v1");
        assert!(!config.mock.enabled);
    }

    #[test]
    fn test_blank_overrides_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(Some("   ".into()), Some("maybe".into()));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_broken_toml_is_an_error() {
        assert!(AppConfig::parse("[api]\nbase_url = 42").is_err());
    }
}
