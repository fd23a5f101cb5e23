//! Общие типы CMMS: агрегаты, DTO для REST API и чистая клиентская логика
//! (фильтры, группировка канбана, окна обслуживания, права ролей).

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;
