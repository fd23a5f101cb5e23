pub mod audit_log;
pub mod auth;
pub mod pages;
pub mod users;
