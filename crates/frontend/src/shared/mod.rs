pub mod api_client;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod icons;
pub mod list_utils;
pub mod mock_seed;
pub mod mock_store;
pub mod page_frame;
pub mod page_standard;
