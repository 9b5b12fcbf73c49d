pub mod auth;
pub mod error;
pub mod http_client;
pub mod spreadsheet_manager;
