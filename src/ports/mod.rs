pub mod command_handler;
pub mod credential_store;
pub mod spreadsheet_gateway;
