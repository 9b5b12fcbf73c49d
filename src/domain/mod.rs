pub mod cells;
pub mod client;
pub mod credential;
pub mod sheet_ref;
pub mod sheet_title;
pub mod template;
