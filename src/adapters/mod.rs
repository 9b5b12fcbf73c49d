pub mod credentials;
pub mod sheets;
