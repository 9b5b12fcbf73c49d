pub mod file_credential_store;
pub mod token_storage;
