pub mod client_lister;
pub mod copy_and_rename;
pub mod retry;
pub mod service;
pub mod table_reader;
pub mod template_lookup;

#[cfg(test)]
pub(crate) mod testing;
