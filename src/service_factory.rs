use std::sync::Arc;

use program_copier::{
    adapters::{
        credentials::file_credential_store::FileCredentialStore,
        sheets::{auth::CredentialError, spreadsheet_manager::SpreadsheetManager},
    },
    application::{retry::RetryPolicy, service::ProgramCopyService},
    config::app_config::AppConfig,
    ports::{credential_store::CredentialStore, spreadsheet_gateway::SpreadsheetGateway},
};

pub struct ServiceFactory;

impl ServiceFactory {
    /// Authenticates against Google and wires the copy service on top of the hub.
    pub async fn create(
        config: &AppConfig,
    ) -> error_stack::Result<ProgramCopyService, CredentialError> {
        let store: Arc<dyn CredentialStore> =
            Arc::new(FileCredentialStore::new(&*config.sheets.token_cache));

        let gateway: Arc<dyn SpreadsheetGateway> =
            Arc::new(SpreadsheetManager::new(&config.sheets, store).await?);

        Ok(ProgramCopyService::new(
            gateway,
            &config.sheets,
            RetryPolicy::from(&config.retry),
        ))
    }
}
