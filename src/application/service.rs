use std::sync::Arc;

use chrono::NaiveDate;
use error_stack::ResultExt;
use thiserror::Error;
use tracing::{error, info, instrument, Instrument};

use crate::config::sheets_config::SheetsConfig;
use crate::domain::{client::ClientEntry, template::TemplateEntry};
use crate::ports::spreadsheet_gateway::SpreadsheetGateway;

use super::{
    client_lister::ClientLister,
    copy_and_rename::{CopyAndRename, CopyOutcome},
    retry::RetryPolicy,
    table_reader::TableReader,
    template_lookup::TemplateLookup,
};

#[derive(Error, Debug)]
pub enum ProgramCopyError {
    #[error("Template for program '{0}' is unavailable")]
    TemplateUnavailable(String),
    #[error("Template table is unavailable")]
    TemplatesUnavailable,
    #[error("Client list is unavailable")]
    ClientsUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOutcome {
    pub client: ClientEntry,
    pub outcome: CopyOutcome,
}

/// Result of copying one program to every client, in client list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyReport {
    pub template: TemplateEntry,
    pub outcomes: Vec<ClientOutcome>,
}

impl CopyReport {
    pub fn copied_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|client| client.outcome.is_copied())
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.copied_count()
    }
}

/// Sequences template lookup, client listing and copy-and-rename.
#[derive(Debug)]
pub struct ProgramCopyService {
    templates: TemplateLookup,
    clients: ClientLister,
    copier: CopyAndRename,
}

impl ProgramCopyService {
    pub fn new(
        gateway: Arc<dyn SpreadsheetGateway>,
        sheets: &SheetsConfig,
        retry: RetryPolicy,
    ) -> Self {
        let reader = || {
            TableReader::new(
                Arc::clone(&gateway),
                &*sheets.data_spreadsheet_id,
                retry.clone(),
            )
        };

        ProgramCopyService {
            templates: TemplateLookup::new(reader(), &*sheets.programs_range),
            clients: ClientLister::new(reader(), &*sheets.clients_range),
            copier: CopyAndRename::new(Arc::clone(&gateway), retry.clone()),
        }
    }

    /// Copies `program_name` to every client, one after the other.
    ///
    /// Fails only when the template or the client list cannot be read; a client whose copy
    /// fails is recorded as skipped and the run moves on.
    #[instrument(skip(self))]
    pub async fn copy_program(
        &self,
        program_name: &str,
        date: NaiveDate,
    ) -> error_stack::Result<CopyReport, ProgramCopyError> {
        let template = self
            .templates
            .find(program_name)
            .await
            .change_context_lazy(|| {
                ProgramCopyError::TemplateUnavailable(program_name.to_string())
            })?;
        info!("Template for '{}' is {}", program_name, template.source);

        let clients = self
            .clients
            .list()
            .await
            .change_context(ProgramCopyError::ClientsUnavailable)?;
        info!("Copying '{}' to {} clients", program_name, clients.len());

        let mut outcomes = Vec::with_capacity(clients.len());
        for (index, client) in clients.into_iter().enumerate() {
            let outcome = self
                .copier
                .run(&template.source, &client.spreadsheet_id, program_name, date)
                .instrument(tracing::span!(
                    tracing::Level::INFO,
                    "client",
                    client = client.client_name.as_str(),
                    index = index,
                ))
                .await;

            match &outcome {
                CopyOutcome::Copied {
                    title,
                    renamed: true,
                    ..
                } => info!("✅ {}: copied as \"{}\"", client.client_name, title),
                CopyOutcome::Copied { title, .. } => error!(
                    "⚠️ {}: copied but not renamed to \"{}\"",
                    client.client_name, title
                ),
                CopyOutcome::Skipped { reason } => {
                    error!("❌ {}: {}", client.client_name, reason)
                }
            }

            outcomes.push(ClientOutcome { client, outcome });
        }

        Ok(CopyReport { template, outcomes })
    }

    #[instrument(skip(self))]
    pub async fn list_clients(&self) -> error_stack::Result<Vec<ClientEntry>, ProgramCopyError> {
        self.clients
            .list()
            .await
            .change_context(ProgramCopyError::ClientsUnavailable)
    }

    #[instrument(skip(self))]
    pub async fn list_templates(
        &self,
    ) -> error_stack::Result<Vec<TemplateEntry>, ProgramCopyError> {
        self.templates
            .list()
            .await
            .change_context(ProgramCopyError::TemplatesUnavailable)
    }
}
