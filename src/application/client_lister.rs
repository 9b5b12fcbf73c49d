use tracing::{instrument, warn};

use crate::domain::client::ClientEntry;
use crate::ports::spreadsheet_gateway::SpreadsheetGatewayError;

use super::table_reader::TableReader;

#[derive(Debug)]
pub struct ClientLister {
    reader: TableReader,
    clients_range: String,
}

impl ClientLister {
    pub fn new(reader: TableReader, clients_range: impl Into<String>) -> Self {
        ClientLister {
            reader,
            clients_range: clients_range.into(),
        }
    }

    /// Clients in the order the sheet lists them. Rows without a spreadsheet id are skipped.
    #[instrument]
    pub async fn list(&self) -> error_stack::Result<Vec<ClientEntry>, SpreadsheetGatewayError> {
        let rows = self.reader.read(&self.clients_range).await?;

        Ok(rows
            .iter()
            .enumerate()
            .filter_map(|(index, row)| match ClientEntry::try_from_row(row) {
                Ok(client) => Some(client),
                Err(e) => {
                    warn!("Skipping client row {}: {}", index + 1, e);
                    None
                }
            })
            .collect())
    }
}
