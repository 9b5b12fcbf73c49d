use std::sync::Arc;

use error_stack::report;
use tracing::instrument;

use crate::domain::cells::CellRow;
use crate::ports::spreadsheet_gateway::{SpreadsheetGateway, SpreadsheetGatewayError};

use super::retry::{retry_operation, RetryPolicy};

/// Reads one A1 range of the data spreadsheet, retrying transport failures.
pub struct TableReader {
    gateway: Arc<dyn SpreadsheetGateway>,
    spreadsheet_id: String,
    retry: RetryPolicy,
}

impl std::fmt::Debug for TableReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableReader")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .finish()
    }
}

impl TableReader {
    pub fn new(
        gateway: Arc<dyn SpreadsheetGateway>,
        spreadsheet_id: impl Into<String>,
        retry: RetryPolicy,
    ) -> Self {
        TableReader {
            gateway,
            spreadsheet_id: spreadsheet_id.into(),
            retry,
        }
    }

    /// Unlike single writes, a table nobody could read is an error: there is nothing to go on.
    #[instrument]
    pub async fn read(
        &self,
        range: &str,
    ) -> error_stack::Result<Vec<CellRow>, SpreadsheetGatewayError> {
        let rows = retry_operation(&self.retry, "read range", || {
            self.gateway.read_range(&self.spreadsheet_id, range)
        })
        .await?;

        rows.ok_or_else(|| {
            report!(SpreadsheetGatewayError::transport(
                None,
                format!(
                    "range {} unreachable after {} attempts",
                    range,
                    self.retry.attempts()
                )
            ))
        })
    }
}
