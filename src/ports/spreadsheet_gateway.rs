use thiserror::Error;

use crate::domain::{cells::CellRow, sheet_ref::SheetRef};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpreadsheetGatewayError {
    #[error("Transport error: {reason}")]
    Transport { status: Option<u16>, reason: String },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unexpected response shape: {0}")]
    Shape(String),
    #[error("Authentication failed: {0}")]
    Auth(String),
}

impl SpreadsheetGatewayError {
    pub fn transport<S: Into<String>>(status: Option<u16>, reason: S) -> Self {
        SpreadsheetGatewayError::Transport {
            status,
            reason: reason.into(),
        }
    }

    pub fn shape<S: Into<String>>(details: S) -> Self {
        SpreadsheetGatewayError::Shape(details.into())
    }

    /// Only transport failures are worth another attempt.
    pub fn is_transport(&self) -> bool {
        matches!(self, SpreadsheetGatewayError::Transport { .. })
    }
}

/// The three Sheets API calls the copier needs.
#[async_trait::async_trait]
pub trait SpreadsheetGateway: Send + Sync {
    /// Reads an A1 range. A range without values yields an empty table.
    async fn read_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> error_stack::Result<Vec<CellRow>, SpreadsheetGatewayError>;

    /// Copies a sheet into another spreadsheet and returns the id of the new sheet.
    async fn copy_sheet_to(
        &self,
        source: &SheetRef,
        destination_spreadsheet_id: &str,
    ) -> error_stack::Result<i32, SpreadsheetGatewayError>;

    async fn rename_sheet(
        &self,
        spreadsheet_id: &str,
        sheet_id: i32,
        title: &str,
    ) -> error_stack::Result<(), SpreadsheetGatewayError>;
}
