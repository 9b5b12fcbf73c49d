use std::fmt::Debug;
use std::sync::Arc;

use error_stack::{report, ResultExt};
use google_sheets4::{
    api::{
        BatchUpdateSpreadsheetRequest, CopySheetToAnotherSpreadsheetRequest, Request,
        SheetProperties, UpdateSheetPropertiesRequest,
    },
    FieldMask, Sheets,
};
use tracing::{debug, instrument};

use crate::config::sheets_config::SheetsConfig;
use crate::domain::{cells::CellRow, sheet_ref::SheetRef};
use crate::ports::credential_store::CredentialStore;
use crate::ports::spreadsheet_gateway::{SpreadsheetGateway, SpreadsheetGatewayError};

use super::{
    auth::{self, CredentialError},
    error::gateway_error,
    http_client::{self, HttpsConnector},
};

/// Google Sheets v4 behind the [`SpreadsheetGateway`] port.
pub struct SpreadsheetManager {
    hub: Sheets<HttpsConnector>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetManager")
    }
}

fn rename_request(sheet_id: i32, title: &str) -> BatchUpdateSpreadsheetRequest {
    BatchUpdateSpreadsheetRequest {
        requests: Some(vec![Request {
            update_sheet_properties: Some(UpdateSheetPropertiesRequest {
                fields: Some(FieldMask::new(&["title"])),
                properties: Some(SheetProperties {
                    sheet_id: Some(sheet_id),
                    title: Some(title.to_string()),
                    ..Default::default()
                }),
            }),
            ..Default::default()
        }]),
        ..Default::default()
    }
}

fn http_client_error(error: std::io::Error) -> error_stack::Report<CredentialError> {
    report!(CredentialError::HttpClient)
        .attach_printable(error.to_string())
        .attach_printable("No usable root certificates were found in the platform store.")
}

impl SpreadsheetManager {
    /// Authenticates (possibly interactively) before returning, so the hub is ready to use.
    #[instrument(name = "SpreadsheetManager::new", skip(store))]
    pub async fn new(
        config: &SheetsConfig,
        store: Arc<dyn CredentialStore>,
    ) -> error_stack::Result<Self, CredentialError> {
        let client = http_client::http_client().map_err(http_client_error)?;
        let auth = auth::auth(config, client.clone(), store).await?;
        let hub: Sheets<HttpsConnector> = Sheets::new(client, auth);

        Ok(SpreadsheetManager { hub })
    }
}

#[async_trait::async_trait]
impl SpreadsheetGateway for SpreadsheetManager {
    #[instrument]
    async fn read_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> error_stack::Result<Vec<CellRow>, SpreadsheetGatewayError> {
        let (_, value_range) = self
            .hub
            .spreadsheets()
            .values_get(spreadsheet_id, range)
            .doit()
            .await
            .map_err(|e| report!(gateway_error(&e)).attach_printable(e.to_string()))
            .attach_printable_lazy(|| format!("Failed to fetch values for range {}", range))?;

        Ok(value_range.values.unwrap_or_default())
    }

    #[instrument]
    async fn copy_sheet_to(
        &self,
        source: &SheetRef,
        destination_spreadsheet_id: &str,
    ) -> error_stack::Result<i32, SpreadsheetGatewayError> {
        let request = CopySheetToAnotherSpreadsheetRequest {
            destination_spreadsheet_id: Some(destination_spreadsheet_id.to_string()),
        };

        let (_, properties) = self
            .hub
            .spreadsheets()
            .sheets_copy_to(request, &source.spreadsheet_id, source.sheet_id)
            .doit()
            .await
            .map_err(|e| report!(gateway_error(&e)).attach_printable(e.to_string()))
            .attach_printable_lazy(|| {
                format!("Failed to copy {} to {}", source, destination_spreadsheet_id)
            })?;

        debug!("Copied {} as {:?}", source, properties.title);

        properties.sheet_id.ok_or_else(|| {
            report!(SpreadsheetGatewayError::shape(
                "copy response carried no sheet id"
            ))
        })
    }

    #[instrument]
    async fn rename_sheet(
        &self,
        spreadsheet_id: &str,
        sheet_id: i32,
        title: &str,
    ) -> error_stack::Result<(), SpreadsheetGatewayError> {
        let (_, response) = self
            .hub
            .spreadsheets()
            .batch_update(rename_request(sheet_id, title), spreadsheet_id)
            .doit()
            .await
            .map_err(|e| report!(gateway_error(&e)).attach_printable(e.to_string()))
            .attach_printable_lazy(|| {
                format!("Failed to rename sheet {} in {}", sheet_id, spreadsheet_id)
            })?;

        match response.replies {
            Some(replies) if !replies.is_empty() => Ok(()),
            _ => Err(report!(SpreadsheetGatewayError::shape(
                "batch update answered without replies"
            ))),
        }
    }
}
