use google_sheets4::Error as Sheets4Error;
use serde_json::Value;

use crate::ports::spreadsheet_gateway::SpreadsheetGatewayError;

/// Sorts a hub error into the gateway taxonomy. Anything that came back over HTTP, or never
/// made it there, is a transport error and therefore retried.
pub fn gateway_error(error: &Sheets4Error) -> SpreadsheetGatewayError {
    match error {
        Sheets4Error::Failure(response) => {
            let status = response.status();
            SpreadsheetGatewayError::transport(
                Some(status.as_u16()),
                format!(
                    "{} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            )
        }
        Sheets4Error::BadRequest(body) => {
            let status = body
                .pointer("/error/code")
                .and_then(Value::as_u64)
                .and_then(|code| u16::try_from(code).ok());
            let message = body
                .pointer("/error/message")
                .and_then(Value::as_str)
                .unwrap_or("bad request");
            SpreadsheetGatewayError::transport(
                status,
                match status {
                    Some(status) => format!("{} {}", status, message),
                    None => message.to_string(),
                },
            )
        }
        Sheets4Error::HttpError(e) => SpreadsheetGatewayError::transport(None, e.to_string()),
        Sheets4Error::Io(e) => SpreadsheetGatewayError::transport(None, e.to_string()),
        Sheets4Error::MissingToken(e) => SpreadsheetGatewayError::Auth(e.to_string()),
        Sheets4Error::JsonDecodeError(_, e) => SpreadsheetGatewayError::shape(e.to_string()),
        other => SpreadsheetGatewayError::transport(None, other.to_string()),
    }
}
