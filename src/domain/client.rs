use super::cells::RowCells;
use super::template::RowShapeError;

/// A destination spreadsheet owned by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientEntry {
    pub client_name: String,
    pub spreadsheet_id: String,
}

impl ClientEntry {
    pub fn new(client_name: impl Into<String>, spreadsheet_id: impl Into<String>) -> Self {
        ClientEntry {
            client_name: client_name.into(),
            spreadsheet_id: spreadsheet_id.into(),
        }
    }

    /// Only the spreadsheet id is required; a blank name is shown as the id.
    pub fn try_from_row(row: &[serde_json::Value]) -> Result<Self, RowShapeError> {
        let spreadsheet_id = row.text_at(1).ok_or(RowShapeError::MissingCell {
            column: 1,
            name: "client spreadsheet id",
        })?;
        let client_name = row.text_at(0).unwrap_or_else(|| spreadsheet_id.clone());

        Ok(ClientEntry {
            client_name,
            spreadsheet_id,
        })
    }
}
