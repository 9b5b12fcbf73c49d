fn default_programs_range() -> Box<str> {
    "Programs!A2:C".into()
}

fn default_clients_range() -> Box<str> {
    "Client Spreadsheets!A2:B".into()
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct SheetsConfig {
    /// OAuth client secret in the "installed application" format.
    pub client_secret: Box<str>,
    /// JSON file the access/refresh tokens are persisted to.
    pub token_cache: Box<str>,
    /// Spreadsheet holding both the programs table and the client list.
    pub data_spreadsheet_id: Box<str>,
    #[serde(default = "default_programs_range")]
    pub programs_range: Box<str>,
    #[serde(default = "default_clients_range")]
    pub clients_range: Box<str>,
}
