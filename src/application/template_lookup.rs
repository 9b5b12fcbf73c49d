use error_stack::{report, ResultExt};
use tracing::{instrument, warn};

use crate::domain::template::{find_template_row, TemplateEntry};
use crate::ports::spreadsheet_gateway::SpreadsheetGatewayError;

use super::table_reader::TableReader;

#[derive(Debug)]
pub struct TemplateLookup {
    reader: TableReader,
    programs_range: String,
}

impl TemplateLookup {
    pub fn new(reader: TableReader, programs_range: impl Into<String>) -> Self {
        TemplateLookup {
            reader,
            programs_range: programs_range.into(),
        }
    }

    /// Finds where the master copy of `program_name` lives. The first matching row wins.
    #[instrument]
    pub async fn find(
        &self,
        program_name: &str,
    ) -> error_stack::Result<TemplateEntry, SpreadsheetGatewayError> {
        let rows = self.reader.read(&self.programs_range).await?;

        let row = find_template_row(&rows, program_name).ok_or_else(|| {
            report!(SpreadsheetGatewayError::NotFound(format!(
                "program '{}'",
                program_name
            )))
            .attach_printable(format!(
                "No row of {} is named '{}'",
                self.programs_range, program_name
            ))
        })?;

        TemplateEntry::try_from_row(row)
            .map_err(|e| report!(SpreadsheetGatewayError::shape(e.to_string())))
            .attach_printable_lazy(|| {
                format!("Template row for '{}' is malformed", program_name)
            })
    }

    /// Every well-formed row of the programs table, in table order.
    #[instrument]
    pub async fn list(&self) -> error_stack::Result<Vec<TemplateEntry>, SpreadsheetGatewayError> {
        let rows = self.reader.read(&self.programs_range).await?;

        Ok(rows
            .iter()
            .enumerate()
            .filter_map(|(index, row)| match TemplateEntry::try_from_row(row) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping programs row {}: {}", index + 1, e);
                    None
                }
            })
            .collect())
    }
}
