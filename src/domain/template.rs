use thiserror::Error;

use super::cells::{CellRow, RowCells};
use super::sheet_ref::SheetRef;

const NAME_COLUMN: usize = 0;
const SPREADSHEET_COLUMN: usize = 1;
const SHEET_COLUMN: usize = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowShapeError {
    #[error("missing {name} in column {column}")]
    MissingCell { column: usize, name: &'static str },
    #[error("sheet id '{0}' is not an integer")]
    InvalidSheetId(String),
}

/// A row of the programs table: where the master copy of a program lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub program_name: String,
    pub source: SheetRef,
}

impl TemplateEntry {
    pub fn try_from_row(row: &[serde_json::Value]) -> Result<Self, RowShapeError> {
        let program_name = row.text_at(NAME_COLUMN).ok_or(RowShapeError::MissingCell {
            column: NAME_COLUMN,
            name: "program name",
        })?;
        let spreadsheet_id = row
            .text_at(SPREADSHEET_COLUMN)
            .ok_or(RowShapeError::MissingCell {
                column: SPREADSHEET_COLUMN,
                name: "source spreadsheet id",
            })?;
        let sheet_id = row.text_at(SHEET_COLUMN).ok_or(RowShapeError::MissingCell {
            column: SHEET_COLUMN,
            name: "source sheet id",
        })?;
        let sheet_id = sheet_id
            .parse::<i32>()
            .map_err(|_| RowShapeError::InvalidSheetId(sheet_id))?;

        Ok(TemplateEntry {
            program_name,
            source: SheetRef::new(spreadsheet_id, sheet_id),
        })
    }
}

/// Returns the first row whose name cell equals `program_name`.
///
/// Only the name cell is inspected, so malformed rows for other programs never get in the way.
pub fn find_template_row<'a>(rows: &'a [CellRow], program_name: &str) -> Option<&'a CellRow> {
    rows.iter()
        .find(|row| row.text_at(NAME_COLUMN).as_deref() == Some(program_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn programs_table() -> Vec<CellRow> {
        vec![
            vec![json!("101"), json!("sheet-a"), json!("11")],
            vec![json!("bad row")],
            vec![json!("201"), json!("sheet-b"), json!("1880812861")],
            vec![json!("201"), json!("sheet-c"), json!("7")],
        ]
    }

    #[test]
    fn test_first_matching_row_wins() {
        let rows = programs_table();
        let row = find_template_row(&rows, "201").unwrap();
        let entry = TemplateEntry::try_from_row(row).unwrap();
        assert_eq!(entry.program_name, "201");
        assert_eq!(entry.source, SheetRef::new("sheet-b", 1880812861));
    }

    #[test]
    fn test_missing_program() {
        let rows = programs_table();
        assert!(find_template_row(&rows, "999").is_none());
    }

    #[test]
    fn test_numeric_cells() {
        let row = vec![json!(301), json!("sheet-d"), json!(42)];
        let entry = TemplateEntry::try_from_row(&row).unwrap();
        assert_eq!(entry.program_name, "301");
        assert_eq!(entry.source.sheet_id, 42);
    }

    #[test]
    fn test_short_row() {
        let row = vec![json!("201"), json!("sheet-b")];
        assert_eq!(
            TemplateEntry::try_from_row(&row),
            Err(RowShapeError::MissingCell {
                column: 2,
                name: "source sheet id"
            })
        );
    }

    #[test]
    fn test_invalid_sheet_id() {
        let row = vec![json!("201"), json!("sheet-b"), json!("gid")];
        assert_eq!(
            TemplateEntry::try_from_row(&row),
            Err(RowShapeError::InvalidSheetId("gid".to_string()))
        );
    }
}
