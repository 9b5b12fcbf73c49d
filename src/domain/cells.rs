use serde_json::Value;

/// A single row of a `ValueRange`, as returned by `spreadsheets.values.get`.
pub type CellRow = Vec<Value>;

pub trait CellText {
    /// Reads the cell as text.
    ///
    /// Strings are trimmed, numbers are rendered in decimal. Every other JSON value
    /// (and blank strings) count as an empty cell.
    /// # Examples
    /// ```
    /// use program_copier::domain::cells::CellText;
    /// use serde_json::json;
    /// assert_eq!(json!(" 201 ").cell_text(), Some("201".to_string()));
    /// assert_eq!(json!(1880812861).cell_text(), Some("1880812861".to_string()));
    /// assert_eq!(json!("").cell_text(), None);
    /// assert_eq!(json!(null).cell_text(), None);
    /// ```
    fn cell_text(&self) -> Option<String>;
}

impl CellText for Value {
    fn cell_text(&self) -> Option<String> {
        match self {
            Value::String(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            }
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }
}

pub trait RowCells {
    fn text_at(&self, column: usize) -> Option<String>;
}

impl RowCells for [Value] {
    fn text_at(&self, column: usize) -> Option<String> {
        self.get(column).and_then(CellText::cell_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_at_in_bounds() {
        let row: CellRow = vec![json!("Acme"), json!("1abc")];
        assert_eq!(row.text_at(0), Some("Acme".to_string()));
        assert_eq!(row.text_at(1), Some("1abc".to_string()));
    }

    #[test]
    fn test_text_at_out_of_bounds() {
        let row: CellRow = vec![json!("Acme")];
        assert_eq!(row.text_at(1), None);
    }

    #[test]
    fn test_bool_is_not_text() {
        assert_eq!(json!(true).cell_text(), None);
    }
}
