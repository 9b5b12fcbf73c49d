use std::fmt::Formatter;

/// One worksheet inside one spreadsheet.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SheetRef {
    pub spreadsheet_id: String,
    pub sheet_id: i32,
}

impl SheetRef {
    pub fn new(spreadsheet_id: impl Into<String>, sheet_id: i32) -> Self {
        SheetRef {
            spreadsheet_id: spreadsheet_id.into(),
            sheet_id,
        }
    }
}

impl std::fmt::Display for SheetRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#gid={}", self.spreadsheet_id, self.sheet_id)
    }
}

impl std::fmt::Debug for SheetRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SheetRef(spreadsheet: {}, sheet: {})",
            self.spreadsheet_id, self.sheet_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_ref_display() {
        let sheet = SheetRef::new("1tu0", 1880812861);
        assert_eq!(sheet.to_string(), "1tu0#gid=1880812861");
    }

    #[test]
    fn test_sheet_ref_debug() {
        let sheet = SheetRef::new("1tu0", 0);
        assert_eq!(format!("{:?}", sheet), "SheetRef(spreadsheet: 1tu0, sheet: 0)");
    }
}
