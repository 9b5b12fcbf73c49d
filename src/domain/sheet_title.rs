use chrono::NaiveDate;

/// Title given to a freshly copied program sheet: `"<program> - MM/YY"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetTitle(String);

impl SheetTitle {
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use program_copier::domain::sheet_title::SheetTitle;
    /// let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    /// assert_eq!(SheetTitle::for_program("201", date).as_str(), "201 - 03/26");
    /// ```
    pub fn for_program(program_name: &str, date: NaiveDate) -> Self {
        SheetTitle(format!("{} - {}", program_name, date.format("%m/%y")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SheetTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SheetTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
