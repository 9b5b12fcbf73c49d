use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicI32, AtomicU32, Ordering};
use std::sync::Mutex;

use error_stack::report;

use crate::domain::{cells::CellRow, sheet_ref::SheetRef};
use crate::ports::spreadsheet_gateway::{SpreadsheetGateway, SpreadsheetGatewayError};

/// In-memory stand-in for the Sheets API with scripted failures.
#[derive(Default)]
pub struct FakeGateway {
    tables: HashMap<(String, String), Vec<CellRow>>,
    read_failures: Mutex<VecDeque<SpreadsheetGatewayError>>,
    copy_failures: Mutex<HashMap<String, VecDeque<SpreadsheetGatewayError>>>,
    rename_failures: Mutex<HashMap<String, VecDeque<SpreadsheetGatewayError>>>,
    next_sheet_id: AtomicI32,
    copy_attempts: AtomicU32,
    copies: Mutex<Vec<(SheetRef, String)>>,
    renames: Mutex<Vec<(String, i32, String)>>,
}

impl FakeGateway {
    pub fn with_table(mut self, spreadsheet_id: &str, range: &str, rows: Vec<CellRow>) -> Self {
        self.tables
            .insert((spreadsheet_id.to_string(), range.to_string()), rows);
        self
    }

    pub fn fail_reads(self, error: SpreadsheetGatewayError, times: usize) -> Self {
        self.read_failures
            .lock()
            .unwrap()
            .extend(std::iter::repeat(error).take(times));
        self
    }

    pub fn fail_copies(
        self,
        destination: &str,
        error: SpreadsheetGatewayError,
        times: usize,
    ) -> Self {
        self.copy_failures
            .lock()
            .unwrap()
            .entry(destination.to_string())
            .or_default()
            .extend(std::iter::repeat(error).take(times));
        self
    }

    pub fn fail_renames(
        self,
        spreadsheet_id: &str,
        error: SpreadsheetGatewayError,
        times: usize,
    ) -> Self {
        self.rename_failures
            .lock()
            .unwrap()
            .entry(spreadsheet_id.to_string())
            .or_default()
            .extend(std::iter::repeat(error).take(times));
        self
    }

    /// Successful copies, in call order.
    pub fn copies(&self) -> Vec<(SheetRef, String)> {
        self.copies.lock().unwrap().clone()
    }

    /// Successful renames, in call order.
    pub fn renames(&self) -> Vec<(String, i32, String)> {
        self.renames.lock().unwrap().clone()
    }

    pub fn copy_attempts(&self) -> u32 {
        self.copy_attempts.load(Ordering::SeqCst)
    }

    fn scripted_failure(
        failures: &Mutex<HashMap<String, VecDeque<SpreadsheetGatewayError>>>,
        key: &str,
    ) -> Option<SpreadsheetGatewayError> {
        failures
            .lock()
            .unwrap()
            .get_mut(key)
            .and_then(VecDeque::pop_front)
    }
}

#[async_trait::async_trait]
impl SpreadsheetGateway for FakeGateway {
    async fn read_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> error_stack::Result<Vec<CellRow>, SpreadsheetGatewayError> {
        if let Some(error) = self.read_failures.lock().unwrap().pop_front() {
            return Err(report!(error));
        }
        Ok(self
            .tables
            .get(&(spreadsheet_id.to_string(), range.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn copy_sheet_to(
        &self,
        source: &SheetRef,
        destination_spreadsheet_id: &str,
    ) -> error_stack::Result<i32, SpreadsheetGatewayError> {
        self.copy_attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(error) =
            Self::scripted_failure(&self.copy_failures, destination_spreadsheet_id)
        {
            return Err(report!(error));
        }
        self.copies
            .lock()
            .unwrap()
            .push((source.clone(), destination_spreadsheet_id.to_string()));
        Ok(1000 + self.next_sheet_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn rename_sheet(
        &self,
        spreadsheet_id: &str,
        sheet_id: i32,
        title: &str,
    ) -> error_stack::Result<(), SpreadsheetGatewayError> {
        if let Some(error) = Self::scripted_failure(&self.rename_failures, spreadsheet_id) {
            return Err(report!(error));
        }
        self.renames
            .lock()
            .unwrap()
            .push((spreadsheet_id.to_string(), sheet_id, title.to_string()));
        Ok(())
    }
}
