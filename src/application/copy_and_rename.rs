use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{error, instrument, warn};

use crate::domain::{sheet_ref::SheetRef, sheet_title::SheetTitle};
use crate::ports::spreadsheet_gateway::{SpreadsheetGateway, SpreadsheetGatewayError};

use super::retry::{retry_operation, RetryPolicy};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The sheet landed in the destination. `renamed` is false when the copy kept its
    /// default "Copy of ..." title.
    Copied {
        sheet_id: i32,
        title: SheetTitle,
        renamed: bool,
    },
    /// Nothing was copied.
    Skipped { reason: String },
}

impl CopyOutcome {
    pub fn is_copied(&self) -> bool {
        matches!(self, CopyOutcome::Copied { .. })
    }
}

pub struct CopyAndRename {
    gateway: Arc<dyn SpreadsheetGateway>,
    retry: RetryPolicy,
}

impl std::fmt::Debug for CopyAndRename {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CopyAndRename {{ retry: {:?} }}", self.retry)
    }
}

impl CopyAndRename {
    pub fn new(gateway: Arc<dyn SpreadsheetGateway>, retry: RetryPolicy) -> Self {
        CopyAndRename { gateway, retry }
    }

    /// Copies `source` into `destination_spreadsheet_id` and titles the copy after the program
    /// and `date`. Never fails: whatever went wrong is folded into the outcome, and a copy whose
    /// rename failed stays where it is.
    #[instrument]
    pub async fn run(
        &self,
        source: &SheetRef,
        destination_spreadsheet_id: &str,
        program_name: &str,
        date: NaiveDate,
    ) -> CopyOutcome {
        let copied = retry_operation(&self.retry, "copy sheet", || {
            self.gateway.copy_sheet_to(source, destination_spreadsheet_id)
        })
        .await;

        let sheet_id = match copied {
            Ok(Some(sheet_id)) => sheet_id,
            Ok(None) => {
                return CopyOutcome::Skipped {
                    reason: format!("copy failed after {} attempts", self.retry.attempts()),
                }
            }
            Err(report) => {
                error!("Copy of {} failed: {:?}", source, report);
                return CopyOutcome::Skipped {
                    reason: report.current_context().to_string(),
                };
            }
        };

        let title = SheetTitle::for_program(program_name, date);
        let renamed = retry_operation(&self.retry, "rename sheet", || {
            self.gateway
                .rename_sheet(destination_spreadsheet_id, sheet_id, title.as_str())
        })
        .await;

        let renamed = match renamed {
            Ok(Some(())) => true,
            Ok(None) => false,
            Err(report) => match report.current_context() {
                SpreadsheetGatewayError::Shape(details) => {
                    warn!(
                        "Rename of sheet {} answered with an unexpected shape ({}), assuming it was applied",
                        sheet_id, details
                    );
                    true
                }
                _ => {
                    error!("Rename of sheet {} failed: {:?}", sheet_id, report);
                    false
                }
            },
        };

        CopyOutcome::Copied {
            sheet_id,
            title,
            renamed,
        }
    }
}
