use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::domain::{
    Amount, CurrencyFormat, ExpenseItem, ItemField, Ledger, LedgerError, ListKind, Totals,
};
use crate::io::{self, ClipboardSink, ImportError, ImportSummary};

use super::{AppError, Notification, SummaryReport};

/// One calculator session. Owns the ledger for as long as the session lasts and
/// is the primary interface for any client (CLI, shell, tests).
pub struct CalculatorSession {
    ledger: Ledger,
    currency: CurrencyFormat,
    clipboard: ClipboardSink,
}

impl CalculatorSession {
    pub fn new(currency: CurrencyFormat, clipboard: ClipboardSink) -> Self {
        Self {
            ledger: Ledger::new(),
            currency,
            clipboard,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.currency.clone(), settings.clipboard.sink())
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn currency(&self) -> &CurrencyFormat {
        &self.currency
    }

    pub fn clipboard(&self) -> &ClipboardSink {
        &self.clipboard
    }

    /// Start over with the placeholder ledger.
    pub fn reset(&mut self) {
        info!("resetting ledger");
        self.ledger = Ledger::new();
    }

    // ========================
    // Ledger operations
    // ========================

    pub fn add_item(&mut self, kind: ListKind) -> ExpenseItem {
        let item = self.ledger.add_item(kind).clone();
        debug!(list = %kind, id = %item.id, "added item");
        item
    }

    pub fn update_item(
        &mut self,
        kind: ListKind,
        id: &str,
        field: ItemField,
        value: &str,
    ) -> Result<(), AppError> {
        if self.ledger.update_item(kind, id, field, value) {
            debug!(list = %kind, id, %field, "updated item");
            Ok(())
        } else {
            debug!(list = %kind, id, "update ignored, no such item");
            Err(LedgerError::ItemNotFound {
                list: kind,
                id: id.to_string(),
            }
            .into())
        }
    }

    pub fn remove_item(&mut self, kind: ListKind, id: &str) -> Result<usize, AppError> {
        let removed = self.ledger.remove_item(kind, id)?;
        debug!(list = %kind, id, removed, "removed item");
        Ok(removed)
    }

    pub fn set_revenue(&mut self, input: &str) -> Amount {
        self.ledger.set_revenue_input(input);
        debug!(revenue = self.ledger.revenue, "set revenue");
        self.ledger.revenue
    }

    pub fn totals(&self) -> Totals {
        self.ledger.totals()
    }

    pub fn summary(&self) -> SummaryReport {
        SummaryReport::build(self.totals(), &self.currency)
    }

    // ========================
    // Import / export
    // ========================

    /// Import pasted or otherwise supplied text. The ledger is untouched on failure.
    pub fn import_text(&mut self, raw: &str) -> Result<ImportSummary, ImportError> {
        let result = io::import_text(&mut self.ledger, raw);
        log_import("text", &result);
        result
    }

    /// Read a file and import its contents.
    pub async fn import_file(&mut self, path: &Path) -> Result<ImportSummary, ImportError> {
        let result = match io::read_import_file(path).await {
            Ok(raw) => io::import_text(&mut self.ledger, &raw),
            Err(e) => Err(e),
        };
        log_import(&path.display().to_string(), &result);
        result
    }

    /// Import text and report the outcome as a notification.
    pub fn import_text_notify(&mut self, raw: &str) -> Notification {
        notify_import(self.import_text(raw))
    }

    /// Import a file and report the outcome as a notification.
    pub async fn import_file_notify(&mut self, path: &Path) -> Notification {
        notify_import(self.import_file(path).await)
    }

    pub fn export_json(&self) -> Result<String, AppError> {
        Ok(io::serialize(&self.ledger)?)
    }

    /// Copy the export document to the configured clipboard sink.
    pub async fn copy_to_clipboard(&self) -> Result<(), AppError> {
        let json = self.export_json()?;
        self.clipboard.write_text(&json).await?;
        info!(sink = %self.clipboard.describe(), "copied export document");
        Ok(())
    }

    pub async fn copy_to_clipboard_notify(&self) -> Notification {
        match self.copy_to_clipboard().await {
            Ok(()) => Notification::success(
                "Data copied",
                format!("All data was copied as JSON to {}.", self.clipboard.describe()),
            ),
            Err(e) => {
                warn!(error = %e, "copy failed");
                Notification::error("Copy failed", e.to_string())
            }
        }
    }
}

fn log_import(source: &str, result: &Result<ImportSummary, ImportError>) {
    match result {
        Ok(summary) => info!(source, fields = ?summary.accepted_fields(), "import succeeded"),
        Err(e) => warn!(source, error = %e, "import rejected"),
    }
}

fn notify_import(result: Result<ImportSummary, ImportError>) -> Notification {
    match result {
        Ok(summary) => Notification::imported(&summary),
        Err(e) => Notification::import_failed(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> CalculatorSession {
        CalculatorSession::new(CurrencyFormat::default(), ClipboardSink::Stdout)
    }

    #[test]
    fn test_update_missing_item_reports_not_found() {
        let mut session = session();
        let before = session.ledger().clone();
        let result = session.update_item(ListKind::Yearly, "42", ItemField::Amount, "1");
        assert!(matches!(
            result,
            Err(AppError::Ledger(LedgerError::ItemNotFound { .. }))
        ));
        assert_eq!(session.ledger(), &before);
    }

    #[test]
    fn test_failed_import_notification() {
        let mut session = session();
        let note = session.import_text_notify("{not json");
        assert!(note.is_error());
        assert_eq!(note.description, "The input does not contain valid JSON.");

        let note = session.import_text_notify("{}");
        assert!(note.is_error());
        assert_eq!(note.description, "The data does not have a valid format.");
    }

    #[test]
    fn test_reset_restores_placeholder() {
        let mut session = session();
        session.add_item(ListKind::Monthly);
        session.set_revenue("100");
        session.reset();
        assert_eq!(session.ledger(), &Ledger::new());
    }
}
