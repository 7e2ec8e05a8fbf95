use thiserror::Error;

use crate::domain::LedgerError;
use crate::io::{ClipboardError, ImportError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    #[error("Copy failed: {0}")]
    Clipboard(#[from] ClipboardError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export failed: {0}")]
    Export(#[from] anyhow::Error),
}
