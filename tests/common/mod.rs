// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use costcalc::CalculatorSession;
use costcalc::domain::{CurrencyFormat, ItemField, ListKind};
use costcalc::io::ClipboardSink;
use tempfile::TempDir;

/// Session whose clipboard is a file inside a temporary directory
pub fn test_session() -> Result<(CalculatorSession, PathBuf, TempDir)> {
    let temp_dir = TempDir::new()?;
    let clipboard_path = temp_dir.path().join("clipboard.json");
    let session = CalculatorSession::new(
        CurrencyFormat::default(),
        ClipboardSink::File(clipboard_path.clone()),
    );
    Ok((session, clipboard_path, temp_dir))
}

/// Write `contents` to `name` inside `dir` and return the path
pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.path().join(name);
    std::fs::write(&path, contents)?;
    Ok(path)
}

/// Test fixture: the worked example of a small office
pub struct StandardExpenses;

impl StandardExpenses {
    /// Yearly software 1200, monthly internet 50, revenue 5000
    pub fn create(session: &mut CalculatorSession) -> Result<()> {
        let software = session.add_item(ListKind::Yearly);
        session.update_item(ListKind::Yearly, &software.id, ItemField::Description, "Software")?;
        session.update_item(ListKind::Yearly, &software.id, ItemField::Amount, "1200")?;

        let internet = session.add_item(ListKind::Monthly);
        session.update_item(ListKind::Monthly, &internet.id, ItemField::Description, "Internet")?;
        session.update_item(ListKind::Monthly, &internet.id, ItemField::Amount, "50")?;

        session.set_revenue("5000");
        Ok(())
    }
}
