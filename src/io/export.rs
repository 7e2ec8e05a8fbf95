use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use crate::domain::{Amount, ExpenseItem, Ledger, ListKind, format_amount, serialize_amount};

/// Export document: the import shape plus derived totals.
/// The importer ignores the derived fields on the way back in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument<'a> {
    pub yearly_expenses: &'a [ExpenseItem],
    pub monthly_expenses: &'a [ExpenseItem],
    #[serde(serialize_with = "serialize_amount")]
    pub total_yearly_expenses: Amount,
    #[serde(serialize_with = "serialize_amount")]
    pub total_monthly_expenses_annual: Amount,
    #[serde(serialize_with = "serialize_amount")]
    pub total_expenses: Amount,
    #[serde(serialize_with = "serialize_amount")]
    pub revenue: Amount,
    #[serde(serialize_with = "serialize_amount")]
    pub difference: Amount,
}

impl<'a> ExportDocument<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        let totals = ledger.totals();
        Self {
            yearly_expenses: &ledger.yearly_expenses,
            monthly_expenses: &ledger.monthly_expenses,
            total_yearly_expenses: totals.total_yearly_expenses,
            total_monthly_expenses_annual: totals.total_monthly_expenses_annual,
            total_expenses: totals.total_expenses,
            revenue: totals.revenue,
            difference: totals.difference,
        }
    }
}

/// Render the ledger as pretty-printed JSON (two-space indent).
pub fn serialize(ledger: &Ledger) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ExportDocument::new(ledger))?)
}

/// Write the export document, followed by a newline.
pub fn export_json<W: Write>(ledger: &Ledger, mut writer: W) -> Result<()> {
    let json = serialize(ledger)?;
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Export every line item of both lists to CSV. Returns the number of rows.
pub fn export_items_csv<W: Write>(ledger: &Ledger, writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    // Write header
    csv_writer.write_record(["list", "id", "description", "amount"])?;

    let mut count = 0;
    for kind in ListKind::ALL {
        for item in ledger.items(kind) {
            csv_writer.write_record([
                kind.as_str(),
                item.id.as_str(),
                item.description.as_str(),
                format_amount(item.amount).as_str(),
            ])?;
            count += 1;
        }
    }

    csv_writer.flush()?;
    Ok(count)
}
