use std::io::Write;

use anyhow::Result;

use crate::application::{SummaryReport, item_rows};
use crate::domain::{CurrencyFormat, Ledger, ListKind};

const DESCRIPTION_WIDTH: usize = 30;

pub fn list_title(kind: ListKind) -> &'static str {
    match kind {
        ListKind::Yearly => "Yearly expenses",
        ListKind::Monthly => "Monthly expenses",
    }
}

pub fn write_items<W: Write>(
    out: &mut W,
    ledger: &Ledger,
    kind: ListKind,
    currency: &CurrencyFormat,
) -> Result<()> {
    writeln!(out, "{}", list_title(kind))?;
    let rows = item_rows(ledger, kind, currency);
    if rows.is_empty() {
        writeln!(out, "  No expenses.")?;
        return Ok(());
    }

    writeln!(out, "  {:<6} {:<30} {:>16}", "ID", "DESCRIPTION", "AMOUNT")?;
    writeln!(out, "  {}", "-".repeat(54))?;
    for row in rows {
        writeln!(
            out,
            "  {:<6} {:<30} {:>16}",
            row.id,
            truncate(&row.description, DESCRIPTION_WIDTH),
            row.formatted
        )?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(out: &mut W, report: &SummaryReport) -> Result<()> {
    writeln!(out, "Summary")?;
    for row in &report.rows {
        writeln!(out, "  {:<32} {:>16}", format!("{}:", row.label), row.formatted)?;
    }
    writeln!(
        out,
        "  {}",
        if report.profitable {
            "Revenue covers all expenses."
        } else {
            "Expenses exceed revenue."
        }
    )?;
    Ok(())
}

pub fn write_ledger<W: Write>(
    out: &mut W,
    ledger: &Ledger,
    report: &SummaryReport,
    currency: &CurrencyFormat,
) -> Result<()> {
    for kind in ListKind::ALL {
        write_items(out, ledger, kind, currency)?;
        writeln!(out)?;
    }
    write_summary(out, report)
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
