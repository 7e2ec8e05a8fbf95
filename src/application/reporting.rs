use serde::Serialize;

use crate::domain::{CurrencyFormat, Ledger, ListKind, Totals};

/// One labelled line of the summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub label: &'static str,
    pub amount: f64,
    pub formatted: String,
}

/// Display-ready summary of a ledger.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub totals: Totals,
    pub rows: Vec<SummaryRow>,
    pub profitable: bool,
}

impl SummaryReport {
    pub fn build(totals: Totals, currency: &CurrencyFormat) -> Self {
        let row = |label, amount| SummaryRow {
            label,
            amount,
            formatted: currency.format(amount),
        };

        let rows = vec![
            row("Yearly expenses", totals.total_yearly_expenses),
            row("Monthly expenses", totals.total_monthly_expenses),
            row("Monthly expenses (annualized)", totals.total_monthly_expenses_annual),
            row("Total expenses", totals.total_expenses),
            row("Expected revenue", totals.revenue),
            row("Difference", totals.difference),
        ];

        Self {
            totals,
            rows,
            profitable: totals.is_profitable(),
        }
    }
}

/// One line item prepared for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    pub id: String,
    pub description: String,
    pub formatted: String,
}

pub fn item_rows(ledger: &Ledger, kind: ListKind, currency: &CurrencyFormat) -> Vec<ItemRow> {
    ledger
        .items(kind)
        .iter()
        .map(|item| ItemRow {
            id: item.id.clone(),
            description: item.description.clone(),
            formatted: currency.format(item.amount),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_rows() {
        let mut ledger = Ledger::new();
        ledger.yearly_expenses[0].amount = 1200.0;
        ledger.monthly_expenses[0].amount = 50.0;
        ledger.set_revenue(1000.0);

        let report = SummaryReport::build(ledger.totals(), &CurrencyFormat::default());
        let formatted: Vec<&str> = report.rows.iter().map(|r| r.formatted.as_str()).collect();
        assert_eq!(
            formatted,
            vec!["1.200,00 €", "50,00 €", "600,00 €", "1.800,00 €", "1.000,00 €", "-800,00 €"]
        );
        assert!(!report.profitable);
    }
}
