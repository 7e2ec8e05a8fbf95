use serde::{Deserialize, Serialize};

use super::{Amount, ExpenseItem, ItemField, ListKind, coerce_amount, next_item_id, serialize_amount};

/// Description of the placeholder row every fresh list starts with.
pub const PLACEHOLDER_DESCRIPTION: &str = "Miete Büro";

/// Expenses and expected revenue for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    pub yearly_expenses: Vec<ExpenseItem>,
    pub monthly_expenses: Vec<ExpenseItem>,
    #[serde(serialize_with = "serialize_amount")]
    pub revenue: Amount,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// A ledger with one placeholder row per list and no revenue.
    pub fn new() -> Self {
        let placeholder = ExpenseItem::new("1").with_description(PLACEHOLDER_DESCRIPTION);
        Self {
            yearly_expenses: vec![placeholder.clone()],
            monthly_expenses: vec![placeholder],
            revenue: 0.0,
        }
    }

    pub fn items(&self, kind: ListKind) -> &[ExpenseItem] {
        match kind {
            ListKind::Yearly => &self.yearly_expenses,
            ListKind::Monthly => &self.monthly_expenses,
        }
    }

    pub fn items_mut(&mut self, kind: ListKind) -> &mut Vec<ExpenseItem> {
        match kind {
            ListKind::Yearly => &mut self.yearly_expenses,
            ListKind::Monthly => &mut self.monthly_expenses,
        }
    }

    /// Append a blank item with a fresh id.
    pub fn add_item(&mut self, kind: ListKind) -> &ExpenseItem {
        let items = self.items_mut(kind);
        let id = next_item_id(items);
        items.push(ExpenseItem::new(id));
        &items[items.len() - 1]
    }

    /// Set one field on every item with the given id.
    /// Returns false if nothing matched.
    pub fn update_item(&mut self, kind: ListKind, id: &str, field: ItemField, value: &str) -> bool {
        let mut matched = false;
        for item in self.items_mut(kind).iter_mut().filter(|item| item.id == id) {
            match field {
                ItemField::Description => item.description = value.to_string(),
                ItemField::Amount => item.amount = coerce_amount(value),
            }
            matched = true;
        }
        matched
    }

    /// Remove every item with the given id, returning how many were removed.
    ///
    /// A list is never emptied by removal.
    pub fn remove_item(&mut self, kind: ListKind, id: &str) -> Result<usize, LedgerError> {
        let items = self.items_mut(kind);
        let matching = items.iter().filter(|item| item.id == id).count();

        if matching == 0 {
            return Err(LedgerError::ItemNotFound {
                list: kind,
                id: id.to_string(),
            });
        }
        if matching >= items.len() {
            return Err(LedgerError::LastItem(kind));
        }

        items.retain(|item| item.id != id);
        Ok(matching)
    }

    pub fn can_remove(&self, kind: ListKind) -> bool {
        self.items(kind).len() > 1
    }

    pub fn set_revenue(&mut self, revenue: Amount) {
        self.revenue = if revenue.is_finite() { revenue } else { 0.0 };
    }

    /// Set revenue from free-form input; unparseable input becomes 0.
    pub fn set_revenue_input(&mut self, input: &str) {
        self.revenue = coerce_amount(input);
    }

    pub fn totals(&self) -> Totals {
        compute_totals(self)
    }
}

/// Values derived from a ledger. Always recomputed, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    #[serde(serialize_with = "serialize_amount")]
    pub total_yearly_expenses: Amount,
    #[serde(serialize_with = "serialize_amount")]
    pub total_monthly_expenses: Amount,
    #[serde(serialize_with = "serialize_amount")]
    pub total_monthly_expenses_annual: Amount,
    #[serde(serialize_with = "serialize_amount")]
    pub total_expenses: Amount,
    #[serde(serialize_with = "serialize_amount")]
    pub revenue: Amount,
    #[serde(serialize_with = "serialize_amount")]
    pub difference: Amount,
}

impl Totals {
    /// True when revenue covers all expenses.
    pub fn is_profitable(&self) -> bool {
        self.difference >= 0.0
    }
}

/// Sum the amounts of a list.
pub fn sum_amounts(items: &[ExpenseItem]) -> Amount {
    items.iter().map(|item| item.amount).sum()
}

pub fn compute_totals(ledger: &Ledger) -> Totals {
    let total_yearly_expenses =
        sum_amounts(&ledger.yearly_expenses) * ListKind::Yearly.periods_per_year();
    let total_monthly_expenses = sum_amounts(&ledger.monthly_expenses);
    let total_monthly_expenses_annual =
        total_monthly_expenses * ListKind::Monthly.periods_per_year();
    let total_expenses = total_yearly_expenses + total_monthly_expenses_annual;

    Totals {
        total_yearly_expenses,
        total_monthly_expenses,
        total_monthly_expenses_annual,
        total_expenses,
        revenue: ledger.revenue,
        difference: ledger.revenue - total_expenses,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("No {list} expense with id '{id}'")]
    ItemNotFound { list: ListKind, id: String },

    #[error("Cannot remove the last {0} expense")]
    LastItem(ListKind),
}
