use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Amount, serialize_amount};

/// Which of the two expense lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Costs paid once per year
    Yearly,
    /// Costs paid every month, annualized as 12x
    Monthly,
}

impl ListKind {
    pub const ALL: [ListKind; 2] = [ListKind::Yearly, ListKind::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Yearly => "yearly",
            ListKind::Monthly => "monthly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "yearly" | "year" | "y" => Some(ListKind::Yearly),
            "monthly" | "month" | "m" => Some(ListKind::Monthly),
            _ => None,
        }
    }

    /// Key of this list in import/export documents.
    pub fn document_key(&self) -> &'static str {
        match self {
            ListKind::Yearly => "yearlyExpenses",
            ListKind::Monthly => "monthlyExpenses",
        }
    }

    /// How many times per year an amount in this list is paid.
    pub fn periods_per_year(&self) -> Amount {
        match self {
            ListKind::Yearly => 1.0,
            ListKind::Monthly => 12.0,
        }
    }
}

impl std::str::FromStr for ListKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ListKind::from_str(s).ok_or_else(|| format!("unknown list '{}' (expected yearly or monthly)", s))
    }
}

impl std::fmt::Display for ListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Editable field of an expense item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Description,
    Amount,
}

impl ItemField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemField::Description => "description",
            ItemField::Amount => "amount",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "description" | "desc" => Some(ItemField::Description),
            "amount" => Some(ItemField::Amount),
            _ => None,
        }
    }
}

impl std::str::FromStr for ItemField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemField::from_str(s)
            .ok_or_else(|| format!("unknown field '{}' (expected description or amount)", s))
    }
}

impl std::fmt::Display for ItemField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseItem {
    pub id: String,
    pub description: String,
    #[serde(default, serialize_with = "serialize_amount")]
    pub amount: Amount,
}

impl ExpenseItem {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            amount: 0.0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = amount;
        self
    }

    /// Build an item from an arbitrary JSON value without rejecting it.
    ///
    /// Strings and numbers are accepted as ids; a missing id yields `None` so
    /// the caller can assign a fresh one. Missing or mistyped descriptions become
    /// empty and missing or mistyped amounts become 0.
    pub fn from_value_lenient(value: &Value) -> (Option<String>, Self) {
        let id = match value.get("id") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        let description = value
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let amount = value
            .get("amount")
            .and_then(Value::as_f64)
            .filter(|a| a.is_finite())
            .unwrap_or(0.0);

        let item = Self {
            id: id.clone().unwrap_or_default(),
            description,
            amount,
        };
        (id, item)
    }
}

/// Pick an id not used by any of `items`.
///
/// Numeric ids are continued from the largest one present.
pub fn next_item_id(items: &[ExpenseItem]) -> String {
    let mut candidate = items
        .iter()
        .filter_map(|item| item.id.parse::<u64>().ok())
        .max()
        .map_or(1, |max| max.saturating_add(1));

    loop {
        let id = candidate.to_string();
        if !items.iter().any(|item| item.id == id) {
            return id;
        }
        candidate = candidate.wrapping_add(1);
    }
}
