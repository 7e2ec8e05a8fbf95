use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{Amount, ExpenseItem, Ledger, ListKind, next_item_id};

/// Fields that an import replaced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSummary {
    /// Number of yearly items installed, if the list was replaced
    pub yearly_expenses: Option<usize>,
    /// Number of monthly items installed, if the list was replaced
    pub monthly_expenses: Option<usize>,
    /// New revenue, if it was replaced
    pub revenue: Option<Amount>,
}

impl ImportSummary {
    pub fn accepted_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.yearly_expenses.is_some() {
            fields.push(ListKind::Yearly.document_key());
        }
        if self.monthly_expenses.is_some() {
            fields.push(ListKind::Monthly.document_key());
        }
        if self.revenue.is_some() {
            fields.push("revenue");
        }
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.accepted_fields().is_empty()
    }
}

/// Why an import was rejected. The ledger is never touched when one is returned.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Input is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Data has no valid format: expected yearlyExpenses, monthlyExpenses or revenue")]
    Validation,

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ImportError {
    /// True for errors caused by the text itself rather than by reading it.
    pub fn is_format_error(&self) -> bool {
        matches!(self, ImportError::Parse(_) | ImportError::Validation)
    }
}

/// Decode raw text as JSON.
pub fn parse(raw: &str) -> Result<Value, ImportError> {
    Ok(serde_json::from_str(raw)?)
}

/// Replace whichever of yearlyExpenses, monthlyExpenses and revenue are present
/// and well-typed. Fails without touching the ledger if none are.
pub fn validate_and_merge(ledger: &mut Ledger, value: &Value) -> Result<ImportSummary, ImportError> {
    let yearly = value
        .get(ListKind::Yearly.document_key())
        .and_then(Value::as_array)
        .map(|items| coerce_items(items));
    let monthly = value
        .get(ListKind::Monthly.document_key())
        .and_then(Value::as_array)
        .map(|items| coerce_items(items));
    let revenue = value
        .get("revenue")
        .filter(|v| v.is_number())
        .and_then(Value::as_f64);

    if yearly.is_none() && monthly.is_none() && revenue.is_none() {
        return Err(ImportError::Validation);
    }

    let mut summary = ImportSummary::default();
    if let Some(items) = yearly {
        summary.yearly_expenses = Some(items.len());
        ledger.yearly_expenses = items;
    }
    if let Some(items) = monthly {
        summary.monthly_expenses = Some(items.len());
        ledger.monthly_expenses = items;
    }
    if let Some(revenue) = revenue {
        summary.revenue = Some(revenue);
        ledger.set_revenue(revenue);
    }

    debug!(fields = ?summary.accepted_fields(), "merged import");
    Ok(summary)
}

/// Parse then merge. This is where file and pasted input converge.
pub fn import_text(ledger: &mut Ledger, raw: &str) -> Result<ImportSummary, ImportError> {
    let value = parse(raw)?;
    validate_and_merge(ledger, &value)
}

/// Read an import file. The `.json` extension is advisory; other files are read too.
pub async fn read_import_file(path: &Path) -> Result<String, ImportError> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        warn!(path = %path.display(), "import file does not have a .json extension");
    }

    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ImportError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Accept every element of an imported list. Elements without an id get one
/// that is unique within the list.
fn coerce_items(values: &[Value]) -> Vec<ExpenseItem> {
    let coerced: Vec<(Option<String>, ExpenseItem)> =
        values.iter().map(ExpenseItem::from_value_lenient).collect();

    let mut taken: Vec<ExpenseItem> = coerced
        .iter()
        .filter(|(id, _)| id.is_some())
        .map(|(_, item)| item.clone())
        .collect();

    coerced
        .into_iter()
        .map(|(id, mut item)| {
            if id.is_none() {
                item.id = next_item_id(&taken);
                taken.push(item.clone());
            }
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::PLACEHOLDER_DESCRIPTION;

    #[test]
    fn test_parse_malformed() {
        let result = parse("{not json");
        assert!(matches!(result, Err(ImportError::Parse(_))));
    }

    #[test]
    fn test_empty_object_fails_and_leaves_ledger() {
        let mut ledger = Ledger::new();
        let before = ledger.clone();

        let result = import_text(&mut ledger, "{}");
        assert!(matches!(result, Err(ImportError::Validation)));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_revenue_only() {
        let mut ledger = Ledger::new();
        ledger.add_item(ListKind::Yearly);
        let before = ledger.clone();

        let summary = import_text(&mut ledger, r#"{"revenue": 50000}"#).unwrap();
        assert_eq!(summary.revenue, Some(50000.0));
        assert_eq!(summary.accepted_fields(), vec!["revenue"]);
        assert_eq!(ledger.revenue, 50000.0);
        assert_eq!(ledger.yearly_expenses, before.yearly_expenses);
        assert_eq!(ledger.monthly_expenses, before.monthly_expenses);
    }

    #[test]
    fn test_mistyped_fields_are_ignored() {
        let mut ledger = Ledger::new();
        let value = json!({
            "yearlyExpenses": "not a list",
            "monthlyExpenses": [{"id": "1", "description": "Internet", "amount": 50}],
            "revenue": "5000"
        });

        let summary = validate_and_merge(&mut ledger, &value).unwrap();
        assert_eq!(summary.accepted_fields(), vec!["monthlyExpenses"]);
        assert_eq!(ledger.yearly_expenses[0].description, PLACEHOLDER_DESCRIPTION);
        assert_eq!(ledger.monthly_expenses[0].description, "Internet");
        assert_eq!(ledger.revenue, 0.0);
    }

    #[test]
    fn test_all_mistyped_fails() {
        let mut ledger = Ledger::new();
        let before = ledger.clone();
        let value = json!({"yearlyExpenses": {}, "monthlyExpenses": null, "revenue": true});

        assert!(matches!(
            validate_and_merge(&mut ledger, &value),
            Err(ImportError::Validation)
        ));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_non_object_documents_fail_validation() {
        for raw in ["[1, 2, 3]", "42", "null", "\"text\""] {
            let mut ledger = Ledger::new();
            let result = import_text(&mut ledger, raw);
            assert!(matches!(result, Err(ImportError::Validation)), "{raw}");
        }
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut ledger = Ledger::new();
        let summary = import_text(
            &mut ledger,
            r#"{"revenue": 1, "totalExpenses": 999, "currency": "EUR"}"#,
        )
        .unwrap();
        assert_eq!(summary.accepted_fields(), vec!["revenue"]);
    }

    #[test]
    fn test_malformed_items_accepted_with_fresh_ids() {
        let mut ledger = Ledger::new();
        let value = json!({
            "yearlyExpenses": [
                {"description": "no id", "amount": 10},
                {"id": "1", "amount": "bad"},
                7,
                {"id": 2, "description": "numeric id"}
            ]
        });

        let summary = validate_and_merge(&mut ledger, &value).unwrap();
        assert_eq!(summary.yearly_expenses, Some(4));

        let items = &ledger.yearly_expenses;
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "4", "2"]);
        assert_eq!(items[0].amount, 10.0);
        assert_eq!(items[1].amount, 0.0);
        assert_eq!(items[2].description, "");
        assert_eq!(items[3].description, "numeric id");
    }

    #[test]
    fn test_empty_list_is_accepted() {
        let mut ledger = Ledger::new();
        let summary = import_text(&mut ledger, r#"{"monthlyExpenses": []}"#).unwrap();
        assert_eq!(summary.monthly_expenses, Some(0));
        assert!(ledger.monthly_expenses.is_empty());
    }
}
