use std::fmt;

use crate::io::{ImportError, ImportSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Short user-facing message reporting how an import or copy went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }

    pub fn imported(summary: &ImportSummary) -> Self {
        Self::success(
            "Data imported",
            format!("Imported {}.", summary.accepted_fields().join(", ")),
        )
    }

    pub fn import_failed(error: &ImportError) -> Self {
        let description = match error {
            ImportError::Parse(_) => "The input does not contain valid JSON.".to_string(),
            ImportError::Validation => "The data does not have a valid format.".to_string(),
            ImportError::Read { .. } => error.to_string(),
        };
        Self::error("Import failed", description)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.kind {
            NotificationKind::Success => "ok",
            NotificationKind::Error => "error",
        };
        write!(f, "[{}] {}: {}", marker, self.title, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imported_lists_fields() {
        let summary = ImportSummary {
            yearly_expenses: Some(2),
            monthly_expenses: None,
            revenue: Some(10.0),
        };
        let note = Notification::imported(&summary);
        assert!(!note.is_error());
        assert_eq!(note.description, "Imported yearlyExpenses, revenue.");
    }

    #[test]
    fn test_display() {
        let note = Notification::error("Import failed", "The data does not have a valid format.");
        assert_eq!(
            note.to_string(),
            "[error] Import failed: The data does not have a valid format."
        );
    }
}
