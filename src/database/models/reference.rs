use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of a normalization table. The label column is aliased to
/// `label` when selected, whatever the table calls it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ReferenceEntity {
    pub id: i64,
    pub label: Option<String>,
}

impl ReferenceEntity {
    pub fn new(id: i64, label: impl Into<String>) -> Self {
        Self { id, label: Some(label.into()) }
    }

    /// Label when present and non-empty
    pub fn usable_label(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.is_empty())
    }
}
