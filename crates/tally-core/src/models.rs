//! Domain models for Tally

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Transaction kind - income and expense records share a shape but live in
/// separate storage partitions and are always queried separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Table holding this partition.
    pub(crate) fn table(&self) -> &'static str {
        match self {
            Self::Income => "income_transactions",
            Self::Expense => "expense_transactions",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction kind: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded transaction (either partition)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: String,
    pub date: NaiveDate,
    pub description: String,
    pub merchant: String,
    pub amount: f64,
    /// Final label: caller-supplied, or the classifier suggestion when the
    /// caller left it blank
    pub category: String,
    /// Classifier output, retained even when the caller overrode it
    pub suggested_category: String,
    /// Optional display glyph, carried opaquely
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A transaction about to be inserted (id and created_at come from the store)
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub user_id: String,
    pub date: NaiveDate,
    pub description: String,
    pub merchant: String,
    pub amount: f64,
    pub category: String,
    pub suggested_category: String,
    pub icon: Option<String>,
}

/// Aggregated amount for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        assert_eq!(
            "income".parse::<TransactionKind>().unwrap(),
            TransactionKind::Income
        );
        assert_eq!(
            "EXPENSE".parse::<TransactionKind>().unwrap(),
            TransactionKind::Expense
        );
        assert!("transfer".parse::<TransactionKind>().is_err());
        assert_eq!(TransactionKind::Income.to_string(), "income");
    }

    #[test]
    fn test_kind_serde_lowercase() {
        let json = serde_json::to_string(&TransactionKind::Expense).unwrap();
        assert_eq!(json, "\"expense\"");
    }
}
