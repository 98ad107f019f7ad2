//! Dashboard payload types
//!
//! Recomputed per request; nothing here has persisted identity.

use serde::Serialize;

use crate::models::{CategoryTotal, Transaction, TransactionKind};

/// Sentinel top category for an empty month.
pub const NO_TOP_CATEGORY: &str = "None";

/// A rolling-window slice: the matching transactions (newest first) and
/// their sum.
#[derive(Debug, Clone, Serialize)]
pub struct WindowSummary {
    pub total: f64,
    pub transactions: Vec<Transaction>,
}

/// A transaction tagged with the partition it came from, for the merged
/// recent-activity list.
#[derive(Debug, Clone, Serialize)]
pub struct RecentTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(flatten)]
    pub transaction: Transaction,
}

/// Amount + category of a single notable transaction.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionHighlight {
    pub amount: f64,
    pub category: String,
}

/// Spending insights block of the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct SpendingInsights {
    /// Current calendar-month expense sums by category, descending
    pub per_category: Vec<CategoryTotal>,
    /// Rolling last-30-days expense total (the comparison baseline the
    /// source feeds into change_percent, not the calendar month)
    pub this_month: f64,
    /// Previous calendar-month expense total
    pub last_month: f64,
    pub top_category: String,
    pub top_category_amount: f64,
    /// Month-over-month change; None when there is no prior-month baseline
    pub change_percent: Option<f64>,
    pub summary: String,
    pub largest_expense: Option<TransactionHighlight>,
    pub largest_income: Option<TransactionHighlight>,
    /// All-time income sums by category, descending
    pub income_per_category: Vec<CategoryTotal>,
    /// Exactly 3 per-month expense totals, oldest first
    pub trend_3_months: Vec<f64>,
}

/// The full analytics payload for one user at one reference date.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub total_balance: f64,
    pub total_income: f64,
    pub total_expense: f64,
    pub last_60_days_income: WindowSummary,
    pub last_30_days_expense: WindowSummary,
    pub recent_transactions: Vec<RecentTransaction>,
    pub insights: SpendingInsights,
}
