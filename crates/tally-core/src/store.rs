//! Read interface the insights aggregator consumes
//!
//! The aggregator never touches SQL directly - it issues filtered reads and
//! aggregations through this trait, so it can be driven by any store that
//! partitions transactions per user and kind.

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{CategoryTotal, Transaction, TransactionKind};

/// A half-open day-granularity interval: `start` inclusive, `end` exclusive.
/// Either bound may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Everything on or after `start`.
    pub fn since(start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// `[start, end)`.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }
}

/// Filtered/sorted/aggregated reads over one user's transaction partitions.
pub trait TransactionStore {
    /// Sum of amounts for the partition, optionally restricted to a range.
    fn sum_where(
        &self,
        user_id: &str,
        kind: TransactionKind,
        range: Option<DateRange>,
    ) -> Result<f64>;

    /// Matching transactions, always newest first. `limit` caps the result.
    fn find_where(
        &self,
        user_id: &str,
        kind: TransactionKind,
        range: Option<DateRange>,
        limit: Option<u32>,
    ) -> Result<Vec<Transaction>>;

    /// The single largest transaction by amount, if the partition is
    /// non-empty. Ties break by the store's natural order.
    fn find_top_by_amount(
        &self,
        user_id: &str,
        kind: TransactionKind,
    ) -> Result<Option<Transaction>>;

    /// Per-category sums, descending by sum. Categories aggregating to zero
    /// are excluded.
    fn group_sum_by_category(
        &self,
        user_id: &str,
        kind: TransactionKind,
        range: Option<DateRange>,
    ) -> Result<Vec<CategoryTotal>>;
}
