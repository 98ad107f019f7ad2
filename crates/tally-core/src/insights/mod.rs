//! Derived financial analytics over a user's transaction history
//!
//! - `types` - the composed dashboard payload
//! - `aggregator` - the per-request computation against a `TransactionStore`

mod aggregator;
mod types;

pub use aggregator::compute_insights;
pub use types::{
    Dashboard, RecentTransaction, SpendingInsights, TransactionHighlight, WindowSummary,
    NO_TOP_CATEGORY,
};
